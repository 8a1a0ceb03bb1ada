//! Stage 5: region finalization — border extraction and label anchor placement

use crate::components::BuildingRegion;
use crate::config::WorksheetConfig;
use crate::types::{Point, Region};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Convert merged `BuildingRegion`s into fully finalized `Region`s: compute each
/// region's border pixels, its raw centroid, and correct the centroid onto a
/// pixel that actually lies inside the region.
pub fn finalize_regions(
    regions: Vec<BuildingRegion>,
    region_map: &[u32],
    width: u32,
    height: u32,
    config: &WorksheetConfig,
) -> Vec<Region> {
    let mut rng = match config.rng_seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    };

    log::debug!("region finalization: {} region(s) to finalize", regions.len());

    let finalized: Vec<Region> = regions
        .into_iter()
        .map(|region| {
            let border_pixels = find_border_pixels(&region, region_map, width, height);
            let (raw_x, raw_y) = raw_centroid(&region.pixels, width);
            let centroid = correct_anchor(&region, region_map, raw_x, raw_y, width, config, &mut rng);

            Region {
                id: region.id,
                color_id: region.color_id,
                pixels: region.pixels,
                centroid,
                border_pixels,
            }
        })
        .collect();

    log::debug!("region finalization: {} region(s) finalized", finalized.len());

    finalized
}

fn find_border_pixels(region: &BuildingRegion, region_map: &[u32], width: u32, height: u32) -> Vec<u32> {
    let own_id = region.id;
    region
        .pixels
        .iter()
        .copied()
        .filter(|&p| {
            let x = p % width;
            let y = p / width;

            let out_of_bounds_or_foreign = |in_bounds: bool, neighbor: u32| -> bool {
                !in_bounds || region_map[neighbor as usize] != own_id
            };

            out_of_bounds_or_foreign(x > 0, p.wrapping_sub(1))
                || out_of_bounds_or_foreign(x + 1 < width, p + 1)
                || out_of_bounds_or_foreign(y > 0, p.wrapping_sub(width))
                || out_of_bounds_or_foreign(y + 1 < height, p + width)
        })
        .collect()
}

fn raw_centroid(pixels: &[u32], width: u32) -> (u32, u32) {
    let mut sum_x: u64 = 0;
    let mut sum_y: u64 = 0;
    for &p in pixels {
        sum_x += (p % width) as u64;
        sum_y += (p / width) as u64;
    }
    let count = pixels.len() as u64;
    ((sum_x / count) as u32, (sum_y / count) as u32)
}

/// If the raw centroid falls inside the region, use it directly. Otherwise search
/// for the nearest in-region pixel, scanning exhaustively for small regions and
/// sampling for large ones (per `anchor_sampling_threshold`).
fn correct_anchor(
    region: &BuildingRegion,
    region_map: &[u32],
    raw_x: u32,
    raw_y: u32,
    width: u32,
    config: &WorksheetConfig,
    rng: &mut ChaCha8Rng,
) -> Point {
    let raw_index = raw_y * width + raw_x;
    if region_map[raw_index as usize] == region.id {
        return Point { x: raw_x, y: raw_y };
    }

    log::warn!(
        "region {}: raw centroid ({}, {}) fell outside the region, searching for nearest interior pixel",
        region.id,
        raw_x,
        raw_y
    );

    let candidates: Vec<u32> = if region.pixels.len() > config.anchor_sampling_threshold {
        sample_pixels(&region.pixels, config.anchor_sampling_threshold.max(1), rng)
    } else {
        region.pixels.clone()
    };

    let mut best = candidates[0];
    let mut best_dist = u64::MAX;
    for &p in &candidates {
        let dx = (p % width) as i64 - raw_x as i64;
        let dy = (p / width) as i64 - raw_y as i64;
        let dist = (dx * dx + dy * dy) as u64;
        if dist < best_dist {
            best_dist = dist;
            best = p;
        }
    }

    Point {
        x: best % width,
        y: best / width,
    }
}

fn sample_pixels(pixels: &[u32], sample_size: usize, rng: &mut ChaCha8Rng) -> Vec<u32> {
    let mut sampled = Vec::with_capacity(sample_size);
    let len = pixels.len();
    for _ in 0..sample_size {
        let idx = rng.gen_range(0..len);
        sampled.push(pixels[idx]);
    }
    sampled
}
