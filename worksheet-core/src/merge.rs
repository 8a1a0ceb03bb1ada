//! Stage 4: small-region merging into nearest-color neighbors

use crate::components::BuildingRegion;
use crate::config::WorksheetConfig;
use crate::types::PaletteColor;

/// Merge regions smaller than `dynamicMinSize` into their nearest-color 4-connected
/// neighbor, cascading until no further merge is possible.
///
/// `region_map` is updated in place as regions are absorbed; on return it still
/// refers to the pre-renumbering region ids, which the caller must remap using
/// the returned `Vec<BuildingRegion>`'s new ordering.
pub fn merge_small_regions(
    regions: Vec<BuildingRegion>,
    region_map: &mut [u32],
    width: u32,
    height: u32,
    palette: &[PaletteColor],
    config: &WorksheetConfig,
) -> Vec<BuildingRegion> {
    let total_pixels = region_map.len();
    let min_size = config.dynamic_min_size(total_pixels);

    let mut regions: Vec<BuildingRegion> = regions;
    let mut alive = vec![true; regions.len()];

    let mut order: Vec<usize> = (0..regions.len()).collect();
    order.sort_by_key(|&i| regions[i].pixels.len());

    let mut isolated = 0usize;
    let mut merged_count = 0usize;

    for idx in order {
        if !alive[idx] || regions[idx].pixels.len() >= min_size {
            continue;
        }

        let neighbors = find_neighbor_regions(&regions[idx], idx as u32, region_map, width, height);
        if neighbors.is_empty() {
            isolated += 1;
            continue;
        }

        let own_rgb = palette[regions[idx].color_id as usize].rgb;
        let mut best = neighbors[0];
        let mut best_dist = u32::MAX;
        for &candidate in &neighbors {
            let candidate_rgb = palette[regions[candidate as usize].color_id as usize].rgb;
            let dist = own_rgb.distance_squared(&candidate_rgb);
            if dist < best_dist || (dist == best_dist && candidate < best) {
                best_dist = dist;
                best = candidate;
            }
        }

        let absorbed_pixels = std::mem::take(&mut regions[idx].pixels);
        for &p in &absorbed_pixels {
            region_map[p as usize] = best;
        }
        regions[best as usize].pixels.extend(absorbed_pixels);
        alive[idx] = false;
        merged_count += 1;
    }

    if isolated > 0 {
        log::warn!(
            "{} region(s) below dynamicMinSize had no mergeable neighbor and were left as-is",
            isolated
        );
    }
    log::debug!(
        "region merging: {} merge(s) applied, min_size={}",
        merged_count,
        min_size
    );

    let mut renumbered = Vec::with_capacity(alive.iter().filter(|&&a| a).count());
    let mut old_to_new = vec![0u32; regions.len()];
    for (old_id, region) in regions.into_iter().enumerate() {
        if !alive[old_id] {
            continue;
        }
        let new_id = renumbered.len() as u32;
        old_to_new[old_id] = new_id;
        renumbered.push(BuildingRegion {
            id: new_id,
            color_id: region.color_id,
            pixels: region.pixels,
        });
    }

    for slot in region_map.iter_mut() {
        *slot = old_to_new[*slot as usize];
    }

    renumbered
}

fn find_neighbor_regions(
    region: &BuildingRegion,
    own_id: u32,
    region_map: &[u32],
    width: u32,
    height: u32,
) -> Vec<u32> {
    let mut found = Vec::new();
    for &p in &region.pixels {
        let x = p % width;
        let y = p / width;

        let mut check = |nx_ok: bool, neighbor: u32| {
            if nx_ok {
                let n = region_map[neighbor as usize];
                if n != own_id && !found.contains(&n) {
                    found.push(n);
                }
            }
        };

        check(x > 0, p - 1);
        check(x + 1 < width, p + 1);
        check(y > 0, p - width);
        check(y + 1 < height, p + width);
    }
    found
}
