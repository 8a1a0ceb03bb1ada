//! Stage 1: k-means color quantization in RGB space

use crate::types::Rgb;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Centroids and the per-pixel cluster assignment produced by k-means
pub struct QuantizationResult {
    pub centroids: Vec<Rgb>,
    pub assignments: Vec<u32>,
}

/// Cluster `pixel_count` RGBA pixels into `k` centroids
///
/// `pixels` is the RGBA byte buffer (alpha ignored). Initialization samples `k`
/// pixel indices uniformly at random, with replacement tolerated; two initial
/// centroids may coincide, which is recovered in the palette compactor.
pub fn kmeans_quantize(
    pixels: &[u8],
    pixel_count: usize,
    k: usize,
    max_iterations: u32,
    seed: Option<u64>,
) -> QuantizationResult {
    let mut rng = match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    };

    let mut centroids: Vec<Rgb> = (0..k)
        .map(|_| {
            let idx = rng.gen_range(0..pixel_count);
            pixel_rgb(pixels, idx)
        })
        .collect();

    log::debug!(
        "k-means: initialized {} centroids over {} pixels",
        k,
        pixel_count
    );

    let mut assignments = vec![0u32; pixel_count];

    for pass in 0..max_iterations {
        for (i, assignment) in assignments.iter_mut().enumerate() {
            let color = pixel_rgb(pixels, i);
            *assignment = nearest_centroid(&color, &centroids) as u32;
        }

        let mut sums = vec![(0u64, 0u64, 0u64, 0u64); k];
        for (i, &assignment) in assignments.iter().enumerate() {
            let color = pixel_rgb(pixels, i);
            let slot = &mut sums[assignment as usize];
            slot.0 += color.r as u64;
            slot.1 += color.g as u64;
            slot.2 += color.b as u64;
            slot.3 += 1;
        }

        let mut moved = false;
        for (cluster, &(sum_r, sum_g, sum_b, count)) in sums.iter().enumerate() {
            if count == 0 {
                log::warn!(
                    "k-means: cluster {} received no pixels this pass, leaving centroid unchanged",
                    cluster
                );
                continue;
            }
            let new_centroid = Rgb::new(
                ((sum_r + count / 2) / count) as u8,
                ((sum_g + count / 2) / count) as u8,
                ((sum_b + count / 2) / count) as u8,
            );
            if new_centroid != centroids[cluster] {
                moved = true;
            }
            centroids[cluster] = new_centroid;
        }

        if !moved {
            log::debug!("k-means converged after {} passes", pass + 1);
            break;
        }
    }

    QuantizationResult {
        centroids,
        assignments,
    }
}

fn pixel_rgb(pixels: &[u8], idx: usize) -> Rgb {
    let base = idx * 4;
    Rgb::new(pixels[base], pixels[base + 1], pixels[base + 2])
}

fn nearest_centroid(color: &Rgb, centroids: &[Rgb]) -> usize {
    let mut best = 0;
    let mut best_dist = u32::MAX;
    for (i, centroid) in centroids.iter().enumerate() {
        let dist = color.distance_squared(centroid);
        if dist < best_dist {
            best_dist = dist;
            best = i;
        }
    }
    best
}
