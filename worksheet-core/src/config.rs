//! Configuration types for the worksheet processing pipeline

use serde::{Deserialize, Serialize};

/// Configuration for the image-to-worksheet pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorksheetConfig {
    /// Target palette size for k-means clustering (clamped to [2, 128])
    pub max_colors: u32,

    /// Maximum number of k-means iterations before accepting the current assignment
    pub max_kmeans_iterations: u32,

    /// Floor applied to `dynamicMinSize` regardless of image area
    pub min_region_size_floor: u32,

    /// Divisor applied to pixel count when computing `dynamicMinSize`
    pub min_region_size_divisor: u32,

    /// Region size at/above which anchor correction samples pixels instead of
    /// scanning exhaustively
    pub anchor_sampling_threshold: usize,

    /// Seed for the k-means RNG; `None` seeds from entropy (nondeterministic runs)
    pub rng_seed: Option<u64>,
}

impl Default for WorksheetConfig {
    fn default() -> Self {
        Self {
            max_colors: 48,
            max_kmeans_iterations: 10,
            min_region_size_floor: 20,
            min_region_size_divisor: 40_000,
            anchor_sampling_threshold: 100,
            rng_seed: None,
        }
    }
}

impl WorksheetConfig {
    /// `dynamicMinSize = max(floor, floor(pixel_count / divisor))`
    pub fn dynamic_min_size(&self, pixel_count: usize) -> usize {
        let scaled = pixel_count / self.min_region_size_divisor.max(1) as usize;
        scaled.max(self.min_region_size_floor as usize)
    }
}
