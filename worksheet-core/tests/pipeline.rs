//! End-to-end pipeline tests exercising invariants across the full image lifecycle.

use worksheet_core::{process, process_cancellable, WorksheetConfig, WorksheetError};
use std::sync::atomic::{AtomicBool, Ordering};

fn solid_rgba(width: u32, height: u32, color: (u8, u8, u8)) -> Vec<u8> {
    let mut buf = Vec::with_capacity((width * height * 4) as usize);
    for _ in 0..(width * height) {
        buf.extend_from_slice(&[color.0, color.1, color.2, 255]);
    }
    buf
}

fn assert_region_map_consistent(image: &worksheet_core::ProcessedImage) {
    assert_eq!(
        image.region_map.len(),
        (image.original_width * image.original_height) as usize
    );
    for region in &image.regions {
        for &p in &region.pixels {
            assert_eq!(image.region_map[p as usize], region.id);
        }
        let centroid_index = region.centroid.y * image.original_width + region.centroid.x;
        assert_eq!(image.region_map[centroid_index as usize], region.id);
        for &p in &region.border_pixels {
            assert!(region.pixels.contains(&p));
        }
    }
}

fn assert_palette_contiguous(image: &worksheet_core::ProcessedImage) {
    for (i, color) in image.palette.iter().enumerate() {
        assert_eq!(color.id, i as u32 + 1);
    }
    let mut counted = vec![0u32; image.palette.len()];
    for region in &image.regions {
        counted[region.color_id as usize] += region.pixels.len() as u32;
    }
    for (i, color) in image.palette.iter().enumerate() {
        assert_eq!(color.count, counted[i]);
    }
}

#[test]
fn single_color_10x10_image_yields_one_region_one_color() {
    let pixels = solid_rgba(10, 10, (200, 40, 40));
    let config = WorksheetConfig {
        max_colors: 8,
        rng_seed: Some(11),
        ..Default::default()
    };
    let result = process(&pixels, 10, 10, &config).expect("processing should succeed");

    assert_eq!(result.palette.len(), 1);
    assert_eq!(result.regions.len(), 1);
    assert_eq!(result.regions[0].pixels.len(), 100);
    assert_region_map_consistent(&result);
    assert_palette_contiguous(&result);
}

#[test]
fn two_color_2x2_image_yields_two_regions() {
    // Top row red, bottom row blue.
    let pixels = vec![
        255, 0, 0, 255, 255, 0, 0, 255, 0, 0, 255, 255, 0, 0, 255, 255,
    ];

    let config = WorksheetConfig {
        max_colors: 4,
        rng_seed: Some(3),
        min_region_size_floor: 0,
        min_region_size_divisor: 1_000_000,
        ..Default::default()
    };
    let result = process(&pixels, 2, 2, &config).expect("processing should succeed");

    assert_eq!(result.palette.len(), 2);
    assert_eq!(result.regions.len(), 2);
    assert_region_map_consistent(&result);
    assert_palette_contiguous(&result);
}

#[test]
fn ring_with_distinct_center_produces_two_regions() {
    // 3x3 image: ring of one color, a single differently-colored center pixel.
    let mut pixels = Vec::new();
    for i in 0..9 {
        if i == 4 {
            pixels.extend_from_slice(&[10, 200, 10, 255]);
        } else {
            pixels.extend_from_slice(&[10, 10, 200, 255]);
        }
    }
    let config = WorksheetConfig {
        max_colors: 4,
        rng_seed: Some(5),
        min_region_size_floor: 0,
        min_region_size_divisor: 1_000_000,
        ..Default::default()
    };
    let result = process(&pixels, 3, 3, &config).expect("processing should succeed");

    assert_eq!(result.regions.len(), 2);
    assert_region_map_consistent(&result);
    assert_palette_contiguous(&result);
}

#[test]
fn gradient_image_produces_multiple_regions_within_color_budget() {
    let width = 20;
    let height = 20;
    let mut pixels = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            let shade = ((x + y) * 255 / (width + height - 2)) as u8;
            pixels.extend_from_slice(&[shade, shade, shade, 255]);
        }
    }
    let config = WorksheetConfig {
        max_colors: 6,
        rng_seed: Some(9),
        ..Default::default()
    };
    let result = process(&pixels, width, height, &config).expect("processing should succeed");

    assert!(!result.palette.is_empty());
    assert!(result.palette.len() <= 6);
    assert_region_map_consistent(&result);
    assert_palette_contiguous(&result);
}

#[test]
fn isolated_single_pixel_hole_is_merged_or_kept_without_corrupting_map() {
    // 5x5 solid field with a single off-color pixel in the middle, surrounded
    // entirely by the dominant color (a "hole" too small to survive on its own).
    let width = 5;
    let height = 5;
    let mut pixels = Vec::with_capacity((width * height * 4) as usize);
    for i in 0..(width * height) {
        if i == 12 {
            pixels.extend_from_slice(&[5, 5, 250, 255]);
        } else {
            pixels.extend_from_slice(&[250, 5, 5, 255]);
        }
    }
    let config = WorksheetConfig {
        max_colors: 4,
        rng_seed: Some(2),
        min_region_size_floor: 2,
        min_region_size_divisor: 1_000_000,
        ..Default::default()
    };
    let result = process(&pixels, width, height, &config).expect("processing should succeed");

    assert_region_map_consistent(&result);
    assert_palette_contiguous(&result);
    let total_pixels: usize = result.regions.iter().map(|r| r.pixels.len()).sum();
    assert_eq!(total_pixels, (width * height) as usize);
}

#[test]
fn seeded_runs_are_reproducible_and_unseeded_runs_need_not_match() {
    let pixels = solid_rgba(16, 16, (30, 150, 90));

    let seeded_config = WorksheetConfig {
        max_colors: 5,
        rng_seed: Some(123),
        ..Default::default()
    };
    let a = process(&pixels, 16, 16, &seeded_config).unwrap();
    let b = process(&pixels, 16, 16, &seeded_config).unwrap();
    assert_eq!(a.palette.len(), b.palette.len());
    assert_eq!(a.region_map, b.region_map);
}

#[test]
fn cancellation_flag_aborts_cleanly() {
    let pixels = solid_rgba(8, 8, (1, 2, 3));
    let config = WorksheetConfig::default();
    let flag = AtomicBool::new(false);
    flag.store(true, Ordering::Relaxed);
    let result = process_cancellable(&pixels, 8, 8, &config, Some(&flag));
    assert!(matches!(result, Err(WorksheetError::Cancelled)));
}

#[test]
fn invalid_dimensions_are_rejected() {
    let config = WorksheetConfig::default();
    let result = process(&[0u8; 3], 4, 4, &config);
    assert!(matches!(result, Err(WorksheetError::InvalidDimensions { .. })));
}
