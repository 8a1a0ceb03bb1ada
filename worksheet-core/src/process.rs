//! Stage 6: pipeline orchestration and the public entry points

use crate::components::extract_regions;
use crate::config::WorksheetConfig;
use crate::error::{WorksheetError, WorksheetResult};
use crate::finalize::finalize_regions;
use crate::merge::merge_small_regions;
use crate::palette::compact_palette;
use crate::quantize::kmeans_quantize;
use crate::types::ProcessedImage;
use std::sync::atomic::{AtomicBool, Ordering};

/// Run the full pipeline: quantize, compact the palette, extract 4-connected
/// regions, merge undersized regions into their nearest-color neighbor, and
/// finalize borders and label anchors.
pub fn process(
    pixels: &[u8],
    width: u32,
    height: u32,
    config: &WorksheetConfig,
) -> WorksheetResult<ProcessedImage> {
    process_cancellable(pixels, width, height, config, None)
}

/// Same pipeline as [`process`], checked for cancellation between stages.
///
/// `cancel_flag` is polled once at each stage boundary; there is no mid-stage
/// cancellation point. Passing `None` is equivalent to calling [`process`].
pub fn process_cancellable(
    pixels: &[u8],
    width: u32,
    height: u32,
    config: &WorksheetConfig,
    cancel_flag: Option<&AtomicBool>,
) -> WorksheetResult<ProcessedImage> {
    validate_inputs(pixels, width, height, config)?;

    let pixel_count = (width as usize) * (height as usize);
    check_cancelled(cancel_flag)?;

    let quantization = kmeans_quantize(
        pixels,
        pixel_count,
        config.max_colors as usize,
        config.max_kmeans_iterations,
        config.rng_seed,
    );
    check_cancelled(cancel_flag)?;

    let compaction = compact_palette(&quantization.centroids, &quantization.assignments);
    check_cancelled(cancel_flag)?;

    let extraction = extract_regions(&compaction.remapped_assignments, width, height);
    let mut region_map = extraction.region_map;
    check_cancelled(cancel_flag)?;

    let merged = merge_small_regions(
        extraction.regions,
        &mut region_map,
        width,
        height,
        &compaction.palette,
        config,
    );
    check_cancelled(cancel_flag)?;

    let mut palette = compaction.palette;
    for region in &merged {
        palette[region.color_id as usize].count += region.pixels.len() as u32;
    }

    let regions = finalize_regions(merged, &region_map, width, height, config);
    check_cancelled(cancel_flag)?;

    log::info!(
        "worksheet processing complete: {}x{} image, {} colors, {} regions",
        width,
        height,
        palette.len(),
        regions.len()
    );

    Ok(ProcessedImage {
        original_width: width,
        original_height: height,
        regions,
        palette,
        pixel_data: pixels.to_vec(),
        region_map,
    })
}

fn validate_inputs(
    pixels: &[u8],
    width: u32,
    height: u32,
    config: &WorksheetConfig,
) -> WorksheetResult<()> {
    let expected_len = (width as usize)
        .saturating_mul(height as usize)
        .saturating_mul(4);
    if width == 0 || height == 0 || pixels.len() != expected_len {
        return Err(WorksheetError::InvalidDimensions {
            width,
            height,
            data_len: pixels.len(),
        });
    }
    if !(2..=128).contains(&config.max_colors) {
        return Err(WorksheetError::InvalidK {
            requested: config.max_colors,
        });
    }
    Ok(())
}

fn check_cancelled(cancel_flag: Option<&AtomicBool>) -> WorksheetResult<()> {
    if let Some(flag) = cancel_flag {
        if flag.load(Ordering::Relaxed) {
            return Err(WorksheetError::Cancelled);
        }
    }
    Ok(())
}
