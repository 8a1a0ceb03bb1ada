//! Stage 3: 4-connected region extraction (flood fill labeling)

/// A region as produced by extraction, before merging or finalization
#[derive(Debug, Clone)]
pub struct BuildingRegion {
    pub id: u32,
    pub color_id: u32,
    pub pixels: Vec<u32>,
}

/// Result of labeling the quantized, palette-remapped image into regions
pub struct ExtractionResult {
    pub regions: Vec<BuildingRegion>,
    /// Dense map of flat pixel index -> region id
    pub region_map: Vec<u32>,
}

/// Label the remapped per-pixel color assignment into 4-connected regions
///
/// Scans pixels in row-major order; each unvisited pixel starts a new region
/// grown with an explicit stack (never recursion — stack depth on a large
/// uniform region would blow the call stack).
pub fn extract_regions(assignments: &[u32], width: u32, height: u32) -> ExtractionResult {
    let pixel_count = assignments.len();
    let mut visited = vec![false; pixel_count];
    let mut region_map = vec![u32::MAX; pixel_count];
    let mut regions = Vec::new();
    let mut stack: Vec<u32> = Vec::with_capacity(pixel_count);

    for start in 0..pixel_count {
        if visited[start] {
            continue;
        }

        let color_id = assignments[start];
        let region_id = regions.len() as u32;
        let mut pixels = Vec::new();

        stack.clear();
        stack.push(start as u32);
        visited[start] = true;

        while let Some(p) = stack.pop() {
            pixels.push(p);
            region_map[p as usize] = region_id;

            let x = p % width;
            let y = p / width;

            if x > 0 {
                push_if_matches(p - 1, color_id, assignments, &mut visited, &mut stack);
            }
            if x + 1 < width {
                push_if_matches(p + 1, color_id, assignments, &mut visited, &mut stack);
            }
            if y > 0 {
                push_if_matches(p - width, color_id, assignments, &mut visited, &mut stack);
            }
            if y + 1 < height {
                push_if_matches(p + width, color_id, assignments, &mut visited, &mut stack);
            }
        }

        regions.push(BuildingRegion {
            id: region_id,
            color_id,
            pixels,
        });
    }

    log::debug!(
        "region extraction: {} regions over {}x{} image",
        regions.len(),
        width,
        height
    );

    ExtractionResult {
        regions,
        region_map,
    }
}

fn push_if_matches(
    neighbor: u32,
    color_id: u32,
    assignments: &[u32],
    visited: &mut [bool],
    stack: &mut Vec<u32>,
) {
    let idx = neighbor as usize;
    if !visited[idx] && assignments[idx] == color_id {
        visited[idx] = true;
        stack.push(neighbor);
    }
}
