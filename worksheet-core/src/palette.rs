//! Stage 2: palette compaction — drop unused centroids, assign stable ids

use crate::types::{PaletteColor, Rgb, TextColor};
use std::collections::BTreeSet;

/// Compacted palette plus the assignment array remapped to 0-based palette indices
pub struct CompactionResult {
    pub palette: Vec<PaletteColor>,
    pub remapped_assignments: Vec<u32>,
}

/// Collapse sparse k-means cluster indices into a dense, stably-ordered palette
pub fn compact_palette(centroids: &[Rgb], assignments: &[u32]) -> CompactionResult {
    let used: BTreeSet<u32> = assignments.iter().copied().collect();

    log::debug!(
        "palette compaction: {} of {} clusters used",
        used.len(),
        centroids.len()
    );

    let mut old_to_new = vec![0u32; centroids.len()];
    let mut palette = Vec::with_capacity(used.len());

    for (position, &old_index) in used.iter().enumerate() {
        old_to_new[old_index as usize] = position as u32;
        let rgb = centroids[old_index as usize];
        palette.push(PaletteColor {
            id: position as u32 + 1,
            rgb,
            hex: rgb.to_hex(),
            text_color: TextColor::for_background(&rgb),
            count: 0,
        });
    }

    let remapped_assignments = assignments
        .iter()
        .map(|&old| old_to_new[old as usize])
        .collect();

    CompactionResult {
        palette,
        remapped_assignments,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_unused_clusters_and_renumbers_contiguously() {
        let centroids = vec![Rgb::new(255, 0, 0), Rgb::new(0, 255, 0), Rgb::new(0, 0, 255)];
        // Cluster index 1 (green) never appears.
        let assignments = vec![0, 0, 2, 2];

        let result = compact_palette(&centroids, &assignments);

        assert_eq!(result.palette.len(), 2);
        assert_eq!(result.palette[0].id, 1);
        assert_eq!(result.palette[1].id, 2);
        assert_eq!(result.palette[0].rgb, Rgb::new(255, 0, 0));
        assert_eq!(result.palette[1].rgb, Rgb::new(0, 0, 255));
        assert_eq!(result.remapped_assignments, vec![0, 0, 1, 1]);
    }

    #[test]
    fn text_color_follows_yiq_rule() {
        let centroids = vec![Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)];
        let assignments = vec![0, 1];
        let result = compact_palette(&centroids, &assignments);

        assert_eq!(result.palette[0].text_color, TextColor::Black);
        assert_eq!(result.palette[1].text_color, TextColor::White);
    }

    #[test]
    fn hex_round_trips_rgb() {
        let rgb = Rgb::new(26, 43, 60);
        assert_eq!(rgb.to_hex(), "#1a2b3c");
    }
}
