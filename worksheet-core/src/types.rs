//! Output data model: palette, regions, and the processed-image bundle

use serde::{Deserialize, Serialize};

/// Three byte-valued RGB channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Squared Euclidean distance in RGB space
    pub fn distance_squared(&self, other: &Rgb) -> u32 {
        let dr = self.r as i32 - other.r as i32;
        let dg = self.g as i32 - other.g as i32;
        let db = self.b as i32 - other.b as i32;
        (dr * dr + dg * dg + db * db) as u32
    }

    /// Lowercase six-digit hex string, e.g. `#1a2b3c`
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// YIQ luminance `(299r + 587g + 114b) / 1000`
    pub fn yiq_luminance(&self) -> u32 {
        (299 * self.r as u32 + 587 * self.g as u32 + 114 * self.b as u32) / 1000
    }
}

/// Either black or white, chosen for legibility against a `Rgb` swatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextColor {
    Black,
    White,
}

impl TextColor {
    /// Black iff YIQ luminance >= 128, per the worksheet's contrast rule
    pub fn for_background(rgb: &Rgb) -> Self {
        if rgb.yiq_luminance() >= 128 {
            TextColor::Black
        } else {
            TextColor::White
        }
    }
}

/// A single palette entry: one quantized color and the label drawn for it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaletteColor {
    /// 1-based, unique within the palette, assigned in ascending order of first appearance
    pub id: u32,
    pub rgb: Rgb,
    pub hex: String,
    pub text_color: TextColor,
    /// Total pixels across all surviving regions of this color; filled by the emitter
    pub count: u32,
}

/// A pixel coordinate in image space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

/// A maximal 4-connected set of same-colored pixels (possibly grown by merging)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Region {
    /// Unique, densely assigned by extraction order
    pub id: u32,
    /// 0-based index into the palette; displayed label is `color_id + 1`
    pub color_id: u32,
    /// Flat pixel indices (`y*width + x`) belonging to this region
    pub pixels: Vec<u32>,
    /// Label anchor point; guaranteed to lie inside the region
    pub centroid: Point,
    /// Subset of `pixels` with at least one out-of-bounds or foreign-region neighbor
    pub border_pixels: Vec<u32>,
}

/// The complete output of the processor: palette, regions, and the region lookup map
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessedImage {
    pub original_width: u32,
    pub original_height: u32,
    pub regions: Vec<Region>,
    pub palette: Vec<PaletteColor>,
    /// Copy of the original RGBA bytes, carried through opaquely for downstream use
    pub pixel_data: Vec<u8>,
    /// Dense map of flat pixel index -> region id; `region_map[p] == r` iff `p` is in `regions[r].pixels`
    pub region_map: Vec<u32>,
}
