//! # worksheet-core
//!
//! Core image processing pipeline that turns an RGBA image into a paint-by-numbers
//! worksheet: a compact color palette, 4-connected regions, region borders, and
//! label anchor points.

pub mod components;
pub mod config;
pub mod error;
pub mod finalize;
pub mod merge;
pub mod palette;
pub mod persistence;
pub mod process;
pub mod quantize;
pub mod types;

pub use config::WorksheetConfig;
pub use error::{WorksheetError, WorksheetResult};
pub use persistence::{SessionDocument, SESSION_DOCUMENT_VERSION};
pub use process::{process, process_cancellable};
pub use types::{PaletteColor, Point, ProcessedImage, Region, Rgb, TextColor};
