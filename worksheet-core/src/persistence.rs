//! Saved-session document: the serializable unit persisted between app runs

use crate::types::ProcessedImage;
use serde::{Deserialize, Serialize};

/// Current session document schema version
pub const SESSION_DOCUMENT_VERSION: u32 = 1;

/// A saved worksheet session: the processed image plus the artist's progress
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionDocument {
    pub version: u32,
    pub artist_name: String,
    pub timestamp_ms: u64,
    pub source_image: String,
    pub processed_data: ProcessedImage,
    /// Region ids the artist has already filled in
    pub filled_regions: Vec<u32>,
    pub active_theme: String,
    /// Opaque tool configuration (brush size, zoom, etc.), passed through unvalidated
    pub tool_config: serde_json::Value,
}

impl SessionDocument {
    pub fn new(
        artist_name: impl Into<String>,
        timestamp_ms: u64,
        source_image: impl Into<String>,
        processed_data: ProcessedImage,
    ) -> Self {
        Self {
            version: SESSION_DOCUMENT_VERSION,
            artist_name: artist_name.into(),
            timestamp_ms,
            source_image: source_image.into(),
            processed_data,
            filled_regions: Vec::new(),
            active_theme: "default".to_string(),
            tool_config: serde_json::Value::Null,
        }
    }
}
