use crate::exif::{ExifStatus, ImageMetadata};
use crate::report::VideoMetadata;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Every display answer for one file, computed from a single decode.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum InspectResult {
    Image(ImageReport),
    Video(VideoReport),
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageReport {
    pub path: PathBuf,
    /// Non-success means the answers below may be incomplete.
    pub status: ExifStatus,
    pub capture_date: String,
    pub hardware: String,
    pub dimensions: String,
    pub f_stop: String,
    pub exposure: String,
    pub iso: String,
    pub exposure_bias: String,
    pub focal_length_standard: String,
    pub focal_length: String,
    pub flash_fired: bool,
    pub exif: ImageMetadata,
}

impl ImageReport {
    pub fn new(path: PathBuf, exif: ImageMetadata, status: ExifStatus) -> Self {
        Self {
            path,
            status,
            capture_date: exif.capture_date(),
            hardware: exif.hardware(),
            dimensions: exif.dimensions(),
            f_stop: exif.f_stop(),
            exposure: exif.exposure(),
            iso: exif.iso(),
            exposure_bias: exif.exposure_bias_ev(),
            focal_length_standard: exif.focal_length_standard(),
            focal_length: exif.focal_length_mm(),
            flash_fired: exif.flash_fired(),
            exif,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoReport {
    pub path: PathBuf,
    pub date: String,
    pub dimensions: String,
    pub duration: String,
    pub multiplexing_application: String,
    pub writing_application: String,
    pub document_type: String,
    pub codec_id: String,
    /// The recognised report lines, in order.
    pub lines: Vec<String>,
}

impl VideoReport {
    pub fn new(path: PathBuf, metadata: &VideoMetadata) -> Self {
        Self {
            path,
            date: metadata.date(),
            dimensions: metadata.dimensions(),
            duration: metadata.duration(),
            multiplexing_application: metadata.multiplexing_application(),
            writing_application: metadata.writing_application(),
            document_type: metadata.document_type(),
            codec_id: metadata.codec_id(),
            lines: metadata.lines().to_vec(),
        }
    }
}
