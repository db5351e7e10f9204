use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// The primary error type for the media-inspector crate.
///
/// Query methods on [`crate::MediaInspector`] never return this; they log it and
/// fall back to the documented default answer instead.
#[derive(Error, Debug)]
pub enum MediaInspectorError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // --- Report tool ---
    #[error("Failed to start the container report tool `{}`: {}", .program.display(), .source)]
    ReportSpawn {
        program: PathBuf,
        source: std::io::Error,
    },

    #[error("The container report tool did not finish within {0:?}")]
    ReportTimeout(Duration),

    #[error("`{}` is neither a supported image nor a supported video file", .0.display())]
    UnsupportedMedia(PathBuf),

    // --- Housekeeping ---
    #[error("Could not determine the home directory")]
    NoHomeDirectory,
}
