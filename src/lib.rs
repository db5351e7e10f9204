//! # Media Inspector
//!
//! Metadata answers for the photos and videos shown in a camera app's gallery.
//!
//! This crate decodes the EXIF block embedded in JPEG photos and the text report a
//! container inspection tool (`mkvinfo`) prints for Matroska/WebM videos, and turns both
//! into the short display strings a gallery info panel shows.
//!
//! ## Key Features
//!
//! - **EXIF Parsing**: A bounds-checked reader for IFD0, the Exif IFD and the GPS IFD, in both byte orders. Malformed input never panics; it yields a partial record and a status code.
//! - **Photo Details**: Capture date, camera make and model, dimensions, aperture, exposure time, ISO, exposure bias, focal lengths and flash state.
//! - **Video Details**: Date, dimensions, duration, muxing and writing application, document type and codec id, read from the container report with first-match-wins semantics.
//! - **Graceful Defaults**: Every query degrades to a fixed default answer when the file is unreadable, the tool is missing, or the field is absent.
//!
//! ## Usage
//!
//! Create a `MediaInspector` and call a query method with a file locator. Locators may
//! carry a URI scheme such as `file://`.
//!
//! ```rust,no_run
//! use media_inspector::MediaInspector;
//!
//! #[tokio::main]
//! async fn main() -> color_eyre::Result<()> {
//!     let inspector = MediaInspector::builder().build();
//!
//!     println!("{}", inspector.f_stop("file:///home/me/Pictures/IMG_0001.jpg").await);
//!     println!("{}", inspector.codec_id("file:///home/me/Videos/VID_0001.mkv").await);
//!
//!     // Or decode once and get every answer.
//!     let result = inspector.inspect("/home/me/Pictures/IMG_0001.jpg").await?;
//!     println!("{}", serde_json::to_string_pretty(&result)?);
//!
//!     Ok(())
//! }
//! ```

mod error;
pub mod exif;
mod media_inspector;
pub mod report;
mod structs;
pub mod utils;

pub use error::MediaInspectorError;
pub use exif::{ExifStatus, GpsInfo, ImageMetadata, parse_exif};
pub use media_inspector::{DEFAULT_REPORT_PROGRAM, DEFAULT_REPORT_TIMEOUT, MediaInspector};
pub use report::{VideoMetadata, VideoQuery};
pub use structs::{ImageReport, InspectResult, VideoReport};
pub use utils::MediaKind;
