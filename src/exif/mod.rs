//! EXIF tag parsing for JPEG images.
//!
//! [`parse_exif`] walks IFD0, the Exif IFD and the GPS IFD of the APP1 segment and
//! fills an [`ImageMetadata`]. The display accessors live on the record itself
//! (`capture_date`, `f_stop`, `exposure`, ...).
mod format;
mod parser;
mod structs;
pub mod tags;
#[cfg(test)]
pub(crate) mod testing;

pub use format::{CAPTURE_DATE_DISPLAY, EXIF_DATE_FORMAT, INVALID_DATE};
pub use parser::{ByteOrder, parse_exif};
pub use structs::{ExifStatus, GpsInfo, ImageMetadata};
