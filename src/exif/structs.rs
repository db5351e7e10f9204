use serde::{Deserialize, Serialize};

/// Outcome of an EXIF parse.
///
/// Anything other than [`ExifStatus::Success`] means the record may be incomplete,
/// not that it is empty: fields decoded before the failure point are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[repr(u16)]
pub enum ExifStatus {
    Success = 0,
    /// The buffer is neither a JPEG stream nor a bare TIFF/EXIF payload.
    NoJpeg = 1982,
    /// A JPEG stream without an EXIF APP1 segment.
    NoExif = 1983,
    /// The TIFF header declares neither `II` nor `MM` byte order.
    UnknownByteAlign = 1984,
    /// Truncated header, bad magic, or a directory running past the end of the buffer.
    Corrupt = 1985,
}

impl ExifStatus {
    pub const fn code(self) -> u16 {
        self as u16
    }

    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Location decoded from the GPS IFD.
///
/// Coordinates are signed decimal degrees (south and west are negative), altitude
/// is in metres (below sea level is negative).
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GpsInfo {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub altitude: Option<f64>,
}

/// The decoded EXIF record of one image.
///
/// Every field is `None` until the matching tag was found. Rationals are stored as
/// their `f64` quotient.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageMetadata {
    pub image_description: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub software: Option<String>,
    pub copyright: Option<String>,
    pub orientation: Option<u16>,
    /// `YYYY:MM:DD HH:MM:SS`, last modification.
    pub date_time: Option<String>,
    /// `YYYY:MM:DD HH:MM:SS`, moment of capture.
    pub date_time_original: Option<String>,
    pub date_time_digitized: Option<String>,
    pub sub_sec_time_original: Option<String>,
    pub image_width: Option<u32>,
    pub image_height: Option<u32>,
    /// Aperture as an f-number.
    pub f_number: Option<f64>,
    /// Seconds.
    pub exposure_time: Option<f64>,
    pub exposure_program: Option<u16>,
    pub iso_speed: Option<u32>,
    /// APEX units.
    pub shutter_speed_value: Option<f64>,
    /// EV stops.
    pub exposure_bias: Option<f64>,
    /// Metres.
    pub subject_distance: Option<f64>,
    pub metering_mode: Option<u16>,
    /// The raw EXIF flash bitfield; bit 0 is "flash fired".
    pub flash: Option<u16>,
    /// Millimetres.
    pub focal_length: Option<f64>,
    pub focal_length_35mm: Option<u16>,
    pub lens_make: Option<String>,
    pub lens_model: Option<String>,
    pub gps: Option<GpsInfo>,
}
