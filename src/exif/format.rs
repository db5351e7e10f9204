//! Display strings derived from a decoded [`ImageMetadata`].
//!
//! Each accessor returns an empty string when the field it needs was never decoded.

use crate::exif::structs::ImageMetadata;
use crate::utils::format_decimal;
use chrono::NaiveDateTime;

pub const EXIF_DATE_FORMAT: &str = "%Y:%m:%d %H:%M:%S";
pub const CAPTURE_DATE_DISPLAY: &str = "%b %d, %Y \n %H:%M";
pub const INVALID_DATE: &str = "Invalid date/time";

impl ImageMetadata {
    /// The moment of capture, e.g. `"Mar 09, 2024 \n 18:04"`.
    ///
    /// Uses `DateTimeOriginal`, falling back to `DateTime`. Anything that doesn't match
    /// `YYYY:MM:DD HH:MM:SS` (including a missing timestamp) gives `"Invalid date/time"`.
    pub fn capture_date(&self) -> String {
        self.date_time_original
            .as_deref()
            .or(self.date_time.as_deref())
            .and_then(|raw| NaiveDateTime::parse_from_str(raw.trim(), EXIF_DATE_FORMAT).ok())
            .map_or_else(
                || INVALID_DATE.to_string(),
                |dt| dt.format(CAPTURE_DATE_DISPLAY).to_string(),
            )
    }

    /// `"{make} {model}"`, keeping the separator when only one of them is known.
    pub fn hardware(&self) -> String {
        if self.make.is_none() && self.model.is_none() {
            return String::new();
        }
        format!(
            "{} {}",
            self.make.as_deref().unwrap_or_default(),
            self.model.as_deref().unwrap_or_default()
        )
    }

    pub fn dimensions(&self) -> String {
        match (self.image_width, self.image_height) {
            (Some(width), Some(height)) => format!("{width} x {height}"),
            _ => String::new(),
        }
    }

    pub fn f_stop(&self) -> String {
        self.f_number
            .map(|f| format!("f/{}", format_decimal(f)))
            .unwrap_or_default()
    }

    /// Exposure as a reciprocal of the rounded shutter rate, e.g. `"1/125 s"`.
    ///
    /// Exposures of a second or more can't be written as `1/n` and are shown as
    /// `"{seconds} s"`. Zero, negative or missing exposure times are unknown, and so are
    /// times too short for the rate to fit a `u32`.
    pub fn exposure(&self) -> String {
        let Some(seconds) = self.exposure_time.filter(|t| t.is_finite() && *t > 0.0) else {
            return String::new();
        };
        if seconds >= 1.0 {
            return format!("{} s", format_decimal(seconds));
        }
        let rate = (1.0 / seconds).round();
        if rate > f64::from(u32::MAX) {
            return String::new();
        }
        format!("1/{} s", rate as u32)
    }

    pub fn iso(&self) -> String {
        self.iso_speed
            .map(|iso| format!("ISO: {iso}"))
            .unwrap_or_default()
    }

    pub fn exposure_bias_ev(&self) -> String {
        self.exposure_bias
            .map(|ev| format!("{} EV", format_decimal(ev)))
            .unwrap_or_default()
    }

    pub fn focal_length_standard(&self) -> String {
        self.focal_length_35mm
            .map(|mm| format!("35mm focal length: {mm} mm"))
            .unwrap_or_default()
    }

    pub fn focal_length_mm(&self) -> String {
        self.focal_length
            .map(|mm| format!("{} mm", format_decimal(mm)))
            .unwrap_or_default()
    }

    /// Bit 0 of the EXIF `Flash` bitfield.
    pub fn flash_fired(&self) -> bool {
        self.flash.is_some_and(|flash| flash & 0x1 == 0x1)
    }
}
