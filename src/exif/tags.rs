//! Tag ids and value types of the TIFF/EXIF directory structure.

/// Size of one IFD entry: tag (2), type (2), count (4), value or offset (4).
pub const IFD_ENTRY_SIZE: usize = 12;

/// Size of the TIFF header: byte order (2), magic (2), IFD0 offset (4).
pub const TIFF_HEADER_SIZE: usize = 8;

pub const TIFF_MAGIC: u16 = 0x002A;

/// The identifier that opens an APP1 EXIF payload.
pub const EXIF_HEADER: &[u8; 6] = b"Exif\0\0";

// --- IFD0 ---
pub const IMAGE_WIDTH: u16 = 0x0100;
pub const IMAGE_LENGTH: u16 = 0x0101;
pub const IMAGE_DESCRIPTION: u16 = 0x010E;
pub const MAKE: u16 = 0x010F;
pub const MODEL: u16 = 0x0110;
pub const ORIENTATION: u16 = 0x0112;
pub const SOFTWARE: u16 = 0x0131;
pub const DATE_TIME: u16 = 0x0132;
pub const COPYRIGHT: u16 = 0x8298;
pub const EXIF_IFD_POINTER: u16 = 0x8769;
pub const GPS_IFD_POINTER: u16 = 0x8825;

// --- Exif IFD ---
pub const EXPOSURE_TIME: u16 = 0x829A;
pub const F_NUMBER: u16 = 0x829D;
pub const EXPOSURE_PROGRAM: u16 = 0x8822;
pub const ISO_SPEED_RATINGS: u16 = 0x8827;
pub const DATE_TIME_ORIGINAL: u16 = 0x9003;
pub const DATE_TIME_DIGITIZED: u16 = 0x9004;
pub const SHUTTER_SPEED_VALUE: u16 = 0x9201;
pub const EXPOSURE_BIAS_VALUE: u16 = 0x9204;
pub const SUBJECT_DISTANCE: u16 = 0x9206;
pub const METERING_MODE: u16 = 0x9207;
pub const FLASH: u16 = 0x9209;
pub const FOCAL_LENGTH: u16 = 0x920A;
pub const SUB_SEC_TIME_ORIGINAL: u16 = 0x9291;
pub const PIXEL_X_DIMENSION: u16 = 0xA002;
pub const PIXEL_Y_DIMENSION: u16 = 0xA003;
pub const FOCAL_LENGTH_IN_35MM_FILM: u16 = 0xA405;
pub const LENS_MAKE: u16 = 0xA433;
pub const LENS_MODEL: u16 = 0xA434;

// --- GPS IFD ---
pub const GPS_LATITUDE_REF: u16 = 0x0001;
pub const GPS_LATITUDE: u16 = 0x0002;
pub const GPS_LONGITUDE_REF: u16 = 0x0003;
pub const GPS_LONGITUDE: u16 = 0x0004;
pub const GPS_ALTITUDE_REF: u16 = 0x0005;
pub const GPS_ALTITUDE: u16 = 0x0006;

/// The data type declared by an IFD entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Byte,
    Ascii,
    Short,
    Long,
    Rational,
    SignedByte,
    Undefined,
    SignedShort,
    SignedLong,
    SignedRational,
    Float,
    Double,
}

impl ValueType {
    pub fn from_code(code: u16) -> Option<Self> {
        Some(match code {
            1 => Self::Byte,
            2 => Self::Ascii,
            3 => Self::Short,
            4 => Self::Long,
            5 => Self::Rational,
            6 => Self::SignedByte,
            7 => Self::Undefined,
            8 => Self::SignedShort,
            9 => Self::SignedLong,
            10 => Self::SignedRational,
            11 => Self::Float,
            12 => Self::Double,
            _ => return None,
        })
    }

    /// Bytes taken by a single component of this type.
    pub const fn unit_size(self) -> usize {
        match self {
            Self::Byte | Self::Ascii | Self::SignedByte | Self::Undefined => 1,
            Self::Short | Self::SignedShort => 2,
            Self::Long | Self::SignedLong | Self::Float => 4,
            Self::Rational | Self::SignedRational | Self::Double => 8,
        }
    }
}
