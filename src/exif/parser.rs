//! Bounds-checked TIFF/EXIF directory walker.
//!
//! Every read goes through [`TiffReader`], which returns `None` instead of reading past
//! the end of the buffer. A tag whose value can't be read is skipped; a directory whose
//! entry count runs past the buffer keeps the entries that fit and flags the parse as
//! [`ExifStatus::Corrupt`].

use crate::exif::structs::{ExifStatus, GpsInfo, ImageMetadata};
use crate::exif::tags::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// `II`
    LittleEndian,
    /// `MM`
    BigEndian,
}

impl ByteOrder {
    fn from_marker(marker: &[u8]) -> Option<Self> {
        match marker {
            b"II" => Some(Self::LittleEndian),
            b"MM" => Some(Self::BigEndian),
            _ => None,
        }
    }

    fn u16(self, bytes: [u8; 2]) -> u16 {
        match self {
            Self::LittleEndian => u16::from_le_bytes(bytes),
            Self::BigEndian => u16::from_be_bytes(bytes),
        }
    }

    fn u32(self, bytes: [u8; 4]) -> u32 {
        match self {
            Self::LittleEndian => u32::from_le_bytes(bytes),
            Self::BigEndian => u32::from_be_bytes(bytes),
        }
    }
}

/// One 12-byte directory entry. `position` is the entry's offset from the TIFF header.
#[derive(Debug, Clone, Copy)]
struct IfdEntry {
    tag: u16,
    value_type: Option<ValueType>,
    count: u32,
    position: usize,
}

#[derive(Debug, Default)]
struct Directory {
    entries: Vec<IfdEntry>,
    truncated: bool,
}

struct TiffReader<'a> {
    data: &'a [u8],
    order: ByteOrder,
}

impl<'a> TiffReader<'a> {
    fn array<const N: usize>(&self, offset: usize) -> Option<[u8; N]> {
        self.data
            .get(offset..offset.checked_add(N)?)?
            .try_into()
            .ok()
    }

    fn u16(&self, offset: usize) -> Option<u16> {
        self.array(offset).map(|b| self.order.u16(b))
    }

    fn u32(&self, offset: usize) -> Option<u32> {
        self.array(offset).map(|b| self.order.u32(b))
    }

    fn directory(&self, offset: usize) -> Directory {
        let Some(count) = self.u16(offset) else {
            return Directory {
                entries: Vec::new(),
                truncated: true,
            };
        };

        let mut directory = Directory::default();
        for index in 0..usize::from(count) {
            let position = offset + 2 + index * IFD_ENTRY_SIZE;
            let (Some(tag), Some(code), Some(count)) = (
                self.u16(position),
                self.u16(position + 2),
                self.u32(position + 4),
            ) else {
                directory.truncated = true;
                break;
            };
            if self.u32(position + 8).is_none() {
                directory.truncated = true;
                break;
            }
            directory.entries.push(IfdEntry {
                tag,
                value_type: ValueType::from_code(code),
                count,
                position,
            });
        }
        directory
    }

    /// The raw value bytes of an entry: inline when they fit in four bytes, otherwise
    /// at the offset stored in the entry.
    fn value_bytes(&self, entry: &IfdEntry) -> Option<&'a [u8]> {
        let value_type = entry.value_type?;
        let len = value_type
            .unit_size()
            .checked_mul(usize::try_from(entry.count).ok()?)?;
        let start = if len <= 4 {
            entry.position + 8
        } else {
            usize::try_from(self.u32(entry.position + 8)?).ok()?
        };
        self.data.get(start..start.checked_add(len)?)
    }

    fn ascii(&self, entry: &IfdEntry) -> Option<String> {
        if !matches!(
            entry.value_type,
            Some(ValueType::Ascii | ValueType::Undefined)
        ) {
            return None;
        }
        let bytes = self.value_bytes(entry)?;
        let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
        Some(String::from_utf8_lossy(&bytes[..end]).trim_end().to_owned())
    }

    fn unsigned(&self, entry: &IfdEntry) -> Option<u32> {
        let bytes = self.value_bytes(entry)?;
        match entry.value_type? {
            ValueType::Byte | ValueType::Undefined => bytes.first().copied().map(u32::from),
            ValueType::Short => Some(u32::from(self.order.u16(bytes.get(..2)?.try_into().ok()?))),
            ValueType::Long => Some(self.order.u32(bytes.get(..4)?.try_into().ok()?)),
            _ => None,
        }
    }

    fn short(&self, entry: &IfdEntry) -> Option<u16> {
        self.unsigned(entry).and_then(|v| u16::try_from(v).ok())
    }

    /// The `index`-th component of a rational entry as a quotient. A zero denominator
    /// yields `None`.
    fn rational(&self, entry: &IfdEntry, index: usize) -> Option<f64> {
        let bytes = self.value_bytes(entry)?;
        let start = index.checked_mul(8)?;
        let pair = bytes.get(start..start + 8)?;
        let numerator = self.order.u32(pair[..4].try_into().ok()?);
        let denominator = self.order.u32(pair[4..].try_into().ok()?);
        match entry.value_type? {
            ValueType::Rational if denominator != 0 => {
                Some(f64::from(numerator) / f64::from(denominator))
            }
            ValueType::SignedRational if denominator != 0 => {
                Some(f64::from(numerator as i32) / f64::from(denominator as i32))
            }
            _ => None,
        }
    }

    /// Degrees, minutes, seconds folded into decimal degrees.
    fn degrees(&self, entry: &IfdEntry) -> Option<f64> {
        let degrees = self.rational(entry, 0)?;
        let minutes = self.rational(entry, 1).unwrap_or(0.0);
        let seconds = self.rational(entry, 2).unwrap_or(0.0);
        Some(degrees + minutes / 60.0 + seconds / 3600.0)
    }

    fn apply_tag(&self, entry: &IfdEntry, metadata: &mut ImageMetadata) {
        let m = metadata;
        match entry.tag {
            IMAGE_DESCRIPTION => set(&mut m.image_description, self.ascii(entry)),
            MAKE => set(&mut m.make, self.ascii(entry)),
            MODEL => set(&mut m.model, self.ascii(entry)),
            SOFTWARE => set(&mut m.software, self.ascii(entry)),
            COPYRIGHT => set(&mut m.copyright, self.ascii(entry)),
            ORIENTATION => set(&mut m.orientation, self.short(entry)),
            DATE_TIME => set(&mut m.date_time, self.ascii(entry)),
            DATE_TIME_ORIGINAL => set(&mut m.date_time_original, self.ascii(entry)),
            DATE_TIME_DIGITIZED => set(&mut m.date_time_digitized, self.ascii(entry)),
            SUB_SEC_TIME_ORIGINAL => set(&mut m.sub_sec_time_original, self.ascii(entry)),
            IMAGE_WIDTH | PIXEL_X_DIMENSION => set(&mut m.image_width, self.unsigned(entry)),
            IMAGE_LENGTH | PIXEL_Y_DIMENSION => set(&mut m.image_height, self.unsigned(entry)),
            F_NUMBER => set(&mut m.f_number, self.rational(entry, 0)),
            EXPOSURE_TIME => set(&mut m.exposure_time, self.rational(entry, 0)),
            EXPOSURE_PROGRAM => set(&mut m.exposure_program, self.short(entry)),
            ISO_SPEED_RATINGS => set(&mut m.iso_speed, self.unsigned(entry)),
            SHUTTER_SPEED_VALUE => set(&mut m.shutter_speed_value, self.rational(entry, 0)),
            EXPOSURE_BIAS_VALUE => set(&mut m.exposure_bias, self.rational(entry, 0)),
            SUBJECT_DISTANCE => set(&mut m.subject_distance, self.rational(entry, 0)),
            METERING_MODE => set(&mut m.metering_mode, self.short(entry)),
            FLASH => set(&mut m.flash, self.short(entry)),
            FOCAL_LENGTH => set(&mut m.focal_length, self.rational(entry, 0)),
            FOCAL_LENGTH_IN_35MM_FILM => set(&mut m.focal_length_35mm, self.short(entry)),
            LENS_MAKE => set(&mut m.lens_make, self.ascii(entry)),
            LENS_MODEL => set(&mut m.lens_model, self.ascii(entry)),
            _ => {}
        }
    }

    fn gps(&self, entries: &[IfdEntry]) -> Option<GpsInfo> {
        let (mut latitude_ref, mut longitude_ref, mut altitude_ref) = (None, None, None);
        let mut info = GpsInfo::default();
        for entry in entries {
            match entry.tag {
                GPS_LATITUDE_REF => latitude_ref = self.ascii(entry),
                GPS_LATITUDE => info.latitude = self.degrees(entry),
                GPS_LONGITUDE_REF => longitude_ref = self.ascii(entry),
                GPS_LONGITUDE => info.longitude = self.degrees(entry),
                GPS_ALTITUDE_REF => altitude_ref = self.unsigned(entry),
                GPS_ALTITUDE => info.altitude = self.rational(entry, 0),
                _ => {}
            }
        }

        if latitude_ref.as_deref() == Some("S") {
            info.latitude = info.latitude.map(|v| -v);
        }
        if longitude_ref.as_deref() == Some("W") {
            info.longitude = info.longitude.map(|v| -v);
        }
        if altitude_ref == Some(1) {
            info.altitude = info.altitude.map(|v| -v);
        }
        (info != GpsInfo::default()).then_some(info)
    }
}

/// Later tags of the same id overwrite earlier ones, but an unreadable value never
/// clears a field that was already decoded.
fn set<T>(field: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *field = value;
    }
}

/// Decodes the EXIF segment of a JPEG stream (or a bare TIFF/EXIF payload).
///
/// Always returns a record. On a non-success status the record holds whatever was
/// decoded before the failure point.
///
/// ```rust
/// use media_inspector::exif::{parse_exif, ExifStatus};
///
/// let (metadata, status) = parse_exif(&[0xFF, 0xD8, 0xFF, 0xD9]);
/// assert_eq!(status, ExifStatus::NoExif);
/// assert!(metadata.make.is_none());
/// ```
pub fn parse_exif(data: &[u8]) -> (ImageMetadata, ExifStatus) {
    let mut metadata = ImageMetadata::default();
    let status = match locate_tiff(data) {
        Ok(tiff) => decode_tiff(tiff, &mut metadata),
        Err(status) => status,
    };
    (metadata, status)
}

fn locate_tiff(data: &[u8]) -> Result<&[u8], ExifStatus> {
    if data.starts_with(b"II*\0") || data.starts_with(b"MM\0*") {
        return Ok(data);
    }
    if let Some(tiff) = data.strip_prefix(EXIF_HEADER.as_slice()) {
        return Ok(tiff);
    }

    let is_jpeg = data.starts_with(&[0xFF, 0xD8]);
    if is_jpeg && let Some(tiff) = find_app1_exif(data) {
        return Ok(tiff);
    }

    // Tolerate arbitrary wrapper bytes before the EXIF header.
    match data
        .windows(EXIF_HEADER.len())
        .position(|window| window == EXIF_HEADER)
    {
        Some(pos) => Ok(&data[pos + EXIF_HEADER.len()..]),
        None if is_jpeg => Err(ExifStatus::NoExif),
        None => Err(ExifStatus::NoJpeg),
    }
}

/// Walks JPEG marker segments up to the start of scan, looking for an APP1 segment
/// carrying an EXIF payload.
fn find_app1_exif(data: &[u8]) -> Option<&[u8]> {
    let mut pos = 2;
    loop {
        if *data.get(pos)? != 0xFF {
            return None;
        }
        let marker = *data.get(pos + 1)?;
        match marker {
            // fill byte
            0xFF => pos += 1,
            // standalone markers
            0x01 | 0xD0..=0xD8 => pos += 2,
            // start of scan, end of image
            0xDA | 0xD9 => return None,
            _ => {
                let len = usize::from(u16::from_be_bytes(
                    data.get(pos + 2..pos + 4)?.try_into().ok()?,
                ));
                if len < 2 {
                    return None;
                }
                let end = (pos + 2 + len).min(data.len());
                let payload = data.get(pos + 4..end)?;
                if marker == 0xE1 && payload.starts_with(EXIF_HEADER) {
                    return Some(&payload[EXIF_HEADER.len()..]);
                }
                pos += 2 + len;
            }
        }
    }
}

fn decode_tiff(tiff: &[u8], metadata: &mut ImageMetadata) -> ExifStatus {
    if tiff.len() < TIFF_HEADER_SIZE {
        return ExifStatus::Corrupt;
    }
    let Some(order) = ByteOrder::from_marker(&tiff[..2]) else {
        return ExifStatus::UnknownByteAlign;
    };
    let reader = TiffReader { data: tiff, order };
    if reader.u16(2) != Some(TIFF_MAGIC) {
        return ExifStatus::Corrupt;
    }
    let Some(ifd0_offset) = reader.u32(4).and_then(|v| usize::try_from(v).ok()) else {
        return ExifStatus::Corrupt;
    };

    let mut status = ExifStatus::Success;
    let ifd0 = reader.directory(ifd0_offset);
    if ifd0.truncated {
        status = ExifStatus::Corrupt;
    }

    let (mut exif_offset, mut gps_offset) = (None, None);
    for entry in &ifd0.entries {
        match entry.tag {
            EXIF_IFD_POINTER => exif_offset = reader.unsigned(entry),
            GPS_IFD_POINTER => gps_offset = reader.unsigned(entry),
            _ => reader.apply_tag(entry, metadata),
        }
    }

    if let Some(offset) = exif_offset {
        let exif_ifd = reader.directory(offset as usize);
        if exif_ifd.truncated {
            status = ExifStatus::Corrupt;
        }
        for entry in &exif_ifd.entries {
            reader.apply_tag(entry, metadata);
        }
    }

    if let Some(offset) = gps_offset {
        let gps_ifd = reader.directory(offset as usize);
        if gps_ifd.truncated {
            status = ExifStatus::Corrupt;
        }
        metadata.gps = reader.gps(&gps_ifd.entries);
    }

    status
}
