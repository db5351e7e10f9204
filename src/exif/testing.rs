//! Synthetic EXIF buffers for tests.

use crate::exif::parser::ByteOrder;
use crate::exif::tags::{EXIF_HEADER, EXIF_IFD_POINTER, GPS_IFD_POINTER, IFD_ENTRY_SIZE};

#[derive(Debug, Clone)]
pub(crate) enum FieldValue {
    Byte(u8),
    Ascii(&'static str),
    Short(u16),
    Long(u32),
    Rational(u32, u32),
    SignedRational(i32, i32),
    Rationals(Vec<(u32, u32)>),
}

#[derive(Debug, Clone)]
pub(crate) struct TiffBuilder {
    order: ByteOrder,
    ifd0: Vec<(u16, FieldValue)>,
    exif: Vec<(u16, FieldValue)>,
    gps: Vec<(u16, FieldValue)>,
}

fn ifd_size(entries: usize) -> usize {
    2 + entries * IFD_ENTRY_SIZE + 4
}

impl TiffBuilder {
    pub(crate) fn new(order: ByteOrder) -> Self {
        Self {
            order,
            ifd0: Vec::new(),
            exif: Vec::new(),
            gps: Vec::new(),
        }
    }

    pub(crate) fn ifd0(mut self, tag: u16, value: FieldValue) -> Self {
        self.ifd0.push((tag, value));
        self
    }

    pub(crate) fn exif(mut self, tag: u16, value: FieldValue) -> Self {
        self.exif.push((tag, value));
        self
    }

    pub(crate) fn gps(mut self, tag: u16, value: FieldValue) -> Self {
        self.gps.push((tag, value));
        self
    }

    fn u16(&self, value: u16) -> [u8; 2] {
        match self.order {
            ByteOrder::LittleEndian => value.to_le_bytes(),
            ByteOrder::BigEndian => value.to_be_bytes(),
        }
    }

    fn u32(&self, value: u32) -> [u8; 4] {
        match self.order {
            ByteOrder::LittleEndian => value.to_le_bytes(),
            ByteOrder::BigEndian => value.to_be_bytes(),
        }
    }

    /// Type code, component count and payload bytes of a value.
    fn encode(&self, value: &FieldValue) -> (u16, u32, Vec<u8>) {
        match value {
            FieldValue::Byte(v) => (1, 1, vec![*v]),
            FieldValue::Ascii(s) => {
                let mut bytes = s.as_bytes().to_vec();
                bytes.push(0);
                (2, bytes.len() as u32, bytes)
            }
            FieldValue::Short(v) => (3, 1, self.u16(*v).to_vec()),
            FieldValue::Long(v) => (4, 1, self.u32(*v).to_vec()),
            FieldValue::Rational(n, d) => (5, 1, [self.u32(*n), self.u32(*d)].concat()),
            FieldValue::SignedRational(n, d) => (
                10,
                1,
                [self.u32(*n as u32), self.u32(*d as u32)].concat(),
            ),
            FieldValue::Rationals(values) => (
                5,
                values.len() as u32,
                values
                    .iter()
                    .flat_map(|(n, d)| [self.u32(*n), self.u32(*d)].concat())
                    .collect(),
            ),
        }
    }

    fn write_ifd(
        &self,
        out: &mut Vec<u8>,
        data: &mut Vec<u8>,
        data_offset: usize,
        entries: &[(u16, FieldValue)],
    ) {
        out.extend(self.u16(entries.len() as u16));
        for (tag, value) in entries {
            let (code, count, mut payload) = self.encode(value);
            out.extend(self.u16(*tag));
            out.extend(self.u16(code));
            out.extend(self.u32(count));
            if payload.len() <= 4 {
                payload.resize(4, 0);
                out.extend(payload);
            } else {
                out.extend(self.u32((data_offset + data.len()) as u32));
                data.extend(payload);
                if data.len() % 2 == 1 {
                    data.push(0);
                }
            }
        }
        // no next IFD
        out.extend(self.u32(0));
    }

    /// A TIFF structure: header, IFD0, Exif IFD, GPS IFD, then the value area.
    pub(crate) fn tiff(&self) -> Vec<u8> {
        let ifd0_offset = 8;
        let pointers = usize::from(!self.exif.is_empty()) + usize::from(!self.gps.is_empty());
        let exif_offset = ifd0_offset + ifd_size(self.ifd0.len() + pointers);
        let exif_size = if self.exif.is_empty() { 0 } else { ifd_size(self.exif.len()) };
        let gps_offset = exif_offset + exif_size;
        let gps_size = if self.gps.is_empty() { 0 } else { ifd_size(self.gps.len()) };
        let data_offset = gps_offset + gps_size;

        let mut ifd0 = self.ifd0.clone();
        if !self.exif.is_empty() {
            ifd0.push((EXIF_IFD_POINTER, FieldValue::Long(exif_offset as u32)));
        }
        if !self.gps.is_empty() {
            ifd0.push((GPS_IFD_POINTER, FieldValue::Long(gps_offset as u32)));
        }

        let mut out = match self.order {
            ByteOrder::LittleEndian => b"II".to_vec(),
            ByteOrder::BigEndian => b"MM".to_vec(),
        };
        out.extend(self.u16(0x002A));
        out.extend(self.u32(ifd0_offset as u32));

        let mut data = Vec::new();
        self.write_ifd(&mut out, &mut data, data_offset, &ifd0);
        if !self.exif.is_empty() {
            self.write_ifd(&mut out, &mut data, data_offset, &self.exif);
        }
        if !self.gps.is_empty() {
            self.write_ifd(&mut out, &mut data, data_offset, &self.gps);
        }
        out.extend(data);
        out
    }

    /// The TIFF structure wrapped in a JPEG stream: SOI, a JFIF APP0, the EXIF APP1, EOI.
    pub(crate) fn jpeg(&self) -> Vec<u8> {
        let tiff = self.tiff();
        let mut out = vec![0xFF, 0xD8];
        out.extend([0xFF, 0xE0, 0x00, 0x10]);
        out.extend(b"JFIF\0");
        out.extend([0x01, 0x01, 0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00]);
        out.extend([0xFF, 0xE1]);
        out.extend(((2 + EXIF_HEADER.len() + tiff.len()) as u16).to_be_bytes());
        out.extend(EXIF_HEADER);
        out.extend(tiff);
        out.extend([0xFF, 0xD9]);
        out
    }
}
