#![allow(dead_code)]

//! Builder for FIT documents used by the integration tests.

use sprocket::sans::check::compute_crc;

pub const UINT8: u8 = 0x02;
pub const UINT16: u8 = 0x84;
pub const UINT32: u8 = 0x86;
pub const SINT8: u8 = 0x01;
pub const ENUM: u8 = 0x00;
pub const STRING: u8 = 0x07;
pub const BYTE: u8 = 0x0D;

#[derive(Debug, Clone)]
pub struct Document {
    header_size: u8,
    records: Vec<u8>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// A document with a 14-byte header.
    pub fn new() -> Self {
        Self {
            header_size: 14,
            records: Vec::new(),
        }
    }

    /// A document with a 12-byte header, which carries no check value.
    pub fn short() -> Self {
        Self {
            header_size: 12,
            records: Vec::new(),
        }
    }

    /// Append a little endian definition record.
    pub fn definition(self, local: u8, global: u16, fields: &[(u8, u8, u8)]) -> Self {
        self.definition_with(local, 0, &global.to_le_bytes(), fields, None)
    }

    /// Append a big endian definition record.
    pub fn definition_be(self, local: u8, global: u16, fields: &[(u8, u8, u8)]) -> Self {
        self.definition_with(local, 1, &global.to_be_bytes(), fields, None)
    }

    /// Append a little endian definition record with developer fields, given as
    /// `(number, size, developer data index)`.
    pub fn developer_definition(
        self,
        local: u8,
        global: u16,
        fields: &[(u8, u8, u8)],
        developer_fields: &[(u8, u8, u8)],
    ) -> Self {
        self.definition_with(local, 0, &global.to_le_bytes(), fields, Some(developer_fields))
    }

    fn definition_with(
        mut self,
        local: u8,
        architecture: u8,
        global: &[u8],
        fields: &[(u8, u8, u8)],
        developer_fields: Option<&[(u8, u8, u8)]>,
    ) -> Self {
        let developer_flag = if developer_fields.is_some() { 0x20 } else { 0 };
        self.records.push(0x40 | developer_flag | local);
        self.records.extend_from_slice(&[0, architecture]);
        self.records.extend_from_slice(global);
        self.records.push(fields.len() as u8);
        for (number, size, base_type) in fields {
            self.records.extend_from_slice(&[*number, *size, *base_type]);
        }

        if let Some(developer_fields) = developer_fields {
            self.records.push(developer_fields.len() as u8);
            for (number, size, index) in developer_fields {
                self.records.extend_from_slice(&[*number, *size, *index]);
            }
        }

        self
    }

    /// Append a data record with a normal header.
    pub fn data(mut self, local: u8, r: &[u8]) -> Self {
        self.records.push(local);
        self.records.extend_from_slice(r);
        self
    }

    /// Append a data record with a compressed timestamp header.
    pub fn compressed(mut self, local: u8, time_offset: u8, r: &[u8]) -> Self {
        self.records.push(0x80 | (local & 0x03) << 5 | (time_offset & 0x1F));
        self.records.extend_from_slice(r);
        self
    }

    /// Append arbitrary bytes to the record section.
    pub fn raw(mut self, r: &[u8]) -> Self {
        self.records.extend_from_slice(r);
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut r = vec![self.header_size, 0x20];
        r.extend_from_slice(&2132u16.to_le_bytes());
        r.extend_from_slice(&(self.records.len() as u32).to_le_bytes());
        r.extend_from_slice(b".FIT");

        if self.header_size == 14 {
            let crc = compute_crc(0, &r);
            r.extend_from_slice(&crc.to_le_bytes());
        }

        r.extend_from_slice(&self.records);

        let crc = compute_crc(0, &r);
        r.extend_from_slice(&crc.to_le_bytes());
        r
    }
}

/// A `file_id` document declaring an activity file from a Garmin device.
pub fn activity_file_id() -> Document {
    Document::new()
        .definition(
            0,
            0,
            &[(0, 1, ENUM), (1, 2, UINT16), (2, 2, UINT16), (3, 4, 0x8C)],
        )
        .data(0, &[4, 1, 0, 0x2C, 0x07, 0x39, 0x30, 0, 0])
}

/// An activity document holding records, a gear change event and heart rate
/// variability intervals.
pub fn activity() -> Document {
    activity_file_id()
        .definition(1, 20, &[(253, 4, UINT32), (3, 1, UINT8), (2, 2, UINT16)])
        .definition(2, 20, &[(3, 1, UINT8)])
        .definition(3, 21, &[(0, 1, ENUM), (3, 4, UINT32)])
        .definition(0, 78, &[(0, 6, UINT16)])
        .data(1, &[0xE8, 0x03, 0, 0, 120, 0x28, 0x0A])
        .compressed(2, 10, &[0xFF])
        .data(3, &[42, 3, 28, 2, 50])
        .data(0, &[0xE8, 0x03, 0xFF, 0xFF, 0xD0, 0x07])
}
