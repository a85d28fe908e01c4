//! Document and record headers.

use tartan_bitfield::bitfield;
use thiserror::Error;
use zerocopy::{
    FromBytes,
    byteorder::little_endian::{U16, U32},
};

use super::cursor::{ByteCursor, Endianness, OutOfBounds};

/// An error decoding a document header.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HeaderError {
    /// Incorrect filetype marker.
    #[error("Incorrect file type marker.")]
    NotFitData,
    /// Unknown header length.
    #[error("Unknown header length ({0}).")]
    UnknownHeaderLength(u8),
    /// Calculated and found header CRC values do not match.
    #[error("Calculated ({calculated}) and found ({found}) header CRC values do not match.")]
    HeaderChecksum { found: u16, calculated: u16 },
    /// The declared document extends past the end of the input.
    #[error("Document of {file_size} bytes exceeds the {available} bytes remaining.")]
    FileTooLarge { file_size: usize, available: usize },
    /// The input ended within the header.
    #[error("Truncated header: {0}")]
    Truncated(#[from] OutOfBounds),
}

/// The header opening each document of a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerHeader {
    pub header_size: u8,
    pub protocol_version: u8,
    pub profile_version: u16,
    /// Number of record bytes following the header.
    pub data_size: u32,
    /// Header check value, present in extended headers.
    pub crc: Option<u16>,
}

impl ContainerHeader {
    /// Size of a header without a check value.
    pub const MIN_SIZE: u8 = 12;
    /// Size of a header with a check value.
    pub const EXTENDED_SIZE: u8 = 14;

    /// Decode a document header at the cursor's position.
    ///
    /// On success the cursor is restricted to the document, which is rebased to
    /// begin at offset zero, and positioned at its first record.
    pub fn decode(cursor: &mut ByteCursor) -> Result<Self, HeaderError> {
        #[repr(C)]
        #[derive(FromBytes)]
        struct FileHeader {
            header_size: u8,
            protocol_version: u8,
            profile_version: U16,
            data_size: U32,
            data_type: [u8; 4],
        }

        let start = cursor.position();

        let FileHeader {
            header_size,
            protocol_version,
            profile_version,
            data_size,
            data_type,
        } = zerocopy::transmute!(cursor.take::<12>()?);

        if &data_type != b".FIT" {
            Err(HeaderError::NotFitData)?;
        }

        let crc = match header_size {
            Self::MIN_SIZE => None,
            Self::EXTENDED_SIZE.. => {
                let calculated = cursor.crc_range(start, cursor.position())?;
                let found: u16 = cursor.read(Endianness::Little)?;

                // Zero marks a check value the writer did not compute.
                if found != 0 && found != calculated {
                    Err(HeaderError::HeaderChecksum { found, calculated })?;
                }

                cursor.skip((header_size - Self::EXTENDED_SIZE) as usize)?;
                Some(found)
            }
            _ => Err(HeaderError::UnknownHeaderLength(header_size))?,
        };

        let header = Self {
            header_size,
            protocol_version,
            profile_version: profile_version.get(),
            data_size: data_size.get(),
            crc,
        };

        let available = cursor.len() - start;
        if header.file_size() > available {
            Err(HeaderError::FileTooLarge {
                file_size: header.file_size(),
                available,
            })?;
        }

        cursor.slice(start, start + header.file_size())?;
        Ok(header)
    }

    /// Length of the whole document: header, records and trailing check value.
    pub fn file_size(&self) -> usize {
        self.header_size as usize + self.data_size as usize + 2
    }

    /// Offset at which records end and the trailing check value begins.
    pub fn data_end(&self) -> usize {
        self.header_size as usize + self.data_size as usize
    }

    /// Protocol version as `(major, minor)`.
    pub fn protocol(&self) -> (u8, u8) {
        bitfield! {
            struct Protocol(u8) {
                [0..4] minor: u8,
                [4..8] major: u8,
            }
        }

        let version = Protocol(self.protocol_version);
        (version.major(), version.minor())
    }

    /// Profile version as `(major, minor)`.
    pub fn profile(&self) -> (u16, u16) {
        (self.profile_version / 100, self.profile_version % 100)
    }
}

/// The byte opening each record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordHeader {
    /// A definition or data record addressed to one of 16 local types.
    Normal {
        is_definition: bool,
        has_developer_data: bool,
        local_type: u8,
    },
    /// A data record addressed to one of 4 local types, carrying a time offset
    /// from the most recent timestamp.
    CompressedTimestamp { local_type: u8, time_offset: u8 },
}

impl RecordHeader {
    /// Decode a record header. Every byte is a valid header.
    pub fn decode(r: u8) -> Self {
        bitfield! {
            struct RecordHeader(u8) {
                [7] is_compressed,
            }
        }

        if RecordHeader(r).is_compressed() {
            bitfield! {
                struct CompressedHeader(u8) {
                    [0..5] time_offset: u8,
                    [5..7] local_message: u8,
                }
            }

            let header = CompressedHeader(r);

            Self::CompressedTimestamp {
                local_type: header.local_message(),
                time_offset: header.time_offset(),
            }
        } else {
            bitfield! {
                struct NormalHeader(u8) {
                    [0..4] local_message: u8,
                    [5] is_developer,
                    [6] is_definition,
                }
            }

            let header = NormalHeader(r);

            Self::Normal {
                is_definition: header.is_definition(),
                has_developer_data: header.is_developer(),
                local_type: header.local_message(),
            }
        }
    }

    pub fn local_type(self) -> u8 {
        match self {
            Self::Normal { local_type, .. } | Self::CompressedTimestamp { local_type, .. } => {
                local_type
            }
        }
    }

    pub fn is_definition(self) -> bool {
        matches!(
            self,
            Self::Normal {
                is_definition: true,
                ..
            }
        )
    }
}

impl From<u8> for RecordHeader {
    fn from(r: u8) -> Self {
        Self::decode(r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(header_size: u8, data_size: u32) -> [u8; 12] {
        let mut r = [0; 12];
        r[0] = header_size;
        r[1] = 0x20;
        r[2..4].copy_from_slice(&2132u16.to_le_bytes());
        r[4..8].copy_from_slice(&data_size.to_le_bytes());
        r[8..12].copy_from_slice(b".FIT");
        r
    }

    #[test]
    fn short_header() {
        let mut bytes = [0u8; 20];
        bytes[..12].copy_from_slice(&document(12, 4));
        let mut cursor = ByteCursor::new(&bytes);

        let header = ContainerHeader::decode(&mut cursor).unwrap();
        assert_eq!(header.crc, None);
        assert_eq!(header.protocol(), (2, 0));
        assert_eq!(header.profile(), (21, 32));
        assert_eq!(header.file_size(), 18);
        assert_eq!(cursor.len(), 18);
        assert_eq!(cursor.position(), 12);
    }

    #[test]
    fn extended_header_checks_crc() {
        let mut bytes = [0u8; 16];
        bytes[..12].copy_from_slice(&document(14, 0));
        let crc = crate::sans::check::compute_crc(0, &bytes[..12]);
        bytes[12..14].copy_from_slice(&crc.to_le_bytes());

        let header = ContainerHeader::decode(&mut ByteCursor::new(&bytes)).unwrap();
        assert_eq!(header.crc, Some(crc));

        bytes[12] ^= 0xFF;
        assert!(matches!(
            ContainerHeader::decode(&mut ByteCursor::new(&bytes)),
            Err(HeaderError::HeaderChecksum { .. })
        ));

        bytes[12..14].copy_from_slice(&[0, 0]);
        assert!(ContainerHeader::decode(&mut ByteCursor::new(&bytes)).is_ok());
    }

    #[test]
    fn rejects_bad_marker_and_size() {
        let mut bytes = [0u8; 14];
        bytes[..12].copy_from_slice(&document(12, 0));
        bytes[9] = b'X';
        assert_eq!(
            ContainerHeader::decode(&mut ByteCursor::new(&bytes)),
            Err(HeaderError::NotFitData)
        );

        bytes[..12].copy_from_slice(&document(13, 0));
        assert_eq!(
            ContainerHeader::decode(&mut ByteCursor::new(&bytes)),
            Err(HeaderError::UnknownHeaderLength(13))
        );

        bytes[..12].copy_from_slice(&document(12, 100));
        assert_eq!(
            ContainerHeader::decode(&mut ByteCursor::new(&bytes)),
            Err(HeaderError::FileTooLarge {
                file_size: 114,
                available: 14
            })
        );
    }

    #[test]
    fn record_headers() {
        assert_eq!(
            RecordHeader::decode(0x45),
            RecordHeader::Normal {
                is_definition: true,
                has_developer_data: false,
                local_type: 5
            }
        );
        assert_eq!(
            RecordHeader::decode(0x6F),
            RecordHeader::Normal {
                is_definition: true,
                has_developer_data: true,
                local_type: 15
            }
        );
        assert_eq!(
            RecordHeader::decode(0x03),
            RecordHeader::Normal {
                is_definition: false,
                has_developer_data: false,
                local_type: 3
            }
        );

        let compressed = RecordHeader::decode(0b1_10_10111);
        assert_eq!(
            compressed,
            RecordHeader::CompressedTimestamp {
                local_type: 2,
                time_offset: 23
            }
        );
        assert!(!compressed.is_definition());
        assert_eq!(compressed.local_type(), 2);
    }
}
