//! Definition records: the layout of later data records.

use alloc::{rc::Rc, vec::Vec};

use tracing::{trace, warn};
use zerocopy::FromBytes;

use crate::profile::{BaseType, FieldProfile, MessageProfile, Profile};

use super::{
    Error,
    cursor::{ByteCursor, Endianness},
    developer::DeveloperField,
    session::Session,
};

/// Layout of one field of a data record.
#[derive(Debug, Clone)]
pub struct FieldDefinition {
    pub number: u8,
    /// Size in bytes of the field in each data record.
    pub size: u8,
    /// Base type the field is decoded as. Differs from the declared type if
    /// that was unknown or did not divide the size.
    pub base_type: BaseType,
    pub profile: Option<&'static FieldProfile>,
}

impl FieldDefinition {
    /// Number of elements held by the field.
    pub fn count(&self) -> usize {
        (self.size / self.base_type.size()) as usize
    }
}

/// Layout of one developer field of a data record.
#[derive(Debug, Clone)]
pub struct DeveloperFieldDefinition {
    pub number: u8,
    pub size: u8,
    pub developer_data_index: u8,
    /// The field description registered when the definition was decoded.
    pub resolved: Option<Rc<DeveloperField>>,
}

impl DeveloperFieldDefinition {
    /// Base type the field is decoded as: the registered type if it divides
    /// the size, and bytes otherwise.
    pub fn base_type(&self) -> BaseType {
        self.resolved
            .as_ref()
            .map(|f| f.base_type)
            .filter(|b| self.size % b.size() == 0)
            .unwrap_or(BaseType::Byte)
    }
}

/// The layout bound to a local type by a definition record.
#[derive(Debug, Clone)]
pub struct MessageDefinition {
    pub global: u16,
    pub endianness: Endianness,
    pub fields: Vec<FieldDefinition>,
    pub developer_fields: Vec<DeveloperFieldDefinition>,
    pub profile: Option<&'static MessageProfile>,
}

impl MessageDefinition {
    pub fn name(&self) -> Option<&'static str> {
        self.profile.map(|p| p.name)
    }

    /// Size in bytes of each data record, excluding the record header.
    pub fn size(&self) -> usize {
        let fields = self.fields.iter().map(|f| f.size as usize);
        let developer_fields = self.developer_fields.iter().map(|f| f.size as usize);
        fields.chain(developer_fields).sum()
    }

    /// Decode the body of a definition record, after its record header.
    pub fn decode<P: Profile + ?Sized>(
        cursor: &mut ByteCursor,
        has_developer_data: bool,
        session: &mut Session<P>,
    ) -> Result<Self, Error> {
        #[repr(C, packed)]
        #[derive(FromBytes)]
        struct DefinitionMessage {
            _reserved: u8,
            architecture: u8,
            global_message: [u8; 2],
            fields_remaining: u8,
        }

        #[repr(C, packed)]
        #[derive(FromBytes)]
        struct FieldHeader {
            field: u8,
            size: u8,
            base_type: u8,
        }

        let DefinitionMessage {
            architecture,
            global_message,
            fields_remaining,
            ..
        } = zerocopy::transmute!(cursor.take::<5>()?);

        let endianness = match architecture {
            0 => Endianness::Little,
            1 => Endianness::Big,
            x if session.options.is_strict() => Err(Error::InvalidArchitecture(x))?,
            x => {
                warn!(architecture = x, "unknown architecture, assuming big endian");
                Endianness::Big
            }
        };

        let global = match endianness {
            Endianness::Little => u16::from_le_bytes(global_message),
            Endianness::Big => u16::from_be_bytes(global_message),
        };

        let profile = session.profile.message(global);
        if profile.is_none() {
            trace!(global, "message not in profile");
        }

        let mut fields = Vec::with_capacity(fields_remaining.into());
        for _ in 0..fields_remaining {
            let FieldHeader {
                field,
                size,
                base_type: id,
            } = zerocopy::transmute!(cursor.take::<3>()?);

            let base_type = match session.profile.base_type(id) {
                Some(base_type) => base_type,
                None if session.options.is_strict() => Err(Error::UnknownBaseType(id))?,
                None => {
                    warn!(global, field, base_type = id, "unknown base type, reading bytes");
                    BaseType::Byte
                }
            };

            let base_type = if size % base_type.size() != 0 {
                warn!(
                    global,
                    field,
                    size,
                    base_type = base_type.name(),
                    "size not a multiple of base type, reading bytes"
                );
                BaseType::Byte
            } else {
                base_type
            };

            fields.push(FieldDefinition {
                number: field,
                size,
                base_type,
                profile: profile.and_then(|p| p.field(field)),
            });
        }

        let mut developer_fields = Vec::new();
        if has_developer_data {
            let [count] = cursor.take::<1>()?;
            developer_fields.reserve(count.into());

            for _ in 0..count {
                let [number, size, developer_data_index] = cursor.take::<3>()?;
                let resolved = session.developers.field(developer_data_index, number);
                if resolved.is_none() {
                    warn!(
                        developer_data_index,
                        number, "developer field has no description"
                    );
                }

                developer_fields.push(DeveloperFieldDefinition {
                    number,
                    size,
                    developer_data_index,
                    resolved,
                });
            }
        }

        for field in &fields {
            for component in accumulated_targets(field.profile) {
                session.accumulators.seed(global, component);
            }
        }

        Ok(Self {
            global,
            endianness,
            fields,
            developer_fields,
            profile,
        })
    }
}

/// Target fields of every accumulated component a field may expand to,
/// including those of its subfields.
fn accumulated_targets(profile: Option<&'static FieldProfile>) -> impl Iterator<Item = u8> {
    let subfields = profile.into_iter().flat_map(|p| p.subfields.iter().map(|s| &s.field));
    profile
        .into_iter()
        .chain(subfields)
        .flat_map(|p| p.components.iter())
        .filter(|c| c.accumulate)
        .map(|c| c.field)
}
