//! Data records: field values decoded against a definition.

use alloc::{rc::Rc, string::String, vec::Vec};

use tracing::{trace, warn};

use crate::profile::{BaseType, FieldProfile, Profile};

use super::{
    Error,
    component::{extract, source_bits},
    cursor::{ByteCursor, Endianness, OutOfBounds},
    definition::{DeveloperFieldDefinition, FieldDefinition, MessageDefinition},
    header::RecordHeader,
    session::Session,
    value::{FromValue, Value},
};

/// Field number holding a message's timestamp.
pub const TIMESTAMP_FIELD: u8 = 253;

/// Where a decoded field came from.
#[derive(Debug, Clone)]
pub enum FieldSource {
    /// Declared by the definition.
    Field(FieldDefinition),
    /// Declared by the definition as developer data.
    Developer(DeveloperFieldDefinition),
    /// Expanded from a bit range of the field numbered `carrier`.
    Component { carrier: u8, number: u8 },
    /// Reconstructed from a compressed timestamp record header.
    Timestamp { time_offset: u8 },
}

/// A field of a decoded data message.
#[derive(Debug, Clone)]
pub struct DecodedField {
    pub(crate) source: FieldSource,
    pub(crate) profile: Option<&'static FieldProfile>,
    pub(crate) raw: Option<Value>,
    pub(crate) value: Option<Value>,
}

impl DecodedField {
    pub fn source(&self) -> &FieldSource {
        &self.source
    }

    /// Field number: the definition number for regular fields, the target for
    /// components, and the developer field number for developer fields.
    pub fn number(&self) -> u8 {
        match &self.source {
            FieldSource::Field(f) => f.number,
            FieldSource::Developer(f) => f.number,
            FieldSource::Component { number, .. } => *number,
            FieldSource::Timestamp { .. } => TIMESTAMP_FIELD,
        }
    }

    /// Profile metadata, after subfield resolution.
    pub fn profile(&self) -> Option<&'static FieldProfile> {
        self.profile
    }

    pub fn name(&self) -> Option<&str> {
        match &self.source {
            FieldSource::Developer(f) => f.resolved.as_ref()?.name.as_deref(),
            _ => self.profile.map(|p| p.name),
        }
    }

    pub fn units(&self) -> Option<&str> {
        let units = match &self.source {
            FieldSource::Developer(f) => f.resolved.as_ref()?.units.as_deref()?,
            _ => self.profile?.units,
        };
        Some(units).filter(|u| !u.is_empty())
    }

    pub fn is_developer(&self) -> bool {
        matches!(self.source, FieldSource::Developer(_))
    }

    /// Value as read, before scaling or symbol mapping. `None` if null.
    pub fn raw(&self) -> Option<&Value> {
        self.raw.as_ref()
    }

    /// Value after scaling and symbol mapping. `None` if null.
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// Convert the value, falling back to the raw value if the conversion
    /// fails.
    pub fn get<T: FromValue>(&self) -> Option<T> {
        self.value()
            .and_then(T::from_value)
            .or_else(|| self.raw().and_then(T::from_value))
    }

    /// Convert every non-null element of the value, falling back to the raw
    /// value if any conversion fails.
    pub fn elements<T: FromValue>(&self) -> Vec<T> {
        let convert = |v: &Value| v.elements().map(T::from_value).collect::<Option<Vec<T>>>();

        self.value()
            .and_then(convert)
            .or_else(|| self.raw().and_then(convert))
            .unwrap_or_default()
    }
}

/// A decoded data record.
#[derive(Debug, Clone)]
pub struct DataMessage {
    pub header: RecordHeader,
    pub definition: Rc<MessageDefinition>,
    pub fields: Vec<DecodedField>,
}

impl DataMessage {
    /// Global message number.
    pub fn number(&self) -> u16 {
        self.definition.global
    }

    pub fn name(&self) -> Option<&'static str> {
        self.definition.name()
    }

    pub fn fields(&self) -> impl Iterator<Item = &DecodedField> {
        self.fields.iter()
    }

    /// The first non-developer field with the given number. Fields declared
    /// by the definition precede those expanded from components.
    pub fn field(&self, number: u8) -> Option<&DecodedField> {
        self.fields
            .iter()
            .find(|f| !f.is_developer() && f.number() == number)
    }

    pub fn field_by_name(&self, name: &str) -> Option<&DecodedField> {
        self.fields.iter().find(|f| f.name() == Some(name))
    }

    pub fn developer_fields(&self) -> impl Iterator<Item = &DecodedField> {
        self.fields.iter().filter(|f| f.is_developer())
    }

    /// Timestamp of the message, whether read or reconstructed.
    pub fn timestamp(&self) -> Option<u32> {
        self.field(TIMESTAMP_FIELD)?.raw()?.as_u64()?.try_into().ok()
    }

    /// Offset carried by a compressed timestamp record header.
    pub fn time_offset(&self) -> Option<u8> {
        match self.header {
            RecordHeader::CompressedTimestamp { time_offset, .. } => Some(time_offset),
            RecordHeader::Normal { .. } => None,
        }
    }

    /// Decode the body of a data record, after its record header.
    pub fn decode<P: Profile + ?Sized>(
        cursor: &mut ByteCursor,
        header: RecordHeader,
        definition: Rc<MessageDefinition>,
        session: &mut Session<P>,
    ) -> Result<Self, Error> {
        let global = definition.global;
        let endianness = definition.endianness;

        let mut regular = Vec::with_capacity(definition.fields.len());
        for field in &definition.fields {
            let r = cursor.take_slice(field.size.into())?;
            regular.push((field, r, parse(field.base_type, r, endianness)?));
        }

        let mut developer = Vec::with_capacity(definition.developer_fields.len());
        for field in &definition.developer_fields {
            let r = cursor.take_slice(field.size.into())?;
            developer.push((field, parse(field.base_type(), r, endianness)?));
        }

        let siblings: Vec<(u8, Option<u64>)> = regular
            .iter()
            .map(|(f, _, raw)| (f.number, raw.as_ref().and_then(Value::as_u64)))
            .collect();

        let mut fields = Vec::with_capacity(regular.len() + developer.len());
        let mut expanded = Vec::new();

        for (field, r, raw) in regular {
            let profile = field.profile.map(|p| resolve(p, &siblings));
            let value = raw.as_ref().map(|raw| transform(raw, profile, session.profile));

            if let Some(x) = raw.as_ref().and_then(Value::as_u64) {
                session.accumulators.set(global, field.number, x);
            }

            if session.options.expand_components && raw.is_some() {
                let source = source_bits(r, field.base_type.size().into(), endianness);
                for component in profile.iter().flat_map(|p| p.components) {
                    let mut x = extract(source, component.bit_offset, component.bits);
                    if component.accumulate {
                        x = session
                            .accumulators
                            .accumulate(global, component.field, x, component.bits);
                    }

                    let target = definition
                        .profile
                        .and_then(|p| p.field(component.field))
                        .map(|p| resolve(p, &siblings));

                    let value = if component.is_scaled() {
                        Value::F64(x as f64 / component.scale - component.offset)
                    } else {
                        transform(&Value::U64(x), target, session.profile)
                    };

                    expanded.push(DecodedField {
                        source: FieldSource::Component {
                            carrier: field.number,
                            number: component.field,
                        },
                        profile: target,
                        raw: Some(Value::U64(x)),
                        value: Some(value),
                    });
                }
            }

            fields.push(DecodedField {
                source: FieldSource::Field(field.clone()),
                profile,
                raw,
                value,
            });
        }

        for (field, raw) in developer {
            fields.push(DecodedField {
                source: FieldSource::Developer(field.clone()),
                profile: None,
                value: raw.clone(),
                raw,
            });
        }

        fields.append(&mut expanded);

        match header {
            RecordHeader::CompressedTimestamp {
                local_type,
                time_offset,
            } => match session.last_timestamp {
                Some(last) => {
                    let timestamp = compressed_timestamp(last, time_offset);
                    session.last_timestamp = Some(timestamp);

                    let profile = definition.profile.and_then(|p| p.field(TIMESTAMP_FIELD));
                    let raw = Value::U32(timestamp);
                    fields.push(DecodedField {
                        source: FieldSource::Timestamp { time_offset },
                        profile,
                        value: Some(transform(&raw, profile, session.profile)),
                        raw: Some(raw),
                    });
                }
                None if session.options.is_strict() => {
                    Err(Error::MissingTimestampReference { local_type })?
                }
                None => warn!(local_type, "compressed timestamp without reference"),
            },
            RecordHeader::Normal { .. } => {
                let timestamp: Option<u32> = fields
                    .iter()
                    .find(|f| matches!(&f.source, FieldSource::Field(d) if d.number == TIMESTAMP_FIELD))
                    .and_then(|f| f.raw()?.as_u64()?.try_into().ok());

                if let Some(timestamp) = timestamp {
                    session.last_timestamp = Some(timestamp);
                }
            }
        }

        trace!(global, fields = fields.len(), "data message");

        Ok(Self {
            header,
            definition,
            fields,
        })
    }
}

/// Add a 5-bit offset to the most recent timestamp, allowing one rollover.
pub fn compressed_timestamp(last: u32, offset: u8) -> u32 {
    let offset = u32::from(offset & 0x1F);
    let mut timestamp = (last & !0x1F).wrapping_add(offset);
    if offset < last & 0x1F {
        timestamp = timestamp.wrapping_add(0x20);
    }
    timestamp
}

/// The first subfield whose references all hold against the raw values of
/// the message, or the field itself.
fn resolve(field: &'static FieldProfile, siblings: &[(u8, Option<u64>)]) -> &'static FieldProfile {
    field
        .subfields
        .iter()
        .find(|s| {
            s.references.iter().all(|r| {
                siblings
                    .iter()
                    .any(|(number, raw)| *number == r.field && *raw == Some(r.value))
            })
        })
        .map_or(field, |s| &s.field)
}

/// Apply scale and offset, or symbol names, element-wise.
fn transform<P: Profile + ?Sized>(
    raw: &Value,
    field: Option<&'static FieldProfile>,
    profile: &P,
) -> Value {
    let Some(field) = field else {
        return raw.clone();
    };

    let element = |x: &Value| {
        if field.is_scaled() {
            if let Some(x) = x.as_f64() {
                return Value::F64(x / field.scale - field.offset);
            }
        } else if let Some(name) = x.as_u64().and_then(|x| profile.value_name(field.kind, x)) {
            return Value::Symbol(name);
        }
        x.clone()
    };

    match raw {
        Value::Array(v) => Value::Array(v.iter().map(|x| x.as_ref().map(element)).collect()),
        x => element(x),
    }
}

/// Decode the bytes of a field as elements of a base type.
///
/// Returns `None` if the field is null: every element holds its type's invalid
/// marker, or a string is empty.
pub fn parse(
    base_type: BaseType,
    r: &[u8],
    endianness: Endianness,
) -> Result<Option<Value>, OutOfBounds> {
    macro_rules! elements {
        ($t:ty, $variant:ident, $is_null:expr) => {{
            let is_null: fn($t) -> bool = $is_null;
            let mut cursor = ByteCursor::new(r);
            let count = r.len() / core::mem::size_of::<$t>();
            let mut elements = Vec::with_capacity(count);
            for _ in 0..count {
                let x: $t = cursor.read(endianness)?;
                elements.push((!is_null(x)).then_some(Value::$variant(x)));
            }
            elements
        }};
    }

    let mut elements = match base_type {
        BaseType::String => {
            let end = r.iter().position(|b| *b == 0).unwrap_or(r.len());
            return Ok((end != 0).then(|| Value::String(String::from_utf8_lossy(&r[..end]).into())));
        }
        // Bytes are opaque: only an all-invalid field is null.
        BaseType::Byte => {
            if r.iter().all(|b| *b == u8::MAX) {
                return Ok(None);
            }
            return Ok(Some(match r {
                [x] => Value::U8(*x),
                r => Value::Array(r.iter().map(|x| Some(Value::U8(*x))).collect()),
            }));
        }
        BaseType::Enum | BaseType::UInt8 => elements!(u8, U8, |x| x == u8::MAX),
        BaseType::UInt8z => elements!(u8, U8, |x| x == u8::MIN),
        BaseType::SInt8 => elements!(i8, I8, |x| x == i8::MAX),
        BaseType::UInt16 => elements!(u16, U16, |x| x == u16::MAX),
        BaseType::UInt16z => elements!(u16, U16, |x| x == u16::MIN),
        BaseType::SInt16 => elements!(i16, I16, |x| x == i16::MAX),
        BaseType::UInt32 => elements!(u32, U32, |x| x == u32::MAX),
        BaseType::UInt32z => elements!(u32, U32, |x| x == u32::MIN),
        BaseType::SInt32 => elements!(i32, I32, |x| x == i32::MAX),
        BaseType::UInt64 => elements!(u64, U64, |x| x == u64::MAX),
        BaseType::UInt64z => elements!(u64, U64, |x| x == u64::MIN),
        BaseType::SInt64 => elements!(i64, I64, |x| x == i64::MAX),
        BaseType::Float32 => elements!(f32, F32, f32::is_nan),
        BaseType::Float64 => elements!(f64, F64, f64::is_nan),
    };

    Ok(match elements.len() {
        0 => None,
        1 => elements.pop().flatten(),
        _ if elements.iter().all(Option::is_none) => None,
        _ => Some(Value::Array(elements)),
    })
}
