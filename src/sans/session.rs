//! Per-document decoding state.

use alloc::{rc::Rc, vec::Vec};

use either::Either::{self, Left, Right};
use tracing::{debug, trace, warn};

use crate::profile::{BaseType, Profile};

use super::{
    Error,
    component::Accumulators,
    cursor::ByteCursor,
    data::DataMessage,
    definition::MessageDefinition,
    developer::{DeveloperField, DeveloperRegistry},
    header::RecordHeader,
    value::FromValue,
};

/// How to treat recoverable malformations.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Leniency {
    /// Fail the document.
    #[default]
    Strict,
    /// Log a warning and continue with a best-effort interpretation.
    Lenient,
}

/// Options controlling a decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    pub leniency: Leniency,
    /// Whether to expand components into additional fields.
    pub expand_components: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            leniency: Leniency::Strict,
            expand_components: true,
        }
    }
}

impl DecodeOptions {
    pub fn leniency(self, leniency: Leniency) -> Self {
        Self { leniency, ..self }
    }

    pub fn expand_components(self, expand_components: bool) -> Self {
        Self {
            expand_components,
            ..self
        }
    }

    pub fn is_strict(&self) -> bool {
        self.leniency == Leniency::Strict
    }
}

/// State accumulated while decoding the records of one document.
///
/// A session must not outlive its document: definitions, running totals and
/// developer data never carry over to the next document of a stream.
#[derive(Debug)]
pub struct Session<'p, P: Profile + ?Sized> {
    pub(super) profile: &'p P,
    pub(super) options: DecodeOptions,
    definitions: [Option<Rc<MessageDefinition>>; 16],
    pub(super) accumulators: Accumulators,
    pub(super) developers: DeveloperRegistry,
    pub(super) last_timestamp: Option<u32>,
}

impl<'p, P: Profile + ?Sized> Session<'p, P> {
    pub fn new(profile: &'p P, options: DecodeOptions) -> Self {
        Self {
            profile,
            options,
            definitions: Default::default(),
            accumulators: Accumulators::new(),
            developers: DeveloperRegistry::new(),
            last_timestamp: None,
        }
    }

    pub fn profile(&self) -> &'p P {
        self.profile
    }

    pub fn options(&self) -> DecodeOptions {
        self.options
    }

    /// The definition currently bound to a local type.
    pub fn definition(&self, local_type: u8) -> Option<&Rc<MessageDefinition>> {
        self.definitions.get(local_type as usize)?.as_ref()
    }

    pub fn accumulators(&self) -> &Accumulators {
        &self.accumulators
    }

    pub fn developers(&self) -> &DeveloperRegistry {
        &self.developers
    }

    /// The most recent timestamp, read or reconstructed.
    pub fn last_timestamp(&self) -> Option<u32> {
        self.last_timestamp
    }

    /// Decode one record at the cursor's position.
    ///
    /// Returns the definition a definition record bound, or the message a
    /// data record carried.
    pub fn step(
        &mut self,
        cursor: &mut ByteCursor,
    ) -> Result<Either<Rc<MessageDefinition>, DataMessage>, Error> {
        let position = cursor.position();
        let [r] = cursor.take::<1>()?;
        let header = RecordHeader::decode(r);

        match header {
            RecordHeader::Normal {
                is_definition: true,
                has_developer_data,
                local_type,
            } => {
                let definition = Rc::new(MessageDefinition::decode(
                    cursor,
                    has_developer_data,
                    self,
                )?);

                trace!(
                    local_type,
                    global = definition.global,
                    fields = definition.fields.len(),
                    "definition"
                );

                self.definitions[local_type as usize] = Some(Rc::clone(&definition));
                Ok(Left(definition))
            }
            _ => {
                let local_type = header.local_type();
                let definition = self
                    .definition(local_type)
                    .cloned()
                    .ok_or(Error::UndefinedLocalType {
                        local_type,
                        position,
                    })?;

                let message = DataMessage::decode(cursor, header, definition, self)?;
                self.register_developer_data(&message);
                Ok(Right(message))
            }
        }
    }

    fn register_developer_data(&mut self, message: &DataMessage) {
        let raw = |number: u8| message.field(number).and_then(|f| f.raw());

        match message.name() {
            Some("developer_data_id") => {
                let Some(index) = raw(3).and_then(u8::from_value) else {
                    warn!("developer data identifier without index");
                    return;
                };

                let application_id = raw(1).and_then(Vec::<u8>::from_value);
                debug!(index, "developer application registered");
                self.developers.register_application(index, application_id);
            }
            Some("field_description") => {
                let (Some(index), Some(number)) = (
                    raw(0).and_then(u8::from_value),
                    raw(1).and_then(u8::from_value),
                ) else {
                    warn!("field description without index or number");
                    return;
                };

                let id = raw(2).and_then(u8::from_value);
                let base_type = id
                    .and_then(|id| self.profile.base_type(id))
                    .unwrap_or_else(|| {
                        warn!(index, number, base_type = ?id, "unknown developer base type");
                        BaseType::Byte
                    });

                let field = DeveloperField {
                    developer_data_index: index,
                    number,
                    base_type,
                    name: raw(3).and_then(FromValue::from_value),
                    units: raw(8).and_then(FromValue::from_value),
                    native_field_num: raw(15).and_then(u8::from_value),
                };

                debug!(index, number, name = ?field.name, "developer field registered");
                self.developers.register_field(field);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{profile::Standard, sans::value::Value};

    #[test]
    fn data_before_definition() {
        let mut session = Session::new(&Standard, DecodeOptions::default());
        let r = [0x02, 0x00];
        assert_eq!(
            session.step(&mut ByteCursor::new(&r)).unwrap_err(),
            Error::UndefinedLocalType {
                local_type: 2,
                position: 0
            }
        );
    }

    #[test]
    fn redefinition_replaces_binding() {
        let mut session = Session::new(&Standard, DecodeOptions::default());
        let r = [
            0x40, 0, 0, 20, 0, 1, 3, 1, 0x02, // record: heart_rate
            0x40, 0, 0, 21, 0, 1, 0, 1, 0x00, // event: event
            0x00, 0x03,
        ];
        let mut cursor = ByteCursor::new(&r);

        assert!(session.step(&mut cursor).unwrap().is_left());
        assert!(session.step(&mut cursor).unwrap().is_left());
        let message = session.step(&mut cursor).unwrap().unwrap_right();

        assert_eq!(message.name(), Some("event"));
        assert_eq!(
            message.field(0).unwrap().value(),
            Some(&Value::Symbol("workout"))
        );
        assert!(cursor.is_empty());
    }

    #[test]
    fn compressed_timestamp_requires_reference() {
        let r = [0x40, 0, 0, 20, 0, 1, 3, 1, 0x02, 0x85, 100];

        let mut session = Session::new(&Standard, DecodeOptions::default());
        let mut cursor = ByteCursor::new(&r);
        session.step(&mut cursor).unwrap();
        assert_eq!(
            session.step(&mut cursor).unwrap_err(),
            Error::MissingTimestampReference { local_type: 0 }
        );

        let lenient = DecodeOptions::default().leniency(Leniency::Lenient);
        let mut session = Session::new(&Standard, lenient);
        let mut cursor = ByteCursor::new(&r);
        session.step(&mut cursor).unwrap();
        let message = session.step(&mut cursor).unwrap().unwrap_right();
        assert_eq!(message.time_offset(), Some(5));
        assert_eq!(message.timestamp(), None);
    }
}
