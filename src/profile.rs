//! The profile registry: static metadata binding wire numbers to meaning.
//!
//! The decoder only ever queries a registry through the [`Profile`] trait. All
//! metadata is `'static`, so decoded messages can hold references into it
//! without borrowing the registry itself. [`Standard`] bundles a curated subset
//! of the vendor profile covering file identification, activity recording and
//! developer data.

mod base;
mod messages;
mod types;

pub use base::BaseType;

/// Lookups the decoder performs against a profile registry.
///
/// Implementations must be pure: the same query always yields the same answer.
pub trait Profile {
    /// Resolve a base type from its wire identifier.
    fn base_type(&self, id: u8) -> Option<BaseType> {
        BaseType::from_id(id)
    }

    /// Resolve a message by its global number.
    fn message(&self, number: u16) -> Option<&'static MessageProfile>;

    /// Resolve the symbolic name of `value` in the type table named `kind`.
    fn value_name(&self, kind: &str, value: u64) -> Option<&'static str>;
}

/// Metadata for a message kind.
#[derive(Debug)]
pub struct MessageProfile {
    pub number: u16,
    pub name: &'static str,
    pub fields: &'static [FieldProfile],
}

impl MessageProfile {
    /// Find a field by its definition number.
    pub fn field(&self, number: u8) -> Option<&'static FieldProfile> {
        self.fields.iter().find(|f| f.number == number)
    }
}

/// Metadata for a field of a message, or for one of its subfields.
#[derive(Debug)]
pub struct FieldProfile {
    pub number: u8,
    pub name: &'static str,
    /// Profile type: either a base type name or the name of a type table.
    pub kind: &'static str,
    pub scale: f64,
    pub offset: f64,
    pub units: &'static str,
    pub subfields: &'static [SubField],
    pub components: &'static [Component],
}

impl FieldProfile {
    /// Whether decoded values must be divided and shifted.
    pub fn is_scaled(&self) -> bool {
        self.scale != 1.0 || self.offset != 0.0
    }
}

/// An alternative interpretation of a field, selected by sibling values.
#[derive(Debug)]
pub struct SubField {
    pub field: FieldProfile,
    /// Every reference must hold for the subfield to apply.
    pub references: &'static [Reference],
}

/// Requires the raw value of another field of the same message.
#[derive(Debug)]
pub struct Reference {
    pub field: u8,
    pub value: u64,
}

/// A bit range of a field that decodes as another field of the same message.
#[derive(Debug)]
pub struct Component {
    /// Target field number.
    pub field: u8,
    pub bit_offset: u8,
    pub bits: u8,
    pub scale: f64,
    pub offset: f64,
    pub accumulate: bool,
}

impl Component {
    /// Whether the component carries its own scale or offset.
    pub fn is_scaled(&self) -> bool {
        self.scale != 1.0 || self.offset != 0.0
    }
}

/// A table of named values for an enumerated type.
#[derive(Debug)]
pub struct TypeProfile {
    pub name: &'static str,
    pub values: &'static [(u64, &'static str)],
}

/// The bundled registry.
#[derive(Debug, Default, Clone, Copy)]
pub struct Standard;

impl Profile for Standard {
    fn message(&self, number: u16) -> Option<&'static MessageProfile> {
        messages::MESSAGES.iter().find(|m| m.number == number)
    }

    fn value_name(&self, kind: &str, value: u64) -> Option<&'static str> {
        let table = types::TYPES.iter().find(|t| t.name == kind)?;
        table
            .values
            .iter()
            .find(|(v, _)| *v == value)
            .map(|(_, name)| *name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_resolves_file_id_type() {
        let message = Standard.message(0).unwrap();
        assert_eq!(message.name, "file_id");
        let field = message.field(0).unwrap();
        assert_eq!(field.name, "type");
        assert_eq!(Standard.value_name(field.kind, 4), Some("activity"));
    }

    #[test]
    fn unknown_lookups_are_absent() {
        assert!(Standard.message(0xFF00).is_none());
        assert!(Standard.message(0).unwrap().field(200).is_none());
        assert_eq!(Standard.value_name("file", 200), None);
        assert_eq!(Standard.value_name("not_a_type", 0), None);
    }
}
