//! Developer data: field types declared at runtime by the document itself.
//!
//! A `developer_data_id` message registers an application under a developer
//! data index, and each `field_description` message registers one field type
//! under that index. Developer fields in later definitions resolve against
//! this registry.

use alloc::{collections::BTreeMap, rc::Rc, string::String, vec::Vec};

use crate::profile::BaseType;

/// A field type declared by a `field_description` message.
#[derive(Debug, Clone, PartialEq)]
pub struct DeveloperField {
    pub developer_data_index: u8,
    pub number: u8,
    pub base_type: BaseType,
    pub name: Option<String>,
    pub units: Option<String>,
    /// The profile field this developer field stands in for, if any.
    pub native_field_num: Option<u8>,
}

/// An application registered under a developer data index.
#[derive(Debug, Default, Clone)]
pub struct DeveloperData {
    pub application_id: Option<Vec<u8>>,
    fields: BTreeMap<u8, Rc<DeveloperField>>,
}

impl DeveloperData {
    pub fn fields(&self) -> impl Iterator<Item = &Rc<DeveloperField>> {
        self.fields.values()
    }
}

/// Applications and field types declared so far in a document.
#[derive(Debug, Default, Clone)]
pub struct DeveloperRegistry {
    entries: BTreeMap<u8, DeveloperData>,
}

impl DeveloperRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or re-register) the application for an index.
    pub fn register_application(&mut self, index: u8, application_id: Option<Vec<u8>>) {
        self.entries.entry(index).or_default().application_id = application_id;
    }

    /// Register a field type, replacing any earlier one with the same index
    /// and number.
    pub fn register_field(&mut self, field: DeveloperField) {
        self.entries
            .entry(field.developer_data_index)
            .or_default()
            .fields
            .insert(field.number, Rc::new(field));
    }

    pub fn application(&self, index: u8) -> Option<&DeveloperData> {
        self.entries.get(&index)
    }

    pub fn field(&self, index: u8, number: u8) -> Option<Rc<DeveloperField>> {
        self.entries.get(&index)?.fields.get(&number).cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
