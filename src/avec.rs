//! Convenience interfaces for common decoding patterns.
//!
//! The functions in this module are suited to decoding messages from files and
//! data slices, either by iterating over [`DataMessage`]s or by publishing to
//! the [`FromRecords`] and [`FromRecord`] traits.
//!
//! In many cases (when records are of a known shape), these traits can be
//! derived. See the [`FromRecords`](macro@FromRecords) and
//! [`FromRecord`](macro@FromRecord) macros for details.

#[cfg(feature = "std")]
pub mod reader;
pub mod slice;

#[cfg(feature = "std")]
pub use reader::decode as decode_reader;
pub use slice::decode as decode_slice;

use crate::sans::{DataMessage, DecodedField};

/// Derive [`FromRecords`] for a struct holding a collection of records.
///
/// _Requires Cargo feature `derive`._
///
/// # Example
///
/// To collect a single record, add the `record(N)` attribute to an `Option<T>`
/// struct field, where `N` is the global message number and `T` is a type
/// implementing [`FromRecord`] and [`Default`]. A profile message name may be
/// given in place of the number. Additional records received for the same
/// message will overwrite earlier ones. To collect multiple occurrences of a
/// record, apply the attribute to a `Vec<T>` instead.
///
/// ```
/// #[derive(Debug, Default, FromRecords)]
/// struct ActivityRecordSet {
///     #[record(0)]
///     file_id: Option<FileId>,
///     #[record("record")]
///     records: Vec<Record>,
/// }
/// ```
#[cfg(feature = "derive")]
pub use sprocket_derive::FromRecords;

/// Produce record receivers for a document.
///
/// See the [`FromRecords`](macro@FromRecords) derive macro for an automatic
/// implementation of this trait.
pub trait FromRecords {
    /// Retrieve a receiver for a message, if one exists. `name` is the profile
    /// name of the message, if it has one.
    fn add_record(&mut self, number: u16, name: Option<&str>) -> Option<&mut dyn FromRecord>;
}

/// Derive [`FromRecord`] for a struct representing a single record.
///
/// _Requires Cargo feature `derive`._
///
/// # Examples
///
/// To receive a single value for a record field, add the `field(N)` attribute
/// to an `Option<T>` struct field, where `N` is the field number and `T`
/// implements [`FromValue`](crate::sans::value::FromValue). A profile field
/// name may be given in place of the number. The scaled value is used if it
/// converts to `T`, and the raw value otherwise. Additional values received for
/// the same field will replace earlier ones.
///
/// To receive the time offset stored in compressed timestamp headers, supply
/// `time` in place of a field number.
///
/// ```
/// #[derive(Debug, Default, FromRecord)]
/// struct Record {
///     #[field(time)]
///     time_offset: Option<u8>,
///     #[field(253)]
///     timestamp: Option<u32>,
///     #[field("heart_rate")]
///     heart_rate: Option<u8>,
///     #[field(2)]
///     altitude: Option<f64>,
/// }
/// ```
///
/// To receive arrays or arbitrary types (for example, decoding directly into an
/// enumeration), supply an accumulator closure. Since the element type cannot
/// be inferred, the second argument must be typed.
///
/// ```
/// #[derive(Debug, Default, FromRecord)]
/// struct Hrv {
///     #[field(0, |v, t: f64| v.push(t))]
///     time: Vec<f64>,
/// }
/// ```
#[cfg(feature = "derive")]
pub use sprocket_derive::FromRecord;

/// Receive fields for a record.
///
/// Null fields are never published. Fields expanded from components are
/// published through [`add_field`](FromRecord::add_field) after those declared
/// by the definition.
///
/// The default implementation of each method ignores received values.
///
/// See the [`FromRecord`](macro@FromRecord) derive macro for an automatic
/// implementation of this trait.
pub trait FromRecord {
    /// Add the compressed time offset to the record.
    fn add_time_offset(&mut self, _: u8) {}
    /// Add a field to the record.
    fn add_field(&mut self, _: &DecodedField) {}
    /// Add a developer field to the record.
    fn add_developer_field(&mut self, _: &DecodedField) {}
}

/// Publish a decoded message to a receiver.
pub fn publish(message: &DataMessage, o: &mut (impl FromRecords + ?Sized)) {
    // Shadow the document receiver with that of a single record.
    let Some(o) = o.add_record(message.number(), message.name()) else {
        return;
    };

    if let Some(time) = message.time_offset() {
        o.add_time_offset(time);
    }

    for field in message.fields().filter(|f| f.value().is_some()) {
        if field.is_developer() {
            o.add_developer_field(field);
        } else {
            o.add_field(field);
        }
    }
}
