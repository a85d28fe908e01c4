//! Building blocks for implementing decoders.
//!
//! This module is intended for applications that need fine control over
//! decoding. See [`crate::avec`] for drivers covering common decoding
//! patterns.
//!
//! # Architecture
//!
//! Nothing in this module performs I/O. Decoding operates on a [`ByteCursor`]
//! over a borrowed document, and a [`Session`] holds the state one document
//! accumulates as its records are decoded: the definition bound to each local
//! type, running totals for accumulated components, the developer field
//! registry, and the most recent timestamp.
//!
//! A driver decodes a stream as follows:
//!
//! - Decode a [`ContainerHeader`]. This restricts the cursor to one document.
//!
//! - Create a fresh [`Session`] and call [`Session::step`] until the cursor
//! reaches [`ContainerHeader::data_end`]. Each step consumes one record and
//! yields either the definition it bound or the data message it carried.
//!
//! - Compare the trailing check value with [`ByteCursor::crc`]. A position
//! past the end of the data section is a [`Error::MessageOverrun`].
//!
//! - Repeat for any document following the first. Sessions are never shared
//! between documents.
//!
//! Implementers are recommended to begin by studying and modifying a driver
//! from the [`crate::avec`] module.

pub mod check;
pub mod component;
pub mod cursor;
pub mod data;
pub mod definition;
pub mod developer;
pub mod header;
pub mod session;
pub mod value;

mod error;

pub use cursor::ByteCursor;
pub use data::{DataMessage, DecodedField};
pub use error::Error;
pub use header::ContainerHeader;
pub use session::{DecodeOptions, Leniency, Session};
pub use value::Value;
