#![no_std]

//! A decoder for Garmin's Flexible and Interoperable Data Transfer protocol.
//!
//! Sprocket decodes streams of one or more concatenated FIT documents into
//! data messages, resolving field names, scales, subfields, components and
//! developer fields against a profile registry.
//!
//! Most users should begin with the functions and derive macros in the [`avec`]
//! module. If these prove insufficient, consider driving a
//! [`Session`](sans::Session) directly as described in the [`sans`] module.
//! The bundled registry lives in [`profile`].
//!
//! ## Logging
//!
//! Recoverable malformations and document boundaries are reported through
//! [`tracing`]. No subscriber is installed by this crate.
//!
//! ## Cargo Features
//!
//! The following crate feature flags are available:
//!
//! - `derive`: enable derive macros (default).
//! - `std`: enable reader-based decoder (default).

extern crate alloc;

pub mod avec;
pub mod profile;
pub mod sans;
