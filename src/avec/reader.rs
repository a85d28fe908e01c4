//! Reader-based decoder implementation.
//!
//! Documents may refer back to any earlier record, so the reader is read to its
//! end before decoding.
//!
//! _Requires Cargo feature `std`._

use std::{io::Read, vec::Vec};

use thiserror::Error;

use crate::sans::{self, DataMessage};

use super::FromRecords;

extern crate std;

/// Errors occurring while decoding from a reader.
#[derive(Debug, Error)]
pub enum Error {
    /// An error from the supplied reader.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// An error decoding the stream.
    #[error(transparent)]
    Decode(#[from] sans::Error),
}

/// Decode every document of a stream from a reader, publishing to a receiver.
///
/// This method is also re-exported as `sprocket::avec::decode_reader`.
///
/// _Requires Cargo feature `std`._
pub fn decode(r: &mut impl Read, o: &mut impl FromRecords) -> Result<(), Error> {
    let buf = read(r)?;
    super::slice::decode(&buf, o)?;
    Ok(())
}

/// Decode every message of every document of a stream from a reader.
///
/// _Requires Cargo feature `std`._
pub fn messages(r: &mut impl Read) -> Result<Vec<DataMessage>, Error> {
    let buf = read(r)?;
    let messages = super::slice::messages(&buf).collect::<Result<_, _>>()?;
    Ok(messages)
}

fn read(r: &mut impl Read) -> Result<Vec<u8>, Error> {
    let mut buf = Vec::new();
    r.read_to_end(&mut buf)?;
    Ok(buf)
}
