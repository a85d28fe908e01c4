//! Slice-based decoder implementation.

use either::Either::{Left, Right};
use tracing::{debug, warn};

use crate::{
    profile::{Profile, Standard},
    sans::{
        ByteCursor, ContainerHeader, DataMessage, DecodeOptions, Session,
        cursor::Endianness,
    },
};

use super::{FromRecords, publish};

pub use crate::sans::Error;

/// Decode every document of a stream, publishing to a receiver.
///
/// Messages are resolved against the bundled [`Standard`] profile, with
/// default options.
///
/// This method is also re-exported as `sprocket::avec::decode_slice`.
pub fn decode(r: &[u8], o: &mut impl FromRecords) -> Result<(), Error> {
    for messages in files(r, &Standard, DecodeOptions::default()) {
        for message in messages? {
            publish(&message?, o);
        }
    }

    Ok(())
}

/// Decode every message of every document of a stream, in order.
pub fn messages(r: &[u8]) -> impl Iterator<Item = Result<DataMessage, Error>> {
    files(r, &Standard, DecodeOptions::default()).flat_map(|messages| match messages {
        Ok(messages) => Left(messages),
        Err(err) => Right(core::iter::once(Err(err))),
    })
}

/// Iterate over the documents of a stream.
///
/// Each document is decoded lazily by the yielded [`Messages`], with a session
/// of its own. Iteration ends once the stream is exhausted or a header fails to
/// decode.
pub fn files<'a, P: Profile + ?Sized>(
    r: &'a [u8],
    profile: &'a P,
    options: DecodeOptions,
) -> Files<'a, P> {
    Files {
        cursor: ByteCursor::new(r),
        offset: 0,
        profile,
        options,
    }
}

/// Iterator over the documents of a stream.
#[derive(Debug)]
pub struct Files<'a, P: Profile + ?Sized> {
    cursor: ByteCursor<'a>,
    offset: usize,
    profile: &'a P,
    options: DecodeOptions,
}

impl<'a, P: Profile + ?Sized> Iterator for Files<'a, P> {
    type Item = Result<Messages<'a, P>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.offset >= self.cursor.len() {
            return None;
        }

        let mut cursor = self.cursor.copy();
        let start = self.offset;

        let header = cursor
            .slice(start, self.cursor.len())
            .map_err(Error::from)
            .and_then(|()| Ok(ContainerHeader::decode(&mut cursor)?));

        match header {
            Ok(header) => {
                debug!(
                    offset = start,
                    size = header.file_size(),
                    profile_version = header.profile_version,
                    "document"
                );

                self.offset += header.file_size();
                Some(Ok(Messages {
                    header,
                    cursor,
                    session: Session::new(self.profile, self.options),
                    state: State::Streaming,
                }))
            }
            Err(err) if start != 0 && !self.options.is_strict() => {
                warn!(offset = start, %err, "ignoring trailing bytes");
                self.offset = self.cursor.len();
                None
            }
            Err(err) => {
                self.offset = self.cursor.len();
                Some(Err(err))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Streaming,
    Closed,
}

/// Iterator over the data messages of one document.
///
/// Once every record is decoded the trailing check value is verified, and a
/// mismatch is yielded as the final item. Iteration ends after the first
/// error.
#[derive(Debug)]
pub struct Messages<'a, P: Profile + ?Sized> {
    header: ContainerHeader,
    cursor: ByteCursor<'a>,
    session: Session<'a, P>,
    state: State,
}

impl<'a, P: Profile + ?Sized> Messages<'a, P> {
    pub fn header(&self) -> &ContainerHeader {
        &self.header
    }

    pub fn session(&self) -> &Session<'a, P> {
        &self.session
    }

    /// Fail if the last record read past the data section.
    fn check_overrun(&self) -> Result<(), Error> {
        let position = self.cursor.position();
        let end = self.header.data_end();
        if position > end {
            Err(Error::MessageOverrun { position, end })?;
        }
        Ok(())
    }

    fn close(&mut self) -> Result<(), Error> {
        self.state = State::Closed;
        self.check_overrun()?;

        let calculated = self.cursor.crc();
        let found: u16 = self.cursor.read(Endianness::Little)?;
        if found != calculated {
            Err(Error::CyclicRedundancyCheck { found, calculated })?;
        }

        debug!(crc = found, "document closed");
        Ok(())
    }
}

impl<P: Profile + ?Sized> Iterator for Messages<'_, P> {
    type Item = Result<DataMessage, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.state == State::Streaming {
            if self.cursor.position() >= self.header.data_end() {
                return self.close().err().map(Err);
            }

            // A record overrunning the data section was decoded from the
            // trailing check value and is discarded.
            match self
                .session
                .step(&mut self.cursor)
                .and_then(|step| self.check_overrun().map(|()| step))
            {
                Ok(Left(_)) => {}
                Ok(Right(message)) => return Some(Ok(message)),
                Err(err) => {
                    self.state = State::Closed;
                    return Some(Err(err));
                }
            }
        }

        None
    }
}
