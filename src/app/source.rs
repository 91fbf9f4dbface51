//! Opening the document stream for the host

use std::fs::File;
use std::io;

use super::Input;
use crate::stream::{IoStream, MemoryStream, ReadStream};

/// Open `input` as a pull stream.
///
/// A file that cannot be opened becomes a stream whose first read fails, so
/// the control reports it through its banner like any other read failure.
pub fn open_input(input: &Input) -> Box<dyn ReadStream> {
    match input {
        Input::Path(path) => match File::open(path) {
            Ok(file) => Box::new(IoStream::new(file)),
            Err(e) => {
                log::debug!("cannot open {}: {}", path.display(), e);
                Box::new(MemoryStream::failing(format!("{}: {}", path.display(), e)))
            }
        },
        Input::Stdin => Box::new(IoStream::new(io::stdin().lock())),
    }
}
