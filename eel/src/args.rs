use std::{borrow::Cow, io::Read};

use eel_core::{decode_or_string, EelError, EelResult, TypeRegistry, Value};

/// An argument that is exactly this reads the rest of stdin instead.
pub const PIPE_IN_HOLDER: &str = "@";

/// Where a piped-in argument comes from. Reads block until end of stream.
pub trait InputSource {
    fn read_to_eof(&mut self) -> EelResult<String>;
}

impl<R: Read> InputSource for R {
    fn read_to_eof(&mut self) -> EelResult<String> {
        let mut buf = String::new();
        self.read_to_string(&mut buf)
            .map_err(|e| EelError::File(format!("Unable to read input: {e}")))?;
        Ok(buf)
    }
}

/// Turns one raw command line argument into a value.
///
/// With `pipe_in`, `@` is replaced by all of `input` and a leading `@@` is
/// unescaped to a single `@`. The sentinel is handled before decoding since
/// `@` is also the literal marker. Text that is not an encoding at all is
/// taken as a String.
pub fn convert_arg(
    types: &TypeRegistry,
    raw: &str,
    pipe_in: bool,
    input: &mut dyn InputSource,
) -> EelResult<Value> {
    let raw: Cow<str> = if pipe_in && raw == PIPE_IN_HOLDER {
        log::debug!("reading argument from input until eof");
        Cow::Owned(input.read_to_eof()?)
    } else if pipe_in && raw.starts_with("@@") {
        Cow::Borrowed(&raw[1..])
    } else {
        Cow::Borrowed(raw)
    };

    decode_or_string(types, &raw)
}
