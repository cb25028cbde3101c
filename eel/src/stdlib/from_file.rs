use std::fs;

use eel_core::{EelError, EelResult, Kind, Value};

use crate::interface::{Command, Context, Param, ParamType};

pub const FROM_FILE: Command = Command::new(
    "from_file",
    &[Param::optional("filename", &[ParamType::Kind(Kind::String)])],
    from_file,
);

/// Reads a file as a String. No name, or an empty one, reads stdin instead.
pub fn from_file(ctx: &mut Context<'_>, args: Vec<Value>) -> EelResult<Value> {
    let filename = args
        .first()
        .and_then(|v| v.try_str())
        .unwrap_or_default()
        .to_owned();

    if filename.is_empty() {
        return Ok(Value::String(ctx.input.read_to_eof()?));
    }

    log::debug!("reading {filename}");
    fs::read_to_string(&filename)
        .map(Value::String)
        .map_err(|e| EelError::File(format!("Unable to read {filename}: {e}")))
}
