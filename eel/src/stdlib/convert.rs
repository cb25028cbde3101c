use eel_core::{decode_or_string, EelResult, Kind, Value};

use super::next_arg;
use crate::interface::{Command, Context, Param, ParamType};

const ANY: &[ParamType] = &[ParamType::Any];

pub const TO_NUM: Command = Command::new("to_num", &[Param::optional("value", ANY)], to_num);
pub const TO_STR: Command = Command::new("to_str", &[Param::required("value", ANY)], to_str);
pub const TO_BOOL: Command = Command::new("to_bool", &[Param::required("value", ANY)], to_bool);
pub const TO_LIST: Command = Command::new("to_list", &[Param::required("value", ANY)], to_list);
pub const TO_DICT: Command = Command::new("to_dict", &[Param::required("value", ANY)], to_dict);

/// With no argument the value is decoded from the whole of stdin.
pub fn to_num(ctx: &mut Context<'_>, args: Vec<Value>) -> EelResult<Value> {
    let val = match args.into_iter().next() {
        Some(val) => val,
        None => {
            let raw = ctx.input.read_to_eof()?;
            decode_or_string(ctx.types, &raw)?
        }
    };
    val.convert(Kind::Number)
}

fn convert_single(cmd: &str, args: Vec<Value>, to: Kind) -> EelResult<Value> {
    let mut args = args.into_iter();
    next_arg(&mut args, cmd, "value")?.convert(to)
}

pub fn to_str(_: &mut Context<'_>, args: Vec<Value>) -> EelResult<Value> {
    convert_single("to_str", args, Kind::String)
}

pub fn to_bool(_: &mut Context<'_>, args: Vec<Value>) -> EelResult<Value> {
    convert_single("to_bool", args, Kind::Bool)
}

pub fn to_list(_: &mut Context<'_>, args: Vec<Value>) -> EelResult<Value> {
    convert_single("to_list", args, Kind::List)
}

pub fn to_dict(_: &mut Context<'_>, args: Vec<Value>) -> EelResult<Value> {
    convert_single("to_dict", args, Kind::Dict)
}
