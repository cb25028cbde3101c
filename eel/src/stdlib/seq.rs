use eel_core::{Capability, EelResult, Value};

use super::next_arg;
use crate::interface::{Command, Context, Param, ParamType};

const SEQUENCE: &[ParamType] = &[ParamType::Capability(Capability::Sequence)];

pub const LEN: Command = Command::new("len", &[Param::required("value", SEQUENCE)], len);

pub const CONTAINS: Command = Command::new(
    "contains",
    &[
        Param::required("container", SEQUENCE),
        Param::required("item", &[ParamType::Any]),
    ],
    contains,
);

pub fn len(_: &mut Context<'_>, args: Vec<Value>) -> EelResult<Value> {
    let mut args = args.into_iter();
    next_arg(&mut args, "len", "value")?.length()
}

pub fn contains(_: &mut Context<'_>, args: Vec<Value>) -> EelResult<Value> {
    let mut args = args.into_iter();
    let container = next_arg(&mut args, "contains", "container")?;
    let item = next_arg(&mut args, "contains", "item")?;
    container.contains(&item)
}
