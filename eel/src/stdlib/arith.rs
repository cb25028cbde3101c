use eel_core::{Capability, EelError, EelResult, Kind, Operator, Value};

use super::next_arg;
use crate::interface::{Command, Context, Param, ParamType};

pub const ARITH: Command = Command::new(
    "arith",
    &[
        Param::required("left", &[ParamType::Capability(Capability::Arithmetic)]),
        Param::required("operator", &[ParamType::Kind(Kind::String)]),
        Param::required("right", &[ParamType::Any]),
    ],
    arith,
);

pub const COMP: Command = Command::new(
    "comp",
    &[
        Param::required("left", &[ParamType::Any]),
        Param::required("operator", &[ParamType::Kind(Kind::String)]),
        Param::required("right", &[ParamType::Any]),
    ],
    comp,
);

pub const NOT: Command = Command::new("not", &[Param::required("value", &[ParamType::Any])], not);

fn operator_of(val: &Value) -> EelResult<Operator> {
    let token = val.try_str().ok_or_else(|| {
        EelError::Type(format!("operator must be a String, got {}", val.type_string()))
    })?;
    Operator::lookup(token)
}

/// `left <op> right` for arithmetic and comparison operators.
pub fn arith(_: &mut Context<'_>, args: Vec<Value>) -> EelResult<Value> {
    let mut args = args.into_iter();
    let left = next_arg(&mut args, "arith", "left")?;
    let op = operator_of(&next_arg(&mut args, "arith", "operator")?)?;
    let right = next_arg(&mut args, "arith", "right")?;

    match op {
        Operator::Arith(_) | Operator::Compare(_) => op.apply(&left, &right),
        Operator::Logic(_) => Err(EelError::InvalidOperation(format!(
            "{op} is not an arithmetic operator"
        ))),
    }
}

/// `left <op> right` for comparison and boolean operators, any kinds.
pub fn comp(_: &mut Context<'_>, args: Vec<Value>) -> EelResult<Value> {
    let mut args = args.into_iter();
    let left = next_arg(&mut args, "comp", "left")?;
    let op = operator_of(&next_arg(&mut args, "comp", "operator")?)?;
    let right = next_arg(&mut args, "comp", "right")?;

    match op {
        Operator::Compare(_) | Operator::Logic(_) => op.apply(&left, &right),
        Operator::Arith(_) => Err(EelError::InvalidOperation(format!(
            "{op} is not a comparison operator"
        ))),
    }
}

pub fn not(_: &mut Context<'_>, args: Vec<Value>) -> EelResult<Value> {
    let mut args = args.into_iter();
    next_arg(&mut args, "not", "value")?.not()
}
