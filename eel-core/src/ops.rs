use std::{cmp::Ordering, fmt::Display};

use phf::phf_map;

use crate::{
    err::{EelError, EelResult},
    num::Number,
    val::{Capability, Value},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    FloorDiv,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Gt,
    Lt,
    Ge,
    Le,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicOp {
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Arith(ArithOp),
    Compare(CompareOp),
    Logic(LogicOp),
}

/// Symbol and word spellings accepted for every binary operator.
pub static OPERATORS: phf::Map<&'static str, Operator> = phf_map! {
    "+" => Operator::Arith(ArithOp::Add),
    "plus" => Operator::Arith(ArithOp::Add),
    "-" => Operator::Arith(ArithOp::Sub),
    "minus" => Operator::Arith(ArithOp::Sub),
    "*" => Operator::Arith(ArithOp::Mul),
    "times" => Operator::Arith(ArithOp::Mul),
    "/" => Operator::Arith(ArithOp::Div),
    "divideby" => Operator::Arith(ArithOp::Div),
    "%" => Operator::Arith(ArithOp::Mod),
    "modulo" => Operator::Arith(ArithOp::Mod),
    "**" => Operator::Arith(ArithOp::Pow),
    "exponent" => Operator::Arith(ArithOp::Pow),
    "//" => Operator::Arith(ArithOp::FloorDiv),
    "floordiv" => Operator::Arith(ArithOp::FloorDiv),
    "==" => Operator::Compare(CompareOp::Eq),
    "eq" => Operator::Compare(CompareOp::Eq),
    "!=" => Operator::Compare(CompareOp::Ne),
    "ne" => Operator::Compare(CompareOp::Ne),
    ">" => Operator::Compare(CompareOp::Gt),
    "gt" => Operator::Compare(CompareOp::Gt),
    "<" => Operator::Compare(CompareOp::Lt),
    "lt" => Operator::Compare(CompareOp::Lt),
    ">=" => Operator::Compare(CompareOp::Ge),
    "ge" => Operator::Compare(CompareOp::Ge),
    "<=" => Operator::Compare(CompareOp::Le),
    "le" => Operator::Compare(CompareOp::Le),
    "and" => Operator::Logic(LogicOp::And),
    "or" => Operator::Logic(LogicOp::Or),
};

impl ArithOp {
    pub const fn symbol(self) -> &'static str {
        match self {
            ArithOp::Add => "+",
            ArithOp::Sub => "-",
            ArithOp::Mul => "*",
            ArithOp::Div => "/",
            ArithOp::Mod => "%",
            ArithOp::Pow => "**",
            ArithOp::FloorDiv => "//",
        }
    }

    fn apply_number(self, left: Number, right: Number) -> EelResult<Number> {
        match self {
            ArithOp::Add => left.add(right),
            ArithOp::Sub => left.sub(right),
            ArithOp::Mul => left.mul(right),
            ArithOp::Div => left.div(right),
            ArithOp::Mod => left.rem(right),
            ArithOp::Pow => left.pow(right),
            ArithOp::FloorDiv => left.floor_div(right),
        }
    }
}

impl CompareOp {
    pub const fn symbol(self) -> &'static str {
        match self {
            CompareOp::Eq => "==",
            CompareOp::Ne => "!=",
            CompareOp::Gt => ">",
            CompareOp::Lt => "<",
            CompareOp::Ge => ">=",
            CompareOp::Le => "<=",
        }
    }
}

impl Operator {
    pub fn lookup(token: &str) -> EelResult<Self> {
        OPERATORS
            .get(token)
            .copied()
            .ok_or_else(|| EelError::InvalidOperation(format!("{token} is not a valid operator")))
    }

    pub const fn symbol(self) -> &'static str {
        match self {
            Operator::Arith(op) => op.symbol(),
            Operator::Compare(op) => op.symbol(),
            Operator::Logic(LogicOp::And) => "and",
            Operator::Logic(LogicOp::Or) => "or",
        }
    }

    pub fn apply(self, left: &Value, right: &Value) -> EelResult<Value> {
        log::trace!("applying {left} {} {right}", self.symbol());
        match self {
            Operator::Arith(op) => left.arith(op, right),
            Operator::Compare(CompareOp::Eq) => Ok(left.equals(right)),
            Operator::Compare(CompareOp::Ne) => left.equals(right).not(),
            Operator::Compare(CompareOp::Gt) => left.greater(right),
            Operator::Compare(CompareOp::Lt) => left.less(right),
            Operator::Compare(CompareOp::Ge) => left.greater_or_equal(right),
            Operator::Compare(CompareOp::Le) => left.less_or_equal(right),
            Operator::Logic(LogicOp::And) => Ok(left.and(right)),
            Operator::Logic(LogicOp::Or) => Ok(left.or(right)),
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl Value {
    /// Both operands must be the same arithmetic kind; nothing is widened
    /// across kinds.
    pub fn arith(&self, op: ArithOp, other: &Value) -> EelResult<Value> {
        if self.kind() != other.kind() {
            return Err(EelError::InvalidOperation(format!(
                "Cannot evaluate {} {} {}",
                self.type_string(),
                op.symbol(),
                other.type_string()
            )));
        }

        match (self, other) {
            (Value::Number(l), Value::Number(r)) => Ok(Value::Number(op.apply_number(*l, *r)?)),
            _ => Err(EelError::InvalidOperation(format!(
                "{} does not support {}",
                self.type_string(),
                Capability::Arithmetic.name()
            ))),
        }
    }

    pub fn add(&self, other: &Value) -> EelResult<Value> {
        self.arith(ArithOp::Add, other)
    }

    pub fn sub(&self, other: &Value) -> EelResult<Value> {
        self.arith(ArithOp::Sub, other)
    }

    pub fn mul(&self, other: &Value) -> EelResult<Value> {
        self.arith(ArithOp::Mul, other)
    }

    pub fn div(&self, other: &Value) -> EelResult<Value> {
        self.arith(ArithOp::Div, other)
    }

    pub fn modulo(&self, other: &Value) -> EelResult<Value> {
        self.arith(ArithOp::Mod, other)
    }

    pub fn pow(&self, other: &Value) -> EelResult<Value> {
        self.arith(ArithOp::Pow, other)
    }

    pub fn floor_div(&self, other: &Value) -> EelResult<Value> {
        self.arith(ArithOp::FloorDiv, other)
    }

    pub fn equals(&self, other: &Value) -> Value {
        Value::Bool(self == other)
    }

    fn ordering(&self, other: &Value, op: CompareOp) -> EelResult<Option<Ordering>> {
        if !self.supports(Capability::Comparable) || self.kind() != other.kind() {
            return Err(EelError::Type(format!(
                "Cannot evaluate {} {} {}",
                self.type_string(),
                op.symbol(),
                other.type_string()
            )));
        }

        let ord = match (self, other) {
            (Value::Number(l), Value::Number(r)) => l.partial_cmp(r),
            (Value::String(l), Value::String(r)) => Some(l.cmp(r)),
            _ => None,
        };
        Ok(ord)
    }

    pub fn greater(&self, other: &Value) -> EelResult<Value> {
        let ord = self.ordering(other, CompareOp::Gt)?;
        Ok(Value::Bool(ord == Some(Ordering::Greater)))
    }

    pub fn less(&self, other: &Value) -> EelResult<Value> {
        let ord = self.ordering(other, CompareOp::Lt)?;
        Ok(Value::Bool(ord == Some(Ordering::Less)))
    }

    /// `greater` first, then `equals`. Not a single native `>=`.
    pub fn greater_or_equal(&self, other: &Value) -> EelResult<Value> {
        let comp = self.greater(other)?;
        if comp.is_falsey() {
            return Ok(self.equals(other));
        }
        Ok(comp)
    }

    /// `less` first, then `equals`.
    pub fn less_or_equal(&self, other: &Value) -> EelResult<Value> {
        let comp = self.less(other)?;
        if comp.is_falsey() {
            return Ok(self.equals(other));
        }
        Ok(comp)
    }

    /// `other` if `self` is truthy, else `self`.
    pub fn and(&self, other: &Value) -> Value {
        if self.is_truthy() {
            other.clone()
        } else {
            self.clone()
        }
    }

    /// `self` if truthy, else `other`.
    pub fn or(&self, other: &Value) -> Value {
        if self.is_truthy() {
            self.clone()
        } else {
            other.clone()
        }
    }

    pub fn not(&self) -> EelResult<Value> {
        Ok(Value::Bool(self.is_falsey()))
    }
}
