use std::fmt::Display;

use crate::{
    err::{EelError, EelResult},
    num::Number,
};

/// Operation groups a kind may opt into. Anything outside a kind's set fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Arithmetic,
    Comparable,
    Sequence,
}

impl Capability {
    pub const fn name(self) -> &'static str {
        match self {
            Capability::Arithmetic => "Arithmetic",
            Capability::Comparable => "Comparable",
            Capability::Sequence => "Sequence",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Number,
    String,
    List,
    Dict,
    Bool,
}

impl Kind {
    pub const ALL: [Kind; 5] = [Kind::Number, Kind::String, Kind::List, Kind::Dict, Kind::Bool];

    /// Type tag written in front of the encoding marker.
    pub const fn prefix(self) -> &'static str {
        match self {
            Kind::Number => "num",
            Kind::String => "str",
            Kind::List => "lst",
            Kind::Dict => "dic",
            Kind::Bool => "bol",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Kind::Number => "Number",
            Kind::String => "String",
            Kind::List => "List",
            Kind::Dict => "Dictionary",
            Kind::Bool => "Boolean",
        }
    }

    pub const fn capabilities(self) -> &'static [Capability] {
        match self {
            Kind::Number => &[Capability::Arithmetic, Capability::Comparable],
            Kind::String => &[Capability::Comparable, Capability::Sequence],
            Kind::List | Kind::Dict => &[Capability::Sequence],
            Kind::Bool => &[],
        }
    }

    pub fn supports(self, cap: Capability) -> bool {
        self.capabilities().contains(&cap)
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Insertion ordered map keyed by `Value` equality. Values hold floats, so
/// this is an association list rather than a hash map.
#[derive(Debug, Clone, Default)]
pub struct Dict {
    entries: Vec<(Value, Value)>,
}

impl Dict {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the value of an existing key, keeping its position.
    pub fn insert(&mut self, key: Value, val: Value) {
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = val;
        } else {
            self.entries.push((key, val));
        }
    }

    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &Value) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Value, Value)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PartialEq for Dict {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl FromIterator<(Value, Value)> for Dict {
    fn from_iter<T: IntoIterator<Item = (Value, Value)>>(iter: T) -> Self {
        let mut dict = Dict::new();
        for (k, v) in iter {
            dict.insert(k, v);
        }
        dict
    }
}

#[derive(Debug, Clone)]
pub enum Value {
    Number(Number),
    String(String),
    List(Vec<Value>),
    Dict(Dict),
    Bool(bool),
}

/// Payload equality. Values of different kinds are never equal.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Number(l), Value::Number(r)) => l == r,
            (Value::String(l), Value::String(r)) => l == r,
            (Value::List(l), Value::List(r)) => l == r,
            (Value::Dict(l), Value::Dict(r)) => l == r,
            (Value::Bool(l), Value::Bool(r)) => l == r,
            _ => false,
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Number(Number::Int(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(Number::Float(value))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Self::List(value)
    }
}

impl From<Dict> for Value {
    fn from(value: Dict) -> Self {
        Self::Dict(value)
    }
}

impl Value {
    pub const fn kind(&self) -> Kind {
        match self {
            Value::Number(_) => Kind::Number,
            Value::String(_) => Kind::String,
            Value::List(_) => Kind::List,
            Value::Dict(_) => Kind::Dict,
            Value::Bool(_) => Kind::Bool,
        }
    }

    #[inline]
    pub const fn type_string(&self) -> &'static str {
        self.kind().name()
    }

    pub fn supports(&self, cap: Capability) -> bool {
        self.kind().supports(cap)
    }

    pub fn string(s: &str) -> Self {
        Self::String(s.to_owned())
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Number(n) => !n.is_zero(),
            Value::String(s) => !s.is_empty(),
            Value::List(l) => !l.is_empty(),
            Value::Dict(d) => !d.is_empty(),
            Value::Bool(b) => *b,
        }
    }

    #[inline]
    pub fn is_falsey(&self) -> bool {
        !self.is_truthy()
    }

    pub fn try_str(&self) -> Option<&str> {
        if let Self::String(s) = self {
            Some(s.as_str())
        } else {
            None
        }
    }

    fn no_conversion(&self, to: Kind) -> EelError {
        EelError::Conversion {
            from: self.type_string(),
            to: to.name(),
        }
    }

    pub fn to_string_value(&self) -> EelResult<Value> {
        match self {
            Value::Number(n) => Ok(Value::String(n.to_string())),
            Value::String(s) => Ok(Value::String(s.clone())),
            Value::Bool(b) => Ok(Value::String(b.to_string())),
            Value::List(_) | Value::Dict(_) => Err(self.no_conversion(Kind::String)),
        }
    }

    pub fn to_number(&self) -> EelResult<Value> {
        match self {
            Value::Number(n) => Ok(Value::Number(*n)),
            Value::String(s) => Ok(Value::Number(s.parse()?)),
            Value::Bool(b) => Ok(Value::from(i64::from(*b))),
            Value::List(_) | Value::Dict(_) => Err(self.no_conversion(Kind::Number)),
        }
    }

    pub fn to_list(&self) -> EelResult<Value> {
        match self {
            Value::String(s) => Ok(Value::List(
                s.chars().map(|c| Value::String(c.to_string())).collect(),
            )),
            Value::List(l) => Ok(Value::List(l.clone())),
            Value::Dict(d) => Ok(Value::List(d.keys().cloned().collect())),
            Value::Number(_) | Value::Bool(_) => Err(self.no_conversion(Kind::List)),
        }
    }

    pub fn to_dict(&self) -> EelResult<Value> {
        match self {
            Value::Dict(d) => Ok(Value::Dict(d.clone())),
            _ => Err(self.no_conversion(Kind::Dict)),
        }
    }

    pub fn to_bool(&self) -> EelResult<Value> {
        Ok(Value::Bool(self.is_truthy()))
    }

    /// Converts to the given kind through the matching `to_*` conversion.
    pub fn convert(&self, to: Kind) -> EelResult<Value> {
        match to {
            Kind::Number => self.to_number(),
            Kind::String => self.to_string_value(),
            Kind::List => self.to_list(),
            Kind::Dict => self.to_dict(),
            Kind::Bool => self.to_bool(),
        }
    }

    fn require(&self, cap: Capability) -> EelResult<()> {
        if self.supports(cap) {
            Ok(())
        } else {
            Err(EelError::InvalidOperation(format!(
                "{} is not a {} type",
                self.type_string(),
                cap.name()
            )))
        }
    }

    /// Lazy walk over the elements. Calling it again starts over.
    pub fn iterate(&self) -> EelResult<Box<dyn Iterator<Item = Value> + '_>> {
        self.require(Capability::Sequence)?;
        let iter: Box<dyn Iterator<Item = Value> + '_> = match self {
            Value::String(s) => Box::new(s.chars().map(|c| Value::String(c.to_string()))),
            Value::List(l) => Box::new(l.iter().cloned()),
            Value::Dict(d) => Box::new(d.keys().cloned()),
            Value::Number(_) | Value::Bool(_) => Box::new(std::iter::empty()),
        };
        Ok(iter)
    }

    pub fn contains(&self, item: &Value) -> EelResult<Value> {
        self.require(Capability::Sequence)?;
        let found = match (self, item) {
            (Value::String(s), Value::String(needle)) => s.contains(needle.as_str()),
            (Value::String(_), other) => {
                return Err(EelError::Type(format!(
                    "String can only contain a String, got {}",
                    other.type_string()
                )))
            }
            (Value::List(l), item) => l.contains(item),
            (Value::Dict(d), key) => d.contains_key(key),
            _ => false,
        };
        Ok(Value::Bool(found))
    }

    pub fn length(&self) -> EelResult<Value> {
        self.require(Capability::Sequence)?;
        let len = match self {
            Value::String(s) => s.chars().count(),
            Value::List(l) => l.len(),
            Value::Dict(d) => d.len(),
            Value::Number(_) | Value::Bool(_) => 0,
        };
        let len = i64::try_from(len).map_err(|e| EelError::Internal(e.to_string()))?;
        Ok(Value::from(len))
    }
}

/// Human readable rendering for logs. Not an encoding.
impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::String(s) => write!(f, "{s:?}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::List(l) => {
                let items = l.iter().map(|v| v.to_string()).collect::<Vec<_>>();
                write!(f, "[{}]", items.join(", "))
            }
            Value::Dict(d) => {
                let items = d
                    .iter()
                    .map(|(k, v)| format!("{k}: {v}"))
                    .collect::<Vec<_>>();
                write!(f, "{{{}}}", items.join(", "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capabilities_are_static_per_kind() {
        assert!(Kind::Number.supports(Capability::Arithmetic));
        assert!(!Kind::String.supports(Capability::Arithmetic));
        assert!(Kind::Dict.supports(Capability::Sequence));
        assert!(Kind::Bool.capabilities().is_empty());
    }

    #[test]
    fn string_to_number_reparses_text() -> anyhow::Result<()> {
        assert_eq!(Value::string("12").to_number()?, Value::from(12));
        assert_eq!(Value::string(" 1.5\n").to_number()?, Value::from(1.5));
        assert!(Value::string("twelve").to_number().is_err());
        Ok(())
    }

    #[test]
    fn unsupported_conversions_name_both_kinds() {
        let err = Value::from(3).to_list().unwrap_err();
        assert_eq!(err.to_string(), "Cannot convert type Number to List");
        let err = Value::string("x").to_dict().unwrap_err();
        assert_eq!(err.to_string(), "Cannot convert type String to Dictionary");
    }

    #[test]
    fn sequences_iterate_lazily_and_restart() -> anyhow::Result<()> {
        let list = Value::List(vec![Value::from(1), Value::from(2), Value::from(3)]);
        assert_eq!(list.iterate()?.count(), 3);
        assert_eq!(list.iterate()?.next(), Some(Value::from(1)));
        assert_eq!(list.length()?, Value::from(3));

        let s = Value::string("héllo");
        assert_eq!(s.length()?, Value::from(5));
        assert_eq!(s.contains(&Value::string("ll"))?, Value::Bool(true));
        assert!(s.contains(&Value::from(1)).is_err());

        assert!(Value::from(1).iterate().is_err());
        Ok(())
    }

    #[test]
    fn dict_keeps_insertion_order_and_replaces_keys() -> anyhow::Result<()> {
        let mut d = Dict::new();
        d.insert(Value::string("a"), Value::from(1));
        d.insert(Value::string("b"), Value::from(2));
        d.insert(Value::string("a"), Value::from(3));

        assert_eq!(d.len(), 2);
        assert_eq!(d.get(&Value::string("a")), Some(&Value::from(3)));
        let keys = Value::Dict(d).to_list()?;
        assert_eq!(keys, Value::List(vec![Value::string("a"), Value::string("b")]));
        Ok(())
    }

    #[test]
    fn different_kinds_never_compare_equal() {
        assert_ne!(Value::from(1), Value::Bool(true));
        assert_ne!(Value::from(1), Value::string("1"));
        assert_eq!(Value::from(1), Value::from(1.0));
    }
}
