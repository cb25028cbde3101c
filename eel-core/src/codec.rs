//! Textual wire form of values.
//!
//! `<prefix>!<payload>` is the representation form and survives a round trip.
//! `<prefix>@<payload>` is the literal form, meant for hand written input, and
//! may lose information. The prefix picks the kind through a [`TypeRegistry`].

use std::collections::HashMap;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use lazy_static::lazy_static;

use crate::{
    err::{EelError, EelResult},
    num::Number,
    val::{Dict, Kind, Value},
};

pub const REPR_MARKER: char = '!';
pub const LITERAL_MARKER: char = '@';

const ITEM_SEP: &str = ",";
const ENTRY_SEP: &str = ":";
const LITERAL_ENTRY_SEP: &str = "=";

lazy_static! {
    /// Prefix table for the built in kinds, built once on first use.
    pub static ref CORE_TYPES: TypeRegistry = TypeRegistry::core();
}

/// Prefix -> kind lookup. Populated before any decoding and never changed
/// afterwards; decoders only get `&TypeRegistry`.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    prefixes: HashMap<&'static str, Kind>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn core() -> Self {
        let prefixes = Kind::ALL.iter().map(|k| (k.prefix(), *k)).collect();
        Self { prefixes }
    }

    pub fn register(&mut self, prefix: &'static str, kind: Kind) -> EelResult<()> {
        if prefix.is_empty() || !prefix.is_ascii() {
            return Err(EelError::Registry(format!(
                "type prefix {prefix:?} must be non-empty ascii"
            )));
        }
        if prefix.contains(&[REPR_MARKER, LITERAL_MARKER][..]) {
            return Err(EelError::Registry(format!(
                "type prefix {prefix:?} contains an encoding marker"
            )));
        }
        if let Some(existing) = self.prefixes.get(prefix) {
            return Err(EelError::Registry(format!(
                "type prefix {prefix:?} already registered for {existing}"
            )));
        }
        if let Some(taken) = self.prefix_of(kind) {
            return Err(EelError::Registry(format!(
                "{kind} already registered under {taken:?}"
            )));
        }

        log::debug!("registering type prefix {prefix:?} for {kind}");
        self.prefixes.insert(prefix, kind);
        Ok(())
    }

    pub fn lookup(&self, prefix: &str) -> Option<Kind> {
        self.prefixes.get(prefix).copied()
    }

    pub fn prefix_of(&self, kind: Kind) -> Option<&'static str> {
        self.prefixes
            .iter()
            .find(|(_, k)| **k == kind)
            .map(|(p, _)| *p)
    }

    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }
}

pub fn encode_repr(val: &Value) -> String {
    format!("{}{REPR_MARKER}{}", val.kind().prefix(), val.to_repr_text())
}

/// Only scalar kinds have a literal spelling.
pub fn encode_literal(val: &Value) -> EelResult<String> {
    let text = match val {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::List(_) | Value::Dict(_) => {
            return Err(EelError::InvalidOperation(format!(
                "{} has no literal form",
                val.type_string()
            )))
        }
    };
    Ok(format!("{}{LITERAL_MARKER}{text}", val.kind().prefix()))
}

fn split_prefix<'a>(
    types: &TypeRegistry,
    raw: &'a str,
    marker: char,
) -> EelResult<(Kind, &'a str)> {
    let Some((prefix, payload)) = raw.split_once(marker) else {
        return Err(EelError::NotAnEelRepr(raw.to_owned()));
    };
    if prefix.is_empty() {
        return Err(EelError::NotAnEelRepr(raw.to_owned()));
    }

    let kind = types
        .lookup(prefix)
        .ok_or_else(|| EelError::UnrecognizedType(prefix.to_owned()))?;
    Ok((kind, payload))
}

pub fn decode_repr(types: &TypeRegistry, raw: &str) -> EelResult<Value> {
    let (kind, payload) = split_prefix(types, raw, REPR_MARKER)?;
    kind.from_repr_text(types, payload)
}

pub fn decode_literal(types: &TypeRegistry, raw: &str) -> EelResult<Value> {
    let (kind, payload) = split_prefix(types, raw, LITERAL_MARKER)?;
    kind.from_literal_text(types, payload)
}

/// Whichever marker comes first decides the path; the payload may contain
/// the other one.
pub fn decode_literal_or_repr(types: &TypeRegistry, raw: &str) -> EelResult<Value> {
    match (raw.find(LITERAL_MARKER), raw.find(REPR_MARKER)) {
        (None, None) => Err(EelError::NotAnEelRepr(raw.to_owned())),
        (Some(lit), Some(rep)) if lit < rep => {
            log::trace!("decoding {raw:?} as literal");
            decode_literal(types, raw)
        }
        (Some(_), None) => {
            log::trace!("decoding {raw:?} as literal");
            decode_literal(types, raw)
        }
        _ => {
            log::trace!("decoding {raw:?} as representation");
            decode_repr(types, raw)
        }
    }
}

/// Same as [`decode_literal_or_repr`], except text that is not an encoding at
/// all becomes a String. Other decode failures still propagate.
pub fn decode_or_string(types: &TypeRegistry, raw: &str) -> EelResult<Value> {
    match decode_literal_or_repr(types, raw) {
        Err(e) if e.is_not_repr() => Ok(Value::string(raw)),
        res => res,
    }
}

fn b64_text(kind: Kind, payload: &str, part: &str) -> EelResult<String> {
    let bytes = STANDARD
        .decode(part)
        .map_err(|e| EelError::decode(kind.name(), payload, e))?;
    String::from_utf8(bytes).map_err(|e| EelError::decode(kind.name(), payload, e))
}

impl Value {
    /// Payload half of the representation form.
    pub fn to_repr_text(&self) -> String {
        match self {
            Value::Number(n) => n.to_string(),
            Value::String(s) => STANDARD.encode(s.as_bytes()),
            Value::Bool(b) => b.to_string(),
            Value::List(items) => items
                .iter()
                .map(|v| STANDARD.encode(encode_repr(v)))
                .collect::<Vec<_>>()
                .join(ITEM_SEP),
            Value::Dict(dict) => dict
                .iter()
                .map(|(k, v)| {
                    format!(
                        "{}{ENTRY_SEP}{}",
                        STANDARD.encode(encode_repr(k)),
                        STANDARD.encode(encode_repr(v))
                    )
                })
                .collect::<Vec<_>>()
                .join(ITEM_SEP),
        }
    }
}

impl Kind {
    pub fn from_repr_text(self, types: &TypeRegistry, text: &str) -> EelResult<Value> {
        match self {
            Kind::Number => Ok(Value::Number(text.parse::<Number>()?)),
            Kind::String => Ok(Value::String(b64_text(self, text, text)?)),
            Kind::Bool => match text {
                "true" => Ok(Value::Bool(true)),
                "false" => Ok(Value::Bool(false)),
                _ => Err(EelError::decode(self.name(), text, "expected true or false")),
            },
            Kind::List => {
                if text.is_empty() {
                    return Ok(Value::List(Vec::new()));
                }
                let items = text
                    .split(ITEM_SEP)
                    .map(|part| decode_repr(types, &b64_text(self, text, part)?))
                    .collect::<EelResult<Vec<_>>>()?;
                Ok(Value::List(items))
            }
            Kind::Dict => {
                if text.is_empty() {
                    return Ok(Value::Dict(Dict::new()));
                }
                let mut dict = Dict::new();
                for entry in text.split(ITEM_SEP) {
                    let (k, v) = entry
                        .split_once(ENTRY_SEP)
                        .ok_or_else(|| EelError::decode(self.name(), text, "entry without key"))?;
                    let key = decode_repr(types, &b64_text(self, text, k)?)?;
                    let val = decode_repr(types, &b64_text(self, text, v)?)?;
                    dict.insert(key, val);
                }
                Ok(Value::Dict(dict))
            }
        }
    }

    pub fn from_literal_text(self, types: &TypeRegistry, text: &str) -> EelResult<Value> {
        match self {
            Kind::Number => self.from_repr_text(types, text),
            Kind::String => Ok(Value::string(text)),
            Kind::Bool => match text.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "1" => Ok(Value::Bool(true)),
                "false" | "no" | "0" => Ok(Value::Bool(false)),
                _ => Err(EelError::decode(self.name(), text, "expected a boolean literal")),
            },
            Kind::List => {
                if text.is_empty() {
                    return Ok(Value::List(Vec::new()));
                }
                let items = text
                    .split(ITEM_SEP)
                    .map(|part| decode_or_string(types, part))
                    .collect::<EelResult<Vec<_>>>()?;
                Ok(Value::List(items))
            }
            Kind::Dict => {
                if text.is_empty() {
                    return Ok(Value::Dict(Dict::new()));
                }
                let mut dict = Dict::new();
                for entry in text.split(ITEM_SEP) {
                    let (k, v) = entry
                        .split_once(LITERAL_ENTRY_SEP)
                        .ok_or_else(|| EelError::decode(self.name(), text, "expected key=value"))?;
                    dict.insert(decode_or_string(types, k)?, decode_or_string(types, v)?);
                }
                Ok(Value::Dict(dict))
            }
        }
    }
}
