pub mod codec;
pub mod err;
pub mod num;
pub mod ops;
mod test;
pub mod val;

pub use codec::{
    decode_literal, decode_literal_or_repr, decode_or_string, decode_repr, encode_literal,
    encode_repr, TypeRegistry, CORE_TYPES,
};
pub use err::{EelError, EelResult};
pub use num::Number;
pub use ops::Operator;
pub use val::{Capability, Dict, Kind, Value};
