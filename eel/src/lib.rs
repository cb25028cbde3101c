pub mod args;
pub mod interface;
pub mod stdlib;
mod test;

pub use args::{convert_arg, InputSource, PIPE_IN_HOLDER};
pub use interface::{Command, CommandRegistry, Context, Param, ParamType};
