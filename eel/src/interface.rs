use std::collections::HashMap;

use eel_core::{Capability, EelError, EelResult, Kind, TypeRegistry, Value};

use crate::args::{convert_arg, InputSource};

/// What a positional parameter accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    Kind(Kind),
    /// Any kind declaring the capability.
    Capability(Capability),
    Any,
}

impl ParamType {
    pub fn accepts(self, val: &Value) -> bool {
        match self {
            ParamType::Kind(kind) => val.kind() == kind,
            ParamType::Capability(cap) => val.supports(cap),
            ParamType::Any => true,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            ParamType::Kind(kind) => kind.name(),
            ParamType::Capability(cap) => cap.name(),
            ParamType::Any => "Value",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Param {
    pub name: &'static str,
    /// Union of accepted types. Never empty.
    pub accepts: &'static [ParamType],
    pub optional: bool,
}

impl Param {
    pub const fn required(name: &'static str, accepts: &'static [ParamType]) -> Self {
        Self {
            name,
            accepts,
            optional: false,
        }
    }

    pub const fn optional(name: &'static str, accepts: &'static [ParamType]) -> Self {
        Self {
            name,
            accepts,
            optional: true,
        }
    }

    pub fn accepts(&self, val: &Value) -> bool {
        self.accepts.iter().any(|t| t.accepts(val))
    }
}

/// Everything a command body may touch besides its arguments.
pub struct Context<'a> {
    pub types: &'a TypeRegistry,
    pub input: &'a mut dyn InputSource,
}

impl<'a> Context<'a> {
    pub fn new(types: &'a TypeRegistry, input: &'a mut dyn InputSource) -> Self {
        Self { types, input }
    }
}

pub type CommandFn = fn(&mut Context<'_>, Vec<Value>) -> EelResult<Value>;

#[derive(Clone, Copy)]
pub struct Command {
    pub name: &'static str,
    pub params: &'static [Param],
    /// Whether `@` / `@@` are interpreted in this command's arguments.
    pub pipe_in: bool,
    pub body: CommandFn,
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("pipe_in", &self.pipe_in)
            .finish_non_exhaustive()
    }
}

/// "A", "A or B", "A, B or C".
pub fn format_list_types(names: &[&str]) -> String {
    match names {
        [] => String::new(),
        [only] => (*only).to_owned(),
        [init @ .., last] => format!("{} or {last}", init.join(", ")),
    }
}

impl Command {
    pub const fn new(name: &'static str, params: &'static [Param], body: CommandFn) -> Self {
        Self {
            name,
            params,
            pipe_in: true,
            body,
        }
    }

    fn check_arity(&self, given: usize) -> EelResult<()> {
        if given > self.params.len() {
            return Err(EelError::Argument(format!(
                "{} takes at most {} arguments, got {given}",
                self.name,
                self.params.len()
            )));
        }
        if let Some((i, missing)) = self
            .params
            .iter()
            .enumerate()
            .skip(given)
            .find(|(_, p)| !p.optional)
        {
            return Err(EelError::Argument(format!(
                "{} missing required arg#{i} ({})",
                self.name, missing.name
            )));
        }
        Ok(())
    }

    /// Converts and type checks every argument, then runs the body. Nothing
    /// runs if any argument fails.
    pub fn invoke<S: AsRef<str>>(&self, ctx: &mut Context<'_>, raw_args: &[S]) -> EelResult<Value> {
        self.check_arity(raw_args.len())?;

        let mut args = Vec::with_capacity(raw_args.len());
        for (i, (raw, param)) in raw_args.iter().zip(self.params).enumerate() {
            let val = convert_arg(ctx.types, raw.as_ref(), self.pipe_in, &mut *ctx.input)?;

            if !param.accepts(&val) {
                let names = param.accepts.iter().map(|t| t.name()).collect::<Vec<_>>();
                return Err(EelError::Type(format!(
                    "{} on arg#{i}: expected {}, got {}",
                    self.name,
                    format_list_types(&names),
                    val.type_string()
                )));
            }

            log::trace!("{} arg#{i} ({}) = {val}", self.name, param.name);
            args.push(val);
        }

        log::debug!("invoking {} with {} argument(s)", self.name, args.len());
        (self.body)(ctx, args)
    }
}

/// Name -> command table, filled once at startup.
#[derive(Debug, Default)]
pub struct CommandRegistry {
    commands: HashMap<&'static str, Command>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, cmd: Command) -> EelResult<()> {
        if self.commands.contains_key(cmd.name) {
            return Err(EelError::Registry(format!(
                "command {} registered twice",
                cmd.name
            )));
        }
        self.commands.insert(cmd.name, cmd);
        Ok(())
    }

    pub fn get(&self, name: &str) -> EelResult<&Command> {
        self.commands
            .get(name)
            .ok_or_else(|| EelError::CommandNotFound(name.to_owned()))
    }

    pub fn names(&self) -> Vec<&'static str> {
        let mut names = self.commands.keys().copied().collect::<Vec<_>>();
        names.sort_unstable();
        names
    }

    pub fn invoke<S: AsRef<str>>(
        &self,
        ctx: &mut Context<'_>,
        name: &str,
        raw_args: &[S],
    ) -> EelResult<Value> {
        self.get(name)?.invoke(ctx, raw_args)
    }
}
