use std::{
    io::{self, Write},
    process,
};

use anyhow::{bail, Context as _};
use clap::{error::ErrorKind, Parser};
use eel::{stdlib, Context};
use eel_core::{encode_repr, EelError, CORE_TYPES};

#[derive(Parser, Debug)]
#[command(name = "eel")]
#[command(about = "Run an Eel standard library command and print its encoded result")]
struct Args {
    /// List the registered commands and exit
    #[arg(long)]
    list: bool,

    /// Command to run, then its encoded or bare arguments. `@` reads stdin,
    /// `@@x` passes `@x`. Nothing after the command name is parsed as an
    /// option.
    #[arg(
        value_name = "COMMAND [ARGS]",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    argv: Vec<String>,
}

fn main() {
    env_logger::init();

    let code = match run() {
        Ok(()) => 0,
        Err(err) => report(&err),
    };
    process::exit(code);
}

fn run() -> anyhow::Result<()> {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.print()?;
            return Ok(());
        }
        Err(e) => bail!(EelError::Argument(e.to_string().trim_end().to_owned())),
    };

    let commands = stdlib::registry()?;

    if args.list {
        let mut out = io::stdout().lock();
        for name in commands.names() {
            writeln!(out, "{name}")?;
        }
        return Ok(());
    }

    let mut argv = args.argv.into_iter();
    let Some(name) = argv.next() else {
        bail!(EelError::Argument("Command name not provided".into()));
    };
    let raw_args = argv.collect::<Vec<_>>();

    let mut stdin = io::stdin();
    let mut ctx = Context::new(&CORE_TYPES, &mut stdin);
    let result = commands.invoke(&mut ctx, &name, raw_args.as_slice())?;
    log::debug!("{name} returned {result}");

    let mut out = io::stdout().lock();
    out.write_all(encode_repr(&result).as_bytes())
        .context("Unable to write result to stdout")?;
    out.flush()?;
    Ok(())
}

/// Diagnostic to stderr, `err@<code>` to stdout. Returns the exit code.
fn report(err: &anyhow::Error) -> i32 {
    let code = match err.downcast_ref::<EelError>() {
        Some(e) if !e.is_internal() => {
            eprintln!("{}: {e}", e.name());
            e.exit_code()
        }
        Some(e) => {
            eprintln!("{}: {err:?}", e.name());
            e.exit_code()
        }
        None => {
            eprintln!("InternalError: {err:?}");
            1
        }
    };

    let mut out = io::stdout().lock();
    let _ = write!(out, "err@{code}");
    let _ = out.flush();
    code
}
