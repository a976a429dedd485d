use crate::fs::config::{FsConfig, ReadOrigin};
use crate::utils::exit_codes::ExitCode;
use anyhow::{Context as _, bail};
use colored::Colorize;
use std::env;

/// Startup options.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProgArgs {
    pub config: FsConfig,
    pub verbose: bool,
    pub help: bool,
    /// Host file run through `load` before the prompt appears.
    pub script: Option<String>,
}

fn handle_help(code: ExitCode) -> ! {
    println!(
        "Usage: memfs-emu [--help] [-v|--verbose] [--capacity <bytes>] \
         [--block-size <bytes>] [--read-at-offset] [script]"
    );
    code.exit()
}

fn number(flag: &str, value: Option<String>) -> anyhow::Result<u32> {
    let Some(value) = value else {
        bail!("{flag} needs a value");
    };
    value
        .parse()
        .with_context(|| format!("{flag}: invalid number '{value}'"))
}

pub fn parse_args<I>(args: I) -> anyhow::Result<ProgArgs>
where
    I: IntoIterator<Item = String>,
{
    let mut parsed = ProgArgs::default();
    let mut it = args.into_iter();

    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--help" | "-h" => parsed.help = true,
            "--verbose" | "-v" => parsed.verbose = true,
            "--capacity" => parsed.config.capacity = number("--capacity", it.next())?,
            "--block-size" => parsed.config.bytes_per_block = number("--block-size", it.next())?,
            "--read-at-offset" => parsed.config.read_origin = ReadOrigin::Offset,
            flag if flag.starts_with('-') => bail!("unknown option '{flag}'"),
            _ if parsed.script.is_some() => bail!("only one script may be given"),
            _ => parsed.script = Some(arg.clone()),
        }
    }

    parsed.config.validate()?;
    Ok(parsed)
}

/// Parses the process arguments; prints usage and exits on `--help` or on
/// bad input.
pub fn handle_prog_args() -> ProgArgs {
    match parse_args(env::args().skip(1)) {
        Ok(args) if args.help => handle_help(ExitCode::Success),
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}", format!("{e:#}").red());
            handle_help(ExitCode::Error)
        }
    }
}
