use crate::commands::Registry;
use crate::context::Context;
use anyhow::{Context as _, bail};
use log::debug;
use std::fs::File;
use std::io::{BufRead, BufReader};

const MAX_LOAD_DEPTH: u32 = 8;

/// load <host_file>
/// Executes commands from a host file, line by line, exactly as if typed
/// at the prompt. Blank lines and lines starting with '#' are skipped. A
/// failing command is reported and the script goes on. Prints OK at the
/// end.
///
///   > load script.txt
///   (commands from script execute...)
///   OK
pub fn handle_argv(argv: &[&str], context: &mut Context) -> anyhow::Result<()> {
    super::expect_args(argv, 1, 1, "load <host_file>")?;
    run_script(argv[0], context)?;
    println!("OK");
    Ok(())
}

/// Runs every line of `host_path` through a fresh registry.
pub fn run_script(host_path: &str, context: &mut Context) -> anyhow::Result<()> {
    if context.load_depth >= MAX_LOAD_DEPTH {
        bail!("load: scripts nested deeper than {MAX_LOAD_DEPTH}");
    }
    let file = File::open(host_path).with_context(|| format!("cannot open '{host_path}'"))?;
    let registry = Registry::new();
    let reader = BufReader::new(file);

    context.load_depth += 1;
    let result = reader
        .lines()
        .enumerate()
        .try_for_each(|(n, line)| -> anyhow::Result<()> {
            let line = line.with_context(|| format!("{host_path}:{}: read failed", n + 1))?;
            debug!("{host_path}:{}: {}", n + 1, line.trim());
            registry.dispatch_line(&line, context);
            Ok(())
        });
    context.load_depth -= 1;
    result
}
