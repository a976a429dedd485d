use anyhow::{Context as _, bail};
use colored::Colorize;
use std::collections::HashMap;
use std::str::FromStr;

pub use crate::context::Context;

type Handler = fn(&[&str], &mut Context) -> anyhow::Result<()>;

pub struct Registry {
    pub map: HashMap<&'static str, Handler>,
}

impl Registry {
    pub fn new() -> Self {
        let mut map = HashMap::new();
        map.insert("mkfs", mkfs::handle_argv as Handler);
        map.insert("mount", mount::handle_argv as Handler);
        map.insert("unmount", unmount::handle_argv as Handler);
        map.insert("ls", ls::handle_argv as Handler);
        map.insert("fstat", fstat::handle_argv as Handler);
        map.insert("create", create::handle_argv as Handler);
        map.insert("mkdir", mkdir::handle_argv as Handler);
        map.insert("rmdir", rmdir::handle_argv as Handler);
        map.insert("cd", cd::handle_argv as Handler);
        map.insert("pwd", pwd::handle_argv as Handler);
        map.insert("link", link::handle_argv as Handler);
        map.insert("symlink", symlink::handle_argv as Handler);
        map.insert("unlink", unlink::handle_argv as Handler);
        map.insert("open", open::handle_argv as Handler);
        map.insert("close", close::handle_argv as Handler);
        map.insert("read", read::handle_argv as Handler);
        map.insert("write", write::handle_argv as Handler);
        map.insert("truncate", truncate::handle_argv as Handler);
        map.insert("statfs", statfs::handle_argv as Handler);
        map.insert("extents", extents::handle_argv as Handler);
        map.insert("load", load::handle_argv as Handler);
        map.insert("exit", exit::handle_argv as Handler);

        Self { map }
    }

    /// Runs one command and hands its outcome back to the caller.
    pub fn run(&self, name: &str, argv: &[&str], context: &mut Context) -> anyhow::Result<()> {
        match self.map.get(name) {
            Some(handler) => handler(argv, context),
            None => bail!("Unknown command: {name}"),
        }
    }

    /// Runs one command, reporting a failure without stopping the shell.
    pub fn dispatch(&self, name: &str, argv: &[&str], context: &mut Context) {
        if let Err(e) = self.run(name, argv, context) {
            eprintln!("{}", format!("{e:#}").red());
        }
    }

    /// Tokenizes a line and dispatches it. Blank lines and `#` comments are
    /// skipped.
    pub fn dispatch_line(&self, line: &str, context: &mut Context) {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return;
        }
        let mut it = trimmed.split_whitespace();
        let Some(command) = it.next() else {
            return;
        };
        let args: Vec<&str> = it.collect();
        self.dispatch(command, &args, context);
    }
}

/// Fails with the usage line unless `argv` holds `min..=max` arguments.
pub(crate) fn expect_args(argv: &[&str], min: usize, max: usize, usage: &str) -> anyhow::Result<()> {
    if argv.len() < min || argv.len() > max {
        bail!("usage: {usage}");
    }
    Ok(())
}

pub(crate) fn parse_arg<T>(value: &str, what: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .parse::<T>()
        .with_context(|| format!("invalid {what} '{value}'"))
}

pub mod cd;
pub mod close;
pub mod create;
pub mod exit;
pub mod extents;
pub mod fstat;
pub mod link;
pub mod load;
pub mod ls;
pub mod mkdir;
pub mod mkfs;
pub mod mount;
pub mod open;
pub mod pwd;
pub mod read;
pub mod rmdir;
pub mod statfs;
pub mod symlink;
pub mod truncate;
pub mod unlink;
pub mod unmount;
pub mod write;

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::fs::config::FsConfig;

    pub fn context() -> Context {
        Context::new(FsConfig::default()).unwrap()
    }

    pub fn mounted_context(max_files: u32) -> Context {
        let mut ctx = context();
        ctx.fs.format(max_files).unwrap();
        ctx.fs.mount().unwrap();
        ctx
    }
}
