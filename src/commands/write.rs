//! `write` command implementation.
//!
//! Usage:
//!   write <HANDLE> <OFFSET> <SIZE> [TEXT..]
//!
//! Writes SIZE bytes of TEXT into a fresh extent of the open file. TEXT is
//! the rest of the line joined by single spaces; when it is missing, one
//! line is read from stdin. A shorter TEXT is zero-padded, a longer one is
//! cut at SIZE.
use super::{expect_args, parse_arg};
use crate::context::Context;
use anyhow::Context as _;
use std::io::{self, BufRead, Write};

pub fn handle_argv(argv: &[&str], context: &mut Context) -> anyhow::Result<()> {
    expect_args(argv, 3, usize::MAX, "write <handle> <offset> <size> [text..]")?;
    let handle = parse_arg(argv[0], "handle")?;
    let offset = parse_arg(argv[1], "offset")?;
    let size = parse_arg(argv[2], "size")?;

    let text = if argv.len() > 3 {
        argv[3..].join(" ")
    } else {
        prompt_text()?
    };
    context.fs.write(handle, text.as_bytes(), offset, size)?;
    println!("OK");
    Ok(())
}

fn prompt_text() -> anyhow::Result<String> {
    eprint!("text> ");
    io::stderr().flush().ok();
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("cannot read text from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
