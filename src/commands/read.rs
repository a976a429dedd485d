//! `read` command implementation.
//!
//! Usage:
//!   read <HANDLE> <OFFSET> <SIZE>
//!
//! Prints the bytes read as text (invalid UTF-8 is replaced). `offset +
//! size` must stay strictly below the extent length. Where the bytes come
//! from depends on the configured read origin: the extent base by default,
//! or base + offset with `--read-at-offset`.
use super::{expect_args, parse_arg};
use crate::context::Context;

pub fn handle_argv(argv: &[&str], context: &mut Context) -> anyhow::Result<()> {
    expect_args(argv, 3, 3, "read <handle> <offset> <size>")?;
    let handle = parse_arg(argv[0], "handle")?;
    let offset = parse_arg(argv[1], "offset")?;
    let size = parse_arg(argv[2], "size")?;
    let bytes = context.fs.read(handle, offset, size)?;
    println!("{}", String::from_utf8_lossy(&bytes));
    Ok(())
}
