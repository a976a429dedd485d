use super::{expect_args, parse_arg};
use crate::context::Context;

/// truncate <path> <size>
/// Resizes a file that already holds data; size 0 frees its extent.
/// Symbolic links are followed.
pub fn handle_argv(argv: &[&str], context: &mut Context) -> anyhow::Result<()> {
    expect_args(argv, 2, 2, "truncate <path> <size>")?;
    let size = parse_arg(argv[1], "size")?;
    context.fs.truncate(argv[0], size)?;
    println!("OK");
    Ok(())
}
