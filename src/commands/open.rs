use crate::context::Context;
use crate::fs::handle::OpenHandle;

/// open <path>
/// Prints the packed handle followed by its descriptor id and slot, e.g.
/// `65537 (id=1, slot=1)`. Pass the first number to read/write/close.
pub fn handle_argv(argv: &[&str], context: &mut Context) -> anyhow::Result<()> {
    super::expect_args(argv, 1, 1, "open <path>")?;
    let raw = context.fs.open(argv[0])?;
    println!("{}", OpenHandle::unpack(raw));
    Ok(())
}
