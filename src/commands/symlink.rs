use crate::context::Context;

/// symlink <target> <path>
/// Creates a symbolic link at `path` holding the absolute path of
/// `target`. The target need not exist; `open` and `truncate` follow it.
pub fn handle_argv(argv: &[&str], context: &mut Context) -> anyhow::Result<()> {
    super::expect_args(argv, 2, 2, "symlink <target> <path>")?;
    context.fs.symbolic_link(argv[0], argv[1])?;
    println!("OK");
    Ok(())
}
