use crate::context::Context;

/// unlink <name>
/// Removes a hard link by name. Regular files, directories and symlinks
/// are refused.
pub fn handle_argv(argv: &[&str], context: &mut Context) -> anyhow::Result<()> {
    super::expect_args(argv, 1, 1, "unlink <name>")?;
    context.fs.unlink(argv[0])?;
    println!("OK");
    Ok(())
}
