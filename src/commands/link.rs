use crate::context::Context;

/// link <new_name> <existing_path>
/// Adds a hard link next to an existing regular file. The link shares the
/// file's descriptor; a file takes at most one hard link.
pub fn handle_argv(argv: &[&str], context: &mut Context) -> anyhow::Result<()> {
    super::expect_args(argv, 2, 2, "link <new_name> <existing_path>")?;
    context.fs.hard_link(argv[0], argv[1])?;
    println!("OK");
    Ok(())
}
