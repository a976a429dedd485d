use crate::context::Context;

/// Standalone `ls` command.
///
/// Usage:
///   ls      -> lists the current directory
///
/// One line per entry, in creation order:
///   "FILE: <name>", "DIR: <name>", "LINK: <name>", "SYMLINK: <name>"
pub fn handle_argv(argv: &[&str], context: &mut Context) -> anyhow::Result<()> {
    super::expect_args(argv, 0, 0, "ls")?;
    for entry in context.fs.list_current_directory()? {
        println!("{entry}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::*;

    #[test]
    fn ls_lists_or_fails_cleanly() {
        let mut ctx = context();
        assert!(handle_argv(&[], &mut ctx).is_err());
        let mut ctx = mounted_context(4);
        ctx.fs.create_file("a").unwrap();
        handle_argv(&[], &mut ctx).unwrap();
        assert!(handle_argv(&["extra"], &mut ctx).is_err());
    }
}
