use crate::context::Context;

/// rmdir <path>
/// Removes an empty directory. The current directory and the root cannot
/// be removed.
pub fn handle_argv(argv: &[&str], context: &mut Context) -> anyhow::Result<()> {
    super::expect_args(argv, 1, 1, "rmdir <path>")?;
    context.fs.remove_directory(argv[0])?;
    println!("OK");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::*;

    #[test]
    fn rmdir_empty_only() {
        let mut ctx = mounted_context(4);
        ctx.fs.make_directory("d").unwrap();
        ctx.fs.create_file("d/f").unwrap();
        assert!(handle_argv(&["d"], &mut ctx).is_err());
        ctx.fs.make_directory("e").unwrap();
        handle_argv(&["e"], &mut ctx).unwrap();
        assert!(handle_argv(&["root"], &mut ctx).is_err());
    }
}
