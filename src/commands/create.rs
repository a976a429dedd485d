use crate::context::Context;

/// create <path>
/// Makes an empty regular file. Outputs: OK, or the reason it failed
/// (limit reached, name taken, path not found).
pub fn handle_argv(argv: &[&str], context: &mut Context) -> anyhow::Result<()> {
    super::expect_args(argv, 1, 1, "create <path>")?;
    context.fs.create_file(argv[0])?;
    println!("OK");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::*;
    use crate::fs::error::FsError;

    #[test]
    fn create_reports_duplicates() {
        let mut ctx = mounted_context(4);
        handle_argv(&["a"], &mut ctx).unwrap();
        let err = handle_argv(&["a"], &mut ctx).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FsError>(),
            Some(FsError::AlreadyExists(_))
        ));
    }
}
