use crate::context::Context;

/// mount
/// Builds a fresh, empty volume on a formatted engine.
pub fn handle_argv(_argv: &[&str], context: &mut Context) -> anyhow::Result<()> {
    context.fs.mount()?;
    println!("OK");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::*;
    use crate::fs::error::FsError;

    #[test]
    fn mount_needs_format() {
        let mut ctx = context();
        let err = handle_argv(&[], &mut ctx).unwrap_err();
        assert_eq!(err.downcast_ref::<FsError>(), Some(&FsError::NotReady));
        ctx.fs.format(4).unwrap();
        handle_argv(&[], &mut ctx).unwrap();
        assert!(ctx.fs.is_mounted());
    }
}
