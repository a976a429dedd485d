use crate::context::Context;

/// unmount
/// Drops the mounted volume; the format survives.
pub fn handle_argv(_argv: &[&str], context: &mut Context) -> anyhow::Result<()> {
    context.fs.unmount()?;
    println!("OK");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::*;

    #[test]
    fn unmount_then_operations_fail() {
        let mut ctx = mounted_context(4);
        handle_argv(&[], &mut ctx).unwrap();
        assert!(ctx.fs.create_file("a").is_err());
        assert!(handle_argv(&[], &mut ctx).is_err());
    }
}
