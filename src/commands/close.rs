use super::{expect_args, parse_arg};
use crate::context::Context;

/// close <handle>
pub fn handle_argv(argv: &[&str], context: &mut Context) -> anyhow::Result<()> {
    expect_args(argv, 1, 1, "close <handle>")?;
    let handle = parse_arg(argv[0], "handle")?;
    context.fs.close(handle)?;
    println!("OK");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::*;

    #[test]
    fn close_twice_fails() {
        let mut ctx = mounted_context(4);
        ctx.fs.create_file("a").unwrap();
        let h = ctx.fs.open("a").unwrap().to_string();
        handle_argv(&[&h], &mut ctx).unwrap();
        assert!(handle_argv(&[&h], &mut ctx).is_err());
    }
}
