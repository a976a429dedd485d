//! Standalone `cd` command handler.
//!
//!   cd <path>   -> OK | reason
//!
//! - No argument moves back to the root.
//! - Supports `.`, `..` and absolute paths starting with `root`.
//! - A failed walk leaves the current directory where it was.

use crate::context::Context;
use crate::fs::consts::PATH_ROOT;

pub fn handle_argv(argv: &[&str], context: &mut Context) -> anyhow::Result<()> {
    super::expect_args(argv, 0, 1, "cd [path]")?;
    let target = argv.first().copied().unwrap_or(PATH_ROOT);
    context.fs.change_directory(target)?;
    println!("OK");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::*;

    #[test]
    fn cd_round_trip() {
        let mut ctx = mounted_context(4);
        ctx.fs.make_directory("a").unwrap();
        handle_argv(&["a"], &mut ctx).unwrap();
        assert_eq!(ctx.fs.pwd().unwrap(), "root/a");
        handle_argv(&[], &mut ctx).unwrap();
        assert_eq!(ctx.fs.pwd().unwrap(), "root");
    }

    #[test]
    fn cd_missing_fs_or_path() {
        let mut ctx = context();
        assert!(handle_argv(&["a"], &mut ctx).is_err());
        let mut ctx = mounted_context(4);
        assert!(handle_argv(&["nope"], &mut ctx).is_err());
        assert_eq!(ctx.fs.pwd().unwrap(), "root");
    }
}
