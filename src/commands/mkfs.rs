//! `mkfs` command implementation.
//!
//! Usage:
//!   mkfs <MAX_FILES>
//!
//! Output:
//!   OK
//!
//! Semantics:
//! - Resets the engine to the formatted, unmounted state with room for
//!   MAX_FILES names (files, directories, links; the root is free).
//! - A mounted volume is dropped first, so everything stored is lost.
//! - `mount` must follow before any other command works.
use super::{expect_args, parse_arg};
use crate::context::Context;

pub fn handle_argv(argv: &[&str], context: &mut Context) -> anyhow::Result<()> {
    expect_args(argv, 1, 1, "mkfs <max_files>")?;
    let max_files: u32 = parse_arg(argv[0], "file limit")?;
    context.fs.format(max_files)?;
    println!("OK");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::*;

    #[test]
    fn mkfs_formats() {
        let mut ctx = context();
        handle_argv(&["16"], &mut ctx).unwrap();
        assert!(ctx.fs.is_formatted());
        assert_eq!(ctx.fs.max_files(), 16);
    }

    #[test]
    fn mkfs_rejects_bad_input() {
        let mut ctx = context();
        assert!(handle_argv(&[], &mut ctx).is_err());
        assert!(handle_argv(&["many"], &mut ctx).is_err());
        assert!(handle_argv(&["100000"], &mut ctx).is_err());
        assert!(!ctx.fs.is_formatted());
    }
}
