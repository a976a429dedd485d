use super::{expect_args, parse_arg};
use crate::context::Context;

/// fstat <id>
/// Prints the descriptor: id, size in bytes, hard link names, type.
pub fn handle_argv(argv: &[&str], context: &mut Context) -> anyhow::Result<()> {
    expect_args(argv, 1, 1, "fstat <descriptor_id>")?;
    let id = parse_arg(argv[0], "descriptor id")?;
    println!("{}", context.fs.stat(id)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::*;

    #[test]
    fn fstat_root_and_unknown() {
        let mut ctx = mounted_context(4);
        handle_argv(&["0"], &mut ctx).unwrap();
        assert!(handle_argv(&["7"], &mut ctx).is_err());
        assert!(handle_argv(&["x"], &mut ctx).is_err());
    }
}
