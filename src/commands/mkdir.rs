use crate::context::Context;

/// mkdir <path>
/// Outputs: OK | reason
pub fn handle_argv(argv: &[&str], context: &mut Context) -> anyhow::Result<()> {
    super::expect_args(argv, 1, 1, "mkdir <path>")?;
    context.fs.make_directory(argv[0])?;
    println!("OK");
    Ok(())
}
