use crate::context::Context;

/// pwd
/// Prints the current directory as `root/a/b`.
pub fn handle_argv(_argv: &[&str], context: &mut Context) -> anyhow::Result<()> {
    println!("{}", context.fs.pwd()?);
    Ok(())
}
