use super::Context;
use crate::utils::exit_codes::ExitCode;
use log::info;

pub fn handle_argv(_argv: &[&str], context: &mut Context) -> anyhow::Result<()> {
    if context.fs.is_mounted() {
        info!("exit: dropping mounted volume");
    }
    ExitCode::Success.exit()
}
