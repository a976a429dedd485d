mod commands;
mod context;
mod fs;
mod utils;

use colored::Colorize;
use commands::{Context, load};
use utils::exit_codes::ExitCode;
use utils::{arg_man, logger, tui};

fn main() -> anyhow::Result<()> {
    let args = arg_man::handle_prog_args();
    logger::init(args.verbose)?;

    let mut context = Context::new(args.config)?;
    if let Some(script) = &args.script {
        if let Err(e) = load::run_script(script, &mut context) {
            eprintln!("{}", format!("{e:#}").red());
            ExitCode::ScriptFailed.exit();
        }
    }
    tui::handle_app_loop(&mut context);
    Ok(())
}
