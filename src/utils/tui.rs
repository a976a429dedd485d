use crate::commands::{Context, Registry};
use colored::Colorize;
use std::io::{self, BufRead, Write};

fn write_greet() {
    println!(
        "{} - {}",
        "Memory File System".green(),
        env!("CARGO_PKG_VERSION").yellow()
    );
}

fn write_prefix(context: &Context) {
    let cwd = context.fs().pwd().unwrap_or_default();
    eprint!("{cwd}> ");
    let _ = io::stderr().flush();
}

/// Interactive loop; returns on end of input.
pub fn handle_app_loop(context: &mut Context) {
    let stdin = io::stdin();
    let registry = Registry::new();

    write_greet();
    loop {
        // before input
        write_prefix(context);
        let mut user_input = String::new();

        // user input
        match stdin.lock().read_line(&mut user_input) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                eprintln!("{}", format!("cannot read input: {e}").red());
                break;
            }
        }

        // command dispatch
        registry.dispatch_line(&user_input, context);
    }
}
