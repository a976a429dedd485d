pub mod arg_man;
pub mod exit_codes;
pub mod logger;
pub mod tui;
