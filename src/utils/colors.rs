/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Green "Yes" / grey "No" for access flags.
pub fn colorize_flag(value: bool) -> String {
    if value {
        format!("{GREEN}Yes{RESET}")
    } else {
        format!("{GREY}No{RESET}")
    }
}

/// Colour a `logEvent` value by its effect on presence.
pub fn colorize_log_event(value: &str, is_in: bool, is_out: bool) -> String {
    if is_in {
        format!("{GREEN}{value}{RESET}")
    } else if is_out {
        format!("{RED}{value}{RESET}")
    } else {
        value.to_string()
    }
}
