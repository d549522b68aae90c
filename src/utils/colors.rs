/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

/// Value shown in the review step: empty fields become a grey "(vazio)".
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() {
        format!("{GREY}(vazio){RESET}")
    } else {
        value.to_string()
    }
}

/// Green for a selected service, grey otherwise.
pub fn colorize_selection(label: &str, selected: bool) -> String {
    if selected {
        format!("{GREEN}[x] {label}{RESET}")
    } else {
        format!("{GREY}[ ] {label}{RESET}")
    }
}
