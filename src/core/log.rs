use crate::db::log::{LogRow, load_log};
use crate::db::store::LocalStore;
use crate::errors::{AppError, AppResult};
use ansi_term::Colour;
use regex::Regex;

const ANSI_PATTERN: &str = r"\x1B\[[0-9;]*[mK]";
const OP_MAX_WIDTH: usize = 60;

/// Colour of an audit operation
fn color_for_operation(op: &str) -> Colour {
    match op {
        "submit" => Colour::Green,
        "employee_add" => Colour::Cyan,
        "employee_del" => Colour::Red,
        "login" | "logout" => Colour::Yellow,
        "init" => Colour::RGB(255, 153, 51),
        "migration_applied" => Colour::Purple,
        _ => Colour::White,
    }
}

pub struct LogLogic;

impl LogLogic {
    /// One printable line per audit row, the operation coloured.
    pub fn format_rows(rows: &[LogRow]) -> AppResult<Vec<String>> {
        let ansi = Regex::new(ANSI_PATTERN).map_err(|e| AppError::Other(e.to_string()))?;

        let id_w = rows.iter().map(|r| r.id.to_string().len()).max().unwrap_or(1);
        let date_w = rows.iter().map(|r| date_label(&r.date).len()).max().unwrap_or(10);

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            let color = color_for_operation(&row.operation);

            let mut visible = if row.target.is_empty() {
                row.operation.clone()
            } else {
                format!("{} ({})", row.operation, row.target)
            };
            if visible.chars().count() > OP_MAX_WIDTH {
                visible = visible.chars().take(OP_MAX_WIDTH - 3).collect::<String>() + "...";
            }

            // only the operation word is coloured
            let painted = match visible.split_once(' ') {
                Some((op, rest)) => format!("{} {}", color.paint(op), rest),
                None => color.paint(visible.as_str()).to_string(),
            };
            let plain_len = ansi.replace_all(&painted, "").chars().count();
            let padding = " ".repeat(OP_MAX_WIDTH.saturating_sub(plain_len));

            out.push(format!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                row.id,
                date_label(&row.date),
                painted,
                padding,
                row.message,
            ));
        }
        Ok(out)
    }

    pub fn print_log(store: &LocalStore) -> AppResult<()> {
        let rows = load_log(store.conn())?;
        if rows.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        println!("📜 Internal log:\n");
        for line in Self::format_rows(&rows)? {
            println!("{line}");
        }
        Ok(())
    }
}

fn date_label(raw: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.format("%FT%T%:z").to_string())
        .unwrap_or_else(|_| raw.to_string())
}
