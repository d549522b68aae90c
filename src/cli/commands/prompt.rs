use crate::errors::AppResult;
use crate::ui::messages::{info, warning};
use std::io::{self, BufRead, Write};

/// Line-oriented reader for interactive commands.
pub struct Prompter<R> {
    input: R,
}

impl<R: BufRead> Prompter<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }

    /// Print `label [current]: ` and read one line. `None` on end of input.
    pub fn ask(&mut self, label: &str, current: &str) -> AppResult<Option<String>> {
        if current.is_empty() {
            print!("{label}: ");
        } else {
            print!("{label} [{current}]: ");
        }
        io::stdout().flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            println!();
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Yes/no question, defaulting to no.
    pub fn confirm(&mut self, question: &str) -> AppResult<bool> {
        warning(question);
        let answer = self.ask("Confirmar [s/N]", "")?;
        Ok(matches!(
            answer.as_deref().map(|a| a.trim().to_lowercase()).as_deref(),
            Some("s" | "sim" | "y" | "yes")
        ))
    }

    /// Pick one entry of a numbered list; blank or invalid input picks none.
    pub fn choose(&mut self, options: &[String]) -> AppResult<Option<usize>> {
        for (i, opt) in options.iter().enumerate() {
            println!("  {:>2}) {opt}", i + 1);
        }
        let Some(answer) = self.ask("Sugestão nº (Enter para ignorar)", "")? else {
            return Ok(None);
        };
        let answer = answer.trim();
        if answer.is_empty() {
            return Ok(None);
        }
        match answer.parse::<usize>() {
            Ok(n) if (1..=options.len()).contains(&n) => Ok(Some(n - 1)),
            _ => {
                info(format!("Sugestão '{answer}' ignorada."));
                Ok(None)
            }
        }
    }
}
