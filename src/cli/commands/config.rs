use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::config::ConfigLogic;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config, test: bool) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        edit_config,
        editor,
    } = cmd
    {
        if *print_config {
            println!("📄 Current configuration:\n");
            print!("{}", ConfigLogic::render(cfg)?);
        }

        if *edit_config {
            let path = Config::config_file();
            if test {
                warning(format!("Test mode: not opening an editor for {}", path.display()));
                return Ok(());
            }
            let used = ConfigLogic::edit(&path, editor.as_deref())?;
            success(format!("Configuration file edited successfully using '{used}'"));
        }
    }

    Ok(())
}
