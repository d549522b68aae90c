use crate::cli::AppContext;
use crate::cli::parser::Commands;
use crate::core::log::LogLogic;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, ctx: &AppContext) -> AppResult<()> {
    if matches!(cmd, Commands::Log { print: true }) {
        LogLogic::print_log(ctx.store)?;
    }

    Ok(())
}
