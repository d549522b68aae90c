use crate::cli::AppContext;
use crate::cli::commands::history::print_records;
use crate::cli::parser::Commands;
use crate::core::views::{ConsultQuery, HistoryView};
use crate::errors::{AppError, AppResult};
use crate::repository::RemoteHoursRepository;
use crate::ui::messages::{header, warning};

/// Handle the `consult` command: registrations of one operator
pub fn handle(cmd: &Commands, ctx: &AppContext) -> AppResult<()> {
    let Commands::Consult {
        name,
        matricula,
        birth,
    } = cmd
    else {
        return Ok(());
    };

    let query = match ConsultQuery::parse(name, matricula, birth) {
        Ok(q) => q,
        Err(errors) => {
            for msg in errors.messages() {
                warning(msg);
            }
            return Err(AppError::InvalidInput("consulta incompleta".into()));
        }
    };

    let repo = RemoteHoursRepository::new(ctx.client, ctx.store);
    let mut view = HistoryView::new();
    view.load_for_employee(&repo, &query);
    if let Some(e) = view.take_error() {
        return Err(e);
    }

    header(format!("Registros de {} ({})", query.name, query.matricula));
    print_records(&view.filtered(), view.all().len());
    Ok(())
}
