use crate::cli::AppContext;
use crate::cli::parser::Commands;
use crate::core::views::HistoryView;
use crate::errors::{AppError, AppResult};
use crate::models::catalog::region_full_name;
use crate::models::hours::HoursRecord;
use crate::repository::RemoteHoursRepository;
use crate::ui::messages::info;
use crate::utils::date;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, ctx: &AppContext) -> AppResult<()> {
    let Commands::History { search, date } = cmd else {
        return Ok(());
    };
    if let Some(d) = date
        && date::parse_date(d).is_none()
    {
        return Err(AppError::InvalidDate(d.clone()));
    }

    let repo = RemoteHoursRepository::new(ctx.client, ctx.store);
    let mut view = HistoryView::new();
    view.load(&repo);
    if let Some(e) = view.take_error() {
        return Err(e);
    }

    view.set_search(search.as_deref().unwrap_or(""));
    view.set_date(date.as_deref());
    print_records(&view.filtered(), view.all().len());
    Ok(())
}

/// Shared by `history` and `consult`.
pub fn print_records(rows: &[&HoursRecord], total: usize) {
    if rows.is_empty() {
        info("Nenhum registro encontrado.");
        return;
    }

    let mut table = Table::new(vec![
        Column::new("Data", 10),
        Column::new("Operador", 22),
        Column::new("Matrícula", 10),
        Column::new("Local", 20),
        Column::new("RA", 18),
        Column::new("Serviços", 24),
        Column::new("Total", 7),
    ]);
    for r in rows {
        let f = &r.fields;
        table.add_row(vec![
            date::to_br_date(&f.data),
            f.operador_nome.clone(),
            f.operador_matricula.clone(),
            f.local_servico.clone(),
            region_full_name(&f.ra),
            f.sevico_realizado.clone(),
            f.total_servico.clone(),
        ]);
    }
    print!("{}", table.render());
    println!("{} de {} registro(s)", rows.len(), total);
}
