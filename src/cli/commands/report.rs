use crate::cli::AppContext;
use crate::cli::parser::Commands;
use crate::core::report::{WeeklyReport, format_hours, week_range};
use crate::core::views::HistoryView;
use crate::errors::{AppError, AppResult};
use crate::repository::{EmployeeRepository, RemoteEmployeeRepository, RemoteHoursRepository};
use crate::ui::messages::{header, info};
use crate::utils::date;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, ctx: &AppContext) -> AppResult<()> {
    let Commands::Report { matricula, week } = cmd else {
        return Ok(());
    };
    if matricula.trim().is_empty() {
        return Err(AppError::InvalidInput("matrícula obrigatória".into()));
    }
    if *week > 0 {
        return Err(AppError::InvalidInput(format!(
            "semana {week}: só a semana atual e as anteriores têm registros"
        )));
    }

    let repo = RemoteHoursRepository::new(ctx.client, ctx.store);
    let mut view = HistoryView::new();
    view.load(&repo);
    if let Some(e) = view.take_error() {
        return Err(e);
    }

    let (start, _) = week_range(date::today(), *week);
    let report = WeeklyReport::build(view.all(), matricula, start);
    let name = report.name.clone().or_else(|| {
        RemoteEmployeeRepository::new(ctx.client, ctx.store)
            .cached()
            .into_iter()
            .find(|e| e.matricula.trim() == report.matricula)
            .map(|e| e.name)
    });

    print_report(&report, name.as_deref().unwrap_or("-"));
    Ok(())
}

fn print_report(report: &WeeklyReport, name: &str) {
    header("Registro de Horas Trabalhadas");
    println!("Funcionário: {name}");
    println!("Matrícula: {}", report.matricula);
    println!("Período: {}", report.period_label());
    println!("Total acumulado: {}", format_hours(report.total));

    if report.is_empty() {
        info("Nenhum registro encontrado para esta semana");
        return;
    }
    println!("Local: {}", report.location.as_deref().unwrap_or("Não informado"));
    println!();

    let mut table = Table::new(vec![
        Column::new("Dia da semana", 14),
        Column::new("Data", 10),
        Column::new("Término", 7),
        Column::new("Qt. Hora máq", 12),
        Column::new("Descrição do serviço", 32),
    ]);
    for day in &report.days {
        table.add_row(vec![
            day.label.to_string(),
            day.date.format("%d/%m/%Y").to_string(),
            day.end_time.clone().unwrap_or_else(|| "-".into()),
            day.hours_label(),
            day.description(),
        ]);
    }
    print!("{}", table.render());
    println!("Total horas: {}", format_hours(report.total));

    if !report.observations.is_empty() {
        println!();
        println!("Observações:");
        for o in &report.observations {
            println!("  {o}");
        }
    }
}
