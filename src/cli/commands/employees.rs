use crate::cli::AppContext;
use crate::cli::commands::prompt::Prompter;
use crate::cli::parser::{Commands, EmployeeAction};
use crate::core::views::RosterView;
use crate::errors::{AppError, AppResult};
use crate::models::employee::NewEmployee;
use crate::repository::{EmployeeRepository, RemoteEmployeeRepository};
use crate::ui::messages::{info, success, warning};
use crate::utils::date;
use crate::utils::table::{Column, Table};
use std::io;

pub fn handle(cmd: &Commands, ctx: &AppContext) -> AppResult<()> {
    let Commands::Employees { action } = cmd else {
        return Ok(());
    };
    let repo = RemoteEmployeeRepository::new(ctx.client, ctx.store);

    match action {
        EmployeeAction::List { search } => {
            let mut view = RosterView::new();
            view.load(&repo);
            if let Some(e) = view.take_error() {
                return Err(e);
            }
            if let Some(s) = search {
                view.set_search(s);
            }
            print_roster(&view);
        }

        EmployeeAction::Add {
            name,
            matricula,
            birth,
        } => {
            let employee = NewEmployee::new(name, matricula, birth)?;
            let record = repo.register(&employee)?;
            success(format!(
                "Funcionário {} ({}) cadastrado. id = {}",
                record.name, record.matricula, record.id
            ));
        }

        EmployeeAction::Del { id, yes } => {
            let mut view = RosterView::new();
            view.load(&repo);
            if let Some(e) = view.take_error() {
                return Err(e);
            }

            let target = view
                .find(id)
                .cloned()
                .ok_or_else(|| AppError::InvalidInput(format!("funcionário {id} não encontrado")))?;

            if !*yes {
                let stdin = io::stdin();
                let mut prompt = Prompter::new(stdin.lock());
                let question = format!(
                    "Excluir {} ({})? Esta ação não pode ser desfeita.",
                    target.name, target.matricula
                );
                if !prompt.confirm(&question)? {
                    info("Operação cancelada.");
                    return Ok(());
                }
            }

            if !view.delete(&repo, id) {
                return Err(view
                    .take_error()
                    .unwrap_or_else(|| AppError::Other("falha ao excluir".into())));
            }
            success(format!("Funcionário {} excluído.", target.name));
            match view.take_error() {
                Some(e) => warning(format!("Não foi possível recarregar a lista: {e}")),
                None => info(format!("{} funcionário(s) restantes.", view.all().len())),
            }
        }
    }
    Ok(())
}

fn print_roster(view: &RosterView) {
    let rows = view.filtered();
    if rows.is_empty() {
        info("Nenhum funcionário encontrado.");
        return;
    }

    let mut table = Table::new(vec![
        Column::new("ID", 14),
        Column::new("Nome", 30),
        Column::new("Matrícula", 12),
        Column::new("Nascimento", 10),
    ]);
    for e in &rows {
        table.add_row(vec![
            e.id.clone(),
            e.name.clone(),
            e.matricula.clone(),
            date::to_br_date(&e.birth_date),
        ]);
    }
    print!("{}", table.render());
    println!("{} de {} funcionário(s)", rows.len(), view.all().len());
}
