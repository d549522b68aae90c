use crate::cli::AppContext;
use crate::cli::commands::prompt::Prompter;
use crate::core::confirmation::{ConfirmationStep, SubmitStatus};
use crate::core::wizard::{EnvGeolocator, Transition, Wizard, WizardStep};
use crate::errors::AppResult;
use crate::models::catalog::SERVICES;
use crate::models::draft::{DraftField, RegistrationDraft, UnitOfMeasure};
use crate::models::employee::EmployeeRecord;
use crate::repository::{
    EmployeeRepository, HoursRepository, RemoteEmployeeRepository, RemoteHoursRepository,
};
use crate::ui::messages::{error, header, info, progress_bar, success, warning};
use crate::utils::colors::{RED, RESET, colorize_optional, colorize_selection};
use chrono::Local;
use std::io::{self, BufRead};

const NOTES_WIDTH: usize = 50;

enum ReviewOutcome {
    Submitted,
    BackToWizard,
    Cancelled,
}

/// Handle the `register` command
pub fn handle(ctx: &AppContext) -> AppResult<()> {
    let stdin = io::stdin();
    let mut prompt = Prompter::new(stdin.lock());

    let employees = RemoteEmployeeRepository::new(ctx.client, ctx.store);
    let operators = match employees.list() {
        Ok(list) => list,
        Err(e) => {
            warning(format!("Lista de funcionários indisponível: {e}"));
            employees.cached()
        }
    };
    let hours = RemoteHoursRepository::new(ctx.client, ctx.store);

    let mut wizard = Wizard::new(Local::now().naive_local()).with_operators(operators.clone());
    loop {
        let Some(draft) = run_wizard(&mut prompt, &mut wizard)? else {
            warning("Registro cancelado.");
            return Ok(());
        };

        let mut review = ConfirmationStep::from_wizard(&wizard, draft);
        match run_review(&mut prompt, &mut review, &hours)? {
            ReviewOutcome::Submitted => return Ok(()),
            ReviewOutcome::Cancelled => {
                warning("Registro cancelado.");
                return Ok(());
            }
            ReviewOutcome::BackToWizard => {
                wizard = review.back_to_wizard().with_operators(operators.clone());
            }
        }
    }
}

fn run_wizard<R: BufRead>(
    p: &mut Prompter<R>,
    w: &mut Wizard,
) -> AppResult<Option<RegistrationDraft>> {
    loop {
        let step = w.step();
        println!();
        header(format!(
            "Etapa {}/{} · {}",
            step.index() + 1,
            WizardStep::ALL.len(),
            step.title()
        ));
        println!("{}", progress_bar(w.progress()));

        for field in step.fields() {
            if !prompt_field(p, w, *field)? {
                return Ok(None);
            }
        }

        let Some(action) = p.ask("Enter = avançar, v = voltar, c = cancelar", "")? else {
            return Ok(None);
        };
        match action.trim().to_lowercase().as_str() {
            "c" => return Ok(None),
            "v" => {
                w.prev();
            }
            _ => match w.next() {
                Transition::Advanced(_) => {}
                Transition::Blocked(missing) => {
                    let names: Vec<&str> = missing.iter().map(|f| f.label()).collect();
                    warning(format!("Preencha os campos obrigatórios: {}", names.join(", ")));
                }
                Transition::Completed(draft) => return Ok(Some(draft)),
            },
        }
    }
}

fn field_label(w: &Wizard, field: DraftField) -> String {
    let step = w.step();
    let required = step.required_fields().contains(&field);
    let label = if required {
        format!("{} *", field.label())
    } else {
        field.label().to_string()
    };

    if w.step_attempted() && required && !w.draft().is_filled(field) {
        format!("{RED}{label}{RESET}")
    } else {
        label
    }
}

/// Prompt one field. Returns false on end of input.
fn prompt_field<R: BufRead>(p: &mut Prompter<R>, w: &mut Wizard, field: DraftField) -> AppResult<bool> {
    match field {
        DraftField::Services => return prompt_services(p, w),
        DraftField::Unit => return prompt_unit(p, w),
        _ => {}
    }

    let mut label = field_label(w, field);
    if field == DraftField::Location {
        label.push_str(" (gps = usar localização)");
    }

    let current = w.draft().value(field);
    let Some(answer) = p.ask(&label, &current)? else {
        return Ok(false);
    };
    let answer = answer.trim();

    if field == DraftField::Location && answer.eq_ignore_ascii_case("gps") {
        if let Some(alert) = w.use_gps(&EnvGeolocator) {
            warning(alert.0);
        }
        return Ok(true);
    }
    if !answer.is_empty()
        && let Err(e) = w.set_field(field, answer)
    {
        warning(e);
    }

    match field {
        DraftField::Operator if !answer.is_empty() => {
            let suggestions: Vec<EmployeeRecord> =
                w.operator_suggestions().into_iter().cloned().collect();
            if !suggestions.is_empty() {
                let labels: Vec<String> = suggestions
                    .iter()
                    .map(|e| format!("{} ({})", e.name, e.matricula))
                    .collect();
                if let Some(i) = p.choose(&labels)? {
                    w.select_operator(&suggestions[i]);
                }
            }
        }
        DraftField::RegionCode if !answer.is_empty() => {
            let suggestions = w.region_suggestions();
            if !suggestions.is_empty() {
                let labels: Vec<String> = suggestions
                    .iter()
                    .map(|r| format!("{} - {}", r.code, r.name))
                    .collect();
                if let Some(i) = p.choose(&labels)? {
                    w.select_region(suggestions[i]);
                }
            }
        }
        _ => {}
    }
    Ok(true)
}

fn prompt_unit<R: BufRead>(p: &mut Prompter<R>, w: &mut Wizard) -> AppResult<bool> {
    let symbols: Vec<&str> = UnitOfMeasure::ALL.iter().map(|u| u.symbol()).collect();
    let label = format!("{} ({})", field_label(w, DraftField::Unit), symbols.join(", "));

    loop {
        let current = w.draft().value(DraftField::Unit);
        let Some(answer) = p.ask(&label, &current)? else {
            return Ok(false);
        };
        if answer.trim().is_empty() {
            return Ok(true);
        }
        match w.set_field(DraftField::Unit, answer.trim()) {
            Ok(()) => return Ok(true),
            Err(e) => warning(e),
        }
    }
}

fn prompt_services<R: BufRead>(p: &mut Prompter<R>, w: &mut Wizard) -> AppResult<bool> {
    println!("{}:", field_label(w, DraftField::Services));
    loop {
        for (i, s) in SERVICES.iter().enumerate() {
            let selected = w.draft().servicos.get(s.id).is_some_and(|f| f.selected);
            println!(
                "  {:>2}) {}",
                i + 1,
                colorize_selection(&format!("{} ({})", s.label, s.unit), selected)
            );
        }

        let Some(answer) = p.ask("Números ou ids para alternar (Enter para concluir)", "")? else {
            return Ok(false);
        };
        if answer.trim().is_empty() {
            return Ok(true);
        }

        for token in answer.split([',', ' ']).map(str::trim).filter(|t| !t.is_empty()) {
            let id = match token.parse::<usize>() {
                Ok(n) if (1..=SERVICES.len()).contains(&n) => SERVICES[n - 1].id,
                _ => token,
            };
            if let Err(e) = w.toggle_service(id) {
                warning(e);
            }
        }
    }
}

fn print_review(review: &ConfirmationStep) {
    let mut section = "";
    for row in review.review() {
        if row.section != section {
            section = row.section;
            println!();
            header(section);
        }

        let value = if row.field == DraftField::Notes && !row.value.is_empty() {
            let indent = " ".repeat(29);
            textwrap::wrap(&row.value, NOTES_WIDTH).join(&format!("\n{indent}"))
        } else {
            colorize_optional(&row.value)
        };
        println!("  {:<26} {}", row.label, value);
    }
    println!();
}

fn run_review<R: BufRead>(
    p: &mut Prompter<R>,
    review: &mut ConfirmationStep,
    repo: &dyn HoursRepository,
) -> AppResult<ReviewOutcome> {
    loop {
        print_review(review);

        let Some(cmd) = p.ask(
            "s = enviar, e <campo> = editar, w = voltar ao assistente, c = cancelar",
            "",
        )?
        else {
            return Ok(ReviewOutcome::Cancelled);
        };

        let cmd = cmd.trim();
        let (verb, arg) = cmd.split_once(' ').unwrap_or((cmd, ""));
        match verb.to_lowercase().as_str() {
            "s" => match review.submit(repo) {
                SubmitStatus::Submitted(record) => {
                    success(format!("Registro enviado com sucesso! (backup local {})", record.id));
                    return Ok(ReviewOutcome::Submitted);
                }
                SubmitStatus::Failed(msg) => {
                    error(msg);
                    info("Os dados foram mantidos. Corrija-os ou envie novamente.");
                }
                SubmitStatus::Idle => {}
            },
            "e" => edit_field(p, review, arg.trim())?,
            "w" => return Ok(ReviewOutcome::BackToWizard),
            "c" => return Ok(ReviewOutcome::Cancelled),
            other => warning(format!("Comando '{other}' desconhecido.")),
        }
    }
}

fn edit_field<R: BufRead>(
    p: &mut Prompter<R>,
    review: &mut ConfirmationStep,
    key: &str,
) -> AppResult<()> {
    let Some(field) = DraftField::from_key(key) else {
        let keys: Vec<&str> = DraftField::ALL.iter().map(|f| f.key()).collect();
        warning(format!("Campo '{key}' desconhecido. Use um de: {}", keys.join(", ")));
        return Ok(());
    };

    if !review.begin_edit(field) {
        warning("Serviços são alterados no assistente (w).");
        return Ok(());
    }

    let current = review.edit_buffer().unwrap_or_default().to_string();
    match p.ask(field.label(), &current)? {
        Some(v) if !v.trim().is_empty() => {
            if let Err(e) = review.commit_edit(v.trim()) {
                warning(e);
            }
        }
        _ => review.cancel_edit(),
    }
    Ok(())
}
