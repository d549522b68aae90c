use crate::cli::AppContext;
use crate::cli::parser::Commands;
use crate::core::session::build_user;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};

/// Handle `login`, `logout` and `whoami`
pub fn handle(cmd: &Commands, ctx: &AppContext) -> AppResult<()> {
    match cmd {
        Commands::Login { email, name } => {
            let user = build_user(email, name.as_deref())?;
            ctx.session.login(&user)?;
            success(format!("Bem-vindo, {} <{}>", user.name, user.email));
        }
        Commands::Logout => match ctx.session.logout()? {
            Some(u) => success(format!("Sessão de {} encerrada.", u.email)),
            None => info("Nenhuma sessão ativa."),
        },
        Commands::Whoami => match (ctx.session.current_user(), ctx.session.is_logged_in()) {
            (Some(u), true) => {
                println!("👤 {} <{}>", u.name, u.email);
                println!("   desde {}", u.created_at);
            }
            (Some(u), false) => warning(format!("Sessão de {} expirada. Faça login novamente.", u.email)),
            (None, _) => info("Nenhuma sessão ativa."),
        },
        _ => {}
    }
    Ok(())
}
