//! rhtlogger library root.
//! Exposes CLI parser, high-level run() function, and internal modules.

pub mod api;
pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod models;
pub mod repository;
pub mod ui;
pub mod utils;

use crate::api::RemoteClient;
use crate::cli::AppContext;
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::route_gate::{LOGIN_PATH, RouteDecision, route_gate};
use crate::core::session::SessionContext;
use crate::db::store::LocalStore;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::info;
use clap::Parser;
use std::fs;
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Route check, then hand the command to its handler
pub fn dispatch(cmd: &Commands, ctx: &AppContext) -> AppResult<()> {
    let route = cmd.route();
    match route_gate(route, ctx.session.is_logged_in()) {
        RouteDecision::Next => {}
        RouteDecision::Redirect(LOGIN_PATH) => {
            return Err(AppError::NotLoggedIn(route.to_string()));
        }
        RouteDecision::Redirect(_) => {
            if let Some(u) = ctx.session.current_user() {
                info(format!("Já conectado como {} <{}>. Use `logout` primeiro.", u.name, u.email));
            }
            return Ok(());
        }
    }

    match cmd {
        Commands::Init => Ok(()),
        Commands::Config { .. } => cli::commands::config::handle(cmd, ctx.cfg, ctx.test),
        Commands::Login { .. } | Commands::Logout | Commands::Whoami => {
            cli::commands::session::handle(cmd, ctx)
        }
        Commands::Register => cli::commands::register::handle(ctx),
        Commands::Employees { .. } => cli::commands::employees::handle(cmd, ctx),
        Commands::History { .. } => cli::commands::history::handle(cmd, ctx),
        Commands::Report { .. } => cli::commands::report::handle(cmd, ctx),
        Commands::Consult { .. } => cli::commands::consult::handle(cmd, ctx),
        Commands::Log { .. } => cli::commands::log::handle(cmd, ctx),
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rhtlogger=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    init_tracing();

    let cli = Cli::parse();

    // init creates the config file itself
    if let Commands::Init = cli.command {
        return cli::commands::init::handle(&cli);
    }

    let mut cfg = Config::load()?;
    if let Some(custom) = &cli.store {
        cfg.store = custom.clone();
    }

    let store_path = cfg.store_path();
    if let Some(parent) = Path::new(&store_path).parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let store = LocalStore::open(&store_path)?;
    let client = RemoteClient::new(&cfg)?;
    let session = SessionContext::new(&store);

    let ctx = AppContext {
        cfg: &cfg,
        store: &store,
        client: &client,
        session: &session,
        test: cli.test,
    };
    dispatch(&cli.command, &ctx)
}
