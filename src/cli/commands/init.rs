use crate::cli::parser::Cli;
use crate::config::{Config, Endpoint};
use crate::db::store::LocalStore;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file
///  - the local store and its pending migrations
pub fn handle(cli: &Cli) -> AppResult<()> {
    let path = Config::init_file(cli.store.clone())?;

    let mut cfg = Config::load()?;
    if let Some(custom) = &cli.store {
        cfg.store = custom.clone();
    }
    let store_path = cfg.store_path();

    println!("⚙️  Initializing rhtlogger…");
    println!("📄 Config file : {}", path.display());
    println!("🗄️  Store       : {}", &store_path);

    let store = LocalStore::open(&store_path)?;
    store.audit("init", "store", &format!("Store initialized at {}", &store_path));
    success(format!("Store initialized at {}", &store_path));

    let missing: Vec<&str> = Endpoint::ALL
        .iter()
        .filter(|ep| cfg.endpoints.url(**ep).is_none())
        .map(|ep| ep.env_var())
        .collect();
    if !missing.is_empty() {
        warning(format!("Endpoints not configured yet: {}", missing.join(", ")));
    }

    println!("🎉 rhtlogger initialization completed!");
    Ok(())
}
