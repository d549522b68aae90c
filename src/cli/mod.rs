pub mod commands;
pub mod parser;

use crate::api::RemoteClient;
use crate::config::Config;
use crate::core::session::SessionContext;
use crate::db::store::LocalStore;

/// Everything a command handler needs, built once in `run()`.
pub struct AppContext<'a> {
    pub cfg: &'a Config,
    pub store: &'a LocalStore,
    pub client: &'a RemoteClient,
    pub session: &'a SessionContext<'a>,
    pub test: bool,
}
