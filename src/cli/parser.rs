use clap::{Parser, Subcommand};

/// Command-line interface definition for rhtlogger
/// CLI client to register machine hours (RHT) against the remote service
#[derive(Parser)]
#[command(
    name = "rhtlogger",
    version = env!("CARGO_PKG_VERSION"),
    about = "Register machine hours (RHT), manage operators and browse the history",
    long_about = None
)]
pub struct Cli {
    /// Override local store path (useful for tests or a custom store)
    #[arg(global = true, long = "store")]
    pub store: Option<String>,

    /// Run in test mode (plain output, no editor launch)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the configuration file and the local store
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the effective configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Start a session
    Login {
        #[arg(long)]
        email: String,

        /// Display name (default: the part of the email before '@')
        #[arg(long)]
        name: Option<String>,
    },

    /// End the current session
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Register machine hours with the interactive wizard
    Register,

    /// Manage the operator roster
    Employees {
        #[command(subcommand)]
        action: EmployeeAction,
    },

    /// Browse the registration history
    History {
        #[arg(long, short, help = "Filter by operator name, matricula or location")]
        search: Option<String>,

        #[arg(long, short, help = "Only records of this date (YYYY-MM-DD)")]
        date: Option<String>,
    },

    /// Weekly timesheet of one operator
    Report {
        #[arg(long, short, help = "Operator matricula")]
        matricula: String,

        #[arg(
            long,
            short,
            default_value_t = 0,
            allow_negative_numbers = true,
            help = "Week offset from the current week (0 = this week, -1 = last week)"
        )]
        week: i64,
    },

    /// Look up the registrations of one operator
    Consult {
        #[arg(long)]
        name: String,

        #[arg(long)]
        matricula: String,

        /// Birth date (YYYY-MM-DD)
        #[arg(long)]
        birth: String,
    },

    /// Print or manage the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}

#[derive(Subcommand)]
pub enum EmployeeAction {
    /// List operators
    List {
        #[arg(long, short, help = "Filter by name or matricula")]
        search: Option<String>,
    },

    /// Register an operator
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        matricula: String,

        /// Birth date (YYYY-MM-DD)
        #[arg(long)]
        birth: String,
    },

    /// Delete an operator by id
    Del {
        #[arg(long)]
        id: String,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },
}

impl Commands {
    /// Route path the command maps to, checked by the route gate.
    pub fn route(&self) -> &'static str {
        match self {
            Commands::Login { .. } => "/auth/login",
            Commands::Register => "/registerHours",
            Commands::Consult { .. } => "/consultHours",
            Commands::History { .. } => "/dashboard/history",
            Commands::Employees { .. } => "/dashboard/employees",
            Commands::Report { .. } => "/dashboard/reports",
            Commands::Init
            | Commands::Config { .. }
            | Commands::Logout
            | Commands::Whoami
            | Commands::Log { .. } => "/",
        }
    }
}
