//! AOS MICEPP CLI - terminal front end for the platform.
//!
//! # Usage
//!
//! ```bash
//! # Sign in and inspect the session
//! aos login -e admin@micepp.gov.ma -p <password>
//! aos whoami
//!
//! # Screens are gated exactly like the web client
//! aos open /admin/users
//!
//! # Work with the platform's resources
//! aos requests list
//! aos complaints assign 5 --user 4
//! aos users register -f Sara -l "El Amrani" -e s.elamrani@micepp.gov.ma \
//!     --phone 0655443322 --cin K443210 --matricule M-0103 --role AGENT
//! ```
//!
//! Every data command first navigates to its screen; a guard denial prints
//! the redirect that would have happened and exits non-zero.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

use commands::Context;

#[derive(Parser)]
#[command(name = "aos")]
#[command(author, version, about = "AOS MICEPP administration console")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in to the platform
    Login {
        /// Account email
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long)]
        password: String,
    },
    /// Clear the local session
    Logout,
    /// Show the signed-in identity
    Whoami,
    /// Change the account password
    ChangePassword {
        /// Current password
        #[arg(long)]
        current: String,

        /// New password
        #[arg(long)]
        new: String,

        /// Confirmation of the new password
        #[arg(long)]
        confirm: String,
    },
    /// Run the navigation guards against a path and report the destination
    Open {
        /// Screen path, e.g. /admin/users
        path: String,
    },
    /// Get or set the UI language preference
    Lang {
        /// Language code to set (fr, ar); omit to print the current one
        code: Option<String>,
    },
    /// Manage users
    Users {
        #[command(subcommand)]
        action: commands::users::UsersAction,
    },
    /// Manage demandes (service requests)
    Requests {
        #[command(subcommand)]
        action: commands::requests::RequestsAction,
    },
    /// Manage réclamations (complaints)
    Complaints {
        #[command(subcommand)]
        action: commands::complaints::ComplaintsAction,
    },
    /// Manage published news and documents
    News {
        #[command(subcommand)]
        action: commands::content::NewsAction,
    },
    /// Manage the service catalog
    Services {
        #[command(subcommand)]
        action: commands::content::ServicesAction,
    },
    /// Read contact messages
    Messages {
        #[command(subcommand)]
        action: commands::content::MessagesAction,
    },
    /// Dashboard statistics
    Dashboard {
        #[command(subcommand)]
        action: commands::content::DashboardAction,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        eprintln!("{e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = Context::init()?;

    match cli.command {
        Commands::Login { email, password } => commands::auth::login(&ctx, &email, password).await?,
        Commands::Logout => commands::auth::logout(&ctx),
        Commands::Whoami => commands::auth::whoami(&ctx),
        Commands::ChangePassword {
            current,
            new,
            confirm,
        } => commands::auth::change_password(&ctx, current, new, confirm).await?,
        Commands::Open { path } => commands::auth::open(&ctx, &path),
        Commands::Lang { code } => commands::auth::lang(&ctx, code.as_deref())?,
        Commands::Users { action } => commands::users::run(&ctx, action).await?,
        Commands::Requests { action } => commands::requests::run(&ctx, action).await?,
        Commands::Complaints { action } => commands::complaints::run(&ctx, action).await?,
        Commands::News { action } => commands::content::run_news(&ctx, action).await?,
        Commands::Services { action } => commands::content::run_services(&ctx, action).await?,
        Commands::Messages { action } => commands::content::run_messages(&ctx, action).await?,
        Commands::Dashboard { action } => commands::content::run_dashboard(&ctx, action).await?,
    }
    Ok(())
}
