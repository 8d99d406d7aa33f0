use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;

use commands::{
    ConfigCommand, LoginCommand, LogoutCommand, PlanCommand, ProfileCommand, RecipeCommand,
    RegisterCommand, SharedCommand,
};
use config::Config;
use mealy_core::{ApiClient, OverlayStore, SessionStore};

#[derive(Parser)]
#[command(name = "mealy")]
#[command(version)]
#[command(about = "A meal planning CLI application", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new account
    Register(RegisterCommand),

    /// Log in and store the session token
    Login(LoginCommand),

    /// Log out and clear stored tokens
    Logout(LogoutCommand),

    /// Show or change account details
    Profile(ProfileCommand),

    /// Manage your recipe collection
    Recipe(RecipeCommand),

    /// Manage the weekly meal plan
    Plan(PlanCommand),

    /// Browse and rate shared recipes
    Shared(SharedCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config)?;
    tracing::debug!(
        api_url = %config.api_url.value,
        data_dir = %config.data_dir.value.display(),
        "configuration loaded"
    );

    let api = ApiClient::new(config.api_url.value.clone());
    let overlay = OverlayStore::open(config.data_dir.value.clone());
    let session = SessionStore::open(config.data_dir.value.clone());

    match &cli.command {
        Some(Commands::Register(cmd)) => cmd.run(&api),
        Some(Commands::Login(cmd)) => cmd.run(&api, &session),
        Some(Commands::Logout(cmd)) => cmd.run(&session),
        Some(Commands::Profile(cmd)) => cmd.run(&api, &session),
        Some(Commands::Recipe(cmd)) => cmd.run(&api, &session, &overlay),
        Some(Commands::Plan(cmd)) => cmd.run(&api, &session, &overlay),
        Some(Commands::Shared(cmd)) => cmd.run(&api, &session, &overlay),
        Some(Commands::Config(cmd)) => cmd.run(&config),
        None => {
            println!("Use --help to see available commands");
            Ok(())
        }
    }
}

fn init_tracing() {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mealy=warn,mealy_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
