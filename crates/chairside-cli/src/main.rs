use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

mod commands;

#[derive(Parser)]
#[command(name = "chairside-cli", version, about = "Chairside CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Appointment booking and lifecycle
    Appointment {
        #[command(subcommand)]
        action: commands::appointment::AppointmentAction,
    },
    /// Availability views
    Availability {
        #[command(subcommand)]
        action: commands::availability::AvailabilityAction,
    },
    /// Time block management
    Block {
        #[command(subcommand)]
        action: commands::block::BlockAction,
    },
    /// Services catalog
    Service {
        #[command(subcommand)]
        action: commands::service::ServiceAction,
    },
    /// Client management
    Client {
        #[command(subcommand)]
        action: commands::client::ClientAction,
    },
    /// Lead capture and conversion
    Lead {
        #[command(subcommand)]
        action: commands::lead::LeadAction,
    },
    /// Portfolio showcase
    Portfolio {
        #[command(subcommand)]
        action: commands::portfolio::PortfolioAction,
    },
    /// Business analytics
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Appointment { action } => commands::appointment::run(action),
        Commands::Availability { action } => commands::availability::run(action),
        Commands::Block { action } => commands::block::run(action),
        Commands::Service { action } => commands::service::run(action),
        Commands::Client { action } => commands::client::run(action),
        Commands::Lead { action } => commands::lead::run(action),
        Commands::Portfolio { action } => commands::portfolio::run(action),
        Commands::Stats { action } => commands::stats::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
