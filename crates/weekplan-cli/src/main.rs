use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "weekplan", version, about = "Weekly task planner")]
struct Cli {
    /// Log placement decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Place pending tasks into the free slots of a week
    Plan(commands::plan::PlanArgs),
    /// Free/occupied statistics for a routine
    Availability(commands::availability::AvailabilityArgs),
    /// Show free slots per day
    Grid(commands::grid::GridArgs),
    /// Show tasks in allocation order
    Rank(commands::rank::RankArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(filter)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Plan(args) => commands::plan::run(args),
        Commands::Availability(args) => commands::availability::run(args),
        Commands::Grid(args) => commands::grid::run(args),
        Commands::Rank(args) => commands::rank::run(args),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
