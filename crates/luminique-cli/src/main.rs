use clap::{Parser, Subcommand};
use luminique_core::{CalendarDate, Config};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "luminique", version, about = "Luminique routine tracker CLI")]
struct Cli {
    /// Treat this date (YYYY-MM-DD) as today instead of the local date
    #[arg(long, global = true, value_name = "DATE")]
    today: Option<CalendarDate>,

    /// Log engine transitions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Today's routine and streak
    Routine {
        #[command(subcommand)]
        action: commands::routine::RoutineAction,
    },
    /// Glow points and tier
    Points {
        #[command(subcommand)]
        action: commands::points::PointsAction,
    },
    /// Completion statistics
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Unlocked achievements
    Achievements,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Erase all progress, including the best streak
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
}

fn init_logging(verbose: bool, level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { level };
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"))
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}

fn main() {
    let cli = Cli::parse();

    let loaded = Config::load();
    let level = match &loaded {
        Ok(config) => config.logging.level.as_str(),
        Err(_) => "warn",
    };
    init_logging(cli.verbose, level);

    let config = match loaded {
        Ok(config) => config,
        // An unreadable config must not block restoring the defaults.
        Err(e)
            if matches!(
                cli.command,
                Commands::Config {
                    action: commands::config::ConfigAction::Reset
                }
            ) =>
        {
            tracing::warn!(error = %e, "replacing unreadable config");
            Config::default()
        }
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    let ctx = commands::Context {
        today: cli.today,
        config,
    };
    let result = match cli.command {
        Commands::Routine { action } => commands::routine::run(&ctx, action),
        Commands::Points { action } => commands::points::run(&ctx, action),
        Commands::Stats { action } => commands::stats::run(&ctx, action),
        Commands::Achievements => commands::achievements::run(&ctx),
        Commands::Config { action } => commands::config::run(&ctx, action),
        Commands::Reset { yes } => commands::reset::run(&ctx, yes),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
