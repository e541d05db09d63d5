//! archgen - Flutter clean-architecture scaffolding

use archgen::commands;
use archgen::config::{Layout, ScaffoldConfig};
use archgen::logging;
use archgen::ScaffoldError;
use clap::{Parser, Subcommand};
use colored::Colorize;

#[derive(Parser)]
#[command(name = "archgen")]
#[command(author, version, about = "Scaffold a clean-architecture layout into a Flutter project")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the layout in the current project (the default command)
    Generate {
        /// Where to place the layout: standard (lib/) or src (src/lib/)
        #[arg(short, long, value_enum, default_value_t = Layout::Standard)]
        layout: Layout,

        /// Show what would be created without writing anything
        #[arg(long)]
        dry_run: bool,

        /// Log every path as it is checked or created
        #[arg(short, long)]
        verbose: bool,
    },

    /// Print the layout without touching the filesystem
    Tree {
        /// Where the layout would be placed
        #[arg(short, long, value_enum, default_value_t = Layout::Standard)]
        layout: Layout,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "❌ Error:".red(), e);
        let precondition = e
            .downcast_ref::<ScaffoldError>()
            .is_some_and(ScaffoldError::is_precondition);
        if precondition {
            eprintln!("{}", "Run archgen from your Flutter project root".yellow());
        }
        eprintln!();
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        None => {
            let config = ScaffoldConfig::default();
            logging::init(logging::level_for(false, false))?;
            commands::generate(&config)?;
        }
        Some(Commands::Generate {
            layout,
            dry_run,
            verbose,
        }) => {
            let config = ScaffoldConfig {
                layout,
                dry_run,
                ..Default::default()
            };
            logging::init(logging::level_for(verbose, dry_run))?;
            commands::generate(&config)?;
        }
        Some(Commands::Tree { layout, json }) => {
            let format = if json {
                commands::OutputFormat::Json
            } else {
                commands::OutputFormat::Summary
            };
            commands::tree(layout, format)?;
        }
    }

    Ok(())
}
