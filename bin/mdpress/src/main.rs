//! mdpress CLI
//!
//! Single binary static blog generator for directories of markdown posts.
//!
//! This is the binary entry point. The library functionality is in `lib.rs`.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;

/// Command-line interface for mdpress.
#[derive(Parser)]
#[command(
    name = "mdpress",
    version,
    about = "A static blog generator for markdown posts"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Command to run, `build` when omitted
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// Build the site
    Build {
        /// Output directory, overrides `build.output_dir`
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Override the site base URL (e.g., https://example.com/blog/)
        #[arg(long)]
        base_url: Option<String>,
    },
    /// Create a new post
    New {
        /// Post title
        title: String,
        /// Slug for the file name, derived from the title when omitted
        #[arg(long)]
        slug: Option<String>,
    },
    /// Validate configuration and content
    Check {
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    mdpress::init_tracing(cli.verbose);

    match cli.command.unwrap_or(Commands::Build {
        output: None,
        base_url: None,
    }) {
        Commands::Build { output, base_url } => {
            mdpress::cmd::build::run(&cli.config, output.as_deref(), base_url.as_deref())?;
        }
        Commands::New { title, slug } => {
            mdpress::cmd::new::run(&cli.config, &title, slug.as_deref())?;
        }
        Commands::Check { strict } => {
            mdpress::cmd::check::run(&cli.config, strict)?;
        }
    }

    Ok(())
}
