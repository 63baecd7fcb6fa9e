use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

/// Generate stylesheets, icons and palettes from tinct styles
#[derive(Parser)]
#[command(name = "tinct")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Directory containing one subdirectory per style
    #[arg(long, global = true, default_value = "styles")]
    styles_dir: PathBuf,

    /// Directory generated files are written to
    #[arg(long, global = true, default_value = tinct::DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Log pipeline stages (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available styles
    Styles,

    /// List the themes of a style
    Themes {
        /// Style directory name
        style: String,
    },

    /// Generate the stylesheet and resources of a style
    Export {
        /// Style directory name
        style: String,

        /// Theme to use instead of the style's default
        #[arg(long)]
        theme: Option<String>,

        /// Override a variable, as name=value (repeatable)
        #[arg(long = "set", value_name = "NAME=VALUE", value_parser = commands::parse_assignment)]
        overrides: Vec<(String, String)>,
    },

    /// Process an external template against a style and theme
    Process {
        /// Style directory name
        style: String,

        /// Template file
        template: PathBuf,

        /// Theme to use instead of the style's default
        #[arg(long)]
        theme: Option<String>,

        /// Also write the result to this file in the style's output directory
        #[arg(long)]
        output: Option<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "tinct=debug" } else { "tinct=info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut manager = tinct::StyleManager::builder()
        .styles_dir(&cli.styles_dir)
        .output_dir(&cli.output_dir)
        .build();
    let mut out = std::io::stdout().lock();

    let result = match cli.command {
        Commands::Styles => commands::styles(&manager, &mut out),
        Commands::Themes { style } => commands::themes(&mut manager, &style, &mut out),
        Commands::Export {
            style,
            theme,
            overrides,
        } => commands::export(&mut manager, &style, theme.as_deref(), &overrides, &mut out),
        Commands::Process {
            style,
            template,
            theme,
            output,
        } => commands::process(
            &mut manager,
            &style,
            &template,
            theme.as_deref(),
            output.as_deref(),
            &mut out,
        ),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}
