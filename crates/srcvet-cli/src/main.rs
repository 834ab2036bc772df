mod commands;
mod prompts;

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use commands::EXIT_FAILURE;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "srcvet",
    version,
    about = "Build-and-review assistant for source package vetting"
)]
struct Cli {
    /// Output results as structured JSON.
    #[arg(long, default_value_t = false, global = true)]
    json: bool,

    /// Enable verbose (debug) logging output.
    #[arg(short, long, default_value_t = false, global = true)]
    verbose: bool,

    /// Enable trace-level logging (more detailed than --verbose).
    #[arg(long, default_value_t = false, global = true)]
    trace: bool,

    /// Path to the tool configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Review a source package: extract, verify, build, and walk the checklist.
    Review {
        /// Path to the source archive (e.g. foo-1.2-3.fc20.src.rpm).
        archive: PathBuf,
        /// Path to the reference copy of the build recipe.
        #[arg(long)]
        recipe: PathBuf,
        /// Chroot buildroot to build in (repeatable).
        #[arg(long = "chroot")]
        chroots: Vec<String>,
        /// Remote scratch target to build for (repeatable).
        #[arg(long = "scratch")]
        scratches: Vec<String>,
        /// Path to the checklist template.
        #[arg(long)]
        checklist: Option<PathBuf>,
        /// Working directory for build logs, staged sources, and the report.
        #[arg(long)]
        workdir: Option<PathBuf>,
        /// Report output path (defaults to <workdir>/review.txt).
        #[arg(long)]
        output: Option<PathBuf>,
        /// Skip the local rebuild.
        #[arg(long, default_value_t = false)]
        skip_local: bool,
        /// Answer yes to all build confirmations.
        #[arg(short = 'y', long, default_value_t = false)]
        assume_yes: bool,
    },
    /// Parse and print the checklist template.
    Checklist {
        /// Path to the checklist template.
        #[arg(long)]
        checklist: Option<PathBuf>,
    },
    /// Run diagnostic checks on the build tooling and configuration.
    Doctor,
    /// Generate shell completions for bash, zsh, fish, elvish, or powershell.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

fn main() -> ExitCode {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let msg = info.to_string();
        if msg.contains("Broken pipe")
            || msg.contains("broken pipe")
            || msg.contains("os error 32")
            || msg.contains("failed printing to stdout")
        {
            std::process::exit(0);
        }
        default_hook(info);
    }));

    let cli = Cli::parse();

    let default_level = if cli.trace {
        "trace"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("SRCVET_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_target(false)
        .without_time()
        .init();

    srcvet_core::install_signal_handler();

    let json_output = cli.json;
    let config = match commands::load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(msg) => {
            eprintln!("error: {msg}");
            return ExitCode::from(EXIT_FAILURE);
        }
    };

    if let Commands::Review {
        ref chroots,
        ref scratches,
        ..
    } = cli.command
    {
        if std::env::var("SRCVET_SKIP_PREREQS").as_deref() != Ok("1") {
            let missing =
                srcvet_build::check_review_prereqs(!chroots.is_empty(), !scratches.is_empty());
            if !missing.is_empty() {
                eprintln!("error: {}", srcvet_build::format_missing(&missing));
                return ExitCode::from(EXIT_FAILURE);
            }
        }
    }

    let result = match cli.command {
        Commands::Review {
            archive,
            recipe,
            chroots,
            scratches,
            checklist,
            workdir,
            output,
            skip_local,
            assume_yes,
        } => commands::review::run(
            &commands::review::ReviewRequest {
                archive,
                recipe,
                chroots,
                scratches,
                checklist,
                workdir,
                output,
                skip_local,
                assume_yes,
            },
            &config,
            json_output,
        ),
        Commands::Checklist { checklist } => {
            commands::checklist::run(checklist.as_deref(), json_output)
        }
        Commands::Doctor => commands::doctor::run(&config, json_output),
        Commands::Completions { shell } => commands::completions::run::<Cli>(shell),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(msg) => {
            eprintln!("error: {msg}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn exit_success_is_zero() {
        assert_eq!(commands::EXIT_SUCCESS, 0);
    }
}
