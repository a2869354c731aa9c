mod commands;
mod exit_code;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use exit_code::ExitCode;

#[derive(Parser)]
#[command(name = "flatconf")]
#[command(about = "Check and resolve flat lint configurations", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the config file (searched upwards from the current directory by default)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Register an extra plugin from a manifest file (repeatable)
    #[arg(long = "plugin-manifest", value_name = "FILE", global = true)]
    plugin_manifests: Vec<PathBuf>,

    /// Force colored output even when not a TTY
    #[arg(long, global = true, conflicts_with = "no_color")]
    color: bool,

    /// Disable colored output
    #[arg(long, global = true, conflicts_with = "color")]
    no_color: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Output verbosity options
#[derive(Debug, Clone, Copy)]
pub struct OutputOptions {
    /// Whether to show informational output (success messages, summaries)
    pub show_info: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Load and validate the configuration
    Check {
        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,
    },

    /// Print the effective configuration for files
    ///
    /// Directories are walked recursively; globally ignored files are skipped.
    Resolve {
        /// Files or directories to resolve
        #[arg(required = true, value_name = "PATH")]
        paths: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,

        /// List every block in order with whether it applied
        #[arg(long)]
        explain: bool,
    },

    /// List registered plugins with their rules, presets and parsers
    Rules {
        /// Only show this plugin
        #[arg(long, value_name = "ID")]
        plugin: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output with colors
    Human,
    /// JSON output for tooling
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing();
    configure_colors(cli.color, cli.no_color);

    let output_opts = OutputOptions {
        show_info: !cli.quiet,
    };
    let sources = commands::ConfigSources {
        config: cli.config,
        plugin_manifests: cli.plugin_manifests,
    };

    match cli.command {
        Commands::Check { format } => commands::check::run(&sources, format, output_opts),
        Commands::Resolve {
            paths,
            format,
            explain,
        } => commands::resolve::run(&sources, &paths, format, explain, output_opts),
        Commands::Rules { plugin, format } => {
            commands::rules::run(&sources, plugin.as_deref(), format)
        }
    }
}

/// Tracing is off unless `RUST_LOG` asks for it; events go to stderr so
/// JSON output on stdout stays clean.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("off")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Flags win over the environment. Without either, `NO_COLOR` disables
/// colors, `CLICOLOR_FORCE` (non-empty, non-zero) forces them and
/// `CLICOLOR=0` disables them; otherwise `colored` decides from the TTY.
///
/// See: <https://no-color.org/> and <https://bixense.com/clicolors/>
fn configure_colors(force_color: bool, no_color: bool) {
    use colored::control;

    let env_override = || {
        if std::env::var_os("NO_COLOR").is_some() {
            return Some(false);
        }
        if let Ok(val) = std::env::var("CLICOLOR_FORCE") {
            return (!val.is_empty() && val != "0").then_some(true);
        }
        (std::env::var("CLICOLOR").as_deref() == Ok("0")).then_some(false)
    };

    let choice = if force_color {
        Some(true)
    } else if no_color {
        Some(false)
    } else {
        env_override()
    };

    if let Some(enabled) = choice {
        control::set_override(enabled);
    }
}

#[cfg(test)]
mod color_tests {
    use super::configure_colors;
    use colored::control::{self, SHOULD_COLORIZE};
    use std::sync::Mutex;

    // Env vars and the color override are process-global.
    static TEST_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: [&str; 3] = ["NO_COLOR", "CLICOLOR", "CLICOLOR_FORCE"];

    fn with_env<F: FnOnce()>(vars: &[(&str, &str)], f: F) {
        let _lock = TEST_MUTEX.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let saved: Vec<_> = VARS.iter().map(|var| (*var, std::env::var_os(var))).collect();
        for var in VARS {
            std::env::remove_var(var);
        }
        for (var, value) in vars {
            std::env::set_var(var, value);
        }
        control::unset_override();

        f();

        control::unset_override();
        for (var, value) in saved {
            match value {
                Some(value) => std::env::set_var(var, value),
                None => std::env::remove_var(var),
            }
        }
    }

    #[test]
    fn flags_override_environment() {
        with_env(&[("NO_COLOR", "1")], || {
            configure_colors(true, false);
            assert!(SHOULD_COLORIZE.should_colorize());
        });
        with_env(&[("CLICOLOR_FORCE", "1")], || {
            configure_colors(false, true);
            assert!(!SHOULD_COLORIZE.should_colorize());
        });
    }

    #[test]
    fn no_color_presence_disables() {
        with_env(&[("NO_COLOR", "")], || {
            configure_colors(false, false);
            assert!(!SHOULD_COLORIZE.should_colorize());
        });
    }

    #[test]
    fn no_color_beats_clicolor_force() {
        with_env(&[("NO_COLOR", "1"), ("CLICOLOR_FORCE", "1")], || {
            configure_colors(false, false);
            assert!(!SHOULD_COLORIZE.should_colorize());
        });
    }

    #[test]
    fn clicolor_force_enables() {
        with_env(&[("CLICOLOR_FORCE", "1")], || {
            configure_colors(false, false);
            assert!(SHOULD_COLORIZE.should_colorize());
        });
    }

    #[test]
    fn clicolor_zero_disables() {
        with_env(&[("CLICOLOR", "0")], || {
            configure_colors(false, false);
            assert!(!SHOULD_COLORIZE.should_colorize());
        });
    }
}
