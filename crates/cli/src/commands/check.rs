//! `flatconf check`: load the configuration and report integrity problems.
//!
//! Every offending block is listed once with all of its problems, so a
//! broken configuration can be fixed in a single pass.

use crate::commands::common::{fail, CommandContext};
use crate::commands::ConfigSources;
use crate::{ExitCode, OutputFormat, OutputOptions};
use anyhow::Result;
use colored::Colorize;
use flatconf_config::{ConfigError, FileMatcher, IntegrityReport};

#[tracing::instrument(skip_all)]
pub fn run(sources: &ConfigSources, format: OutputFormat, output_opts: OutputOptions) -> Result<()> {
    let ctx = match CommandContext::load(sources) {
        Ok(ctx) => ctx,
        Err(err) => {
            if let Some(report) = err.downcast_ref::<ConfigError>().and_then(ConfigError::integrity)
            {
                print_report(report, format);
                ExitCode::ConfigError.exit();
            }
            fail(&err, format);
        }
    };

    match format {
        OutputFormat::Human => {
            if output_opts.show_info {
                print_summary(&ctx);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&summary_json(&ctx))?);
        }
    }
    Ok(())
}

fn print_summary(ctx: &CommandContext) {
    println!(
        "{} {}",
        "✓ Configuration is valid:".green(),
        ctx.config_path.display()
    );
    let config = &ctx.config;
    for block in config.blocks() {
        println!("  {} {}", block.label().bold(), describe_files(block.files()).dimmed());
    }
    let ignores: Vec<_> = config.global_ignores().sources().collect();
    println!("  {}: {}", "ignored".dimmed(), ignores.join(", ").dimmed());
    let plugins: Vec<_> = ctx.registry.plugins().map(|plugin| plugin.id()).collect();
    println!("  {}: {}", "plugins".dimmed(), plugins.join(", ").dimmed());
}

fn describe_files(files: &FileMatcher) -> String {
    match files {
        FileMatcher::All => "(all files)".to_string(),
        FileMatcher::Patterns(set) => set.sources().collect::<Vec<_>>().join(", "),
    }
}

fn summary_json(ctx: &CommandContext) -> serde_json::Value {
    let blocks: Vec<_> = ctx
        .config
        .blocks()
        .iter()
        .map(|block| {
            let files = match block.files() {
                FileMatcher::All => serde_json::Value::Null,
                FileMatcher::Patterns(set) => set.sources().collect::<Vec<_>>().into(),
            };
            serde_json::json!({
                "label": block.label(),
                "files": files,
                "rules": block.rules().len(),
            })
        })
        .collect();

    serde_json::json!({
        "success": true,
        "config": ctx.config_path,
        "blocks": blocks,
        "ignores": ctx.config.global_ignores().sources().collect::<Vec<_>>(),
        "plugins": ctx.registry.plugins().map(|plugin| plugin.id()).collect::<Vec<_>>(),
    })
}

fn print_report(report: &IntegrityReport, format: OutputFormat) {
    match format {
        OutputFormat::Human => {
            for block in report.blocks() {
                eprintln!("\n{} {}", "block".red().bold(), block.block.bold());
                for problem in &block.problems {
                    eprintln!("  {} {problem}", "error:".red());
                }
            }
            let count = report.blocks().len();
            eprintln!(
                "\n{}",
                format!("✗ Found problems in {count} configuration block(s)").red()
            );
        }
        OutputFormat::Json => {
            let blocks: Vec<_> = report
                .blocks()
                .iter()
                .map(|block| {
                    serde_json::json!({
                        "index": block.index,
                        "block": block.block,
                        "problems": block.problems.iter().map(ToString::to_string).collect::<Vec<_>>(),
                    })
                })
                .collect();
            println!(
                "{}",
                serde_json::json!({ "success": false, "blocks": blocks })
            );
        }
    }
}
