//! `flatconf resolve`: print the effective configuration for files.
//!
//! Directories are walked recursively; globally ignored directories are not
//! entered and ignored files are skipped.
//! Files are resolved in parallel against the shared, immutable config set;
//! output keeps the order the files were found in.

use crate::commands::common::{fail, CommandContext};
use crate::commands::ConfigSources;
use crate::{ExitCode, OutputFormat, OutputOptions};
use anyhow::{Context, Result};
use colored::Colorize;
use flatconf_config::{ConfigError, ConfigSet, EffectiveConfig, Explanation, RuleSeverity};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Outcome of resolving one file.
struct FileOutput {
    path: String,
    result: Result<Option<EffectiveConfig>, ConfigError>,
    explanation: Option<Explanation>,
}

#[tracing::instrument(skip_all, fields(paths = paths.len(), explain = explain))]
pub fn run(
    sources: &ConfigSources,
    paths: &[PathBuf],
    format: OutputFormat,
    explain: bool,
    output_opts: OutputOptions,
) -> Result<()> {
    let ctx = CommandContext::load(sources).unwrap_or_else(|err| fail(&err, format));

    let files = collect_files(&ctx.config, paths).unwrap_or_else(|err| fail(&err, format));
    tracing::debug!(files = files.len(), "resolving files");

    let outputs = resolve_all(&ctx.config, &files, explain);
    let failures = outputs.iter().filter(|output| output.result.is_err()).count();

    match format {
        OutputFormat::Human => {
            for output in &outputs {
                print_human(output);
            }
            if output_opts.show_info {
                println!();
                print_summary(outputs.len(), failures);
            }
        }
        OutputFormat::Json => {
            let files: Vec<_> = outputs.iter().map(to_json).collect();
            println!("{}", serde_json::to_string_pretty(&files)?);
        }
    }

    if failures > 0 {
        ExitCode::ResolutionError.exit();
    }
    Ok(())
}

/// Expand the command-line paths into files. Files named explicitly are
/// kept even when ignored so their status can be reported; files found by
/// walking a directory are dropped when ignored, and ignored directories are
/// not descended into.
fn collect_files(config: &ConfigSet, paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        let path = std::fs::canonicalize(path)
            .map_err(ConfigError::Io)
            .with_context(|| format!("Cannot read {}", path.display()))?;

        if !path.is_dir() {
            files.push(path);
            continue;
        }

        for entry in walk(config, &path) {
            let entry = entry
                .map_err(|e| ConfigError::Io(e.into()))
                .with_context(|| format!("Failed to walk {}", path.display()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            if config.is_ignored(entry.path()) {
                tracing::trace!(path = %entry.path().display(), "skipping ignored file");
                continue;
            }
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Entries below `root` in file-name order, skipping ignored directories.
/// The root itself is always entered.
fn walk<'a>(
    config: &'a ConfigSet,
    root: &Path,
) -> impl Iterator<Item = walkdir::Result<DirEntry>> + 'a {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(move |entry| {
            if entry.depth() == 0 || !entry.file_type().is_dir() {
                return true;
            }
            let skip = config.is_ignored_dir(entry.path());
            if skip {
                tracing::trace!(path = %entry.path().display(), "skipping ignored directory");
            }
            !skip
        })
}

fn resolve_all(config: &ConfigSet, files: &[PathBuf], explain: bool) -> Vec<FileOutput> {
    files
        .par_iter()
        .map(|path| resolve_one(config, path, explain))
        .collect()
}

fn resolve_one(config: &ConfigSet, path: &Path, explain: bool) -> FileOutput {
    FileOutput {
        path: config.relative_path(path),
        result: config.resolve_file(path),
        explanation: explain.then(|| config.explain(path)),
    }
}

fn print_human(output: &FileOutput) {
    println!("\n{}", output.path.bold().underline());

    match &output.result {
        Err(err) => println!("  {} {err}", "error:".red().bold()),
        Ok(None) => println!("  {}", "ignored".dimmed()),
        Ok(Some(effective)) if effective.is_empty() => {
            println!("  {}", "no configuration block applies".dimmed());
        }
        Ok(Some(effective)) => print_effective(effective),
    }

    if let Some(explanation) = &output.explanation {
        println!("  {}", "blocks:".dimmed());
        for block in &explanation.blocks {
            if block.matched {
                println!("    {} {}", "✓".green(), block.label);
            } else {
                println!("    {} {}", "·".dimmed(), block.label.dimmed());
            }
        }
    }
}

fn print_effective(effective: &EffectiveConfig) {
    if let Some(parser) = effective.parser() {
        println!("  {}: {parser}", "parser".cyan());
    }
    if !effective.parser_options().is_empty() {
        println!(
            "  {}: {}",
            "parserOptions".cyan(),
            serde_json::Value::Object(effective.parser_options().clone())
        );
    }
    if let Some(processor) = &effective.processor {
        println!("  {}: {processor}", "processor".cyan());
    }
    if !effective.plugins.is_empty() {
        let plugins: Vec<_> = effective
            .plugins
            .iter()
            .map(|(name, plugin)| format!("{name} ({})", plugin.id()))
            .collect();
        println!("  {}: {}", "plugins".cyan(), plugins.join(", "));
    }
    if !effective.settings.is_empty() {
        println!(
            "  {}: {}",
            "settings".cyan(),
            serde_json::Value::Object(effective.settings.clone())
        );
    }

    let disabled = effective.rules.len() - effective.enabled_rules().count();
    println!(
        "  {} {}",
        "rules".cyan(),
        format!("({disabled} off)").dimmed()
    );
    for (name, entry) in effective.enabled_rules() {
        let severity = match entry.severity {
            RuleSeverity::Error => "error".red(),
            RuleSeverity::Warn => "warn ".yellow(),
            RuleSeverity::Off => "off  ".dimmed(),
        };
        if entry.options().is_empty() {
            println!("    {severity} {name}");
        } else {
            let options = serde_json::Value::Array(entry.options().to_vec());
            println!("    {severity} {name} {}", options.to_string().dimmed());
        }
    }
}

fn print_summary(total: usize, failures: usize) {
    if failures == 0 {
        println!("{}", format!("✓ Resolved {total} file(s)").green().bold());
    } else {
        println!(
            "{}",
            format!("✗ {failures} of {total} file(s) failed to resolve").red()
        );
    }
}

fn to_json(output: &FileOutput) -> serde_json::Value {
    let mut value = match &output.result {
        Ok(Some(effective)) => serde_json::json!({
            "file": output.path,
            "ignored": false,
            "config": effective,
        }),
        Ok(None) => serde_json::json!({
            "file": output.path,
            "ignored": true,
            "config": null,
        }),
        Err(err) => serde_json::json!({
            "file": output.path,
            "ignored": false,
            "error": err.to_string(),
        }),
    };
    if let Some(explanation) = &output.explanation {
        value["explanation"] = serde_json::json!(explanation);
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use flatconf_config::load_config_from_str;
    use flatconf_plugins::builtin_registry;
    use std::fs;
    use tempfile::TempDir;

    const CONFIG: &str = r"
- name: app
  files: ['src/**/*.ts']
  rules:
    no-console: [warn, { allow: [error] }]
- name: tests
  files: ['src/**/*.test.ts']
  rules:
    no-console: off
- ignores: ['dist/']
";

    fn project() -> (TempDir, ConfigSet) {
        let dir = TempDir::new().unwrap();
        let root = fs::canonicalize(dir.path()).unwrap();
        for file in [
            "src/main.ts",
            "src/main.test.ts",
            "dist/main.js",
            "node_modules/pkg/index.js",
        ] {
            let path = root.join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, "").unwrap();
        }

        let entries = load_config_from_str(CONFIG, Path::new("flatconf.config.yaml")).unwrap();
        let set = ConfigSet::build(entries, &builtin_registry())
            .unwrap()
            .with_base_dir(root);
        (dir, set)
    }

    #[test]
    fn walking_skips_ignored_files() {
        let (dir, set) = project();
        let files = collect_files(&set, &[dir.path().to_path_buf()]).unwrap();
        let relative: Vec<_> = files.iter().map(|f| set.relative_path(f)).collect();
        assert_eq!(relative, vec!["src/main.test.ts", "src/main.ts"]);
    }

    #[test]
    fn walking_never_enters_ignored_directories() {
        let (dir, set) = project();
        let root = fs::canonicalize(dir.path()).unwrap();
        let visited: Vec<_> = walk(&set, &root)
            .map(|entry| set.relative_path(entry.unwrap().path()))
            .collect();

        assert_eq!(
            visited,
            vec!["", "src", "src/main.test.ts", "src/main.ts"]
        );
    }

    #[test]
    fn explicit_files_are_kept_even_when_ignored() {
        let (dir, set) = project();
        let files = collect_files(&set, &[dir.path().join("dist/main.js")]).unwrap();
        assert_eq!(files.len(), 1);

        let output = resolve_one(&set, &files[0], false);
        assert_eq!(output.path, "dist/main.js");
        assert!(matches!(output.result, Ok(None)));
        assert_eq!(to_json(&output)["ignored"], true);
    }

    #[test]
    fn missing_paths_are_io_errors() {
        let (dir, set) = project();
        let err = collect_files(&set, &[dir.path().join("nope.ts")]).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::Io(_))
        ));
    }

    #[test]
    fn parallel_resolution_keeps_file_order() {
        let (dir, set) = project();
        let files = collect_files(&set, &[dir.path().join("src")]).unwrap();
        let outputs = resolve_all(&set, &files, true);

        assert_eq!(outputs[0].path, "src/main.test.ts");
        let test_file = outputs[0].result.as_ref().unwrap().as_ref().unwrap();
        assert_eq!(test_file.severity("no-console"), RuleSeverity::Off);
        assert_eq!(test_file.rule_options("no-console").len(), 1);

        let main = outputs[1].result.as_ref().unwrap().as_ref().unwrap();
        assert_eq!(main.severity("no-console"), RuleSeverity::Warn);
        assert_eq!(main.matched_blocks, vec!["app"]);

        let explanation = outputs[1].explanation.as_ref().unwrap();
        let matched: Vec<_> = explanation.blocks.iter().map(|b| b.matched).collect();
        assert_eq!(matched, vec![true, false]);
    }

    #[test]
    fn json_output_carries_config_and_explanation() {
        let (dir, set) = project();
        let root = fs::canonicalize(dir.path()).unwrap();
        let output = resolve_one(&set, &root.join("src/main.ts"), true);
        let json = to_json(&output);

        assert_eq!(json["file"], "src/main.ts");
        assert_eq!(json["config"]["rules"]["no-console"][0], "warn");
        assert_eq!(json["explanation"]["blocks"][0]["label"], "app");
    }
}
