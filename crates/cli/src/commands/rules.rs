//! `flatconf rules`: list what the registered plugins provide.

use crate::commands::common::{fail, load_registry};
use crate::commands::ConfigSources;
use crate::OutputFormat;
use anyhow::{anyhow, Result};
use colored::Colorize;
use flatconf_config::{PluginHandle, PluginRegistry};

pub fn run(sources: &ConfigSources, plugin: Option<&str>, format: OutputFormat) -> Result<()> {
    let registry =
        load_registry(&sources.plugin_manifests).unwrap_or_else(|err| fail(&err, format));
    let plugins = select(&registry, plugin).unwrap_or_else(|err| fail(&err, format));

    match format {
        OutputFormat::Human => {
            for handle in &plugins {
                print_plugin(handle, is_core(&registry, handle));
            }
        }
        OutputFormat::Json => {
            let json: Vec<_> = plugins
                .iter()
                .map(|handle| plugin_json(handle, is_core(&registry, handle)))
                .collect();
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
    }
    Ok(())
}

/// Every plugin, or the one asked for by id.
fn select<'a>(registry: &'a PluginRegistry, id: Option<&str>) -> Result<Vec<&'a PluginHandle>> {
    match id {
        None => Ok(registry.plugins().collect()),
        Some(id) => registry.get(id).map(|handle| vec![handle]).ok_or_else(|| {
            let known: Vec<_> = registry.plugins().map(|handle| handle.id()).collect();
            anyhow!("Unknown plugin '{id}'. Registered plugins: {}", known.join(", "))
        }),
    }
}

fn is_core(registry: &PluginRegistry, handle: &PluginHandle) -> bool {
    registry.core() == Some(handle)
}

fn print_plugin(handle: &PluginHandle, core: bool) {
    let marker = if core { " (core)" } else { "" };
    println!("\n{}{}", handle.id().bold(), marker.dimmed());

    if !handle.parsers().is_empty() {
        println!("  {}: {}", "parsers".cyan(), handle.parsers().join(", "));
    }
    if !handle.processors().is_empty() {
        println!("  {}: {}", "processors".cyan(), handle.processors().join(", "));
    }
    let presets = handle.preset_names();
    if !presets.is_empty() {
        println!("  {}: {}", "presets".cyan(), presets.join(", "));
    }

    println!("  {} ({})", "rules".cyan(), handle.rules().len());
    for rule in handle.rules() {
        let recommended = if rule.recommended { "✓" } else { " " };
        if rule.description.is_empty() {
            println!("    {} {}", recommended.green(), rule.name);
        } else {
            println!(
                "    {} {} {}",
                recommended.green(),
                rule.name,
                rule.description.dimmed()
            );
        }
    }
}

fn plugin_json(handle: &PluginHandle, core: bool) -> serde_json::Value {
    serde_json::json!({
        "id": handle.id(),
        "core": core,
        "parsers": handle.parsers(),
        "processors": handle.processors(),
        "presets": handle.preset_names(),
        "rules": handle.rules(),
    })
}
