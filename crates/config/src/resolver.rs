//! Per-file resolution: a single ordered fold over the matching blocks.

use crate::block::{LanguageOptions, LinterOptions, RuleEntry};
use crate::config_set::{ConfigBlock, ConfigSet};
use crate::error::{ConfigError, Result};
use crate::merge::{deep_merge, merge_rules};
use crate::plugin::PluginHandle;
use flatconf_types::{RuleId, RuleSeverity};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;

/// The fully merged configuration applicable to one file.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveConfig {
    pub language_options: LanguageOptions,
    pub linter_options: LinterOptions,
    pub plugins: BTreeMap<String, PluginHandle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processor: Option<String>,
    pub settings: Map<String, Value>,
    pub rules: BTreeMap<String, RuleEntry>,
    /// Labels of the blocks that applied, in order.
    pub matched_blocks: Vec<String>,
}

impl EffectiveConfig {
    /// True when no block applied to the file.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matched_blocks.is_empty()
    }

    #[must_use]
    pub fn parser(&self) -> Option<&str> {
        self.language_options.parser.as_deref()
    }

    #[must_use]
    pub const fn parser_options(&self) -> &Map<String, Value> {
        &self.language_options.parser_options
    }

    /// Effective severity; rules never configured are off.
    #[must_use]
    pub fn severity(&self, rule: &str) -> RuleSeverity {
        self.rules
            .get(rule)
            .map_or(RuleSeverity::Off, |entry| entry.severity)
    }

    #[must_use]
    pub fn is_enabled(&self, rule: &str) -> bool {
        self.severity(rule).is_enabled()
    }

    #[must_use]
    pub fn rule_options(&self, rule: &str) -> &[Value] {
        self.rules.get(rule).map_or(&[][..], RuleEntry::options)
    }

    /// Rules at `warn` or `error`, sorted by name.
    pub fn enabled_rules(&self) -> impl Iterator<Item = (&str, &RuleEntry)> {
        self.rules
            .iter()
            .filter(|(_, entry)| entry.severity.is_enabled())
            .map(|(name, entry)| (name.as_str(), entry))
    }

    fn apply(&mut self, block: &ConfigBlock) {
        self.language_options.merge_from(block.language_options());
        self.linter_options.merge_from(block.linter_options());
        self.plugins.extend(
            block
                .plugins()
                .iter()
                .map(|(name, handle)| (name.clone(), handle.clone())),
        );
        if let Some(processor) = block.processor() {
            self.processor = Some(processor.to_string());
        }
        deep_merge(&mut self.settings, block.settings());
        merge_rules(&mut self.rules, block.rules());
        self.matched_blocks.push(block.label().to_string());
    }
}

/// Resolve the effective configuration of `path` against `config`.
///
/// Pure: the config set is only read. Globally ignored files and files no
/// block matches get the empty configuration. Fails when a configured rule
/// belongs to a plugin that is not bound for this file.
pub fn resolve(config: &ConfigSet, path: impl AsRef<Path>) -> Result<EffectiveConfig> {
    let relative = config.relative_path(path.as_ref());
    let mut effective = EffectiveConfig::default();

    if config.is_ignored_relative(&relative) {
        return Ok(effective);
    }

    for block in config.matching_blocks(&relative) {
        effective.apply(block);
    }

    check_rule_plugins(&effective, &relative)?;

    tracing::trace!(
        path = %relative,
        blocks = effective.matched_blocks.len(),
        rules = effective.rules.len(),
        "resolved"
    );
    Ok(effective)
}

fn check_rule_plugins(effective: &EffectiveConfig, path: &str) -> Result<()> {
    for rule in effective.rules.keys() {
        if let Some(plugin) = RuleId::parse(rule).plugin() {
            if !effective.plugins.contains_key(plugin) {
                return Err(ConfigError::UnboundPlugin {
                    rule: rule.clone(),
                    plugin: plugin.to_string(),
                    path: path.to_string(),
                });
            }
        }
    }
    Ok(())
}
