//! Merging of block fields into an accumulated configuration.
//!
//! The later value always takes precedence. Scalars are replaced when the
//! later block sets them; mappings are merged key by key.

use crate::block::{LanguageOptions, LinterOptions, RuleEntry};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

impl LanguageOptions {
    /// Merge a later block's language options into this one.
    pub fn merge_from(&mut self, later: &Self) {
        if later.ecma_version.is_some() {
            self.ecma_version = later.ecma_version;
        }
        if later.source_type.is_some() {
            self.source_type = later.source_type;
        }
        if let Some(parser) = &later.parser {
            self.parser = Some(parser.clone());
        }
        deep_merge(&mut self.parser_options, &later.parser_options);
        self.globals
            .extend(later.globals.iter().map(|(name, access)| (name.clone(), *access)));
    }
}

impl LinterOptions {
    pub fn merge_from(&mut self, later: &Self) {
        if later.no_inline_config.is_some() {
            self.no_inline_config = later.no_inline_config;
        }
        if later.report_unused_disable_directives.is_some() {
            self.report_unused_disable_directives = later.report_unused_disable_directives;
        }
    }
}

/// Merge rule entries. A severity-only entry keeps earlier options.
pub fn merge_rules(target: &mut BTreeMap<String, RuleEntry>, later: &BTreeMap<String, RuleEntry>) {
    for (name, entry) in later {
        target
            .entry(name.clone())
            .and_modify(|existing| existing.override_with(entry))
            .or_insert_with(|| entry.clone());
    }
}

/// Recursively merge `source` into `target`.
///
/// Objects are merged key by key at every level; any other value (including
/// arrays) replaces what was there.
pub fn deep_merge(target: &mut Map<String, Value>, source: &Map<String, Value>) {
    for (key, value) in source {
        if let (Some(Value::Object(existing)), Value::Object(incoming)) =
            (target.get_mut(key), value)
        {
            deep_merge(existing, incoming);
            continue;
        }
        target.insert(key.clone(), value.clone());
    }
}
