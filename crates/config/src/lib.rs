//! Ordered flat-config loading, validation and per-file resolution.
//!
//! A configuration is an ordered list of blocks. [`ConfigSet::build`]
//! splices plugin presets, compiles glob patterns and checks every plugin,
//! parser, processor and rule reference against a [`PluginRegistry`].
//! [`resolve`] then folds the blocks that match a file into its
//! [`EffectiveConfig`], later blocks winning key by key.

mod block;
mod config_set;
mod error;
mod loader;
mod merge;
mod pattern;
mod plugin;
mod resolver;

pub use block::{
    EcmaVersion, GlobalAccess, LanguageOptions, LinterOptions, PresetRef, RawConfigBlock,
    RawConfigEntry, RuleEntry, SourceType,
};
pub use config_set::{BlockMatch, ConfigBlock, ConfigSet, Explanation, DEFAULT_IGNORES};
pub use error::{BlockProblems, ConfigError, IntegrityReport, Problem, Result};
pub use loader::{find_config, load_config, load_config_from_str, LoadedConfig};
pub use merge::{deep_merge, merge_rules};
pub use pattern::{normalize_path, FileMatcher, FilePattern, PatternSet};
pub use plugin::{Plugin, PluginHandle, PluginRegistry, RuleMeta};
pub use resolver::{resolve, EffectiveConfig};

pub use flatconf_types::{RuleId, RuleSeverity};
