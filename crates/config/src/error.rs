use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file {}: {message}", .path.display())]
    Invalid { path: PathBuf, message: String },

    #[error("Unsupported config file format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("Config contains no blocks")]
    Empty,

    #[error("{0}")]
    Integrity(IntegrityReport),

    #[error("Rule '{rule}' needs plugin '{plugin}', which is not bound for {path}")]
    UnboundPlugin {
        rule: String,
        plugin: String,
        path: String,
    },
}

impl ConfigError {
    /// The integrity report, if this is a configuration-integrity failure.
    #[must_use]
    pub const fn integrity(&self) -> Option<&IntegrityReport> {
        match self {
            Self::Integrity(report) => Some(report),
            _ => None,
        }
    }
}

/// A single configuration-integrity problem found while building a config set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Problem {
    #[error("plugin '{name}' refers to unknown plugin id '{id}'")]
    UnknownPlugin { name: String, id: String },

    #[error("plugin '{name}' is already bound to '{existing}' and cannot be redefined as '{id}'")]
    PluginRedefined {
        name: String,
        existing: String,
        id: String,
    },

    #[error("unknown parser '{0}'")]
    UnknownParser(String),

    #[error("invalid parser option '{option}': {message}")]
    InvalidParserOption { option: String, message: String },

    #[error("rule '{rule}' needs plugin '{plugin}', which no block binds")]
    UnboundRulePlugin { rule: String, plugin: String },

    #[error("unknown rule '{rule}'{}", suggestion_suffix(.suggestion.as_deref()))]
    UnknownRule {
        rule: String,
        suggestion: Option<String>,
    },

    #[error("unknown processor '{0}'")]
    UnknownProcessor(String),

    #[error("plugin '{plugin}' has no preset named '{preset}'")]
    UnknownPreset { plugin: String, preset: String },

    #[error("preset '{preset}' refers to unknown plugin id '{plugin}'")]
    UnknownPresetPlugin { plugin: String, preset: String },

    #[error("invalid glob pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
}

fn suggestion_suffix(suggestion: Option<&str>) -> String {
    suggestion.map_or_else(String::new, |s| format!(" (did you mean '{s}'?)"))
}

/// Problems found in one block, reported together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockProblems {
    /// Position of the block once presets are spliced in. Names are not
    /// unique, so problems are grouped by this.
    pub index: usize,
    /// Display label: the block's name or its positional label.
    pub block: String,
    pub problems: Vec<Problem>,
}

/// Every offending block of a config set, each listed once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntegrityReport {
    blocks: Vec<BlockProblems>,
}

impl IntegrityReport {
    pub(crate) fn push(&mut self, index: usize, block: &str, problem: Problem) {
        match self.blocks.iter_mut().find(|b| b.index == index) {
            Some(entry) => entry.problems.push(problem),
            None => self.blocks.push(BlockProblems {
                index,
                block: block.to_string(),
                problems: vec![problem],
            }),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    #[must_use]
    pub fn blocks(&self) -> &[BlockProblems] {
        &self.blocks
    }

    /// All problems, flattened in block order.
    pub fn problems(&self) -> impl Iterator<Item = &Problem> {
        self.blocks.iter().flat_map(|b| b.problems.iter())
    }
}

impl std::fmt::Display for IntegrityReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.blocks.len();
        write!(
            f,
            "{count} configuration block{} with problems",
            if count == 1 { "" } else { "s" }
        )?;
        for block in &self.blocks {
            write!(f, "\n  {}:", block.block)?;
            for problem in &block.problems {
                write!(f, "\n    - {problem}")?;
            }
        }
        Ok(())
    }
}
