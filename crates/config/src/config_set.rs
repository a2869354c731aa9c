//! Building and querying a validated, immutable [`ConfigSet`].

use crate::block::{
    EcmaVersion, LanguageOptions, LinterOptions, PresetRef, RawConfigBlock, RawConfigEntry,
    RuleEntry, SourceType,
};
use crate::error::{ConfigError, IntegrityReport, Problem, Result};
use crate::pattern::{normalize_path, FileMatcher, PatternSet};
use crate::plugin::{suggest_rule, PluginHandle, PluginRegistry};
use crate::resolver::{self, EffectiveConfig};
use flatconf_types::RuleId;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Files ignored by every config set, ahead of any user ignores.
pub const DEFAULT_IGNORES: &[&str] = &["**/node_modules/", ".git/"];

/// A compiled configuration block.
#[derive(Debug, Clone)]
pub struct ConfigBlock {
    label: String,
    files: FileMatcher,
    ignores: Option<PatternSet>,
    language_options: LanguageOptions,
    linter_options: LinterOptions,
    plugins: BTreeMap<String, PluginHandle>,
    processor: Option<String>,
    settings: Map<String, Value>,
    rules: BTreeMap<String, RuleEntry>,
}

impl ConfigBlock {
    /// The block's `name`, or a positional label such as `config[2]`.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub const fn files(&self) -> &FileMatcher {
        &self.files
    }

    #[must_use]
    pub const fn ignores(&self) -> Option<&PatternSet> {
        self.ignores.as_ref()
    }

    #[must_use]
    pub const fn language_options(&self) -> &LanguageOptions {
        &self.language_options
    }

    #[must_use]
    pub const fn linter_options(&self) -> &LinterOptions {
        &self.linter_options
    }

    #[must_use]
    pub const fn plugins(&self) -> &BTreeMap<String, PluginHandle> {
        &self.plugins
    }

    #[must_use]
    pub fn processor(&self) -> Option<&str> {
        self.processor.as_deref()
    }

    #[must_use]
    pub const fn settings(&self) -> &Map<String, Value> {
        &self.settings
    }

    #[must_use]
    pub const fn rules(&self) -> &BTreeMap<String, RuleEntry> {
        &self.rules
    }

    /// Whether this block applies to a normalized, base-relative path.
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        self.files.matches(path) && !self.ignores.as_ref().is_some_and(|set| set.matches(path))
    }
}

/// Which blocks apply to one file, for `--explain` style output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Explanation {
    pub path: String,
    pub ignored: bool,
    pub blocks: Vec<BlockMatch>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockMatch {
    pub label: String,
    pub matched: bool,
}

/// An ordered, validated sequence of configuration blocks.
///
/// Built once per run and never mutated afterwards; it is shared by
/// reference between threads resolving different files.
#[derive(Debug, Clone)]
pub struct ConfigSet {
    base_dir: Option<PathBuf>,
    blocks: Vec<ConfigBlock>,
    global_ignores: PatternSet,
}

impl ConfigSet {
    /// Splice presets, compile patterns and validate every block.
    ///
    /// All integrity problems are collected before failing, so the error
    /// lists each offending block once.
    #[tracing::instrument(skip_all, fields(entries = entries.len()))]
    pub fn build(entries: Vec<RawConfigEntry>, registry: &PluginRegistry) -> Result<Self> {
        if entries.is_empty() {
            return Err(ConfigError::Empty);
        }

        let mut report = IntegrityReport::default();
        let raw_blocks = splice_presets(entries, registry, &mut report);
        let bindings = collect_bindings(&raw_blocks, registry, &mut report);

        let mut global_ignores = PatternSet::compile(DEFAULT_IGNORES).unwrap_or_default();
        let mut blocks = Vec::with_capacity(raw_blocks.len());

        for (index, label, raw) in raw_blocks {
            if raw.is_global_ignore() {
                let sources = raw.ignores.unwrap_or_default();
                match PatternSet::compile(&sources) {
                    Ok(set) => {
                        tracing::debug!(block = %label, patterns = ?sources, "global ignores");
                        global_ignores.extend(set);
                    }
                    Err(problems) => {
                        for problem in problems {
                            report.push(index, &label, problem);
                        }
                    }
                }
                continue;
            }

            let validator = BlockValidator {
                index,
                label: &label,
                registry,
                bindings: &bindings,
                report: &mut report,
            };
            if let Some(block) = validator.compile(raw) {
                blocks.push(block);
            }
        }

        if !report.is_empty() {
            tracing::debug!(blocks = report.blocks().len(), "configuration has problems");
            return Err(ConfigError::Integrity(report));
        }

        tracing::debug!(blocks = blocks.len(), "built config set");
        Ok(Self {
            base_dir: None,
            blocks,
            global_ignores,
        })
    }

    /// Directory that patterns are relative to. Absolute file paths under it
    /// are made relative before matching.
    #[must_use]
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(base_dir.into());
        self
    }

    #[must_use]
    pub fn base_dir(&self) -> Option<&Path> {
        self.base_dir.as_deref()
    }

    #[must_use]
    pub fn blocks(&self) -> &[ConfigBlock] {
        &self.blocks
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Default ignores followed by every global-ignore block, in order.
    #[must_use]
    pub const fn global_ignores(&self) -> &PatternSet {
        &self.global_ignores
    }

    /// Normalized, base-relative form of `path` used for matching.
    #[must_use]
    pub fn relative_path(&self, path: &Path) -> String {
        normalize_path(path, self.base_dir())
    }

    /// Whether a global ignore excludes the file (or a directory above it).
    /// Files outside the base directory are always ignored.
    #[must_use]
    pub fn is_ignored(&self, path: impl AsRef<Path>) -> bool {
        self.is_ignored_relative(&self.relative_path(path.as_ref()))
    }

    pub(crate) fn is_ignored_relative(&self, relative: &str) -> bool {
        self.is_outside_base(relative) || self.global_ignores.matches_path_or_ancestor(relative)
    }

    /// Whether a walk can skip the directory at `path` entirely.
    #[must_use]
    pub fn is_ignored_dir(&self, path: impl AsRef<Path>) -> bool {
        let relative = self.relative_path(path.as_ref());
        self.is_outside_base(&relative) || self.global_ignores.excludes_directory(&relative)
    }

    /// Normalized paths that could not be made relative to the base directory
    /// stay absolute or climb above it with `..`.
    fn is_outside_base(&self, relative: &str) -> bool {
        self.base_dir.is_some()
            && (Path::new(relative).has_root()
                || relative == ".."
                || relative.starts_with("../"))
    }

    /// Blocks applying to a normalized path, in declaration order.
    pub fn matching_blocks<'a>(&'a self, relative: &'a str) -> impl Iterator<Item = &'a ConfigBlock> {
        self.blocks.iter().filter(move |block| block.matches(relative))
    }

    /// Every block with whether it applies to `path`.
    #[must_use]
    pub fn explain(&self, path: impl AsRef<Path>) -> Explanation {
        let relative = self.relative_path(path.as_ref());
        let ignored = self.is_ignored_relative(&relative);
        let blocks = self
            .blocks
            .iter()
            .map(|block| BlockMatch {
                label: block.label.clone(),
                matched: !ignored && block.matches(&relative),
            })
            .collect();
        Explanation {
            path: relative,
            ignored,
            blocks,
        }
    }

    /// Effective configuration for a file. Globally ignored files get the
    /// empty configuration.
    pub fn resolve(&self, path: impl AsRef<Path>) -> Result<EffectiveConfig> {
        resolver::resolve(self, path)
    }

    /// Like [`resolve`](Self::resolve), but `None` for globally ignored files.
    pub fn resolve_file(&self, path: impl AsRef<Path>) -> Result<Option<EffectiveConfig>> {
        let path = path.as_ref();
        if self.is_ignored(path) {
            tracing::trace!(path = %path.display(), "ignored");
            return Ok(None);
        }
        resolver::resolve(self, path).map(Some)
    }
}

/// A spliced block with its report slot and display label.
type SlottedBlock = (usize, String, RawConfigBlock);

/// Replace every preset reference with the plugin's blocks, labelling each
/// block for diagnostics.
///
/// Every block, and every preset reference that failed to splice, gets its
/// own slot so the report never merges two blocks sharing a name.
fn splice_presets(
    entries: Vec<RawConfigEntry>,
    registry: &PluginRegistry,
    report: &mut IntegrityReport,
) -> Vec<SlottedBlock> {
    let mut blocks = Vec::with_capacity(entries.len());
    let mut slot = 0;

    for (index, entry) in entries.into_iter().enumerate() {
        match entry {
            RawConfigEntry::Block(block) => {
                let label = block
                    .name
                    .clone()
                    .unwrap_or_else(|| format!("config[{index}]"));
                blocks.push((slot, label, block));
                slot += 1;
            }
            RawConfigEntry::Preset(PresetRef { plugin, preset }) => {
                let label = format!("config[{index}]");
                let Some(handle) = registry.get(&plugin) else {
                    report.push(slot, &label, Problem::UnknownPresetPlugin { plugin, preset });
                    slot += 1;
                    continue;
                };
                let Some(preset_blocks) = handle.preset(&preset) else {
                    report.push(slot, &label, Problem::UnknownPreset { plugin, preset });
                    slot += 1;
                    continue;
                };
                tracing::debug!(
                    %plugin,
                    %preset,
                    blocks = preset_blocks.len(),
                    "spliced preset"
                );
                for (offset, block) in preset_blocks.into_iter().enumerate() {
                    let label = block
                        .name
                        .clone()
                        .unwrap_or_else(|| format!("{plugin} {preset}[{offset}]"));
                    blocks.push((slot, label, block));
                    slot += 1;
                }
            }
        }
    }

    blocks
}

/// Short name bindings across the whole set, used to validate rule prefixes
/// at load time. Rebinding a name to a different plugin is reported.
fn collect_bindings(
    blocks: &[SlottedBlock],
    registry: &PluginRegistry,
    report: &mut IntegrityReport,
) -> BTreeMap<String, PluginHandle> {
    let mut bindings: BTreeMap<String, PluginHandle> = BTreeMap::new();

    for (index, label, block) in blocks {
        for (name, id) in &block.plugins {
            let Some(handle) = registry.get(id) else {
                continue;
            };
            match bindings.get(name) {
                Some(existing) if existing != handle => report.push(
                    *index,
                    label,
                    Problem::PluginRedefined {
                        name: name.clone(),
                        existing: existing.id().to_string(),
                        id: id.clone(),
                    },
                ),
                Some(_) => {}
                None => {
                    bindings.insert(name.clone(), handle.clone());
                }
            }
        }
    }

    bindings
}

struct BlockValidator<'a> {
    index: usize,
    label: &'a str,
    registry: &'a PluginRegistry,
    bindings: &'a BTreeMap<String, PluginHandle>,
    report: &'a mut IntegrityReport,
}

impl BlockValidator<'_> {
    /// Compile one block, returning `None` if it has problems.
    fn compile(mut self, raw: RawConfigBlock) -> Option<ConfigBlock> {
        let before = self.report.problems().count();

        let files = self.compile_files(raw.files.as_deref());
        let ignores = raw
            .ignores
            .as_deref()
            .and_then(|sources| self.compile_patterns(sources));
        let plugins = self.resolve_plugins(&raw.plugins);
        self.check_parser(&raw.language_options);
        self.check_rules(&raw.rules);
        if let Some(processor) = &raw.processor {
            self.check_processor(processor);
        }

        if self.report.problems().count() > before {
            return None;
        }

        tracing::trace!(block = self.label, rules = raw.rules.len(), "compiled block");
        Some(ConfigBlock {
            label: self.label.to_string(),
            files,
            ignores,
            language_options: raw.language_options,
            linter_options: raw.linter_options,
            plugins,
            processor: raw.processor,
            settings: raw.settings,
            rules: raw.rules,
        })
    }

    fn problem(&mut self, problem: Problem) {
        self.report.push(self.index, self.label, problem);
    }

    fn compile_patterns(&mut self, sources: &[String]) -> Option<PatternSet> {
        match PatternSet::compile(sources) {
            Ok(set) => Some(set),
            Err(problems) => {
                for problem in problems {
                    self.problem(problem);
                }
                None
            }
        }
    }

    fn compile_files(&mut self, sources: Option<&[String]>) -> FileMatcher {
        let Some(sources) = sources else {
            return FileMatcher::All;
        };
        if sources.is_empty() {
            self.problem(Problem::InvalidPattern {
                pattern: String::new(),
                message: "`files` must list at least one pattern".to_string(),
            });
            return FileMatcher::All;
        }
        self.compile_patterns(sources)
            .map_or(FileMatcher::All, FileMatcher::Patterns)
    }

    fn resolve_plugins(&mut self, plugins: &BTreeMap<String, String>) -> BTreeMap<String, PluginHandle> {
        let mut resolved = BTreeMap::new();
        for (name, id) in plugins {
            match self.registry.get(id) {
                Some(handle) => {
                    resolved.insert(name.clone(), handle.clone());
                }
                None => self.problem(Problem::UnknownPlugin {
                    name: name.clone(),
                    id: id.clone(),
                }),
            }
        }
        resolved
    }

    fn check_parser(&mut self, options: &LanguageOptions) {
        if let Some(parser) = &options.parser {
            if !self.registry.has_parser(parser) {
                self.problem(Problem::UnknownParser(parser.clone()));
            }
        }

        let parser_options = &options.parser_options;
        if let Some(Value::String(parser)) = parser_options.get("parser") {
            if !self.registry.has_parser(parser) {
                self.problem(Problem::UnknownParser(parser.clone()));
            }
        }
        if let Some(value) = parser_options.get("ecmaVersion") {
            if EcmaVersion::from_json(value).is_none() {
                self.problem(Problem::InvalidParserOption {
                    option: "ecmaVersion".to_string(),
                    message: format!("expected a version number or \"latest\", got {value}"),
                });
            }
        }
        if let Some(value) = parser_options.get("sourceType") {
            if SourceType::from_json(value).is_none() {
                self.problem(Problem::InvalidParserOption {
                    option: "sourceType".to_string(),
                    message: format!("expected \"script\", \"module\" or \"commonjs\", got {value}"),
                });
            }
        }
    }

    fn check_rules(&mut self, rules: &BTreeMap<String, RuleEntry>) {
        for name in rules.keys() {
            let id = RuleId::parse(name);
            match id.plugin() {
                None => {
                    let known = self
                        .registry
                        .core()
                        .is_some_and(|core| core.has_rule(id.name()));
                    if !known {
                        let suggestion = self
                            .registry
                            .core()
                            .and_then(|core| suggest_rule(&**core, id.name()));
                        self.problem(Problem::UnknownRule {
                            rule: name.clone(),
                            suggestion,
                        });
                    }
                }
                Some(prefix) => {
                    let Some(plugin) = self.bindings.get(prefix) else {
                        self.problem(Problem::UnboundRulePlugin {
                            rule: name.clone(),
                            plugin: prefix.to_string(),
                        });
                        continue;
                    };
                    if !plugin.has_rule(id.name()) {
                        let suggestion = suggest_rule(&**plugin, id.name())
                            .map(|rule| format!("{prefix}/{rule}"));
                        self.problem(Problem::UnknownRule {
                            rule: name.clone(),
                            suggestion,
                        });
                    }
                }
            }
        }
    }

    fn check_processor(&mut self, processor: &str) {
        let known = processor
            .rsplit_once('/')
            .and_then(|(prefix, name)| {
                self.bindings
                    .get(prefix)
                    .map(|plugin| plugin.processors().iter().any(|p| p == name))
            })
            .unwrap_or(false);
        if !known {
            self.problem(Problem::UnknownProcessor(processor.to_string()));
        }
    }
}
