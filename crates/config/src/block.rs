//! The configuration file model, as written by users and plugin presets.
//!
//! These types are plain data: plugins are referenced by id, patterns are
//! still strings. [`ConfigSet::build`](crate::ConfigSet::build) turns them
//! into compiled, validated blocks.

use flatconf_types::RuleSeverity;
use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Configuration for a single rule.
///
/// Supports multiple formats:
/// ```yaml
/// # Simple severity (string or 0/1/2)
/// no-console: warn
///
/// # ESLint-style array: [severity, ...options]
/// "@typescript-eslint/no-unused-vars": [warn, { argsIgnorePattern: "^_" }]
///
/// # Object style
/// eqeqeq:
///   severity: error
///   options: always
/// ```
///
/// An entry that gives only a severity (`warn`, `[warn]`, or an object
/// without `options`) has `options == None`. When merged over an earlier
/// entry for the same rule it changes the severity and keeps the earlier
/// options.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleEntry {
    pub severity: RuleSeverity,
    pub options: Option<Vec<Value>>,
}

impl RuleEntry {
    #[must_use]
    pub const fn severity_only(severity: RuleSeverity) -> Self {
        Self {
            severity,
            options: None,
        }
    }

    #[must_use]
    pub fn with_options(severity: RuleSeverity, options: Vec<Value>) -> Self {
        Self {
            severity,
            options: Some(options),
        }
    }

    /// Options as a slice; empty when none were configured.
    #[must_use]
    pub fn options(&self) -> &[Value] {
        self.options.as_deref().unwrap_or_default()
    }

    /// Apply a later entry for the same rule on top of this one.
    pub fn override_with(&mut self, later: &Self) {
        self.severity = later.severity;
        if let Some(options) = &later.options {
            self.options = Some(options.clone());
        }
    }
}

impl From<RuleSeverity> for RuleEntry {
    fn from(severity: RuleSeverity) -> Self {
        Self::severity_only(severity)
    }
}

impl Serialize for RuleEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let options = self.options();
        if options.is_empty() {
            return serializer.serialize_str(self.severity.as_str());
        }
        let mut seq = serializer.serialize_seq(Some(options.len() + 1))?;
        seq.serialize_element(self.severity.as_str())?;
        for option in options {
            seq.serialize_element(option)?;
        }
        seq.end()
    }
}

struct SeverityVisitor;

impl Visitor<'_> for SeverityVisitor {
    type Value = RuleSeverity;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a severity ('off', 'warn', 'error', 0, 1 or 2)")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        value.parse().map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        RuleSeverity::from_level(value)
            .ok_or_else(|| E::custom(format!("unknown severity: {value}")))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        u64::try_from(value)
            .map_err(|_| E::custom(format!("unknown severity: {value}")))
            .and_then(|level| self.visit_u64(level))
    }
}

/// Newtype so a bare severity can be pulled out of a sequence or map.
struct SeverityValue(RuleSeverity);

impl<'de> Deserialize<'de> for SeverityValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(SeverityVisitor).map(Self)
    }
}

/// Custom deserializer for `RuleEntry` to handle ESLint-style array syntax
impl<'de> Deserialize<'de> for RuleEntry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RuleEntryVisitor;

        impl<'de> Visitor<'de> for RuleEntryVisitor {
            type Value = RuleEntry;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str(
                    "a severity ('off', 'warn', 'error', 0, 1, 2), \
                     an array [severity, ...options], \
                     or an object { severity, options }",
                )
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
                SeverityVisitor.visit_str(value).map(RuleEntry::severity_only)
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
                SeverityVisitor.visit_u64(value).map(RuleEntry::severity_only)
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
                SeverityVisitor.visit_i64(value).map(RuleEntry::severity_only)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let SeverityValue(severity) = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &"array with severity"))?;

                let mut options = Vec::new();
                while let Some(option) = seq.next_element::<Value>()? {
                    options.push(option);
                }

                Ok(if options.is_empty() {
                    RuleEntry::severity_only(severity)
                } else {
                    RuleEntry::with_options(severity, options)
                })
            }

            fn visit_map<A>(self, map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                #[derive(Deserialize)]
                #[serde(deny_unknown_fields)]
                struct DetailedConfig {
                    severity: SeverityValue,
                    #[serde(default)]
                    options: Option<Value>,
                }

                let config =
                    DetailedConfig::deserialize(de::value::MapAccessDeserializer::new(map))?;
                // An array under `options` is the positional option list.
                let options = config.options.map(|value| match value {
                    Value::Array(items) => items,
                    other => vec![other],
                });
                Ok(RuleEntry {
                    severity: config.severity.0,
                    options,
                })
            }
        }

        deserializer.deserialize_any(RuleEntryVisitor)
    }
}

/// `languageOptions.ecmaVersion`: a year/edition number or `"latest"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EcmaVersion {
    Latest,
    Version(u32),
}

impl EcmaVersion {
    /// Interpret a JSON value the way `parserOptions.ecmaVersion` is written.
    #[must_use]
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) if s == "latest" => Some(Self::Latest),
            Value::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()).map(Self::Version),
            _ => None,
        }
    }
}

impl Serialize for EcmaVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Latest => serializer.serialize_str("latest"),
            Self::Version(v) => serializer.serialize_u32(*v),
        }
    }
}

impl<'de> Deserialize<'de> for EcmaVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EcmaVersionVisitor;

        impl Visitor<'_> for EcmaVersionVisitor {
            type Value = EcmaVersion;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an ECMAScript version number or \"latest\"")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
                if value == "latest" {
                    Ok(EcmaVersion::Latest)
                } else {
                    Err(E::custom(format!("unknown ecmaVersion: {value}")))
                }
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
                u32::try_from(value)
                    .map(EcmaVersion::Version)
                    .map_err(|_| E::custom(format!("ecmaVersion out of range: {value}")))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
                u64::try_from(value)
                    .map_err(|_| E::custom(format!("ecmaVersion out of range: {value}")))
                    .and_then(|v| self.visit_u64(v))
            }
        }

        deserializer.deserialize_any(EcmaVersionVisitor)
    }
}

/// `languageOptions.sourceType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Script,
    Module,
    Commonjs,
}

impl SourceType {
    #[must_use]
    pub fn from_json(value: &Value) -> Option<Self> {
        match value.as_str()? {
            "script" => Some(Self::Script),
            "module" => Some(Self::Module),
            "commonjs" => Some(Self::Commonjs),
            _ => None,
        }
    }
}

/// Access level of a declared global variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalAccess {
    Readonly,
    Writable,
    Off,
}

impl Serialize for GlobalAccess {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(match self {
            Self::Readonly => "readonly",
            Self::Writable => "writable",
            Self::Off => "off",
        })
    }
}

impl<'de> Deserialize<'de> for GlobalAccess {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct GlobalAccessVisitor;

        impl Visitor<'_> for GlobalAccessVisitor {
            type Value = GlobalAccess;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("'readonly', 'writable', 'off', or a boolean")
            }

            fn visit_bool<E: de::Error>(self, value: bool) -> Result<Self::Value, E> {
                Ok(if value {
                    GlobalAccess::Writable
                } else {
                    GlobalAccess::Readonly
                })
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
                match value {
                    "readonly" | "readable" | "false" => Ok(GlobalAccess::Readonly),
                    "writable" | "writeable" | "true" => Ok(GlobalAccess::Writable),
                    "off" => Ok(GlobalAccess::Off),
                    other => Err(E::custom(format!("unknown global access: {other}"))),
                }
            }
        }

        deserializer.deserialize_any(GlobalAccessVisitor)
    }
}

/// `languageOptions` of a block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LanguageOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ecma_version: Option<EcmaVersion>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_type: Option<SourceType>,

    /// Parser id, resolved against the plugin registry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parser: Option<String>,

    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub parser_options: Map<String, Value>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub globals: BTreeMap<String, GlobalAccess>,
}

impl LanguageOptions {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ecma_version.is_none()
            && self.source_type.is_none()
            && self.parser.is_none()
            && self.parser_options.is_empty()
            && self.globals.is_empty()
    }
}

/// `linterOptions` of a block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LinterOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_inline_config: Option<bool>,

    /// `true`/`false` are accepted as `warn`/`off`.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_directive_severity",
        deserialize_with = "deserialize_directive_severity"
    )]
    pub report_unused_disable_directives: Option<RuleSeverity>,
}

impl LinterOptions {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.no_inline_config.is_none() && self.report_unused_disable_directives.is_none()
    }
}

#[allow(clippy::ref_option)]
fn serialize_directive_severity<S: Serializer>(
    severity: &Option<RuleSeverity>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match severity {
        Some(severity) => serializer.serialize_str(severity.as_str()),
        None => serializer.serialize_none(),
    }
}

fn deserialize_directive_severity<'de, D>(deserializer: D) -> Result<Option<RuleSeverity>, D::Error>
where
    D: Deserializer<'de>,
{
    struct DirectiveVisitor;

    impl Visitor<'_> for DirectiveVisitor {
        type Value = RuleSeverity;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a severity or a boolean")
        }

        fn visit_bool<E: de::Error>(self, value: bool) -> Result<Self::Value, E> {
            Ok(if value {
                RuleSeverity::Warn
            } else {
                RuleSeverity::Off
            })
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            SeverityVisitor.visit_str(value)
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
            SeverityVisitor.visit_u64(value)
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
            SeverityVisitor.visit_i64(value)
        }
    }

    deserializer.deserialize_any(DirectiveVisitor).map(Some)
}

/// One configuration block as written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RawConfigBlock {
    /// Label used in diagnostics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Glob patterns; absent means every file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<String>>,

    /// Glob patterns excluded from this block. On a block with nothing else
    /// set they are global ignores.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignores: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "LanguageOptions::is_empty")]
    pub language_options: LanguageOptions,

    #[serde(default, skip_serializing_if = "LinterOptions::is_empty")]
    pub linter_options: LinterOptions,

    /// Short name -> plugin id.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub plugins: BTreeMap<String, String>,

    /// `<plugin short name>/<processor>`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processor: Option<String>,

    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub settings: Map<String, Value>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub rules: BTreeMap<String, RuleEntry>,
}

impl RawConfigBlock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn files<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.files = Some(patterns.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn ignores<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignores = Some(patterns.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn parser(mut self, parser: impl Into<String>) -> Self {
        self.language_options.parser = Some(parser.into());
        self
    }

    #[must_use]
    pub fn parser_option(mut self, key: impl Into<String>, value: Value) -> Self {
        self.language_options.parser_options.insert(key.into(), value);
        self
    }

    #[must_use]
    pub fn plugin(mut self, name: impl Into<String>, id: impl Into<String>) -> Self {
        self.plugins.insert(name.into(), id.into());
        self
    }

    #[must_use]
    pub fn processor(mut self, processor: impl Into<String>) -> Self {
        self.processor = Some(processor.into());
        self
    }

    #[must_use]
    pub fn rule(mut self, name: impl Into<String>, entry: impl Into<RuleEntry>) -> Self {
        self.rules.insert(name.into(), entry.into());
        self
    }

    /// True for an ignores-only block, which excludes files from every block.
    #[must_use]
    pub fn is_global_ignore(&self) -> bool {
        self.ignores.is_some()
            && self.files.is_none()
            && self.language_options.is_empty()
            && self.linter_options.is_empty()
            && self.plugins.is_empty()
            && self.processor.is_none()
            && self.settings.is_empty()
            && self.rules.is_empty()
    }
}

/// An entry that splices a plugin's preset block list in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PresetRef {
    /// Plugin id providing the preset.
    pub plugin: String,
    /// Preset name, e.g. `flat/recommended`.
    pub preset: String,
}

/// One item of the top-level entry list.
#[derive(Debug, Clone, PartialEq)]
pub enum RawConfigEntry {
    Block(RawConfigBlock),
    Preset(PresetRef),
}

impl From<RawConfigBlock> for RawConfigEntry {
    fn from(block: RawConfigBlock) -> Self {
        Self::Block(block)
    }
}

impl From<PresetRef> for RawConfigEntry {
    fn from(preset: PresetRef) -> Self {
        Self::Preset(preset)
    }
}

impl<'de> Deserialize<'de> for RawConfigEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Dispatch on the `preset` key rather than using an untagged enum, so
        // errors inside a block keep their precise message.
        let value = Value::deserialize(deserializer)?;
        let is_preset = value
            .as_object()
            .is_some_and(|object| object.contains_key("preset"));
        if is_preset {
            serde_json::from_value(value)
                .map(Self::Preset)
                .map_err(de::Error::custom)
        } else {
            serde_json::from_value(value)
                .map(Self::Block)
                .map_err(de::Error::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_simple_severity() {
        let entry: RuleEntry = serde_yaml::from_str("warn").unwrap();
        assert_eq!(entry, RuleEntry::severity_only(RuleSeverity::Warn));
    }

    #[test]
    fn test_numeric_severity() {
        let entry: RuleEntry = serde_json::from_str("2").unwrap();
        assert_eq!(entry.severity, RuleSeverity::Error);
        assert!(serde_json::from_str::<RuleEntry>("3").is_err());
    }

    #[test]
    fn test_invalid_severity_rejected() {
        let err = serde_yaml::from_str::<RuleEntry>("warning").unwrap_err();
        assert!(err.to_string().contains("warning"));
    }

    #[test]
    fn test_eslint_array_style() {
        let entry: RuleEntry =
            serde_yaml::from_str(r#"[warn, { argsIgnorePattern: "^_" }]"#).unwrap();
        assert_eq!(entry.severity, RuleSeverity::Warn);
        assert_eq!(entry.options(), &[json!({ "argsIgnorePattern": "^_" })]);
    }

    #[test]
    fn test_eslint_array_style_severity_only() {
        let entry: RuleEntry = serde_yaml::from_str("[error]").unwrap();
        assert_eq!(entry.severity, RuleSeverity::Error);
        assert!(entry.options.is_none());
    }

    #[test]
    fn test_array_with_multiple_options() {
        let entry: RuleEntry =
            serde_json::from_str(r#"["error", "always", { "null": "ignore" }]"#).unwrap();
        assert_eq!(entry.options().len(), 2);
        assert_eq!(entry.options()[0], json!("always"));
    }

    #[test]
    fn test_empty_array_rejected() {
        assert!(serde_json::from_str::<RuleEntry>("[]").is_err());
    }

    #[test]
    fn test_object_style_with_options() {
        let yaml = r"
severity: error
options:
  max: 3
";
        let entry: RuleEntry = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(entry.severity, RuleSeverity::Error);
        assert_eq!(entry.options(), &[json!({ "max": 3 })]);
    }

    #[test]
    fn test_object_style_without_options_is_severity_only() {
        let entry: RuleEntry = serde_yaml::from_str("severity: warn").unwrap();
        assert!(entry.options.is_none());
    }

    #[test]
    fn test_override_keeps_options_for_severity_only() {
        let mut entry = RuleEntry::with_options(RuleSeverity::Warn, vec![json!("always")]);
        entry.override_with(&RuleEntry::severity_only(RuleSeverity::Error));
        assert_eq!(entry.severity, RuleSeverity::Error);
        assert_eq!(entry.options(), &[json!("always")]);

        entry.override_with(&RuleEntry::with_options(
            RuleSeverity::Warn,
            vec![json!("never")],
        ));
        assert_eq!(entry.options(), &[json!("never")]);
    }

    #[test]
    fn test_rule_entry_serializes_eslint_style() {
        let plain = RuleEntry::severity_only(RuleSeverity::Warn);
        assert_eq!(serde_json::to_value(&plain).unwrap(), json!("warn"));

        let detailed = RuleEntry::with_options(RuleSeverity::Error, vec![json!({ "a": 1 })]);
        assert_eq!(
            serde_json::to_value(&detailed).unwrap(),
            json!(["error", { "a": 1 }])
        );
    }

    #[test]
    fn test_language_options() {
        let yaml = r"
ecmaVersion: latest
sourceType: module
parser: '@typescript-eslint/parser'
parserOptions:
  project: true
globals:
  window: readonly
  process: true
";
        let options: LanguageOptions = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(options.ecma_version, Some(EcmaVersion::Latest));
        assert_eq!(options.source_type, Some(SourceType::Module));
        assert_eq!(options.parser.as_deref(), Some("@typescript-eslint/parser"));
        assert_eq!(options.globals["window"], GlobalAccess::Readonly);
        assert_eq!(options.globals["process"], GlobalAccess::Writable);
    }

    #[test]
    fn test_ecma_version_number() {
        let options: LanguageOptions = serde_json::from_str(r#"{"ecmaVersion": 2022}"#).unwrap();
        assert_eq!(options.ecma_version, Some(EcmaVersion::Version(2022)));
        assert_eq!(
            EcmaVersion::from_json(&json!("latest")),
            Some(EcmaVersion::Latest)
        );
        assert_eq!(EcmaVersion::from_json(&json!("next")), None);
    }

    #[test]
    fn test_linter_options_boolean_directive() {
        let options: LinterOptions =
            serde_json::from_str(r#"{"reportUnusedDisableDirectives": true}"#).unwrap();
        assert_eq!(
            options.report_unused_disable_directives,
            Some(RuleSeverity::Warn)
        );
    }

    #[test]
    fn test_linter_options_serialize_directive_as_severity() {
        let mut block = RawConfigBlock::new().named("strict");
        block.linter_options.report_unused_disable_directives = Some(RuleSeverity::Error);

        let value = serde_json::to_value(&block).unwrap();
        assert_eq!(
            value["linterOptions"],
            json!({ "reportUnusedDisableDirectives": "error" })
        );

        let back: RawConfigBlock = serde_json::from_value(value).unwrap();
        assert_eq!(back, block);
    }

    #[test]
    fn test_block_rejects_unknown_keys() {
        let err = serde_yaml::from_str::<RawConfigBlock>("fils: ['**/*.ts']").unwrap_err();
        assert!(err.to_string().contains("fils"));
    }

    #[test]
    fn test_global_ignore_detection() {
        let ignores = RawConfigBlock::new().named("ignores").ignores(["dist/"]);
        assert!(ignores.is_global_ignore());

        let scoped = RawConfigBlock::new()
            .ignores(["dist/"])
            .rule("no-console", RuleSeverity::Off);
        assert!(!scoped.is_global_ignore());
    }

    #[test]
    fn test_entry_dispatch() {
        let yaml = r"
- files: ['src/**/*.ts']
  rules:
    no-console: warn
- preset: flat/recommended
  plugin: eslint-plugin-svelte
";
        let entries: Vec<RawConfigEntry> = serde_yaml::from_str(yaml).unwrap();
        assert!(matches!(entries[0], RawConfigEntry::Block(_)));
        assert_eq!(
            entries[1],
            RawConfigEntry::Preset(PresetRef {
                plugin: "eslint-plugin-svelte".into(),
                preset: "flat/recommended".into(),
            })
        );
    }

    #[test]
    fn test_entry_error_keeps_detail() {
        let yaml = r"
- rules:
    no-console: loud
";
        let err = serde_yaml::from_str::<Vec<RawConfigEntry>>(yaml).unwrap_err();
        assert!(err.to_string().contains("loud"), "{err}");
    }
}
