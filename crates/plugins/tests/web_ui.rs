//! End-to-end resolution of the web UI configuration against the built-in
//! catalog.

use flatconf_config::{
    load_config, load_config_from_str, ConfigError, ConfigSet, PluginRegistry, Problem,
    RuleSeverity,
};
use flatconf_plugins::{builtin_registry, parse_manifest, svelte, typescript};
use serde_json::json;
use std::path::{Path, PathBuf};

fn demo_config_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos/ui/flatconf.config.yaml")
}

fn demo() -> ConfigSet {
    load_config(&demo_config_path())
        .unwrap()
        .build(&builtin_registry())
        .unwrap()
}

fn build_yaml(yaml: &str, registry: &PluginRegistry) -> Result<ConfigSet, ConfigError> {
    let entries = load_config_from_str(yaml, Path::new("flatconf.config.yaml"))?;
    ConfigSet::build(entries, registry)
}

#[test]
fn typescript_sources_use_the_typescript_parser() {
    let set = demo();
    let effective = set.resolve(set.base_dir().unwrap().join("src/main.ts")).unwrap();

    assert_eq!(effective.parser(), Some(typescript::PARSER));
    assert_eq!(effective.parser_options()["ecmaVersion"], json!("latest"));
    assert_eq!(effective.parser_options()["sourceType"], json!("module"));
    assert_eq!(effective.severity("no-console"), RuleSeverity::Warn);
    assert_eq!(
        effective.severity("@typescript-eslint/no-unused-vars"),
        RuleSeverity::Warn
    );
    assert_eq!(
        effective.rule_options("@typescript-eslint/no-unused-vars"),
        &[json!({ "argsIgnorePattern": "^_" })]
    );
    assert_eq!(effective.processor, None);
}

#[test]
fn javascript_sources_match_the_brace_pattern() {
    let set = demo();
    let effective = set.resolve("src/lib/greet.js").unwrap();
    assert!(effective.is_enabled("no-console"));
    assert_eq!(effective.matched_blocks[0], "ui/typescript");
}

#[test]
fn svelte_components_use_the_svelte_parser() {
    let set = demo();
    let effective = set.resolve("src/App.svelte").unwrap();

    assert_eq!(effective.parser(), Some(svelte::PARSER));
    assert_eq!(effective.parser_options()["parser"], json!(typescript::PARSER));
    assert!(!effective.rules.contains_key("no-console"));
    assert_eq!(effective.processor.as_deref(), Some("svelte/svelte"));
    assert_eq!(effective.severity("no-inner-declarations"), RuleSeverity::Off);
    assert_eq!(effective.severity("svelte/no-at-debug-tags"), RuleSeverity::Warn);
    assert_eq!(effective.severity("svelte/valid-compile"), RuleSeverity::Error);
    assert!(!effective.plugins.contains_key(typescript::PREFIX));
}

#[test]
fn preset_rules_apply_to_every_file() {
    // The recommended rule block has no `files`, so it reaches TS sources too.
    let set = demo();
    let effective = set.resolve("src/main.ts").unwrap();
    assert_eq!(effective.severity("svelte/valid-compile"), RuleSeverity::Error);
    assert_eq!(effective.plugins[svelte::PREFIX].id(), svelte::ID);
}

#[test]
fn explain_lists_blocks_in_declared_order() {
    let set = demo();
    let explanation = set.explain("src/App.svelte");
    let labels: Vec<_> = explanation.blocks.iter().map(|b| b.label.as_str()).collect();
    assert_eq!(
        labels,
        vec![
            "ui/typescript",
            "svelte:base:setup-plugin",
            "svelte:base:setup-for-svelte",
            "svelte:recommended:rules",
            "ui/svelte",
        ]
    );
    let matched: Vec<_> = explanation.blocks.iter().map(|b| b.matched).collect();
    assert_eq!(matched, vec![false, true, true, true, true]);
}

#[test]
fn precedence_between_preset_and_project_blocks_is_positional() {
    let registry = builtin_registry();
    let before = r"
- rules: { no-self-assign: error }
- preset: flat/base
  plugin: eslint-plugin-svelte
";
    let after = r"
- preset: flat/base
  plugin: eslint-plugin-svelte
- rules: { no-self-assign: error }
";
    let before = build_yaml(before, &registry).unwrap();
    let after = build_yaml(after, &registry).unwrap();

    assert_eq!(
        before.resolve("a.svelte").unwrap().severity("no-self-assign"),
        RuleSeverity::Off
    );
    assert_eq!(
        after.resolve("a.svelte").unwrap().severity("no-self-assign"),
        RuleSeverity::Error
    );
}

#[test]
fn core_and_typescript_recommended_presets_combine() {
    let yaml = r"
- preset: recommended
  plugin: '@eslint/js'
- preset: recommended
  plugin: '@typescript-eslint/eslint-plugin'
- rules:
    '@typescript-eslint/no-explicit-any': warn
";
    let set = build_yaml(yaml, &builtin_registry()).unwrap();

    let ts = set.resolve("src/a.ts").unwrap();
    assert_eq!(ts.severity("no-undef"), RuleSeverity::Off);
    assert_eq!(ts.severity("no-var"), RuleSeverity::Error);
    assert_eq!(ts.severity("no-unused-vars"), RuleSeverity::Off);
    assert_eq!(
        ts.severity("@typescript-eslint/no-explicit-any"),
        RuleSeverity::Warn
    );

    let js = set.resolve("src/a.js").unwrap();
    assert_eq!(js.severity("no-undef"), RuleSeverity::Error);
    assert_eq!(js.parser(), Some(typescript::PARSER));
}

#[test]
fn typos_are_reported_per_block_with_suggestions() {
    let yaml = r"
- name: app
  plugins: { svelte: eslint-plugin-svelte }
  rules:
    no-consle: warn
    svelte/valid-compiles: error
- name: ok
  rules: { eqeqeq: [error, always] }
";
    let err = build_yaml(yaml, &builtin_registry()).unwrap_err();
    let report = err.integrity().unwrap();
    assert_eq!(report.blocks().len(), 1);
    assert_eq!(report.blocks()[0].block, "app");
    assert_eq!(
        report.blocks()[0].problems,
        vec![
            Problem::UnknownRule {
                rule: "no-consle".into(),
                suggestion: Some("no-console".into()),
            },
            Problem::UnknownRule {
                rule: "svelte/valid-compiles".into(),
                suggestion: Some("svelte/valid-compile".into()),
            },
        ]
    );
}

#[test]
fn manifest_plugins_register_alongside_builtins() {
    let manifest = r"
id: eslint-plugin-local
rules: [no-todo]
presets:
  recommended:
    - plugins: { local: eslint-plugin-local }
      rules: { local/no-todo: warn }
";
    let mut registry = builtin_registry();
    registry.register(parse_manifest(manifest, Path::new("local.yaml")).unwrap());

    let yaml = r"
- preset: recommended
  plugin: eslint-plugin-local
- files: ['src/**']
  rules: { local/no-todo: error }
";
    let set = build_yaml(yaml, &registry).unwrap();
    assert_eq!(
        set.resolve("src/a.ts").unwrap().severity("local/no-todo"),
        RuleSeverity::Error
    );
    assert_eq!(
        set.resolve("test/a.ts").unwrap().severity("local/no-todo"),
        RuleSeverity::Warn
    );
}

#[test]
fn dependencies_are_ignored() {
    let set = demo();
    let base = set.base_dir().unwrap().to_path_buf();
    assert!(set
        .resolve_file(base.join("node_modules/svelte/index.js"))
        .unwrap()
        .is_none());
    assert!(set.resolve_file(base.join("src/main.ts")).unwrap().is_some());
}
