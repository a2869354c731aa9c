//! `eslint-plugin-svelte`, its parser and the `.svelte` processor.
//!
//! `flat/base` binds the plugin and sets up the parser and processor for
//! Svelte components; `flat/recommended` is `flat/base` followed by the
//! recommended rules.

use crate::catalog::{BuiltinPlugin, PresetFn, RuleRow};
use flatconf_config::RawConfigBlock;
use flatconf_types::RuleSeverity;

pub const ID: &str = "eslint-plugin-svelte";
pub const PARSER: &str = "svelte-eslint-parser";
pub const PROCESSOR: &str = "svelte";

/// Short name the presets bind the plugin under.
pub const PREFIX: &str = "svelte";

const RULES: &[RuleRow] = &[
    ("block-lang", "Disallows the use of languages other than those specified in the configuration for the lang attribute", false),
    ("button-has-type", "Disallow usage of button without an explicit type attribute", false),
    ("comment-directive", "Support comment-directives in HTML template", true),
    ("first-attribute-linebreak", "Enforce the location of first attribute", false),
    ("html-quotes", "Enforce quotes style of HTML attributes", false),
    ("indent", "Enforce consistent indentation", false),
    ("infinite-reactive-loop", "Svelte runtime prevents calling the same reactive statement twice in a microtask", false),
    ("no-at-debug-tags", "Disallow the use of `{@debug}`", true),
    ("no-at-html-tags", "Disallow use of `{@html}` to prevent XSS attack", true),
    ("no-dom-manipulating", "Disallow DOM manipulating", false),
    ("no-dupe-else-if-blocks", "Disallow duplicate conditions in `{#if}` / `{:else if}` chains", true),
    ("no-dupe-style-properties", "Disallow duplicate style properties", true),
    ("no-dynamic-slot-name", "Disallow dynamic slot name", true),
    ("no-inner-declarations", "Disallow variable or `function` declarations in nested blocks", true),
    ("no-not-function-handler", "Disallow use of not function in event handler", true),
    ("no-object-in-text-mustaches", "Disallow objects in text mustache interpolation", true),
    ("no-reactive-reassign", "Disallow reassigning reactive values", false),
    ("no-shorthand-style-property-overrides", "Disallow shorthand style properties that override related longhand properties", true),
    ("no-store-async", "Disallow using async/await inside svelte stores", false),
    ("no-target-blank", "Disallow `target=\"_blank\"` attribute without `rel=\"noopener noreferrer\"`", false),
    ("no-unknown-style-directive-property", "Disallow unknown `style:property`", true),
    ("no-unused-class-name", "Disallow the use of a class in the template without a corresponding style", false),
    ("no-unused-svelte-ignore", "Disallow unused svelte-ignore comments", true),
    ("no-useless-mustaches", "Disallow unnecessary mustache interpolations", false),
    ("prefer-class-directive", "Require class directives instead of ternary expressions", false),
    ("require-each-key", "Require keyed `{#each}` block", false),
    ("shorthand-attribute", "Enforce use of shorthand syntax in attribute", false),
    ("sort-attributes", "Enforce order of attributes", false),
    ("system", "System rule for working this plugin", true),
    ("valid-compile", "Disallow warnings when compiling", true),
    ("valid-each-key", "Enforce keys to use variables defined in the `{#each}` block", false),
];

const SVELTE_FILES: &[&str] = &["*.svelte", "**/*.svelte"];

const PRESETS: &[(&str, PresetFn)] = &[("flat/base", base), ("flat/recommended", recommended)];

#[must_use]
pub fn plugin() -> BuiltinPlugin {
    BuiltinPlugin::new(ID, RULES, &[PARSER], &[PROCESSOR], PRESETS)
}

fn base(_plugin: &BuiltinPlugin) -> Vec<RawConfigBlock> {
    vec![
        RawConfigBlock::new()
            .named("svelte:base:setup-plugin")
            .plugin(PREFIX, ID),
        RawConfigBlock::new()
            .named("svelte:base:setup-for-svelte")
            .files(SVELTE_FILES.iter().copied())
            .parser(PARSER)
            .rule("no-inner-declarations", RuleSeverity::Off)
            .rule("no-self-assign", RuleSeverity::Off)
            .processor(format!("{PREFIX}/{PROCESSOR}")),
    ]
}

fn recommended(plugin: &BuiltinPlugin) -> Vec<RawConfigBlock> {
    let rules = plugin.recommended_rules().fold(
        RawConfigBlock::new().named("svelte:recommended:rules"),
        |block, rule| {
            // Debug tags are reported but do not fail a run.
            let severity = if rule == "no-at-debug-tags" {
                RuleSeverity::Warn
            } else {
                RuleSeverity::Error
            };
            block.rule(format!("{PREFIX}/{rule}"), severity)
        },
    );

    let mut blocks = base(plugin);
    blocks.push(rules);
    blocks
}
