//! `@typescript-eslint/eslint-plugin` and its parser.

use crate::catalog::{BuiltinPlugin, PresetFn, RuleRow};
use flatconf_config::RawConfigBlock;
use flatconf_types::RuleSeverity;
use serde_json::json;

pub const ID: &str = "@typescript-eslint/eslint-plugin";
pub const PARSER: &str = "@typescript-eslint/parser";

/// Short name the presets bind the plugin under.
pub const PREFIX: &str = "@typescript-eslint";

const RULES: &[RuleRow] = &[
    ("array-type", "Require consistently using either `T[]` or `Array<T>` for arrays", false),
    ("ban-ts-comment", "Disallow `@ts-<directive>` comments or require descriptions after directives", true),
    ("consistent-type-definitions", "Enforce type definitions to consistently use either `interface` or `type`", false),
    ("consistent-type-imports", "Enforce consistent usage of type imports", false),
    ("explicit-function-return-type", "Require explicit return types on functions and class methods", false),
    ("explicit-module-boundary-types", "Require explicit return and argument types on exported functions", false),
    ("naming-convention", "Enforce naming conventions for everything across a codebase", false),
    ("no-array-constructor", "Disallow generic `Array` constructors", true),
    ("no-duplicate-enum-values", "Disallow duplicate enum member values", true),
    ("no-empty-function", "Disallow empty functions", false),
    ("no-empty-object-type", "Disallow accidentally using the \"empty object\" type", true),
    ("no-explicit-any", "Disallow the `any` type", true),
    ("no-extra-non-null-assertion", "Disallow extra non-null assertions", true),
    ("no-floating-promises", "Require Promise-like statements to be handled appropriately", false),
    ("no-inferrable-types", "Disallow explicit type declarations for variables initialized to a primitive", false),
    ("no-misused-new", "Enforce valid definition of `new` and `constructor`", true),
    ("no-misused-promises", "Disallow Promises in places not designed to handle them", false),
    ("no-namespace", "Disallow TypeScript namespaces", true),
    ("no-non-null-asserted-optional-chain", "Disallow non-null assertions after an optional chain expression", true),
    ("no-non-null-assertion", "Disallow non-null assertions using the `!` postfix operator", false),
    ("no-require-imports", "Disallow invocation of `require()`", true),
    ("no-shadow", "Disallow variable declarations from shadowing variables declared in the outer scope", false),
    ("no-this-alias", "Disallow aliasing `this`", true),
    ("no-unnecessary-type-constraint", "Disallow unnecessary constraints on generic types", true),
    ("no-unsafe-declaration-merging", "Disallow unsafe declaration merging", true),
    ("no-unsafe-function-type", "Disallow using the unsafe built-in Function type", true),
    ("no-unused-expressions", "Disallow unused expressions", true),
    ("no-unused-vars", "Disallow unused variables", true),
    ("no-use-before-define", "Disallow the use of variables before they are defined", false),
    ("no-wrapper-object-types", "Disallow using confusing built-in primitive class wrappers", true),
    ("prefer-as-const", "Enforce the use of `as const` over literal type", true),
    ("prefer-namespace-keyword", "Require using `namespace` keyword over `module` keyword", true),
    ("prefer-nullish-coalescing", "Enforce using the nullish coalescing operator instead of logical assignments", false),
    ("prefer-optional-chain", "Enforce using concise optional chain expressions", false),
    ("triple-slash-reference", "Disallow certain triple slash directives in favor of ES6-style imports", true),
];

/// Core rules the TypeScript compiler already covers for TS sources.
const COMPILER_CHECKED: &[&str] = &[
    "constructor-super",
    "getter-return",
    "no-class-assign",
    "no-const-assign",
    "no-dupe-args",
    "no-dupe-class-members",
    "no-dupe-keys",
    "no-func-assign",
    "no-import-assign",
    "no-new-native-nonconstructor",
    "no-obj-calls",
    "no-redeclare",
    "no-setter-return",
    "no-this-before-super",
    "no-undef",
    "no-unreachable",
    "no-unsafe-negation",
];

/// Core rules replaced by an extension rule of the same name.
const EXTENDED_CORE_RULES: &[&str] = &[
    "no-array-constructor",
    "no-unused-expressions",
    "no-unused-vars",
];

const TS_FILES: &[&str] = &["**/*.ts", "**/*.tsx", "**/*.mts", "**/*.cts"];

const PRESETS: &[(&str, PresetFn)] = &[("recommended", recommended)];

#[must_use]
pub fn plugin() -> BuiltinPlugin {
    BuiltinPlugin::new(ID, RULES, &[PARSER], &[], PRESETS)
}

fn recommended(plugin: &BuiltinPlugin) -> Vec<RawConfigBlock> {
    let base = RawConfigBlock::new()
        .named("typescript-eslint/base")
        .plugin(PREFIX, ID)
        .parser(PARSER)
        .parser_option("sourceType", json!("module"));

    let eslint_recommended = COMPILER_CHECKED
        .iter()
        .fold(
            RawConfigBlock::new()
                .named("typescript-eslint/eslint-recommended")
                .files(TS_FILES.iter().copied()),
            |block, rule| block.rule(*rule, RuleSeverity::Off),
        )
        .rule("no-var", RuleSeverity::Error)
        .rule("prefer-const", RuleSeverity::Error)
        .rule("prefer-rest-params", RuleSeverity::Error)
        .rule("prefer-spread", RuleSeverity::Error);

    let rules = EXTENDED_CORE_RULES.iter().fold(
        RawConfigBlock::new().named("typescript-eslint/recommended"),
        |block, rule| block.rule(*rule, RuleSeverity::Off),
    );
    let rules = plugin.recommended_rules().fold(rules, |block, rule| {
        block.rule(format!("{PREFIX}/{rule}"), RuleSeverity::Error)
    });

    vec![base, eslint_recommended, rules]
}
