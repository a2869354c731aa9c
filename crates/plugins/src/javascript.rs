//! The core JavaScript rule set (`@eslint/js`).
//!
//! Core rules are referenced without a plugin prefix.

use crate::catalog::{BuiltinPlugin, PresetFn, RuleRow};
use flatconf_config::RawConfigBlock;
use flatconf_types::RuleSeverity;

pub const ID: &str = "@eslint/js";
pub const PARSER: &str = "espree";

const RULES: &[RuleRow] = &[
    ("camelcase", "Enforce camelcase naming convention", false),
    ("consistent-return", "Require `return` statements to either always or never specify values", false),
    ("constructor-super", "Require `super()` calls in constructors", true),
    ("curly", "Enforce consistent brace style for all control statements", false),
    ("default-param-last", "Enforce default parameters to be last", false),
    ("dot-notation", "Enforce dot notation whenever possible", false),
    ("eqeqeq", "Require the use of `===` and `!==`", false),
    ("for-direction", "Enforce `for` loop update clause moving the counter in the right direction", true),
    ("getter-return", "Enforce `return` statements in getters", true),
    ("max-params", "Enforce a maximum number of parameters in function definitions", false),
    ("no-alert", "Disallow the use of `alert`, `confirm`, and `prompt`", false),
    ("no-array-constructor", "Disallow `Array` constructors", false),
    ("no-async-promise-executor", "Disallow using an async function as a Promise executor", true),
    ("no-case-declarations", "Disallow lexical declarations in case clauses", true),
    ("no-class-assign", "Disallow reassigning class members", true),
    ("no-compare-neg-zero", "Disallow comparing against `-0`", true),
    ("no-cond-assign", "Disallow assignment operators in conditional expressions", true),
    ("no-console", "Disallow the use of `console`", false),
    ("no-const-assign", "Disallow reassigning `const` variables", true),
    ("no-constant-binary-expression", "Disallow expressions where the operation doesn't affect the value", true),
    ("no-constant-condition", "Disallow constant expressions in conditions", true),
    ("no-control-regex", "Disallow control characters in regular expressions", true),
    ("no-debugger", "Disallow the use of `debugger`", true),
    ("no-delete-var", "Disallow deleting variables", true),
    ("no-dupe-args", "Disallow duplicate arguments in `function` definitions", true),
    ("no-dupe-class-members", "Disallow duplicate class members", true),
    ("no-dupe-else-if", "Disallow duplicate conditions in if-else-if chains", true),
    ("no-dupe-keys", "Disallow duplicate keys in object literals", true),
    ("no-duplicate-case", "Disallow duplicate case labels", true),
    ("no-else-return", "Disallow `else` blocks after `return` statements in `if` statements", false),
    ("no-empty", "Disallow empty block statements", true),
    ("no-empty-character-class", "Disallow empty character classes in regular expressions", true),
    ("no-empty-function", "Disallow empty functions", false),
    ("no-empty-pattern", "Disallow empty destructuring patterns", true),
    ("no-empty-static-block", "Disallow empty static blocks", true),
    ("no-eval", "Disallow the use of `eval()`", false),
    ("no-ex-assign", "Disallow reassigning exceptions in `catch` clauses", true),
    ("no-extra-boolean-cast", "Disallow unnecessary boolean casts", true),
    ("no-fallthrough", "Disallow fallthrough of `case` statements", true),
    ("no-func-assign", "Disallow reassigning `function` declarations", true),
    ("no-global-assign", "Disallow assignments to native objects or read-only global variables", true),
    ("no-implicit-coercion", "Disallow shorthand type conversions", false),
    ("no-implied-eval", "Disallow the use of `eval()`-like methods", false),
    ("no-import-assign", "Disallow assigning to imported bindings", true),
    ("no-inner-declarations", "Disallow variable or `function` declarations in nested blocks", false),
    ("no-invalid-regexp", "Disallow invalid regular expression strings in `RegExp` constructors", true),
    ("no-irregular-whitespace", "Disallow irregular whitespace", true),
    ("no-loop-func", "Disallow function declarations that contain unsafe references inside loop statements", false),
    ("no-loss-of-precision", "Disallow literal numbers that lose precision", true),
    ("no-magic-numbers", "Disallow magic numbers", false),
    ("no-misleading-character-class", "Disallow characters made with multiple code points in character class syntax", true),
    ("no-new-native-nonconstructor", "Disallow `new` operators with global non-constructor functions", true),
    ("no-nonoctal-decimal-escape", "Disallow `\\8` and `\\9` escape sequences in string literals", true),
    ("no-obj-calls", "Disallow calling global object properties as functions", true),
    ("no-octal", "Disallow octal literals", true),
    ("no-param-reassign", "Disallow reassigning function parameters", false),
    ("no-prototype-builtins", "Disallow calling some `Object.prototype` methods directly on objects", true),
    ("no-redeclare", "Disallow variable redeclaration", true),
    ("no-regex-spaces", "Disallow multiple spaces in regular expressions", true),
    ("no-restricted-imports", "Disallow specified modules when loaded by `import`", false),
    ("no-self-assign", "Disallow assignments where both sides are exactly the same", true),
    ("no-setter-return", "Disallow returning values from setters", true),
    ("no-shadow", "Disallow variable declarations from shadowing variables declared in the outer scope", false),
    ("no-shadow-restricted-names", "Disallow identifiers from shadowing restricted names", true),
    ("no-sparse-arrays", "Disallow sparse arrays", true),
    ("no-this-before-super", "Disallow `this`/`super` before calling `super()` in constructors", true),
    ("no-throw-literal", "Disallow throwing literals as exceptions", false),
    ("no-undef", "Disallow the use of undeclared variables", true),
    ("no-unexpected-multiline", "Disallow confusing multiline expressions", true),
    ("no-unreachable", "Disallow unreachable code after `return`, `throw`, `continue`, and `break`", true),
    ("no-unsafe-finally", "Disallow control flow statements in `finally` blocks", true),
    ("no-unsafe-negation", "Disallow negating the left operand of relational operators", true),
    ("no-unsafe-optional-chaining", "Disallow use of optional chaining where `undefined` is not allowed", true),
    ("no-unused-expressions", "Disallow unused expressions", false),
    ("no-unused-labels", "Disallow unused labels", true),
    ("no-unused-private-class-members", "Disallow unused private class members", true),
    ("no-unused-vars", "Disallow unused variables", true),
    ("no-use-before-define", "Disallow the use of variables before they are defined", false),
    ("no-useless-backreference", "Disallow useless backreferences in regular expressions", true),
    ("no-useless-catch", "Disallow unnecessary `catch` clauses", true),
    ("no-useless-constructor", "Disallow unnecessary constructors", false),
    ("no-useless-escape", "Disallow unnecessary escape characters", true),
    ("no-var", "Require `let` or `const` instead of `var`", false),
    ("no-with", "Disallow `with` statements", true),
    ("object-shorthand", "Require method and property shorthand syntax for object literals", false),
    ("prefer-const", "Require `const` declarations for variables that are never reassigned", false),
    ("prefer-promise-reject-errors", "Require using Error objects as Promise rejection reasons", false),
    ("prefer-rest-params", "Require rest parameters instead of `arguments`", false),
    ("prefer-spread", "Require spread operators instead of `.apply()`", false),
    ("prefer-template", "Require template literals instead of string concatenation", false),
    ("require-await", "Disallow async functions which have no `await` expression", false),
    ("require-yield", "Require generator functions to contain `yield`", true),
    ("use-isnan", "Require calls to `isNaN()` when checking for `NaN`", true),
    ("valid-typeof", "Enforce comparing `typeof` expressions against valid strings", true),
    ("yoda", "Require or disallow \"Yoda\" conditions", false),
];

const PRESETS: &[(&str, PresetFn)] = &[("recommended", recommended), ("all", all)];

#[must_use]
pub fn plugin() -> BuiltinPlugin {
    BuiltinPlugin::new(ID, RULES, &[PARSER], &[], PRESETS)
}

fn recommended(plugin: &BuiltinPlugin) -> Vec<RawConfigBlock> {
    let block = plugin
        .recommended_rules()
        .fold(RawConfigBlock::new().named("eslint/js/recommended"), |block, rule| {
            block.rule(rule, RuleSeverity::Error)
        });
    vec![block]
}

fn all(_plugin: &BuiltinPlugin) -> Vec<RawConfigBlock> {
    let block = RULES
        .iter()
        .fold(RawConfigBlock::new().named("eslint/js/all"), |block, (rule, _, _)| {
            block.rule(*rule, RuleSeverity::Error)
        });
    vec![block]
}

#[cfg(test)]
mod tests {
    use super::*;
    use flatconf_config::Plugin;

    #[test]
    fn test_rules_sorted_and_unique() {
        let names: Vec<_> = RULES.iter().map(|(name, _, _)| *name).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_recommended_preset() {
        let plugin = plugin();
        let blocks = plugin.preset("recommended").unwrap();
        assert_eq!(blocks.len(), 1);
        let rules = &blocks[0].rules;
        assert_eq!(rules["no-debugger"].severity, RuleSeverity::Error);
        assert!(!rules.contains_key("no-console"));
        assert!(blocks[0].files.is_none());
    }

    #[test]
    fn test_all_preset_enables_every_rule() {
        let plugin = plugin();
        let blocks = plugin.preset("all").unwrap();
        assert_eq!(blocks[0].rules.len(), plugin.rules().len());
    }

    #[test]
    fn test_ships_espree() {
        assert_eq!(plugin().parsers(), &["espree".to_string()]);
        assert_eq!(plugin().preset_names(), vec!["recommended", "all"]);
    }
}
