/// Registry of all built-in plugins
use crate::{javascript, svelte, typescript};
use flatconf_config::{PluginHandle, PluginRegistry};
use std::sync::LazyLock;

/// Lazily initialized built-in plugins, core first.
/// Plugins are created once and shared by every registry.
static BUILTIN_PLUGINS: LazyLock<Vec<PluginHandle>> = LazyLock::new(|| {
    vec![
        PluginHandle::new(javascript::plugin()),
        PluginHandle::new(typescript::plugin()),
        PluginHandle::new(svelte::plugin()),
    ]
});

#[must_use]
pub fn builtin_plugins() -> &'static [PluginHandle] {
    &BUILTIN_PLUGINS
}

/// A registry holding every built-in plugin, with `@eslint/js` as the core
/// rule set. Manifest plugins can be registered on top.
#[must_use]
pub fn builtin_registry() -> PluginRegistry {
    let mut registry = PluginRegistry::new();
    for plugin in builtin_plugins() {
        if plugin.id() == javascript::ID {
            registry.register_core(plugin.clone());
        } else {
            registry.register(plugin.clone());
        }
    }
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_registry() {
        let registry = builtin_registry();
        assert_eq!(registry.core().map(|core| core.id()), Some(javascript::ID));
        assert!(registry.get(typescript::ID).is_some());
        assert!(registry.get(svelte::ID).is_some());
        for parser in [javascript::PARSER, typescript::PARSER, svelte::PARSER] {
            assert!(registry.has_parser(parser), "{parser}");
        }
    }

    #[test]
    fn test_plugins_are_shared() {
        let a = builtin_plugins().as_ptr();
        let b = builtin_plugins().as_ptr();
        assert_eq!(a, b);
    }
}
