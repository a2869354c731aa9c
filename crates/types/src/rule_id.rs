/// A rule name split into its plugin prefix and bare name.
///
/// Rules provided by a plugin are written `<plugin>/<rule>`, where the prefix
/// is the short name the plugin is bound under in a config block. Scoped
/// prefixes keep their scope, so `@typescript-eslint/no-unused-vars` has the
/// prefix `@typescript-eslint`. Rules without a prefix belong to the core set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RuleId<'a> {
    plugin: Option<&'a str>,
    name: &'a str,
}

impl<'a> RuleId<'a> {
    /// Split a configured rule name. Never fails; a name without `/` is a core rule.
    #[must_use]
    pub fn parse(full: &'a str) -> Self {
        match full.rsplit_once('/') {
            Some((plugin, name)) if !plugin.is_empty() && !name.is_empty() => Self {
                plugin: Some(plugin),
                name,
            },
            _ => Self {
                plugin: None,
                name: full,
            },
        }
    }

    /// Plugin short name, or `None` for core rules.
    #[must_use]
    pub const fn plugin(&self) -> Option<&'a str> {
        self.plugin
    }

    /// Rule name without the plugin prefix.
    #[must_use]
    pub const fn name(&self) -> &'a str {
        self.name
    }

    #[must_use]
    pub const fn is_core(&self) -> bool {
        self.plugin.is_none()
    }
}

impl std::fmt::Display for RuleId<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.plugin {
            Some(plugin) => write!(f, "{plugin}/{}", self.name),
            None => f.write_str(self.name),
        }
    }
}
