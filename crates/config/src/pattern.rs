//! Glob patterns for `files` and `ignores`.
//!
//! Patterns are normalized and brace-expanded before being compiled with the
//! `glob` crate. `*` and `?` never cross a `/`, `**` spans any number of
//! directories (including none), and dot-files are matched like any other
//! file. A pattern ending in `/` names a directory and matches every file
//! below it. A leading `!` negates the pattern.

use crate::error::Problem;
use glob::{MatchOptions, Pattern};
use std::path::{Component, Path};

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// A single compiled pattern, possibly expanded from a brace group.
#[derive(Debug, Clone)]
pub struct FilePattern {
    source: String,
    negated: bool,
    directory: bool,
    globs: Vec<Pattern>,
    /// For directory patterns, the globs without the trailing `**`, matched
    /// against directory paths.
    dir_globs: Vec<Pattern>,
}

impl FilePattern {
    /// Compile one pattern as written in a config file.
    pub fn new(source: &str) -> Result<Self, Problem> {
        let trimmed = source.trim();
        let (negated, body) = match trimmed.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let normalized = normalize_pattern(body);
        if normalized.is_empty() {
            return Err(Problem::InvalidPattern {
                pattern: source.to_string(),
                message: "pattern is empty".to_string(),
            });
        }

        let directory = normalized.ends_with('/');
        let compile = |base: &str| {
            expand_braces(base)
                .iter()
                .map(|expanded| {
                    Pattern::new(expanded).map_err(|e| Problem::InvalidPattern {
                        pattern: source.to_string(),
                        message: e.to_string(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()
        };

        let (globs, dir_globs) = if directory {
            (
                compile(&format!("{normalized}**"))?,
                compile(normalized.trim_end_matches('/'))?,
            )
        } else {
            (compile(&normalized)?, Vec::new())
        };

        Ok(Self {
            source: source.to_string(),
            negated,
            directory,
            globs,
            dir_globs,
        })
    }

    /// The pattern exactly as written.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub const fn is_negated(&self) -> bool {
        self.negated
    }

    #[must_use]
    pub const fn is_directory(&self) -> bool {
        self.directory
    }

    /// Whether the glob part matches `path` (negation is not applied here).
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        self.globs
            .iter()
            .any(|glob| glob.matches_with(path, MATCH_OPTIONS))
    }

    /// Like [`matches`](Self::matches), but also true when the pattern names
    /// one of the directories containing `path`.
    fn matches_path_or_ancestor(&self, path: &str) -> bool {
        self.matches(path) || ancestors(path).any(|dir| self.matches(dir))
    }

    /// Whether the pattern names the directory `dir` or one above it.
    fn matches_directory(&self, dir: &str) -> bool {
        let hit = |candidate: &str| {
            if self.directory {
                self.dir_globs
                    .iter()
                    .any(|glob| glob.matches_with(candidate, MATCH_OPTIONS))
            } else {
                self.matches(candidate)
            }
        };
        hit(dir) || ancestors(dir).any(hit)
    }
}

/// An ordered list of patterns. Later patterns win, so `!pattern` can
/// re-include something an earlier pattern excluded.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    patterns: Vec<FilePattern>,
}

impl PatternSet {
    /// Compile every pattern, collecting all failures.
    pub fn compile<I, S>(sources: I) -> Result<Self, Vec<Problem>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut patterns = Vec::new();
        let mut problems = Vec::new();
        for source in sources {
            match FilePattern::new(source.as_ref()) {
                Ok(pattern) => patterns.push(pattern),
                Err(problem) => problems.push(problem),
            }
        }
        if problems.is_empty() {
            Ok(Self { patterns })
        } else {
            Err(problems)
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Append patterns after the existing ones, so they take precedence.
    pub(crate) fn extend(&mut self, other: Self) {
        self.patterns.extend(other.patterns);
    }

    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(FilePattern::source)
    }

    /// Ordered evaluation against the file path only.
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        self.evaluate(|pattern| pattern.matches(path))
    }

    /// Ordered evaluation where a pattern also matches when it names one of
    /// the file's ancestor directories. Used for global ignores.
    #[must_use]
    pub fn matches_path_or_ancestor(&self, path: &str) -> bool {
        self.evaluate(|pattern| pattern.matches_path_or_ancestor(path))
    }

    /// Whether every file below the directory `dir` is excluded, so a walk
    /// can skip it. Any negated pattern could re-include a file below it, so
    /// a set containing one never excludes a whole directory.
    #[must_use]
    pub fn excludes_directory(&self, dir: &str) -> bool {
        !self.patterns.iter().any(FilePattern::is_negated)
            && self.patterns.iter().any(|pattern| pattern.matches_directory(dir))
    }

    fn evaluate(&self, hit: impl Fn(&FilePattern) -> bool) -> bool {
        let mut matched = false;
        for pattern in &self.patterns {
            if hit(pattern) {
                matched = !pattern.is_negated();
            }
        }
        matched
    }
}

/// Which files a block applies to.
///
/// A block without `files` is not special-cased anywhere else: it simply
/// carries the [`FileMatcher::All`] sentinel.
#[derive(Debug, Clone, Default)]
pub enum FileMatcher {
    #[default]
    All,
    Patterns(PatternSet),
}

impl FileMatcher {
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        match self {
            Self::All => true,
            Self::Patterns(set) => set.matches(path),
        }
    }

    #[must_use]
    pub const fn is_universal(&self) -> bool {
        matches!(self, Self::All)
    }
}

/// Normalize a glob pattern for consistent matching
///
/// Handles:
/// - Leading "./" prefix (removes it)
/// - Leading "/" prefix (removes it - patterns are relative to the base directory)
/// - Consecutive slashes (collapses to single slash)
pub(crate) fn normalize_pattern(pattern: &str) -> String {
    let mut normalized = pattern.trim().replace('\\', "/");

    while let Some(rest) = normalized.strip_prefix("./") {
        normalized = rest.to_string();
    }

    if let Some(rest) = normalized.strip_prefix('/') {
        normalized = rest.to_string();
    }

    while normalized.contains("//") {
        normalized = normalized.replace("//", "/");
    }

    normalized
}

/// Expand brace patterns like "src/**/*.{ts,js}" into separate patterns.
///
/// Every group is expanded, including nested ones: `{a,b{c,d}}` yields
/// `a`, `bc`, `bd`. An unbalanced `{` is left for the glob compiler, which
/// treats it literally.
pub(crate) fn expand_braces(pattern: &str) -> Vec<String> {
    let Some((start, end)) = find_brace_group(pattern) else {
        return vec![pattern.to_string()];
    };

    let before = &pattern[..start];
    let after = &pattern[end + 1..];

    split_alternatives(&pattern[start + 1..end])
        .into_iter()
        .flat_map(|alternative| expand_braces(&format!("{before}{alternative}{after}")))
        .collect()
}

/// Byte offsets of the first `{` and its matching `}`.
fn find_brace_group(pattern: &str) -> Option<(usize, usize)> {
    let start = pattern.find('{')?;
    let mut depth = 0usize;
    for (offset, ch) in pattern[start..].char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some((start, start + offset));
                }
            }
            _ => {}
        }
    }
    None
}

/// Split a brace group body on commas that are not inside a nested group.
fn split_alternatives(body: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut last = 0;
    for (offset, ch) in body.char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&body[last..offset]);
                last = offset + 1;
            }
            _ => {}
        }
    }
    parts.push(&body[last..]);
    parts
}

/// Directory prefixes of a relative path: `a/b/c.ts` yields `a`, `a/b`.
fn ancestors(path: &str) -> impl Iterator<Item = &str> {
    path.match_indices('/').map(move |(idx, _)| &path[..idx])
}

/// Turn a file path into the form patterns are matched against.
///
/// Absolute paths under `base_dir` become relative to it; backslashes become
/// forward slashes; `.` components are dropped. Paths outside the base
/// directory are kept as given, and a config set with a base directory
/// treats them as ignored.
#[must_use]
pub fn normalize_path(path: &Path, base_dir: Option<&Path>) -> String {
    let relative = base_dir
        .and_then(|base| path.strip_prefix(base).ok())
        .unwrap_or(path);

    let mut parts: Vec<String> = Vec::new();
    for component in relative.components() {
        match component {
            Component::CurDir => {}
            Component::RootDir => parts.push(String::new()),
            Component::Prefix(prefix) => {
                parts.push(prefix.as_os_str().to_string_lossy().into_owned());
            }
            Component::ParentDir => parts.push("..".to_string()),
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
        }
    }

    let joined = parts.join("/");
    if joined.is_empty() && relative.has_root() {
        "/".to_string()
    } else {
        joined.replace('\\', "/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn pattern(source: &str) -> FilePattern {
        FilePattern::new(source).unwrap()
    }

    #[test]
    fn test_pattern_normalization() {
        assert_eq!(normalize_pattern("./src/**/*.ts"), "src/**/*.ts");
        assert_eq!(normalize_pattern("/src/**/*.ts"), "src/**/*.ts");
        assert_eq!(normalize_pattern("src//components/*.ts"), "src/components/*.ts");
        assert_eq!(normalize_pattern("./src//components/*.ts"), "src/components/*.ts");
        assert_eq!(normalize_pattern("src/**/*.ts"), "src/**/*.ts");
    }

    #[test]
    fn test_expand_single_group() {
        assert_eq!(
            expand_braces("src/**/*.{ts,js}"),
            vec!["src/**/*.ts", "src/**/*.js"]
        );
    }

    #[test]
    fn test_expand_multiple_and_nested_groups() {
        assert_eq!(
            expand_braces("{src,lib}/*.{ts,m{js,ts}}"),
            vec![
                "src/*.ts", "src/*.mjs", "src/*.mts", "lib/*.ts", "lib/*.mjs", "lib/*.mts"
            ]
        );
    }

    #[test]
    fn test_unbalanced_brace_left_alone() {
        assert_eq!(expand_braces("src/{oops"), vec!["src/{oops"]);
    }

    #[test]
    fn test_star_does_not_cross_directories() {
        let p = pattern("*.svelte");
        assert!(p.matches("App.svelte"));
        assert!(!p.matches("src/App.svelte"));
    }

    #[test]
    fn test_globstar_matches_zero_or_more_directories() {
        let p = pattern("src/**/*.{ts,js}");
        assert!(p.matches("src/app.ts"));
        assert!(p.matches("src/lib/deep/util.js"));
        assert!(!p.matches("src/App.svelte"));
        assert!(!p.matches("test/app.ts"));
    }

    #[test]
    fn test_dotfiles_are_matched() {
        assert!(pattern("**/*.js").matches(".eslintrc.js"));
    }

    #[test]
    fn test_directory_pattern() {
        let p = pattern("dist/");
        assert!(p.is_directory());
        assert!(p.matches("dist/bundle.js"));
        assert!(p.matches("dist/assets/app.js"));
        assert!(!p.matches("src/dist.js"));
    }

    #[test]
    fn test_directory_exclusion() {
        let set = PatternSet::compile(["**/node_modules/", ".git/", "build"]).unwrap();
        assert!(set.excludes_directory("node_modules"));
        assert!(set.excludes_directory("packages/app/node_modules"));
        assert!(set.excludes_directory("node_modules/pkg"));
        assert!(set.excludes_directory(".git"));
        assert!(set.excludes_directory("build"));
        assert!(!set.excludes_directory("src"));
        assert!(!set.excludes_directory("src/node_modules_old"));
    }

    #[test]
    fn test_negation_keeps_directories_walkable() {
        let set = PatternSet::compile(["dist/", "!dist/keep.js"]).unwrap();
        assert!(!set.excludes_directory("dist"));
        assert!(set.matches_path_or_ancestor("dist/bundle.js"));
        assert!(!set.matches_path_or_ancestor("dist/keep.js"));
    }

    #[test]
    fn test_empty_pattern_is_invalid() {
        assert!(matches!(
            FilePattern::new("  "),
            Err(Problem::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_malformed_glob_is_invalid() {
        let err = FilePattern::new("src/[a-").unwrap_err();
        assert!(matches!(err, Problem::InvalidPattern { ref pattern, .. } if pattern == "src/[a-"));
    }

    #[test]
    fn test_compile_collects_every_failure() {
        let problems = PatternSet::compile(["src/**", "", "[z-"]).unwrap_err();
        assert_eq!(problems.len(), 2);
    }

    #[test]
    fn test_negation_reincludes() {
        let set = PatternSet::compile(["**/*.test.ts", "!src/keep.test.ts"]).unwrap();
        assert!(set.matches("src/other.test.ts"));
        assert!(!set.matches("src/keep.test.ts"));
        assert!(!set.matches("src/app.ts"));
    }

    #[test]
    fn test_ancestor_matching_for_plain_names() {
        let set = PatternSet::compile(["build"]).unwrap();
        assert!(!set.matches("build/out.js"));
        assert!(set.matches_path_or_ancestor("build/out.js"));
        assert!(!set.matches_path_or_ancestor("src/build.js"));
    }

    #[test]
    fn test_file_matcher_universal_sentinel() {
        let matcher = FileMatcher::default();
        assert!(matcher.is_universal());
        assert!(matcher.matches("anything/at/all.txt"));
    }

    #[test]
    fn test_normalize_path_relative_to_base() {
        let base = PathBuf::from("/work/ui");
        assert_eq!(
            normalize_path(Path::new("/work/ui/src/app.ts"), Some(&base)),
            "src/app.ts"
        );
        assert_eq!(normalize_path(Path::new("./src/app.ts"), None), "src/app.ts");
        assert_eq!(
            normalize_path(Path::new("src/./lib/x.ts"), Some(&base)),
            "src/lib/x.ts"
        );
    }

    #[test]
    fn test_normalize_path_outside_base_is_kept() {
        let base = PathBuf::from("/work/ui");
        assert_eq!(
            normalize_path(Path::new("/elsewhere/app.ts"), Some(&base)),
            "/elsewhere/app.ts"
        );
    }
}
