//! Root indicators: named categories of marker file names.
//!
//! Indicators are grouped into three [`Tier`]s that are consulted in a fixed
//! order. Within a tier the first category, in registration order, with a
//! pattern matching any directory entry wins.

use std::ffi::OsString;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Precedence group of an indicator. Earlier tiers win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tier {
    /// Version-control metadata such as `.git`.
    VersionControl,
    /// Monorepo and workspace manifests such as `pnpm-workspace.yaml`.
    Workspace,
    /// Single-language project manifests such as `go.mod`.
    Language,
}

impl Tier {
    /// All tiers, in precedence order.
    pub const ALL: [Self; 3] = [Self::VersionControl, Self::Workspace, Self::Language];

    /// Priority assigned to indicators in this tier unless one is given.
    #[must_use]
    pub const fn default_priority(self) -> u32 {
        match self {
            Self::VersionControl => 300,
            Self::Workspace => 250,
            Self::Language => 200,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VersionControl => write!(f, "version-control"),
            Self::Workspace => write!(f, "workspace"),
            Self::Language => write!(f, "language"),
        }
    }
}

/// A marker entry name: exact, or `*suffix` to match by ending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    /// Matches an entry with exactly this name.
    Exact(String),
    /// Matches any entry whose name ends with this suffix.
    Suffix(String),
}

impl Pattern {
    /// Parse a pattern, treating a leading `*` as a suffix wildcard.
    ///
    /// # Examples
    ///
    /// ```
    /// use parkour::root::Pattern;
    ///
    /// assert_eq!(Pattern::parse("go.mod"), Pattern::Exact("go.mod".into()));
    /// assert_eq!(Pattern::parse("*.sln"), Pattern::Suffix(".sln".into()));
    /// ```
    #[must_use]
    pub fn parse(pattern: &str) -> Self {
        match pattern.strip_prefix('*') {
            Some(suffix) if !suffix.is_empty() => Self::Suffix(suffix.to_string()),
            _ => Self::Exact(pattern.to_string()),
        }
    }

    /// Whether an entry name matches. Non-UTF-8 names never match.
    #[must_use]
    pub fn matches(&self, name: &OsString) -> bool {
        let Some(name) = name.to_str() else {
            return false;
        };
        match self {
            Self::Exact(exact) => name == exact,
            Self::Suffix(suffix) => name.len() > suffix.len() && name.ends_with(suffix.as_str()),
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(exact) => write!(f, "{exact}"),
            Self::Suffix(suffix) => write!(f, "*{suffix}"),
        }
    }
}

/// A named category with its marker patterns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Indicator {
    category: String,
    priority: u32,
    patterns: Vec<Pattern>,
}

impl Indicator {
    /// Create an indicator from pattern strings.
    ///
    /// # Examples
    ///
    /// ```
    /// use parkour::root::Indicator;
    ///
    /// let nix = Indicator::new("nix", 200, ["flake.nix", "default.nix"]);
    /// assert_eq!(nix.category(), "nix");
    /// assert_eq!(nix.patterns().len(), 2);
    /// ```
    pub fn new<I, S>(category: impl Into<String>, priority: u32, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            category: category.into(),
            priority,
            patterns: patterns
                .into_iter()
                .map(|p| Pattern::parse(p.as_ref()))
                .collect(),
        }
    }

    /// The category name reported as a project's kind.
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Informational priority. Tier order decides precedence, not this.
    #[must_use]
    pub const fn priority(&self) -> u32 {
        self.priority
    }

    /// The marker patterns.
    #[must_use]
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    /// Whether any pattern matches any of the entry names.
    #[must_use]
    pub fn matches_any(&self, entries: &[OsString]) -> bool {
        self.patterns
            .iter()
            .any(|pattern| entries.iter().any(|entry| pattern.matches(entry)))
    }
}

/// The three ordered tiers of indicators the resolver consults.
///
/// # Examples
///
/// ```
/// use parkour::root::{IndicatorSet, Tier};
/// use std::ffi::OsString;
///
/// let set = IndicatorSet::builtin();
/// let entries = vec![OsString::from("go.mod"), OsString::from(".git")];
/// let (tier, indicator) = set.find_match(&entries).unwrap();
/// assert_eq!(tier, Tier::VersionControl);
/// assert_eq!(indicator.category(), "git");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndicatorSet {
    version_control: Vec<Indicator>,
    workspace: Vec<Indicator>,
    language: Vec<Indicator>,
}

impl IndicatorSet {
    /// An empty set that matches nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in indicator tables.
    #[must_use]
    pub fn builtin() -> Self {
        let mut set = Self::empty();
        for (category, patterns) in VERSION_CONTROL {
            set.push(Tier::VersionControl, Indicator::new(*category, 300, *patterns));
        }
        for (category, patterns) in WORKSPACE {
            set.push(Tier::Workspace, Indicator::new(*category, 250, *patterns));
        }
        for (category, priority, patterns) in LANGUAGE {
            set.push(Tier::Language, Indicator::new(*category, *priority, *patterns));
        }
        set
    }

    /// Append an indicator to the end of a tier.
    pub fn push(&mut self, tier: Tier, indicator: Indicator) {
        self.tier_mut(tier).push(indicator);
    }

    /// The indicators of one tier in registration order.
    #[must_use]
    pub fn tier(&self, tier: Tier) -> &[Indicator] {
        match tier {
            Tier::VersionControl => &self.version_control,
            Tier::Workspace => &self.workspace,
            Tier::Language => &self.language,
        }
    }

    fn tier_mut(&mut self, tier: Tier) -> &mut Vec<Indicator> {
        match tier {
            Tier::VersionControl => &mut self.version_control,
            Tier::Workspace => &mut self.workspace,
            Tier::Language => &mut self.language,
        }
    }

    /// Total number of indicators across all tiers.
    #[must_use]
    pub fn len(&self) -> usize {
        Tier::ALL.iter().map(|t| self.tier(*t).len()).sum()
    }

    /// Whether the set has no indicators at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Find the winning indicator for one directory's entry names.
    #[must_use]
    pub fn find_match(&self, entries: &[OsString]) -> Option<(Tier, &Indicator)> {
        Tier::ALL.iter().find_map(|&tier| {
            self.tier(tier)
                .iter()
                .find(|indicator| indicator.matches_any(entries))
                .map(|indicator| (tier, indicator))
        })
    }
}

type Table = &'static [(&'static str, &'static [&'static str])];

const VERSION_CONTROL: Table = &[
    (
        "git",
        &[".git", ".gitignore", ".gitmodules", ".gitattributes", ".gitkeep"],
    ),
    (
        "mercurial",
        &[".hg", ".hgignore", ".hgtags", ".hgeol", ".hgsub", ".hgsubstate"],
    ),
    ("svn", &[".svn", ".svnignore", "_svn"]),
    ("bzr", &[".bzr", ".bzrignore", ".bzrtags"]),
    ("cvs", &["CVS", ".cvsignore", ".cvsrc"]),
    ("darcs", &["_darcs", ".darcs-ignore"]),
    ("fossil", &[".fossil", ".fossil-settings"]),
    ("monotone", &["_MTN", ".mtn-ignore"]),
    ("perforce", &["p4config", ".p4ignore", "p4env.txt"]),
    ("pijul", &[".pijul"]),
    ("rcs", &["RCS", ",v"]),
];

const WORKSPACE: Table = &[
    ("pnpm-workspace", &["pnpm-workspace.yaml"]),
    ("yarn-workspace", &["package.json"]),
    ("nx-workspace", &["nx.json", "workspace.json"]),
    ("rush", &["rush.json"]),
    ("turborepo", &["turbo.json"]),
    ("lerna", &["lerna.json"]),
    ("cargo-workspace", &["Cargo.toml"]),
    ("go-workspace", &["go.work"]),
    ("python-namespace", &["setup.cfg", "pyproject.toml"]),
    (
        "gradle-multiproject",
        &["settings.gradle", "settings.gradle.kts"],
    ),
    ("maven-multimodule", &["pom.xml"]),
    ("dotnet-solution", &["*.sln"]),
    ("bazel-workspace", &["WORKSPACE", "WORKSPACE.bazel"]),
    ("buck-workspace", &[".buckconfig"]),
    ("pants-workspace", &["pants.toml", "BUILD"]),
];

// Framework-specific entries rank slightly below plain languages.
const LANGUAGE: &[(&str, u32, &[&str])] = &[
    (
        "nodejs",
        200,
        &["package.json", "package-lock.json", "yarn.lock", "pnpm-lock.yaml"],
    ),
    (
        "react",
        195,
        &["next.config.js", "react-scripts", "craco.config.js"],
    ),
    ("vue", 195, &["vue.config.js", "nuxt.config.js"]),
    ("rust", 200, &["Cargo.toml", "Cargo.lock", "rust-toolchain.toml"]),
    ("go", 200, &["go.mod", "go.sum"]),
    (
        "python",
        200,
        &[
            "requirements.txt",
            "setup.py",
            "pyproject.toml",
            "Pipfile",
            "poetry.lock",
            "conda.yaml",
            "environment.yml",
        ],
    ),
    (
        "haskell",
        200,
        &["stack.yaml", "cabal.config", "package.yaml", "hie-bios"],
    ),
    (
        "jvm",
        200,
        &[
            "pom.xml",
            "build.gradle",
            "build.gradle.kts",
            "gradlew",
            "settings.gradle",
            ".mvn",
        ],
    ),
    (
        "ruby",
        200,
        &["Gemfile", "Gemfile.lock", "config.ru", ".ruby-version", "Rakefile"],
    ),
    (
        "php",
        200,
        &["composer.json", "composer.lock", "artisan", "index.php"],
    ),
    (
        "cpp",
        200,
        &["CMakeLists.txt", "Makefile", "configure.ac", "meson.build"],
    ),
    (
        "dotnet",
        200,
        &["*.csproj", "*.fsproj", "*.sln", "global.json", "nuget.config"],
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn names(entries: &[&str]) -> Vec<OsString> {
        entries.iter().map(OsString::from).collect()
    }

    fn winner(set: &IndicatorSet, entries: &[&str]) -> Option<String> {
        set.find_match(&names(entries))
            .map(|(_, indicator)| indicator.category().to_string())
    }

    #[test]
    fn test_pattern_parse() {
        assert_eq!(Pattern::parse("Cargo.toml"), Pattern::Exact("Cargo.toml".into()));
        assert_eq!(Pattern::parse("*.csproj"), Pattern::Suffix(".csproj".into()));
        assert_eq!(Pattern::parse("*"), Pattern::Exact("*".into()));
    }

    #[test]
    fn test_suffix_pattern_requires_a_stem() {
        let pattern = Pattern::parse("*.sln");
        assert!(pattern.matches(&OsString::from("App.sln")));
        assert!(!pattern.matches(&OsString::from(".sln")));
        assert!(!pattern.matches(&OsString::from("App.sln.bak")));
    }

    #[test]
    fn test_pattern_display_round_trips_wildcard() {
        assert_eq!(Pattern::parse("*.fsproj").to_string(), "*.fsproj");
    }

    #[test]
    fn test_vcs_beats_language() {
        let set = IndicatorSet::builtin();
        assert_eq!(winner(&set, &[".git", "go.mod"]).as_deref(), Some("git"));
    }

    #[test]
    fn test_workspace_beats_language() {
        let set = IndicatorSet::builtin();
        assert_eq!(
            winner(&set, &["Cargo.toml", "Cargo.lock"]).as_deref(),
            Some("cargo-workspace")
        );
        assert_eq!(
            winner(&set, &["package.json"]).as_deref(),
            Some("yarn-workspace")
        );
    }

    #[test]
    fn test_first_category_in_tier_wins() {
        let set = IndicatorSet::builtin();
        // pnpm-workspace is registered before yarn-workspace
        assert_eq!(
            winner(&set, &["package.json", "pnpm-workspace.yaml"]).as_deref(),
            Some("pnpm-workspace")
        );
    }

    #[test]
    fn test_language_tier() {
        let set = IndicatorSet::builtin();
        assert_eq!(winner(&set, &["go.mod", "main.go"]).as_deref(), Some("go"));
        assert_eq!(winner(&set, &["Gemfile"]).as_deref(), Some("ruby"));
        assert_eq!(winner(&set, &["App.csproj"]).as_deref(), Some("dotnet"));
    }

    #[test]
    fn test_wildcard_workspace_indicator() {
        let set = IndicatorSet::builtin();
        assert_eq!(
            winner(&set, &["Big.sln", "App.csproj"]).as_deref(),
            Some("dotnet-solution")
        );
    }

    #[test]
    fn test_no_match() {
        let set = IndicatorSet::builtin();
        assert!(winner(&set, &["notes.txt", "photos"]).is_none());
        assert!(winner(&set, &[]).is_none());
    }

    #[test]
    fn test_pushed_indicator_follows_builtins() {
        let mut set = IndicatorSet::builtin();
        set.push(Tier::Language, Indicator::new("nix", 200, ["flake.nix"]));
        set.push(Tier::Language, Indicator::new("my-go", 200, ["go.mod"]));

        assert_eq!(winner(&set, &["flake.nix"]).as_deref(), Some("nix"));
        assert_eq!(winner(&set, &["go.mod"]).as_deref(), Some("go"));
    }

    #[test]
    fn test_builtin_priorities_follow_tiers() {
        let set = IndicatorSet::builtin();
        assert!(set
            .tier(Tier::VersionControl)
            .iter()
            .all(|i| i.priority() == Tier::VersionControl.default_priority()));
        assert!(set
            .tier(Tier::Workspace)
            .iter()
            .all(|i| i.priority() == Tier::Workspace.default_priority()));
        let react = set
            .tier(Tier::Language)
            .iter()
            .find(|i| i.category() == "react")
            .unwrap();
        assert_eq!(react.priority(), 195);
    }

    #[test]
    fn test_empty_set() {
        let set = IndicatorSet::empty();
        assert!(set.is_empty());
        assert!(winner(&set, &[".git"]).is_none());
        assert!(!IndicatorSet::builtin().is_empty());
    }
}
