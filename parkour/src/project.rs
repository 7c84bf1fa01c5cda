//! Project records and their updatable fields.

use std::fmt;
use std::str::FromStr;
use std::time::SystemTime;

use crate::error::StoreError;
use crate::path::CanonicalPath;

/// Largest priority the store can hold (SQLite integers are signed).
#[allow(clippy::cast_sign_loss)]
pub const MAX_PRIORITY: u64 = i64::MAX as u64;

/// A registered project.
///
/// The canonical path is the identity. Everything else is mutable through
/// the registry.
///
/// # Examples
///
/// ```no_run
/// use parkour::path::canonicalize;
/// use parkour::Project;
///
/// let project = Project::new(canonicalize("~/src/parkour").unwrap());
/// assert_eq!(project.name(), "parkour");
/// assert_eq!(project.priority(), 0);
/// assert!(project.kind().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    path: CanonicalPath,
    kind: Option<String>,
    priority: u64,
    build_command: Vec<String>,
    run_command: Vec<String>,
    test_command: Vec<String>,
    added_at: SystemTime,
    last_visited_at: Option<SystemTime>,
}

impl Project {
    /// A fresh project: no kind, priority zero, no commands.
    #[must_use]
    pub fn new(path: CanonicalPath) -> Self {
        Self::builder(path).build()
    }

    /// Start building a project with explicit field values.
    #[must_use]
    pub fn builder(path: CanonicalPath) -> ProjectBuilder {
        ProjectBuilder {
            project: Self {
                path,
                kind: None,
                priority: 0,
                build_command: Vec::new(),
                run_command: Vec::new(),
                test_command: Vec::new(),
                added_at: SystemTime::now(),
                last_visited_at: None,
            },
        }
    }

    /// The canonical directory of the project.
    #[must_use]
    pub fn path(&self) -> &CanonicalPath {
        &self.path
    }

    /// The last segment of the project's path.
    #[must_use]
    pub fn name(&self) -> String {
        self.path.name()
    }

    /// The indicator category recorded for the project, if any.
    #[must_use]
    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    /// How many times the project has been looked up.
    #[must_use]
    pub const fn priority(&self) -> u64 {
        self.priority
    }

    /// Build command arguments.
    #[must_use]
    pub fn build_command(&self) -> &[String] {
        &self.build_command
    }

    /// Run command arguments.
    #[must_use]
    pub fn run_command(&self) -> &[String] {
        &self.run_command
    }

    /// Test command arguments.
    #[must_use]
    pub fn test_command(&self) -> &[String] {
        &self.test_command
    }

    /// When the project was registered.
    #[must_use]
    pub const fn added_at(&self) -> SystemTime {
        self.added_at
    }

    /// When the project was last looked up, if ever.
    #[must_use]
    pub const fn last_visited_at(&self) -> Option<SystemTime> {
        self.last_visited_at
    }

    /// Whether `term` appears in the name, path, kind or priority.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use parkour::path::canonicalize;
    /// use parkour::Project;
    ///
    /// let project = Project::new(canonicalize("/usr/share").unwrap());
    /// assert!(project.matches("share"));
    /// assert!(project.matches("usr"));
    /// assert!(project.matches("0"));
    /// assert!(!project.matches("zzz"));
    /// ```
    #[must_use]
    pub fn matches(&self, term: &str) -> bool {
        self.name().contains(term)
            || self.path.as_path().to_string_lossy().contains(term)
            || self.kind.as_deref().is_some_and(|k| k.contains(term))
            || self.priority.to_string().contains(term)
    }

    pub(crate) fn record_visit(&mut self, at: SystemTime) {
        self.priority = self.priority.saturating_add(1).min(MAX_PRIORITY);
        self.last_visited_at = Some(at);
    }

    pub(crate) fn apply(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::Kind(kind) => self.kind = kind,
            FieldUpdate::Priority(priority) => self.priority = priority,
            FieldUpdate::BuildCommand(args) => self.build_command = args,
            FieldUpdate::RunCommand(args) => self.run_command = args,
            FieldUpdate::TestCommand(args) => self.test_command = args,
        }
    }
}

/// Builder for [`Project`] values with explicit fields.
#[derive(Debug)]
pub struct ProjectBuilder {
    project: Project,
}

impl ProjectBuilder {
    /// Set the kind.
    #[must_use]
    pub fn kind(mut self, kind: Option<String>) -> Self {
        self.project.kind = kind;
        self
    }

    /// Set the priority.
    #[must_use]
    pub fn priority(mut self, priority: u64) -> Self {
        self.project.priority = priority;
        self
    }

    /// Set the build command.
    #[must_use]
    pub fn build_command(mut self, args: Vec<String>) -> Self {
        self.project.build_command = args;
        self
    }

    /// Set the run command.
    #[must_use]
    pub fn run_command(mut self, args: Vec<String>) -> Self {
        self.project.run_command = args;
        self
    }

    /// Set the test command.
    #[must_use]
    pub fn test_command(mut self, args: Vec<String>) -> Self {
        self.project.test_command = args;
        self
    }

    /// Set the registration time.
    #[must_use]
    pub fn added_at(mut self, at: SystemTime) -> Self {
        self.project.added_at = at;
        self
    }

    /// Set the last lookup time.
    #[must_use]
    pub fn last_visited_at(mut self, at: Option<SystemTime>) -> Self {
        self.project.last_visited_at = at;
        self
    }

    /// Finish building.
    #[must_use]
    pub fn build(self) -> Project {
        self.project
    }
}

/// The project fields that can be changed with an update.
///
/// Parsing is case-insensitive and ignores `-` and `_`, so `BuildCommand`,
/// `build_command` and `build-command` all name the same field.
///
/// # Examples
///
/// ```
/// use parkour::ProjectField;
///
/// let field: ProjectField = "build-command".parse().unwrap();
/// assert_eq!(field, ProjectField::BuildCommand);
/// assert!("Color".parse::<ProjectField>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectField {
    /// The indicator category.
    Kind,
    /// The lookup counter.
    Priority,
    /// Build command arguments.
    BuildCommand,
    /// Run command arguments.
    RunCommand,
    /// Test command arguments.
    TestCommand,
}

impl ProjectField {
    /// All updatable fields.
    pub const ALL: [Self; 5] = [
        Self::Kind,
        Self::Priority,
        Self::BuildCommand,
        Self::RunCommand,
        Self::TestCommand,
    ];

    /// Parse a raw value into a typed update for this field.
    ///
    /// An empty kind clears it. Commands are split on whitespace.
    ///
    /// # Errors
    ///
    /// Returns `InvalidValue` if the value cannot be parsed for the field.
    ///
    /// # Examples
    ///
    /// ```
    /// use parkour::{FieldUpdate, ProjectField};
    ///
    /// let update = ProjectField::TestCommand.parse_value("cargo test --all").unwrap();
    /// assert_eq!(
    ///     update,
    ///     FieldUpdate::TestCommand(vec!["cargo".into(), "test".into(), "--all".into()])
    /// );
    /// assert!(ProjectField::Priority.parse_value("high").is_err());
    /// ```
    pub fn parse_value(self, value: &str) -> Result<FieldUpdate, StoreError> {
        let words = || -> Vec<String> { value.split_whitespace().map(String::from).collect() };
        Ok(match self {
            Self::Kind => {
                let kind = value.trim();
                FieldUpdate::Kind((!kind.is_empty()).then(|| kind.to_string()))
            }
            Self::Priority => {
                let priority = value.trim().parse::<u64>().map_err(|e| {
                    StoreError::InvalidValue {
                        field: self.to_string(),
                        value: value.to_string(),
                        reason: e.to_string(),
                    }
                })?;
                if priority > MAX_PRIORITY {
                    return Err(StoreError::InvalidValue {
                        field: self.to_string(),
                        value: value.to_string(),
                        reason: format!("exceeds the maximum priority {MAX_PRIORITY}"),
                    });
                }
                FieldUpdate::Priority(priority)
            }
            Self::BuildCommand => FieldUpdate::BuildCommand(words()),
            Self::RunCommand => FieldUpdate::RunCommand(words()),
            Self::TestCommand => FieldUpdate::TestCommand(words()),
        })
    }
}

impl FromStr for ProjectField {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "kind" => Ok(Self::Kind),
            "priority" => Ok(Self::Priority),
            "buildcommand" => Ok(Self::BuildCommand),
            "runcommand" => Ok(Self::RunCommand),
            "testcommand" => Ok(Self::TestCommand),
            _ => Err(StoreError::UnknownField {
                field: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ProjectField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Kind => write!(f, "kind"),
            Self::Priority => write!(f, "priority"),
            Self::BuildCommand => write!(f, "build-command"),
            Self::RunCommand => write!(f, "run-command"),
            Self::TestCommand => write!(f, "test-command"),
        }
    }
}

/// A typed new value for one project field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    /// Set or clear the kind.
    Kind(Option<String>),
    /// Set the priority.
    Priority(u64),
    /// Replace the build command.
    BuildCommand(Vec<String>),
    /// Replace the run command.
    RunCommand(Vec<String>),
    /// Replace the test command.
    TestCommand(Vec<String>),
}

impl FieldUpdate {
    /// Parse a field name and raw value in one step.
    ///
    /// # Errors
    ///
    /// `UnknownField` for an unrecognized name, `InvalidValue` for a value
    /// the field cannot hold.
    pub fn parse(field: &str, value: &str) -> Result<Self, StoreError> {
        field.parse::<ProjectField>()?.parse_value(value)
    }

    /// The field this update targets.
    #[must_use]
    pub const fn field(&self) -> ProjectField {
        match self {
            Self::Kind(_) => ProjectField::Kind,
            Self::Priority(_) => ProjectField::Priority,
            Self::BuildCommand(_) => ProjectField::BuildCommand,
            Self::RunCommand(_) => ProjectField::RunCommand,
            Self::TestCommand(_) => ProjectField::TestCommand,
        }
    }
}
