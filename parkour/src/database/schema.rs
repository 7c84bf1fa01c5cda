//! Database schema definitions and SQL constants.

/// Current schema version for the database.
///
/// This version is stored in the metadata table and is used to ensure
/// compatibility between the state file and the library.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// Key-value metadata, currently just the schema version.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// Registered projects.
///
/// `position` records insertion order, which breaks priority ties. Command
/// columns hold JSON arrays of arguments.
pub const CREATE_PROJECTS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS projects (
        path TEXT PRIMARY KEY NOT NULL,
        position INTEGER NOT NULL,
        kind TEXT,
        priority INTEGER NOT NULL DEFAULT 0,
        build_command TEXT NOT NULL DEFAULT '[]',
        run_command TEXT NOT NULL DEFAULT '[]',
        test_command TEXT NOT NULL DEFAULT '[]',
        added_at INTEGER NOT NULL,
        last_visited_at INTEGER
    )";

/// Canonical paths that may not be registered.
pub const CREATE_BLACKLIST_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS blacklist (
        path TEXT PRIMARY KEY NOT NULL
    )";

/// Index backing ordered reads of the projects table.
pub const CREATE_POSITION_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_projects_position ON projects(position)";

/// SQL statement to select the schema version from the metadata table.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// SQL statement to insert or update the schema version in the metadata table.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";

pub(super) const SELECT_PROJECTS: &str = r"
    SELECT path, kind, priority, build_command, run_command, test_command,
           added_at, last_visited_at
    FROM projects
    ORDER BY position
";

pub(super) const INSERT_PROJECT: &str = r"
    INSERT INTO projects
    (path, position, kind, priority, build_command, run_command, test_command,
     added_at, last_visited_at)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
";

pub(super) const SELECT_BLACKLIST: &str = "SELECT path FROM blacklist ORDER BY path";

pub(super) const INSERT_BLACKLIST: &str = "INSERT OR IGNORE INTO blacklist (path) VALUES (?)";
