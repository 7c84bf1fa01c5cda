//! The persisted registry of known projects.
//!
//! A [`Registry`] starts unloaded. [`Registry::load`] reads the state file
//! (an absent file is an empty registry) and every other operation fails
//! with [`StoreError::NotInitialized`] until it has been called.
//!
//! Mutations re-read the stored state, apply the change, and write it back
//! inside one exclusive transaction, then refresh the in-memory copy.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use log::debug;

use crate::database::{path_text, Database, DatabaseConfig, RegistrySnapshot};
use crate::error::StoreError;
use crate::path::{canonicalize_with, CanonicalPath, EntryKind, FileSystem, OsFileSystem};
use crate::project::{FieldUpdate, Project};

/// The project registry.
///
/// # Examples
///
/// ```no_run
/// use parkour::database::DatabaseConfig;
/// use parkour::Registry;
///
/// let mut registry = Registry::new(DatabaseConfig::new("/tmp/parkour.db"));
/// registry.load().unwrap();
///
/// registry.add("~/src/parkour").unwrap();
/// let project = registry.get("~/src/parkour").unwrap().unwrap();
/// assert_eq!(project.priority(), 1);
///
/// for project in registry.list().unwrap() {
///     println!("{:>4} {}", project.priority(), project.path());
/// }
/// ```
#[derive(Debug)]
pub struct Registry<F = OsFileSystem> {
    fs: F,
    config: DatabaseConfig,
    db: Option<Database>,
    state: Option<RegistrySnapshot>,
}

impl Registry<OsFileSystem> {
    /// An unloaded registry stored at `config.path`.
    #[must_use]
    pub fn new(config: DatabaseConfig) -> Self {
        Self::with_file_system(config, OsFileSystem)
    }
}

impl<F: FileSystem> Registry<F> {
    /// An unloaded registry that reads the filesystem through `fs`.
    pub fn with_file_system(config: DatabaseConfig, fs: F) -> Self {
        Self {
            fs,
            config,
            db: None,
            state: None,
        }
    }

    /// Location of the state file.
    #[must_use]
    pub fn database_path(&self) -> &Path {
        &self.config.path
    }

    /// Whether [`load`](Self::load) has succeeded.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.state.is_some()
    }

    /// Populate the registry from the state file.
    ///
    /// A missing file yields an empty registry and is not created until the
    /// first write.
    ///
    /// # Errors
    ///
    /// Returns an I/O-class error if the file exists but cannot be opened,
    /// has an unsupported schema version, or cannot be decoded.
    pub fn load(&mut self) -> Result<(), StoreError> {
        if self.config.path.exists() {
            let db = self.database()?;
            let state = db.load_state()?;
            debug!(
                "loaded {} projects from {}",
                state.projects.len(),
                self.config.path.display()
            );
            self.state = Some(state);
        } else {
            debug!("no state at {}; starting empty", self.config.path.display());
            self.state = Some(RegistrySnapshot::default());
        }
        Ok(())
    }

    /// Write the whole in-memory registry to the state file.
    ///
    /// # Errors
    ///
    /// `NotInitialized` before `load`, or an I/O-class error.
    pub fn save(&mut self) -> Result<(), StoreError> {
        let state = self.state.clone().ok_or(StoreError::NotInitialized)?;
        self.database()?.save_state(&state)
    }

    /// Look up a project and count the visit.
    ///
    /// On a hit, the priority is incremented and persisted before the
    /// updated project is returned.
    ///
    /// # Errors
    ///
    /// `NotInitialized` before `load`, a `Path` error if `path` cannot be
    /// canonicalized, or an I/O-class error while persisting.
    pub fn get(&mut self, path: impl AsRef<Path>) -> Result<Option<Project>, StoreError> {
        self.loaded()?;
        let key = self.canonical(path.as_ref())?;
        if !self.is_stored() {
            return Ok(None);
        }

        let now = SystemTime::now();
        self.mutate(|state| {
            Ok(position_of(state, &key).map(|i| {
                let project = &mut state.projects[i];
                project.record_visit(now);
                project.clone()
            }))
        })
    }

    /// Whether the canonical form of `path` is registered. Does not count
    /// as a visit.
    ///
    /// # Errors
    ///
    /// `NotInitialized` before `load`, or a `Path` error.
    pub fn contains(&self, path: impl AsRef<Path>) -> Result<bool, StoreError> {
        self.loaded()?;
        let key = self.canonical(path.as_ref())?;
        Ok(self.find(&key).is_some())
    }

    /// Register a project with priority 0 and no kind.
    ///
    /// # Errors
    ///
    /// `Blacklisted` if the canonical path is blacklisted, `AlreadyExists`
    /// if it is already registered, plus the errors of [`get`](Self::get).
    pub fn add(&mut self, path: impl AsRef<Path>) -> Result<Project, StoreError> {
        self.add_with_kind(path, None)
    }

    /// Register a project with an initial kind in a single write.
    ///
    /// # Errors
    ///
    /// The same as [`add`](Self::add).
    pub fn add_with_kind(
        &mut self,
        path: impl AsRef<Path>,
        kind: Option<String>,
    ) -> Result<Project, StoreError> {
        self.loaded()?;
        let key = self.canonical(path.as_ref())?;

        let project = self.mutate(|state| {
            if state.blacklist.contains(key.as_path()) {
                return Err(StoreError::Blacklisted {
                    path: key.as_path().to_path_buf(),
                });
            }
            if position_of(state, &key).is_some() {
                return Err(StoreError::AlreadyExists {
                    path: key.as_path().to_path_buf(),
                });
            }
            let project = Project::builder(key.clone()).kind(kind).build();
            state.projects.push(project.clone());
            Ok(project)
        })?;
        debug!("registered {}", project.path());
        Ok(project)
    }

    /// Deregister a project. Returns whether anything was removed.
    ///
    /// # Errors
    ///
    /// `NotInitialized`, a `Path` error, or an I/O-class error.
    pub fn remove(&mut self, path: impl AsRef<Path>) -> Result<bool, StoreError> {
        self.loaded()?;
        let key = self.canonical(path.as_ref())?;
        if !self.is_stored() {
            return Ok(false);
        }

        let removed = self.mutate(|state| {
            Ok(position_of(state, &key).map(|i| state.projects.remove(i)).is_some())
        })?;
        if removed {
            debug!("deregistered {key}");
        }
        Ok(removed)
    }

    /// Non-blacklisted projects, highest priority first, ties in
    /// registration order.
    ///
    /// # Errors
    ///
    /// `NotInitialized` before `load`.
    pub fn list(&self) -> Result<Vec<Project>, StoreError> {
        let state = self.loaded()?;
        let mut projects: Vec<Project> = state
            .projects
            .iter()
            .filter(|p| !state.blacklist.contains(p.path().as_path()))
            .cloned()
            .collect();
        projects.sort_by(|a, b| b.priority().cmp(&a.priority()));
        Ok(projects)
    }

    /// Projects from [`list`](Self::list) whose name, path, kind or
    /// priority contains `term`.
    ///
    /// # Errors
    ///
    /// `NotInitialized` before `load`.
    pub fn search(&self, term: &str) -> Result<Vec<Project>, StoreError> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|p| p.matches(term))
            .collect())
    }

    /// Apply a typed field update to a registered project.
    ///
    /// # Errors
    ///
    /// `NotFound` if the project is not registered, plus `NotInitialized`,
    /// `Path` and I/O-class errors.
    pub fn update(
        &mut self,
        path: impl AsRef<Path>,
        update: FieldUpdate,
    ) -> Result<Project, StoreError> {
        self.loaded()?;
        let key = self.canonical(path.as_ref())?;
        if !self.is_stored() {
            return Err(StoreError::NotFound {
                path: key.into_path_buf(),
            });
        }

        let field = update.field();
        let project = self.mutate(|state| {
            let i = position_of(state, &key).ok_or_else(|| StoreError::NotFound {
                path: key.as_path().to_path_buf(),
            })?;
            state.projects[i].apply(update);
            Ok(state.projects[i].clone())
        })?;
        debug!("updated {field} of {}", project.path());
        Ok(project)
    }

    /// Parse `field` and `value`, then [`update`](Self::update).
    ///
    /// The field name and value are checked before the project is looked up.
    ///
    /// # Errors
    ///
    /// `UnknownField`, `InvalidValue`, plus the errors of `update`.
    pub fn update_field(
        &mut self,
        path: impl AsRef<Path>,
        field: &str,
        value: &str,
    ) -> Result<Project, StoreError> {
        self.loaded()?;
        let update = FieldUpdate::parse(field, value)?;
        self.update(path, update)
    }

    /// Add or remove a canonical path from the blacklist. Registered
    /// projects are left alone; they are just hidden from listings.
    ///
    /// # Errors
    ///
    /// `NotInitialized`, a `Path` error, or an I/O-class error.
    pub fn set_blacklisted(
        &mut self,
        path: impl AsRef<Path>,
        blacklisted: bool,
    ) -> Result<(), StoreError> {
        self.loaded()?;
        let key = self.canonical(path.as_ref())?.into_path_buf();
        if !blacklisted && !self.is_stored() {
            return Ok(());
        }

        self.mutate(|state| {
            if blacklisted {
                state.blacklist.insert(key.clone());
            } else {
                state.blacklist.remove(&key);
            }
            Ok(())
        })?;
        debug!(
            "{} {}",
            if blacklisted { "blacklisted" } else { "unblacklisted" },
            key.display()
        );
        Ok(())
    }

    /// All blacklisted paths in sorted order.
    ///
    /// # Errors
    ///
    /// `NotInitialized` before `load`.
    pub fn list_blacklist(&self) -> Result<Vec<PathBuf>, StoreError> {
        Ok(self.loaded()?.blacklist.iter().cloned().collect())
    }

    /// Registered projects whose directory no longer exists, in
    /// registration order. Nothing is changed.
    ///
    /// # Errors
    ///
    /// `NotInitialized` before `load`.
    pub fn missing(&self) -> Result<Vec<PathBuf>, StoreError> {
        Ok(self
            .loaded()?
            .projects
            .iter()
            .map(|p| p.path().as_path())
            .filter(|path| !matches!(self.fs.entry_kind(path), Ok(EntryKind::Directory)))
            .map(Path::to_path_buf)
            .collect())
    }

    /// Deregister every project whose directory no longer exists.
    ///
    /// Returns the removed paths in registration order.
    ///
    /// # Errors
    ///
    /// `NotInitialized` before `load`, or an I/O-class error.
    pub fn prune(&mut self) -> Result<Vec<PathBuf>, StoreError> {
        let stale = self.missing()?;
        if stale.is_empty() {
            return Ok(stale);
        }

        let removed = self.mutate(|state| {
            let mut removed = Vec::new();
            state.projects.retain(|p| {
                let keep = !stale.iter().any(|s| s == p.path().as_path());
                if !keep {
                    removed.push(p.path().as_path().to_path_buf());
                }
                keep
            });
            Ok(removed)
        })?;
        debug!("pruned {} missing projects", removed.len());
        Ok(removed)
    }

    fn loaded(&self) -> Result<&RegistrySnapshot, StoreError> {
        self.state.as_ref().ok_or(StoreError::NotInitialized)
    }

    fn canonical(&self, path: &Path) -> Result<CanonicalPath, StoreError> {
        let key = canonicalize_with(&self.fs, path)?;
        path_text(key.as_path())?;
        Ok(key)
    }

    /// Whether a state file exists yet. Without one there is nothing to
    /// read-modify-write, and lookups must not create it.
    fn is_stored(&self) -> bool {
        self.db.is_some() || self.config.path.exists()
    }

    fn find(&self, key: &CanonicalPath) -> Option<&Project> {
        self.state
            .as_ref()
            .and_then(|state| state.projects.iter().find(|p| p.path() == key))
    }

    fn database(&mut self) -> Result<&mut Database, StoreError> {
        let db = match self.db.take() {
            Some(db) => db,
            None => Database::open(self.config.clone())?,
        };
        Ok(self.db.insert(db))
    }

    fn mutate<T>(
        &mut self,
        change: impl FnOnce(&mut RegistrySnapshot) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let (state, value) = self.database()?.update_state(change)?;
        self.state = Some(state);
        Ok(value)
    }
}

fn position_of(state: &RegistrySnapshot, key: &CanonicalPath) -> Option<usize> {
    state.projects.iter().position(|p| p.path() == key)
}
