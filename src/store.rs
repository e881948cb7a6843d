//! Task store - ordered task list persisted as a single JSON file
//!
//! Every mutation rewrites the whole file before returning, so the in-memory
//! list and the file on disk agree whenever no call is in flight. The write
//! goes through a temporary sibling that is renamed over the target.

use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::dispatcher::{self, Dispatch};
use tracing::{debug, error, info, warn};

use crate::error::{Result, StoreError};
use crate::task::{NewTask, Task};

const BACKUP_STAMP: &str = "%Y%m%d_%H%M%S";

/// Outcome of reading the backing file. Loading never fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Loaded(usize),
    /// No file yet; the store starts empty
    Missing,
    /// The file was unreadable or corrupt; the store starts empty
    Recovered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Stats {
    pub total: usize,
    pub completed: usize,
}

impl Stats {
    pub fn pending(&self) -> usize {
        self.total - self.completed
    }
}

#[derive(Debug)]
pub struct TaskStore {
    path: PathBuf,
    tasks: Vec<Task>,
    revision: u64,
    log: Dispatch,
}

impl TaskStore {
    /// Open the store at `path`, logging through the current default subscriber.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let log = dispatcher::get_default(Dispatch::clone);
        Self::with_dispatch(path, log)
    }

    /// Open the store at `path`, sending its diagnostics to `log`.
    pub fn with_dispatch(path: impl Into<PathBuf>, log: Dispatch) -> Self {
        let mut store = Self {
            path: path.into(),
            tasks: Vec::new(),
            revision: 0,
            log,
        };
        store.load();
        store
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Bumped by every call that changed the task list.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn list_all(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    pub fn stats(&self) -> Stats {
        Stats {
            total: self.tasks.len(),
            completed: self.tasks.iter().filter(|t| t.completed).count(),
        }
    }

    pub fn overdue(&self, today: NaiveDate) -> usize {
        self.tasks.iter().filter(|t| t.is_overdue(today)).count()
    }

    /// Replace the in-memory list with the backing file's contents.
    pub fn load(&mut self) -> LoadStatus {
        self.scoped(|store| {
            if let Some(parent) = store.parent_dir() {
                if let Err(e) = fs::create_dir_all(&parent) {
                    error!("Failed to create data directory {}: {}", parent.display(), e);
                }
            }

            let status = if !store.path.exists() {
                info!("No task file at {}, starting empty", store.path.display());
                store.tasks.clear();
                LoadStatus::Missing
            } else {
                match read_tasks(&store.path) {
                    Ok(tasks) => {
                        debug!("Loaded {} tasks from {}", tasks.len(), store.path.display());
                        let count = tasks.len();
                        store.tasks = tasks;
                        LoadStatus::Loaded(count)
                    }
                    Err(e) => {
                        warn!("Failed to load tasks, starting empty: {}", e);
                        if store.path.is_file() {
                            store.quarantine();
                        }
                        store.tasks.clear();
                        LoadStatus::Recovered
                    }
                }
            };

            store.revision += 1;
            status
        })
    }

    /// Write the full task list to the backing file.
    pub fn save(&self) -> Result<()> {
        self.scoped_ref(|store| store.persist())
    }

    /// Append a task and persist. Returns the new task's index.
    pub fn add(&mut self, new: NewTask) -> Result<usize> {
        self.scoped(|store| {
            store.tasks.push(Task::create(new));
            store.revision += 1;
            store.persist()?;

            let index = store.tasks.len() - 1;
            info!("Added task #{}: {}", index, store.tasks[index].content);
            Ok(index)
        })
    }

    /// Remove the task at `index`. Out-of-range indices are ignored.
    pub fn delete(&mut self, index: usize) -> Result<bool> {
        self.scoped(|store| {
            if index >= store.tasks.len() {
                debug!("Ignoring delete of out-of-range index {}", index);
                return Ok(false);
            }

            let removed = store.tasks.remove(index);
            store.revision += 1;
            store.persist()?;
            debug!("Deleted task #{}: {}", index, removed.content);
            Ok(true)
        })
    }

    /// Flip completion of the task at `index`. Out-of-range indices are ignored.
    pub fn toggle_complete(&mut self, index: usize) -> Result<bool> {
        self.scoped(|store| {
            let Some(task) = store.tasks.get_mut(index) else {
                debug!("Ignoring toggle of out-of-range index {}", index);
                return Ok(false);
            };

            task.completed = !task.completed;
            store.revision += 1;
            store.persist()?;
            Ok(true)
        })
    }

    /// Copy the backing file to a timestamped sibling.
    pub fn backup(&self) -> Result<PathBuf> {
        self.scoped_ref(|store| {
            if !store.path.exists() {
                let e = StoreError::NothingToBackUp(store.path.clone());
                error!("{}", e);
                return Err(e);
            }

            let target = unused_backup_path(&store.path, Local::now().naive_local());
            fs::copy(&store.path, &target)
                .map_err(|source| StoreError::Write {
                    path: target.clone(),
                    source,
                })
                .inspect_err(|e| error!("Backup failed: {}", e))?;

            info!("Backed up tasks to {}", target.display());
            Ok(target)
        })
    }

    /// Write the current task list to `path` in the backing-file format.
    pub fn export(&self, path: &Path) -> Result<()> {
        self.scoped_ref(|store| {
            write_tasks(path, &store.tasks).inspect_err(|e| error!("Export failed: {}", e))?;
            info!("Exported {} tasks to {}", store.tasks.len(), path.display());
            Ok(())
        })
    }

    /// Append every task stored in `path`, then persist. No deduplication.
    pub fn import_from(&mut self, path: &Path) -> Result<usize> {
        self.scoped(|store| {
            let imported = read_tasks(path).inspect_err(|e| error!("Import failed: {}", e))?;
            let count = imported.len();

            store.tasks.extend(imported);
            if count > 0 {
                store.revision += 1;
            }
            store.persist()?;

            info!("Imported {} tasks from {}", count, path.display());
            Ok(count)
        })
    }

    fn persist(&self) -> Result<()> {
        write_tasks(&self.path, &self.tasks).inspect_err(|e| error!("Failed to save tasks: {}", e))
    }

    /// Move an unparseable backing file out of the way so the next save
    /// does not overwrite it.
    fn quarantine(&self) {
        let stamp = Local::now().format(BACKUP_STAMP);
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "tasks".to_string());
        let target = self.path.with_file_name(format!("{}.corrupt-{}", file_name, stamp));

        match fs::rename(&self.path, &target) {
            Ok(()) => warn!("Moved unreadable task file to {}", target.display()),
            Err(e) => error!(
                "Failed to move unreadable task file {}: {}",
                self.path.display(),
                e
            ),
        }
    }

    fn parent_dir(&self) -> Option<PathBuf> {
        self.path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
    }

    fn scoped<R>(&mut self, op: impl FnOnce(&mut Self) -> R) -> R {
        let log = self.log.clone();
        dispatcher::with_default(&log, || op(self))
    }

    fn scoped_ref<R>(&self, op: impl FnOnce(&Self) -> R) -> R {
        dispatcher::with_default(&self.log, || op(self))
    }
}

/// `<stem>_backup_<stamp>.<ext>` next to `path`
pub fn backup_path(path: &Path, at: NaiveDateTime) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "tasks".to_string());
    let mut name = format!("{}_backup_{}", stem, at.format(BACKUP_STAMP));
    if let Some(ext) = path.extension() {
        name.push('.');
        name.push_str(&ext.to_string_lossy());
    }
    path.with_file_name(name)
}

/// `backup_path`, with a `_<n>` suffix on the stem if that name is taken.
fn unused_backup_path(path: &Path, at: NaiveDateTime) -> PathBuf {
    let base = backup_path(path, at);
    if !base.exists() {
        return base;
    }

    let stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = base.extension().map(|e| e.to_string_lossy().into_owned());
    (1u32..)
        .map(|n| {
            let name = match &ext {
                Some(ext) => format!("{}_{}.{}", stem, n, ext),
                None => format!("{}_{}", stem, n),
            };
            base.with_file_name(name)
        })
        .find(|candidate| !candidate.exists())
        .unwrap_or(base)
}

fn read_tasks(path: &Path) -> Result<Vec<Task>> {
    let content = fs::read(path).map_err(|source| StoreError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    if content.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }

    // Bytes that are not UTF-8 surface as a parse error
    serde_json::from_slice(&content).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn write_tasks(path: &Path, tasks: &[Task]) -> Result<()> {
    let mut content = serde_json::to_string_pretty(tasks)?;
    content.push('\n');

    let write_err = |source: std::io::Error| StoreError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(write_err)?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(content.as_bytes()).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}
