use crate::context::ContextBuilder;
use crate::error::{PatchpalError, Result};
use crate::llm::Message;
use std::path::{Component, Path, PathBuf};
use std::time::SystemTime;

/// A file the session may read and rewrite. Content is never cached.
#[derive(Debug, Clone)]
pub struct TrackedFile {
    /// Path as the user gave it; this is what the model sees.
    pub display: String,
    pub path: PathBuf,
    /// Modification time as of the last refresh. `None` if unreadable.
    pub modified: Option<SystemTime>,
}

impl TrackedFile {
    fn disk_modified(&self) -> Option<SystemTime> {
        modified_time(&self.path)
    }
}

fn modified_time(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}

/// The fixed set of files a session works on, rooted at a directory.
#[derive(Debug, Clone)]
pub struct TrackedFiles {
    root: PathBuf,
    files: Vec<TrackedFile>,
}

impl TrackedFiles {
    /// Track `paths` relative to `root`, in the given order.
    ///
    /// Missing files are created empty when their directory exists;
    /// anything else that cannot be read is an error.
    pub fn open<S: AsRef<str>>(root: impl Into<PathBuf>, paths: &[S]) -> Result<Self> {
        let root = root.into();
        let mut files: Vec<TrackedFile> = Vec::new();

        for raw in paths {
            let display = raw.as_ref().to_string();
            let path = root.join(&display);
            if files.iter().any(|f| f.path == path) {
                continue;
            }

            if path.is_dir() {
                return Err(PatchpalError::path(&path, "is a directory"));
            }
            if !path.exists() {
                let parent_ok = path.parent().map_or(true, |p| p.as_os_str().is_empty() || p.is_dir());
                if !parent_ok {
                    return Err(PatchpalError::path(&path, "parent directory does not exist"));
                }
                std::fs::write(&path, "")
                    .map_err(|e| PatchpalError::path(&path, format!("cannot create: {e}")))?;
                tracing::info!("Created empty tracked file {}", path.display());
            }
            std::fs::File::open(&path)
                .map_err(|e| PatchpalError::path(&path, format!("cannot read: {e}")))?;

            files.push(TrackedFile {
                modified: modified_time(&path),
                display,
                path,
            });
        }

        if files.is_empty() {
            return Err(PatchpalError::Config("no files to track".into()));
        }

        Ok(Self { root, files })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrackedFile> {
        self.files.iter()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Map a path written by the model to a location on disk.
    ///
    /// Tracked paths resolve to themselves. Other paths must be relative
    /// and stay below the root, or be absolute and already under it.
    pub fn resolve(&self, raw: &str) -> Result<PathBuf> {
        if let Some(file) = self.files.iter().find(|f| f.display == raw) {
            return Ok(file.path.clone());
        }

        let candidate = Path::new(raw);
        let escapes = candidate
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)));
        if escapes {
            return Err(PatchpalError::path(candidate, "path leaves the working directory"));
        }

        if candidate.is_absolute() {
            if candidate.starts_with(&self.root) {
                return Ok(candidate.to_path_buf());
            }
            return Err(PatchpalError::path(candidate, "absolute path outside the working directory"));
        }

        let relative: PathBuf = candidate
            .components()
            .filter(|c| !matches!(c, Component::CurDir))
            .collect();
        Ok(self.root.join(relative))
    }

    /// Re-stat every file, record the times and return the newest one.
    pub fn refresh(&mut self) -> Option<SystemTime> {
        for file in &mut self.files {
            file.modified = file.disk_modified();
        }
        self.files.iter().filter_map(|f| f.modified).max()
    }

    /// Files whose modification time moved forward since the last refresh.
    pub fn changed_since_refresh(&self) -> Vec<&TrackedFile> {
        self.files
            .iter()
            .filter(|f| match (f.disk_modified(), f.modified) {
                (Some(now), Some(then)) => now > then,
                (Some(_), None) => true,
                _ => false,
            })
            .collect()
    }

    /// Read every file from disk and quote it for the model.
    /// Unreadable files show up empty.
    pub fn snapshot(&self) -> Vec<Message> {
        let mut builder = ContextBuilder::new();
        for file in &self.files {
            let content = std::fs::read_to_string(&file.path).unwrap_or_else(|e| {
                tracing::warn!("Cannot read {}: {e}", file.path.display());
                String::new()
            });
            builder = builder.add_file(&file.display, content);
        }
        builder.into_messages()
    }
}

/// Detects edits made to tracked files outside the session by comparing the
/// newest modification time across all of them with the last one seen.
#[derive(Debug, Clone, Default)]
pub struct ChangeDetector {
    last_modified: Option<SystemTime>,
}

impl ChangeDetector {
    /// Start from the current state of `files`; nothing is reported for it.
    pub fn new(files: &mut TrackedFiles) -> Self {
        Self {
            last_modified: files.refresh(),
        }
    }

    pub fn last_modified(&self) -> Option<SystemTime> {
        self.last_modified
    }

    /// True once per forward move of the newest modification time.
    /// The recorded time is updated whether or not a change is reported.
    pub fn check(&mut self, files: &mut TrackedFiles) -> bool {
        let current = files.refresh();
        let changed = match (current, self.last_modified) {
            (Some(now), Some(then)) => now > then,
            (Some(_), None) => true,
            (None, _) => false,
        };
        self.last_modified = current;
        changed
    }

    /// Accept the current state of `files` as seen, e.g. after our own writes.
    pub fn reset(&mut self, files: &mut TrackedFiles) {
        self.last_modified = files.refresh();
    }
}
