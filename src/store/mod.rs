//! Trajectory store.
//!
//! Loads a directory tree of recorded trajectories into memory:
//!
//! ```text
//! root/
//!   traj1/
//!     success/*.txt
//!     failed/*.txt
//!   traj2/
//!   ...
//! ```
//!
//! Groups are ordered by the integer in their folder name (`traj2` before
//! `traj10`) and addressed by 0-based position. The store is immutable once
//! loaded; navigation goes through [`NavigationState`].

mod cursor;

pub use cursor::{step, Direction, NavigationState};

use std::path::{Path, PathBuf};

use tracing::{debug, instrument, trace, warn};
use walkdir::WalkDir;

use crate::error::{Result, ViewerError};
use crate::model::{Outcome, TrajectoryGroup, Transcript};

/// Folder name prefix for trajectory groups.
pub const GROUP_PREFIX: &str = "traj";

/// File suffix of transcript files.
pub const TRANSCRIPT_SUFFIX: &str = ".txt";

/// Parse the `N` out of a `traj<N>` folder name.
pub fn parse_group_index(name: &str) -> Result<u64> {
    name.strip_prefix(GROUP_PREFIX)
        .and_then(|n| n.parse::<u64>().ok())
        .ok_or_else(|| ViewerError::malformed_name(name))
}

/// In-memory collection of trajectory groups.
#[derive(Debug, Clone)]
pub struct TrajectoryStore {
    root: PathBuf,
    groups: Vec<TrajectoryGroup>,
}

impl TrajectoryStore {
    /// Load every `traj<N>` folder under `root`.
    ///
    /// Fails on the first folder whose name does not parse. Non-directory
    /// entries directly under `root` are ignored.
    #[instrument(skip_all, fields(root = %root.as_ref().display()))]
    pub fn load(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(ViewerError::DirectoryNotFound {
                path: root.to_path_buf(),
            });
        }

        let mut groups = Vec::new();
        let walker = WalkDir::new(root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name();

        for entry in walker {
            let entry = entry.map_err(|e| {
                ViewerError::io(format!("Failed to list {}", root.display()), e.into())
            })?;
            if !entry.file_type().is_dir() {
                trace!(path = %entry.path().display(), "Skipping non-directory entry");
                continue;
            }

            let name = entry.file_name().to_string_lossy().into_owned();
            let index = parse_group_index(&name)?;
            groups.push(load_group(entry.path(), name, index)?);
        }

        groups.sort_by_key(|g| g.index);
        debug!(groups = groups.len(), "Loaded trajectory store");

        Ok(Self {
            root: root.to_path_buf(),
            groups,
        })
    }

    /// Build a store from groups already in memory, sorting them by index.
    #[must_use]
    pub fn from_groups(root: impl Into<PathBuf>, mut groups: Vec<TrajectoryGroup>) -> Self {
        groups.sort_by_key(|g| g.index);
        Self {
            root: root.into(),
            groups,
        }
    }

    /// Root directory the store was loaded from.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// All groups, in index order.
    #[must_use]
    pub fn groups(&self) -> &[TrajectoryGroup] {
        &self.groups
    }

    /// Number of groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Check if the store has no groups.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Group at a 0-based position.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<&TrajectoryGroup> {
        self.groups.get(position)
    }

    /// Position of the group with the given folder name.
    #[must_use]
    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.groups.iter().position(|g| g.name == name)
    }

    /// Group at a position, or an error naming the selector.
    pub fn require(&self, position: usize) -> Result<&TrajectoryGroup> {
        self.get(position).ok_or_else(|| ViewerError::GroupNotFound {
            selector: format!("#{position} (store has {} groups)", self.len()),
        })
    }

    /// Group under the cursor.
    #[must_use]
    pub fn current(&self, state: NavigationState) -> Option<&TrajectoryGroup> {
        if self.is_empty() {
            return None;
        }
        self.get(state.cursor % self.len())
    }

    /// Move the cursor one group in `direction`.
    #[must_use]
    pub fn navigate(&self, state: NavigationState, direction: Direction) -> NavigationState {
        state.advance(self.len(), direction)
    }
}

fn load_group(dir: &Path, name: String, index: u64) -> Result<TrajectoryGroup> {
    let success = load_transcripts(&dir.join(Outcome::Success.dir_name()))?;
    let failed = load_transcripts(&dir.join(Outcome::Failed.dir_name()))?;
    debug!(
        group = %name,
        success = success.len(),
        failed = failed.len(),
        "Loaded trajectory group"
    );
    Ok(TrajectoryGroup {
        name,
        index,
        success,
        failed,
    })
}

/// Read every `.txt` file in `dir`, sorted by file name.
///
/// A missing directory yields no transcripts.
fn load_transcripts(dir: &Path) -> Result<Vec<Transcript>> {
    if !dir.is_dir() {
        debug!(path = %dir.display(), "Outcome directory missing, treating as empty");
        return Ok(Vec::new());
    }

    let mut transcripts = Vec::new();
    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();

    for entry in walker {
        let entry = entry
            .map_err(|e| ViewerError::io(format!("Failed to list {}", dir.display()), e.into()))?;
        let file_name = entry.file_name().to_string_lossy();
        if !file_name.ends_with(TRANSCRIPT_SUFFIX) {
            continue;
        }
        if !entry.file_type().is_file() {
            warn!(path = %entry.path().display(), "Skipping non-file transcript entry");
            continue;
        }

        let path = entry.path();
        let text = std::fs::read_to_string(path).map_err(|e| {
            ViewerError::from_io_at(path, format!("Failed to read transcript {}", path.display()), e)
        })?;
        transcripts.push(Transcript::new(file_name.into_owned(), text));
    }

    Ok(transcripts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_parse_group_index() {
        assert_eq!(parse_group_index("traj0").unwrap(), 0);
        assert_eq!(parse_group_index("traj42").unwrap(), 42);
        assert!(matches!(
            parse_group_index("trajX"),
            Err(ViewerError::MalformedName { .. })
        ));
        assert!(parse_group_index("run1").is_err());
        assert!(parse_group_index("traj").is_err());
    }

    #[test]
    fn test_numeric_folder_order() {
        let dir = tempdir().unwrap();
        for name in ["traj10", "traj2", "traj1"] {
            fs::create_dir_all(dir.path().join(name)).unwrap();
        }

        let store = TrajectoryStore::load(dir.path()).unwrap();
        let names: Vec<_> = store.groups().iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["traj1", "traj2", "traj10"]);
    }

    #[test]
    fn test_transcripts_sorted_and_filtered() {
        let dir = tempdir().unwrap();
        write(dir.path(), "traj1/success/b.txt", "second");
        write(dir.path(), "traj1/success/a.txt", "first");
        write(dir.path(), "traj1/success/notes.md", "ignored");
        write(dir.path(), "traj1/failed/x.txt", "boom");

        let store = TrajectoryStore::load(dir.path()).unwrap();
        let group = store.get(0).unwrap();
        let texts: Vec<_> = group.success.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second"]);
        assert_eq!(group.success[0].name, "a.txt");
        assert_eq!(group.failed.len(), 1);
    }

    #[test]
    fn test_missing_outcome_dirs_are_empty() {
        let dir = tempdir().unwrap();
        write(dir.path(), "traj3/success/only.txt", "ok");

        let store = TrajectoryStore::load(dir.path()).unwrap();
        let group = store.get(0).unwrap();
        assert_eq!(group.index, 3);
        assert_eq!(group.success.len(), 1);
        assert!(group.failed.is_empty());
    }

    #[test]
    fn test_malformed_folder_fails_load() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("traj1")).unwrap();
        fs::create_dir_all(dir.path().join("scratch")).unwrap();

        let err = TrajectoryStore::load(dir.path()).unwrap_err();
        assert!(matches!(err, ViewerError::MalformedName { ref name } if name == "scratch"));
    }

    #[test]
    fn test_stray_files_at_root_ignored() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("traj1")).unwrap();
        fs::write(dir.path().join("README"), "not a group").unwrap();

        let store = TrajectoryStore::load(dir.path()).unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_missing_root() {
        let dir = tempdir().unwrap();
        let err = TrajectoryStore::load(dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, ViewerError::DirectoryNotFound { .. }));
    }

    #[test]
    fn test_navigation_through_store() {
        let dir = tempdir().unwrap();
        for name in ["traj1", "traj2", "traj3"] {
            fs::create_dir_all(dir.path().join(name)).unwrap();
        }
        let store = TrajectoryStore::load(dir.path()).unwrap();

        let state = NavigationState::at(2);
        assert_eq!(store.current(state).unwrap().name, "traj3");
        let state = store.navigate(state, Direction::Next);
        assert_eq!(state.cursor, 0);
        let state = store.navigate(state, Direction::Previous);
        assert_eq!(state.cursor, 2);
        assert_eq!(store.position_of("traj2"), Some(1));
        assert!(store.require(5).is_err());
    }

    #[test]
    fn test_empty_store_navigation() {
        let store = TrajectoryStore::from_groups("/none", Vec::new());
        let state = NavigationState::default();
        assert!(store.current(state).is_none());
        assert_eq!(store.navigate(state, Direction::Next), state);
    }
}
