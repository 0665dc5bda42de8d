use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::nav::SessionFlags;

const STATE_FILE: &str = ".chanview-state.json";

/// Persisted session state (written to .chanview-state.json)
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct SessionState {
    /// The last navigation came from quick-jump; consumed when the home
    /// page is shown again
    #[serde(default)]
    pub quick_jump_navigated: bool,
}

/// Read the state file from the site directory
pub fn read_session_state(site_dir: &Path) -> Option<SessionState> {
    let path = site_dir.join(STATE_FILE);
    let content = fs::read_to_string(&path).ok()?;
    serde_json::from_str(&content).ok()
}

/// Write the state file to the site directory
pub fn write_session_state(site_dir: &Path, state: &SessionState) -> Result<(), io::Error> {
    let path = site_dir.join(STATE_FILE);
    let content = serde_json::to_string_pretty(state)?;
    atomic_write(&path, content.as_bytes())
}

/// Write via a temp file in the same directory, then rename over `path`
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Session flags backed by the state file. Every change is written through;
/// a failed write is logged and the in-memory value still changes.
#[derive(Debug, Clone)]
pub struct FileFlags {
    dir: PathBuf,
    state: SessionState,
}

impl FileFlags {
    pub fn load(site_dir: &Path) -> Self {
        FileFlags {
            dir: site_dir.to_path_buf(),
            state: read_session_state(site_dir).unwrap_or_default(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    fn save(&self) {
        if let Err(e) = write_session_state(&self.dir, &self.state) {
            tracing::warn!(dir = %self.dir.display(), error = %e, "could not save session state");
        }
    }
}

impl SessionFlags for FileFlags {
    fn quick_jump_navigated(&self) -> bool {
        self.state.quick_jump_navigated
    }

    fn set_quick_jump_navigated(&mut self) {
        self.state.quick_jump_navigated = true;
        self.save();
    }

    fn clear_quick_jump_navigated(&mut self) {
        self.state.quick_jump_navigated = false;
        self.save();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn write_and_read_round_trip() {
        let dir = TempDir::new().unwrap();
        let state = SessionState {
            quick_jump_navigated: true,
        };
        write_session_state(dir.path(), &state).unwrap();
        assert_eq!(read_session_state(dir.path()), Some(state));
    }

    #[test]
    fn read_missing_file_returns_none() {
        let dir = TempDir::new().unwrap();
        assert!(read_session_state(dir.path()).is_none());
    }

    #[test]
    fn read_malformed_json_returns_none() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(STATE_FILE), "not json {{{").unwrap();
        assert!(read_session_state(dir.path()).is_none());
    }

    #[test]
    fn serde_defaults_on_empty_object() {
        let state: SessionState = serde_json::from_str("{}").unwrap();
        assert_eq!(state, SessionState::default());
    }

    #[test]
    fn atomic_write_replaces_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.txt");
        atomic_write(&path, b"first").unwrap();
        atomic_write(&path, b"second").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn file_flags_survive_reload() {
        let dir = TempDir::new().unwrap();
        let mut flags = FileFlags::load(dir.path());
        assert!(!flags.quick_jump_navigated());
        flags.set_quick_jump_navigated();

        let mut reloaded = FileFlags::load(dir.path());
        assert!(reloaded.quick_jump_navigated());
        reloaded.clear_quick_jump_navigated();
        assert!(!FileFlags::load(dir.path()).quick_jump_navigated());
    }

    #[test]
    fn file_flags_write_through() {
        let dir = TempDir::new().unwrap();
        let mut flags = FileFlags::load(dir.path());
        flags.set_quick_jump_navigated();
        assert!(flags.state().quick_jump_navigated);
        let state = read_session_state(dir.path()).unwrap();
        assert!(state.quick_jump_navigated);
    }

    #[test]
    fn file_flags_tolerate_unwritable_dir() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("gone");
        let mut flags = FileFlags::load(&missing);
        flags.set_quick_jump_navigated();
        assert!(flags.quick_jump_navigated());
    }
}
