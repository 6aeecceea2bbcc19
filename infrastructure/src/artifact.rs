//! Final-artifact persistence
//!
//! Writes the producer's final artifact once at workflow end, overwriting
//! any previous run's output.

use std::io;
use std::path::Path;

/// Write `content` to `path`, creating parent directories as needed.
pub fn persist_artifact(path: impl AsRef<Path>, content: &str) -> io::Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("final_fixed_code.py");

        persist_artifact(&path, "x = 1\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "x = 1\n");

        // Overwrite, never append.
        persist_artifact(&path, "x = 2\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "x = 2\n");
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/run/final.py");
        persist_artifact(&path, "ok").unwrap();
        assert!(path.exists());
    }
}
