// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! All-or-nothing artefact output.
//!
//! Contents are staged in temporary files next to their destinations and
//! renamed into place only once every artefact of a job has been staged.
//! If anything fails, staged files are discarded and destinations already
//! committed by this writer are removed, so a failed run never leaves a
//! half written header/source pair behind.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::warn;

pub struct ArtifactWriter {
    staged: Vec<(PathBuf, NamedTempFile)>,
}

impl Default for ArtifactWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ArtifactWriter {
    pub fn new() -> Self {
        Self { staged: Vec::new() }
    }

    /// Write `contents` to a temporary file in the destination directory.
    pub fn stage(&mut self, destination: &Path, contents: &str) -> Result<(), (PathBuf, std::io::Error)> {
        let fail = |e: std::io::Error| (destination.to_path_buf(), e);
        let dir = match destination.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(fail)?;
        let mut temp = NamedTempFile::new_in(&dir).map_err(fail)?;
        temp.write_all(contents.as_bytes()).map_err(fail)?;
        temp.flush().map_err(fail)?;
        self.staged.push((destination.to_path_buf(), temp));
        Ok(())
    }

    /// Rename every staged file over its destination, in staging order.
    pub fn commit(self) -> Result<Vec<PathBuf>, (PathBuf, std::io::Error)> {
        let mut committed: Vec<PathBuf> = Vec::new();
        for (destination, temp) in self.staged {
            if let Err(e) = temp.persist(&destination) {
                for path in &committed {
                    if let Err(remove) = fs::remove_file(path) {
                        warn!(path = %path.display(), error = %remove, "failed to remove partial output");
                    }
                }
                return Err((destination, e.error));
            }
            committed.push(destination);
        }
        Ok(committed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_lands_before_commit() {
        let dir = tempfile::tempdir().unwrap();
        let header = dir.path().join("out/a.h");
        let source = dir.path().join("out/a.c");

        let mut writer = ArtifactWriter::new();
        writer.stage(&header, "h").unwrap();
        writer.stage(&source, "c").unwrap();
        assert!(!header.exists());

        let written = writer.commit().unwrap();
        assert_eq!(written, vec![header.clone(), source.clone()]);
        assert_eq!(fs::read_to_string(&header).unwrap(), "h");
        assert_eq!(fs::read_to_string(&source).unwrap(), "c");
    }

    #[test]
    fn dropped_writer_leaves_no_files() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut writer = ArtifactWriter::new();
            writer.stage(&dir.path().join("a.h"), "h").unwrap();
        }
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn failed_commit_removes_earlier_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let header = dir.path().join("a.h");
        let blocked = dir.path().join("taken");
        fs::create_dir(&blocked).unwrap();
        fs::write(blocked.join("keep"), "x").unwrap();

        let mut writer = ArtifactWriter::new();
        writer.stage(&header, "h").unwrap();
        writer.stage(&blocked, "c").unwrap();
        let (path, _) = writer.commit().unwrap_err();
        assert_eq!(path, blocked);
        assert!(!header.exists());
    }
}
