//! Live filesystem adapter using `std::fs` and `walkdir`.

use std::path::Path;

use walkdir::WalkDir;

use crate::error::PortError;
use crate::ports::filesystem::FileSystem;

/// Live filesystem adapter backed by real disk I/O.
pub struct LiveFileSystem;

impl FileSystem for LiveFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String, PortError> {
        Ok(std::fs::read_to_string(path)?)
    }

    fn write_atomic(&self, path: &Path, contents: &str) -> Result<(), PortError> {
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent)?;
        let name = path
            .file_name()
            .ok_or_else(|| format!("not a file path: {}", path.display()))?
            .to_string_lossy();
        let staging = parent.join(format!(".{name}.tmp"));
        std::fs::write(&staging, contents)?;
        if let Err(err) = std::fs::rename(&staging, path) {
            let _ = std::fs::remove_file(&staging);
            return Err(err.into());
        }
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn walk_files(&self, root: &Path) -> Result<Vec<String>, PortError> {
        let mut files = Vec::new();
        // Linked directories are listed as entries, not descended into;
        // links to files (dangling ones included) count as files.
        for entry in WalkDir::new(root).follow_links(false) {
            let entry = entry?;
            let file_type = entry.file_type();
            let is_file =
                file_type.is_file() || (file_type.is_symlink() && !entry.path().is_dir());
            if !is_file {
                continue;
            }
            let relative = entry.path().strip_prefix(root)?;
            let parts: Vec<_> =
                relative.components().map(|c| c.as_os_str().to_string_lossy()).collect();
            files.push(parts.join("/"));
        }
        files.sort();
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walk_files_lists_nested_files_sorted() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("b/c")).unwrap();
        std::fs::write(dir.path().join("b/c/z.js"), "").unwrap();
        std::fs::write(dir.path().join("b/a.js"), "").unwrap();
        std::fs::write(dir.path().join("top.js"), "").unwrap();

        let files = LiveFileSystem.walk_files(dir.path()).unwrap();
        assert_eq!(files, vec!["b/a.js", "b/c/z.js", "top.js"]);
    }

    #[cfg(unix)]
    #[test]
    fn walk_files_lists_linked_files_but_not_linked_directories() {
        use std::os::unix::fs::symlink;

        let dir = tempfile::tempdir().unwrap();
        let outside = tempfile::tempdir().unwrap();
        std::fs::write(outside.path().join("extra.js"), "").unwrap();
        std::fs::create_dir_all(dir.path().join("real")).unwrap();
        std::fs::write(dir.path().join("real/a.js"), "").unwrap();
        symlink(dir.path().join("real/a.js"), dir.path().join("alias.js")).unwrap();
        symlink(outside.path(), dir.path().join("linked")).unwrap();
        symlink(dir.path(), dir.path().join("real/loop")).unwrap();

        let files = LiveFileSystem.walk_files(dir.path()).unwrap();
        assert_eq!(files, vec!["alias.js", "real/a.js"]);
    }

    #[test]
    fn walk_files_fails_on_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        assert!(LiveFileSystem.walk_files(&dir.path().join("absent")).is_err());
    }

    #[test]
    fn write_atomic_replaces_contents_and_leaves_no_staging_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("gen/out.go");
        LiveFileSystem.write_atomic(&out, "first").unwrap();
        LiveFileSystem.write_atomic(&out, "second").unwrap();

        assert_eq!(std::fs::read_to_string(&out).unwrap(), "second");
        let names: Vec<_> = std::fs::read_dir(dir.path().join("gen"))
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["out.go"]);
    }
}
