//! Directory-listing primitive used by the completion engine.

use std::fs;
use std::io;
use std::path::Path;

/// One directory entry as seen by completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntryInfo {
    pub name: String,
    /// Entry is (or links to) a directory.
    pub is_dir: bool,
    /// The calling user may execute (or, for directories, search) the entry.
    pub executable: bool,
}

impl DirEntryInfo {
    pub fn file(name: &str, executable: bool) -> Self {
        Self {
            name: name.to_string(),
            is_dir: false,
            executable,
        }
    }

    pub fn dir(name: &str) -> Self {
        Self {
            name: name.to_string(),
            is_dir: true,
            executable: true,
        }
    }
}

/// Enumerates directory entries in whatever order the backing store yields.
pub trait DirectoryLister {
    /// Entries of `dir` whose names start with `prefix`.
    ///
    /// Only matching entries are inspected, so a short prefix in a large
    /// `PATH` directory does not stat every file.
    fn list(&self, dir: &Path, prefix: &str) -> io::Result<Vec<DirEntryInfo>>;
}

/// Lister backed by the real filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsLister;

impl DirectoryLister for FsLister {
    fn list(&self, dir: &Path, prefix: &str) -> io::Result<Vec<DirEntryInfo>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir)? {
            // Entries can vanish mid-scan; skip them rather than fail the dir.
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::trace!(dir = %dir.display(), error = %err, "skipping entry");
                    continue;
                }
            };
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if !name.starts_with(prefix) {
                continue;
            }
            let path = entry.path();
            // `fs::metadata` follows symlinks so linked directories still descend.
            let is_dir = fs::metadata(&path).map(|m| m.is_dir()).unwrap_or(false);
            entries.push(DirEntryInfo {
                executable: is_executable(&path),
                name,
                is_dir,
            });
        }
        Ok(entries)
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let Ok(c_path) = CString::new(path.as_os_str().as_bytes()) else {
        return false;
    };
    // SAFETY: `c_path` is a valid NUL-terminated string that outlives the call.
    unsafe { libc::access(c_path.as_ptr(), libc::X_OK) == 0 }
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testsupport::TestTempDir;

    #[cfg(unix)]
    fn set_mode(path: &Path, mode: u32) {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(mode)).expect("chmod");
    }

    #[test]
    fn lists_files_and_directories() {
        let fixture = TestTempDir::new("lister");
        fixture.write_text("notes.txt", "hi");
        fs::create_dir(fixture.child("src")).unwrap();

        let mut entries = FsLister.list(fixture.path(), "").expect("list");
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        let summary: Vec<(&str, bool)> = entries
            .iter()
            .map(|e| (e.name.as_str(), e.is_dir))
            .collect();
        assert_eq!(summary, vec![("notes.txt", false), ("src", true)]);
    }

    #[cfg(unix)]
    #[test]
    fn reports_execute_permission() {
        let fixture = TestTempDir::new("lister-exec");
        let tool = fixture.write_text("tool", "#!/bin/sh\n");
        let data = fixture.write_text("data", "plain");
        set_mode(&tool, 0o755);
        set_mode(&data, 0o644);

        let entries = FsLister.list(fixture.path(), "").expect("list");
        let exec = |name: &str| entries.iter().find(|e| e.name == name).unwrap().executable;
        assert!(exec("tool"));
        assert!(!exec("data"));
    }

    #[test]
    fn prefix_filters_before_inspection() {
        let fixture = TestTempDir::new("lister-prefix");
        fixture.write_text("make.sh", "");
        fixture.write_text("other", "");
        fs::create_dir(fixture.child("man")).unwrap();

        let mut names: Vec<String> = FsLister
            .list(fixture.path(), "ma")
            .expect("list")
            .into_iter()
            .map(|e| e.name)
            .collect();
        names.sort();
        assert_eq!(names, vec!["make.sh", "man"]);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let fixture = TestTempDir::new("lister-missing");
        assert!(FsLister.list(&fixture.child("gone"), "").is_err());
    }
}
