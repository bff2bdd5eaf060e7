use std::{
    fs,
    path::{Path, PathBuf},
};

use walkdir::WalkDir;

use crate::error::{FileSystemError, FileSystemResult};

/// Creates a directory structure if it doesn't exist.
///
/// If the directory already exists, this function does nothing. If the path exists but is
/// not a directory, [`FileSystemError::NotADirectory`] is returned.
pub fn ensure_dir_exists<P: AsRef<Path>>(path: P) -> FileSystemResult<()> {
    let path = path.as_ref();
    if !path.exists() {
        fs::create_dir_all(path).map_err(|err| FileSystemError::Directory {
            path: path.to_path_buf(),
            action: "create",
            source: err,
        })?;
    } else if !path.is_dir() {
        return Err(FileSystemError::NotADirectory {
            path: path.to_path_buf(),
        });
    }

    Ok(())
}

/// Removes the specified file or directory safely.
///
/// A missing path is not an error. Directories are removed recursively.
pub fn safe_remove<P: AsRef<Path>>(path: P) -> FileSystemResult<()> {
    let path = path.as_ref();

    if !path.exists() {
        return Ok(());
    }

    let result = if path.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };

    result.map_err(|err| FileSystemError::File {
        path: path.to_path_buf(),
        action: "remove",
        source: err,
    })
}

/// Copies `from` over `to`, replacing any existing file.
pub fn copy_file<P: AsRef<Path>, Q: AsRef<Path>>(from: P, to: Q) -> FileSystemResult<u64> {
    let from = from.as_ref();
    fs::copy(from, to.as_ref()).map_err(|err| FileSystemError::File {
        path: from.to_path_buf(),
        action: "copy",
        source: err,
    })
}

/// Reads a whole file into memory.
pub fn read_file<P: AsRef<Path>>(path: P) -> FileSystemResult<Vec<u8>> {
    let path = path.as_ref();
    fs::read(path).map_err(|err| FileSystemError::File {
        path: path.to_path_buf(),
        action: "read",
        source: err,
    })
}

/// Returns every regular file below `root`, sorted by path.
///
/// Symlinks are followed: a link to a file is returned under the link's own
/// path, and a link to a directory is descended into.
pub fn walk_files<P: AsRef<Path>>(root: P) -> FileSystemResult<Vec<PathBuf>> {
    let root = root.as_ref();
    if !root.is_dir() {
        return Err(FileSystemError::NotADirectory {
            path: root.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(|err| FileSystemError::Walk {
            path: root.to_path_buf(),
            source: err,
        })?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

/// Returns the first entry (by name) directly inside `dir`, or `None` when it is empty.
pub fn first_entry<P: AsRef<Path>>(dir: P) -> FileSystemResult<Option<PathBuf>> {
    let dir = dir.as_ref();
    let entries = fs::read_dir(dir).map_err(|err| FileSystemError::Directory {
        path: dir.to_path_buf(),
        action: "read",
        source: err,
    })?;

    let mut paths = entries
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| FileSystemError::Directory {
            path: dir.to_path_buf(),
            action: "read",
            source: err,
        })?;
    paths.sort();

    Ok(paths.into_iter().next())
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_safe_remove_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test_file.txt");
        fs::write(&file_path, "hello").unwrap();
        safe_remove(&file_path).unwrap();
        assert!(!file_path.exists());
    }

    #[test]
    fn test_safe_remove_dir() {
        let dir = tempdir().unwrap();
        let sub_dir = dir.path().join("sub");
        fs::create_dir(&sub_dir).unwrap();
        fs::write(sub_dir.join("inner"), "x").unwrap();
        safe_remove(&sub_dir).unwrap();
        assert!(!sub_dir.exists());
    }

    #[test]
    fn test_safe_remove_non_existent() {
        let dir = tempdir().unwrap();
        safe_remove(dir.path().join("non_existent.txt")).unwrap();
    }

    #[test]
    fn test_ensure_dir_exists() {
        let dir = tempdir().unwrap();
        let new_dir = dir.path().join("a").join("b");
        ensure_dir_exists(&new_dir).unwrap();
        assert!(new_dir.is_dir());
    }

    #[test]
    fn test_ensure_dir_exists_file_collision() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("file.txt");
        fs::write(&file_path, "hello").unwrap();
        assert!(matches!(
            ensure_dir_exists(&file_path),
            Err(FileSystemError::NotADirectory { .. })
        ));
    }

    #[test]
    fn test_copy_file_overwrites() {
        let dir = tempdir().unwrap();
        let from = dir.path().join("from.json");
        let to = dir.path().join("to.json");
        fs::write(&from, "{\"a\":1}").unwrap();
        fs::write(&to, "stale").unwrap();
        copy_file(&from, &to).unwrap();
        assert_eq!(fs::read_to_string(&to).unwrap(), "{\"a\":1}");
    }

    #[test]
    fn test_copy_file_missing_source() {
        let dir = tempdir().unwrap();
        let err = copy_file(dir.path().join("missing"), dir.path().join("to")).unwrap_err();
        assert!(err.to_string().contains("Failed to copy file"));
    }

    #[test]
    fn test_walk_files_recurses_and_sorts() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("b/c")).unwrap();
        fs::write(dir.path().join("b/c/deep.js"), "").unwrap();
        fs::write(dir.path().join("a.html"), "").unwrap();
        fs::write(dir.path().join("b/z.css"), "").unwrap();

        let files = walk_files(dir.path()).unwrap();
        let relative: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();

        assert_eq!(
            relative,
            vec![
                PathBuf::from("a.html"),
                PathBuf::from("b/c/deep.js"),
                PathBuf::from("b/z.css"),
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_walk_files_follows_symlinks() {
        use std::os::unix::fs::symlink;

        let dir = tempdir().unwrap();
        let root = dir.path().join("root");
        let shared = dir.path().join("shared");
        fs::create_dir_all(&root).unwrap();
        fs::create_dir_all(&shared).unwrap();
        fs::write(shared.join("olm.wasm"), "wasm").unwrap();
        fs::write(root.join("index.html"), "").unwrap();
        symlink(shared.join("olm.wasm"), root.join("olm.wasm")).unwrap();
        symlink(&shared, root.join("vendor")).unwrap();

        let files = walk_files(&root).unwrap();
        assert_eq!(
            files,
            vec![
                root.join("index.html"),
                root.join("olm.wasm"),
                root.join("vendor/olm.wasm"),
            ]
        );
        assert_eq!(fs::read(&files[1]).unwrap(), b"wasm");
    }

    #[test]
    fn test_walk_files_not_a_directory() {
        let dir = tempdir().unwrap();
        assert!(walk_files(dir.path().join("missing")).is_err());
    }

    #[test]
    fn test_first_entry() {
        let dir = tempdir().unwrap();
        assert_eq!(first_entry(dir.path()).unwrap(), None);

        fs::create_dir(dir.path().join("riot-v1.0.0")).unwrap();
        assert_eq!(
            first_entry(dir.path()).unwrap(),
            Some(dir.path().join("riot-v1.0.0"))
        );
    }
}
