// src/file.rs

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use crate::error::ScrapeError;

pub fn normalize_separators(p: &str) -> String {
    let sep = std::path::MAIN_SEPARATOR;
    p.chars().map(|c| if c=='/'||c=='\\' { sep } else { c }).collect()
}

pub fn looks_like_dir_hint(p: &Path) -> bool {
    let s = p.to_string_lossy();
    s.ends_with('/') || s.ends_with('\\')
}

pub fn ensure_directory(dir: &Path) -> Result<(), ScrapeError> {
    if dir.exists() && !dir.is_dir() {
        return Err(ScrapeError::serialization(dir.display(), "path exists but is not a directory"));
    }
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| ScrapeError::serialization(dir.display(), e))?;
    }
    Ok(())
}

/// Write `bytes` to `path` via a sibling temp file and a rename, so readers
/// never see a half-written file. On failure nothing is left at `path`.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<PathBuf, ScrapeError> {
    if path.is_dir() {
        return Err(ScrapeError::serialization(path.display(), "path is a directory"));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }

    let mut tmp_name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    tmp_name.push(".part");
    let tmp = path.with_file_name(tmp_name);

    let written = fs::File::create(&tmp)
        .and_then(|mut f| {
            f.write_all(bytes)?;
            f.sync_all()
        })
        .and_then(|_| fs::rename(&tmp, path));

    if let Err(e) = written {
        let _ = fs::remove_file(&tmp);
        return Err(ScrapeError::serialization(path.display(), e));
    }
    Ok(path.to_path_buf())
}

/// Find the nearest existing parent folder by walking up the directory tree.
pub fn find_nearest_existing_parent(path: &Path) -> PathBuf {
    let mut current = path.to_path_buf();

    loop {
        if current.is_dir() {
            return current;
        }
        match current.parent() {
            Some(parent) => current = parent.to_path_buf(),
            // Reached the root; fall back to the working directory
            None => return PathBuf::from("."),
        }
    }
}

/// Cross-platform function to open a folder in the system file explorer.
pub fn open_folder_in_explorer(path: &Path) -> Result<(), String> {
    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("explorer")
            .arg(path)
            .spawn()
            .map_err(|e| format!("Failed to spawn explorer: {}", e))?;
        Ok(())
    }

    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(path)
            .spawn()
            .map_err(|e| format!("Failed to spawn open: {}", e))?;
        Ok(())
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open")
            .arg(path)
            .spawn()
            .map_err(|e| format!("Failed to spawn xdg-open: {}", e))?;
        Ok(())
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
    {
        let _ = path;
        Err("Opening folders not supported on this platform".to_string())
    }
}

/// Open the folder holding `file` (or its nearest existing ancestor).
pub fn open_containing_folder(file: &Path) -> Result<PathBuf, String> {
    let folder = file.parent().unwrap_or(Path::new("."));
    let folder = find_nearest_existing_parent(folder);
    let absolute = fs::canonicalize(&folder)
        .map_err(|e| format!("Cannot resolve folder path: {}", e))?;
    open_folder_in_explorer(&absolute)?;
    Ok(absolute)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn tmp_dir(tag: &str) -> PathBuf {
        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
        let dir = std::env::temp_dir().join(format!("dsa_scrape_file_{tag}_{nanos}"));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn dir_hints() {
        assert!(looks_like_dir_hint(Path::new("out/")));
        assert!(looks_like_dir_hint(Path::new("out\\")));
        assert!(!looks_like_dir_hint(Path::new("out/file.xlsx")));
    }

    #[test]
    fn atomic_write_creates_parents_and_leaves_no_temp() {
        let dir = tmp_dir("atomic");
        let path = dir.join("nested").join("a.xlsx");
        let got = write_atomic(&path, b"hello").unwrap();

        assert_eq!(got, path);
        assert_eq!(fs::read(&path).unwrap(), b"hello");
        assert!(!dir.join("nested").join("a.xlsx.part").exists());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn atomic_write_onto_directory_fails() {
        let dir = tmp_dir("isdir");
        let err = write_atomic(&dir, b"x").unwrap_err();
        assert!(matches!(err, ScrapeError::Serialization { .. }));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn nearest_parent_walks_up() {
        let dir = tmp_dir("parent");
        let deep = dir.join("a").join("b").join("c");
        assert_eq!(find_nearest_existing_parent(&deep), dir);
        let _ = fs::remove_dir_all(&dir);
    }
}
