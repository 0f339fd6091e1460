//! Filesystem document source.
//!
//! Discovers phenopacket files on disk and reads them for the validation
//! pipeline. Symlinks are not followed by default, resolved paths must stay
//! inside the scan root, and reads are bounded by `max_file_size`.

use std::io::Read;
use std::path::{Path, PathBuf};

use glob::Pattern;
use walkdir::WalkDir;

use crate::config::FsSourceConfig;
use crate::error::{ScanError, ScanErrorKind};
use crate::strategy::ContentFormat;

/// Directories never descended into.
pub const SKIP_DIRS: &[&str] = &["target", "node_modules", ".git"];

/// Result of attempting to read a file for scanning.
pub enum ScanResult {
    /// File was read successfully; contains the UTF-8 content.
    Ok(String),
    /// File could not be read; contains the scan error.
    Err(ScanError),
}

fn matches_exclude(path: &Path, exclude_patterns: &[Pattern]) -> bool {
    let path_str = path.to_string_lossy();
    exclude_patterns.iter().any(|pattern| {
        pattern.matches(&path_str)
            || path
                .file_name()
                .is_some_and(|name| pattern.matches(&name.to_string_lossy()))
    })
}

/// `true` if the entry should be walked (it is not a skip dir).
fn is_not_skip_dir(entry: &walkdir::DirEntry) -> bool {
    if entry.file_type().is_dir()
        && let Some(name) = entry.file_name().to_str()
    {
        return !SKIP_DIRS.contains(&name);
    }
    true
}

fn compile_excludes(exclude: &[String], scan_errors: &mut Vec<ScanError>) -> Vec<Pattern> {
    let mut patterns = Vec::with_capacity(exclude.len());
    for pat_str in exclude {
        match Pattern::new(pat_str) {
            Ok(pat) => patterns.push(pat),
            Err(e) => scan_errors.push(ScanError::new(
                pat_str,
                ScanErrorKind::InvalidExcludePattern,
                format!("Invalid exclude glob pattern '{pat_str}': {e}"),
            )),
        }
    }
    patterns
}

/// Find every phenopacket file under the configured paths.
///
/// Returns `(files, scan_errors)`. Walk errors and boundary violations land in
/// `scan_errors` and must be treated as failures by the caller.
pub fn find_files(config: &FsSourceConfig) -> (Vec<PathBuf>, Vec<ScanError>) {
    let mut files = Vec::new();
    let mut scan_errors = Vec::new();
    let exclude_patterns = compile_excludes(&config.exclude, &mut scan_errors);

    for root in &config.paths {
        let canonical_root = match root.canonicalize() {
            Ok(r) => r,
            Err(e) => {
                scan_errors.push(ScanError::new(
                    root.clone(),
                    ScanErrorKind::IoError,
                    format!("Failed to canonicalize root path: {e}"),
                ));
                continue;
            }
        };

        if root.is_file() {
            if content_format_for(root).is_some() && !matches_exclude(root, &exclude_patterns) {
                files.push(root.clone());
            }
            continue;
        }

        if !root.is_dir() {
            continue;
        }

        for entry_result in WalkDir::new(root)
            .follow_links(config.follow_links)
            .max_depth(config.max_depth)
            .into_iter()
            .filter_entry(is_not_skip_dir)
        {
            let entry = match entry_result {
                Ok(e) => e,
                Err(walk_err) => {
                    let path = walk_err
                        .path()
                        .map_or_else(|| root.clone(), Path::to_path_buf);
                    scan_errors.push(ScanError::new(
                        path,
                        ScanErrorKind::WalkError,
                        format!("Directory traversal error: {walk_err}"),
                    ));
                    continue;
                }
            };

            let file_path = entry.path();
            if !file_path.is_file() || content_format_for(file_path).is_none() {
                continue;
            }

            match file_path.canonicalize() {
                Ok(canonical_path) if !canonical_path.starts_with(&canonical_root) => {
                    scan_errors.push(ScanError::new(
                        file_path,
                        ScanErrorKind::OutsideRepository,
                        format!(
                            "Path resolves outside scan root: {} -> {}",
                            file_path.display(),
                            canonical_path.display()
                        ),
                    ));
                    continue;
                }
                Ok(_) => {}
                Err(e) => {
                    scan_errors.push(ScanError::new(
                        file_path,
                        ScanErrorKind::IoError,
                        format!("Failed to canonicalize path: {e}"),
                    ));
                    continue;
                }
            }

            // Regular files only
            #[cfg(unix)]
            {
                use std::os::unix::fs::FileTypeExt;
                if let Ok(ft) = entry.metadata().map(|m| m.file_type())
                    && (ft.is_block_device()
                        || ft.is_char_device()
                        || ft.is_fifo()
                        || ft.is_socket())
                {
                    continue;
                }
            }

            if matches_exclude(file_path, &exclude_patterns) {
                continue;
            }

            files.push(file_path.to_path_buf());
        }
    }

    files.sort();
    files.dedup();
    (files, scan_errors)
}

/// Content format for a path, by extension. Unknown extensions are `None`.
pub fn content_format_for(path: &Path) -> Option<ContentFormat> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => Some(ContentFormat::Json),
        Some("yaml" | "yml") => Some(ContentFormat::Yaml),
        _ => None,
    }
}

/// Read a file with a bounded streaming read, enforcing `max_file_size`.
///
/// Oversized files, I/O failures and non-UTF-8 content all come back as
/// `ScanResult::Err`.
pub fn read_file_bounded(path: &Path, max_file_size: u64) -> ScanResult {
    let file = match std::fs::File::open(path) {
        Ok(f) => f,
        Err(e) => {
            return ScanResult::Err(ScanError::new(
                path,
                ScanErrorKind::IoError,
                format!("Failed to open file: {e}"),
            ));
        }
    };

    // One byte past the limit is enough to tell the file is too large.
    let mut buffer = Vec::new();
    if let Err(e) = file.take(max_file_size + 1).read_to_end(&mut buffer) {
        return ScanResult::Err(ScanError::new(
            path,
            ScanErrorKind::IoError,
            format!("Failed to read file: {e}"),
        ));
    }

    if buffer.len() as u64 > max_file_size {
        return ScanResult::Err(ScanError::new(
            path,
            ScanErrorKind::FileTooLarge,
            format!("File exceeds maximum size of {max_file_size} bytes"),
        ));
    }

    match String::from_utf8(buffer) {
        Ok(content) => ScanResult::Ok(content),
        Err(_) => ScanResult::Err(ScanError::new(
            path,
            ScanErrorKind::InvalidEncoding,
            "File is not valid UTF-8",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn config_for(paths: Vec<PathBuf>) -> FsSourceConfig {
        FsSourceConfig {
            paths,
            ..FsSourceConfig::default()
        }
    }

    #[test]
    fn test_content_format_for() {
        assert_eq!(content_format_for(Path::new("a.json")), Some(ContentFormat::Json));
        assert_eq!(content_format_for(Path::new("a.yml")), Some(ContentFormat::Yaml));
        assert_eq!(content_format_for(Path::new("a.yaml")), Some(ContentFormat::Yaml));
        assert_eq!(content_format_for(Path::new("a.md")), None);
        assert_eq!(content_format_for(Path::new("README")), None);
    }

    #[test]
    fn test_find_files_filters_extensions_and_skip_dirs() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.json"), "{}").unwrap();
        fs::write(tmp.path().join("b.yaml"), "id: x").unwrap();
        fs::write(tmp.path().join("notes.txt"), "ignored").unwrap();
        fs::create_dir(tmp.path().join("target")).unwrap();
        fs::write(tmp.path().join("target").join("c.json"), "{}").unwrap();

        let (files, errors) = find_files(&config_for(vec![tmp.path().to_path_buf()]));
        assert!(errors.is_empty(), "{errors:?}");
        let names: Vec<_> = files
            .iter()
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()))
            .collect();
        assert_eq!(names, ["a.json", "b.yaml"]);
    }

    #[test]
    fn test_find_files_exclude_by_name() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("keep.json"), "{}").unwrap();
        fs::write(tmp.path().join("draft.json"), "{}").unwrap();

        let mut config = config_for(vec![tmp.path().to_path_buf()]);
        config.exclude = vec!["draft*".to_owned()];
        let (files, _) = find_files(&config);
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("keep.json"));
    }

    #[test]
    fn test_find_files_invalid_exclude_pattern() {
        let tmp = TempDir::new().unwrap();
        let mut config = config_for(vec![tmp.path().to_path_buf()]);
        config.exclude = vec!["[".to_owned()];
        let (_, errors) = find_files(&config);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ScanErrorKind::InvalidExcludePattern);
    }

    #[test]
    fn test_explicit_file() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("packet.yml");
        fs::write(&file, "id: p1").unwrap();
        let (files, _) = find_files(&config_for(vec![file.clone()]));
        assert_eq!(files, [file]);

        let other = tmp.path().join("packet.txt");
        fs::write(&other, "{}").unwrap();
        let (files, _) = find_files(&config_for(vec![other]));
        assert!(files.is_empty());
    }

    #[test]
    fn test_read_file_bounded_too_large() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("big.json");
        fs::write(&file, "0123456789").unwrap();

        match read_file_bounded(&file, 4) {
            ScanResult::Err(e) => assert_eq!(e.kind, ScanErrorKind::FileTooLarge),
            ScanResult::Ok(_) => panic!("expected FileTooLarge"),
        }
        match read_file_bounded(&file, 10) {
            ScanResult::Ok(content) => assert_eq!(content, "0123456789"),
            ScanResult::Err(e) => panic!("unexpected error: {e:?}"),
        }
    }

    #[test]
    fn test_read_file_bounded_invalid_utf8() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("bin.json");
        fs::write(&file, [0xff, 0xfe, 0x00]).unwrap();
        match read_file_bounded(&file, 1024) {
            ScanResult::Err(e) => assert_eq!(e.kind, ScanErrorKind::InvalidEncoding),
            ScanResult::Ok(_) => panic!("expected InvalidEncoding"),
        }
    }
}
