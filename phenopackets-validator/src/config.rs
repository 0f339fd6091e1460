//! Configuration types for file validation.
//!
//! Split into the validation settings (what to check) and the filesystem
//! source settings (where documents come from), so the former can be reused
//! by callers that obtain documents some other way.

use std::path::PathBuf;

use phenopackets::SchemaVersion;

/// What to check in each discovered document.
#[derive(Debug, Clone, Default)]
#[non_exhaustive]
pub struct ValidationConfig {
    /// Rule set applied to every document (default: v2).
    pub schema_version: SchemaVersion,
    /// Treat any warning as a failure when computing `ValidationReport::ok`.
    /// Warnings are still reported as warnings.
    pub warnings_as_errors: bool,
}

/// Filesystem-specific source options.
///
/// NOTE: `paths` is required and must be non-empty.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct FsSourceConfig {
    /// Paths to scan (files or directories). Required, must be non-empty.
    pub paths: Vec<PathBuf>,
    /// Exclude patterns (glob format), matched against the full path and the file name.
    pub exclude: Vec<String>,
    /// Maximum file size in bytes (default: 10 MB).
    pub max_file_size: u64,
    /// Whether to follow symbolic links.
    ///
    /// **Defaults to `false`**: a followed link can point anywhere on the
    /// machine, and files outside the scan root are rejected anyway.
    pub follow_links: bool,
    /// Maximum directory traversal depth (default: 64).
    pub max_depth: usize,
    /// Maximum total number of files to scan (default: `100_000`).
    pub max_files: usize,
    /// Maximum total bytes to read across all files (default: 512 MB).
    pub max_total_bytes: u64,
}

impl Default for FsSourceConfig {
    fn default() -> Self {
        Self {
            paths: Vec::new(),
            exclude: Vec::new(),
            max_file_size: 10_485_760,
            follow_links: false,
            max_depth: 64,
            max_files: 100_000,
            max_total_bytes: 536_870_912,
        }
    }
}
