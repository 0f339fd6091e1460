//! Document sources.
//!
//! Only the filesystem source exists today, exposed through the concrete
//! `validate_fs()` entry point. The HTTP server feeds request bodies to the
//! core validator directly and does not go through here.

pub mod fs;

/// Content format for dispatching to the correct loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentFormat {
    Json,
    Yaml,
}
