use crate::models::TaxonomyNode;
use crate::parsing::{ParseError, ParseOptions, ParseReport, parse_taxonomy_report};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse {path}: {source}")]
    Parse { path: PathBuf, source: ParseError },
}

/// Read a taxonomy dump and return its content
pub fn read_taxonomy_file(path: &Path) -> Result<String, IoError> {
    if !path.is_file() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(IoError::Io)
}

/// Read and parse a taxonomy dump, keeping parser diagnostics
pub fn load_taxonomy_report(path: &Path, options: &ParseOptions) -> Result<ParseReport, IoError> {
    let text = read_taxonomy_file(path)?;
    parse_taxonomy_report(&text, options).map_err(|source| IoError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Read and parse a taxonomy dump
pub fn load_taxonomy(path: &Path, options: &ParseOptions) -> Result<TaxonomyNode, IoError> {
    load_taxonomy_report(path, options).map(|report| report.root)
}
