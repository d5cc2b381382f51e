use std::{fs, io, path::Path};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("could not find file {path}")]
    NotFound { path: String },
    #[error("failed to read file {path}")]
    Unreadable {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Resolves a registration input to the literal text a solution will see.
///
/// A string naming an existing file resolves to that file's contents. A
/// string that looks like a file reference but names nothing is an error.
/// Anything else is literal puzzle text, returned verbatim.
pub fn resolve(raw: &str) -> Result<String, InputError> {
    // Path::is_file cannot fail for arbitrary strings; a path-illegal byte
    // just probes as "not a file".
    if Path::new(raw).is_file() {
        let contents = fs::read_to_string(raw).map_err(|source| InputError::Unreadable {
            path: raw.to_owned(),
            source,
        })?;
        tracing::debug!(path = raw, bytes = contents.len(), "input resolved from file");
        return Ok(contents);
    }

    if looks_like_path(raw) {
        return Err(InputError::NotFound {
            path: raw.to_owned(),
        });
    }

    Ok(raw.to_owned())
}

/// A registration input is treated as a file reference when it is a single
/// whitespace-free token containing a directory separator or ending in an
/// alphabetic extension.
fn looks_like_path(s: &str) -> bool {
    if s.is_empty() || s.chars().any(char::is_whitespace) {
        return false;
    }
    if s.contains('/') || s.contains('\\') {
        return true;
    }
    matches!(
        Path::new(s).extension().and_then(|ext| ext.to_str()),
        Some(ext) if !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphabetic())
    )
}
