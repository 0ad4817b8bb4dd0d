//! JSON transfer format.
//!
//! # Responsibility
//! - Export documents as pretty-printed JSON (two-space indentation).
//! - Import JSON bytes with a lenient shape policy.
//!
//! # Invariants
//! - `import_document(export_document(d)) == d` for every document.
//! - Syntax errors are `Malformed`; well-formed JSON that cannot be held by
//!   the typed document (non-object root, wrong value types) is
//!   `IncompatibleShape`. Missing fields and `null`s are accepted as empty.
//! - Import never touches storage; replacing the live document is the
//!   store's job.

use crate::config::EXPORT_FILE_NAME;
use crate::model::resume::ResumeDocument;
use log::{info, warn};
use serde::de::Error as _;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub type TransferResult<T> = Result<T, TransferError>;

/// Import/export failure.
#[derive(Debug)]
pub enum TransferError {
    /// Input is not parseable JSON.
    Malformed(serde_json::Error),
    /// Input is JSON but cannot be read as a resume document.
    IncompatibleShape(serde_json::Error),
    /// Serializing the document failed.
    Encode(serde_json::Error),
    /// Reading or writing a transfer file failed.
    Io(std::io::Error),
}

impl Display for TransferError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(err) => write!(f, "invalid JSON file: {err}"),
            Self::IncompatibleShape(err) => write!(f, "JSON is not a resume document: {err}"),
            Self::Encode(err) => write!(f, "failed to encode resume document: {err}"),
            Self::Io(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TransferError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Malformed(err) | Self::IncompatibleShape(err) | Self::Encode(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for TransferError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Serializes a document to the export/persistence text form.
pub fn export_string(document: &ResumeDocument) -> TransferResult<String> {
    serde_json::to_string_pretty(document).map_err(TransferError::Encode)
}

/// Serializes a document to export bytes.
pub fn export_document(document: &ResumeDocument) -> TransferResult<Vec<u8>> {
    export_string(document).map(String::into_bytes)
}

/// Parses uploaded bytes into a document.
///
/// # Errors
/// - `Malformed` when the bytes are not valid UTF-8 JSON.
/// - `IncompatibleShape` when the JSON root is not an object or a known
///   field holds a value of the wrong type.
pub fn import_document(bytes: &[u8]) -> TransferResult<ResumeDocument> {
    let value: Value = serde_json::from_slice(bytes).map_err(TransferError::Malformed)?;
    if !value.is_object() {
        return Err(TransferError::IncompatibleShape(serde_json::Error::custom(
            format!("expected a JSON object at the root, found {}", json_kind(&value)),
        )));
    }
    serde_json::from_value(value).map_err(TransferError::IncompatibleShape)
}

/// Writes `resume-data.json` into `dir` and returns its path.
pub fn write_export_file(
    dir: impl AsRef<Path>,
    document: &ResumeDocument,
) -> TransferResult<PathBuf> {
    let path = dir.as_ref().join(EXPORT_FILE_NAME);
    let bytes = export_document(document)?;
    std::fs::write(&path, &bytes)?;
    info!(
        "event=document_export module=transfer status=ok bytes={}",
        bytes.len()
    );
    Ok(path)
}

/// Reads and imports a user-selected file.
pub fn read_import_file(path: impl AsRef<Path>) -> TransferResult<ResumeDocument> {
    let bytes = std::fs::read(path.as_ref())?;
    import_document(&bytes).inspect_err(|err| {
        warn!(
            "event=document_import module=transfer status=error bytes={} error_code={}",
            bytes.len(),
            error_code(err)
        );
    })
}

/// Stable short code for log lines.
pub(crate) fn error_code(err: &TransferError) -> &'static str {
    match err {
        TransferError::Malformed(_) => "malformed_input",
        TransferError::IncompatibleShape(_) => "incompatible_shape",
        TransferError::Encode(_) => "encode_failed",
        TransferError::Io(_) => "io_failed",
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
