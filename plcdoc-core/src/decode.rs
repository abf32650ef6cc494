use crate::error::PlcDocError;
use encoding_rs::WINDOWS_1252;
use std::borrow::Cow;
use std::path::Path;
use tracing::warn;

/// Decode file bytes as UTF-8, falling back to windows-1252 (a superset of
/// latin-1 for printable text). A leading byte-order mark is dropped.
pub fn decode_text<'a>(path: &Path, bytes: &'a [u8]) -> Result<Cow<'a, str>, PlcDocError> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    if let Ok(text) = std::str::from_utf8(bytes) {
        return Ok(Cow::Borrowed(text));
    }

    warn!("⚠️  {} is not UTF-8, decoding as {}", path.display(), WINDOWS_1252.name());
    let (text, had_errors) = WINDOWS_1252.decode_without_bom_handling(bytes);
    if had_errors {
        return Err(PlcDocError::Decode {
            path: path.to_path_buf(),
            fallback: WINDOWS_1252.name(),
        });
    }
    Ok(text)
}

/// Read and decode a whole file.
pub fn read_text(path: &Path) -> Result<String, PlcDocError> {
    let bytes = std::fs::read(path).map_err(|source| PlcDocError::io(path, source))?;
    Ok(decode_text(path, &bytes)?.into_owned())
}
