//! Document text loading.
//!
//! Loading produces raw text only; parsing happens in the caller so a load
//! triggers exactly one parse-and-render cycle. Files ending in `.gz` and
//! stdin starting with the gzip magic bytes are decompressed transparently.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Extensions accepted for document files (before an optional `.gz`).
const ACCEPTED_EXTENSIONS: &[&str] = &["json", "txt"];

/// A failure while reading document input.
///
/// Read failures are surfaced to the user and never retried.
#[derive(Debug, Error)]
pub enum FileReadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported file type: {path} (expected .json or .txt, optionally gzipped)")]
    UnsupportedExtension { path: PathBuf },

    #[error("failed to decompress {path}: file may be corrupted")]
    Decompress { path: PathBuf },

    #[error("input is not valid UTF-8")]
    InvalidUtf8,
}

/// Reads document text from a file.
///
/// The extension must be `.json` or `.txt`, optionally followed by `.gz`
/// for gzip-compressed content.
///
/// # Example
///
/// ```no_run
/// use textquill::file::loader::load_text;
///
/// let text = load_text("data.json").unwrap();
/// ```
///
/// # Errors
///
/// Returns [`FileReadError`] when the file has an unsupported extension,
/// cannot be read, or cannot be decompressed.
pub fn load_text<P: AsRef<Path>>(path: P) -> Result<String, FileReadError> {
    let path = path.as_ref();

    let (stem, gzipped) = split_gz_suffix(path);
    let accepted = stem
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ACCEPTED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false);
    if !accepted {
        return Err(FileReadError::UnsupportedExtension {
            path: path.to_path_buf(),
        });
    }

    if gzipped {
        read_gzipped_file(path)
    } else {
        fs::read_to_string(path).map_err(|source| FileReadError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Reads document text from standard input until EOF.
///
/// Input starting with the gzip magic bytes (`0x1f 0x8b`) is decompressed.
pub fn load_stdin() -> Result<String, FileReadError> {
    use std::io::Read;

    let mut buffer = Vec::new();
    std::io::stdin()
        .read_to_end(&mut buffer)
        .map_err(|source| FileReadError::Io {
            path: PathBuf::from("<stdin>"),
            source,
        })?;

    if buffer.starts_with(&[0x1f, 0x8b]) {
        decompress_gzip_bytes(&buffer, Path::new("<stdin>"))
    } else {
        String::from_utf8(buffer).map_err(|_| FileReadError::InvalidUtf8)
    }
}

/// Splits a trailing `.gz` off the path, if present.
fn split_gz_suffix(path: &Path) -> (PathBuf, bool) {
    let name = path.to_string_lossy();
    if let Some(stripped) = name.strip_suffix(".gz") {
        (PathBuf::from(stripped), true)
    } else {
        (path.to_path_buf(), false)
    }
}

fn read_gzipped_file(path: &Path) -> Result<String, FileReadError> {
    use flate2::read::GzDecoder;
    use std::io::Read;

    let file = fs::File::open(path).map_err(|source| FileReadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut decoder = GzDecoder::new(file);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .map_err(|_| FileReadError::Decompress {
            path: path.to_path_buf(),
        })?;
    Ok(content)
}

fn decompress_gzip_bytes(bytes: &[u8], path: &Path) -> Result<String, FileReadError> {
    use flate2::read::GzDecoder;
    use std::io::Read;

    let mut decoder = GzDecoder::new(bytes);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .map_err(|_| FileReadError::Decompress {
            path: path.to_path_buf(),
        })?;
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_gz_suffix() {
        let (stem, gz) = split_gz_suffix(Path::new("data.json.gz"));
        assert_eq!(stem, PathBuf::from("data.json"));
        assert!(gz);

        let (stem, gz) = split_gz_suffix(Path::new("data.json"));
        assert_eq!(stem, PathBuf::from("data.json"));
        assert!(!gz);
    }

    #[test]
    fn test_unsupported_extension_rejected() {
        let err = load_text("document.yaml").unwrap_err();
        assert!(matches!(err, FileReadError::UnsupportedExtension { .. }));

        let err = load_text("document").unwrap_err();
        assert!(matches!(err, FileReadError::UnsupportedExtension { .. }));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_text("/nonexistent/path/data.json").unwrap_err();
        assert!(matches!(err, FileReadError::Io { .. }));
    }

    #[test]
    fn test_load_plain_file() {
        use std::io::Write;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");
        let mut file = fs::File::create(&path).unwrap();
        write!(file, "{{\"a\": 1}}").unwrap();

        assert_eq!(load_text(&path).unwrap(), "{\"a\": 1}");
    }

    #[test]
    fn test_load_gzipped_file() {
        use flate2::write::GzEncoder;
        use flate2::Compression;
        use std::io::Write;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json.gz");
        let file = fs::File::create(&path).unwrap();
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder.write_all(b"{\"zipped\": true}").unwrap();
        encoder.finish().unwrap();

        assert_eq!(load_text(&path).unwrap(), "{\"zipped\": true}");
    }

    #[test]
    fn test_corrupted_gzip_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json.gz");
        fs::write(&path, b"not gzip data").unwrap();

        let err = load_text(&path).unwrap_err();
        assert!(matches!(err, FileReadError::Decompress { .. }));
    }
}
