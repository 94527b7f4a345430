//! Saving serialized output and HTML export.
//!
//! Saves write to a temporary file in the target directory and rename it
//! into place, so a failed write never truncates an existing file.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Writes text to a file atomically (temp file + rename).
///
/// # Example
///
/// ```no_run
/// use textquill::file::saver::save_text;
///
/// save_text("out.json", "{\n  \"a\": 1\n}").unwrap();
/// ```
pub fn save_text<P: AsRef<Path>>(path: P, text: &str) -> Result<()> {
    let path = path.as_ref();
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "textquill".to_string());

    let tmp = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(dir) => dir.join(format!(".{}.tmp", name)),
        None => PathBuf::from(format!(".{}.tmp", name)),
    };

    fs::write(&tmp, text).with_context(|| format!("Failed to write {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("Failed to move output to {}", path.display()))?;
    Ok(())
}

/// Wraps pre-highlighted HTML in a minimal standalone page and saves it.
///
/// The body must already be span-wrapped by the highlighter; this adds the
/// page shell and the `json-…` style classes.
pub fn export_html<P: AsRef<Path>>(path: P, title: &str, highlighted_body: &str) -> Result<()> {
    let page = format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n\
         <style>\n\
         body {{ background: #1d2021; color: #d5c4a1; }}\n\
         pre {{ font-family: monospace; font-size: 14px; }}\n\
         .json-key {{ color: #83a598; font-weight: bold; }}\n\
         .json-string {{ color: #b8bb26; }}\n\
         .json-number {{ color: #d3869b; }}\n\
         .json-boolean {{ color: #fabd2f; }}\n\
         .json-null {{ color: #928374; }}\n\
         </style>\n</head>\n<body>\n<pre>{highlighted_body}</pre>\n</body>\n</html>\n"
    );
    save_text(path, &page)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_text_writes_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        save_text(&path, "{\"a\": 1}").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "{\"a\": 1}");
    }

    #[test]
    fn test_save_text_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        save_text(&path, "first").unwrap();
        save_text(&path, "second").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn test_save_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        save_text(&path, "data").unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_export_html_shell() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.html");
        export_html(&path, "doc.json", "<span class=\"json-null\">null</span>").unwrap();

        let html = fs::read_to_string(&path).unwrap();
        assert!(html.contains("<title>doc.json</title>"));
        assert!(html.contains(".json-key"));
        assert!(html.contains("<span class=\"json-null\">null</span>"));
    }
}
