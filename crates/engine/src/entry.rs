// crates/engine/src/entry.rs
//! Reading matched files and rendering them into the snapshot format.
//!
//! Each entry is written as:
//!
//! ```text
//! ### Файл: <absolute path>
//! <content>
//!
//! ================================================================================
//!
//! ```

use crate::error::{EngineError, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Marker that opens every banner line.
pub const BANNER_MARKER: &str = "### Файл: ";
/// Width of the `=` rule that closes every entry.
pub const SEPARATOR_WIDTH: usize = 80;

/// One matched file held in memory between reading and writing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub path: PathBuf,
    pub content: String,
}

/// Read `path` completely and decode it as UTF-8.
///
/// Content is kept byte-for-byte: no newline translation, BOM preserved.
///
/// # Errors
/// [`EngineError::FileRead`] if the file cannot be opened or read,
/// [`EngineError::Decode`] if it is not valid UTF-8.
pub fn read_entry(path: &Path) -> Result<Entry> {
    let bytes = fs::read(path).map_err(|source| EngineError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let content = String::from_utf8(bytes).map_err(|source| EngineError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Entry {
        path: path.to_path_buf(),
        content,
    })
}

#[must_use]
pub fn render_entry(entry: &Entry) -> String {
    let separator = "=".repeat(SEPARATOR_WIDTH);
    format!(
        "{BANNER_MARKER}{}\n{}\n\n{separator}\n\n",
        entry.path.display(),
        entry.content
    )
}

/// Appends rendered entries to a sink, one `write_all` per entry.
pub struct EntryWriter<W: Write> {
    inner: W,
    path: PathBuf,
    bytes_written: u64,
}

impl<W: Write> EntryWriter<W> {
    /// `path` names the sink in error messages.
    pub fn new(inner: W, path: impl Into<PathBuf>) -> Self {
        Self {
            inner,
            path: path.into(),
            bytes_written: 0,
        }
    }

    /// # Errors
    /// Returns [`EngineError::Write`] if the sink rejects the bytes.
    pub fn write_entry(&mut self, entry: &Entry) -> Result<()> {
        let block = render_entry(entry);
        self.inner
            .write_all(block.as_bytes())
            .map_err(|source| self.write_error(source))?;
        self.bytes_written += block.len() as u64;
        Ok(())
    }

    #[must_use]
    pub const fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Flush the sink and return the number of bytes written.
    ///
    /// # Errors
    /// Returns [`EngineError::Write`] if the flush fails.
    pub fn finish(mut self) -> Result<u64> {
        self.inner
            .flush()
            .map_err(|source| self.write_error(source))?;
        Ok(self.bytes_written)
    }

    fn write_error(&self, source: std::io::Error) -> EngineError {
        EngineError::Write {
            path: self.path.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn renders_banner_content_and_separator() {
        let entry = Entry {
            path: PathBuf::from("/src/a.ts"),
            content: "const x=1;".into(),
        };
        let expected = format!(
            "### Файл: /src/a.ts\nconst x=1;\n\n{}\n\n",
            "=".repeat(80)
        );
        assert_eq!(render_entry(&entry), expected);
    }

    #[test]
    fn empty_file_still_gets_banner_and_separator() {
        let entry = Entry {
            path: PathBuf::from("/src/empty.css"),
            content: String::new(),
        };
        let rendered = render_entry(&entry);
        assert!(rendered.starts_with("### Файл: /src/empty.css\n\n\n"));
        assert!(rendered.ends_with(&format!("{}\n\n", "=".repeat(80))));
    }

    #[test]
    fn read_entry_keeps_content_verbatim() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("crlf.js");
        let raw = "\u{feff}line one\r\nline two\r\n";
        fs::write(&path, raw).unwrap();

        let entry = read_entry(&path).unwrap();
        assert_eq!(entry.content, raw);
        assert_eq!(entry.path, path);
    }

    #[test]
    fn read_entry_rejects_invalid_utf8() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("latin1.ts");
        fs::write(&path, b"caf\xe9").unwrap();

        let err = read_entry(&path).unwrap_err();
        assert!(matches!(err, EngineError::Decode { .. }));
        assert!(!err.is_fatal());
    }

    #[test]
    fn read_entry_reports_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = read_entry(&temp.path().join("vanished.ts")).unwrap_err();
        assert!(matches!(err, EngineError::FileRead { .. }));
    }

    #[test]
    fn writer_counts_bytes() {
        let mut writer = EntryWriter::new(Vec::new(), "mem");
        let entry = Entry {
            path: PathBuf::from("/x.json"),
            content: "{}".into(),
        };
        writer.write_entry(&entry).unwrap();
        writer.write_entry(&entry).unwrap();
        let expected = 2 * render_entry(&entry).len() as u64;
        assert_eq!(writer.bytes_written(), expected);
        assert_eq!(writer.finish().unwrap(), expected);
    }

    struct FailingSink;

    impl Write for FailingSink {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("disk full"))
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn writer_surfaces_sink_errors() {
        let mut writer = EntryWriter::new(FailingSink, "out.txt");
        let entry = Entry {
            path: PathBuf::from("/x.ts"),
            content: "x".into(),
        };
        let err = writer.write_entry(&entry).unwrap_err();
        assert!(matches!(err, EngineError::Write { .. }));
        assert!(err.to_string().contains("out.txt"));
        assert!(err.is_fatal());
    }
}
