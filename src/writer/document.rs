//! Whole-document writer.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::{debug, info};

use super::format::{write_comment_block, write_section};
use super::options::WriteOptions;
use crate::core::Section;
use crate::util::Result;

/// Progress after a top-level section has been written.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WriteProgress {
    /// Number of top-level sections written so far.
    pub written: usize,
    /// Number of top-level sections in the document.
    pub total: usize,
}

impl WriteProgress {
    /// Completed share in percent (0..=100).
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 100;
        }
        (self.written * 100 / self.total) as u32
    }
}

impl fmt::Display for WriteProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percent())
    }
}

type ProgressFn<'a> = Box<dyn FnMut(WriteProgress) + 'a>;

/// Writes a forest of top-level sections as PIX text.
///
/// Each top-level section is rendered into memory first and then written in
/// one call, so a contract violation never leaves a half-written block.
pub struct PixWriter<'a, W: Write> {
    out: W,
    options: WriteOptions,
    progress: Option<ProgressFn<'a>>,
    pos: u64,
}

impl PixWriter<'static, BufWriter<File>> {
    /// Create (or truncate) a file for writing.
    pub fn create(path: impl AsRef<Path>, options: WriteOptions) -> Result<Self> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;
        Ok(Self::new(BufWriter::with_capacity(1024 * 1024, file), options))
    }
}

impl<'a, W: Write> PixWriter<'a, W> {
    pub fn new(out: W, options: WriteOptions) -> Self {
        Self {
            out,
            options,
            progress: None,
            pos: 0,
        }
    }

    /// Install a callback invoked after each top-level section.
    pub fn on_progress<'b>(self, callback: impl FnMut(WriteProgress) + 'b) -> PixWriter<'b, W>
    where
        'a: 'b,
    {
        PixWriter {
            out: self.out,
            options: self.options,
            progress: Some(Box::new(callback)),
            pos: self.pos,
        }
    }

    pub fn options(&self) -> &WriteOptions {
        &self.options
    }

    /// Bytes written so far.
    #[inline]
    pub fn pos(&self) -> u64 {
        self.pos
    }

    /// Write one top-level section (or `#comment` passthrough block).
    pub fn write_section(&mut self, section: &Section) -> Result<()> {
        let mut text = String::new();
        if section.is_comment_block() {
            write_comment_block(&mut text, section);
        } else {
            write_section(&mut text, section, "", &self.options.indent)?;
        }
        self.write_str(&text)
    }

    /// Write all sections followed by the trailing blank line.
    pub fn write_document(&mut self, sections: &[Section]) -> Result<()> {
        let total = sections.len();
        debug!(sections = total, "writing document");

        for (i, section) in sections.iter().enumerate() {
            self.write_section(section)?;
            debug!(section = %section.kind, bytes = self.pos, "wrote top-level section");
            self.report(WriteProgress { written: i + 1, total });
        }

        self.write_str("\n")
    }

    /// Flush buffered output.
    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(mut self) -> Result<W> {
        self.flush()?;
        Ok(self.out)
    }

    fn write_str(&mut self, text: &str) -> Result<()> {
        self.out.write_all(text.as_bytes())?;
        self.pos += text.len() as u64;
        Ok(())
    }

    fn report(&mut self, progress: WriteProgress) {
        debug!(percent = progress.percent(), "write progress");
        if self.options.report_progress {
            info!("Writing file - {} done", progress);
        }
        if let Some(callback) = self.progress.as_mut() {
            callback(progress);
        }
    }
}

/// Render a document to a string.
pub fn render_document(sections: &[Section], options: &WriteOptions) -> Result<String> {
    let mut writer = PixWriter::new(Vec::new(), options.clone());
    writer.write_document(sections)?;
    let bytes = writer.into_inner()?;
    // Only &str data is ever written.
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Write a document to `path`.
///
/// The file is created (or truncated), written and flushed; it is closed
/// when this returns, on success and on error alike.
pub fn write_file(path: impl AsRef<Path>, sections: &[Section], options: &WriteOptions) -> Result<()> {
    let path = path.as_ref();
    debug!(path = %path.display(), "writing PIX file");

    let mut writer = PixWriter::create(path, options.clone())?;
    writer.write_document(sections)?;
    writer.flush()
}

/// Like [`write_file`], invoking `progress` after each top-level section.
pub fn write_file_with_progress(
    path: impl AsRef<Path>,
    sections: &[Section],
    options: &WriteOptions,
    progress: impl FnMut(WriteProgress),
) -> Result<()> {
    let mut writer = PixWriter::create(path, options.clone())?.on_progress(progress);
    writer.write_document(sections)?;
    writer.flush()
}
