use crate::domain::ports::{DocumentHandle, DocumentStore};
use crate::utils::error::{DocgenError, Result};
use async_trait::async_trait;
use std::collections::HashSet;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use zip::write::{SimpleFileOptions, ZipWriter};

/// Turns a document title into a file name that is safe on common filesystems.
pub fn file_stem_for(title: &str) -> String {
    let cleaned: String = title
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let cleaned = cleaned.trim().trim_matches('.').to_string();

    if cleaned.is_empty() {
        "untitled".to_string()
    } else {
        cleaned
    }
}

fn numbered(stem: &str, attempt: usize, extension: &str) -> String {
    if attempt == 1 {
        format!("{}.{}", stem, extension)
    } else {
        format!("{} ({}).{}", stem, attempt, extension)
    }
}

/// One text file per document under a base directory. Existing files are never
/// overwritten; a repeated title gets a numbered name instead.
#[derive(Debug, Clone)]
pub struct LocalDocumentStore {
    base_path: PathBuf,
}

impl LocalDocumentStore {
    pub fn new<P: Into<PathBuf>>(base_path: P) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }
}

pub struct LocalDocument {
    path: PathBuf,
    file: File,
}

#[async_trait]
impl DocumentStore for LocalDocumentStore {
    type Handle = LocalDocument;

    async fn create_document(&mut self, title: &str) -> Result<LocalDocument> {
        fs::create_dir_all(&self.base_path)?;
        let stem = file_stem_for(title);

        let mut attempt = 1;
        loop {
            let path = self.base_path.join(numbered(&stem, attempt, "txt"));
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => {
                    tracing::debug!("Created document file: {}", path.display());
                    return Ok(LocalDocument { path, file });
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => attempt += 1,
                Err(e) => return Err(e.into()),
            }
        }
    }
}

#[async_trait]
impl DocumentHandle for LocalDocument {
    async fn append_text_block(&mut self, text: &str) -> Result<()> {
        writeln!(self.file, "{}", text)?;
        Ok(())
    }

    fn locator(&self) -> String {
        self.path.display().to_string()
    }
}

struct ArchiveEntry {
    name: String,
    text: String,
}

/// Collects every document of a batch into a single ZIP archive written on `finish`.
///
/// Locators name the archive entry a document will occupy. Nothing reaches
/// disk until `finish`, so a batch that ends in an error leaves no archive
/// even though earlier rows were already logged as created.
pub struct ArchiveDocumentStore {
    requested_path: PathBuf,
    archive_path: Option<PathBuf>,
    entries: Vec<Arc<Mutex<ArchiveEntry>>>,
    names: HashSet<String>,
}

impl ArchiveDocumentStore {
    pub fn new<P: Into<PathBuf>>(archive_path: P) -> Self {
        Self {
            requested_path: archive_path.into(),
            archive_path: None,
            entries: Vec::new(),
            names: HashSet::new(),
        }
    }

    /// Picks the archive path on first use so an earlier archive is left alone.
    fn archive_path(&mut self) -> PathBuf {
        if let Some(path) = &self.archive_path {
            return path.clone();
        }

        let parent = self
            .requested_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        let stem = self
            .requested_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("quotes")
            .to_string();

        let mut attempt = 1;
        let path = loop {
            let candidate = parent.join(numbered(&stem, attempt, "zip"));
            if !candidate.exists() {
                break candidate;
            }
            attempt += 1;
        };

        self.archive_path = Some(path.clone());
        path
    }

    fn entry_name(&mut self, title: &str) -> String {
        let stem = file_stem_for(title);
        let mut attempt = 1;
        loop {
            let name = numbered(&stem, attempt, "txt");
            if self.names.insert(name.clone()) {
                return name;
            }
            attempt += 1;
        }
    }
}

pub struct ArchiveDocument {
    locator: String,
    entry: Arc<Mutex<ArchiveEntry>>,
}

#[async_trait]
impl DocumentStore for ArchiveDocumentStore {
    type Handle = ArchiveDocument;

    async fn create_document(&mut self, title: &str) -> Result<ArchiveDocument> {
        let archive = self.archive_path();
        let name = self.entry_name(title);
        let entry = Arc::new(Mutex::new(ArchiveEntry {
            name: name.clone(),
            text: String::new(),
        }));
        self.entries.push(entry.clone());

        Ok(ArchiveDocument {
            locator: format!("{}#{}", archive.display(), name),
            entry,
        })
    }

    async fn finish(&mut self) -> Result<()> {
        if self.entries.is_empty() {
            tracing::debug!("No documents created, archive not written");
            return Ok(());
        }
        let archive = self.archive_path();

        let zip_data = {
            let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
            for entry in &self.entries {
                let entry = entry.lock().map_err(|_| DocgenError::ProcessingError {
                    message: "archive entry lock poisoned".to_string(),
                })?;
                zip.start_file(entry.name.as_str(), SimpleFileOptions::default())?;
                zip.write_all(entry.text.as_bytes())?;
            }
            let cursor = zip.finish()?;
            cursor.into_inner()
        };

        if let Some(parent) = archive.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        tracing::debug!("Writing archive ({} bytes) to {}", zip_data.len(), archive.display());
        fs::write(&archive, zip_data)?;
        Ok(())
    }
}

#[async_trait]
impl DocumentHandle for ArchiveDocument {
    async fn append_text_block(&mut self, text: &str) -> Result<()> {
        let mut entry = self.entry.lock().map_err(|_| DocgenError::ProcessingError {
            message: "archive entry lock poisoned".to_string(),
        })?;
        entry.text.push_str(text);
        entry.text.push('\n');
        Ok(())
    }

    fn locator(&self) -> String {
        self.locator.clone()
    }
}
