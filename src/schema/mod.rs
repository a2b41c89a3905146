//! UI definition language front end
//!
//! Schema files (`*.dto` by default) declare the messages exchanged between
//! the server-side object model and its browser-side renderer:
//!
//! ```text
//! package org.example.dto;
//!
//! enum UiTextAlignment { LEFT, CENTER, RIGHT }
//!
//! abstract class UiComponent referenceable {
//!     boolean visible = true;
//! }
//!
//! class UiPdfViewer extends UiComponent {
//!     required String url;
//!     command showPage(int page);
//!     event pageChanged(int page);
//!     query search(String text) returns List<int>;
//! }
//! ```

pub mod ast;
pub mod lexer;
pub mod parser;

pub use ast::{
    ClassDecl, Declaration, DeclarationKind, EnumDecl, InterfaceDecl, Literal, Members, Message,
    MessageKind, Param, Position, Primitive, Property, SchemaFile, TypeRef,
};
pub use parser::parse;

use crate::error::{UidlError, UidlResult};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Raw content of one schema file
#[derive(Debug, Clone)]
pub struct SchemaSource {
    /// Path relative to the source directory, with `/` separators
    pub relative_path: String,
    pub content: String,
}

/// Collect every schema file below `dir`, sorted by relative path.
///
/// Symlinked files are read; symlinked directories are not descended into.
pub async fn collect_sources(dir: &Path, extension: &str) -> UidlResult<Vec<SchemaSource>> {
    let is_dir = fs::metadata(dir).await.is_ok_and(|m| m.is_dir());
    if !is_dir {
        return Err(UidlError::PathNotFound(dir.to_path_buf()));
    }

    let mut files: Vec<PathBuf> = Vec::new();
    let mut pending = vec![dir.to_path_buf()];

    while let Some(current) = pending.pop() {
        let mut entries = fs::read_dir(&current)
            .await
            .map_err(|e| UidlError::io(format!("reading directory {}", current.display()), e))?;

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| UidlError::io("reading directory entry", e))?
        {
            let path = entry.path();
            let file_type = entry
                .file_type()
                .await
                .map_err(|e| UidlError::io(format!("inspecting {}", path.display()), e))?;

            let is_file = if file_type.is_dir() {
                pending.push(path);
                continue;
            } else if file_type.is_symlink() {
                let target_is_file = fs::metadata(&path).await.is_ok_and(|m| m.is_file());
                if !target_is_file {
                    debug!("Skipping symlink {}", path.display());
                }
                target_is_file
            } else {
                file_type.is_file()
            };

            if is_file && path.extension().is_some_and(|ext| ext == extension) {
                files.push(path);
            }
        }
    }

    if files.is_empty() {
        return Err(UidlError::NoSchemaFiles {
            path: dir.to_path_buf(),
            extension: extension.to_string(),
        });
    }

    let mut sources = Vec::with_capacity(files.len());
    for path in files {
        let relative_path = relative_display(dir, &path)?;
        let bytes = fs::read(&path)
            .await
            .map_err(|e| UidlError::io(format!("reading schema {}", path.display()), e))?;
        let content = decode(&relative_path, bytes)?;
        debug!("Found schema file {}", relative_path);
        sources.push(SchemaSource {
            relative_path,
            content,
        });
    }

    sources.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    Ok(sources)
}

/// UTF-8 decode, reporting the first bad byte as a parse position
fn decode(file: &str, bytes: Vec<u8>) -> UidlResult<String> {
    String::from_utf8(bytes).map_err(|e| {
        let valid = &e.as_bytes()[..e.utf8_error().valid_up_to()];
        // The prefix is valid by construction
        let prefix = String::from_utf8_lossy(valid);
        let line = prefix.matches('\n').count() + 1;
        let column = prefix.rsplit('\n').next().map_or(0, |l| l.chars().count()) + 1;
        UidlError::parse(file, line, column, "invalid UTF-8")
    })
}

/// Parse collected sources in order
pub fn parse_sources(sources: &[SchemaSource]) -> UidlResult<Vec<SchemaFile>> {
    sources
        .iter()
        .map(|s| parse(&s.relative_path, &s.content))
        .collect()
}

fn relative_display(root: &Path, path: &Path) -> UidlResult<String> {
    let relative = path.strip_prefix(root).map_err(|_| UidlError::PathInvalid {
        path: path.to_path_buf(),
        reason: format!("not below {}", root.display()),
    })?;

    Ok(relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/"))
}
