//! Rust DTO emitter
//!
//! Renders a [`DtoModel`] into a Rust module tree below
//! `<target>/<package path>/`:
//!
//! | File | Content |
//! |------|---------|
//! | `<class>.rs` | struct, constructor, builders, interface impls, own messages |
//! | `<class>_reference.rs` | id reference for referenceable base classes |
//! | `<interface>.rs` | accessor trait and own messages |
//! | `<enum>.rs` | enum with SCREAMING_SNAKE wire names |
//! | `object_type.rs`, `event_type.rs`, `query_type.rs` | type enums |
//! | `command.rs`, `event.rs`, `query.rs` | tagged message unions |
//! | `type_ids.rs` | type id to Rust path table |
//! | `mod.rs` | module declarations and re-exports |

pub mod emit;
pub mod types;
pub mod unions;
pub mod writer;

use crate::error::{UidlError, UidlResult};
use crate::model::naming::snake_case;
use crate::model::DtoModel;
use crate::schema::{MessageKind, SchemaSource};
use emit::Emitter;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};
use unions::ModuleIndex;

/// Name of the file recording which inputs produced a target directory
pub const FINGERPRINT_FILE: &str = ".uidl-fingerprint";

/// Rendered file, path relative to the target directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub content: String,
}

/// Summary of a generator run
#[derive(Debug, Clone)]
pub struct GenerateReport {
    pub package: String,
    pub package_dir: PathBuf,
    pub files: Vec<PathBuf>,
}

pub struct Generator<'a> {
    package: String,
    model: &'a DtoModel,
    fingerprint: Option<String>,
}

impl<'a> Generator<'a> {
    pub fn new(package: impl Into<String>, model: &'a DtoModel) -> Self {
        Self {
            package: package.into(),
            model,
            fingerprint: None,
        }
    }

    /// Record `fingerprint` in the target directory after a successful run
    pub fn with_fingerprint(mut self, fingerprint: impl Into<String>) -> Self {
        self.fingerprint = Some(fingerprint.into());
        self
    }

    fn package_segments(&self) -> UidlResult<Vec<&str>> {
        let segments: Vec<&str> = self.package.split('.').collect();
        let valid = segments.iter().all(|s| {
            let mut chars = s.chars();
            chars
                .next()
                .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
                && crate::model::naming::field_ident(s) == *s
        });
        if valid {
            Ok(segments)
        } else {
            Err(UidlError::InvalidPackage(self.package.clone()))
        }
    }

    /// Render every file in memory, in a stable order
    pub fn render(&self) -> UidlResult<Vec<GeneratedFile>> {
        let segments = self.package_segments()?;
        let package_dir: PathBuf = segments.iter().collect();
        let emitter = Emitter::new(self.model);
        let mut index = ModuleIndex::default();
        let mut modules: BTreeMap<String, String> = BTreeMap::new();

        let mut add = |module: String, exports: Vec<String>, content: String| -> UidlResult<()> {
            if modules.contains_key(&module) {
                return Err(UidlError::User(format!(
                    "Two declarations map to the generated module {}",
                    module
                )));
            }
            index.add(module.clone(), exports);
            modules.insert(module, content);
            Ok(())
        };

        for class in self.model.classes() {
            add(
                snake_case(&class.name),
                vec![class.name.clone()],
                emitter.class(class)?,
            )?;
            if self.model.is_referenceable_base_class(class) {
                add(
                    format!("{}_reference", snake_case(&class.name)),
                    vec![format!("{}Reference", class.name)],
                    emitter.reference(class),
                )?;
            }
        }
        for interface in self.model.interfaces() {
            add(
                snake_case(&interface.name),
                vec![interface.name.clone()],
                emitter.interface(interface)?,
            )?;
        }
        for decl in self.model.enums() {
            add(
                snake_case(&decl.name),
                vec![decl.name.clone()],
                emitter.enumeration(decl),
            )?;
        }

        add(
            "object_type".into(),
            vec!["ObjectType".into()],
            unions::object_type(self.model),
        )?;
        for kind in [MessageKind::Event, MessageKind::Query] {
            add(
                format!("{}_type", snake_case(kind.suffix())),
                vec![format!("{}Type", kind.suffix())],
                unions::message_type(self.model, kind),
            )?;
        }
        for kind in [MessageKind::Command, MessageKind::Event, MessageKind::Query] {
            add(
                snake_case(kind.suffix()),
                vec![kind.suffix().to_string()],
                unions::message_union(self.model, kind),
            )?;
        }
        add("type_ids".into(), Vec::new(), unions::type_ids(self.model))?;

        let mut files: Vec<GeneratedFile> = modules
            .into_iter()
            .map(|(module, content)| GeneratedFile {
                path: package_dir.join(format!("{}.rs", module)),
                content,
            })
            .collect();
        files.push(GeneratedFile {
            path: package_dir.join("mod.rs"),
            content: index.render(),
        });

        // Every ancestor directory, the target root included, declares the next segment
        for depth in 0..segments.len() {
            let dir: PathBuf = segments[..depth].iter().collect();
            files.push(GeneratedFile {
                path: dir.join("mod.rs"),
                content: unions::parent_module(segments[depth]),
            });
        }

        Ok(files)
    }

    /// Replace `target` with freshly generated sources
    pub async fn generate(&self, target: &Path) -> UidlResult<GenerateReport> {
        let files = self.render()?;
        let package_dir = target.join(self.package_segments()?.iter().collect::<PathBuf>());

        if fs::try_exists(target).await.unwrap_or(false) {
            debug!("Removing previous output {}", target.display());
            fs::remove_dir_all(target)
                .await
                .map_err(|e| UidlError::io(format!("removing {}", target.display()), e))?;
        }
        fs::create_dir_all(&package_dir)
            .await
            .map_err(|e| UidlError::io(format!("creating {}", package_dir.display()), e))?;

        let mut written = Vec::with_capacity(files.len());
        for file in files {
            let path = target.join(&file.path);
            fs::write(&path, &file.content)
                .await
                .map_err(|e| UidlError::io(format!("writing {}", path.display()), e))?;
            info!("Generated {}", file.path.display());
            written.push(file.path);
        }

        if let Some(fingerprint) = &self.fingerprint {
            let path = target.join(FINGERPRINT_FILE);
            fs::write(&path, fingerprint)
                .await
                .map_err(|e| UidlError::io(format!("writing {}", path.display()), e))?;
        }

        Ok(GenerateReport {
            package: self.package.clone(),
            package_dir,
            files: written,
        })
    }
}

/// SHA-256 over the package and every source, in path order
pub fn fingerprint(package: &str, sources: &[SchemaSource]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(env!("CARGO_PKG_VERSION").as_bytes());
    hasher.update(package.as_bytes());

    let mut sorted: Vec<&SchemaSource> = sources.iter().collect();
    sorted.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));

    for source in sorted {
        hasher.update([0u8]);
        hasher.update(source.relative_path.as_bytes());
        hasher.update([0u8]);
        hasher.update(source.content.as_bytes());
    }

    hex::encode(hasher.finalize())
}

/// Fingerprint stored by the last run into `target`, if any
pub async fn stored_fingerprint(target: &Path) -> Option<String> {
    fs::read_to_string(target.join(FINGERPRINT_FILE))
        .await
        .ok()
        .map(|s| s.trim().to_string())
}
