//! CLI command implementations

pub mod check;
pub mod completions;
pub mod config;
pub mod generate;

pub use check::execute as check;
pub use completions::execute as completions;
pub use config::execute as config;
pub use generate::execute as generate;

use crate::cache::PublishPolicy;
use crate::error::UidlResult;
use crate::model::DtoModel;
use crate::schema::{self, SchemaSource};
use std::path::Path;
use tracing::debug;

/// Read, parse and validate every schema file below `source`
async fn load_schema(
    source: &Path,
    extension: &str,
    policy: PublishPolicy,
) -> UidlResult<(Vec<SchemaSource>, DtoModel)> {
    let sources = schema::collect_sources(source, extension).await?;
    debug!("Parsing {} schema files", sources.len());
    let files = schema::parse_sources(&sources)?;
    let model = DtoModel::with_policy(files, policy)?;
    Ok((sources, model))
}
