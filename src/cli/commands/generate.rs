//! Generate command - compile a schema directory into Rust modules

use super::load_schema;
use crate::cli::args::GenerateArgs;
use crate::codegen::{self, Generator};
use crate::config::Config;
use crate::error::{UidlError, UidlResult};
use crate::model::DtoModel;
use crate::ui::{self, TaskSpinner, UiContext};
use std::path::Path;
use tokio::fs;
use tracing::debug;

/// Execute the generate command
pub async fn execute(args: GenerateArgs, config: &Config) -> UidlResult<()> {
    let ctx = UiContext::detect();
    ui::intro(&ctx, "uidl generate");

    let mut spinner = TaskSpinner::new(&ctx);
    spinner.start(&format!("Reading schema from {}...", args.source.display()));

    let (sources, model) = match load_schema(
        &args.source,
        &config.generator.extension,
        config.cache.publish,
    )
    .await
    {
        Ok(loaded) => loaded,
        Err(e) => {
            spinner.stop_error("Schema could not be loaded");
            return Err(e);
        }
    };
    spinner.stop(&format!("Parsed {} schema file(s)", sources.len()));

    ensure_target_outside_source(&args.source, &args.target).await?;
    let package = resolve_package(args.package.as_deref(), config, &model)?;
    let fingerprint = codegen::fingerprint(&package, &sources);
    let force = args.force || config.generator.force;

    let stored = codegen::stored_fingerprint(&args.target).await;
    if !force && stored.as_deref() == Some(fingerprint.as_str()) {
        debug!("Fingerprint {} unchanged", fingerprint);
        ui::step_info(&ctx, "Schema unchanged, nothing to generate");
        ui::remark(&ctx, "Use --force to regenerate anyway");
        ui::outro_success(&ctx, "Up to date");
        return Ok(());
    }

    spinner.start(&format!("Generating package {}...", package));
    let report = match Generator::new(&package, &model)
        .with_fingerprint(&fingerprint)
        .generate(&args.target)
        .await
    {
        Ok(report) => report,
        Err(e) => {
            spinner.stop_error("Generation failed");
            return Err(e);
        }
    };
    spinner.stop(&format!("Generated {} file(s)", report.files.len()));

    let stats = model.property_cache().stats();
    debug!(
        "Property cache: {} entries, {} hits, {} misses, {} publish retries",
        model.property_cache().len(),
        stats.hits(),
        stats.misses(),
        stats.publish_retries()
    );

    ui::key_value(&ctx, "Package", &report.package);
    ui::key_value(&ctx, "Output", &report.package_dir.display().to_string());
    ui::outro_success(&ctx, "Done");
    Ok(())
}

/// `--package`, then `generator.package`, then the schema's own `package` line
fn resolve_package(flag: Option<&str>, config: &Config, model: &DtoModel) -> UidlResult<String> {
    flag.or(config.generator.package.as_deref())
        .or(model.package())
        .map(str::to_string)
        .ok_or_else(|| {
            UidlError::User(
                "No package given: pass --package or declare `package` in a schema file"
                    .to_string(),
            )
        })
}

/// The target directory is deleted before writing, so it must not hold the schema
async fn ensure_target_outside_source(source: &Path, target: &Path) -> UidlResult<()> {
    let source = fs::canonicalize(source)
        .await
        .map_err(|e| UidlError::io(format!("resolving {}", source.display()), e))?;
    // A target that does not exist yet cannot contain the source
    let Ok(resolved) = fs::canonicalize(target).await else {
        return Ok(());
    };

    if source.starts_with(&resolved) {
        return Err(UidlError::User(format!(
            "Target {} contains the schema directory {}; pick a separate output directory",
            target.display(),
            source.display()
        )));
    }
    Ok(())
}
