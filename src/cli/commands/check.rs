//! Check command - validate schema files and summarize the model

use super::load_schema;
use crate::cli::args::{CheckArgs, OutputFormat};
use crate::config::Config;
use crate::error::UidlResult;
use crate::model::DtoModel;
use crate::schema::{DeclarationKind, Members};
use crate::ui::{self, UiContext};
use console::style;
use serde::Serialize;

/// One declared type as reported by `check`
#[derive(Debug, Serialize)]
pub struct TypeSummary {
    pub name: String,
    pub kind: DeclarationKind,
    pub file: String,
    pub properties: usize,
    pub commands: usize,
    pub events: usize,
    pub queries: usize,
    pub referenceable: bool,
}

/// Result of a successful check
#[derive(Debug, Serialize)]
pub struct CheckSummary {
    pub package: Option<String>,
    pub files: Vec<String>,
    pub types: Vec<TypeSummary>,
}

/// Execute the check command
pub async fn execute(args: CheckArgs, config: &Config) -> UidlResult<()> {
    let (sources, model) = load_schema(
        &args.source,
        &config.generator.extension,
        config.cache.publish,
    )
    .await?;

    let summary = summarize(
        &model,
        sources.into_iter().map(|s| s.relative_path).collect(),
    )?;

    match args.format {
        OutputFormat::Table => print_table(&summary),
        OutputFormat::Json => print_json(&summary)?,
        OutputFormat::Plain => print_plain(&summary),
    }

    Ok(())
}

fn counts(summary: &mut TypeSummary, members: &Members) {
    summary.commands = members.commands.len();
    summary.events = members.events.len();
    summary.queries = members.queries.len();
}

/// Build the summary; type order is classes, interfaces, then enums
pub fn summarize(model: &DtoModel, files: Vec<String>) -> UidlResult<CheckSummary> {
    let mut types = Vec::new();
    let file_of = |name: &str| model.file_of(name).unwrap_or_default().to_string();

    for class in model.classes() {
        let mut entry = TypeSummary {
            name: class.name.clone(),
            kind: DeclarationKind::Class,
            file: file_of(&class.name),
            properties: model.all_properties(&class.name)?.len(),
            commands: 0,
            events: 0,
            queries: 0,
            referenceable: model.is_referenceable(class),
        };
        counts(&mut entry, &class.members);
        types.push(entry);
    }
    for interface in model.interfaces() {
        let mut entry = TypeSummary {
            name: interface.name.clone(),
            kind: DeclarationKind::Interface,
            file: file_of(&interface.name),
            properties: model.all_properties(&interface.name)?.len(),
            commands: 0,
            events: 0,
            queries: 0,
            referenceable: false,
        };
        counts(&mut entry, &interface.members);
        types.push(entry);
    }
    for decl in model.enums() {
        types.push(TypeSummary {
            name: decl.name.clone(),
            kind: DeclarationKind::Enum,
            file: file_of(&decl.name),
            properties: 0,
            commands: 0,
            events: 0,
            queries: 0,
            referenceable: false,
        });
    }

    Ok(CheckSummary {
        package: model.package().map(str::to_string),
        files,
        types,
    })
}

fn print_table(summary: &CheckSummary) {
    let ctx = UiContext::detect();
    ui::intro(&ctx, "Schema");

    println!(
        "{:<32} {:<10} {:>5} {:>5} {:>6} {:>7}  {}",
        style("NAME").bold(),
        style("KIND").bold(),
        style("PROPS").bold(),
        style("CMDS").bold(),
        style("EVENTS").bold(),
        style("QUERIES").bold(),
        style("FILE").bold()
    );
    println!("{}", "-".repeat(90));

    for t in &summary.types {
        let kind = match t.kind {
            DeclarationKind::Class if t.referenceable => style("class*").cyan(),
            DeclarationKind::Class => style("class").cyan(),
            DeclarationKind::Interface => style("interface").magenta(),
            DeclarationKind::Enum => style("enum").yellow(),
        };
        println!(
            "{:<32} {:<10} {:>5} {:>5} {:>6} {:>7}  {}",
            t.name, kind, t.properties, t.commands, t.events, t.queries, t.file
        );
    }

    println!();
    println!(
        "{} type(s) in {} file(s){}",
        summary.types.len(),
        summary.files.len(),
        summary
            .package
            .as_deref()
            .map(|p| format!(", package {}", p))
            .unwrap_or_default()
    );
}

fn print_json(summary: &CheckSummary) -> UidlResult<()> {
    let json = serde_json::to_string_pretty(summary)?;
    println!("{}", json);
    Ok(())
}

fn print_plain(summary: &CheckSummary) {
    for t in &summary.types {
        println!("{}", t.name);
    }
}
