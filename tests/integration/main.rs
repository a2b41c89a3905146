//! Integration tests for uidl

use std::path::Path;
use tempfile::TempDir;

const WIDGETS: &str = r#"
package org.example.dto;

enum UiTextAlignment { LEFT, CENTER, RIGHT }

interface UiField {
    required String fieldName;
    event valueChanged(Object value);
}

abstract class UiComponent referenceable {
    String debuggingId;
    boolean visible = true;
    command setVisible(boolean visible);
}

class UiRichTextEditor extends UiComponent implements UiField {
    int minHeight;
    UiTextAlignment alignment = UiTextAlignment.LEFT;
    event imageUploadTooLarge(String fileName, long sizeInBytes);
    query uploadUrl(String fileName) returns String;
}

class UiPanel extends UiComponent {
    *UiComponent content;
    List<*UiComponent> toolButtons = [];
}
"#;

/// Temp workspace with the given files under `schema/`
fn workspace(files: &[(&str, &str)]) -> TempDir {
    let temp = TempDir::new().unwrap();
    let schema = temp.path().join("schema");
    std::fs::create_dir_all(&schema).unwrap();
    for (name, content) in files {
        let path = schema.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }
    temp
}

fn read(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap_or_else(|e| panic!("{}: {}", path.display(), e))
}

mod cli_tests {
    use super::*;
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;

    /// uidl isolated from the user's global and project config
    fn uidl(temp: &TempDir) -> Command {
        let mut cmd = cargo_bin_cmd!("uidl");
        cmd.current_dir(temp.path())
            .arg("--no-local")
            .arg("--config")
            .arg(temp.path().join("config.toml"))
            .env_remove("UIDL_CONFIG");
        cmd
    }

    #[test]
    fn help_displays() {
        cargo_bin_cmd!("uidl")
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("UI definition language toolkit"));
    }

    #[test]
    fn version_displays() {
        cargo_bin_cmd!("uidl")
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("uidl"));
    }

    #[test]
    fn generate_writes_package_tree() {
        let temp = workspace(&[("widgets.dto", WIDGETS)]);

        uidl(&temp)
            .args(["generate", "schema", "out"])
            .assert()
            .success()
            .stdout(predicate::str::contains("org.example.dto"));

        let pkg = temp.path().join("out/org/example/dto");
        let editor = read(&pkg.join("ui_rich_text_editor.rs"));
        assert!(editor.contains("pub struct UiRichTextEditor {"));
        assert!(editor.contains("pub fn new(field_name: String) -> Self {"));
        assert!(editor.contains("impl UiField for UiRichTextEditor {"));
        assert!(editor.contains("pub struct ImageUploadTooLargeEvent {"));

        let event_type = read(&pkg.join("event_type.rs"));
        assert!(event_type.contains("UI_RICH_TEXT_EDITOR_IMAGE_UPLOAD_TOO_LARGE"));
        assert!(event_type.contains("UI_FIELD_VALUE_CHANGED"));

        assert!(pkg.join("ui_component_reference.rs").exists());
        assert!(!pkg.join("ui_panel_reference.rs").exists());
        assert!(read(&pkg.join("ui_panel.rs")).contains("Vec<UiComponentReference>"));
        assert!(read(&temp.path().join("out/mod.rs")).contains("pub mod org;"));
        assert!(temp.path().join("out/.uidl-fingerprint").exists());
    }

    #[test]
    fn generate_logs_each_file_with_verbose() {
        let temp = workspace(&[("widgets.dto", WIDGETS)]);

        uidl(&temp)
            .args(["-v", "generate", "schema", "out"])
            .assert()
            .success()
            .stderr(predicate::str::contains("Generated org/example/dto/event.rs").or(
                predicate::str::contains("Generated org\\example\\dto\\event.rs"),
            ));
    }

    #[test]
    fn generate_skips_unchanged_schema() {
        let temp = workspace(&[("widgets.dto", WIDGETS)]);
        uidl(&temp).args(["generate", "schema", "out"]).assert().success();

        let marker = temp.path().join("out/marker.txt");
        std::fs::write(&marker, "kept").unwrap();

        uidl(&temp)
            .args(["generate", "schema", "out"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Up to date"));
        assert!(marker.exists());

        uidl(&temp)
            .args(["generate", "schema", "out", "--force"])
            .assert()
            .success();
        assert!(!marker.exists());
    }

    #[test]
    fn generate_reruns_when_schema_changes() {
        let temp = workspace(&[("widgets.dto", WIDGETS)]);
        uidl(&temp).args(["generate", "schema", "out"]).assert().success();

        std::fs::write(
            temp.path().join("schema/extra.dto"),
            "class UiLabel { required String text; }",
        )
        .unwrap();

        uidl(&temp).args(["generate", "schema", "out"]).assert().success();
        assert!(temp.path().join("out/org/example/dto/ui_label.rs").exists());
    }

    #[test]
    fn generate_package_flag_overrides_schema() {
        let temp = workspace(&[("widgets.dto", WIDGETS)]);
        uidl(&temp)
            .args(["generate", "schema", "out", "--package", "ui.dto"])
            .assert()
            .success();
        assert!(temp.path().join("out/ui/dto/ui_panel.rs").exists());
    }

    #[test]
    fn generate_without_package_fails() {
        let temp = workspace(&[("a.dto", "class A {}")]);
        uidl(&temp)
            .args(["generate", "schema", "out"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("No package given"));
        assert!(!temp.path().join("out").exists());
    }

    #[test]
    fn generate_refuses_target_holding_the_schema() {
        let temp = workspace(&[("widgets.dto", WIDGETS)]);

        uidl(&temp)
            .args(["generate", "schema", "schema"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("contains the schema directory"));
        assert!(temp.path().join("schema/widgets.dto").exists());

        uidl(&temp)
            .args(["generate", "schema", "."])
            .assert()
            .failure();
        assert!(temp.path().join("schema/widgets.dto").exists());
    }

    #[test]
    fn parse_error_reports_position() {
        let temp = workspace(&[("bad.dto", "class A {\n  int x\n}\n")]);
        uidl(&temp)
            .args(["check", "schema"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("bad.dto:3:1:"));
    }

    #[test]
    fn unknown_type_fails_validation() {
        let temp = workspace(&[("a.dto", "class A { UiColor color; }")]);
        uidl(&temp)
            .args(["check", "schema"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Unknown type UiColor referenced by A"));
    }

    #[test]
    fn empty_source_dir_has_hint() {
        let temp = workspace(&[]);
        uidl(&temp)
            .args(["check", "schema"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("No schema files"))
            .stderr(predicate::str::contains("Hint:"));
    }

    #[test]
    fn check_json_lists_types() {
        let temp = workspace(&[("widgets.dto", WIDGETS)]);
        let output = uidl(&temp)
            .args(["check", "schema", "--format", "json"])
            .output()
            .unwrap();
        assert!(output.status.success());

        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(json["package"], "org.example.dto");
        let names: Vec<&str> = json["types"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap())
            .collect();
        assert_eq!(
            names,
            vec!["UiComponent", "UiRichTextEditor", "UiPanel", "UiField", "UiTextAlignment"]
        );
    }

    #[test]
    fn check_plain_prints_names() {
        let temp = workspace(&[("widgets.dto", WIDGETS)]);
        uidl(&temp)
            .args(["check", "schema", "--format", "plain"])
            .assert()
            .success()
            .stdout(predicate::str::contains("UiPanel\n"));
    }

    #[test]
    fn custom_extension_from_local_config() {
        let temp = workspace(&[("widgets.idl", WIDGETS)]);
        std::fs::write(
            temp.path().join("uidl.toml"),
            "[generator]\nextension = \"idl\"\n",
        )
        .unwrap();

        cargo_bin_cmd!("uidl")
            .current_dir(temp.path())
            .arg("--config")
            .arg(temp.path().join("config.toml"))
            .args(["check", "schema", "--format", "plain"])
            .assert()
            .success()
            .stdout(predicate::str::contains("UiRichTextEditor"));
    }

    #[test]
    fn config_path() {
        let temp = workspace(&[]);
        uidl(&temp)
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_show() {
        let temp = workspace(&[]);
        uidl(&temp)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[generator]"));
    }

    #[test]
    fn config_init_then_set() {
        let temp = workspace(&[]);
        uidl(&temp).args(["config", "init"]).assert().success();
        uidl(&temp)
            .args(["config", "set", "cache.publish", "compare_and_swap"])
            .assert()
            .success();

        let saved = read(&temp.path().join("config.toml"));
        assert!(saved.contains("publish = \"compare_and_swap\""));
    }

    #[test]
    fn config_set_unknown_key_fails() {
        let temp = workspace(&[]);
        uidl(&temp)
            .args(["config", "set", "vm.name", "x"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Unknown config key"));
    }

    #[test]
    fn completions_bash() {
        cargo_bin_cmd!("uidl")
            .args(["completions", "bash"])
            .assert()
            .success()
            .stdout(predicate::str::contains("uidl"));
    }
}

mod cache_tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread;
    use uidl::cache::{CopyOnWriteLeakyCache, PublishPolicy};

    #[test]
    fn readers_see_consistent_snapshots_while_writers_grow_the_map() {
        let cache: CopyOnWriteLeakyCache<u32, u32> =
            CopyOnWriteLeakyCache::with_policy(PublishPolicy::CompareAndSwap);

        thread::scope(|s| {
            for t in 0..4u32 {
                let cache = &cache;
                s.spawn(move || {
                    for i in 0..100 {
                        let key = t * 100 + i;
                        assert_eq!(cache.compute_if_absent(key, |k| k * 2), key * 2);
                    }
                });
            }
            for _ in 0..4 {
                let cache = &cache;
                s.spawn(move || {
                    for _ in 0..50 {
                        let snapshot = cache.snapshot();
                        let len = snapshot.len();
                        thread::yield_now();
                        // A snapshot never changes under its holder
                        assert_eq!(snapshot.len(), len);
                        assert!(snapshot.iter().all(|(k, v)| *v == k * 2));
                    }
                });
            }
        });

        assert_eq!(cache.len(), 400);
    }

    #[test]
    fn compare_and_swap_adopts_the_published_value() {
        let cache: CopyOnWriteLeakyCache<&str, Arc<String>> =
            CopyOnWriteLeakyCache::with_policy(PublishPolicy::CompareAndSwap);
        let computations = AtomicUsize::new(0);

        let results: Vec<Arc<String>> = thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|i| {
                    let cache = &cache;
                    let computations = &computations;
                    s.spawn(move || {
                        cache.compute_if_absent("UiPanel", |_| {
                            computations.fetch_add(1, Ordering::Relaxed);
                            Arc::new(format!("writer-{}", i))
                        })
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        // Every caller ends up with the one value that was published
        let published = cache.get("UiPanel").unwrap();
        assert!(results.iter().all(|r| Arc::ptr_eq(r, &published)));
        assert!(computations.load(Ordering::Relaxed) >= 1);
        assert_eq!(cache.len(), 1);
    }
}

/// Committed output of `uidl generate` for `tests/golden/widgets.dto`
#[path = "../golden/out/mod.rs"]
#[allow(dead_code, clippy::new_without_default)]
mod generated;

mod golden_tests {
    use super::Path;
    use super::generated::widgets::{
        self, Align, Command, Component, ComponentReference, Event, EventType, Label, Named,
        Query, QueryType,
    };
    use serde_json::json;
    use std::collections::HashMap;
    use uidl::codegen::Generator;
    use uidl::model::DtoModel;

    const SCHEMA: &str = include_str!("../golden/widgets.dto");

    fn golden_dir() -> std::path::PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/golden/out")
    }

    fn golden_files(dir: &Path, out: &mut Vec<String>) {
        for entry in std::fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                golden_files(&path, out);
            } else {
                let relative = path.strip_prefix(golden_dir()).unwrap();
                out.push(relative.to_string_lossy().replace('\\', "/"));
            }
        }
    }

    #[test]
    fn render_matches_the_committed_tree() {
        let file = uidl::schema::parse("widgets.dto", SCHEMA).unwrap();
        let model = DtoModel::from_files(vec![file]).unwrap();
        let rendered = Generator::new("widgets", &model).render().unwrap();

        let mut rendered_paths: Vec<String> = rendered
            .iter()
            .map(|f| f.path.to_string_lossy().replace('\\', "/"))
            .collect();
        rendered_paths.sort();
        let mut committed = Vec::new();
        golden_files(&golden_dir(), &mut committed);
        committed.sort();
        assert_eq!(rendered_paths, committed);

        for file in &rendered {
            let expected = super::read(&golden_dir().join(&file.path));
            assert_eq!(
                file.content,
                expected,
                "{} differs from the committed tree",
                file.path.display()
            );
        }
    }

    #[test]
    fn class_round_trips_with_camel_case_keys_and_defaults() {
        let label: Label = serde_json::from_value(json!({ "name": "title" })).unwrap();
        assert_eq!(label.name, "title");
        assert_eq!(label.visible, Some(true));
        assert_eq!(label.align, Some(Align::Left));
        assert_eq!(label.children, Some(Vec::new()));
        assert_eq!(label.attributes, None);
        assert_eq!(Named::name(&label), "title");

        let label = Label::new("title".into())
            .with_align(Align::TopRight)
            .with_children(vec![ComponentReference::from("c-1")])
            .with_attributes(HashMap::from([("role".to_string(), "heading".to_string())]));
        let value = serde_json::to_value(&label).unwrap();
        assert_eq!(
            value,
            json!({
                "visible": true,
                "name": "title",
                "align": "TOP_RIGHT",
                "children": ["c-1"],
                "attributes": { "role": "heading" }
            })
        );
        assert_eq!(serde_json::from_value::<Label>(value).unwrap(), label);

        assert!(serde_json::from_value::<Label>(json!({ "align": "LEFT" })).is_err());
        assert_eq!(Component::new().visible, Some(true));
        assert_eq!(Label::TYPE_ID, "Label");
    }

    #[test]
    fn unions_are_tagged_by_type_id() {
        let event: Event = widgets::named::RenamedEvent::new("old".into()).into();
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value, json!({ "_type": "Named.renamed", "oldName": "old" }));
        assert_eq!(serde_json::from_value::<Event>(value).unwrap(), event);
        assert_eq!(event.type_id(), "Named.renamed");
        assert_eq!(event.event_type(), EventType::NamedRenamed);
        assert_eq!(serde_json::to_value(EventType::NamedRenamed).unwrap(), json!("NAMED_RENAMED"));

        let command: Command = serde_json::from_value(json!({
            "_type": "Component.setVisible",
            "visible": false
        }))
        .unwrap();
        assert_eq!(
            command,
            Command::ComponentSetVisible(widgets::component::SetVisibleCommand::new(false))
        );

        let query: Query = widgets::label::MeasureQuery::new(120).into();
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({ "_type": "Label.measure", "maxWidth": 120 })
        );
        assert_eq!(query.query_type(), QueryType::LabelMeasure);
        let width: widgets::label::MeasureQueryResult = serde_json::from_value(json!(88.5)).unwrap();
        assert_eq!(width, 88.5);
    }

    #[test]
    fn type_ids_resolve_to_module_paths() {
        assert_eq!(widgets::type_ids::rust_path("Label"), Some("label::Label"));
        assert_eq!(
            widgets::type_ids::rust_path("Component.setVisible"),
            Some("component::SetVisibleCommand")
        );
        assert_eq!(widgets::type_ids::rust_path("Missing"), None);
        assert_eq!(Align::ALL, &[Align::Left, Align::TopRight]);
        assert_eq!(Align::TopRight.as_str(), "TOP_RIGHT");
        assert_eq!(widgets::ObjectType::Component.type_id(), Component::TYPE_ID);
    }
}
