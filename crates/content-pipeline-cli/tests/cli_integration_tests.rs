//! Integration tests for the generate, check and resolve commands.
//!
//! Each test works in its own temporary directory holding a declaration
//! graph and an output directory.

#![allow(non_snake_case)]

use content_pipeline_cli::{Flags, Invocation, LOCK_FILE_NAME, LockFile, MANIFEST_FILE_NAME, check, generate, resolve};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const GRAPH: &str = r#"
[[types]]
name = "ArticlePage"
namespace = "Site.Models.Pages"
base_type = "PageData"

[[types.attributes]]
name = "ContentType"
named_arguments = { GUID = "308068d7-e9b1-4958-b13b-bc612707cb85" }

[[types.attributes]]
name = "ContentPipelineModel"
constructor_arguments = ["awesome", 10]

[[types.properties]]
name = "Title"
type = "string"
nullable = true

[[types]]
name = "TeaserBlock"
namespace = "Site.Models.Blocks"
base_type = "BlockData"

[[types.attributes]]
name = "ContentType"

[[types.attributes]]
name = "ContentPipelineModel"

[[types.properties]]
name = "Heading"
type = "string"
nullable = true
"#;

/// Two classes in different namespaces mapping to the same model name
const CONFLICTING_GRAPH: &str = r#"{
  "types": [
    { "name": "Teaser", "namespace": "Site.One", "base_type": "BlockData", "attributes": [{ "name": "ContentType" }, { "name": "ContentPipelineModel" }] },
    { "name": "Teaser", "namespace": "Site.Two", "base_type": "BlockData", "attributes": [{ "name": "ContentType" }, { "name": "ContentPipelineModel" }] }
  ]
}"#;

const ARTICLE_MODEL: &str = "Awesome_ArticlePage_PipelineModel_308068d7.g.cs";

fn write_graph(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn invocation(input: PathBuf, output: &Path) -> Invocation {
    Invocation::resolve(Flags {
        input: Some(input),
        output: Some(output.to_path_buf()),
        ..Flags::default()
    })
    .unwrap()
}

fn generated_files(output: &Path) -> Vec<String> {
    let mut names: Vec<_> = fs::read_dir(output)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

// =============================================================================
// Generate
// =============================================================================

mod generate_command {
    use super::*;

    #[test]
    fn generate___toml_graph___writes_artifacts_and_lock_file() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("Generated");
        let invocation = invocation(write_graph(&dir, "graph.toml", GRAPH), &output);

        let summary = generate::run(&invocation).unwrap();

        let files = generated_files(&output);
        assert_eq!(files.len(), summary.written + 1);
        assert!(files.contains(&ARTICLE_MODEL.to_string()));
        assert!(files.contains(&LOCK_FILE_NAME.to_string()));
        let lock = LockFile::read(&output).unwrap().unwrap();
        assert_eq!(lock.files.len(), summary.written);
    }

    #[test]
    fn generate___class_removed_from_graph___deletes_its_files() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("Generated");
        let input = write_graph(&dir, "graph.toml", GRAPH);
        generate::run(&invocation(input.clone(), &output)).unwrap();

        let without_teaser = GRAPH.split("[[types]]\nname = \"TeaserBlock\"").next().unwrap();
        fs::write(&input, without_teaser).unwrap();
        let summary = generate::run(&invocation(input, &output)).unwrap();

        assert_eq!(summary.removed.len(), 3);
        assert_eq!(summary.removed.iter().filter(|name| name.contains("TeaserBlock")).count(), 2);
        assert!(summary.removed.contains(&"ICommonPipelineModel.g.cs".to_string()));
        assert!(!generated_files(&output).iter().any(|name| name.contains("TeaserBlock")));
    }

    #[test]
    fn generate___lock_entry_outside_output___fails_without_deleting() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("Generated");
        let invocation = invocation(write_graph(&dir, "graph.toml", GRAPH), &output);
        generate::run(&invocation).unwrap();
        let outside = dir.path().join("keep.txt");
        fs::write(&outside, "not generated").unwrap();
        let mut lock = LockFile::read(&output).unwrap().unwrap();
        lock.files.insert("../keep.txt".to_string(), "sha256:00".to_string());
        lock.write(&output).unwrap();

        let err = generate::run(&invocation).unwrap_err();

        assert!(format!("{err:#}").contains("../keep.txt"));
        assert_eq!(fs::read_to_string(&outside).unwrap(), "not generated");
        assert!(check::compare(&invocation).is_err());
    }

    #[test]
    fn generate___error_diagnostic___fails_without_writing() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("Generated");
        let invocation = invocation(write_graph(&dir, "graph.json", CONFLICTING_GRAPH), &output);

        let err = generate::run(&invocation).unwrap_err();

        assert!(err.to_string().contains("1 error"));
        assert!(!output.exists());
    }

    #[test]
    fn generate___unsupported_graph_format___reports_path() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("Generated");
        let invocation = invocation(write_graph(&dir, "graph.yaml", "types: []"), &output);

        let err = generate::run(&invocation).unwrap_err();

        assert!(format!("{err:#}").contains("graph.yaml"));
    }

    #[test]
    fn generate___manifest_namespace___is_used() {
        let dir = TempDir::new().unwrap();
        write_graph(&dir, "graph.toml", GRAPH);
        let manifest = write_graph(
            &dir,
            MANIFEST_FILE_NAME,
            "[generator]\nshared_namespace = \"Acme.Pipelines\"\n\n[input]\ngraph = \"graph.toml\"\noutput = \"out\"\n",
        );
        let invocation = Invocation::resolve(Flags {
            manifest: Some(manifest),
            ..Flags::default()
        })
        .unwrap();

        generate::run(&invocation).unwrap();

        let model = fs::read_to_string(dir.path().join("out").join(ARTICLE_MODEL)).unwrap();
        assert!(model.contains("namespace Acme.Pipelines.Models.Awesome"));
    }
}

// =============================================================================
// Check
// =============================================================================

mod check_command {
    use super::*;

    fn generated(dir: &TempDir) -> Invocation {
        let output = dir.path().join("Generated");
        let invocation = invocation(write_graph(dir, "graph.toml", GRAPH), &output);
        generate::run(&invocation).unwrap();
        invocation
    }

    #[test]
    fn check___fresh_output___is_clean() {
        let dir = TempDir::new().unwrap();
        let invocation = generated(&dir);

        let report = check::run(&invocation).unwrap();

        assert!(report.is_clean());
        assert!(report.checked > 0);
    }

    #[test]
    fn check___edited_file___is_reported_as_changed() {
        let dir = TempDir::new().unwrap();
        let invocation = generated(&dir);
        let path = invocation.output_dir().unwrap().join(ARTICLE_MODEL);
        fs::write(&path, "// edited by hand\n").unwrap();

        let report = check::compare(&invocation).unwrap();

        assert_eq!(report.changed, vec![ARTICLE_MODEL.to_string()]);
        assert!(check::run(&invocation).is_err());
    }

    #[test]
    fn check___deleted_file___is_reported_as_missing() {
        let dir = TempDir::new().unwrap();
        let invocation = generated(&dir);
        fs::remove_file(invocation.output_dir().unwrap().join(ARTICLE_MODEL)).unwrap();

        let report = check::compare(&invocation).unwrap();

        assert_eq!(report.missing, vec![ARTICLE_MODEL.to_string()]);
        assert!(report.changed.is_empty());
    }

    #[test]
    fn check___forms_enabled_later___reports_form_files_and_changed_registrations() {
        let dir = TempDir::new().unwrap();
        let invocation = generated(&dir);
        let mut with_forms = invocation.clone();
        with_forms.options.forms_enabled = true;

        let report = check::compare(&with_forms).unwrap();

        assert_eq!(report.missing.iter().filter(|name| name.contains("FormContainerBlock")).count(), 2);
        assert!(report.missing.contains(&"IFormPipelineModel.g.cs".to_string()));
        assert!(!report.changed.is_empty());
        assert!(report.stale.is_empty());
    }
}

// =============================================================================
// Resolve
// =============================================================================

mod resolve_command {
    use super::*;

    #[test]
    fn resolve___graph___prints_classes_in_order() {
        let dir = TempDir::new().unwrap();
        let invocation = Invocation::resolve(Flags {
            input: Some(write_graph(&dir, "graph.toml", GRAPH)),
            ..Flags::default()
        })
        .unwrap();

        let json = resolve::run(&invocation, false).unwrap();

        let classes: serde_json::Value = serde_json::from_str(&json).unwrap();
        let names: Vec<_> = classes
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["TeaserBlock", "ArticlePage"]);
        assert_eq!(classes[1]["group"], "Awesome");
        assert_eq!(classes[1]["stable_id"], "308068d7-e9b1-4958-b13b-bc612707cb85");
    }
}
