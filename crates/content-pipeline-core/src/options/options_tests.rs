#![allow(non_snake_case)]

use super::*;

#[test]
fn GeneratorOptions___default___has_expected_values() {
    let options = GeneratorOptions::default();

    assert_eq!(options.shared_namespace, "ContentPipeline");
    assert!(!options.forms_enabled);
    assert_eq!(options.file_extension, "cs");
}

#[test]
fn GeneratorOptions___from_json___empty_bytes_returns_default() {
    let options = GeneratorOptions::from_json(b"").unwrap();

    assert_eq!(options, GeneratorOptions::default());
}

#[test]
fn GeneratorOptions___from_json___partial_config_uses_defaults() {
    let json = br#"{"forms_enabled": true}"#;

    let options = GeneratorOptions::from_json(json).unwrap();

    assert!(options.forms_enabled);
    assert_eq!(options.shared_namespace, "ContentPipeline");
    assert_eq!(options.file_extension, "cs");
}

#[test]
fn GeneratorOptions___from_json___invalid_json_returns_error() {
    let result = GeneratorOptions::from_json(b"{not json");

    assert!(result.is_err());
}

#[test]
fn GeneratorOptions___from_build_properties___missing_flag_keeps_forms_off() {
    let properties = BTreeMap::new();

    let options = GeneratorOptions::from_build_properties(&properties);

    assert!(!options.forms_enabled);
}

#[test]
fn GeneratorOptions___from_build_properties___reads_forms_flag() {
    let mut properties = BTreeMap::new();
    properties.insert(
        GeneratorOptions::FORMS_BUILD_PROPERTY.to_string(),
        "Enabled".to_string(),
    );

    let options = GeneratorOptions::from_build_properties(&properties);

    assert!(options.forms_enabled);
}

#[test]
fn GeneratorOptions___namespaces___derive_from_shared_namespace() {
    let options = GeneratorOptions::default().with_shared_namespace("Acme.Pipeline");

    assert_eq!(options.interface_namespace(), "Acme.Pipeline.Interfaces");
    assert_eq!(options.models_namespace("Common"), "Acme.Pipeline.Models.Common");
    assert_eq!(
        options.steps_namespace("Form"),
        "Acme.Pipeline.Pipelines.Form.Steps"
    );
}

#[test]
fn GeneratorOptions___validate___default_is_valid() {
    assert!(GeneratorOptions::default().validate().is_ok());
}

#[test]
fn GeneratorOptions___validate___empty_namespace_is_rejected() {
    let options = GeneratorOptions::default().with_shared_namespace("");

    let result = options.validate();

    assert!(matches!(result, Err(GenerateError::ConfigError(_))));
}

#[test]
fn GeneratorOptions___validate___dotted_extension_is_rejected() {
    let options = GeneratorOptions::default().with_file_extension(".cs");

    let result = options.validate();

    assert!(matches!(result, Err(GenerateError::ConfigError(_))));
}
