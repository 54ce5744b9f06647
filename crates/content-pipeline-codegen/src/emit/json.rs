//! Polymorphic JSON writers keyed on the model discriminant

use super::writer::{SourceWriter, string_literal};
use super::{Emitter, SharedSource, global};
use content_pipeline_core::{ArtifactKind, ContentClass};
use std::collections::BTreeSet;

impl Emitter {
    pub(super) fn json_converters(&self, classes: &[ContentClass]) -> Vec<SharedSource> {
        vec![
            SharedSource::new(
                "ContentPipelineModelJsonConverter",
                ArtifactKind::JsonConverter,
                self.json_converter("ContentPipelineModelJsonConverter", "IContentPipelineModel", classes),
            ),
            SharedSource::new(
                "LinkPipelineModelJsonConverter",
                ArtifactKind::JsonConverter,
                self.json_converter("LinkPipelineModelJsonConverter", "ILinkPipelineModel", &[]),
            ),
        ]
    }

    fn json_converter(&self, name: &str, contract: &str, classes: &[ContentClass]) -> String {
        let interfaces = self.ns("Interfaces");
        let mut w = SourceWriter::file();
        w.usings(&[
            "System",
            "System.Text.Json",
            "System.Text.Json.Serialization",
            interfaces.as_str(),
        ])
        .blank()
        .namespace(&self.ns("JsonConverters"))
        .open(&format!("public class {name} : JsonConverter<{contract}>"))
        .line("private static readonly JsonSerializerOptions FallbackOptions = new(JsonSerializerDefaults.Web)")
        .open("")
        .line("DefaultIgnoreCondition = JsonIgnoreCondition.WhenWritingNull,")
        .close_with("};")
        .blank()
        .line("public override bool HandleNull => false;")
        .blank()
        .line(&format!(
            "public override {contract}? Read(ref Utf8JsonReader reader, Type typeToConvert, JsonSerializerOptions options) =>"
        ))
        .indent()
        .line("throw new NotSupportedException(\"Pipeline models are write-only.\");")
        .dedent()
        .blank()
        .open(&format!(
            "public override void Write(Utf8JsonWriter writer, {contract} value, JsonSerializerOptions options)"
        ));

        if classes.is_empty() {
            w.line("JsonSerializer.Serialize<object>(writer, value, FallbackOptions);");
        } else {
            // Duplicate discriminants are reported during resolution; the
            // first class keeps the case label.
            let mut seen = BTreeSet::new();
            w.open("switch (value.PipelineModelType)");
            for class in classes {
                let discriminant = class.discriminant();
                if !seen.insert(discriminant.clone()) {
                    continue;
                }
                w.line(&format!("case {}:", string_literal(&discriminant)))
                    .indent()
                    .line(&format!(
                        "JsonSerializer.Serialize(writer, ({})value, options);",
                        global(&self.model_type(class))
                    ))
                    .line("break;")
                    .dedent();
            }
            w.line("default:")
                .indent()
                .line("JsonSerializer.Serialize<object>(writer, value, FallbackOptions);")
                .line("break;")
                .dedent()
                .close();
        }

        w.close().close();
        w.finish()
    }
}
