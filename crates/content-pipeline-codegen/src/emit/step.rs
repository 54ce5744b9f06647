//! Per-class mapping step

use super::writer::{SourceWriter, string_literal};
use super::{Emitter, global, group_identifier};
use crate::naming::{converter_members, lower_first};
use content_pipeline_core::{CLASS_STEP_ORDER, ContentClass, ContentProperty, ConverterId};

/// Type a step is constructor-injected with for `converter`
fn injected_type(converter: &ConverterId) -> String {
    match converter {
        ConverterId::None => String::new(),
        ConverterId::WellKnown { converter } => converter.contract_name().to_string(),
        ConverterId::Enum { enum_type } => format!("IEnumConverter<{}>", global(enum_type)),
        ConverterId::Custom { type_name } => global(type_name),
    }
}

fn config_field(property: &ContentProperty) -> String {
    format!("{}Config", property.name)
}

/// Right-hand side of the assignment for one property
fn value_expression(property: &ContentProperty, field: Option<&str>) -> String {
    let name = &property.name;
    let Some(field) = field else {
        return format!("content.{name}");
    };

    let config = match &property.converter_config {
        Some(_) => format!(", {}", config_field(property)),
        None => String::new(),
    };

    match &property.converter {
        ConverterId::Enum { .. } if property.exposed_type.nullable => format!(
            "content.{name}.HasValue ? {field}.GetValue(content.{name}.Value, content, nameof(content.{name}), pipelineContext{config}) : null"
        ),
        _ => format!("{field}.GetValue(content.{name}, content, nameof(content.{name}), pipelineContext{config})"),
    }
}

impl Emitter {
    /// `{Name}PipelineStep`: copies or converts every mapped property
    pub fn pipeline_step(&self, class: &ContentClass) -> String {
        let group = group_identifier(class);
        let interfaces = self.ns("Interfaces");
        let members = converter_members(class);

        let content = global(&class.fully_qualified_name);
        let model = global(&self.model_type(class));

        let mut w = SourceWriter::file();
        w.usings(&["System.Collections.Generic", interfaces.as_str()])
            .blank()
            .namespace(&self.options.steps_namespace(&group))
            .line(&format!(
                "public partial class {} : {}<{content}, {model}>",
                class.pipeline_step_name(),
                global(&self.ns("Pipelines.ContentPipelineStep"))
            ))
            .open("");

        let configured: Vec<_> = class
            .properties
            .iter()
            .filter_map(|p| p.converter_config.as_ref().map(|config| (p, config)))
            .collect();
        for (property, config) in &configured {
            w.line(&format!(
                "private static readonly Dictionary<string, string> {} = new()",
                config_field(property)
            ))
            .open("");
            for (key, value) in config.iter() {
                w.line(&format!("[{}] = {},", string_literal(key), string_literal(value)));
            }
            w.close_with("};").blank();
        }

        for (converter, member) in &members {
            w.line(&format!(
                "private readonly {} _{};",
                injected_type(converter),
                lower_first(member)
            ));
        }
        if !members.is_empty() {
            w.blank();
        }

        let parameters = members
            .iter()
            .map(|(converter, member)| format!("{} {}", injected_type(converter), lower_first(member)))
            .collect::<Vec<_>>()
            .join(", ");
        w.line(&format!("public {}({parameters})", class.pipeline_step_name()))
            .indent()
            .line(&format!(": base(order: {CLASS_STEP_ORDER})"))
            .dedent()
            .open("");
        for (_, member) in &members {
            let parameter = lower_first(member);
            w.line(&format!("_{parameter} = {parameter};"));
        }
        w.close().blank();

        w.open(&format!(
            "public override void Execute({content} content, {model} contentPipelineModel, IContentPipelineContext pipelineContext)"
        ));
        for property in &class.properties {
            let field = members
                .iter()
                .find(|(converter, _)| **converter == property.converter)
                .map(|(_, member)| format!("_{}", lower_first(member)));
            w.line(&format!(
                "contentPipelineModel.{} = {};",
                property.name,
                value_expression(property, field.as_deref())
            ));
        }
        w.close().close();
        w.finish()
    }
}
