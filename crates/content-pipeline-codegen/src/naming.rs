//! Naming conventions for generated code.
//!
//! | Input | Function | Output |
//! |-------|----------|--------|
//! | `MediaConverter` | [`lower_first`] | `mediaConverter` |
//! | `IEnumConverter<Site.ColorEnum>` | [`converter_member_name`] | `ColorEnumEnumConverter` |
//! | `Site-Name` | [`sanitize_identifier`] | `Site_Name` |
//!
//! [`ArtifactNamer`] and [`pipeline_member_names`] keep generated file and
//! member names injective even when two classes share a group, a name and
//! the first 8 hex characters of their identifier.

use content_pipeline_core::{ArtifactKind, ContentClass, ConverterId, GenerateError, GenerateResult};
use std::collections::HashSet;

/// Lower-case the first letter of a string.
///
/// # Examples
///
/// ```
/// use content_pipeline_codegen::naming::lower_first;
///
/// assert_eq!(lower_first("MediaConverter"), "mediaConverter");
/// assert_eq!(lower_first(""), "");
/// ```
pub fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().chain(chars).collect(),
    }
}

/// Replace every character that cannot appear in an identifier with `_`.
pub fn sanitize_identifier(s: &str) -> String {
    let mut result: String = s
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if result.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        result.insert(0, '_');
    }
    result
}

/// Last dotted segment of a type name, ignoring generic arguments.
pub fn simple_type_name(type_name: &str) -> &str {
    let without_generics = match type_name.split_once('<') {
        Some((head, _)) => head,
        None => type_name,
    };
    match without_generics.rsplit_once('.') {
        Some((_, simple)) => simple,
        None => without_generics,
    }
}

/// Member name for an injected converter.
///
/// # Examples
///
/// ```
/// use content_pipeline_codegen::naming::converter_member_name;
/// use content_pipeline_core::{ConverterId, WellKnownConverter};
///
/// assert_eq!(converter_member_name(&ConverterId::well_known(WellKnownConverter::Media)), "MediaConverter");
/// assert_eq!(converter_member_name(&ConverterId::enumeration("Site.ColorEnum")), "ColorEnumEnumConverter");
/// assert_eq!(converter_member_name(&ConverterId::custom("Site.Converters.CustomConverter")), "CustomConverter");
/// ```
pub fn converter_member_name(converter: &ConverterId) -> String {
    match converter {
        ConverterId::None => String::new(),
        ConverterId::WellKnown { converter } => converter.implementation_name().to_string(),
        ConverterId::Enum { enum_type } => {
            format!("{}EnumConverter", sanitize_identifier(simple_type_name(enum_type)))
        }
        ConverterId::Custom { type_name } => sanitize_identifier(simple_type_name(type_name)),
    }
}

/// Candidate sequence: the short form, the wide form, then the wide form
/// with an ordinal.
fn claim(taken: &mut HashSet<String>, short: &str, wide: &str, render: impl Fn(&str) -> String) -> String {
    let mut attempt = 0usize;
    loop {
        let candidate = match attempt {
            0 => short.to_string(),
            1 => wide.to_string(),
            n => format!("{wide}_{n}"),
        };
        let rendered = render(&candidate);
        if taken.insert(rendered.clone()) {
            return rendered;
        }
        attempt += 1;
    }
}

/// Hands out generated file names, unique within one run
#[derive(Debug)]
pub struct ArtifactNamer {
    extension: String,
    taken: HashSet<String>,
}

impl ArtifactNamer {
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
            taken: HashSet::new(),
        }
    }

    /// Fixed name for a shared artifact
    pub fn shared(&mut self, stem: &str) -> GenerateResult<String> {
        let file_name = format!("{stem}.g.{}", self.extension);
        if self.taken.insert(file_name.clone()) {
            Ok(file_name)
        } else {
            Err(GenerateError::DuplicateArtifact(file_name))
        }
    }

    /// `{group}_{name}_{kind}_{id8}.g.{ext}`, widened on collision
    pub fn per_class(&mut self, class: &ContentClass, kind: ArtifactKind) -> String {
        let stem = |id: &str| {
            format!(
                "{}_{}_{}_{}",
                sanitize_identifier(&class.group),
                sanitize_identifier(&class.name),
                kind.file_segment(),
                id
            )
        };
        let extension = &self.extension;
        claim(
            &mut self.taken,
            &stem(&class.short_id()),
            &stem(&class.stable_id.hex()),
            |candidate| format!("{candidate}.g.{extension}"),
        )
    }
}

/// Names of the per-class pipeline members on the generated service:
/// `{Group}{id8}{Name}`, in the order of `classes`
pub fn pipeline_member_names(classes: &[ContentClass]) -> Vec<String> {
    let mut taken = HashSet::new();
    classes
        .iter()
        .map(|class| {
            let group = sanitize_identifier(&class.group);
            let name = sanitize_identifier(&class.name);
            claim(
                &mut taken,
                &format!("{group}{}{name}", class.short_id()),
                &format!("{group}{}{name}", class.stable_id.hex()),
                str::to_string,
            )
        })
        .collect()
}

/// Distinct converter member names for one step, in order of first use
pub fn converter_members(class: &ContentClass) -> Vec<(&ConverterId, String)> {
    let mut taken = HashSet::new();
    class
        .distinct_converters()
        .into_iter()
        .map(|converter| {
            let base = converter_member_name(converter);
            let name = claim(&mut taken, &base, &base, str::to_string);
            (converter, name)
        })
        .collect()
}
