//! Content class resolver
//!
//! A declaration is eligible when it is a concrete class carrying its own
//! content-type marker and a grouping marker, directly or inherited.
//!
//! Turns eligible declarations into [`ContentClass`] values: picks the
//! stable identifier, group and order from the markers, and flattens the
//! base chain into an ordered property list.

use crate::classify::Classifier;
use crate::graph::{AttributeUsage, PropertyDeclaration, SemanticModel, TypeDeclaration, TypeKind};
use crate::markers::EffectiveMarkers;
use crate::naming::sanitize_identifier;
use content_pipeline_core::{
    CancellationToken, ContentClass, Diagnostic, DiagnosticCode, DiagnosticSink, GenerateResult,
    Location, StableId, normalize_group,
};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Where a class's stable identifier came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdOrigin {
    Explicit,
    Derived,
}

/// Resolves declarations against a semantic model
pub struct Resolver<'m> {
    model: &'m dyn SemanticModel,
    cancellation: CancellationToken,
}

impl<'m> Resolver<'m> {
    pub fn new(model: &'m dyn SemanticModel, cancellation: CancellationToken) -> Self {
        Self {
            model,
            cancellation,
        }
    }

    /// Resolve every eligible class, sorted by `(order, fully_qualified_name)`
    pub fn resolve_all(&self, sink: &mut dyn DiagnosticSink) -> GenerateResult<Vec<ContentClass>> {
        let mut resolved = Vec::new();
        let mut explicit_ids: BTreeMap<StableId, String> = BTreeMap::new();

        for decl in self.model.class_declarations() {
            self.cancellation.check()?;

            let Some((class, origin)) = self.resolve_with_origin(decl, sink)? else {
                continue;
            };

            if origin == IdOrigin::Explicit {
                if let Some(first) = explicit_ids.get(&class.stable_id) {
                    sink.report(Diagnostic::new(
                        DiagnosticCode::DuplicateStableId,
                        Location::type_level(&class.fully_qualified_name),
                        format!("GUID {} is already used by {first}", class.stable_id),
                    ));
                } else {
                    explicit_ids.insert(class.stable_id, class.fully_qualified_name.clone());
                }
            }

            resolved.push(class);
        }

        resolved.sort_by(|a, b| {
            a.order
                .cmp(&b.order)
                .then_with(|| a.fully_qualified_name.cmp(&b.fully_qualified_name))
        });

        report_group_collisions(&resolved, sink);

        // Keyed on the generated type, so groups that sanitize alike collide too
        let mut discriminants: BTreeMap<String, &str> = BTreeMap::new();
        for class in &resolved {
            let discriminant = format!("{}.{}", sanitize_identifier(&class.group), class.name);
            match discriminants.get(&discriminant) {
                Some(first) => sink.report(Diagnostic::new(
                    DiagnosticCode::DuplicateDiscriminant,
                    Location::type_level(&class.fully_qualified_name),
                    format!("pipeline model {discriminant} is already generated for {first}"),
                )),
                None => {
                    discriminants.insert(discriminant, &class.fully_qualified_name);
                }
            }
        }

        Ok(resolved)
    }

    /// Resolve a single declaration; `None` when it is not eligible
    pub fn resolve(
        &self,
        decl: &TypeDeclaration,
        sink: &mut dyn DiagnosticSink,
    ) -> GenerateResult<Option<ContentClass>> {
        Ok(self.resolve_with_origin(decl, sink)?.map(|(class, _)| class))
    }

    fn resolve_with_origin(
        &self,
        decl: &TypeDeclaration,
        sink: &mut dyn DiagnosticSink,
    ) -> GenerateResult<Option<(ContentClass, IdOrigin)>> {
        if decl.kind != TypeKind::Class || decl.is_abstract {
            return Ok(None);
        }

        let fully_qualified_name = decl.fully_qualified_name();
        let chain = self.model.base_chain(decl);
        let markers = EffectiveMarkers::for_class(&chain);

        let Some(grouping) = markers.grouping else {
            return Ok(None);
        };
        if markers.content_type().is_none() {
            return Ok(None);
        }

        if chain.cycle {
            sink.report(Diagnostic::new(
                DiagnosticCode::InheritanceCycle,
                Location::type_level(&fully_qualified_name),
                "base type chain loops back on itself; inherited members past the loop are skipped",
            ));
        }
        if let Some(root) = chain.unresolved_root {
            let known_framework_root = self.model.implements(&root.name, "IContentData");
            if !known_framework_root {
                sink.report(Diagnostic::new(
                    DiagnosticCode::UnresolvedBaseType,
                    Location::type_level(&fully_qualified_name),
                    format!("base type '{root}' is not declared; its properties are not mapped"),
                ));
            }
        }

        let (stable_id, origin) =
            stable_id(markers.content_type(), &fully_qualified_name, sink);
        let group = group(grouping, &fully_qualified_name, sink);
        let order = order(grouping, &fully_qualified_name, sink);

        let classifier = Classifier::new(self.model);
        let mut properties = Vec::new();
        for (owner, declaration) in flatten_properties(chain.root_first()) {
            self.cancellation.check()?;
            if let Some(property) = classifier.classify(&owner, declaration, sink) {
                properties.push(property);
            }
        }

        debug!(
            class = %fully_qualified_name,
            id = %stable_id,
            group = %group,
            order,
            properties = properties.len(),
            "resolved content class"
        );

        Ok(Some((
            ContentClass {
                name: decl.name.clone(),
                stable_id,
                group,
                order,
                fully_qualified_name,
                properties,
            },
            origin,
        )))
    }
}

/// Flatten properties root-first. A redeclared name keeps the position of
/// its first declaration and takes the most-derived declaration. Types in
/// framework namespaces contribute nothing.
fn flatten_properties<'a>(
    root_first: impl Iterator<Item = &'a TypeDeclaration>,
) -> Vec<(String, &'a PropertyDeclaration)> {
    let mut flattened: Vec<(String, &'a PropertyDeclaration)> = Vec::new();
    for decl in root_first.filter(|decl| !decl.is_framework_type()) {
        let owner = decl.fully_qualified_name();
        for property in &decl.properties {
            match flattened.iter_mut().find(|(_, p)| p.name == property.name) {
                Some(slot) => *slot = (owner.clone(), property),
                None => flattened.push((owner.clone(), property)),
            }
        }
    }
    flattened
}

/// Warn once per group whose identifier is already taken by another group
fn report_group_collisions(classes: &[ContentClass], sink: &mut dyn DiagnosticSink) {
    let mut owners: BTreeMap<String, &str> = BTreeMap::new();
    let mut reported: BTreeSet<&str> = BTreeSet::new();
    for class in classes {
        let identifier = sanitize_identifier(&class.group);
        match owners.get(&identifier) {
            None => {
                owners.insert(identifier, &class.group);
            }
            Some(owner) if *owner != class.group && reported.insert(&class.group) => {
                sink.report(Diagnostic::new(
                    DiagnosticCode::GroupIdentifierCollision,
                    Location::type_level(&class.fully_qualified_name),
                    format!(
                        "group '{}' generates the same identifier {identifier} as group '{owner}'",
                        class.group
                    ),
                ));
            }
            Some(_) => {}
        }
    }
}

fn stable_id(
    content_type: Option<&AttributeUsage>,
    fully_qualified_name: &str,
    sink: &mut dyn DiagnosticSink,
) -> (StableId, IdOrigin) {
    let Some(written) = content_type.and_then(|marker| marker.named("GUID")) else {
        return (StableId::derive(fully_qualified_name), IdOrigin::Derived);
    };

    match written.as_str().and_then(StableId::parse) {
        Some(id) => (id, IdOrigin::Explicit),
        None => {
            sink.report(Diagnostic::new(
                DiagnosticCode::MalformedStableId,
                Location::type_level(fully_qualified_name),
                format!("GUID {written} is not a valid identifier; a derived identifier is used"),
            ));
            (StableId::derive(fully_qualified_name), IdOrigin::Derived)
        }
    }
}

fn group(grouping: &AttributeUsage, fully_qualified_name: &str, sink: &mut dyn DiagnosticSink) -> String {
    match grouping.argument(0, "Group") {
        None => ContentClass::DEFAULT_GROUP.to_string(),
        Some(Value::String(raw)) => normalize_group(raw),
        Some(other) => {
            sink.report(Diagnostic::new(
                DiagnosticCode::MalformedGroup,
                Location::type_level(fully_qualified_name),
                format!("group must be a string, found {other}; using '{}'", ContentClass::DEFAULT_GROUP),
            ));
            ContentClass::DEFAULT_GROUP.to_string()
        }
    }
}

fn order(grouping: &AttributeUsage, fully_qualified_name: &str, sink: &mut dyn DiagnosticSink) -> i32 {
    let Some(written) = grouping.argument(1, "Order") else {
        return 0;
    };

    match written.as_i64().and_then(|value| i32::try_from(value).ok()) {
        Some(order) => order,
        None => {
            sink.report(Diagnostic::new(
                DiagnosticCode::MalformedOrder,
                Location::type_level(fully_qualified_name),
                format!("order must be a 32-bit integer, found {written}; using 0"),
            ));
            0
        }
    }
}
