//! Schema and instance traversal
//!
//! Two walkers share one element-visiting step: the declaration-driven
//! schema walker visits everything a type declares, while the data-driven
//! instance walker visits only what a concrete value actually populates.
//! Both invoke the visitor once per visited element with the element's
//! fully-qualified name and its extracted version tag, if any.
//!
//! The visitor's return value is the traversal's control flow: `Ok(())`
//! continues, `Err` stops the walk immediately and propagates, with no
//! remaining siblings visited. "No version tag" and "traversal aborted" are
//! therefore impossible to confuse.

use semver::Version;

use crate::descriptor::{EnumDescriptor, MessageDescriptor};
use crate::error::{Result, VersionError};
use crate::extract::extract_version;
use crate::value::{FieldValue, MessageValue};

/// Run the extractor on one element's options and hand the annotation to the
/// visitor. Tag errors get the element's name attached here.
fn visit_element<F>(full_name: &str, options: &str, visit: &mut F) -> Result<()>
where
    F: FnMut(&str, Option<Version>) -> Result<()>,
{
    let version =
        extract_version(options).map_err(|source| VersionError::tag(full_name, source))?;
    visit(full_name, version)
}

/// Walk a message type declaration.
///
/// Visits the message element itself, then every declared field in
/// declaration order regardless of whether any instance sets it, then every
/// nested enum type with all of its declared values, then recurses into
/// nested message types in declaration order.
pub fn walk_message_type<F>(message: &MessageDescriptor, visit: &mut F) -> Result<()>
where
    F: FnMut(&str, Option<Version>) -> Result<()>,
{
    visit_element(&message.full_name, &message.options, visit)?;
    for field in &message.fields {
        visit_element(&field.full_name, &field.options, visit)?;
    }
    for enum_type in &message.enums {
        walk_enum_type(enum_type, visit)?;
    }
    for nested in &message.messages {
        walk_message_type(nested, visit)?;
    }
    Ok(())
}

/// Walk an enum type declaration: the enum element itself, then every
/// declared value in declaration order.
pub fn walk_enum_type<F>(enum_type: &EnumDescriptor, visit: &mut F) -> Result<()>
where
    F: FnMut(&str, Option<Version>) -> Result<()>,
{
    visit_element(&enum_type.full_name, &enum_type.options, visit)?;
    for value in &enum_type.values {
        visit_element(&value.full_name, &value.options, visit)?;
    }
    Ok(())
}

/// Walk a populated message instance.
///
/// Visits the element for the value's message type, then only the fields
/// actually populated on the value, in declaration order. For each populated
/// field the field's own element is visited first; a nested message value is
/// then recursed into, and an enum number is resolved to the specific
/// declared value it names (see [`walk_enum_number`]). Anything else is a
/// scalar and contributes nothing beyond its field element.
pub fn walk_value<F>(value: &MessageValue, visit: &mut F) -> Result<()>
where
    F: FnMut(&str, Option<Version>) -> Result<()>,
{
    let message = value.descriptor();
    visit_element(&message.full_name, &message.options, visit)?;
    for (field, field_value) in value.populated() {
        visit_element(&field.full_name, &field.options, visit)?;
        match field_value {
            FieldValue::Message(nested) => walk_value(nested, visit)?,
            FieldValue::Enum(number) => {
                let enum_type =
                    field
                        .enum_type
                        .as_ref()
                        .ok_or_else(|| VersionError::MissingEnumType {
                            element: field.full_name.clone(),
                        })?;
                walk_enum_number(enum_type, *number, visit)?;
            }
            FieldValue::Scalar(_) => {}
        }
    }
    Ok(())
}

/// Resolve a runtime enum number and visit the enum type plus the one
/// declared value it names.
///
/// The number is treated as a zero-based positional index into the declared
/// values, which assumes the enum's numbering is contiguous from zero in
/// declaration order. A number outside the declared range is a fatal
/// traversal error, never "value absent". Enums with sparse or reordered
/// numbering violate the assumption; callers must guarantee it holds.
pub fn walk_enum_number<F>(enum_type: &EnumDescriptor, number: i32, visit: &mut F) -> Result<()>
where
    F: FnMut(&str, Option<Version>) -> Result<()>,
{
    visit_element(&enum_type.full_name, &enum_type.options, visit)?;
    let index = usize::try_from(number)
        .ok()
        .filter(|i| *i < enum_type.values.len())
        .ok_or_else(|| VersionError::UnresolvedEnumNumber {
            element: enum_type.full_name.clone(),
            number,
        })?;
    let value = &enum_type.values[index];
    visit_element(&value.full_name, &value.options, visit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{EnumValueDescriptor, FieldDescriptor};
    use serde_json::json;

    fn color_enum() -> EnumDescriptor {
        EnumDescriptor::new("acme.paint.Color")
            .with_value(EnumValueDescriptor::new("acme.paint.Color.RED"))
            .with_value(
                EnumValueDescriptor::new("acme.paint.Color.GREEN")
                    .with_options(r#"[version_enum_value]: "1.3""#),
            )
            .with_value(EnumValueDescriptor::new("acme.paint.Color.BLUE"))
    }

    fn collect(result: &mut Vec<(String, Option<Version>)>) -> impl FnMut(&str, Option<Version>) -> Result<()> + '_ {
        |name, ver| {
            result.push((name.to_string(), ver));
            Ok(())
        }
    }

    #[test]
    fn test_schema_walk_order() {
        let md = MessageDescriptor::new("acme.paint.Bucket")
            .with_field(FieldDescriptor::new("acme.paint.Bucket.liters"))
            .with_field(FieldDescriptor::new("acme.paint.Bucket.color"))
            .with_enum(color_enum())
            .with_nested(
                MessageDescriptor::new("acme.paint.Bucket.Lid")
                    .with_field(FieldDescriptor::new("acme.paint.Bucket.Lid.diameter")),
            );

        let mut visited = Vec::new();
        walk_message_type(&md, &mut collect(&mut visited)).unwrap();

        let names: Vec<_> = visited.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "acme.paint.Bucket",
                "acme.paint.Bucket.liters",
                "acme.paint.Bucket.color",
                "acme.paint.Color",
                "acme.paint.Color.RED",
                "acme.paint.Color.GREEN",
                "acme.paint.Color.BLUE",
                "acme.paint.Bucket.Lid",
                "acme.paint.Bucket.Lid.diameter",
            ]
        );
    }

    #[test]
    fn test_visitor_error_stops_the_walk() {
        let md = MessageDescriptor::new("acme.M")
            .with_field(FieldDescriptor::new("acme.M.a"))
            .with_field(FieldDescriptor::new("acme.M.b"));

        let mut seen = 0usize;
        let err = walk_message_type(&md, &mut |name, _| {
            seen += 1;
            if name == "acme.M.a" {
                Err(VersionError::UnknownField {
                    message: "acme.M".into(),
                    field: "a".into(),
                })
            } else {
                Ok(())
            }
        })
        .unwrap_err();

        assert!(matches!(err, VersionError::UnknownField { .. }));
        // Message element plus first field; second field never visited.
        assert_eq!(seen, 2);
    }

    #[test]
    fn test_instance_walk_skips_unset_fields() {
        let md = MessageDescriptor::new("acme.M")
            .with_field(FieldDescriptor::new("acme.M.a").with_options(r#"[version_field]: "9.9""#))
            .with_field(FieldDescriptor::new("acme.M.b"));
        let mut value = MessageValue::new(md);
        value.set("b", FieldValue::Scalar(json!(true))).unwrap();

        let mut visited = Vec::new();
        walk_value(&value, &mut collect(&mut visited)).unwrap();
        let names: Vec<_> = visited.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["acme.M", "acme.M.b"]);
    }

    #[test]
    fn test_enum_number_resolves_positionally() {
        let mut visited = Vec::new();
        walk_enum_number(&color_enum(), 1, &mut collect(&mut visited)).unwrap();
        assert_eq!(visited.len(), 2);
        assert_eq!(visited[1].0, "acme.paint.Color.GREEN");
        assert_eq!(visited[1].1, Some(Version::new(1, 3, 0)));
    }

    #[test]
    fn test_enum_number_out_of_range_is_fatal() {
        let err = walk_enum_number(&color_enum(), 5, &mut |_, _| Ok(())).unwrap_err();
        assert!(matches!(
            err,
            VersionError::UnresolvedEnumNumber { number: 5, .. }
        ));
        let err = walk_enum_number(&color_enum(), -1, &mut |_, _| Ok(())).unwrap_err();
        assert!(matches!(
            err,
            VersionError::UnresolvedEnumNumber { number: -1, .. }
        ));
    }

    #[test]
    fn test_malformed_tag_names_the_element() {
        let md = MessageDescriptor::new("acme.Bad").with_options(r#"[version_msg]: oops"#);
        let err = walk_message_type(&md, &mut |_, _| Ok(())).unwrap_err();
        match err {
            VersionError::Tag { element, .. } => assert_eq!(element, "acme.Bad"),
            other => panic!("expected Tag error, got {other:?}"),
        }
    }
}
