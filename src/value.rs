//! Populated message instances
//!
//! A [`MessageValue`] pairs a message descriptor with the set of fields that
//! are actually populated on this instance. Only explicitly set fields count
//! as populated: a field whose wire value would be a language-level default
//! is represented by simply not setting it.

use std::collections::BTreeMap;

use crate::descriptor::{FieldDescriptor, MessageDescriptor};
use crate::error::{Result, VersionError};

/// The value held by one populated field.
#[derive(Debug, Clone)]
pub enum FieldValue {
    /// Any non-message, non-enum payload. The walkers never look inside it;
    /// its presence is what matters.
    Scalar(serde_json::Value),
    /// A runtime enum number, resolved against the field's enum descriptor
    /// during an instance walk.
    Enum(i32),
    /// A nested message instance.
    Message(MessageValue),
}

/// A populated instance of one message type.
#[derive(Debug, Clone)]
pub struct MessageValue {
    descriptor: MessageDescriptor,
    // Keyed by declaration index so populated-field iteration is always
    // declaration order, not insertion order.
    fields: BTreeMap<usize, FieldValue>,
}

impl MessageValue {
    pub fn new(descriptor: MessageDescriptor) -> Self {
        Self {
            descriptor,
            fields: BTreeMap::new(),
        }
    }

    pub fn descriptor(&self) -> &MessageDescriptor {
        &self.descriptor
    }

    /// Populate a field, addressed by its short name.
    pub fn set(&mut self, field: &str, value: FieldValue) -> Result<()> {
        let index = self.field_index(field)?;
        self.fields.insert(index, value);
        Ok(())
    }

    /// Clear a field back to unset.
    pub fn clear(&mut self, field: &str) -> Result<()> {
        let index = self.field_index(field)?;
        self.fields.remove(&index);
        Ok(())
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        let index = self.descriptor.field_index(field)?;
        self.fields.get(&index)
    }

    pub fn is_set(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// Populated fields in declaration order, paired with their descriptors.
    pub fn populated(&self) -> impl Iterator<Item = (&FieldDescriptor, &FieldValue)> {
        self.fields
            .iter()
            .map(|(index, value)| (&self.descriptor.fields[*index], value))
    }

    fn field_index(&self, field: &str) -> Result<usize> {
        self.descriptor
            .field_index(field)
            .ok_or_else(|| VersionError::UnknownField {
                message: self.descriptor.full_name.clone(),
                field: field.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pair_descriptor() -> MessageDescriptor {
        MessageDescriptor::new("acme.kv.Pair")
            .with_field(FieldDescriptor::new("acme.kv.Pair.key"))
            .with_field(FieldDescriptor::new("acme.kv.Pair.value"))
    }

    #[test]
    fn test_set_and_clear() {
        let mut v = MessageValue::new(pair_descriptor());
        v.set("key", FieldValue::Scalar(json!("a"))).unwrap();
        assert!(v.is_set("key"));
        assert!(!v.is_set("value"));
        v.clear("key").unwrap();
        assert!(!v.is_set("key"));
    }

    #[test]
    fn test_unknown_field_is_an_error() {
        let mut v = MessageValue::new(pair_descriptor());
        let err = v.set("nope", FieldValue::Scalar(json!(1))).unwrap_err();
        assert!(matches!(err, VersionError::UnknownField { .. }));
    }

    #[test]
    fn test_populated_iterates_in_declaration_order() {
        let mut v = MessageValue::new(pair_descriptor());
        // Set out of declaration order on purpose.
        v.set("value", FieldValue::Scalar(json!(2))).unwrap();
        v.set("key", FieldValue::Scalar(json!(1))).unwrap();
        let names: Vec<_> = v.populated().map(|(fd, _)| fd.name()).collect();
        assert_eq!(names, vec!["key", "value"]);
    }
}
