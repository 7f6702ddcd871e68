//! Schema descriptors
//!
//! Owned, read-only views of a schema's declared structure: files containing
//! messages and enums, messages containing fields, nested enums and nested
//! messages. Every element is identified by a fully-qualified, dot-separated
//! name and carries its options as an opaque string blob that may embed a
//! version tag (see [`crate::extract`]).
//!
//! Descriptors are plain data and serialize to JSON, which is also the
//! on-disk format consumed by [`crate::registry::DescriptorRegistry`].

use serde::{Deserialize, Serialize};

/// One schema file: a package name plus its top-level declarations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileDescriptor {
    /// File name, e.g. "acme/storage.json"
    pub name: String,
    /// Package the file's declarations belong to, e.g. "acme.storage"
    pub package: String,
    /// Top-level message types in declaration order
    #[serde(default)]
    pub messages: Vec<MessageDescriptor>,
    /// Top-level enum types in declaration order
    #[serde(default)]
    pub enums: Vec<EnumDescriptor>,
}

impl FileDescriptor {
    pub fn new(name: impl Into<String>, package: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            package: package.into(),
            messages: Vec::new(),
            enums: Vec::new(),
        }
    }

    pub fn with_message(mut self, message: MessageDescriptor) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_enum(mut self, enum_type: EnumDescriptor) -> Self {
        self.enums.push(enum_type);
        self
    }
}

/// A message type declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageDescriptor {
    /// Fully-qualified name, e.g. "acme.storage.PutRequest"
    pub full_name: String,
    /// String-rendered options blob; empty when the element has no options
    #[serde(default)]
    pub options: String,
    /// Declared fields in declaration order
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
    /// Enum types nested inside this message
    #[serde(default)]
    pub enums: Vec<EnumDescriptor>,
    /// Message types nested inside this message
    #[serde(default)]
    pub messages: Vec<MessageDescriptor>,
}

impl MessageDescriptor {
    pub fn new(full_name: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            options: String::new(),
            fields: Vec::new(),
            enums: Vec::new(),
            messages: Vec::new(),
        }
    }

    pub fn with_options(mut self, options: impl Into<String>) -> Self {
        self.options = options.into();
        self
    }

    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_enum(mut self, enum_type: EnumDescriptor) -> Self {
        self.enums.push(enum_type);
        self
    }

    pub fn with_nested(mut self, message: MessageDescriptor) -> Self {
        self.messages.push(message);
        self
    }

    /// Declaration index of a field, looked up by its short name.
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name() == name)
    }
}

/// A field declaration inside a message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Fully-qualified name, e.g. "acme.storage.PutRequest.key"
    pub full_name: String,
    #[serde(default)]
    pub options: String,
    /// For enum-typed fields, the enum type this field resolves through.
    /// Carried inline so instance walks need no registry lookups.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enum_type: Option<EnumDescriptor>,
}

impl FieldDescriptor {
    pub fn new(full_name: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            options: String::new(),
            enum_type: None,
        }
    }

    pub fn with_options(mut self, options: impl Into<String>) -> Self {
        self.options = options.into();
        self
    }

    pub fn with_enum_type(mut self, enum_type: EnumDescriptor) -> Self {
        self.enum_type = Some(enum_type);
        self
    }

    /// Short name: the last segment of the fully-qualified name.
    pub fn name(&self) -> &str {
        self.full_name.rsplit('.').next().unwrap_or(&self.full_name)
    }
}

/// An enum type declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnumDescriptor {
    /// Fully-qualified name, e.g. "acme.storage.Compression"
    pub full_name: String,
    #[serde(default)]
    pub options: String,
    /// Declared values in declaration order; numbering is assumed to be
    /// contiguous from zero in this order (see [`crate::walk`]).
    #[serde(default)]
    pub values: Vec<EnumValueDescriptor>,
}

impl EnumDescriptor {
    pub fn new(full_name: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            options: String::new(),
            values: Vec::new(),
        }
    }

    pub fn with_options(mut self, options: impl Into<String>) -> Self {
        self.options = options.into();
        self
    }

    pub fn with_value(mut self, value: EnumValueDescriptor) -> Self {
        self.values.push(value);
        self
    }
}

/// A single declared enum value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnumValueDescriptor {
    /// Fully-qualified name, e.g. "acme.storage.Compression.GZIP"
    pub full_name: String,
    #[serde(default)]
    pub options: String,
}

impl EnumValueDescriptor {
    pub fn new(full_name: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            options: String::new(),
        }
    }

    pub fn with_options(mut self, options: impl Into<String>) -> Self {
        self.options = options.into();
        self
    }
}
