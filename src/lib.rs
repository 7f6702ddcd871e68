//! Descriptor Versions
//!
//! Determines the minimum protocol version a consumer must support to
//! correctly interpret a schema or a populated value of that schema.
//! Schema elements (messages, fields, enums, enum values) may embed a
//! version tag in their options blob; walking a type or an instance
//! collects every tag encountered and reduces them to a single floor
//! version: the maximum among all elements touched.
//!
//! ## Pipeline
//!
//! ```text
//! descriptor / instance
//!         │
//!         ▼
//!   walk (schema: everything declared │ instance: only populated fields)
//!         │ per element
//!         ▼
//!   extract_version(options) ──► (full name, Option<Version>)
//!         │
//!         ▼
//!   aggregate: fold to max, or collect ordered annotations
//! ```
//!
//! ## Entry points
//!
//! - [`minimal_version`]: floor version for one populated value; traversal
//!   errors panic (invariant violation).
//! - [`file_annotations`]: every annotation declared by one schema file,
//!   partial list plus error on failure.
//! - [`registry_annotations`]: the same across a whole registry, with
//!   package exclusions and fail-fast scanning.

pub mod annotate;
pub mod descriptor;
pub mod error;
pub mod extract;
pub mod registry;
pub mod value;
pub mod walk;

pub use annotate::{
    file_annotations, fold_max, minimal_version, registry_annotations, VersionAnnotation,
};
pub use descriptor::{
    EnumDescriptor, EnumValueDescriptor, FieldDescriptor, FileDescriptor, MessageDescriptor,
};
pub use error::{Result, VersionError};
pub use extract::{extract_version, TagError};
pub use registry::DescriptorRegistry;
pub use value::{FieldValue, MessageValue};
pub use walk::{walk_enum_number, walk_enum_type, walk_message_type, walk_value};
