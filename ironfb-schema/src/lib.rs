//! # IronFB Schema
//!
//! Resolved schema representation for FlatBuffers-style code generation.
//!
//! This crate provides:
//! - Scalar kinds, field types and namespaces
//! - Enum, union, struct, table and field definitions
//! - The [`SchemaIr`] container with typed declaration ids
//! - Opt-in layout validation

pub mod definitions;
pub mod error;
pub mod ir;
pub mod types;
pub mod validation;

pub use definitions::{Attributes, EnumDef, EnumVal, FieldDef, NestedBuffer, StructDef};
pub use error::SchemaError;
pub use ir::{EnumId, SchemaIr, StructId};
pub use types::{Namespace, ScalarKind, Type};
pub use validation::validate_ir;
