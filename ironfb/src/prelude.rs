//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types.
//!
//! ```
//! use ironfb::prelude::*;
//! ```

// Schema types
pub use ironfb_schema::{
    EnumDef, EnumId, FieldDef, Namespace, NestedBuffer, ScalarKind, SchemaError, SchemaIr,
    StructDef, StructId, Type,
};

// Generation
pub use ironfb_codegen::{
    BuildRule, CodegenError, Declaration, DeclarationKind, Generator, GeneratorOptions, Language,
    OutputFile,
};
