//! # IronFB Codegen
//!
//! Java and C# binding generation from resolved FlatBuffers-style schemas.
//!
//! This crate provides:
//! - Declarative per-language syntax profiles
//! - Type mapping with unsigned widening for languages without unsigned integers
//! - Enum, union, struct and table accessor generation
//! - Builder helpers, mutators and presence predicates
//! - C# value-type accessors and vector wrappers
//! - Output assembly, file writing and build rules
//!
//! # Example
//!
//! ```
//! use ironfb_codegen::{CodegenError, GeneratorOptions, Language};
//! use ironfb_schema::{FieldDef, Namespace, ScalarKind, SchemaIr, StructDef, Type};
//!
//! fn main() -> Result<(), CodegenError> {
//!     let mut ir = SchemaIr::new();
//!     let mut stat = StructDef::table("Stat", Namespace::parse("MyGame"))
//!         .with_field(FieldDef::new("count", Type::scalar(ScalarKind::UInt16)));
//!     stat.assign_vtable_slots();
//!     ir.add_struct(stat);
//!
//!     let options = GeneratorOptions::new().language(Language::CSharp);
//!     let files = ironfb_codegen::generate(&ir, &options)?;
//!     assert!(files[0].contents.contains("public ushort Count"));
//!     Ok(())
//! }
//! ```

pub mod emit;
pub mod error;
pub mod generator;
pub mod naming;
pub mod options;
pub mod output;
pub mod profile;

pub use error::CodegenError;
pub use generator::{Declaration, DeclarationKind, Generator};
pub use options::{GeneratorOptions, Language};
pub use output::{BuildRule, OutputFile};
pub use profile::LanguageProfile;

use ironfb_schema::SchemaIr;
use std::path::PathBuf;

/// Generates the output files for a schema without writing them.
///
/// # Arguments
/// * `ir` - Resolved schema
/// * `options` - Generation options
///
/// # Errors
/// Returns `CodegenError` if verification or generation fails.
pub fn generate(ir: &SchemaIr, options: &GeneratorOptions) -> Result<Vec<OutputFile>, CodegenError> {
    Generator::new(ir, options).generate_files()
}

/// Generates the output files for a schema and writes them below
/// `options.output_dir`.
///
/// # Returns
/// Paths of the written files.
///
/// # Errors
/// Returns `CodegenError` if generation or writing fails.
pub fn generate_to_dir(
    ir: &SchemaIr,
    options: &GeneratorOptions,
) -> Result<Vec<PathBuf>, CodegenError> {
    Generator::new(ir, options).write()
}
