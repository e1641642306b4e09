//! # IronFB
//!
//! FlatBuffers-style Java and C# binding generation.
//!
//! IronFB turns a resolved schema (enums, unions, fixed structs and tables
//! with their wire layout already computed) into host-language source files
//! that read and build buffers in that layout.
//!
//! ## Features
//!
//! - **Profile-driven output** - Java and C# share one emitter, parameterized by syntax tables
//! - **Unsigned widening** - Java accessors widen unsigned values and mask the sign extension
//! - **Builders** - Single-call constructors, start/add/end sequences and vector builders
//! - **C# value types** - Allocation-free `<Name>Struct` accessors and typed vector wrappers
//!
//! ## Quick Start
//!
//! ```
//! use ironfb::prelude::*;
//!
//! fn main() -> Result<(), CodegenError> {
//!     let mut ir = SchemaIr::new();
//!     let mut stat = StructDef::table("Stat", Namespace::parse("MyGame"))
//!         .with_field(FieldDef::new("id", Type::String))
//!         .with_field(FieldDef::new("count", Type::scalar(ScalarKind::UInt16)));
//!     stat.assign_vtable_slots();
//!     ir.add_struct(stat);
//!
//!     let options = GeneratorOptions::new().language(Language::Java);
//!     let files = ironfb::codegen::generate(&ir, &options)?;
//!     assert!(files[0].contents.contains("public int count()"));
//!     Ok(())
//! }
//! ```
//!
//! ## Crate Organization
//!
//! - [`schema`] - Resolved schema types and layout validation
//! - [`codegen`] - Language profiles, emitters and output assembly

pub mod prelude;

/// Resolved schema types and layout validation.
pub mod schema {
    pub use ironfb_schema::*;
}

/// Binding generation from resolved schemas.
pub mod codegen {
    pub use ironfb_codegen::*;
}

// Re-export commonly used items at the crate root
pub use ironfb_codegen::{CodegenError, Generator, GeneratorOptions, Language, OutputFile};
pub use ironfb_schema::{SchemaError, SchemaIr};
