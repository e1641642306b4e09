//! Main code generator.

use crate::emit::{EnumEmitter, StructEmitter, TypeMapper, ValueTypeEmitter};
use crate::error::CodegenError;
use crate::options::GeneratorOptions;
use crate::output::{
    BuildRule, OutputFile, assemble_class, declaration_path, one_file_path, write_output_files,
};
use ironfb_schema::{EnumId, Namespace, SchemaIr, StructId};
use std::path::PathBuf;

/// Kind of a rendered declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    /// Enum or union.
    Enum,
    /// Struct or table accessor class.
    Class,
    /// `<Name>Struct` value type.
    ValueType,
    /// `<Name>Vector` wrapper of an enum.
    EnumVector,
    /// `<Name>Vector` wrapper of a struct or table.
    StructVector,
}

/// One rendered declaration, before file assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// What was rendered.
    pub kind: DeclarationKind,
    /// Namespace the declaration belongs to.
    pub namespace: Namespace,
    /// Name of the generated type, used as its file name.
    pub name: String,
    /// Rendered code, empty for declarations generated elsewhere.
    pub code: String,
    /// The file needs the runtime imports.
    pub needs_includes: bool,
}

#[derive(Debug, Clone, Copy)]
enum Unit {
    Enum(EnumId),
    Class(StructId),
    ValueType(StructId),
    EnumVector(EnumId),
    StructVector(StructId),
}

/// Code generator for a resolved schema.
pub struct Generator<'a> {
    ir: &'a SchemaIr,
    options: &'a GeneratorOptions,
}

impl<'a> Generator<'a> {
    /// Creates a new generator for the given IR.
    #[must_use]
    pub fn new(ir: &'a SchemaIr, options: &'a GeneratorOptions) -> Self {
        Self { ir, options }
    }

    /// Renders every declaration: enums, then structs and tables, then
    /// value types and vector wrappers when enabled.
    ///
    /// Declarations marked as generated elsewhere are omitted.
    ///
    /// # Errors
    /// Returns `CodegenError::Schema` if layout verification is enabled and
    /// fails, or `CodegenError::Unrepresentable` for fields with no rendering.
    pub fn generate(&self) -> Result<Vec<Declaration>, CodegenError> {
        if self.options.verify_layout {
            self.ir.validate()?;
        }

        let units = self.units();
        tracing::debug!(
            "Generating {} declarations for {}",
            units.len(),
            self.options.language
        );

        #[cfg(feature = "parallel")]
        let rendered: Result<Vec<Declaration>, CodegenError> = {
            use rayon::prelude::*;
            units.par_iter().map(|unit| self.render(*unit)).collect()
        };
        #[cfg(not(feature = "parallel"))]
        let rendered: Result<Vec<Declaration>, CodegenError> =
            units.iter().map(|unit| self.render(*unit)).collect();

        Ok(rendered?
            .into_iter()
            .filter(|declaration| !declaration.code.is_empty())
            .collect())
    }

    /// Renders every declaration and assembles the output files.
    ///
    /// # Errors
    /// Returns any error of [`Generator::generate`], or
    /// `CodegenError::Generation` in one-file mode without a file name.
    pub fn generate_files(&self) -> Result<Vec<OutputFile>, CodegenError> {
        let profile = self.options.profile();
        let declarations = self.generate()?;

        if self.options.one_file {
            let path = self.one_file_path()?;
            let code: String = declarations.iter().map(|d| d.code.as_str()).collect();
            if code.is_empty() {
                return Ok(Vec::new());
            }
            let contents = assemble_class(profile, self.ir.current_namespace(), &code, true);
            return Ok(vec![OutputFile { path, contents }]);
        }

        Ok(declarations
            .iter()
            .map(|declaration| OutputFile {
                path: declaration_path(
                    profile,
                    &self.options.output_dir,
                    &declaration.namespace,
                    &declaration.name,
                ),
                contents: assemble_class(
                    profile,
                    &declaration.namespace,
                    &declaration.code,
                    declaration.needs_includes,
                ),
            })
            .collect())
    }

    /// Generates and writes every output file, returning the written paths.
    ///
    /// # Errors
    /// Returns any generation error, or `CodegenError::Io` if writing fails.
    /// Files written before a failure are left in place.
    pub fn write(&self) -> Result<Vec<PathBuf>, CodegenError> {
        let files = self.generate_files()?;
        write_output_files(&files)?;
        tracing::info!(
            "Generated {} {} files in {}",
            files.len(),
            self.options.language,
            self.options.output_dir.display()
        );
        Ok(files.into_iter().map(|file| file.path).collect())
    }

    /// Lists the files a run would produce and the schemas they depend on.
    ///
    /// Computed from declaration names alone; nothing is rendered or written.
    ///
    /// # Errors
    /// Returns `CodegenError::Generation` in one-file mode without a file name.
    pub fn build_rule(&self) -> Result<BuildRule, CodegenError> {
        let path = self.options.one_file.then(|| self.one_file_path()).transpose()?;
        let mut targets = self
            .units()
            .into_iter()
            .filter_map(|unit| self.unit_target(unit))
            .peekable();
        let outputs = match path {
            Some(path) if targets.peek().is_some() => vec![path],
            Some(_) => Vec::new(),
            None => {
                let profile = self.options.profile();
                targets
                    .map(|(namespace, name)| {
                        declaration_path(profile, &self.options.output_dir, namespace, &name)
                    })
                    .collect()
            }
        };
        Ok(BuildRule {
            outputs,
            inputs: self.ir.source_files.clone(),
        })
    }

    fn one_file_path(&self) -> Result<PathBuf, CodegenError> {
        if self.options.file_name.is_empty() {
            return Err(CodegenError::generation(
                "one-file output requires a file name",
            ));
        }
        Ok(one_file_path(
            self.options.profile(),
            &self.options.output_dir,
            &self.options.file_name,
        ))
    }

    /// Declarations in emission order.
    fn units(&self) -> Vec<Unit> {
        let mut units: Vec<Unit> = self.ir.enums_with_ids().map(|(id, _)| Unit::Enum(id)).collect();
        units.extend(self.ir.structs_with_ids().map(|(id, _)| Unit::Class(id)));
        if self.options.emits_value_types() {
            units.extend(self.ir.structs_with_ids().map(|(id, _)| Unit::ValueType(id)));
            units.extend(self.ir.enums_with_ids().map(|(id, _)| Unit::EnumVector(id)));
            units.extend(self.ir.structs_with_ids().map(|(id, _)| Unit::StructVector(id)));
        }
        units
    }

    /// Namespace and file name of a unit, `None` if it is generated elsewhere.
    fn unit_target(&self, unit: Unit) -> Option<(&'a Namespace, String)> {
        let ir = self.ir;
        let (generated, namespace, name) = match unit {
            Unit::Enum(id) => {
                let def = ir.enum_def(id);
                (def.generated, &def.namespace, def.name.clone())
            }
            Unit::Class(id) => {
                let def = ir.struct_def(id);
                (def.generated, &def.namespace, def.name.clone())
            }
            Unit::ValueType(id) => {
                let def = ir.struct_def(id);
                (def.generated, &def.namespace, format!("{}Struct", def.name))
            }
            Unit::EnumVector(id) => {
                let def = ir.enum_def(id);
                (def.generated, &def.namespace, format!("{}Vector", def.name))
            }
            Unit::StructVector(id) => {
                let def = ir.struct_def(id);
                (def.generated, &def.namespace, format!("{}Vector", def.name))
            }
        };
        (!generated).then_some((namespace, name))
    }

    /// Namespace references are emitted relative to.
    fn emission_namespace(&self, own: &'a Namespace) -> &'a Namespace {
        if self.options.one_file {
            self.ir.current_namespace()
        } else {
            own
        }
    }

    fn render(&self, unit: Unit) -> Result<Declaration, CodegenError> {
        let ir = self.ir;
        let profile = self.options.profile();
        let (kind, namespace, name, code) = match unit {
            Unit::Enum(id) => {
                let def = ir.enum_def(id);
                let mapper = TypeMapper::new(ir, profile, self.emission_namespace(&def.namespace));
                let code = EnumEmitter::new(mapper).emit(def);
                (DeclarationKind::Enum, &def.namespace, def.name.clone(), code)
            }
            Unit::Class(id) => {
                let def = ir.struct_def(id);
                let mapper = TypeMapper::new(ir, profile, self.emission_namespace(&def.namespace));
                let code = StructEmitter::new(mapper, self.options.mutable_buffer).emit(id)?;
                (DeclarationKind::Class, &def.namespace, def.name.clone(), code)
            }
            Unit::ValueType(id) => {
                let def = ir.struct_def(id);
                let mapper = TypeMapper::new(ir, profile, self.emission_namespace(&def.namespace));
                let code = ValueTypeEmitter::new(mapper).emit_struct(id)?;
                let name = format!("{}Struct", def.name);
                (DeclarationKind::ValueType, &def.namespace, name, code)
            }
            Unit::EnumVector(id) => {
                let def = ir.enum_def(id);
                let mapper = TypeMapper::new(ir, profile, self.emission_namespace(&def.namespace));
                let code = ValueTypeEmitter::new(mapper).emit_enum_vector(id);
                let name = format!("{}Vector", def.name);
                (DeclarationKind::EnumVector, &def.namespace, name, code)
            }
            Unit::StructVector(id) => {
                let def = ir.struct_def(id);
                let mapper = TypeMapper::new(ir, profile, self.emission_namespace(&def.namespace));
                let code = ValueTypeEmitter::new(mapper).emit_struct_vector(id);
                let name = format!("{}Vector", def.name);
                (DeclarationKind::StructVector, &def.namespace, name, code)
            }
        };

        if code.is_empty() {
            tracing::trace!("Skipping {:?} {}: generated elsewhere", kind, name);
        } else {
            tracing::debug!("Emitted {:?} {}", kind, name);
        }

        Ok(Declaration {
            kind,
            namespace: namespace.clone(),
            name,
            code,
            needs_includes: kind != DeclarationKind::Enum,
        })
    }
}
