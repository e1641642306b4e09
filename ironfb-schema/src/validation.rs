//! IR validation utilities.
//!
//! Code generation trusts the resolver's layout. These checks are opt-in and
//! catch hand-assembled IR that would otherwise produce bindings disagreeing
//! with the wire format.

use crate::definitions::{EnumDef, NestedBuffer, StructDef};
use crate::error::SchemaError;
use crate::ir::SchemaIr;
use crate::types::Type;

/// Validates a schema IR.
///
/// # Errors
/// Returns `SchemaError` describing the first violated invariant.
pub fn validate_ir(ir: &SchemaIr) -> Result<(), SchemaError> {
    for def in &ir.enums {
        validate_enum(def)?;
    }
    for def in &ir.structs {
        validate_references(ir, def)?;
        if def.fixed {
            validate_fixed_layout(ir, def)?;
        }
    }
    if let Some(root) = ir.root_struct {
        match ir.structs.get(root.0) {
            Some(def) if !def.fixed => {}
            _ => return Err(SchemaError::UnknownRoot { index: root.0 }),
        }
    }
    Ok(())
}

/// Values must be unique and ascending.
fn validate_enum(def: &EnumDef) -> Result<(), SchemaError> {
    for pair in def.values.windows(2) {
        let (prev, next) = (pair[0].value, pair[1].value);
        if next == prev {
            return Err(SchemaError::DuplicateEnumValue {
                name: def.name.clone(),
                value: next,
            });
        }
        if next < prev {
            return Err(SchemaError::EnumOrder {
                name: def.name.clone(),
                value: next,
            });
        }
    }
    Ok(())
}

fn validate_references(ir: &SchemaIr, def: &StructDef) -> Result<(), SchemaError> {
    for field in &def.fields {
        if let Type::Vector(element) = &field.ty {
            match element.as_ref() {
                Type::Union(_) => return Err(SchemaError::vector_of_union(&def.name, &field.name)),
                Type::Vector(_) => return Err(SchemaError::nested_vector(&def.name, &field.name)),
                _ => {}
            }
        }
        check_type_reference(ir, def, &field.name, &field.ty)?;
        if matches!(
            &field.nested_buffer,
            Some(NestedBuffer::Resolved(id)) if id.0 >= ir.structs.len()
        ) {
            return Err(SchemaError::validation(format!(
                "nested buffer of field '{}' in '{}' references an unknown table",
                field.name, def.name
            )));
        }
    }
    Ok(())
}

fn check_type_reference(
    ir: &SchemaIr,
    def: &StructDef,
    field: &str,
    ty: &Type,
) -> Result<(), SchemaError> {
    let dangling = match ty {
        Type::Struct(id) => id.0 >= ir.structs.len(),
        Type::Union(id) => id.0 >= ir.enums.len() || !ir.enums[id.0].is_union,
        Type::Scalar {
            enum_def: Some(id), ..
        } => id.0 >= ir.enums.len(),
        Type::Vector(element) => return check_type_reference(ir, def, field, element),
        _ => false,
    };
    if dangling {
        return Err(SchemaError::validation(format!(
            "field '{field}' of '{}' references an unknown declaration",
            def.name
        )));
    }
    Ok(())
}

/// Fields plus padding must fill the struct exactly.
fn validate_fixed_layout(ir: &SchemaIr, def: &StructDef) -> Result<(), SchemaError> {
    if def.minalign == 0 || def.bytesize % def.minalign != 0 {
        return Err(SchemaError::Alignment {
            name: def.name.clone(),
            bytesize: def.bytesize,
            minalign: def.minalign,
        });
    }

    let mut computed = 0;
    for field in &def.fields {
        match &field.ty {
            Type::Scalar { .. } => {}
            Type::Struct(id) if ir.struct_def(*id).fixed => {}
            _ => {
                return Err(SchemaError::validation(format!(
                    "field '{}' of fixed struct '{}' is not a scalar or fixed struct",
                    field.name, def.name
                )));
            }
        }
        computed += ir.inline_size(&field.ty) + field.padding;
    }

    if computed != def.bytesize {
        return Err(SchemaError::StructLayout {
            name: def.name.clone(),
            declared: def.bytesize,
            computed,
        });
    }
    Ok(())
}
