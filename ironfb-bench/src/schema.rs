//! Synthetic schemas sized for benchmarking.

use ironfb_schema::{EnumDef, FieldDef, Namespace, ScalarKind, SchemaIr, StructDef, Type};

/// Builds a schema with `tables` tables sharing one enum and one fixed struct.
///
/// Every table carries scalars of each width, a string, a scalar vector, a
/// struct field and a vector of the previous table, so all emitter paths are
/// exercised. The last table is the root.
#[must_use]
pub fn synthetic_schema(tables: usize) -> SchemaIr {
    let mut ir = SchemaIr::new();
    let ns = Namespace::parse("Bench.Generated");
    ir.add_source_file("bench.fbs");

    let kind = ir.add_enum(
        EnumDef::new("Kind", ns.clone(), ScalarKind::UInt8)
            .with_value("Small", 0)
            .with_value("Medium", 1)
            .with_value("Large", 2),
    );
    let point = ir.add_struct(
        StructDef::fixed("Point", ns.clone(), 16, 8)
            .with_field(
                FieldDef::new("x", Type::scalar(ScalarKind::Int32)).with_padding(4),
            )
            .with_field(FieldDef::new("y", Type::scalar(ScalarKind::Float64)).with_offset(8)),
    );

    let mut previous = None;
    for index in 0..tables {
        let mut table = StructDef::table(format!("Table{index}"), ns.clone())
            .with_field(FieldDef::new("id", Type::scalar(ScalarKind::UInt64)))
            .with_field(FieldDef::new("count", Type::scalar(ScalarKind::UInt32)).with_default("1"))
            .with_field(FieldDef::new("level", Type::scalar(ScalarKind::Int16)))
            .with_field(FieldDef::new("kind", Type::enumeration(ScalarKind::UInt8, kind)))
            .with_field(FieldDef::new("name", Type::String).required())
            .with_field(FieldDef::new("payload", Type::vector(Type::scalar(ScalarKind::UInt8))))
            .with_field(FieldDef::new("origin", Type::Struct(point)));
        if let Some(child) = previous {
            table = table.with_field(FieldDef::new("children", Type::vector(Type::Struct(child))));
        }
        table.assign_vtable_slots();
        previous = Some(ir.add_struct(table));
    }

    if let Some(root) = previous {
        ir.set_root(root);
        ir.set_file_identifier("BNCH");
    }
    ir
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthetic_schema_is_valid() {
        let ir = synthetic_schema(8);
        assert_eq!(ir.structs.len(), 9);
        assert_eq!(ir.enums.len(), 1);
        assert!(ir.root().is_some());
        ir.validate().expect("Failed to validate synthetic schema");
    }

    #[test]
    fn test_empty_synthetic_schema() {
        let ir = synthetic_schema(0);
        assert_eq!(ir.structs.len(), 1);
        assert!(ir.root().is_none());
    }
}
