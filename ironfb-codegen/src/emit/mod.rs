//! Declaration emitters.
//!
//! All emitters read the IR through a [`TypeMapper`] bound to one language
//! profile and one emission namespace, and render declarations to strings.

pub mod enums;
pub mod structs;
pub mod types;
pub mod value_types;

pub use enums::EnumEmitter;
pub use structs::{DeclarationFragments, StructEmitter};
pub use types::TypeMapper;
pub use value_types::ValueTypeEmitter;

use ironfb_schema::{Namespace, NestedBuffer, SchemaIr, StructId};

/// Resolves the declaration a nested-buffer field is rooted at.
///
/// A symbolic name is looked up as written, then qualified by `namespace`
/// and each enclosing namespace, innermost first. The first match wins.
#[must_use]
pub fn resolve_nested_buffer(
    ir: &SchemaIr,
    namespace: &Namespace,
    nested: &NestedBuffer,
) -> Option<StructId> {
    match nested {
        NestedBuffer::Resolved(id) => Some(*id),
        NestedBuffer::Named(name) => ir.lookup_struct(name).or_else(|| {
            namespace
                .enclosing()
                .find_map(|ns| ir.lookup_struct(&ns.qualify(name)))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ironfb_schema::StructDef;

    #[test]
    fn test_resolve_nested_buffer() {
        let mut ir = SchemaIr::new();
        let outer = ir.add_struct(StructDef::table("Stat", Namespace::parse("Game")));
        let inner = ir.add_struct(StructDef::table("Stat", Namespace::parse("Game.Example")));
        let ns = Namespace::parse("Game.Example");

        let named = |name: &str| NestedBuffer::Named(name.to_string());
        assert_eq!(resolve_nested_buffer(&ir, &ns, &named("Stat")), Some(inner));
        assert_eq!(resolve_nested_buffer(&ir, &ns, &named("Game.Stat")), Some(outer));
        assert_eq!(
            resolve_nested_buffer(&ir, &Namespace::parse("Game"), &named("Stat")),
            Some(outer)
        );
        assert_eq!(resolve_nested_buffer(&ir, &ns, &named("Missing")), None);
        assert_eq!(
            resolve_nested_buffer(&ir, &ns, &NestedBuffer::Resolved(outer)),
            Some(outer)
        );
    }
}
