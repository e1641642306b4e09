//! Intermediate representation consumed by code generation.
//!
//! [`SchemaIr`] owns every enum and struct declaration of a resolved schema.
//! Declarations reference each other through the typed indices [`StructId`]
//! and [`EnumId`], which stay valid for the lifetime of the IR.

use crate::definitions::{EnumDef, StructDef};
use crate::error::SchemaError;
use crate::types::{Namespace, Type};
use crate::validation::validate_ir;
use std::collections::HashMap;

static ROOT_NAMESPACE: Namespace = Namespace {
    components: Vec::new(),
};

/// Index of a struct or table inside a [`SchemaIr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StructId(pub usize);

/// Index of an enum or union inside a [`SchemaIr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnumId(pub usize);

/// Fully resolved schema.
#[derive(Debug, Clone, Default)]
pub struct SchemaIr {
    /// Enums and unions in declaration order.
    pub enums: Vec<EnumDef>,
    /// Structs and tables in declaration order.
    pub structs: Vec<StructDef>,
    /// Namespaces in the order they were declared.
    pub namespaces: Vec<Namespace>,
    /// Pinned root table.
    pub root_struct: Option<StructId>,
    /// Magic identifier written after the root offset.
    pub file_identifier: Option<String>,
    /// Schema files the IR was built from.
    pub source_files: Vec<String>,
    /// Qualified struct names.
    struct_map: HashMap<String, StructId>,
}

impl SchemaIr {
    /// Creates an empty IR.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a namespace declaration unless it is already the current one.
    pub fn declare_namespace(&mut self, namespace: Namespace) {
        if self.namespaces.last() != Some(&namespace) {
            self.namespaces.push(namespace);
        }
    }

    /// Adds an enum or union, declaring its namespace.
    pub fn add_enum(&mut self, def: EnumDef) -> EnumId {
        self.declare_namespace(def.namespace.clone());
        self.enums.push(def);
        EnumId(self.enums.len() - 1)
    }

    /// Adds a struct or table, declaring its namespace.
    pub fn add_struct(&mut self, def: StructDef) -> StructId {
        self.declare_namespace(def.namespace.clone());
        let id = StructId(self.structs.len());
        self.struct_map.insert(def.namespace.qualify(&def.name), id);
        self.structs.push(def);
        id
    }

    /// Pins the root table.
    pub fn set_root(&mut self, id: StructId) {
        self.root_struct = Some(id);
    }

    /// Sets the file identifier.
    pub fn set_file_identifier(&mut self, identifier: impl Into<String>) {
        self.file_identifier = Some(identifier.into());
    }

    /// Records a source schema file.
    pub fn add_source_file(&mut self, path: impl Into<String>) {
        self.source_files.push(path.into());
    }

    /// Returns the struct with the given id.
    ///
    /// # Panics
    /// Panics if `id` was not issued by this IR.
    #[must_use]
    pub fn struct_def(&self, id: StructId) -> &StructDef {
        &self.structs[id.0]
    }

    /// Returns the struct with the given id, mutably.
    ///
    /// # Panics
    /// Panics if `id` was not issued by this IR.
    pub fn struct_def_mut(&mut self, id: StructId) -> &mut StructDef {
        &mut self.structs[id.0]
    }

    /// Returns the enum with the given id.
    ///
    /// # Panics
    /// Panics if `id` was not issued by this IR.
    #[must_use]
    pub fn enum_def(&self, id: EnumId) -> &EnumDef {
        &self.enums[id.0]
    }

    /// Returns the enum with the given id, mutably.
    ///
    /// # Panics
    /// Panics if `id` was not issued by this IR.
    pub fn enum_def_mut(&mut self, id: EnumId) -> &mut EnumDef {
        &mut self.enums[id.0]
    }

    /// Finds a struct by its dotted qualified name.
    #[must_use]
    pub fn lookup_struct(&self, qualified_name: &str) -> Option<StructId> {
        self.struct_map.get(qualified_name).copied()
    }

    /// Returns the last declared namespace, or the root namespace.
    #[must_use]
    pub fn current_namespace(&self) -> &Namespace {
        self.namespaces.last().unwrap_or(&ROOT_NAMESPACE)
    }

    /// Returns the pinned root table.
    #[must_use]
    pub fn root(&self) -> Option<&StructDef> {
        self.root_struct.and_then(|id| self.structs.get(id.0))
    }

    /// Returns true if `id` is the pinned root.
    #[must_use]
    pub fn is_root(&self, id: StructId) -> bool {
        self.root_struct == Some(id)
    }

    /// Returns true if the type is an inline fixed struct.
    #[must_use]
    pub fn is_fixed_struct(&self, ty: &Type) -> bool {
        ty.struct_id().is_some_and(|id| self.struct_def(id).fixed)
    }

    /// Bytes a value of this type occupies inline in its parent.
    #[must_use]
    pub fn inline_size(&self, ty: &Type) -> usize {
        match ty {
            Type::Struct(id) if self.struct_def(*id).fixed => self.struct_def(*id).bytesize,
            Type::Scalar { kind, .. } => kind.size(),
            _ => 4,
        }
    }

    /// Alignment of this type when stored inline.
    #[must_use]
    pub fn inline_alignment(&self, ty: &Type) -> usize {
        match ty {
            Type::Struct(id) if self.struct_def(*id).fixed => self.struct_def(*id).minalign,
            Type::Scalar { kind, .. } => kind.size(),
            _ => 4,
        }
    }

    /// Size class used to order table fields: scalar size, else an offset.
    #[must_use]
    pub fn size_class(&self, ty: &Type) -> usize {
        match ty {
            Type::Scalar { kind, .. } => kind.size(),
            _ => 4,
        }
    }

    /// Iterates structs with their ids in declaration order.
    pub fn structs_with_ids(&self) -> impl Iterator<Item = (StructId, &StructDef)> {
        self.structs
            .iter()
            .enumerate()
            .map(|(index, def)| (StructId(index), def))
    }

    /// Iterates enums with their ids in declaration order.
    pub fn enums_with_ids(&self) -> impl Iterator<Item = (EnumId, &EnumDef)> {
        self.enums
            .iter()
            .enumerate()
            .map(|(index, def)| (EnumId(index), def))
    }

    /// Checks layout and reference invariants.
    ///
    /// # Errors
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), SchemaError> {
        validate_ir(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definitions::FieldDef;
    use crate::types::ScalarKind;

    fn sample_ir() -> (SchemaIr, StructId, StructId) {
        let mut ir = SchemaIr::new();
        let ns = Namespace::parse("MyGame.Example");
        let vec3 = ir.add_struct(
            StructDef::fixed("Vec3", ns.clone(), 12, 4)
                .with_field(FieldDef::new("x", Type::scalar(ScalarKind::Float32)))
                .with_field(FieldDef::new("y", Type::scalar(ScalarKind::Float32)).with_offset(4))
                .with_field(FieldDef::new("z", Type::scalar(ScalarKind::Float32)).with_offset(8)),
        );
        let monster = ir.add_struct(
            StructDef::table("Monster", ns).with_field(FieldDef::new("pos", Type::Struct(vec3))),
        );
        (ir, vec3, monster)
    }

    #[test]
    fn test_lookup_by_qualified_name() {
        let (ir, vec3, monster) = sample_ir();
        assert_eq!(ir.lookup_struct("MyGame.Example.Vec3"), Some(vec3));
        assert_eq!(ir.lookup_struct("MyGame.Example.Monster"), Some(monster));
        assert_eq!(ir.lookup_struct("Monster"), None);
    }

    #[test]
    fn test_current_namespace() {
        let mut ir = SchemaIr::new();
        assert!(ir.current_namespace().is_root());

        ir.declare_namespace(Namespace::parse("A"));
        ir.declare_namespace(Namespace::parse("A"));
        ir.declare_namespace(Namespace::parse("B.C"));
        assert_eq!(ir.namespaces.len(), 2);
        assert_eq!(ir.current_namespace().dotted(), "B.C");
    }

    #[test]
    fn test_inline_sizes() {
        let (ir, vec3, monster) = sample_ir();
        assert_eq!(ir.inline_size(&Type::Struct(vec3)), 12);
        assert_eq!(ir.inline_alignment(&Type::Struct(vec3)), 4);
        assert_eq!(ir.inline_size(&Type::Struct(monster)), 4);
        assert_eq!(ir.inline_size(&Type::scalar(ScalarKind::Int16)), 2);
        assert_eq!(ir.inline_alignment(&Type::String), 4);
        assert_eq!(ir.size_class(&Type::Struct(vec3)), 4);
        assert!(ir.is_fixed_struct(&Type::Struct(vec3)));
        assert!(!ir.is_fixed_struct(&Type::Struct(monster)));
    }

    #[test]
    fn test_root() {
        let (mut ir, _, monster) = sample_ir();
        assert!(ir.root().is_none());
        ir.set_root(monster);
        assert!(ir.is_root(monster));
        assert_eq!(ir.root().map(|s| s.name.as_str()), Some("Monster"));
    }
}
