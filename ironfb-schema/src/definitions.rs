//! Enum, struct, table and field definitions.
//!
//! These are produced by the schema resolver with every offset, size,
//! alignment and padding value already computed. Code generation only reads
//! them.

use crate::ir::StructId;
use crate::types::{Namespace, ScalarKind, Type};
use std::collections::BTreeMap;

/// Free-form string-keyed attributes attached to a definition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(BTreeMap<String, String>);

impl Attributes {
    /// Creates an empty attribute bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an attribute, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    /// Looks up an attribute value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Returns true if the attribute is present.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Iterates attributes in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// One member of an enum or union.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumVal {
    /// Member name.
    pub name: String,
    /// Integer value.
    pub value: i64,
    /// Struct or table carried by this union variant.
    pub union_type: Option<StructId>,
    /// Documentation lines.
    pub doc_comment: Vec<String>,
}

impl EnumVal {
    /// Creates an enum member.
    #[must_use]
    pub fn new(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            value,
            union_type: None,
            doc_comment: Vec::new(),
        }
    }
}

/// Enum or union definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDef {
    /// Enum name.
    pub name: String,
    /// Namespace the enum was declared in.
    pub namespace: Namespace,
    /// Integer kind backing the enum.
    pub underlying_type: ScalarKind,
    /// Members, ascending by value.
    pub values: Vec<EnumVal>,
    /// True if this enum is the discriminant of a union.
    pub is_union: bool,
    /// True if already emitted by another pass.
    pub generated: bool,
    /// Documentation lines.
    pub doc_comment: Vec<String>,
}

impl EnumDef {
    /// Creates an empty enum backed by `underlying_type`.
    #[must_use]
    pub fn new(name: impl Into<String>, namespace: Namespace, underlying_type: ScalarKind) -> Self {
        Self {
            name: name.into(),
            namespace,
            underlying_type,
            values: Vec::new(),
            is_union: false,
            generated: false,
            doc_comment: Vec::new(),
        }
    }

    /// Creates a union with its reserved `NONE` member at value 0.
    #[must_use]
    pub fn union(name: impl Into<String>, namespace: Namespace) -> Self {
        let mut def = Self::new(name, namespace, ScalarKind::UInt8);
        def.is_union = true;
        def.values.push(EnumVal::new("NONE", 0));
        def
    }

    /// Appends a member.
    #[must_use]
    pub fn with_value(mut self, name: impl Into<String>, value: i64) -> Self {
        self.values.push(EnumVal::new(name, value));
        self
    }

    /// Appends a union variant carrying `struct_id`, numbered after the last member.
    #[must_use]
    pub fn with_variant(mut self, name: impl Into<String>, struct_id: StructId) -> Self {
        let value = self.values.last().map_or(0, |v| v.value + 1);
        let mut val = EnumVal::new(name, value);
        val.union_type = Some(struct_id);
        self.values.push(val);
        self
    }

    /// Adds a documentation line.
    #[must_use]
    pub fn with_doc(mut self, line: impl Into<String>) -> Self {
        self.doc_comment.push(line.into());
        self
    }

    /// Returns the enum's underlying type.
    #[must_use]
    pub const fn underlying(&self) -> Type {
        Type::scalar(self.underlying_type)
    }

    /// Returns the smallest member value.
    #[must_use]
    pub fn min_value(&self) -> Option<i64> {
        self.values.first().map(|v| v.value)
    }

    /// Returns the largest member value.
    #[must_use]
    pub fn max_value(&self) -> Option<i64> {
        self.values.last().map(|v| v.value)
    }

    /// Finds the member with the given value.
    #[must_use]
    pub fn value_named_by(&self, value: i64) -> Option<&EnumVal> {
        self.values.iter().find(|v| v.value == value)
    }
}

/// Typed reference to the schema type of a nested sub-buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NestedBuffer {
    /// Already resolved by the schema resolver.
    Resolved(StructId),
    /// Unresolved name, searched through the enclosing namespaces at emission.
    Named(String),
}

/// Field of a struct or table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    /// Field name as written in the schema.
    pub name: String,
    /// Field type.
    pub ty: Type,
    /// Byte offset inside a fixed struct, or vtable byte offset in a table.
    pub offset: usize,
    /// Vtable slot index used by builder calls (tables only).
    pub slot: usize,
    /// Default constant in schema form, re-parsed per target type.
    pub default_value: String,
    /// Suppresses all emission for this field.
    pub deprecated: bool,
    /// Field must be set before the table is finished.
    pub required: bool,
    /// Padding bytes written before this field (fixed structs only).
    pub padding: usize,
    /// Schema type of the buffer nested in this field's bytes.
    pub nested_buffer: Option<NestedBuffer>,
    /// Remaining attributes.
    pub attributes: Attributes,
    /// Documentation lines.
    pub doc_comment: Vec<String>,
}

impl FieldDef {
    /// Creates a field with a zero default and no layout information.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
            offset: 0,
            slot: 0,
            default_value: "0".to_string(),
            deprecated: false,
            required: false,
            padding: 0,
            nested_buffer: None,
            attributes: Attributes::new(),
            doc_comment: Vec::new(),
        }
    }

    /// Sets the byte offset.
    #[must_use]
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Sets the vtable slot index.
    #[must_use]
    pub fn with_slot(mut self, slot: usize) -> Self {
        self.slot = slot;
        self
    }

    /// Sets the default constant.
    #[must_use]
    pub fn with_default(mut self, constant: impl Into<String>) -> Self {
        self.default_value = constant.into();
        self
    }

    /// Sets the leading padding.
    #[must_use]
    pub fn with_padding(mut self, padding: usize) -> Self {
        self.padding = padding;
        self
    }

    /// Marks the field deprecated.
    #[must_use]
    pub fn deprecated(mut self) -> Self {
        self.deprecated = true;
        self
    }

    /// Marks the field required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Declares the field's bytes as a nested buffer of another type.
    #[must_use]
    pub fn with_nested_buffer(mut self, nested: NestedBuffer) -> Self {
        self.nested_buffer = Some(nested);
        self
    }

    /// Adds a documentation line.
    #[must_use]
    pub fn with_doc(mut self, line: impl Into<String>) -> Self {
        self.doc_comment.push(line.into());
        self
    }
}

/// Struct (fixed layout) or table (vtable layout) definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructDef {
    /// Declaration name.
    pub name: String,
    /// Namespace the declaration was made in.
    pub namespace: Namespace,
    /// True for inline fixed structs, false for tables.
    pub fixed: bool,
    /// Fields in declaration order.
    pub fields: Vec<FieldDef>,
    /// Total size of a fixed struct.
    pub bytesize: usize,
    /// Alignment of a fixed struct.
    pub minalign: usize,
    /// Emit single-call construction grouped by field size.
    pub sortbysize: bool,
    /// Emit an extensible (partial) class where the target supports it.
    pub partial: bool,
    /// Remaining attributes.
    pub attributes: Attributes,
    /// True if already emitted by another pass.
    pub generated: bool,
    /// Documentation lines.
    pub doc_comment: Vec<String>,
}

impl StructDef {
    /// Creates an empty table.
    #[must_use]
    pub fn table(name: impl Into<String>, namespace: Namespace) -> Self {
        Self {
            name: name.into(),
            namespace,
            fixed: false,
            fields: Vec::new(),
            bytesize: 0,
            minalign: 1,
            sortbysize: true,
            partial: false,
            attributes: Attributes::new(),
            generated: false,
            doc_comment: Vec::new(),
        }
    }

    /// Creates an empty fixed struct with its precomputed size and alignment.
    #[must_use]
    pub fn fixed(
        name: impl Into<String>,
        namespace: Namespace,
        bytesize: usize,
        minalign: usize,
    ) -> Self {
        let mut def = Self::table(name, namespace);
        def.fixed = true;
        def.sortbysize = false;
        def.bytesize = bytesize;
        def.minalign = minalign;
        def
    }

    /// Appends a field.
    #[must_use]
    pub fn with_field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    /// Sets the size-sorted construction policy.
    #[must_use]
    pub fn with_sortbysize(mut self, sortbysize: bool) -> Self {
        self.sortbysize = sortbysize;
        self
    }

    /// Marks the declaration as partial.
    #[must_use]
    pub fn with_partial(mut self) -> Self {
        self.partial = true;
        self
    }

    /// Adds a documentation line.
    #[must_use]
    pub fn with_doc(mut self, line: impl Into<String>) -> Self {
        self.doc_comment.push(line.into());
        self
    }

    /// Appends a field.
    pub fn add_field(&mut self, field: FieldDef) {
        self.fields.push(field);
    }

    /// Numbers table fields by position: slot `i` sits at vtable offset `4 + 2 * i`.
    ///
    /// This is resolver-side bookkeeping for IR assembled by hand; code
    /// generation never renumbers fields.
    pub fn assign_vtable_slots(&mut self) {
        for (slot, field) in self.fields.iter_mut().enumerate() {
            field.slot = slot;
            field.offset = 4 + 2 * slot;
        }
    }

    /// Iterates fields that are not deprecated.
    pub fn active_fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.iter().filter(|f| !f.deprecated)
    }

    /// Finds a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attributes_are_ordered() {
        let mut attrs = Attributes::new();
        attrs.insert("zeta", "1");
        attrs.insert("alpha", "2");
        let keys: Vec<&str> = attrs.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["alpha", "zeta"]);
        assert_eq!(attrs.get("alpha"), Some("2"));
        assert!(!attrs.contains("beta"));
    }

    #[test]
    fn test_enum_min_max() {
        let def = EnumDef::new("Color", Namespace::ROOT, ScalarKind::Int8)
            .with_value("Red", 1)
            .with_value("Green", 2)
            .with_value("Blue", 8);
        assert_eq!(def.min_value(), Some(1));
        assert_eq!(def.max_value(), Some(8));
        assert_eq!(def.value_named_by(2).map(|v| v.name.as_str()), Some("Green"));
        assert!(def.value_named_by(3).is_none());
    }

    #[test]
    fn test_union_reserves_none() {
        let def = EnumDef::union("Any", Namespace::ROOT)
            .with_variant("Monster", StructId(0))
            .with_variant("Weapon", StructId(1));
        assert!(def.is_union);
        assert_eq!(def.values[0].name, "NONE");
        assert_eq!(def.values[0].union_type, None);
        assert_eq!(def.values[2].value, 2);
        assert_eq!(def.values[2].union_type, Some(StructId(1)));
    }

    #[test]
    fn test_assign_vtable_slots() {
        let mut table = StructDef::table("Stat", Namespace::ROOT)
            .with_field(FieldDef::new("id", Type::String))
            .with_field(FieldDef::new("val", Type::scalar(ScalarKind::Int64)))
            .with_field(FieldDef::new("count", Type::scalar(ScalarKind::UInt16)));
        table.assign_vtable_slots();

        let offsets: Vec<(usize, usize)> = table.fields.iter().map(|f| (f.slot, f.offset)).collect();
        assert_eq!(offsets, vec![(0, 4), (1, 6), (2, 8)]);
    }

    #[test]
    fn test_active_fields_skip_deprecated() {
        let table = StructDef::table("Monster", Namespace::ROOT)
            .with_field(FieldDef::new("hp", Type::scalar(ScalarKind::Int16)))
            .with_field(FieldDef::new("friendly", Type::scalar(ScalarKind::Bool)).deprecated());
        let names: Vec<&str> = table.active_fields().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["hp"]);
        assert!(table.field("friendly").is_some_and(|f| f.deprecated));
    }

    #[test]
    fn test_fixed_struct_defaults() {
        let def = StructDef::fixed("Vec3", Namespace::ROOT, 12, 4);
        assert!(def.fixed);
        assert!(!def.sortbysize);
        assert_eq!(def.bytesize, 12);
        assert_eq!(def.minalign, 4);
    }
}
