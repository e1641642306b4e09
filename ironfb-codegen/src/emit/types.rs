//! Type mapping: from schema types to host-language spellings.
//!
//! Every function here is a pure function of the profile, the emission
//! namespace and a [`Type`]. Vector element types are re-derived from the
//! vector node on every call rather than cached by callers.

use crate::naming::make_camel;
use crate::profile::LanguageProfile;
use ironfb_schema::{EnumDef, FieldDef, Namespace, ScalarKind, SchemaIr, StructDef, Type};

/// Maps schema types to names, casts and masks of one language.
#[derive(Debug, Clone, Copy)]
pub struct TypeMapper<'a> {
    ir: &'a SchemaIr,
    profile: &'a LanguageProfile,
    namespace: &'a Namespace,
}

impl<'a> TypeMapper<'a> {
    /// Creates a mapper emitting into `namespace`.
    #[must_use]
    pub fn new(ir: &'a SchemaIr, profile: &'a LanguageProfile, namespace: &'a Namespace) -> Self {
        Self {
            ir,
            profile,
            namespace,
        }
    }

    /// Returns the IR being mapped.
    #[must_use]
    pub fn ir(&self) -> &'a SchemaIr {
        self.ir
    }

    /// Returns the language profile.
    #[must_use]
    pub fn profile(&self) -> &'a LanguageProfile {
        self.profile
    }

    /// Returns the namespace declarations are emitted into.
    #[must_use]
    pub fn namespace(&self) -> &'a Namespace {
        self.namespace
    }

    /// Qualifies `name` with `namespace` when it differs from the emission namespace.
    #[must_use]
    pub fn wrap_in_namespace(&self, namespace: &Namespace, name: &str) -> String {
        if namespace == self.namespace {
            name.to_string()
        } else {
            namespace.qualify(name)
        }
    }

    /// Use-site name of a struct or table.
    #[must_use]
    pub fn struct_name(&self, def: &StructDef) -> String {
        self.wrap_in_namespace(&def.namespace, &def.name)
    }

    /// Use-site name of an enum.
    #[must_use]
    pub fn enum_name(&self, def: &EnumDef) -> String {
        self.wrap_in_namespace(&def.namespace, &def.name)
    }

    /// Storage type name.
    ///
    /// With `overrides`, profiles with native enums name enum-typed values by
    /// their enum and profiles with typed offsets name struct offsets
    /// `Offset<T>`.
    #[must_use]
    pub fn basic_type_name(&self, ty: &Type, overrides: bool) -> String {
        if overrides {
            if self.profile.native_enums && ty.is_enum() {
                if let Some(id) = ty.enum_def() {
                    return self.enum_name(self.ir.enum_def(id));
                }
            }
            if self.profile.typed_offsets {
                if let Type::Struct(id) = ty {
                    return format!(
                        "{}<{}>",
                        self.profile.offset_names.table,
                        self.struct_name(self.ir.struct_def(*id))
                    );
                }
            }
        }

        let names = &self.profile.offset_names;
        let name = match ty {
            Type::Scalar { kind, .. } => self.profile.scalar_name(*kind),
            Type::String => names.string,
            Type::Vector(_) => names.vector,
            Type::Struct(_) => names.table,
            Type::Union(_) => names.union,
        };
        name.to_string()
    }

    /// Reference type name of a non-scalar.
    #[must_use]
    pub fn pointer_type_name(&self, ty: &Type) -> String {
        match ty {
            Type::String => self.profile.string_type.to_string(),
            Type::Vector(element) => self.type_get(element),
            Type::Struct(id) => self.struct_name(self.ir.struct_def(*id)),
            Type::Union(_) => self.profile.union_table_type.to_string(),
            Type::Scalar { .. } => "Table".to_string(),
        }
    }

    /// Name of the type an accessor returns before widening.
    #[must_use]
    pub fn type_get(&self, ty: &Type) -> String {
        if ty.is_scalar() {
            self.basic_type_name(ty, true)
        } else {
            self.pointer_type_name(ty)
        }
    }

    /// Type the caller receives after unsigned widening.
    ///
    /// 8 and 16-bit unsigned values widen to the 32-bit signed type and
    /// 32-bit unsigned values to the 64-bit signed type. A vector widens its
    /// element only when `vector_element` is set.
    #[must_use]
    pub fn destination_type(&self, ty: &Type, vector_element: bool) -> Type {
        if !self.profile.widens_unsigned {
            return ty.clone();
        }
        match ty {
            Type::Scalar {
                kind: ScalarKind::UInt8 | ScalarKind::UInt16,
                ..
            } => Type::scalar(ScalarKind::Int32),
            Type::Scalar {
                kind: ScalarKind::UInt32,
                ..
            } => Type::scalar(ScalarKind::Int64),
            Type::Vector(element) if vector_element => {
                self.destination_type(element, vector_element)
            }
            _ => ty.clone(),
        }
    }

    /// Name of the destination type, vector elements included.
    #[must_use]
    pub fn type_name_dest(&self, ty: &Type) -> String {
        self.type_get(&self.destination_type(ty, true))
    }

    /// Mask clearing the sign extension of a widened read.
    #[must_use]
    pub fn destination_mask(&self, ty: &Type, vector_element: bool) -> &'static str {
        if !self.profile.widens_unsigned {
            return "";
        }
        match ty {
            Type::Scalar { kind, .. } => match kind {
                ScalarKind::UInt8 => " & 0xFF",
                ScalarKind::UInt16 => " & 0xFFFF",
                ScalarKind::UInt32 => " & 0xFFFFFFFFL",
                _ => "",
            },
            Type::Vector(element) if vector_element => {
                self.destination_mask(element, vector_element)
            }
            _ => "",
        }
    }

    /// Cast applied to a raw read to reach the destination type.
    #[must_use]
    pub fn destination_cast(&self, ty: &Type) -> String {
        if let Type::Vector(element) = ty {
            return self.destination_cast(element);
        }
        if self.profile.widens_unsigned && ty.scalar_kind() == Some(ScalarKind::UInt32) {
            return format!("({})", self.profile.scalar_name(ScalarKind::Int64));
        }
        if self.profile.native_enums && ty.is_enum() {
            if let Some(id) = ty.enum_def() {
                return format!("({})", self.enum_name(self.ir.enum_def(id)));
            }
        }
        String::new()
    }

    /// Cast narrowing a caller-supplied value back to the storage type.
    ///
    /// Widened values are narrowed only when `from_destination` is set.
    #[must_use]
    pub fn source_cast(&self, ty: &Type, from_destination: bool) -> String {
        if let Type::Vector(element) = ty {
            return self.source_cast(element, from_destination);
        }
        let narrows = self.profile.widens_unsigned
            && from_destination
            && matches!(
                ty.scalar_kind(),
                Some(ScalarKind::UInt8 | ScalarKind::UInt16 | ScalarKind::UInt32)
            );
        if narrows || (self.profile.native_enums && ty.is_enum()) {
            return format!("({})", self.basic_type_name(ty, false));
        }
        String::new()
    }

    /// Source cast for scalars only.
    #[must_use]
    pub fn source_cast_basic(&self, ty: &Type, from_destination: bool) -> String {
        if ty.is_scalar() {
            self.source_cast(ty, from_destination)
        } else {
            String::new()
        }
    }

    /// Renders a field's default constant as a literal of its type.
    #[must_use]
    pub fn default_value(&self, field: &FieldDef, overrides: bool) -> String {
        let constant = field.default_value.as_str();
        if overrides && self.profile.native_enums && !field.ty.is_union() {
            if let Some(id) = field.ty.enum_def() {
                return self.enum_default_value(self.ir.enum_def(id), constant);
            }
        }

        match field.ty.scalar_kind() {
            Some(ScalarKind::Float32) => format!("{constant}f"),
            Some(ScalarKind::Bool) => {
                if constant == "0" {
                    "false".to_string()
                } else {
                    "true".to_string()
                }
            }
            Some(kind) if kind.is_integer() => self.integer_literal(&field.ty, constant),
            _ => constant.to_string(),
        }
    }

    /// Default argument of a builder parameter.
    #[must_use]
    pub fn default_value_basic(&self, field: &FieldDef, overrides: bool) -> String {
        if field.ty.is_scalar() {
            return self.default_value(field, overrides);
        }
        if overrides && self.profile.typed_offsets {
            let names = &self.profile.offset_names;
            match &field.ty {
                Type::String => return format!("default({})", names.string),
                Type::Vector(_) => return format!("default({})", names.vector),
                Type::Struct(_) => {
                    return format!("default({})", self.basic_type_name(&field.ty, true));
                }
                _ => {}
            }
        }
        "0".to_string()
    }

    fn enum_default_value(&self, def: &EnumDef, constant: &str) -> String {
        constant
            .parse::<i64>()
            .ok()
            .and_then(|value| def.value_named_by(value))
            .map_or_else(
                || constant.to_string(),
                |val| format!("{}.{}", self.enum_name(def), val.name),
            )
    }

    /// Appends the long suffix to 64-bit destination literals beyond 32 bits.
    fn integer_literal(&self, ty: &Type, constant: &str) -> String {
        let wide = matches!(
            self.destination_type(ty, false).scalar_kind(),
            Some(ScalarKind::Int64 | ScalarKind::UInt64)
        );
        let out_of_int_range = constant
            .parse::<i128>()
            .is_ok_and(|v| v < i128::from(i32::MIN) || v > i128::from(i32::MAX));
        if wide && out_of_int_range {
            format!("{constant}{}", self.profile.long_literal_suffix)
        } else {
            constant.to_string()
        }
    }

    /// Runtime call reading a value of this type.
    #[must_use]
    pub fn getter(&self, ty: &Type) -> String {
        match ty {
            Type::String => "__string".to_string(),
            Type::Struct(_) => "__struct".to_string(),
            Type::Union(_) => "__union".to_string(),
            Type::Vector(element) => self.getter(element),
            Type::Scalar { .. } => {
                let getter = format!("bb.{}", self.profile.function_name('G', "et"));
                let basic = self.basic_type_name(ty, false);
                if ty.is_bool() {
                    format!("0!={getter}")
                } else if basic != "byte" {
                    format!("{getter}{}", make_camel(&basic, true))
                } else {
                    getter
                }
            }
        }
    }

    /// Runtime call writing a scalar in place, empty for non-scalars.
    #[must_use]
    pub fn setter(&self, ty: &Type) -> String {
        if !ty.is_scalar() {
            return String::new();
        }
        let setter = format!("bb.{}", self.profile.function_name('P', "ut"));
        let basic = self.basic_type_name(ty, false);
        if basic != "byte" && !ty.is_bool() {
            format!("{setter}{}", make_camel(&basic, true))
        } else {
            setter
        }
    }

    /// Suffix of builder `add`/`put` calls for this type.
    #[must_use]
    pub fn method(&self, ty: &Type) -> String {
        if ty.is_scalar() {
            make_camel(&self.basic_type_name(ty, false), true)
        } else if self.ir.is_fixed_struct(ty) {
            "Struct".to_string()
        } else {
            "Offset".to_string()
        }
    }

    /// Type returned by create/end functions of a declaration.
    #[must_use]
    pub fn offset_type(&self, def: &StructDef) -> String {
        if self.profile.typed_offsets {
            format!(
                "{}<{}>",
                self.profile.offset_names.table,
                self.struct_name(def)
            )
        } else {
            self.profile.offset_names.table.to_string()
        }
    }

    /// Wraps a raw offset expression in the declaration's offset type.
    #[must_use]
    pub fn offset_construct(&self, def: &StructDef, expression: &str) -> String {
        if self.profile.typed_offsets {
            format!("new {}({expression})", self.offset_type(def))
        } else {
            expression.to_string()
        }
    }

    /// Type returned by vector builders.
    #[must_use]
    pub fn vector_offset_type(&self) -> &'static str {
        self.profile.offset_names.vector
    }
}
