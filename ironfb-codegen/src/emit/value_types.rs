//! Value-type accessors and typed vector wrappers.
//!
//! Value types wrap a `BufferPosition` (fixed structs) or a `TableAccessor`
//! (tables) and are copied rather than allocated. Vector wrappers give enum
//! and struct vectors an indexer and an enumerator. Only profiles declaring
//! `value_types` support the runtime these rely on.

use crate::emit::resolve_nested_buffer;
use crate::emit::structs::check_representable;
use crate::emit::types::TypeMapper;
use crate::error::CodegenError;
use crate::naming::{gen_comment, make_camel};
use ironfb_schema::{EnumId, FieldDef, NestedBuffer, StructDef, StructId, Type};

const VECTOR_ACCESSOR: &str = "_vectorAccessor";

/// Generator for value-type accessors and vector wrappers.
pub struct ValueTypeEmitter<'a> {
    mapper: TypeMapper<'a>,
}

impl<'a> ValueTypeEmitter<'a> {
    /// Creates a new value-type emitter.
    #[must_use]
    pub fn new(mapper: TypeMapper<'a>) -> Self {
        Self { mapper }
    }

    /// Name of the value type standing for `ty` in accessor signatures.
    #[must_use]
    pub fn value_type_name(&self, ty: &Type) -> String {
        let m = &self.mapper;
        match ty {
            Type::Vector(element) => {
                let element_name = match element.as_ref() {
                    Type::Struct(id) => m.struct_name(m.ir().struct_def(*id)),
                    other => m.type_get(other),
                };
                format!("{}Vector", make_camel(&element_name, true))
            }
            Type::Struct(id) => format!("{}Struct", m.struct_name(m.ir().struct_def(*id))),
            other => m.type_get(other),
        }
    }

    /// Generates the `<Name>Struct` value type of a struct or table.
    ///
    /// # Errors
    /// Returns `CodegenError::Unrepresentable` for field shapes with no rendering.
    pub fn emit_struct(&self, id: StructId) -> Result<String, CodegenError> {
        let m = &self.mapper;
        let p = m.profile();
        let def = m.ir().struct_def(id);
        let mut output = String::new();
        if def.generated {
            return Ok(output);
        }

        let name = format!("{}Struct", def.name);
        let (accessor_type, accessor_var, assign) = if def.fixed {
            ("BufferPosition", "_bufferPosition", "bufferPosition".to_string())
        } else {
            (
                "TableAccessor",
                "_tableAccessor",
                "new TableAccessor(ref bufferPosition)".to_string(),
            )
        };

        output.push_str(&gen_comment(&def.doc_comment, &p.comment_style, ""));
        output.push_str("public ");
        if p.partial_classes && def.partial {
            output.push_str("partial ");
        }
        output.push_str(&format!("struct {name} {{\n"));
        output.push_str(&format!("  private {accessor_type} {accessor_var};\n\n"));
        output.push_str(&format!(
            "  public {name}(BufferPosition bufferPosition) {{ {accessor_var} = {assign}; }}\n"
        ));
        output.push_str(&format!(
            "  public {name}(ref BufferPosition bufferPosition) {{ {accessor_var} = {assign}; }}\n\n"
        ));

        if !def.fixed {
            output.push_str(&self.root_access(id, def, &name));
        }

        output.push_str(&format!(
            "  public {accessor_type} Get{accessor_type}() {{ return {accessor_var}; }}\n\n"
        ));

        for field in def.active_fields() {
            check_representable(def, field)?;
            output.push_str(&gen_comment(&field.doc_comment, &p.comment_style, "  "));

            if let Type::Union(union_id) = &field.ty {
                let prefix = format!("{}As", make_camel(&field.name, p.first_camel_upper));
                for val in m.ir().enum_def(*union_id).values.iter().skip(1) {
                    if let Some(variant) = val.union_type {
                        output.push_str(&self.field_accessors(
                            def,
                            field,
                            &Type::Struct(variant),
                            &format!("{prefix}{}", val.name),
                        ));
                    }
                }
                continue;
            }

            output.push_str(&self.field_accessors(def, field, &field.ty, &field.name));

            if field.ty.is_string() {
                let camel = make_camel(&field.name, true);
                output.push_str(&format!(
                    "  public ArraySegment<byte>? Get{camel}Bytes() {{ return {accessor_var}.GetStringFieldValueAsArraySegment({}); }}\n",
                    field.offset
                ));
                output.push_str(&format!(
                    "  public ByteBufferSegment? Get{camel}BufferSegment() {{ return {accessor_var}.GetStringFieldValueAsByteBufferSegment({}); }}\n",
                    field.offset
                ));
            }

            if let Some(nested) = &field.nested_buffer {
                output.push_str(&self.nested_accessor(def, field, nested, accessor_var));
            }
        }

        output.push_str("\n}\n\n");
        Ok(output)
    }

    /// Private buffer constructors and the `GetRootAs` overload family.
    fn root_access(&self, id: StructId, def: &StructDef, name: &str) -> String {
        let p = self.mapper.profile();
        let method = p.function_name('G', &format!("etRootAs{}", def.name));
        let out_param = format!("{}Table", make_camel(&def.name, false));
        let out_decl = format!(", out {name} {out_param}");

        let mut output = format!(
            "  private {name}(ByteBuffer buffer) {{ TableAccessor.CreateFromOffset(buffer, out _tableAccessor); }}\n"
        );
        output.push_str(&format!(
            "  private {name}(ref ByteBufferSegment segment) {{ TableAccessor.CreateFromOffset(ref segment, out _tableAccessor); }}\n\n"
        ));

        output.push_str(&format!(
            "  public static {name} {method}(ByteBuffer buffer) {{ return new {name}(buffer); }}\n"
        ));
        output.push_str(&format!(
            "  public static void {method}(ByteBuffer buffer{out_decl}) {{ {out_param} = new {name}(buffer); }}\n"
        ));
        for by_ref in ["", "ref "] {
            output.push_str(&format!(
                "  public static {name} {method}({by_ref}ByteBufferSegment segment) {{ return new {name}(ref segment); }}\n"
            ));
            output.push_str(&format!(
                "  public static void {method}({by_ref}ByteBufferSegment segment{out_decl}) {{ {out_param} = new {name}(ref segment); }}\n"
            ));
        }
        output.push('\n');

        let ir = self.mapper.ir();
        if ir.is_root(id) {
            if let Some(identifier) = ir.file_identifier.as_deref() {
                output.push_str(&format!(
                    "  public static {}{}BufferHasIdentifier(ByteBuffer buffer) {{ return TableAccessor.HasIdentifier(buffer, \"{identifier}\"); }}\n",
                    p.bool_type, def.name
                ));
            }
            output.push('\n');
        }
        output
    }

    /// Accessors of one field, or of one union variant when `ty` is the variant.
    fn field_accessors(
        &self,
        def: &StructDef,
        field: &FieldDef,
        ty: &Type,
        accessor_root: &str,
    ) -> String {
        let m = &self.mapper;
        let type_name = self.value_type_name(ty);
        let return_type = match ty {
            Type::Vector(_) => format!("{type_name}?"),
            Type::Struct(_) if !def.fixed => format!("{type_name}?"),
            _ => type_name.clone(),
        };
        let method_name = make_camel(accessor_root, true);
        let param_name = make_camel(accessor_root, false);
        let accessor_var = if def.fixed {
            "_bufferPosition"
        } else {
            "_tableAccessor"
        };
        let offset = field.offset;
        let mut output = format!("  public {return_type} {method_name} {{");

        if ty.is_scalar() || ty.is_string() {
            let value_suffix = if ty.is_enum() {
                make_camel(&m.basic_type_name(ty, false), true)
            } else {
                make_camel(&type_name, true)
            };
            let mut value_method = format!("Get{value_suffix}");
            let mut default_arg = String::new();
            if !def.fixed {
                value_method.push_str("FieldValue");
                if ty.is_scalar() {
                    default_arg = format!(", {}", m.default_value(field, false));
                }
            }
            output.push_str(&format!(
                " get {{ return {}{accessor_var}.{value_method}({offset}{default_arg}); }} }}\n",
                m.destination_cast(ty)
            ));

            if ty.is_scalar() {
                let (return_kind, call) = if def.fixed {
                    ("void", format!("{accessor_var}.Put{value_suffix}"))
                } else {
                    ("bool", format!("return {accessor_var}.Mutate{value_suffix}FieldValue"))
                };
                output.push_str(&format!(
                    "  public {return_kind} Mutate{method_name}({type_name} {param_name}) {{ {call}({offset}, {}{param_name}); }}\n",
                    m.source_cast(ty, true)
                ));
                if !def.fixed {
                    output.push_str(&format!(
                        "  public bool Is{method_name}Specified {{ get {{ return {accessor_var}.CheckField({offset}); }} }}\n"
                    ));
                }
            }
            return output;
        }

        if def.fixed {
            // A fixed struct only nests other fixed structs.
            let create = format!("{accessor_var}.Create({offset}");
            output.push_str(&format!(
                " get {{ return new {type_name}({create})); }} }}\n\n"
            ));
            output.push_str(&format!(
                "  public void Get{method_name}(out {return_type} {param_name}) {{\n\
                 \x20   BufferPosition position;\n\
                 \x20   {create}, out position);\n\
                 \x20   {param_name} = new {type_name}(ref position);\n\
                 \x20 }}\n\n"
            ));
            return output;
        }

        let field_kind = match ty {
            Type::Vector(_) => "Vector",
            _ if m.ir().is_fixed_struct(ty) => "Struct",
            _ => "Table",
        };
        let try_get = format!("{accessor_var}.TryGet{field_kind}FieldValue({offset}, out position)");
        let create = format!("new {type_name}(ref position)");
        output.push_str(&format!(
            "\n    get {{\n\
             \x20     BufferPosition position;\n\
             \x20     return {try_get} ? {create}: ({return_type})null;\n\
             \x20   }}\n\
             \x20 }}\n\n"
        ));
        output.push_str(&format!(
            "  public bool TryGet{method_name}(out {type_name} {param_name}) {{\n\
             \x20   BufferPosition position;\n\
             \x20   if ({try_get}) {{\n\
             \x20     {param_name} = {create};\n\
             \x20     return true;\n\
             \x20   }}\n\
             \x20   {param_name} = default({type_name});\n\
             \x20   return false;\n\
             \x20 }}\n\n"
        ));
        output
    }

    fn nested_accessor(
        &self,
        def: &StructDef,
        field: &FieldDef,
        nested: &NestedBuffer,
        accessor_var: &str,
    ) -> String {
        let m = &self.mapper;
        let Some(nested_id) = resolve_nested_buffer(m.ir(), m.namespace(), nested) else {
            tracing::debug!(
                "No nested buffer type {:?} for field {}.{}, value accessor omitted",
                nested,
                def.name,
                field.name
            );
            return String::new();
        };

        let nested_def = m.ir().struct_def(nested_id);
        let method = format!("{}As{}", make_camel(&field.name, true), nested_def.name);
        let type_name = format!("{}Struct", m.struct_name(nested_def));
        let var = format!("{}Table", make_camel(&nested_def.name, false));
        let return_type = format!("{type_name}?");

        let mut output = format!(
            "  public {return_type} {method} {{\n\
             \x20   get {{\n\
             \x20     {type_name} {var};\n\
             \x20     return TryGet{method}(out {var}) ? {var} : ({return_type})null;\n\
             \x20   }}\n\
             \x20 }}\n\n"
        );
        output.push_str(&format!(
            "  public bool TryGet{method}(out {type_name} {var}) {{\n\
             \x20   BufferPosition vectorPosition;\n\
             \x20   if ({accessor_var}.TryGetVectorFieldValue({}, out vectorPosition)) {{\n\
             \x20     BufferPosition tablePosition;\n\
             \x20     VectorAccessor.GetNestedFlatBufferTable(ref vectorPosition, out tablePosition);\n\
             \x20     {var} = new {type_name}(ref tablePosition);\n\
             \x20     return true;\n\
             \x20   }}\n\
             \x20   {var} = default({type_name});\n\
             \x20   return false;\n\
             \x20 }}\n\n",
            field.offset
        ));
        output
    }

    /// Generates the `<Name>Vector` wrapper of an enum's values.
    #[must_use]
    pub fn emit_enum_vector(&self, id: EnumId) -> String {
        let m = &self.mapper;
        let def = m.ir().enum_def(id);
        if def.generated {
            return String::new();
        }
        let ty = Type::enumeration(def.underlying_type, id);
        let item_type = m.type_get(&ty);
        let wrapper = format!("{}Vector", make_camel(&item_type, true));
        let item_suffix = format!("{}Item", make_camel(&m.basic_type_name(&ty, false), true));

        let mut output = self.vector_preamble(&wrapper, "IVector", &item_type);
        output.push_str(&format!(
            "  public {item_type} this[int index] {{\n\
             \x20   get {{ return {}{VECTOR_ACCESSOR}.Get{item_suffix}(index); }}\n\
             \x20   set {{ {VECTOR_ACCESSOR}.Put{item_suffix}(index, {}value); }}\n\
             \x20 }}\n}}\n\n",
            m.destination_cast(&ty),
            m.source_cast(&ty, true)
        ));
        output
    }

    /// Generates the `<Name>Vector` wrapper of a struct or table vector.
    #[must_use]
    pub fn emit_struct_vector(&self, id: StructId) -> String {
        let m = &self.mapper;
        let def = m.ir().struct_def(id);
        if def.generated {
            return String::new();
        }
        let ty = Type::Struct(id);
        let item_type = self.value_type_name(&ty);
        let wrapper = format!("{}Vector", make_camel(&m.type_get(&ty), true));

        let mut output = self.vector_preamble(&wrapper, "IFieldGroupVector", &item_type);
        let get_item = if def.fixed {
            format!("GetStructItem(index, {}, out itemPosition)", def.bytesize)
        } else {
            "GetTableItem(index, out itemPosition)".to_string()
        };
        output.push_str(&format!(
            "  public void GetItem(int index, out {item_type} item) {{\n\
             \x20   BufferPosition itemPosition;\n\
             \x20   {VECTOR_ACCESSOR}.{get_item};\n\
             \x20   item = new {item_type}(ref itemPosition);\n\
             \x20 }}\n\n"
        ));
        output.push_str(&format!(
            "  public {item_type} this[int index] {{\n\
             \x20   get {{ \n\
             \x20     {item_type} item;\n\
             \x20     GetItem(index, out item);\n\
             \x20     return item;\n\
             \x20   }}\n\
             \x20   set {{ throw new NotSupportedException(); }}\n\
             \x20 }}\n}}\n\n"
        ));
        output
    }

    /// Fields, constructors, raw views and enumerators shared by every wrapper.
    fn vector_preamble(&self, wrapper: &str, interface: &str, item_type: &str) -> String {
        let body = format!("{{ {VECTOR_ACCESSOR} = new VectorAccessor(ref vectorPosition); }}");
        let enumerator = format!(
            "{}VectorEnumerator<{item_type}, {wrapper}>",
            if interface == "IFieldGroupVector" {
                "FieldGroup"
            } else {
                ""
            }
        );

        let mut output = format!("public struct {wrapper} : {interface}<{item_type}> {{\n");
        output.push_str(&format!("  private VectorAccessor {VECTOR_ACCESSOR};\n\n"));
        output.push_str(&format!("  public {wrapper}(BufferPosition vectorPosition) {body}\n"));
        output.push_str(&format!(
            "  public {wrapper}(ref BufferPosition vectorPosition) {body}\n\n"
        ));
        output.push_str(&format!(
            "  public VectorAccessor VectorAccessor {{ get {{ return {VECTOR_ACCESSOR}; }} }}\n"
        ));
        output.push_str(&format!(
            "  public int Length {{ get {{ return {VECTOR_ACCESSOR}.VectorDataLength; }} }}\n"
        ));
        output.push_str(&format!(
            "  public ArraySegment<byte> GetAsArraySegment() {{ return {VECTOR_ACCESSOR}.GetVectorAsArraySegment(); }}\n"
        ));
        output.push_str(&format!(
            "  public void GetAsArraySegment(out ArraySegment<byte> arraySegment) {{ {VECTOR_ACCESSOR}.GetVectorAsArraySegment(out arraySegment); }}\n"
        ));
        output.push_str(&format!(
            "  public ByteBufferSegment GetAsByteBufferSegment() {{ return {VECTOR_ACCESSOR}.GetVectorAsByteBufferSegment(); }}\n"
        ));
        output.push_str(&format!(
            "  public void GetAsByteBufferSegment(out ByteBufferSegment byteBufferSegment) {{ {VECTOR_ACCESSOR}.GetVectorAsByteBufferSegment(out byteBufferSegment); }}\n"
        ));
        output.push_str(&format!(
            "  public {enumerator} GetEnumerator() {{ return new {enumerator}(ref this); }}\n"
        ));
        output.push_str(&format!(
            "  System.Collections.Generic.IEnumerator<{item_type}> System.Collections.Generic.IEnumerable<{item_type}>.GetEnumerator() {{ return GetEnumerator(); }}\n"
        ));
        output.push_str(
            "  System.Collections.IEnumerator System.Collections.IEnumerable.GetEnumerator() { return GetEnumerator(); }\n\n",
        );
        output
    }
}
