//! Struct and table accessor class generation.
//!
//! A declaration is rendered as [`DeclarationFragments`], one fragment per
//! emission phase, which are concatenated in a fixed order.

use crate::emit::enums::EnumEmitter;
use crate::emit::resolve_nested_buffer;
use crate::emit::types::TypeMapper;
use crate::error::CodegenError;
use crate::naming::{gen_comment, make_camel};
use ironfb_schema::{FieldDef, NestedBuffer, StructDef, StructId, Type};

/// Rendered phases of one struct or table declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclarationFragments {
    /// Doc comment and class opening.
    pub header: String,
    /// `GetRootAs` entry points and identifier check (tables only).
    pub root_access: String,
    /// Re-initialization method.
    pub init: String,
    /// Field accessors, mutators and presence predicates.
    pub accessors: String,
    /// Create, start/add/end, vector builders and finish helpers.
    pub constructors: String,
}

impl DeclarationFragments {
    /// Concatenates the fragments and closes the class.
    #[must_use]
    pub fn assemble(&self) -> String {
        let mut output = String::with_capacity(
            self.header.len()
                + self.root_access.len()
                + self.init.len()
                + self.accessors.len()
                + self.constructors.len()
                + 4,
        );
        output.push_str(&self.header);
        output.push_str(&self.root_access);
        output.push_str(&self.init);
        output.push_str(&self.accessors);
        output.push_str(&self.constructors);
        output.push_str("};\n\n");
        output
    }
}

/// Generator for struct and table accessor classes.
pub struct StructEmitter<'a> {
    mapper: TypeMapper<'a>,
    mutable_buffer: bool,
}

impl<'a> StructEmitter<'a> {
    /// Creates a new struct emitter.
    #[must_use]
    pub fn new(mapper: TypeMapper<'a>, mutable_buffer: bool) -> Self {
        Self {
            mapper,
            mutable_buffer,
        }
    }

    /// Generates the accessor class of a struct or table.
    ///
    /// # Errors
    /// Returns `CodegenError::Unrepresentable` for field shapes with no rendering.
    pub fn emit(&self, id: StructId) -> Result<String, CodegenError> {
        let def = self.mapper.ir().struct_def(id);
        if def.generated {
            return Ok(String::new());
        }
        Ok(self.fragments(id)?.assemble())
    }

    /// Renders every phase of a declaration.
    ///
    /// # Errors
    /// Returns `CodegenError::Unrepresentable` for field shapes with no rendering.
    pub fn fragments(&self, id: StructId) -> Result<DeclarationFragments, CodegenError> {
        let def = self.mapper.ir().struct_def(id);
        let mut fragments = DeclarationFragments {
            header: self.header(def),
            init: self.init(def),
            ..DeclarationFragments::default()
        };

        if def.fixed {
            fragments.accessors = self.field_accessors(def)?;
            fragments.constructors = self.struct_constructor(def);
        } else {
            fragments.root_access = self.root_access(id, def);
            fragments.accessors = self.field_accessors(def)?;
            fragments.constructors = self.table_constructors(def);
            if self.mapper.ir().is_root(id) {
                fragments.constructors.push_str(&self.finish(def));
            }
        }

        Ok(fragments)
    }

    fn header(&self, def: &StructDef) -> String {
        let p = self.mapper.profile();
        let mut output = gen_comment(&def.doc_comment, &p.comment_style, "");
        output.push_str("public ");
        if p.partial_classes && def.partial {
            output.push_str("partial ");
        } else {
            output.push_str(p.unsubclassable_decl);
        }
        output.push_str(&format!(
            "class {}{}{} {{\n",
            def.name,
            p.inheritance_marker,
            if def.fixed { "Struct" } else { "Table" }
        ));
        output
    }

    /// Entry points reading the root offset at the start of a buffer.
    fn root_access(&self, id: StructId, def: &StructDef) -> String {
        let mut output = String::new();
        let p = self.mapper.profile();
        let name = &def.name;
        let method_name = p.function_name('G', &format!("etRootAs{name}"));
        let signature = format!("  public static {name} {method_name}");
        let get_int = p.function_name('G', "etInt");
        let position = p.get_bb_position;

        output.push_str(&format!(
            "{signature}(ByteBuffer _bb) {{ return {method_name}(_bb, new {name}()); }}\n"
        ));
        output.push_str(&format!(
            "{signature}(ByteBuffer _bb, {name} obj) {{ {}return (obj.__init(_bb.{get_int}(_bb.{position}) + _bb.{position}, _bb)); }}\n",
            p.set_bb_byteorder
        ));

        if p.buffer_segments {
            output.push_str(&format!(
                "{signature}(ByteBufferSegment bbs) {{ return {method_name}(bbs, new {name}()); }}\n"
            ));
            output.push_str(&format!(
                "{signature}(ByteBufferSegment bbs, {name} obj) {{ return (obj.__init(bbs.ByteBuffer.{get_int}(bbs.Offset) + bbs.Offset, bbs.ByteBuffer)); }}\n"
            ));
        }

        let ir = self.mapper.ir();
        if let (true, Some(identifier)) = (ir.is_root(id), ir.file_identifier.as_deref()) {
            output.push_str(&format!(
                "  public static {}{name}BufferHasIdentifier(ByteBuffer _bb) {{ return __has_identifier(_bb, \"{identifier}\"); }}\n",
                p.bool_type
            ));
        }
        output
    }

    fn init(&self, def: &StructDef) -> String {
        format!(
            "  public {} __init(int _i, ByteBuffer _bb) {{ bb_pos = _i; bb = _bb; return this; }}\n\n",
            def.name
        )
    }

    fn field_accessors(&self, def: &StructDef) -> Result<String, CodegenError> {
        let mut output = String::new();
        for field in def.active_fields() {
            output.push_str(&self.field_accessor(def, field)?);
        }
        output.push('\n');
        Ok(output)
    }

    /// Accessors of one field, dispatched on its type.
    fn field_accessor(&self, def: &StructDef, field: &FieldDef) -> Result<String, CodegenError> {
        check_representable(def, field)?;

        let m = &self.mapper;
        let p = m.profile();
        let ir = m.ir();
        let mut output = gen_comment(&field.doc_comment, &p.comment_style, "  ");

        let camel = make_camel(&field.name, p.first_camel_upper);
        let mut type_name = m.type_get(&field.ty);
        let type_name_dest = m.type_name_dest(&field.ty);
        let dest_mask = m.destination_mask(&field.ty, true);
        let dest_cast = m.destination_cast(&field.ty);
        let mut method_start = format!("  public {type_name_dest} {camel}");
        let mut offset_prefix = format!(
            " {{ int o = __offset({}); return o != 0 ? ",
            field.offset
        );

        // Object accessors first get a variant allocating a fresh accessor.
        match &field.ty {
            Type::Struct(_) => {
                if p.property_accessors {
                    output.push_str(&format!(
                        "{method_start} {{ get {{ return Get{camel}(new {type_name}()); }} }}\n"
                    ));
                    method_start = format!("  public {type_name_dest} Get{camel}");
                } else {
                    output.push_str(&format!(
                        "{method_start}() {{ return {camel}(new {type_name}()); }}\n"
                    ));
                }
            }
            Type::Vector(element) if matches!(element.as_ref(), Type::Struct(_)) => {
                let (start, call) = if p.property_accessors {
                    (format!("  public {type_name_dest} Get{camel}"), format!("Get{camel}"))
                } else {
                    (method_start.clone(), camel.clone())
                };
                output.push_str(&format!(
                    "{start}(int j) {{ return {call}(new {type_name}(), j); }}\n"
                ));
                method_start = start;
            }
            Type::Vector(_) => {
                if p.property_accessors {
                    method_start = format!("  public {type_name_dest} Get{camel}");
                }
            }
            Type::Union(_) => {
                if p.generic_unions {
                    let generic = p.union_table_type;
                    method_start = format!("  public {type_name_dest} Get{camel}<{generic}>");
                    offset_prefix = format!(" where {generic} : Table{offset_prefix}");
                    type_name = type_name_dest.clone();
                }
            }
            _ => {}
        }

        let mut getter = format!("{dest_cast}{}", m.getter(&field.ty));
        output.push_str(&method_start);

        let scalar_valued = field.ty.is_scalar() || field.ty.element().is_some_and(Type::is_scalar);
        let default_cast =
            if p.cast_defaults && scalar_valued && (field.ty.enum_def().is_none() || field.ty.is_vector()) {
                format!("({type_name_dest})")
            } else {
                String::new()
            };

        let mut member_suffix = "";
        match &field.ty {
            Type::Scalar { .. } => {
                output.push_str(p.getter_prefix);
                member_suffix = p.getter_suffix;
                if def.fixed {
                    output.push_str(&format!(
                        " {{ return {getter}(bb_pos + {}){dest_mask}",
                        field.offset
                    ));
                } else {
                    output.push_str(&format!(
                        "{offset_prefix}{getter}(o + bb_pos){dest_mask} : {default_cast}{}",
                        m.default_value(field, true)
                    ));
                }
            }
            Type::Struct(id) => {
                output.push_str(&format!("({type_name} obj"));
                if def.fixed {
                    output.push_str(&format!(
                        ") {{ return obj.__init(bb_pos + {}, bb)",
                        field.offset
                    ));
                } else {
                    let position = if ir.struct_def(*id).fixed {
                        "o + bb_pos"
                    } else {
                        "__indirect(o + bb_pos)"
                    };
                    output.push_str(&format!(
                        "){offset_prefix}obj.__init({position}, bb) : null"
                    ));
                }
            }
            Type::String => {
                output.push_str(p.getter_prefix);
                member_suffix = p.getter_suffix;
                output.push_str(&format!("{offset_prefix}{getter}(o + bb_pos) : null"));
            }
            Type::Vector(element) => {
                output.push('(');
                if matches!(element.as_ref(), Type::Struct(_)) {
                    output.push_str(&format!("{type_name} obj, "));
                    getter = "obj.__init".to_string();
                }
                output.push_str(&format!("int j){offset_prefix}{getter}("));
                let index = format!("__vector(o) + j * {}", ir.inline_size(element));
                match element.as_ref() {
                    Type::Struct(id) => {
                        if ir.struct_def(*id).fixed {
                            output.push_str(&index);
                        } else {
                            output.push_str(&format!("__indirect({index})"));
                        }
                        output.push_str(", bb");
                    }
                    _ => output.push_str(&index),
                }
                output.push_str(&format!("){dest_mask} : "));
                if element.is_bool() {
                    output.push_str("false");
                } else if element.is_scalar() {
                    output.push_str(&format!("{default_cast}0"));
                } else {
                    output.push_str("null");
                }
            }
            Type::Union(_) => {
                output.push_str(&format!(
                    "({type_name} obj){offset_prefix}{getter}(obj, o) : null"
                ));
            }
        }
        output.push_str(&format!("; {member_suffix}}}\n"));

        if field.ty.is_vector() {
            output.push_str(&format!(
                "  public int {camel}Length{}{offset_prefix}__vector_len(o) : 0; {}}}\n",
                p.getter_prefix, p.getter_suffix
            ));
        }
        output.push_str(&self.byte_range_accessors(field, &camel));

        if let Type::Union(union_id) = &field.ty {
            let enums = EnumEmitter::new(self.mapper);
            output.push_str(&enums.emit_union_accessors(field, ir.enum_def(*union_id)));
        }

        if let Some(nested) = &field.nested_buffer {
            output.push_str(&self.nested_accessor(def, field, nested, &camel));
        }

        if self.mutable_buffer {
            output.push_str(&self.mutator(def, field));
        }

        if field.ty.is_scalar() && !def.fixed {
            output.push_str(&format!(
                "  public {}{}{}Specified{} {{ return __offset({}) != 0; {}}}\n",
                p.bool_type,
                p.function_name('I', "s"),
                make_camel(&field.name, true),
                p.getter_prefix,
                field.offset,
                p.getter_suffix
            ));
        }

        Ok(output)
    }

    /// Zero-copy views of the bytes behind strings and scalar vectors.
    fn byte_range_accessors(&self, field: &FieldDef, camel: &str) -> String {
        let mut output = String::new();
        let element_size = match &field.ty {
            Type::String => 1,
            Type::Vector(element) if element.is_scalar() => {
                self.mapper.ir().inline_size(element)
            }
            _ => return output,
        };

        if self.mapper.profile().buffer_segments {
            output.push_str(&format!(
                "  public ArraySegment<byte>? Get{camel}Bytes() {{ return __vector_as_arraysegment({}); }}\n",
                field.offset
            ));
            output.push_str(&format!(
                "  public ByteBufferSegment? Get{camel}BufferSegment() {{ return __vector_as_bytebuffersegment({}); }}\n",
                field.offset
            ));
        } else {
            output.push_str(&format!(
                "  public ByteBuffer {camel}AsByteBuffer() {{ return __vector_as_bytebuffer({}, {element_size}); }}\n",
                field.offset
            ));
        }
        output
    }

    /// Accessors reading the field's bytes as the root of another buffer.
    fn nested_accessor(
        &self,
        def: &StructDef,
        field: &FieldDef,
        nested: &NestedBuffer,
        camel: &str,
    ) -> String {
        let ir = self.mapper.ir();
        let Some(nested_id) = resolve_nested_buffer(ir, self.mapper.namespace(), nested) else {
            tracing::debug!(
                "No nested buffer type {:?} for field {}.{}, accessor omitted",
                nested,
                def.name,
                field.name
            );
            return String::new();
        };

        let nested_def = ir.struct_def(nested_id);
        let nested_name = self.mapper.struct_name(nested_def);
        let method_name = format!("{camel}As{}", nested_def.name);
        let get_method_name = if self.mapper.profile().property_accessors {
            format!("Get{method_name}")
        } else {
            method_name.clone()
        };

        let mut output = format!(
            "  public {nested_name} {method_name}() {{ return {get_method_name}(new {nested_name}()); }}\n"
        );
        output.push_str(&format!(
            "  public {nested_name} {get_method_name}({nested_name} obj) {{ int o = __offset({}); return o != 0 ? obj.__init(__indirect(__vector(o)), bb) : null; }}\n",
            field.offset
        ));
        output
    }

    /// In-place writers for scalars and scalar vector elements.
    ///
    /// Table mutators report whether the field had a slot to write into.
    fn mutator(&self, def: &StructDef, field: &FieldDef) -> String {
        let m = &self.mapper;
        let p = m.profile();
        let underlying = field.ty.element().unwrap_or(&field.ty);
        if !underlying.is_scalar() {
            return String::new();
        }

        let parameter = if underlying.is_bool() {
            format!("(byte)({} ? 1 : 0)", field.name)
        } else {
            field.name.clone()
        };
        let params = format!(
            "{}{} {}) {{ ",
            if field.ty.is_vector() { "(int j, " } else { "(" },
            m.type_name_dest(underlying),
            field.name
        );
        let index = if field.ty.is_vector() {
            format!("__vector(o) + j * {}", m.ir().inline_size(underlying))
        } else if def.fixed {
            format!("bb_pos + {}", field.offset)
        } else {
            "o + bb_pos".to_string()
        };
        let setter = m.setter(underlying);
        let src_cast = m.source_cast(&field.ty, true);

        let mut output = format!(
            "  public {}{}{}{params}",
            if def.fixed { "void " } else { p.bool_type },
            make_camel("mutate", p.first_camel_upper),
            make_camel(&field.name, true)
        );
        if def.fixed {
            output.push_str(&format!("{setter}({index}, {src_cast}{parameter}); }}\n"));
        } else {
            output.push_str(&format!(
                "int o = __offset({}); if (o != 0) {{ {setter}({index}, {src_cast}{parameter}); return true; }} else {{ return false; }} }}\n",
                field.offset
            ));
        }
        output
    }

    /// Single recursive constructor of a fixed struct.
    fn struct_constructor(&self, def: &StructDef) -> String {
        let m = &self.mapper;
        let p = m.profile();
        let mut output = format!(
            "  public static {} {}{}(FlatBufferBuilder builder",
            m.offset_type(def),
            p.function_name('C', "reate"),
            def.name
        );
        output.push_str(&self.struct_args(def, ""));
        output.push_str(") {\n");
        output.push_str(&self.struct_body(def, ""));
        output.push_str(&format!(
            "    return {};\n  }}\n",
            m.offset_construct(def, &format!("builder.{}", p.get_fbb_offset))
        ));
        output
    }

    /// Flattened parameters; nested struct fields are prefixed with the field name.
    fn struct_args(&self, def: &StructDef, prefix: &str) -> String {
        let m = &self.mapper;
        let mut output = String::new();
        for field in &def.fields {
            match &field.ty {
                Type::Struct(id) if m.ir().is_fixed_struct(&field.ty) => {
                    let nested_prefix = format!("{prefix}{}_", field.name);
                    output.push_str(&self.struct_args(m.ir().struct_def(*id), &nested_prefix));
                }
                _ => {
                    output.push_str(&format!(
                        ", {} {prefix}{}",
                        m.basic_type_name(&m.destination_type(&field.ty, false), true),
                        make_camel(&field.name, m.profile().first_camel_upper)
                    ));
                }
            }
        }
        output
    }

    /// Writes fields back to front, each preceded by its padding.
    fn struct_body(&self, def: &StructDef, prefix: &str) -> String {
        let m = &self.mapper;
        let p = m.profile();
        let mut output = format!(
            "    builder.{}({}, {});\n",
            p.function_name('P', "rep"),
            def.minalign,
            def.bytesize
        );
        for field in def.fields.iter().rev() {
            if field.padding > 0 {
                output.push_str(&format!(
                    "    builder.{}({});\n",
                    p.function_name('P', "ad"),
                    field.padding
                ));
            }
            match &field.ty {
                Type::Struct(id) if m.ir().is_fixed_struct(&field.ty) => {
                    let nested_prefix = format!("{prefix}{}_", field.name);
                    output.push_str(&self.struct_body(m.ir().struct_def(*id), &nested_prefix));
                }
                _ => {
                    output.push_str(&format!(
                        "    builder.{}{}({}{prefix}{});\n",
                        p.function_name('P', "ut"),
                        m.method(&field.ty),
                        m.source_cast(&field.ty, true),
                        make_camel(&field.name, p.first_camel_upper)
                    ));
                }
            }
        }
        output
    }

    /// Create, start/add/end and vector builder functions of a table.
    fn table_constructors(&self, def: &StructDef) -> String {
        let mut output = String::new();
        let m = &self.mapper;
        let p = m.profile();
        let ir = m.ir();

        let has_struct_fields = def.active_fields().any(|f| ir.is_fixed_struct(&f.ty));
        let num_fields = def.active_fields().count();
        if !has_struct_fields && num_fields > 0 {
            output.push_str(&self.table_create(def));
        }

        let start_object = p.function_name('S', "tartObject");
        output.push_str(&format!(
            "  public static void {}{}(FlatBufferBuilder builder) {{ builder.{start_object}({}); }}\n",
            p.function_name('S', "tart"),
            def.name,
            def.fields.len()
        ));

        for field in def.active_fields() {
            let arg_name = offset_arg_name(field, &make_camel(&field.name, false));
            let value_suffix =
                if !field.ty.is_scalar() && !field.ty.is_union() && p.typed_offsets {
                    ".Value"
                } else {
                    ""
                };
            output.push_str(&format!(
                "  public static void {}{}(FlatBufferBuilder builder, {} {arg_name}) {{ builder.{}{}({}, {}{arg_name}{value_suffix}, {}); }}\n",
                p.function_name('A', "dd"),
                make_camel(&field.name, true),
                m.basic_type_name(&m.destination_type(&field.ty, false), true),
                p.function_name('A', "dd"),
                m.method(&field.ty),
                field.slot,
                m.source_cast_basic(&field.ty, true),
                m.default_value(field, false)
            ));
            if let Type::Vector(element) = &field.ty {
                output.push_str(&self.vector_builders(field, element));
            }
        }

        let reuse_param = if p.default_arguments {
            ", bool enableVtableReuse = true"
        } else {
            ""
        };
        let reuse_arg = if p.default_arguments {
            "enableVtableReuse"
        } else {
            ""
        };
        output.push_str(&format!(
            "  public static {} {}{}(FlatBufferBuilder builder{reuse_param}) {{\n    int o = builder.{}({reuse_arg});\n",
            m.offset_type(def),
            p.function_name('E', "nd"),
            def.name,
            p.function_name('E', "ndObject")
        ));
        for field in def.active_fields().filter(|f| f.required) {
            output.push_str(&format!(
                "    builder.{}(o, {});  // {}\n",
                p.function_name('R', "equired"),
                field.offset,
                field.name
            ));
        }
        output.push_str(&format!(
            "    return {};\n  }}\n",
            m.offset_construct(def, "o")
        ));
        output
    }

    /// Single-call table constructor.
    ///
    /// With `sortbysize`, fields are added largest size class first and in
    /// reverse declaration order within a class; otherwise in reverse order.
    fn table_create(&self, def: &StructDef) -> String {
        let m = &self.mapper;
        let p = m.profile();
        let ir = m.ir();

        let mut output = format!(
            "  public static {} {}{}(FlatBufferBuilder builder",
            m.offset_type(def),
            p.function_name('C', "reate"),
            def.name
        );
        for field in def.active_fields() {
            output.push_str(&format!(
                ",\n      {} {}",
                m.basic_type_name(&m.destination_type(&field.ty, false), true),
                offset_arg_name(field, &field.name)
            ));
            if p.default_arguments {
                output.push_str(&format!(" = {}", m.default_value_basic(field, true)));
            }
        }
        if p.default_arguments {
            output.push_str(",\n      bool enableVtableReuse = true");
        }
        output.push_str(&format!(
            ") {{\n    builder.{}({});\n",
            p.function_name('S', "tartObject"),
            def.fields.len()
        ));

        let size_classes: &[usize] = if def.sortbysize { &[8, 4, 2, 1] } else { &[0] };
        for &size in size_classes {
            for field in def.fields.iter().rev() {
                if field.deprecated || (def.sortbysize && ir.size_class(&field.ty) != size) {
                    continue;
                }
                output.push_str(&format!(
                    "    {}.{}{}(builder, {});\n",
                    def.name,
                    p.function_name('A', "dd"),
                    make_camel(&field.name, true),
                    offset_arg_name(field, &field.name)
                ));
            }
        }

        output.push_str(&format!(
            "    return {}.{}{}(builder{});\n  }}\n\n",
            def.name,
            p.function_name('E', "nd"),
            def.name,
            if p.default_arguments {
                ", enableVtableReuse"
            } else {
                ""
            }
        ));
        output
    }

    /// `Create<Field>Vector` overloads and `Start<Field>Vector`.
    fn vector_builders(&self, field: &FieldDef, element: &Type) -> String {
        let mut output = String::new();
        let m = &self.mapper;
        let p = m.profile();
        let ir = m.ir();
        let field_camel = make_camel(&field.name, true);
        let alignment = ir.inline_alignment(element);
        let element_size = ir.inline_size(element);

        if !ir.is_fixed_struct(element) {
            let element_name = m.basic_type_name(element, true);
            let mut list_kinds = vec![(format!("{element_name}[]"), "Length", true)];
            if p.collection_builders {
                list_kinds.push((format!("List<{element_name}>"), "Count", false));
                list_kinds.push((format!("IList<{element_name}>"), "Count", false));
            }

            for (list_type, length_property, is_array) in list_kinds {
                output.push_str(&format!(
                    "  public static {} {}{field_camel}Vector(FlatBufferBuilder builder, {list_type} data) {{ ",
                    m.vector_offset_type(),
                    p.function_name('C', "reate")
                ));
                let length = format!(
                    "data.{}",
                    make_camel(length_property, p.first_camel_upper)
                );
                if p.collection_builders && element.is_scalar() && !element.is_enum() && is_array {
                    output.push_str(&format!(
                        "return builder.Create{}Vector(data, 0, {length});",
                        m.method(element)
                    ));
                } else {
                    let value_suffix = if p.typed_offsets
                        && matches!(element, Type::Struct(_) | Type::String)
                    {
                        ".Value"
                    } else {
                        ""
                    };
                    output.push_str(&format!(
                        "builder.{}({element_size}, {length}, {alignment}); for (int i = {length} - 1; i >= 0; i--) builder.{}{}({}data[i]{value_suffix}); return builder.{}();",
                        p.function_name('S', "tartVector"),
                        p.function_name('A', "dd"),
                        m.method(element),
                        m.source_cast_basic(element, false),
                        p.function_name('E', "ndVector")
                    ));
                }
                output.push_str(" }\n");
            }
        }

        output.push_str(&format!(
            "  public static void {}{field_camel}Vector(FlatBufferBuilder builder, int numElems) {{ builder.{}({element_size}, numElems, {alignment}); }}\n",
            p.function_name('S', "tart"),
            p.function_name('S', "tartVector")
        ));
        output
    }

    /// Finish helper of the root table, threading the file identifier.
    fn finish(&self, def: &StructDef) -> String {
        let m = &self.mapper;
        let p = m.profile();
        let mut output = format!(
            "  public static void {}{}Buffer(FlatBufferBuilder builder, {} offset) {{ builder.{}(offset",
            p.function_name('F', "inish"),
            def.name,
            m.offset_type(def),
            p.function_name('F', "inish")
        );
        if p.typed_offsets {
            output.push_str(".Value");
        }
        if let Some(identifier) = m.ir().file_identifier.as_deref() {
            output.push_str(&format!(", \"{identifier}\""));
        }
        output.push_str("); }\n");
        output
    }
}

/// Non-scalar builder arguments carry an `Offset` suffix.
fn offset_arg_name(field: &FieldDef, base: &str) -> String {
    if field.ty.is_scalar() {
        base.to_string()
    } else {
        format!("{base}Offset")
    }
}

/// Rejects vectors of unions and vectors of vectors.
pub(crate) fn check_representable(def: &StructDef, field: &FieldDef) -> Result<(), CodegenError> {
    match field.ty.element() {
        Some(Type::Union(_)) => Err(CodegenError::unrepresentable(
            &def.name,
            &field.name,
            "vectors of unions have no accessor form",
        )),
        Some(Type::Vector(_)) => Err(CodegenError::unrepresentable(
            &def.name,
            &field.name,
            "vectors of vectors have no accessor form",
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{CSHARP, JAVA, LanguageProfile};
    use ironfb_schema::{EnumDef, Namespace, ScalarKind, SchemaIr};

    fn emit(ir: &SchemaIr, profile: &LanguageProfile, id: StructId, mutable: bool) -> String {
        let ns = ir.struct_def(id).namespace.clone();
        StructEmitter::new(TypeMapper::new(ir, profile, &ns), mutable)
            .emit(id)
            .expect("Failed to emit declaration")
    }

    fn padded_ir() -> (SchemaIr, StructId) {
        let mut ir = SchemaIr::new();
        let id = ir.add_struct(
            StructDef::fixed("Padded", Namespace::ROOT, 8, 4)
                .with_field(FieldDef::new("a", Type::scalar(ScalarKind::Int32)))
                .with_field(
                    FieldDef::new("b", Type::scalar(ScalarKind::Int16))
                        .with_offset(4)
                        .with_padding(2),
                ),
        );
        (ir, id)
    }

    #[test]
    fn test_fixed_struct_padding_order() {
        let (ir, id) = padded_ir();
        let code = emit(&ir, &JAVA, id, false);
        assert!(code.contains(
            "  public static int createPadded(FlatBufferBuilder builder, int a, short b) {\n\
             \x20   builder.prep(4, 8);\n\
             \x20   builder.pad(2);\n\
             \x20   builder.putShort(b);\n\
             \x20   builder.putInt(a);\n\
             \x20   return builder.offset();\n\
             \x20 }\n"
        ));
    }

    #[test]
    fn test_fixed_struct_accessors() {
        let (ir, id) = padded_ir();
        let code = emit(&ir, &JAVA, id, true);
        assert!(code.starts_with("public final class Padded extends Struct {\n"));
        assert!(code.contains(
            "  public Padded __init(int _i, ByteBuffer _bb) { bb_pos = _i; bb = _bb; return this; }\n\n"
        ));
        assert!(code.contains("  public int a() { return bb.getInt(bb_pos + 0); }\n"));
        assert!(code.contains("  public short b() { return bb.getShort(bb_pos + 4); }\n"));
        assert!(code.contains("  public void mutateB(short b) { bb.putShort(bb_pos + 4, b); }\n"));
        assert!(!code.contains("getRootAs"));
        assert!(!code.contains("Specified"));
        assert!(code.ends_with("};\n\n"));
    }

    #[test]
    fn test_nested_struct_constructor_flattens_arguments() {
        let mut ir = SchemaIr::new();
        let inner = ir.add_struct(
            StructDef::fixed("Inner", Namespace::ROOT, 2, 1)
                .with_field(FieldDef::new("x", Type::scalar(ScalarKind::Int8)))
                .with_field(FieldDef::new("y", Type::scalar(ScalarKind::UInt8)).with_offset(1)),
        );
        let outer = ir.add_struct(
            StructDef::fixed("Outer", Namespace::ROOT, 4, 2)
                .with_field(FieldDef::new("id", Type::scalar(ScalarKind::Int16)))
                .with_field(FieldDef::new("inner", Type::Struct(inner)).with_offset(2)),
        );
        let code = emit(&ir, &JAVA, outer, false);
        assert!(code.contains(
            "  public static int createOuter(FlatBufferBuilder builder, short id, byte inner_x, int inner_y) {\n\
             \x20   builder.prep(2, 4);\n\
             \x20   builder.prep(1, 2);\n\
             \x20   builder.putByte((byte)inner_y);\n\
             \x20   builder.putByte(inner_x);\n\
             \x20   builder.putShort(id);\n"
        ));
        assert!(code.contains(
            "  public Inner inner() { return inner(new Inner()); }\n\
             \x20 public Inner inner(Inner obj) { return obj.__init(bb_pos + 2, bb); }\n"
        ));
    }

    fn sized_table() -> (SchemaIr, StructId) {
        let mut ir = SchemaIr::new();
        let mut table = StructDef::table("Sized", Namespace::ROOT)
            .with_field(FieldDef::new("small", Type::scalar(ScalarKind::UInt8)))
            .with_field(FieldDef::new("large", Type::scalar(ScalarKind::UInt32)))
            .with_field(FieldDef::new("medium", Type::scalar(ScalarKind::UInt16)));
        table.assign_vtable_slots();
        let id = ir.add_struct(table);
        (ir, id)
    }

    #[test]
    fn test_sortbysize_add_order() {
        let (ir, id) = sized_table();
        let code = emit(&ir, &JAVA, id, false);
        assert!(code.contains(
            "  public static int createSized(FlatBufferBuilder builder,\n\
             \x20     int small,\n\
             \x20     long large,\n\
             \x20     int medium) {\n\
             \x20   builder.startObject(3);\n\
             \x20   Sized.addLarge(builder, large);\n\
             \x20   Sized.addMedium(builder, medium);\n\
             \x20   Sized.addSmall(builder, small);\n\
             \x20   return Sized.endSized(builder);\n\
             \x20 }\n\n"
        ));
    }

    #[test]
    fn test_unsorted_add_order_is_reverse() {
        let (mut ir, id) = sized_table();
        ir.struct_def_mut(id).sortbysize = false;
        let code = emit(&ir, &JAVA, id, false);
        let medium = code.find("Sized.addMedium").expect("Failed to find medium");
        let large = code.find("Sized.addLarge").expect("Failed to find large");
        let small = code.find("Sized.addSmall").expect("Failed to find small");
        assert!(medium < large && large < small);
    }

    #[test]
    fn test_table_scalar_accessors_java() {
        let (ir, id) = sized_table();
        let code = emit(&ir, &JAVA, id, true);
        assert!(code.contains(
            "  public long large() { int o = __offset(6); return o != 0 ? (long)bb.getInt(o + bb_pos) & 0xFFFFFFFFL : 0; }\n"
        ));
        assert!(code.contains(
            "  public int small() { int o = __offset(4); return o != 0 ? bb.get(o + bb_pos) & 0xFF : 0; }\n"
        ));
        assert!(code.contains(
            "  public boolean mutateLarge(long large) { int o = __offset(6); if (o != 0) { bb.putInt(o + bb_pos, (int)large); return true; } else { return false; } }\n"
        ));
        assert!(code.contains(
            "  public boolean isLargeSpecified() { return __offset(6) != 0; }\n"
        ));
        assert!(code.contains(
            "  public static void addLarge(FlatBufferBuilder builder, long large) { builder.addInt(1, (int)large, 0); }\n"
        ));
    }

    #[test]
    fn test_absent_field_returns_default() {
        let mut ir = SchemaIr::new();
        let mut table = StructDef::table("Stat", Namespace::ROOT).with_field(
            FieldDef::new("count", Type::scalar(ScalarKind::Int16)).with_default("7"),
        );
        table.assign_vtable_slots();
        let id = ir.add_struct(table);

        let java = emit(&ir, &JAVA, id, false);
        assert!(java.contains("return o != 0 ? bb.getShort(o + bb_pos) : 7; }\n"));
        assert!(java.contains("  public boolean isCountSpecified() { return __offset(4) != 0; }\n"));

        let csharp = emit(&ir, &CSHARP, id, false);
        assert!(csharp.contains(
            "  public short Count { get { int o = __offset(4); return o != 0 ? bb.GetShort(o + bb_pos) : (short)7; } }\n"
        ));
        assert!(csharp.contains(
            "  public bool IsCountSpecified { get { return __offset(4) != 0; } }\n"
        ));
    }

    #[test]
    fn test_struct_fields_suppress_create() {
        let mut ir = SchemaIr::new();
        let vec3 = ir.add_struct(StructDef::fixed("Vec3", Namespace::ROOT, 12, 4));
        let mut table = StructDef::table("Monster", Namespace::ROOT)
            .with_field(FieldDef::new("pos", Type::Struct(vec3)))
            .with_field(FieldDef::new("hp", Type::scalar(ScalarKind::Int16)));
        table.assign_vtable_slots();
        let id = ir.add_struct(table);
        let code = emit(&ir, &JAVA, id, false);
        assert!(!code.contains("createMonster"));
        assert!(code.contains("  public static void startMonster(FlatBufferBuilder builder) { builder.startObject(2); }\n"));
        assert!(code.contains(
            "  public Vec3 pos(Vec3 obj) { int o = __offset(4); return o != 0 ? obj.__init(o + bb_pos, bb) : null; }\n"
        ));
        assert!(code.contains(
            "  public static void addPos(FlatBufferBuilder builder, int posOffset) { builder.addStruct(0, posOffset, 0); }\n"
        ));
    }

    #[test]
    fn test_empty_table_has_no_create() {
        let mut ir = SchemaIr::new();
        let id = ir.add_struct(StructDef::table("Empty", Namespace::ROOT));
        let code = emit(&ir, &JAVA, id, false);
        assert!(!code.contains("createEmpty"));
        assert!(code.contains("  public static int endEmpty(FlatBufferBuilder builder) {\n"));
    }

    #[test]
    fn test_deprecated_field_is_suppressed() {
        let mut ir = SchemaIr::new();
        let mut table = StructDef::table("Monster", Namespace::ROOT)
            .with_field(FieldDef::new("hp", Type::scalar(ScalarKind::Int16)))
            .with_field(FieldDef::new("friendly", Type::scalar(ScalarKind::Bool)).deprecated());
        table.assign_vtable_slots();
        let id = ir.add_struct(table);
        let code = emit(&ir, &JAVA, id, true);
        assert!(!code.contains("friendly"));
        assert!(!code.contains("Friendly"));
        assert!(code.contains("builder.startObject(2)"));
    }

    #[test]
    fn test_required_check_in_end() {
        let mut ir = SchemaIr::new();
        let mut table = StructDef::table("Named", Namespace::ROOT)
            .with_field(FieldDef::new("name", Type::String).required());
        table.assign_vtable_slots();
        let id = ir.add_struct(table);
        let code = emit(&ir, &JAVA, id, false);
        assert!(code.contains(
            "  public static int endNamed(FlatBufferBuilder builder) {\n\
             \x20   int o = builder.endObject();\n\
             \x20   builder.required(o, 4);  // name\n\
             \x20   return o;\n\
             \x20 }\n"
        ));
    }

    #[test]
    fn test_root_identifier_and_finish() {
        let mut ir = SchemaIr::new();
        let mut table = StructDef::table("Monster", Namespace::ROOT)
            .with_field(FieldDef::new("hp", Type::scalar(ScalarKind::Int16)));
        table.assign_vtable_slots();
        let id = ir.add_struct(table);
        ir.set_root(id);
        ir.set_file_identifier("MONS");

        let java = emit(&ir, &JAVA, id, false);
        assert!(java.contains(
            "  public static Monster getRootAsMonster(ByteBuffer _bb, Monster obj) { _bb.order(ByteOrder.LITTLE_ENDIAN); return (obj.__init(_bb.getInt(_bb.position()) + _bb.position(), _bb)); }\n"
        ));
        assert!(java.contains(
            "  public static boolean MonsterBufferHasIdentifier(ByteBuffer _bb) { return __has_identifier(_bb, \"MONS\"); }\n"
        ));
        assert!(java.contains(
            "  public static void finishMonsterBuffer(FlatBufferBuilder builder, int offset) { builder.finish(offset, \"MONS\"); }\n"
        ));

        let csharp = emit(&ir, &CSHARP, id, false);
        assert!(csharp.contains(
            "  public static Monster GetRootAsMonster(ByteBufferSegment bbs, Monster obj) { return (obj.__init(bbs.ByteBuffer.GetInt(bbs.Offset) + bbs.Offset, bbs.ByteBuffer)); }\n"
        ));
        assert!(csharp.contains(
            "  public static void FinishMonsterBuffer(FlatBufferBuilder builder, Offset<Monster> offset) { builder.Finish(offset.Value, \"MONS\"); }\n"
        ));
    }

    #[test]
    fn test_vector_accessors_and_builders() {
        let mut ir = SchemaIr::new();
        let mut table = StructDef::table("Bag", Namespace::ROOT)
            .with_field(FieldDef::new("inventory", Type::vector(Type::scalar(ScalarKind::UInt8))))
            .with_field(FieldDef::new("names", Type::vector(Type::String)));
        table.assign_vtable_slots();
        let id = ir.add_struct(table);

        let java = emit(&ir, &JAVA, id, true);
        assert!(java.contains(
            "  public int inventory(int j) { int o = __offset(4); return o != 0 ? bb.get(__vector(o) + j * 1) & 0xFF : 0; }\n"
        ));
        assert!(java.contains(
            "  public int inventoryLength() { int o = __offset(4); return o != 0 ? __vector_len(o) : 0; }\n"
        ));
        assert!(java.contains(
            "  public ByteBuffer inventoryAsByteBuffer() { return __vector_as_bytebuffer(4, 1); }\n"
        ));
        assert!(java.contains(
            "  public boolean mutateInventory(int j, int inventory) { int o = __offset(4); if (o != 0) { bb.put(__vector(o) + j * 1, (byte)inventory); return true; } else { return false; } }\n"
        ));
        assert!(java.contains(
            "  public static int createInventoryVector(FlatBufferBuilder builder, byte[] data) { builder.startVector(1, data.length, 1); for (int i = data.length - 1; i >= 0; i--) builder.addByte(data[i]); return builder.endVector(); }\n"
        ));
        assert!(java.contains(
            "  public static void startNamesVector(FlatBufferBuilder builder, int numElems) { builder.startVector(4, numElems, 4); }\n"
        ));
        assert!(java.contains(
            "  public String names(int j) { int o = __offset(6); return o != 0 ? __string(__vector(o) + j * 4) : null; }\n"
        ));

        let csharp = emit(&ir, &CSHARP, id, false);
        assert!(csharp.contains(
            "  public static VectorOffset CreateInventoryVector(FlatBufferBuilder builder, byte[] data) { return builder.CreateByteVector(data, 0, data.Length); }\n"
        ));
        assert!(csharp.contains(
            "  public static VectorOffset CreateNamesVector(FlatBufferBuilder builder, List<StringOffset> data) { builder.StartVector(4, data.Count, 4); for (int i = data.Count - 1; i >= 0; i--) builder.AddOffset(data[i].Value); return builder.EndVector(); }\n"
        ));
        assert!(csharp.contains(
            "  public byte GetInventory(int j) { int o = __offset(4); return o != 0 ? bb.Get(__vector(o) + j * 1) : (byte)0; }\n"
        ));
        assert!(csharp.contains("  public ArraySegment<byte>? GetInventoryBytes() { return __vector_as_arraysegment(4); }\n"));
    }

    #[test]
    fn test_union_field_accessors() {
        let mut ir = SchemaIr::new();
        let weapon = ir.add_struct(StructDef::table("Weapon", Namespace::ROOT));
        let any = ir.add_enum(EnumDef::union("Any", Namespace::ROOT).with_variant("Weapon", weapon));
        let mut table = StructDef::table("Hero", Namespace::ROOT)
            .with_field(FieldDef::new("equipped_type", Type::enumeration(ScalarKind::UInt8, any)))
            .with_field(FieldDef::new("equipped", Type::Union(any)));
        table.assign_vtable_slots();
        let id = ir.add_struct(table);

        let java = emit(&ir, &JAVA, id, false);
        assert!(java.contains(
            "  public Table equipped(Table obj) { int o = __offset(6); return o != 0 ? __union(obj, o) : null; }\n"
        ));
        assert!(java.contains("  public Weapon equippedAsWeapon() { return equippedAsWeapon(new Weapon()); }\n"));

        let csharp = emit(&ir, &CSHARP, id, false);
        assert!(csharp.contains(
            "  public TTable GetEquipped<TTable>(TTable obj) where TTable : Table { int o = __offset(6); return o != 0 ? __union(obj, o) : null; }\n"
        ));
        assert!(csharp.contains(
            "  public Any EquippedType { get { int o = __offset(4); return o != 0 ? (Any)bb.Get(o + bb_pos) : Any.NONE; } }\n"
        ));
        assert!(csharp.contains(
            "  public static void AddEquipped(FlatBufferBuilder builder, int equippedOffset) { builder.AddOffset(1, equippedOffset, 0); }\n"
        ));
    }

    #[test]
    fn test_nested_buffer_resolution() {
        let mut ir = SchemaIr::new();
        let ns = Namespace::parse("Game.Example");
        let inner = ir.add_struct(StructDef::table("Inner", Namespace::parse("Game")));
        let mut table = StructDef::table("Outer", ns.clone())
            .with_field(
                FieldDef::new("payload", Type::vector(Type::scalar(ScalarKind::UInt8)))
                    .with_nested_buffer(NestedBuffer::Named("Inner".to_string())),
            )
            .with_field(
                FieldDef::new("missing", Type::vector(Type::scalar(ScalarKind::UInt8)))
                    .with_nested_buffer(NestedBuffer::Named("Nowhere".to_string())),
            );
        table.assign_vtable_slots();
        let id = ir.add_struct(table);
        assert_eq!(ir.lookup_struct("Game.Inner"), Some(inner));

        let java = emit(&ir, &JAVA, id, false);
        assert!(java.contains(
            "  public Game.Inner payloadAsInner() { return payloadAsInner(new Game.Inner()); }\n\
             \x20 public Game.Inner payloadAsInner(Game.Inner obj) { int o = __offset(4); return o != 0 ? obj.__init(__indirect(__vector(o)), bb) : null; }\n"
        ));
        assert!(!java.contains("missingAs"));
    }

    #[test]
    fn test_partial_class_header() {
        let mut ir = SchemaIr::new();
        let id = ir.add_struct(StructDef::table("Ext", Namespace::ROOT).with_partial());
        assert!(emit(&ir, &CSHARP, id, false).starts_with("public partial class Ext : Table {\n"));
        assert!(emit(&ir, &JAVA, id, false).starts_with("public final class Ext extends Table {\n"));
    }

    #[test]
    fn test_vector_of_vector_is_unrepresentable() {
        let mut ir = SchemaIr::new();
        let id = ir.add_struct(StructDef::table("Grid", Namespace::ROOT).with_field(FieldDef::new(
            "cells",
            Type::vector(Type::vector(Type::scalar(ScalarKind::UInt8))),
        )));
        let ns = Namespace::ROOT;
        let err = StructEmitter::new(TypeMapper::new(&ir, &JAVA, &ns), false)
            .emit(id)
            .expect_err("Expected unrepresentable field");
        assert!(matches!(err, CodegenError::Unrepresentable { .. }));
    }

    #[test]
    fn test_fragments_compose_in_phase_order() {
        let (ir, id) = sized_table();
        let ns = Namespace::ROOT;
        let fragments = StructEmitter::new(TypeMapper::new(&ir, &JAVA, &ns), false)
            .fragments(id)
            .expect("Failed to render fragments");
        assert!(fragments.header.starts_with("public final class Sized"));
        assert!(fragments.root_access.contains("getRootAsSized"));
        assert!(fragments.init.contains("__init"));
        assert!(fragments.accessors.contains("public int medium()"));
        assert!(fragments.constructors.contains("createSized"));
        assert_eq!(
            fragments.assemble(),
            emit(&ir, &JAVA, id, false)
        );
    }
}
