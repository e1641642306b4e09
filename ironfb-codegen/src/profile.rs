//! Declarative per-language syntax profiles.
//!
//! Every language-specific decision made by the emitters is a field of
//! [`LanguageProfile`]: either a syntax token spliced into the output or a
//! capability flag selecting between two renderings. Adding a target is a
//! matter of adding a table.

use crate::naming::CommentStyle;
use ironfb_schema::ScalarKind;

/// Spellings of the offset types passed to builder calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetNames {
    /// Offset of a string.
    pub string: &'static str,
    /// Offset of a vector.
    pub vector: &'static str,
    /// Offset of a struct or table.
    pub table: &'static str,
    /// Offset of a union value.
    pub union: &'static str,
}

/// Syntax knobs and capabilities of a target language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageProfile {
    /// Human readable language name.
    pub name: &'static str,
    /// Method names start with an upper-case letter.
    pub first_camel_upper: bool,
    /// Source file extension, including the dot.
    pub file_extension: &'static str,
    /// Spelling of the string type.
    pub string_type: &'static str,
    /// Spelling of the boolean type, with a trailing space.
    pub bool_type: &'static str,
    /// Opening brace of a type body.
    pub open_curly: &'static str,
    /// Constant modifier for enum members.
    pub const_decl: &'static str,
    /// Modifier preventing subclassing.
    pub unsubclassable_decl: &'static str,
    /// Keyword introducing an enum declaration.
    pub enum_decl: &'static str,
    /// Separator after each enum member.
    pub enum_separator: &'static str,
    /// Text after an accessor name (`()` or ` { get`).
    pub getter_prefix: &'static str,
    /// Text closing a property accessor.
    pub getter_suffix: &'static str,
    /// Token introducing a base class.
    pub inheritance_marker: &'static str,
    /// Keyword introducing a namespace.
    pub namespace_ident: &'static str,
    /// Text opening a namespace.
    pub namespace_begin: &'static str,
    /// Text closing a namespace.
    pub namespace_end: &'static str,
    /// Statement forcing little-endian byte order on a buffer.
    pub set_bb_byteorder: &'static str,
    /// Buffer member returning the read position.
    pub get_bb_position: &'static str,
    /// Builder member returning the current offset.
    pub get_fbb_offset: &'static str,
    /// Runtime imports placed before struct and table declarations.
    pub includes: &'static str,
    /// Documentation comment delimiters.
    pub comment_style: CommentStyle,
    /// Storage type names indexed like [`ScalarKind::ALL`].
    pub scalar_names: [&'static str; 11],
    /// Storage type names of offsets.
    pub offset_names: OffsetNames,
    /// Base type returned by a generic union accessor.
    pub union_table_type: &'static str,
    /// Suffix of 64-bit integer literals that do not fit 32 bits.
    pub long_literal_suffix: &'static str,
    /// The language has no unsigned integers; unsigned values are widened.
    pub widens_unsigned: bool,
    /// Enums are native types: fields and defaults use the enum's name.
    pub native_enums: bool,
    /// Enums can be converted to strings natively, so no name table is emitted.
    pub native_enum_to_string: bool,
    /// Offsets are typed wrappers (`Offset<T>`) rather than plain ints.
    pub typed_offsets: bool,
    /// Union accessors are generic over the variant table type.
    pub generic_unions: bool,
    /// Scalar accessors are properties and object accessors are `Get` methods.
    pub property_accessors: bool,
    /// Default literals returned by accessors are cast to the field type.
    pub cast_defaults: bool,
    /// Parameters may declare default values.
    pub default_arguments: bool,
    /// Buffers can be addressed through segments.
    pub buffer_segments: bool,
    /// Classes may be declared partial.
    pub partial_classes: bool,
    /// Lists and bulk scalar arrays can be turned into vectors directly.
    pub collection_builders: bool,
    /// Value-type accessors and vector wrappers are available.
    pub value_types: bool,
}

impl LanguageProfile {
    /// Returns the storage type name of a scalar kind.
    #[must_use]
    pub fn scalar_name(&self, kind: ScalarKind) -> &'static str {
        self.scalar_names[kind as usize]
    }

    /// Returns the first letter of a method name in this language's case.
    #[must_use]
    pub fn function_start(&self, upper: char) -> char {
        if self.first_camel_upper {
            upper
        } else {
            upper.to_ascii_lowercase()
        }
    }

    /// Returns `rest` prefixed with the method-case first letter `upper`.
    #[must_use]
    pub fn function_name(&self, upper: char, rest: &str) -> String {
        let mut name = String::with_capacity(rest.len() + 1);
        name.push(self.function_start(upper));
        name.push_str(rest);
        name
    }
}

/// Java profile.
pub const JAVA: LanguageProfile = LanguageProfile {
    name: "Java",
    first_camel_upper: false,
    file_extension: ".java",
    string_type: "String",
    bool_type: "boolean ",
    open_curly: " {\n",
    const_decl: " final ",
    unsubclassable_decl: "final ",
    enum_decl: "final class ",
    enum_separator: ";\n",
    getter_prefix: "()",
    getter_suffix: "",
    inheritance_marker: " extends ",
    namespace_ident: "package ",
    namespace_begin: ";",
    namespace_end: "",
    set_bb_byteorder: "_bb.order(ByteOrder.LITTLE_ENDIAN); ",
    get_bb_position: "position()",
    get_fbb_offset: "offset()",
    includes: "import java.nio.*;\nimport java.lang.*;\nimport java.util.*;\n\
               import com.google.flatbuffers.*;\n\n@SuppressWarnings(\"unused\")\n",
    comment_style: CommentStyle {
        first_line: Some("/**"),
        content_prefix: Some(" *"),
        last_line: Some(" */"),
    },
    scalar_names: [
        "boolean", "byte", "byte", "short", "short", "int", "int", "long", "long", "float",
        "double",
    ],
    offset_names: OffsetNames {
        string: "int",
        vector: "int",
        table: "int",
        union: "int",
    },
    union_table_type: "Table",
    long_literal_suffix: "L",
    widens_unsigned: true,
    native_enums: false,
    native_enum_to_string: false,
    typed_offsets: false,
    generic_unions: false,
    property_accessors: false,
    cast_defaults: false,
    default_arguments: false,
    buffer_segments: false,
    partial_classes: false,
    collection_builders: false,
    value_types: false,
};

/// C# profile.
pub const CSHARP: LanguageProfile = LanguageProfile {
    name: "C#",
    first_camel_upper: true,
    file_extension: ".cs",
    string_type: "string",
    bool_type: "bool ",
    open_curly: "\n{\n",
    const_decl: " readonly ",
    unsubclassable_decl: "sealed ",
    enum_decl: "enum ",
    enum_separator: ",\n",
    getter_prefix: " { get",
    getter_suffix: "} ",
    inheritance_marker: " : ",
    namespace_ident: "namespace ",
    namespace_begin: "\n{",
    namespace_end: "\n}\n",
    set_bb_byteorder: "",
    get_bb_position: "Position",
    get_fbb_offset: "Offset",
    includes: "using System;\nusing System.Collections.Generic;\nusing FlatBuffers;\n\n",
    comment_style: CommentStyle {
        first_line: None,
        content_prefix: Some("///"),
        last_line: None,
    },
    scalar_names: [
        "bool", "sbyte", "byte", "short", "ushort", "int", "uint", "long", "ulong", "float",
        "double",
    ],
    offset_names: OffsetNames {
        string: "StringOffset",
        vector: "VectorOffset",
        table: "Offset",
        union: "int",
    },
    union_table_type: "TTable",
    long_literal_suffix: "",
    widens_unsigned: false,
    native_enums: true,
    native_enum_to_string: true,
    typed_offsets: true,
    generic_unions: true,
    property_accessors: true,
    cast_defaults: true,
    default_arguments: true,
    buffer_segments: true,
    partial_classes: true,
    collection_builders: true,
    value_types: true,
};
