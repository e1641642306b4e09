//! Enum, name table and union variant accessor generation.

use crate::emit::types::TypeMapper;
use crate::naming::{gen_comment, make_camel};
use ironfb_schema::{EnumDef, FieldDef, Type};

/// Average distance between enum values above which no name table is emitted.
pub const SPARSENESS_THRESHOLD: i128 = 5;

/// Returns true if the enum's values are dense enough for a lookup table.
#[must_use]
pub fn needs_name_table(def: &EnumDef) -> bool {
    match (def.min_value(), def.max_value()) {
        (Some(min), Some(max)) => {
            let range = i128::from(max) - i128::from(min) + 1;
            range / (def.values.len() as i128) < SPARSENESS_THRESHOLD
        }
        _ => false,
    }
}

/// Generator for enum and union declarations.
pub struct EnumEmitter<'a> {
    mapper: TypeMapper<'a>,
}

impl<'a> EnumEmitter<'a> {
    /// Creates a new enum emitter.
    #[must_use]
    pub fn new(mapper: TypeMapper<'a>) -> Self {
        Self { mapper }
    }

    /// Generates an enum declaration, or nothing if it was already generated.
    #[must_use]
    pub fn emit(&self, def: &EnumDef) -> String {
        let mut output = String::new();
        if def.generated {
            return output;
        }
        let p = self.mapper.profile();
        let underlying = self.mapper.basic_type_name(&def.underlying(), false);

        output.push_str(&gen_comment(&def.doc_comment, &p.comment_style, ""));
        output.push_str(&format!("public {}{}", p.enum_decl, def.name));
        if p.native_enums {
            output.push_str(&format!("{}{}", p.inheritance_marker, underlying));
        }
        output.push_str(p.open_curly);
        if !p.native_enums {
            output.push_str(&format!("  private {}() {{ }}\n", def.name));
        }

        for val in &def.values {
            output.push_str(&gen_comment(&val.doc_comment, &p.comment_style, "  "));
            if !p.native_enums {
                output.push_str(&format!("  public static{}{}", p.const_decl, underlying));
            }
            output.push_str(&format!(" {} = {}{}", val.name, val.value, p.enum_separator));
        }

        if !p.native_enum_to_string && needs_name_table(def) {
            output.push_str(&self.emit_name_table(def));
        }

        output.push_str("};\n\n");
        output
    }

    /// Generates a dense value-to-name table, gaps filled with empty strings.
    fn emit_name_table(&self, def: &EnumDef) -> String {
        let mut output = String::new();
        let p = self.mapper.profile();
        let Some(first) = def.values.first() else {
            return output;
        };

        output.push_str(&format!(
            "\n  private static{}{}[] names = {{ ",
            p.const_decl, p.string_type
        ));
        let mut next = i128::from(first.value);
        for val in &def.values {
            let value = i128::from(val.value);
            while next < value {
                output.push_str("\"\", ");
                next += 1;
            }
            output.push_str(&format!("\"{}\", ", val.name));
            next = value + 1;
        }
        output.push_str("};\n\n");

        output.push_str(&format!(
            "  public static {} {}(int e) {{ return names[e",
            p.string_type,
            make_camel("name", p.first_camel_upper)
        ));
        if first.value != 0 {
            output.push_str(&format!(" - {}", first.name));
        }
        output.push_str("]; }\n");
        output
    }

    /// Generates one typed accessor pair per variant of a union field.
    ///
    /// The first value of a union is the reserved "no value" member and gets
    /// no accessor.
    #[must_use]
    pub fn emit_union_accessors(&self, field: &FieldDef, union: &EnumDef) -> String {
        let mut output = String::new();
        let p = self.mapper.profile();
        let camel = make_camel(&field.name, p.first_camel_upper);

        for val in union.values.iter().skip(1) {
            let Some(variant) = val.union_type else {
                continue;
            };
            let type_name = self.mapper.pointer_type_name(&Type::Struct(variant));
            let accessor = format!("{camel}As{}", val.name);
            let cast = if p.generic_unions {
                String::new()
            } else {
                format!("({type_name})")
            };
            let body = format!(
                "({type_name} obj) {{ int o = __offset({}); return o != 0 ? {cast}__union(obj, o) : null; }}\n",
                field.offset
            );

            if p.property_accessors {
                output.push_str(&format!(
                    "  public {type_name} {accessor} {{ get {{ return Get{accessor}(new {type_name}()); }} }}\n"
                ));
                output.push_str(&format!("  public {type_name} Get{accessor}{body}"));
            } else {
                output.push_str(&format!(
                    "  public {type_name} {accessor}() {{ return {accessor}(new {type_name}()); }}\n"
                ));
                output.push_str(&format!("  public {type_name} {accessor}{body}"));
            }
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{CSHARP, JAVA};
    use ironfb_schema::{Namespace, ScalarKind, SchemaIr, StructDef};

    fn color() -> EnumDef {
        EnumDef::new("Color", Namespace::ROOT, ScalarKind::Int8)
            .with_value("Red", 1)
            .with_value("Green", 2)
            .with_value("Blue", 8)
    }

    #[test]
    fn test_sparseness_threshold() {
        let mut dense = EnumDef::new("Dense", Namespace::ROOT, ScalarKind::Int8);
        for value in 0..6 {
            dense = dense.with_value(format!("V{value}"), value);
        }
        assert!(needs_name_table(&dense));

        let sparse = EnumDef::new("Sparse", Namespace::ROOT, ScalarKind::Int8)
            .with_value("A", 0)
            .with_value("B", 100);
        assert!(!needs_name_table(&sparse));

        let empty = EnumDef::new("Empty", Namespace::ROOT, ScalarKind::Int8);
        assert!(!needs_name_table(&empty));
    }

    #[test]
    fn test_java_enum() {
        let ir = SchemaIr::new();
        let ns = Namespace::ROOT;
        let emitter = EnumEmitter::new(TypeMapper::new(&ir, &JAVA, &ns));
        let code = emitter.emit(&color());

        assert_eq!(
            code,
            "public final class Color {\n\
             \x20 private Color() { }\n\
             \x20 public static final byte Red = 1;\n\
             \x20 public static final byte Green = 2;\n\
             \x20 public static final byte Blue = 8;\n\
             \n\
             \x20 private static final String[] names = { \"Red\", \"Green\", \"\", \"\", \"\", \"\", \"\", \"Blue\", };\n\
             \n\
             \x20 public static String name(int e) { return names[e - Red]; }\n\
             };\n\n"
        );
    }

    #[test]
    fn test_java_enum_without_table() {
        let ir = SchemaIr::new();
        let ns = Namespace::ROOT;
        let emitter = EnumEmitter::new(TypeMapper::new(&ir, &JAVA, &ns));
        let sparse = EnumDef::new("Sparse", Namespace::ROOT, ScalarKind::Int32)
            .with_value("A", 0)
            .with_value("B", 100);
        let code = emitter.emit(&sparse);
        assert!(!code.contains("names"));
        assert!(code.contains("  public static final int B = 100;\n"));
    }

    #[test]
    fn test_name_table_from_zero_has_no_offset() {
        let ir = SchemaIr::new();
        let ns = Namespace::ROOT;
        let emitter = EnumEmitter::new(TypeMapper::new(&ir, &JAVA, &ns));
        let def = EnumDef::new("Flag", Namespace::ROOT, ScalarKind::UInt8)
            .with_value("Off", 0)
            .with_value("On", 1);
        let code = emitter.emit(&def);
        assert!(code.contains("{ return names[e]; }"));
        assert!(code.contains("{ \"Off\", \"On\", };"));
    }

    #[test]
    fn test_name_table_at_int64_limit() {
        let ir = SchemaIr::new();
        let ns = Namespace::ROOT;
        let emitter = EnumEmitter::new(TypeMapper::new(&ir, &JAVA, &ns));
        let def = EnumDef::new("Edge", Namespace::ROOT, ScalarKind::Int64)
            .with_value("A", i64::MAX - 1)
            .with_value("B", i64::MAX);
        let code = emitter.emit(&def);
        assert!(code.contains("{ \"A\", \"B\", };"));
        assert!(code.contains("{ return names[e - A]; }"));
    }

    #[test]
    fn test_csharp_enum() {
        let ir = SchemaIr::new();
        let ns = Namespace::ROOT;
        let emitter = EnumEmitter::new(TypeMapper::new(&ir, &CSHARP, &ns));
        let code = emitter.emit(&color().with_doc(" Composite colors"));
        assert_eq!(
            code,
            "/// Composite colors\npublic enum Color : sbyte\n{\n  Red = 1,\n  Green = 2,\n  Blue = 8,\n};\n\n"
        );
    }

    #[test]
    fn test_generated_enum_is_skipped() {
        let ir = SchemaIr::new();
        let ns = Namespace::ROOT;
        let emitter = EnumEmitter::new(TypeMapper::new(&ir, &JAVA, &ns));
        let mut def = color();
        def.generated = true;
        assert_eq!(emitter.emit(&def), "");
    }

    #[test]
    fn test_union_accessors() {
        let mut ir = SchemaIr::new();
        let monster = ir.add_struct(StructDef::table("Monster", Namespace::ROOT));
        let weapon = ir.add_struct(StructDef::table("Weapon", Namespace::ROOT));
        let any = EnumDef::union("Any", Namespace::ROOT)
            .with_variant("Monster", monster)
            .with_variant("Weapon", weapon);
        let field = FieldDef::new("equipped", Type::Union(ironfb_schema::EnumId(0))).with_offset(10);
        let ns = Namespace::ROOT;

        let java = EnumEmitter::new(TypeMapper::new(&ir, &JAVA, &ns)).emit_union_accessors(&field, &any);
        assert_eq!(
            java,
            "  public Monster equippedAsMonster() { return equippedAsMonster(new Monster()); }\n\
             \x20 public Monster equippedAsMonster(Monster obj) { int o = __offset(10); return o != 0 ? (Monster)__union(obj, o) : null; }\n\
             \x20 public Weapon equippedAsWeapon() { return equippedAsWeapon(new Weapon()); }\n\
             \x20 public Weapon equippedAsWeapon(Weapon obj) { int o = __offset(10); return o != 0 ? (Weapon)__union(obj, o) : null; }\n"
        );

        let csharp =
            EnumEmitter::new(TypeMapper::new(&ir, &CSHARP, &ns)).emit_union_accessors(&field, &any);
        assert!(csharp.contains(
            "  public Weapon EquippedAsWeapon { get { return GetEquippedAsWeapon(new Weapon()); } }\n"
        ));
        assert!(csharp.contains(
            "  public Weapon GetEquippedAsWeapon(Weapon obj) { int o = __offset(10); return o != 0 ? __union(obj, o) : null; }\n"
        ));
        assert!(!csharp.contains("NONE"));
    }
}
