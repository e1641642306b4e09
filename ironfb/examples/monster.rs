//! Generates Java and C# bindings for a small game schema.
//!
//! Run with: `cargo run --example monster -- [output_dir]`
//!
//! Set `RUST_LOG=debug` to see every written file.

use ironfb::prelude::*;
use std::path::PathBuf;

fn game_schema() -> SchemaIr {
    let mut ir = SchemaIr::new();
    let ns = Namespace::parse("MyGame.Sample");
    ir.add_source_file("monster.fbs");

    let color = ir.add_enum(
        EnumDef::new("Color", ns.clone(), ScalarKind::Int8)
            .with_value("Red", 0)
            .with_value("Green", 1)
            .with_value("Blue", 2),
    );
    let vec3 = ir.add_struct(
        StructDef::fixed("Vec3", ns.clone(), 12, 4)
            .with_field(FieldDef::new("x", Type::scalar(ScalarKind::Float32)))
            .with_field(FieldDef::new("y", Type::scalar(ScalarKind::Float32)).with_offset(4))
            .with_field(FieldDef::new("z", Type::scalar(ScalarKind::Float32)).with_offset(8)),
    );

    let mut weapon = StructDef::table("Weapon", ns.clone())
        .with_field(FieldDef::new("name", Type::String))
        .with_field(FieldDef::new("damage", Type::scalar(ScalarKind::Int16)));
    weapon.assign_vtable_slots();
    let weapon = ir.add_struct(weapon);

    let equipment = ir.add_enum(EnumDef::union("Equipment", ns.clone()).with_variant("Weapon", weapon));

    let mut monster = StructDef::table("Monster", ns)
        .with_doc(" A monster roaming the map")
        .with_field(FieldDef::new("pos", Type::Struct(vec3)))
        .with_field(FieldDef::new("mana", Type::scalar(ScalarKind::Int16)).with_default("150"))
        .with_field(FieldDef::new("hp", Type::scalar(ScalarKind::Int16)).with_default("100"))
        .with_field(FieldDef::new("name", Type::String).required())
        .with_field(FieldDef::new("inventory", Type::vector(Type::scalar(ScalarKind::UInt8))))
        .with_field(FieldDef::new("color", Type::enumeration(ScalarKind::Int8, color)).with_default("2"))
        .with_field(FieldDef::new("weapons", Type::vector(Type::Struct(weapon))))
        .with_field(FieldDef::new("equipped_type", Type::enumeration(ScalarKind::UInt8, equipment)))
        .with_field(FieldDef::new("equipped", Type::Union(equipment)));
    monster.assign_vtable_slots();
    let monster = ir.add_struct(monster);

    ir.set_root(monster);
    ir.set_file_identifier("MONS");
    ir
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let output_dir = std::env::args()
        .nth(1)
        .map_or_else(|| PathBuf::from("generated"), PathBuf::from);
    let ir = game_schema();

    for language in [Language::Java, Language::CSharp] {
        let options = GeneratorOptions::new()
            .language(language)
            .mutable_buffer(true)
            .value_types(true)
            .verify_layout(true)
            .output_dir(output_dir.join(language.to_string()));

        let generator = Generator::new(&ir, &options);
        let written = generator.write()?;
        println!("[{}] wrote {} files", language, written.len());
        println!("[{}] {}", language, generator.build_rule()?);
    }

    Ok(())
}
