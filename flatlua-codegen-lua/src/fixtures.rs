//! Small hand-built schemas for emitter tests.

use flatlua_ir::{EnumDef, EnumId, EnumVal, FieldDef, Scalar, Schema, StructDef, StructId, Type};

pub const VEC3: StructId = StructId(0);
pub const ABILITY: StructId = StructId(1);
pub const MONSTER: StructId = StructId(2);
pub const WEAPON: StructId = StructId(3);

pub const COLOR: EnumId = EnumId(0);
pub const EQUIPMENT: EnumId = EnumId(1);

pub fn field(name: &str, ty: Type, offset: u32) -> FieldDef {
    FieldDef {
        name: name.into(),
        ty,
        offset,
        default: "0".into(),
        deprecated: false,
        padding: 0,
        doc: Vec::new(),
    }
}

pub trait FieldExt {
    fn default(self, value: &str) -> Self;
    fn padding(self, bytes: u32) -> Self;
    fn deprecated(self) -> Self;
}

impl FieldExt for FieldDef {
    fn default(mut self, value: &str) -> Self {
        self.default = value.into();
        self
    }

    fn padding(mut self, bytes: u32) -> Self {
        self.padding = bytes;
        self
    }

    fn deprecated(mut self) -> Self {
        self.deprecated = true;
        self
    }
}

pub fn fixed(name: &str, minalign: u32, bytesize: u32, fields: Vec<FieldDef>) -> StructDef {
    StructDef {
        name: name.into(),
        namespace: vec!["MyGame".into()],
        doc: Vec::new(),
        fields,
        fixed: true,
        minalign,
        bytesize,
    }
}

pub fn table(name: &str, fields: Vec<FieldDef>) -> StructDef {
    StructDef {
        name: name.into(),
        namespace: vec!["MyGame".into()],
        doc: Vec::new(),
        fields,
        fixed: false,
        minalign: 1,
        bytesize: 0,
    }
}

fn value(name: &str, value: i64, union_type: Option<Type>) -> EnumVal {
    EnumVal {
        name: name.into(),
        value,
        union_type,
        doc: Vec::new(),
    }
}

fn vector(element: Type) -> Type {
    Type::Vector(Box::new(element))
}

fn color() -> Type {
    Type::Scalar {
        scalar: Scalar::Int8,
        enum_def: Some(COLOR),
    }
}

/// `MyGame.{Vec3, Ability, Monster, Weapon}` plus `Color` and `Equipment`.
pub fn monster_schema() -> Schema {
    Schema {
        structs: vec![
            fixed(
                "Vec3",
                4,
                16,
                vec![
                    field("x", Type::scalar(Scalar::Float32), 0),
                    field("y", Type::scalar(Scalar::Float32), 4),
                    field("z", Type::scalar(Scalar::Float32), 8),
                    field("color", color(), 12).padding(3),
                ],
            ),
            fixed(
                "Ability",
                4,
                24,
                vec![
                    field("id", Type::scalar(Scalar::UInt32), 0),
                    field("origin", Type::Struct(VEC3), 4),
                    field("ready", Type::scalar(Scalar::Bool), 20).padding(3),
                ],
            ),
            table(
                "Monster",
                vec![
                    field("pos", Type::Struct(VEC3), 4),
                    field("mana", Type::scalar(Scalar::Int16), 6).default("150"),
                    field("hp", Type::scalar(Scalar::Int16), 8).default("100"),
                    field("name", Type::String, 10),
                    field("friendly", Type::scalar(Scalar::Bool), 12)
                        .default("0")
                        .deprecated(),
                    field("inventory", vector(Type::scalar(Scalar::UInt8)), 14),
                    field("color", color(), 16).default("2"),
                    field("weapons", vector(Type::Struct(WEAPON)), 18),
                    field("equipped_type", Type::UnionType(EQUIPMENT), 20),
                    field("equipped", Type::Union(EQUIPMENT), 22),
                    field("path", vector(Type::Struct(VEC3)), 24),
                    field("names", vector(Type::String), 26),
                    field("enemy", Type::Struct(MONSTER), 28),
                    field("alive", Type::scalar(Scalar::Bool), 30).default("1"),
                ],
            ),
            table(
                "Weapon",
                vec![
                    field("name", Type::String, 4),
                    field("damage", Type::scalar(Scalar::Int16), 6),
                ],
            ),
        ],
        enums: vec![
            EnumDef {
                name: "Color".into(),
                namespace: vec!["MyGame".into()],
                doc: Vec::new(),
                values: vec![
                    value("Red", 0, None),
                    value("Green", 1, None),
                    value("Blue", 2, None),
                ],
                is_union: false,
                underlying: Scalar::Int8,
            },
            EnumDef {
                name: "Equipment".into(),
                namespace: vec!["MyGame".into()],
                doc: Vec::new(),
                values: vec![
                    value("NONE", 0, None),
                    value("Weapon", 1, Some(Type::Struct(WEAPON))),
                    value("Label", 2, Some(Type::String)),
                ],
                is_union: true,
                underlying: Scalar::UInt8,
            },
        ],
    }
}
