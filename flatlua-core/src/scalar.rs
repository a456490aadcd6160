//! Scalar value types of the FlatBuffers wire format.

/// Scalar types that can be stored inline in a buffer.
///
/// This is the language-agnostic representation of a schema scalar. Generators
/// map it to the runtime number type of their target language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scalar {
    Bool,
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Float32,
    Float64,
}

impl Scalar {
    /// Parse a schema type keyword (e.g. `ubyte`, `int32`, `double`).
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        let scalar = match keyword {
            "bool" => Scalar::Bool,
            "byte" | "int8" => Scalar::Int8,
            "ubyte" | "uint8" => Scalar::UInt8,
            "short" | "int16" => Scalar::Int16,
            "ushort" | "uint16" => Scalar::UInt16,
            "int" | "int32" => Scalar::Int32,
            "uint" | "uint32" => Scalar::UInt32,
            "long" | "int64" => Scalar::Int64,
            "ulong" | "uint64" => Scalar::UInt64,
            "float" | "float32" => Scalar::Float32,
            "double" | "float64" => Scalar::Float64,
            _ => return None,
        };
        Some(scalar)
    }

    /// Get the canonical schema keyword
    pub fn as_str(&self) -> &'static str {
        match self {
            Scalar::Bool => "bool",
            Scalar::Int8 => "byte",
            Scalar::UInt8 => "ubyte",
            Scalar::Int16 => "short",
            Scalar::UInt16 => "ushort",
            Scalar::Int32 => "int",
            Scalar::UInt32 => "uint",
            Scalar::Int64 => "long",
            Scalar::UInt64 => "ulong",
            Scalar::Float32 => "float",
            Scalar::Float64 => "double",
        }
    }

    /// Size in bytes of the inline representation.
    pub fn size(&self) -> u32 {
        match self {
            Scalar::Bool | Scalar::Int8 | Scalar::UInt8 => 1,
            Scalar::Int16 | Scalar::UInt16 => 2,
            Scalar::Int32 | Scalar::UInt32 | Scalar::Float32 => 4,
            Scalar::Int64 | Scalar::UInt64 | Scalar::Float64 => 8,
        }
    }

    /// Name of the matching number type in the FlatBuffers runtimes
    /// (`flatbuffers.N.<name>` in Lua, `Prepend<name>` on builders).
    pub fn runtime_name(&self) -> &'static str {
        match self {
            Scalar::Bool => "Bool",
            Scalar::Int8 => "Int8",
            Scalar::UInt8 => "Uint8",
            Scalar::Int16 => "Int16",
            Scalar::UInt16 => "Uint16",
            Scalar::Int32 => "Int32",
            Scalar::UInt32 => "Uint32",
            Scalar::Int64 => "Int64",
            Scalar::UInt64 => "Uint64",
            Scalar::Float32 => "Float32",
            Scalar::Float64 => "Float64",
        }
    }

    pub fn is_integer(&self) -> bool {
        !matches!(self, Scalar::Bool | Scalar::Float32 | Scalar::Float64)
    }
}

impl std::fmt::Display for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_aliases() {
        assert_eq!(Scalar::from_keyword("ubyte"), Some(Scalar::UInt8));
        assert_eq!(Scalar::from_keyword("uint8"), Some(Scalar::UInt8));
        assert_eq!(Scalar::from_keyword("double"), Some(Scalar::Float64));
        assert_eq!(Scalar::from_keyword("string"), None);
        assert_eq!(Scalar::from_keyword("Monster"), None);
    }

    #[test]
    fn test_sizes() {
        assert_eq!(Scalar::Bool.size(), 1);
        assert_eq!(Scalar::UInt16.size(), 2);
        assert_eq!(Scalar::Float32.size(), 4);
        assert_eq!(Scalar::Int64.size(), 8);
    }

    #[test]
    fn test_runtime_names() {
        assert_eq!(Scalar::UInt8.runtime_name(), "Uint8");
        assert_eq!(Scalar::Int32.runtime_name(), "Int32");
        assert_eq!(Scalar::Float64.runtime_name(), "Float64");
    }

    #[test]
    fn test_display_round_trips_keyword() {
        for scalar in [Scalar::Bool, Scalar::Int16, Scalar::UInt64, Scalar::Float32] {
            assert_eq!(Scalar::from_keyword(&scalar.to_string()), Some(scalar));
        }
    }
}
