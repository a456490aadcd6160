//! Field type expressions (`int`, `[Monster]`, `[float:3]`, `MyGame.Vec3`).

use std::str::FromStr;

use flatlua_core::Scalar;

use super::validate::validate_identifier;

/// A parsed, not yet resolved, field type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    Scalar(Scalar),
    String,
    /// A reference to a declaration, possibly namespace-qualified.
    Named(String),
    Vector(Box<TypeExpr>),
    Array { element: Box<TypeExpr>, length: u16 },
}

impl TypeExpr {
    /// Innermost type of vectors and arrays.
    pub fn innermost(&self) -> &TypeExpr {
        match self {
            TypeExpr::Vector(element) | TypeExpr::Array { element, .. } => element.innermost(),
            other => other,
        }
    }
}

impl FromStr for TypeExpr {
    /// Reason the type expression is malformed.
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if let Some(inner) = s.strip_prefix('[') {
            let inner = inner
                .strip_suffix(']')
                .ok_or_else(|| "missing closing ']'".to_string())?;

            return match inner.rsplit_once(':') {
                Some((element, length)) => {
                    let length: u16 = length
                        .trim()
                        .parse()
                        .map_err(|_| format!("array length '{}' is not a number", length.trim()))?;
                    if length == 0 {
                        return Err("array length must be at least 1".to_string());
                    }
                    Ok(TypeExpr::Array {
                        element: Box::new(element.parse()?),
                        length,
                    })
                }
                None => Ok(TypeExpr::Vector(Box::new(inner.parse()?))),
            };
        }

        if s == "string" {
            return Ok(TypeExpr::String);
        }

        if let Some(scalar) = Scalar::from_keyword(s) {
            return Ok(TypeExpr::Scalar(scalar));
        }

        for segment in s.split('.') {
            if let Some(reason) = validate_identifier(segment) {
                return Err(format!("'{}' is not a type name: {}", s, reason));
            }
        }

        Ok(TypeExpr::Named(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scalars_and_string() {
        assert_eq!("int".parse(), Ok(TypeExpr::Scalar(Scalar::Int32)));
        assert_eq!("uint8".parse(), Ok(TypeExpr::Scalar(Scalar::UInt8)));
        assert_eq!("string".parse(), Ok(TypeExpr::String));
    }

    #[test]
    fn test_parse_named() {
        assert_eq!(
            "MyGame.Example.Vec3".parse(),
            Ok(TypeExpr::Named("MyGame.Example.Vec3".into()))
        );
        assert!("My-Game".parse::<TypeExpr>().is_err());
        assert!("".parse::<TypeExpr>().is_err());
    }

    #[test]
    fn test_parse_vector_and_array() {
        assert_eq!(
            "[ubyte]".parse(),
            Ok(TypeExpr::Vector(Box::new(TypeExpr::Scalar(Scalar::UInt8))))
        );
        assert_eq!(
            "[Vec3:4]".parse(),
            Ok(TypeExpr::Array {
                element: Box::new(TypeExpr::Named("Vec3".into())),
                length: 4,
            })
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!("[int".parse::<TypeExpr>().is_err());
        assert!("[int:x]".parse::<TypeExpr>().is_err());
        assert!("[int:0]".parse::<TypeExpr>().is_err());
    }

    #[test]
    fn test_innermost() {
        let ty: TypeExpr = "[[Monster]]".parse().unwrap();
        assert_eq!(ty.innermost(), &TypeExpr::Named("Monster".into()));
    }
}
