//! Shared utility functions for code generation.

/// Convert an identifier to CamelCase the way FlatBuffers generators do.
///
/// The first character is upper-cased when `first` is set, and every `_x`
/// sequence collapses to `X`. A trailing underscore is kept as is.
///
/// ```
/// use flatlua_core::make_camel;
///
/// assert_eq!(make_camel("test_type", true), "TestType");
/// assert_eq!(make_camel("test_type", false), "testType");
/// ```
pub fn make_camel(s: &str, first: bool) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len());
    let mut i = 0;
    while i < chars.len() {
        if i == 0 && first {
            result.extend(chars[0].to_uppercase());
        } else if chars[i] == '_' && i + 1 < chars.len() {
            i += 1;
            result.extend(chars[i].to_uppercase());
        } else {
            result.push(chars[i]);
        }
        i += 1;
    }
    result
}

/// Convert a TOML value to its string representation
pub fn toml_value_to_string(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Integer(i) => i.to_string(),
        toml::Value::Float(f) => f.to_string(),
        toml::Value::Boolean(b) => b.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_camel_first() {
        assert_eq!(make_camel("hp", true), "Hp");
        assert_eq!(make_camel("test_type", true), "TestType");
        assert_eq!(make_camel("testarrayofstring", true), "Testarrayofstring");
        assert_eq!(make_camel("", true), "");
    }

    #[test]
    fn test_make_camel_lower() {
        assert_eq!(make_camel("hp", false), "hp");
        assert_eq!(make_camel("test_type", false), "testType");
        assert_eq!(make_camel("Pos", false), "Pos");
    }

    #[test]
    fn test_make_camel_underscores() {
        // escaped keywords keep their leading underscore
        assert_eq!(make_camel("_end", true), "_end");
        assert_eq!(make_camel("_end", false), "End");
        assert_eq!(make_camel("trailing_", true), "Trailing_");
        assert_eq!(make_camel("a__b", false), "a_b");
    }

    #[test]
    fn test_toml_value_to_string() {
        assert_eq!(
            toml_value_to_string(&toml::Value::String("Blue".to_string())),
            "Blue"
        );
        assert_eq!(toml_value_to_string(&toml::Value::Integer(150)), "150");
        assert_eq!(toml_value_to_string(&toml::Value::Float(0.5)), "0.5");
        assert_eq!(toml_value_to_string(&toml::Value::Boolean(true)), "true");
    }
}
