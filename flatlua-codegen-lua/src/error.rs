use std::path::PathBuf;

/// Errors raised while generating Lua modules.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The schema contains a shape no emitter can express.
    #[error("invalid schema: {definition}.{field}: {reason}")]
    Invariant {
        definition: String,
        field: String,
        reason: String,
    },

    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn invariant(
        definition: impl Into<String>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Invariant {
            definition: definition.into(),
            field: field.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invariant_message() {
        let err = Error::invariant("MyGame.Vec3", "name", "a fixed struct cannot hold a string");
        assert_eq!(
            err.to_string(),
            "invalid schema: MyGame.Vec3.name: a fixed struct cannot hold a string"
        );
    }
}
