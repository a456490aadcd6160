/// Options that change what a generator emits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Emit the object-based API (mirror types with Pack/UnPack).
    pub generate_object_based_api: bool,
    /// Default mirror vectors to `nil` instead of an empty sequence.
    pub set_empty_vectors_to_null: bool,
}
