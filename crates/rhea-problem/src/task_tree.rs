//! Opaque problem task tree.

/// Serialized task tree owned by a problem.
///
/// The tree's structure belongs to the solver front end; this layer stores
/// and persists it verbatim.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TaskTree {
    bytes: Vec<u8>,
}

impl TaskTree {
    /// An empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap serialized tree bytes.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    /// The serialized tree.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Take the serialized tree.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Whether the tree is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
