use async_trait::async_trait;

use crate::{Document, Result};

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Names of every collection. An empty store gives an empty list.
    async fn list_collections(&self) -> Result<Vec<String>>;

    /// Every document of `name`, in the store's own order.
    /// Unknown collections give an empty list rather than an error.
    async fn fetch_collection(&self, name: &str) -> Result<Vec<Document>>;
}

/// Names that can address a collection: non-empty, no path separators,
/// no leading dot, no NUL.
pub fn is_valid_collection_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && !name.contains(['/', '\\', '\0'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_names() {
        assert!(is_valid_collection_name("july-01-resumes"));
        assert!(is_valid_collection_name("Resumes"));
        assert!(!is_valid_collection_name(""));
        assert!(!is_valid_collection_name("../etc"));
        assert!(!is_valid_collection_name(".hidden"));
        assert!(!is_valid_collection_name("a\\b"));
    }
}
