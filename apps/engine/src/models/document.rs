use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A résumé document after the upload collaborator has decoded it to plain
/// text. Immutable once constructed; the `id` is the identity under which
/// callers may cache derived analyses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawDocument {
    pub id: Uuid,
    pub file_name: String,
    pub file_size_bytes: u64,
    pub mime_type: String,
    pub text: String,
}

impl RawDocument {
    pub fn new(file_name: &str, file_size_bytes: u64, mime_type: &str, text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            file_name: file_name.to_string(),
            file_size_bytes,
            mime_type: mime_type.to_string(),
            text,
        }
    }

    /// Convenience constructor for already-plain text (TXT uploads, tests).
    pub fn from_text(file_name: &str, text: String) -> Self {
        let size = text.len() as u64;
        Self::new(file_name, size, "text/plain", text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text_sets_size_and_mime() {
        let doc = RawDocument::from_text("resume.txt", "hello".to_string());
        assert_eq!(doc.file_size_bytes, 5);
        assert_eq!(doc.mime_type, "text/plain");
        assert_eq!(doc.file_name, "resume.txt");
    }

    #[test]
    fn test_each_document_gets_unique_id() {
        let a = RawDocument::from_text("a.txt", "x".to_string());
        let b = RawDocument::from_text("a.txt", "x".to_string());
        assert_ne!(a.id, b.id);
    }
}
