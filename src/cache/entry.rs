//! Cache Entry Module
//!
//! Defines a single cached response: owned copies of the key, content type
//! and payload, plus the entry's links in the recency list.

use crate::cache::SlotId;
use crate::error::Result;

// == Cache Entry ==
/// A cached payload and its position in the recency list.
///
/// Every field is copied in at construction and never mutated in place; the
/// only change an entry sees after insertion is relinking, or a wholesale
/// content swap when its key is stored again.
#[derive(Debug)]
pub struct CacheEntry {
    key: String,
    content_type: String,
    payload: Box<[u8]>,
    /// Towards the head (more recently used)
    pub(crate) prev: Option<SlotId>,
    /// Towards the tail (less recently used)
    pub(crate) next: Option<SlotId>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an unlinked entry, copying every argument.
    ///
    /// # Errors
    /// Returns `CacheError::Allocation` if any copy cannot be allocated.
    pub fn new(key: &str, content_type: &str, payload: &[u8]) -> Result<Self> {
        Ok(Self {
            key: copy_str(key)?,
            content_type: copy_str(content_type)?,
            payload: copy_bytes(payload)?,
            prev: None,
            next: None,
        })
    }

    // == Replace Content ==
    /// Swaps in a new content type and payload.
    ///
    /// Both copies are made before anything is replaced, so a failed
    /// allocation leaves the entry as it was.
    pub fn replace_content(&mut self, content_type: &str, payload: &[u8]) -> Result<()> {
        let content_type = copy_str(content_type)?;
        let payload = copy_bytes(payload)?;
        self.content_type = content_type;
        self.payload = payload;
        Ok(())
    }

    // == Accessors ==
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Payload length in bytes.
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }
}

// == Utility Functions ==
pub(crate) fn copy_str(src: &str) -> Result<String> {
    let mut out = String::new();
    out.try_reserve_exact(src.len())?;
    out.push_str(src);
    Ok(out)
}

fn copy_bytes(src: &[u8]) -> Result<Box<[u8]>> {
    let mut out = Vec::new();
    out.try_reserve_exact(src.len())?;
    out.extend_from_slice(src);
    Ok(out.into_boxed_slice())
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_creation() {
        let entry = CacheEntry::new("/index.html", "text/html", b"<h1>hi</h1>").unwrap();

        assert_eq!(entry.key(), "/index.html");
        assert_eq!(entry.content_type(), "text/html");
        assert_eq!(entry.payload(), b"<h1>hi</h1>");
        assert_eq!(entry.len(), 11);
        assert!(entry.prev.is_none());
        assert!(entry.next.is_none());
    }

    #[test]
    fn test_entry_empty_payload() {
        let entry = CacheEntry::new("/empty", "text/plain", &[]).unwrap();

        assert!(entry.is_empty());
        assert_eq!(entry.len(), 0);
        assert_eq!(entry.payload(), &[] as &[u8]);
    }

    #[test]
    fn test_entry_keeps_embedded_zero_bytes() {
        let payload = [0u8, 1, 0, 255, 0];
        let entry = CacheEntry::new("/bin", "application/octet-stream", &payload).unwrap();

        assert_eq!(entry.len(), 5);
        assert_eq!(entry.payload(), &payload);
    }

    #[test]
    fn test_entry_does_not_alias_caller_buffer() {
        let mut payload = b"original".to_vec();
        let entry = CacheEntry::new("/a", "text/plain", &payload).unwrap();

        payload[0] = b'X';
        assert_eq!(entry.payload(), b"original");
    }

    #[test]
    fn test_entry_replace_content() {
        let mut entry = CacheEntry::new("/a", "text/plain", b"old").unwrap();

        entry.replace_content("application/json", b"{}").unwrap();

        assert_eq!(entry.key(), "/a");
        assert_eq!(entry.content_type(), "application/json");
        assert_eq!(entry.payload(), b"{}");
    }
}
