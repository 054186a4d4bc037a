//! Display-side cache of uploaded image encodings.
//!
//! Encodings are keyed by the SHA-256 of the raw bytes, so re-uploading the
//! same picture reuses its base64 text. Each upload becomes the *current*
//! image; the previous selection is dropped at that point. Requests themselves
//! are never cached.

use crate::error::Result;
use crate::upload::content_hash;
use crate::vision::encode;
use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tracing::debug;

/// One remembered image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedImage {
    pub content_hash: String,
    pub base64: Arc<str>,
}

struct SessionState {
    current: Option<String>,
    encodings: LruCache<String, Arc<str>>,
}

/// Shared, thread-safe image session.
#[derive(Clone)]
pub struct ImageSession {
    inner: Arc<Mutex<SessionState>>,
}

impl ImageSession {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner: Arc::new(Mutex::new(SessionState {
                current: None,
                encodings: LruCache::new(capacity),
            })),
        }
    }

    /// Record a fresh upload and make it the current image.
    pub fn remember(&self, bytes: &[u8]) -> Result<CachedImage> {
        let hash = content_hash(bytes);

        let cached = self.inner.lock().encodings.get(&hash).cloned();
        let base64 = match cached {
            Some(base64) => {
                debug!("Session cache hit for {}", &hash[..16]);
                base64
            }
            None => {
                debug!("Session cache miss for {}", &hash[..16]);
                Arc::from(encode(bytes)?)
            }
        };

        let mut state = self.inner.lock();
        state.encodings.put(hash.clone(), base64.clone());
        state.current = Some(hash.clone());

        Ok(CachedImage {
            content_hash: hash,
            base64,
        })
    }

    /// The most recently uploaded image, if it is still cached.
    pub fn current(&self) -> Option<CachedImage> {
        let mut state = self.inner.lock();
        let hash = state.current.clone()?;
        let base64 = state.encodings.get(&hash).cloned()?;
        Some(CachedImage {
            content_hash: hash,
            base64,
        })
    }

    /// Look up an image by content hash.
    pub fn get(&self, content_hash: &str) -> Option<CachedImage> {
        let mut state = self.inner.lock();
        state.encodings.get(content_hash).cloned().map(|base64| CachedImage {
            content_hash: content_hash.to_string(),
            base64,
        })
    }

    pub fn len(&self) -> usize {
        self.inner.lock().encodings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        let mut state = self.inner.lock();
        state.current = None;
        state.encodings.clear();
        debug!("Image session cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_remember_sets_current() {
        let session = ImageSession::new(4);
        assert!(session.current().is_none());

        let first = session.remember(b"first image").unwrap();
        assert_eq!(session.current(), Some(first.clone()));

        let second = session.remember(b"second image").unwrap();
        assert_eq!(session.current(), Some(second));
        // The earlier upload is still retrievable by hash
        assert_eq!(session.get(&first.content_hash), Some(first));
    }

    #[test]
    fn test_same_bytes_share_entry() {
        let session = ImageSession::new(4);
        let a = session.remember(b"same").unwrap();
        let b = session.remember(b"same").unwrap();

        assert_eq!(a, b);
        assert!(Arc::ptr_eq(&a.base64, &b.base64));
        assert_eq!(session.len(), 1);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let session = ImageSession::new(2);
        let first = session.remember(b"one").unwrap();
        session.remember(b"two").unwrap();
        session.remember(b"three").unwrap();

        assert_eq!(session.len(), 2);
        assert!(session.get(&first.content_hash).is_none());
    }

    #[test]
    fn test_empty_upload_is_rejected() {
        let session = ImageSession::new(2);
        let err = session.remember(b"").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Encoding);
        assert!(session.current().is_none());
    }

    #[test]
    fn test_clear() {
        let session = ImageSession::new(2);
        session.remember(b"img").unwrap();
        session.clear();
        assert!(session.is_empty());
        assert!(session.current().is_none());
    }
}
