use crate::count::Segment;
use crate::error::{CountError, Result};
use std::path::Path;

/// Immutable bytes of one corpus file
///
/// Owned by the strategy processing the file and dropped once its counts are produced.
/// Workers only ever borrow it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    bytes: Vec<u8>,
}

impl TextBuffer {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    /// Read a whole file into memory
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|source| CountError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("Loaded {} bytes from {}", bytes.len(), path.display());
        Ok(Self { bytes })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The bytes covered by `segment`
    pub fn slice(&self, segment: Segment) -> &[u8] {
        &self.bytes[segment.start..segment.end]
    }

    /// A segment spanning the whole buffer
    pub fn full_segment(&self) -> Segment {
        Segment::new(0, self.bytes.len())
    }
}

impl From<&str> for TextBuffer {
    fn from(text: &str) -> Self {
        Self::new(text.as_bytes())
    }
}
