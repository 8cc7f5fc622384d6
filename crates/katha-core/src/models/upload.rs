use bytes::Bytes;

/// One uploaded file handed to the archive by the caller: the original name
/// plus the full payload, already read into memory.
#[derive(Debug, Clone)]
pub struct MediaUpload {
    pub name: String,
    pub bytes: Bytes,
}

impl MediaUpload {
    pub fn new(name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
