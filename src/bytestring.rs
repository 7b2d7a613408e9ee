use std::fmt::Display;

// Custom ByteString wrapper; bencode strings are raw bytes and need not be UTF-8.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct ByteString(pub Vec<u8>);

impl ByteString {
    pub fn new() -> ByteString {
        ByteString(Vec::new())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The contents as text, if they are valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.0).ok()
    }

    /// True when every byte is printable ASCII (`0x20..=0x7e`).
    pub fn is_printable(&self) -> bool {
        self.0.iter().all(|&b| (0x20..=0x7e).contains(&b))
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }
}

pub trait ToByteString {
    fn to_byte_string(&self) -> ByteString;
}

impl ToByteString for &str {
    fn to_byte_string(&self) -> ByteString {
        ByteString(self.as_bytes().to_vec())
    }
}

impl ToByteString for &[u8] {
    fn to_byte_string(&self) -> ByteString {
        ByteString(self.to_vec())
    }
}

impl From<&str> for ByteString {
    fn from(s: &str) -> Self {
        s.to_byte_string()
    }
}

impl From<String> for ByteString {
    fn from(s: String) -> Self {
        ByteString(s.into_bytes())
    }
}

impl From<&[u8]> for ByteString {
    fn from(bytes: &[u8]) -> Self {
        bytes.to_byte_string()
    }
}

impl From<Vec<u8>> for ByteString {
    fn from(bytes: Vec<u8>) -> Self {
        ByteString(bytes)
    }
}

impl AsRef<[u8]> for ByteString {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Display for ByteString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = String::from_utf8_lossy(&self.0);
        write!(f, "{}", s)
    }
}
