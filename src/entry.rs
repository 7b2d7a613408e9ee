use std::fmt;
use std::ops::{Index, IndexMut};

use tracing::trace;

use crate::bytestring::ByteString;
use crate::dictionary::Dictionary;
use crate::error::{EntryError, Result};

/// Which payload an [`Entry`] currently holds.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Kind {
    Undefined,
    Integer,
    String,
    List,
    Dictionary,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Kind::Undefined => write!(f, "undefined"),
            Kind::Integer => write!(f, "integer"),
            Kind::String => write!(f, "string"),
            Kind::List => write!(f, "list"),
            Kind::Dictionary => write!(f, "dictionary"),
        }
    }
}

/// A bencode value: an integer, a byte string, a list or a dictionary, or nothing yet.
///
/// An entry owns its payload, and lists and dictionaries own their children by value, so
/// `clone` is a deep copy and replacing the payload drops the old one. Trees must not be
/// cyclic; ownership alone rules that out.
///
/// Two entries are equal when they hold the same kind and equal payloads. Dictionaries
/// compare pair by pair in their current order (see [`Dictionary`]).
///
/// An entry is a plain value with no internal synchronization; share it across threads
/// only behind the caller's own locking.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub enum Entry {
    #[default]
    Undefined,
    Integer(i64),
    String(ByteString),
    List(Vec<Entry>),
    Dictionary(Dictionary),
}

impl Entry {
    /// A fresh entry holding the default payload of `kind`.
    pub fn new(kind: Kind) -> Entry {
        match kind {
            Kind::Undefined => Entry::Undefined,
            Kind::Integer => Entry::Integer(0),
            Kind::String => Entry::String(ByteString::new()),
            Kind::List => Entry::List(Vec::new()),
            Kind::Dictionary => Entry::Dictionary(Dictionary::new()),
        }
    }

    /// Drops the current payload and replaces it with the default payload of `kind`.
    ///
    /// Calling it with the kind already held resets the payload.
    pub fn construct(&mut self, kind: Kind) {
        *self = Entry::new(kind);
    }

    pub fn kind(&self) -> Kind {
        match self {
            Entry::Undefined => Kind::Undefined,
            Entry::Integer(_) => Kind::Integer,
            Entry::String(_) => Kind::String,
            Entry::List(_) => Kind::List,
            Entry::Dictionary(_) => Kind::Dictionary,
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Entry::Undefined)
    }

    pub fn set_integer(&mut self, value: i64) {
        *self = Entry::Integer(value);
    }

    pub fn set_string(&mut self, value: impl Into<ByteString>) {
        *self = Entry::String(value.into());
    }

    pub fn set_list(&mut self, value: Vec<Entry>) {
        *self = Entry::List(value);
    }

    pub fn set_dictionary(&mut self, value: Dictionary) {
        *self = Entry::Dictionary(value);
    }

    fn mismatch(&self, expected: Kind) -> EntryError {
        EntryError::TypeMismatch { expected, found: self.kind() }
    }

    pub fn as_integer(&self) -> Result<i64> {
        match self {
            Entry::Integer(i) => Ok(*i),
            _ => Err(self.mismatch(Kind::Integer)),
        }
    }

    pub fn as_integer_mut(&mut self) -> Result<&mut i64> {
        match self {
            Entry::Integer(i) => Ok(i),
            _ => Err(self.mismatch(Kind::Integer)),
        }
    }

    pub fn as_string(&self) -> Result<&ByteString> {
        match self {
            Entry::String(s) => Ok(s),
            _ => Err(self.mismatch(Kind::String)),
        }
    }

    pub fn as_string_mut(&mut self) -> Result<&mut ByteString> {
        match self {
            Entry::String(s) => Ok(s),
            _ => Err(self.mismatch(Kind::String)),
        }
    }

    /// The string payload as text; `Ok(None)` when it is not valid UTF-8.
    pub fn as_str(&self) -> Result<Option<&str>> {
        self.as_string().map(ByteString::as_str)
    }

    pub fn as_list(&self) -> Result<&Vec<Entry>> {
        match self {
            Entry::List(l) => Ok(l),
            _ => Err(self.mismatch(Kind::List)),
        }
    }

    pub fn as_list_mut(&mut self) -> Result<&mut Vec<Entry>> {
        match self {
            Entry::List(l) => Ok(l),
            _ => Err(self.mismatch(Kind::List)),
        }
    }

    pub fn as_dictionary(&self) -> Result<&Dictionary> {
        match self {
            Entry::Dictionary(d) => Ok(d),
            _ => Err(self.mismatch(Kind::Dictionary)),
        }
    }

    pub fn as_dictionary_mut(&mut self) -> Result<&mut Dictionary> {
        match self {
            Entry::Dictionary(d) => Ok(d),
            _ => Err(self.mismatch(Kind::Dictionary)),
        }
    }

    /// Like [`Entry::as_dictionary_mut`], but an undefined entry is first turned into an
    /// empty dictionary. Any other kind is still a type mismatch and is left untouched.
    pub fn as_dictionary_or_insert(&mut self) -> Result<&mut Dictionary> {
        if self.is_undefined() {
            trace!("promoting undefined entry to dictionary");
            *self = Entry::Dictionary(Dictionary::new());
        }
        self.as_dictionary_mut()
    }

    /// Mutable, auto-creating key lookup. See [`Dictionary::at_mut`].
    ///
    /// An undefined entry becomes a dictionary, which is how trees are built up key by key.
    /// Fails only when the entry holds some other kind.
    pub fn at_mut(&mut self, key: &str) -> Result<&mut Entry> {
        Ok(self.as_dictionary_or_insert()?.at_mut(key))
    }

    /// Read-only key lookup; fails with [`EntryError::KeyNotFound`] on a missing key.
    pub fn at(&self, key: &str) -> Result<&Entry> {
        self.as_dictionary()?.at(key)
    }

    pub fn find(&self, key: &str) -> Result<Option<&Entry>> {
        Ok(self.as_dictionary()?.find(key))
    }

    pub fn find_mut(&mut self, key: &str) -> Result<Option<&mut Entry>> {
        Ok(self.as_dictionary_mut()?.find_mut(key))
    }

    /// Sorts the pairs of this dictionary by key. Nested dictionaries are not touched.
    ///
    /// Calling it on anything but a dictionary is a type mismatch.
    pub fn sort(&mut self) -> Result<()> {
        self.as_dictionary_mut()?.sort();
        Ok(())
    }
}

/// # Panics
///
/// Panics when the entry is not a dictionary or does not hold `key`.
impl Index<&str> for Entry {
    type Output = Entry;

    fn index(&self, key: &str) -> &Entry {
        match self.at(key) {
            Ok(entry) => entry,
            Err(err) => panic!("{}", err),
        }
    }
}

/// Auto-creating, like [`Entry::at_mut`].
///
/// # Panics
///
/// Panics when the entry is neither undefined nor a dictionary.
impl IndexMut<&str> for Entry {
    fn index_mut(&mut self, key: &str) -> &mut Entry {
        match self.at_mut(key) {
            Ok(entry) => entry,
            Err(err) => panic!("{}", err),
        }
    }
}

impl From<i64> for Entry {
    fn from(i: i64) -> Self {
        Entry::Integer(i)
    }
}

impl From<&str> for Entry {
    fn from(s: &str) -> Self {
        Entry::String(s.into())
    }
}

impl From<String> for Entry {
    fn from(s: String) -> Self {
        Entry::String(s.into())
    }
}

impl From<&[u8]> for Entry {
    fn from(bytes: &[u8]) -> Self {
        Entry::String(bytes.into())
    }
}

impl From<Vec<u8>> for Entry {
    fn from(bytes: Vec<u8>) -> Self {
        Entry::String(bytes.into())
    }
}

impl From<ByteString> for Entry {
    fn from(s: ByteString) -> Self {
        Entry::String(s)
    }
}

impl From<Vec<Entry>> for Entry {
    fn from(l: Vec<Entry>) -> Self {
        Entry::List(l)
    }
}

impl From<Dictionary> for Entry {
    fn from(d: Dictionary) -> Self {
        Entry::Dictionary(d)
    }
}
