//! In-memory bencode values.
//!
//! [`Entry`] holds one bencode node: an integer, a byte string, a list or a dictionary,
//! or nothing yet ([`Entry::Undefined`]). Decoders build entry trees through the
//! constructors and the auto-creating lookup, encoders walk them after calling
//! [`Entry::sort`] on every dictionary that has to be in canonical order.
//!
//! ```
//! use bentry::{Entry, Kind};
//!
//! let mut torrent = Entry::default();
//! torrent["name"] = Entry::from("file.txt");
//! torrent["length"] = Entry::from(1024);
//! torrent.sort().unwrap();
//!
//! assert_eq!(Kind::Dictionary, torrent.kind());
//! assert_eq!(Ok(1024), torrent.at("length").and_then(Entry::as_integer));
//! assert_eq!(
//!     "dictionary\n [length] 1024\n [name] file.txt\n",
//!     torrent.to_string()
//! );
//! ```

mod bytestring;
mod dictionary;
mod entry;
mod error;
mod integer;
mod print;

pub use bytestring::{ByteString, ToByteString};
pub use dictionary::{Dictionary, DictionaryItem};
pub use entry::{Entry, Kind};
pub use error::{EntryError, Result};
pub use integer::{integer_str, integer_to_str, INTEGER_BUF_LEN};
