//! # suffix-bwt-huff
//!
//! Lossless text compression over a fixed printable-ASCII alphabet, built from
//! three tightly coupled pieces: an online suffix tree (Ukkonen's algorithm)
//! used to derive a Burrows-Wheeler Transform, a canonical Huffman coder over
//! the transformed bytes, and an Elias omega integer coder for run lengths and
//! header fields.
//!
//! ## Buffer example
//!
//! ```rs
//! use suffix_bwt_huff::{stream,config::STD_CONFIG};
//! let text = b"mississippi$";
//! let compressed = stream::encode(text,&STD_CONFIG).expect("encode failed");
//! let restored = stream::decode(&compressed,&STD_CONFIG).expect("decode failed");
//! assert_eq!(restored,text);
//! ```

pub mod error;
pub mod config;
pub mod alphabet;
mod bitbuf;
mod elias;
mod huffman;
pub mod suffix_tree;
pub mod bwt;
pub mod stream;

pub use error::Error;

type DYNERR = Box<dyn std::error::Error>;
type STDRESULT = Result<(),Box<dyn std::error::Error>>;
