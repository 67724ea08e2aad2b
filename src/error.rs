//! Error types shared across the codec.

/// Codec errors.
#[derive(thiserror::Error,Debug)]
pub enum Error {
    #[error("byte {0} (0x{0:02x}) is outside the supported alphabet [36,126]")]
    OutOfAlphabet(u8),
    #[error("encoder input does not end with exactly one '$' sentinel")]
    MissingSentinel,
    #[error("Elias code truncated before its final component")]
    MalformedInteger,
    #[error("Huffman code book header is malformed: {0}")]
    MalformedHeader(String),
    #[error("bit stream does not match any known Huffman code")]
    AmbiguousCode,
    #[error("run-length body ran out of stream before the declared length was reached")]
    LengthUnderflow,
    #[error("run-length body would exceed the declared input length")]
    LengthOverflow,
    #[error("no Huffman code is assigned to byte {0} (0x{0:02x})")]
    UnknownSymbol(u8)
}
