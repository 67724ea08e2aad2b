//! The encoded bit-stream format: a self-describing Huffman header followed by
//! an Elias/run-length-coded Burrows-Wheeler body.
//!
//! Field order is ported from `original_source/runlength_binary_bwt.py`'s
//! `RunlengthEncoder.encode`; the decoder has no source counterpart (that
//! module's decoder is a stub) and is built directly from the header/body
//! contract the encoder establishes.

use crate::alphabet;
use crate::bitbuf::{BitBuf,BitCursor};
use crate::bwt;
use crate::config::Config;
use crate::elias;
use crate::error::Error;
use crate::huffman::{DecodeTree,HuffmanCodec};

const ASCII_FIELD_WIDTH: usize = 7;

/// Encode `text` (alphabet bytes, ending in exactly one `$`) into the wire format.
pub fn encode(text: &[u8],config: &Config) -> Result<Vec<u8>,Error> {
    validate_input(text)?;

    let bwt_bytes = bwt::forward_from_text(text)?;

    let mut freq = [0usize;alphabet::A];
    for &c in &bwt_bytes {
        freq[alphabet::index_of(c)?] += 1;
    }
    let huff = HuffmanCodec::build(&freq);

    let mut first_seen = Vec::new();
    let mut seen = [false;alphabet::A];
    for &c in &bwt_bytes {
        let idx = alphabet::index_of(c)?;
        if !seen[idx] {
            seen[idx] = true;
            first_seen.push(c);
        }
    }
    log::debug!("header: {} distinct characters,{} bwt bytes",first_seen.len(),bwt_bytes.len());

    let mut out = BitBuf::new();
    out.push_bits(&elias::encode(text.len() as u64));
    out.push_bits(&elias::encode(first_seen.len() as u64));
    for &c in &first_seen {
        push_ascii_field(&mut out,c);
        let code = huff.encode(c)?;
        out.push_bits(&elias::encode(code.len() as u64));
        out.push_bits(&code);
    }

    let mut elias_counts = elias::EliasCoder::create(bwt_bytes.len().max(1));
    let mut i = 0;
    while i < bwt_bytes.len() {
        let c = bwt_bytes[i];
        let mut run_len = 1u64;
        while i + (run_len as usize) < bwt_bytes.len() && bwt_bytes[i + run_len as usize] == c {
            run_len += 1;
        }
        out.push_bits(&huff.encode(c)?);
        out.push_bits(&elias_counts.encode(run_len));
        i += run_len as usize;
    }

    out.pad_to_byte();
    let bytes = out.to_bytes();
    if config.verbose_stats {
        log::info!("encoded {} chars -> {} bytes",text.len(),bytes.len());
    }
    Ok(bytes)
}

/// Decode the wire format produced by [`encode`] back into the original text.
pub fn decode(bytes: &[u8],config: &Config) -> Result<Vec<u8>,Error> {
    let mut cursor = BitCursor::new(BitBuf::from_bytes(bytes));

    let n = elias::decode(&mut cursor)? as usize;
    let u = elias::decode(&mut cursor)? as usize;
    if u == 0 && n > 0 {
        return Err(Error::MalformedHeader("zero distinct characters declared for a nonempty message".into()));
    }

    let mut tree = DecodeTree::new();
    for _ in 0..u {
        let ascii = cursor
            .parse_prefix_as_u64(ASCII_FIELD_WIDTH)
            .ok_or_else(|| Error::MalformedHeader("truncated ascii field".into()))?;
        let c = u8::try_from(ascii).map_err(|_| Error::MalformedHeader("ascii field out of byte range".into()))?;
        alphabet::index_of(c)?;
        let code_len = elias::decode(&mut cursor)? as usize;
        let code = cursor
            .take_prefix(code_len)
            .ok_or_else(|| Error::MalformedHeader("truncated huffman code".into()))?;
        cursor.drop_prefix(code_len).expect("take_prefix already checked availability");
        tree.insert(&code,c)?;
    }
    log::debug!("header parsed: {u} distinct characters, declared length {n}");

    let mut bwt_bytes = Vec::with_capacity(n);
    let mut remaining = n;
    while remaining > 0 {
        if cursor.remaining() == 0 {
            return Err(Error::LengthUnderflow);
        }
        let c = tree.decode_next(&mut cursor)?;
        let k = elias::decode(&mut cursor)? as usize;
        if k > remaining {
            return Err(Error::LengthOverflow);
        }
        bwt_bytes.extend(std::iter::repeat(c).take(k));
        remaining -= k;
    }

    let text = bwt::inverse(&bwt_bytes);
    if config.verbose_stats {
        log::info!("decoded {} bytes -> {} chars",bytes.len(),text.len());
    }
    Ok(text)
}

fn validate_input(text: &[u8]) -> Result<(),Error> {
    for &c in text {
        alphabet::index_of(c)?;
    }
    let sentinel_count = text.iter().filter(|&&c| c == alphabet::SENTINEL).count();
    if text.is_empty() || sentinel_count != 1 || *text.last().unwrap() != alphabet::SENTINEL {
        return Err(Error::MissingSentinel);
    }
    Ok(())
}

fn push_ascii_field(out: &mut BitBuf,c: u8) {
    for i in (0..ASCII_FIELD_WIDTH).rev() {
        out.push_bit((c >> i) & 1 == 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> Config {
        Config::default()
    }

    #[test]
    fn minimal() {
        let bytes = encode(b"a$",&cfg()).unwrap();
        assert_eq!(decode(&bytes,&cfg()).unwrap(),b"a$");
    }

    #[test]
    fn classic_banana() {
        let bytes = encode(b"banana$",&cfg()).unwrap();
        assert_eq!(decode(&bytes,&cfg()).unwrap(),b"banana$");
    }

    #[test]
    fn single_unique_letter() {
        let bytes = encode(b"aaaa$",&cfg()).unwrap();
        assert_eq!(decode(&bytes,&cfg()).unwrap(),b"aaaa$");
    }

    #[test]
    fn alphabet_edge_rejects_and_accepts() {
        assert!(matches!(encode(b"~!$",&cfg()),Err(Error::OutOfAlphabet(b'!'))));
        let bytes = encode(b"~%$",&cfg()).unwrap();
        assert_eq!(decode(&bytes,&cfg()).unwrap(),b"~%$");
    }

    #[test]
    fn mississippi_runs() {
        let bytes = encode(b"mississippi$",&cfg()).unwrap();
        assert_eq!(decode(&bytes,&cfg()).unwrap(),b"mississippi$");
    }

    #[test]
    fn long_story_opening() {
        let s = crate::suffix_tree::test_fixtures::LONG_STORY_OPENING.as_bytes();
        let bytes = encode(s,&cfg()).unwrap();
        assert_eq!(decode(&bytes,&cfg()).unwrap(),s);
    }

    #[test]
    fn output_is_byte_aligned() {
        let bytes = encode(b"mississippi$",&cfg()).unwrap();
        // pad_to_byte is the only thing that can make this anything but exact;
        // a Vec<u8> is trivially byte-aligned, so this checks decode tolerates
        // the padding bits rather than choking on trailing zeros
        assert!(decode(&bytes,&cfg()).is_ok());
    }

    #[test]
    fn missing_sentinel_is_rejected() {
        assert!(matches!(encode(b"banana",&cfg()),Err(Error::MissingSentinel)));
        assert!(matches!(encode(b"ba$nana$",&cfg()),Err(Error::MissingSentinel)));
        assert!(matches!(encode(b"",&cfg()),Err(Error::MissingSentinel)));
    }

    #[test]
    fn truncated_stream_is_rejected_cleanly() {
        let bytes = encode(b"mississippi$",&cfg()).unwrap();
        let truncated = &bytes[..bytes.len() / 2];
        assert!(decode(truncated,&cfg()).is_err());
    }

    #[test]
    fn decode_does_not_depend_on_a_fixed_code_book() {
        // the decode table is rebuilt entirely from each stream's own header, so two
        // independently produced streams for the same text must decode identically
        // even though nothing pins the header to a canonical layout
        let a = encode(b"mississippi$",&cfg()).unwrap();
        let b = encode(b"mississippi$",&cfg()).unwrap();
        assert_eq!(decode(&a,&cfg()).unwrap(),decode(&b,&cfg()).unwrap());
    }
}
