//! Canonical-shape Huffman coding over the fixed printable-ASCII alphabet.
//!
//! The build procedure is a direct translation of `original_source/
//! runlength_binary_bwt.py`'s `HuffmanCode` (a min-heap of nodes merged two at
//! a time), swapped from a list-based heap to `std::collections::BinaryHeap`.
//! Decoding walks a small bit-trie one bit at a time, in the spirit of the
//! `search_tree`-style tree walk used for Huffman decoding elsewhere in the
//! retrieval pack (e.g. `rcrook11-huffman`).

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use crate::alphabet;
use crate::bitbuf::{BitBuf,BitCursor};
use crate::error::Error;

enum Node {
    Leaf(u8),
    Internal(Box<Node>,Box<Node>)
}

/// heap entry ordered by frequency ascending, ties broken by insertion order
struct HeapItem {
    freq: usize,
    seq: u64,
    node: Node
}

impl PartialEq for HeapItem {
    fn eq(&self,other: &Self) -> bool {
        self.freq == other.freq && self.seq == other.seq
    }
}
impl Eq for HeapItem {}
impl PartialOrd for HeapItem {
    fn partial_cmp(&self,other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for HeapItem {
    fn cmp(&self,other: &Self) -> Ordering {
        self.freq.cmp(&other.freq).then(self.seq.cmp(&other.seq))
    }
}

fn build_tree(freq: &[usize]) -> Node {
    // BinaryHeap is a max-heap; wrap in Reverse so the smallest (freq,seq) pops first
    use std::cmp::Reverse;
    let mut heap: BinaryHeap<Reverse<HeapItem>> = BinaryHeap::new();
    let mut seq: u64 = 0;
    for idx in 0..alphabet::A {
        if freq[idx] > 0 {
            heap.push(Reverse(HeapItem { freq: freq[idx],seq,node: Node::Leaf(alphabet::char_of(idx)) }));
            seq += 1;
        }
    }
    while heap.len() > 1 {
        let Reverse(a) = heap.pop().expect("len() > 1 checked above");
        let Reverse(b) = heap.pop().expect("len() > 1 checked above");
        let combined = Node::Internal(Box::new(a.node),Box::new(b.node));
        heap.push(Reverse(HeapItem { freq: a.freq + b.freq,seq,node: combined }));
        seq += 1;
    }
    heap.pop().expect("caller guarantees at least one symbol with nonzero frequency").0.node
}

fn assign_codes(node: Node,prefix: BitBuf,table: &mut [Option<BitBuf>]) {
    match node {
        Node::Leaf(c) => {
            // a tree with a single leaf and no internal nodes would otherwise get an
            // empty code, which breaks run-length parsing; special-case it to "0"
            let code = if prefix.is_empty() {
                let mut single = BitBuf::new();
                single.push_bit(false);
                single
            } else {
                prefix
            };
            table[alphabet::index_of(c).expect("leaf chars are always in-alphabet")] = Some(code);
        }
        Node::Internal(left,right) => {
            let mut lp = prefix.clone();
            lp.push_bit(false);
            assign_codes(*left,lp,table);
            let mut rp = prefix;
            rp.push_bit(true);
            assign_codes(*right,rp,table);
        }
    }
}

/// Encoding side: a frequency-derived prefix code, one entry per alphabet index.
pub struct HuffmanCodec {
    encoding: Vec<Option<BitBuf>>
}

impl HuffmanCodec {
    /// build from a frequency table indexed by alphabet index; at least one
    /// entry must be nonzero
    pub fn build(freq: &[usize]) -> Self {
        debug_assert_eq!(freq.len(),alphabet::A);
        let tree = build_tree(freq);
        let mut table: Vec<Option<BitBuf>> = vec![None; alphabet::A];
        assign_codes(tree,BitBuf::new(),&mut table);
        Self { encoding: table }
    }

    pub fn encode(&self,c: u8) -> Result<BitBuf,Error> {
        let idx = alphabet::index_of(c)?;
        self.encoding[idx].clone().ok_or(Error::UnknownSymbol(c))
    }
}

struct TrieNode {
    zero: Option<Box<TrieNode>>,
    one: Option<Box<TrieNode>>,
    symbol: Option<u8>
}

impl TrieNode {
    fn new() -> Self {
        Self { zero: None,one: None,symbol: None }
    }
}

/// Decoding side: the prefix-code trie built from header entries `(code, char)`.
pub struct DecodeTree {
    root: TrieNode
}

impl DecodeTree {
    pub fn new() -> Self {
        Self { root: TrieNode::new() }
    }

    /// register `code -> symbol`; fails if the same code string was already inserted
    pub fn insert(&mut self,code: &BitBuf,symbol: u8) -> Result<(),Error> {
        let mut node = &mut self.root;
        for i in 0..code.len() {
            let bit = code.get(i).expect("i < code.len()");
            let branch = if bit { &mut node.one } else { &mut node.zero };
            if branch.is_none() {
                *branch = Some(Box::new(TrieNode::new()));
            }
            node = branch.as_mut().unwrap();
        }
        if node.symbol.is_some() {
            return Err(Error::MalformedHeader(format!("duplicate Huffman code for byte {symbol}")));
        }
        node.symbol = Some(symbol);
        Ok(())
    }

    /// consume the shortest prefix of `cursor` that is a registered code, returning its symbol
    pub fn decode_next(&self,cursor: &mut BitCursor) -> Result<u8,Error> {
        let mut node = &self.root;
        loop {
            if let Some(sym) = node.symbol {
                return Ok(sym);
            }
            let bit = cursor.read_bit().ok_or(Error::AmbiguousCode)?;
            node = match bit {
                false => node.zero.as_deref().ok_or(Error::AmbiguousCode)?,
                true => node.one.as_deref().ok_or(Error::AmbiguousCode)?
            };
        }
    }
}

impl Default for DecodeTree {
    fn default() -> Self {
        Self::new()
    }
}
