//! Burrows-Wheeler Transform, forward (from a suffix array) and inverse (via LF-mapping).
//!
//! Forward is a direct port of `original_source/runlength_binary_bwt.py`'s
//! `RunlengthEncoder.get_bwt`. The inverse has no counterpart in that source
//! (its decoder is a stub); it is built straight from the rank/occurrence
//! description of the transform.

use crate::alphabet;
use crate::suffix_tree::SuffixTree;

/// `bwt[k] = s[(sa[k] - 1) mod n]`
pub fn forward(s: &[u8],sa: &[usize]) -> Vec<u8> {
    let n = s.len();
    sa.iter().map(|&k| s[(k + n - 1) % n]).collect()
}

/// build the suffix array via Ukkonen's tree and transform straight to BWT bytes
pub fn forward_from_text(s: &[u8]) -> Result<Vec<u8>,crate::error::Error> {
    let tree = SuffixTree::build(s)?;
    Ok(forward(s,&tree.suffix_array()))
}

/// Reconstruct the original string from its BWT via first-column rank + occurrence tables.
pub fn inverse(bwt: &[u8]) -> Vec<u8> {
    let n = bwt.len();
    let mut freq = [0usize;alphabet::A];
    for &c in bwt {
        freq[alphabet::index_of(c).expect("bwt bytes stay in-alphabet")] += 1;
    }
    let mut rank = [0usize;alphabet::A];
    let mut running = 0;
    for idx in 0..alphabet::A {
        rank[idx] = running;
        running += freq[idx];
    }

    // occ[c][i] = occurrences of c in bwt[0..=i]; only materialized for symbols present
    let mut occ: Vec<Option<Vec<usize>>> = vec![None;alphabet::A];
    for idx in 0..alphabet::A {
        if freq[idx] > 0 {
            occ[idx] = Some(vec![0;n]);
        }
    }
    for i in 0..n {
        let idx = alphabet::index_of(bwt[i]).expect("bwt bytes stay in-alphabet");
        for (c,table) in occ.iter_mut().enumerate() {
            if let Some(t) = table {
                t[i] = if i == 0 { 0 } else { t[i - 1] };
                if c == idx {
                    t[i] += 1;
                }
            }
        }
    }

    let mut out = vec![alphabet::SENTINEL];
    let mut pos = 0usize;
    let mut c = bwt[0];
    while c != alphabet::SENTINEL {
        out.push(c);
        let idx = alphabet::index_of(c).expect("bwt bytes stay in-alphabet");
        let occurrences = occ[idx].as_ref().expect("c occurs in bwt by construction");
        pos = rank[idx] + occurrences[pos] - 1;
        c = bwt[pos];
    }
    out.reverse();
    out
}
