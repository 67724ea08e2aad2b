//! Ukkonen's online suffix tree construction, and suffix array extraction by DFS.
//!
//! Ported near one-to-one from `original_source/ukkonen_algo.py`'s `SuffixTree`
//! (`skip_count`, `suffix_extension`, `suffix_link_jump`, `add_char`), but
//! restructured around a flat arena of nodes and edges with integer handles
//! instead of parent/child object references, the way the teacher keeps its
//! own graph-shaped structures (`tools/ring_buffer.rs`'s index cursor, the
//! `LZSS` match-index tree in `lzss_huff.rs`) free of `Rc`/`RefCell` cycles.

use crate::alphabet;
use crate::error::Error;

const ROOT: usize = 0;

struct Node {
    children: Vec<Option<usize>>,
    leaf_num: Option<usize>,
    suffix_link: Option<usize>
}

impl Node {
    fn internal() -> Self {
        Self { children: vec![None;alphabet::A],leaf_num: None,suffix_link: None }
    }

    fn leaf(leaf_num: usize) -> Self {
        Self { children: vec![None;alphabet::A],leaf_num: Some(leaf_num),suffix_link: None }
    }
}

struct Edge {
    start: usize,
    /// `None` means this is a leaf edge whose end is the tree's current phase (`global_end`)
    end: Option<usize>,
    child: usize
}

/// An online suffix tree over a fixed input string, built phase by phase.
pub struct SuffixTree {
    text: Vec<u8>,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    global_end: usize
}

impl SuffixTree {
    /// build the full tree for `s` in one pass; every byte of `s` must lie in the supported alphabet
    pub fn build(s: &[u8]) -> Result<Self,Error> {
        for &c in s {
            alphabet::index_of(c)?;
        }
        let mut tree = Self {
            text: s.to_vec(),
            nodes: vec![Node::internal()],
            edges: Vec::new(),
            global_end: 0
        };
        tree.nodes[ROOT].suffix_link = Some(ROOT);

        let mut active_node = ROOT;
        let mut remainder_start: i64 = 0;
        let mut remainder_end: i64 = -1;
        let mut last_j: i64 = -1;

        for phase in 0..s.len() {
            tree.global_end = phase;
            log::trace!("phase={phase} last_j={last_j}");
            let mut prev_added_node: Option<usize> = None;
            let mut j = last_j + 1;
            while j <= phase as i64 {
                let next_edge = tree.locate_next_edge(
                    &mut active_node,
                    &mut remainder_start,
                    remainder_end,
                    phase,
                    s
                )?;
                let len_rem = (remainder_end - remainder_start + 1).max(0) as usize;

                match next_edge {
                    None => {
                        // Rule 2 case 1: new leaf directly under active_node
                        let leaf = tree.push_node(Node::leaf(j as usize));
                        let edge = tree.push_edge(Edge { start: phase,end: None,child: leaf });
                        tree.nodes[active_node].children[alphabet::index_of(s[phase])?] = Some(edge);
                        if let Some(p) = prev_added_node.take() {
                            tree.nodes[p].suffix_link = Some(active_node);
                        }
                        last_j = j;
                    }
                    Some(e) => {
                        let check_pos = tree.edges[e].start + len_rem;
                        if s[check_pos] == s[phase] {
                            // Rule 3: the extension is already implicit, stop this phase entirely
                            remainder_start = tree.edges[e].start as i64;
                            remainder_end = check_pos as i64;
                            if let Some(p) = prev_added_node.take() {
                                tree.nodes[p].suffix_link = Some(active_node);
                            }
                            break;
                        }
                        // Rule 2 case 2: split the edge
                        let internal = tree.push_node(Node::internal());
                        tree.nodes[internal].suffix_link = Some(ROOT);
                        let old_child = tree.edges[e].child;
                        let old_end = tree.edges[e].end;
                        let tail_edge = tree.push_edge(Edge { start: check_pos,end: old_end,child: old_child });
                        tree.nodes[internal].children[alphabet::index_of(s[check_pos])?] = Some(tail_edge);
                        tree.edges[e].end = Some(check_pos - 1);
                        tree.edges[e].child = internal;

                        let leaf = tree.push_node(Node::leaf(j as usize));
                        let leaf_edge = tree.push_edge(Edge { start: phase,end: None,child: leaf });
                        tree.nodes[internal].children[alphabet::index_of(s[phase])?] = Some(leaf_edge);

                        if let Some(p) = prev_added_node.take() {
                            tree.nodes[p].suffix_link = Some(internal);
                        }
                        prev_added_node = Some(internal);
                        last_j = j;
                    }
                }

                // Rule 3 already broke out of the loop above; only case 1 / case 2 reach here
                if active_node == ROOT && remainder_end - remainder_start + 1 > 0 {
                    remainder_start += 1;
                } else if active_node != ROOT {
                    active_node = tree.nodes[active_node].suffix_link.unwrap_or(ROOT);
                }
                j += 1;
            }
        }
        Ok(tree)
    }

    /// Skip/count descent: locate the edge (if any) that the next comparison would land on,
    /// advancing `active_node` and `remainder_start` past whole edges along the way.
    fn locate_next_edge(
        &self,
        active_node: &mut usize,
        remainder_start: &mut i64,
        remainder_end: i64,
        phase: usize,
        s: &[u8]
    ) -> Result<Option<usize>,Error> {
        loop {
            let rl = remainder_end - *remainder_start + 1;
            if rl <= 0 {
                let idx = alphabet::index_of(s[phase])?;
                return Ok(self.nodes[*active_node].children[idx]);
            }
            let idx = alphabet::index_of(s[*remainder_start as usize])?;
            let edge = match self.nodes[*active_node].children[idx] {
                None => return Ok(None),
                Some(e) => e
            };
            let elen = self.edge_len(edge) as i64;
            if rl >= elen {
                *active_node = self.edges[edge].child;
                let new_len = rl - elen;
                if new_len > 0 {
                    *remainder_start += elen;
                } else {
                    *remainder_start = phase as i64;
                }
            } else {
                return Ok(Some(edge));
            }
        }
    }

    fn edge_len(&self,e: usize) -> usize {
        let edge = &self.edges[e];
        let end = edge.end.unwrap_or(self.global_end);
        end - edge.start + 1
    }

    fn push_node(&mut self,node: Node) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    fn push_edge(&mut self,edge: Edge) -> usize {
        self.edges.push(edge);
        self.edges.len() - 1
    }

    /// the lexicographic suffix array, by DFS over children in alphabet order
    pub fn suffix_array(&self) -> Vec<usize> {
        let mut out = Vec::with_capacity(self.text.len());
        self.dfs(ROOT,&mut out);
        out
    }

    fn dfs(&self,node: usize,out: &mut Vec<usize>) {
        if let Some(j) = self.nodes[node].leaf_num {
            out.push(j);
            return;
        }
        for idx in 0..alphabet::A {
            if let Some(e) = self.nodes[node].children[idx] {
                self.dfs(self.edges[e].child,out);
            }
        }
    }

    /// 1-indexed rank of text position `position` within the suffix array, i.e.
    /// `1 + suffix_array().index(position)`. `None` if `position` is outside `[0,text.len())`.
    pub fn rank_of(&self,position: usize) -> Option<usize> {
        if position >= self.text.len() {
            return None;
        }
        let sa = self.suffix_array();
        sa.iter().position(|&p| p == position).map(|i| i + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brute_force_sa(s: &[u8]) -> Vec<usize> {
        let mut idx: Vec<usize> = (0..s.len()).collect();
        idx.sort_by(|&a,&b| s[a..].cmp(&s[b..]));
        idx
    }

    fn check(s: &[u8]) {
        let tree = SuffixTree::build(s).unwrap();
        assert_eq!(tree.suffix_array(),brute_force_sa(s),"mismatch for {:?}",String::from_utf8_lossy(s));
    }

    #[test]
    fn minimal_a() {
        let tree = SuffixTree::build(b"a$").unwrap();
        assert_eq!(tree.suffix_array(),vec![1,0]);
    }

    #[test]
    fn classic_banana() {
        let tree = SuffixTree::build(b"banana$").unwrap();
        assert_eq!(tree.suffix_array(),vec![6,5,3,1,0,4,2]);
    }

    #[test]
    fn single_unique_letter() {
        check(b"aaaa$");
    }

    #[test]
    fn mississippi_runs() {
        check(b"mississippi$");
    }

    #[test]
    fn repeated_substrings_and_overlaps() {
        check(b"abcabcabcabc$");
        check(b"aabaabaaab$");
        check(b"zzzzzzzzzz$");
        check(b"~%~%~%~%~$");
    }

    #[test]
    fn rejects_out_of_alphabet_input() {
        assert!(SuffixTree::build(b"ab\x01$").is_err());
    }

    #[test]
    fn long_story_opening_suffix_array() {
        let s = super::test_fixtures::LONG_STORY_OPENING.as_bytes();
        check(s);
    }

    #[test]
    fn rank_of_matches_suffix_array_position() {
        // SA for "banana$" is [6,5,3,1,0,4,2]; position 0 ("banana$") is rank 5,
        // position 2 ("nana$") is rank 7, the sentinel at position 6 is rank 1.
        let tree = SuffixTree::build(b"banana$").unwrap();
        assert_eq!(tree.rank_of(6),Some(1));
        assert_eq!(tree.rank_of(5),Some(2));
        assert_eq!(tree.rank_of(0),Some(5));
        assert_eq!(tree.rank_of(2),Some(7));
    }

    #[test]
    fn rank_of_rejects_out_of_range_position() {
        let tree = SuffixTree::build(b"banana$").unwrap();
        assert_eq!(tree.rank_of(7),None);
        assert_eq!(tree.rank_of(100),None);
    }
}

#[cfg(test)]
pub(crate) mod test_fixtures {
    /// ~525 alphabet-valid characters ending in the sentinel, used by several modules'
    /// "long input" scenario tests. Spaces are replaced with `_` since the supported
    /// alphabet starts at 36 and excludes the space character.
    pub const LONG_STORY_OPENING: &str = concat!(
        "It_was_the_best_of_times:_a_cold_clear_morning_when_the_suffix_links_all_pointed_home,_",
        "the_active_point_sat_at_the_root,_and_the_remainder_was_empty_for_once._Every_edge_we_had_",
        "split_that_winter_still_carried_its_old_child_faithfully,_and_the_global_end_crept_forward_",
        "one_phase_at_a_time,_patient_as_a_tide._We_did_not_know_yet_how_many_leaves_the_string_would_",
        "need,_only_that_each_one_would_find_its_place,_sorted,_in_the_end,_the_way_every_suffix_",
        "eventually_does_when_you_give_it_enough_phases_and_a_little_bit_of_luck.$"
    );
}
