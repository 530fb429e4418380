//! Assignment trie binding key sequences to targets
//!
//! Edges are single hint keys. Sequences sharing a prefix share the
//! branch nodes of that prefix, so one keystroke eliminates every sibling
//! subtree at once. Children keep insertion order, which for generated
//! sequences is the order of the hint keys.

use indexmap::map::Values;
use indexmap::IndexMap;

use super::hint::HintHandle;

/// A leaf owns the hint of exactly one target
#[derive(Debug, Clone)]
pub struct Leaf {
    /// Position of the target in the round's target list
    pub index: usize,
    pub hint: HintHandle,
}

#[derive(Debug, Clone)]
pub enum HintNode {
    Leaf(Leaf),
    Branch(IndexMap<char, HintNode>),
}

/// Render the label text for a sequence
pub fn render_hint_text(sequence: &[char], capitalize: bool) -> String {
    let text: String = sequence.iter().collect();
    if capitalize {
        text.to_uppercase()
    } else {
        text
    }
}

impl HintNode {
    /// Build a trie where `sequences[i]` leads to the leaf for target `i`
    ///
    /// `hint_factory` is called once per sequence, in order. Sequences are
    /// expected to be distinct and of equal length, as produced by
    /// [`generate_key_sequences`](super::sequence::generate_key_sequences).
    pub fn build<F>(sequences: &[Vec<char>], mut hint_factory: F) -> HintNode
    where
        F: FnMut(&[char]) -> HintHandle,
    {
        let mut root = HintNode::Branch(IndexMap::new());
        for (index, seq) in sequences.iter().enumerate() {
            let hint = hint_factory(seq);
            let inserted = root.insert(seq, Leaf { index, hint });
            debug_assert!(inserted, "sequence {:?} collides with another sequence", seq);
            if !inserted {
                log::error!("Hint sequence {:?} collides with another sequence", seq);
            }
        }
        root
    }

    fn insert(&mut self, seq: &[char], leaf: Leaf) -> bool {
        let Some((&last, prefix)) = seq.split_last() else {
            return false;
        };

        let mut node = self;
        for &key in prefix {
            let HintNode::Branch(children) = node else {
                return false;
            };
            node = children
                .entry(key)
                .or_insert_with(|| HintNode::Branch(IndexMap::new()));
        }

        match node {
            HintNode::Branch(children) if !children.contains_key(&last) => {
                children.insert(last, HintNode::Leaf(leaf));
                true
            }
            _ => false,
        }
    }

    /// Child reached by `key`, if this is a branch holding one
    pub fn child(&self, key: char) -> Option<&HintNode> {
        match self {
            HintNode::Branch(children) => children.get(&key),
            HintNode::Leaf(_) => None,
        }
    }

    /// Follow `seq` from this node down to a leaf
    pub fn lookup(&self, seq: &[char]) -> Option<&Leaf> {
        let mut node = self;
        for &key in seq {
            node = node.child(key)?;
        }
        match node {
            HintNode::Leaf(leaf) => Some(leaf),
            HintNode::Branch(_) => None,
        }
    }

    /// Depth-first iterator over every leaf below this node
    pub fn leaves(&self) -> Leaves<'_> {
        match self {
            HintNode::Leaf(leaf) => Leaves {
                stack: Vec::new(),
                single: Some(leaf),
            },
            HintNode::Branch(children) => Leaves {
                stack: vec![children.values()],
                single: None,
            },
        }
    }

    /// Target indices of every leaf below this node, in DFS order
    pub fn leaf_indices(&self) -> Vec<usize> {
        self.leaves().map(|leaf| leaf.index).collect()
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves().count()
    }
}

/// Depth-first leaf iterator, see [`HintNode::leaves`]
pub struct Leaves<'a> {
    stack: Vec<Values<'a, char, HintNode>>,
    single: Option<&'a Leaf>,
}

impl<'a> Iterator for Leaves<'a> {
    type Item = &'a Leaf;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(leaf) = self.single.take() {
            return Some(leaf);
        }
        loop {
            let top = self.stack.last_mut()?;
            match top.next() {
                Some(HintNode::Leaf(leaf)) => return Some(leaf),
                Some(HintNode::Branch(children)) => self.stack.push(children.values()),
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jump::sequence::generate_key_sequences;

    fn build(count: usize, keys: &str, capitalize: bool) -> (Vec<Vec<char>>, HintNode) {
        let keys: Vec<char> = keys.chars().collect();
        let seqs = generate_key_sequences(count, &keys).unwrap();
        let trie = HintNode::build(&seqs, |seq| HintHandle::new(render_hint_text(seq, capitalize)));
        (seqs, trie)
    }

    #[test]
    fn test_every_sequence_reaches_its_target() {
        let (seqs, trie) = build(37, "fjdksla;", false);
        for (i, seq) in seqs.iter().enumerate() {
            let leaf = trie.lookup(seq).expect("leaf for sequence");
            assert_eq!(leaf.index, i);
            assert_eq!(leaf.hint.text(), seq.iter().collect::<String>());
        }
    }

    #[test]
    fn test_shared_prefixes_share_branches() {
        let (_, trie) = build(3, "xy", false);
        let HintNode::Branch(root) = &trie else {
            panic!("root must be a branch");
        };
        assert_eq!(root.keys().copied().collect::<Vec<_>>(), vec!['x', 'y']);
        assert_eq!(trie.child('x').unwrap().leaf_indices(), vec![0, 1]);
        assert_eq!(trie.child('y').unwrap().leaf_indices(), vec![2]);
        assert!(trie.child('z').is_none());
    }

    #[test]
    fn test_leaves_visit_each_leaf_once() {
        for count in [1, 2, 8, 9, 64, 65, 100] {
            let (_, trie) = build(count, "fjdksla;", false);
            assert_eq!(trie.leaf_indices(), (0..count).collect::<Vec<_>>());
            assert_eq!(trie.leaf_count(), count);
        }
    }

    #[test]
    fn test_capitalized_hint_text() {
        let (_, trie) = build(3, "ab;", true);
        let texts: Vec<String> = trie.leaves().map(|leaf| leaf.hint.text()).collect();
        assert_eq!(texts, vec!["A", "B", ";"]);
    }

    #[test]
    fn test_lookup_partial_sequence_is_none() {
        let (_, trie) = build(5, "ab", false);
        assert!(trie.lookup(&['a']).is_none());
        assert!(trie.lookup(&['a', 'a', 'a']).is_some());
    }

    #[test]
    fn test_leaf_node_iterates_itself() {
        let node = HintNode::Leaf(Leaf {
            index: 7,
            hint: HintHandle::new("q"),
        });
        assert_eq!(node.leaf_indices(), vec![7]);
    }
}
