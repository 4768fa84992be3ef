use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use hashbrown::HashMap;

/// Handle to a node inside a [`Trie`].
pub type NodeId = usize;

#[derive(Clone, Debug, PartialEq)]
pub struct TrieNode {
    /// Prefix spelled by the path from the root to this node.
    pub value: String,
    /// Whether `value` is a complete dictionary word.
    pub is_leaf: bool,
    pub children: HashMap<char, NodeId>,
}

impl TrieNode {
    fn new(value: String) -> Self {
        Self {
            value,
            is_leaf: false,
            children: HashMap::new(),
        }
    }
}

/// Immutable prefix tree over a dictionary.
///
/// Nodes live in a single arena, the root is always node `0`.
#[derive(Clone, Debug, PartialEq)]
pub struct Trie {
    nodes: Vec<TrieNode>,
    word_count: usize,
}

impl Trie {
    pub const ROOT: NodeId = 0;

    /// Inserting the same word twice is harmless.
    pub fn build<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut trie = Self {
            nodes: vec![TrieNode::new(String::new())],
            word_count: 0,
        };
        for word in words {
            trie.insert(word.as_ref());
        }
        log::debug!(
            "Built trie with {} words over {} nodes",
            trie.word_count,
            trie.nodes.len()
        );
        trie
    }

    fn insert(&mut self, word: &str) {
        if word.is_empty() {
            return;
        }

        let mut node = Self::ROOT;
        for letter in word.chars() {
            node = match self.nodes[node].children.get(&letter) {
                Some(&child) => child,
                None => {
                    let mut value = self.nodes[node].value.clone();
                    value.push(letter);
                    let child = self.nodes.len();
                    self.nodes.push(TrieNode::new(value));
                    self.nodes[node].children.insert(letter, child);
                    child
                }
            };
        }

        if !self.nodes[node].is_leaf {
            self.nodes[node].is_leaf = true;
            self.word_count += 1;
        }
    }

    /// Number of distinct words stored.
    pub fn len(&self) -> usize {
        self.word_count
    }

    pub fn is_empty(&self) -> bool {
        self.word_count == 0
    }

    pub fn node(&self, id: NodeId) -> &TrieNode {
        &self.nodes[id]
    }

    /// Follows a single edge from `node`.
    pub fn step(&self, node: NodeId, letter: char) -> Option<NodeId> {
        self.nodes[node].children.get(&letter).copied()
    }

    /// Follows `s` from the root, returning the node it ends on.
    pub fn find(&self, s: &str) -> Option<NodeId> {
        s.chars()
            .try_fold(Self::ROOT, |node, letter| self.step(node, letter))
    }

    pub fn contains_word(&self, s: &str) -> bool {
        self.find(s).is_some_and(|node| self.nodes[node].is_leaf)
    }

    /// True when some stored word starts with `s`, including `s` itself.
    pub fn contains_prefix(&self, s: &str) -> bool {
        self.find(s).is_some()
    }
}
