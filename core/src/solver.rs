use alloc::collections::BTreeSet;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use smallvec::SmallVec;

use crate::*;

/// Copy-on-branch set of visited tiles.
///
/// Each search path owns its own copy, boards up to 128 tiles fit inline.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TileSet {
    words: SmallVec<[u64; 2]>,
}

impl TileSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, index: TileIndex) -> bool {
        let (word, bit) = Self::locate(index);
        self.words.get(word).is_some_and(|bits| bits & bit != 0)
    }

    /// Returns a copy that also contains `index`.
    pub fn with(&self, index: TileIndex) -> Self {
        let (word, bit) = Self::locate(index);
        let mut next = self.clone();
        if next.words.len() <= word {
            next.words.resize(word + 1, 0);
        }
        next.words[word] |= bit;
        next
    }

    pub fn len(&self) -> usize {
        self.words.iter().map(|bits| bits.count_ones() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&bits| bits == 0)
    }

    const fn locate(index: TileIndex) -> (usize, u64) {
        let index = index as usize;
        (index / 64, 1 << (index % 64))
    }
}

/// Pending search step: the path so far ends on `tile`.
#[derive(Clone, Debug)]
struct WorkItem {
    tile: TileIndex,
    word: String,
    node: NodeId,
    visited: TileSet,
}

/// Enumerates every dictionary word spelled by a simple path of linked tiles.
///
/// Depth-first with an explicit stack. Paths whose letters are not a prefix
/// of any dictionary word are pruned.
pub fn find_all(board: &Board, dictionary: &Trie) -> BTreeSet<String> {
    let mut found = BTreeSet::new();
    let mut stack: Vec<WorkItem> = board
        .tiles()
        .iter()
        .filter_map(|tile| {
            let node = dictionary.step(Trie::ROOT, tile.value)?;
            Some(WorkItem {
                tile: tile.index,
                word: String::from(tile.value),
                node,
                visited: TileSet::new().with(tile.index),
            })
        })
        .collect();

    let mut explored: u64 = 0;
    while let Some(item) = stack.pop() {
        explored += 1;

        if dictionary.node(item.node).is_leaf {
            found.insert(item.word.clone());
        }

        for &next in &board[item.tile].links {
            if item.visited.contains(next) {
                continue;
            }
            let letter = board[next].value;
            // an unknown prefix is pruned before it is ever pushed
            let Some(node) = dictionary.step(item.node, letter) else {
                continue;
            };
            let mut word = item.word.clone();
            word.push(letter);
            stack.push(WorkItem {
                tile: next,
                word,
                node,
                visited: item.visited.with(next),
            });
        }
    }

    log::trace!(
        "Explored {} paths on a {}x{} board, found {} words",
        explored,
        board.width(),
        board.height(),
        found.len()
    );
    found
}

/// Finds one simple path of linked tiles spelling `word`.
pub fn trace_word(board: &Board, word: &str) -> Option<Vec<TileIndex>> {
    let letters: Vec<char> = word.chars().collect();
    let (&first, _) = letters.split_first()?;

    let mut stack: Vec<Vec<TileIndex>> = board
        .tiles()
        .iter()
        .rev()
        .filter(|tile| tile.value == first)
        .map(|tile| vec![tile.index])
        .collect();

    while let Some(path) = stack.pop() {
        if path.len() == letters.len() {
            return Some(path);
        }
        let expected = letters[path.len()];
        let last = path[path.len() - 1];
        for &next in board[last].links.iter().rev() {
            if board[next].value == expected && !path.contains(&next) {
                let mut extended = path.clone();
                extended.push(next);
                stack.push(extended);
            }
        }
    }
    None
}

/// Whether `path` is a simple chain of linked tiles.
pub fn is_simple_path(board: &Board, path: &[TileIndex]) -> bool {
    let mut seen = TileSet::new();
    for (i, &index) in path.iter().enumerate() {
        if board.tile(index.into()).is_none() || seen.contains(index) {
            return false;
        }
        if i > 0 && !board.are_linked(path[i - 1], index) {
            return false;
        }
        seen = seen.with(index);
    }
    true
}
