use alloc::string::String;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::*;

/// Result of activating (tapping) a tile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectionEvent {
    /// The tile was appended to the current path.
    Extended,
    /// The tile was not linked to the path's end, a new path starts at it.
    Restarted,
    /// The tile was already on the path, the selection was dropped.
    Cleared,
    /// The path's last tile was activated again, its word is ready to submit.
    Submitted(String),
}

/// Player's in-progress path of tiles.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    path: Vec<TileIndex>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn path(&self) -> &[TileIndex] {
        &self.path
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    pub fn last(&self) -> Option<TileIndex> {
        self.path.last().copied()
    }

    pub fn clear(&mut self) {
        self.path.clear();
    }

    pub fn current_word(&self, board: &Board) -> String {
        self.path.iter().map(|&index| board[index].value).collect()
    }

    /// Tiles the path can continue to.
    pub fn highlighted<'b>(&self, board: &'b Board) -> &'b [TileIndex] {
        match self.last() {
            Some(last) => board[last].links.as_slice(),
            None => &[],
        }
    }

    pub fn activate(&mut self, board: &Board, tile: usize) -> Result<SelectionEvent> {
        let tile = board.validate_index(tile)?;

        let Some(last) = self.last() else {
            self.path.push(tile);
            return Ok(SelectionEvent::Extended);
        };

        if tile == last {
            let word = self.current_word(board);
            self.path.clear();
            return Ok(SelectionEvent::Submitted(word));
        }

        let touching = board.are_linked(last, tile);
        let already_selected = self.path.contains(&tile);
        Ok(match (touching, already_selected) {
            (true, false) => {
                self.path.push(tile);
                SelectionEvent::Extended
            }
            (false, _) => {
                self.path.clear();
                self.path.push(tile);
                SelectionEvent::Restarted
            }
            (true, true) => {
                self.path.clear();
                SelectionEvent::Cleared
            }
        })
    }
}
