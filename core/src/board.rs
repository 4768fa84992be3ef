use alloc::string::String;
use alloc::vec::Vec;
use core::ops::Index;

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Adjacent tile indices, a tile never has more than eight.
pub type Links = SmallVec<[TileIndex; 8]>;

/// One letter cell of the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub index: TileIndex,
    pub value: char,
    pub links: Links,
}

impl Tile {
    pub fn is_linked_to(&self, other: TileIndex) -> bool {
        self.links.contains(&other)
    }
}

/// Rectangular grid of letter tiles stored in row-major order.
///
/// Adjacency depends only on the board size, never on the letters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    size: Size2,
    tiles: Vec<Tile>,
}

impl Board {
    pub fn new((width, height): Size2, letters: &[char]) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(PuzzleError::InvalidDimensions);
        }

        let total = usize::from(area(width, height));
        if letters.len() != total {
            return Err(PuzzleError::MalformedBoardInput {
                expected: total,
                actual: letters.len(),
            });
        }

        let tiles = letters
            .iter()
            .enumerate()
            .map(|(index, &value)| Tile {
                index: index as TileIndex,
                value,
                links: neighbor_links(index, width.into(), height.into()),
            })
            .collect();

        Ok(Self {
            size: (width, height),
            tiles,
        })
    }

    pub fn from_letters(size: Size2, letters: &str) -> Result<Self> {
        let letters: Vec<char> = letters.chars().collect();
        Self::new(size, &letters)
    }

    pub fn size(&self) -> Size2 {
        self.size
    }

    pub fn width(&self) -> Dim {
        self.size.0
    }

    pub fn height(&self) -> Dim {
        self.size.1
    }

    pub fn total_tiles(&self) -> usize {
        self.tiles.len()
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tile(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    pub fn validate_index(&self, index: usize) -> Result<TileIndex> {
        if index < self.tiles.len() {
            Ok(index as TileIndex)
        } else {
            Err(PuzzleError::InvalidTileIndex(index))
        }
    }

    pub fn are_linked(&self, a: TileIndex, b: TileIndex) -> bool {
        self.tile(a.into()).is_some_and(|tile| tile.is_linked_to(b))
    }

    /// `(row, column)` of a tile.
    pub fn position(&self, index: TileIndex) -> (usize, usize) {
        let width = usize::from(self.width());
        (usize::from(index) / width, usize::from(index) % width)
    }

    /// All letters in row-major order.
    pub fn letters(&self) -> String {
        self.tiles.iter().map(|tile| tile.value).collect()
    }

    /// Letters shaped as `(rows, columns)`.
    pub fn grid(&self) -> Array2<char> {
        let width = usize::from(self.width());
        let height = usize::from(self.height());
        Array2::from_shape_fn((height, width), |(row, col)| {
            self.tiles[row * width + col].value
        })
    }

    /// Letters spelled by following `path`.
    pub fn spell(&self, path: &[TileIndex]) -> Option<String> {
        path.iter()
            .map(|&index| self.tile(index.into()).map(|tile| tile.value))
            .collect()
    }
}

impl Index<TileIndex> for Board {
    type Output = Tile;

    fn index(&self, index: TileIndex) -> &Self::Output {
        &self.tiles[usize::from(index)]
    }
}

/// Scans the 3x3 block centred on `x` and keeps the candidates that neither
/// leave the board nor wrap around a wall.
fn neighbor_links(x: usize, width: usize, height: usize) -> Links {
    let total = (width * height) as isize;
    let (row, col) = (x / width, x % width);
    let (x, w) = (x as isize, width as isize);

    let candidates = [
        x - w - 1,
        x - w,
        x - w + 1,
        x - 1,
        x,
        x + 1,
        x + w - 1,
        x + w,
        x + w + 1,
    ];

    candidates
        .into_iter()
        .enumerate()
        .filter(|&(i, candidate)| {
            let blocked = candidate == x
                || candidate < 0
                || candidate >= total
                || (col == 0 && i % 3 == 0)
                || (col == width - 1 && i % 3 == 2)
                || (row == 0 && i < 3)
                || (row == height - 1 && i > 5);
            !blocked
        })
        .map(|(_, candidate)| candidate as TileIndex)
        .collect()
}
