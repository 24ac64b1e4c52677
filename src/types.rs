use std::fmt;

use serde::Serialize;

use crate::error::GameError;

pub const BOARD_WIDTH: u8 = 9;
pub const BOARD_HEIGHT: u8 = 10;

/// The two players. Red moves first and starts on rows 5..=9.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Red,
    Black,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Self::Red => Self::Black,
            Self::Black => Self::Red,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    General,
    Advisor,
    Elephant,
    Horse,
    Rook,
    Cannon,
    Soldier,
}

impl PieceKind {
    pub fn chinese_char(self, side: Side) -> char {
        match (side, self) {
            (Side::Red, Self::General) => '帥',
            (Side::Red, Self::Advisor) => '仕',
            (Side::Red, Self::Elephant) => '相',
            (Side::Red, Self::Horse) => '傌',
            (Side::Red, Self::Rook) => '俥',
            (Side::Red, Self::Cannon) => '炮',
            (Side::Red, Self::Soldier) => '兵',
            (Side::Black, Self::General) => '將',
            (Side::Black, Self::Advisor) => '士',
            (Side::Black, Self::Elephant) => '象',
            (Side::Black, Self::Horse) => '馬',
            (Side::Black, Self::Rook) => '車',
            (Side::Black, Self::Cannon) => '砲',
            (Side::Black, Self::Soldier) => '卒',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub side: Side,
}

impl Piece {
    pub const fn new(kind: PieceKind, side: Side) -> Self {
        Self { kind, side }
    }

    pub fn chinese_char(&self) -> char {
        self.kind.chinese_char(self.side)
    }
}

/// A cell on the 9x10 board. Holding a `Position` means the cell is on-board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Position {
    pub x: u8,
    pub y: u8,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Result<Self, GameError> {
        if !(0..BOARD_WIDTH as i32).contains(&x) || !(0..BOARD_HEIGHT as i32).contains(&y) {
            return Err(GameError::OutOfBounds { x, y });
        }
        Ok(Self {
            x: x as u8,
            y: y as u8,
        })
    }

    /// Returns the neighbouring cell `(dx, dy)` away, or `None` off the board.
    pub fn offset(self, dx: i32, dy: i32) -> Option<Self> {
        Self::new(self.x as i32 + dx, self.y as i32 + dy).ok()
    }

    pub(crate) fn index(self) -> usize {
        self.y as usize * BOARD_WIDTH as usize + self.x as usize
    }

    /// All 90 cells in row-major order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..BOARD_HEIGHT).flat_map(|y| (0..BOARD_WIDTH).map(move |x| Self { x, y }))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Slot handle into the board's piece arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PieceId(pub(crate) u8);

/// A piece as the presentation layer draws it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PieceView {
    pub kind: PieceKind,
    pub side: Side,
    pub x: u8,
    pub y: u8,
    pub glyph: char,
}

/// One executed move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoveRecord {
    pub from: Position,
    pub to: Position,
    pub kind: PieceKind,
    pub side: Side,
    /// Contract:
    /// - `Some(kind)` when the move removed an enemy piece from `to`.
    /// - `None` when `to` was empty.
    pub captured: Option<PieceKind>,
}

/// Public game state returned from WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub pieces: Vec<PieceView>,
    pub active_side: Side,
    /// Contract:
    /// - `Some` exactly when a piece of `active_side` is selected.
    pub selected: Option<Position>,
    /// Legal targets of the selected piece; empty when nothing is selected.
    pub destinations: Vec<Position>,
    pub history_len: usize,
    pub last_move: Option<MoveRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_rejects_off_board_coordinates() {
        assert!(Position::new(0, 0).is_ok());
        assert!(Position::new(8, 9).is_ok());

        for (x, y) in [(-1, 0), (9, 0), (0, -1), (0, 10), (i32::MAX, 3)] {
            let err = Position::new(x, y).unwrap_err();
            assert_eq!(err, GameError::OutOfBounds { x, y });
        }
    }

    #[test]
    fn all_positions_are_row_major_and_indexed_densely() {
        let cells: Vec<Position> = Position::all().collect();

        assert_eq!(cells.len(), 90);
        assert_eq!(cells[0], Position { x: 0, y: 0 });
        assert_eq!(cells[9], Position { x: 0, y: 1 });
        assert!(cells.iter().enumerate().all(|(i, p)| p.index() == i));
    }

    #[test]
    fn offset_stops_at_the_edge() {
        let corner = Position::new(8, 9).unwrap();

        assert_eq!(corner.offset(-1, 0), Some(Position { x: 7, y: 9 }));
        assert_eq!(corner.offset(1, 0), None);
        assert_eq!(corner.offset(0, 1), None);
    }

    #[test]
    fn glyphs_differ_per_side() {
        assert_eq!(PieceKind::General.chinese_char(Side::Red), '帥');
        assert_eq!(PieceKind::General.chinese_char(Side::Black), '將');
        assert_eq!(Side::Red.opponent(), Side::Black);
        assert_eq!(Side::Black.opponent(), Side::Red);
    }
}
