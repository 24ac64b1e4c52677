use once_cell::sync::Lazy;

use crate::error::GameError;
use crate::types::{BOARD_HEIGHT, Piece, PieceId, PieceKind, Position, Side};

const MAX_PIECES: usize = 32;
const NUM_CELLS: usize = 90;

/// Red's half of the opening layout as `(kind, x, y)`. Black mirrors it on `9 - y`.
const RED_OPENING: [(PieceKind, u8, u8); 16] = [
    (PieceKind::Soldier, 0, 6),
    (PieceKind::Soldier, 2, 6),
    (PieceKind::Soldier, 4, 6),
    (PieceKind::Soldier, 6, 6),
    (PieceKind::Soldier, 8, 6),
    (PieceKind::Cannon, 1, 7),
    (PieceKind::Cannon, 7, 7),
    (PieceKind::Rook, 0, 9),
    (PieceKind::Rook, 8, 9),
    (PieceKind::Horse, 1, 9),
    (PieceKind::Horse, 7, 9),
    (PieceKind::Elephant, 2, 9),
    (PieceKind::Elephant, 6, 9),
    (PieceKind::Advisor, 3, 9),
    (PieceKind::Advisor, 5, 9),
    (PieceKind::General, 4, 9),
];

static OPENING: Lazy<Board> = Lazy::new(|| {
    let mut board = Board::empty();
    for (kind, x, y) in RED_OPENING {
        board.insert(Piece::new(kind, Side::Red), Position { x, y });
        board.insert(
            Piece::new(kind, Side::Black),
            Position {
                x,
                y: BOARD_HEIGHT - 1 - y,
            },
        );
    }
    board
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Travel along a row; `y` stays fixed.
    Horizontal,
    /// Travel along a column; `x` stays fixed.
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Slot {
    piece: Piece,
    pos: Position,
}

/// Xiangqi board: a fixed arena of piece slots plus a cell index.
///
/// The board is a plain value. Copying it yields a snapshot that shares
/// nothing with the original.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    slots: [Option<Slot>; MAX_PIECES],
    cells: [Option<PieceId>; NUM_CELLS],
}

impl Board {
    pub fn empty() -> Self {
        Self {
            slots: [None; MAX_PIECES],
            cells: [None; NUM_CELLS],
        }
    }

    /// Returns the standard opening layout, 16 pieces per side.
    pub fn opening() -> Self {
        *OPENING
    }

    /// Puts a new piece on an empty cell.
    pub fn place(&mut self, piece: Piece, pos: Position) -> Result<PieceId, GameError> {
        if self.cells[pos.index()].is_some() {
            return Err(GameError::Occupied(pos));
        }
        if self.slots.iter().all(Option::is_some) {
            return Err(GameError::BoardFull);
        }
        Ok(self.insert(piece, pos))
    }

    pub fn piece_at(&self, pos: Position) -> Option<(PieceId, Piece)> {
        let id = self.cells[pos.index()]?;
        self.get(id).map(|piece| (id, piece))
    }

    pub fn get(&self, id: PieceId) -> Option<Piece> {
        self.slot(id).map(|slot| slot.piece)
    }

    pub fn position_of(&self, id: PieceId) -> Option<Position> {
        self.slot(id).map(|slot| slot.pos)
    }

    /// Iterates live pieces in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (PieceId, Piece, Position)> + '_ {
        self.slots.iter().enumerate().filter_map(|(i, slot)| {
            slot.map(|slot| (PieceId(i as u8), slot.piece, slot.pos))
        })
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Takes a piece off the board and returns it.
    pub fn remove(&mut self, id: PieceId) -> Option<Piece> {
        let slot = self.slots.get_mut(id.0 as usize)?.take()?;
        self.cells[slot.pos.index()] = None;
        Some(slot.piece)
    }

    /// Moves a live piece to `to`.
    /// Caller contract: `to` is empty or already vacated by a capture.
    pub fn relocate(&mut self, id: PieceId, to: Position) -> Result<(), GameError> {
        let slot = self
            .slots
            .get_mut(id.0 as usize)
            .and_then(Option::as_mut)
            .ok_or(GameError::MissingPiece(id))?;
        if let Some(other) = self.cells[to.index()]
            && other != id
        {
            return Err(GameError::Occupied(to));
        }

        self.cells[slot.pos.index()] = None;
        slot.pos = to;
        self.cells[to.index()] = Some(id);
        Ok(())
    }

    /// Finds the closest piece to `from` along `axis`, strictly past it in the
    /// increasing (`toward_larger`) or decreasing direction. `from` itself is
    /// never reported, occupied or not.
    pub fn nearest_on_line(
        &self,
        from: Position,
        axis: Axis,
        toward_larger: bool,
    ) -> Option<(PieceId, Piece, Position)> {
        let step = if toward_larger { 1 } else { -1 };
        let (dx, dy) = match axis {
            Axis::Horizontal => (step, 0),
            Axis::Vertical => (0, step),
        };

        let mut cursor = from.offset(dx, dy);
        while let Some(pos) = cursor {
            if let Some((id, piece)) = self.piece_at(pos) {
                return Some((id, piece, pos));
            }
            cursor = pos.offset(dx, dy);
        }
        None
    }

    fn slot(&self, id: PieceId) -> Option<&Slot> {
        self.slots.get(id.0 as usize)?.as_ref()
    }

    fn insert(&mut self, piece: Piece, pos: Position) -> PieceId {
        debug_assert!(self.cells[pos.index()].is_none());
        let free = self
            .slots
            .iter()
            .position(Option::is_none)
            .unwrap_or_else(|| unreachable!("insert() called on a full board"));
        let id = PieceId(free as u8);
        self.slots[free] = Some(Slot { piece, pos });
        self.cells[pos.index()] = Some(id);
        id
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::opening()
    }
}
