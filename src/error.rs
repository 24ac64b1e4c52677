use thiserror::Error;

use crate::types::{PieceId, Position, Side};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("({x}, {y}) is outside the 9x10 board")]
    OutOfBounds { x: i32, y: i32 },
    #[error("cell {0} is already occupied")]
    Occupied(Position),
    #[error("board already holds the maximum number of pieces")]
    BoardFull,
    #[error("{0:?} holds no live piece")]
    MissingPiece(PieceId),
    #[error("no piece at {0}")]
    NoPieceAt(Position),
    #[error("it is {0:?}'s turn")]
    NotYourTurn(Side),
    #[error("illegal move from {from} to {to}")]
    IllegalMove { from: Position, to: Position },
}
