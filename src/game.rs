use log::{debug, warn};
use serde::Serialize;

use crate::board::Board;
use crate::config::GameConfig;
use crate::error::GameError;
use crate::history::History;
use crate::rules;
use crate::types::{GameState, MoveRecord, Piece, PieceId, PieceView, Position, Side};

/// Selection state driven by [`Game::cell_tapped`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Idle,
    Selected(PieceId),
}

/// What a single tap did, for the presentation layer to react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TapOutcome {
    /// Idle tap on an empty cell or an opponent piece.
    Ignored,
    Selected(Position),
    /// Another piece of the side to move took over the selection.
    Reselected(Position),
    Moved(MoveRecord),
    /// The selection was dropped without moving.
    Deselected,
}

/// One game session: board, side to move, selection and undo history.
pub struct Game {
    board: Board,
    active_side: Side,
    selection: Selection,
    history: History,
    last_move: Option<MoveRecord>,
    config: GameConfig,
}

impl Game {
    /// Starts a game from the opening layout with red to move.
    pub fn new(config: GameConfig) -> Self {
        Self::from_position(Board::opening(), Side::Red, config)
    }

    /// Starts from an arbitrary position with empty history.
    pub fn from_position(board: Board, active_side: Side, config: GameConfig) -> Self {
        Self {
            board,
            active_side,
            selection: Selection::Idle,
            history: History::new(),
            last_move: None,
            config,
        }
    }

    /// Resets to the opening layout, red to move, with no history.
    pub fn new_game(&mut self) {
        self.board = Board::opening();
        self.active_side = Side::Red;
        self.selection = Selection::Idle;
        self.history.clear();
        self.last_move = None;
        debug!("new game");
    }

    /// Feeds one tap on board cell `(x, y)` into the selection state machine.
    ///
    /// Off-board coordinates are rejected with [`GameError::OutOfBounds`] and
    /// leave the selection untouched.
    pub fn cell_tapped(&mut self, x: i32, y: i32) -> Result<TapOutcome, GameError> {
        let pos = Position::new(x, y).inspect_err(|_| {
            warn!("ignoring tap outside the board at ({x}, {y})");
        })?;
        let tapped = self
            .board
            .piece_at(pos)
            .filter(|(_, piece)| piece.side == self.active_side);

        let Selection::Selected(selected) = self.selection else {
            return Ok(match tapped {
                Some((id, _)) => {
                    self.selection = Selection::Selected(id);
                    debug!("selected {pos}");
                    TapOutcome::Selected(pos)
                }
                None => TapOutcome::Ignored,
            });
        };

        if rules::is_legal(&self.board, selected, pos, &self.config) {
            return self.complete_move(selected, pos).map(TapOutcome::Moved);
        }

        match tapped {
            Some((id, _)) if id != selected => {
                self.selection = Selection::Selected(id);
                debug!("reselected {pos}");
                Ok(TapOutcome::Reselected(pos))
            }
            _ => {
                self.selection = Selection::Idle;
                debug!("selection cleared by tap at {pos}");
                Ok(TapOutcome::Deselected)
            }
        }
    }

    /// Plays `from -> to` for the side to move without going through the
    /// selection. Any current selection is dropped on success.
    pub fn play(&mut self, from: Position, to: Position) -> Result<MoveRecord, GameError> {
        let (id, piece) = self.board.piece_at(from).ok_or(GameError::NoPieceAt(from))?;
        if piece.side != self.active_side {
            return Err(GameError::NotYourTurn(self.active_side));
        }
        if !rules::is_legal(&self.board, id, to, &self.config) {
            return Err(GameError::IllegalMove { from, to });
        }
        self.complete_move(id, to)
    }

    /// Restores the board from before the last move and hands the turn back.
    /// Returns `false` without changing anything when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(board) = self.history.pop() else {
            debug!("undo with empty history");
            return false;
        };

        self.board = board;
        self.active_side = self.active_side.opponent();
        self.selection = Selection::Idle;
        self.last_move = None;
        debug!("undo, {:?} to move, {} left", self.active_side, self.history.len());
        true
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn active_side(&self) -> Side {
        self.active_side
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn selected_piece(&self) -> Option<(PieceId, Piece, Position)> {
        let Selection::Selected(id) = self.selection else {
            return None;
        };
        Some((id, self.board.get(id)?, self.board.position_of(id)?))
    }

    pub fn selected_position(&self) -> Option<Position> {
        self.selected_piece().map(|(_, _, pos)| pos)
    }

    /// Legal targets of the selected piece, empty when idle.
    pub fn legal_destinations(&self) -> Vec<Position> {
        match self.selection {
            Selection::Selected(id) => rules::legal_destinations(&self.board, id, &self.config),
            Selection::Idle => Vec::new(),
        }
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn last_move(&self) -> Option<MoveRecord> {
        self.last_move
    }

    pub fn pieces(&self) -> Vec<PieceView> {
        self.board
            .iter()
            .map(|(_, piece, pos)| PieceView {
                kind: piece.kind,
                side: piece.side,
                x: pos.x,
                y: pos.y,
                glyph: piece.chinese_char(),
            })
            .collect()
    }

    pub fn to_game_state(&self) -> GameState {
        GameState {
            pieces: self.pieces(),
            active_side: self.active_side,
            selected: self.selected_position(),
            destinations: self.legal_destinations(),
            history_len: self.history.len(),
            last_move: self.last_move,
        }
    }

    /// Snapshots the board, removes any enemy on `to` and moves piece `id` there.
    ///
    /// Caller contract: `rules::is_legal` returned `true` for this move. Only
    /// a dead slot or a friendly piece on `to` is rejected, before any state
    /// changes.
    pub(crate) fn execute_move(&mut self, id: PieceId, to: Position) -> Result<MoveRecord, GameError> {
        let piece = self.board.get(id).ok_or(GameError::MissingPiece(id))?;
        let from = self.board.position_of(id).ok_or(GameError::MissingPiece(id))?;

        let victim = match self.board.piece_at(to) {
            Some((other, target)) if other != id => {
                if target.side == piece.side {
                    return Err(GameError::Occupied(to));
                }
                Some(other)
            }
            _ => None,
        };

        self.history.push(&self.board);
        let captured = victim.and_then(|other| self.board.remove(other));
        self.board.relocate(id, to)?;

        Ok(MoveRecord {
            from,
            to,
            kind: piece.kind,
            side: piece.side,
            captured: captured.map(|p| p.kind),
        })
    }

    fn complete_move(&mut self, id: PieceId, to: Position) -> Result<MoveRecord, GameError> {
        let record = self.execute_move(id, to)?;

        self.active_side = self.active_side.opponent();
        self.selection = Selection::Idle;
        self.last_move = Some(record);
        debug!(
            "{:?} {:?} {} -> {}{}",
            record.side,
            record.kind,
            record.from,
            record.to,
            record
                .captured
                .map(|kind| format!(" takes {kind:?}"))
                .unwrap_or_default()
        );
        Ok(record)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}
