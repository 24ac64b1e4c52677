use log::trace;

use crate::board::{Axis, Board};
use crate::config::{ElephantRule, GameConfig};
use crate::types::{Piece, PieceId, PieceKind, Position, Side};

const PALACE_COLS: std::ops::RangeInclusive<u8> = 3..=5;

/// Returns whether piece `id` may move to `dest` on `board`.
///
/// Pure predicate. A slot without a live piece is never legal. Check,
/// checkmate and facing generals are not considered.
pub fn is_legal(board: &Board, id: PieceId, dest: Position, config: &GameConfig) -> bool {
    let (Some(piece), Some(from)) = (board.get(id), board.position_of(id)) else {
        return false;
    };

    let legal = check_move(board, piece, from, dest, config);
    trace!("{:?} {:?} {from} -> {dest}: {legal}", piece.side, piece.kind);
    legal
}

/// Every cell piece `id` may legally move to, in row-major order.
pub fn legal_destinations(board: &Board, id: PieceId, config: &GameConfig) -> Vec<Position> {
    Position::all()
        .filter(|&dest| is_legal(board, id, dest, config))
        .collect()
}

fn check_move(
    board: &Board,
    piece: Piece,
    from: Position,
    dest: Position,
    config: &GameConfig,
) -> bool {
    if from == dest {
        return false;
    }

    let target = board.piece_at(dest).map(|(_, p)| p);
    if target.is_some_and(|t| t.side == piece.side) {
        return false;
    }

    let dx = dest.x as i32 - from.x as i32;
    let dy = dest.y as i32 - from.y as i32;

    match piece.kind {
        PieceKind::Horse => horse_move(board, from, dx, dy),
        PieceKind::Soldier => soldier_move(piece.side, from, dx, dy),
        PieceKind::Cannon => cannon_move(board, from, dest, target.is_some()),
        PieceKind::Rook => rook_move(board, from, dest),
        PieceKind::Elephant => elephant_move(board, piece.side, from, dest, config.elephant_rule),
        PieceKind::Advisor => in_palace(piece.side, dest) && dx.abs() == 1 && dy.abs() == 1,
        PieceKind::General => in_palace(piece.side, dest) && dx.abs() + dy.abs() == 1,
    }
}

fn horse_move(board: &Board, from: Position, dx: i32, dy: i32) -> bool {
    let leg = match (dx.abs(), dy.abs()) {
        (2, 1) => from.offset(dx.signum(), 0),
        (1, 2) => from.offset(0, dy.signum()),
        _ => return false,
    };
    leg.is_some_and(|leg| board.piece_at(leg).is_none())
}

fn soldier_move(side: Side, from: Position, dx: i32, dy: i32) -> bool {
    let (forward, crossed) = match side {
        Side::Red => (-1, from.y < 5),
        Side::Black => (1, from.y > 4),
    };
    (dx == 0 && dy == forward) || (crossed && dy == 0 && dx.abs() == 1)
}

fn cannon_move(board: &Board, from: Position, dest: Position, capturing: bool) -> bool {
    let Some((axis, toward_larger)) = line_between(from, dest) else {
        return false;
    };
    let first = board.nearest_on_line(from, axis, toward_larger);

    if !capturing {
        return first.is_none_or(|(_, _, pos)| is_beyond(pos, dest, axis, toward_larger));
    }

    // The first piece is the screen; the target must be the next one past it.
    match first {
        Some((_, _, screen)) if screen != dest => board
            .nearest_on_line(screen, axis, toward_larger)
            .is_some_and(|(_, _, pos)| pos == dest),
        _ => false,
    }
}

fn rook_move(board: &Board, from: Position, dest: Position) -> bool {
    let Some((axis, toward_larger)) = line_between(from, dest) else {
        return false;
    };
    match board.nearest_on_line(from, axis, toward_larger) {
        None => true,
        Some((_, _, pos)) => pos == dest || is_beyond(pos, dest, axis, toward_larger),
    }
}

fn elephant_move(
    board: &Board,
    side: Side,
    from: Position,
    dest: Position,
    rule: ElephantRule,
) -> bool {
    let dx = (dest.x as i32 - from.x as i32).abs();
    let dy = (dest.y as i32 - from.y as i32).abs();
    let shape = match rule {
        ElephantRule::Strict => dx == 2 && dy == 2,
        ElephantRule::Legacy => dx == 2,
    };
    if !shape || !on_home_side(side, dest) {
        return false;
    }

    let eye = Position {
        x: (from.x + dest.x) / 2,
        y: (from.y + dest.y) / 2,
    };
    board.piece_at(eye).is_none()
}

fn on_home_side(side: Side, pos: Position) -> bool {
    match side {
        Side::Red => pos.y >= 5,
        Side::Black => pos.y <= 4,
    }
}

fn in_palace(side: Side, pos: Position) -> bool {
    let rows = match side {
        Side::Red => pos.y >= 7,
        Side::Black => pos.y <= 2,
    };
    rows && PALACE_COLS.contains(&pos.x)
}

/// Axis and direction of travel when `from` and `to` share a row or column.
fn line_between(from: Position, to: Position) -> Option<(Axis, bool)> {
    if from.x == to.x {
        Some((Axis::Vertical, to.y > from.y))
    } else if from.y == to.y {
        Some((Axis::Horizontal, to.x > from.x))
    } else {
        None
    }
}

fn is_beyond(pos: Position, dest: Position, axis: Axis, toward_larger: bool) -> bool {
    let (p, d) = match axis {
        Axis::Horizontal => (pos.x, dest.x),
        Axis::Vertical => (pos.y, dest.y),
    };
    if toward_larger { p > d } else { p < d }
}
