use crate::board::Board;

/// Last-in-first-out stack of pre-move board snapshots.
///
/// Snapshots are board copies, so nothing done to the live board after a
/// push can reach into the history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    snapshots: Vec<Board>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, board: &Board) {
        self.snapshots.push(*board);
    }

    pub fn pop(&mut self) -> Option<Board> {
        self.snapshots.pop()
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Position;

    #[test]
    fn pop_returns_snapshots_in_reverse_order() {
        let mut history = History::new();
        let first = Board::opening();
        let mut second = first;
        let (id, _) = second.piece_at(Position::new(0, 6).unwrap()).unwrap();
        second.remove(id);

        history.push(&first);
        history.push(&second);

        assert_eq!(history.len(), 2);
        assert_eq!(history.pop(), Some(second));
        assert_eq!(history.pop(), Some(first));
        assert_eq!(history.pop(), None);
        assert!(history.is_empty());
    }

    #[test]
    fn snapshot_is_unaffected_by_later_mutation() {
        let mut history = History::new();
        let mut live = Board::opening();
        history.push(&live);

        let (id, _) = live.piece_at(Position::new(4, 9).unwrap()).unwrap();
        live.remove(id);

        let restored = history.pop().unwrap();
        assert_eq!(restored, Board::opening());
        assert_ne!(restored, live);
    }

    #[test]
    fn clear_empties_the_stack() {
        let mut history = History::new();
        history.push(&Board::opening());
        history.push(&Board::empty());

        history.clear();

        assert!(history.is_empty());
        assert_eq!(history.pop(), None);
    }
}
