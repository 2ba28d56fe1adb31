//! Atomic moves and the joint move enumerator.

use crate::error::MoveError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Move {
    Stay,
    Right,
    Left,
    Down,
    Up,
}

/// Number of atomic moves, i.e. the base of the joint move counter.
pub const NUM_MOVES: usize = 5;

impl Move {
    /// Digit order of the enumerator.
    pub const ALL: [Move; NUM_MOVES] = [Move::Stay, Move::Right, Move::Left, Move::Down, Move::Up];

    /// `(d_row, d_col)`. Rows grow downwards.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Move::Stay => (0, 0),
            Move::Right => (0, 1),
            Move::Left => (0, -1),
            Move::Down => (1, 0),
            Move::Up => (-1, 0),
        }
    }

    pub fn from_delta(dr: i32, dc: i32) -> Result<Move, MoveError> {
        Move::ALL
            .into_iter()
            .find(|m| m.delta() == (dr, dc))
            .ok_or(MoveError::InvalidDelta { dr, dc })
    }

    pub fn symbol(self) -> char {
        match self {
            Move::Stay => 'S',
            Move::Right => 'R',
            Move::Left => 'L',
            Move::Down => 'D',
            Move::Up => 'U',
        }
    }

    pub fn from_symbol(ch: char) -> Result<Move, MoveError> {
        Move::ALL
            .into_iter()
            .find(|m| m.symbol() == ch)
            .ok_or(MoveError::InvalidSymbol(ch))
    }

    fn digit(index: usize) -> Move {
        Move::ALL[index]
    }
}

/// Number of joint moves for `n` robots.
pub fn combo_count(n: usize) -> usize {
    NUM_MOVES.pow(n as u32)
}

/// Decodes `index` as an `n`-digit base-5 number, most significant digit first.
///
/// `combo_at(n, i)` is the `i`-th item yielded by [`MoveCombos::new(n)`](MoveCombos).
pub fn combo_at(n: usize, mut index: usize) -> Vec<Move> {
    debug_assert!(index < combo_count(n));
    let mut combo = vec![Move::Stay; n];
    for slot in combo.iter_mut().rev() {
        *slot = Move::digit(index % NUM_MOVES);
        index /= NUM_MOVES;
    }
    combo
}

/// Every joint move for `n` robots, as an odometer: the last robot's move changes fastest.
#[derive(Clone, Debug)]
pub struct MoveCombos {
    digits: Vec<usize>,
    done: bool,
}

impl MoveCombos {
    pub fn new(n: usize) -> Self {
        Self {
            digits: vec![0; n],
            done: false,
        }
    }

    /// Back to the all-`Stay` combination.
    pub fn reset(&mut self) {
        self.digits.iter_mut().for_each(|d| *d = 0);
        self.done = false;
    }

    fn advance(&mut self) {
        for d in self.digits.iter_mut().rev() {
            *d += 1;
            if *d < NUM_MOVES {
                return;
            }
            *d = 0;
        }
        self.done = true;
    }
}

impl Iterator for MoveCombos {
    type Item = Vec<Move>;

    fn next(&mut self) -> Option<Vec<Move>> {
        if self.done {
            return None;
        }
        let combo = self.digits.iter().map(|&d| Move::digit(d)).collect();
        self.advance();
        Some(combo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    #[test]
    fn deltas_are_consistent_with_symbols() {
        for m in Move::ALL {
            let (dr, dc) = m.delta();
            assert_eq!(Move::from_delta(dr, dc).unwrap(), m);
            assert_eq!(Move::from_symbol(m.symbol()).unwrap(), m);
        }
        assert_eq!(Move::Down.delta(), (1, 0));
        assert_eq!(Move::Up.delta(), (-1, 0));
    }

    #[test]
    fn invalid_encodings_fail() {
        assert_eq!(
            Move::from_delta(1, 1),
            Err(MoveError::InvalidDelta { dr: 1, dc: 1 })
        );
        assert_eq!(Move::from_symbol('X'), Err(MoveError::InvalidSymbol('X')));
    }

    #[test]
    fn enumerates_all_combinations_in_odometer_order() {
        let combos = MoveCombos::new(2).collect_vec();
        assert_eq!(combos.len(), 25);
        assert_eq!(combos[0], vec![Move::Stay, Move::Stay]);
        assert_eq!(combos[1], vec![Move::Stay, Move::Right]);
        assert_eq!(combos[4], vec![Move::Stay, Move::Up]);
        assert_eq!(combos[5], vec![Move::Right, Move::Stay]);
        assert_eq!(combos[24], vec![Move::Up, Move::Up]);
        assert_eq!(combos.iter().unique().count(), 25);
    }

    #[test]
    fn combo_at_matches_iterator() {
        for n in 1..=3 {
            let combos = MoveCombos::new(n).collect_vec();
            assert_eq!(combos.len(), combo_count(n));
            for (i, c) in combos.iter().enumerate() {
                assert_eq!(&combo_at(n, i), c);
            }
        }
    }

    #[test]
    fn reset_restarts_sequence() {
        let mut it = MoveCombos::new(3);
        let first = it.by_ref().take(7).collect_vec();
        assert_eq!(it.by_ref().count(), 125 - 7);
        assert!(it.next().is_none());
        it.reset();
        assert_eq!(it.by_ref().take(7).collect_vec(), first);
    }
}
