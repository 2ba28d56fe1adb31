//! # Grid Model
//!
//! The static board. Each cell is classified once at load time and never changes
//! afterwards. Start and goal markers belong to a single robot: for every other
//! robot the same cell reads as ordinary empty terrain (see [`Grid::kind_for`]).

use crate::error::ParseError;
use crate::moves::Move;
use std::fmt;

/// Largest supported robot count.
pub const MAX_ROBOTS: usize = 3;

/// A cell coordinate. Signed so that a move off the edge is representable before the
/// bounds check rejects it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub struct Pos {
    pub row: i32,
    pub col: i32,
}

impl Pos {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub fn shifted(self, mv: Move) -> Pos {
        let (dr, dc) = mv.delta();
        Pos::new(self.row + dr, self.col + dc)
    }

    pub fn dist2(self, other: Pos) -> i64 {
        let dr = (self.row - other.row) as i64;
        let dc = (self.col - other.col) as i64;
        dr * dr + dc * dc
    }

    pub fn manhattan(self, other: Pos) -> usize {
        (self.row.abs_diff(other.row) + self.col.abs_diff(other.col)) as usize
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellKind {
    Empty,
    Blocked,
    RobotStart(usize),
    RobotGoal(usize),
}

impl CellKind {
    /// Decodes one board character. `robot_count` bounds the accepted marker letters.
    pub fn from_char(ch: char, robot_count: usize) -> Option<Result<CellKind, char>> {
        let kind = match ch {
            '.' => CellKind::Empty,
            '#' => CellKind::Blocked,
            'a'..='z' => {
                let k = (ch as u8 - b'a') as usize;
                if k >= robot_count {
                    return Some(Err(ch));
                }
                CellKind::RobotStart(k)
            }
            'A'..='Z' => {
                let k = (ch as u8 - b'A') as usize;
                if k >= robot_count {
                    return Some(Err(ch));
                }
                CellKind::RobotGoal(k)
            }
            _ => return None,
        };
        Some(Ok(kind))
    }

    pub fn to_char(self) -> char {
        match self {
            CellKind::Empty => '.',
            CellKind::Blocked => '#',
            CellKind::RobotStart(k) => (b'a' + k as u8) as char,
            CellKind::RobotGoal(k) => (b'A' + k as u8) as char,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    height: usize,
    width: usize,
    cells: Vec<CellKind>,
}

impl Grid {
    /// An all-empty board.
    pub fn empty(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            cells: vec![CellKind::Empty; height * width],
        }
    }

    /// Builds the board from its text rows.
    ///
    /// Every row must have exactly `width` characters and there must be exactly
    /// `height` rows. Marker letters must name a robot below `robot_count`.
    pub fn from_rows<S: AsRef<str>>(
        height: usize,
        width: usize,
        robot_count: usize,
        rows: &[S],
    ) -> Result<Self, ParseError> {
        if rows.len() != height {
            return Err(ParseError::malformed(format!(
                "expected {} rows, found {}",
                height,
                rows.len()
            )));
        }
        let Some(cell_count) = height.checked_mul(width) else {
            return Err(ParseError::malformed(format!(
                "board of {}x{} cells is too large",
                height, width
            )));
        };
        // Rows are checked against `width` as they are read, so the declared size
        // is only trusted once it matches the data.
        let mut cells = Vec::new();
        for (row, line) in rows.iter().enumerate() {
            let line = line.as_ref();
            let len = line.chars().count();
            if len != width {
                return Err(ParseError::malformed(format!(
                    "row {} has length {}, expected {}",
                    row, len, width
                )));
            }
            for (col, ch) in line.chars().enumerate() {
                match CellKind::from_char(ch, robot_count) {
                    Some(Ok(kind)) => cells.push(kind),
                    Some(Err(ch)) => {
                        return Err(ParseError::UnrecognizedRobotId {
                            ch,
                            row,
                            col,
                            robot_count,
                        });
                    }
                    None => {
                        return Err(ParseError::malformed(format!(
                            "unexpected character {:?} at ({}, {})",
                            ch, row, col
                        )));
                    }
                }
            }
        }
        debug_assert_eq!(cells.len(), cell_count);
        Ok(Self {
            height,
            width,
            cells,
        })
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.row >= 0
            && pos.col >= 0
            && (pos.row as usize) < self.height
            && (pos.col as usize) < self.width
    }

    /// Flat index of an in-bounds cell.
    pub fn index(&self, pos: Pos) -> usize {
        debug_assert!(self.in_bounds(pos), "{} is out of bounds", pos);
        pos.row as usize * self.width + pos.col as usize
    }

    pub fn pos_of(&self, index: usize) -> Pos {
        Pos::new((index / self.width) as i32, (index % self.width) as i32)
    }

    /// Load-time classification. Anything outside the board reads as `Blocked`.
    pub fn classify(&self, pos: Pos) -> CellKind {
        if self.in_bounds(pos) {
            self.cells[self.index(pos)]
        } else {
            CellKind::Blocked
        }
    }

    /// Classification as seen by one robot: other robots' markers are plain terrain.
    pub fn kind_for(&self, pos: Pos, robot: usize) -> CellKind {
        match self.classify(pos) {
            CellKind::RobotStart(k) | CellKind::RobotGoal(k) if k != robot => CellKind::Empty,
            kind => kind,
        }
    }

    pub fn is_blocked(&self, pos: Pos) -> bool {
        self.classify(pos) == CellKind::Blocked
    }

    pub fn set(&mut self, pos: Pos, kind: CellKind) {
        let i = self.index(pos);
        self.cells[i] = kind;
    }

    /// All cells holding a marker, in row-major order.
    pub fn markers(&self) -> impl Iterator<Item = (Pos, CellKind)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, k)| matches!(k, CellKind::RobotStart(_) | CellKind::RobotGoal(_)))
            .map(|(i, &k)| (self.pos_of(i), k))
    }

    pub fn open_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.cells.len())
            .filter(|&i| self.cells[i] != CellKind::Blocked)
            .map(|i| self.pos_of(i))
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width.max(1)) {
            let line: String = row.iter().map(|k| k.to_char()).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_cell_kinds() {
        let grid = Grid::from_rows(2, 3, 2, &["a.#", "BAb"]).unwrap();
        assert_eq!(grid.classify(Pos::new(0, 0)), CellKind::RobotStart(0));
        assert_eq!(grid.classify(Pos::new(0, 1)), CellKind::Empty);
        assert_eq!(grid.classify(Pos::new(0, 2)), CellKind::Blocked);
        assert_eq!(grid.classify(Pos::new(1, 0)), CellKind::RobotGoal(1));
        assert_eq!(grid.classify(Pos::new(1, 1)), CellKind::RobotGoal(0));
        assert_eq!(grid.classify(Pos::new(1, 2)), CellKind::RobotStart(1));
    }

    #[test]
    fn markers_are_terrain_for_other_robots() {
        let grid = Grid::from_rows(1, 2, 2, &["ab"]).unwrap();
        let p = Pos::new(0, 0);
        assert_eq!(grid.kind_for(p, 0), CellKind::RobotStart(0));
        assert_eq!(grid.kind_for(p, 1), CellKind::Empty);
        assert!(!grid.is_blocked(p));
    }

    #[test]
    fn out_of_bounds_is_blocked() {
        let grid = Grid::empty(2, 2);
        for p in [Pos::new(-1, 0), Pos::new(0, -1), Pos::new(2, 0), Pos::new(0, 2)] {
            assert!(!grid.in_bounds(p));
            assert!(grid.is_blocked(p));
        }
        assert!(grid.in_bounds(Pos::new(1, 1)));
    }

    #[test]
    fn rejects_bad_rows() {
        let err = Grid::from_rows(2, 3, 1, &["a..", ".."]).unwrap_err();
        assert!(matches!(err, ParseError::MalformedBoard(_)), "{:?}", err);
        let err = Grid::from_rows(2, 3, 1, &["a.."]).unwrap_err();
        assert!(matches!(err, ParseError::MalformedBoard(_)), "{:?}", err);
        let err = Grid::from_rows(1, 3, 1, &["a?A"]).unwrap_err();
        assert!(matches!(err, ParseError::MalformedBoard(_)), "{:?}", err);
    }

    #[test]
    fn rejects_robot_letters_beyond_count() {
        let err = Grid::from_rows(1, 3, 1, &["abA"]).unwrap_err();
        assert_eq!(
            err,
            ParseError::UnrecognizedRobotId {
                ch: 'b',
                row: 0,
                col: 1,
                robot_count: 1
            }
        );
        let err = Grid::from_rows(1, 2, 2, &["aC"]).unwrap_err();
        assert!(matches!(err, ParseError::UnrecognizedRobotId { ch: 'C', .. }));
    }

    #[test]
    fn display_round_trips() {
        let rows = ["a.#", "#.A"];
        let grid = Grid::from_rows(2, 3, 1, &rows).unwrap();
        assert_eq!(grid.to_string(), "a.#\n#.A\n");
    }

    #[test]
    fn distances() {
        let a = Pos::new(0, 0);
        let b = Pos::new(2, 1);
        assert_eq!(a.dist2(b), 5);
        assert_eq!(a.manhattan(b), 3);
    }
}
