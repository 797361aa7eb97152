//! Dense 2D grids addressed by [`Pos`]

use std::ops::{Index, IndexMut};

use aoc_solver::ParseError;
use glam::IVec2;
use strum::{EnumCount, EnumIter, IntoEnumIterator};

/// Row/column position; `row` grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// One step towards `dir`, or `None` when leaving `rows x cols`.
    pub fn checked_step(self, dir: Direction, rows: usize, cols: usize) -> Option<Pos> {
        self.checked_offset(dir.offset(), rows, cols)
    }

    /// One step towards `dir`, staying inside `grid`.
    pub fn step<T>(self, dir: Direction, grid: &Grid<T>) -> Option<Pos> {
        self.checked_step(dir, grid.rows, grid.cols)
    }

    /// `self + delta` if inside `rows x cols`; `delta.x` moves along the
    /// columns and `delta.y` along the rows.
    pub fn checked_offset(self, delta: IVec2, rows: usize, cols: usize) -> Option<Pos> {
        let row = self.row.checked_add_signed(delta.y as isize)?;
        let col = self.col.checked_add_signed(delta.x as isize)?;
        (row < rows && col < cols).then_some(Pos { row, col })
    }

    /// `(col, row)` as a vector, `None` past `i32::MAX`.
    pub fn as_ivec2(self) -> Option<IVec2> {
        Some(IVec2::new(self.col.try_into().ok()?, self.row.try_into().ok()?))
    }

    pub fn manhattan(self, other: Pos) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

/// The four orthogonal directions, clockwise from `Up`. `dir as usize`
/// indexes arrays of length [`Direction::COUNT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumCount, EnumIter)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub const fn turn_right(self) -> Self {
        match self {
            Direction::Up => Direction::Right,
            Direction::Right => Direction::Down,
            Direction::Down => Direction::Left,
            Direction::Left => Direction::Up,
        }
    }

    pub const fn turn_left(self) -> Self {
        match self {
            Direction::Up => Direction::Left,
            Direction::Left => Direction::Down,
            Direction::Down => Direction::Right,
            Direction::Right => Direction::Up,
        }
    }

    pub const fn reverse(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }

    /// One step as `(d_col, d_row)`; `Up` is negative `y`.
    pub const fn offset(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::NEG_Y,
            Direction::Right => IVec2::X,
            Direction::Down => IVec2::Y,
            Direction::Left => IVec2::NEG_X,
        }
    }

    /// Parses `^ > v <`.
    pub fn from_arrow(c: char) -> Option<Self> {
        match c {
            '^' => Some(Direction::Up),
            '>' => Some(Direction::Right),
            'v' => Some(Direction::Down),
            '<' => Some(Direction::Left),
            _ => None,
        }
    }

    pub const fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }
}

/// Row-major grid of `rows x cols` cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    cells: Vec<T>,
}

impl<T> Grid<T> {
    pub fn new(rows: usize, cols: usize, fill: T) -> Self
    where
        T: Clone,
    {
        Self {
            rows,
            cols,
            cells: vec![fill; rows * cols],
        }
    }

    /// Builds a grid from non-empty lines, mapping each character with `cell`.
    /// All lines must have the same width.
    pub fn parse_with<F>(input: &str, mut cell: F) -> Result<Self, ParseError>
    where
        F: FnMut(Pos, char) -> Result<T, ParseError>,
    {
        let mut cells = Vec::new();
        let mut cols = None;
        let mut rows = 0;

        for (line_no, line) in input.lines().map(str::trim_end).enumerate() {
            if line.is_empty() {
                continue;
            }
            let width = line.chars().count();
            match cols {
                None => cols = Some(width),
                Some(expected) if expected != width => {
                    return Err(ParseError::InvalidFormat(format!(
                        "(line {}) row has {width} cells, expected {expected}",
                        line_no + 1
                    )));
                }
                Some(_) => {}
            }
            for (col, c) in line.chars().enumerate() {
                cells.push(cell(Pos::new(rows, col), c)?);
            }
            rows += 1;
        }

        let cols = cols.ok_or_else(|| ParseError::MissingData("empty grid".into()))?;
        Ok(Self { rows, cols, cells })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn contains(&self, pos: Pos) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    pub fn get(&self, pos: Pos) -> Option<&T> {
        self.contains(pos)
            .then(|| &self.cells[pos.row * self.cols + pos.col])
    }

    pub fn get_mut(&mut self, pos: Pos) -> Option<&mut T> {
        if self.contains(pos) {
            Some(&mut self.cells[pos.row * self.cols + pos.col])
        } else {
            None
        }
    }

    pub fn row(&self, row: usize) -> &[T] {
        &self.cells[row * self.cols..(row + 1) * self.cols]
    }

    /// All positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Pos> + use<T> {
        let cols = self.cols;
        (0..self.rows * cols).map(move |i| Pos::new(i / cols, i % cols))
    }

    /// Cells with their positions in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Pos, &T)> {
        self.positions().zip(self.cells.iter())
    }

    pub fn find(&self, value: &T) -> Option<Pos>
    where
        T: PartialEq,
    {
        self.iter().find(|(_, v)| *v == value).map(|(pos, _)| pos)
    }

    /// In-bounds orthogonal neighbours of `pos`.
    pub fn neighbours(&self, pos: Pos) -> impl Iterator<Item = (Direction, Pos)> + use<T> {
        let (rows, cols) = (self.rows, self.cols);
        Direction::iter()
            .filter_map(move |dir| pos.checked_step(dir, rows, cols).map(|next| (dir, next)))
    }

    /// Same shape, every cell replaced by `fill`.
    pub fn map_fill<U: Clone>(&self, fill: U) -> Grid<U> {
        Grid::new(self.rows, self.cols, fill)
    }

    /// Swaps two cells.
    pub fn swap(&mut self, a: Pos, b: Pos) {
        let (a, b) = (a.row * self.cols + a.col, b.row * self.cols + b.col);
        self.cells.swap(a, b);
    }
}

impl Grid<u8> {
    /// Byte grid straight from the puzzle text.
    pub fn from_lines(input: &str) -> Result<Self, ParseError> {
        Self::parse_with(input, |pos, c| {
            u8::try_from(c).map_err(|_| {
                ParseError::InvalidFormat(format!("(line {}) non-ASCII cell {c:?}", pos.row + 1))
            })
        })
    }
}

impl<T> Index<Pos> for Grid<T> {
    type Output = T;

    fn index(&self, pos: Pos) -> &T {
        assert!(self.contains(pos), "{pos:?} outside {}x{} grid", self.rows, self.cols);
        &self.cells[pos.row * self.cols + pos.col]
    }
}

impl<T> IndexMut<Pos> for Grid<T> {
    fn index_mut(&mut self, pos: Pos) -> &mut T {
        assert!(self.contains(pos), "{pos:?} outside {}x{} grid", self.rows, self.cols);
        &mut self.cells[pos.row * self.cols + pos.col]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_and_indexes() {
        let grid = Grid::from_lines("ab\ncd\n").unwrap();
        assert_eq!((grid.rows(), grid.cols()), (2, 2));
        assert_eq!(grid[Pos::new(1, 0)], b'c');
        assert_eq!(grid.row(1), b"cd");
        assert_eq!(grid.find(&b'd'), Some(Pos::new(1, 1)));
        assert_eq!(grid.get(Pos::new(2, 0)), None);
    }

    #[test]
    fn ragged_and_empty_rejected() {
        assert!(matches!(
            Grid::from_lines("abc\nab"),
            Err(ParseError::InvalidFormat(_))
        ));
        assert!(matches!(Grid::from_lines("\n\n"), Err(ParseError::MissingData(_))));
        assert!(Grid::from_lines("ab\nc\u{263a}").is_err());
    }

    #[test]
    fn neighbours_stay_inside() {
        let grid = Grid::new(3, 3, 0u8);
        let corner: Vec<_> = grid.neighbours(Pos::new(0, 0)).map(|(_, p)| p).collect();
        assert_eq!(corner, vec![Pos::new(0, 1), Pos::new(1, 0)]);
        assert_eq!(grid.neighbours(Pos::new(1, 1)).count(), 4);
    }

    #[test]
    fn turning() {
        for dir in Direction::iter() {
            assert_eq!(dir.turn_right().turn_left(), dir);
            assert_eq!(dir.turn_right().turn_right(), dir.reverse());
            assert_eq!(dir.reverse().offset(), -dir.offset());
        }
        assert_eq!(Direction::from_arrow('v'), Some(Direction::Down));
        assert_eq!(Direction::from_arrow('x'), None);
    }

    #[test]
    fn directions_run_clockwise_from_up() {
        let dirs: Vec<_> = Direction::iter().collect();
        assert_eq!(dirs.len(), Direction::COUNT);
        assert_eq!(dirs[0], Direction::Up);
        for (i, dir) in dirs.iter().enumerate() {
            assert_eq!(*dir as usize, i);
            assert_eq!(dirs[(i + 1) % Direction::COUNT], dir.turn_right());
            // clockwise on screen, where y grows downwards
            assert_eq!(dir.turn_right().offset(), dir.offset().perp());
        }
        assert_eq!(Pos::new(3, 4).as_ivec2(), Some(IVec2::new(4, 3)));
        assert_eq!(
            Pos::new(2, 2).checked_offset(IVec2::new(-2, 1), 4, 4),
            Some(Pos::new(3, 0))
        );
        assert_eq!(Pos::new(0, 2).checked_offset(Direction::Up.offset(), 4, 4), None);
    }

    #[test]
    fn swap_exchanges_cells() {
        let mut grid = Grid::from_lines("ab\ncd\n").unwrap();
        grid.swap(Pos::new(0, 0), Pos::new(1, 1));
        assert_eq!(grid.row(0), b"db");
        assert_eq!(grid.row(1), b"ca");
    }

    proptest! {
        #[test]
        fn step_then_reverse_returns(row in 0usize..10, col in 0usize..10, d in 0usize..Direction::COUNT) {
            let dir = Direction::iter().nth(d).unwrap();
            let start = Pos::new(row, col);
            if let Some(next) = start.checked_step(dir, 10, 10) {
                prop_assert_eq!(next.manhattan(start), 1);
                prop_assert_eq!(next.checked_step(dir.reverse(), 10, 10), Some(start));
            }
        }

        #[test]
        fn positions_cover_grid(rows in 1usize..8, cols in 1usize..8) {
            let grid = Grid::new(rows, cols, ());
            let all: Vec<_> = grid.positions().collect();
            prop_assert_eq!(all.len(), rows * cols);
            prop_assert!(all.iter().all(|&p| grid.contains(p)));
            prop_assert!(all.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
