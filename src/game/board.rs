pub const BOARD_SIZE: usize = 15;
pub const WIN_LENGTH: usize = 5;

/// Scan directions: horizontal, vertical, diagonal (\), anti-diagonal (/).
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Black,
    White,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaceError {
    OutOfBounds,
    Occupied,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty `size`×`size` board
    pub fn new(size: usize) -> Self {
        Board {
            size,
            cells: vec![Cell::Empty; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Get the cell at a specific position. Panics when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Cell {
        assert!(self.in_bounds(row, col), "({row}, {col}) is off the board");
        self.cells[row * self.size + col]
    }

    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size
    }

    /// Place a stone on an empty cell
    pub fn place(&mut self, row: usize, col: usize, cell: Cell) -> Result<(), PlaceError> {
        if !self.in_bounds(row, col) {
            return Err(PlaceError::OutOfBounds);
        }
        let idx = row * self.size + col;
        if self.cells[idx] != Cell::Empty {
            return Err(PlaceError::Occupied);
        }
        self.cells[idx] = cell;
        Ok(())
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&c| c != Cell::Empty)
    }

    pub fn stone_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != Cell::Empty).count()
    }

    /// All empty cells in row-major order
    pub fn empty_cells(&self) -> Vec<Position> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &c)| c == Cell::Empty)
            .map(|(i, _)| Position::new(i / self.size, i % self.size))
            .collect()
    }

    /// Check if the stone at (row, col) is part of five or more in a row
    pub fn check_win(&self, row: usize, col: usize) -> bool {
        self.winning_direction(row, col).is_some()
    }

    /// Cells of the winning line through (row, col), ordered from one end to
    /// the other, if there is one.
    pub fn winning_line(&self, row: usize, col: usize) -> Option<Vec<Position>> {
        let (dr, dc) = self.winning_direction(row, col)?;
        let back = self.run_length(row, col, -dr, -dc);
        let total = 1 + back + self.run_length(row, col, dr, dc);

        let start_r = row as isize - dr * back as isize;
        let start_c = col as isize - dc * back as isize;
        Some(
            (0..total as isize)
                .map(|i| Position::new((start_r + dr * i) as usize, (start_c + dc * i) as usize))
                .collect(),
        )
    }

    fn winning_direction(&self, row: usize, col: usize) -> Option<(isize, isize)> {
        if !self.in_bounds(row, col) || self.get(row, col) == Cell::Empty {
            return None;
        }

        DIRECTIONS.into_iter().find(|&(dr, dc)| {
            1 + self.run_length(row, col, dr, dc) + self.run_length(row, col, -dr, -dc)
                >= WIN_LENGTH
        })
    }

    /// Count same-colored stones stepping away from (row, col), not counting
    /// the origin. Stops at the first different cell or the board edge.
    fn run_length(&self, row: usize, col: usize, dr: isize, dc: isize) -> usize {
        let cell = self.get(row, col);
        let mut count = 0;
        let mut r = row as isize + dr;
        let mut c = col as isize + dc;
        while let Some(probe) = self.probe(r, c) {
            if probe != cell {
                break;
            }
            count += 1;
            r += dr;
            c += dc;
        }
        count
    }

    fn probe(&self, row: isize, col: isize) -> Option<Cell> {
        if row < 0 || col < 0 {
            return None;
        }
        let (row, col) = (row as usize, col as usize);
        self.in_bounds(row, col).then(|| self.get(row, col))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BOARD_SIZE)
    }
}
