use rand::seq::SliceRandom;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickResult {
    /// The expected number; the pointer moved on
    Correct,
    /// The last number; the grid is now solved
    Completed,
    /// Any other number; nothing changed
    Wrong,
    /// Click after completion or outside the grid
    Ignored,
}

/// A `size`×`size` grid holding a shuffled permutation of `1..=size²`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchulteGrid {
    size: usize,
    cells: Vec<u32>,
    solved: Vec<bool>,
    next_expected: u32,
}

impl SchulteGrid {
    /// Shuffle `1..=size²` uniformly (Fisher-Yates).
    pub fn generate<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Self {
        let total = size * size;
        let mut cells: Vec<u32> = (1..=total as u32).collect();
        cells.shuffle(rng);
        Self::from_cells(size, cells)
    }

    /// Build a grid from a fixed layout. `cells` must be a permutation of
    /// `1..=size²`.
    pub fn from_cells(size: usize, cells: Vec<u32>) -> Self {
        debug_assert_eq!(cells.len(), size * size);
        SchulteGrid {
            size,
            solved: vec![false; cells.len()],
            cells,
            next_expected: 1,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn total(&self) -> u32 {
        self.cells.len() as u32
    }

    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    pub fn value_at(&self, index: usize) -> Option<u32> {
        self.cells.get(index).copied()
    }

    pub fn is_cell_solved(&self, index: usize) -> bool {
        self.solved.get(index).copied().unwrap_or(false)
    }

    pub fn next_expected(&self) -> u32 {
        self.next_expected
    }

    pub fn is_solved(&self) -> bool {
        self.next_expected > self.total()
    }

    /// Click the cell showing `value`.
    pub fn click_value(&mut self, value: u32) -> ClickResult {
        if self.is_solved() {
            return ClickResult::Ignored;
        }
        if value != self.next_expected {
            return ClickResult::Wrong;
        }
        if let Some(idx) = self.cells.iter().position(|&v| v == value) {
            self.solved[idx] = true;
        }
        self.next_expected += 1;
        if self.is_solved() {
            ClickResult::Completed
        } else {
            ClickResult::Correct
        }
    }

    /// Click the cell at row-major `index`.
    pub fn click_cell(&mut self, index: usize) -> ClickResult {
        match self.value_at(index) {
            Some(value) => self.click_value(value),
            None => ClickResult::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    #[test]
    fn test_generate_is_permutation() {
        let mut rng = StdRng::seed_from_u64(11);
        for size in 2..=7 {
            let grid = SchulteGrid::generate(size, &mut rng);
            let mut values = grid.cells().to_vec();
            values.sort_unstable();
            let expected: Vec<u32> = (1..=(size * size) as u32).collect();
            assert_eq!(values, expected, "size {size}");
            assert_eq!(grid.next_expected(), 1);
            assert!(!grid.is_solved());
        }
    }

    #[test]
    fn test_generate_is_uniform() {
        // 2×2 has 24 layouts; 24_000 draws put each near 1000
        let mut rng = StdRng::seed_from_u64(2024);
        let mut counts: HashMap<Vec<u32>, usize> = HashMap::new();
        for _ in 0..24_000 {
            let grid = SchulteGrid::generate(2, &mut rng);
            *counts.entry(grid.cells().to_vec()).or_default() += 1;
        }
        assert_eq!(counts.len(), 24);
        for (layout, n) in counts {
            assert!((800..=1200).contains(&n), "{layout:?} seen {n} times");
        }
    }

    #[test]
    fn test_correct_clicks_advance_by_one() {
        let mut grid = SchulteGrid::from_cells(2, vec![3, 1, 4, 2]);
        assert_eq!(grid.click_value(1), ClickResult::Correct);
        assert_eq!(grid.next_expected(), 2);
        assert!(grid.is_cell_solved(1));
        assert!(!grid.is_cell_solved(0));
    }

    #[test]
    fn test_wrong_click_changes_nothing() {
        let mut grid = SchulteGrid::from_cells(2, vec![3, 1, 4, 2]);
        let before = grid.clone();
        assert_eq!(grid.click_value(3), ClickResult::Wrong);
        assert_eq!(grid.click_cell(2), ClickResult::Wrong);
        assert_eq!(grid, before);

        grid.click_value(1);
        // Re-clicking a solved number is just a wrong click
        assert_eq!(grid.click_value(1), ClickResult::Wrong);
        assert_eq!(grid.next_expected(), 2);
    }

    #[test]
    fn test_solve_by_position() {
        let mut grid = SchulteGrid::from_cells(2, vec![3, 1, 4, 2]);
        assert_eq!(grid.click_cell(1), ClickResult::Correct);
        assert_eq!(grid.click_cell(3), ClickResult::Correct);
        assert_eq!(grid.click_cell(0), ClickResult::Correct);
        assert_eq!(grid.click_cell(2), ClickResult::Completed);
        assert!(grid.is_solved());
        assert_eq!(grid.next_expected(), 5);
        assert_eq!(grid.click_cell(0), ClickResult::Ignored);
    }

    #[test]
    fn test_click_outside_grid() {
        let mut grid = SchulteGrid::from_cells(2, vec![3, 1, 4, 2]);
        assert_eq!(grid.click_cell(4), ClickResult::Ignored);
        assert!(!grid.is_cell_solved(4));
    }

    #[test]
    fn test_next_expected_tracks_progress() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut grid = SchulteGrid::generate(4, &mut rng);
        for n in 1..=16 {
            assert_eq!(grid.next_expected(), n);
            grid.click_value(n + 1); // always wrong
            assert_eq!(grid.next_expected(), n);
            grid.click_value(n);
        }
        assert!(grid.is_solved());
        assert_eq!(grid.next_expected(), 17);
    }
}
