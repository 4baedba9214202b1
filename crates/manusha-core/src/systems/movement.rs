//! Movement system - single-cell grid steps with occupancy

use std::collections::HashSet;

use crate::components::{GridPos, GridSize};

/// Cells claimed for the snapshot being built
#[derive(Debug, Clone, Default)]
pub struct Occupancy {
    cells: HashSet<GridPos>,
}

impl Occupancy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim a cell; false if it was already taken
    pub fn reserve(&mut self, pos: GridPos) -> bool {
        self.cells.insert(pos)
    }

    pub fn release(&mut self, pos: GridPos) {
        self.cells.remove(&pos);
    }

    pub fn is_free(&self, pos: GridPos) -> bool {
        !self.cells.contains(&pos)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Where an entity at `current` ends up after one step toward `target`.
///
/// The step moves at most one cell per axis (diagonals allowed), is clamped
/// to the grid, and is abandoned if the destination is already claimed.
pub fn resolve_step(
    current: GridPos,
    target: GridPos,
    grid: GridSize,
    occupancy: &Occupancy,
) -> GridPos {
    if current == target {
        return current;
    }

    let next = grid.clamp(current.step_toward(&target));
    if next == current || !occupancy.is_free(next) {
        return current;
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_toward_target() {
        let grid = GridSize::default();
        let occupancy = Occupancy::new();
        let from = GridPos::new(5, 5);
        assert_eq!(resolve_step(from, GridPos::new(9, 5), grid, &occupancy), GridPos::new(6, 5));
        assert_eq!(resolve_step(from, GridPos::new(1, 1), grid, &occupancy), GridPos::new(4, 4));
        assert_eq!(resolve_step(from, from, grid, &occupancy), from);
    }

    #[test]
    fn test_blocked_step_stays() {
        let grid = GridSize::default();
        let mut occupancy = Occupancy::new();
        occupancy.reserve(GridPos::new(6, 6));
        let from = GridPos::new(5, 5);
        assert_eq!(resolve_step(from, GridPos::new(8, 8), grid, &occupancy), from);
    }

    #[test]
    fn test_step_clamped_to_grid() {
        let grid = GridSize::new(10, 10);
        let occupancy = Occupancy::new();
        // Wander target outside the grid
        let corner = GridPos::new(0, 0);
        assert_eq!(resolve_step(corner, GridPos::new(-1, -1), grid, &occupancy), corner);
        let edge = GridPos::new(9, 4);
        assert_eq!(resolve_step(edge, GridPos::new(10, 5), grid, &occupancy), GridPos::new(9, 5));
    }

    #[test]
    fn test_reserve_and_release() {
        let mut occupancy = Occupancy::new();
        let cell = GridPos::new(2, 3);
        assert!(occupancy.reserve(cell));
        assert!(!occupancy.reserve(cell));
        assert!(!occupancy.is_free(cell));
        occupancy.release(cell);
        assert!(occupancy.is_free(cell));
        assert!(occupancy.is_empty());
    }
}
