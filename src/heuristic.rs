use grid_util::point::Point;

/// Cost of a single orthogonal move. Terrain is uniform so every edge costs the same.
pub const EDGE_COST: u32 = 1;

/// Stands in for an unknown (infinite) score.
pub const UNREACHED: u32 = u32::MAX;

/// [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) between two cells.
/// Admissible and consistent for unit-cost moves in four directions, which is what A* needs to
/// return an optimal path.
pub fn manhattan(p1: &Point, p2: &Point) -> u32 {
    (p1.x.abs_diff(p2.x) + p1.y.abs_diff(p2.y)) * EDGE_COST
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_is_symmetric() {
        let a = Point::new(0, 0);
        let b = Point::new(4, 3);
        assert_eq!(manhattan(&a, &b), 7);
        assert_eq!(manhattan(&b, &a), 7);
        assert_eq!(manhattan(&a, &a), 0);
    }

    /// A single move never lowers the estimate by more than the move costs.
    #[test]
    fn manhattan_is_consistent() {
        let goal = Point::new(3, 1);
        let p = Point::new(1, 2);
        for n in [
            Point::new(1, 3),
            Point::new(1, 1),
            Point::new(2, 2),
            Point::new(0, 2),
        ] {
            assert!(manhattan(&p, &goal) <= EDGE_COST + manhattan(&n, &goal));
        }
    }
}
