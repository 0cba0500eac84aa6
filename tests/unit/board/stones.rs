//! Tests for colours, points and neighbour enumeration

#[cfg(test)]
mod tests {
    use goinfluence::board::{Colour, Point};

    #[test]
    fn test_opponent_swaps_colours() {
        assert_eq!(Colour::Black.opponent(), Colour::White);
        assert_eq!(Colour::White.opponent(), Colour::Black);
    }

    // Tests Manhattan distance is symmetric and sums both axes
    // Verified by dropping the row term
    #[test]
    fn test_manhattan_distance() {
        let a = Point::new(1, 4);
        let b = Point::new(3, 0);

        assert_eq!(a.manhattan(b), 6);
        assert_eq!(b.manhattan(a), 6);
        assert_eq!(a.manhattan(a), 0);
    }

    #[test]
    fn test_neighbour_counts_by_position() {
        let corner: Vec<Point> = Point::new(0, 0).neighbours(5).collect();
        let edge: Vec<Point> = Point::new(2, 0).neighbours(5).collect();
        let centre: Vec<Point> = Point::new(2, 2).neighbours(5).collect();

        assert_eq!(corner.len(), 2);
        assert_eq!(edge.len(), 3);
        assert_eq!(centre.len(), 4);
        assert!(corner.contains(&Point::new(1, 0)));
        assert!(corner.contains(&Point::new(0, 1)));
    }

    // Tests the far corner does not leak neighbours past the board edge
    // Verified by changing `< size` to `<= size`
    #[test]
    fn test_neighbours_stay_on_board() {
        let size = 4;
        for neighbour in Point::new(3, 3).neighbours(size) {
            assert!(neighbour.is_on_board(size));
        }
        assert_eq!(Point::new(0, 0).neighbours(1).count(), 0);
    }

    #[test]
    fn test_point_index_is_row_major() {
        assert_eq!(Point::new(2, 5).index(), [5, 2]);
    }

    #[test]
    fn test_display() {
        assert_eq!(Point::new(3, 7).to_string(), "(3, 7)");
        assert_eq!(Colour::Black.to_string(), "black");
        assert_eq!(Colour::White.to_string(), "white");
    }
}
