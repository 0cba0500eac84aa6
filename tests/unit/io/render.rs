//! Tests for frame layout, rasterization and export

#[cfg(test)]
mod tests {
    use goinfluence::InfluenceError;
    use goinfluence::board::{BoardState, Point, StoneSource};
    use goinfluence::influence::compute_influence;
    use goinfluence::io::configuration::{MAX_BOARD_SIZE, MAX_CELL_SIZE};
    use goinfluence::io::render::{
        FrameLayout, frame_file_name, render_frame, save_frame, star_points,
    };
    use image::{Rgba, RgbaImage};
    use tempfile::TempDir;

    fn render(board: &BoardState, layout: &FrameLayout) -> RgbaImage {
        let influence = compute_influence(board, board.size()).unwrap();
        render_frame(board, &influence, layout)
    }

    fn corner_stone_board() -> BoardState {
        BoardState::with_stones(3, &[Point::new(2, 2)], &[]).unwrap()
    }

    #[test]
    fn test_layout_defaults() {
        let layout = FrameLayout::new(30).unwrap();

        assert_eq!(layout.margin, 30);
        assert_eq!(layout.overlay_alpha, 255);
        assert_eq!(layout.image_side(19), 600);
        assert_eq!(layout.image_side(1), 60);
    }

    #[test]
    fn test_layout_rejects_small_cells() {
        assert!(matches!(
            FrameLayout::new(2),
            Err(InfluenceError::InvalidParameter { .. })
        ));
    }

    // Tests oversized cells are rejected before any pixel arithmetic
    // Verified by removing the upper bound from the layout check
    #[test]
    fn test_layout_rejects_huge_cells() {
        assert!(FrameLayout::new(MAX_CELL_SIZE).is_ok());
        assert!(matches!(
            FrameLayout::new(MAX_CELL_SIZE + 1),
            Err(InfluenceError::InvalidParameter {
                parameter: "cell_size",
                ..
            })
        ));
        assert!(FrameLayout::new(300_000_000).is_err());
    }

    #[test]
    fn test_largest_layout_fits_largest_board() {
        let layout = FrameLayout::new(MAX_CELL_SIZE).unwrap();

        assert_eq!(layout.image_side(MAX_BOARD_SIZE), 51 * 256 + 2 * 256);
    }

    #[test]
    fn test_image_side_saturates_for_unchecked_layouts() {
        let layout = FrameLayout {
            cell_size: 300_000_000,
            margin: 300_000_000,
            overlay_alpha: 255,
        };

        assert_eq!(layout.image_side(19), u32::MAX);
        assert_eq!(layout.image_side(usize::MAX), u32::MAX);
    }

    #[test]
    fn test_frame_file_names() {
        assert_eq!(frame_file_name(1), "0001.png");
        assert_eq!(frame_file_name(42), "0042.png");
        assert_eq!(frame_file_name(12345), "12345.png");
    }

    #[test]
    fn test_star_points() {
        assert_eq!(star_points(19).len(), 9);
        assert_eq!(star_points(13).len(), 5);
        assert!(star_points(9).contains(&(4, 4)));
        assert!(star_points(7).is_empty());
        for size in [9, 13, 19] {
            assert!(
                star_points(size)
                    .iter()
                    .all(|&(col, row)| col < size && row < size)
            );
        }
    }

    // Tests each intersection's square carries its blended colour
    // Verified by offsetting squares by half a cell
    #[test]
    fn test_influence_squares() {
        let layout = FrameLayout::new(10).unwrap();
        let image = render(&corner_stone_board(), &layout);

        assert_eq!(image.dimensions(), (40, 40));
        // (0, 0) is four points from the stone: 20% of 255
        assert_eq!(*image.get_pixel(7, 7), Rgba([0, 51, 0, 255]));
        // (2, 2) holds the stone itself
        assert_eq!(*image.get_pixel(26, 26), Rgba([0, 255, 0, 255]));
    }

    #[test]
    fn test_grid_and_stone_drawn_over_squares() {
        let layout = FrameLayout::new(10).unwrap();
        let image = render(&corner_stone_board(), &layout);

        assert_eq!(*image.get_pixel(10, 15), Rgba([255, 255, 255, 255]));
        assert_eq!(*image.get_pixel(30, 30), Rgba([0, 0, 0, 255]));
        assert_eq!(*image.get_pixel(0, 0), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_white_stone_fill_and_outline() {
        let board = BoardState::with_stones(3, &[], &[Point::new(1, 1)]).unwrap();
        let layout = FrameLayout::new(10).unwrap();
        let image = render(&board, &layout);

        // Radius 3: centre filled white, rim outlined black
        assert_eq!(*image.get_pixel(21, 21), Rgba([255, 255, 255, 255]));
        assert_eq!(*image.get_pixel(23, 20), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_translucent_overlay_blends_with_background() {
        let layout = FrameLayout::new(10).unwrap().with_overlay_alpha(128);
        let image = render(&corner_stone_board(), &layout);

        assert_eq!(*image.get_pixel(26, 26), Rgba([0, 128, 0, 255]));
    }

    #[test]
    fn test_save_frame_creates_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("0001.png");
        let layout = FrameLayout::new(10).unwrap();

        save_frame(&render(&corner_stone_board(), &layout), &path).unwrap();

        let reloaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(reloaded.dimensions(), (40, 40));
        assert_eq!(*reloaded.get_pixel(7, 7), Rgba([0, 51, 0, 255]));
    }

    #[test]
    fn test_save_frame_reports_unwritable_path() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("file");
        std::fs::write(&blocker, "not a directory").unwrap();
        let layout = FrameLayout::new(10).unwrap();

        let result = save_frame(
            &render(&corner_stone_board(), &layout),
            &blocker.join("0001.png"),
        );

        assert!(matches!(result, Err(InfluenceError::FileSystem { .. })));
    }
}
