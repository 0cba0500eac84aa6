//! Frame rasterization of a board and its influence map
//!
//! Layers are drawn back to front: background, influence squares, grid,
//! star points, stones.

use std::path::Path;

use image::{Rgba, RgbaImage};

use crate::board::{Colour, StoneSource};
use crate::influence::InfluenceMap;
use crate::io::configuration::{
    BACKGROUND_COLOUR, BLACK_STONE_COLOUR, DEFAULT_OVERLAY_ALPHA, FRAME_INDEX_WIDTH, GRID_COLOUR,
    MAX_CELL_SIZE, MIN_CELL_SIZE, STAR_POINT_DIVISOR, STONE_INSET, STONE_OUTLINE_COLOUR,
    WHITE_STONE_COLOUR,
};
use crate::io::error::{InfluenceError, Result, invalid_parameter};

/// Pixel geometry of a rendered frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameLayout {
    /// Pixel distance between adjacent intersections
    pub cell_size: u32,
    /// Pixel distance from the image edge to the outermost lines
    pub margin: u32,
    /// Opacity of the influence squares
    pub overlay_alpha: u8,
}

impl FrameLayout {
    /// Layout with a margin of one cell and opaque influence squares
    ///
    /// # Errors
    ///
    /// Returns an error if `cell_size` is outside `MIN_CELL_SIZE..=MAX_CELL_SIZE`
    pub fn new(cell_size: u32) -> Result<Self> {
        if !(MIN_CELL_SIZE..=MAX_CELL_SIZE).contains(&cell_size) {
            return Err(invalid_parameter(
                "cell_size",
                &cell_size,
                &format!("must be between {MIN_CELL_SIZE} and {MAX_CELL_SIZE} pixels"),
            ));
        }
        Ok(Self {
            cell_size,
            margin: cell_size,
            overlay_alpha: DEFAULT_OVERLAY_ALPHA,
        })
    }

    /// Replace the influence square opacity
    pub const fn with_overlay_alpha(mut self, overlay_alpha: u8) -> Self {
        self.overlay_alpha = overlay_alpha;
        self
    }

    /// Width and height of a frame for a `size` x `size` board
    ///
    /// Saturates at `u32::MAX` for layouts built by hand outside the
    /// validated range.
    pub const fn image_side(&self, size: usize) -> u32 {
        let lines = if size > u32::MAX as usize {
            u32::MAX
        } else {
            size.saturating_sub(1) as u32
        };
        lines
            .saturating_mul(self.cell_size)
            .saturating_add(self.margin.saturating_mul(2))
    }

    /// Pixel coordinate of the line with the given index
    const fn line_position(&self, index: usize) -> i64 {
        self.margin as i64 + index as i64 * self.cell_size as i64
    }

    const fn stone_radius(&self) -> i64 {
        (self.cell_size / 2).saturating_sub(STONE_INSET) as i64
    }
}

/// Star point coordinates `(col, row)` for the common board sizes
pub const fn star_points(size: usize) -> &'static [(usize, usize)] {
    match size {
        9 => &[(2, 2), (2, 6), (6, 2), (6, 6), (4, 4)],
        13 => &[(3, 3), (3, 9), (9, 3), (9, 9), (6, 6)],
        19 => &[
            (3, 3),
            (3, 9),
            (3, 15),
            (9, 3),
            (9, 9),
            (9, 15),
            (15, 3),
            (15, 9),
            (15, 15),
        ],
        _ => &[],
    }
}

/// Render one frame of a board with its influence map
///
/// The map and the board are expected to share the same size; the map's
/// size determines the image dimensions.
pub fn render_frame<S>(board: &S, influence: &InfluenceMap, layout: &FrameLayout) -> RgbaImage
where
    S: StoneSource + ?Sized,
{
    let size = influence.size();
    let side = layout.image_side(size);
    let mut image = RgbaImage::from_pixel(side, side, Rgba(BACKGROUND_COLOUR));

    let cell = i64::from(layout.cell_size);
    let half = cell / 2;
    for (point, entry) in influence.iter() {
        let x0 = layout.line_position(point.col) - half;
        let y0 = layout.line_position(point.row) - half;
        fill_rect(
            &mut image,
            (x0, y0),
            (x0 + cell, y0 + cell),
            entry.colour.to_rgba(layout.overlay_alpha),
        );
    }

    let first = layout.line_position(0);
    let last = layout.line_position(size.saturating_sub(1));
    for index in 0..size {
        let at = layout.line_position(index);
        fill_rect(&mut image, (at, first), (at + 1, last + 1), GRID_COLOUR);
        fill_rect(&mut image, (first, at), (last + 1, at + 1), GRID_COLOUR);
    }

    let star_radius = i64::from(layout.cell_size / STAR_POINT_DIVISOR);
    for &(col, row) in star_points(size) {
        let centre = (layout.line_position(col), layout.line_position(row));
        fill_circle(&mut image, centre, star_radius, GRID_COLOUR, GRID_COLOUR);
    }

    let radius = layout.stone_radius();
    for (colour, fill) in [
        (Colour::Black, BLACK_STONE_COLOUR),
        (Colour::White, WHITE_STONE_COLOUR),
    ] {
        for point in board.occupied_points(colour) {
            let centre = (
                layout.line_position(point.col),
                layout.line_position(point.row),
            );
            fill_circle(&mut image, centre, radius, fill, STONE_OUTLINE_COLOUR);
        }
    }

    image
}

/// File name of a frame, one-based and zero-padded
pub fn frame_file_name(number: usize) -> String {
    format!("{number:0width$}.png", width = FRAME_INDEX_WIDTH)
}

/// Save a frame as PNG, creating parent directories as needed
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created or the image
/// cannot be written
pub fn save_frame(image: &RgbaImage, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| InfluenceError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    image.save(path).map_err(|e| InfluenceError::FrameExport {
        path: path.to_path_buf(),
        source: e,
    })
}

// Blend `colour` over the pixels in the half-open rectangle, clipped to the image
fn fill_rect(image: &mut RgbaImage, from: (i64, i64), to: (i64, i64), colour: [u8; 4]) {
    let (width, height) = (i64::from(image.width()), i64::from(image.height()));
    for y in from.1.max(0)..to.1.min(height) {
        for x in from.0.max(0)..to.0.min(width) {
            blend_pixel(image, x, y, colour);
        }
    }
}

// Disc of `radius` with a one-pixel outline ring
fn fill_circle(
    image: &mut RgbaImage,
    centre: (i64, i64),
    radius: i64,
    fill: [u8; 4],
    outline: [u8; 4],
) {
    let outer = radius * radius;
    let inner = (radius - 1).max(0).pow(2);
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            let distance = dx * dx + dy * dy;
            if distance > outer {
                continue;
            }
            let colour = if distance > inner { outline } else { fill };
            blend_pixel(image, centre.0 + dx, centre.1 + dy, colour);
        }
    }
}

fn blend_pixel(image: &mut RgbaImage, x: i64, y: i64, colour: [u8; 4]) {
    let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
        return;
    };
    let Some(pixel) = image.get_pixel_mut_checked(x, y) else {
        return;
    };

    let alpha = u16::from(colour[3]);
    if alpha == 255 {
        *pixel = Rgba(colour);
        return;
    }
    let inverse = 255 - alpha;
    for (dst, src) in pixel.0.iter_mut().zip(colour).take(3) {
        *dst = mul_div255(u16::from(src), alpha) + mul_div255(u16::from(*dst), inverse);
    }
    pixel.0[3] = 255;
}

// Rounded `a * b / 255` for 8-bit operands
const fn mul_div255(a: u16, b: u16) -> u8 {
    let t = a * b + 128;
    ((t + (t >> 8)) >> 8) as u8
}
