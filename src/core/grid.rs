// Grid reshaping and row extraction
//
// A sheet holds one or more variants (e.g. colour swaps) that share the same
// animation layout. Each variant occupies `width * height` consecutive frames.

use super::CoreError;

/// One variant's frames arranged as `height` rows of `width` columns
///
/// Only the frames the variant actually received are stored. Cells past the
/// end of the source sequence read as absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<F> {
    width: usize,
    height: usize,
    /// Row-major prefix of the grid, at most `width * height` long
    frames: Vec<F>,
}

impl<F> Grid<F> {
    /// Number of columns (frames per animation)
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows (animations per variant)
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells; fits in `usize` because `reshape` checked it
    pub fn area(&self) -> usize {
        self.width * self.height
    }

    /// Get a cell, `None` when out of range or absent
    pub fn get(&self, row: usize, column: usize) -> Option<&F> {
        if row >= self.height || column >= self.width {
            return None;
        }
        self.frames.get(row * self.width + column)
    }

    /// The frames present in one row, in column order
    ///
    /// Shorter than `width` only in the last row(s) of a partial grid.
    pub fn row_frames(&self, row: usize) -> Result<&[F], CoreError> {
        if row >= self.height {
            return Err(CoreError::RowOutOfRange {
                row,
                rows: self.height,
            });
        }
        let len = self.frames.len();
        let start = (row * self.width).min(len);
        let end = start.saturating_add(self.width).min(len);
        Ok(&self.frames[start..end])
    }

    /// Borrow one row as exactly `width` cells in column order
    pub fn row(&self, row: usize) -> Result<Vec<Option<&F>>, CoreError> {
        let present = self.row_frames(row)?;
        let mut cells: Vec<Option<&F>> = present.iter().map(Some).collect();
        cells.resize(self.width, None);
        Ok(cells)
    }

    /// Number of cells holding a frame
    pub fn filled(&self) -> usize {
        self.frames.len()
    }

    /// Whether every cell holds a frame
    pub fn is_complete(&self) -> bool {
        self.frames.len() == self.area()
    }

    /// Iterate over present frames in row-major order
    pub fn frames(&self) -> impl Iterator<Item = &F> {
        self.frames.iter()
    }
}

/// Reshape a flat frame sequence into a list of variant grids
///
/// Grid `i` consumes frames `[i * width * height, (i + 1) * width * height)`
/// row-major. The last grid may be partially filled; its trailing cells read
/// as absent rather than borrowing frames from anywhere else.
pub fn reshape<F: Clone>(
    frames: &[F],
    width: usize,
    height: usize,
) -> Result<Vec<Grid<F>>, CoreError> {
    if width == 0 || height == 0 {
        return Err(CoreError::InvalidDimension { width, height });
    }
    let area = width
        .checked_mul(height)
        .ok_or(CoreError::InvalidDimension { width, height })?;

    let grids = frames
        .chunks(area)
        .map(|chunk| Grid {
            width,
            height,
            frames: chunk.to_vec(),
        })
        .collect();

    Ok(grids)
}

/// Extract one animation's timeline: the grid row at `row`, columns `0..width`
pub fn extract_row<F: Clone>(grid: &Grid<F>, row: usize) -> Result<Vec<Option<F>>, CoreError> {
    Ok(grid.row(row)?.into_iter().map(|cell| cell.cloned()).collect())
}
