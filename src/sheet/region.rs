// Frame regions and fixed-cell sheet slicing

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A rectangular region of a sprite sheet holding one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameRegion {
    /// Position in the sheet (pixels, top-left origin)
    pub x: u32,
    pub y: u32,

    /// Size of the region (pixels)
    pub width: u32,
    pub height: u32,

    /// UV coordinates (0.0 to 1.0)
    pub uv_min: Vec2,
    pub uv_max: Vec2,
}

impl FrameRegion {
    /// Create a new frame region with calculated UV coordinates
    pub fn new(x: u32, y: u32, width: u32, height: u32, sheet_width: u32, sheet_height: u32) -> Self {
        let uv_min = Vec2::new(
            x as f32 / sheet_width as f32,
            y as f32 / sheet_height as f32,
        );
        let uv_max = Vec2::new(
            (x + width) as f32 / sheet_width as f32,
            (y + height) as f32 / sheet_height as f32,
        );

        Self {
            x,
            y,
            width,
            height,
            uv_min,
            uv_max,
        }
    }

    /// A region covering an entire image
    pub fn whole(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height, width, height)
    }
}

/// Cuts a sheet into equally sized cells, row-major from the top-left
#[derive(Debug, Clone, Copy)]
pub struct GridSlicer {
    sheet_width: u32,
    sheet_height: u32,
    cell_width: u32,
    cell_height: u32,
}

impl GridSlicer {
    /// Create a new slicer for a sheet of the given size
    pub fn new(sheet_width: u32, sheet_height: u32, cell_width: u32, cell_height: u32) -> Self {
        Self {
            sheet_width,
            sheet_height,
            cell_width,
            cell_height,
        }
    }

    /// Number of whole cells per row
    pub fn columns(&self) -> u32 {
        self.sheet_width.checked_div(self.cell_width).unwrap_or(0)
    }

    /// Number of whole cell rows
    pub fn rows(&self) -> u32 {
        self.sheet_height.checked_div(self.cell_height).unwrap_or(0)
    }

    /// Pixels on the right and bottom edges not covered by a whole cell
    pub fn leftover(&self) -> (u32, u32) {
        (
            self.sheet_width - self.columns() * self.cell_width,
            self.sheet_height - self.rows() * self.cell_height,
        )
    }

    /// Produce every whole cell's region
    pub fn regions(&self) -> Vec<FrameRegion> {
        let mut regions = Vec::with_capacity((self.columns() * self.rows()) as usize);

        for row in 0..self.rows() {
            for column in 0..self.columns() {
                regions.push(FrameRegion::new(
                    column * self.cell_width,
                    row * self.cell_height,
                    self.cell_width,
                    self.cell_height,
                    self.sheet_width,
                    self.sheet_height,
                ));
            }
        }

        regions
    }
}
