// Text preview of animation rows across variants

use crate::core::{CoreError, Grid};
use crate::sheet::Frame;
use std::fmt;

/// One variant's view of a single animation row
#[derive(Debug, Clone, PartialEq)]
pub enum PreviewLine {
    /// Frame names in column order, then the number of empty cells
    Row {
        variant: usize,
        frames: Vec<String>,
        empty: usize,
    },
    /// The row does not exist in this variant
    Invalid { variant: usize, error: CoreError },
}

impl PreviewLine {
    pub fn is_valid(&self) -> bool {
        matches!(self, PreviewLine::Row { .. })
    }
}

impl fmt::Display for PreviewLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreviewLine::Row {
                variant,
                frames,
                empty,
            } => {
                write!(f, "[{}] {}", variant, frames.join(" "))?;
                if *empty > 0 {
                    write!(f, " ({} empty)", empty)?;
                }
                Ok(())
            }
            PreviewLine::Invalid { variant, error } => write!(f, "[{}] error: {}", variant, error),
        }
    }
}

/// Show `row` of every variant
///
/// A variant without that row is flagged on its own line; the other variants
/// are still shown.
pub fn preview_rows(grids: &[Grid<Frame>], row: usize) -> Vec<PreviewLine> {
    grids
        .iter()
        .enumerate()
        .map(|(variant, grid)| match grid.row_frames(row) {
            Ok(present) => PreviewLine::Row {
                variant,
                frames: present.iter().map(|frame| frame.name.clone()).collect(),
                empty: grid.width() - present.len(),
            },
            Err(error) => PreviewLine::Invalid { variant, error },
        })
        .collect()
}
