// Frame sequencing core
//
// Pure, allocation-only logic shared by every sheet:
// - Ordering frame names by their trailing number
// - Reshaping a flat frame sequence into per-variant grids
// - Extracting one animation row from a grid
// - Pairing original clips with override clips by position

pub mod collate;
pub mod grid;
pub mod pairing;

pub use collate::{compare, compare_with_tiebreak, extract_number, sort_by_frame_number};
pub use grid::{extract_row, reshape, Grid};
pub use pairing::pair_by_position;

/// Configuration-class errors raised while sequencing frames
///
/// None of these represent corrupted state: each one aborts only the current
/// generation request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid grid dimension: width {width}, height {height} (both must be greater than zero)")]
    InvalidDimension { width: usize, height: usize },

    #[error("Row {row} is out of range for a grid with {rows} rows")]
    RowOutOfRange { row: usize, rows: usize },

    #[error("Cannot pair {originals} original clips with {overrides} override clips")]
    PairingLengthMismatch { originals: usize, overrides: usize },

    #[error("Sheet '{0}' produced no frames")]
    EmptyFrameSequence(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_display() {
        let err = CoreError::RowOutOfRange { row: 3, rows: 3 };
        assert_eq!(err.to_string(), "Row 3 is out of range for a grid with 3 rows");

        let err = CoreError::EmptyFrameSequence("body".to_string());
        assert_eq!(err.to_string(), "Sheet 'body' produced no frames");
    }
}
