//! Translation of raw indices into display positions.
//!
//! Rows and columns are addressed internally by 0-based indices. Users read
//! 1-based line and column numbers, and when the source carries a header row
//! that row occupies line 1, pushing every data row down by one.

/// Returns the 1-based display line of the data row at `raw_row`.
///
/// ```rust
/// use tabular_core::display_line;
///
/// assert_eq!(display_line(0, false), 1);
/// assert_eq!(display_line(0, true), 2);
/// ```
pub fn display_line(raw_row: usize, has_headers: bool) -> usize {
    if has_headers { raw_row + 2 } else { raw_row + 1 }
}

/// Returns the 1-based display column of the field at `raw_column`.
pub fn display_column(raw_column: usize) -> usize {
    raw_column + 1
}
