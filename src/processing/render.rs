//! Text encodings of a [`crate::types::Grid`].

use crate::types::Grid;

/// Canonical rendering: each row's cells joined by `,`, every row terminated by `\n`.
///
/// Parsing the output again with [`crate::ingestion::parse_csv`] yields the same grid.
pub fn render(grid: &Grid) -> String {
    let mut out = String::with_capacity(grid.cell_count() * 4);
    for row in grid.rows() {
        push_joined(&mut out, row);
        out.push('\n');
    }
    out
}

/// All cells in row-major order joined by `,`, with no row separators and no trailing comma.
pub fn flatten(grid: &Grid) -> String {
    let mut out = String::with_capacity(grid.cell_count() * 4);
    push_joined(&mut out, grid.cells());
    out
}

fn push_joined(out: &mut String, values: &[i32]) {
    for (idx, v) in values.iter().enumerate() {
        if idx > 0 {
            out.push(',');
        }
        out.push_str(&v.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::{flatten, render};
    use crate::types::Grid;

    fn sample() -> Grid {
        Grid::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9]]).unwrap()
    }

    #[test]
    fn render_has_trailing_newline() {
        assert_eq!(render(&sample()), "1,2,3\n4,5,6\n7,8,9\n");
        assert_eq!(render(&Grid::from_rows(vec![vec![-5]]).unwrap()), "-5\n");
    }

    #[test]
    fn flatten_is_one_line() {
        assert_eq!(flatten(&sample()), "1,2,3,4,5,6,7,8,9");
        let g = Grid::from_rows(vec![vec![i32::MIN], vec![i32::MAX]]).unwrap();
        assert_eq!(flatten(&g), "-2147483648,2147483647");
    }
}
