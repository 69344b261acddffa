//! Transposition of a [`crate::types::Grid`].

use crate::types::Grid;

/// Returns a new grid with rows and columns swapped: `out[i][j] == grid[j][i]`.
pub fn transpose(grid: &Grid) -> Grid {
    let (rows, cols) = (grid.row_count(), grid.col_count());
    let src = grid.cells();

    let mut cells = Vec::with_capacity(src.len());
    for c in 0..cols {
        for r in 0..rows {
            cells.push(src[r * cols + c]);
        }
    }

    Grid::from_parts(cols, rows, cells)
}

#[cfg(test)]
mod tests {
    use super::transpose;
    use crate::types::Grid;

    #[test]
    fn transpose_square() {
        let g = Grid::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9]]).unwrap();
        assert_eq!(
            transpose(&g).to_rows(),
            vec![vec![1, 4, 7], vec![2, 5, 8], vec![3, 6, 9]]
        );
    }

    #[test]
    fn transpose_swaps_dimensions() {
        let g = Grid::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
        let t = transpose(&g);
        assert_eq!((t.row_count(), t.col_count()), (3, 2));
        assert_eq!(t.to_rows(), vec![vec![1, 4], vec![2, 5], vec![3, 6]]);
    }

    #[test]
    fn transpose_single_cell_is_identity() {
        let g = Grid::from_rows(vec![vec![5]]).unwrap();
        assert_eq!(transpose(&g), g);
    }

    #[test]
    fn transpose_row_vector_becomes_column() {
        let g = Grid::from_rows(vec![vec![1, 2, 3]]).unwrap();
        assert_eq!(transpose(&g).to_rows(), vec![vec![1], vec![2], vec![3]]);
    }
}
