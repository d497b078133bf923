//! Non-copying transposed view of a [`Matrix`].

use core::ops::Index;

use crate::error::Result;

use super::Matrix;

/// Reads a borrowed matrix with row and column swapped.
///
/// The view holds a shared borrow, so the parent cannot be mutated while
/// the view is alive. [`TransposeView::to_matrix`] materialises a copy.
#[derive(Debug, Clone, Copy)]
pub struct TransposeView<'a> {
    parent: &'a Matrix,
}

impl<'a> TransposeView<'a> {
    pub(super) fn new(parent: &'a Matrix) -> Self {
        Self { parent }
    }

    /// Rows of the view (the parent's width).
    pub fn height(&self) -> usize {
        self.parent.width()
    }

    /// Columns of the view (the parent's height).
    pub fn width(&self) -> usize {
        self.parent.height()
    }

    pub fn get(&self, row: usize, col: usize) -> Result<f64> {
        self.parent.get(col, row)
    }

    /// The matrix this view transposes.
    pub fn parent(&self) -> &'a Matrix {
        self.parent
    }

    pub fn to_matrix(&self) -> Matrix {
        self.parent.transpose()
    }
}

impl Index<(usize, usize)> for TransposeView<'_> {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        &self.parent[(col, row)]
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_view_matches_copy() {
        let m = Matrix::from_array(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        let v = m.transpose_view();
        let t = m.transpose();
        assert_eq!((v.height(), v.width()), t.shape());
        for i in 0..3 {
            for j in 0..2 {
                assert_eq!(v[(i, j)], t[(i, j)]);
                assert_eq!(v.get(i, j).unwrap(), t[(i, j)]);
            }
        }
        assert!(v.get(0, 2).is_err());
        assert_eq!(v.to_matrix(), t);
        assert!(core::ptr::eq(v.parent(), &m));
    }
}
