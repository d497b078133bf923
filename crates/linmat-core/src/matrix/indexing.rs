//! Row/column selection and submatrix extraction for [`Matrix`].
//!
//! Every method returns an independent copy. Ranges are inclusive on both
//! ends; an index list of `None` selects the whole axis.

use crate::error::{LinalgError, Result};
use crate::vector::Vector;

use super::{Matrix, TransposeView};

impl Matrix {
    fn check_row(&self, row: usize) -> Result<()> {
        if row >= self.height {
            return Err(LinalgError::IndexOutOfRange {
                index: vec![row],
                shape: vec![self.height, self.width],
            });
        }
        Ok(())
    }

    fn check_col(&self, col: usize) -> Result<()> {
        if col >= self.width {
            return Err(LinalgError::IndexOutOfRange {
                index: vec![col],
                shape: vec![self.height, self.width],
            });
        }
        Ok(())
    }

    fn check_span(&self, first: usize, last: usize, len: usize) -> Result<()> {
        if first > last || last >= len {
            return Err(LinalgError::IndexOutOfRange {
                index: vec![first, last],
                shape: vec![self.height, self.width],
            });
        }
        Ok(())
    }

    /// Gather `rows x cols` into a new matrix. Indices must already be valid.
    fn gather(&self, rows: &[usize], cols: &[usize]) -> Matrix {
        let mut data = Vec::with_capacity(rows.len() * cols.len());
        for &i in rows {
            let offset = i * self.width;
            data.extend(cols.iter().map(|&j| self.data[offset + j]));
        }
        let mut out = Matrix::from_parts(rows.len(), cols.len(), data);
        if let Some(names) = &self.column_names {
            out.column_names = Some(cols.iter().map(|&j| names[j].clone()).collect());
        }
        out
    }

    fn all_rows(&self) -> Vec<usize> {
        (0..self.height).collect()
    }

    fn all_cols(&self) -> Vec<usize> {
        (0..self.width).collect()
    }

    // ------------------------------------------------------------------
    // Single rows and columns
    // ------------------------------------------------------------------

    /// Copy of row `i` as a [`Vector`].
    pub fn row(&self, i: usize) -> Result<Vector> {
        self.check_row(i)?;
        Ok(Vector::from_slice(
            &self.data[i * self.width..(i + 1) * self.width],
        ))
    }

    /// Copy of column `j` as a [`Vector`].
    pub fn column(&self, j: usize) -> Result<Vector> {
        self.check_col(j)?;
        Ok(Vector::from_vec(
            (0..self.height)
                .map(|i| self.data[i * self.width + j])
                .collect(),
        ))
    }

    /// Row `i` as a `1 x width` matrix.
    pub fn row_matrix(&self, i: usize) -> Result<Matrix> {
        self.rows(&[i])
    }

    /// Column `j` as a `height x 1` matrix.
    pub fn column_matrix(&self, j: usize) -> Result<Matrix> {
        self.columns(&[j])
    }

    /// The final row as a `1 x width` matrix.
    pub fn last_row(&self) -> Result<Matrix> {
        match self.height {
            0 => Err(LinalgError::InvalidArgument {
                reason: "matrix has no rows",
            }),
            h => self.rows(&[h - 1]),
        }
    }

    // ------------------------------------------------------------------
    // Index lists and masks
    // ------------------------------------------------------------------

    /// The listed rows, in the order given.
    pub fn rows(&self, rows: &[usize]) -> Result<Matrix> {
        for &i in rows {
            self.check_row(i)?;
        }
        Ok(self.gather(rows, &self.all_cols()))
    }

    /// The listed columns, in the order given.
    pub fn columns(&self, cols: &[usize]) -> Result<Matrix> {
        for &j in cols {
            self.check_col(j)?;
        }
        Ok(self.gather(&self.all_rows(), cols))
    }

    /// Rows whose mask entry is `true`. The mask length must equal `height`.
    pub fn rows_from_mask(&self, mask: &[bool]) -> Result<Matrix> {
        if mask.len() != self.height {
            return Err(LinalgError::DimensionMismatch {
                expected: vec![self.height],
                got: vec![mask.len()],
            });
        }
        let rows: Vec<usize> = (0..self.height).filter(|&i| mask[i]).collect();
        Ok(self.gather(&rows, &self.all_cols()))
    }

    /// Columns whose mask entry is `true`. The mask length must equal `width`.
    pub fn columns_from_mask(&self, mask: &[bool]) -> Result<Matrix> {
        if mask.len() != self.width {
            return Err(LinalgError::DimensionMismatch {
                expected: vec![self.width],
                got: vec![mask.len()],
            });
        }
        let cols: Vec<usize> = (0..self.width).filter(|&j| mask[j]).collect();
        Ok(self.gather(&self.all_rows(), &cols))
    }

    // ------------------------------------------------------------------
    // Submatrices
    // ------------------------------------------------------------------

    /// Rows `i0..=i1` restricted to `cols` (all columns when `None`).
    pub fn submatrix_rows(&self, i0: usize, i1: usize, cols: Option<&[usize]>) -> Result<Matrix> {
        self.check_span(i0, i1, self.height)?;
        let rows: Vec<usize> = (i0..=i1).collect();
        match cols {
            Some(cols) => {
                for &j in cols {
                    self.check_col(j)?;
                }
                Ok(self.gather(&rows, cols))
            }
            None => Ok(self.gather(&rows, &self.all_cols())),
        }
    }

    /// `rows` (all rows when `None`) restricted to columns `j0..=j1`.
    pub fn submatrix_cols(&self, rows: Option<&[usize]>, j0: usize, j1: usize) -> Result<Matrix> {
        self.check_span(j0, j1, self.width)?;
        let cols: Vec<usize> = (j0..=j1).collect();
        match rows {
            Some(rows) => {
                for &i in rows {
                    self.check_row(i)?;
                }
                Ok(self.gather(rows, &cols))
            }
            None => Ok(self.gather(&self.all_rows(), &cols)),
        }
    }

    /// The block `i0..=i1` x `j0..=j1`.
    ///
    /// ```
    /// # use linmat_core::Matrix;
    /// let m = Matrix::from_array(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]);
    /// let s = m.submatrix(1, 2, 0, 1).unwrap();
    /// assert_eq!(s.as_slice(), &[4.0, 5.0, 7.0, 8.0]);
    /// ```
    pub fn submatrix(&self, i0: usize, i1: usize, j0: usize, j1: usize) -> Result<Matrix> {
        self.check_span(i0, i1, self.height)?;
        self.check_span(j0, j1, self.width)?;
        let rows: Vec<usize> = (i0..=i1).collect();
        let cols: Vec<usize> = (j0..=j1).collect();
        Ok(self.gather(&rows, &cols))
    }

    /// Every column except those listed. Unknown indices are ignored.
    pub fn drop_columns(&self, drop: &[usize]) -> Matrix {
        let keep: Vec<usize> = (0..self.width).filter(|j| !drop.contains(j)).collect();
        self.gather(&self.all_rows(), &keep)
    }

    /// A copy with a constant column prepended at index 0.
    ///
    /// Column labels, when present, gain a leading `"0"`.
    pub fn insert_column(&self, value: f64) -> Matrix {
        let w = self.width + 1;
        let mut data = Vec::with_capacity(self.height * w);
        for i in 0..self.height {
            data.push(value);
            data.extend_from_slice(&self.data[i * self.width..(i + 1) * self.width]);
        }
        let mut out = Matrix::from_parts(self.height, w, data);
        if let Some(names) = &self.column_names {
            let mut labels = Vec::with_capacity(w);
            labels.push("0".to_owned());
            labels.extend(names.iter().cloned());
            out.column_names = Some(labels);
        }
        out
    }

    /// Whether every entry of column `j` equals its first entry.
    #[allow(clippy::float_cmp)]
    pub fn is_constant_column(&self, j: usize) -> Result<bool> {
        self.check_col(j)?;
        let mut values = (0..self.height).map(|i| self.data[i * self.width + j]);
        Ok(match values.next() {
            Some(first) => values.all(|x| x == first),
            None => true,
        })
    }

    // ------------------------------------------------------------------
    // Transpose and trace
    // ------------------------------------------------------------------

    /// An independent transposed copy.
    pub fn transpose(&self) -> Matrix {
        let (h, w) = self.shape();
        let mut data = vec![0.0; h * w];
        for i in 0..h {
            for j in 0..w {
                data[j * h + i] = self.data[i * w + j];
            }
        }
        Matrix::from_parts(w, h, data)
    }

    /// A borrowed view reading `self` with swapped indices. No copy is made.
    pub fn transpose_view(&self) -> TransposeView<'_> {
        TransposeView::new(self)
    }

    /// Sum of the first `min(height, width)` diagonal entries.
    pub fn trace(&self) -> f64 {
        (0..self.height.min(self.width))
            .map(|i| self.data[i * self.width + i])
            .sum()
    }
}
