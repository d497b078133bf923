//! Text rendering for [`Matrix`].
//!
//! `Display` prints a one-line preview of the leading 3x3 block; the
//! delimited renderers print every element, one row per line.

use core::fmt;
use core::fmt::Write as _;

use super::Matrix;

const PREVIEW: usize = 3;

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Matrix; {}x{} ", self.height, self.width)?;
        for i in 0..self.height.min(PREVIEW) {
            for j in 0..self.width.min(PREVIEW) {
                write!(f, " ({i},{j})={}", self.data[i * self.width + j])?;
            }
        }
        Ok(())
    }
}

impl Matrix {
    /// Every element with `decimals` fractional digits, separated by
    /// `delimiter`, one row per line.
    ///
    /// ```
    /// # use linmat_core::Matrix;
    /// let m = Matrix::from_array(&[[1.0, 2.5], [3.26, 4.0]]);
    /// assert_eq!(m.to_delimited(1, ","), "1.0,2.5\n3.3,4.0\n");
    /// ```
    pub fn to_delimited(&self, decimals: usize, delimiter: &str) -> String {
        self.render(delimiter, |out, x| write!(out, "{x:.decimals$}"))
    }

    /// Tab-separated rows at full precision, suitable for pasting into a
    /// spreadsheet.
    pub fn to_tsv(&self) -> String {
        self.render("\t", |out, x| write!(out, "{x}"))
    }

    fn render<F>(&self, delimiter: &str, mut cell: F) -> String
    where
        F: FnMut(&mut String, f64) -> fmt::Result,
    {
        if self.height == 0 && self.width == 0 {
            return "null matrix".to_owned();
        }
        let mut out = String::new();
        for i in 0..self.height {
            for j in 0..self.width {
                if j > 0 {
                    out.push_str(delimiter);
                }
                // Writing into a String cannot fail.
                let _ = cell(&mut out, self.data[i * self.width + j]);
            }
            out.push('\n');
        }
        out
    }
}
