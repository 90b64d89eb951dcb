//! Shape contract shared by every stage after stacking: band order and grid size.
use ndarray::ArrayView3;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackSchema {
    pub band_order: Vec<String>,
    pub width: usize,
    pub height: usize,
}

impl StackSchema {
    pub fn new(band_order: Vec<String>, width: usize, height: usize) -> Self {
        Self {
            band_order,
            width,
            height,
        }
    }

    pub fn bands(&self) -> usize {
        self.band_order.len()
    }

    /// Expected `(bands, height, width)` of one stack.
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.bands(), self.height, self.width)
    }

    /// Fails with `ShapeMismatch` unless `stack` is exactly `shape()`.
    pub fn check(&self, stack: ArrayView3<'_, f64>, context: &str) -> Result<()> {
        if stack.dim() != self.shape() {
            let (b, h, w) = self.shape();
            return Err(Error::ShapeMismatch {
                context: context.to_string(),
                expected: vec![b, h, w],
                found: stack.shape().to_vec(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    #[test]
    fn check_reports_offending_shape() {
        let schema = StackSchema::new(vec!["VIS".into(), "WV".into()], 4, 3);
        assert_eq!(schema.shape(), (2, 3, 4));
        assert!(schema.check(Array3::zeros((2, 3, 4)).view(), "ok").is_ok());

        match schema.check(Array3::zeros((2, 4, 3)).view(), "a.tif") {
            Err(Error::ShapeMismatch {
                context,
                expected,
                found,
            }) => {
                assert_eq!(context, "a.tif");
                assert_eq!(expected, vec![2, 3, 4]);
                assert_eq!(found, vec![2, 4, 3]);
            }
            other => panic!("unexpected: {:?}", other),
        }
        assert!(schema.check(Array3::zeros((3, 3, 4)).view(), "b.tif").is_err());
    }
}
