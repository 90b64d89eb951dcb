use ndarray::{Array, Dimension};

/// Global (min, max) of an array; `None` when it has no elements.
pub fn min_max<D: Dimension>(array: &Array<f64, D>) -> Option<(f64, f64)> {
    let mut iter = array.iter().copied();
    let first = iter.next()?;
    Some(iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
}

/// Linear rescale to [0, 1] using the array's own min and max.
/// A constant or empty array maps to zeros of the same shape.
pub fn normalize<D: Dimension>(array: &Array<f64, D>) -> Array<f64, D> {
    match min_max(array) {
        Some((min, max)) if max > min => {
            let range = max - min;
            array.mapv(|v| (v - min) / range)
        }
        _ => Array::zeros(array.raw_dim()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array1, Array2, Array3, array};

    #[test]
    fn rescales_to_unit_interval() {
        let a = array![[2.0, 4.0], [6.0, 10.0]];
        let n = normalize(&a);
        assert_eq!(n, array![[0.0, 0.25], [0.5, 1.0]]);
    }

    #[test]
    fn non_constant_values_stay_in_range() {
        let a = Array3::from_shape_fn((3, 4, 5), |(b, r, c)| (b as f64 - 1.5) * 7.0 + (r * c) as f64);
        let n = normalize(&a);
        assert!(n.iter().all(|v| (0.0..=1.0).contains(v)));
        assert_eq!(min_max(&n), Some((0.0, 1.0)));
    }

    #[test]
    fn constant_and_degenerate_arrays_become_zero() {
        let constant = Array2::from_elem((3, 3), 42.0);
        assert_eq!(normalize(&constant), Array2::<f64>::zeros((3, 3)));

        let single = array![-5.0];
        assert_eq!(normalize(&single), array![0.0]);

        let empty = Array1::<f64>::zeros(0);
        assert_eq!(normalize(&empty).len(), 0);
    }
}
