//! Sliding-window (input, target) pairs over a time-ordered series of stacks.
use ndarray::{Array3, Array4, Array5, ArrayView4, Axis, s};
use tracing::info;

use crate::error::{Error, Result};

/// Window pairs: `inputs` is (N, input_len, bands, H, W), `targets` is
/// (N, pred_len, bands, H, W); window 0 comes first.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceWindows {
    pub inputs: Array5<f64>,
    pub targets: Array5<f64>,
}

impl SequenceWindows {
    pub fn len(&self) -> usize {
        self.inputs.len_of(Axis(0))
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The `i`-th (input, target) pair.
    pub fn window(&self, i: usize) -> (ArrayView4<'_, f64>, ArrayView4<'_, f64>) {
        (
            self.inputs.index_axis(Axis(0), i),
            self.targets.index_axis(Axis(0), i),
        )
    }
}

/// Number of windows a series of `steps` time steps yields.
pub fn window_count(steps: usize, input_len: usize, pred_len: usize) -> usize {
    (steps + 1).saturating_sub(input_len + pred_len)
}

/// Stack equally-shaped (bands, H, W) arrays along a new leading time axis.
pub fn stack_time_series(stacks: &[Array3<f64>]) -> Result<Array4<f64>> {
    let first = stacks.first().ok_or(Error::EmptyTimeSeries)?;
    let shape = first.dim();
    for (t, stack) in stacks.iter().enumerate() {
        if stack.dim() != shape {
            return Err(Error::ShapeMismatch {
                context: format!("time step {}", t),
                expected: first.shape().to_vec(),
                found: stack.shape().to_vec(),
            });
        }
    }
    let views: Vec<_> = stacks.iter().map(|a| a.view()).collect();
    ndarray::stack(Axis(0), &views).map_err(|_| Error::ShapeMismatch {
        context: "time series".to_string(),
        expected: first.shape().to_vec(),
        found: Vec::new(),
    })
}

/// Build every window for offsets `0..=T - input_len - pred_len`.
/// Fails when the series is too short for even one window.
pub fn build_sequences(
    series: ArrayView4<'_, f64>,
    input_len: usize,
    pred_len: usize,
) -> Result<SequenceWindows> {
    if input_len == 0 {
        return Err(Error::InvalidArgument {
            arg: "input_len",
            value: input_len.to_string(),
        });
    }
    if pred_len == 0 {
        return Err(Error::InvalidArgument {
            arg: "pred_len",
            value: pred_len.to_string(),
        });
    }

    let (steps, bands, rows, cols) = series.dim();
    let n = window_count(steps, input_len, pred_len);
    if n == 0 {
        return Err(Error::InsufficientTimeSteps {
            required: input_len + pred_len,
            available: steps,
            input_len,
            pred_len,
        });
    }

    let mut inputs = Array5::<f64>::zeros((n, input_len, bands, rows, cols));
    let mut targets = Array5::<f64>::zeros((n, pred_len, bands, rows, cols));
    for i in 0..n {
        let split = i + input_len;
        inputs
            .index_axis_mut(Axis(0), i)
            .assign(&series.slice(s![i..split, .., .., ..]));
        targets
            .index_axis_mut(Axis(0), i)
            .assign(&series.slice(s![split..split + pred_len, .., .., ..]));
    }

    info!(
        "Built {} windows: X {:?}, y {:?}",
        n,
        inputs.shape(),
        targets.shape()
    );
    Ok(SequenceWindows { inputs, targets })
}
