use ndarray::{linalg, Array2, ArrayView1, ArrayView2, ArrayViewMut1, ArrayViewMut2, Axis};

use crate::{MlError, Result};

/// A fully-connected affine unit, `z = x·W + b`, with its parameters stored
/// externally in a flat buffer laid out as `[W row-major, b]`.
///
/// The layer caches its last input so `backward` can form the weight
/// gradient without the caller re-supplying the batch.
#[derive(Debug, Clone)]
pub struct Dense {
    dim: (usize, usize),
    size: usize,

    // Cached forward input, (batch, dim.0).
    x: Array2<f32>,
}

impl Dense {
    /// Creates a dense unit mapping `dim.0` inputs to `dim.1` outputs.
    pub fn new(dim: (usize, usize)) -> Self {
        Self {
            dim,
            size: (dim.0 + 1) * dim.1,
            x: Array2::zeros((1, 1)),
        }
    }

    /// The (inputs, outputs) widths of this unit.
    pub fn dim(&self) -> (usize, usize) {
        self.dim
    }

    /// The number of parameters this unit owns in the flat buffer.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Computes `x·W + b` for a `(batch, inputs)` batch.
    ///
    /// # Errors
    /// Returns `MlError::ShapeMismatch` when the parameter slice or the
    /// batch width does not match this unit's dimensions.
    pub fn forward(&mut self, params: &[f32], x: ArrayView2<f32>) -> Result<Array2<f32>> {
        if x.ncols() != self.dim.0 {
            return Err(MlError::ShapeMismatch {
                what: "input columns",
                got: x.ncols(),
                expected: self.dim.0,
            });
        }

        let (w, b) = self.view_params(params)?;

        let mut z = Array2::zeros((x.nrows(), self.dim.1));
        linalg::general_mat_mul(1.0, &x, &w, 0.0, &mut z);
        z += &b;

        self.x = x.to_owned();
        Ok(z)
    }

    /// Consumes the output delta `d` of shape `(batch, outputs)`, writes
    /// `dW = xᵀ·d` and `db = Σ d` into `grad`, and returns the delta for the
    /// unit below, `d·Wᵀ`.
    ///
    /// Must be called after `forward` on the same batch.
    pub fn backward(
        &mut self,
        params: &[f32],
        grad: &mut [f32],
        d: ArrayView2<f32>,
    ) -> Result<Array2<f32>> {
        if d.ncols() != self.dim.1 {
            return Err(MlError::ShapeMismatch {
                what: "delta columns",
                got: d.ncols(),
                expected: self.dim.1,
            });
        }

        let (w, _) = self.view_params(params)?;
        let (mut dw, mut db) = self.view_grad(grad)?;

        linalg::general_mat_mul(1.0, &self.x.t(), &d, 0.0, &mut dw);
        db.assign(&d.sum_axis(Axis(0)));

        let mut upstream = Array2::zeros((d.nrows(), self.dim.0));
        linalg::general_mat_mul(1.0, &d, &w.t(), 0.0, &mut upstream);
        Ok(upstream)
    }

    fn view_params<'a>(&self, params: &'a [f32]) -> Result<(ArrayView2<'a, f32>, ArrayView1<'a, f32>)> {
        if params.len() != self.size {
            return Err(MlError::ShapeMismatch {
                what: "params",
                got: params.len(),
                expected: self.size,
            });
        }

        let w_size = self.dim.0 * self.dim.1;
        let w = ArrayView2::from_shape(self.dim, &params[..w_size]).unwrap();
        let b = ArrayView1::from_shape(self.dim.1, &params[w_size..]).unwrap();
        Ok((w, b))
    }

    fn view_grad<'a>(
        &self,
        grad: &'a mut [f32],
    ) -> Result<(ArrayViewMut2<'a, f32>, ArrayViewMut1<'a, f32>)> {
        if grad.len() != self.size {
            return Err(MlError::ShapeMismatch {
                what: "grad",
                got: grad.len(),
                expected: self.size,
            });
        }

        let w_size = self.dim.0 * self.dim.1;
        let (dw_raw, db_raw) = grad.split_at_mut(w_size);
        let dw = ArrayViewMut2::from_shape(self.dim, dw_raw).unwrap();
        let db = ArrayViewMut1::from_shape(self.dim.1, db_raw).unwrap();
        Ok((dw, db))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn size_counts_weights_and_biases() {
        assert_eq!(Dense::new((1, 1)).size(), 2);
        assert_eq!(Dense::new((3, 2)).size(), 8);
    }

    #[test]
    fn forward_is_affine() {
        let mut layer = Dense::new((1, 1));
        // w = 2, b = 1
        let params = [2.0, 1.0];
        let x = array![[0.0], [1.0], [3.0]];

        let z = layer.forward(&params, x.view()).unwrap();
        assert_eq!(z, array![[1.0], [3.0], [7.0]]);
    }

    #[test]
    fn forward_rejects_wrong_param_count() {
        let mut layer = Dense::new((1, 1));
        let err = layer.forward(&[1.0], array![[0.0]].view()).unwrap_err();
        assert_eq!(
            err,
            MlError::ShapeMismatch {
                what: "params",
                got: 1,
                expected: 2
            }
        );
    }

    #[test]
    fn backward_matches_hand_computed_gradients() {
        let mut layer = Dense::new((1, 1));
        let params = [2.0, 1.0];
        let x = array![[1.0], [2.0]];
        layer.forward(&params, x.view()).unwrap();

        // d = dL/dz for each sample
        let d = array![[0.5], [-1.0]];
        let mut grad = [0.0, 0.0];
        let upstream = layer.backward(&params, &mut grad, d.view()).unwrap();

        // dw = sum(d_i * x_i) = 0.5*1 + (-1)*2 = -1.5
        // db = sum(d_i) = -0.5
        assert!((grad[0] - (-1.5)).abs() < 1e-6);
        assert!((grad[1] - (-0.5)).abs() < 1e-6);

        // upstream = d * w
        assert_eq!(upstream, array![[1.0], [-2.0]]);
    }
}
