use std::ops::Range;

use ndarray::{Array2, ArrayView2};

use super::{loss::LossFn, Dense};
use crate::{optimization::Optimizer, MlError, Result};

/// A stack of dense units: information flows forward through every unit when
/// computing an output and backward when computing parameter gradients.
///
/// The stack does not own its parameters; callers pass one flat buffer that
/// the units consume in declaration order.
#[derive(Debug, Clone)]
pub struct Sequential {
    layers: Vec<Dense>,
}

impl Sequential {
    pub fn new<I>(layers: I) -> Self
    where
        I: IntoIterator<Item = Dense>,
    {
        Self {
            layers: layers.into_iter().collect(),
        }
    }

    /// Total number of parameters across all units.
    pub fn size(&self) -> usize {
        self.layers.iter().map(|layer| layer.size()).sum()
    }

    /// The (inputs, outputs) widths of every unit, in forward order.
    pub fn layer_dims(&self) -> Vec<(usize, usize)> {
        self.layers.iter().map(|layer| layer.dim()).collect()
    }

    /// Makes a forward pass through the stack.
    ///
    /// # Errors
    /// Returns `MlError::ShapeMismatch` when `params` does not cover the
    /// stack exactly or the batch width does not match the first unit.
    pub fn forward(&mut self, params: &[f32], x: ArrayView2<f32>) -> Result<Array2<f32>> {
        if params.len() != self.size() {
            return Err(MlError::ShapeMismatch {
                what: "params",
                got: params.len(),
                expected: self.size(),
            });
        }

        let mut out = x.to_owned();
        let mut offset = 0;

        for layer in &mut self.layers {
            let next = offset + layer.size();
            out = layer.forward(&params[offset..next], out.view())?;
            offset = next;
        }

        Ok(out)
    }

    /// Runs one pass over `batches`: for each batch, a forward pass, the
    /// loss delta, a backward pass writing into `grad`, and one optimizer
    /// update of `params`.
    ///
    /// The returned epoch loss is the average of the per-batch losses, each
    /// measured before that batch's update.
    pub fn backprop<'a, L, O, I>(
        &mut self,
        params: &mut [f32],
        grad: &mut [f32],
        loss_fn: &L,
        optimizer: &mut O,
        batches: I,
    ) -> Result<f32>
    where
        L: LossFn,
        O: Optimizer,
        I: Iterator<Item = (ArrayView2<'a, f32>, ArrayView2<'a, f32>)>,
    {
        if grad.len() != self.size() {
            return Err(MlError::ShapeMismatch {
                what: "grad",
                got: grad.len(),
                expected: self.size(),
            });
        }

        let layout = self.layout();
        let mut total_loss = 0.0;
        let mut num_batches = 0usize;

        for (x, y) in batches {
            let y_pred = self.forward(params, x)?;
            total_loss += loss_fn.loss(y_pred.view(), y);
            num_batches += 1;

            grad.fill(0.0);
            let mut d = loss_fn.loss_prime(y_pred.view(), y);

            for (layer, range) in self.layers.iter_mut().zip(layout.iter().cloned()).rev() {
                d = layer.backward(&params[range.clone()], &mut grad[range], d.view())?;
            }

            optimizer.update_params(params, grad);
        }

        Ok(total_loss / num_batches.max(1) as f32)
    }

    fn layout(&self) -> Vec<Range<usize>> {
        let mut ranges = Vec::with_capacity(self.layers.len());
        let mut offset = 0;

        for layer in &self.layers {
            let next = offset + layer.size();
            ranges.push(offset..next);
            offset = next;
        }

        ranges
    }
}
