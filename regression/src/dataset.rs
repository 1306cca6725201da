use std::num::NonZeroUsize;

use ndarray::ArrayView2;
use rand::Rng;

use crate::{MlError, Result};

/// An in-memory supervised dataset of paired scalar inputs and labels.
///
/// Inputs and labels live in two parallel buffers; every operation that
/// reorders one reorders the other, so the i-th input always belongs to the
/// i-th label.
#[derive(Debug, Clone, PartialEq)]
pub struct XyDataset {
    xs: Vec<f32>,
    ys: Vec<f32>,
}

impl XyDataset {
    /// Creates a dataset from owned buffers.
    ///
    /// # Errors
    /// Returns `MlError::ShapeMismatch` when the buffers differ in length.
    pub fn new(xs: Vec<f32>, ys: Vec<f32>) -> Result<Self> {
        if xs.len() != ys.len() {
            return Err(MlError::ShapeMismatch {
                what: "labels",
                got: ys.len(),
                expected: xs.len(),
            });
        }

        Ok(Self { xs, ys })
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    pub fn xs(&self) -> &[f32] {
        &self.xs
    }

    pub fn ys(&self) -> &[f32] {
        &self.ys
    }

    /// Permutes the samples uniformly at random, keeping each (x, y) pair
    /// together.
    pub fn shuffle<R: Rng>(&mut self, rng: &mut R) {
        for i in (1..self.len()).rev() {
            let j = rng.random_range(0..=i);
            self.xs.swap(i, j);
            self.ys.swap(i, j);
        }
    }

    /// Splits the dataset into consecutive `(batch, 1)`-shaped view pairs.
    /// The final batch is shorter when `batch_size` does not divide the
    /// dataset length.
    pub fn batches<'a>(
        &'a self,
        batch_size: NonZeroUsize,
    ) -> impl Iterator<Item = (ArrayView2<'a, f32>, ArrayView2<'a, f32>)> + 'a {
        self.xs
            .chunks(batch_size.get())
            .zip(self.ys.chunks(batch_size.get()))
            .map(|(x, y)| {
                (
                    ArrayView2::from_shape((x.len(), 1), x).unwrap(),
                    ArrayView2::from_shape((y.len(), 1), y).unwrap(),
                )
            })
    }

    /// The whole dataset as a single batch pair.
    pub fn full(&self) -> (ArrayView2<'_, f32>, ArrayView2<'_, f32>) {
        (
            ArrayView2::from_shape((self.len(), 1), &self.xs[..]).unwrap(),
            ArrayView2::from_shape((self.len(), 1), &self.ys[..]).unwrap(),
        )
    }
}
