use std::num::NonZeroUsize;

use rand::Rng;

use super::EpochStats;
use crate::{
    arch::{loss::LossFn, Sequential},
    dataset::XyDataset,
    optimization::Optimizer,
    MlError, Result,
};

/// How many passes to make over the dataset and how to slice each pass.
#[derive(Debug, Clone, Copy)]
pub struct TrainingConfig {
    pub epochs: usize,
    pub batch_size: NonZeroUsize,
    /// Re-permute the dataset before every epoch.
    pub shuffle: bool,
}

/// Drives a `Sequential` over a dataset: each epoch re-shuffles, partitions
/// into batches, performs one optimizer update per batch, and reports the
/// epoch's statistics through a callback.
///
/// The trainer owns every training-time collaborator; the parameter buffer
/// stays with the caller and is mutated in place.
pub struct Trainer<O, L, R>
where
    O: Optimizer,
    L: LossFn,
    R: Rng,
{
    model: Sequential,
    optimizer: O,
    loss_fn: L,
    dataset: XyDataset,
    grad: Vec<f32>,

    config: TrainingConfig,
    rng: R,
}

impl<O, L, R> Trainer<O, L, R>
where
    O: Optimizer,
    L: LossFn,
    R: Rng,
{
    /// Returns a new `Trainer`.
    ///
    /// # Arguments
    /// * `model` - The model that will be trained.
    /// * `optimizer` - The update rule applied after every batch.
    /// * `dataset` - The samples the model will be trained on.
    /// * `loss_fn` - The loss measured between predictions and labels.
    /// * `config` - Epoch count, batch size and shuffling behavior.
    /// * `rng` - The randomness source for per-epoch shuffles.
    pub fn new(
        model: Sequential,
        optimizer: O,
        dataset: XyDataset,
        loss_fn: L,
        config: TrainingConfig,
        rng: R,
    ) -> Self {
        Self {
            grad: vec![0.0; model.size()],
            model,
            optimizer,
            loss_fn,
            dataset,
            config,
            rng,
        }
    }

    pub fn model(&self) -> &Sequential {
        &self.model
    }

    /// Hands the model back once training is done with.
    pub fn into_model(self) -> Sequential {
        self.model
    }

    /// Runs the configured number of epochs, mutating `params` in place.
    /// An epoch count of zero returns immediately with `params` untouched.
    pub fn train(&mut self, params: &mut [f32]) -> Result<Vec<EpochStats>> {
        self.train_with(params, |_| {})
    }

    /// Like `train`, invoking `on_epoch_end` after every epoch.
    pub fn train_with<F>(&mut self, params: &mut [f32], mut on_epoch_end: F) -> Result<Vec<EpochStats>>
    where
        F: FnMut(&EpochStats),
    {
        if self.config.epochs > 0 && self.dataset.is_empty() {
            return Err(MlError::EmptyData("training dataset"));
        }

        let mut history = Vec::with_capacity(self.config.epochs);

        for epoch in 0..self.config.epochs {
            if self.config.shuffle {
                self.dataset.shuffle(&mut self.rng);
            }

            let loss = self.model.backprop(
                params,
                &mut self.grad,
                &self.loss_fn,
                &mut self.optimizer,
                self.dataset.batches(self.config.batch_size),
            )?;

            let mse = self.evaluate(params)?;
            let stats = EpochStats { epoch, loss, mse };
            on_epoch_end(&stats);
            history.push(stats);
        }

        Ok(history)
    }

    /// Measures the loss over the full dataset without updating anything.
    pub fn evaluate(&mut self, params: &[f32]) -> Result<f32> {
        let (x, y) = self.dataset.full();
        let y_pred = self.model.forward(params, x)?;
        Ok(self.loss_fn.loss(y_pred.view(), y))
    }
}
