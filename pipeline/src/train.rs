use std::num::NonZeroUsize;

use rand::Rng;

use regression::{
    arch::{loss::Mse, Sequential},
    dataset::XyDataset,
    optimization::Adam,
    training::{EpochStats, Trainer, TrainingConfig},
};

use crate::PipelineError;

/// Samples consumed per gradient update.
pub const BATCH_SIZE: usize = 28;

/// Passes over the dataset per run.
pub const EPOCHS: usize = 20;

/// The run's fixed training configuration: adaptive-moment updates at the
/// default rate, mean squared error, shuffled batches of [`BATCH_SIZE`],
/// [`EPOCHS`] passes.
pub fn training_config() -> TrainingConfig {
    TrainingConfig {
        epochs: EPOCHS,
        batch_size: NonZeroUsize::new(BATCH_SIZE).unwrap(),
        shuffle: true,
    }
}

/// Fits `model` to `dataset`, mutating `params` in place and reporting each
/// epoch through `on_epoch_end`. Returns the model together with the
/// per-epoch history once every epoch has run; there is no early stopping.
pub fn train_model<R, F>(
    model: Sequential,
    dataset: XyDataset,
    params: &mut [f32],
    rng: R,
    on_epoch_end: F,
) -> Result<(Sequential, Vec<EpochStats>), PipelineError>
where
    R: Rng,
    F: FnMut(&EpochStats),
{
    let mut trainer = Trainer::new(model, Adam::default(), dataset, Mse, training_config(), rng);
    let history = trainer.train_with(params, on_epoch_end)?;
    Ok((trainer.into_model(), history))
}
