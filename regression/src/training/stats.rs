/// Per-epoch training statistics handed to the epoch-end callback.
///
/// `loss` is the average of the per-batch losses seen during the epoch;
/// `mse` is measured over the full dataset after the epoch's updates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpochStats {
    pub epoch: usize,
    pub loss: f32,
    pub mse: f32,
}
