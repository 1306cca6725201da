use crate::store::{ExcessFlow, HomeRate, NewFlow};

/// The operations the API exposes. Each one is named and typed here rather
/// than dispatched through a table of callbacks, so a handler can only
/// reach a store through one of these three calls.
pub trait GridOps: Send + Sync {
    /// The records in the logical slice `[page * limit, (page + 1) * limit)`,
    /// clamped to the dataset end.
    fn fetch_home_flow_rates(&self, page: usize, limit: usize) -> Vec<HomeRate>;

    /// Every stored excess flow, in insertion order.
    fn get_flows(&self) -> Vec<ExcessFlow>;

    /// Stores a flow under a fresh id and echoes the stored row.
    fn add_flow(&self, new: NewFlow) -> ExcessFlow;
}
