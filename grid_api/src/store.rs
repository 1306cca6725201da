use std::{fs, path::Path};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::{error::StoreError, ops::GridOps};

/// One home flow rate reading. Either meter value may be absent; consumers
/// are expected to filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomeRate {
    pub demand: Option<f32>,
    pub solar: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// One stored excess flow row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcessFlow {
    pub id: u64,
    pub flow: String,
    pub date: String,
}

/// An excess flow as submitted, before the store assigns its id.
#[derive(Debug, Clone, Deserialize)]
pub struct NewFlow {
    pub flow: String,
    pub date: String,
}

#[derive(Debug)]
struct FlowTable {
    rows: Vec<ExcessFlow>,
    next_id: u64,
}

/// The process-wide data store: home rates read once from a JSON dataset
/// at startup, excess flows accumulated in memory behind a lock.
///
/// Construct one with `open` in `main` and hand it to the router; handlers
/// receive it through shared state, never through a global.
#[derive(Debug)]
pub struct FlowStore {
    rates: Vec<HomeRate>,
    flows: RwLock<FlowTable>,
}

impl FlowStore {
    /// Loads the home rate dataset. Called once per process, before the
    /// server starts accepting connections.
    ///
    /// # Errors
    /// Returns `StoreError` when the file is unreadable or not a JSON
    /// array of records.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let raw = fs::read_to_string(path)?;
        let rates = serde_json::from_str(&raw)?;
        Ok(Self::from_rates(rates))
    }

    pub fn from_rates(rates: Vec<HomeRate>) -> Self {
        Self {
            rates,
            flows: RwLock::new(FlowTable {
                rows: Vec::new(),
                next_id: 1,
            }),
        }
    }

    pub fn rate_count(&self) -> usize {
        self.rates.len()
    }
}

impl GridOps for FlowStore {
    fn fetch_home_flow_rates(&self, page: usize, limit: usize) -> Vec<HomeRate> {
        let start = page.saturating_mul(limit).min(self.rates.len());
        let end = start.saturating_add(limit).min(self.rates.len());
        self.rates[start..end].to_vec()
    }

    fn get_flows(&self) -> Vec<ExcessFlow> {
        self.flows.read().rows.clone()
    }

    fn add_flow(&self, new: NewFlow) -> ExcessFlow {
        let mut table = self.flows.write();

        let row = ExcessFlow {
            id: table.next_id,
            flow: new.flow,
            date: new.date,
        };
        table.next_id += 1;
        table.rows.push(row.clone());

        row
    }
}
