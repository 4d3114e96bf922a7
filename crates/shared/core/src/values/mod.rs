use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Price value - uses Decimal so the daily ±1 expectation steps stay exact
pub type Price = Decimal;

/// Allowance quantity in whole units
pub type Quantity = u64;

/// Simulated day, starting at 1
pub type Day = u32;

/// Length of one compliance year in days
pub const DAYS_PER_YEAR: u32 = 365;

/// Identifier of a company agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgentId(pub usize);

impl AgentId {
    pub fn new(id: usize) -> Self {
        Self(id)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "company-{}", self.0)
    }
}

impl From<usize> for AgentId {
    fn from(id: usize) -> Self {
        Self(id)
    }
}
