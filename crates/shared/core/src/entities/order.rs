use serde::{Deserialize, Serialize};

use super::Side;
use crate::values::{AgentId, Price, Quantity};

/// Position of an order in the day's book
pub type OrderId = usize;

/// A one-day limit order for allowances
///
/// Orders are created fresh every day and dropped once the day's matching
/// pass is over. `trader` is the back-reference to the owning trader: its
/// position in the slice of traders borrowed for that pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub trader: usize,
    pub agent_id: AgentId,
    pub side: Side,
    pub price: Price,
    pub quantity: Quantity,
    pub filled_quantity: Quantity,
}

impl Order {
    pub fn new(
        id: OrderId,
        trader: usize,
        agent_id: AgentId,
        side: Side,
        price: Price,
        quantity: Quantity,
    ) -> Self {
        Self {
            id,
            trader,
            agent_id,
            side,
            price,
            quantity,
            filled_quantity: 0,
        }
    }

    /// Returns remaining quantity to be filled
    pub fn remaining_quantity(&self) -> Quantity {
        self.quantity.saturating_sub(self.filled_quantity)
    }

    /// Returns true if the order is completely filled
    pub fn is_filled(&self) -> bool {
        self.filled_quantity >= self.quantity
    }

    /// Record a fill; the caller guarantees `quantity <= remaining_quantity()`
    pub fn fill(&mut self, quantity: Quantity) {
        debug_assert!(quantity <= self.remaining_quantity());
        self.filled_quantity += quantity;
    }
}
