use serde::{Deserialize, Serialize};

use super::OrderId;
use crate::values::{Price, Quantity};

/// A match between one buy and one sell order, before it is booked as a trade
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fill {
    pub buy_order_id: OrderId,
    pub sell_order_id: OrderId,
    pub price: Price,
    pub quantity: Quantity,
}
