use ets_core::{Fill, Order, Side};
use ets_ports::{MatchingMode, MatchingPolicy, MatchingResult, RandomSource, shuffle};

use crate::execution::execute_fill;
use crate::order_queue::OrderQueue;

/// Buyer-preferred double auction
///
/// Mirror of the seller-preferred policy: sellers rest in a min-heap by
/// limit price, buyers are visited in a random order and each trade prints
/// at the **seller's** price.
pub struct BuyerPreferredMatching;

impl BuyerPreferredMatching {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BuyerPreferredMatching {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchingPolicy for BuyerPreferredMatching {
    fn mode(&self) -> MatchingMode {
        MatchingMode::BuyerPreferred
    }

    fn match_orders(
        &self,
        orders: &mut [Order],
        rng: &mut dyn RandomSource,
    ) -> MatchingResult<Vec<Fill>> {
        let mut sellers = OrderQueue::lowest_price_first();
        let mut buyers = Vec::new();
        for order in orders.iter() {
            match order.side {
                Side::Sell => sellers.push(order),
                Side::Buy => buyers.push(order.id),
            }
        }

        shuffle(&mut buyers, rng);

        let mut fills = Vec::new();
        for buy_id in buyers {
            while orders[buy_id].remaining_quantity() > 0 {
                let Some(sell_id) = sellers.peek_live(orders) else {
                    break;
                };
                if !self.can_match(&orders[buy_id], &orders[sell_id]) {
                    break;
                }
                let price = orders[sell_id].price;
                fills.push(execute_fill(orders, buy_id, sell_id, price)?);
            }
        }

        Ok(fills)
    }
}
