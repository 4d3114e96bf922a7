use ets_core::{Fill, Order, Side};
use ets_ports::{MatchingMode, MatchingPolicy, MatchingResult, RandomSource, shuffle};

use crate::execution::execute_fill;
use crate::order_queue::OrderQueue;

/// Seller-preferred double auction
///
/// Orders are matched as follows:
/// 1. Buyers rest in a max-heap by limit price
/// 2. Sellers are visited in a random order
/// 3. Each seller takes the best buyer while its limit clears the seller's,
///    trading at the **buyer's** price until one side is exhausted
pub struct SellerPreferredMatching;

impl SellerPreferredMatching {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SellerPreferredMatching {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchingPolicy for SellerPreferredMatching {
    fn mode(&self) -> MatchingMode {
        MatchingMode::SellerPreferred
    }

    fn match_orders(
        &self,
        orders: &mut [Order],
        rng: &mut dyn RandomSource,
    ) -> MatchingResult<Vec<Fill>> {
        let mut buyers = OrderQueue::highest_price_first();
        let mut sellers = Vec::new();
        for order in orders.iter() {
            match order.side {
                Side::Buy => buyers.push(order),
                Side::Sell => sellers.push(order.id),
            }
        }

        // No seller gets a positional advantage
        shuffle(&mut sellers, rng);

        let mut fills = Vec::new();
        for sell_id in sellers {
            while orders[sell_id].remaining_quantity() > 0 {
                let Some(buy_id) = buyers.peek_live(orders) else {
                    break;
                };
                if !self.can_match(&orders[buy_id], &orders[sell_id]) {
                    break;
                }
                let price = orders[buy_id].price;
                fills.push(execute_fill(orders, buy_id, sell_id, price)?);
            }
        }

        Ok(fills)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ets_core::AgentId;
    use ets_random::{ScriptedRandom, SeededRandom};
    use rust_decimal_macros::dec;

    fn order(id: usize, side: Side, price: rust_decimal::Decimal, quantity: u64) -> Order {
        Order::new(id, id, AgentId(id), side, price, quantity)
    }

    #[test]
    fn test_trades_at_buyer_price_with_partial_fill() {
        let mut orders = vec![
            order(0, Side::Sell, dec!(10), 3),
            order(1, Side::Buy, dec!(12), 5),
        ];

        let fills = SellerPreferredMatching::new()
            .match_orders(&mut orders, &mut ScriptedRandom::new())
            .unwrap();

        assert_eq!(fills.len(), 1);
        assert_eq!(fills[0].price, dec!(12));
        assert_eq!(fills[0].quantity, 3);
        assert_eq!(orders[0].remaining_quantity(), 0);
        assert_eq!(orders[1].remaining_quantity(), 2);
    }

    #[test]
    fn test_seller_walks_down_the_bids() {
        let mut orders = vec![
            order(0, Side::Buy, dec!(11), 2),
            order(1, Side::Buy, dec!(15), 1),
            order(2, Side::Buy, dec!(8), 4),
            order(3, Side::Sell, dec!(9), 5),
        ];

        let fills = SellerPreferredMatching::new()
            .match_orders(&mut orders, &mut ScriptedRandom::new())
            .unwrap();

        let legs: Vec<_> = fills.iter().map(|f| (f.buy_order_id, f.price, f.quantity)).collect();
        assert_eq!(legs, vec![(1, dec!(15), 1), (0, dec!(11), 2)]);
        assert_eq!(orders[3].remaining_quantity(), 2);
        assert_eq!(orders[2].remaining_quantity(), 4);
    }

    #[test]
    fn test_no_trade_when_prices_do_not_cross() {
        let mut orders = vec![
            order(0, Side::Sell, dec!(20), 5),
            order(1, Side::Buy, dec!(10), 5),
        ];

        let fills = SellerPreferredMatching::new()
            .match_orders(&mut orders, &mut ScriptedRandom::new())
            .unwrap();

        assert!(fills.is_empty());
    }

    #[test]
    fn test_price_priority_over_random_books() {
        let mut rng = SeededRandom::new(11);
        for round in 0..50u64 {
            let mut orders: Vec<Order> = (0..12)
                .map(|i| {
                    let side = if (i + round as usize) % 3 == 0 { Side::Sell } else { Side::Buy };
                    let price = rust_decimal::Decimal::from(5 + rng.index(10) as i64);
                    order(i, side, price, 1 + rng.index(6) as u64)
                })
                .collect();
            let submitted = orders.clone();

            let fills = SellerPreferredMatching::new()
                .match_orders(&mut orders, &mut rng)
                .unwrap();

            for fill in fills {
                let buy = &submitted[fill.buy_order_id];
                let sell = &submitted[fill.sell_order_id];
                assert_eq!(fill.price, buy.price);
                assert!(sell.price <= buy.price);
                assert!(fill.quantity > 0);
            }
            for (before, after) in submitted.iter().zip(&orders) {
                assert!(after.filled_quantity <= before.quantity);
            }
        }
    }
}
