use std::cmp::Reverse;

use ets_core::{Order, OrderId, Price};
use priority_queue::PriorityQueue;

/// Which end of the price range comes out of the queue first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueOrdering {
    /// Max-heap on price (resting buyers)
    HighestPriceFirst,
    /// Min-heap on price (resting sellers)
    LowestPriceFirst,
}

/// Priority key: signed price rank, then earliest stamp
type QueueKey = (Price, Reverse<u64>);

/// Index-stamped priority queue over the day's orders
///
/// Entries are keyed by price and a logical insertion stamp, so equal prices
/// come out first-in first-out. Exhausted orders are never removed in place:
/// they are dropped lazily the next time they reach the top.
pub struct OrderQueue {
    ordering: QueueOrdering,
    queue: PriorityQueue<OrderId, QueueKey>,
    next_stamp: u64,
}

impl OrderQueue {
    pub fn new(ordering: QueueOrdering) -> Self {
        Self {
            ordering,
            queue: PriorityQueue::new(),
            next_stamp: 0,
        }
    }

    pub fn highest_price_first() -> Self {
        Self::new(QueueOrdering::HighestPriceFirst)
    }

    pub fn lowest_price_first() -> Self {
        Self::new(QueueOrdering::LowestPriceFirst)
    }

    /// Queue an order under its limit price
    pub fn push(&mut self, order: &Order) {
        let rank = match self.ordering {
            QueueOrdering::HighestPriceFirst => order.price,
            QueueOrdering::LowestPriceFirst => -order.price,
        };
        let stamp = self.next_stamp;
        self.next_stamp += 1;
        self.queue.push(order.id, (rank, Reverse(stamp)));
    }

    /// Best order that still has residual quantity, without removing it
    pub fn peek_live(&mut self, orders: &[Order]) -> Option<OrderId> {
        while let Some((&id, _)) = self.queue.peek() {
            if Self::is_live(orders, id) {
                return Some(id);
            }
            self.queue.pop();
        }
        None
    }

    /// Remove and return the best order that still has residual quantity
    pub fn pop_live(&mut self, orders: &[Order]) -> Option<OrderId> {
        let id = self.peek_live(orders)?;
        self.queue.pop();
        Some(id)
    }

    /// Orders still carrying residual quantity, best first
    pub fn drain_live(&mut self, orders: &[Order]) -> Vec<OrderId> {
        let mut live = Vec::with_capacity(self.queue.len());
        while let Some(id) = self.pop_live(orders) {
            live.push(id);
        }
        live
    }

    /// Number of entries, including exhausted ones not yet dropped
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    fn is_live(orders: &[Order], id: OrderId) -> bool {
        orders
            .get(id)
            .is_some_and(|order| order.remaining_quantity() > 0)
    }
}
