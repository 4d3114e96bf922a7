use ets_core::{
    AgentStateRecord, Day, Order, OrderId, Price, PriceRecord, Quantity, Side, Trade, TradeId,
};
use ets_matching::{SupplyDemandCurves, calculate_market_price, create_matching_policy};
use ets_ports::{ConfigResult, MatchingError, MatchingMode, MatchingPolicy, RandomSource, Trader};
use log::{debug, info};

use crate::error::{MarketError, Result};
use crate::model::{DayReport, MarketHistory};

/// Daily call auction over a borrowed pool of traders
pub struct Market {
    /// Reference price published at the close of the last day
    market_price: Price,

    /// Matching policy, fixed at construction
    policy: Box<dyn MatchingPolicy>,

    /// The current day's offer and demand curves
    curves: SupplyDemandCurves,

    /// Last completed day (0 before the first day)
    day: Day,

    history: MarketHistory,

    next_trade_id: TradeId,
}

impl Market {
    pub fn new(initial_price: Price, mode: MatchingMode) -> Self {
        Self::with_policy(initial_price, create_matching_policy(mode))
    }

    /// Create a market from a mode name
    ///
    /// Anything other than `seller_preferred` or `buyer_preferred` is rejected.
    pub fn from_mode_str(initial_price: Price, mode: &str) -> ConfigResult<Self> {
        Ok(Self::new(initial_price, mode.parse()?))
    }

    /// Create a market around an already-built policy
    pub fn with_policy(initial_price: Price, policy: Box<dyn MatchingPolicy>) -> Self {
        Self {
            market_price: initial_price,
            policy,
            curves: SupplyDemandCurves::new(),
            day: 0,
            history: MarketHistory::new(),
            next_trade_id: 1,
        }
    }

    /// Run one simulated day over `traders`
    ///
    /// Traders are updated in slice order, so the slice order is part of
    /// the random draw order.
    pub fn run_day<T: Trader>(
        &mut self,
        traders: &mut [T],
        rng: &mut dyn RandomSource,
    ) -> Result<DayReport> {
        let day = self.day + 1;
        let mut orders = self.collect_orders(day, traders, rng);

        let fills = self.policy.match_orders(&mut orders, rng)?;

        let mut trades = Vec::with_capacity(fills.len());
        for fill in fills {
            let buy = order(&orders, fill.buy_order_id)?;
            let sell = order(&orders, fill.sell_order_id)?;

            trader_mut(traders, buy.trader)?.buy_allowance(fill.quantity);
            trader_mut(traders, sell.trader)?.sell_allowance(fill.quantity);

            let trade = Trade {
                id: self.next_trade_id,
                day,
                buyer: buy.agent_id,
                seller: sell.agent_id,
                buy_order_id: buy.id,
                sell_order_id: sell.id,
                price: fill.price,
                quantity: fill.quantity,
            };
            self.next_trade_id += 1;

            debug!(
                "Day {} trade #{}: {} buys {} from {} @ {}",
                day, trade.id, trade.buyer, trade.quantity, trade.seller, trade.price
            );
            self.history.trades.push(trade.record());
            trades.push(trade);
        }

        Self::signal_failures(traders, &orders)?;

        let crossing = self.curves.clearing_price();
        match crossing {
            Some(price) => self.market_price = price,
            None => debug!(
                "Day {}: curves did not cross, price stays at {}",
                day, self.market_price
            ),
        }
        let price_changed = crossing.is_some();
        self.curves.clear();

        self.history.prices.push(PriceRecord {
            day,
            market_price: self.market_price,
        });
        self.day = day;

        let volume: Quantity = trades.iter().map(|trade| trade.quantity).sum();
        info!(
            "Day {} closed: {} orders, {} trades, volume {}, price {}",
            day,
            orders.len(),
            trades.len(),
            volume,
            self.market_price
        );

        Ok(DayReport {
            day,
            orders: orders.len(),
            trades,
            volume,
            market_price: self.market_price,
            price_changed,
        })
    }

    /// Update every trader and turn its decision into an order
    fn collect_orders<T: Trader>(
        &mut self,
        day: Day,
        traders: &mut [T],
        rng: &mut dyn RandomSource,
    ) -> Vec<Order> {
        let mut orders = Vec::with_capacity(traders.len());

        for (index, trader) in traders.iter_mut().enumerate() {
            trader.daily_update(self.market_price, rng);

            self.history.agent_states.push(AgentStateRecord {
                day,
                agent_id: trader.id(),
                expected_deficit: trader.expected_deficit(),
                state: trader.state(),
                count: trader.count(),
            });

            if let Some((side, price, quantity)) = trader.order_intent() {
                match side {
                    Side::Sell => self.curves.record_offer(price, quantity),
                    Side::Buy => self.curves.record_demand(price, quantity),
                }
                orders.push(Order::new(
                    orders.len(),
                    index,
                    trader.id(),
                    side,
                    price,
                    quantity,
                ));
            }
        }

        orders
    }

    /// Tell every trader left with residual quantity that its order failed
    fn signal_failures<T: Trader>(traders: &mut [T], orders: &[Order]) -> Result<()> {
        for order in orders.iter().filter(|order| !order.is_filled()) {
            let trader = trader_mut(traders, order.trader)?;
            match order.side {
                Side::Buy => trader.failed_buy(),
                Side::Sell => trader.failed_sell(),
            }
        }
        Ok(())
    }

    /// Record an offer on today's supply curve
    pub fn record_offer(&mut self, price: Price, quantity: Quantity) {
        self.curves.record_offer(price, quantity);
    }

    /// Record a bid on today's demand curve
    pub fn record_demand(&mut self, price: Price, quantity: Quantity) {
        self.curves.record_demand(price, quantity);
    }

    /// Re-derive the reference price from the recorded curves
    ///
    /// Leaves the price unchanged when the curves do not cross.
    pub fn calculate_market_price(&mut self) -> Price {
        self.market_price = calculate_market_price(&self.curves, self.market_price);
        self.market_price
    }

    pub fn clear_curves(&mut self) {
        self.curves.clear();
    }

    pub fn curves(&self) -> &SupplyDemandCurves {
        &self.curves
    }

    pub fn market_price(&self) -> Price {
        self.market_price
    }

    pub fn mode(&self) -> MatchingMode {
        self.policy.mode()
    }

    /// Last completed day
    pub fn day(&self) -> Day {
        self.day
    }

    pub fn history(&self) -> &MarketHistory {
        &self.history
    }

    pub fn into_history(self) -> MarketHistory {
        self.history
    }
}

fn order(orders: &[Order], id: OrderId) -> Result<&Order> {
    orders
        .get(id)
        .ok_or(MarketError::Matching(MatchingError::UnknownOrder(id)))
}

fn trader_mut<T: Trader>(traders: &mut [T], index: usize) -> Result<&mut T> {
    traders
        .get_mut(index)
        .ok_or(MarketError::UnknownTrader(index))
}
