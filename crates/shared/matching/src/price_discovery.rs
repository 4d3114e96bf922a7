//! Daily price discovery from the day's offer and demand curves.
//!
//! Curves are built from the orders as submitted, not from post-trade
//! residuals. The offer curve is sorted by ascending price and the demand
//! curve by descending price, each with cumulative quantity. Every
//! (offer point, demand point) pair is examined in product order; a pair
//! is a crossing candidate when the offer price does not exceed the demand
//! price while cumulative supply is still below cumulative demand. The last
//! candidate in that order is where supply still undercuts demand, and the
//! new price is the midpoint of its two prices.

use ets_core::{Price, Quantity};
use rust_decimal::Decimal;

/// One step of a cumulative curve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurvePoint {
    pub price: Price,
    pub cumulative_quantity: Quantity,
}

/// Offers and demands collected over one day
#[derive(Debug, Clone, Default)]
pub struct SupplyDemandCurves {
    offers: Vec<(Price, Quantity)>,
    demands: Vec<(Price, Quantity)>,
}

impl SupplyDemandCurves {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_offer(&mut self, price: Price, quantity: Quantity) {
        self.offers.push((price, quantity));
    }

    pub fn record_demand(&mut self, price: Price, quantity: Quantity) {
        self.demands.push((price, quantity));
    }

    pub fn clear(&mut self) {
        self.offers.clear();
        self.demands.clear();
    }

    pub fn has_offers(&self) -> bool {
        !self.offers.is_empty()
    }

    pub fn has_demands(&self) -> bool {
        !self.demands.is_empty()
    }

    /// Supply curve: price ascending, quantity cumulative
    pub fn offer_curve(&self) -> Vec<CurvePoint> {
        let mut offers = self.offers.clone();
        offers.sort_by(|a, b| a.0.cmp(&b.0));
        cumulate(offers)
    }

    /// Demand curve: price descending, quantity cumulative
    pub fn demand_curve(&self) -> Vec<CurvePoint> {
        let mut demands = self.demands.clone();
        demands.sort_by(|a, b| b.0.cmp(&a.0));
        cumulate(demands)
    }

    /// Midpoint of the last crossing candidate, `None` when the curves never cross
    pub fn clearing_price(&self) -> Option<Price> {
        if !self.has_offers() || !self.has_demands() {
            return None;
        }

        let offer_curve = self.offer_curve();
        let demand_curve = self.demand_curve();

        let mut crossing = None;
        for offer in &offer_curve {
            for demand in &demand_curve {
                if offer.price <= demand.price
                    && offer.cumulative_quantity < demand.cumulative_quantity
                {
                    crossing = Some((offer.price, demand.price));
                }
            }
        }

        crossing.map(|(offer_price, demand_price)| (offer_price + demand_price) / Decimal::TWO)
    }
}

fn cumulate(points: Vec<(Price, Quantity)>) -> Vec<CurvePoint> {
    let mut total: Quantity = 0;
    points
        .into_iter()
        .map(|(price, quantity)| {
            total += quantity;
            CurvePoint {
                price,
                cumulative_quantity: total,
            }
        })
        .collect()
}

/// New reference price: the clearing price, or `previous` when there is none
pub fn calculate_market_price(curves: &SupplyDemandCurves, previous: Price) -> Price {
    curves.clearing_price().unwrap_or(previous)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_curves_are_sorted_and_cumulative() {
        let mut curves = SupplyDemandCurves::new();
        curves.record_offer(dec!(10), 6);
        curves.record_offer(dec!(8), 4);
        curves.record_demand(dec!(9), 8);
        curves.record_demand(dec!(15), 4);

        let offers: Vec<_> = curves
            .offer_curve()
            .iter()
            .map(|p| (p.price, p.cumulative_quantity))
            .collect();
        let demands: Vec<_> = curves
            .demand_curve()
            .iter()
            .map(|p| (p.price, p.cumulative_quantity))
            .collect();

        assert_eq!(offers, vec![(dec!(8), 4), (dec!(10), 10)]);
        assert_eq!(demands, vec![(dec!(15), 4), (dec!(9), 12)]);
    }

    #[test]
    fn test_crossing_from_product_construction() {
        let mut curves = SupplyDemandCurves::new();
        curves.record_offer(dec!(8), 4);
        curves.record_offer(dec!(10), 6);
        curves.record_demand(dec!(15), 4);
        curves.record_demand(dec!(9), 8);

        // Pairs: (8|4, 15|4) qty not below; (8|4, 9|12) valid;
        // (10|10, 15|4) qty not below; (10|10, 9|12) price above.
        // The only candidate is offer 8 against demand 9.
        assert_eq!(curves.clearing_price(), Some(dec!(8.5)));
    }

    #[test]
    fn test_last_candidate_wins() {
        let mut curves = SupplyDemandCurves::new();
        curves.record_offer(dec!(5), 1);
        curves.record_offer(dec!(7), 1);
        curves.record_demand(dec!(12), 3);
        curves.record_demand(dec!(11), 3);

        // Offer 7 (cum 2) against demand 11 (cum 6) is the last valid pair
        assert_eq!(curves.clearing_price(), Some(dec!(9)));
    }

    #[test]
    fn test_no_crossing_keeps_previous_price() {
        let mut curves = SupplyDemandCurves::new();
        curves.record_offer(dec!(20), 5);
        curves.record_demand(dec!(10), 5);

        assert_eq!(curves.clearing_price(), None);
        assert_eq!(calculate_market_price(&curves, dec!(42)), dec!(42));
    }

    #[test]
    fn test_empty_side_keeps_previous_price() {
        let mut curves = SupplyDemandCurves::new();
        assert_eq!(calculate_market_price(&curves, dec!(30)), dec!(30));

        curves.record_offer(dec!(5), 10);
        assert_eq!(calculate_market_price(&curves, dec!(30)), dec!(30));

        curves.clear();
        curves.record_demand(dec!(50), 10);
        assert_eq!(calculate_market_price(&curves, dec!(30)), dec!(30));
    }
}
