//! ETS Matching
//!
//! Double-auction matching for one simulated day:
//!
//! - [`SellerPreferredMatching`]: sellers drive, trades print at the buyer's limit
//! - [`BuyerPreferredMatching`]: buyers drive, trades print at the seller's limit
//! - [`SupplyDemandCurves`]: the day's offer/demand curves and the clearing price
//!   derived from them

mod buyer_preferred;
mod execution;
mod order_queue;
mod price_discovery;
mod seller_preferred;

pub use buyer_preferred::BuyerPreferredMatching;
pub use order_queue::{OrderQueue, QueueOrdering};
pub use price_discovery::{CurvePoint, SupplyDemandCurves, calculate_market_price};
pub use seller_preferred::SellerPreferredMatching;

// Re-export the trait from ports for convenience
pub use ets_ports::{ConfigResult, MatchingError, MatchingMode, MatchingPolicy, MatchingResult};

/// Factory function to create the policy for a matching mode
pub fn create_matching_policy(mode: MatchingMode) -> Box<dyn MatchingPolicy> {
    match mode {
        MatchingMode::SellerPreferred => Box::new(SellerPreferredMatching::new()),
        MatchingMode::BuyerPreferred => Box::new(BuyerPreferredMatching::new()),
    }
}

/// Factory function to create a policy by name
///
/// Unknown names are a configuration error; there is no default policy.
pub fn matching_policy_by_name(name: &str) -> ConfigResult<Box<dyn MatchingPolicy>> {
    let mode: MatchingMode = name.parse()?;
    Ok(create_matching_policy(mode))
}
