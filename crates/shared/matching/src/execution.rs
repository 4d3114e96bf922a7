use ets_core::{Fill, Order, OrderId, Price, Side};
use ets_ports::{MatchingError, MatchingResult};

/// Execute one leg between a buy and a sell order at `price`
///
/// Trades `min(residual buy, residual sell)` and fills both orders in place.
/// A leg against an exhausted order or across prices that do not cross is
/// an invariant violation.
pub(crate) fn execute_fill(
    orders: &mut [Order],
    buy_id: OrderId,
    sell_id: OrderId,
    price: Price,
) -> MatchingResult<Fill> {
    let buy = orders
        .get(buy_id)
        .ok_or(MatchingError::UnknownOrder(buy_id))?;
    let sell = orders
        .get(sell_id)
        .ok_or(MatchingError::UnknownOrder(sell_id))?;

    if buy.side != Side::Buy {
        return Err(MatchingError::WrongSide { order: buy_id });
    }
    if sell.side != Side::Sell {
        return Err(MatchingError::WrongSide { order: sell_id });
    }

    let buy_remaining = buy.remaining_quantity();
    let sell_remaining = sell.remaining_quantity();
    if buy_remaining == 0 {
        return Err(MatchingError::EmptySide { order: buy_id });
    }
    if sell_remaining == 0 {
        return Err(MatchingError::EmptySide { order: sell_id });
    }
    if buy.price < sell.price {
        return Err(MatchingError::PriceNotCrossed {
            buy_price: buy.price,
            sell_price: sell.price,
        });
    }

    let quantity = buy_remaining.min(sell_remaining);
    orders[buy_id].fill(quantity);
    orders[sell_id].fill(quantity);

    log::trace!(
        "Matched buy #{} with sell #{}: {} @ {}",
        buy_id,
        sell_id,
        quantity,
        price
    );

    Ok(Fill {
        buy_order_id: buy_id,
        sell_order_id: sell_id,
        price,
        quantity,
    })
}
