use rust_decimal::Decimal;

use crate::models::{Position, Side, TickerUpdate};

/// Per-position valuation derived from the live price. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Valuation {
    pub current_value: Decimal,
    pub pnl_absolute: Decimal,
    pub pnl_percent: Decimal,
}

/// Absolute P&L: change in position value, sign-flipped for sells.
pub fn absolute_pnl(position: &Position, price: Decimal) -> Decimal {
    let current_value = price * position.quantity;
    let entry_value = position.entry * position.quantity;
    match position.side {
        Side::Buy => current_value - entry_value,
        Side::Sell => entry_value - current_value,
    }
}

/// Percentage P&L relative to the entry price, sign-flipped for sells.
/// Zero when the entry price is unknown (zero).
pub fn percent_pnl(position: &Position, price: Decimal) -> Decimal {
    if position.entry.is_zero() {
        return Decimal::ZERO;
    }
    let diff = match position.side {
        Side::Buy => price - position.entry,
        Side::Sell => position.entry - price,
    };
    diff / position.entry * Decimal::ONE_HUNDRED
}

pub fn valuation(position: &Position, price: Decimal) -> Valuation {
    Valuation {
        current_value: price * position.quantity,
        pnl_absolute: absolute_pnl(position, price),
        pnl_percent: percent_pnl(position, price),
    }
}

/// Aggregate absolute P&L over all positions. Pure: no side effects, same
/// inputs produce the same total.
pub fn total_pnl(positions: &[Position], price: Decimal) -> Decimal {
    positions
        .iter()
        .map(|position| absolute_pnl(position, price))
        .sum()
}

/// Client-side state: the tracked positions and the latest ticker snapshot.
/// One controller owns both; valuation is derived on demand.
#[derive(Debug, Default)]
pub struct Portfolio {
    positions: Vec<Position>,
    ticker: Option<TickerUpdate>,
}

impl Portfolio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn ticker(&self) -> Option<&TickerUpdate> {
        self.ticker.as_ref()
    }

    pub fn btc_price(&self) -> Option<Decimal> {
        self.ticker.as_ref().map(|t| t.last_price)
    }

    pub fn set_ticker(&mut self, update: TickerUpdate) {
        self.ticker = Some(update);
    }

    /// Apply a refresh result. A failed fetch leaves the previously loaded
    /// list intact; the caller surfaces the notice.
    pub fn apply_refresh(&mut self, result: anyhow::Result<Vec<Position>>) -> anyhow::Result<()> {
        self.positions = result?;
        Ok(())
    }

    /// Valuations for every position at the current price. Zero-valued when
    /// no price has arrived yet.
    pub fn valuations(&self) -> Vec<(Position, Valuation)> {
        let price = self.btc_price().unwrap_or_default();
        self.positions
            .iter()
            .map(|position| (position.clone(), valuation(position, price)))
            .collect()
    }

    pub fn total_pnl(&self) -> Decimal {
        match self.btc_price() {
            Some(price) => total_pnl(&self.positions, price),
            None => Decimal::ZERO,
        }
    }
}
