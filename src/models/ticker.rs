use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;

/// Raw Binance 24h ticker frame. Every numeric value arrives as a string.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTicker {
    #[serde(rename = "c")]
    pub last_price: String,
    #[serde(rename = "P")]
    pub change_pct: String,
    #[serde(rename = "h")]
    pub high: String,
    #[serde(rename = "l")]
    pub low: String,
    #[serde(rename = "v")]
    pub volume: String,
}

/// Parsed ticker snapshot used for valuation and display.
#[derive(Debug, Clone, PartialEq)]
pub struct TickerUpdate {
    pub last_price: Decimal,
    pub change_pct: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub volume: Decimal,
}

impl TickerUpdate {
    /// Parse a raw websocket text frame. Returns `None` for frames that are
    /// not ticker messages (subscription acks, heartbeats) or carry values
    /// that do not parse as decimals.
    pub fn from_frame(text: &str) -> Option<Self> {
        let raw: RawTicker = serde_json::from_str(text).ok()?;
        Some(Self {
            last_price: Decimal::from_str(&raw.last_price).ok()?,
            change_pct: Decimal::from_str(&raw.change_pct).ok()?,
            high: Decimal::from_str(&raw.high).ok()?,
            low: Decimal::from_str(&raw.low).ok()?,
            volume: Decimal::from_str(&raw.volume).ok()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn parses_binance_ticker_frame() {
        let frame = r#"{"e":"24hrTicker","E":1700000000000,"s":"BTCUSDT",
            "c":"67234.12","P":"-1.25","h":"68000.00","l":"66000.00","v":"12345.67","q":"1"}"#;
        let update = TickerUpdate::from_frame(frame).unwrap();
        assert_eq!(update.last_price, dec!(67234.12));
        assert_eq!(update.change_pct, dec!(-1.25));
        assert_eq!(update.high, dec!(68000.00));
        assert_eq!(update.low, dec!(66000.00));
        assert_eq!(update.volume, dec!(12345.67));
    }

    #[test]
    fn ignores_non_ticker_frames() {
        assert!(TickerUpdate::from_frame(r#"{"result":null,"id":1}"#).is_none());
        assert!(TickerUpdate::from_frame("not json").is_none());
    }
}
