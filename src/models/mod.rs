pub mod position;
pub mod ticker;

pub use position::{Position, PositionInput, Side};
pub use ticker::TickerUpdate;
