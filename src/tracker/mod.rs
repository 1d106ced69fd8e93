pub mod api_client;
pub mod config;
pub mod feed;
pub mod state;

pub use api_client::ApiClient;
pub use config::TrackerConfig;
pub use feed::{run_ticker_feed, FeedEvent, FeedNotice};
pub use state::Portfolio;
