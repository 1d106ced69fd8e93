pub mod cors;
pub mod handlers;
pub mod router;
