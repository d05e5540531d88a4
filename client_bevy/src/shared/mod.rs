pub mod connection;
pub mod feed_state;
