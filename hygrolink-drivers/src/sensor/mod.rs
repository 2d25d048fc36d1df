//! Climate sensor implementations

pub mod dht22;

pub use dht22::Dht22;
