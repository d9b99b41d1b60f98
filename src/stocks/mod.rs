// src/stocks/mod.rs
// -----------------
pub mod definitions;
pub mod holdings;

// Re-export the most useful items so callers don’t have to dive
// another level down the path.
pub use definitions::{Column, Quote, Symbol, Trend, normalize_ticker};
pub use holdings::Holdings;
