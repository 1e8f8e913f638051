pub mod hashrate;
pub mod statistics;
