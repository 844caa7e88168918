pub mod anomaly;
pub mod maturity;
pub mod profile;
