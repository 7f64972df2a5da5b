pub mod chart;
pub mod point;
pub mod viewport;
