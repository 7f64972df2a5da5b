pub mod budget;
pub mod lttb;
pub mod reduce;
pub mod segment;
pub mod statistics;
pub mod window;
