// Game modules: level data, the running session, tuning

pub mod app;
pub mod level;
pub mod session;
pub mod tuning;
