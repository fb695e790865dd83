pub mod auto_assign;
pub mod config;
pub mod pool;
pub mod session;
