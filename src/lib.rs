pub mod access;
pub mod database;
pub mod executor;
pub mod expression;
pub mod session;
pub mod sql;
