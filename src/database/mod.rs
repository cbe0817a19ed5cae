pub mod connection;
#[cfg(test)]
pub mod fixtures;
pub mod models;
pub mod setup;

pub use connection::{create_pool, get_connection, DbConn, DbPool};
pub use models::*;
