pub mod error;
pub mod memory;
pub mod postgres;
pub mod store;

pub use common::{User, UserFields, UserId};
pub use error::{Result, UserStoreError};
pub use memory::InMemoryUserStore;
pub use postgres::PostgresUserStore;
pub use store::UserStore;
