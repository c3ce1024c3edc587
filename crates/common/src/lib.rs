pub mod types;

pub use types::{User, UserFields, UserId};
