//! Service layer orchestrating business logic.
//!
//! Services are generic over repository traits so that chatbridge-core never
//! depends on any storage crate.

pub mod user;
