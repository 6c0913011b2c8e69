// store/lib.rs - in-memory stores shared by the mock services

pub mod records;
pub mod tokens;

pub use records::{
    model::{Order, User},
    ResourceStore,
};
pub use tokens::{
    model::{TokenPair, TokenSettings},
    TokenError, TokenService,
};
