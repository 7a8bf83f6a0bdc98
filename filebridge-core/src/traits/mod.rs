//! Storage layer abstraction trait definitions

mod account_repository;

pub use account_repository::AccountRepository;
