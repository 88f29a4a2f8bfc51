//! Business logic services.

pub mod address_book;
pub mod auth;
pub mod locate;
pub mod session;
pub mod share;
