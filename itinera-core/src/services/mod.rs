//! Services orchestrating the credential provider and profile store.
//!
//! [`AccountService`] implements the account lifecycle operations;
//! [`SessionObserver`] turns provider session notifications into the single
//! current-identity value the rest of the application reads.

pub mod account;
pub mod observer;

pub use account::AccountService;
pub use observer::SessionObserver;
