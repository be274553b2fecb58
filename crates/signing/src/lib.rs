//! Transaction-signing form domain for Ride Studio: sign-method selection
//! against the session's account registry, the sign-disabled validation
//! predicate, and the async sign flow with its waiting and just-signed
//! affordance state. Actual signature production lives behind the
//! [`SeedSigner`] and [`KeeperSigner`] seams.

#![cfg_attr(test, allow(clippy::expect_used))]

mod form;
mod method;
mod signer;

pub use form::{SignOutcome, SignRequest, SigningForm};
pub use method::SignMethod;
pub use signer::{KeeperSigner, SeedSigner};
