//! Demo escrow records kept as a single JSON array in a `BlobStore`.

pub mod error;
pub mod model;
pub mod store;

pub use error::EscrowError;
pub use model::{Escrow, EscrowAction, EscrowRequest, EscrowStatus, TransitionRequest};
pub use store::{EscrowPolicy, EscrowStore, DEFAULT_CURRENCY, ESCROWS_KEY};
