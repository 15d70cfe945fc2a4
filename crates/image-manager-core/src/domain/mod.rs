//! Domain model (object identity, expiry policy, outcomes, errors).

pub mod errors;
pub mod object;
pub mod outcome;
pub mod policy;

pub use self::errors::{ConnectionError, ErrorKind, Operation, StatError, StoreError};
pub use self::object::{ObjectMetadata, ObjectRef};
pub use self::outcome::{EvaluationOutcome, OutcomeKind};
pub use self::policy::ExpiryPolicy;
