pub mod oracle;
pub mod router;

pub use oracle::{resolve_on_failure, DuplicateOracle};
pub use router::SubmissionGate;
