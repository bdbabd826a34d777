/*!
 * Process Module
 * Process records and batch validation
 */

pub mod types;
pub mod validation;

// Re-export for convenience
pub use types::{Process, ProcessSpec, ProcessState};
pub use validation::validate_batch;
