/*!
 * Memory Module
 * Simulated memory region and first-fit allocation
 */

pub mod manager;
pub mod traits;
pub mod types;

// Re-export for convenience
pub use manager::MemoryManager;
pub use traits::*;
pub use types::*;
