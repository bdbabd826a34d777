/*!
 * Monitoring
 * Structured logging for simulation runs
 */

mod tracer;

pub use tracer::init_tracing;
