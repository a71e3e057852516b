/*!
 * Monitoring
 * Tracing setup shared by the library and the `klhelp` binary
 */

mod tracer;

pub use tracer::{init_tracing, span_operation, OperationSpan};
