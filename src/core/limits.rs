/*!
 * Limits and Constants
 *
 * Centralized location for growth steps, size ceilings and logging defaults.
 */

// =============================================================================
// ARRAY GROWTH
// =============================================================================

/// Smallest growth step of an [`Array`](crate::memory::Array)
/// An empty array jumps straight to this capacity on its first push
pub const MIN_GROWTH: usize = 8;

// =============================================================================
// TEXT LIMITS
// =============================================================================

/// Largest payload a counted text header may hold
/// Sizes stay representable as a signed 32-bit count
pub const MAX_TEXT_SIZE: usize = i32::MAX as usize;

// =============================================================================
// LOGGING
// =============================================================================

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Environment variable switching the subscriber to JSON output
pub const TRACE_JSON_ENV: &str = "KL_TRACE_JSON";

/// Operations slower than this are logged at warn level
pub const SLOW_OPERATION_MS: u128 = 100;
