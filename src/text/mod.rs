/*!
 * Text Module
 * Managed byte-text with shared buffers
 *
 * - **TextBuffer**: static (immortal) or reference-counted byte storage
 * - **Text**: zero-copy window over a buffer, compared by content
 */

mod buffer;
mod view;

pub use buffer::TextBuffer;
pub use view::Text;
