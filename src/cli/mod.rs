/*!
 * Command-Line Surface
 */

mod argparser;

pub use argparser::{Argument, ArgumentParser};
