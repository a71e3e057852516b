/*!
 * Text subsystem tests entry point
 */

#[path = "text/text_test.rs"]
mod text_test;
