//! Small shared helpers

pub mod helper;

pub use helper::serialize_error;
