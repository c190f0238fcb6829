//! Report handlers for run results

pub mod composite;
pub mod console;
pub mod email;

// Re-export for convenience
pub use composite::CompositeReportHandler;
pub use console::ConsoleReportHandler;
pub use email::EmailReportHandler;
