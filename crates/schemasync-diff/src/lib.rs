//! Orchestration around an external PostgreSQL schema-diff tool.
//!
//! Building connection URLs, making sure the tool is installed, running it
//! and persisting its output as a transaction-wrapped migration file.

pub mod command;
pub mod invoker;
pub mod target;
pub mod tool;
pub mod writer;

pub use command::{CommandOutput, ExternalCommand, SystemCommand};
pub use invoker::{DiffInvoker, MigrationArtifact};
pub use target::{ConnectionTarget, TargetRole, build_database_url};
pub use tool::ToolAvailability;
pub use writer::{MigrationWriter, default_file_name};

#[cfg(any(test, feature = "testing"))]
pub mod testing;
