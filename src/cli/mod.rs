//! Command line token resolution

pub mod options;
pub mod registry;
pub mod resolver;

// Re-exports
pub use options::{program_name, program_registry, usage};
pub use registry::{KeySlot, TokenRegistry};
pub use resolver::{ResolvedArguments, TokenResolver};
