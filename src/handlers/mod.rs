//! One orchestration function per CLI subcommand.

mod namespaces;
mod patterns;
mod triage;

pub use namespaces::handle_namespaces;
pub use patterns::handle_patterns;
pub use triage::handle_triage;
