//! Role conflict detection
//!
//! Finds accounts whose role, user type, admin/seller flags and company
//! binding contradict each other, reports them, and applies fixes.

mod detector;
mod directory;
mod rules;
mod types;

pub use detector::ConflictDetector;
#[cfg(test)]
pub use directory::MockUserDirectory;
pub use directory::{InMemoryUserDirectory, UserDirectory};
pub use rules::{conflict_reasons, identity_conflicts};
pub use types::{ConflictResolution, ConflictRules, ConflictingUser, UserRecord};
