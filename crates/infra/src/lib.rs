//! Infrastructure layer: the user/role directory behind `IdentityStore`.

pub mod directory;
pub mod seed;

pub use directory::InMemoryDirectory;
pub use seed::{SeedError, development_directory};
