pub mod renamer;

pub use renamer::{ConfigSources, RenamerConfig};
