//! Ludex command line front end: configuration loading, the interactive
//! resolver and run reporting around `ludex-core`.
#![allow(missing_docs)]

pub mod cli;
pub mod loader;
pub mod models;
pub mod validation;
