//! # Ring Dev Tools Library
//!
//! This crate contains the logic behind `ring-dt`, the tooling that distributes the
//! natively compiled `ring` executable through per-platform npm packages.
//!
//! The `ring` npm package lists one package per supported platform as optional
//! dependencies (`@jujulego/ring-linux-amd64`, ...). npm only installs the one
//! matching the host `os` and `cpu`.
//!
//! ## Modules Overview
//! - [`platform`] – Supported targets and the npm naming tables
//! - [`manifest`] – Reading and writing `package.json` files
//! - [`generate`] – Generating the platform packages from a template
//! - [`version`] – Propagating a version through the package tree
//! - [`link`] – Linking a local build into the host platform package
//! - [`config`] – `ring-dt.toml` configuration and repository layout
//! - [`output`] – Logging setup and progress spinner
//! - [`util`] – Shared filesystem helpers


pub mod error;
pub mod platform;
pub mod manifest;
pub mod config;
pub mod generate;
pub mod version;
pub mod link;
pub mod output;
pub mod util;

pub use error::{Error, Result};
pub use platform::*;
pub use manifest::*;
pub use config::*;
pub use generate::*;
pub use version::*;
pub use link::*;
pub use output::*;
