// SPDX-FileCopyrightText: © 2025 Phala Network <dstack@phala.network>
//
// SPDX-License-Identifier: Apache-2.0

//! Render OpenAPI v2 (Swagger 2.0) documents from compiled protobuf
//! descriptor sets.
//!
//! Every service method becomes an HTTP operation, driven by its
//! `google.api.http` annotation (or a default `POST` binding), and every
//! message/enum reachable from an operation becomes a schema definition.
//! The transformation is synchronous and pure: descriptor set in, JSON
//! documents out.
//!
//! ```no_run
//! use prost::Message as _;
//! use swagger_gen::{generate, pb, Config};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let bytes = std::fs::read("api.protoset")?;
//! let set = pb::FileDescriptorSet::decode(bytes.as_slice())?;
//! for output in generate(Config::default(), &set, &[])? {
//!     std::fs::write(&output.name, &output.contents)?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod comments;
pub mod descriptor;
mod error;
mod naming;
pub mod options;
pub mod pb;
mod render;
pub mod schema;
pub mod swagger;

pub use descriptor::{Config, Registry, Separator};
pub use error::{Error, Result};
pub use swagger::OutputFile;

/// Load a registry from a decoded descriptor set and render the target
/// files. With an empty `targets` list, every file that declares a
/// service is rendered.
pub fn generate(
    config: Config,
    set: &pb::FileDescriptorSet,
    targets: &[String],
) -> Result<Vec<OutputFile>> {
    let registry = Registry::load(config, set)?;
    render::generate(&registry, targets)
}

/// Render from an already loaded registry.
pub fn generate_from_registry(registry: &Registry, targets: &[String]) -> Result<Vec<OutputFile>> {
    render::generate(registry, targets)
}
