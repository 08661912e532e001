// SPDX-FileCopyrightText: © 2025 Phala Network <dstack@phala.network>
//
// SPDX-License-Identifier: Apache-2.0

use thiserror::Error;

/// Errors that can occur while rendering a descriptor set.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A type-name reference did not resolve in the registry.
    #[error("unknown type {0}")]
    UnknownType(String),
    /// A `google.api.http` rule is missing a verb, carries an empty
    /// pattern, or substitutes a field path that does not resolve.
    #[error("invalid HTTP rule: {0}")]
    InvalidHttpRule(String),
    /// A path parameter targets a field that cannot be rendered as a
    /// path segment.
    #[error("unsupported path parameter: {0}")]
    UnsupportedPathParam(String),
    /// Query-parameter expansion revisited a message on the current
    /// recursion path.
    #[error("recursive types are not allowed for query parameters, cycle found on {0}")]
    RecursiveQueryType(String),
    /// A user-supplied OpenAPI option is malformed.
    #[error("malformed extension: {0}")]
    MalformedExtension(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
