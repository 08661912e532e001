// SPDX-FileCopyrightText: © 2025 Phala Network <dstack@phala.network>
//
// SPDX-License-Identifier: Apache-2.0

//! Mirror of the `google.api` HTTP annotation messages (proto3).

/// Defines how an RPC method maps to one or more HTTP REST endpoints.
///
/// Exactly one of the verb fields is expected to carry a URL template;
/// the others are empty strings.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct HttpRule {
    #[prost(string, tag = "1")]
    pub selector: String,
    #[prost(string, tag = "2")]
    pub get: String,
    #[prost(string, tag = "3")]
    pub put: String,
    #[prost(string, tag = "4")]
    pub post: String,
    #[prost(string, tag = "5")]
    pub delete: String,
    #[prost(string, tag = "6")]
    pub patch: String,
    #[prost(message, optional, tag = "8")]
    pub custom: Option<CustomHttpPattern>,
    /// `*` maps the whole request message into the request body; a dotted
    /// field path maps that sub-field; empty means no body.
    #[prost(string, tag = "7")]
    pub body: String,
    #[prost(string, tag = "12")]
    pub response_body: String,
    /// Additional bindings for the same method, one level deep.
    #[prost(message, repeated, tag = "11")]
    pub additional_bindings: Vec<HttpRule>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CustomHttpPattern {
    #[prost(string, tag = "1")]
    pub kind: String,
    #[prost(string, tag = "2")]
    pub path: String,
}

/// Extension `google.api.field_behavior`, attached to field options.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum FieldBehavior {
    Unspecified = 0,
    Optional = 1,
    Required = 2,
    OutputOnly = 3,
    InputOnly = 4,
    Immutable = 5,
    UnorderedList = 6,
    NonEmptyDefault = 7,
}
