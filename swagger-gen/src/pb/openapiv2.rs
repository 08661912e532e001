// SPDX-FileCopyrightText: © 2025 Phala Network <dstack@phala.network>
//
// SPDX-License-Identifier: Apache-2.0

//! Mirror of the OpenAPI v2 option messages (proto3) that users attach to
//! files, services, methods, messages and fields to override generated
//! output.

use std::collections::HashMap;

/// File-level overrides for the generated document.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Swagger {
    #[prost(string, tag = "1")]
    pub swagger: String,
    #[prost(message, optional, tag = "2")]
    pub info: Option<Info>,
    #[prost(string, tag = "3")]
    pub host: String,
    #[prost(string, tag = "4")]
    pub base_path: String,
    #[prost(enumeration = "Scheme", repeated, tag = "5")]
    pub schemes: Vec<i32>,
    #[prost(string, repeated, tag = "6")]
    pub consumes: Vec<String>,
    #[prost(string, repeated, tag = "7")]
    pub produces: Vec<String>,
    /// Responses merged into every operation that does not already define
    /// the status key.
    #[prost(map = "string, message", tag = "10")]
    pub responses: HashMap<String, Response>,
    #[prost(message, optional, tag = "11")]
    pub security_definitions: Option<SecurityDefinitions>,
    #[prost(message, repeated, tag = "12")]
    pub security: Vec<SecurityRequirement>,
    #[prost(message, optional, tag = "14")]
    pub external_docs: Option<ExternalDocumentation>,
    #[prost(map = "string, message", tag = "15")]
    pub extensions: HashMap<String, ::prost_types::Value>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum Scheme {
    Unknown = 0,
    Http = 1,
    Https = 2,
    Ws = 3,
    Wss = 4,
}

/// Method-level overrides for a generated operation.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Operation {
    #[prost(string, repeated, tag = "1")]
    pub tags: Vec<String>,
    #[prost(string, tag = "2")]
    pub summary: String,
    #[prost(string, tag = "3")]
    pub description: String,
    #[prost(message, optional, tag = "4")]
    pub external_docs: Option<ExternalDocumentation>,
    #[prost(string, tag = "5")]
    pub operation_id: String,
    #[prost(string, repeated, tag = "6")]
    pub consumes: Vec<String>,
    #[prost(string, repeated, tag = "7")]
    pub produces: Vec<String>,
    #[prost(map = "string, message", tag = "9")]
    pub responses: HashMap<String, Response>,
    #[prost(enumeration = "Scheme", repeated, tag = "10")]
    pub schemes: Vec<i32>,
    #[prost(bool, tag = "11")]
    pub deprecated: bool,
    #[prost(message, repeated, tag = "12")]
    pub security: Vec<SecurityRequirement>,
    #[prost(map = "string, message", tag = "13")]
    pub extensions: HashMap<String, ::prost_types::Value>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Header {
    #[prost(string, tag = "1")]
    pub description: String,
    #[prost(string, tag = "2")]
    pub r#type: String,
    #[prost(string, tag = "3")]
    pub format: String,
    #[prost(string, tag = "6")]
    pub default: String,
    #[prost(string, tag = "13")]
    pub pattern: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Response {
    #[prost(string, tag = "1")]
    pub description: String,
    #[prost(message, optional, tag = "2")]
    pub schema: Option<Schema>,
    #[prost(map = "string, message", tag = "3")]
    pub headers: HashMap<String, Header>,
    #[prost(map = "string, string", tag = "4")]
    pub examples: HashMap<String, String>,
    #[prost(map = "string, message", tag = "5")]
    pub extensions: HashMap<String, ::prost_types::Value>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Info {
    #[prost(string, tag = "1")]
    pub title: String,
    #[prost(string, tag = "2")]
    pub description: String,
    #[prost(string, tag = "3")]
    pub terms_of_service: String,
    #[prost(message, optional, tag = "4")]
    pub contact: Option<Contact>,
    #[prost(message, optional, tag = "5")]
    pub license: Option<License>,
    #[prost(string, tag = "6")]
    pub version: String,
    #[prost(map = "string, message", tag = "7")]
    pub extensions: HashMap<String, ::prost_types::Value>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Contact {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, tag = "2")]
    pub url: String,
    #[prost(string, tag = "3")]
    pub email: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct License {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, tag = "2")]
    pub url: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ExternalDocumentation {
    #[prost(string, tag = "1")]
    pub description: String,
    #[prost(string, tag = "2")]
    pub url: String,
}

/// Message-level schema override.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Schema {
    #[prost(message, optional, tag = "1")]
    pub json_schema: Option<JsonSchema>,
    #[prost(string, tag = "2")]
    pub discriminator: String,
    #[prost(bool, tag = "3")]
    pub read_only: bool,
    #[prost(message, optional, tag = "5")]
    pub external_docs: Option<ExternalDocumentation>,
    /// Raw JSON example payload.
    #[prost(string, tag = "6")]
    pub example: String,
}

/// Field-level schema override; a trimmed JSON Schema vocabulary.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct JsonSchema {
    #[prost(string, tag = "3")]
    pub r#ref: String,
    #[prost(string, tag = "5")]
    pub title: String,
    #[prost(string, tag = "6")]
    pub description: String,
    #[prost(string, tag = "7")]
    pub default: String,
    #[prost(bool, tag = "8")]
    pub read_only: bool,
    /// Raw JSON example payload.
    #[prost(string, tag = "9")]
    pub example: String,
    #[prost(double, tag = "10")]
    pub multiple_of: f64,
    #[prost(double, tag = "11")]
    pub maximum: f64,
    #[prost(bool, tag = "12")]
    pub exclusive_maximum: bool,
    #[prost(double, tag = "13")]
    pub minimum: f64,
    #[prost(bool, tag = "14")]
    pub exclusive_minimum: bool,
    #[prost(uint64, tag = "15")]
    pub max_length: u64,
    #[prost(uint64, tag = "16")]
    pub min_length: u64,
    #[prost(string, tag = "17")]
    pub pattern: String,
    #[prost(uint64, tag = "20")]
    pub max_items: u64,
    #[prost(uint64, tag = "21")]
    pub min_items: u64,
    #[prost(bool, tag = "22")]
    pub unique_items: bool,
    #[prost(uint64, tag = "24")]
    pub max_properties: u64,
    #[prost(uint64, tag = "25")]
    pub min_properties: u64,
    #[prost(string, repeated, tag = "26")]
    pub required: Vec<String>,
    #[prost(string, repeated, tag = "34")]
    pub array: Vec<String>,
    #[prost(
        enumeration = "json_schema::JsonSchemaSimpleTypes",
        repeated,
        tag = "35"
    )]
    pub r#type: Vec<i32>,
    #[prost(string, tag = "36")]
    pub format: String,
    #[prost(string, repeated, tag = "46")]
    pub r#enum: Vec<String>,
}

pub mod json_schema {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum JsonSchemaSimpleTypes {
        Unknown = 0,
        Array = 1,
        Boolean = 2,
        Integer = 3,
        Null = 4,
        Number = 5,
        Object = 6,
        String = 7,
    }
}

/// Service-level tag description.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Tag {
    #[prost(string, tag = "2")]
    pub description: String,
    #[prost(message, optional, tag = "3")]
    pub external_docs: Option<ExternalDocumentation>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SecurityDefinitions {
    #[prost(map = "string, message", tag = "1")]
    pub security: HashMap<String, SecurityScheme>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SecurityScheme {
    #[prost(enumeration = "security_scheme::Type", tag = "1")]
    pub r#type: i32,
    #[prost(string, tag = "2")]
    pub description: String,
    #[prost(string, tag = "3")]
    pub name: String,
    #[prost(enumeration = "security_scheme::In", tag = "4")]
    pub r#in: i32,
    #[prost(enumeration = "security_scheme::Flow", tag = "5")]
    pub flow: i32,
    #[prost(string, tag = "6")]
    pub authorization_url: String,
    #[prost(string, tag = "7")]
    pub token_url: String,
    #[prost(message, optional, tag = "8")]
    pub scopes: Option<Scopes>,
    #[prost(map = "string, message", tag = "9")]
    pub extensions: HashMap<String, ::prost_types::Value>,
}

pub mod security_scheme {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum Type {
        Invalid = 0,
        Basic = 1,
        ApiKey = 2,
        Oauth2 = 3,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum In {
        Invalid = 0,
        Query = 1,
        Header = 2,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum Flow {
        Invalid = 0,
        Implicit = 1,
        Password = 2,
        Application = 3,
        AccessCode = 4,
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Scopes {
    #[prost(map = "string, string", tag = "1")]
    pub scope: HashMap<String, String>,
}

/// A set of security schemes that must all be satisfied. Mirrored as the
/// raw map-entry list so an entry with an absent value stays observable
/// (file-level requirements must carry a value).
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SecurityRequirement {
    #[prost(message, repeated, tag = "1")]
    pub security_requirement: Vec<security_requirement::Entry>,
}

pub mod security_requirement {
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Entry {
        #[prost(string, optional, tag = "1")]
        pub key: Option<String>,
        #[prost(message, optional, tag = "2")]
        pub value: Option<SecurityRequirementValue>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct SecurityRequirementValue {
        #[prost(string, repeated, tag = "1")]
        pub scope: Vec<String>,
    }
}
