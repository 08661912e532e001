// SPDX-FileCopyrightText: © 2025 Phala Network <dstack@phala.network>
//
// SPDX-License-Identifier: Apache-2.0

//! Mirror of `google/protobuf/descriptor.proto` (proto2), trimmed to the
//! fields the renderer consumes. Option messages carry the extension
//! numbers for `google.api.http` (72295728), the OpenAPI v2 options
//! (1042) and `google.api.field_behavior` (1052) as plain fields.

use super::{annotations, openapiv2};

/// The protobuf compiler's serialized output: a set of `.proto` files.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FileDescriptorSet {
    #[prost(message, repeated, tag = "1")]
    pub file: Vec<FileDescriptorProto>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FileDescriptorProto {
    /// File name, relative to the root of the source tree.
    #[prost(string, optional, tag = "1")]
    pub name: Option<String>,
    /// The dotted package name, e.g. "example.v1".
    #[prost(string, optional, tag = "2")]
    pub package: Option<String>,
    #[prost(string, repeated, tag = "3")]
    pub dependency: Vec<String>,
    #[prost(message, repeated, tag = "4")]
    pub message_type: Vec<DescriptorProto>,
    #[prost(message, repeated, tag = "5")]
    pub enum_type: Vec<EnumDescriptorProto>,
    #[prost(message, repeated, tag = "6")]
    pub service: Vec<ServiceDescriptorProto>,
    #[prost(message, repeated, tag = "7")]
    pub extension: Vec<FieldDescriptorProto>,
    #[prost(message, optional, tag = "8")]
    pub options: Option<FileOptions>,
    #[prost(message, optional, tag = "9")]
    pub source_code_info: Option<SourceCodeInfo>,
    #[prost(string, optional, tag = "12")]
    pub syntax: Option<String>,
}

/// Describes a message type.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DescriptorProto {
    #[prost(string, optional, tag = "1")]
    pub name: Option<String>,
    #[prost(message, repeated, tag = "2")]
    pub field: Vec<FieldDescriptorProto>,
    #[prost(message, repeated, tag = "3")]
    pub nested_type: Vec<DescriptorProto>,
    #[prost(message, repeated, tag = "4")]
    pub enum_type: Vec<EnumDescriptorProto>,
    #[prost(message, repeated, tag = "6")]
    pub extension: Vec<FieldDescriptorProto>,
    #[prost(message, optional, tag = "7")]
    pub options: Option<MessageOptions>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FieldDescriptorProto {
    #[prost(string, optional, tag = "1")]
    pub name: Option<String>,
    /// For extensions, the fully-qualified name of the extended message.
    #[prost(string, optional, tag = "2")]
    pub extendee: Option<String>,
    #[prost(int32, optional, tag = "3")]
    pub number: Option<i32>,
    #[prost(enumeration = "field_descriptor_proto::Label", optional, tag = "4")]
    pub label: Option<i32>,
    #[prost(enumeration = "field_descriptor_proto::Type", optional, tag = "5")]
    pub r#type: Option<i32>,
    /// For message and enum fields, the fully-qualified referenced type.
    #[prost(string, optional, tag = "6")]
    pub type_name: Option<String>,
    #[prost(message, optional, tag = "8")]
    pub options: Option<FieldOptions>,
    /// The lowerCamelCase name used by the JSON codec.
    #[prost(string, optional, tag = "10")]
    pub json_name: Option<String>,
}

pub mod field_descriptor_proto {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum Type {
        Double = 1,
        Float = 2,
        Int64 = 3,
        Uint64 = 4,
        Int32 = 5,
        Fixed64 = 6,
        Fixed32 = 7,
        Bool = 8,
        String = 9,
        Group = 10,
        Message = 11,
        Bytes = 12,
        Uint32 = 13,
        Enum = 14,
        Sfixed32 = 15,
        Sfixed64 = 16,
        Sint32 = 17,
        Sint64 = 18,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum Label {
        Optional = 1,
        Required = 2,
        Repeated = 3,
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EnumDescriptorProto {
    #[prost(string, optional, tag = "1")]
    pub name: Option<String>,
    #[prost(message, repeated, tag = "2")]
    pub value: Vec<EnumValueDescriptorProto>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EnumValueDescriptorProto {
    #[prost(string, optional, tag = "1")]
    pub name: Option<String>,
    #[prost(int32, optional, tag = "2")]
    pub number: Option<i32>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ServiceDescriptorProto {
    #[prost(string, optional, tag = "1")]
    pub name: Option<String>,
    #[prost(message, repeated, tag = "2")]
    pub method: Vec<MethodDescriptorProto>,
    #[prost(message, optional, tag = "3")]
    pub options: Option<ServiceOptions>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MethodDescriptorProto {
    #[prost(string, optional, tag = "1")]
    pub name: Option<String>,
    #[prost(string, optional, tag = "2")]
    pub input_type: Option<String>,
    #[prost(string, optional, tag = "3")]
    pub output_type: Option<String>,
    #[prost(message, optional, tag = "4")]
    pub options: Option<MethodOptions>,
    #[prost(bool, optional, tag = "5")]
    pub client_streaming: Option<bool>,
    #[prost(bool, optional, tag = "6")]
    pub server_streaming: Option<bool>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FileOptions {
    /// Extension `grpc.gateway.protoc_gen_openapiv2.options.openapiv2_swagger`.
    #[prost(message, optional, tag = "1042")]
    pub openapiv2_swagger: Option<openapiv2::Swagger>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MessageOptions {
    /// Set on the synthetic entry message generated for map fields.
    #[prost(bool, optional, tag = "7")]
    pub map_entry: Option<bool>,
    /// Extension `grpc.gateway.protoc_gen_openapiv2.options.openapiv2_schema`.
    #[prost(message, optional, tag = "1042")]
    pub openapiv2_schema: Option<openapiv2::Schema>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FieldOptions {
    /// Extension `grpc.gateway.protoc_gen_openapiv2.options.openapiv2_field`.
    #[prost(message, optional, tag = "1042")]
    pub openapiv2_field: Option<openapiv2::JsonSchema>,
    /// Extension `google.api.field_behavior`.
    #[prost(
        enumeration = "super::annotations::FieldBehavior",
        repeated,
        packed = "false",
        tag = "1052"
    )]
    pub field_behavior: Vec<i32>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ServiceOptions {
    /// Extension `grpc.gateway.protoc_gen_openapiv2.options.openapiv2_tag`.
    #[prost(message, optional, tag = "1042")]
    pub openapiv2_tag: Option<openapiv2::Tag>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MethodOptions {
    /// Extension `google.api.http`.
    #[prost(message, optional, tag = "72295728")]
    pub http: Option<annotations::HttpRule>,
    /// Extension `grpc.gateway.protoc_gen_openapiv2.options.openapiv2_operation`.
    #[prost(message, optional, tag = "1042")]
    pub openapiv2_operation: Option<openapiv2::Operation>,
}

/// Maps locations in the original `.proto` source to declarations, and
/// carries the comments attached to them.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SourceCodeInfo {
    #[prost(message, repeated, tag = "1")]
    pub location: Vec<source_code_info::Location>,
}

pub mod source_code_info {
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Location {
        /// A sequence of field numbers and indexes identifying a
        /// declaration, e.g. `[4, 3, 2, 7]` for the 8th field of the 4th
        /// message of a file.
        #[prost(int32, repeated, packed = "true", tag = "1")]
        pub path: Vec<i32>,
        #[prost(int32, repeated, packed = "true", tag = "2")]
        pub span: Vec<i32>,
        #[prost(string, optional, tag = "3")]
        pub leading_comments: Option<String>,
        #[prost(string, optional, tag = "4")]
        pub trailing_comments: Option<String>,
        #[prost(string, repeated, tag = "6")]
        pub leading_detached_comments: Vec<String>,
    }
}
