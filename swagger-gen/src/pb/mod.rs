// SPDX-FileCopyrightText: © 2025 Phala Network <dstack@phala.network>
//
// SPDX-License-Identifier: Apache-2.0

//! Vendored protobuf message definitions.
//!
//! The stock `prost-types` descriptor structs drop unknown fields during
//! decoding, which loses the `google.api.http` and OpenAPI option
//! extensions this generator exists to read. These mirrors declare the
//! extension numbers as ordinary fields (proto2 extensions share the wire
//! format of plain fields), so a plain `prost` decode of a descriptor set
//! surfaces everything we need. The mirrors are trimmed to the fields the
//! renderer consumes.

pub mod annotations;
pub mod descriptor;
pub mod openapiv2;

pub use descriptor::{
    field_descriptor_proto, DescriptorProto, EnumDescriptorProto, EnumValueDescriptorProto,
    FieldDescriptorProto, FileDescriptorProto, FileDescriptorSet, MethodDescriptorProto,
    ServiceDescriptorProto, SourceCodeInfo,
};
