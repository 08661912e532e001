// SPDX-FileCopyrightText: © 2025 Phala Network <dstack@phala.network>
//
// SPDX-License-Identifier: Apache-2.0

//! Field, message and enum schema synthesis.

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::comments;
use crate::descriptor::{Body, Field, File, Message, PathParam, Registry};
use crate::error::{Error, Result};
use crate::options;
use crate::pb::annotations::FieldBehavior;
use crate::pb::field_descriptor_proto::Type as FieldType;
use crate::swagger::{ParameterObject, SchemaObject};

/// JSON schemas of the well-known types, matching the protobuf JSON
/// codec. These never become named definitions.
pub fn well_known_schema(fqn: &str) -> Option<SchemaObject> {
    let schema = match fqn {
        ".google.protobuf.FieldMask" => SchemaObject::typed("string", ""),
        ".google.protobuf.Timestamp" => SchemaObject::typed("string", "date-time"),
        ".google.protobuf.Duration" => SchemaObject::typed("string", ""),
        ".google.protobuf.StringValue" => SchemaObject::typed("string", ""),
        ".google.protobuf.BytesValue" => SchemaObject::typed("string", "byte"),
        ".google.protobuf.Int32Value" => SchemaObject::typed("integer", "int32"),
        ".google.protobuf.UInt32Value" => SchemaObject::typed("integer", "int64"),
        ".google.protobuf.Int64Value" => SchemaObject::typed("string", "int64"),
        ".google.protobuf.UInt64Value" => SchemaObject::typed("string", "uint64"),
        ".google.protobuf.FloatValue" => SchemaObject::typed("number", "float"),
        ".google.protobuf.DoubleValue" => SchemaObject::typed("number", "double"),
        ".google.protobuf.BoolValue" => SchemaObject::typed("boolean", ""),
        ".google.protobuf.Empty" => SchemaObject::default(),
        ".google.protobuf.Struct" => SchemaObject::typed("object", ""),
        ".google.protobuf.Value" => SchemaObject::typed("object", ""),
        ".google.protobuf.ListValue" => SchemaObject {
            r#type: Some("array".to_string()),
            items: Some(Box::new(SchemaObject::typed("object", ""))),
            ..Default::default()
        },
        ".google.protobuf.NullValue" => SchemaObject::typed("string", ""),
        _ => return None,
    };
    Some(schema)
}

pub fn is_well_known(fqn: &str) -> bool {
    well_known_schema(&normalize_type_name(fqn)).is_some()
}

/// Ensure the leading dot protoc puts on fully-qualified type names.
pub fn normalize_type_name(name: &str) -> String {
    if name.is_empty() || name.starts_with('.') {
        name.to_string()
    } else {
        format!(".{name}")
    }
}

/// (type, format) for a primitive field type, per the protobuf JSON
/// codec. 64-bit integers marshal as strings.
pub fn primitive_schema(t: FieldType) -> Option<(&'static str, &'static str)> {
    match t {
        FieldType::Double => Some(("number", "double")),
        FieldType::Float => Some(("number", "float")),
        FieldType::Int64 | FieldType::Sint64 | FieldType::Sfixed64 => Some(("string", "int64")),
        FieldType::Uint64 | FieldType::Fixed64 => Some(("string", "uint64")),
        FieldType::Int32 | FieldType::Sint32 | FieldType::Sfixed32 => Some(("integer", "int32")),
        FieldType::Uint32 | FieldType::Fixed32 => Some(("integer", "int64")),
        FieldType::Bool => Some(("boolean", "")),
        FieldType::String => Some(("string", "")),
        FieldType::Bytes => Some(("string", "byte")),
        _ => None,
    }
}

enum Aggregate {
    Singular,
    Array,
    Object,
}

/// Schema object for a single protobuf field. Message and enum
/// references land in `refs` so the reachability pass can close over
/// them.
pub fn schema_of_field(
    reg: &Registry,
    field: &Field,
    mut refs: Option<&mut Vec<String>>,
) -> SchemaObject {
    // Map fields point at a synthetic map_entry message whose value
    // field carries the real value type.
    let mut effective = field;
    let mut aggregate = Aggregate::Singular;
    if field.is_message() {
        if let Ok(entry) = reg.lookup_msg("", &field.type_name) {
            if entry.map_entry {
                if let Some(value_field) = entry.map_value_field() {
                    effective = value_field;
                    aggregate = Aggregate::Object;
                }
            }
        }
    }
    if effective.is_repeated() {
        aggregate = Aggregate::Array;
    }

    let type_name = normalize_type_name(&effective.type_name);
    let mut props = None;
    let core = match effective.r#type {
        FieldType::Enum | FieldType::Message | FieldType::Group => {
            if let Some(wkt) = well_known_schema(&type_name) {
                if type_name == ".google.protobuf.Empty" {
                    props = Some(IndexMap::new());
                }
                wkt
            } else if let Some(openapi_name) = reg.openapi_name(&type_name) {
                if let Some(refs) = refs.as_deref_mut() {
                    refs.push(type_name.clone());
                }
                SchemaObject::reference(format!("#/definitions/{openapi_name}"))
            } else {
                tracing::warn!(type_name = %type_name, "could not resolve OpenAPI name");
                SchemaObject::default()
            }
        }
        other => match primitive_schema(other) {
            Some((t, f)) => SchemaObject::typed(t, f),
            None => SchemaObject::typed(&format!("{other:?}"), "UNKNOWN"),
        },
    };

    let mut schema = match aggregate {
        Aggregate::Array => SchemaObject {
            r#type: Some("array".to_string()),
            items: Some(Box::new(core)),
            ..Default::default()
        },
        Aggregate::Object => SchemaObject {
            r#type: Some("object".to_string()),
            additional_properties: Some(Box::new(SchemaObject {
                properties: props,
                ..core
            })),
            ..Default::default()
        },
        Aggregate::Singular => SchemaObject {
            properties: props,
            ..core
        },
    };

    if let Some(json_schema) = &field.json_schema_option {
        options::update_schema_from_json_schema(&mut schema, json_schema);
    }
    apply_field_behavior(&mut schema, field);

    schema
}

/// `google.api.field_behavior` handling: REQUIRED feeds the enclosing
/// schema's required list, OUTPUT_ONLY flips readOnly. Reference
/// schemas are left alone, any sibling of `$ref` would be ignored by
/// JSON Reference processing anyway.
fn apply_field_behavior(schema: &mut SchemaObject, field: &Field) {
    if schema.r#ref.is_some() {
        return;
    }
    for behavior in &field.field_behavior {
        match behavior {
            FieldBehavior::Required => schema.required.push(field.name.clone()),
            FieldBehavior::OutputOnly => schema.read_only = true,
            _ => {}
        }
    }
}

/// The enum's definition schema: value names (or numbers) plus the zero
/// value as default.
pub fn enum_schema(reg: &Registry, enumeration: &crate::descriptor::Enum) -> SchemaObject {
    if reg.config().enums_as_ints {
        SchemaObject {
            r#type: Some("integer".to_string()),
            format: Some("int32".to_string()),
            r#enum: enumeration.value_numbers(),
            default: Some("0".to_string()),
            ..Default::default()
        }
    } else {
        SchemaObject {
            r#type: Some("string".to_string()),
            r#enum: enumeration.value_names(),
            default: Some(enumeration.default_value()),
            ..Default::default()
        }
    }
}

/// Per-value enum comments aggregated into one markdown-ish list.
pub fn enum_value_comments(reg: &Registry, enumeration: &crate::descriptor::Enum) -> String {
    let Some(file) = reg.file(&enumeration.file) else {
        return String::new();
    };
    let mut lines = Vec::new();
    for (idx, value) in enumeration.values.iter().enumerate() {
        let path = comments::extend_path(&enumeration.path, comments::ENUM_VALUE, idx as i32);
        if let Some(comment) = file.comments.get(&path) {
            let name = if reg.config().enums_as_ints {
                value.number.to_string()
            } else {
                value.name.clone()
            };
            lines.push(format!("{name}: {comment}"));
        }
    }
    if lines.is_empty() {
        String::new()
    } else {
        format!("- {}", lines.join("\n - "))
    }
}

/// Walk a request message into `in: query` parameters, skipping fields
/// already covered by path parameters or the body.
pub fn message_to_query_parameters(
    reg: &Registry,
    file: &File,
    message: &Message,
    path_params: &[PathParam],
    body: Option<&Body>,
) -> Result<Vec<ParameterObject>> {
    let mut params = Vec::new();
    for field in &message.fields {
        let visited = HashSet::new();
        params.extend(nested_query_params(
            reg,
            file,
            message,
            field,
            "",
            path_params,
            body,
            &visited,
        )?);
    }
    Ok(params)
}

#[allow(clippy::too_many_arguments)]
fn nested_query_params(
    reg: &Registry,
    file: &File,
    message: &Message,
    field: &Field,
    prefix: &str,
    path_params: &[PathParam],
    body: Option<&Body>,
    visited: &HashSet<String>,
) -> Result<Vec<ParameterObject>> {
    // Already consumed as a path parameter?
    let is_target = |m: &str, f: &str| m == message.fqmn() && f == field.name;
    if path_params
        .iter()
        .any(|p| is_target(&p.target.message, &p.target.field))
    {
        return Ok(Vec::new());
    }
    // Already covered by the body?
    if let Some(body) = body {
        if body.field_path.is_empty() {
            // body: "*" swallows the whole request.
            return Ok(Vec::new());
        }
        if body
            .field_path
            .iter()
            .any(|c| is_target(&c.target.message, &c.target.field))
        {
            return Ok(Vec::new());
        }
    }

    let mut schema = schema_of_field(reg, field, None);
    if let Some(comment) = comments::field_comment(reg, message, &field.name) {
        crate::render::apply_comment(reg, file, &mut schema, &comment, false);
    }

    let is_enum = field.is_enum();
    if schema.r#type.is_some() || is_enum {
        if schema.r#type.as_deref() == Some("object") {
            // Maps and nested objects cannot be expressed as query
            // strings.
            return Ok(Vec::new());
        }
        if let Some(items) = &schema.items {
            let inner = items.r#type.as_deref().unwrap_or("");
            if (inner.is_empty() || inner == "object") && !is_enum {
                return Ok(Vec::new());
            }
        }

        let mut description = schema.description.clone();
        if let Some(title) = &schema.title {
            // The parameter object has no title; fold it into the
            // description.
            let rest = schema.description.as_deref().unwrap_or("");
            description = Some(format!("{title}. {rest}").trim().to_string());
        }

        let required = schema.required.iter().any(|r| *r == field.name);
        let name = if reg.config().use_json_names_for_fields {
            format!("{prefix}{}", field.json_name)
        } else {
            format!("{prefix}{}", field.name)
        };

        let mut param = ParameterObject {
            name,
            description,
            r#in: "query".to_string(),
            required,
            r#type: schema.r#type.clone(),
            format: schema.format.clone(),
            items: schema.items.clone(),
            default: schema.default.clone(),
            ..Default::default()
        };
        if param.r#type.as_deref() == Some("array") {
            param.collection_format = Some("multi".to_string());
        }

        if is_enum {
            let enumeration = reg
                .lookup_enum("", &field.type_name)
                .map_err(|_| Error::UnknownType(field.type_name.clone()))?;
            let as_ints = reg.config().enums_as_ints;
            let values = if as_ints {
                enumeration.value_numbers()
            } else {
                enumeration.value_names()
            };
            let value_type = if as_ints { "integer" } else { "string" };
            if param.items.is_some() {
                param.items = Some(Box::new(SchemaObject {
                    r#type: Some(value_type.to_string()),
                    r#enum: values,
                    ..Default::default()
                }));
            } else {
                param.r#type = Some(value_type.to_string());
                param.format = None;
                param.r#enum = values;
                param.default = Some(if as_ints {
                    "0".to_string()
                } else {
                    enumeration.default_value()
                });
            }
            let value_comments = enum_value_comments(reg, enumeration);
            if !value_comments.is_empty() {
                let description = param.description.take().unwrap_or_default();
                param.description = Some(
                    format!("{description}\n\n {value_comments}")
                        .trim_start_matches('\n')
                        .to_string(),
                );
            }
        }
        return Ok(vec![param]);
    }

    // Nested message: recurse with this field's name appended to the
    // prefix, guarding against cycles along the current path.
    let nested = reg
        .lookup_msg(&message.package, &field.type_name)
        .map_err(|_| Error::UnknownType(field.type_name.clone()))?;
    if visited.contains(nested.fqmn()) {
        return Err(Error::RecursiveQueryType(nested.fqmn().to_string()));
    }
    let mut visited = visited.clone();
    visited.insert(nested.fqmn().to_string());

    let field_name = if reg.config().use_json_names_for_fields {
        &field.json_name
    } else {
        &field.name
    };
    let prefix = format!("{prefix}{field_name}.");
    let mut params = Vec::new();
    for nested_field in &nested.fields {
        params.extend(nested_query_params(
            reg,
            file,
            nested,
            nested_field,
            &prefix,
            path_params,
            body,
            &visited,
        )?);
    }
    Ok(params)
}
