// SPDX-FileCopyrightText: © 2025 Phala Network <dstack@phala.network>
//
// SPDX-License-Identifier: Apache-2.0

//! User-supplied OpenAPI option handling.
//!
//! Options override generated defaults field by field: a non-empty value
//! on the option replaces the default, empty values leave it alone.

use std::collections::{BTreeMap, HashMap};

use serde_json::Value;

use crate::descriptor::Registry;
use crate::error::{Error, Result};
use crate::pb::openapiv2 as opts;
use crate::swagger::{
    Extensions, ExternalDocumentationObject, HeaderObject, SchemaObject,
    SecurityRequirementObject, SecuritySchemeObject,
};

/// Convert a protobuf `Value` into its JSON counterpart.
pub fn value_to_json(value: &prost_types::Value) -> Value {
    use prost_types::value::Kind;
    match &value.kind {
        None | Some(Kind::NullValue(_)) => Value::Null,
        Some(Kind::NumberValue(n)) => serde_json::Number::from_f64(*n)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        Some(Kind::StringValue(s)) => Value::String(s.clone()),
        Some(Kind::BoolValue(b)) => Value::Bool(*b),
        Some(Kind::StructValue(s)) => Value::Object(
            s.fields
                .iter()
                .map(|(k, v)| (k.clone(), value_to_json(v)))
                .collect(),
        ),
        Some(Kind::ListValue(l)) => Value::Array(l.values.iter().map(value_to_json).collect()),
    }
}

/// Validate and sort `x-…` extension entries.
pub fn process_extensions(input: &HashMap<String, prost_types::Value>) -> Result<Extensions> {
    let mut extensions = BTreeMap::new();
    for (key, value) in input {
        if !key.starts_with("x-") {
            return Err(Error::MalformedExtension(format!(
                "extension keys need to start with \"x-\": {key:?}"
            )));
        }
        extensions.insert(key.clone(), value_to_json(value));
    }
    Ok(extensions)
}

pub fn external_docs(
    docs: Option<&opts::ExternalDocumentation>,
) -> Option<ExternalDocumentationObject> {
    let docs = docs?;
    if docs.description.is_empty() && docs.url.is_empty() {
        return None;
    }
    Some(ExternalDocumentationObject {
        description: non_empty(&docs.description),
        url: non_empty(&docs.url),
    })
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// Parse a raw JSON example payload; invalid JSON degrades to a string
/// so the emitted document stays well-formed.
fn example_value(raw: &str) -> Option<Value> {
    if raw.is_empty() {
        return None;
    }
    Some(serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string())))
}

fn simple_type_to_type_format(types: &[i32]) -> (Option<String>, Option<String>) {
    use opts::json_schema::JsonSchemaSimpleTypes as T;
    let Some(first) = types.first().and_then(|t| T::try_from(*t).ok()) else {
        return (None, None);
    };
    // Only the first entry is representable; Swagger 2.0 `type` is a
    // single string.
    match first {
        T::Unknown | T::Null => (None, None),
        T::Object => (Some("object".to_string()), None),
        T::Array => (Some("array".to_string()), None),
        T::Boolean => (Some("boolean".to_string()), None),
        T::Integer => (Some("integer".to_string()), Some("int32".to_string())),
        T::Number => (Some("number".to_string()), Some("double".to_string())),
        T::String => (Some("string".to_string()), None),
    }
}

/// Apply a field-level `JsonSchema` option onto a generated schema.
pub fn update_schema_from_json_schema(schema: &mut SchemaObject, j: &opts::JsonSchema) {
    if !j.title.is_empty() {
        schema.title = Some(j.title.clone());
    }
    if !j.description.is_empty() {
        schema.description = Some(j.description.clone());
    }
    schema.read_only = j.read_only;
    if j.multiple_of != 0.0 {
        schema.multiple_of = Some(j.multiple_of);
    }
    if j.maximum != 0.0 {
        schema.maximum = Some(j.maximum);
    }
    schema.exclusive_maximum = j.exclusive_maximum;
    if j.minimum != 0.0 {
        schema.minimum = Some(j.minimum);
    }
    schema.exclusive_minimum = j.exclusive_minimum;
    if j.max_length != 0 {
        schema.max_length = Some(j.max_length);
    }
    if j.min_length != 0 {
        schema.min_length = Some(j.min_length);
    }
    if !j.pattern.is_empty() {
        schema.pattern = Some(j.pattern.clone());
    }
    if !j.default.is_empty() {
        schema.default = Some(j.default.clone());
    }
    if j.max_items != 0 {
        schema.max_items = Some(j.max_items);
    }
    if j.min_items != 0 {
        schema.min_items = Some(j.min_items);
    }
    schema.unique_items = j.unique_items;
    if j.max_properties != 0 {
        schema.max_properties = Some(j.max_properties);
    }
    if j.min_properties != 0 {
        schema.min_properties = Some(j.min_properties);
    }
    if !j.required.is_empty() {
        schema.required = j.required.clone();
    }
    if !j.r#enum.is_empty() {
        schema.r#enum = j.r#enum.clone();
    }
    let (t, f) = simple_type_to_type_format(&j.r#type);
    if let Some(t) = t {
        schema.r#type = Some(t);
        schema.format = f;
    }
    if !j.format.is_empty() {
        schema.format = Some(j.format.clone());
    }
    if let Some(example) = example_value(&j.example) {
        schema.example = Some(example);
    }
}

/// Schema core carried by a `JsonSchema` option: either a reference to
/// another definition or a plain type/format pair. References feed the
/// reachability set.
pub fn schema_core_from_json_schema(
    reg: &Registry,
    j: &opts::JsonSchema,
    refs: Option<&mut Vec<String>>,
) -> SchemaObject {
    let mut core = SchemaObject::default();
    if !j.r#ref.is_empty() {
        if let Some(openapi_name) = reg.openapi_name(&j.r#ref) {
            core.r#ref = Some(format!("#/definitions/{openapi_name}"));
            if let Some(refs) = refs {
                refs.push(j.r#ref.clone());
            }
        } else {
            core.r#ref = Some(j.r#ref.clone());
        }
    } else {
        let (t, f) = simple_type_to_type_format(&j.r#type);
        core.r#type = t;
        core.format = f;
    }
    core
}

/// Render a message/response `Schema` option as a schema object.
pub fn schema_from_proto_schema(
    reg: &Registry,
    s: &opts::Schema,
    refs: Option<&mut Vec<String>>,
) -> SchemaObject {
    let mut schema = match &s.json_schema {
        Some(j) => {
            let mut out = schema_core_from_json_schema(reg, j, refs);
            update_schema_from_json_schema(&mut out, j);
            out
        }
        None => SchemaObject::default(),
    };
    schema.external_docs = external_docs(s.external_docs.as_ref());
    schema.read_only = schema.read_only || s.read_only;
    if let Some(example) = example_value(&s.example) {
        schema.example = Some(example);
    }
    schema
}

/// Overlay an option-derived schema onto a generated definition,
/// keeping generated values where the option is silent.
pub fn merge_definition_schema(schema: &mut SchemaObject, proto: SchemaObject) {
    if proto.external_docs.is_some() {
        schema.external_docs = proto.external_docs;
    }
    schema.read_only = schema.read_only || proto.read_only;
    schema.multiple_of = proto.multiple_of.or(schema.multiple_of);
    schema.maximum = proto.maximum.or(schema.maximum);
    schema.exclusive_maximum = proto.exclusive_maximum || schema.exclusive_maximum;
    schema.minimum = proto.minimum.or(schema.minimum);
    schema.exclusive_minimum = proto.exclusive_minimum || schema.exclusive_minimum;
    schema.max_length = proto.max_length.or(schema.max_length);
    schema.min_length = proto.min_length.or(schema.min_length);
    if proto.pattern.is_some() {
        schema.pattern = proto.pattern;
    }
    if proto.default.is_some() {
        schema.default = proto.default;
    }
    schema.max_items = proto.max_items.or(schema.max_items);
    schema.min_items = proto.min_items.or(schema.min_items);
    schema.unique_items = proto.unique_items || schema.unique_items;
    schema.max_properties = proto.max_properties.or(schema.max_properties);
    schema.min_properties = proto.min_properties.or(schema.min_properties);
    if !proto.required.is_empty() {
        schema.required = proto.required;
    }
    if proto.r#ref.is_some() || proto.r#type.is_some() {
        schema.r#ref = proto.r#ref;
        schema.r#type = proto.r#type;
        schema.format = proto.format;
    }
    if proto.title.is_some() {
        schema.title = proto.title;
    }
    if proto.description.is_some() {
        schema.description = proto.description;
    }
    if proto.example.is_some() {
        schema.example = proto.example;
    }
}

/// Convert security requirements. File-level requirements must carry a
/// scope list for every named scheme; operation-level entries without
/// one are skipped.
pub fn security_requirements(
    reqs: &[opts::SecurityRequirement],
    strict: bool,
) -> Result<Vec<SecurityRequirementObject>> {
    let mut out = Vec::with_capacity(reqs.len());
    for req in reqs {
        let mut converted = SecurityRequirementObject::new();
        for entry in &req.security_requirement {
            let key = entry.key.clone().unwrap_or_default();
            match &entry.value {
                Some(value) => {
                    converted.insert(key, value.scope.clone());
                }
                None if strict => {
                    return Err(Error::MalformedExtension(format!(
                        "malformed security requirement for key {key:?}; value is required"
                    )));
                }
                None => continue,
            }
        }
        if !strict && converted.is_empty() {
            continue;
        }
        out.push(converted);
    }
    Ok(out)
}

/// Merge a security-definitions option into the document map, field by
/// field per scheme.
pub fn merge_security_definitions(
    target: &mut BTreeMap<String, SecuritySchemeObject>,
    defs: &opts::SecurityDefinitions,
) -> Result<()> {
    use opts::security_scheme::{Flow, In, Type};

    // Sorted for deterministic merging.
    let mut entries: Vec<(&String, &opts::SecurityScheme)> = defs.security.iter().collect();
    entries.sort_by_key(|(k, _)| k.as_str());

    for (key, def) in entries {
        let scheme = target.entry(key.clone()).or_default();
        match Type::try_from(def.r#type) {
            Ok(Type::Basic) => scheme.r#type = "basic".to_string(),
            Ok(Type::ApiKey) => scheme.r#type = "apiKey".to_string(),
            Ok(Type::Oauth2) => scheme.r#type = "oauth2".to_string(),
            _ => {}
        }
        if !def.description.is_empty() {
            scheme.description = Some(def.description.clone());
        }
        if !def.name.is_empty() {
            scheme.name = Some(def.name.clone());
        }
        match In::try_from(def.r#in) {
            Ok(In::Query) => scheme.r#in = Some("query".to_string()),
            Ok(In::Header) => scheme.r#in = Some("header".to_string()),
            _ => {}
        }
        match Flow::try_from(def.flow) {
            Ok(Flow::Implicit) => scheme.flow = Some("implicit".to_string()),
            Ok(Flow::Password) => scheme.flow = Some("password".to_string()),
            Ok(Flow::Application) => scheme.flow = Some("application".to_string()),
            Ok(Flow::AccessCode) => scheme.flow = Some("accessCode".to_string()),
            _ => {}
        }
        if !def.authorization_url.is_empty() {
            scheme.authorization_url = Some(def.authorization_url.clone());
        }
        if !def.token_url.is_empty() {
            scheme.token_url = Some(def.token_url.clone());
        }
        if let Some(scopes) = &def.scopes {
            let target_scopes = scheme.scopes.get_or_insert_with(BTreeMap::new);
            for (scope, description) in &scopes.scope {
                target_scopes.insert(scope.clone(), description.clone());
            }
        }
        if !def.extensions.is_empty() {
            scheme.extensions = process_extensions(&def.extensions)?;
        }
    }
    Ok(())
}

/// Example payloads keyed by mime type; JSON examples pass through raw.
pub fn examples(input: &HashMap<String, String>) -> Option<BTreeMap<String, Value>> {
    if input.is_empty() {
        return None;
    }
    let mut out = BTreeMap::new();
    for (mime, example) in input {
        let value = if mime == "application/json" {
            serde_json::from_str(example).unwrap_or_else(|_| Value::String(example.clone()))
        } else {
            Value::String(example.clone())
        };
        out.insert(mime.clone(), value);
    }
    Some(out)
}

/// Convert and validate response headers.
pub fn process_headers(
    input: &HashMap<String, opts::Header>,
) -> Result<BTreeMap<String, HeaderObject>> {
    let mut out = BTreeMap::new();
    for (name, header) in input {
        validate_header_type_and_format(&header.r#type, &header.format)?;
        let mut converted = HeaderObject {
            description: non_empty(&header.description),
            r#type: header.r#type.clone(),
            format: non_empty(&header.format),
            default: None,
            pattern: non_empty(&header.pattern),
        };
        if !header.default.is_empty() {
            validate_default_value(&header.r#type, &header.default, &header.format)?;
            converted.default = Some(
                serde_json::from_str(&header.default)
                    .unwrap_or_else(|_| Value::String(header.default.clone())),
            );
        }
        out.insert(canonical_header_name(name), converted);
    }
    Ok(out)
}

/// Canonical MIME header form: each dash-separated token capitalized.
fn canonical_header_name(name: &str) -> String {
    name.split('-')
        .map(|token| {
            let mut chars = token.chars();
            match chars.next() {
                Some(first) => {
                    first.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}

fn validate_header_type_and_format(header_type: &str, format: &str) -> Result<()> {
    match header_type {
        "string" | "boolean" => Ok(()),
        "number" => match format {
            "uint" | "uint8" | "uint16" | "uint32" | "uint64" | "int" | "int8" | "int16"
            | "int32" | "int64" | "float" | "float32" | "float64" | "double" | "byte" | "" => {
                Ok(())
            }
            other => Err(Error::MalformedExtension(format!(
                "format {other:?} is not a valid extension of type {header_type:?}"
            ))),
        },
        "integer" => match format {
            "uint" | "uint8" | "uint16" | "uint32" | "uint64" | "int" | "int8" | "int16"
            | "int32" | "int64" | "" => Ok(()),
            other => Err(Error::MalformedExtension(format!(
                "format {other:?} is not a valid extension of type {header_type:?}"
            ))),
        },
        other => Err(Error::MalformedExtension(format!(
            "header type {other:?} is not supported"
        ))),
    }
}

fn validate_default_value(header_type: &str, default: &str, format: &str) -> Result<()> {
    let mismatch = || {
        Error::MalformedExtension(format!(
            "default value {default:?} does not match type {header_type:?}"
        ))
    };
    match header_type {
        "string" => {
            if !(default.len() >= 2 && default.starts_with('"') && default.ends_with('"')) {
                return Err(mismatch());
            }
            let unquoted = default.trim_matches('"');
            match format {
                "date-time" => {
                    chrono::DateTime::parse_from_rfc3339(unquoted).map_err(|_| {
                        Error::MalformedExtension(format!(
                            "default value {default:?} is not a valid RFC3339 date-time string"
                        ))
                    })?;
                }
                "date" => {
                    chrono::NaiveDate::parse_from_str(unquoted, "%Y-%m-%d").map_err(|_| {
                        Error::MalformedExtension(format!(
                            "default value {default:?} is not a valid RFC3339 date string"
                        ))
                    })?;
                }
                _ => {}
            }
            Ok(())
        }
        "number" => {
            let value: f64 = default.parse().map_err(|_| mismatch())?;
            // JSON forbids non-finite numbers.
            if value.is_infinite() || value.is_nan() {
                return Err(mismatch());
            }
            Ok(())
        }
        "integer" => {
            let ok = match format {
                "int32" => default.parse::<i32>().is_ok(),
                "uint32" => default.parse::<u32>().is_ok(),
                "uint64" => default.parse::<u64>().is_ok(),
                _ => default.parse::<i64>().is_ok(),
            };
            if ok {
                Ok(())
            } else {
                Err(mismatch())
            }
        }
        "boolean" => {
            // Truthy spellings like "1" or "True" are not JSON booleans.
            if default == "true" || default == "false" {
                Ok(())
            } else {
                Err(mismatch())
            }
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn string_value(s: &str) -> prost_types::Value {
        prost_types::Value {
            kind: Some(prost_types::value::Kind::StringValue(s.to_string())),
        }
    }

    #[test]
    fn test_extensions_require_x_prefix() {
        let mut input = HashMap::new();
        input.insert("x-version".to_string(), string_value("1.0"));
        let out = process_extensions(&input).unwrap();
        assert_eq!(out["x-version"], Value::String("1.0".to_string()));

        let mut bad = HashMap::new();
        bad.insert("version".to_string(), string_value("1.0"));
        assert!(matches!(
            process_extensions(&bad),
            Err(Error::MalformedExtension(_))
        ));
    }

    #[test]
    fn test_extensions_sorted_by_key() {
        let mut input = HashMap::new();
        input.insert("x-b".to_string(), string_value("2"));
        input.insert("x-a".to_string(), string_value("1"));
        let out = process_extensions(&input).unwrap();
        let keys: Vec<&String> = out.keys().collect();
        assert_eq!(keys, ["x-a", "x-b"]);
    }

    #[test]
    fn test_header_validation() {
        assert!(validate_header_type_and_format("string", "").is_ok());
        assert!(validate_header_type_and_format("integer", "int64").is_ok());
        assert!(validate_header_type_and_format("integer", "float").is_err());
        assert!(validate_header_type_and_format("object", "").is_err());
    }

    #[test]
    fn test_header_default_validation() {
        assert!(validate_default_value("boolean", "true", "").is_ok());
        assert!(validate_default_value("boolean", "True", "").is_err());
        assert!(validate_default_value("integer", "12", "int32").is_ok());
        assert!(validate_default_value("integer", "4294967296", "uint32").is_err());
        assert!(validate_default_value("string", "\"x\"", "").is_ok());
        assert!(validate_default_value("string", "x", "").is_err());
        assert!(validate_default_value("string", "\"2021-01-01T00:00:00Z\"", "date-time").is_ok());
        assert!(validate_default_value("string", "\"yesterday\"", "date-time").is_err());
    }

    #[test]
    fn test_canonical_header_name() {
        assert_eq!(canonical_header_name("x-request-id"), "X-Request-Id");
        assert_eq!(canonical_header_name("ETAG"), "Etag");
    }

    #[test]
    fn test_value_to_json_nested() {
        let value = prost_types::Value {
            kind: Some(prost_types::value::Kind::StructValue(prost_types::Struct {
                fields: [("ok".to_string(), prost_types::Value {
                    kind: Some(prost_types::value::Kind::BoolValue(true)),
                })]
                .into_iter()
                .collect(),
            })),
        };
        assert_eq!(value_to_json(&value), serde_json::json!({ "ok": true }));
    }
}
