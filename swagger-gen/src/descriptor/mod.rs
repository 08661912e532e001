// SPDX-FileCopyrightText: © 2025 Phala Network <dstack@phala.network>
//
// SPDX-License-Identifier: Apache-2.0

//! In-memory descriptor model.
//!
//! The registry is the arena: messages and enums live in FQN-keyed maps
//! and cross-reference each other through fully-qualified name strings,
//! never owning pointers, so cyclic message graphs stay representable.

use std::str::FromStr;

use crate::comments::CommentMap;
use crate::pb;
use crate::pb::field_descriptor_proto::{Label, Type as FieldType};

pub mod httprule;
mod registry;

pub use registry::Registry;

/// One input `.proto` file.
#[derive(Debug, Clone)]
pub struct File {
    pub name: String,
    pub package: String,
    /// FQMNs of the top-level messages, in declaration order.
    pub messages: Vec<String>,
    /// FQENs of the top-level enums, in declaration order.
    pub enums: Vec<String>,
    pub services: Vec<Service>,
    /// Top-level extension fields declared by the file.
    pub extensions: Vec<Field>,
    pub comments: CommentMap,
    pub swagger_option: Option<pb::openapiv2::Swagger>,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub name: String,
    pub package: String,
    /// Names of the enclosing messages, outermost first.
    pub outers: Vec<String>,
    /// Index within the parent container.
    pub index: i32,
    /// Owning file name.
    pub file: String,
    /// Source-info path of this message declaration.
    pub path: Vec<i32>,
    pub fields: Vec<Field>,
    pub map_entry: bool,
    pub schema_option: Option<pb::openapiv2::Schema>,
    fqmn: String,
}

impl Message {
    pub fn fqmn(&self) -> &str {
        &self.fqmn
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// The value field (number 2) of a `map_entry` message.
    pub fn map_value_field(&self) -> Option<&Field> {
        self.fields.iter().find(|f| f.number == 2)
    }
}

#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub json_name: String,
    pub number: i32,
    pub r#type: FieldType,
    /// FQN of the referenced type for message/enum/group fields, empty
    /// otherwise.
    pub type_name: String,
    pub label: Label,
    pub index: i32,
    pub json_schema_option: Option<pb::openapiv2::JsonSchema>,
    pub field_behavior: Vec<pb::annotations::FieldBehavior>,
}

impl Field {
    pub fn is_repeated(&self) -> bool {
        self.label == Label::Repeated
    }

    pub fn is_enum(&self) -> bool {
        self.r#type == FieldType::Enum
    }

    pub fn is_message(&self) -> bool {
        matches!(self.r#type, FieldType::Message | FieldType::Group)
    }
}

#[derive(Debug, Clone)]
pub struct Enum {
    pub name: String,
    pub package: String,
    pub outers: Vec<String>,
    pub index: i32,
    pub file: String,
    pub path: Vec<i32>,
    pub values: Vec<EnumValue>,
    fqen: String,
}

impl Enum {
    pub fn fqen(&self) -> &str {
        &self.fqen
    }

    pub fn value_names(&self) -> Vec<String> {
        self.values.iter().map(|v| v.name.clone()).collect()
    }

    pub fn value_numbers(&self) -> Vec<String> {
        self.values.iter().map(|v| v.number.to_string()).collect()
    }

    /// Name of the zero value, the JSON default for enum fields.
    pub fn default_value(&self) -> String {
        self.values
            .iter()
            .find(|v| v.number == 0)
            .map(|v| v.name.clone())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub struct EnumValue {
    pub name: String,
    pub number: i32,
}

#[derive(Debug, Clone)]
pub struct Service {
    pub name: String,
    pub package: String,
    pub file: String,
    pub index: i32,
    pub path: Vec<i32>,
    pub methods: Vec<Method>,
    pub tag_option: Option<pb::openapiv2::Tag>,
}

#[derive(Debug, Clone)]
pub struct Method {
    pub name: String,
    pub index: i32,
    /// FQMN of the request message.
    pub request_type: String,
    /// FQMN of the response message.
    pub response_type: String,
    pub client_streaming: bool,
    pub server_streaming: bool,
    pub bindings: Vec<Binding>,
    pub operation_option: Option<pb::openapiv2::Operation>,
    /// Raw annotation the bindings were derived from.
    pub(crate) http_rule: Option<pb::annotations::HttpRule>,
}

/// One (verb, path, body, response-body) tuple for a method.
#[derive(Debug, Clone)]
pub struct Binding {
    pub http_method: HttpMethod,
    pub template: httprule::Template,
    pub path_params: Vec<PathParam>,
    pub body: Option<Body>,
    pub response_body: Option<Body>,
    /// Position within the method's binding list; additional bindings
    /// suffix their operation id with `index + 1`.
    pub index: usize,
}

/// A path parameter, pointing at a field of the request message.
#[derive(Debug, Clone)]
pub struct PathParam {
    /// The dotted field path as written in the template.
    pub name: String,
    pub target: FieldRef,
}

/// Request-body (or response-body) selector. An empty field path selects
/// the whole message.
#[derive(Debug, Clone, Default)]
pub struct Body {
    pub field_path: Vec<FieldPathComponent>,
}

#[derive(Debug, Clone)]
pub struct FieldPathComponent {
    pub name: String,
    pub target: FieldRef,
}

/// Arena-friendly reference to a field: owning message FQMN plus field
/// name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRef {
    pub message: String,
    pub field: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// Separator used to join repeated path parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Separator {
    #[default]
    Csv,
    Ssv,
    Tsv,
    Pipes,
}

impl Separator {
    pub fn name(self) -> &'static str {
        match self {
            Separator::Csv => "csv",
            Separator::Ssv => "ssv",
            Separator::Tsv => "tsv",
            Separator::Pipes => "pipes",
        }
    }
}

impl FromStr for Separator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "csv" => Ok(Separator::Csv),
            "ssv" => Ok(Separator::Ssv),
            "tsv" => Ok(Separator::Tsv),
            "pipes" => Ok(Separator::Pipes),
            other => Err(format!("unknown separator: {other}")),
        }
    }
}

/// Generator configuration, one field per CLI flag.
#[derive(Debug, Clone)]
pub struct Config {
    pub use_json_names_for_fields: bool,
    pub allow_delete_body: bool,
    pub allow_merge: bool,
    pub merge_file_name: String,
    pub use_fqn_for_openapi_name: bool,
    pub include_package_in_tags: bool,
    pub use_go_templates: bool,
    pub disable_default_errors: bool,
    pub enums_as_ints: bool,
    pub simple_operation_ids: bool,
    pub allow_repeated_fields_in_body: bool,
    pub generate_unbound_methods: bool,
    pub repeated_path_param_separator: Separator,
    /// Prefix prepended to every emitted path.
    pub namespace: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            use_json_names_for_fields: false,
            allow_delete_body: false,
            allow_merge: false,
            merge_file_name: "apidocs".to_string(),
            use_fqn_for_openapi_name: false,
            include_package_in_tags: false,
            use_go_templates: false,
            disable_default_errors: false,
            enums_as_ints: false,
            simple_operation_ids: false,
            allow_repeated_fields_in_body: false,
            generate_unbound_methods: true,
            repeated_path_param_separator: Separator::Csv,
            namespace: String::new(),
        }
    }
}

/// "." + package + outer names + name, the registry-wide unique key.
pub(crate) fn fully_qualified_name(package: &str, outers: &[String], name: &str) -> String {
    let mut fqn = String::from(".");
    if !package.is_empty() {
        fqn.push_str(package);
        fqn.push('.');
    }
    for outer in outers {
        fqn.push_str(outer);
        fqn.push('.');
    }
    fqn.push_str(name);
    fqn
}
