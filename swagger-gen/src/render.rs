// SPDX-FileCopyrightText: © 2025 Phala Network <dstack@phala.network>
//
// SPDX-License-Identifier: Apache-2.0

//! Drives the rendering pipeline: operations per binding, reachable
//! definitions, file-level option merging, and final document assembly.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use tracing::warn;

use crate::comments::{self, CommentTarget};
use crate::descriptor::httprule::Segment;
use crate::descriptor::{
    Binding, Body, Enum, File, HttpMethod, Message, Method, PathParam, Registry, Service,
};
use crate::error::{Error, Result};
use crate::options;
use crate::pb::openapiv2 as opts;
use crate::schema::{
    enum_schema, enum_value_comments, is_well_known, message_to_query_parameters,
    normalize_type_name, primitive_schema, schema_of_field, well_known_schema,
};
use crate::swagger::{
    InfoObject, OperationObject, OutputFile, ParameterObject, ResponseObject, SchemaObject,
    SwaggerObject, TagObject,
};

const STATUS_FQMN: &str = ".google.rpc.Status";

/// Run a comment through the optional template pass and apply it to a
/// target object.
pub fn apply_comment(
    reg: &Registry,
    file: &File,
    target: &mut dyn CommentTarget,
    comment: &str,
    is_package: bool,
) {
    if comment.is_empty() {
        return;
    }
    if reg.config().use_go_templates {
        let templated = comments::template_comment(reg, file, comment);
        comments::update_from_comment(target, &templated, is_package);
    } else {
        comments::update_from_comment(target, comment, is_package);
    }
}

/// Render the target files (every file with at least one service when
/// `targets` is empty) into output documents.
pub fn generate(reg: &Registry, targets: &[String]) -> Result<Vec<OutputFile>> {
    let generator = Generator { reg };
    let files: Vec<&File> = if targets.is_empty() {
        reg.files().iter().filter(|f| !f.services.is_empty()).collect()
    } else {
        targets
            .iter()
            .map(|name| {
                reg.file(name)
                    .ok_or_else(|| Error::UnknownType(format!("file {name:?} not in input set")))
            })
            .collect::<Result<_>>()?
    };

    let mut outputs = Vec::new();
    if reg.config().allow_merge {
        let mut merged: Option<SwaggerObject> = None;
        for file in files {
            let doc = generator.apply_template(file)?;
            merged = Some(match merged {
                None => doc,
                Some(base) => merge_documents(base, doc),
            });
        }
        if let Some(mut doc) = merged {
            doc.info.title = reg.config().merge_file_name.clone();
            outputs.push(OutputFile {
                name: format!("{}.swagger.json", reg.config().merge_file_name),
                contents: serialize(&doc)?,
            });
        }
    } else {
        for file in files {
            let doc = generator.apply_template(file)?;
            let stem = file.name.strip_suffix(".proto").unwrap_or(&file.name);
            outputs.push(OutputFile {
                name: format!("{stem}.swagger.json"),
                contents: serialize(&doc)?,
            });
        }
    }
    Ok(outputs)
}

fn serialize(doc: &SwaggerObject) -> Result<String> {
    serde_json::to_string_pretty(doc)
        .map_err(|e| Error::MalformedExtension(format!("failed to serialize document: {e}")))
}

struct Generator<'a> {
    reg: &'a Registry,
}

impl<'a> Generator<'a> {
    fn config(&self) -> &crate::descriptor::Config {
        self.reg.config()
    }

    /// Produce the document for one file.
    fn apply_template(&self, file: &File) -> Result<SwaggerObject> {
        let mut doc = SwaggerObject {
            swagger: "2.0".to_string(),
            info: InfoObject {
                title: file.name.clone(),
                version: "version not set".to_string(),
                ..Default::default()
            },
            consumes: vec!["application/json".to_string()],
            produces: vec!["application/json".to_string()],
            ..Default::default()
        };

        // Reachability seed, in insertion order.
        let mut refs: Vec<String> = Vec::new();
        self.render_services(file, &mut doc, &mut refs)?;
        doc.tags = self.render_service_tags(file);

        if !self.config().disable_default_errors {
            if let Ok(status) = self.reg.lookup_msg("", STATUS_FQMN) {
                refs.push(status.fqmn().to_string());
            }
        }

        let mut rendered = BTreeSet::new();
        self.render_definitions(std::mem::take(&mut refs), &mut rendered, &mut doc.definitions)?;

        if let Some(comment) = file.comments.get(&[comments::FILE_PACKAGE]) {
            apply_comment(self.reg, file, &mut doc, comment, true);
        }

        if let Some(swagger_option) = &file.swagger_option {
            let mut option_refs = Vec::new();
            self.apply_file_options(&mut doc, swagger_option, &mut option_refs)?;
            // Options may reference definitions nothing else rendered.
            self.render_definitions(option_refs, &mut rendered, &mut doc.definitions)?;
        }

        Ok(doc)
    }

    fn render_services(
        &self,
        file: &File,
        doc: &mut SwaggerObject,
        refs: &mut Vec<String>,
    ) -> Result<()> {
        for service in &file.services {
            for method in &service.methods {
                let request = self.reg.lookup_msg(&file.package, &method.request_type)?;
                let response = self.reg.lookup_msg(&file.package, &method.response_type)?;
                if self.reg.openapi_name(request.fqmn()).is_none()
                    || self.reg.openapi_name(response.fqmn()).is_none()
                {
                    warn!(
                        method = %method.name,
                        "could not resolve OpenAPI name for request/response, skipping method"
                    );
                    continue;
                }
                for binding in &method.bindings {
                    let operation =
                        self.render_operation(file, service, method, binding, request, response, refs)?;
                    let path = self.openapi_path(request, binding);
                    let entry = doc.paths.entry(path).or_default();
                    let slot = match binding.http_method {
                        HttpMethod::Get => &mut entry.get,
                        HttpMethod::Delete => &mut entry.delete,
                        HttpMethod::Post => &mut entry.post,
                        HttpMethod::Put => &mut entry.put,
                        HttpMethod::Patch => &mut entry.patch,
                    };
                    *slot = Some(Box::new(operation));
                }
            }
        }
        Ok(())
    }

    fn render_service_tags(&self, file: &File) -> Vec<TagObject> {
        file.services
            .iter()
            .map(|service| {
                let mut tag = TagObject {
                    name: self.tag_name(service),
                    ..Default::default()
                };
                if let Some(option) = &service.tag_option {
                    if !option.description.is_empty() {
                        tag.description = Some(option.description.clone());
                    }
                    tag.external_docs = options::external_docs(option.external_docs.as_ref());
                }
                tag
            })
            .collect()
    }

    fn tag_name(&self, service: &Service) -> String {
        if self.config().include_package_in_tags && !service.package.is_empty() {
            format!("{}.{}", service.package, service.name)
        } else {
            service.name.clone()
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn render_operation(
        &self,
        file: &File,
        service: &Service,
        method: &Method,
        binding: &Binding,
        request: &Message,
        response: &Message,
        refs: &mut Vec<String>,
    ) -> Result<OperationObject> {
        let mut parameters = Vec::new();
        for param in &binding.path_params {
            parameters.push(self.render_path_param(request, param)?);
        }

        if let Some(body) = &binding.body {
            parameters.push(self.render_body_param(method, request, body, refs)?);
            parameters.extend(message_to_query_parameters(
                self.reg,
                file,
                request,
                &binding.path_params,
                Some(body),
            )?);
        } else if matches!(binding.http_method, HttpMethod::Get | HttpMethod::Delete) {
            parameters.extend(message_to_query_parameters(
                self.reg,
                file,
                request,
                &binding.path_params,
                None,
            )?);
        }

        let (description, response_schema) =
            self.render_success_response(method, binding, response, refs)?;

        let mut responses = BTreeMap::new();
        responses.insert(
            "200".to_string(),
            ResponseObject {
                description,
                schema: Some(response_schema),
                ..Default::default()
            },
        );
        if !self.config().disable_default_errors {
            if let Some(status_name) = self.reg.openapi_name(STATUS_FQMN) {
                responses.insert(
                    "default".to_string(),
                    ResponseObject {
                        description: "An unexpected error response.".to_string(),
                        schema: Some(SchemaObject::reference(format!(
                            "#/definitions/{status_name}"
                        ))),
                        ..Default::default()
                    },
                );
            }
        }

        let mut operation_id = if self.config().simple_operation_ids {
            method.name.clone()
        } else {
            format!("{}_{}", service.name, method.name)
        };
        if binding.index != 0 {
            // operationId must stay unique across additional bindings.
            operation_id.push_str(&(binding.index + 1).to_string());
        }

        let mut operation = OperationObject {
            operation_id,
            responses,
            parameters,
            tags: vec![self.tag_name(service)],
            ..Default::default()
        };

        let comment_path =
            comments::extend_path(&service.path, comments::SERVICE_METHOD, method.index);
        if let Some(comment) = file.comments.get(&comment_path) {
            apply_comment(self.reg, file, &mut operation, comment, false);
        }

        if let Some(option) = &method.operation_option {
            self.apply_operation_options(&mut operation, option, refs)?;
        }

        Ok(operation)
    }

    /// OpenAPI-style path for a binding: `{field=prefix/*}` variables
    /// collapse to `{field}` unless the final field segment carries
    /// resource semantics (`parent` or `name`), JSON names replace proto
    /// names on request, and the configured namespace is prepended.
    fn openapi_path(&self, request: &Message, binding: &Binding) -> String {
        let mut parts = Vec::with_capacity(binding.template.segments.len());
        for segment in &binding.template.segments {
            let part = match segment {
                Segment::Literal(lit) => lit.clone(),
                Segment::Wildcard => "*".to_string(),
                Segment::DeepWildcard => "**".to_string(),
                Segment::Variable(variable) => {
                    let display = if self.config().use_json_names_for_fields {
                        self.json_field_path(request, &variable.field_path)
                    } else {
                        variable.dotted_path()
                    };
                    let is_resource = variable
                        .field_path
                        .last()
                        .is_some_and(|f| f == "parent" || f == "name");
                    match &variable.pattern {
                        Some(pattern) if is_resource => {
                            format!("{{{display}={}}}", render_pattern(pattern))
                        }
                        _ => format!("{{{display}}}"),
                    }
                }
            };
            parts.push(part);
        }
        let mut path = format!("/{}", parts.join("/"));
        if let Some(verb) = &binding.template.verb {
            path.push(':');
            path.push_str(verb);
        }

        let namespace = self.config().namespace.trim_end_matches('/');
        if namespace.is_empty() {
            path
        } else if namespace.starts_with('/') {
            format!("{namespace}{path}")
        } else {
            format!("/{namespace}{path}")
        }
    }

    /// Rewrite a dotted proto-name path using the JSON name of every
    /// component, following the message tree.
    fn json_field_path(&self, root: &Message, field_path: &[String]) -> String {
        let mut out = Vec::with_capacity(field_path.len());
        let mut current = Some(root);
        for part in field_path {
            let field = current.and_then(|m| m.field(part));
            match field {
                Some(field) => {
                    out.push(field.json_name.clone());
                    current = if field.is_message() {
                        self.reg.lookup_msg("", &field.type_name).ok()
                    } else {
                        None
                    };
                }
                None => {
                    out.push(part.clone());
                    current = None;
                }
            }
        }
        out.join(".")
    }

    fn render_path_param(&self, request: &Message, param: &PathParam) -> Result<ParameterObject> {
        use crate::pb::field_descriptor_proto::Type as FieldType;

        let target_msg = self.reg.lookup_msg("", &param.target.message)?;
        let field = target_msg
            .field(&param.target.field)
            .ok_or_else(|| Error::UnknownType(param.target.field.clone()))?;

        let mut param_type;
        let mut param_format = None;
        let mut enum_values = Vec::new();
        let schema = schema_of_field(self.reg, field, None);
        let mut description = schema.description.clone();
        let mut default = schema.default.clone();

        match field.r#type {
            FieldType::Message | FieldType::Group => {
                if !is_well_known(&field.type_name) {
                    return Err(Error::UnsupportedPathParam(format!(
                        "only primitive and well-known types are allowed in path parameters, got {}",
                        field.type_name
                    )));
                }
                if field.is_repeated() {
                    return Err(Error::UnsupportedPathParam(
                        "only primitive and enum types are allowed in repeated path parameters"
                            .to_string(),
                    ));
                }
                param_type = schema.r#type.clone();
                param_format = schema.format.clone();
            }
            FieldType::Enum => {
                let enumeration = self.reg.lookup_enum("", &field.type_name)?;
                if self.config().enums_as_ints {
                    param_type = Some("integer".to_string());
                    enum_values = enumeration.value_numbers();
                } else {
                    param_type = Some("string".to_string());
                    enum_values = enumeration.value_names();
                }
            }
            other => {
                let (t, f) = primitive_schema(other).ok_or_else(|| {
                    Error::UnsupportedPathParam(format!("unknown field type {other:?}"))
                })?;
                param_type = Some(t.to_string());
                if !f.is_empty() {
                    param_format = Some(f.to_string());
                }
            }
        }

        let mut items = None;
        let mut collection_format = None;
        let mut min_items = None;
        if field.is_repeated() {
            items = Some(Box::new(SchemaObject {
                r#type: param_type.take(),
                format: param_format.take(),
                r#enum: std::mem::take(&mut enum_values),
                ..Default::default()
            }));
            param_type = Some("array".to_string());
            collection_format = Some(
                self.config()
                    .repeated_path_param_separator
                    .name()
                    .to_string(),
            );
            min_items = Some(1);
        }

        if description.is_none() {
            description = comments::field_comment(self.reg, target_msg, &field.name);
        }
        let name = if self.config().use_json_names_for_fields {
            self.json_field_path(request, &param.name.split('.').map(String::from).collect::<Vec<_>>())
        } else {
            param.name.clone()
        };

        Ok(ParameterObject {
            name,
            description,
            r#in: "path".to_string(),
            required: true,
            r#type: param_type,
            format: param_format,
            items,
            r#enum: enum_values,
            collection_format,
            default: default.take(),
            min_items,
            schema: None,
        })
    }

    fn render_body_param(
        &self,
        method: &Method,
        request: &Message,
        body: &Body,
        refs: &mut Vec<String>,
    ) -> Result<ParameterObject> {
        let mut description = None;
        let schema = if body.field_path.is_empty() {
            self.named_schema(request.fqmn(), refs)
        } else {
            let last = body
                .field_path
                .last()
                .ok_or_else(|| Error::InvalidHttpRule("empty body field path".to_string()))?;
            let target_msg = self.reg.lookup_msg("", &last.target.message)?;
            let field = target_msg
                .field(&last.target.field)
                .ok_or_else(|| Error::UnknownType(last.target.field.clone()))?;
            let schema = schema_of_field(self.reg, field, Some(refs));
            description = schema
                .description
                .clone()
                .or_else(|| comments::field_comment(self.reg, target_msg, &field.name));
            schema
        };

        if method.client_streaming {
            let mut text = description.unwrap_or_default();
            text.push_str(" (streaming inputs)");
            description = Some(text);
        }

        Ok(ParameterObject {
            name: "body".to_string(),
            description,
            r#in: "body".to_string(),
            required: true,
            schema: Some(schema),
            ..Default::default()
        })
    }

    /// Reference (or inline well-known) schema for a message FQMN,
    /// feeding the reachability set.
    fn named_schema(&self, fqmn: &str, refs: &mut Vec<String>) -> SchemaObject {
        if let Some(mut wkt) = well_known_schema(fqmn) {
            if fqmn == ".google.protobuf.Empty" {
                wkt.properties = Some(Default::default());
            }
            return wkt;
        }
        match self.reg.openapi_name(fqmn) {
            Some(name) => {
                refs.push(fqmn.to_string());
                SchemaObject::reference(format!("#/definitions/{name}"))
            }
            None => {
                warn!(fqmn = %fqmn, "could not resolve OpenAPI name");
                SchemaObject::default()
            }
        }
    }

    fn render_success_response(
        &self,
        method: &Method,
        binding: &Binding,
        response: &Message,
        refs: &mut Vec<String>,
    ) -> Result<(String, SchemaObject)> {
        let mut description = "A successful response.".to_string();
        let response_body_leaf = binding
            .response_body
            .as_ref()
            .and_then(|body| body.field_path.last());
        let mut schema = match response_body_leaf {
            None => self.named_schema(response.fqmn(), refs),
            Some(last) => {
                let target_msg = self.reg.lookup_msg("", &last.target.message)?;
                let field = target_msg
                    .field(&last.target.field)
                    .ok_or_else(|| Error::UnknownType(last.target.field.clone()))?;
                let schema = schema_of_field(self.reg, field, Some(refs));
                if let Some(desc) = &schema.description {
                    description = desc.clone();
                } else if let Some(comment) =
                    comments::field_comment(self.reg, target_msg, &field.name)
                {
                    description = comment;
                }
                // The response message itself stays reachable: the
                // streaming wrapper and user options may reference it.
                if !is_well_known(response.fqmn()) {
                    refs.push(response.fqmn().to_string());
                }
                schema
            }
        };

        if method.server_streaming {
            description.push_str("(streaming responses)");
            let result = match schema.r#ref.take() {
                Some(r) => SchemaObject::reference(r),
                None => SchemaObject::default(),
            };
            let mut properties = indexmap::IndexMap::new();
            properties.insert("result".to_string(), result);
            if let Some(status_name) = self.reg.openapi_name(STATUS_FQMN) {
                properties.insert(
                    "error".to_string(),
                    SchemaObject::reference(format!("#/definitions/{status_name}")),
                );
            }
            let title = self
                .reg
                .openapi_name(response.fqmn())
                .map(|name| format!("Stream result of {name}"))
                .unwrap_or_else(|| "Stream result".to_string());
            schema = SchemaObject {
                r#type: Some("object".to_string()),
                title: Some(title),
                properties: Some(properties),
                ..Default::default()
            };
        }

        Ok((description, schema))
    }

    fn apply_operation_options(
        &self,
        operation: &mut OperationObject,
        option: &opts::Operation,
        refs: &mut Vec<String>,
    ) -> Result<()> {
        operation.external_docs = options::external_docs(option.external_docs.as_ref());
        operation.deprecated = option.deprecated;
        if !option.summary.is_empty() {
            operation.summary = Some(option.summary.clone());
        }
        if !option.description.is_empty() {
            operation.description = Some(option.description.clone());
        }
        if !option.tags.is_empty() {
            operation.tags = option.tags.clone();
        }
        if !option.operation_id.is_empty() {
            operation.operation_id = option.operation_id.clone();
        }
        if !option.security.is_empty() {
            let mut security = operation.security.take().unwrap_or_default();
            security.extend(options::security_requirements(&option.security, false)?);
            operation.security = Some(security);
        }

        // Sorted iteration keeps option-supplied responses deterministic.
        let mut responses: Vec<(&String, &opts::Response)> = option.responses.iter().collect();
        responses.sort_by_key(|(name, _)| name.as_str());
        for (name, response) in responses {
            let entry = operation.responses.entry(name.clone()).or_default();
            if !response.description.is_empty() {
                entry.description = response.description.clone();
            }
            if let Some(proto_schema) = &response.schema {
                entry.schema = Some(options::schema_from_proto_schema(
                    self.reg,
                    proto_schema,
                    Some(refs),
                ));
            }
            if let Some(examples) = options::examples(&response.examples) {
                entry.examples = Some(examples);
            }
            if !response.headers.is_empty() {
                entry.headers = Some(options::process_headers(&response.headers)?);
            }
            if !response.extensions.is_empty() {
                entry.extensions = options::process_extensions(&response.extensions)?;
            }
        }

        if !option.extensions.is_empty() {
            operation.extensions = options::process_extensions(&option.extensions)?;
        }
        if !option.produces.is_empty() {
            operation.produces = option.produces.clone();
        }
        Ok(())
    }

    /// Render every reached message/enum as a definition, closing the
    /// set under field references until the fixpoint.
    fn render_definitions(
        &self,
        seed: Vec<String>,
        rendered: &mut BTreeSet<String>,
        definitions: &mut BTreeMap<String, SchemaObject>,
    ) -> Result<()> {
        let mut queue: VecDeque<String> = seed.into();
        while let Some(fqn) = queue.pop_front() {
            let fqn = normalize_type_name(&fqn);
            if rendered.contains(&fqn) || is_well_known(&fqn) {
                continue;
            }
            rendered.insert(fqn.clone());

            if let Ok(message) = self.reg.lookup_msg("", &fqn) {
                if message.map_entry {
                    continue;
                }
                let Some(name) = self.reg.openapi_name(message.fqmn()) else {
                    warn!(fqn = %fqn, "could not resolve OpenAPI name for definition");
                    continue;
                };
                let mut new_refs = Vec::new();
                let schema = self.render_message_definition(message, &mut new_refs)?;
                definitions.insert(name.to_string(), schema);
                queue.extend(new_refs);
            } else if let Ok(enumeration) = self.reg.lookup_enum("", &fqn) {
                let Some(name) = self.reg.openapi_name(enumeration.fqen()) else {
                    warn!(fqn = %fqn, "could not resolve OpenAPI name for definition");
                    continue;
                };
                definitions.insert(name.to_string(), self.render_enum_definition(enumeration));
            } else {
                warn!(fqn = %fqn, "reference does not resolve to a message or enum");
            }
        }
        Ok(())
    }

    fn render_message_definition(
        &self,
        message: &Message,
        refs: &mut Vec<String>,
    ) -> Result<SchemaObject> {
        let file = self.reg.file(&message.file);
        let mut schema = SchemaObject {
            r#type: Some("object".to_string()),
            ..Default::default()
        };
        if let Some(file) = file {
            if let Some(comment) = file.comments.get(&message.path) {
                apply_comment(self.reg, file, &mut schema, comment, false);
            }
        }
        if let Some(option) = &message.schema_option {
            let proto = options::schema_from_proto_schema(self.reg, option, Some(refs));
            options::merge_definition_schema(&mut schema, proto);
        }

        let use_json_names = self.config().use_json_names_for_fields;
        let mut properties = indexmap::IndexMap::new();
        for field in &message.fields {
            let mut value = schema_of_field(self.reg, field, Some(refs));
            if let Some(file) = file {
                if let Some(comment) = comments::field_comment(self.reg, message, &field.name) {
                    apply_comment(self.reg, file, &mut value, &comment, false);
                }
            }

            // Option-supplied required entries track the property key.
            if use_json_names {
                if let Some(pos) = schema.required.iter().position(|r| *r == field.name) {
                    schema.required[pos] = field.json_name.clone();
                }
            }
            // Lift field-level required markers onto the message.
            for required in value.required.drain(..) {
                if use_json_names {
                    schema.required.push(field.json_name.clone());
                } else {
                    schema.required.push(required);
                }
            }

            let key = if use_json_names {
                field.json_name.clone()
            } else {
                field.name.clone()
            };
            properties.insert(key, value);
        }
        schema.properties = Some(properties);
        Ok(schema)
    }

    fn render_enum_definition(&self, enumeration: &Enum) -> SchemaObject {
        let mut schema = enum_schema(self.reg, enumeration);
        let Some(file) = self.reg.file(&enumeration.file) else {
            return schema;
        };
        let mut comment = file
            .comments
            .get(&enumeration.path)
            .unwrap_or_default()
            .to_string();
        let value_comments = enum_value_comments(self.reg, enumeration);
        if !value_comments.is_empty() {
            comment = format!("{comment}\n\n {value_comments}")
                .trim_start_matches('\n')
                .to_string();
        }
        apply_comment(self.reg, file, &mut schema, &comment, false);
        schema
    }

    fn apply_file_options(
        &self,
        doc: &mut SwaggerObject,
        option: &opts::Swagger,
        refs: &mut Vec<String>,
    ) -> Result<()> {
        use opts::Scheme;

        if !option.swagger.is_empty() {
            doc.swagger = option.swagger.clone();
        }
        if let Some(info) = &option.info {
            if !info.title.is_empty() {
                doc.info.title = info.title.clone();
            }
            if !info.description.is_empty() {
                doc.info.description = Some(info.description.clone());
            }
            if !info.terms_of_service.is_empty() {
                doc.info.terms_of_service = Some(info.terms_of_service.clone());
            }
            if !info.version.is_empty() {
                doc.info.version = info.version.clone();
            }
            if let Some(contact) = &info.contact {
                let target = doc.info.contact.get_or_insert_with(Default::default);
                if !contact.name.is_empty() {
                    target.name = Some(contact.name.clone());
                }
                if !contact.url.is_empty() {
                    target.url = Some(contact.url.clone());
                }
                if !contact.email.is_empty() {
                    target.email = Some(contact.email.clone());
                }
            }
            if let Some(license) = &info.license {
                let target = doc.info.license.get_or_insert_with(Default::default);
                if !license.name.is_empty() {
                    target.name = Some(license.name.clone());
                }
                if !license.url.is_empty() {
                    target.url = Some(license.url.clone());
                }
            }
            if !info.extensions.is_empty() {
                doc.info.extensions = options::process_extensions(&info.extensions)?;
            }
        }
        if !option.host.is_empty() {
            doc.host = Some(option.host.clone());
        }
        if !option.base_path.is_empty() {
            doc.base_path = Some(option.base_path.clone());
        }
        if !option.schemes.is_empty() {
            doc.schemes = option
                .schemes
                .iter()
                .filter_map(|s| match Scheme::try_from(*s) {
                    Ok(Scheme::Http) => Some("http".to_string()),
                    Ok(Scheme::Https) => Some("https".to_string()),
                    Ok(Scheme::Ws) => Some("ws".to_string()),
                    Ok(Scheme::Wss) => Some("wss".to_string()),
                    _ => None,
                })
                .collect();
        }
        if !option.consumes.is_empty() {
            doc.consumes = option.consumes.clone();
        }
        if !option.produces.is_empty() {
            doc.produces = option.produces.clone();
        }
        if let Some(definitions) = &option.security_definitions {
            let target = doc.security_definitions.get_or_insert_with(BTreeMap::new);
            options::merge_security_definitions(target, definitions)?;
        }
        if !option.security.is_empty() {
            doc.security
                .extend(options::security_requirements(&option.security, true)?);
        }
        doc.external_docs = options::external_docs(option.external_docs.as_ref());

        // Top-level responses flow into every operation that does not
        // already define the status key.
        if !option.responses.is_empty() {
            let mut template_responses: Vec<(&String, &opts::Response)> =
                option.responses.iter().collect();
            template_responses.sort_by_key(|(name, _)| name.as_str());
            let mut converted = Vec::new();
            for (name, response) in template_responses {
                let schema = response
                    .schema
                    .as_ref()
                    .map(|s| options::schema_from_proto_schema(self.reg, s, Some(refs)));
                converted.push((
                    name.clone(),
                    ResponseObject {
                        description: response.description.clone(),
                        schema,
                        examples: options::examples(&response.examples),
                        ..Default::default()
                    },
                ));
            }
            for item in doc.paths.values_mut() {
                for operation in item.operations_mut() {
                    for (name, response) in &converted {
                        if !operation.responses.contains_key(name) {
                            operation.responses.insert(name.clone(), response.clone());
                        }
                    }
                }
            }
        }

        if !option.extensions.is_empty() {
            doc.extensions = options::process_extensions(&option.extensions)?;
        }
        Ok(())
    }
}

fn render_pattern(pattern: &[Segment]) -> String {
    pattern
        .iter()
        .map(|segment| match segment {
            Segment::Literal(lit) => lit.clone(),
            Segment::Wildcard => "*".to_string(),
            Segment::DeepWildcard => "**".to_string(),
            // The parser rejects nested variables.
            Segment::Variable(_) => String::new(),
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Union of two per-file documents under `allow_merge`.
fn merge_documents(mut base: SwaggerObject, other: SwaggerObject) -> SwaggerObject {
    for tag in other.tags {
        if !base.tags.iter().any(|t| t.name == tag.name) {
            base.tags.push(tag);
        }
    }
    base.paths.extend(other.paths);
    base.definitions.extend(other.definitions);
    if let Some(definitions) = other.security_definitions {
        base.security_definitions
            .get_or_insert_with(BTreeMap::new)
            .extend(definitions);
    }
    base.security.extend(other.security);
    if base.host.is_none() {
        base.host = other.host;
    }
    if base.base_path.is_none() {
        base.base_path = other.base_path;
    }
    if base.external_docs.is_none() {
        base.external_docs = other.external_docs;
    }
    base.extensions.extend(other.extensions);
    base
}
