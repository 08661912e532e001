// SPDX-FileCopyrightText: © 2025 Phala Network <dstack@phala.network>
//
// SPDX-License-Identifier: Apache-2.0

//! FQN-indexed descriptor arena.
//!
//! `load` ingests a decoded descriptor set, materializes the model,
//! verifies that every type reference resolves, derives HTTP bindings
//! for every method, and memoizes the flat-name mapping. The registry is
//! read-only afterwards.

use std::collections::HashMap;

use crate::comments::{self, CommentMap};
use crate::error::{Error, Result};
use crate::naming;
use crate::pb;
use crate::pb::field_descriptor_proto::{Label, Type as FieldType};

use super::{
    fully_qualified_name, httprule, Binding, Body, Config, Enum, EnumValue, Field,
    FieldPathComponent, FieldRef, File, HttpMethod, Message, Method, PathParam, Service,
};

#[derive(Debug)]
pub struct Registry {
    config: Config,
    files: Vec<File>,
    messages: HashMap<String, Message>,
    enums: HashMap<String, Enum>,
    /// FQN → OpenAPI definition key, computed once per registry.
    flat_names: HashMap<String, String>,
}

impl Registry {
    /// Build a fully resolved registry from a decoded descriptor set.
    pub fn load(config: Config, set: &pb::FileDescriptorSet) -> Result<Self> {
        let mut reg = Registry {
            config,
            files: Vec::new(),
            messages: HashMap::new(),
            enums: HashMap::new(),
            flat_names: HashMap::new(),
        };
        for file in &set.file {
            reg.load_file(file);
        }
        reg.verify_references()?;
        reg.build_bindings()?;

        let mut fqns: Vec<&str> = reg.messages.keys().map(String::as_str).collect();
        fqns.extend(reg.enums.keys().map(String::as_str));
        reg.flat_names = naming::resolve_names(&fqns, reg.config.use_fqn_for_openapi_name);
        Ok(reg)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn files(&self) -> &[File] {
        &self.files
    }

    pub fn file(&self, name: &str) -> Option<&File> {
        self.files.iter().find(|f| f.name == name)
    }

    /// The memoized OpenAPI definition key for a message or enum FQN.
    pub fn openapi_name(&self, fqn: &str) -> Option<&str> {
        self.flat_names.get(fqn).map(String::as_str)
    }

    /// Look up a message by reference location and name. Resolution
    /// tries each prefix of the location joined with the name, then the
    /// name as an absolute FQN.
    pub fn lookup_msg(&self, location: &str, name: &str) -> Result<&Message> {
        self.resolve(location, name, |fqn| self.messages.get(fqn).is_some())
            .and_then(|fqn| self.messages.get(&fqn))
            .ok_or_else(|| Error::UnknownType(name.to_string()))
    }

    pub fn lookup_enum(&self, location: &str, name: &str) -> Result<&Enum> {
        self.resolve(location, name, |fqn| self.enums.get(fqn).is_some())
            .and_then(|fqn| self.enums.get(&fqn))
            .ok_or_else(|| Error::UnknownType(name.to_string()))
    }

    pub fn field(&self, r: &FieldRef) -> Option<&Field> {
        self.messages.get(&r.message)?.field(&r.field)
    }

    fn resolve(&self, location: &str, name: &str, exists: impl Fn(&str) -> bool) -> Option<String> {
        if let Some(absolute) = name.strip_prefix('.') {
            let fqn = format!(".{absolute}");
            return exists(&fqn).then_some(fqn);
        }
        let mut components: Vec<&str> = if location.is_empty() {
            Vec::new()
        } else {
            location.split('.').collect()
        };
        loop {
            let fqn = if components.is_empty() {
                format!(".{name}")
            } else {
                format!(".{}.{}", components.join("."), name)
            };
            if exists(&fqn) {
                return Some(fqn);
            }
            if components.pop().is_none() {
                return None;
            }
        }
    }

    fn load_file(&mut self, fd: &pb::FileDescriptorProto) {
        let name = fd.name.clone().unwrap_or_default();
        let package = fd.package.clone().unwrap_or_default();
        let comments = CommentMap::from_source_info(fd.source_code_info.as_ref());

        let mut file = File {
            name: name.clone(),
            package: package.clone(),
            messages: Vec::new(),
            enums: Vec::new(),
            services: Vec::new(),
            extensions: fd
                .extension
                .iter()
                .enumerate()
                .map(|(idx, f)| build_field(f, idx as i32))
                .collect(),
            comments,
            swagger_option: fd.options.as_ref().and_then(|o| o.openapiv2_swagger.clone()),
        };

        for (idx, message) in fd.message_type.iter().enumerate() {
            let path = vec![comments::FILE_MESSAGE_TYPE, idx as i32];
            let fqmn = self.register_message(&name, &package, &[], idx as i32, &path, message);
            file.messages.push(fqmn);
        }
        for (idx, enumeration) in fd.enum_type.iter().enumerate() {
            let path = vec![comments::FILE_ENUM_TYPE, idx as i32];
            let fqen = self.register_enum(&name, &package, &[], idx as i32, &path, enumeration);
            file.enums.push(fqen);
        }
        for (idx, service) in fd.service.iter().enumerate() {
            file.services
                .push(build_service(&name, &package, idx as i32, service));
        }
        self.files.push(file);
    }

    fn register_message(
        &mut self,
        file: &str,
        package: &str,
        outers: &[String],
        index: i32,
        path: &[i32],
        descriptor: &pb::DescriptorProto,
    ) -> String {
        let name = descriptor.name.clone().unwrap_or_default();
        let fqmn = fully_qualified_name(package, outers, &name);

        let message = Message {
            name: name.clone(),
            package: package.to_string(),
            outers: outers.to_vec(),
            index,
            file: file.to_string(),
            path: path.to_vec(),
            fields: descriptor
                .field
                .iter()
                .enumerate()
                .map(|(idx, f)| build_field(f, idx as i32))
                .collect(),
            map_entry: descriptor
                .options
                .as_ref()
                .and_then(|o| o.map_entry)
                .unwrap_or(false),
            schema_option: descriptor
                .options
                .as_ref()
                .and_then(|o| o.openapiv2_schema.clone()),
            fqmn: fqmn.clone(),
        };
        self.messages.insert(fqmn.clone(), message);

        let mut inner_outers = outers.to_vec();
        inner_outers.push(name);
        for (idx, nested) in descriptor.nested_type.iter().enumerate() {
            let nested_path = comments::extend_path(path, comments::MESSAGE_NESTED_TYPE, idx as i32);
            self.register_message(file, package, &inner_outers, idx as i32, &nested_path, nested);
        }
        for (idx, enumeration) in descriptor.enum_type.iter().enumerate() {
            let enum_path = comments::extend_path(path, comments::MESSAGE_ENUM_TYPE, idx as i32);
            self.register_enum(file, package, &inner_outers, idx as i32, &enum_path, enumeration);
        }
        fqmn
    }

    fn register_enum(
        &mut self,
        file: &str,
        package: &str,
        outers: &[String],
        index: i32,
        path: &[i32],
        descriptor: &pb::EnumDescriptorProto,
    ) -> String {
        let name = descriptor.name.clone().unwrap_or_default();
        let fqen = fully_qualified_name(package, outers, &name);
        let enumeration = Enum {
            name,
            package: package.to_string(),
            outers: outers.to_vec(),
            index,
            file: file.to_string(),
            path: path.to_vec(),
            values: descriptor
                .value
                .iter()
                .map(|v| EnumValue {
                    name: v.name.clone().unwrap_or_default(),
                    number: v.number.unwrap_or_default(),
                })
                .collect(),
            fqen: fqen.clone(),
        };
        self.enums.insert(fqen.clone(), enumeration);
        fqen
    }

    /// Check that every type reference in fields, extensions and method
    /// signatures binds to a registered descriptor.
    fn verify_references(&self) -> Result<()> {
        for message in self.messages.values() {
            for field in &message.fields {
                self.verify_field(&message.package, field)?;
            }
        }
        for file in &self.files {
            for extension in &file.extensions {
                self.verify_field(&file.package, extension)?;
            }
            for service in &file.services {
                for method in &service.methods {
                    self.lookup_msg(&file.package, &method.request_type)?;
                    self.lookup_msg(&file.package, &method.response_type)?;
                }
            }
        }
        Ok(())
    }

    fn verify_field(&self, location: &str, field: &Field) -> Result<()> {
        match field.r#type {
            FieldType::Message | FieldType::Group => {
                self.lookup_msg(location, &field.type_name).map(|_| ())
            }
            FieldType::Enum => self.lookup_enum(location, &field.type_name).map(|_| ()),
            _ => Ok(()),
        }
    }

    /// Derive the HTTP bindings of every method from its annotation (or
    /// the synthesized default binding).
    fn build_bindings(&mut self) -> Result<()> {
        let mut built: Vec<(usize, usize, usize, Vec<Binding>)> = Vec::new();
        for (f_idx, file) in self.files.iter().enumerate() {
            for (s_idx, service) in file.services.iter().enumerate() {
                for (m_idx, method) in service.methods.iter().enumerate() {
                    let bindings = self.method_bindings(file, service, method)?;
                    built.push((f_idx, s_idx, m_idx, bindings));
                }
            }
        }
        for (f_idx, s_idx, m_idx, bindings) in built {
            self.files[f_idx].services[s_idx].methods[m_idx].bindings = bindings;
        }
        Ok(())
    }

    fn method_bindings(&self, file: &File, svc: &Service, meth: &Method) -> Result<Vec<Binding>> {
        let request = self.lookup_msg(&file.package, &meth.request_type)?;
        let response = self.lookup_msg(&file.package, &meth.response_type)?;

        let Some(rule) = &meth.http_rule else {
            if !self.config.generate_unbound_methods {
                return Ok(Vec::new());
            }
            let path = if file.package.is_empty() {
                format!("/{}/{}", svc.name, meth.name)
            } else {
                format!("/{}.{}/{}", file.package, svc.name, meth.name)
            };
            return Ok(vec![Binding {
                http_method: HttpMethod::Post,
                template: httprule::parse(&path)?,
                path_params: Vec::new(),
                body: Some(Body::default()),
                response_body: None,
                index: 0,
            }]);
        };

        let mut rules = vec![rule];
        for additional in &rule.additional_bindings {
            if !additional.additional_bindings.is_empty() {
                return Err(Error::InvalidHttpRule(format!(
                    "additional_bindings of {}.{} must not nest further bindings",
                    svc.name, meth.name
                )));
            }
            rules.push(additional);
        }

        let mut bindings = Vec::with_capacity(rules.len());
        for (index, rule) in rules.into_iter().enumerate() {
            bindings.push(self.build_binding(request, response, rule, index)?);
        }
        Ok(bindings)
    }

    fn build_binding(
        &self,
        request: &Message,
        response: &Message,
        rule: &pb::annotations::HttpRule,
        index: usize,
    ) -> Result<Binding> {
        let (http_method, tmpl) = extract_pattern(rule)?;
        let template = httprule::parse(tmpl)?;

        let mut path_params = Vec::new();
        for variable in template.variables() {
            let components = self.resolve_field_path(request, &variable.dotted_path(), true)?;
            let leaf = components
                .last()
                .ok_or_else(|| Error::InvalidHttpRule("empty variable field path".to_string()))?;
            path_params.push(PathParam {
                name: variable.dotted_path(),
                target: leaf.target.clone(),
            });
        }

        let body = match rule.body.as_str() {
            "" => None,
            "*" => Some(Body::default()),
            path => Some(Body {
                field_path: self.resolve_field_path(
                    request,
                    path,
                    self.config.allow_repeated_fields_in_body,
                )?,
            }),
        };
        if http_method == HttpMethod::Delete && body.is_some() && !self.config.allow_delete_body {
            return Err(Error::InvalidHttpRule(
                "DELETE must not have a body unless allow_delete_body is set".to_string(),
            ));
        }

        let response_body = match rule.response_body.as_str() {
            "" => None,
            path => Some(Body {
                field_path: self.resolve_field_path(response, path, true)?,
            }),
        };

        Ok(Binding {
            http_method,
            template,
            path_params,
            body,
            response_body,
            index,
        })
    }

    /// Resolve a dotted field path against a message, walking nested
    /// messages. Intermediate components must be singular message
    /// fields.
    fn resolve_field_path(
        &self,
        root: &Message,
        dotted: &str,
        allow_repeated_leaf: bool,
    ) -> Result<Vec<FieldPathComponent>> {
        let parts: Vec<&str> = dotted.split('.').collect();
        let mut components = Vec::with_capacity(parts.len());
        let mut current = root;
        for (i, part) in parts.iter().enumerate() {
            let field = current.field(part).ok_or_else(|| {
                Error::InvalidHttpRule(format!(
                    "field {part:?} not found in message {}",
                    current.fqmn()
                ))
            })?;
            let last = i + 1 == parts.len();
            if !last && (!field.is_message() || field.is_repeated()) {
                return Err(Error::InvalidHttpRule(format!(
                    "intermediate field {part:?} in {dotted:?} must be a singular message",
                )));
            }
            if last && field.is_repeated() && !allow_repeated_leaf {
                return Err(Error::InvalidHttpRule(format!(
                    "repeated field {part:?} is not allowed here (allow_repeated_fields_in_body)",
                )));
            }
            components.push(FieldPathComponent {
                name: part.to_string(),
                target: FieldRef {
                    message: current.fqmn().to_string(),
                    field: part.to_string(),
                },
            });
            if !last {
                current = self.lookup_msg(&current.package, &field.type_name)?;
            }
        }
        Ok(components)
    }
}

fn extract_pattern(rule: &pb::annotations::HttpRule) -> Result<(HttpMethod, &str)> {
    let patterns = [
        (HttpMethod::Get, &rule.get),
        (HttpMethod::Put, &rule.put),
        (HttpMethod::Post, &rule.post),
        (HttpMethod::Delete, &rule.delete),
        (HttpMethod::Patch, &rule.patch),
    ];
    let mut found: Option<(HttpMethod, &str)> = None;
    for (method, template) in patterns {
        if !template.is_empty() {
            if found.is_some() {
                return Err(Error::InvalidHttpRule(
                    "rule defines more than one pattern".to_string(),
                ));
            }
            found = Some((method, template));
        }
    }
    if rule.custom.is_some() {
        return Err(Error::InvalidHttpRule(
            "custom patterns are not supported".to_string(),
        ));
    }
    found.ok_or_else(|| Error::InvalidHttpRule("rule defines no pattern".to_string()))
}

fn build_field(fd: &pb::FieldDescriptorProto, index: i32) -> Field {
    let name = fd.name.clone().unwrap_or_default();
    Field {
        json_name: fd.json_name.clone().unwrap_or_else(|| name.clone()),
        name,
        number: fd.number.unwrap_or_default(),
        r#type: fd
            .r#type
            .and_then(|t| FieldType::try_from(t).ok())
            .unwrap_or(FieldType::Message),
        type_name: fd.type_name.clone().unwrap_or_default(),
        label: fd
            .label
            .and_then(|l| Label::try_from(l).ok())
            .unwrap_or(Label::Optional),
        index,
        json_schema_option: fd.options.as_ref().and_then(|o| o.openapiv2_field.clone()),
        field_behavior: fd
            .options
            .as_ref()
            .map(|o| {
                o.field_behavior
                    .iter()
                    .filter_map(|b| pb::annotations::FieldBehavior::try_from(*b).ok())
                    .collect()
            })
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(name: &str, fields: Vec<pb::FieldDescriptorProto>) -> pb::DescriptorProto {
        pb::DescriptorProto {
            name: Some(name.to_string()),
            field: fields,
            ..Default::default()
        }
    }

    fn string_field(name: &str, number: i32) -> pb::FieldDescriptorProto {
        pb::FieldDescriptorProto {
            name: Some(name.to_string()),
            number: Some(number),
            label: Some(Label::Optional as i32),
            r#type: Some(FieldType::String as i32),
            json_name: Some(name.to_string()),
            ..Default::default()
        }
    }

    fn file(name: &str, package: &str, messages: Vec<pb::DescriptorProto>) -> pb::FileDescriptorProto {
        pb::FileDescriptorProto {
            name: Some(name.to_string()),
            package: Some(package.to_string()),
            message_type: messages,
            ..Default::default()
        }
    }

    #[test]
    fn test_lookup_prefers_innermost_scope() {
        let set = pb::FileDescriptorSet {
            file: vec![
                file("a.proto", "a", vec![message("M", vec![])]),
                file("ab.proto", "a.b", vec![message("M", vec![])]),
            ],
        };
        let reg = Registry::load(Config::default(), &set).unwrap();
        assert_eq!(reg.lookup_msg("a.b", "M").unwrap().fqmn(), ".a.b.M");
        assert_eq!(reg.lookup_msg("a", "M").unwrap().fqmn(), ".a.M");
        assert_eq!(reg.lookup_msg("a.b", ".a.M").unwrap().fqmn(), ".a.M");
        assert!(reg.lookup_msg("", "Missing").is_err());
    }

    #[test]
    fn test_nested_messages_get_fqmn_and_paths() {
        let mut outer = message("Outer", vec![]);
        outer.nested_type = vec![message("Inner", vec![string_field("x", 1)])];
        let set = pb::FileDescriptorSet {
            file: vec![file("x.proto", "pkg", vec![outer])],
        };
        let reg = Registry::load(Config::default(), &set).unwrap();
        let inner = reg.lookup_msg("", ".pkg.Outer.Inner").unwrap();
        assert_eq!(inner.outers, vec!["Outer".to_string()]);
        assert_eq!(inner.path, vec![4, 0, 3, 0]);
    }

    #[test]
    fn test_default_binding_synthesized() {
        let mut fd = file(
            "svc.proto",
            "pkg",
            vec![message("Req", vec![]), message("Rsp", vec![])],
        );
        fd.service = vec![pb::ServiceDescriptorProto {
            name: Some("Svc".to_string()),
            method: vec![pb::MethodDescriptorProto {
                name: Some("Call".to_string()),
                input_type: Some(".pkg.Req".to_string()),
                output_type: Some(".pkg.Rsp".to_string()),
                ..Default::default()
            }],
            ..Default::default()
        }];
        let set = pb::FileDescriptorSet { file: vec![fd] };
        let reg = Registry::load(Config::default(), &set).unwrap();

        let binding = &reg.files()[0].services[0].methods[0].bindings[0];
        assert_eq!(binding.http_method, HttpMethod::Post);
        assert!(binding.body.as_ref().is_some_and(|b| b.field_path.is_empty()));

        let reg = Registry::load(
            Config {
                generate_unbound_methods: false,
                ..Default::default()
            },
            &set,
        )
        .unwrap();
        assert!(reg.files()[0].services[0].methods[0].bindings.is_empty());
    }

    #[test]
    fn test_rule_must_define_exactly_one_pattern() {
        let rule = pb::annotations::HttpRule::default();
        assert!(matches!(
            extract_pattern(&rule),
            Err(Error::InvalidHttpRule(_))
        ));

        let rule = pb::annotations::HttpRule {
            get: "/v1/a".to_string(),
            post: "/v1/b".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            extract_pattern(&rule),
            Err(Error::InvalidHttpRule(_))
        ));

        let rule = pb::annotations::HttpRule {
            delete: "/v1/a".to_string(),
            ..Default::default()
        };
        let (method, tmpl) = extract_pattern(&rule).unwrap();
        assert_eq!(method, HttpMethod::Delete);
        assert_eq!(tmpl, "/v1/a");
    }
}

fn build_service(file: &str, package: &str, index: i32, sd: &pb::ServiceDescriptorProto) -> Service {
    let path = vec![comments::FILE_SERVICE, index];
    Service {
        name: sd.name.clone().unwrap_or_default(),
        package: package.to_string(),
        file: file.to_string(),
        index,
        path,
        methods: sd
            .method
            .iter()
            .enumerate()
            .map(|(idx, md)| Method {
                name: md.name.clone().unwrap_or_default(),
                index: idx as i32,
                request_type: md.input_type.clone().unwrap_or_default(),
                response_type: md.output_type.clone().unwrap_or_default(),
                client_streaming: md.client_streaming.unwrap_or(false),
                server_streaming: md.server_streaming.unwrap_or(false),
                bindings: Vec::new(),
                http_rule: md.options.as_ref().and_then(|o| o.http.clone()),
                operation_option: md
                    .options
                    .as_ref()
                    .and_then(|o| o.openapiv2_operation.clone()),
            })
            .collect(),
        tag_option: sd.options.as_ref().and_then(|o| o.openapiv2_tag.clone()),
    }
}
