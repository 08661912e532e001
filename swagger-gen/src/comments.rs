// SPDX-FileCopyrightText: © 2025 Phala Network <dstack@phala.network>
//
// SPDX-License-Identifier: Apache-2.0

//! Attaches `.proto` source comments to generated OpenAPI objects.
//!
//! Protobuf source info addresses declarations by integer paths: a
//! sequence of descriptor.proto field numbers and indexes, e.g.
//! `[4, 2, 2, 1]` for the second field of the third top-level message.
//! Comments are indexed once per file; lookups rebuild the path from the
//! model's stored location.

use std::collections::HashMap;

use crate::descriptor::{File, Message, Registry};
use crate::pb;
use crate::swagger::{OperationObject, SchemaObject, SwaggerObject};

// descriptor.proto field numbers used to build source-info paths.
pub const FILE_PACKAGE: i32 = 2;
pub const FILE_MESSAGE_TYPE: i32 = 4;
pub const FILE_ENUM_TYPE: i32 = 5;
pub const FILE_SERVICE: i32 = 6;
pub const MESSAGE_FIELD: i32 = 2;
pub const MESSAGE_NESTED_TYPE: i32 = 3;
pub const MESSAGE_ENUM_TYPE: i32 = 4;
pub const SERVICE_METHOD: i32 = 2;
pub const ENUM_VALUE: i32 = 2;

/// Leading comments of one file, keyed by source-info path.
#[derive(Debug, Clone, Default)]
pub struct CommentMap {
    entries: HashMap<Vec<i32>, String>,
}

impl CommentMap {
    pub fn from_source_info(info: Option<&pb::SourceCodeInfo>) -> Self {
        let mut entries = HashMap::new();
        if let Some(info) = info {
            for location in &info.location {
                if let Some(comment) = location.leading_comments.as_deref() {
                    let normalized = normalize_comment(comment);
                    if !normalized.is_empty() {
                        entries.insert(location.path.clone(), normalized);
                    }
                }
            }
        }
        Self { entries }
    }

    pub fn get(&self, path: &[i32]) -> Option<&str> {
        self.entries.get(path).map(String::as_str)
    }
}

/// Strip the virtual leading space protoc keeps after each `//`.
fn normalize_comment(raw: &str) -> String {
    let trimmed = raw.trim_end_matches('\n').trim();
    trimmed.replace("\n ", "\n")
}

pub fn extend_path(base: &[i32], field_number: i32, index: i32) -> Vec<i32> {
    let mut path = base.to_vec();
    path.push(field_number);
    path.push(index);
    path
}

/// Capability surface of objects that can absorb a source comment.
///
/// Objects with a real summary slot take the first paragraph as summary;
/// title-bearing objects only do so when the paragraph does not read
/// like a sentence (no trailing period); everything else lands in the
/// description.
pub trait CommentTarget {
    fn summary(&self) -> Option<&str>;
    fn set_summary(&mut self, summary: String);
    fn description(&self) -> Option<&str>;
    fn set_description(&mut self, description: String);
    /// True when the summary slot is actually a title.
    fn uses_title(&self) -> bool {
        false
    }
    fn set_read_only(&mut self) {}
}

impl CommentTarget for OperationObject {
    fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }
    fn set_summary(&mut self, summary: String) {
        self.summary = Some(summary);
    }
    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
    fn set_description(&mut self, description: String) {
        self.description = Some(description);
    }
}

impl CommentTarget for SchemaObject {
    fn summary(&self) -> Option<&str> {
        self.title.as_deref()
    }
    fn set_summary(&mut self, summary: String) {
        self.title = Some(summary);
    }
    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
    fn set_description(&mut self, description: String) {
        self.description = Some(description);
    }
    fn uses_title(&self) -> bool {
        true
    }
    fn set_read_only(&mut self) {
        self.read_only = true;
    }
}

/// Package comments land on the document info object.
impl CommentTarget for SwaggerObject {
    fn summary(&self) -> Option<&str> {
        if self.info.title.is_empty() {
            None
        } else {
            Some(&self.info.title)
        }
    }
    fn set_summary(&mut self, summary: String) {
        self.info.title = summary;
    }
    fn description(&self) -> Option<&str> {
        self.info.description.as_deref()
    }
    fn set_description(&mut self, description: String) {
        self.info.description = Some(description);
    }
    fn uses_title(&self) -> bool {
        true
    }
}

fn is_empty(v: Option<&str>) -> bool {
    v.map_or(true, str::is_empty)
}

/// Apply a leading comment to a target, preserving any option-supplied
/// values unless this is the package-level comment (which always wins).
pub fn update_from_comment(target: &mut dyn CommentTarget, comment: &str, is_package: bool) {
    if comment.is_empty() {
        return;
    }

    if comment.contains("Output only.") {
        target.set_read_only();
    }

    let paragraphs: Vec<&str> = comment.split("\n\n").collect();
    let summary = paragraphs[0].trim();
    let description = paragraphs[1..].join("\n\n").trim().to_string();

    if !target.uses_title() || (!summary.is_empty() && !summary.ends_with('.')) {
        if is_empty(target.summary()) || is_package {
            target.set_summary(summary.to_string());
        }
        if !description.is_empty() && (is_empty(target.description()) || is_package) {
            target.set_description(description);
        }
        return;
    }

    if is_empty(target.description()) || is_package {
        target.set_description(paragraphs.join("\n\n"));
    }
}

/// Expand `{{import "file"}}` and `{{fieldcomments msg field}}` template
/// directives inside a comment. On any failure the error text replaces
/// the directive so the problem is visible in the generated document.
pub fn template_comment(reg: &Registry, file: &File, comment: &str) -> String {
    let mut out = String::with_capacity(comment.len());
    let mut rest = comment;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };
        out.push_str(&expand_directive(reg, file, after[..end].trim()));
        rest = &after[end + 2..];
    }
    out.push_str(rest);
    out
}

fn expand_directive(reg: &Registry, file: &File, directive: &str) -> String {
    if let Some(arg) = directive.strip_prefix("import") {
        let name = arg.trim().trim_matches('"');
        return match std::fs::read_to_string(name) {
            // Imported files are run through the template pass as well.
            Ok(contents) => template_comment(reg, file, &contents),
            Err(e) => e.to_string(),
        };
    }
    if let Some(args) = directive.strip_prefix("fieldcomments") {
        let mut parts = args.split_whitespace();
        let (Some(msg_name), Some(field_name)) = (parts.next(), parts.next()) else {
            return format!("fieldcomments needs a message and a field: {directive:?}");
        };
        let Ok(msg) = reg.lookup_msg(&file.package, msg_name) else {
            return format!("unknown message {msg_name:?}");
        };
        return field_comment(reg, msg, field_name)
            .unwrap_or_default()
            .replace('\n', "<br>");
    }
    format!("unknown directive {directive:?}")
}

/// Leading comment of a message field, if any.
pub fn field_comment(reg: &Registry, msg: &Message, field_name: &str) -> Option<String> {
    let file = reg.file(&msg.file)?;
    let field = msg.field(field_name)?;
    let path = extend_path(&msg.path, MESSAGE_FIELD, field.index);
    file.comments.get(&path).map(str::to_string)
}
