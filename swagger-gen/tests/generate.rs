// SPDX-FileCopyrightText: © 2025 Phala Network <dstack@phala.network>
//
// SPDX-License-Identifier: Apache-2.0

//! End-to-end rendering tests: descriptor sets are built in code, run
//! through the generator, and asserted on the emitted JSON.

use serde_json::{json, Value};
use swagger_gen::pb::annotations::HttpRule;
use swagger_gen::pb::descriptor::{
    field_descriptor_proto::{Label, Type},
    DescriptorProto, EnumDescriptorProto, EnumValueDescriptorProto, FieldDescriptorProto,
    FileDescriptorProto, FileDescriptorSet, MethodDescriptorProto, MethodOptions,
    ServiceDescriptorProto,
};
use swagger_gen::{generate, Config, Error};

fn scalar_field(name: &str, number: i32, r#type: Type) -> FieldDescriptorProto {
    FieldDescriptorProto {
        name: Some(name.to_string()),
        number: Some(number),
        label: Some(Label::Optional as i32),
        r#type: Some(r#type as i32),
        json_name: Some(json_name(name)),
        ..Default::default()
    }
}

fn message_field(name: &str, number: i32, type_name: &str) -> FieldDescriptorProto {
    FieldDescriptorProto {
        name: Some(name.to_string()),
        number: Some(number),
        label: Some(Label::Optional as i32),
        r#type: Some(Type::Message as i32),
        type_name: Some(type_name.to_string()),
        json_name: Some(json_name(name)),
        ..Default::default()
    }
}

fn json_name(name: &str) -> String {
    let mut out = String::new();
    let mut upper_next = false;
    for c in name.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.push(c.to_ascii_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

fn message(name: &str, fields: Vec<FieldDescriptorProto>) -> DescriptorProto {
    DescriptorProto {
        name: Some(name.to_string()),
        field: fields,
        ..Default::default()
    }
}

fn method(name: &str, input: &str, output: &str) -> MethodDescriptorProto {
    MethodDescriptorProto {
        name: Some(name.to_string()),
        input_type: Some(input.to_string()),
        output_type: Some(output.to_string()),
        ..Default::default()
    }
}

fn method_with_rule(
    name: &str,
    input: &str,
    output: &str,
    rule: HttpRule,
) -> MethodDescriptorProto {
    MethodDescriptorProto {
        options: Some(MethodOptions {
            http: Some(rule),
            ..Default::default()
        }),
        ..method(name, input, output)
    }
}

fn get_rule(path: &str) -> HttpRule {
    HttpRule {
        get: path.to_string(),
        ..Default::default()
    }
}

fn service(name: &str, methods: Vec<MethodDescriptorProto>) -> ServiceDescriptorProto {
    ServiceDescriptorProto {
        name: Some(name.to_string()),
        method: methods,
        ..Default::default()
    }
}

fn file(
    name: &str,
    package: &str,
    messages: Vec<DescriptorProto>,
    services: Vec<ServiceDescriptorProto>,
) -> FileDescriptorProto {
    FileDescriptorProto {
        name: Some(name.to_string()),
        package: Some(package.to_string()),
        message_type: messages,
        service: services,
        syntax: Some("proto3".to_string()),
        ..Default::default()
    }
}

/// Render a set with the given config and parse the single output.
fn render_with(config: Config, set: &FileDescriptorSet) -> Value {
    let outputs = generate(config, set, &[]).expect("generation succeeds");
    assert_eq!(outputs.len(), 1, "expected a single output document");
    serde_json::from_str(&outputs[0].contents).expect("output is valid JSON")
}

fn render(set: &FileDescriptorSet) -> Value {
    render_with(Config::default(), set)
}

fn greeter_set() -> FileDescriptorSet {
    FileDescriptorSet {
        file: vec![file(
            "example/greeter.proto",
            "example",
            vec![
                message("HelloReq", vec![scalar_field("name", 1, Type::String)]),
                message("HelloReply", vec![scalar_field("message", 1, Type::String)]),
            ],
            vec![service(
                "Greeter",
                vec![method("SayHello", ".example.HelloReq", ".example.HelloReply")],
            )],
        )],
    }
}

#[test]
fn test_default_binding() {
    let doc = render(&greeter_set());

    let op = &doc["paths"]["/example.Greeter/SayHello"]["post"];
    assert_eq!(op["operationId"], "Greeter_SayHello");
    assert_eq!(op["tags"], json!(["Greeter"]));
    assert_eq!(
        op["parameters"],
        json!([{
            "name": "body",
            "in": "body",
            "required": true,
            "schema": { "$ref": "#/definitions/HelloReq" }
        }])
    );
    assert_eq!(
        op["responses"]["200"]["schema"],
        json!({ "$ref": "#/definitions/HelloReply" })
    );
    assert!(doc["definitions"]["HelloReq"].is_object());
    assert!(doc["definitions"]["HelloReply"].is_object());
}

#[test]
fn test_document_defaults() {
    let doc = render(&greeter_set());
    assert_eq!(doc["swagger"], "2.0");
    assert_eq!(doc["consumes"], json!(["application/json"]));
    assert_eq!(doc["produces"], json!(["application/json"]));
    assert_eq!(doc["info"]["title"], "example/greeter.proto");
    assert_eq!(doc["info"]["version"], "version not set");
    assert_eq!(doc["tags"], json!([{ "name": "Greeter" }]));
}

#[test]
fn test_output_file_name() {
    let outputs = generate(Config::default(), &greeter_set(), &[]).unwrap();
    assert_eq!(outputs[0].name, "example/greeter.swagger.json");
}

#[test]
fn test_rerun_is_byte_identical() {
    let first = generate(Config::default(), &greeter_set(), &[]).unwrap();
    let second = generate(Config::default(), &greeter_set(), &[]).unwrap();
    assert_eq!(first, second);
}

fn user_lookup_set() -> FileDescriptorSet {
    FileDescriptorSet {
        file: vec![file(
            "users.proto",
            "example",
            vec![
                message("User", vec![scalar_field("id", 1, Type::String)]),
                message(
                    "LookupRequest",
                    vec![
                        message_field("user", 1, ".example.User"),
                        scalar_field("filter", 2, Type::String),
                    ],
                ),
                message("LookupReply", vec![scalar_field("ok", 1, Type::Bool)]),
            ],
            vec![service(
                "Users",
                vec![method_with_rule(
                    "Lookup",
                    ".example.LookupRequest",
                    ".example.LookupReply",
                    get_rule("/v1/users/{user.id}"),
                )],
            )],
        )],
    }
}

#[test]
fn test_path_and_query_parameters() {
    let doc = render(&user_lookup_set());

    let op = &doc["paths"]["/v1/users/{user.id}"]["get"];
    let params = op["parameters"].as_array().expect("parameters");
    assert_eq!(params.len(), 2);
    assert_eq!(
        params[0],
        json!({
            "name": "user.id",
            "in": "path",
            "required": true,
            "type": "string"
        })
    );
    assert_eq!(
        params[1],
        json!({
            "name": "filter",
            "in": "query",
            "required": false,
            "type": "string"
        })
    );
}

#[test]
fn test_every_template_variable_is_a_path_parameter() {
    let doc = render(&user_lookup_set());
    for (path, item) in doc["paths"].as_object().expect("paths") {
        let mut rest = path.as_str();
        let mut variables = Vec::new();
        while let Some(start) = rest.find('{') {
            let end = rest[start..].find('}').expect("balanced braces") + start;
            let inner = &rest[start + 1..end];
            variables.push(inner.split('=').next().unwrap().to_string());
            rest = &rest[end + 1..];
        }
        for op in item.as_object().unwrap().values() {
            for var in &variables {
                let found = op["parameters"]
                    .as_array()
                    .map(|params| {
                        params
                            .iter()
                            .any(|p| p["in"] == "path" && p["name"] == var.as_str())
                    })
                    .unwrap_or(false);
                assert!(found, "no path parameter for {{{var}}} in {path}");
            }
        }
    }
}

#[test]
fn test_resource_name_preserved() {
    let set = FileDescriptorSet {
        file: vec![file(
            "items.proto",
            "example",
            vec![
                message(
                    "ListRequest",
                    vec![scalar_field("parent", 1, Type::String)],
                ),
                message("ListReply", vec![scalar_field("ok", 1, Type::Bool)]),
            ],
            vec![service(
                "Items",
                vec![method_with_rule(
                    "List",
                    ".example.ListRequest",
                    ".example.ListReply",
                    get_rule("/v1/{parent=projects/*}/items"),
                )],
            )],
        )],
    };
    let doc = render(&set);

    let op = &doc["paths"]["/v1/{parent=projects/*}/items"]["get"];
    assert!(op.is_object(), "resource-name path is preserved verbatim");
    assert_eq!(op["parameters"][0]["name"], "parent");
    assert_eq!(op["parameters"][0]["in"], "path");
}

#[test]
fn test_repeated_path_parameter() {
    let mut ids = scalar_field("ids", 1, Type::String);
    ids.label = Some(Label::Repeated as i32);
    let set = FileDescriptorSet {
        file: vec![file(
            "items.proto",
            "example",
            vec![
                message("FetchRequest", vec![ids]),
                message("FetchReply", vec![scalar_field("ok", 1, Type::Bool)]),
            ],
            vec![service(
                "Items",
                vec![method_with_rule(
                    "Fetch",
                    ".example.FetchRequest",
                    ".example.FetchReply",
                    get_rule("/v1/items/{ids}"),
                )],
            )],
        )],
    };
    let doc = render(&set);

    assert_eq!(
        doc["paths"]["/v1/items/{ids}"]["get"]["parameters"][0],
        json!({
            "name": "ids",
            "in": "path",
            "required": true,
            "type": "array",
            "items": { "type": "string" },
            "collectionFormat": "csv",
            "minItems": 1
        })
    );
}

fn timestamp_file() -> FileDescriptorProto {
    file(
        "google/protobuf/timestamp.proto",
        "google.protobuf",
        vec![message(
            "Timestamp",
            vec![
                scalar_field("seconds", 1, Type::Int64),
                scalar_field("nanos", 2, Type::Int32),
            ],
        )],
        vec![],
    )
}

#[test]
fn test_well_known_type_inlined() {
    let set = FileDescriptorSet {
        file: vec![
            timestamp_file(),
            file(
                "events.proto",
                "example",
                vec![
                    message(
                        "Event",
                        vec![
                            scalar_field("id", 1, Type::String),
                            message_field("created", 2, ".google.protobuf.Timestamp"),
                        ],
                    ),
                    message("EventReply", vec![scalar_field("ok", 1, Type::Bool)]),
                ],
                vec![service(
                    "Events",
                    vec![method("Create", ".example.Event", ".example.EventReply")],
                )],
            ),
        ],
    };
    let doc = render(&set);

    assert_eq!(
        doc["definitions"]["Event"]["properties"]["created"],
        json!({ "type": "string", "format": "date-time" })
    );
    assert!(
        doc["definitions"].get("Timestamp").is_none(),
        "well-known types never become definitions"
    );
}

#[test]
fn test_recursive_query_type_rejected() {
    let set = FileDescriptorSet {
        file: vec![file(
            "loop.proto",
            "example",
            vec![
                message(
                    "A",
                    vec![
                        message_field("child", 1, ".example.A"),
                        scalar_field("s", 2, Type::String),
                    ],
                ),
                message("Reply", vec![scalar_field("ok", 1, Type::Bool)]),
            ],
            vec![service(
                "Loops",
                vec![method_with_rule(
                    "Get",
                    ".example.A",
                    ".example.Reply",
                    get_rule("/v1/loop"),
                )],
            )],
        )],
    };
    let err = generate(Config::default(), &set, &[]).unwrap_err();
    assert!(matches!(err, Error::RecursiveQueryType(_)), "got {err:?}");
}

#[test]
fn test_message_path_parameter_rejected() {
    let set = FileDescriptorSet {
        file: vec![file(
            "users.proto",
            "example",
            vec![
                message("User", vec![scalar_field("id", 1, Type::String)]),
                message("Request", vec![message_field("user", 1, ".example.User")]),
                message("Reply", vec![scalar_field("ok", 1, Type::Bool)]),
            ],
            vec![service(
                "Users",
                vec![method_with_rule(
                    "Get",
                    ".example.Request",
                    ".example.Reply",
                    get_rule("/v1/{user}"),
                )],
            )],
        )],
    };
    let err = generate(Config::default(), &set, &[]).unwrap_err();
    assert!(matches!(err, Error::UnsupportedPathParam(_)), "got {err:?}");
}

#[test]
fn test_unknown_type_rejected() {
    let set = FileDescriptorSet {
        file: vec![file(
            "bad.proto",
            "example",
            vec![message(
                "Holder",
                vec![message_field("other", 1, ".example.Missing")],
            )],
            vec![],
        )],
    };
    let err = generate(Config::default(), &set, &[]).unwrap_err();
    assert!(matches!(err, Error::UnknownType(_)), "got {err:?}");
}

#[test]
fn test_enum_rendering_and_enums_as_ints() {
    let color = EnumDescriptorProto {
        name: Some("Color".to_string()),
        value: vec![
            EnumValueDescriptorProto {
                name: Some("RED".to_string()),
                number: Some(0),
            },
            EnumValueDescriptorProto {
                name: Some("BLUE".to_string()),
                number: Some(1),
            },
        ],
    };
    let mut color_field = scalar_field("color", 1, Type::Enum);
    color_field.r#type = Some(Type::Enum as i32);
    color_field.type_name = Some(".example.Color".to_string());
    let mut fd = file(
        "colors.proto",
        "example",
        vec![
            message("Paint", vec![color_field]),
            message("PaintReply", vec![scalar_field("ok", 1, Type::Bool)]),
        ],
        vec![service(
            "Painter",
            vec![method_with_rule(
                "Paint",
                ".example.Paint",
                ".example.PaintReply",
                get_rule("/v1/paint"),
            )],
        )],
    );
    fd.enum_type = vec![color];
    let set = FileDescriptorSet { file: vec![fd] };

    let doc = render(&set);
    assert_eq!(
        doc["paths"]["/v1/paint"]["get"]["parameters"][0],
        json!({
            "name": "color",
            "in": "query",
            "required": false,
            "type": "string",
            "enum": ["RED", "BLUE"],
            "default": "RED"
        })
    );

    let doc = render_with(
        Config {
            enums_as_ints: true,
            ..Default::default()
        },
        &set,
    );
    assert_eq!(
        doc["paths"]["/v1/paint"]["get"]["parameters"][0],
        json!({
            "name": "color",
            "in": "query",
            "required": false,
            "type": "integer",
            "enum": ["0", "1"],
            "default": "0"
        })
    );
}

#[test]
fn test_field_behavior_required_and_output_only() {
    use swagger_gen::pb::descriptor::FieldOptions;

    let mut name = scalar_field("display_name", 1, Type::String);
    name.options = Some(FieldOptions {
        field_behavior: vec![2], // REQUIRED
        ..Default::default()
    });
    let mut etag = scalar_field("etag", 2, Type::String);
    etag.options = Some(FieldOptions {
        field_behavior: vec![3], // OUTPUT_ONLY
        ..Default::default()
    });
    let set = FileDescriptorSet {
        file: vec![file(
            "books.proto",
            "example",
            vec![
                message("Book", vec![name, etag]),
                message("BookReply", vec![scalar_field("ok", 1, Type::Bool)]),
            ],
            vec![service(
                "Books",
                vec![method("Create", ".example.Book", ".example.BookReply")],
            )],
        )],
    };
    let doc = render(&set);

    let book = &doc["definitions"]["Book"];
    assert_eq!(book["required"], json!(["display_name"]));
    assert_eq!(book["properties"]["etag"]["readOnly"], json!(true));
    // Invariant: required entries are property keys.
    for required in book["required"].as_array().unwrap() {
        assert!(book["properties"]
            .as_object()
            .unwrap()
            .contains_key(required.as_str().unwrap()));
    }
}

#[test]
fn test_json_names_for_fields() {
    let set = FileDescriptorSet {
        file: vec![file(
            "users.proto",
            "example",
            vec![
                message(
                    "UserRequest",
                    vec![
                        scalar_field("user_id", 1, Type::String),
                        scalar_field("page_size", 2, Type::Int32),
                    ],
                ),
                message("UserReply", vec![scalar_field("ok", 1, Type::Bool)]),
            ],
            vec![service(
                "Users",
                vec![method_with_rule(
                    "Get",
                    ".example.UserRequest",
                    ".example.UserReply",
                    get_rule("/v1/users/{user_id}"),
                )],
            )],
        )],
    };
    let doc = render_with(
        Config {
            use_json_names_for_fields: true,
            ..Default::default()
        },
        &set,
    );

    let op = &doc["paths"]["/v1/users/{userId}"]["get"];
    assert_eq!(op["parameters"][0]["name"], "userId");
    assert_eq!(op["parameters"][1]["name"], "pageSize");
}

#[test]
fn test_json_names_in_definitions() {
    let set = FileDescriptorSet {
        file: vec![file(
            "users.proto",
            "example",
            vec![
                message(
                    "CreateUser",
                    vec![scalar_field("display_name", 1, Type::String)],
                ),
                message("UserReply", vec![scalar_field("ok", 1, Type::Bool)]),
            ],
            vec![service(
                "Users",
                vec![method("Create", ".example.CreateUser", ".example.UserReply")],
            )],
        )],
    };
    let doc = render_with(
        Config {
            use_json_names_for_fields: true,
            ..Default::default()
        },
        &set,
    );
    assert!(doc["definitions"]["CreateUser"]["properties"]
        .as_object()
        .unwrap()
        .contains_key("displayName"));
}

#[test]
fn test_additional_bindings_suffix_operation_ids() {
    let rule = HttpRule {
        post: "/v1/things".to_string(),
        body: "*".to_string(),
        additional_bindings: vec![HttpRule {
            get: "/v1/things/{id}".to_string(),
            ..Default::default()
        }],
        ..Default::default()
    };
    let set = FileDescriptorSet {
        file: vec![file(
            "things.proto",
            "example",
            vec![
                message("Thing", vec![scalar_field("id", 1, Type::String)]),
                message("ThingReply", vec![scalar_field("ok", 1, Type::Bool)]),
            ],
            vec![service(
                "Things",
                vec![method_with_rule(
                    "Put",
                    ".example.Thing",
                    ".example.ThingReply",
                    rule,
                )],
            )],
        )],
    };
    let doc = render(&set);

    assert_eq!(
        doc["paths"]["/v1/things"]["post"]["operationId"],
        "Things_Put"
    );
    assert_eq!(
        doc["paths"]["/v1/things/{id}"]["get"]["operationId"],
        "Things_Put2"
    );

    // operationIds stay unique across the document.
    let mut seen = std::collections::HashSet::new();
    for item in doc["paths"].as_object().unwrap().values() {
        for op in item.as_object().unwrap().values() {
            assert!(seen.insert(op["operationId"].as_str().unwrap().to_string()));
        }
    }
}

#[test]
fn test_default_error_response_uses_rpc_status() {
    let status_file = file(
        "google/rpc/status.proto",
        "google.rpc",
        vec![message(
            "Status",
            vec![
                scalar_field("code", 1, Type::Int32),
                scalar_field("message", 2, Type::String),
            ],
        )],
        vec![],
    );
    let mut set = greeter_set();
    set.file.insert(0, status_file);

    let doc = render(&set);
    let op = &doc["paths"]["/example.Greeter/SayHello"]["post"];
    assert_eq!(
        op["responses"]["default"]["schema"],
        json!({ "$ref": "#/definitions/Status" })
    );
    assert_eq!(
        op["responses"]["default"]["description"],
        "An unexpected error response."
    );
    assert!(doc["definitions"]["Status"].is_object());

    let doc = render_with(
        Config {
            disable_default_errors: true,
            ..Default::default()
        },
        &set,
    );
    assert!(doc["paths"]["/example.Greeter/SayHello"]["post"]["responses"]
        .get("default")
        .is_none());
}

#[test]
fn test_server_streaming_wraps_response() {
    let mut set = greeter_set();
    set.file[0].service[0].method[0].server_streaming = Some(true);
    let doc = render(&set);

    let schema = &doc["paths"]["/example.Greeter/SayHello"]["post"]["responses"]["200"]["schema"];
    assert_eq!(schema["type"], "object");
    assert_eq!(schema["title"], "Stream result of HelloReply");
    assert_eq!(
        schema["properties"]["result"],
        json!({ "$ref": "#/definitions/HelloReply" })
    );
}

#[test]
fn test_client_streaming_annotates_body() {
    let mut set = greeter_set();
    set.file[0].service[0].method[0].client_streaming = Some(true);
    let doc = render(&set);

    let body = &doc["paths"]["/example.Greeter/SayHello"]["post"]["parameters"][0];
    assert_eq!(body["description"], " (streaming inputs)");
}

#[test]
fn test_delete_body_needs_flag() {
    let rule = HttpRule {
        delete: "/v1/things/{id}".to_string(),
        body: "*".to_string(),
        ..Default::default()
    };
    let set = FileDescriptorSet {
        file: vec![file(
            "things.proto",
            "example",
            vec![
                message("Thing", vec![scalar_field("id", 1, Type::String)]),
                message("ThingReply", vec![scalar_field("ok", 1, Type::Bool)]),
            ],
            vec![service(
                "Things",
                vec![method_with_rule(
                    "Remove",
                    ".example.Thing",
                    ".example.ThingReply",
                    rule,
                )],
            )],
        )],
    };

    let err = generate(Config::default(), &set, &[]).unwrap_err();
    assert!(matches!(err, Error::InvalidHttpRule(_)), "got {err:?}");

    let doc = render_with(
        Config {
            allow_delete_body: true,
            ..Default::default()
        },
        &set,
    );
    assert!(doc["paths"]["/v1/things/{id}"]["delete"].is_object());
}

#[test]
fn test_map_field_renders_additional_properties() {
    let mut entry = message(
        "LabelsEntry",
        vec![
            scalar_field("key", 1, Type::String),
            scalar_field("value", 2, Type::Int32),
        ],
    );
    entry.options = Some(swagger_gen::pb::descriptor::MessageOptions {
        map_entry: Some(true),
        ..Default::default()
    });
    let mut labels = message_field("labels", 1, ".example.Item.LabelsEntry");
    labels.label = Some(Label::Repeated as i32);
    let mut item = message("Item", vec![labels]);
    item.nested_type = vec![entry];

    let set = FileDescriptorSet {
        file: vec![file(
            "items.proto",
            "example",
            vec![
                item,
                message("ItemReply", vec![scalar_field("ok", 1, Type::Bool)]),
            ],
            vec![service(
                "Items",
                vec![method("Create", ".example.Item", ".example.ItemReply")],
            )],
        )],
    };
    let doc = render(&set);

    assert_eq!(
        doc["definitions"]["Item"]["properties"]["labels"],
        json!({
            "type": "object",
            "additionalProperties": { "type": "integer", "format": "int32" }
        })
    );
    assert!(
        doc["definitions"].get("ItemLabelsEntry").is_none(),
        "map entries are not rendered as definitions"
    );
}

#[test]
fn test_allow_merge_unions_documents() {
    let mut set = greeter_set();
    set.file.push(file(
        "other.proto",
        "other",
        vec![
            message("Ping", vec![scalar_field("x", 1, Type::String)]),
            message("Pong", vec![scalar_field("y", 1, Type::String)]),
        ],
        vec![service(
            "Pinger",
            vec![method("Ping", ".other.Ping", ".other.Pong")],
        )],
    ));

    let outputs = generate(
        Config {
            allow_merge: true,
            merge_file_name: "combined".to_string(),
            ..Default::default()
        },
        &set,
        &[],
    )
    .unwrap();
    assert_eq!(outputs.len(), 1);
    assert_eq!(outputs[0].name, "combined.swagger.json");

    let doc: Value = serde_json::from_str(&outputs[0].contents).unwrap();
    assert!(doc["paths"]["/example.Greeter/SayHello"].is_object());
    assert!(doc["paths"]["/other.Pinger/Ping"].is_object());
    assert!(doc["definitions"]["HelloReq"].is_object());
    assert!(doc["definitions"]["Ping"].is_object());
    assert_eq!(doc["info"]["title"], "combined");
}

#[test]
fn test_namespace_prefixes_paths() {
    let doc = render_with(
        Config {
            namespace: "api".to_string(),
            ..Default::default()
        },
        &user_lookup_set(),
    );
    assert!(doc["paths"]["/api/v1/users/{user.id}"].is_object());
}

#[test]
fn test_comments_flow_into_summary_and_description() {
    use swagger_gen::pb::descriptor::source_code_info::Location;
    use swagger_gen::pb::descriptor::SourceCodeInfo;

    let mut set = greeter_set();
    set.file[0].source_code_info = Some(SourceCodeInfo {
        location: vec![Location {
            path: vec![6, 0, 2, 0],
            span: vec![],
            leading_comments: Some(" Sends a greeting.\n\n More detail here.\n".to_string()),
            trailing_comments: None,
            leading_detached_comments: vec![],
        }],
    });
    let doc = render(&set);

    let op = &doc["paths"]["/example.Greeter/SayHello"]["post"];
    assert_eq!(op["summary"], "Sends a greeting.");
    assert_eq!(op["description"], "More detail here.");
}

#[test]
fn test_unbound_methods_skipped_when_disabled() {
    let doc = render_with(
        Config {
            generate_unbound_methods: false,
            ..Default::default()
        },
        &greeter_set(),
    );
    assert!(doc["paths"].as_object().unwrap().is_empty());
}

#[test]
fn test_use_fqn_for_openapi_name() {
    let doc = render_with(
        Config {
            use_fqn_for_openapi_name: true,
            ..Default::default()
        },
        &greeter_set(),
    );
    assert!(doc["definitions"]["example.HelloReq"].is_object());
    let op = &doc["paths"]["/example.Greeter/SayHello"]["post"];
    assert_eq!(
        op["parameters"][0]["schema"],
        json!({ "$ref": "#/definitions/example.HelloReq" })
    );
}
