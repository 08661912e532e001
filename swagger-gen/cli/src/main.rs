// SPDX-FileCopyrightText: © 2025 Phala Network <dstack@phala.network>
//
// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fs_err as fs;
use prost::Message as _;
use swagger_gen::{pb::FileDescriptorSet, Config, Separator};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate Swagger 2.0 JSON from a descriptor set
    Gen(GenArgs),
}

type Bool = bool;

#[derive(Parser)]
struct GenArgs {
    /// Path to the compiled descriptor set (protoc --descriptor_set_out)
    descriptor_set: PathBuf,

    /// Directory to write the generated documents to
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Restrict generation to these proto file names (repeatable)
    #[arg(long = "file")]
    files: Vec<String>,

    /// Use JSON names for fields in property keys, parameters and paths
    #[arg(long, default_value = "false")]
    use_json_names_for_fields: Bool,

    /// Allow DELETE methods to carry a request body
    #[arg(long, default_value = "false")]
    allow_delete_body: Bool,

    /// Merge all generated documents into a single file
    #[arg(long, default_value = "false")]
    allow_merge: Bool,

    /// Base name of the merged output file
    #[arg(long, default_value = "apidocs")]
    merge_file_name: String,

    /// Use the fully-qualified proto name as the definitions key
    #[arg(long, default_value = "false")]
    use_fqn_for_openapi_name: Bool,

    /// Prefix operation tags with the proto package
    #[arg(long, default_value = "false")]
    include_package_in_tags: Bool,

    /// Run proto comments through the comment template pass
    #[arg(long, default_value = "false")]
    use_go_templates: Bool,

    /// Do not emit the "default" error response on operations
    #[arg(long, default_value = "false")]
    disable_default_errors: Bool,

    /// Render enums as integers instead of value-name strings
    #[arg(long, default_value = "false")]
    enums_as_ints: Bool,

    /// Use the bare method name as the operationId
    #[arg(long, default_value = "false")]
    simple_operation_ids: Bool,

    /// Allow repeated fields in request body field paths
    #[arg(long, default_value = "false")]
    allow_repeated_fields_in_body: Bool,

    /// Synthesize default POST bindings for methods without annotations
    #[arg(long, default_value = "true")]
    generate_unbound_methods: Bool,

    /// collectionFormat for repeated path parameters (csv|ssv|tsv|pipes)
    #[arg(long, default_value = "csv")]
    repeated_path_param_separator: Separator,

    /// Prefix prepended to every emitted path
    #[arg(long, default_value = "")]
    namespace: String,
}

impl GenArgs {
    fn config(&self) -> Config {
        Config {
            use_json_names_for_fields: self.use_json_names_for_fields,
            allow_delete_body: self.allow_delete_body,
            allow_merge: self.allow_merge,
            merge_file_name: self.merge_file_name.clone(),
            use_fqn_for_openapi_name: self.use_fqn_for_openapi_name,
            include_package_in_tags: self.include_package_in_tags,
            use_go_templates: self.use_go_templates,
            disable_default_errors: self.disable_default_errors,
            enums_as_ints: self.enums_as_ints,
            simple_operation_ids: self.simple_operation_ids,
            allow_repeated_fields_in_body: self.allow_repeated_fields_in_body,
            generate_unbound_methods: self.generate_unbound_methods,
            repeated_path_param_separator: self.repeated_path_param_separator,
            namespace: self.namespace.clone(),
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match &cli.command {
        Commands::Gen(args) => {
            let bytes = fs::read(&args.descriptor_set).context("Failed to read descriptor set")?;
            let set = FileDescriptorSet::decode(bytes.as_slice())
                .context("Failed to decode descriptor set")?;

            let outputs = swagger_gen::generate(args.config(), &set, &args.files)
                .context("Failed to render OpenAPI documents")?;
            if outputs.is_empty() {
                tracing::warn!("no services found in the descriptor set, nothing to generate");
            }

            for output in outputs {
                let path = args.output_dir.join(&output.name);
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent).context("Failed to create output directory")?;
                }
                fs::write(&path, output.contents.as_bytes())
                    .context("Failed to write output file")?;
                println!("{}", path.display());
            }
        }
    }

    Ok(())
}
