// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use sol_nodegen::codegen::{NodeTypeJob, StubJob};
use sol_nodegen::config::consts::{DEFAULT_CONTEXT_LINES, DEFAULT_SCHEMA_MAX_DEPTH};
use sol_nodegen::config::{load_and_validate_config, JobMap, RuntimeBuilder};
use sol_nodegen::descriptor::{DescriptorLoader, ValidateJob};
use sol_nodegen::engine::{BatchExecutor, BatchReport, JobOutcome};
use sol_nodegen::errors::{ConfigError, ExecutionError, FailureStrategy};
use sol_nodegen::oic::OicJob;

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

/// Options shared by every command that reads node-type descriptions.
#[derive(Args)]
struct LoaderArgs {
    /// Prefix to use in generated C symbols
    #[arg(long)]
    prefix: Option<String>,
    /// Source lines shown around a syntax error
    #[arg(long, default_value_t = DEFAULT_CONTEXT_LINES)]
    context_lines: usize,
    /// Nesting shown when dumping a violated schema rule, 0 hides it, -1 for unlimited
    #[arg(long, default_value_t = DEFAULT_SCHEMA_MAX_DEPTH, allow_negative_numbers = true)]
    schema_max_depth: i32,
}

impl LoaderArgs {
    fn loader(&self) -> DescriptorLoader {
        DescriptorLoader::new(self.prefix.as_deref())
            .with_context_lines(self.context_lines)
            .with_schema_max_depth(self.schema_max_depth)
    }
}

#[derive(Subcommand)]
enum Command {
    /// Generate the C header and source for a description
    Gen {
        #[command(flatten)]
        loader: LoaderArgs,
        input: PathBuf,
        output_header: PathBuf,
        output_code: PathBuf,
    },
    /// Check descriptions without writing anything
    Validate {
        #[command(flatten)]
        loader: LoaderArgs,
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },
    /// Write an implementation skeleton for one or more descriptions
    Stub {
        #[command(flatten)]
        loader: LoaderArgs,
        /// Directory prefix of the included headers, e.g. sol-flow
        #[arg(long)]
        namespace: Option<String>,
        /// Replace an existing stub file
        #[arg(long)]
        force: bool,
        output_stub: PathBuf,
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },
    /// Translate OIC resource schemas into node types and C glue
    Oic {
        /// Directory holding the JSON schemas
        #[arg(long = "schema-dir", required = true)]
        schema_dirs: Vec<PathBuf>,
        /// Where to store the master node-type JSON
        #[arg(long)]
        node_type_json: PathBuf,
        /// Where to store the node-type implementation
        #[arg(long)]
        node_type_impl: PathBuf,
        /// Generated source the implementation includes
        #[arg(long, default_value = "oic-gen.c")]
        gen_c: String,
        /// Generated header the implementation includes
        #[arg(long, default_value = "oic-gen.h")]
        gen_h: String,
    },
    /// Run every job of a YAML batch file
    Batch { config: PathBuf },
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    match run(Cli::parse()).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("sol-nodegen: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Run the command; `Ok(false)` means a job failed and was already reported.
async fn run(cli: Cli) -> anyhow::Result<bool> {
    let mut jobs = JobMap::new();
    let (executor, failure_strategy, summarize) = match cli.command {
        Command::Gen {
            loader,
            input,
            output_header,
            output_code,
        } => {
            let id = input.display().to_string();
            jobs.insert(
                id,
                Arc::new(NodeTypeJob::new(input, output_header, output_code, loader.loader())),
            );
            (BatchExecutor::new(1), FailureStrategy::FailFast, false)
        }
        Command::Validate { loader, inputs } => {
            let loader = loader.loader();
            let count = inputs.len();
            for input in inputs {
                let id = input.display().to_string();
                jobs.insert(id, Arc::new(ValidateJob::new(input, loader.clone())));
            }
            (BatchExecutor::new(count), FailureStrategy::ContinueOnError, false)
        }
        Command::Stub {
            loader,
            namespace,
            force,
            output_stub,
            inputs,
        } => {
            let id = output_stub.display().to_string();
            jobs.insert(
                id,
                Arc::new(StubJob {
                    inputs,
                    output: output_stub,
                    namespace,
                    force,
                    loader: loader.loader(),
                }),
            );
            (BatchExecutor::new(1), FailureStrategy::FailFast, false)
        }
        Command::Oic {
            schema_dirs,
            node_type_json,
            node_type_impl,
            gen_c,
            gen_h,
        } => {
            jobs.insert(
                "oic",
                Arc::new(OicJob {
                    schema_dirs,
                    node_type_json,
                    node_type_impl,
                    gen_c,
                    gen_h,
                }),
            );
            (BatchExecutor::new(1), FailureStrategy::FailFast, false)
        }
        Command::Batch { config } => {
            let cfg = match load_and_validate_config(&config) {
                Err(ConfigError::Invalid(problems)) => {
                    for problem in &problems {
                        eprintln!("{}: error: {}", config.display(), problem);
                    }
                    return Ok(false);
                }
                other => other.with_context(|| format!("cannot load {}", config.display()))?,
            };
            let (batch_jobs, executor, failure_strategy) = RuntimeBuilder::from_config(&cfg)?;
            jobs = batch_jobs;
            (executor, failure_strategy, true)
        }
    };

    let report = executor.run(&jobs, failure_strategy).await;
    print_report(&report, summarize);
    Ok(report.success())
}

/// Diagnostics and notes go to stderr so generated output can be piped.
fn print_report(report: &BatchReport, summarize: bool) {
    for result in &report.results {
        match &result.outcome {
            JobOutcome::Succeeded(generated) => {
                for note in &generated.notes {
                    if summarize {
                        eprintln!("{}: note: {}", result.job_id, note);
                    } else {
                        eprintln!("note: {}", note);
                    }
                }
                if summarize {
                    eprintln!(
                        "ok      {} ({}): {} artifact(s)",
                        result.job_id,
                        result.job_kind,
                        generated.artifacts.len()
                    );
                }
            }
            JobOutcome::Failed(ExecutionError::JobFailed { source, .. }) => {
                for line in source.report() {
                    eprintln!("{}", line);
                }
                if summarize {
                    eprintln!("FAILED  {} ({})", result.job_id, result.job_kind);
                }
            }
            JobOutcome::Failed(other) => eprintln!("{}", other),
            JobOutcome::Skipped => {
                if summarize {
                    eprintln!("skipped {} ({})", result.job_id, result.job_kind);
                }
            }
        }
    }

    if summarize {
        eprintln!(
            "{} succeeded, {} failed, {} skipped in {:?}",
            report.succeeded_count(),
            report.failed_count(),
            report.skipped_count(),
            report.duration
        );
    }
}
