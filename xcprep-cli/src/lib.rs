//! xcprep CLI: build-time Xcode project patching and asset embedding.

use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};

use xcprep_core::archive::append_archive;
use xcprep_core::output::{write_json_pretty, write_ndjson};
use xcprep_core::patch::{patch_tree, PatchOptions, PatchedBundle};
use xcprep_core::shader::convert_shader;

/// CLI entrypoint for xcprep.
#[derive(Debug, Parser)]
#[command(
    name = "xcprep",
    about = "Patch generated Xcode projects and embed build assets"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Patch every project bundle under a root directory
    Patch(PatchArgs),
    /// Append a file to an asset archive and print its offset declaration
    AppendArchive(AppendArchiveArgs),
    /// Convert shader source into a C string literal on stdout
    ConvertShader(ConvertShaderArgs),
}

#[derive(Debug, Args)]
struct PatchArgs {
    /// Directory to search for project bundles
    #[arg(value_hint = ValueHint::DirPath)]
    root: PathBuf,

    /// Bundle names that should receive a shared executable scheme
    executables: Vec<String>,

    /// Operator identity for the per-user scheme path (defaults to $USER)
    #[arg(long = "user", value_hint = ValueHint::Other)]
    user: Option<String>,

    /// Repository root substituted into executable schemes (defaults to the
    /// current directory)
    #[arg(long = "repo-root", value_hint = ValueHint::DirPath)]
    repo_root: Option<PathBuf>,

    /// Emit the patch report as a single JSON array
    #[arg(long = "json", action = ArgAction::SetTrue, conflicts_with = "ndjson")]
    json: bool,

    /// Emit the patch report as newline-delimited JSON
    #[arg(long = "ndjson", action = ArgAction::SetTrue)]
    ndjson: bool,
}

#[derive(Debug, Args)]
struct AppendArchiveArgs {
    /// Archive file to grow (created if absent)
    #[arg(value_hint = ValueHint::FilePath)]
    archive: PathBuf,

    /// File whose bytes are appended
    #[arg(value_hint = ValueHint::FilePath)]
    file: PathBuf,
}

#[derive(Debug, Args)]
struct ConvertShaderArgs {
    /// Shader source file to convert
    #[arg(value_hint = ValueHint::FilePath)]
    file: PathBuf,

    /// Variable name for the generated string literal
    name: String,
}

/// Parse CLI args and execute the selected command.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Patch(args) => run_patch(args),
        Command::AppendArchive(args) => run_append_archive(args),
        Command::ConvertShader(args) => run_convert_shader(args),
    }
}

fn run_patch(args: PatchArgs) -> Result<()> {
    let opts = build_options(&args)?;
    let report = patch_tree(&args.root, &opts)?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    if args.ndjson {
        write_ndjson(&report, &mut handle)?;
    } else if args.json {
        write_json_pretty(&report, &mut handle)?;
    } else {
        write_plain(&report, &mut handle)?;
    }

    Ok(())
}

fn run_append_archive(args: AppendArchiveArgs) -> Result<()> {
    let entry = append_archive(&args.archive, &args.file)?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{}", entry.declaration())?;
    Ok(())
}

fn run_convert_shader(args: ConvertShaderArgs) -> Result<()> {
    let source = fs::read_to_string(&args.file)
        .with_context(|| format!("reading shader {}", args.file.display()))?;
    let rendered = convert_shader(&source, &args.name);

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    handle.write_all(rendered.as_bytes())?;
    Ok(())
}

fn build_options(args: &PatchArgs) -> Result<PatchOptions> {
    let user = resolve_user(args.user.clone())?;
    let repo_root = match &args.repo_root {
        Some(root) => root.clone(),
        None => env::current_dir().context("resolving current directory")?,
    };

    Ok(PatchOptions {
        user,
        repo_root,
        executables: args.executables.iter().cloned().collect(),
    })
}

/// Resolve the operator identity once, at the boundary. The core never reads
/// the environment.
fn resolve_user(explicit: Option<String>) -> Result<String> {
    if let Some(user) = explicit {
        return Ok(user);
    }

    env::var("USER")
        .or_else(|_| env::var("USERNAME"))
        .map_err(|_| anyhow!("cannot determine user; pass --user"))
}

fn write_plain(report: &[PatchedBundle], mut w: impl Write) -> Result<()> {
    for entry in report {
        writeln!(w, "{}", entry.path.display())?;
    }
    Ok(())
}
