use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use infoset::{
    Config, ContentItem, ContentPartDefinition, ContentTypeDefinition, Document, FieldStorage,
    InfosetFieldStorage, InfosetStorageProvider, VersionRecord,
};

#[derive(Debug, Parser)]
#[command(
    name = "infoset",
    version,
    about = "Read and write field values stored in infoset data files"
)]
struct Cli {
    /// Maximum element nesting depth (0 means unlimited)
    #[arg(long, global = true)]
    max_depth: Option<u16>,
    /// Maximum data size in bytes (0 means unlimited)
    #[arg(long, global = true)]
    max_size: Option<usize>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print a field value; exits with status 1 when it is unset
    Get(FieldArgs),
    /// Set a field value; omit VALUE to clear it
    Set {
        #[command(flatten)]
        field: FieldArgs,
        /// New value
        #[arg(value_name = "VALUE")]
        value: Option<String>,
    },
    /// Print the canonical form of a data file
    Fmt {
        /// Existing data file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

#[derive(Debug, Args)]
struct FieldArgs {
    /// Data file; a missing file is empty data
    #[arg(value_name = "FILE")]
    file: PathBuf,
    /// Part name
    #[arg(short, long)]
    part: String,
    /// Field name
    #[arg(short, long)]
    field: String,
    /// Named value; omit for the field's own value
    #[arg(short, long)]
    name: Option<String>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();

    match run(Cli::parse()) {
        Ok(code) => code,
        Err(err) => {
            error!("{err:#}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let defaults = Config::default();
    let config = Config::new(
        cli.max_depth.unwrap_or(defaults.max_depth),
        cli.max_size.unwrap_or(defaults.max_size),
    );

    match cli.command {
        Command::Get(args) => {
            let (_item, storage) = bind(&args, config)?;
            match storage.get(args.name.as_deref())? {
                Some(value) => {
                    write_stdout(&value)?;
                    Ok(ExitCode::SUCCESS)
                }
                None => Ok(ExitCode::FAILURE),
            }
        }
        Command::Set { field, value } => {
            let (item, storage) = bind(&field, config)?;
            storage.set(field.name.as_deref(), value.as_deref())?;
            std::fs::write(&field.file, item.data())
                .with_context(|| format!("failed to write data file {}", field.file.display()))?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Fmt { file } => {
            if !file.exists() {
                bail!("no data file to format at {}", file.display());
            }
            let data = read_data(&file)?;
            let document = Document::parse_with_config(&data, config)
                .with_context(|| format!("failed to parse {}", file.display()))?;
            write_stdout(&document.to_xml())?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Load the data file into a one-part item and bind the requested field
fn bind(args: &FieldArgs, config: Config) -> Result<(ContentItem, InfosetFieldStorage)> {
    let data = read_data(&args.file)?;
    let ty = ContentTypeDefinition::new("Cli")
        .with_part(ContentPartDefinition::new(&args.part).with_field(&args.field));
    let item = ContentItem::with_record(0, &ty, VersionRecord::with_data(data));

    let part = item
        .part(&args.part)
        .context("part was not welded onto the item")?;
    let field = part.field(&args.field).context("part has no such field")?;
    let storage = InfosetStorageProvider::with_config(config).bind(part, field)?;
    debug!(part = %args.part, field = %args.field, "bound field storage");

    Ok((item, storage))
}

fn read_data(path: &Path) -> Result<String> {
    if !path.exists() {
        debug!(path = %path.display(), "data file missing, starting empty");
        return Ok(String::new());
    }
    std::fs::read_to_string(path)
        .with_context(|| format!("failed to read data file {}", path.display()))
}

fn write_stdout(value: &str) -> Result<()> {
    let mut stdout = io::stdout();
    stdout
        .write_all(value.as_bytes())
        .and_then(|()| stdout.write_all(b"\n"))
        .context("failed to write stdout")
}
