use clap::{Args, Parser, Subcommand, builder::styling};
use etl_processor::{EtlRequest, SinkSpec, Source, cli, processor, storage::DEFAULT_TABLE};
use eyre::Result;
use owo_colors::OwoColorize;
use std::path::{Path, PathBuf};

// CLI Styling
const STYLES: styling::Styles = styling::Styles::styled()
    .header(styling::AnsiColor::BrightWhite.on_default())
    .usage(styling::AnsiColor::BrightWhite.on_default())
    .literal(styling::AnsiColor::Green.on_default())
    .placeholder(styling::AnsiColor::Cyan.on_default());

/// ETL Processor: load CSV/JSON from files, URLs or APIs, reshape columns, save as CSV, JSON or SQLite
#[derive(Parser)]
#[command(name = "etlp", version, styles = STYLES)]
struct Cli {
    /// The dotenv file to source credentials from (skipped if missing)
    #[arg(short, long, global = true, default_value = ".env")]
    env: String,

    /// More verbose logging
    #[arg(long, global = true)]
    debug: bool,

    /// Command to execute
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SourceArgs {
    /// Local .csv/.json path, http(s) URL to a .csv/.json file, or API endpoint
    input: String,

    /// Treat INPUT as an API endpoint returning JSON
    #[arg(long)]
    api: bool,

    /// HTTP timeout in seconds [env: ETL_TIMEOUT_SECS, default: 30]
    #[arg(long)]
    timeout: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Load, reshape and save a dataset
    Process {
        #[command(flatten)]
        source: SourceArgs,

        /// Set a column on every record, as COLUMN=VALUE (repeatable)
        #[arg(short, long = "add", value_name = "COLUMN=VALUE")]
        add: Vec<String>,

        /// Remove a column from every record (repeatable)
        #[arg(short, long = "remove", value_name = "COLUMN")]
        remove: Vec<String>,

        /// Fail if a removed column is not in the data
        #[arg(long)]
        strict: bool,

        /// Output format: csv, json or sqlite. Prompts when omitted.
        #[arg(short, long)]
        format: Option<String>,

        /// Output file [default: output_data.<csv|json|db>]
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Table name for the sqlite format
        #[arg(short, long, default_value = DEFAULT_TABLE)]
        table: String,

        /// Directory for downloaded remote files [default: current directory]
        #[arg(long)]
        download_dir: Option<PathBuf>,
    },

    /// Load a dataset and print its summary without saving
    Inspect {
        #[command(flatten)]
        source: SourceArgs,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    if Path::new(&cli.env).exists() {
        dotenvy::from_filename(&cli.env)?;
    }

    let log_level = match cli.debug {
        true => "debug",
        false => "info",
    };
    let env = env_logger::Env::default().filter_or("LOG_LEVEL", log_level);
    env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .init();

    match cli.command {
        Commands::Process {
            source,
            add,
            remove,
            strict,
            format,
            output,
            table,
            download_dir,
        } => {
            let transform = cli::build_transform(&add, &remove, strict)?;
            let client = cli::load_http_client(source.timeout)?;

            let format = match format {
                Some(format) => format,
                None => {
                    // Reject unusable input before asking anything
                    Source::parse(&source.input, source.api)?;
                    let stdin = std::io::stdin();
                    cli::prompt_output_format(stdin.lock(), std::io::stdout())?
                }
            };

            let mut sink = SinkSpec::new(format).with_table(table);
            if let Some(output) = output {
                sink = sink.with_destination(output);
            }

            let mut request = EtlRequest::new(&source.input, sink)
                .api(source.api)
                .with_transform(transform);
            if let Some(dir) = download_dir {
                request = request.with_download_dir(dir);
            }

            log::info!("Processing {}", source.input.bright_black());
            let report = processor::etl_processor(request, client).await;

            cli::run_outcome(&report)?;
            log::info!("✓ ETL run {}", report.status.green());
        }
        Commands::Inspect { source } => {
            let client = cli::load_http_client(source.timeout)?;
            let (_, summary) = cli::inspect(&source.input, source.api, client).await?;
            println!("{}", summary);
        }
    }

    Ok(())
}
