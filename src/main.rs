use clap::{Parser, Subcommand};
use media_inspector::MediaInspector;
use media_inspector::utils::{
    default_config_file, evict_gstreamer_cache, list_files_walkdir_filtered,
};
use std::path::PathBuf;
use std::time::Duration;

/// Print capture details of photos and videos.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print every metadata answer for the given files as JSON. Directories are walked.
    ///
    /// Paths are plain filesystem paths; no URI scheme is stripped.
    Inspect {
        /// Include hidden files and directories when walking
        #[arg(long)]
        hidden: bool,
        /// Container report tool used for videos
        #[arg(long, default_value = media_inspector::DEFAULT_REPORT_PROGRAM)]
        program: PathBuf,
        /// Seconds to wait for the report tool
        #[arg(long, default_value_t = media_inspector::DEFAULT_REPORT_TIMEOUT.as_secs())]
        timeout_secs: u64,
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Delete a file, printing whether it was removed.
    Delete { locator: String },
    /// Print the camera config file in use.
    Config,
    /// Drop the gstreamer registry cache if it's stale.
    EvictCache,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Inspect {
            hidden,
            program,
            timeout_secs,
            paths,
        } => {
            let inspector = MediaInspector::builder()
                .report_program(program)
                .report_timeout(Duration::from_secs(timeout_secs))
                .build();

            for path in &paths {
                let files = if path.is_dir() {
                    list_files_walkdir_filtered(path, hidden)?
                } else {
                    vec![path.to_path_buf()]
                };
                for file in files {
                    match inspector.inspect_path(&file).await {
                        Ok(result) => println!("{}", serde_json::to_string_pretty(&result)?),
                        Err(e) => tracing::info!("Skipping: {e}"),
                    }
                }
            }
        }
        Command::Delete { locator } => {
            let inspector = MediaInspector::default();
            println!("{}", inspector.delete_media(&locator).await);
        }
        Command::Config => match default_config_file() {
            Some(path) => println!("{}", path.display()),
            None => println!("None"),
        },
        Command::EvictCache => {
            let evicted = evict_gstreamer_cache()?;
            tracing::info!("gstreamer cache evicted: {evicted}");
        }
    }

    Ok(())
}
