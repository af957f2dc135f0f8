use std::fs::File;
use std::path::PathBuf;

use anyhow::Context;
use envconfig::Envconfig;
use kube::Client;
use tracing::debug;

use relstat::config::StatusConfig;
use relstat::graph::{SnapshotGraph, SnapshotGraphSource};
use relstat::live::KubeLiveClient;
use relstat::report::PlainRowPrinter;
use relstat::status::StatusReporter;

#[derive(clap::Parser, Clone, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct RelstatCli {
    #[command(subcommand)]
    pub command: RelstatCommands,
}

#[derive(clap::Subcommand, Clone, Debug)]
pub enum RelstatCommands {
    /// Report release status for a rendered manifest
    #[clap(aliases = &["st", "s"])]
    Status {
        /// Namespace holding the release; defaults to RELSTAT_NAMESPACE
        #[arg(short, long)]
        namespace: Option<String>,
        /// Precomputed dependency-graph snapshot (YAML) used to diagnose
        /// missing resources
        #[arg(short, long)]
        graph: Option<PathBuf>,
        /// Rendered manifest as file or stdin if `-` is given
        manifest: clap_stdin::FileOrStdin,
    },
}

pub async fn run(cli: RelstatCli) -> anyhow::Result<()> {
    let cfg = StatusConfig::init_from_env()?;
    debug!(?cfg, "loaded config");
    match cli.command {
        RelstatCommands::Status {
            namespace,
            graph,
            manifest,
        } => {
            let ns = namespace.unwrap_or_else(|| cfg.namespace.clone());
            let snapshot = match graph {
                Some(path) => SnapshotGraph::from_reader(
                    File::open(&path).with_context(|| {
                        format!("opening graph snapshot {}", path.display())
                    })?,
                )?,
                None => SnapshotGraph::default(),
            };
            let contents = manifest
                .contents()
                .context("reading rendered manifest")?;

            let client = Client::try_default().await?;
            let reporter = StatusReporter::new(
                KubeLiveClient::new(client),
                SnapshotGraphSource::new(snapshot),
                PlainRowPrinter,
            )
            .with_release_selector(cfg.release_selector);

            let report = reporter.get_status(&ns, contents.as_bytes()).await?;
            print!("{report}");
            Ok(())
        }
    }
}
