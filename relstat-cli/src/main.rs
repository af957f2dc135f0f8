use clap::Parser;
use relstat_cli::RelstatCli;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    relstat::init_tracing("warn");

    // Ensure rustls uses the aws-lc-rs provider explicitly.
    // This avoids runtime errors when no default provider is set.
    if let Err(e) = rustls::crypto::CryptoProvider::install_default(
        rustls::crypto::aws_lc_rs::default_provider(),
    ) {
        // It's fine if a compatible provider was already installed.
        tracing::debug!(
            ?e,
            "CryptoProvider already installed or incompatible; proceeding"
        );
    }

    let cli = RelstatCli::parse();
    relstat_cli::run(cli).await
}
