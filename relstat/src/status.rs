use std::io::Read;

use tracing::{debug, info, instrument};

use crate::errors::StatusError;
use crate::graph::{GraphSource, ReleaseSelector};
use crate::manifest::build_descriptors;
use crate::observe::{LiveClient, observe_declared};
use crate::report::{RowPrinter, write_groups, write_missing_section};

/// Reconciles a rendered manifest stream against live cluster state and
/// renders the result as a sectioned text report. Owns nothing across runs;
/// every `get_status` call works on its own groups, missing list, and
/// output buffer.
pub struct StatusReporter<L, G, P> {
    live: L,
    graphs: G,
    printer: P,
    release_selector: String,
}

impl<L, G, P> StatusReporter<L, G, P>
where
    L: LiveClient,
    G: GraphSource,
    P: RowPrinter,
{
    pub fn new(live: L, graphs: G, printer: P) -> Self {
        Self {
            live,
            graphs,
            printer,
            // TODO: stamp release labels on scheduled resources so the
            // selector can narrow the graph to one release.
            release_selector: String::new(),
        }
    }

    pub fn with_release_selector(
        mut self,
        selector: impl Into<String>,
    ) -> Self {
        self.release_selector = selector.into();
        self
    }

    /// Run one status pass: declared set from the manifest, one live get per
    /// descriptor, grouped rendering, and a diagnostic section for whatever
    /// the cluster didn't return. Fatal errors abort with no report.
    #[instrument(skip_all, fields(ns = %namespace))]
    pub async fn get_status(
        &self,
        namespace: &str,
        manifest: impl Read,
    ) -> Result<String, StatusError> {
        let descriptors = build_descriptors(namespace, manifest)?;
        let observed = observe_declared(&self.live, &descriptors).await?;
        info!(
            groups = observed.groups.len(),
            missing = observed.missing.len(),
            "observed declared resources"
        );

        let mut buf = String::new();
        write_groups(&mut buf, &observed.groups, &self.printer)?;

        if !observed.missing.is_empty() {
            let selector = ReleaseSelector::parse(&self.release_selector)?;
            let graph = self.graphs.build(namespace, &selector).await?;
            debug!("diagnosing missing resources against dependency graph");
            write_missing_section(&mut buf, &observed.missing, &graph)?;
        }

        Ok(buf)
    }
}
