use std::collections::BTreeMap;
use std::io::Read;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{GraphError, SelectorError};

/// Blocking state of one scheduled resource, as computed by whatever built
/// the dependency graph.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeReport {
    pub blocked: bool,
    #[serde(default)]
    pub dependencies: Vec<DependencyEdge>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyEdge {
    pub dependency: String,
    /// Edges with `blocks = false` are informational only and never shown
    /// in the report.
    pub blocks: bool,
}

/// Read-only view over a precomputed dependency graph, keyed by
/// `lowercase(kind)/name`. A key with no node simply has nothing to report.
pub trait DependencyGraph {
    fn node_report(&self, key: &str) -> Option<NodeReport>;
}

/// Produces the dependency graph consulted when declared resources are
/// missing. Construction failures (client or graph) abort the status run.
#[async_trait]
pub trait GraphSource {
    type Graph: DependencyGraph;

    async fn build(
        &self,
        namespace: &str,
        selector: &ReleaseSelector,
    ) -> Result<Self::Graph, GraphError>;
}

/// Equality-only label selector, comma-separated `key=value` pairs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReleaseSelector(BTreeMap<String, String>);

impl ReleaseSelector {
    pub fn parse(expr: &str) -> Result<Self, SelectorError> {
        let expr = expr.trim();
        if expr.is_empty() {
            return Ok(Self::default());
        }
        let mut labels = BTreeMap::new();
        for pair in expr.split(',') {
            let Some((key, value)) = pair.split_once('=') else {
                return Err(SelectorError {
                    expr: expr.to_string(),
                    reason: format!("expected key=value, got {:?}", pair),
                });
            };
            let key = key.trim();
            if key.is_empty() {
                return Err(SelectorError {
                    expr: expr.to_string(),
                    reason: "empty label key".to_string(),
                });
            }
            labels.insert(key.to_string(), value.trim().to_string());
        }
        Ok(Self(labels))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_label_string(&self) -> String {
        self.0
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// A dependency graph loaded from a precomputed snapshot (YAML mapping of
/// resource key to node report). Consults only; the scheduling metadata the
/// snapshot was computed from is out of scope here.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SnapshotGraph(BTreeMap<String, NodeReport>);

impl SnapshotGraph {
    pub fn from_reader(reader: impl Read) -> Result<Self, GraphError> {
        serde_yaml::from_reader(reader)
            .map_err(|e| GraphError::Build(e.to_string()))
    }

    pub fn insert(&mut self, key: impl Into<String>, report: NodeReport) {
        self.0.insert(key.into(), report);
    }
}

impl DependencyGraph for SnapshotGraph {
    fn node_report(&self, key: &str) -> Option<NodeReport> {
        self.0.get(key).cloned()
    }
}

/// GraphSource handing out a fixed snapshot. Namespace and selector scoping
/// is assumed to have happened when the snapshot was produced.
#[derive(Clone, Debug, Default)]
pub struct SnapshotGraphSource {
    graph: SnapshotGraph,
}

impl SnapshotGraphSource {
    pub fn new(graph: SnapshotGraph) -> Self {
        Self { graph }
    }
}

#[async_trait]
impl GraphSource for SnapshotGraphSource {
    type Graph = SnapshotGraph;

    async fn build(
        &self,
        namespace: &str,
        selector: &ReleaseSelector,
    ) -> Result<SnapshotGraph, GraphError> {
        debug!(
            namespace,
            selector = %selector.to_label_string(),
            "serving dependency graph from snapshot"
        );
        Ok(self.graph.clone())
    }
}
