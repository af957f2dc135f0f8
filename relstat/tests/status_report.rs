use std::collections::HashMap;

use async_trait::async_trait;
use kube::core::{DynamicObject, TypeMeta};

use relstat::errors::{FetchError, StatusError};
use relstat::graph::{
    DependencyEdge, NodeReport, SnapshotGraph, SnapshotGraphSource,
};
use relstat::manifest::ResourceDescriptor;
use relstat::observe::LiveClient;
use relstat::report::PlainRowPrinter;
use relstat::status::StatusReporter;

struct FakeLive {
    objects: HashMap<String, DynamicObject>,
}

impl FakeLive {
    fn new(objects: Vec<DynamicObject>) -> Self {
        let objects = objects
            .into_iter()
            .map(|o| {
                (o.metadata.name.clone().unwrap_or_default(), o)
            })
            .collect();
        Self { objects }
    }
}

#[async_trait]
impl LiveClient for FakeLive {
    async fn get(
        &self,
        desc: &ResourceDescriptor,
    ) -> Result<DynamicObject, FetchError> {
        self.objects
            .get(&desc.name)
            .cloned()
            .ok_or(FetchError::NotFound)
    }
}

fn live_obj(api_version: &str, kind: &str, name: &str) -> DynamicObject {
    DynamicObject {
        types: Some(TypeMeta {
            api_version: api_version.to_string(),
            kind: kind.to_string(),
        }),
        metadata: kube::api::ObjectMeta {
            name: Some(name.to_string()),
            namespace: Some("demo".to_string()),
            ..Default::default()
        },
        data: serde_json::json!({}),
    }
}

fn reporter(
    live: FakeLive,
    graph: SnapshotGraph,
) -> StatusReporter<FakeLive, SnapshotGraphSource, PlainRowPrinter> {
    StatusReporter::new(
        live,
        SnapshotGraphSource::new(graph),
        PlainRowPrinter,
    )
}

const POD_AND_SERVICE: &str = "\
apiVersion: v1
kind: Pod
metadata:
  name: a
---
apiVersion: v1
kind: Service
metadata:
  name: front
";

#[test_log::test(tokio::test)]
async fn all_fetches_succeeding_produce_no_missing_section() {
    let live = FakeLive::new(vec![
        live_obj("v1", "Pod", "a"),
        live_obj("v1", "Service", "front"),
    ]);
    let report = reporter(live, SnapshotGraph::default())
        .get_status("demo", POD_AND_SERVICE.as_bytes())
        .await
        .unwrap();

    assert!(report.contains("==> v1/Pod\n"));
    assert!(report.contains("==> v1/Service\n"));
    assert!(!report.contains("MISSING"));
    let pod_at = report.find("==> v1/Pod").unwrap();
    let svc_at = report.find("==> v1/Service").unwrap();
    assert!(pod_at < svc_at);
}

#[test_log::test(tokio::test)]
async fn missing_resource_is_diagnosed_against_the_graph() {
    // Pod "a" exists, Pod "b" doesn't; the graph says "b" waits on svc/c.
    let manifest = "\
apiVersion: v1
kind: Pod
metadata:
  name: a
---
apiVersion: v1
kind: Pod
metadata:
  name: b
";
    let live = FakeLive::new(vec![live_obj("v1", "Pod", "a")]);
    let mut graph = SnapshotGraph::default();
    graph.insert(
        "pod/b",
        NodeReport {
            blocked: true,
            dependencies: vec![
                DependencyEdge {
                    dependency: "svc/c".into(),
                    blocks: true,
                },
                DependencyEdge {
                    dependency: "job/seed".into(),
                    blocks: false,
                },
            ],
        },
    );

    let report = reporter(live, graph)
        .get_status("demo", manifest.as_bytes())
        .await
        .unwrap();

    assert!(report.contains("==> v1/Pod\na\t\tdemo\t\t<none>\n"));
    assert!(report.contains("==> MISSING\nKIND\t\tNAME\t\tSTATUS\t\n"));
    assert!(report.contains("pods\t\tb\t\tWAITING_FOR: svc/c,\t\n"));
    assert!(!report.contains("job/seed"));
    // "b" must not also show up as a fetched pod row.
    assert!(!report.contains("b\t\tdemo"));
}

#[test_log::test(tokio::test)]
async fn unblocked_missing_resource_reads_inprogress() {
    let manifest = "apiVersion: v1\nkind: Pod\nmetadata:\n  name: b\n";
    let live = FakeLive::new(vec![]);
    let mut graph = SnapshotGraph::default();
    graph.insert(
        "pod/b",
        NodeReport {
            blocked: false,
            dependencies: vec![DependencyEdge {
                dependency: "svc/c".into(),
                blocks: true,
            }],
        },
    );

    let report = reporter(live, graph)
        .get_status("demo", manifest.as_bytes())
        .await
        .unwrap();

    // No group rendered at all, so the report leads with the blank line.
    assert!(report.starts_with("\n==> MISSING"));
    assert!(report.contains("pods\t\tb\t\tINPROGRESS\t\n"));
    assert!(!report.contains("svc/c"));
}

#[test_log::test(tokio::test)]
async fn missing_resource_without_graph_node_gets_no_row() {
    let manifest = "apiVersion: v1\nkind: Pod\nmetadata:\n  name: b\n";
    let live = FakeLive::new(vec![]);
    let report = reporter(live, SnapshotGraph::default())
        .get_status("demo", manifest.as_bytes())
        .await
        .unwrap();

    assert!(report.contains("==> MISSING\nKIND\t\tNAME\t\tSTATUS\t\n"));
    assert!(!report.contains("pods\t\tb"));
}

#[test_log::test(tokio::test)]
async fn empty_manifest_fails_without_a_report() {
    let live = FakeLive::new(vec![]);
    let err = reporter(live, SnapshotGraph::default())
        .get_status("demo", "".as_bytes())
        .await
        .unwrap_err();
    assert!(matches!(err, StatusError::NoObjects));
}

#[test_log::test(tokio::test)]
async fn unchanged_state_renders_byte_identical_reports() {
    let make = || {
        let live = FakeLive::new(vec![
            live_obj("v1", "Pod", "a"),
            live_obj("v1", "Service", "front"),
        ]);
        let mut graph = SnapshotGraph::default();
        graph.insert(
            "pod/gone",
            NodeReport {
                blocked: true,
                dependencies: vec![DependencyEdge {
                    dependency: "svc/c".into(),
                    blocks: true,
                }],
            },
        );
        reporter(live, graph)
    };
    let manifest = format!(
        "{}---\napiVersion: v1\nkind: Pod\nmetadata:\n  name: gone\n",
        POD_AND_SERVICE
    );

    let first = make()
        .get_status("demo", manifest.as_bytes())
        .await
        .unwrap();
    let second = make()
        .get_status("demo", manifest.as_bytes())
        .await
        .unwrap();
    assert_eq!(first, second);
}
