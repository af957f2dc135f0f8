use std::io::Read;

use kube::core::GroupVersionKind;
use kube::discovery::ApiResource;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::errors::ManifestError;

/// Declared identity of one resource the release expects to exist.
/// Built once per status run from the rendered manifest stream and
/// immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceDescriptor {
    pub namespace: String,
    pub name: String,
    pub kind: String,
    pub api_version: String,
    /// Lowercase plural type string (e.g. `pods`), as shown in diagnostics.
    pub resource: String,
}

pub(crate) fn split_api_version(api_version: &str) -> (String, String) {
    let mut parts = api_version.splitn(2, '/');
    let first = parts.next().unwrap_or("").to_string();
    match parts.next() {
        Some(version) => (first, version.to_string()),
        // Core group manifests carry a bare version (`v1`).
        None => (String::new(), first),
    }
}

/// Parse a rendered multi-document YAML manifest stream into descriptors,
/// preserving document order. Empty and null documents are skipped. Each
/// remaining document must name its apiVersion, kind, and metadata.name; a
/// document without a namespace belongs to `namespace`.
pub fn build_descriptors(
    namespace: &str,
    mut reader: impl Read,
) -> Result<Vec<ResourceDescriptor>, ManifestError> {
    let mut raw = String::new();
    reader.read_to_string(&mut raw)?;

    let mut out = Vec::new();
    for (idx, document) in serde_yaml::Deserializer::from_str(&raw).enumerate()
    {
        let value = Value::deserialize(document)?;
        if value.is_null() {
            continue;
        }

        let api_version = value
            .get("apiVersion")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .ok_or(ManifestError::MissingField {
                field: "apiVersion",
                document: idx,
            })?;
        let kind = value
            .get("kind")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .ok_or(ManifestError::MissingField {
                field: "kind",
                document: idx,
            })?;
        let metadata = value.get("metadata");
        let name = metadata
            .and_then(|m| m.get("name"))
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .ok_or(ManifestError::MissingField {
                field: "metadata.name",
                document: idx,
            })?;
        let doc_namespace = metadata
            .and_then(|m| m.get("namespace"))
            .and_then(Value::as_str)
            .unwrap_or(namespace);

        let (group, version) = split_api_version(api_version);
        let gvk = GroupVersionKind::gvk(&group, &version, kind);
        let ar = ApiResource::from_gvk(&gvk);

        debug!(kind, name, namespace = doc_namespace, "declared resource");
        out.push(ResourceDescriptor {
            namespace: doc_namespace.to_string(),
            name: name.to_string(),
            kind: kind.to_string(),
            api_version: api_version.to_string(),
            resource: ar.plural,
        });
    }
    Ok(out)
}
