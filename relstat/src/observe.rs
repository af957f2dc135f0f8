use async_trait::async_trait;
use kube::core::DynamicObject;
use tracing::{debug, warn};

use crate::errors::{FetchError, StatusError};
use crate::group::{ObjectGroups, ObjectRef};
use crate::manifest::ResourceDescriptor;

/// One live `get` per declared resource. Implementations decide how the
/// descriptor maps onto an actual API endpoint; callers wanting bounded
/// latency impose their own timeout here.
#[async_trait]
pub trait LiveClient {
    async fn get(
        &self,
        desc: &ResourceDescriptor,
    ) -> Result<DynamicObject, FetchError>;
}

/// A declared resource whose live fetch failed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MissingResource {
    pub name: String,
    pub kind: String,
    pub resource: String,
}

impl MissingResource {
    /// Graph lookup key, `lowercase(kind)/name`.
    pub fn key(&self) -> String {
        format!("{}/{}", self.kind.to_lowercase(), self.name)
    }
}

impl From<&ResourceDescriptor> for MissingResource {
    fn from(desc: &ResourceDescriptor) -> Self {
        Self {
            name: desc.name.clone(),
            kind: desc.kind.clone(),
            resource: desc.resource.clone(),
        }
    }
}

/// Snapshot of one status pass over the declared set: everything the cluster
/// returned, grouped by concrete type, plus everything it didn't.
#[derive(Debug, Default)]
pub struct Observed {
    pub groups: ObjectGroups,
    pub missing: Vec<MissingResource>,
}

/// Fetch every declared resource in order. A failed fetch records the
/// descriptor as missing and the pass continues; a fetched object that
/// yields no usable reference aborts the whole run, since that means
/// malformed cluster data rather than absence.
pub async fn observe_declared(
    live: &impl LiveClient,
    descriptors: &[ResourceDescriptor],
) -> Result<Observed, StatusError> {
    if descriptors.is_empty() {
        return Err(StatusError::NoObjects);
    }

    let mut observed = Observed::default();
    for desc in descriptors {
        debug!(kind = %desc.kind, name = %desc.name, "live get");
        match live.get(desc).await {
            Ok(obj) => {
                let or = ObjectRef::from_object(&obj)?;
                observed.groups.push(or.type_key(), obj);
            }
            Err(e) => {
                warn!(
                    kind = %desc.kind,
                    name = %desc.name,
                    error = %e,
                    "live get failed; recording resource as missing"
                );
                observed.missing.push(MissingResource::from(desc));
            }
        }
    }
    Ok(observed)
}
