use async_trait::async_trait;
use kube::{
    Client,
    api::Api,
    core::{DynamicObject, GroupVersionKind},
    discovery::ApiResource,
};

use crate::errors::FetchError;
use crate::manifest::{ResourceDescriptor, split_api_version};
use crate::observe::LiveClient;

/// Cluster-backed live client. Each descriptor is resolved to a dynamic
/// namespaced API from its declared group/version/kind; no discovery round
/// trip is made, so the plural guess must match what the API server serves.
#[derive(Clone)]
pub struct KubeLiveClient {
    client: Client,
}

impl KubeLiveClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl LiveClient for KubeLiveClient {
    async fn get(
        &self,
        desc: &ResourceDescriptor,
    ) -> Result<DynamicObject, FetchError> {
        let (group, version) = split_api_version(&desc.api_version);
        let gvk = GroupVersionKind::gvk(&group, &version, &desc.kind);
        let ar = ApiResource::from_gvk(&gvk);
        let api: Api<DynamicObject> =
            Api::namespaced_with(self.client.clone(), &desc.namespace, &ar);
        api.get(&desc.name).await.map_err(FetchError::from)
    }
}
