//! Inventory objects: folders, clusters, datacenters, datastores, hosts,
//! networks and resource pools.

use crate::catalog;
use crate::client::VcenterClient;
use crate::envelope::Envelope;
use crate::transport::Transport;
use crate::types::{ApiRequest, Params};

impl<T: Transport> VcenterClient<T> {
    // ── Folders ─────────────────────────────────────────────────────

    /// List folders, e.g. `{"filter.type": "VIRTUAL_MACHINE"}`.
    pub async fn get_folders(&self, token: &str, filters: Params) -> Envelope {
        self.call(token, Ok(ApiRequest::get(catalog::FOLDER).with_params(filters)))
            .await
    }

    // ── Compute ─────────────────────────────────────────────────────

    /// List clusters, or one cluster's details.
    pub async fn get_clusters(&self, token: &str, cluster_id: Option<&str>) -> Envelope {
        self.get_collection(token, catalog::CLUSTER, cluster_id).await
    }

    /// List datacenters, or one datacenter's details.
    pub async fn get_datacenters(&self, token: &str, datacenter_id: Option<&str>) -> Envelope {
        self.get_collection(token, catalog::DATACENTER, datacenter_id).await
    }

    /// List ESXi hosts.
    pub async fn get_hosts(&self, token: &str, filters: Params) -> Envelope {
        self.call(token, Ok(ApiRequest::get(catalog::HOST).with_params(filters)))
            .await
    }

    /// List resource pools, or one pool's details.
    pub async fn get_resource_pools(&self, token: &str, filters: Params, pool_id: Option<&str>) -> Envelope {
        let request = catalog::collection_or_item(catalog::RESOURCE_POOL, pool_id)
            .map(|path| ApiRequest::get(path).with_params(filters));
        self.call(token, request).await
    }

    // ── Storage / network ───────────────────────────────────────────

    /// List datastores, or one datastore's details.
    pub async fn get_datastores(&self, token: &str, datastore_id: Option<&str>) -> Envelope {
        self.get_collection(token, catalog::DATASTORE, datastore_id).await
    }

    /// List networks (standard / distributed port groups, opaque networks).
    pub async fn get_networks(&self, token: &str, filters: Params) -> Envelope {
        self.call(token, Ok(ApiRequest::get(catalog::NETWORK).with_params(filters)))
            .await
    }

    async fn get_collection(&self, token: &str, collection: &str, id: Option<&str>) -> Envelope {
        self.call(token, catalog::collection_or_item(collection, id).map(ApiRequest::get))
            .await
    }
}
