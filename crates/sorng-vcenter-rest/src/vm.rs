//! Virtual machine operations (`/vcenter/vm`).

use crate::catalog::{self, GuestInfo, PowerAction, Vocabulary};
use crate::client::VcenterClient;
use crate::envelope::Envelope;
use crate::transport::Transport;
use crate::types::{ApiRequest, Params};

impl<T: Transport> VcenterClient<T> {
    // ── List / Get ──────────────────────────────────────────────────

    /// List VMs, or fetch one when `vm_id` is given.
    ///
    /// `filters` become the query string, e.g. `{"filter.power_states.1":
    /// "POWERED_ON"}`.
    pub async fn list_virtual_machines(&self, token: &str, filters: Params, vm_id: Option<&str>) -> Envelope {
        let request = catalog::collection_or_item(catalog::VM, vm_id)
            .map(|path| ApiRequest::get(path).with_params(filters));
        self.call(token, request).await
    }

    // ── Create / Delete ─────────────────────────────────────────────

    /// Create a VM from `spec` (sent as the JSON body).
    ///
    /// Needs `VirtualMachine.Inventory.Create` on the target folder.
    pub async fn create_virtual_machine(&self, token: &str, spec: Params) -> Envelope {
        self.call(token, Ok(ApiRequest::post(catalog::VM).with_params(spec)))
            .await
    }

    /// Delete a VM. Needs `VirtualMachine.Inventory.Delete`.
    pub async fn delete_virtual_machine(&self, token: &str, vm_id: &str) -> Envelope {
        self.call(token, catalog::vm_path(vm_id, "").map(ApiRequest::delete))
            .await
    }

    // ── Guest ───────────────────────────────────────────────────────

    /// VMware Tools status in the guest.
    pub async fn get_vm_tools(&self, token: &str, vm_id: &str) -> Envelope {
        self.call(token, catalog::vm_path(vm_id, "/tools").map(ApiRequest::get))
            .await
    }

    /// Guest information for one of `identity`, `local-filesystem`, `power`.
    /// Any other `info` is rejected without contacting vCenter.
    pub async fn get_vm_guest(&self, token: &str, vm_id: &str, info: &str) -> Envelope {
        let request = GuestInfo::parse_option(info)
            .and_then(|info| catalog::vm_path(vm_id, &format!("/guest/{}", info.as_str())))
            .map(ApiRequest::get);
        self.call(token, request).await
    }

    // ── Power ───────────────────────────────────────────────────────

    /// Current power state.
    pub async fn get_vm_power(&self, token: &str, vm_id: &str) -> Envelope {
        self.call(token, catalog::vm_path(vm_id, "/power").map(ApiRequest::get))
            .await
    }

    /// Run one of `start`, `stop`, `suspend`, `reset`. Any other `action` is
    /// rejected without contacting vCenter.
    pub async fn set_vm_power(&self, token: &str, vm_id: &str, action: &str) -> Envelope {
        let request = PowerAction::parse_option(action)
            .and_then(|action| catalog::vm_path(vm_id, &format!("/power/{}", action.as_str())))
            .map(ApiRequest::post);
        self.call(token, request).await
    }

    // ── Storage policy ──────────────────────────────────────────────

    /// Storage policy of the VM home and disks, or their compliance status
    /// when `compliance` is set.
    pub async fn get_vm_storage_policy(&self, token: &str, vm_id: &str, compliance: bool) -> Envelope {
        let suffix = if compliance {
            "/storage/policy/compliance"
        } else {
            "/storage/policy"
        };
        self.call(token, catalog::vm_path(vm_id, suffix).map(ApiRequest::get))
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::client::test_support::*;
    use crate::types::{Params, Verb};
    use serde_json::json;

    fn filters(value: serde_json::Value) -> Params {
        value.as_object().cloned().unwrap_or_default()
    }

    #[tokio::test]
    async fn list_by_id_has_no_query() {
        let env = client(expect_get("/vcenter/vm/vm-100"))
            .list_virtual_machines(TOKEN, Params::new(), Some("vm-100"))
            .await;
        assert!(env.success);
    }

    #[tokio::test]
    async fn list_with_filters_builds_query() {
        let env = client(expect_get("/vcenter/vm?power_state=POWERED_ON"))
            .list_virtual_machines(TOKEN, filters(json!({"power_state": "POWERED_ON"})), None)
            .await;
        assert!(env.success);
    }

    #[tokio::test]
    async fn create_posts_spec_as_json() {
        let transport = expect_one(
            |req| {
                req.verb == Verb::Post
                    && req.url == "https://vc.lab/rest/vcenter/vm"
                    && req.body.as_deref()
                        == Some(r#"{"spec":{"guest_OS":"RHEL_8_64","name":"web-01","placement":{"folder":"group-v3"}}}"#)
                    && req.headers.get("Content-Type") == Some("application/json")
                    && req.headers.contains("Content-Length")
            },
            r#"{"value":"vm-1001"}"#,
        );
        let spec = filters(json!({
            "spec": {"name": "web-01", "guest_OS": "RHEL_8_64", "placement": {"folder": "group-v3"}}
        }));
        let env = client(transport).create_virtual_machine(TOKEN, spec).await;
        assert_eq!(env.value_str(), Some("vm-1001"));
    }

    #[tokio::test]
    async fn delete_targets_vm() {
        let transport = expect_one(
            |req| req.verb == Verb::Delete && req.url == "https://vc.lab/rest/vcenter/vm/vm-7" && req.body.is_none(),
            "",
        );
        assert!(client(transport).delete_virtual_machine(TOKEN, "vm-7").await.success);
    }

    #[tokio::test]
    async fn vm_id_is_encoded_as_one_segment() {
        let transport = expect_one(
            |req| req.verb == Verb::Delete && req.url == "https://vc.lab/rest/vcenter/vm/vm-1%3Fx=1",
            "",
        );
        assert!(client(transport).delete_virtual_machine(TOKEN, "vm-1?x=1").await.success);
    }

    #[tokio::test]
    async fn dot_segment_vm_id_makes_no_call() {
        let env = client(untouched()).get_vm_tools(TOKEN, "..").await;
        assert!(!env.success);
        assert_eq!(env.payload, json!(r#"Invalid identifier: "..""#));
        assert!(env.fault.is_none());
    }

    #[tokio::test]
    async fn tools_and_power_paths() {
        assert!(client(expect_get("/vcenter/vm/vm-1/tools")).get_vm_tools(TOKEN, "vm-1").await.success);
        assert!(client(expect_get("/vcenter/vm/vm-1/power")).get_vm_power(TOKEN, "vm-1").await.success);
    }

    #[tokio::test]
    async fn guest_info_valid_values() {
        let env = client(expect_get("/vcenter/vm/vm-1/guest/local-filesystem"))
            .get_vm_guest(TOKEN, "vm-1", "local-filesystem")
            .await;
        assert!(env.success);
    }

    #[tokio::test]
    async fn guest_info_invalid_value_makes_no_call() {
        let env = client(untouched()).get_vm_guest(TOKEN, "vm-1", "networking").await;
        assert!(!env.success);
        assert_eq!(
            env.payload,
            json!(r#"Invalid request. Valid Options: ["identity","local-filesystem","power"]"#)
        );
        assert!(env.fault.is_none());
    }

    #[tokio::test]
    async fn set_power_posts_action() {
        let transport = expect_one(
            |req| {
                req.verb == Verb::Post
                    && req.url == "https://vc.lab/rest/vcenter/vm/vm-3/power/start"
                    && req.body.is_none()
            },
            "",
        );
        assert!(client(transport).set_vm_power(TOKEN, "vm-3", "start").await.success);
    }

    #[tokio::test]
    async fn set_power_rejects_unknown_action() {
        let env = client(untouched()).set_vm_power(TOKEN, "vm-3", "hibernate").await;
        assert!(!env.success);
        assert_eq!(
            env.payload,
            json!(r#"Invalid request. Valid Options: ["start","stop","suspend","reset"]"#)
        );
    }

    #[tokio::test]
    async fn storage_policy_paths() {
        assert!(client(expect_get("/vcenter/vm/vm-2/storage/policy"))
            .get_vm_storage_policy(TOKEN, "vm-2", false)
            .await
            .success);
        assert!(client(expect_get("/vcenter/vm/vm-2/storage/policy/compliance"))
            .get_vm_storage_policy(TOKEN, "vm-2", true)
            .await
            .success);
    }
}
