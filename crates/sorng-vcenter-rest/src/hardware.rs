//! Virtual hardware of a VM (`/vcenter/vm/{vm}/hardware`).

use crate::catalog::{self, AdapterType, HardwareComponent, Vocabulary};
use crate::client::VcenterClient;
use crate::envelope::Envelope;
use crate::transport::Transport;
use crate::error::VmwareResult;
use crate::types::ApiRequest;

/// `/hardware/{segment}` or `/hardware/{segment}/{id}`.
fn hardware_suffix(segment: &str, id: Option<&str>) -> VmwareResult<String> {
    catalog::collection_or_item(&format!("/hardware/{segment}"), id)
}

impl<T: Transport> VcenterClient<T> {
    /// Basic virtual hardware settings (version, upgrade policy).
    pub async fn get_vm_hardware_basic(&self, token: &str, vm_id: &str) -> Envelope {
        self.call(token, catalog::vm_path(vm_id, "/hardware").map(ApiRequest::get))
            .await
    }

    /// SATA or SCSI adapters (`adapter_type` is `sata` or `scsi`), or a single
    /// adapter when `adapter_id` is given.
    pub async fn get_vm_hardware_adapter(
        &self,
        token: &str,
        vm_id: &str,
        adapter_type: &str,
        adapter_id: Option<&str>,
    ) -> Envelope {
        let request = AdapterType::parse_option(adapter_type)
            .and_then(|kind| hardware_suffix(kind.as_str(), adapter_id))
            .and_then(|suffix| catalog::vm_path(vm_id, &suffix))
            .map(ApiRequest::get);
        self.call(token, request).await
    }

    /// Boot configuration.
    ///
    /// Note the flag reads backwards: `device == true` returns the boot
    /// settings (`/hardware/boot`) and `device == false` returns the boot
    /// device order (`/hardware/boot/device`). Existing callers depend on
    /// this mapping.
    pub async fn get_vm_hardware_boot(&self, token: &str, vm_id: &str, device: bool) -> Envelope {
        let suffix = if device { "/hardware/boot" } else { "/hardware/boot/device" };
        self.call(token, catalog::vm_path(vm_id, suffix).map(ApiRequest::get))
            .await
    }

    /// One hardware component family (`cdrom`, `cpu`, `disk`, `ethernet`,
    /// `floppy`, `memory`, `parallel`, `serial`), or one device of it when
    /// `id` is given.
    pub async fn get_vm_hardware_info(
        &self,
        token: &str,
        vm_id: &str,
        component: &str,
        id: Option<&str>,
    ) -> Envelope {
        let request = HardwareComponent::parse_option(component)
            .and_then(|kind| hardware_suffix(kind.as_str(), id))
            .and_then(|suffix| catalog::vm_path(vm_id, &suffix))
            .map(ApiRequest::get);
        self.call(token, request).await
    }
}
