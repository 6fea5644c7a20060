//! # SortOfRemote NG – vCenter REST session client
//!
//! Session-authenticated client for the vCenter `/rest` API. Every public
//! operation returns an [`Envelope`] (`{success, payload}` plus fault details
//! on transport errors) and never fails otherwise.
//!
//! ## Modules
//!
//! - **types** — Connection config, credentials, request descriptors
//! - **error** — Crate-specific error types
//! - **catalog** — Endpoint paths and the closed vocabularies they accept
//! - **headers** — Call-local header sets
//! - **codec** — Query-string and JSON body encoding
//! - **envelope** — The uniform result type
//! - **classify** — Success / failure classification of vendor responses
//! - **transport** — HTTP seam + `reqwest` implementation
//! - **dispatcher** — Verb-dependent encoding, one round trip, classification
//! - **client** — `VcenterClient` façade
//! - **session** — Session create / delete / info
//! - **vm** — VM list, create, delete, tools, guest, power, storage policy
//! - **hardware** — Virtual hardware (adapters, boot, components)
//! - **inventory** — Folders, clusters, datacenters, datastores, hosts, networks, resource pools
//!
//! ## Example
//!
//! ```no_run
//! use sorng_vcenter_rest::{Params, VcenterClient, VsphereConfig};
//!
//! # async fn run() -> Result<(), sorng_vcenter_rest::VmwareError> {
//! let client = VcenterClient::new(&VsphereConfig::new("vcenter.lab.local", "administrator@vsphere.local", "secret"))?;
//! let session = client.create_session(Vec::<String>::new()).await;
//! if let Some(token) = session.value_str() {
//!     let vms = client.list_virtual_machines(token, Params::new(), None).await;
//!     println!("{}", vms.payload);
//!     client.delete_session(token).await;
//! }
//! # Ok(())
//! # }
//! ```

pub mod types;
pub mod error;
pub mod catalog;
pub mod headers;
pub mod codec;
pub mod envelope;
pub mod classify;
pub mod transport;
pub mod dispatcher;
pub mod client;
pub mod session;
pub mod vm;
pub mod hardware;
pub mod inventory;

pub use catalog::{AdapterType, GuestInfo, HardwareComponent, PowerAction, Vocabulary};
pub use classify::{AnyVapiError, ResponseClassifier, UnauthenticatedOnly, VapiErrorType};
pub use client::VcenterClient;
pub use envelope::{Envelope, Fault};
pub use error::{VmwareError, VmwareErrorKind, VmwareResult};
pub use headers::HeaderSet;
pub use transport::{PreparedRequest, RawResponse, ReqwestTransport, Transport};
pub use types::{ApiRequest, ConnectionConfig, Credential, Params, Verb, VsphereConfig};
