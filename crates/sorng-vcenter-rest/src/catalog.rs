//! Endpoint path catalog and the closed vocabularies some endpoints accept.
//!
//! Paths are relative to the API root (`/rest`). Caller-supplied ids are
//! percent-encoded as single path segments.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::error::{VmwareError, VmwareErrorKind, VmwareResult};

pub const SESSION: &str = "/com/vmware/cis/session";
pub const SESSION_GET: &str = "/com/vmware/cis/session?~action=get";

pub const VM: &str = "/vcenter/vm";
pub const FOLDER: &str = "/vcenter/folder";
pub const CLUSTER: &str = "/vcenter/cluster";
pub const DATACENTER: &str = "/vcenter/datacenter";
pub const DATASTORE: &str = "/vcenter/datastore";
pub const HOST: &str = "/vcenter/host";
pub const NETWORK: &str = "/vcenter/network";
pub const RESOURCE_POOL: &str = "/vcenter/resource-pool";

// RFC 3986 path segment: everything but unreserved and sub-delims.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Encode `id` as one path segment. `.` and `..` are refused since URL
/// parsing would resolve them even when escaped.
pub fn segment(id: &str) -> VmwareResult<String> {
    if id == "." || id == ".." {
        return Err(VmwareError::new(
            VmwareErrorKind::InvalidArgument,
            format!("Invalid identifier: {id:?}"),
        ));
    }
    Ok(utf8_percent_encode(id, SEGMENT).to_string())
}

/// `{collection}` or `{collection}/{id}`.
pub fn collection_or_item(collection: &str, id: Option<&str>) -> VmwareResult<String> {
    match id {
        Some(id) => Ok(format!("{collection}/{}", segment(id)?)),
        None => Ok(collection.to_string()),
    }
}

/// `/vcenter/vm/{vm_id}{suffix}`; `suffix` is empty or starts with `/` and
/// is used as is.
pub fn vm_path(vm_id: &str, suffix: &str) -> VmwareResult<String> {
    Ok(format!("{VM}/{}{suffix}", segment(vm_id)?))
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Vocabularies
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A closed set of path segments, validated before any request is sent.
pub trait Vocabulary: Copy + Sized + 'static {
    /// Every accepted value, in the order they are reported to callers.
    const ALL: &'static [Self];

    fn as_str(&self) -> &'static str;

    fn accepted() -> Vec<&'static str> {
        Self::ALL.iter().map(|v| v.as_str()).collect()
    }

    /// Exact, case-sensitive lookup.
    fn parse_option(value: &str) -> VmwareResult<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.as_str() == value)
            .ok_or_else(|| VmwareError::invalid_option(&Self::accepted()))
    }
}

/// Guest information modules under `/vcenter/vm/{vm}/guest`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuestInfo {
    Identity,
    LocalFilesystem,
    Power,
}

impl Vocabulary for GuestInfo {
    const ALL: &'static [Self] = &[Self::Identity, Self::LocalFilesystem, Self::Power];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Identity => "identity",
            Self::LocalFilesystem => "local-filesystem",
            Self::Power => "power",
        }
    }
}

/// Storage adapter families under `/vcenter/vm/{vm}/hardware`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdapterType {
    Sata,
    Scsi,
}

impl Vocabulary for AdapterType {
    const ALL: &'static [Self] = &[Self::Sata, Self::Scsi];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Sata => "sata",
            Self::Scsi => "scsi",
        }
    }
}

/// Virtual hardware components under `/vcenter/vm/{vm}/hardware`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HardwareComponent {
    Cdrom,
    Cpu,
    Disk,
    Ethernet,
    Floppy,
    Memory,
    Parallel,
    Serial,
}

impl Vocabulary for HardwareComponent {
    const ALL: &'static [Self] = &[
        Self::Cdrom,
        Self::Cpu,
        Self::Disk,
        Self::Ethernet,
        Self::Floppy,
        Self::Memory,
        Self::Parallel,
        Self::Serial,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Cdrom => "cdrom",
            Self::Cpu => "cpu",
            Self::Disk => "disk",
            Self::Ethernet => "ethernet",
            Self::Floppy => "floppy",
            Self::Memory => "memory",
            Self::Parallel => "parallel",
            Self::Serial => "serial",
        }
    }
}

/// Power transitions under `/vcenter/vm/{vm}/power`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerAction {
    Start,
    Stop,
    Suspend,
    Reset,
}

impl Vocabulary for PowerAction {
    const ALL: &'static [Self] = &[Self::Start, Self::Stop, Self::Suspend, Self::Reset];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Suspend => "suspend",
            Self::Reset => "reset",
        }
    }
}
