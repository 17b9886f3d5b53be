//! Collaborator boundary for live-system inspection

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of sending identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IdentityKind {
    EmailAddress,
    Domain,
}

impl fmt::Display for IdentityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentityKind::EmailAddress => write!(f, "email"),
            IdentityKind::Domain => write!(f, "domain"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerificationStatus {
    Pending,
    Success,
    Failed,
    TemporaryFailure,
    NotStarted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationAttributes {
    pub status: VerificationStatus,
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DkimAttributes {
    pub enabled: bool,
    #[serde(default)]
    pub tokens: Vec<String>,
}

/// A DNS zone; `name` may carry the trailing root dot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostedZone {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSet {
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: String,
    #[serde(default)]
    pub values: Vec<String>,
}

/// Read access to the mail service's identities
pub trait IdentityInspector {
    fn list_identities(&self, kind: IdentityKind) -> Result<Vec<String>>;

    /// `None` when the service has no attributes for `identity`
    fn verification_attributes(&self, identity: &str) -> Result<Option<VerificationAttributes>>;

    fn dkim_attributes(&self, identity: &str) -> Result<Option<DkimAttributes>>;
}

/// Read access to hosted DNS zones
pub trait DnsInspector {
    fn list_hosted_zones(&self) -> Result<Vec<HostedZone>>;

    fn list_record_sets(&self, zone_id: &str) -> Result<Vec<RecordSet>>;
}
