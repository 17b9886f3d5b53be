//! Live inspection of a deployed mail setup
//!
//! The service clients live behind [`IdentityInspector`] and [`DnsInspector`];
//! the checks here only interpret what those return, using the same
//! expectations as plan validation.

mod checks;
mod types;


pub use checks::{
    select_zone, verify_dmarc_record, verify_domain_identity, verify_email_identity, DMARC_MARKER,
};
pub use types::{
    DkimAttributes, DnsInspector, HostedZone, IdentityInspector, IdentityKind, RecordSet,
    VerificationAttributes, VerificationStatus,
};
