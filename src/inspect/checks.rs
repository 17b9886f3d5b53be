//! Checks against a deployed mail setup, built on the inspector traits

use anyhow::{bail, Context, Result};
use tracing::debug;

use super::types::{DnsInspector, HostedZone, IdentityInspector, IdentityKind};
use crate::plan::{assert_text, Expectation};
use crate::report::CheckVerdict;

/// Marker every DMARC policy record starts with
pub const DMARC_MARKER: &str = "v=DMARC1";

/// The identity is listed and has verification attributes
pub fn verify_email_identity<I>(inspector: &I, email: &str) -> Result<CheckVerdict>
where
    I: IdentityInspector + ?Sized,
{
    require_identity(inspector, IdentityKind::EmailAddress, email)?;
    Ok(CheckVerdict::Passed)
}

/// The domain is listed, has verification attributes and has DKIM enabled
pub fn verify_domain_identity<I>(inspector: &I, domain: &str) -> Result<CheckVerdict>
where
    I: IdentityInspector + ?Sized,
{
    require_identity(inspector, IdentityKind::Domain, domain)?;

    let dkim = inspector
        .dkim_attributes(domain)
        .with_context(|| format!("failed to get DKIM attributes for {domain}"))?;
    let Some(dkim) = dkim else {
        bail!("DKIM attributes not found for {domain}");
    };
    assert_text(
        domain,
        "dkim_enabled",
        &dkim.enabled.to_string(),
        &Expectation::Equals("true".to_string()),
    )?;
    Ok(CheckVerdict::Passed)
}

/// The `_dmarc` TXT record for `domain`, when present, carries a DMARC policy.
///
/// Skipped when no hosted zone covers the domain or the zone has no DMARC
/// record.
pub fn verify_dmarc_record<D>(dns: &D, domain: &str) -> Result<CheckVerdict>
where
    D: DnsInspector + ?Sized,
{
    let zones = dns.list_hosted_zones().context("failed to list hosted zones")?;
    let Some(zone) = select_zone(&zones, domain) else {
        return Ok(CheckVerdict::skipped(format!("no hosted zone covers {domain}")));
    };
    debug!(zone = %zone.name, domain, "selected hosted zone");

    let records = dns
        .list_record_sets(&zone.id)
        .with_context(|| format!("failed to list records in zone {}", zone.name))?;

    let record_name = format!("_dmarc.{}", normalize(domain));
    let Some(record) = records
        .iter()
        .find(|r| r.record_type == "TXT" && normalize(&r.name) == record_name)
    else {
        return Ok(CheckVerdict::skipped(format!(
            "no DMARC record {record_name} in zone {}",
            zone.name
        )));
    };

    let value = record.values.first().map(String::as_str).unwrap_or_default();
    assert_text(
        &record_name,
        "value",
        value,
        &Expectation::Contains(DMARC_MARKER.to_string()),
    )?;
    Ok(CheckVerdict::Passed)
}

/// Pick the zone whose name is the longest suffix of `domain`
pub fn select_zone<'a>(zones: &'a [HostedZone], domain: &str) -> Option<&'a HostedZone> {
    let domain = normalize(domain);
    zones
        .iter()
        .filter(|zone| {
            let zone_name = normalize(&zone.name);
            !zone_name.is_empty()
                && (domain == zone_name || domain.ends_with(&format!(".{zone_name}")))
        })
        .max_by_key(|zone| normalize(&zone.name).len())
}

fn require_identity<I>(inspector: &I, kind: IdentityKind, identity: &str) -> Result<()>
where
    I: IdentityInspector + ?Sized,
{
    let identities = inspector
        .list_identities(kind)
        .with_context(|| format!("failed to list {kind} identities"))?;
    if !identities.iter().any(|i| i == identity) {
        bail!("{kind} identity {identity} was not found");
    }

    let attributes = inspector
        .verification_attributes(identity)
        .with_context(|| format!("failed to get verification attributes for {identity}"))?;
    match attributes {
        Some(attributes) => {
            debug!(identity, status = ?attributes.status, "identity verification status");
            Ok(())
        }
        None => bail!("verification attributes not found for {kind} identity {identity}"),
    }
}

/// Lowercase and drop the trailing root dot
fn normalize(name: &str) -> String {
    name.trim_end_matches('.').to_ascii_lowercase()
}
