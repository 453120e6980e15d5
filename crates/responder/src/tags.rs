//! Tag keys stamped on every resource a run creates or touches.

use bulwark_ports::ResourceTag;
use chrono::{DateTime, SecondsFormat, Utc};

/// Marks a resource as touched by incident response.
pub const INCIDENT_RESPONSE: &str = "IncidentResponse";
/// Run identifier.
pub const INCIDENT_ID: &str = "IncidentId";
/// Provenance of a created resource.
pub const CREATED_BY: &str = "CreatedBy";
/// Isolation time on an instance.
pub const ISOLATED_AT: &str = "IsolatedAt";
/// Owner of a stored rotated key.
pub const IAM_USER: &str = "IAMUser";

/// The pair of tags every run-scoped resource carries.
pub(crate) fn incident(incident_id: &str) -> Vec<ResourceTag> {
    vec![
        ResourceTag::new(INCIDENT_RESPONSE, "true"),
        ResourceTag::new(INCIDENT_ID, incident_id),
    ]
}

/// UTC ISO-8601 with microseconds and a `Z` suffix.
pub(crate) fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn timestamp_is_utc_iso8601() {
        let at = Utc.with_ymd_and_hms(2026, 10, 16, 8, 30, 0).unwrap();
        assert_eq!(timestamp(at), "2026-10-16T08:30:00.000000Z");
    }

    #[test]
    fn incident_tags() {
        let tags = incident("run-7");
        assert_eq!(tags[0], ResourceTag::new("IncidentResponse", "true"));
        assert_eq!(tags[1], ResourceTag::new("IncidentId", "run-7"));
    }
}
