use serde::{Deserialize, Serialize};

/// Client-observed context captured at submission time.
///
/// Everything in here is opportunistic, best-effort data gathered in the
/// browser before the form is submitted: user-agent derived fields, screen
/// and locale information, and IP-derived geolocation from a public lookup
/// service. None of it is verified or authoritative, and any field may be
/// absent when the gathering step failed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientMetadata {
    /// Browser family derived from user-agent substring matching.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub browser: Option<String>,

    /// Device class: "Mobile", "Tablet" or "Desktop".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_type: Option<String>,

    /// Screen resolution as "WIDTHxHEIGHT".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screen_resolution: Option<String>,

    /// IANA timezone name reported by the browser.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,

    /// BCP 47 language tag reported by the browser.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Public IP address from the first lookup call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,

    /// IP-derived city.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    /// IP-derived region or state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// IP-derived country name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    /// IP-derived latitude.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,

    /// IP-derived longitude.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

/// Display fallback used everywhere a metadata field is rendered: the
/// spreadsheet row mapping, the admin detail dialog and the CSV exports all
/// show the literal string "N/A" for a missing or blank value.
pub fn display_or_na(value: &Option<String>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.clone(),
        _ => "N/A".to_string(),
    }
}

/// Same fallback for coordinate fields.
pub fn coord_or_na(value: &Option<f64>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "N/A".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_and_blank_fields_render_as_na() {
        assert_eq!(display_or_na(&None), "N/A");
        assert_eq!(display_or_na(&Some(String::new())), "N/A");
        assert_eq!(display_or_na(&Some("   ".to_string())), "N/A");
        assert_eq!(display_or_na(&Some("Lisbon".to_string())), "Lisbon");
    }

    #[test]
    fn coordinates_render_as_na_when_absent() {
        assert_eq!(coord_or_na(&None), "N/A");
        assert_eq!(coord_or_na(&Some(38.72)), "38.72");
    }
}
