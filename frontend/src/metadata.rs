//! Client metadata gathering.
//!
//! Runs once when a form page mounts, before the visitor submits: derive
//! browser family and device class from the user agent, read screen /
//! timezone / language from the browser, then chain two public IP lookup
//! calls (ipify for the address, ipapi for the geolocation). Every step is
//! best-effort; whatever fails just stays empty and the form submits with
//! partial metadata.

use gloo_console::warn;
use gloo_net::http::Request;
use regex::Regex;
use serde::Deserialize;
use wasm_bindgen::JsValue;

use common::model::metadata::ClientMetadata;

#[derive(Debug, Deserialize)]
struct IpifyResponse {
    ip: String,
}

#[derive(Debug, Deserialize)]
struct IpapiResponse {
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    region: Option<String>,
    #[serde(default)]
    country_name: Option<String>,
    #[serde(default)]
    latitude: Option<f64>,
    #[serde(default)]
    longitude: Option<f64>,
}

/// Browser family by user-agent substring matching. Order matters:
/// Chromium-based browsers embed "Chrome", and everything embeds "Safari".
pub fn browser_family(user_agent: &str) -> Option<String> {
    let family = if user_agent.contains("Edg") {
        "Edge"
    } else if user_agent.contains("OPR") || user_agent.contains("Opera") {
        "Opera"
    } else if user_agent.contains("Firefox") {
        "Firefox"
    } else if user_agent.contains("Chrome") {
        "Chrome"
    } else if user_agent.contains("Safari") {
        "Safari"
    } else if user_agent.contains("MSIE") || user_agent.contains("Trident") {
        "Internet Explorer"
    } else {
        return None;
    };
    Some(family.to_string())
}

/// Device class from the user agent: Mobile, Tablet or Desktop.
pub fn device_class(user_agent: &str) -> String {
    let tablet = Regex::new(r"(?i)ipad|tablet").unwrap();
    let mobile = Regex::new(r"(?i)mobi|android|iphone").unwrap();
    if tablet.is_match(user_agent) {
        "Tablet".to_string()
    } else if mobile.is_match(user_agent) {
        "Mobile".to_string()
    } else {
        "Desktop".to_string()
    }
}

fn browser_timezone() -> Option<String> {
    let options = js_sys::Intl::DateTimeFormat::new(&js_sys::Array::new(), &js_sys::Object::new())
        .resolved_options();
    js_sys::Reflect::get(&options, &JsValue::from_str("timeZone"))
        .ok()
        .and_then(|tz| tz.as_string())
}

/// Gather everything available without leaving the page.
fn local_metadata() -> ClientMetadata {
    let mut metadata = ClientMetadata::default();

    if let Some(window) = web_sys::window() {
        let navigator = window.navigator();
        if let Ok(user_agent) = navigator.user_agent() {
            metadata.browser = browser_family(&user_agent);
            metadata.device_type = Some(device_class(&user_agent));
        }
        metadata.language = navigator.language();
        if let Ok(screen) = window.screen() {
            if let (Ok(width), Ok(height)) = (screen.width(), screen.height()) {
                metadata.screen_resolution = Some(format!("{width}x{height}"));
            }
        }
    }
    metadata.timezone = browser_timezone();
    metadata
}

/// Full collection pass: local fields plus the chained IP lookups.
pub async fn collect() -> ClientMetadata {
    let mut metadata = local_metadata();

    let ip = match Request::get("https://api.ipify.org?format=json").send().await {
        Ok(response) => match response.json::<IpifyResponse>().await {
            Ok(body) => Some(body.ip),
            Err(e) => {
                warn!(format!("ip lookup returned an unexpected body: {e}"));
                None
            }
        },
        Err(e) => {
            warn!(format!("ip lookup failed: {e}"));
            None
        }
    };

    let Some(ip) = ip else {
        return metadata;
    };
    metadata.ip = Some(ip.clone());

    match Request::get(&format!("https://ipapi.co/{ip}/json/")).send().await {
        Ok(response) => match response.json::<IpapiResponse>().await {
            Ok(geo) => {
                metadata.city = geo.city;
                metadata.region = geo.region;
                metadata.country = geo.country_name;
                metadata.latitude = geo.latitude;
                metadata.longitude = geo.longitude;
            }
            Err(e) => warn!(format!("geolocation lookup returned an unexpected body: {e}")),
        },
        Err(e) => warn!(format!("geolocation lookup failed: {e}")),
    }

    metadata
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHROME_DESKTOP: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
         (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";
    const SAFARI_IPHONE: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_4 like Mac OS X) \
         AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Mobile/15E148 Safari/604.1";
    const EDGE_DESKTOP: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
         (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36 Edg/124.0.2478.51";

    #[test]
    fn browser_families_resolve_in_precedence_order() {
        assert_eq!(browser_family(CHROME_DESKTOP).as_deref(), Some("Chrome"));
        assert_eq!(browser_family(SAFARI_IPHONE).as_deref(), Some("Safari"));
        assert_eq!(browser_family(EDGE_DESKTOP).as_deref(), Some("Edge"));
        assert_eq!(browser_family("curl/8.0"), None);
    }

    #[test]
    fn device_classes_cover_mobile_tablet_desktop() {
        assert_eq!(device_class(CHROME_DESKTOP), "Desktop");
        assert_eq!(device_class(SAFARI_IPHONE), "Mobile");
        assert_eq!(
            device_class("Mozilla/5.0 (iPad; CPU OS 17_4 like Mac OS X) Safari/604.1"),
            "Tablet"
        );
    }
}
