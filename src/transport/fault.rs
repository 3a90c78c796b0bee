use std::sync::LazyLock;

use regex::Regex;

use crate::domain::SoapFault;

/// Code reported when a fault carries no `<faultcode>`.
pub const UNKNOWN_FAULT_CODE: &str = "UNKNOWN";
/// Message reported when a fault carries no `<faultstring>`.
pub const UNKNOWN_FAULT_MESSAGE: &str = "Unknown SOAP fault";

static FAULT_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<soap:Fault").expect("valid fault marker regex"));
static FAULT_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<faultcode>(.*?)</faultcode>").expect("valid faultcode regex")
});
static FAULT_STRING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<faultstring>(.*?)</faultstring>").expect("valid faultstring regex")
});

/// Scan a response body for a SOAP fault.
///
/// This is a textual scan, not an XML parse: the body counts as a fault when it
/// contains `<soap:Fault` in any letter case. Code and message come from the
/// first `<faultcode>`/`<faultstring>` on a single line; missing or empty values
/// fall back to [`UNKNOWN_FAULT_CODE`] and [`UNKNOWN_FAULT_MESSAGE`].
pub fn parse_soap_fault(body: &str) -> Option<SoapFault> {
    if !FAULT_MARKER.is_match(body) {
        return None;
    }

    Some(SoapFault {
        code: first_capture(&FAULT_CODE, body).unwrap_or(UNKNOWN_FAULT_CODE).to_owned(),
        message: first_capture(&FAULT_STRING, body)
            .unwrap_or(UNKNOWN_FAULT_MESSAGE)
            .to_owned(),
    })
}

fn first_capture<'a>(regex: &Regex, body: &'a str) -> Option<&'a str> {
    regex
        .captures(body)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|value| !value.is_empty())
}
