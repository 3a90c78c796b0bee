/// Fault details scraped from a `<soap:Fault>` response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoapFault {
    pub code: String,
    pub message: String,
}

/// Successful `sendSms` reply. The gateway's XML is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendSmsResponse {
    body: String,
}

impl SendSmsResponse {
    pub(crate) fn new(body: String) -> Self {
        Self { body }
    }

    /// Borrow the raw response XML.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Take ownership of the raw response XML.
    pub fn into_body(self) -> String {
        self.body
    }
}

impl AsRef<str> for SendSmsResponse {
    fn as_ref(&self) -> &str {
        &self.body
    }
}
