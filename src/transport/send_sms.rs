use std::borrow::Cow;

use crate::domain::{Password, SendSms, SourceAddress, Username, XmlEscaping};

/// Vendor constant selecting Unicode (UTF-8) message encoding.
pub const MSG_ENCODING_UNICODE: u8 = 8;

/// Render the SOAP 1.1 `sendSms` envelope.
///
/// With [`XmlEscaping::Raw`] every value is embedded verbatim, matching what the
/// gateway has always been sent. Credentials are never escaped.
pub fn encode_send_sms_envelope(
    username: &Username,
    password: &Password,
    source: &SourceAddress,
    request: &SendSms,
    escaping: XmlEscaping,
) -> String {
    let destination = embed(request.destination().as_str(), escaping);
    let message = embed(request.message().as_str(), escaping);

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<SOAP-ENV:Envelope xmlns:SOAP-ENV="http://schemas.xmlsoap.org/soap/envelope/"
                   xmlns:ns1="http://webService.compositeSmsGateway.services.sdp.peykasa.com/">
  <SOAP-ENV:Body>
    <ns1:sendSms>
      <userCredential>
        <username>{username}</username>
        <password>{password}</password>
      </userCredential>
      <srcAddresses>{source}</srcAddresses>
      <destAddresses>{destination}</destAddresses>
      <msgBody>{message}</msgBody>
      <msgEncoding>{encoding}</msgEncoding>
    </ns1:sendSms>
  </SOAP-ENV:Body>
</SOAP-ENV:Envelope>"#,
        username = username.as_str(),
        password = password.expose(),
        source = source.as_str(),
        encoding = MSG_ENCODING_UNICODE,
    )
}

fn embed(value: &str, escaping: XmlEscaping) -> Cow<'_, str> {
    match escaping {
        XmlEscaping::Raw => Cow::Borrowed(value),
        XmlEscaping::Escaped => quick_xml::escape::escape(value),
    }
}
