use crate::domain::value::{DestinationAddress, MessageText};

/// How user-supplied text is embedded into the SOAP envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum XmlEscaping {
    /// Embed destination and message verbatim, as the gateway's reference client does.
    #[default]
    Raw,
    /// Escape `&`, `<`, `>`, `'` and `"` before embedding.
    Escaped,
}

/// A single `sendSms` call: one destination, one message body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendSms {
    destination: DestinationAddress,
    message: MessageText,
}

impl SendSms {
    pub fn new(destination: DestinationAddress, message: MessageText) -> Self {
        Self {
            destination,
            message,
        }
    }

    pub fn destination(&self) -> &DestinationAddress {
        &self.destination
    }

    pub fn message(&self) -> &MessageText {
        &self.message
    }
}
