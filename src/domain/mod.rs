//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod response;
mod validation;
mod value;

pub use request::{SendSms, XmlEscaping};
pub use response::{SendSmsResponse, SoapFault};
pub use validation::ValidationError;
pub use value::{
    DestinationAddress, Endpoint, MASKED_PLACEHOLDER, MessageText, Password, SourceAddress,
    Username, mask_phone,
};
