//! Transport layer: SOAP wire format (envelope rendering and fault detection).

mod fault;
mod send_sms;

pub use fault::{UNKNOWN_FAULT_CODE, UNKNOWN_FAULT_MESSAGE, parse_soap_fault};
pub use send_sms::{MSG_ENCODING_UNICODE, encode_send_sms_envelope};
