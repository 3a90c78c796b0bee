//! Rust client for the Asanak CompositeSmsGateway SOAP API.
//!
//! The crate is split the usual way: a domain layer of validated types, a
//! transport layer for the SOAP wire format, and a small client layer that
//! resolves configuration and performs one HTTPS exchange per message.
//!
//! ```rust,no_run
//! use asanak::AsanakClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), asanak::AsanakError> {
//!     let client = AsanakClient::builder()
//!         .username("...")
//!         .password("...")
//!         .source_address("98100")
//!         .build()?;
//!     let response = client.send("09123456789", "hello").await?;
//!     println!("{}", response.body());
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{
    AsanakClient, AsanakClientBuilder, AsanakError, ClientConfig, DEFAULT_TIMEOUT, ErrorKind,
};
pub use domain::{
    DestinationAddress, Endpoint, MessageText, Password, SendSms, SendSmsResponse, SoapFault,
    SourceAddress, Username, ValidationError, XmlEscaping, mask_phone,
};
pub use transport::{
    MSG_ENCODING_UNICODE, UNKNOWN_FAULT_CODE, UNKNOWN_FAULT_MESSAGE, parse_soap_fault,
};
