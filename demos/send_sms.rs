use std::io;

use asanak::AsanakClient;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("asanak=debug")),
        )
        .init();

    let destination = std::env::var("ASANAK_DESTINATION").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "ASANAK_DESTINATION environment variable is required",
        )
    })?;
    let message = std::env::var("ASANAK_MESSAGE")
        .unwrap_or_else(|_| "Hello from the asanak demo.".to_owned());

    // Credentials and endpoint come from ASANAK_USERNAME, ASANAK_PASSWORD,
    // ASANAK_SOURCE_NUMBER and ASANAK_WEBSERVICE.
    let client = AsanakClient::builder().debug(true).build()?;

    match client.send(destination, message).await {
        Ok(response) => println!("{}", response.body()),
        Err(asanak::AsanakError::SoapFault { code, message, .. }) => {
            eprintln!("gateway rejected the message: {code}: {message}");
        }
        Err(err) => return Err(err.into()),
    }

    Ok(())
}
