use crate::error::Error;
use base64::Engine;
use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncReadExt;
use tracing::{info, warn};

/// Reads the whole file into memory. The handle is closed when this returns, on success or not.
pub async fn load(path: &Path) -> Result<Vec<u8>, Error> {
    info!("Reading image from {}", path.display());

    let mut file = File::open(path).await.map_err(Error::OpenImage)?;

    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).await.map_err(Error::ReadImage)?;

    info!("Read {} bytes", bytes.len());

    if !is_image(&bytes) {
        warn!(
            "{} does not look like a JPEG, PNG, WebP or GIF image, sending it anyway",
            path.display()
        );
    }

    Ok(bytes)
}

/// Standard padded base64
pub fn encode(bytes: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(bytes)
}

fn is_image(bytes: &[u8]) -> bool {
    matches!(
        bytes,
        [0xFF, 0xD8, 0xFF, ..]
            | [0x89, b'P', b'N', b'G', ..]
            | [0x52, 0x49, 0x46, 0x46, ..]
            | [b'G', b'I', b'F', b'8', ..]
    )
}
