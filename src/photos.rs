// src/photos.rs
use base64::Engine;
use mime::Mime;
use rand::rngs::OsRng;
use rand::RngCore;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::errors::ServerError;

pub const PUBLIC_PREFIX: &str = "/uploads";
const NAME_PREFIX: &str = "pet";
const RANDOM_BYTES: usize = 6;

/// Uploaded pet photos on local disk, served back under [`PUBLIC_PREFIX`].
#[derive(Debug, Clone)]
pub struct PhotoStore {
    dir: PathBuf,
    max_bytes: usize,
}

impl PhotoStore {
    pub fn new(dir: impl Into<PathBuf>, max_bytes: usize) -> Result<Self, ServerError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .map_err(|e| ServerError::Upload(format!("Cannot create {}: {e}", dir.display())))?;
        Ok(Self { dir, max_bytes })
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Stores one image and returns its public URL.
    pub fn upload(
        &self,
        original_name: &str,
        content_type: &str,
        bytes: &[u8],
        now_millis: i64,
    ) -> Result<String, ServerError> {
        let mime: Mime = content_type
            .parse()
            .map_err(|_| ServerError::Upload(format!("Unknown content type: {content_type}")))?;
        if mime.type_() != mime::IMAGE {
            return Err(ServerError::Upload("Only image uploads are accepted".into()));
        }
        if bytes.is_empty() {
            return Err(ServerError::Upload("Empty upload".into()));
        }
        if bytes.len() > self.max_bytes {
            return Err(ServerError::Upload(format!(
                "Image is larger than {} bytes",
                self.max_bytes
            )));
        }

        let ext = extension_for(original_name, &mime);
        let file_name = format!("{NAME_PREFIX}_{now_millis}_{}.{ext}", random_suffix());
        let path = self.dir.join(&file_name);

        fs::write(&path, bytes).map_err(|e| {
            warn!(path = %path.display(), error = %e, "photo write failed");
            ServerError::Upload(format!("Failed to store image: {e}"))
        })?;

        info!(file = %file_name, size = bytes.len(), "photo stored");
        Ok(format!("{PUBLIC_PREFIX}/{file_name}"))
    }

    /// Returns whether a file was removed.
    pub fn delete(&self, file_name: &str) -> Result<bool, ServerError> {
        let Some(path) = self.path_for(file_name) else {
            return Ok(false);
        };
        match fs::remove_file(path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(ServerError::Upload(format!("Failed to delete image: {e}"))),
        }
    }

    pub fn open(&self, file_name: &str) -> Result<Option<(Vec<u8>, Mime)>, ServerError> {
        let Some(path) = self.path_for(file_name) else {
            return Ok(None);
        };
        match fs::read(&path) {
            Ok(bytes) => Ok(Some((bytes, mime_for(file_name)))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ServerError::Upload(format!("Failed to read image: {e}"))),
        }
    }

    fn path_for(&self, file_name: &str) -> Option<PathBuf> {
        is_safe_name(file_name).then(|| self.dir.join(file_name))
    }
}

/// Last path segment of a photo URL.
pub fn file_name_from_url(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or(url)
}

fn is_safe_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

fn random_suffix() -> String {
    let mut buf = [0u8; RANDOM_BYTES];
    OsRng.fill_bytes(&mut buf);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buf)
}

fn extension_for(original_name: &str, mime: &Mime) -> String {
    let from_name = original_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| (1..=5).contains(&ext.len()) && ext.chars().all(|c| c.is_ascii_alphanumeric()));

    from_name.unwrap_or_else(|| match mime.subtype().as_str() {
        "jpeg" => "jpg".to_string(),
        other if other.chars().all(|c| c.is_ascii_alphanumeric()) => other.to_string(),
        _ => "img".to_string(),
    })
}

fn mime_for(file_name: &str) -> Mime {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, e)| e.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => mime::IMAGE_JPEG,
        "png" => mime::IMAGE_PNG,
        "gif" => mime::IMAGE_GIF,
        "svg" => mime::IMAGE_SVG,
        "webp" => "image/webp".parse().unwrap_or(mime::APPLICATION_OCTET_STREAM),
        _ => mime::APPLICATION_OCTET_STREAM,
    }
}
