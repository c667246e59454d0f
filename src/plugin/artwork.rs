use std::path::{Path, PathBuf};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use isahc::AsyncReadResponseExt;
use url::Url;

use crate::config::ConfigPaths;

/// Errors that can occur while resolving artwork to a local file.
#[derive(thiserror::Error, Debug)]
pub enum ArtworkError {
    /// The art URL could not be parsed.
    #[error("invalid artwork URL: {0}")]
    InvalidUrl(String),

    /// URL scheme this plugin cannot turn into a local file.
    #[error("unsupported artwork URL scheme: {0}")]
    UnsupportedScheme(String),

    /// `data:` payload was not valid base64.
    #[error("failed to decode embedded artwork: {0}")]
    Decode(#[from] base64::DecodeError),

    /// Remote artwork download failed.
    #[error("artwork download failed: {0}")]
    Fetch(#[from] isahc::Error),

    /// Cache file could not be written.
    #[error("artwork cache error: {0}")]
    Io(#[from] std::io::Error),
}

/// Resolve an MPRIS `artUrl` to a local image file.
///
/// `file://` URLs map straight to their path, `data:` URLs with a base64
/// payload are decoded into the cache, and `http(s)://` URLs are downloaded
/// into the cache. A download of the same URL is reused when it is still
/// around. With no `cache_dir` override, the XDG cache directory is used.
///
/// # Errors
///
/// Returns `ArtworkError` when the URL is malformed, uses a scheme that
/// cannot produce a local file, or the decode/download/cache-write fails
pub async fn resolve(art_url: &str, cache_dir: Option<&Path>) -> Result<PathBuf, ArtworkError> {
    // data: URLs embed the payload after the first comma; Url's path-based
    // view of them is not useful here, so handle the raw string.
    if let Some(payload) = art_url.strip_prefix("data:") {
        return decode_embedded(payload, &resolve_cache_dir(cache_dir)?).await;
    }

    let url =
        Url::parse(art_url).map_err(|e| ArtworkError::InvalidUrl(format!("{art_url}: {e}")))?;

    match url.scheme() {
        "file" => url
            .to_file_path()
            .map_err(|()| ArtworkError::InvalidUrl(art_url.to_string())),
        "http" | "https" => fetch_remote(&url, &resolve_cache_dir(cache_dir)?).await,
        other => Err(ArtworkError::UnsupportedScheme(other.to_string())),
    }
}

fn resolve_cache_dir(cache_dir: Option<&Path>) -> Result<PathBuf, ArtworkError> {
    match cache_dir {
        Some(dir) => Ok(dir.to_path_buf()),
        None => Ok(ConfigPaths::artwork_cache_dir()?),
    }
}

/// Decode a `data:<mime>;base64,<payload>` URL into the cache.
async fn decode_embedded(payload: &str, cache_dir: &Path) -> Result<PathBuf, ArtworkError> {
    let Some((header, data)) = payload.split_once(',') else {
        return Err(ArtworkError::InvalidUrl(
            "data: URL without payload".to_string(),
        ));
    };

    if !header.ends_with(";base64") {
        return Err(ArtworkError::UnsupportedScheme(
            "data URL without base64 encoding".to_string(),
        ));
    }

    let bytes = BASE64.decode(data.trim())?;

    let mime = header.split(';').next().unwrap_or_default();
    let extension = extension_for_mime(mime);
    let digest = md5::compute(&bytes);

    let path = cache_dir.join(format!("{digest:x}.{extension}"));
    tokio::fs::create_dir_all(cache_dir).await?;
    tokio::fs::write(&path, &bytes).await?;

    Ok(path)
}

/// Download remote artwork into the cache.
async fn fetch_remote(url: &Url, cache_dir: &Path) -> Result<PathBuf, ArtworkError> {
    let digest = format!("{:x}", md5::compute(url.as_str()));
    if let Some(existing) = find_cached(cache_dir, &digest) {
        return Ok(existing);
    }

    let mut response = isahc::get_async(url.as_str()).await?;

    let extension = response
        .headers()
        .get("content-type")
        .and_then(|value| value.to_str().ok())
        .map(extension_for_mime)
        .unwrap_or_else(|| "img".to_string());

    let bytes = response.bytes().await?;

    let path = cache_dir.join(format!("{digest}.{extension}"));
    tokio::fs::create_dir_all(cache_dir).await?;
    tokio::fs::write(&path, &bytes).await?;

    Ok(path)
}

/// Map a mime type like `image/png` to a file extension.
fn extension_for_mime(mime: &str) -> String {
    mime.split('/')
        .nth(1)
        .map(|subtype| subtype.split(';').next().unwrap_or(subtype))
        .filter(|subtype| !subtype.is_empty())
        .unwrap_or("img")
        .to_string()
}

fn find_cached(cache_dir: &Path, stem: &str) -> Option<PathBuf> {
    for entry in std::fs::read_dir(cache_dir).ok()?.flatten() {
        let path = entry.path();
        if path.file_stem().and_then(|s| s.to_str()) == Some(stem) {
            return Some(path);
        }
    }
    None
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn file_urls_resolve_to_their_path() {
        let path = resolve("file:///tmp/covers/album.png", None).await.unwrap();
        assert_eq!(path, PathBuf::from("/tmp/covers/album.png"));
    }

    #[tokio::test]
    async fn file_urls_decode_percent_escapes() {
        let path = resolve("file:///tmp/My%20Album/cover.jpg", None)
            .await
            .unwrap();
        assert_eq!(path, PathBuf::from("/tmp/My Album/cover.jpg"));
    }

    #[tokio::test]
    async fn data_urls_decode_into_the_cache() {
        let dir = tempfile::tempdir().unwrap();
        // Single transparent-pixel GIF, the usual smallest test image.
        let art_url = "data:image/gif;base64,R0lGODlhAQABAIAAAAAAAP///yH5BAEAAAAALAAAAAABAAEAAAIBRAA7";

        let path = resolve(art_url, Some(dir.path())).await.unwrap();
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("gif"));
        assert!(path.starts_with(dir.path()));

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"GIF89a"));
    }

    #[tokio::test]
    async fn data_urls_without_base64_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let result = resolve("data:text/plain,hello", Some(dir.path())).await;
        assert!(matches!(result, Err(ArtworkError::UnsupportedScheme(_))));
    }

    #[tokio::test]
    async fn unsupported_schemes_are_rejected() {
        let result = resolve("ftp://example.com/cover.png", None).await;
        assert!(matches!(result, Err(ArtworkError::UnsupportedScheme(_))));
    }

    #[tokio::test]
    async fn garbage_urls_are_rejected() {
        let result = resolve("not a url at all", None).await;
        assert!(matches!(result, Err(ArtworkError::InvalidUrl(_))));
    }

    #[test]
    fn mime_types_map_to_extensions() {
        assert_eq!(extension_for_mime("image/png"), "png");
        assert_eq!(extension_for_mime("image/jpeg; charset=binary"), "jpeg");
        assert_eq!(extension_for_mime("nonsense"), "img");
    }
}
