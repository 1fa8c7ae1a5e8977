//! Raw file access for image references in the gallery.

use crate::error::FileError;
use axum::body::Body;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use percent_encoding::percent_decode_str;
use tokio::fs::File;
use tokio_util::io::ReaderStream;

/// Filesystem path named by a request URI path
pub fn request_path(uri_path: &str) -> String {
    percent_decode_str(uri_path).decode_utf8_lossy().into_owned()
}

/// An opened regular file ready to be streamed. The handle is owned by the
/// response body and closed when the body is dropped.
pub struct RawFile {
    file: File,
    content_type: String,
}

impl RawFile {
    pub async fn open(path: &str) -> Result<Self, FileError> {
        let file = File::open(path).await.map_err(|source| FileError::Open {
            path: path.to_string(),
            source,
        })?;
        let metadata = file.metadata().await.map_err(|source| FileError::Metadata {
            path: path.to_string(),
            source,
        })?;
        if metadata.is_dir() {
            return Err(FileError::IsDirectory {
                path: path.to_string(),
            });
        }
        Ok(Self {
            file,
            content_type: mime_guess::from_path(path)
                .first_or_octet_stream()
                .to_string(),
        })
    }
}

impl IntoResponse for RawFile {
    fn into_response(self) -> Response {
        let body = Body::from_stream(ReaderStream::new(self.file));
        let mut response = Response::new(body);
        if let Ok(value) = HeaderValue::from_str(&self.content_type) {
            response.headers_mut().insert(header::CONTENT_TYPE, value);
        }
        response
    }
}

impl IntoResponse for FileError {
    fn into_response(self) -> Response {
        tracing::warn!(error = %self, "Failed to serve file");
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_path_decodes() {
        assert_eq!(request_path("/data/a%20b.png"), "/data/a b.png");
        assert_eq!(request_path("/data/x%231.jpg"), "/data/x#1.jpg");
        assert_eq!(request_path("/plain.png"), "/plain.png");
    }

    #[tokio::test]
    async fn test_open_missing_file() {
        let err = RawFile::open("/definitely/not/here.png").await.err().unwrap();
        assert!(matches!(err, FileError::Open { .. }));
        assert!(err.to_string().starts_with("open /definitely/not/here.png: "));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_open_directory_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().to_string_lossy().into_owned();
        let err = RawFile::open(&path).await.err().unwrap();
        assert!(matches!(err, FileError::IsDirectory { .. }));
    }
}
