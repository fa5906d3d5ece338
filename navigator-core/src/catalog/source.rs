//! Where the catalog document comes from
//!
//! A [`CatalogSource`] performs one read of the catalog resource. The
//! store calls it at most once per session.

use async_trait::async_trait;
use std::path::PathBuf;
use tracing::debug;

use super::error::CatalogError;
use super::model::Catalog;

/// One-shot reader of the catalog document
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Read and parse the catalog
    async fn fetch(&self) -> Result<Catalog, CatalogError>;

    /// Human-readable location for logs
    fn describe(&self) -> String;
}

/// Pick a source for a configured location
///
/// `http://` and `https://` locations are fetched over the network,
/// anything else is read from the filesystem.
pub fn source_for(location: &str) -> Box<dyn CatalogSource> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Box::new(HttpSource::new(location))
    } else {
        Box::new(FileSource::new(location))
    }
}

/// Catalog stored in a local file
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CatalogSource for FileSource {
    async fn fetch(&self) -> Result<Catalog, CatalogError> {
        debug!("Reading catalog from {}", self.path.display());
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| CatalogError::Read {
                path: self.path.clone(),
                source,
            })?;

        Catalog::from_json(&content, &self.path.display().to_string())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Catalog document already held in memory
#[derive(Debug, Clone)]
pub struct StaticSource {
    origin: String,
    content: String,
}

impl StaticSource {
    pub fn new(origin: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            content: content.into(),
        }
    }
}

#[async_trait]
impl CatalogSource for StaticSource {
    async fn fetch(&self) -> Result<Catalog, CatalogError> {
        Catalog::from_json(&self.content, &self.origin)
    }

    fn describe(&self) -> String {
        self.origin.clone()
    }
}

/// Catalog served over HTTP(S)
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

#[cfg(feature = "http")]
#[async_trait]
impl CatalogSource for HttpSource {
    async fn fetch(&self) -> Result<Catalog, CatalogError> {
        let request_error = |source| CatalogError::Request {
            url: self.url.clone(),
            source,
        };

        let client = reqwest::Client::builder()
            .user_agent(concat!("mcp-navigator/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(request_error)?;

        debug!("Fetching catalog from {}", self.url);
        let response = client.get(&self.url).send().await.map_err(request_error)?;

        if !response.status().is_success() {
            return Err(CatalogError::Status {
                url: self.url.clone(),
                status: response.status().as_u16(),
            });
        }

        let content = response.text().await.map_err(request_error)?;
        Catalog::from_json(&content, &self.url)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Stub for when the http feature is disabled
#[cfg(not(feature = "http"))]
#[async_trait]
impl CatalogSource for HttpSource {
    async fn fetch(&self) -> Result<Catalog, CatalogError> {
        Err(CatalogError::Unsupported(format!(
            "Cannot fetch {}: HTTP support is not enabled. Rebuild with --features http",
            self.url
        )))
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_file_source_reads_catalog() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"categories": [], "servers": {{"a": {{"name": "A"}}}}}}"#
        )
        .unwrap();

        let source = FileSource::new(file.path());
        let catalog = source.fetch().await.unwrap();
        assert_eq!(catalog.entries.len(), 1);
    }

    #[tokio::test]
    async fn test_file_source_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let source = FileSource::new(dir.path().join("missing.json"));
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, CatalogError::Read { .. }));
        assert!(err.to_string().contains("missing.json"));
    }

    #[tokio::test]
    async fn test_static_source_malformed_body() {
        let source = StaticSource::new("inline", "not json");
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, CatalogError::Parse { .. }));
    }

    /// Serve one canned HTTP response on a local port
    ///
    /// Returns the URL to fetch and a handle yielding the raw request.
    #[cfg(feature = "http")]
    async fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, tokio::task::JoinHandle<String>) {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 8192];
            let n = socket.read(&mut buf).await.unwrap();
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&buf[..n]).to_string()
        });
        (format!("http://{addr}/data/catalog.json"), handle)
    }

    #[cfg(feature = "http")]
    #[tokio::test]
    async fn test_http_source_fetches_catalog() {
        let (url, request) = serve_once(
            "200 OK",
            r#"{"categories": [], "servers": {"a": {"name": "A"}, "b": {"name": "B"}}}"#,
        )
        .await;

        let catalog = HttpSource::new(&url).fetch().await.unwrap();
        let ids: Vec<&str> = catalog.entries.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["a", "b"]);

        let request = request.await.unwrap().to_lowercase();
        assert!(request.starts_with("get /data/catalog.json"));
        assert!(request.contains("user-agent: mcp-navigator/"));
    }

    #[cfg(feature = "http")]
    #[tokio::test]
    async fn test_http_source_non_success_status() {
        let (url, _request) = serve_once("404 Not Found", "missing").await;

        let err = HttpSource::new(&url).fetch().await.unwrap_err();
        match &err {
            CatalogError::Status { url: failed, status } => {
                assert_eq!(failed, &url);
                assert_eq!(*status, 404);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains("404"));
    }

    #[cfg(feature = "http")]
    #[tokio::test]
    async fn test_http_source_malformed_body() {
        let (url, _request) = serve_once("200 OK", "<html>not json</html>").await;

        let err = HttpSource::new(&url).fetch().await.unwrap_err();
        assert!(matches!(err, CatalogError::Parse { .. }));
        assert!(err.to_string().contains(&url));
    }

    #[cfg(not(feature = "http"))]
    #[tokio::test]
    async fn test_http_source_without_feature() {
        let err = HttpSource::new("https://example.com/data.json")
            .fetch()
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Unsupported(_)));
        assert!(err.to_string().contains("--features http"));
    }

    #[test]
    fn test_source_for_picks_by_scheme() {
        assert_eq!(
            source_for("https://example.com/data.json").describe(),
            "https://example.com/data.json"
        );
        assert_eq!(
            source_for("data/comprehensive_mcp_directory.json").describe(),
            "data/comprehensive_mcp_directory.json"
        );
    }
}
