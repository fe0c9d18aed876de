//! Where image bytes come from.

use std::future::Future;
use std::time::Duration;

use super::FetchError;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = concat!("dexter/", env!("CARGO_PKG_VERSION"));

/// Something that can retrieve the raw bytes behind an image URL.
pub trait ImageSource: Send + Sync + 'static {
    /// Fetch the body at `url`.
    fn fetch(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, FetchError>> + Send;
}

/// Plain HTTP(S) GET via reqwest.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    /// Timeout configured on `client`, reported when reqwest gives up.
    timeout: Option<Duration>,
}

impl HttpSource {
    /// Build a source with the default connect timeout.
    pub fn new() -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            timeout: Some(CONNECT_TIMEOUT),
        })
    }

    /// Build a source whose connect and whole-request time are both capped at `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            timeout: Some(timeout),
        })
    }

    /// Wrap an existing client.
    ///
    /// Its timeouts are unknown here, so they surface as `FetchError::Transport`.
    pub const fn with_client(client: reqwest::Client) -> Self {
        Self {
            client,
            timeout: None,
        }
    }

    /// Timeout reported as `FetchError::Timeout`, if known.
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    fn classify(&self, err: reqwest::Error) -> FetchError {
        match self.timeout {
            Some(timeout) if err.is_timeout() => FetchError::Timeout(timeout),
            _ => FetchError::Transport(err),
        }
    }
}

impl ImageSource for HttpSource {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        tracing::debug!("Downloading image: {url}");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let bytes = response.bytes().await.map_err(|e| self.classify(e))?;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::images::{FetchOptions, ImageCache, ImageFetcher, LoadError, Slot, png_bytes};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    /// Read one request off the wire, up to the blank line.
    async fn read_request(stream: &mut TcpStream) {
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }
    }

    /// Serve one canned response and return the URL to request.
    async fn serve_once(status: &str, body: Vec<u8>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let head = format!(
            "HTTP/1.1 {status}\r\nContent-Type: image/png\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            body.len()
        );
        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            read_request(&mut stream).await;
            stream.write_all(head.as_bytes()).await.unwrap();
            stream.write_all(&body).await.unwrap();
            stream.shutdown().await.unwrap();
        });
        format!("http://{addr}/artwork.png")
    }

    /// Accept one connection and never answer it.
    async fn serve_silence() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            read_request(&mut stream).await;
            std::future::pending::<()>().await;
            drop(stream);
        });
        format!("http://{addr}/artwork.png")
    }

    #[tokio::test]
    async fn test_fetch_ok_returns_body() {
        let png = png_bytes(3, 3);
        let url = serve_once("200 OK", png.clone()).await;
        let source = HttpSource::new().unwrap();

        let bytes = source.fetch(&url).await.unwrap();
        assert_eq!(bytes, png);
    }

    #[tokio::test]
    async fn test_fetch_not_found_is_status_error() {
        let url = serve_once("404 Not Found", Vec::new()).await;
        let source = HttpSource::new().unwrap();

        let result = source.fetch(&url).await;
        assert!(matches!(result, Err(FetchError::Status(404))));
    }

    #[tokio::test]
    async fn test_fetch_reports_configured_timeout() {
        let url = serve_silence().await;
        let timeout = Duration::from_millis(100);
        let source = HttpSource::with_timeout(timeout).unwrap();

        let result = source.fetch(&url).await;
        match result {
            Err(FetchError::Timeout(reported)) => assert_eq!(reported, timeout),
            other => panic!("expected timeout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unknown_client_timeout_is_transport() {
        let url = serve_silence().await;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(100))
            .build()
            .unwrap();
        let source = HttpSource::with_client(client);
        assert!(source.timeout().is_none());

        match source.fetch(&url).await {
            Err(FetchError::Transport(err)) => assert!(err.is_timeout()),
            other => panic!("expected transport error, got {other:?}"),
        }
    }

    #[test]
    fn test_default_source_reports_connect_timeout() {
        let source = HttpSource::new().unwrap();
        assert_eq!(source.timeout(), Some(CONNECT_TIMEOUT));
    }

    #[tokio::test]
    async fn test_fetcher_over_http_not_found_stays_uncached() {
        let url = serve_once("404 Not Found", Vec::new()).await;
        let fetcher = ImageFetcher::new(ImageCache::new(), HttpSource::new().unwrap(), FetchOptions::default());
        let slot = Slot::new();

        let delivery = fetcher.request(slot.bind(&url)).outcome().await;

        assert!(matches!(delivery.error(), Some(LoadError::Fetch(FetchError::Status(404)))));
        assert!(slot.image().is_none());
        assert!(fetcher.cache().is_empty());
    }

    #[tokio::test]
    async fn test_fetcher_over_http_caches_png() {
        let url = serve_once("200 OK", png_bytes(4, 2)).await;
        let fetcher = ImageFetcher::new(ImageCache::new(), HttpSource::new().unwrap(), FetchOptions::default());
        let slot = Slot::new();

        let delivery = fetcher.request(slot.bind(&url)).outcome().await;

        assert!(delivery.is_delivered());
        assert_eq!(slot.image().unwrap().width(), 4);
        assert!(fetcher.cache().contains(&url));
    }
}
