//! HTTP adapter for the image fetcher port.

use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;
use url::Url;

use crate::domain::errors::LoadError;
use crate::domain::ports::ImageFetcherPort;

use super::loader::ImageLoaderConfig;

/// Fetches image payloads with a plain HTTP GET.
#[derive(Debug, Clone)]
pub struct HttpImageFetcher {
    client: reqwest::Client,
}

impl HttpImageFetcher {
    /// Creates a fetcher configured from the loader settings.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be built.
    pub fn new(config: &ImageLoaderConfig) -> Result<Self, LoadError> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| LoadError::transport(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl ImageFetcherPort for HttpImageFetcher {
    async fn fetch(&self, url: &Url) -> Result<Bytes, LoadError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| LoadError::transport(format!("Request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            debug!(url = %url, status = status.as_u16(), "Image request rejected");
            return Err(LoadError::Http {
                status: status.as_u16(),
            });
        }

        response
            .bytes()
            .await
            .map_err(|e| LoadError::transport(format!("Failed to read body: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::mocks::png_bytes;
    use std::net::SocketAddr;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    async fn serve_once(status: &'static str, body: Vec<u8>) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }

            let head = format!(
                "HTTP/1.1 {status}\r\nContent-Type: image/png\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            );
            socket.write_all(head.as_bytes()).await.unwrap();
            socket.write_all(&body).await.unwrap();
            let _ = socket.shutdown().await;
        });

        addr
    }

    fn fetcher() -> HttpImageFetcher {
        HttpImageFetcher::new(&ImageLoaderConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_success_returns_body() {
        let body = png_bytes(3, 2);
        let addr = serve_once("200 OK", body.to_vec()).await;
        let url = Url::parse(&format!("http://{addr}/a.png")).unwrap();

        let bytes = fetcher().fetch(&url).await.unwrap();
        assert_eq!(bytes, body);
    }

    #[tokio::test]
    async fn test_non_success_status_is_http_error() {
        let addr = serve_once("404 Not Found", b"missing".to_vec()).await;
        let url = Url::parse(&format!("http://{addr}/gone.png")).unwrap();

        let err = fetcher().fetch(&url).await.unwrap_err();
        assert_eq!(err, LoadError::Http { status: 404 });
    }

    #[tokio::test]
    async fn test_refused_connection_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let url = Url::parse(&format!("http://{addr}/a.png")).unwrap();

        let err = fetcher().fetch(&url).await.unwrap_err();
        assert!(matches!(err, LoadError::Transport { .. }));
    }
}
