//! Backend that speaks XML-RPC over SCGI to rtorrent directly.
//!
//! A request is an SCGI netstring with the headers, followed by the XML-RPC
//! `methodCall` body:
//!
//! ```text
//! 76:CONTENT_LENGTH\0152\0SCGI\01\0REQUEST_METHOD\0POST\0REQUEST_URI\0/RPC2\0,<?xml version="1.0"?>...
//! ```
//!
//! rtorrent answers with CGI style headers, an empty line, and the XML-RPC
//! `methodResponse`. The headers are dropped; the body is what the scanner
//! reads.
use std::sync::Arc;

use async_trait::async_trait;
use derive_more::Constructor;
use montorrent_located_error::DynError;
use tokio::io::{AsyncReadExt as _, AsyncWriteExt as _};
use tokio::net::TcpStream;

use super::RemoteBackend;
use crate::core::error::Error;

#[derive(Constructor, Debug, Clone)]
pub struct ScgiBackend {
    address: String,
}

#[async_trait]
impl RemoteBackend for ScgiBackend {
    async fn invoke(&self, operation: &str, target: &str) -> Result<Vec<u8>, Error> {
        let request = scgi_request(&method_call(operation, target));

        let exchange = async {
            let mut stream = TcpStream::connect(&self.address).await?;
            stream.write_all(&request).await?;
            stream.shutdown().await?;

            let mut response = Vec::new();
            stream.read_to_end(&mut response).await?;

            Ok::<Vec<u8>, std::io::Error>(response)
        };

        let response = exchange.await.map_err(|err| Error::Transport {
            operation: operation.to_owned(),
            target: target.to_owned(),
            source: (Arc::new(err) as DynError).into(),
        })?;

        Ok(strip_headers(response))
    }
}

/// XML-RPC call with a single string parameter.
fn method_call(operation: &str, target: &str) -> String {
    format!(
        "<?xml version=\"1.0\"?>\n<methodCall>\n<methodName>{}</methodName>\n<params>\n<param><value><string>{}</string></value></param>\n</params>\n</methodCall>\n",
        escape(operation),
        escape(target)
    )
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn scgi_request(body: &str) -> Vec<u8> {
    let headers = format!(
        "CONTENT_LENGTH\0{}\0SCGI\01\0REQUEST_METHOD\0POST\0REQUEST_URI\0/RPC2\0",
        body.len()
    );

    let mut request = format!("{}:{headers},", headers.len()).into_bytes();
    request.extend_from_slice(body.as_bytes());
    request
}

/// Drops everything up to the first empty line. Answers without headers are
/// returned unchanged.
fn strip_headers(response: Vec<u8>) -> Vec<u8> {
    for separator in [&b"\r\n\r\n"[..], &b"\n\n"[..]] {
        if let Some(position) = response.windows(separator.len()).position(|window| window == separator) {
            return response[position + separator.len()..].to_vec();
        }
    }
    response
}
