use std::net::SocketAddr;

use reqwest::Response;

/// HTTP client for the status API.
pub struct Client {
    base_url: String,
    credentials: Option<(String, String)>,
}

impl Client {
    #[must_use]
    pub fn new(bind_address: SocketAddr) -> Self {
        Self {
            base_url: format!("http://{bind_address}"),
            credentials: None,
        }
    }

    #[must_use]
    pub fn authenticated(bind_address: SocketAddr, username: &str, password: &str) -> Self {
        Self {
            credentials: Some((username.to_owned(), password.to_owned())),
            ..Self::new(bind_address)
        }
    }

    pub async fn get_status(&self) -> Response {
        self.get("/").await
    }

    pub async fn get_health_check(&self) -> Response {
        self.get("/health_check").await
    }

    /// # Panics
    ///
    /// Will panic if the request fails.
    pub async fn get(&self, path: &str) -> Response {
        let request = reqwest::Client::builder()
            .build()
            .expect("it should build a reqwest client")
            .get(format!("{}{path}", self.base_url));

        let request = match &self.credentials {
            Some((username, password)) => request.basic_auth(username, Some(password)),
            None => request,
        };

        request.send().await.expect("the request should get a response")
    }
}
