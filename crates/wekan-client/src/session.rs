//! Authenticated session and the request/response pipeline.

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};
use wekan_core::{ClientConfig, WekanError, WekanResult};

use crate::models::User;

pub const LOGIN_PATH: &str = "/users/login";

/// Request body for [`WekanClient::call`].
#[derive(Debug, Clone, Copy)]
pub enum Payload<'a> {
    Json(&'a Value),
    /// Form-encoded fields; only the login endpoint expects these.
    Form(&'a [(&'a str, &'a str)]),
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    token: Option<String>,
}

/// A logged-in connection to a Wekan server.
///
/// The base URL, bearer token and TLS policy are fixed at construction. The
/// client is cheap to clone and can be shared between tasks.
#[derive(Debug, Clone)]
pub struct WekanClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
    verify_tls: bool,
    user: User,
}

impl WekanClient {
    /// Log in with default connection settings.
    pub async fn login(base_url: &str, username: &str, password: &str) -> WekanResult<Self> {
        Self::connect(base_url, username, password, &ClientConfig::default()).await
    }

    /// Log in to `base_url` (e.g. `https://wekan.example.com/`).
    ///
    /// Any failure of the login exchange is reported as
    /// [`WekanError::Authentication`] with the underlying error as its source.
    pub async fn connect(
        base_url: &str,
        username: &str,
        password: &str,
        config: &ClientConfig,
    ) -> WekanResult<Self> {
        let mut builder =
            reqwest::Client::builder().danger_accept_invalid_certs(!config.verify_tls);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| WekanError::Connection(e.to_string()))?;

        let mut client = Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: String::new(),
            verify_tls: config.verify_tls,
            user: User::new(String::new(), username),
        };

        let form = [("username", username), ("password", password)];
        let response = client
            .call(LOGIN_PATH, Method::POST, Some(Payload::Form(&form)), false)
            .await
            .map_err(|e| WekanError::authentication(format!("login as {} failed", username), Some(e)))?;
        let login: LoginResponse = serde_json::from_value(response).map_err(|e| {
            WekanError::authentication("unreadable login response", Some(e.into()))
        })?;

        match (login.id, login.token) {
            (Some(id), Some(token)) if !id.is_empty() && !token.is_empty() => {
                client.token = token;
                client.user = User::new(id, username);
            }
            _ => {
                return Err(WekanError::authentication(
                    "login response did not contain an id and token",
                    None,
                ))
            }
        }

        info!(user_id = %client.user.id, base_url = %client.base_url, "logged in to wekan");
        Ok(client)
    }

    /// The user this session is logged in as.
    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn verify_tls(&self) -> bool {
        self.verify_tls
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    fn endpoint(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Issue a request and classify the response.
    ///
    /// A 2xx status alone is not success: the server reports logical failures
    /// as a JSON object with an `error` key, which becomes
    /// [`WekanError::Service`]. An empty 2xx body yields [`Value::Null`].
    pub async fn call(
        &self,
        path: &str,
        method: Method,
        payload: Option<Payload<'_>>,
        requires_auth: bool,
    ) -> WekanResult<Value> {
        let url = self.endpoint(path);
        debug!(%method, %url, "wekan request");

        let mut request = self.http.request(method.clone(), &url);
        if requires_auth {
            request = request.bearer_auth(&self.token);
        }
        request = match payload {
            Some(Payload::Json(body)) => request.json(body),
            Some(Payload::Form(fields)) => request.form(fields),
            None => request,
        };

        let response = request
            .send()
            .await
            .map_err(|e| WekanError::Connection(format!("{} {}: {}", method, url, e)))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| WekanError::Connection(format!("{} {}: {}", method, url, e)))?;

        debug!(%method, %url, status = status.as_u16(), bytes = body.len(), "wekan response");
        classify_response(status, &body)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> WekanResult<T> {
        decode(self.call(path, Method::GET, None, true).await?)
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> WekanResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_value(body)?;
        decode(
            self.call(path, Method::POST, Some(Payload::Json(&body)), true)
                .await?,
        )
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> WekanResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_value(body)?;
        decode(
            self.call(path, Method::PUT, Some(Payload::Json(&body)), true)
                .await?,
        )
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> WekanResult<T> {
        decode(self.call(path, Method::DELETE, None, true).await?)
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> WekanResult<T> {
    serde_json::from_value(value).map_err(|e| WekanError::Serialization(e.to_string()))
}

pub(crate) fn classify_response(status: StatusCode, body: &[u8]) -> WekanResult<Value> {
    if !status.is_success() {
        return Err(WekanError::Transport {
            status: status.as_u16(),
            body: String::from_utf8_lossy(body).into_owned(),
        });
    }

    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }

    let value: Value = serde_json::from_slice(body)?;
    if value
        .as_object()
        .is_some_and(|object| object.contains_key("error"))
    {
        return Err(WekanError::Service(value));
    }

    Ok(value)
}
