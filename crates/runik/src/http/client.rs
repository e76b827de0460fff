//! HTTP client and response-classification policy.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::{debug, instrument, trace};

use crate::error::Error;
use crate::types::Endpoint;

/// HTTP client for Runik backend requests.
///
/// Authentication is a raw credential value in the `Authorization` header:
/// the API key on administration routes, the session token on user and
/// project routes. No scheme prefix.
#[derive(Debug, Clone)]
pub(crate) struct HttpClient {
    client: reqwest::Client,
    endpoint: Endpoint,
}

impl HttpClient {
    /// Create a new client for the given endpoint.
    pub(crate) fn new(endpoint: Endpoint) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("runik/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("failed to build HTTP client");

        Self { client, endpoint }
    }

    /// Returns the endpoint this client is configured for.
    pub(crate) fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// GET request expecting 200 and a JSON body.
    #[instrument(skip(self, auth), fields(endpoint = %self.endpoint))]
    pub(crate) async fn query<R>(&self, path: &str, auth: Option<&str>) -> Result<R, Error>
    where
        R: DeserializeOwned,
    {
        debug!(path, "query");

        let response = self.send::<()>(Method::GET, path, auth, None).await?;

        let status = response.status();
        trace!(status = %status, "response");
        if status != StatusCode::OK {
            return Err(failure(response).await?);
        }

        Ok(response.json::<R>().await?)
    }

    /// Request whose contract is a bare status code. The body is read only
    /// to attach to a failure; success bodies are never parsed.
    #[instrument(skip(self, auth, body), fields(endpoint = %self.endpoint))]
    pub(crate) async fn expect_status<B>(
        &self,
        method: Method,
        path: &str,
        auth: Option<&str>,
        body: Option<&B>,
        accept: &[StatusCode],
    ) -> Result<(), Error>
    where
        B: Serialize + ?Sized,
    {
        debug!(%method, path, "request");

        let response = self.send(method, path, auth, body).await?;

        let status = response.status();
        trace!(status = %status, "response");
        if !accept.contains(&status) {
            return Err(failure(response).await?);
        }

        Ok(())
    }

    /// Request expecting one exact status, returning the parsed JSON body
    /// for required-field checks.
    #[instrument(skip(self, auth, body), fields(endpoint = %self.endpoint))]
    pub(crate) async fn json_expecting<B>(
        &self,
        method: Method,
        path: &str,
        auth: Option<&str>,
        body: &B,
        expect: StatusCode,
    ) -> Result<Value, Error>
    where
        B: Serialize + ?Sized,
    {
        debug!(%method, path, "request");

        let response = self.send(method, path, auth, Some(body)).await?;

        let status = response.status();
        trace!(status = %status, "response");
        if status != expect {
            return Err(failure(response).await?);
        }

        parse_body(status, response.text().await?)
    }

    /// Request whose body is inspected field-by-field regardless of status.
    ///
    /// The backend reports rejections through a `code` field, sometimes
    /// under a 2xx status, so classification here is by field: a `code`
    /// field fails with `BackendRejected`; anything else is handed back for
    /// the caller's required-field check.
    #[instrument(skip(self, auth, body), fields(endpoint = %self.endpoint))]
    pub(crate) async fn inspect<B>(
        &self,
        method: Method,
        path: &str,
        auth: Option<&str>,
        body: &B,
    ) -> Result<Value, Error>
    where
        B: Serialize + ?Sized,
    {
        debug!(%method, path, "request");

        let response = self.send(method, path, auth, Some(body)).await?;

        let status = response.status();
        trace!(status = %status, "response");
        let json = parse_body(status, response.text().await?)?;

        if let Some(code) = error_code(&json) {
            return Err(Error::BackendRejected { code, body: json });
        }

        Ok(json)
    }

    async fn send<B>(
        &self,
        method: Method,
        path: &str,
        auth: Option<&str>,
        body: Option<&B>,
    ) -> Result<reqwest::Response, Error>
    where
        B: Serialize + ?Sized,
    {
        let url = self.endpoint.route(path);
        let mut request = self.client.request(method, &url);

        if let Some(credential) = auth {
            request = request.headers(auth_headers(credential));
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        Ok(request.send().await?)
    }
}

/// Create authorization headers for authenticated requests.
fn auth_headers(credential: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(credential).expect("invalid credential characters"),
    );
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers
}

/// Parse a response body as JSON, classifying unparseable text by status.
fn parse_body(status: StatusCode, text: String) -> Result<Value, Error> {
    match serde_json::from_str(&text) {
        Ok(json) => Ok(json),
        Err(_) if status.is_success() => Err(Error::UnexpectedResponse {
            body: Value::String(text),
        }),
        Err(_) => Err(Error::BackendFailure {
            status: status.as_u16(),
            body: Value::String(text),
        }),
    }
}

/// Collapse a non-success response into `BackendRejected` or
/// `BackendFailure`, attaching the raw payload.
async fn failure(response: reqwest::Response) -> Result<Error, Error> {
    let status = response.status();
    let text = response.text().await?;
    let body: Value = serde_json::from_str(&text).unwrap_or(Value::String(text));

    Ok(match error_code(&body) {
        Some(code) => Error::BackendRejected { code, body },
        None => Error::BackendFailure {
            status: status.as_u16(),
            body,
        },
    })
}

/// Extract the backend error code, if the body carries one.
fn error_code(body: &Value) -> Option<String> {
    match body.get("code")? {
        Value::String(code) => Some(code.clone()),
        Value::Number(code) => Some(code.to_string()),
        _ => None,
    }
}
