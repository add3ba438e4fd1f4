//! Typed async client for the master-data mock backend.
//!
//! Mirrors the HTTP routes one to one:
//!
//! ```ignore
//! let mut client = MasterDataClient::new("http://localhost:5320");
//! client.login("vben", "123456").await?;
//! let page = client.bom().list(&ListQuery::default().paged(1, 20)).await?;
//! ```

pub mod error;

use std::marker::PhantomData;

use mdm_core::actions::{DeleteOutcome, DeleteRequest, ReportOutcome, ReportRequest};
use mdm_core::bom::BomRecord;
use mdm_core::export::ExportConfig;
use mdm_core::import::ImportOutcome;
use mdm_core::material::MaterialRecord;
use mdm_core::paginate::Page;
use mdm_core::query::ListQuery;
use mdm_core::record::MasterRecord;
use serde::de::DeserializeOwned;
use serde::Deserialize;

pub use error::ClientError;

/// HTTP client for one backend instance.
#[derive(Debug, Clone)]
pub struct MasterDataClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

/// Account details returned by a successful login.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub access_token: String,
    pub username: String,
    pub real_name: String,
    pub roles: Vec<String>,
}

/// A downloaded CSV file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvDocument {
    /// File name offered by the server's `Content-Disposition` header.
    pub file_name: Option<String>,
    pub content: String,
}

/// Response envelope shared by every JSON route.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    code: i64,
    message: String,
    data: Option<T>,
    error: Option<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    code: String,
}

impl MasterDataClient {
    /// Create a client for the backend at `base_url`, e.g.
    /// `http://localhost:5320` (no trailing `/api`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Use `token` as the bearer token for every subsequent request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Log in with one of the mock accounts and keep the issued token.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<Session, ClientError> {
        let body = serde_json::json!({ "username": username, "password": password });
        let response = self
            .client
            .post(self.url("/auth/login"))
            .json(&body)
            .send()
            .await?;

        let session: Session = parse_envelope(response).await?;
        tracing::debug!(username = %session.username, "Logged in");
        self.token = Some(session.access_token.clone());
        Ok(session)
    }

    /// Operations on BOM records.
    pub fn bom(&self) -> EntityApi<'_, BomRecord> {
        EntityApi::new(self, "bom")
    }

    /// Operations on material records.
    pub fn material(&self) -> EntityApi<'_, MaterialRecord> {
        EntityApi::new(self, "material")
    }

    // ---- private helpers ----

    fn url(&self, path: &str) -> String {
        format!("{}/api{path}", self.base_url)
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

/// Routes under `/api/manufacture/{entity}` for one record type.
#[derive(Debug)]
pub struct EntityApi<'a, R> {
    client: &'a MasterDataClient,
    entity: &'static str,
    _record: PhantomData<fn() -> R>,
}

impl<'a, R: MasterRecord> EntityApi<'a, R> {
    fn new(client: &'a MasterDataClient, entity: &'static str) -> Self {
        Self {
            client,
            entity,
            _record: PhantomData,
        }
    }

    /// `GET /list` with the query rendered as request parameters.
    pub async fn list(&self, query: &ListQuery) -> Result<Page<R>, ClientError> {
        let response = self
            .get("list")
            .query(&query.to_pairs())
            .send()
            .await?;
        parse_envelope(response).await
    }

    /// `GET /template`.
    pub async fn template(&self) -> Result<CsvDocument, ClientError> {
        let response = self.get("template").send().await?;
        read_csv(response).await
    }

    /// `POST /import` with `bytes` uploaded as `file_name`.
    pub async fn import(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        overwrite_duplicates: bool,
    ) -> Result<ImportOutcome, ClientError> {
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str("text/csv")?;
        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("overwriteDuplicates", overwrite_duplicates.to_string());

        let response = self.post("import").multipart(form).send().await?;
        parse_envelope(response).await
    }

    /// `POST /export`.
    pub async fn export(&self, config: &ExportConfig) -> Result<CsvDocument, ClientError> {
        let response = self.post("export").json(config).send().await?;
        read_csv(response).await
    }

    /// `POST /delete`.
    pub async fn delete(&self, ids: &[String]) -> Result<DeleteOutcome, ClientError> {
        let body = DeleteRequest { ids: ids.to_vec() };
        let response = self.post("delete").json(&body).send().await?;
        parse_envelope(response).await
    }

    /// `POST /report`. An empty `ids` reports every record.
    pub async fn report(&self, ids: &[String]) -> Result<ReportOutcome, ClientError> {
        let body = ReportRequest {
            record_ids: ids.to_vec(),
        };
        let response = self.post("report").json(&body).send().await?;
        parse_envelope(response).await
    }

    fn path(&self, action: &str) -> String {
        self.client
            .url(&format!("/manufacture/{}/{action}", self.entity))
    }

    fn get(&self, action: &str) -> reqwest::RequestBuilder {
        tracing::debug!(entity = R::ENTITY, action, "GET");
        self.client
            .authorized(self.client.client.get(self.path(action)))
    }

    fn post(&self, action: &str) -> reqwest::RequestBuilder {
        tracing::debug!(entity = R::ENTITY, action, "POST");
        self.client
            .authorized(self.client.client.post(self.path(action)))
    }
}

/// Decode an envelope, turning error envelopes into [`ClientError::Api`].
async fn parse_envelope<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    let status = response.status().as_u16();
    let envelope: Envelope<T> = response.json().await?;
    if envelope.code != 0 {
        return Err(api_error(status, envelope));
    }
    envelope.data.ok_or(ClientError::MissingData)
}

/// Read a CSV download. Non-success statuses carry a JSON error envelope.
async fn read_csv(response: reqwest::Response) -> Result<CsvDocument, ClientError> {
    let status = response.status();
    if !status.is_success() {
        let envelope: Envelope<serde_json::Value> = response.json().await?;
        return Err(api_error(status.as_u16(), envelope));
    }

    let file_name = response
        .headers()
        .get(reqwest::header::CONTENT_DISPOSITION)
        .and_then(|value| disposition_file_name(value.as_bytes()));
    let content = response.text().await?;
    Ok(CsvDocument { file_name, content })
}

fn api_error<T>(status: u16, envelope: Envelope<T>) -> ClientError {
    ClientError::Api {
        status,
        code: envelope
            .error
            .map_or_else(|| "UNKNOWN".to_string(), |e| e.code),
        message: envelope.message,
    }
}

/// Extract the file name from a `Content-Disposition` value, preferring the
/// RFC 5987 `filename*` form.
fn disposition_file_name(raw: &[u8]) -> Option<String> {
    let header = String::from_utf8_lossy(raw);
    let params: Vec<&str> = header.split(';').map(str::trim).collect();

    let encoded = params.iter().find_map(|p| p.strip_prefix("filename*=UTF-8''"));
    if let Some(name) = encoded.and_then(|e| urlencoding::decode(e).ok()) {
        return Some(name.into_owned());
    }

    params
        .iter()
        .find_map(|p| p.strip_prefix("filename="))
        .map(|name| name.trim_matches('"').to_string())
}
