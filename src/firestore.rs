use http::StatusCode;
use http::header::{ACCEPT_ENCODING, HeaderMap, HeaderValue};
use reqwest::Client;
use serde::{Deserialize, Deserializer};
use serde_json::value::RawValue;
use url::form_urlencoded;

use crate::error::{ExportError, Result};

/// Root of the public Firestore REST API
pub const DEFAULT_ENDPOINT: &str = "https://firestore.googleapis.com/v1";

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// One page of a `documents.list` response.
///
/// Documents are kept as raw JSON text; their schema is never inspected.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse {
    #[serde(default)]
    pub next_page_token: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub documents: Vec<Box<RawValue>>,
}

// `"documents": null` means an empty page, same as a missing field.
fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<Box<RawValue>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<Box<RawValue>>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// A decoded page together with the size of the body it came from
#[derive(Debug)]
pub struct FetchedPage {
    pub page: PageResponse,
    pub bytes: u64,
}

/// Build the documents URL for a project and document path on the public API.
pub fn document_url(project: &str, document: &str) -> String {
    document_url_at(DEFAULT_ENDPOINT, project, document)
}

/// Build the documents URL below an arbitrary API root.
///
/// Both values are substituted verbatim, no escaping is applied.
pub fn document_url_at(endpoint: &str, project: &str, document: &str) -> String {
    format!(
        "{}/projects/{}/databases/(default)/documents/{}",
        endpoint.trim_end_matches('/'),
        project,
        document
    )
}

/// Append the page size query parameter to a documents URL.
pub fn request_url(document_url: &str, page_size: u32) -> String {
    format!("{}?pageSize={}", document_url, page_size)
}

/// The URL for a single page: the request URL, plus the cursor if there is one.
pub fn page_url(request_url: &str, page_token: Option<&str>) -> String {
    match page_token {
        Some(token) if !token.is_empty() => {
            let encoded: String = form_urlencoded::byte_serialize(token.as_bytes()).collect();
            format!("{}&pageToken={}", request_url, encoded)
        }
        _ => request_url.to_string(),
    }
}

/// Create the HTTP client used for every page request
pub fn create_client() -> Result<Client> {
    log::debug!("Setting up HTTP client ({})", USER_AGENT);

    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("identity"));

    let client = Client::builder()
        .user_agent(USER_AGENT)
        .default_headers(headers)
        .build()
        .map_err(ExportError::Client)?;

    log::debug!("HTTP client created successfully");
    Ok(client)
}

/// Fetch and decode one page.
pub async fn fetch_page(client: &Client, url: &str) -> Result<FetchedPage> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(ExportError::Request)?;

    let status = response.status();
    if status != StatusCode::OK {
        log::debug!("Request to {} returned {}", url, status);
        return Err(ExportError::Status(status));
    }

    let body = response.bytes().await.map_err(ExportError::Request)?;
    let bytes = body.len() as u64;
    log::debug!("Read {} bytes from {}", bytes, url);

    let page: PageResponse = serde_json::from_slice(&body)?;
    Ok(FetchedPage { page, bytes })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_url_template() {
        assert_eq!(
            document_url("my-project", "users"),
            "https://firestore.googleapis.com/v1/projects/my-project/databases/(default)/documents/users"
        );
        assert_eq!(
            document_url("p", "users/alice/orders"),
            "https://firestore.googleapis.com/v1/projects/p/databases/(default)/documents/users/alice/orders"
        );
    }

    #[test]
    fn test_document_url_at_custom_endpoint() {
        assert_eq!(
            document_url_at("http://127.0.0.1:8080/", "p", "users"),
            "http://127.0.0.1:8080/projects/p/databases/(default)/documents/users"
        );
    }

    #[test]
    fn test_request_url_appends_page_size() {
        let url = request_url(&document_url("p", "users"), 1);
        assert!(url.ends_with("/documents/users?pageSize=1"), "got {}", url);
    }

    #[test]
    fn test_page_url() {
        let base = "http://host/documents/users?pageSize=1";
        assert_eq!(page_url(base, None), base);
        assert_eq!(page_url(base, Some("")), base);
        assert_eq!(page_url(base, Some("T1")), format!("{}&pageToken=T1", base));
        assert_eq!(
            page_url(base, Some("a+b/c=")),
            format!("{}&pageToken=a%2Bb%2Fc%3D", base)
        );
    }

    #[test]
    fn test_page_response_defaults() {
        let page: PageResponse = serde_json::from_str("{}").unwrap();
        assert!(page.next_page_token.is_none());
        assert!(page.documents.is_empty());

        let page: PageResponse = serde_json::from_str(
            r#"{"documents": [{ "name" : "d1" }, {"name":"d2"}], "nextPageToken": "T1"}"#,
        )
        .unwrap();
        assert_eq!(page.next_page_token.as_deref(), Some("T1"));
        assert_eq!(page.documents.len(), 2);
        assert_eq!(page.documents[0].get(), r#"{ "name" : "d1" }"#);

        let page: PageResponse =
            serde_json::from_str(r#"{"documents": null, "nextPageToken": null}"#).unwrap();
        assert!(page.documents.is_empty(), "null documents should decode as an empty page");
        assert!(page.next_page_token.is_none());
    }

    #[test]
    fn test_page_response_rejects_wrong_shape() {
        let result: std::result::Result<PageResponse, _> =
            serde_json::from_str(r#"{"documents": "nope"}"#);
        assert!(result.is_err());
    }
}
