//! Server API Bindings
//!
//! Frontend bindings to the planner server's HTTP endpoints, organized by domain.

mod pantry;
mod plan;
mod reports;

use gloo_net::http::{Method, RequestBuilder, Response};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;
use serde::Serialize;
use web_sys::RequestCache;

use crate::error::ApiError;

// Re-export all public items
pub use pantry::*;
pub use plan::*;
pub use reports::*;

/// Characters `encodeURIComponent` leaves alone
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a path segment or query value.
pub fn encode(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

/// `a=1&b=two%20words`; also used as an `x-www-form-urlencoded` body.
pub fn query(pairs: &[(&str, String)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", encode(k), encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Pull `detail` out of a JSON error body. Anything else (HTML error pages,
/// plain text) yields an empty detail.
pub(crate) fn detail_from_body(text: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(text) {
        Ok(serde_json::Value::Object(obj)) => match obj.get("detail") {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        },
        _ => String::new(),
    }
}

// ========================
// Transport
// ========================

async fn check(resp: Response) -> Result<Response, ApiError> {
    if resp.ok() {
        return Ok(resp);
    }
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    Err(ApiError::Rejected {
        status,
        detail: detail_from_body(&body),
    })
}

fn request(method: Method, url: &str) -> RequestBuilder {
    RequestBuilder::new(url).method(method)
}

/// GET bypassing the HTTP cache, decoded as JSON.
pub(crate) async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T, ApiError> {
    let resp = request(Method::GET, url)
        .cache(RequestCache::NoStore)
        .send()
        .await?;
    Ok(check(resp).await?.json::<T>().await?)
}

/// GET whose body is ignored.
pub(crate) async fn get_empty(url: &str) -> Result<(), ApiError> {
    let resp = request(Method::GET, url)
        .cache(RequestCache::NoStore)
        .send()
        .await?;
    check(resp).await.map(|_| ())
}

/// Send a JSON body and decode the JSON answer.
pub(crate) async fn send_json<B, T>(method: Method, url: &str, body: &B) -> Result<T, ApiError>
where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
{
    let resp = request(method, url).json(body)?.send().await?;
    Ok(check(resp).await?.json::<T>().await?)
}

/// Send a JSON body; only the status matters.
pub(crate) async fn send_json_unit<B: Serialize + ?Sized>(method: Method, url: &str, body: &B) -> Result<(), ApiError> {
    let resp = request(method, url).json(body)?.send().await?;
    check(resp).await.map(|_| ())
}

pub(crate) async fn send_empty(method: Method, url: &str) -> Result<(), ApiError> {
    let resp = request(method, url).send().await?;
    check(resp).await.map(|_| ())
}

/// POST an `application/x-www-form-urlencoded` body.
pub(crate) async fn post_form(url: &str, pairs: &[(&str, String)]) -> Result<(), ApiError> {
    let resp = request(Method::POST, url)
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(query(pairs))?
        .send()
        .await?;
    check(resp).await.map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_matches_uri_component() {
        assert_eq!(encode("Mac & Cheese"), "Mac%20%26%20Cheese");
        assert_eq!(encode("a/b?c"), "a%2Fb%3Fc");
        assert_eq!(encode("it's-(ok)_~*!"), "it's-(ok)_~*!");
        assert_eq!(encode("ciorbă"), "ciorb%C4%83");
    }

    #[test]
    fn query_joins_encoded_pairs() {
        let q = query(&[("day", "Monday".into()), ("recipe", "Pui & orez".into())]);
        assert_eq!(q, "day=Monday&recipe=Pui%20%26%20orez");
    }

    #[test]
    fn detail_extraction() {
        assert_eq!(detail_from_body(r#"{"detail":"Ingredient already exists"}"#), "Ingredient already exists");
        assert_eq!(detail_from_body(r#"{"detail":[{"msg":"x"}]}"#), r#"[{"msg":"x"}]"#);
        assert_eq!(detail_from_body(r#"{"ok":false}"#), "");
        assert_eq!(detail_from_body(" Internal Server Error "), "");
        assert_eq!(detail_from_body("<html><body>502 Bad Gateway</body></html>"), "");
    }

    #[test]
    fn html_error_page_falls_back_to_generic_toast() {
        let err = ApiError::Rejected {
            status: 502,
            detail: detail_from_body("<html><body>502 Bad Gateway</body></html>"),
        };
        assert_eq!(err.user_message("Save failed"), "Save failed");
    }
}
