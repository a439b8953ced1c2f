//! [`RtdbMirror`]: HTTP client for a hosted JSON key-path tree.
//!
//! Every path maps to `{base_url}/{path}.json`, each segment percent-encoded. `GET` returns the JSON stored
//! there (`null` when absent), `PUT` overwrites it, `DELETE` removes it.
//! Document collections are plain objects keyed by document id.

use std::time::Duration;

use plantilla_core::mirror::{Document, Fields, Mirror};
use reqwest::{Client, Method, RequestBuilder, Url};
use serde_json::Value;

use crate::{
  Error, Result,
  path::{document_from, document_path, documents_from, segments},
};

/// Connection settings for the hosted tree.
#[derive(Debug, Clone)]
pub struct RtdbConfig {
  /// e.g. `https://<project>-default-rtdb.firebaseio.com`
  pub base_url: String,
  /// Database secret or ID token passed as the `auth` query parameter.
  pub secret:   Option<String>,
}

/// HTTP-backed mirror.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct RtdbMirror {
  client: Client,
  base:   Url,
  config: RtdbConfig,
}

impl RtdbMirror {
  pub fn new(config: RtdbConfig) -> Result<Self> {
    let base = Url::parse(&config.base_url)
      .map_err(|_| Error::InvalidUrl(config.base_url.clone()))?;
    if base.cannot_be_a_base() {
      return Err(Error::InvalidUrl(config.base_url.clone()));
    }
    let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
    Ok(Self {
      client,
      base,
      config,
    })
  }

  fn url(&self, path: &str) -> Result<Url> {
    let segs = segments(path)?;
    let Some((last, parents)) = segs.split_last() else {
      return Err(Error::InvalidPath(path.to_owned()));
    };
    let mut url = self.base.clone();
    url
      .path_segments_mut()
      .map_err(|_| Error::InvalidUrl(self.config.base_url.clone()))?
      .pop_if_empty()
      .extend(parents)
      .push(&format!("{last}.json"));
    Ok(url)
  }

  fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
    let req = self.client.request(method, self.url(path)?);
    Ok(match &self.config.secret {
      Some(secret) => req.query(&[("auth", secret)]),
      None => req,
    })
  }

  async fn send(
    &self,
    method: Method,
    path: &str,
    body: Option<&Value>,
  ) -> Result<reqwest::Response> {
    let mut req = self.request(method.clone(), path)?;
    if let Some(body) = body {
      req = req.json(body);
    }
    let resp = req.send().await?;
    if !resp.status().is_success() {
      return Err(Error::Status {
        method: method.to_string(),
        path:   path.to_owned(),
        status: resp.status(),
      });
    }
    Ok(resp)
  }

  async fn get_json(&self, path: &str) -> Result<Option<Value>> {
    let value: Value = self.send(Method::GET, path, None).await?.json().await?;
    Ok(if value.is_null() { None } else { Some(value) })
  }

  async fn put_json(&self, path: &str, value: &Value) -> Result<()> {
    self.send(Method::PUT, path, Some(value)).await?;
    tracing::debug!(path, "mirror write");
    Ok(())
  }

  async fn delete(&self, path: &str) -> Result<()> {
    self.send(Method::DELETE, path, None).await?;
    tracing::debug!(path, "mirror delete");
    Ok(())
  }
}

impl Mirror for RtdbMirror {
  type Error = Error;

  async fn list_documents<'a>(
    &'a self,
    collection: &'a str,
  ) -> Result<Vec<Document>> {
    Ok(
      self
        .get_json(collection)
        .await?
        .map(documents_from)
        .unwrap_or_default(),
    )
  }

  async fn get_document<'a>(
    &'a self,
    collection: &'a str,
    id: &'a str,
  ) -> Result<Option<Document>> {
    let path = document_path(collection, id)?;
    Ok(document_from(id, self.get_json(&path).await?))
  }

  async fn set_document<'a>(
    &'a self,
    collection: &'a str,
    id: &'a str,
    fields: Fields,
  ) -> Result<()> {
    let path = document_path(collection, id)?;
    self.put_json(&path, &Value::Object(fields)).await
  }

  async fn delete_document<'a>(
    &'a self,
    collection: &'a str,
    id: &'a str,
  ) -> Result<()> {
    let path = document_path(collection, id)?;
    self.delete(&path).await
  }

  async fn get_path<'a>(&'a self, path: &'a str) -> Result<Option<Value>> {
    self.get_json(path).await
  }

  async fn set_path<'a>(&'a self, path: &'a str, value: Value) -> Result<()> {
    self.put_json(path, &value).await
  }
}
