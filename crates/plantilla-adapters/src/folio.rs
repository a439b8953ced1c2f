//! Folio counters and the purchase-request writes that consume them.
//!
//! A counter holds the last folio handed out. Reading the current folio
//! previews the next value without consuming it; every create consumes
//! exactly one value, including a batch of detail lines.

use plantilla_core::{
  mirror::Mirror,
  purchase::{FolioKind, RequestAdditional, RequestDetail, RequestHeader},
  store::RecordStore,
};
use serde_json::Value;

use crate::{Adapters, Error, Result};

impl<S, M> Adapters<S, M>
where
  S: RecordStore,
  M: Mirror,
{
  /// The folio the next create of `kind` will receive.
  pub async fn current_folio(&self, kind: FolioKind) -> Result<i64> {
    Ok(self.stored_folio(kind).await? + 1)
  }

  /// Consume and return the next folio of `kind`.
  pub async fn increment_folio(&self, kind: FolioKind) -> Result<i64> {
    let _guard = self.folio_lock.lock().await;
    let next = self.stored_folio(kind).await? + 1;
    self
      .mirror
      .set_path(kind.path(), Value::from(next))
      .await
      .map_err(Error::mirror)?;
    tracing::debug!(counter = kind.path(), folio = next, "folio consumed");
    Ok(next)
  }

  async fn stored_folio(&self, kind: FolioKind) -> Result<i64> {
    let value = self
      .mirror
      .get_path(kind.path())
      .await
      .map_err(Error::mirror)?;
    match value {
      None => Ok(0),
      Some(v) => v
        .as_i64()
        .or_else(|| v.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
        .ok_or_else(|| {
          Error::Corrupt(format!("counter {} holds {v}", kind.path()))
        }),
    }
  }

  pub async fn create_request_header(
    &self,
    mut header: RequestHeader,
  ) -> Result<RequestHeader> {
    header.folio = Some(self.increment_folio(FolioKind::RequestHeaders).await?);
    self.create(header).await
  }

  pub async fn create_request_additional(
    &self,
    mut item: RequestAdditional,
  ) -> Result<RequestAdditional> {
    item.folio =
      Some(self.increment_folio(FolioKind::RequestsAdditional).await?);
    self.create(item).await
  }

  /// Create a single detail line with its own folio.
  pub async fn create_request_detail(
    &self,
    detail: RequestDetail,
  ) -> Result<RequestDetail> {
    let mut created = self.create_detail_batch(vec![detail]).await?;
    created
      .pop()
      .ok_or_else(|| Error::Corrupt("empty detail batch result".into()))
  }

  /// Create detail lines that share one `id_detail` under a single folio.
  ///
  /// Lines are inserted in order; if one fails, the lines before it stay.
  pub async fn create_detail_batch(
    &self,
    details: Vec<RequestDetail>,
  ) -> Result<Vec<RequestDetail>> {
    let Some(first) = details.first() else {
      return Err(Error::BadRequest("detail batch is empty".into()));
    };
    let id_detail = first.id_detail.clone();
    if id_detail.is_empty() {
      return Err(Error::BadRequest("detail lines need an id_detail".into()));
    }
    if details.iter().any(|d| d.id_detail != id_detail) {
      return Err(Error::BadRequest(format!(
        "detail batch mixes id_detail values; expected {id_detail}"
      )));
    }

    let folio = self.increment_folio(FolioKind::RequestDetails).await?;
    let mut created = Vec::with_capacity(details.len());
    for mut detail in details {
      detail.folio = Some(folio);
      created.push(self.create(detail).await?);
    }
    tracing::info!(id_detail, folio, lines = created.len(), "detail batch created");
    Ok(created)
  }
}
