//! The termination cascade.

use chrono::Utc;
use plantilla_core::{
  Key,
  hr::{Employee, EmployeeDocument, Termination, events},
  mirror::Mirror,
  store::RecordStore,
};

use crate::{Adapters, Error, Result};

/// Name given to the document filed for a termination.
pub(crate) const TERMINATION_DOCUMENT: &str = "Baja";

impl<S, M> Adapters<S, M>
where
  S: RecordStore,
  M: Mirror,
{
  /// Terminate an employee.
  ///
  /// Steps, in order: store the termination row, record the "Baja" labor
  /// event, deactivate the employee and their profile, file the termination
  /// document. The steps are not transactional: when one fails the earlier
  /// ones stay applied and the error names the failed step.
  pub async fn create_termination(
    &self,
    termination: Termination,
  ) -> Result<Termination> {
    let id_employee = termination.id_employee.clone();
    self.get::<Employee>(Key::from(id_employee.as_str())).await?;

    let date = termination
      .termination_date
      .unwrap_or_else(|| Utc::now().date_naive());
    let reason = termination.reason.clone();
    let document_url = termination.document_url.clone();

    let stored = self
      .create(termination)
      .await
      .map_err(|e| cascade("termination row", &id_employee, e))?;

    self
      .record_event(&id_employee, events::TERMINATION, Some(reason), date)
      .await
      .map_err(|e| cascade("labor event", &id_employee, e))?;

    self
      .remove::<Employee>(Key::from(id_employee.as_str()))
      .await
      .map_err(|e| cascade("employee status", &id_employee, e))?;

    self
      .create(EmployeeDocument {
        id_employee: id_employee.clone(),
        name: TERMINATION_DOCUMENT.to_owned(),
        url: document_url,
        uploaded_at: Some(Utc::now()),
        ..Default::default()
      })
      .await
      .map_err(|e| cascade("termination document", &id_employee, e))?;

    tracing::info!(id_employee, "employee terminated");
    Ok(stored)
  }
}

fn cascade(step: &'static str, id_employee: &str, source: Error) -> Error {
  tracing::error!(step, id_employee, error = %source, "termination cascade stopped");
  Error::Cascade {
    step,
    source: Box::new(source),
  }
}
