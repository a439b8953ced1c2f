//! Employee writes that leave a trail of labor events.

use chrono::{NaiveDate, Utc};
use plantilla_core::{
  Key, Listing,
  hr::{Employee, LaborEvent, events},
  mirror::{Fields, Mirror},
  store::{RecordQuery, RecordStore},
};

use crate::{Adapters, Result, compare::values_match};

impl<S, M> Adapters<S, M>
where
  S: RecordStore,
  M: Mirror,
{
  /// Create an employee, publish the profile, and record the hire.
  pub async fn create_employee(&self, employee: Employee) -> Result<Employee> {
    let created = self.create(employee).await?;
    let date = created.hire_date.unwrap_or_else(today);
    self
      .record_event(&created.id_employee, events::HIRE, Some(created.position.clone()), date)
      .await?;
    Ok(created)
  }

  /// Partially update an employee.
  ///
  /// A changed position records a "Cambio de Puesto" event describing the
  /// move as `old -> new`; a changed daily salary records a salary event the
  /// same way.
  pub async fn update_employee(&self, key: Key, patch: Fields) -> Result<Employee> {
    let before: Employee = self.get(key.clone()).await?;
    let after: Employee = self.update_fields(key, patch).await?;
    let date = today();

    if before.position != after.position {
      let description = format!("{} -> {}", before.position, after.position);
      self
        .record_event(&after.id_employee, events::POSITION_CHANGE, Some(description), date)
        .await?;
    }

    let old_salary = serde_json::to_value(before.daily_salary)?;
    let new_salary = serde_json::to_value(after.daily_salary)?;
    if !values_match(&old_salary, &new_salary) {
      let description = format!(
        "{} -> {}",
        salary_label(before.daily_salary),
        salary_label(after.daily_salary)
      );
      self
        .record_event(&after.id_employee, events::SALARY_CHANGE, Some(description), date)
        .await?;
    }

    Ok(after)
  }

  /// Labor events of one employee, oldest first.
  pub async fn employee_events(
    &self,
    id_employee: &str,
    listing: Option<Listing>,
  ) -> Result<Vec<LaborEvent>> {
    self.get::<Employee>(Key::from(id_employee)).await?;
    let query = RecordQuery::listing(listing.unwrap_or(Listing::All))
      .with_filter("id_employee", id_employee);
    self.list_where(query).await
  }

  pub(crate) async fn record_event(
    &self,
    id_employee: &str,
    event_name: &str,
    description: Option<String>,
    event_date: NaiveDate,
  ) -> Result<LaborEvent> {
    let event = self
      .create(LaborEvent {
        id_employee: id_employee.to_owned(),
        event_name: event_name.to_owned(),
        description,
        event_date: Some(event_date),
        ..Default::default()
      })
      .await?;
    tracing::info!(id_employee, event_name, "labor event recorded");
    Ok(event)
  }
}

fn today() -> NaiveDate { Utc::now().date_naive() }

fn salary_label(salary: Option<f64>) -> String {
  salary.map_or_else(|| "-".to_owned(), |s| format!("{s:.2}"))
}
