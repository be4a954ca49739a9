//! Employee record and write-request models.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single employee record as returned by the upstream service.
///
/// Records are immutable once fetched; the full collection is replaced
/// wholesale on every cache refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Opaque unique identifier assigned by the upstream.
    pub id: Uuid,
    /// Display name, the key the upstream uses for deletion.
    #[serde(rename = "employee_name")]
    pub name: String,
    /// Salary, non-negative.
    #[serde(rename = "employee_salary")]
    pub salary: u32,
    /// Age. Constrained to 16..=75 at creation, unconstrained on read.
    #[serde(rename = "employee_age")]
    pub age: u32,
    /// Job title.
    #[serde(rename = "employee_title")]
    pub title: String,
    /// Email address, not always present.
    #[serde(rename = "employee_email", default)]
    pub email: Option<String>,
}

/// Body of the upstream `POST /employee` call.
///
/// Fields arrive pre-validated from the routing layer above this crate
/// (non-blank name/title, positive salary, age within 16..=75).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeInput {
    /// Employee name, non-blank.
    pub name: String,
    /// Salary, positive.
    pub salary: u32,
    /// Age within 16..=75.
    pub age: u32,
    /// Job title, non-blank.
    pub title: String,
}

/// Body of the upstream `DELETE /employee` call, which is keyed by name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeDeletion {
    /// Name of the employee to delete.
    pub name: String,
}
