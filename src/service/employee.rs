use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    error::ServiceError,
    model::employee::Employee,
    store::{Store, StoreError},
    utils::validation::{self, DUPLICATE_EMPLOYEE_ID},
};

/// Raw employee fields as received from a client.
#[derive(Debug, Clone, Default)]
pub struct EmployeeInput {
    pub employee_id: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
}

pub struct EmployeeService {
    store: Arc<dyn Store>,
}

impl EmployeeService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Employee>, ServiceError> {
        Ok(self.store.list_employees().await?)
    }

    /// Validates every field, then checks the business id is free, then stores.
    pub async fn create(&self, input: EmployeeInput) -> Result<Employee, ServiceError> {
        let result = self.validate_and_store(&input).await;
        if let Err(ServiceError::Validation(reason)) = &result {
            warn!(reason = %reason, employee_id = ?input.employee_id, "Rejected employee");
        }
        result
    }

    async fn validate_and_store(&self, input: &EmployeeInput) -> Result<Employee, ServiceError> {
        let fields = validation::validate_new_employee(
            input.employee_id.as_deref(),
            input.full_name.as_deref(),
            input.email.as_deref(),
            input.department.as_deref(),
        )?;
        validation::ensure_employee_id_available(self.store.as_ref(), &fields.employee_id, None)
            .await?;

        let employee = Employee::create(fields);
        match self.store.insert_employee(&employee).await {
            Ok(()) => {}
            // Lost a race with a concurrent insert of the same business id.
            Err(StoreError::Conflict) => return Err(DUPLICATE_EMPLOYEE_ID.into()),
            Err(e) => return Err(e.into()),
        }

        info!(id = %employee.id, employee_id = %employee.employee_id, "Employee created");
        Ok(employee)
    }

    pub async fn get(&self, id: Uuid) -> Result<Employee, ServiceError> {
        self.store
            .find_employee(id)
            .await?
            .ok_or(ServiceError::NotFound)
    }

    /// Deletes the employee together with all of its attendance.
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        if !self.store.delete_employee(id).await? {
            return Err(ServiceError::NotFound);
        }
        info!(id = %id, "Employee deleted");
        Ok(())
    }
}
