//! Customer service: email suggestions, create-or-update by email and listing.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::customer::CustomerRepository,
    error::AppError,
    model::customer::{Customer, CustomerParams},
};

pub struct CustomerService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CustomerService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Suggests customers whose email contains `email`, for autocompletion.
    ///
    /// # Returns
    /// - `Ok(Vec<Customer>)` - Matching customers ordered by email
    /// - `Err(AppError::BadRequest)` - No fragment given
    pub async fn suggest(&self, email: Option<&str>) -> Result<Vec<Customer>, AppError> {
        let fragment = email
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .ok_or_else(|| {
                AppError::BadRequest("Email query parameter is required".to_string())
            })?;

        Ok(CustomerRepository::new(self.db)
            .search_by_email(fragment)
            .await?)
    }

    /// Creates a customer, or updates the one already using the email.
    ///
    /// # Returns
    /// - `Ok((Customer, true))` - A new customer was created
    /// - `Ok((Customer, false))` - An existing customer was updated
    pub async fn create_or_update(
        &self,
        params: CustomerParams,
    ) -> Result<(Customer, bool), AppError> {
        let (customer, created) = CustomerRepository::new(self.db)
            .upsert_by_email(params)
            .await?;

        tracing::debug!(customer_id = %customer.id, created, "Customer saved");

        Ok((customer, created))
    }

    pub async fn get_all(&self) -> Result<Vec<Customer>, AppError> {
        Ok(CustomerRepository::new(self.db).get_all().await?)
    }
}
