use sea_orm::{sea_query::TableCreateStatement, ConnectionTrait, Database, DatabaseConnection};

use crate::error::TestError;

/// In-memory SQLite database owned by a single test.
///
/// Every context opens its own `sqlite::memory:` connection, so tests never observe each
/// other's rows. Dropping the context drops the database.
#[derive(Default)]
pub struct TestContext {
    /// Connection opened by `database()`; `None` until first use.
    pub db: Option<DatabaseConnection>,
}

impl TestContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the connection, opening the in-memory database on first call.
    pub async fn database(&mut self) -> Result<&DatabaseConnection, TestError> {
        let db = match self.db.take() {
            Some(db) => db,
            None => Database::connect("sqlite::memory:").await?,
        };

        Ok(&*self.db.insert(db))
    }

    /// Runs the given CREATE TABLE statements in order.
    ///
    /// # Returns
    /// - `Ok(())` - Every table was created
    /// - `Err(TestError::Database)` - Connection or statement failed
    pub async fn with_tables(&mut self, stmts: Vec<TableCreateStatement>) -> Result<(), TestError> {
        let db = self.database().await?;

        for stmt in &stmts {
            db.execute(stmt).await?;
        }

        Ok(())
    }
}
