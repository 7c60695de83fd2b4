//! Product metadata store using PostgreSQL.
//!
//! One row per remote collection, keyed by product name. The table is
//! written only by the offline sync job, which replaces its contents
//! wholesale; request-time access is read-only.

use sqlx::{postgres::PgPoolOptions, FromRow, PgPool};

use aetheris_common::{AetherisError, AetherisResult, ProductRecord, Variable};

/// Database connection pool and product-table operations.
pub struct ProductStore {
    pool: PgPool,
}

impl ProductStore {
    /// Create a new store from a database URL.
    pub async fn connect(database_url: &str) -> AetherisResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await
            .map_err(|e| AetherisError::DatabaseError(format!("Connection failed: {}", e)))?;

        Ok(Self { pool })
    }

    /// Run database migrations.
    pub async fn migrate(&self) -> AetherisResult<()> {
        // Split SQL statements and execute them individually
        for statement in SCHEMA_SQL.split(';') {
            let trimmed = statement.trim();
            if !trimmed.is_empty() {
                sqlx::query(trimmed)
                    .execute(&self.pool)
                    .await
                    .map_err(|e| {
                        AetherisError::DatabaseError(format!("Migration failed: {}", e))
                    })?;
            }
        }

        Ok(())
    }

    /// Replace the entire product table with a fresh sync result.
    ///
    /// Delete-all then bulk-insert inside one transaction, so readers
    /// never observe a half-written catalog.
    pub async fn replace_all(&self, products: &[ProductRecord]) -> AetherisResult<usize> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AetherisError::DatabaseError(format!("Begin failed: {}", e)))?;

        sqlx::query("DELETE FROM products")
            .execute(&mut *tx)
            .await
            .map_err(|e| AetherisError::DatabaseError(format!("Delete failed: {}", e)))?;

        for product in products {
            let variables = serde_json::to_value(&product.variables)?;

            sqlx::query(
                r#"
                INSERT INTO products (
                    product_name, friendly_name, description, variables, platform_id
                ) VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(&product.product_name)
            .bind(&product.friendly_name)
            .bind(&product.description)
            .bind(variables)
            .bind(&product.platform_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AetherisError::DatabaseError(format!("Insert failed: {}", e)))?;
        }

        tx.commit()
            .await
            .map_err(|e| AetherisError::DatabaseError(format!("Commit failed: {}", e)))?;

        tracing::info!(count = products.len(), "Product table replaced");

        Ok(products.len())
    }

    /// Find products named in `collections`, optionally intersected with a
    /// platform-id filter. An empty platform set means no filter.
    pub async fn find_available(
        &self,
        collections: &[String],
        platform_ids: &[String],
    ) -> AetherisResult<Vec<ProductRecord>> {
        let rows = if platform_ids.is_empty() {
            sqlx::query_as::<_, ProductRow>(
                "SELECT product_name, friendly_name, description, variables, platform_id \
                 FROM products WHERE product_name = ANY($1) ORDER BY product_name",
            )
            .bind(collections)
            .fetch_all(&self.pool)
            .await
        } else {
            sqlx::query_as::<_, ProductRow>(
                "SELECT product_name, friendly_name, description, variables, platform_id \
                 FROM products WHERE product_name = ANY($1) AND platform_id = ANY($2) \
                 ORDER BY product_name",
            )
            .bind(collections)
            .bind(platform_ids)
            .fetch_all(&self.pool)
            .await
        }
        .map_err(|e| AetherisError::DatabaseError(format!("Query failed: {}", e)))?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    /// Look up a single product by name.
    pub async fn get(&self, product_name: &str) -> AetherisResult<Option<ProductRecord>> {
        let row = sqlx::query_as::<_, ProductRow>(
            "SELECT product_name, friendly_name, description, variables, platform_id \
             FROM products WHERE product_name = $1",
        )
        .bind(product_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AetherisError::DatabaseError(format!("Query failed: {}", e)))?;

        Ok(row.map(|r| r.into()))
    }

    /// Number of cached products.
    pub async fn count(&self) -> AetherisResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AetherisError::DatabaseError(format!("Query failed: {}", e)))
    }
}

/// Internal row type for database queries.
#[derive(FromRow)]
struct ProductRow {
    product_name: String,
    friendly_name: String,
    description: Option<String>,
    variables: serde_json::Value,
    platform_id: Option<String>,
}

impl From<ProductRow> for ProductRecord {
    fn from(row: ProductRow) -> Self {
        // Rows are written by the sync job from the same Variable type, so
        // a malformed variables column is treated as no declared bands.
        let variables: Vec<Variable> =
            serde_json::from_value(row.variables).unwrap_or_default();

        ProductRecord {
            product_name: row.product_name,
            friendly_name: row.friendly_name,
            description: row.description,
            variables,
            platform_id: row.platform_id,
        }
    }
}

/// Database schema SQL.
const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS products (
    product_name VARCHAR(200) PRIMARY KEY,
    friendly_name VARCHAR(300) NOT NULL,
    description TEXT,
    variables JSONB NOT NULL DEFAULT '[]'::jsonb,
    platform_id VARCHAR(100),
    synced_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX IF NOT EXISTS idx_products_platform ON products(platform_id);
"#;
