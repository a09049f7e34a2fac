use anyhow::{Context, Result};
use sqlx::{postgres::PgPoolOptions, postgres::PgRow, PgPool, Row};

use crate::model::{NewYarn, Yarn, YarnFilter, YarnId, YarnWeight};
use crate::store::traits::YarnStore;

const YARN_COLUMNS: &str =
    "id, length_yards, num_skeins, weight, color, brand, special_attr, material, thumbnail";

#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a new PostgreSQL store with the given database URL
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .context("Failed to create PostgreSQL connection pool")?;

        Ok(Self { pool })
    }

    /// Run the embedded migrations
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }
}

fn row_to_yarn(row: &PgRow) -> Result<Yarn> {
    let weight: String = row.try_get("weight")?;
    let weight = weight
        .parse::<YarnWeight>()
        .context("Invalid weight stored in yarns table")?;

    Ok(Yarn {
        id: row.try_get("id")?,
        length_yards: row.try_get("length_yards")?,
        num_skeins: row.try_get("num_skeins")?,
        weight,
        color: row.try_get("color")?,
        brand: row.try_get("brand")?,
        special_attr: row.try_get("special_attr")?,
        material: row.try_get("material")?,
        thumbnail: row.try_get("thumbnail")?,
    })
}

#[async_trait::async_trait]
impl YarnStore for PostgresStore {
    async fn list_yarns(&self, filter: &YarnFilter) -> Result<Vec<Yarn>> {
        let sql = format!(
            r#"
            SELECT {YARN_COLUMNS}
            FROM yarns
            WHERE ($1::text IS NULL OR weight = $1)
              AND ($2::text IS NULL OR strpos(lower(color), lower($2)) > 0)
            ORDER BY id
            "#
        );
        let rows = sqlx::query(&sql)
            .bind(filter.weight.map(|w| w.as_str()))
            .bind(filter.color.as_deref())
            .fetch_all(&self.pool)
            .await
            .context("Failed to list yarns")?;

        rows.iter().map(row_to_yarn).collect()
    }

    async fn get_yarn(&self, id: YarnId) -> Result<Option<Yarn>> {
        let sql = format!("SELECT {YARN_COLUMNS} FROM yarns WHERE id = $1");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch yarn")?;

        let Some(row) = row else {
            return Ok(None);
        };

        row_to_yarn(&row).map(Some)
    }

    async fn find_by_color_and_weight(&self, color: &str, weight: YarnWeight) -> Result<Option<Yarn>> {
        let sql = format!(
            "SELECT {YARN_COLUMNS} FROM yarns WHERE color = $1 AND weight = $2 ORDER BY id LIMIT 1"
        );
        let row = sqlx::query(&sql)
            .bind(color)
            .bind(weight.as_str())
            .fetch_optional(&self.pool)
            .await
            .context("Failed to look up yarn by color and weight")?;

        let Some(row) = row else {
            return Ok(None);
        };

        row_to_yarn(&row).map(Some)
    }

    async fn insert_yarn(&self, yarn: NewYarn) -> Result<Yarn> {
        yarn.validate()?;

        let id = sqlx::query_scalar::<_, YarnId>(
            r#"
            INSERT INTO yarns (length_yards, num_skeins, weight, color, brand, special_attr, material, thumbnail)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(yarn.length_yards)
        .bind(yarn.num_skeins)
        .bind(yarn.weight.as_str())
        .bind(&yarn.color)
        .bind(&yarn.brand)
        .bind(&yarn.special_attr)
        .bind(&yarn.material)
        .bind(&yarn.thumbnail)
        .fetch_one(&self.pool)
        .await
        .context("Failed to insert yarn")?;

        Ok(Yarn::from_new(id, yarn))
    }

    async fn count_yarns(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM yarns")
            .fetch_one(&self.pool)
            .await
            .context("Failed to count yarns")?;

        Ok(count)
    }
}
