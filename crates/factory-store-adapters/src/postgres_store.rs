use async_trait::async_trait;
use chrono::{DateTime, Utc};
use factory_contract::{Agent, AgentPatch, AgentReader, AgentStoreError, AgentWriter, NewAgent};
use serde_json::{Map, Value};
use sqlx::types::Json;
use sqlx::Row;

/// PostgreSQL-backed agent store.
///
/// The pool is expected to connect with the privileged database role; access
/// control is the resource handlers' job, not the table's.
pub struct PostgresStore {
    pool: sqlx::PgPool,
    table: String,
}

impl PostgresStore {
    /// Create a new PostgreSQL storage using the given connection pool.
    ///
    /// Agents are stored in the `agents` table by default.
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self {
            pool,
            table: "agents".to_string(),
        }
    }

    /// Create a new PostgreSQL storage with a custom table name.
    pub fn with_table(pool: sqlx::PgPool, table: impl Into<String>) -> Self {
        Self {
            pool,
            table: table.into(),
        }
    }

    /// Ensure the storage table exists (idempotent).
    pub async fn ensure_table(&self) -> Result<(), AgentStoreError> {
        let sql = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {table} (
                id                   TEXT PRIMARY KEY,
                user_id              TEXT NOT NULL,
                name                 TEXT NOT NULL,
                description          TEXT,
                system_prompt        TEXT NOT NULL,
                model                TEXT NOT NULL,
                temperature          DOUBLE PRECISION NOT NULL,
                max_tokens           INTEGER NOT NULL,
                icon                 TEXT NOT NULL,
                color                TEXT NOT NULL,
                capabilities         JSONB NOT NULL DEFAULT '[]'::jsonb,
                tools                JSONB NOT NULL DEFAULT '[]'::jsonb,
                knowledge_base       JSONB NOT NULL DEFAULT '[]'::jsonb,
                is_public            BOOLEAN NOT NULL DEFAULT FALSE,
                marketplace_category TEXT,
                version              TEXT NOT NULL,
                metadata             JSONB NOT NULL DEFAULT '{{}}'::jsonb,
                created_at           TIMESTAMPTZ NOT NULL DEFAULT now()
            );
            CREATE INDEX IF NOT EXISTS idx_{table}_user_created
                ON {table} (user_id, created_at DESC);
            "#,
            table = self.table,
        );
        sqlx::raw_sql(&sql)
            .execute(&self.pool)
            .await
            .map_err(Self::sql_err)?;
        Ok(())
    }

    fn sql_err(e: sqlx::Error) -> AgentStoreError {
        AgentStoreError::Io(std::io::Error::other(e.to_string()))
    }

    fn row_to_agent(row: &sqlx::postgres::PgRow) -> Result<Agent, AgentStoreError> {
        let capabilities: Json<Vec<String>> = row.try_get("capabilities").map_err(Self::sql_err)?;
        let tools: Json<Vec<String>> = row.try_get("tools").map_err(Self::sql_err)?;
        let knowledge_base: Json<Vec<String>> =
            row.try_get("knowledge_base").map_err(Self::sql_err)?;
        let metadata: Json<Map<String, Value>> = row.try_get("metadata").map_err(Self::sql_err)?;
        let max_tokens: i32 = row.try_get("max_tokens").map_err(Self::sql_err)?;
        Ok(Agent {
            id: row.try_get("id").map_err(Self::sql_err)?,
            user_id: row.try_get("user_id").map_err(Self::sql_err)?,
            name: row.try_get("name").map_err(Self::sql_err)?,
            description: row.try_get("description").map_err(Self::sql_err)?,
            system_prompt: row.try_get("system_prompt").map_err(Self::sql_err)?,
            model: row.try_get("model").map_err(Self::sql_err)?,
            temperature: row.try_get("temperature").map_err(Self::sql_err)?,
            max_tokens: max_tokens as u32,
            icon: row.try_get("icon").map_err(Self::sql_err)?,
            color: row.try_get("color").map_err(Self::sql_err)?,
            capabilities: capabilities.0,
            tools: tools.0,
            knowledge_base: knowledge_base.0,
            is_public: row.try_get("is_public").map_err(Self::sql_err)?,
            marketplace_category: row
                .try_get("marketplace_category")
                .map_err(Self::sql_err)?,
            version: row.try_get("version").map_err(Self::sql_err)?,
            metadata: metadata.0,
            created_at: row.try_get("created_at").map_err(Self::sql_err)?,
        })
    }
}

#[async_trait]
impl AgentReader for PostgresStore {
    async fn get(&self, id: &str) -> Result<Option<Agent>, AgentStoreError> {
        let sql = format!("SELECT * FROM {} WHERE id = $1", self.table);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Self::sql_err)?;
        row.as_ref().map(Self::row_to_agent).transpose()
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Agent>, AgentStoreError> {
        let sql = format!(
            "SELECT * FROM {} WHERE user_id = $1 ORDER BY created_at DESC, id DESC",
            self.table
        );
        let rows = sqlx::query(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(Self::sql_err)?;
        rows.iter().map(Self::row_to_agent).collect()
    }
}

#[async_trait]
impl AgentWriter for PostgresStore {
    async fn create(&self, agent: NewAgent) -> Result<Agent, AgentStoreError> {
        let sql = format!(
            r#"
            INSERT INTO {} (
                id, user_id, name, description, system_prompt, model,
                temperature, max_tokens, icon, color, capabilities, tools,
                knowledge_base, is_public, marketplace_category, version, metadata
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            RETURNING created_at
            "#,
            self.table
        );
        let row = sqlx::query(&sql)
            .bind(&agent.id)
            .bind(&agent.user_id)
            .bind(&agent.name)
            .bind(&agent.description)
            .bind(&agent.system_prompt)
            .bind(&agent.model)
            .bind(agent.temperature)
            .bind(agent.max_tokens as i32)
            .bind(&agent.icon)
            .bind(&agent.color)
            .bind(Json(&agent.capabilities))
            .bind(Json(&agent.tools))
            .bind(Json(&agent.knowledge_base))
            .bind(agent.is_public)
            .bind(&agent.marketplace_category)
            .bind(&agent.version)
            .bind(Json(&agent.metadata))
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if e.to_string().contains("duplicate key")
                    || e.to_string().contains("unique constraint")
                {
                    AgentStoreError::AlreadyExists
                } else {
                    Self::sql_err(e)
                }
            })?;
        let created_at: DateTime<Utc> = row.try_get("created_at").map_err(Self::sql_err)?;
        Ok(agent.into_agent(created_at))
    }

    async fn update(&self, id: &str, patch: &AgentPatch) -> Result<Agent, AgentStoreError> {
        // Read-modify-write; last write wins under concurrent updates.
        let mut agent = self
            .get(id)
            .await?
            .ok_or_else(|| AgentStoreError::NotFound(id.to_string()))?;
        patch.apply_to(&mut agent);

        let sql = format!(
            r#"
            UPDATE {} SET
                name = $2, description = $3, system_prompt = $4, model = $5,
                temperature = $6, max_tokens = $7, icon = $8, color = $9,
                capabilities = $10, tools = $11, knowledge_base = $12,
                is_public = $13, marketplace_category = $14, version = $15,
                metadata = $16
            WHERE id = $1
            "#,
            self.table
        );
        let result = sqlx::query(&sql)
            .bind(id)
            .bind(&agent.name)
            .bind(&agent.description)
            .bind(&agent.system_prompt)
            .bind(&agent.model)
            .bind(agent.temperature)
            .bind(agent.max_tokens as i32)
            .bind(&agent.icon)
            .bind(&agent.color)
            .bind(Json(&agent.capabilities))
            .bind(Json(&agent.tools))
            .bind(Json(&agent.knowledge_base))
            .bind(agent.is_public)
            .bind(&agent.marketplace_category)
            .bind(&agent.version)
            .bind(Json(&agent.metadata))
            .execute(&self.pool)
            .await
            .map_err(Self::sql_err)?;
        if result.rows_affected() == 0 {
            return Err(AgentStoreError::NotFound(id.to_string()));
        }
        Ok(agent)
    }

    async fn delete(&self, id: &str) -> Result<(), AgentStoreError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", self.table);
        sqlx::query(&sql)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(Self::sql_err)?;
        Ok(())
    }
}
