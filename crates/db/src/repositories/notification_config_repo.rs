//! Repository for the singleton `notification_config` row.

use sqlx::PgPool;

use crate::models::notification_config::NotificationConfig;

/// Column list for `notification_config` queries.
const COLUMNS: &str = "sender, recipients";

/// Provides access to the operator email configuration.
pub struct NotificationConfigRepo;

impl NotificationConfigRepo {
    /// Fetch the configuration, if one has been set.
    pub async fn get(pool: &PgPool) -> Result<Option<NotificationConfig>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notification_config WHERE id = 1");
        sqlx::query_as::<_, NotificationConfig>(&query)
            .fetch_optional(pool)
            .await
    }

    /// Create or replace the configuration.
    ///
    /// The caller validates address shape before this is reached.
    pub async fn upsert(
        pool: &PgPool,
        sender: &str,
        recipients: &[String],
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO notification_config (id, sender, recipients) \
             VALUES (1, $1, $2) \
             ON CONFLICT (id) DO UPDATE SET \
                sender = EXCLUDED.sender, \
                recipients = EXCLUDED.recipients, \
                updated_at = NOW()",
        )
        .bind(sender)
        .bind(recipients)
        .execute(pool)
        .await?;
        Ok(())
    }
}
