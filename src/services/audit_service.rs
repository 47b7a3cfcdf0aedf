use crate::entities::audit_log_entity as audit_logs;
use crate::error::AppResult;
use crate::utils::diff_fields;
use chrono::Utc;
use sea_orm::{ConnectionTrait, EntityTrait, Set};
use serde_json::Value;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditAction {
    Create,
    Update,
    Delete,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Create => "create",
            AuditAction::Update => "update",
            AuditAction::Delete => "delete",
        }
    }
}

/// One admin mutation, written in the same transaction as the change itself.
#[derive(Debug, Clone, Copy)]
pub struct AuditRecord {
    pub actor_id: Uuid,
    pub action: AuditAction,
    pub entity_type: &'static str,
    pub entity_id: Uuid,
}

impl AuditRecord {
    pub fn new(
        actor_id: Uuid,
        action: AuditAction,
        entity_type: &'static str,
        entity_id: Uuid,
    ) -> Self {
        Self {
            actor_id,
            action,
            entity_type,
            entity_id,
        }
    }

    /// Stores the diff between the snapshots. Returns `false` when nothing changed
    /// and no row was written.
    pub async fn write<C: ConnectionTrait>(
        self,
        conn: &C,
        before: Option<&Value>,
        after: Option<&Value>,
    ) -> AppResult<bool> {
        let changes = diff_fields(before, after);
        if changes.is_empty() {
            return Ok(false);
        }

        let row = audit_logs::ActiveModel {
            id: Set(Uuid::new_v4()),
            actor_id: Set(self.actor_id),
            action: Set(self.action.as_str().to_string()),
            entity_type: Set(self.entity_type.to_string()),
            entity_id: Set(self.entity_id),
            changes: Set(Value::Object(changes)),
            created_at: Set(Utc::now()),
        };
        audit_logs::Entity::insert(row)
            .exec_without_returning(conn)
            .await?;

        log::info!(
            "audit: {} {} {} by {}",
            self.action.as_str(),
            self.entity_type,
            self.entity_id,
            self.actor_id
        );
        Ok(true)
    }
}
