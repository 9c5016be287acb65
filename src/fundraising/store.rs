use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::entities::fundraising_events::{self, FundraisingEventStatus};
use crate::error::AppError;
use super::validation::NewFundraisingEvent;

/// Persistence for fundraising events over an injected connection.
///
/// Status transitions are not policed here; any declared status may be
/// written over any other.
#[derive(Clone, Debug)]
pub struct FundraisingEventStore {
    db: DatabaseConnection,
}

impl FundraisingEventStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Validates and inserts a new event, stamping `created_at` with now.
    #[tracing::instrument(skip(self, new), fields(merchant_id = %new.merchant_id))]
    pub async fn create(
        &self,
        new: NewFundraisingEvent,
    ) -> Result<fundraising_events::Model, AppError> {
        let valid = new.validate().map_err(|errors| {
            tracing::warn!("Rejected fundraising event: {}", errors);
            errors
        })?;

        let inserted = valid.into_active_model(Utc::now()).insert(&self.db).await?;
        tracing::info!(id = inserted.id, "Created fundraising event");
        Ok(inserted)
    }

    #[tracing::instrument(skip(self))]
    pub async fn find(&self, id: i64) -> Result<Option<fundraising_events::Model>, AppError> {
        Ok(fundraising_events::Entity::find_by_id(id).one(&self.db).await?)
    }

    /// All events owned by a merchant, newest first.
    #[tracing::instrument(skip(self))]
    pub async fn list_for_merchant(
        &self,
        merchant_id: &str,
    ) -> Result<Vec<fundraising_events::Model>, AppError> {
        let events = fundraising_events::Entity::find()
            .filter(fundraising_events::Column::MerchantId.eq(merchant_id))
            .order_by_desc(fundraising_events::Column::CreatedAt)
            .order_by_desc(fundraising_events::Column::Id)
            .all(&self.db)
            .await?;
        tracing::debug!("Found {} events for merchant", events.len());
        Ok(events)
    }

    #[tracing::instrument(skip(self))]
    pub async fn set_status(
        &self,
        id: i64,
        status: FundraisingEventStatus,
    ) -> Result<fundraising_events::Model, AppError> {
        let existing = self
            .find(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("fundraising event {}", id)))?;

        if existing.status == status {
            return Ok(existing);
        }

        let mut active: fundraising_events::ActiveModel = existing.into();
        active.status = Set(status);
        let updated = active.update(&self.db).await?;
        tracing::info!(id, ?status, "Updated fundraising event status");
        Ok(updated)
    }
}
