use crate::entities::{movie_entity as movies, pricing_tier_entity as pricing_tiers};
use crate::database::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::services::{AuditAction, AuditRecord};
use crate::utils::validate_tier_name;
use chrono::Utc;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

#[derive(Clone)]
pub struct PricingService {
    pool: DbPool,
}

impl PricingService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Whether a movie can be rented and at what price, before any promo code.
    pub async fn resolve_pricing(&self, movie_id: Uuid) -> AppResult<PricingResult> {
        resolve_pricing_on(self.pool.as_ref(), movie_id).await
    }

    pub async fn list_tiers(&self) -> AppResult<Vec<PricingTierResponse>> {
        let tiers = pricing_tiers::Entity::find()
            .order_by_asc(pricing_tiers::Column::SortOrder)
            .order_by_asc(pricing_tiers::Column::Name)
            .all(self.pool.as_ref())
            .await?;
        Ok(tiers.into_iter().map(PricingTierResponse::from).collect())
    }

    pub async fn get_tier(&self, tier_id: Uuid) -> AppResult<PricingTierResponse> {
        Ok(self.find_tier(tier_id).await?.into())
    }

    pub async fn create_tier(
        &self,
        actor_id: Uuid,
        request: CreatePricingTierRequest,
    ) -> AppResult<PricingTierResponse> {
        validate_tier_name(&request.name)?;
        validate_display_name(&request.display_name_en)?;
        validate_display_name(&request.display_name_lo)?;
        validate_price(request.price_lak)?;

        let now = Utc::now();
        let tier = pricing_tiers::Model {
            id: Uuid::new_v4(),
            name: request.name,
            display_name_en: request.display_name_en.trim().to_string(),
            display_name_lo: request.display_name_lo.trim().to_string(),
            price_lak: request.price_lak,
            is_active: request.is_active,
            sort_order: request.sort_order,
            created_at: now,
            updated_at: now,
        };

        let txn = self.pool.begin().await?;
        // A concurrent create of the same name loses here instead of at the index.
        let inserted = pricing_tiers::Entity::insert(pricing_tiers::ActiveModel {
            id: Set(tier.id),
            name: Set(tier.name.clone()),
            display_name_en: Set(tier.display_name_en.clone()),
            display_name_lo: Set(tier.display_name_lo.clone()),
            price_lak: Set(tier.price_lak),
            is_active: Set(tier.is_active),
            sort_order: Set(tier.sort_order),
            created_at: Set(tier.created_at),
            updated_at: Set(tier.updated_at),
        })
        .on_conflict(
            OnConflict::column(pricing_tiers::Column::Name)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(&txn)
        .await?;
        if inserted == 0 {
            return Err(name_taken(&tier.name));
        }

        let after = serde_json::to_value(&tier)?;
        AuditRecord::new(actor_id, AuditAction::Create, "pricing_tier", tier.id)
            .write(&txn, None, Some(&after))
            .await?;
        txn.commit().await?;

        log::info!("Created pricing tier {} ({} LAK)", tier.name, tier.price_lak);
        Ok(tier.into())
    }

    pub async fn update_tier(
        &self,
        actor_id: Uuid,
        tier_id: Uuid,
        request: UpdatePricingTierRequest,
    ) -> AppResult<PricingTierResponse> {
        let existing = self.find_tier(tier_id).await?;

        if let Some(name) = &request.name {
            validate_tier_name(name)?;
            if *name != existing.name {
                self.ensure_name_free(name, tier_id).await?;
            }
        }
        if let Some(v) = &request.display_name_en {
            validate_display_name(v)?;
        }
        if let Some(v) = &request.display_name_lo {
            validate_display_name(v)?;
        }
        if let Some(price) = request.price_lak {
            validate_price(price)?;
        }

        let before = serde_json::to_value(&existing)?;
        let name_for_conflict = request.name.clone().unwrap_or_else(|| existing.name.clone());
        let mut am = existing.into_active_model();
        if let Some(name) = request.name {
            am.name = Set(name);
        }
        if let Some(v) = request.display_name_en {
            am.display_name_en = Set(v.trim().to_string());
        }
        if let Some(v) = request.display_name_lo {
            am.display_name_lo = Set(v.trim().to_string());
        }
        if let Some(price) = request.price_lak {
            am.price_lak = Set(price);
        }
        if let Some(active) = request.is_active {
            am.is_active = Set(active);
        }
        if let Some(order) = request.sort_order {
            am.sort_order = Set(order);
        }
        am.updated_at = Set(Utc::now());

        let txn = self.pool.begin().await?;
        let tier = am
            .update(&txn)
            .await
            .map_err(|e| AppError::from_write(e, || name_taken_message(&name_for_conflict)))?;
        let after = serde_json::to_value(&tier)?;
        AuditRecord::new(actor_id, AuditAction::Update, "pricing_tier", tier.id)
            .write(&txn, Some(&before), Some(&after))
            .await?;
        txn.commit().await?;

        Ok(tier.into())
    }

    /// Deletes a tier; movies priced by it become unavailable.
    pub async fn delete_tier(&self, actor_id: Uuid, tier_id: Uuid) -> AppResult<()> {
        let existing = self.find_tier(tier_id).await?;
        let before = serde_json::to_value(&existing)?;

        let txn = self.pool.begin().await?;
        let detached = movies::Entity::update_many()
            .col_expr(
                movies::Column::PricingTierId,
                Expr::value(Option::<Uuid>::None),
            )
            .col_expr(movies::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(movies::Column::PricingTierId.eq(tier_id))
            .exec(&txn)
            .await?;
        pricing_tiers::Entity::delete_by_id(tier_id)
            .exec(&txn)
            .await?;
        AuditRecord::new(actor_id, AuditAction::Delete, "pricing_tier", tier_id)
            .write(&txn, Some(&before), None)
            .await?;
        txn.commit().await?;

        log::info!(
            "Deleted pricing tier {}; {} movie(s) no longer priced",
            existing.name,
            detached.rows_affected
        );
        Ok(())
    }

    pub async fn assign_tier(
        &self,
        actor_id: Uuid,
        movie_id: Uuid,
        request: AssignPricingTierRequest,
    ) -> AppResult<MovieResponse> {
        let movie = movies::Entity::find_by_id(movie_id)
            .one(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::NotFound("Movie not found".to_string()))?;

        if let Some(tier_id) = request.tier_id {
            self.find_tier(tier_id).await?;
        }

        let before = serde_json::to_value(&movie)?;
        let mut am = movie.into_active_model();
        am.pricing_tier_id = Set(request.tier_id);
        am.updated_at = Set(Utc::now());

        let txn = self.pool.begin().await?;
        let movie = am.update(&txn).await?;
        let after = serde_json::to_value(&movie)?;
        AuditRecord::new(actor_id, AuditAction::Update, "movie", movie.id)
            .write(&txn, Some(&before), Some(&after))
            .await?;
        txn.commit().await?;

        Ok(movie.into())
    }

    async fn find_tier(&self, tier_id: Uuid) -> AppResult<pricing_tiers::Model> {
        pricing_tiers::Entity::find_by_id(tier_id)
            .one(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::NotFound("Pricing tier not found".to_string()))
    }

    async fn ensure_name_free(&self, name: &str, except: Uuid) -> AppResult<()> {
        let taken = pricing_tiers::Entity::find()
            .filter(pricing_tiers::Column::Name.eq(name))
            .filter(pricing_tiers::Column::Id.ne(except))
            .one(self.pool.as_ref())
            .await?;
        if taken.is_some() {
            return Err(name_taken(name));
        }
        Ok(())
    }
}

fn name_taken_message(name: &str) -> String {
    format!("Pricing tier '{name}' already exists")
}

fn name_taken(name: &str) -> AppError {
    AppError::Conflict(name_taken_message(name))
}

/// Same as [`PricingService::resolve_pricing`], on any connection or transaction.
pub async fn resolve_pricing_on<C: ConnectionTrait>(
    conn: &C,
    movie_id: Uuid,
) -> AppResult<PricingResult> {
    let movie = movies::Entity::find_by_id(movie_id)
        .one(conn)
        .await?
        .ok_or_else(|| AppError::NotFound("Movie not found".to_string()))?;

    let tier = match movie.pricing_tier_id {
        Some(tier_id) => pricing_tiers::Entity::find_by_id(tier_id).one(conn).await?,
        None => None,
    };

    Ok(PricingResult::from_tier(tier))
}

fn validate_price(price_lak: i64) -> AppResult<()> {
    if price_lak < 0 {
        return Err(AppError::ValidationError(
            "Price must not be negative".to_string(),
        ));
    }
    Ok(())
}

fn validate_display_name(name: &str) -> AppResult<()> {
    let len = name.trim().chars().count();
    if len == 0 || len > 255 {
        return Err(AppError::ValidationError(
            "Display name must be between 1 and 255 characters".to_string(),
        ));
    }
    Ok(())
}
