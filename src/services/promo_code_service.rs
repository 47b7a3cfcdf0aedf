use crate::entities::{
    PromoDiscountType, promo_code_entity as promo_codes, promo_code_use_entity as promo_code_uses,
};
use crate::database::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::services::{AuditAction, AuditRecord, PricingService};
use crate::utils::{
    PromoRejection, evaluate_promo_code, generate_promo_code, normalize_promo_code,
    validate_promo_code_format,
};
use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Condition, Expr, OnConflict};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

#[derive(Clone)]
pub struct PromoCodeService {
    pool: DbPool,
    pricing_service: PricingService,
}

impl PromoCodeService {
    pub fn new(pool: DbPool, pricing_service: PricingService) -> Self {
        Self {
            pool,
            pricing_service,
        }
    }

    /// Checks a user-supplied code against a movie's current price without
    /// consuming it. Fails only when the movie itself cannot be priced.
    pub async fn validate_promo_code(
        &self,
        code: &str,
        movie_id: Uuid,
    ) -> AppResult<PromoValidation> {
        self.validate_promo_code_at(code, movie_id, Utc::now())
            .await
    }

    pub(crate) async fn validate_promo_code_at(
        &self,
        code: &str,
        movie_id: Uuid,
        now: DateTime<Utc>,
    ) -> AppResult<PromoValidation> {
        let original_amount = match self.pricing_service.resolve_pricing(movie_id).await? {
            PricingResult::Available {
                original_amount, ..
            } => original_amount,
            PricingResult::Unavailable(_) => {
                return Err(AppError::InvalidRequest("movie has no pricing".to_string()));
            }
        };

        let outcome = match self.find_by_code(code).await? {
            Some(promo) => evaluate_promo_code(&promo, original_amount, now),
            None => Err(PromoRejection::NotFound),
        };

        if let Err(rejection) = outcome {
            log::debug!("Promo code {code:?} rejected for movie {movie_id}: {rejection}");
        }
        Ok(outcome.into())
    }

    pub async fn find_by_code(&self, code: &str) -> AppResult<Option<promo_codes::Model>> {
        let code = normalize_promo_code(code);
        if code.is_empty() {
            return Ok(None);
        }
        Ok(promo_codes::Entity::find()
            .filter(promo_codes::Column::Code.eq(code))
            .one(self.pool.as_ref())
            .await?)
    }

    /// Consumes one use of `promo` for `rental_id`, inside the caller's transaction.
    ///
    /// The use counter is bumped with a single conditional update, so two
    /// checkouts racing for the last use cannot both succeed.
    pub async fn redeem<C: ConnectionTrait>(
        conn: &C,
        promo: &promo_codes::Model,
        rental_id: Uuid,
        user_id: Uuid,
        discount_amount: i64,
    ) -> AppResult<()> {
        let now = Utc::now();
        let updated = promo_codes::Entity::update_many()
            .col_expr(
                promo_codes::Column::UsesCount,
                Expr::col(promo_codes::Column::UsesCount).add(1),
            )
            .col_expr(promo_codes::Column::UpdatedAt, Expr::value(now))
            .filter(promo_codes::Column::Id.eq(promo.id))
            .filter(promo_codes::Column::IsActive.eq(true))
            .filter(
                Condition::any()
                    .add(promo_codes::Column::MaxUses.is_null())
                    .add(
                        Expr::col(promo_codes::Column::UsesCount)
                            .lt(Expr::col(promo_codes::Column::MaxUses)),
                    ),
            )
            .exec(conn)
            .await?;

        if updated.rows_affected == 0 {
            log::warn!(
                "Promo code {} could not be redeemed for rental {rental_id}",
                promo.code
            );
            return Err(AppError::ValidationError(
                PromoRejection::UsageLimitReached.message().to_string(),
            ));
        }

        let usage = promo_code_uses::ActiveModel {
            id: Set(Uuid::new_v4()),
            promo_code_id: Set(promo.id),
            rental_id: Set(rental_id),
            user_id: Set(user_id),
            discount_amount_lak: Set(discount_amount),
            created_at: Set(now),
        };
        promo_code_uses::Entity::insert(usage)
            .exec_without_returning(conn)
            .await?;

        log::info!(
            "Redeemed promo code {} for rental {rental_id} (-{discount_amount} LAK)",
            promo.code
        );
        Ok(())
    }

    pub async fn list_promo_codes(
        &self,
        query: &PromoCodeQuery,
    ) -> AppResult<PaginatedResponse<PromoCodeResponse>> {
        let params = PaginationParams::new(query.page, query.per_page);

        let mut select = promo_codes::Entity::find();
        if let Some(active) = query.active {
            select = select.filter(promo_codes::Column::IsActive.eq(active));
        }
        let paginator = select
            .order_by_desc(promo_codes::Column::CreatedAt)
            .paginate(self.pool.as_ref(), params.get_per_page());

        let total = paginator.num_items().await?;
        let items = paginator
            .fetch_page(params.get_page() - 1)
            .await?
            .into_iter()
            .map(PromoCodeResponse::from)
            .collect();

        Ok(PaginatedResponse::new(items, &params, total))
    }

    pub async fn get_promo_code(&self, id: Uuid) -> AppResult<PromoCodeResponse> {
        Ok(self.find_by_id(id).await?.into())
    }

    pub async fn create_promo_code(
        &self,
        actor_id: Uuid,
        request: CreatePromoCodeRequest,
    ) -> AppResult<PromoCodeResponse> {
        // Blank means "generate one", same as leaving the field out.
        let code = match request
            .code
            .as_deref()
            .map(normalize_promo_code)
            .filter(|code| !code.is_empty())
        {
            Some(code) => code,
            None => generate_promo_code(),
        };
        validate_promo_code_format(&code)?;

        let rules = PromoRules {
            discount_type: request.discount_type,
            discount_value: request.discount_value,
            valid_from: request.valid_from,
            valid_to: request.valid_to,
            max_uses: request.max_uses,
        };
        rules.validate()?;

        let now = Utc::now();
        let promo = promo_codes::Model {
            id: Uuid::new_v4(),
            code,
            discount_type: rules.discount_type,
            discount_value: rules.stored_value(),
            valid_from: rules.valid_from,
            valid_to: rules.valid_to,
            max_uses: rules.max_uses,
            uses_count: 0,
            is_active: request.is_active,
            created_at: now,
            updated_at: now,
        };

        let txn = self.pool.begin().await?;
        let inserted = promo_codes::Entity::insert(promo_codes::ActiveModel {
            id: Set(promo.id),
            code: Set(promo.code.clone()),
            discount_type: Set(promo.discount_type),
            discount_value: Set(promo.discount_value),
            valid_from: Set(promo.valid_from),
            valid_to: Set(promo.valid_to),
            max_uses: Set(promo.max_uses),
            uses_count: Set(promo.uses_count),
            is_active: Set(promo.is_active),
            created_at: Set(promo.created_at),
            updated_at: Set(promo.updated_at),
        })
        .on_conflict(
            OnConflict::column(promo_codes::Column::Code)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(&txn)
        .await?;
        if inserted == 0 {
            return Err(code_taken(&promo.code));
        }

        let after = serde_json::to_value(&promo)?;
        AuditRecord::new(actor_id, AuditAction::Create, "promo_code", promo.id)
            .write(&txn, None, Some(&after))
            .await?;
        txn.commit().await?;

        log::info!(
            "Created promo code {} ({})",
            promo.code,
            promo.discount_type
        );
        Ok(promo.into())
    }

    pub async fn update_promo_code(
        &self,
        actor_id: Uuid,
        id: Uuid,
        request: UpdatePromoCodeRequest,
    ) -> AppResult<PromoCodeResponse> {
        let existing = self.find_by_id(id).await?;

        let code = match request.code.as_deref() {
            Some(code) => {
                let code = normalize_promo_code(code);
                validate_promo_code_format(&code)?;
                if code != existing.code {
                    self.ensure_code_free(&code, id).await?;
                }
                Some(code)
            }
            None => None,
        };

        let rules = PromoRules::patched(&existing, &request);
        rules.validate()?;
        if let Some(max_uses) = rules.max_uses {
            if max_uses < existing.uses_count {
                return Err(AppError::ValidationError(format!(
                    "Max uses cannot be below the {} uses already made",
                    existing.uses_count
                )));
            }
        }

        let code_for_conflict = code.clone().unwrap_or_else(|| existing.code.clone());
        let before = serde_json::to_value(&existing)?;
        let mut am = existing.into_active_model();
        if let Some(code) = code {
            am.code = Set(code);
        }
        am.discount_type = Set(rules.discount_type);
        am.discount_value = Set(rules.stored_value());
        am.valid_from = Set(rules.valid_from);
        am.valid_to = Set(rules.valid_to);
        am.max_uses = Set(rules.max_uses);
        if let Some(active) = request.is_active {
            am.is_active = Set(active);
        }
        am.updated_at = Set(Utc::now());

        let txn = self.pool.begin().await?;
        let promo = am
            .update(&txn)
            .await
            .map_err(|e| AppError::from_write(e, || code_taken_message(&code_for_conflict)))?;
        let after = serde_json::to_value(&promo)?;
        AuditRecord::new(actor_id, AuditAction::Update, "promo_code", promo.id)
            .write(&txn, Some(&before), Some(&after))
            .await?;
        txn.commit().await?;

        Ok(promo.into())
    }

    /// Only never-redeemed codes can be deleted; used ones are kept for the
    /// redemption history and should be deactivated instead.
    pub async fn delete_promo_code(&self, actor_id: Uuid, id: Uuid) -> AppResult<()> {
        let existing = self.find_by_id(id).await?;
        if existing.uses_count > 0 {
            return Err(AppError::Conflict(
                "Promo code has been redeemed; deactivate it instead".to_string(),
            ));
        }

        let before = serde_json::to_value(&existing)?;
        let txn = self.pool.begin().await?;
        promo_codes::Entity::delete_by_id(id).exec(&txn).await?;
        AuditRecord::new(actor_id, AuditAction::Delete, "promo_code", id)
            .write(&txn, Some(&before), None)
            .await?;
        txn.commit().await?;

        log::info!("Deleted promo code {}", existing.code);
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<promo_codes::Model> {
        promo_codes::Entity::find_by_id(id)
            .one(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::NotFound("Promo code not found".to_string()))
    }

    async fn ensure_code_free(&self, code: &str, except: Uuid) -> AppResult<()> {
        let taken = promo_codes::Entity::find()
            .filter(promo_codes::Column::Code.eq(code))
            .filter(promo_codes::Column::Id.ne(except))
            .one(self.pool.as_ref())
            .await?;
        if taken.is_some() {
            return Err(code_taken(code));
        }
        Ok(())
    }
}

fn code_taken_message(code: &str) -> String {
    format!("Promo code '{code}' already exists")
}

fn code_taken(code: &str) -> AppError {
    AppError::Conflict(code_taken_message(code))
}

/// The discount-shaping fields of a promo code, validated together.
#[derive(Debug, Clone, Copy)]
struct PromoRules {
    discount_type: PromoDiscountType,
    discount_value: Option<i64>,
    valid_from: Option<DateTime<Utc>>,
    valid_to: Option<DateTime<Utc>>,
    max_uses: Option<i32>,
}

impl PromoRules {
    /// The stored rules with a PATCH applied: an absent field keeps its
    /// value, an explicit null clears it.
    fn patched(existing: &promo_codes::Model, request: &UpdatePromoCodeRequest) -> Self {
        Self {
            discount_type: request.discount_type.unwrap_or(existing.discount_type),
            discount_value: request.discount_value.unwrap_or(existing.discount_value),
            valid_from: request.valid_from.unwrap_or(existing.valid_from),
            valid_to: request.valid_to.unwrap_or(existing.valid_to),
            max_uses: request.max_uses.unwrap_or(existing.max_uses),
        }
    }

    fn validate(&self) -> AppResult<()> {
        match (self.discount_type, self.discount_value) {
            (PromoDiscountType::Free, _) => {}
            (PromoDiscountType::Percentage, Some(v)) if v > 0 && v <= 100 => {}
            (PromoDiscountType::Percentage, _) => {
                return Err(AppError::ValidationError(
                    "Percentage discount must be between 1 and 100".to_string(),
                ));
            }
            (PromoDiscountType::Fixed, Some(v)) if v >= 0 => {}
            (PromoDiscountType::Fixed, _) => {
                return Err(AppError::ValidationError(
                    "Fixed discount requires a non-negative amount".to_string(),
                ));
            }
        }

        if let (Some(from), Some(to)) = (self.valid_from, self.valid_to) {
            if from > to {
                return Err(AppError::ValidationError(
                    "validFrom must not be after validTo".to_string(),
                ));
            }
        }

        if matches!(self.max_uses, Some(n) if n < 1) {
            return Err(AppError::ValidationError(
                "maxUses must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Free codes carry no value.
    fn stored_value(&self) -> Option<i64> {
        match self.discount_type {
            PromoDiscountType::Free => None,
            _ => self.discount_value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::movie_entity as movies;
    use crate::services::pricing_service::tests::{movie, tier};
    use crate::utils::discount::tests::promo;
    use chrono::Duration;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::Arc;

    fn service_with(db: MockDatabase) -> PromoCodeService {
        let conn = Arc::new(db.into_connection());
        PromoCodeService::new(conn.clone(), PricingService::new(conn))
    }

    /// Mock database that resolves one priced movie and then returns `found` for the code lookup.
    fn priced_movie_db(
        price: i64,
        found: Option<promo_codes::Model>,
    ) -> (MockDatabase, movies::Model) {
        let t = tier(price, true);
        let m = movie(Some(t.id));
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![m.clone()]])
            .append_query_results([vec![t]])
            .append_query_results([found.into_iter().collect::<Vec<_>>()]);
        (db, m)
    }

    #[actix_web::test]
    async fn test_free_code_zeroes_price() {
        let p = promo("FREEWATCH", PromoDiscountType::Free, None);
        let (db, m) = priced_movie_db(75_000, Some(p));
        let service = service_with(db);

        let v = service.validate_promo_code("FREEWATCH", m.id).await.unwrap();
        assert!(v.valid);
        assert_eq!(v.discount_type, Some(PromoDiscountType::Free));
        assert_eq!(v.discount_amount_lak, Some(75_000));
        assert_eq!(v.final_amount_lak, Some(0));
    }

    #[actix_web::test]
    async fn test_lowercase_percentage_code() {
        let p = promo("HALF50", PromoDiscountType::Percentage, Some(50));
        let (db, m) = priced_movie_db(100_000, Some(p));
        let service = service_with(db);

        let v = service
            .validate_promo_code("half50", m.id)
            .await
            .unwrap();
        assert!(v.valid);
        assert_eq!(v.discount_amount_lak, Some(50_000));
        assert_eq!(v.final_amount_lak, Some(50_000));
    }

    #[actix_web::test]
    async fn test_fixed_code_never_goes_negative() {
        let p = promo("BIGFIX", PromoDiscountType::Fixed, Some(30_000));
        let (db, m) = priced_movie_db(20_000, Some(p));
        let service = service_with(db);

        let v = service.validate_promo_code("BIGFIX", m.id).await.unwrap();
        assert!(v.valid);
        assert_eq!(v.discount_amount_lak, Some(20_000));
        assert_eq!(v.final_amount_lak, Some(0));
    }

    #[actix_web::test]
    async fn test_expired_code_is_invalid_not_error() {
        let now = Utc::now();
        let mut p = promo("OLDNEWS", PromoDiscountType::Free, None);
        p.valid_to = Some(now - Duration::days(1));
        let (db, m) = priced_movie_db(75_000, Some(p));
        let service = service_with(db);

        let v = service
            .validate_promo_code_at("OLDNEWS", m.id, now)
            .await
            .unwrap();
        assert!(!v.valid);
        assert!(v.error.unwrap().contains("expired"));
        assert_eq!(v.error_code, Some(PromoRejection::Expired));
    }

    #[actix_web::test]
    async fn test_exhausted_code_is_invalid() {
        let mut p = promo("LIMITED", PromoDiscountType::Fixed, Some(1_000));
        p.max_uses = Some(5);
        p.uses_count = 5;
        let (db, m) = priced_movie_db(75_000, Some(p));
        let service = service_with(db);

        let v = service.validate_promo_code("LIMITED", m.id).await.unwrap();
        assert!(!v.valid);
        assert!(v.error.unwrap().contains("usage limit"));
    }

    #[actix_web::test]
    async fn test_unknown_code_is_invalid() {
        let (db, m) = priced_movie_db(75_000, None);
        let service = service_with(db);

        let v = service.validate_promo_code("NOPE", m.id).await.unwrap();
        assert!(!v.valid);
        assert_eq!(v.error.as_deref(), Some("code not found"));
    }

    #[actix_web::test]
    async fn test_movie_without_pricing_is_invalid_request() {
        let m = movie(None);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![m.clone()]]);
        let service = service_with(db);

        let err = service
            .validate_promo_code("FREEWATCH", m.id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidRequest(_)));
    }

    #[actix_web::test]
    async fn test_inactive_tier_blocks_validation() {
        let t = tier(75_000, false);
        let m = movie(Some(t.id));
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![m.clone()]])
            .append_query_results([vec![t]]);
        let service = service_with(db);

        let err = service.validate_promo_code("ANY", m.id).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidRequest(_)));
    }

    #[actix_web::test]
    async fn test_redeem_fails_when_limit_hit_concurrently() {
        let p = promo("LASTONE", PromoDiscountType::Free, None);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let err = PromoCodeService::redeem(&db, &p, Uuid::new_v4(), Uuid::new_v4(), 75_000)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
        // Only the conditional update ran; no usage row was written.
        assert_eq!(db.into_transaction_log().len(), 1);
    }

    #[actix_web::test]
    async fn test_redeem_records_use() {
        let p = promo("HALF50", PromoDiscountType::Percentage, Some(50));
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
            ])
            .into_connection();

        PromoCodeService::redeem(&db, &p, Uuid::new_v4(), Uuid::new_v4(), 50_000)
            .await
            .unwrap();
        assert_eq!(db.into_transaction_log().len(), 2);
    }

    #[actix_web::test]
    async fn test_delete_redeemed_code_conflicts() {
        let mut p = promo("USED", PromoDiscountType::Free, None);
        p.uses_count = 1;
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![p.clone()]]);
        let service = service_with(db);

        let err = service
            .delete_promo_code(Uuid::new_v4(), p.id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[test]
    fn test_promo_rules() {
        let base = PromoRules {
            discount_type: PromoDiscountType::Percentage,
            discount_value: Some(50),
            valid_from: None,
            valid_to: None,
            max_uses: None,
        };
        assert!(base.validate().is_ok());
        assert!(PromoRules { discount_value: Some(0), ..base }.validate().is_err());
        assert!(PromoRules { discount_value: Some(101), ..base }.validate().is_err());
        assert!(PromoRules { discount_value: None, ..base }.validate().is_err());

        let fixed = PromoRules {
            discount_type: PromoDiscountType::Fixed,
            discount_value: Some(0),
            ..base
        };
        assert!(fixed.validate().is_ok());
        assert!(PromoRules { discount_value: Some(-1), ..fixed }.validate().is_err());

        let free = PromoRules {
            discount_type: PromoDiscountType::Free,
            discount_value: Some(42),
            ..base
        };
        assert!(free.validate().is_ok());
        assert_eq!(free.stored_value(), None);

        let now = Utc::now();
        assert!(
            PromoRules {
                valid_from: Some(now),
                valid_to: Some(now - Duration::hours(1)),
                ..base
            }
            .validate()
            .is_err()
        );
        assert!(PromoRules { max_uses: Some(0), ..base }.validate().is_err());
    }

    fn exec_ok() -> MockExecResult {
        MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }
    }

    #[test]
    fn test_patched_rules_keep_absent_and_clear_null() {
        let now = Utc::now();
        let mut existing = promo("SUMMER", PromoDiscountType::Percentage, Some(20));
        existing.valid_to = Some(now);
        existing.max_uses = Some(10);

        let untouched = PromoRules::patched(&existing, &UpdatePromoCodeRequest::default());
        assert_eq!(untouched.discount_type, PromoDiscountType::Percentage);
        assert_eq!(untouched.discount_value, Some(20));
        assert_eq!(untouched.valid_to, Some(now));
        assert_eq!(untouched.max_uses, Some(10));

        let request = UpdatePromoCodeRequest {
            discount_value: Some(Some(30)),
            valid_to: Some(None),
            max_uses: Some(None),
            ..UpdatePromoCodeRequest::default()
        };
        let patched = PromoRules::patched(&existing, &request);
        assert_eq!(patched.discount_value, Some(30));
        assert_eq!(patched.valid_to, None);
        assert_eq!(patched.max_uses, None);
        assert_eq!(patched.valid_from, existing.valid_from);
    }

    #[actix_web::test]
    async fn test_update_rejects_max_uses_below_uses_made() {
        let mut p = promo("POPULAR", PromoDiscountType::Free, None);
        p.uses_count = 3;
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![p.clone()]]);
        let service = service_with(db);

        let request = UpdatePromoCodeRequest {
            max_uses: Some(Some(1)),
            ..UpdatePromoCodeRequest::default()
        };
        let err = service
            .update_promo_code(Uuid::new_v4(), p.id, request)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[actix_web::test]
    async fn test_update_clears_limit_and_renames() {
        let mut p = promo("OLDNAME", PromoDiscountType::Percentage, Some(10));
        p.max_uses = Some(5);
        let mut updated = p.clone();
        updated.code = "NEWNAME".to_string();
        updated.max_uses = None;
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![p.clone()]])
            .append_query_results([Vec::<promo_codes::Model>::new()])
            .append_query_results([vec![updated]])
            .append_exec_results([exec_ok()]);
        let service = service_with(db);

        let request = UpdatePromoCodeRequest {
            code: Some("newname".to_string()),
            max_uses: Some(None),
            ..UpdatePromoCodeRequest::default()
        };
        let response = service
            .update_promo_code(Uuid::new_v4(), p.id, request)
            .await
            .unwrap();
        assert_eq!(response.code, "NEWNAME");
        assert_eq!(response.max_uses, None);
    }

    #[actix_web::test]
    async fn test_create_with_blank_code_generates_one() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([exec_ok(), exec_ok()]);
        let service = service_with(db);

        let request = CreatePromoCodeRequest {
            code: Some("   ".to_string()),
            discount_type: PromoDiscountType::Free,
            discount_value: None,
            valid_from: None,
            valid_to: None,
            max_uses: None,
            is_active: true,
        };
        let response = service
            .create_promo_code(Uuid::new_v4(), request)
            .await
            .unwrap();
        assert_eq!(response.code.len(), 8);
        assert!(validate_promo_code_format(&response.code).is_ok());
    }

    #[actix_web::test]
    async fn test_create_duplicate_code_conflicts() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).append_exec_results([
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            },
        ]);
        let service = service_with(db);

        let request = CreatePromoCodeRequest {
            code: Some("taken1".to_string()),
            discount_type: PromoDiscountType::Fixed,
            discount_value: Some(5_000),
            valid_from: None,
            valid_to: None,
            max_uses: Some(100),
            is_active: true,
        };
        let err = service
            .create_promo_code(Uuid::new_v4(), request)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(ref m) if m.contains("TAKEN1")));
    }
}
