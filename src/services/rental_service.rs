use crate::config::RentalConfig;
use crate::entities::rental_entity as rentals;
use crate::database::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::services::{PricingService, PromoCodeService};
use crate::utils::{PromoRejection, evaluate_promo_code};
use chrono::{Duration, Utc};
use sea_orm::{
    ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use uuid::Uuid;

#[derive(Clone)]
pub struct RentalService {
    pool: DbPool,
    pricing_service: PricingService,
    promo_code_service: PromoCodeService,
    config: RentalConfig,
}

impl RentalService {
    pub fn new(
        pool: DbPool,
        pricing_service: PricingService,
        promo_code_service: PromoCodeService,
        config: RentalConfig,
    ) -> Self {
        Self {
            pool,
            pricing_service,
            promo_code_service,
            config,
        }
    }

    /// Checks out a movie for `user_id`, redeeming `request.promo_code` if given.
    pub async fn create_rental(
        &self,
        user_id: Uuid,
        request: CreateRentalRequest,
    ) -> AppResult<RentalResponse> {
        let (tier, original_amount) =
            match self.pricing_service.resolve_pricing(request.movie_id).await? {
                PricingResult::Available {
                    tier,
                    original_amount,
                    ..
                } => (tier, original_amount),
                PricingResult::Unavailable(_) => {
                    return Err(AppError::InvalidRequest("movie has no pricing".to_string()));
                }
            };

        let now = Utc::now();
        let promo = match request.promo_code.as_deref().map(str::trim) {
            Some(code) if !code.is_empty() => {
                let promo = self
                    .promo_code_service
                    .find_by_code(code)
                    .await?
                    .ok_or_else(|| {
                        AppError::ValidationError(PromoRejection::NotFound.message().to_string())
                    })?;
                let discount = evaluate_promo_code(&promo, original_amount, now)
                    .map_err(|r| AppError::ValidationError(r.message().to_string()))?;
                Some((promo, discount))
            }
            _ => None,
        };

        let (discount_amount, final_amount) = promo
            .as_ref()
            .map_or((0, original_amount), |(_, d)| {
                (d.discount_amount, d.final_amount)
            });

        let rental = rentals::Model {
            id: Uuid::new_v4(),
            user_id,
            movie_id: request.movie_id,
            pricing_tier_id: tier.id,
            original_amount_lak: original_amount,
            discount_amount_lak: discount_amount,
            final_amount_lak: final_amount,
            promo_code_id: promo.as_ref().map(|(p, _)| p.id),
            rented_at: now,
            expires_at: now + Duration::hours(self.config.duration_hours),
        };

        let txn = self.pool.begin().await?;
        rentals::Entity::insert(rentals::ActiveModel {
            id: Set(rental.id),
            user_id: Set(rental.user_id),
            movie_id: Set(rental.movie_id),
            pricing_tier_id: Set(rental.pricing_tier_id),
            original_amount_lak: Set(rental.original_amount_lak),
            discount_amount_lak: Set(rental.discount_amount_lak),
            final_amount_lak: Set(rental.final_amount_lak),
            promo_code_id: Set(rental.promo_code_id),
            rented_at: Set(rental.rented_at),
            expires_at: Set(rental.expires_at),
        })
        .exec_without_returning(&txn)
        .await?;

        if let Some((promo, discount)) = &promo {
            // Dropping `txn` on error rolls the rental back.
            PromoCodeService::redeem(&txn, promo, rental.id, user_id, discount.discount_amount)
                .await?;
        }
        txn.commit().await?;

        log::info!(
            "Rental {} created: movie {} for user {} at {} LAK",
            rental.id,
            rental.movie_id,
            user_id,
            rental.final_amount_lak
        );
        Ok(RentalResponse::new(rental, &self.config.currency))
    }

    pub async fn list_rentals(
        &self,
        user_id: Uuid,
        params: &PaginationParams,
    ) -> AppResult<PaginatedResponse<RentalResponse>> {
        let paginator = rentals::Entity::find()
            .filter(rentals::Column::UserId.eq(user_id))
            .order_by_desc(rentals::Column::RentedAt)
            .paginate(self.pool.as_ref(), params.get_per_page());

        let total = paginator.num_items().await?;
        let items = paginator
            .fetch_page(params.get_page() - 1)
            .await?
            .into_iter()
            .map(|r| RentalResponse::new(r, &self.config.currency))
            .collect();

        Ok(PaginatedResponse::new(items, params, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::PromoDiscountType;
    use crate::services::pricing_service::tests::{movie, tier};
    use crate::utils::discount::tests::promo;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::Arc;

    fn service_with(db: MockDatabase) -> RentalService {
        let conn = Arc::new(db.into_connection());
        let pricing = PricingService::new(conn.clone());
        let promos = PromoCodeService::new(conn.clone(), pricing.clone());
        RentalService::new(conn, pricing, promos, RentalConfig::default())
    }

    fn exec_ok() -> MockExecResult {
        MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }
    }

    #[actix_web::test]
    async fn test_rental_without_promo() {
        let t = tier(75_000, true);
        let m = movie(Some(t.id));
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![m.clone()]])
            .append_query_results([vec![t.clone()]])
            .append_exec_results([exec_ok()]);
        let service = service_with(db);

        let user_id = Uuid::new_v4();
        let rental = service
            .create_rental(
                user_id,
                CreateRentalRequest {
                    movie_id: m.id,
                    promo_code: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(rental.original_amount_lak, 75_000);
        assert_eq!(rental.final_amount_lak, 75_000);
        assert_eq!(rental.discount_amount_lak, 0);
        assert_eq!(rental.promo_code_id, None);
        assert_eq!(rental.pricing_tier_id, t.id);
        assert_eq!(rental.currency, "LAK");
        assert_eq!(rental.expires_at - rental.rented_at, Duration::hours(48));
    }

    #[actix_web::test]
    async fn test_rental_with_promo_redeems_it() {
        let t = tier(100_000, true);
        let m = movie(Some(t.id));
        let p = promo("HALF50", PromoDiscountType::Percentage, Some(50));
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![m.clone()]])
            .append_query_results([vec![t]])
            .append_query_results([vec![p.clone()]])
            .append_exec_results([exec_ok(), exec_ok(), exec_ok()]);
        let service = service_with(db);

        let rental = service
            .create_rental(
                Uuid::new_v4(),
                CreateRentalRequest {
                    movie_id: m.id,
                    promo_code: Some("half50".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(rental.discount_amount_lak, 50_000);
        assert_eq!(rental.final_amount_lak, 50_000);
        assert_eq!(rental.promo_code_id, Some(p.id));
    }

    #[actix_web::test]
    async fn test_rental_rolls_back_when_code_runs_out() {
        let t = tier(100_000, true);
        let m = movie(Some(t.id));
        let mut p = promo("LASTONE", PromoDiscountType::Free, None);
        p.max_uses = Some(1);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![m.clone()]])
            .append_query_results([vec![t]])
            .append_query_results([vec![p]])
            .append_exec_results([
                exec_ok(),
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                },
            ]);
        let service = service_with(db);

        let err = service
            .create_rental(
                Uuid::new_v4(),
                CreateRentalRequest {
                    movie_id: m.id,
                    promo_code: Some("LASTONE".to_string()),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(msg) if msg.contains("usage limit")));
    }

    #[actix_web::test]
    async fn test_rental_rejects_unknown_code_before_writing() {
        let t = tier(100_000, true);
        let m = movie(Some(t.id));
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![m.clone()]])
            .append_query_results([vec![t]])
            .append_query_results([Vec::<crate::entities::promo_code_entity::Model>::new()]);
        let service = service_with(db);

        let err = service
            .create_rental(
                Uuid::new_v4(),
                CreateRentalRequest {
                    movie_id: m.id,
                    promo_code: Some("NOPE".to_string()),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(msg) if msg == "code not found"));
    }

    #[actix_web::test]
    async fn test_rental_of_unpriced_movie_is_invalid() {
        let m = movie(None);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![m.clone()]]);
        let service = service_with(db);

        let err = service
            .create_rental(
                Uuid::new_v4(),
                CreateRentalRequest {
                    movie_id: m.id,
                    promo_code: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidRequest(_)));
    }
}
