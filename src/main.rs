use actix_web::{App, HttpServer, middleware::Logger, web};
use chrono::Local;
use env_logger::{Env, Target};
use std::io::{self, Write};

use movie_rental_backend::{
    config::Config,
    database::{create_pool, run_migrations},
    handlers,
    middlewares::{AuthMiddleware, create_cors},
    services::*,
    swagger::swagger_config,
    utils::JwtService,
};

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    let config = Config::from_toml()
        .map_err(|e| io::Error::other(format!("Failed to load configuration: {e}")))?;

    let pool = create_pool(&config.database)
        .await
        .map_err(|e| io::Error::other(format!("Failed to connect to database: {e}")))?;

    run_migrations(&pool)
        .await
        .map_err(|e| io::Error::other(format!("Failed to run database migrations: {e}")))?;

    let jwt_service = JwtService::new(&config.jwt.secret);

    let pricing_service = PricingService::new(pool.clone());
    let promo_code_service = PromoCodeService::new(pool.clone(), pricing_service.clone());
    let rental_service = RentalService::new(
        pool.clone(),
        pricing_service.clone(),
        promo_code_service.clone(),
        config.rental.clone(),
    );

    log::info!(
        "Starting HTTP server at {}:{}",
        config.server.host,
        config.server.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(AuthMiddleware::new(jwt_service.clone()))
            .wrap(create_cors())
            .wrap(Logger::default())
            .app_data(web::Data::new(pricing_service.clone()))
            .app_data(web::Data::new(promo_code_service.clone()))
            .app_data(web::Data::new(rental_service.clone()))
            .configure(swagger_config)
            .service(
                web::scope("/api")
                    .configure(handlers::pricing_config)
                    .configure(handlers::promo_code_config)
                    .configure(handlers::rental_config)
                    .configure(handlers::admin_config),
            )
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await
}
