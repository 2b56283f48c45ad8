use super::handlers::{self, accounts, catalog, packlists, reviews};
use super::state::AppState;
use crate::domain::{BestTime, Culture, LocalPhrase};
use crate::error::{GuideError, Result};
use crate::metrics::HttpMetrics;
use axum::{
    http::{HeaderValue, Method, Request},
    middleware::{self, Next},
    response::Response,
    routing::{get, post, put},
    Router,
};
use std::time::Instant;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// CORS for the configured front-end origin; `*` allows any origin.
pub fn cors_layer(allowed_origin: &str) -> Result<CorsLayer> {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);
    if allowed_origin.trim() == "*" {
        return Ok(cors.allow_origin(Any));
    }
    let origin = allowed_origin.trim().parse::<HeaderValue>().map_err(|_| {
        GuideError::Config(format!("Invalid allowed origin '{allowed_origin}'"))
    })?;
    Ok(cors.allow_origin(origin))
}

async fn track_requests<B>(request: Request<B>, next: Next<B>) -> Response {
    let path = request.uri().path().to_string();
    let started = Instant::now();
    let response = next.run(request).await;
    HttpMetrics::record_request(
        &path,
        response.status().as_u16(),
        started.elapsed().as_secs_f64(),
    );
    response
}

fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/countries", get(catalog::list_countries))
        .route("/countries/country/:locator", get(catalog::country))
        .route("/countries/:name", get(catalog::country))
        .route("/attractions", get(catalog::list_attractions))
        .route(
            "/attractions/country/:locator",
            get(catalog::attractions_by_country),
        )
        .route("/attractions/:id", get(catalog::attraction_by_id))
        .route("/foods", get(catalog::list_foods))
        .route("/foods/country/:locator", get(catalog::foods_by_country))
        .route("/foods/id/:id", get(catalog::food_by_id))
        .route("/foods/:locator", get(catalog::foods_by_country))
        .route("/culture", get(catalog::list_facts::<Culture>))
        .route(
            "/culture/country/:locator",
            get(catalog::facts_by_country::<Culture>),
        )
        .route("/culture/:id", get(catalog::fact_by_id::<Culture>))
        .route("/besttime", get(catalog::list_facts::<BestTime>))
        .route(
            "/besttime/country/:locator",
            get(catalog::facts_by_country::<BestTime>),
        )
        .route("/besttime/:id", get(catalog::fact_by_id::<BestTime>))
        .route("/localphrase", get(catalog::list_facts::<LocalPhrase>))
        .route(
            "/localphrase/country/:locator",
            get(catalog::facts_by_country::<LocalPhrase>),
        )
        .route("/localphrase/:id", get(catalog::fact_by_id::<LocalPhrase>))
        .route("/emergency", get(catalog::list_emergency))
        .route(
            "/emergency/country/:locator",
            get(catalog::emergency_by_country),
        )
        .route("/funfacts", get(catalog::list_fun_facts))
        .route(
            "/funfacts/country/:locator",
            get(catalog::fun_facts_by_country),
        )
        .route("/funfacts/all/:locator", get(catalog::fun_facts_by_country))
        .route("/funfacts/random/:locator", get(catalog::random_fun_fact))
        .route("/destinations/search", get(catalog::search_destinations))
}

fn review_routes() -> Router<AppState> {
    Router::new()
        .route("/reviews", post(reviews::create))
        .route("/reviews/country/:locator", get(reviews::by_country))
        .route("/reviews/stats/:locator", get(reviews::stats))
        .route("/reviews/:id", put(reviews::update).delete(reviews::delete))
        .route("/reviews/:id/rate", post(reviews::rate))
}

fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/packlist", post(packlists::save))
        .route(
            "/packlist/:user_id",
            get(packlists::get).delete(packlists::delete),
        )
        .route("/packlist/:user_id/item", post(packlists::add_item))
        .route(
            "/packlist/:user_id/item/:item_id",
            put(packlists::update_item).delete(packlists::delete_item),
        )
        .route("/signup", post(accounts::signup).get(accounts::list))
        .route("/signup/login", post(accounts::login))
        .route("/signup/:id", get(accounts::get))
}

/// Every route of the API, with tracing, request metrics and CORS applied.
pub fn app_router(state: AppState, cors: CorsLayer) -> Router {
    let api = catalog_routes()
        .merge(review_routes())
        .merge(account_routes());

    Router::new()
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics_text))
        .nest("/api", api)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(track_requests))
                .layer(cors),
        )
        .with_state(state)
}
