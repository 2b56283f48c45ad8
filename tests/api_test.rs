use anyhow::Result;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use travel_guide::resolver::CountryResolver;
use travel_guide::server::{app_router, cors_layer, AppState};
use travel_guide::domain::*;
use travel_guide::storage::{InMemoryStorage, SeedData, Storage};
use travel_guide::GuideError;
use uuid::Uuid;

fn seed() -> Value {
    json!({
        "countries": [
            { "name": "Japan", "description": "Islands" },
            { "name": "Belgium" },
            { "name": "United States" }
        ],
        "foods": [
            { "country": "Japan", "name": "Sushi" },
            { "country": "Japan", "name": "Ramen", "type": "Noodles", "rating": 4.8 },
            { "country": "Italy", "name": "Pizza" }
        ],
        "attractions": [{
            "countries": [
                { "name": "Belgium", "slug": "belgium", "attractions": [
                    { "title": "Atomium", "rating": 4.4 },
                    { "title": "Grand Place" }
                ]},
                { "name": "Japan", "slug": "japan", "attractions": [
                    { "title": "Fushimi Inari", "rating": 4.9 }
                ]}
            ]
        }],
        "culture": [
            { "country": "Japan", "aspect": "Bowing", "description": "Greeting", "tip": "Bow back" }
        ],
        "emergency": [{
            "country": "USA",
            "emergencyNumbers": { "police": "911", "ambulance": "911", "fire": "911", "general": "911" }
        }],
        "funFacts": [
            { "country": "Japan", "funFact": "Over 6,800 islands" },
            { "country": "Japan", "funFact": "Trains are rarely late" }
        ],
        "destinations": [
            { "name": "Kyoto", "country": "Japan" },
            { "name": "Bruges", "country": "Belgium" }
        ]
    })
}

fn app() -> Result<Router> {
    let seed: SeedData = serde_json::from_value(seed())?;
    let state = AppState::new(
        Arc::new(InMemoryStorage::from_seed(seed)),
        Arc::new(CountryResolver::default()),
    );
    Ok(app_router(state, cors_layer("*")?))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Result<(StatusCode, Value)> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))?,
        None => builder.body(Body::empty())?,
    };

    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = hyper::body::to_bytes(response.into_body()).await?;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok((status, value))
}

async fn get(app: &Router, uri: &str) -> Result<(StatusCode, Value)> {
    send(app, Method::GET, uri, None).await
}

#[tokio::test]
async fn test_foods_by_slug_inject_defaults() -> Result<()> {
    let app = app()?;

    for uri in ["/api/foods/japan", "/api/foods/country/JAPAN"] {
        let (status, body) = get(&app, uri).await?;
        assert_eq!(status, StatusCode::OK, "{uri}");
        let foods = body.as_array().expect("array of foods");
        assert_eq!(foods.len(), 2);
        assert_eq!(foods[0]["name"], "Sushi");
        assert_eq!(foods[0]["type"], "Traditional");
        assert_eq!(foods[0]["price"], "Varies");
        assert_eq!(foods[0]["rating"], 4.5);
        assert_eq!(foods[1]["type"], "Noodles");
    }
    Ok(())
}

#[tokio::test]
async fn test_miss_returns_404_with_normalized_name() -> Result<()> {
    let app = app()?;
    let (status, body) = get(&app, "/api/culture/country/new-zealand").await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["country"], "New Zealand");
    assert_eq!(body["success"], false);

    let (status, body) = get(&app, "/api/foods/country/atlantis").await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["country"], "Atlantis");
    Ok(())
}

#[tokio::test]
async fn test_blank_locator_is_rejected() -> Result<()> {
    let app = app()?;
    let (status, body) = get(&app, "/api/foods/country/---").await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Country parameter is required");
    Ok(())
}

#[tokio::test]
async fn test_nested_attractions_resolve_with_stable_ids() -> Result<()> {
    let app = app()?;
    let (status, first) = get(&app, "/api/attractions/country/belgium").await?;
    assert_eq!(status, StatusCode::OK);
    let items = first.as_array().expect("array of attractions");
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|item| item["country"] == "Belgium"));
    assert_eq!(items[1]["bestTime"], "All day");

    let (_, second) = get(&app, "/api/attractions/country/Belgium").await?;
    assert_eq!(first, second);

    let id = items[0]["id"].as_str().expect("synthetic id");
    let (status, attraction) = get(&app, &format!("/api/attractions/{id}")).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(attraction["title"], "Atomium");

    let (status, all) = get(&app, "/api/attractions").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all[0]["title"], "Fushimi Inari");
    Ok(())
}

#[tokio::test]
async fn test_alternate_names_and_envelopes() -> Result<()> {
    let app = app()?;
    let (status, body) = get(&app, "/api/emergency/country/united-states").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["country"], "USA");

    let (status, body) = get(&app, "/api/funfacts/all/japan").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);

    let (status, body) = get(&app, "/api/funfacts/random/japan").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["country"], "Japan");
    assert!(body["data"]["funFact"].is_string());
    Ok(())
}

#[tokio::test]
async fn test_countries_lookup_and_listing() -> Result<()> {
    let app = app()?;
    let (status, body) = get(&app, "/api/countries/japan").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Japan");

    let (status, body) = get(&app, "/api/countries/country/united_states").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "United States");

    let (_, body) = get(&app, "/api/countries").await?;
    let names: Vec<&str> = body
        .as_array()
        .expect("array of countries")
        .iter()
        .filter_map(|c| c["name"].as_str())
        .collect();
    assert_eq!(names, vec!["Belgium", "Japan", "United States"]);
    Ok(())
}

#[tokio::test]
async fn test_id_lookups() -> Result<()> {
    let app = app()?;
    let (status, _) = get(&app, "/api/foods/id/not-a-uuid").await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, culture) = get(&app, "/api/culture").await?;
    let id = culture[0]["id"].as_str().expect("seeded id");
    let (status, body) = get(&app, &format!("/api/culture/{id}")).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["aspect"], "Bowing");

    let (status, _) = get(&app, &format!("/api/besttime/{}", uuid::Uuid::new_v4())).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn test_review_flow() -> Result<()> {
    let app = app()?;
    let (status, created) = send(
        &app,
        Method::POST,
        "/api/reviews",
        Some(json!({
            "country": "Japan",
            "user": "kai",
            "rating": 4,
            "title": "Lovely",
            "comment": "Great food everywhere"
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["data"]["id"].as_str().expect("review id").to_string();

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/reviews",
        Some(json!({ "country": "Japan", "user": "kai", "rating": 9, "title": "x", "comment": "y" })),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = get(&app, "/api/reviews/country/japan").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);

    let (status, body) = get(&app, "/api/reviews/country/atlantis").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/reviews/{id}"),
        Some(json!({ "user": "someone-else", "rating": 1 })),
    )
    .await?;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/reviews/{id}/rate"),
        Some(json!({ "helpful": false })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["notHelpful"], 1);

    let (_, stats) = get(&app, "/api/reviews/stats/japan").await?;
    assert_eq!(stats["data"]["totalReviews"], 1);
    assert_eq!(stats["data"]["averageRating"], 4.0);
    assert_eq!(stats["data"]["ratingDistribution"]["4"], 1);

    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/api/reviews/{id}"),
        Some(json!({ "user": "kai" })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/api/reviews/{id}"),
        Some(json!({ "user": "kai" })),
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn test_packlist_flow() -> Result<()> {
    let app = app()?;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/packlist",
        Some(json!({ "userId": "u-1", "items": [{ "name": "Passport" }] })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "My Packing List");
    assert_eq!(body["data"]["items"][0]["category"], "General");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/packlist/u-1/item",
        Some(json!({ "name": "Adapter", "quantity": 2 })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    let item_id = body["data"]["items"][1]["id"].as_str().expect("item id").to_string();

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/packlist/u-1/item/{item_id}"),
        Some(json!({ "packed": true })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["items"][1]["packed"], true);

    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/api/packlist/u-1/item/{item_id}"),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, Method::DELETE, "/api/packlist/u-1", None).await?;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = get(&app, "/api/packlist/u-1").await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn test_signup_and_login() -> Result<()> {
    let app = app()?;
    let signup = json!({ "name": "Ines", "email": "Ines@Example.com", "password": "hunter22" });

    let (status, body) = send(&app, Method::POST, "/api/signup", Some(signup.clone())).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user"]["email"], "ines@example.com");

    let (status, _) = send(&app, Method::POST, "/api/signup", Some(signup)).await?;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/signup/login",
        Some(json!({ "email": "ines@example.com", "password": "hunter22" })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/signup/login",
        Some(json!({ "email": "ines@example.com", "password": "hunter23" })),
    )
    .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (_, body) = get(&app, "/api/signup").await?;
    assert_eq!(body["count"], 1);
    assert!(body["data"][0].get("passwordDigest").is_none());
    Ok(())
}

#[tokio::test]
async fn test_health_and_search() -> Result<()> {
    let app = app()?;
    let (status, body) = get(&app, "/health").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = get(&app, "/api/destinations/search?q=kyo").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["name"], "Kyoto");

    let (status, _) = get(&app, "/api/destinations/search").await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

/// A store whose backend is gone: every call fails.
struct UnreachableStorage;

fn unreachable<T>() -> travel_guide::Result<T> {
    Err(GuideError::Storage("connection refused".to_string()))
}

#[async_trait]
impl Storage for UnreachableStorage {
    async fn get_all_countries(&self) -> travel_guide::Result<Vec<Country>> {
        unreachable()
    }
    async fn get_all_attraction_documents(&self) -> travel_guide::Result<Vec<AttractionDocument>> {
        unreachable()
    }
    async fn get_all_foods(&self) -> travel_guide::Result<Vec<Food>> {
        unreachable()
    }
    async fn get_all_culture(&self) -> travel_guide::Result<Vec<Culture>> {
        unreachable()
    }
    async fn get_all_best_times(&self) -> travel_guide::Result<Vec<BestTime>> {
        unreachable()
    }
    async fn get_all_local_phrases(&self) -> travel_guide::Result<Vec<LocalPhrase>> {
        unreachable()
    }
    async fn get_all_fun_facts(&self) -> travel_guide::Result<Vec<FunFact>> {
        unreachable()
    }
    async fn get_all_emergency(&self) -> travel_guide::Result<Vec<Emergency>> {
        unreachable()
    }
    async fn get_all_destinations(&self) -> travel_guide::Result<Vec<Destination>> {
        unreachable()
    }
    async fn get_all_reviews(&self) -> travel_guide::Result<Vec<Review>> {
        unreachable()
    }
    async fn get_review_by_id(&self, _review_id: Uuid) -> travel_guide::Result<Option<Review>> {
        unreachable()
    }
    async fn create_review(&self, _review: &mut Review) -> travel_guide::Result<()> {
        unreachable()
    }
    async fn update_review(&self, _review: &Review) -> travel_guide::Result<()> {
        unreachable()
    }
    async fn delete_review(&self, _review_id: Uuid) -> travel_guide::Result<bool> {
        unreachable()
    }
    async fn get_packlist_by_user(&self, _user_id: &str) -> travel_guide::Result<Option<Packlist>> {
        unreachable()
    }
    async fn save_packlist(&self, _packlist: &mut Packlist) -> travel_guide::Result<()> {
        unreachable()
    }
    async fn delete_packlist(&self, _user_id: &str) -> travel_guide::Result<bool> {
        unreachable()
    }
    async fn create_signup(&self, _signup: &mut Signup) -> travel_guide::Result<()> {
        unreachable()
    }
    async fn get_signup_by_email(&self, _email: &str) -> travel_guide::Result<Option<Signup>> {
        unreachable()
    }
    async fn get_signup_by_id(&self, _signup_id: Uuid) -> travel_guide::Result<Option<Signup>> {
        unreachable()
    }
    async fn get_all_signups(&self) -> travel_guide::Result<Vec<Signup>> {
        unreachable()
    }
}

#[tokio::test]
async fn test_storage_failure_returns_server_error() -> Result<()> {
    let state = AppState::new(
        Arc::new(UnreachableStorage),
        Arc::new(CountryResolver::default()),
    );
    let app = app_router(state, cors_layer("*")?);

    let (status, body) = send(&app, Method::GET, "/api/foods/country/japan", None).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Server Error");
    assert!(body["error"]
        .as_str()
        .map_or(false, |e| e.contains("connection refused")));

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/signup",
        Some(json!({ "name": "Mira", "email": "mira@example.com", "password": "secret1" })),
    )
    .await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Server Error");
    Ok(())
}
