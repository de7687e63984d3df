//! Drives the listing client end to end against a live server instance,
//! the way a frontend embeds it.

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{rt, web, App, HttpServer};
use dotenv::dotenv;
use pretty_assertions::assert_eq;
use rentboard::auth::generate_token;
use rentboard::client::{ImageAttachment, ListingFilters, ListingPage, Modal, PropertyClient, Session};
use rentboard::routes;
use rentboard::routes::health;
use sqlx::PgPool;
use std::net::TcpListener;

fn test_env() -> String {
    dotenv().ok();
    if std::env::var("JWT_SECRET").is_err() {
        std::env::set_var("JWT_SECRET", "integration-test-secret");
    }
    std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests")
}

async fn cleanup_owner(pool: &PgPool, email: &str) {
    // Listings reference images, so they go first.
    let image_ids: Vec<uuid::Uuid> = sqlx::query_scalar(
        "SELECT image_id FROM properties WHERE email = $1 AND image_id IS NOT NULL",
    )
    .bind(email)
    .fetch_all(pool)
    .await
    .unwrap_or_default();
    let _ = sqlx::query("DELETE FROM properties WHERE email = $1")
        .bind(email)
        .execute(pool)
        .await;
    for id in image_ids {
        let _ = sqlx::query("DELETE FROM images WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await;
    }
}

/// Spawns the app on a free local port and returns its base URL.
async fn spawn_server(pool: PgPool) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    rt::spawn(async move {
        HttpServer::new(move || {
            App::new()
                .app_data(web::Data::new(pool.clone()))
                .wrap(
                    Cors::default()
                        .allow_any_origin()
                        .allow_any_method()
                        .allow_any_header()
                        .max_age(3600),
                )
                .wrap(Logger::default())
                .service(health::health)
                .service(
                    web::scope("/api")
                        .wrap(rentboard::auth::AuthMiddleware)
                        .configure(routes::config),
                )
        })
        .bind(("127.0.0.1", port))
        .unwrap_or_else(|_| panic!("Failed to bind to port {}", port))
        .run()
        .await
    });

    // Give the server a moment to start
    tokio::time::sleep(tokio::time::Duration::from_millis(200)).await;

    format!("http://127.0.0.1:{}", port)
}

#[actix_rt::test]
async fn test_listing_page_full_flow() {
    let database_url = test_env();
    let pool = PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to test DB");

    let owner_email = "page_owner@example.com";
    cleanup_owner(&pool, owner_email).await;
    let token = generate_token(owner_email).expect("Failed to mint test token");

    let base_url = spawn_server(pool.clone()).await;
    let client = PropertyClient::new(base_url, Session::new(token, owner_email));
    let mut page = ListingPage::new(client);

    // Add a listing through the modal flow, with an attached image
    page.refresh().await;
    page.view.open_add();
    page.view.update_form(|form| {
        form.with_title("Client-driven flat")
            .with_city("Pune")
            .with_rent("15000")
            .with_property_type("2BHK")
            .with_description("Added through the listing client")
    });
    let preview = page.attach_image(ImageAttachment::from_parts(
        "flat.png",
        "image/png",
        vec![0x89, 0x50, 0x4E, 0x47],
    ));
    assert!(preview.starts_with("data:image/png;base64,"));

    page.submit().await;
    assert_eq!(page.view.message(), Some("Property added!"));
    assert_eq!(*page.view.modal(), Modal::Closed);

    let created = page
        .view
        .properties()
        .iter()
        .find(|p| p.title == "Client-driven flat")
        .expect("Created listing should appear after the re-fetch")
        .clone();
    assert_eq!(created.email, owner_email);
    assert!(created.image_id.is_some());

    // The viewer owns it, so the card exposes controls
    let cards = page
        .view
        .cards(&ListingFilters::none().with_city("pune"), page.viewer_email());
    assert!(cards.iter().any(|c| c.id == created.id && c.can_modify));

    // Edit through the modal flow
    page.view.open_edit(&created);
    page.view.update_form(|form| form.with_rent("18000"));
    page.submit().await;
    assert_eq!(page.view.message(), Some("Property updated!"));

    let updated = page
        .view
        .properties()
        .iter()
        .find(|p| p.id == created.id)
        .expect("Edited listing should still be present")
        .clone();
    assert_eq!(updated.rent, 18000);

    // Delete requires the confirmation step
    page.request_delete(created.id);
    page.confirm_delete().await;
    assert_eq!(page.view.message(), Some("Property deleted"));
    assert!(!page.view.properties().iter().any(|p| p.id == created.id));

    cleanup_owner(&pool, owner_email).await;
}

#[actix_rt::test]
async fn test_foreign_listing_hides_controls_and_rejects_writes() {
    let database_url = test_env();
    let pool = PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to test DB");

    let owner_email = "page_owner_c@example.com";
    let viewer_email = "page_viewer_d@example.com";
    cleanup_owner(&pool, owner_email).await;

    let base_url = spawn_server(pool.clone()).await;

    // The owner creates a listing
    let owner_token = generate_token(owner_email).expect("Failed to mint test token");
    let owner_client =
        PropertyClient::new(base_url.clone(), Session::new(owner_token, owner_email));
    let mut owner_page = ListingPage::new(owner_client);
    owner_page.view.open_add();
    owner_page.view.update_form(|form| {
        form.with_title("Not yours")
            .with_city("Delhi")
            .with_rent("30000")
            .with_property_type("3BHK")
            .with_description("Owner-only listing")
    });
    owner_page.submit().await;
    assert_eq!(owner_page.view.message(), Some("Property added!"));
    let created = owner_page
        .view
        .properties()
        .iter()
        .find(|p| p.title == "Not yours")
        .expect("Owner's listing should exist")
        .clone();

    // A different viewer sees the listing but no controls
    let viewer_token = generate_token(viewer_email).expect("Failed to mint test token");
    let viewer_client = PropertyClient::new(base_url, Session::new(viewer_token, viewer_email));
    let mut viewer_page = ListingPage::new(viewer_client);
    viewer_page.refresh().await;

    let cards = viewer_page
        .view
        .cards(&ListingFilters::none(), viewer_page.viewer_email());
    let card = cards
        .iter()
        .find(|c| c.id == created.id)
        .expect("Foreign listing should still be visible");
    assert!(!card.can_modify);

    // And the server rejects the write even if a client tries anyway
    viewer_page.request_delete(created.id);
    viewer_page.confirm_delete().await;
    assert_eq!(viewer_page.view.message(), Some("Failed to delete property"));

    viewer_page.refresh().await;
    assert!(
        viewer_page.view.properties().iter().any(|p| p.id == created.id),
        "The listing must survive a foreign delete attempt"
    );

    cleanup_owner(&pool, owner_email).await;
}
