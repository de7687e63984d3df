use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{http::header, test, web, App};
use dotenv::dotenv;
use rentboard::auth::generate_token;
use rentboard::models::Property;
use rentboard::routes;
use rentboard::routes::health;
use sqlx::PgPool;
use uuid::Uuid;

const BOUNDARY: &str = "----rentboard-image-test-boundary";

// A tiny valid PNG header is enough; the server stores bytes verbatim.
const PNG_BYTES: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D,
];

fn test_env() -> String {
    dotenv().ok();
    if std::env::var("JWT_SECRET").is_err() {
        std::env::set_var("JWT_SECRET", "integration-test-secret");
    }
    std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests")
}

fn create_body(title: &str, file: (&str, &str, &[u8])) -> (String, Vec<u8>) {
    let mut body = Vec::new();
    for (name, value) in [
        ("title", title),
        ("city", "Jaipur"),
        ("rent", "11000"),
        ("type", "1BHK"),
        ("description", "Image round-trip listing"),
    ] {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            )
            .as_bytes(),
        );
    }
    let (filename, content_type, data) = file;
    body.extend_from_slice(
        format!(
            "--{}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
            BOUNDARY, filename, content_type
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

    (
        format!("multipart/form-data; boundary={}", BOUNDARY),
        body,
    )
}

async fn cleanup_owner(pool: &PgPool, email: &str) {
    // Listings reference images, so they go first.
    let image_ids: Vec<Uuid> = sqlx::query_scalar(
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

#[actix_rt::test]
async fn test_image_round_trip() {
    let database_url = test_env();
    let pool = PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to test DB");

    let app = test::init_service(
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
            ),
    )
    .await;

    let owner_email = "image_owner@example.com";
    cleanup_owner(&pool, owner_email).await;
    let token = generate_token(owner_email).expect("Failed to mint test token");

    // Create a listing with an attached PNG
    let (content_type, body) = create_body("Flat with photo", ("flat.png", "image/png", PNG_BYTES));
    let req_create = test::TestRequest::post()
        .uri("/api/properties/add")
        .append_header((header::AUTHORIZATION, format!("Bearer {}", token)))
        .insert_header((header::CONTENT_TYPE, content_type))
        .set_payload(body)
        .to_request();
    let resp_create = test::call_service(&app, req_create).await;
    assert_eq!(resp_create.status(), actix_web::http::StatusCode::CREATED);
    let created: Property = test::read_body_json(resp_create).await;
    let image_id = created.image_id.expect("Created listing should reference its image");

    // Fetch the image back, unauthenticated
    let req_image = test::TestRequest::get()
        .uri(&format!("/api/image/{}", image_id))
        .to_request();
    let resp_image = test::call_service(&app, req_image).await;
    assert_eq!(resp_image.status(), actix_web::http::StatusCode::OK);
    assert_eq!(
        resp_image
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok()),
        Some("image/png")
    );
    let bytes = test::read_body(resp_image).await;
    assert_eq!(&bytes[..], PNG_BYTES);

    cleanup_owner(&pool, owner_email).await;
}

#[actix_rt::test]
async fn test_unknown_image_is_404() {
    let database_url = test_env();
    let pool = PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to test DB");

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .wrap(Logger::default())
            .service(
                web::scope("/api")
                    .wrap(rentboard::auth::AuthMiddleware)
                    .configure(routes::config),
            ),
    )
    .await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/image/{}", Uuid::new_v4()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::NOT_FOUND);
}
