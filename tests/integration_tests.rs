//! Integration tests for the Rock Bridge site core
//!
//! These tests drive several modules together against a mocked backend:
//! translation loading into page sections, the persisted session and
//! language, and the dashboard panels end to end.

use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;
use wiremock::{
    matchers::{body_json, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

use rock_bridge::api::Attachment;
use rock_bridge::auth::{self, LoginForm, ResetForm};
use rock_bridge::config::Config;
use rock_bridge::contact::QuoteRequest;
use rock_bridge::dashboard::{Dashboard, Tab, View};
use rock_bridge::forms::{MediaForm, ServiceForm};
use rock_bridge::i18n::{BundleLoader, BundleSource, Language};
use rock_bridge::sections::HomePage;
use rock_bridge::session::AppContext;
use rock_bridge::showcase;
use rock_bridge::storage::{LocalStore, TOKEN_KEY};

// ==================== Test Helpers ====================

/// Config pointing at the mock backend with state kept in `temp_dir`
fn create_test_config(api_origin: &str, temp_dir: &TempDir) -> Config {
    Config {
        api_origin: api_origin.to_string(),
        locales_dir: temp_dir.path().join("locales"),
        state_file: temp_dir.path().join("state.json"),
        ..Config::default()
    }
}

fn open_context(api_origin: &str, temp_dir: &TempDir) -> Arc<AppContext> {
    Arc::new(AppContext::open(create_test_config(api_origin, temp_dir)).expect("Failed to open context"))
}

fn png(name: &str) -> Attachment {
    Attachment::new(name, "image/png", vec![0x89, b'P', b'N', b'G', 0, 0, 0, 0])
}

async fn mount_login(server: &MockServer, token: &str) {
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Logged in",
            "accessToken": token,
            "user": {"name": "Admin", "email": "admin@rockbridge.sa"}
        })))
        .mount(server)
        .await;
}

// ==================== Content Tests ====================

#[tokio::test]
async fn test_arabic_bundle_from_disk_renders_rtl_page() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = create_test_config("http://localhost:5000", &temp_dir);
    std::fs::create_dir_all(&config.locales_dir).expect("Failed to create locales dir");
    std::fs::write(
        config.locales_dir.join("ar.json"),
        json!({
            "dir": "rtl",
            "who": {"heading": "من نحن؟", "company": "روك بريدج"},
            "hero": {"slides": [{"src": "/images/port.jpg", "title_ar": "الميناء", "title_en": "Port"}]}
        })
        .to_string(),
    )
    .expect("Failed to write bundle");

    let loader = BundleLoader::new(BundleSource::from_config(&config), reqwest::Client::new());
    let bundle = loader.load(Language::ARABIC).await;
    let page = HomePage::resolve(&bundle, None);

    assert!(page.language.is_rtl);
    assert_eq!(page.language.language, Language::ARABIC);
    assert_eq!(page.who.company, "روك بريدج");
    assert_eq!(page.who.vision_title, "رؤيتنا");
    assert_eq!(page.hero.slides.len(), 1);
    assert_eq!(page.hero.slides[0].title.get(Language::ARABIC), "الميناء");
}

#[tokio::test]
async fn test_missing_bundle_degrades_to_defaults() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = create_test_config("http://localhost:5000", &temp_dir);

    let loader = BundleLoader::new(BundleSource::from_config(&config), reqwest::Client::new());
    let bundle = loader.load(Language::ENGLISH).await;
    let page = HomePage::resolve(&bundle, Some(Language::ENGLISH));

    assert!(bundle.is_empty());
    assert_eq!(page.hero.cta, "Our Service");
    assert_eq!(page.services.title, "Services We Offer");
    assert_eq!(page.how_we_work.steps.len(), 5);
}

#[tokio::test]
async fn test_bundle_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/locales/en.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "lang": "en",
            "ourWork": {"heading": "Portfolio"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let source = BundleSource::Http(format!("{}/locales", server.uri()));
    let bundle = BundleLoader::new(source, reqwest::Client::new())
        .load(Language::ENGLISH)
        .await;
    let page = HomePage::resolve(&bundle, None);

    assert_eq!(page.our_work.heading, "Portfolio");
    assert!(!page.language.is_rtl);
}

#[tokio::test]
async fn test_saved_arabic_page_with_public_grids() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/services"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"_id": "s1", "title_en": "Sea Freight", "title_ar": "الشحن البحري", "image": "uploads/sea.jpg"}
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/media"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "Storage offline"})))
        .expect(1)
        .mount(&server)
        .await;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let ctx = open_context(&server.uri(), &temp_dir);
    ctx.language
        .lock()
        .expect("language lock")
        .set(Language::ARABIC)
        .expect("Failed to save language");

    // No ar.json on disk: the saved preference alone decides the page language.
    let language = ctx.language.lock().expect("language lock").current();
    let loader = BundleLoader::new(BundleSource::from_config(&ctx.config), reqwest::Client::new());
    let bundle = loader.load(language).await;
    let page = HomePage::resolve(&bundle, Some(language));
    let (services, gallery) = tokio::join!(
        showcase::load_services(&ctx.client, &page.services, language, &ctx.notices),
        showcase::load_gallery(&ctx.client, language, &ctx.notices),
    );

    assert!(page.language.is_rtl);
    assert!(services.from_api);
    assert_eq!(services.cards[0].title, "الشحن البحري");
    assert_eq!(services.cards[0].image, format!("{}/uploads/sea.jpg", server.uri()));
    assert!(gallery.items.is_empty());
    assert_eq!(gallery.empty_text(), Some("لا توجد عناصر بعد"));

    let messages: Vec<String> = ctx.notices.drain().into_iter().map(|n| n.message).collect();
    assert_eq!(messages, vec!["Storage offline"]);
}

// ==================== Persistence Tests ====================

#[tokio::test]
async fn test_language_and_session_survive_restart() {
    let server = MockServer::start().await;
    mount_login(&server, "jwt-persisted").await;
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    {
        let ctx = open_context(&server.uri(), &temp_dir);
        ctx.language
            .lock()
            .expect("language lock")
            .set(Language::ARABIC)
            .expect("Failed to set language");
        ctx.login(&LoginForm::new("admin@rockbridge.sa", "secret1"))
            .await
            .expect("Failed to log in");
    }

    let ctx = open_context(&server.uri(), &temp_dir);
    assert_eq!(ctx.language.lock().expect("language lock").current(), Language::ARABIC);
    assert!(ctx.session.is_authenticated());
    assert_eq!(ctx.client.token().as_deref(), Some("jwt-persisted"));

    ctx.logout();
    let reopened = LocalStore::open(temp_dir.path().join("state.json")).expect("Failed to reopen store");
    assert!(reopened.get(TOKEN_KEY).is_none());
    assert_eq!(reopened.get("lang").as_deref(), Some("ar"));
}

// ==================== Dashboard Tests ====================

#[tokio::test]
async fn test_login_then_add_and_delete_service() {
    let server = MockServer::start().await;
    mount_login(&server, "jwt-admin").await;

    Mock::given(method("GET"))
        .and(path("/api/services"))
        .and(header("Authorization", "Bearer jwt-admin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "services": [{"_id": "s1", "title_en": "Inspection", "title_ar": "الفحص"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/services"))
        .and(header("Authorization", "Bearer jwt-admin"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "message": "Service created",
            "service": {"_id": "s2", "title_en": "Freight", "title_ar": "الشحن", "img": "/uploads/freight.png"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/services/s1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let mut dash = Dashboard::new(open_context(&server.uri(), &temp_dir));
    assert_eq!(dash.view(), View::Login);

    dash.login(&LoginForm::new("admin@rockbridge.sa", "secret1"))
        .await
        .expect("Failed to log in");
    assert_eq!(dash.view(), View::Panel(Tab::Services));
    assert_eq!(dash.greeting().as_deref(), Some("Welcome, Admin"));
    assert_eq!(dash.services().len(), 1);

    let mut form = ServiceForm {
        title_en: "Freight".into(),
        title_ar: "الشحن".into(),
        description_en: "Door to door".into(),
        description_ar: "من الباب إلى الباب".into(),
        image: None,
    };
    form.attach(png("freight.png")).expect("image accepted");
    dash.services().create(&mut form).await.expect("Failed to create");

    let items = dash.services().items();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].id().as_deref(), Some("s2"));
    assert_eq!(
        items[0].image_url(&server.uri()),
        format!("{}/uploads/freight.png", server.uri())
    );
    assert!(form.title_en.is_empty());

    assert!(dash.services().request_delete("s1"));
    dash.services().confirm_delete().await.expect("Failed to delete");
    assert_eq!(dash.services().len(), 1);
    assert!(dash.services().pending_delete().is_none());

    let messages: Vec<String> = dash
        .context()
        .notices
        .drain()
        .into_iter()
        .map(|n| n.message)
        .collect();
    assert_eq!(messages, vec!["Logged in", "Service created", "Service deleted"]);
}

#[tokio::test]
async fn test_media_upload_without_record_refetches() {
    let server = MockServer::start().await;
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let ctx = open_context(&server.uri(), &temp_dir);
    ctx.store.set(TOKEN_KEY, "jwt").expect("Failed to store token");

    Mock::given(method("POST"))
        .and(path("/api/media"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Uploaded"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/media"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"_id": "m1", "title": "Warehouse tour", "mediaUrl": "https://cdn.example.com/tour.mp4", "mediaType": "video"}
        ])))
        .expect(2)
        .mount(&server)
        .await;

    let mut dash = Dashboard::new(ctx);
    dash.show(Tab::Media).await.expect("Failed to load media");

    let mut form = MediaForm {
        title_en: "Warehouse tour".into(),
        description_ar: "جولة في المستودع".into(),
        ..MediaForm::default()
    };
    form.attach(Attachment::new("tour.mp4", "video/mp4", vec![0; 1024]))
        .expect("video accepted");
    dash.media().create(&mut form).await.expect("Failed to upload");

    let items = dash.media().items();
    assert_eq!(items.len(), 1);
    assert!(items[0].is_video());
    assert_eq!(items[0].media_url(&server.uri()), "https://cdn.example.com/tour.mp4");
    assert_eq!(*dash.media().upload_progress().borrow(), 0);
}

#[tokio::test]
async fn test_public_offer_reaches_quotes_panel() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/quotes"))
        .and(body_json(json!({
            "name": "Layla",
            "phone": "+966500000000",
            "email": "layla@example.com",
            "message": "Quote for 40ft container"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"message": "Thanks, we will call you"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/quotes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "quotes": [{"_id": "q1", "name": "Layla", "message": "Quote for 40ft container"}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/quotes/q1"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "Database offline"})))
        .mount(&server)
        .await;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let ctx = open_context(&server.uri(), &temp_dir);

    let request = QuoteRequest {
        name: "Layla".into(),
        phone: "+966500000000".into(),
        email: "layla@example.com".into(),
        message: "Quote for 40ft container".into(),
    };
    let confirmation = request.submit(&ctx.client).await.expect("Failed to submit");
    assert_eq!(confirmation, "Thanks, we will call you");

    ctx.store.set(TOKEN_KEY, "jwt").expect("Failed to store token");
    let ctx = open_context(&server.uri(), &temp_dir);
    let mut dash = Dashboard::new(ctx);
    dash.show(Tab::Quotes).await.expect("Failed to load quotes");
    assert_eq!(dash.quotes().find("q1").and_then(|q| q.field("name")).as_deref(), Some("Layla"));

    assert!(dash.quotes().request_delete("q1"));
    assert!(dash.quotes().confirm_delete().await.is_err());
    assert_eq!(dash.quotes().len(), 1);
    assert!(dash.quotes().pending_delete().is_some());
    assert_eq!(
        dash.context().notices.last().map(|n| n.message).as_deref(),
        Some("Database offline")
    );
}

// ==================== Password Reset Tests ====================

#[tokio::test]
async fn test_reset_from_link_maps_expired_otp() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/reset"))
        .and(body_json(json!({
            "email": "admin@rockbridge.sa",
            "otp": "482913",
            "newPassword": "n3wpass"
        })))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"message": "OTP expired"})))
        .expect(1)
        .mount(&server)
        .await;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let ctx = open_context(&server.uri(), &temp_dir);

    let mut form = ResetForm::with_otp_from_path("/resetpassword/482913");
    form.email = "admin@rockbridge.sa".into();
    form.new_password = "n3wpass".into();
    form.confirm_password = "n3wpass".into();

    let errors = auth::reset_password(&ctx.client, &form).await.unwrap_err();
    assert_eq!(errors.otp.as_deref(), Some("OTP has expired — request a new one."));
    assert!(errors.general.is_none());
}
