use actix_web::{App, http::StatusCode, test};
use serde_json::{Value, json};
use swiftcodes_server::config::Config;
use swiftcodes_server::metrics::MetricsMiddleware;
use swiftcodes_server::store::Store;
use swiftcodes_server::{app_data, configure};
use swiftcodes_store_db::SwiftCodeRecord;

/// Store with a US headquarters and one linked branch.
async fn fixture() -> Config {
    let store = Store::in_memory().unwrap();
    {
        let db = store.get_db().await.unwrap();
        db.insert_record(&SwiftCodeRecord {
            code: "TESTBANKXXX".into(),
            bank_name: "TEST BANK".into(),
            address: "123 Test St, Test City".into(),
            country_iso2: "US".into(),
            country_name: "UNITED STATES".into(),
            is_headquarter: true,
            headquarter_code: None,
        })
        .unwrap();
        db.insert_record(&SwiftCodeRecord {
            code: "TESTBANK123".into(),
            bank_name: "TEST BANK BRANCH".into(),
            address: "456 Branch St, Test City".into(),
            country_iso2: "US".into(),
            country_name: "UNITED STATES".into(),
            is_headquarter: false,
            headquarter_code: Some("TESTBANKXXX".into()),
        })
        .unwrap();
    }
    Config::with_store(store)
}

macro_rules! test_app {
    () => {{
        let (config_data, metrics_data) = app_data(fixture().await).unwrap();
        let metrics = metrics_data.get_ref().clone();
        test::init_service(
            App::new()
                .wrap(MetricsMiddleware::new(metrics))
                .app_data(config_data)
                .app_data(metrics_data)
                .configure(configure),
        )
        .await
    }};
}

#[actix_web::test]
async fn test_get_swift_code_headquarters() {
    let app = test_app!();

    let req = test::TestRequest::get()
        .uri("/v1/swift-codes/TESTBANKXXX")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let data: Value = test::read_body_json(resp).await;
    assert_eq!(data["swiftCode"], "TESTBANKXXX");
    assert_eq!(data["isHeadquarter"], true);
    assert_eq!(data["countryISO2"], "US");
    assert_eq!(data["countryName"], "UNITED STATES");
    assert_eq!(data["address"], "123 Test St, Test City");
    assert_eq!(data["bankName"], "TEST BANK");

    let branches = data["branches"].as_array().unwrap();
    assert_eq!(branches.len(), 1);
    assert_eq!(
        branches[0],
        json!({
            "address": "456 Branch St, Test City",
            "bankName": "TEST BANK BRANCH",
            "countryISO2": "US",
            "isHeadquarter": false,
            "swiftCode": "TESTBANK123",
        })
    );
}

#[actix_web::test]
async fn test_get_swift_code_branch() {
    let app = test_app!();

    let req = test::TestRequest::get()
        .uri("/v1/swift-codes/testbank123")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let data: Value = test::read_body_json(resp).await;
    assert_eq!(data["swiftCode"], "TESTBANK123");
    assert_eq!(data["isHeadquarter"], false);
    assert!(data["branches"].is_null());
}

#[actix_web::test]
async fn test_get_unknown_swift_code() {
    let app = test_app!();

    let req = test::TestRequest::get()
        .uri("/v1/swift-codes/UNKNOWNXXXX")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let data: Value = test::read_body_json(resp).await;
    assert_eq!(data["detail"], "SWIFT code UNKNOWNXXXX not found");
}

#[actix_web::test]
async fn test_get_country_swift_codes() {
    let app = test_app!();

    let req = test::TestRequest::get()
        .uri("/v1/swift-codes/country/us")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let data: Value = test::read_body_json(resp).await;
    assert_eq!(data["countryISO2"], "US");
    assert_eq!(data["countryName"], "UNITED STATES");
    assert_eq!(data["swiftCodes"].as_array().unwrap().len(), 2);
}

#[actix_web::test]
async fn test_get_unknown_country() {
    let app = test_app!();

    let req = test::TestRequest::get()
        .uri("/v1/swift-codes/country/PL")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let data: Value = test::read_body_json(resp).await;
    assert_eq!(data["detail"], "No SWIFT codes found for country PL");
}

#[actix_web::test]
async fn test_create_swift_code() {
    let app = test_app!();

    let req = test::TestRequest::post()
        .uri("/v1/swift-codes")
        .set_json(json!({
            "swiftCode": "NEWBANKXXX",
            "bankName": "NEW TEST BANK",
            "address": "789 New St, New City",
            "countryISO2": "CA",
            "countryName": "Canada",
            "isHeadquarter": true,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let data: Value = test::read_body_json(resp).await;
    assert_eq!(data["message"], "SWIFT code NEWBANKXXX created successfully");

    let req = test::TestRequest::get()
        .uri("/v1/swift-codes/NEWBANKXXX")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let data: Value = test::read_body_json(resp).await;
    assert_eq!(data["swiftCode"], "NEWBANKXXX");
    assert_eq!(data["countryISO2"], "CA");
    assert_eq!(data["countryName"], "CANADA");
}

#[actix_web::test]
async fn test_create_branch_is_linked() {
    let app = test_app!();

    let req = test::TestRequest::post()
        .uri("/v1/swift-codes")
        .set_json(json!({
            "swiftCode": "testbank456",
            "bankName": "TEST BANK BRANCH 2",
            "address": "",
            "countryISO2": "us",
            "countryName": "United States",
            "isHeadquarter": false,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = test::TestRequest::get()
        .uri("/v1/swift-codes/TESTBANKXXX")
        .to_request();
    let data: Value = test::call_and_read_body_json(&app, req).await;
    let codes: Vec<_> = data["branches"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["swiftCode"].as_str().unwrap().to_owned())
        .collect();
    assert_eq!(codes, ["TESTBANK123", "TESTBANK456"]);
}

#[actix_web::test]
async fn test_create_existing_swift_code() {
    let app = test_app!();

    let req = test::TestRequest::post()
        .uri("/v1/swift-codes")
        .set_json(json!({
            "swiftCode": "TESTBANKXXX",
            "bankName": "DUPLICATE",
            "address": "",
            "countryISO2": "US",
            "countryName": "UNITED STATES",
            "isHeadquarter": true,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let data: Value = test::read_body_json(resp).await;
    assert_eq!(data["detail"], "SWIFT code TESTBANKXXX already exists");
}

#[actix_web::test]
async fn test_create_incomplete_body() {
    let app = test_app!();

    let req = test::TestRequest::post()
        .uri("/v1/swift-codes")
        .set_json(json!({ "swiftCode": "NEWBANKXXX" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let data: Value = test::read_body_json(resp).await;
    assert!(data["detail"].is_string());
}

#[actix_web::test]
async fn test_delete_swift_code() {
    let app = test_app!();

    let req = test::TestRequest::delete()
        .uri("/v1/swift-codes/TESTBANK123")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let data: Value = test::read_body_json(resp).await;
    assert_eq!(data["message"], "SWIFT code TESTBANK123 deleted successfully");

    let req = test::TestRequest::get()
        .uri("/v1/swift-codes/TESTBANK123")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::delete()
        .uri("/v1/swift-codes/TESTBANK123")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_delete_headquarters_keeps_branches() {
    let app = test_app!();

    let req = test::TestRequest::delete()
        .uri("/v1/swift-codes/TESTBANKXXX")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/v1/swift-codes/country/US")
        .to_request();
    let data: Value = test::call_and_read_body_json(&app, req).await;
    let codes = data["swiftCodes"].as_array().unwrap();
    assert_eq!(codes.len(), 1);
    assert_eq!(codes[0]["swiftCode"], "TESTBANK123");
}

#[actix_web::test]
async fn test_root_and_health() {
    let app = test_app!();

    let req = test::TestRequest::get().uri("/").to_request();
    let data: Value = test::call_and_read_body_json(&app, req).await;
    assert!(
        data["message"]
            .as_str()
            .unwrap()
            .contains("/v1/swift-codes")
    );

    let req = test::TestRequest::get().uri("/health").to_request();
    let body = test::call_and_read_body(&app, req).await;
    assert_eq!(body, "OK\n");
}

#[actix_web::test]
async fn test_request_metrics() {
    let app = test_app!();

    let req = test::TestRequest::get()
        .uri("/v1/swift-codes/TESTBANKXXX")
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get().uri("/metrics").to_request();
    let body = test::call_and_read_body(&app, req).await;
    let body = String::from_utf8(body.to_vec()).unwrap();

    assert!(body.contains("swiftcodes_http_requests_total"));
    assert!(body.contains("swiftcodes_http_request_duration_seconds"));
    assert!(body.contains("path=\"/v1/swift-codes/{swift_code}\""));
    assert!(!body.contains("TESTBANKXXX"));
}

#[actix_web::test]
async fn test_store_failure_hides_error_text() {
    let dir = tempfile::tempdir().unwrap();
    let database = dir.path().join("missing-dir").join("swift_codes.db");
    let (config_data, metrics_data) = app_data(Config::with_store(Store::new(database))).unwrap();
    let app = test::init_service(
        App::new()
            .app_data(config_data)
            .app_data(metrics_data)
            .configure(configure),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/v1/swift-codes/TESTBANKXXX")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let data: Value = test::read_body_json(resp).await;
    assert_eq!(data["detail"], "Internal server error");
}
