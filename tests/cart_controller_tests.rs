mod common;

use axum::http::StatusCode;
use common::{
    get, location, post_form, response_body_string, session_cookie, unknown_session_cookie,
    TestApp, UnavailableStore,
};
use mongodb::bson::oid::ObjectId;
use serde_json::json;

#[tokio::test]
async fn cart_add_stores_line_in_session_and_redirects() {
    let app = TestApp::new().await;
    let product = app.seed_product("Test Product", "test-product", "100.00").await;

    let res = app
        .send(post_form(
            &format!("/cart/add/{}/", product.id.to_hex()),
            "quantity=2&override=False",
            None,
        ))
        .await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res).as_deref(), Some("/cart/"));

    let cookie = session_cookie(&res).expect("session cookie");
    assert!(cookie.starts_with("sessionid="));

    let values = app.session_values(&cookie).await.expect("stored session");
    let line = &values["cart"][product.id.to_hex()];
    assert_eq!(line["quantity"], json!(2));
    assert_eq!(line["price"], json!("100.00"));
}

#[tokio::test]
async fn cart_add_with_override_replaces_quantity() {
    let app = TestApp::new().await;
    let product = app.seed_product("Test Product", "test-product", "100.00").await;
    let uri = format!("/cart/add/{}/", product.id.to_hex());

    let res = app.send(post_form(&uri, "quantity=2&override=False", None)).await;
    let cookie = session_cookie(&res).unwrap();

    let res = app
        .send(post_form(&uri, "quantity=5&override=True", Some(&cookie)))
        .await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);

    let values = app.session_values(&cookie).await.unwrap();
    assert_eq!(values["cart"][product.id.to_hex()]["quantity"], json!(5));
}

#[tokio::test]
async fn cart_add_without_override_accumulates() {
    let app = TestApp::new().await;
    let product = app.seed_product("Test Product", "test-product", "100.00").await;
    let uri = format!("/cart/add/{}/", product.id.to_hex());

    let res = app.send(post_form(&uri, "quantity=2&override=False", None)).await;
    let cookie = session_cookie(&res).unwrap();
    app.send(post_form(&uri, "quantity=3", Some(&cookie))).await;

    let values = app.session_values(&cookie).await.unwrap();
    assert_eq!(values["cart"][product.id.to_hex()]["quantity"], json!(5));
}

#[tokio::test]
async fn cart_add_invalid_quantity_still_redirects_without_touching_cart() {
    let app = TestApp::new().await;
    let product = app.seed_product("Test Product", "test-product", "100.00").await;

    let res = app
        .send(post_form(
            &format!("/cart/add/{}/", product.id.to_hex()),
            "quantity=15",
            None,
        ))
        .await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res).as_deref(), Some("/cart/"));
    // nothing was stored, so no session was started
    assert!(session_cookie(&res).is_none());
}

#[tokio::test]
async fn cart_add_is_500_when_the_session_cannot_be_loaded() {
    let app = TestApp::new().await;
    let product = app.seed_product("Test Product", "test-product", "100.00").await;
    let cookie = unknown_session_cookie();

    let res = app
        .send_with_store(
            post_form(
                &format!("/cart/add/{}/", product.id.to_hex()),
                "quantity=1&override=False",
                Some(&cookie),
            ),
            UnavailableStore,
        )
        .await;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    // the visitor keeps their existing cookie
    assert!(session_cookie(&res).is_none());
    assert!(location(&res).is_none());
}

#[tokio::test]
async fn cart_add_is_500_when_the_session_cannot_be_saved() {
    let app = TestApp::new().await;
    let product = app.seed_product("Test Product", "test-product", "100.00").await;

    let res = app
        .send_with_store(
            post_form(
                &format!("/cart/add/{}/", product.id.to_hex()),
                "quantity=1&override=False",
                None,
            ),
            UnavailableStore,
        )
        .await;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(session_cookie(&res).is_none());
    assert!(location(&res).is_none());
}

#[tokio::test]
async fn cart_detail_is_500_when_the_session_cannot_be_loaded() {
    let app = TestApp::new().await;
    let cookie = unknown_session_cookie();

    let res = app
        .send_with_store(get("/cart/", Some(&cookie)), UnavailableStore)
        .await;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn session_cookie_carries_an_expiry() {
    let app = TestApp::new().await;
    let product = app.seed_product("Test Product", "test-product", "100.00").await;

    let res = app
        .send(post_form(
            &format!("/cart/add/{}/", product.id.to_hex()),
            "quantity=1",
            None,
        ))
        .await;

    let raw = res
        .headers()
        .get(axum::http::header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();
    let max_age = format!("Max-Age={}", app.state.settings.session_ttl_secs);
    assert!(raw.contains(&max_age), "{raw}");
    assert!(raw.contains("HttpOnly"));
}

#[tokio::test]
async fn cart_add_unknown_product_is_404() {
    let app = TestApp::new().await;

    let res = app
        .send(post_form(
            &format!("/cart/add/{}/", ObjectId::new().to_hex()),
            "quantity=1",
            None,
        ))
        .await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn cart_remove_empties_cart() {
    let app = TestApp::new().await;
    let product = app.seed_product("Test Product", "test-product", "100.00").await;

    let res = app
        .send(post_form(
            &format!("/cart/add/{}/", product.id.to_hex()),
            "quantity=2&override=False",
            None,
        ))
        .await;
    let cookie = session_cookie(&res).unwrap();

    let res = app
        .send(post_form(
            &format!("/cart/remove/{}/", product.id.to_hex()),
            "",
            Some(&cookie),
        ))
        .await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res).as_deref(), Some("/cart/"));

    let values = app.session_values(&cookie).await.unwrap();
    assert_eq!(values.get("cart"), Some(&json!({})));
}

#[tokio::test]
async fn cart_remove_product_not_in_cart_is_silent() {
    let app = TestApp::new().await;
    let product = app.seed_product("Test Product", "test-product", "100.00").await;

    let res = app
        .send(post_form(
            &format!("/cart/remove/{}/", product.id.to_hex()),
            "",
            None,
        ))
        .await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    // nothing was stored, so no session was started
    assert!(session_cookie(&res).is_none());
}

#[tokio::test]
async fn cart_remove_unknown_catalog_id_is_404() {
    let app = TestApp::new().await;

    let res = app
        .send(post_form(
            &format!("/cart/remove/{}/", ObjectId::new().to_hex()),
            "",
            None,
        ))
        .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = app.send(post_form("/cart/remove/999/", "", None)).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn cart_detail_renders_lines_and_total() {
    let app = TestApp::new().await;
    let product = app.seed_product("Test Product", "test-product", "100.00").await;

    let res = app
        .send(post_form(
            &format!("/cart/add/{}/", product.id.to_hex()),
            "quantity=2&override=False",
            None,
        ))
        .await;
    let cookie = session_cookie(&res).unwrap();

    let res = app.send(get("/cart/", Some(&cookie))).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body = response_body_string(res).await;
    assert!(body.contains("Test Product"));
    assert!(body.contains("200.00"));
    assert!(body.contains("2 item(s)"));
}

#[tokio::test]
async fn cart_detail_empty_cart() {
    let app = TestApp::new().await;

    let res = app.send(get("/cart/", None)).await;
    assert_eq!(res.status(), StatusCode::OK);
    // reading the cart never creates a session
    assert!(session_cookie(&res).is_none());

    let body = response_body_string(res).await;
    assert!(body.contains("Your cart is empty."));
}

#[tokio::test]
async fn htmx_requests_get_the_fragment_only() {
    let app = TestApp::new().await;

    let mut req = get("/cart/", None);
    req.headers_mut()
        .insert("HX-Request", "true".parse().unwrap());

    let res = app.send(req).await;
    let body = response_body_string(res).await;
    assert!(body.contains("Your shopping cart"));
    assert!(!body.contains("<html"));
}
