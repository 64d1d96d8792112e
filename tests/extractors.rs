//! Extractor behaviour: binder selection, validation rejections and the
//! responses rejections turn into.

use axum::{
    body::Body,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::IntoResponse,
};
use http_body_util::BodyExt;
use jsonbind::{
    BindError, DecodeError, DecoderOptions, JsonBinding,
    params::{Json, Valid},
};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
struct Signup {
    #[validate(length(min = 1))]
    name: String,
    #[serde(default)]
    #[validate(range(min = 18))]
    age: u32,
}

fn post(body: &'static str) -> Request {
    Request::builder()
        .method("POST")
        .uri("/signup")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn json_extracts_without_validating() {
    let Json(signup) = Json::<Signup>::from_request(post(r#"{"name":"a","age":3}"#), &())
        .await
        .unwrap();

    assert_eq!(signup.name, "a");
    assert_eq!(signup.age, 3);
}

#[tokio::test]
async fn valid_json_rejects_invalid_value() {
    let err = Valid::<Json<Signup>>::from_request(post(r#"{"name":"a","age":3}"#), &())
        .await
        .unwrap_err();

    let BindError::Validation(errors) = err else {
        panic!("expected validation error, got {err:?}");
    };
    assert!(errors.field_errors().contains_key("age"));
}

#[tokio::test]
async fn valid_json_passes_decode_errors_through() {
    let err = Valid::<Json<Signup>>::from_request(post(r#"{"name":"#), &())
        .await
        .unwrap_err();

    assert!(matches!(err, BindError::Decode(DecodeError::Json(_))));
}

#[tokio::test]
async fn valid_json_accepts_valid_value() {
    let Valid(Json(signup)) =
        Valid::<Json<Signup>>::from_request(post(r#"{"name":"a","age":30}"#), &())
            .await
            .unwrap();

    assert_eq!(signup.age, 30);
}

#[tokio::test]
async fn extension_binding_overrides_defaults() {
    let mut req = post(r#"{"name":"a","age":30,"extra":true}"#);
    req.extensions_mut().insert(JsonBinding::with_options(
        DecoderOptions::new().deny_unknown_fields(true),
    ));

    let err = Json::<Signup>::from_request(req, &()).await.unwrap_err();

    assert!(matches!(
        err,
        BindError::Decode(DecodeError::UnknownField(ref field)) if field == "extra"
    ));
}

#[tokio::test]
async fn extension_body_limit_applies() {
    let mut req = post(r#"{"name":"a","age":30}"#);
    req.extensions_mut()
        .insert(JsonBinding::with_options(DecoderOptions::new()).body_limit(8));

    let err = Json::<Signup>::from_request(req, &()).await.unwrap_err();

    assert_eq!(err.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn rejection_renders_envelope() {
    let err = Json::<Signup>::from_request(post("not json"), &())
        .await
        .unwrap_err();
    let message = err.to_string();

    let response = err.into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["code"], 400);
    assert_eq!(body["message"], message.as_str());
    assert!(body["data"].is_null());
}
