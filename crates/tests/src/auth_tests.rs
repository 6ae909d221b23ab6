use shared_types::{AppErrorKind, LoginRequest};
use crate::common::{self, FakeSchool, PASSWORD, TOKEN};

#[tokio::test]
async fn test_login_returns_backend_token() {
    let (api, _state) = common::fake_school(FakeSchool::default()).await;
    let issued = api
        .login(&LoginRequest { password: PASSWORD.into() })
        .await
        .unwrap();
    assert_eq!(issued.value, TOKEN);
    assert_eq!(issued.max_age_secs, None);
}

#[tokio::test]
async fn test_wrong_password_is_unauthorized() {
    let (api, _state) = common::fake_school(FakeSchool::default()).await;
    let err = api
        .login(&LoginRequest { password: "nope".into() })
        .await
        .unwrap_err();
    assert_eq!(err.kind, AppErrorKind::Unauthorized);
}

#[tokio::test]
async fn test_token_is_forwarded_as_bearer() {
    let (api, state) = common::fake_school(FakeSchool::default()).await;
    assert!(api.with_token(TOKEN).is_authenticated().await.unwrap());
    assert_eq!(state.lock().await.bearer_tokens, vec![TOKEN.to_string()]);
}

#[tokio::test]
async fn test_forged_token_is_not_authenticated() {
    let (api, _state) = common::fake_school(FakeSchool::default()).await;
    assert!(!api.with_token("forged").is_authenticated().await.unwrap());
}

#[tokio::test]
async fn test_missing_token_skips_the_backend() {
    let (api, state) = common::fake_school(FakeSchool::default()).await;
    assert!(!api.is_authenticated().await.unwrap());
    assert!(state.lock().await.bearer_tokens.is_empty());
}
