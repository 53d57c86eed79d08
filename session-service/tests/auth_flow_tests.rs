mod common;

use chrono::Duration;
use common::bearer;
use common::register_command;
use common::TestApp;
use common::API_KEY;
use session_service::domain::session::errors::AuthError;
use session_service::domain::session::errors::ErrorClass;
use session_service::domain::session::models::EmailAddress;
use session_service::domain::session::models::UpdateCredentialsCommand;
use session_service::domain::session::ports::AuthServicePort;

#[tokio::test]
async fn test_full_session_lifecycle() {
    let app = TestApp::spawn();

    let user = app
        .service
        .register(register_command("saul@example.com", "better_call"))
        .await
        .expect("Register failed");

    let session = app
        .service
        .login("saul@example.com", "better_call")
        .await
        .expect("Login failed");
    assert_ne!(session.access_token, session.refresh_token);
    assert_eq!(session.user.id, user.id);

    let authorized = app
        .service
        .authorize(Some(bearer(&session.access_token).as_str()))
        .await
        .expect("Access token rejected");
    assert_eq!(authorized, user.id);

    let refresh_header = bearer(&session.refresh_token);
    let new_access_token = app
        .service
        .refresh(Some(refresh_header.as_str()))
        .await
        .expect("Refresh failed");
    assert_ne!(new_access_token, session.access_token);

    let authorized = app
        .service
        .authorize(Some(bearer(&new_access_token).as_str()))
        .await
        .expect("Refreshed access token rejected");
    assert_eq!(authorized, user.id);

    app.service
        .revoke(Some(refresh_header.as_str()))
        .await
        .expect("Revoke failed");

    let result = app.service.refresh(Some(refresh_header.as_str())).await;
    assert!(matches!(result, Err(AuthError::RefreshTokenNotFound)));
    assert!(result.unwrap_err().is_unauthorized());

    // Access tokens are stateless and outlive the refresh token's revocation.
    let still_valid = app
        .service
        .authorize(Some(bearer(&new_access_token).as_str()))
        .await;
    assert_eq!(still_valid.unwrap(), user.id);
}

#[tokio::test]
async fn test_refresh_token_is_not_rotated() {
    let app = TestApp::spawn();
    app.service
        .register(register_command("jesse@example.com", "yo"))
        .await
        .unwrap();
    let session = app.service.login("jesse@example.com", "yo").await.unwrap();
    let header = bearer(&session.refresh_token);

    for _ in 0..3 {
        assert!(app.service.refresh(Some(header.as_str())).await.is_ok());
    }

    let record = app
        .refresh_tokens
        .get(&session.refresh_token)
        .await
        .expect("Refresh token not persisted");
    assert!(!record.is_revoked());
}

#[tokio::test]
async fn test_revoke_keeps_audit_record() {
    let app = TestApp::spawn();
    let user = app
        .service
        .register(register_command("mike@example.com", "no_half_measures"))
        .await
        .unwrap();
    let session = app
        .service
        .login("mike@example.com", "no_half_measures")
        .await
        .unwrap();

    let header = bearer(&session.refresh_token);
    app.service.revoke(Some(header.as_str())).await.unwrap();
    app.service.revoke(Some(header.as_str())).await.unwrap();

    let record = app.refresh_tokens.get(&session.refresh_token).await.unwrap();
    assert!(record.is_revoked());
    assert_eq!(record.user_id, user.id);
}

#[tokio::test]
async fn test_revoke_unknown_token_succeeds() {
    let app = TestApp::spawn();

    let result = app.service.revoke(Some("Bearer never-issued")).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::spawn();
    app.service
        .register(register_command("gus@example.com", "los_pollos"))
        .await
        .unwrap();

    let wrong_password = app.service.login("gus@example.com", "hermanos").await;
    let unknown_email = app.service.login("hector@example.com", "los_pollos").await;

    let wrong_password = wrong_password.unwrap_err();
    let unknown_email = unknown_email.unwrap_err();
    assert!(matches!(wrong_password, AuthError::InvalidCredentials));
    assert!(matches!(unknown_email, AuthError::InvalidCredentials));
    assert_eq!(wrong_password.to_string(), unknown_email.to_string());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::spawn();
    app.service
        .register(register_command("skyler@example.com", "car_wash"))
        .await
        .unwrap();

    let result = app
        .service
        .register(register_command("skyler@example.com", "another"))
        .await;

    assert_eq!(result.unwrap_err().class(), ErrorClass::Conflict);
}

#[tokio::test]
async fn test_authorize_rejects_bad_tokens() {
    let app = TestApp::spawn();
    let user = app
        .service
        .register(register_command("hank@example.com", "minerals"))
        .await
        .unwrap();

    let expired = app
        .jwt_handler
        .issue(user.id.0, Duration::seconds(-1))
        .unwrap();
    let foreign = auth::JwtHandler::new(b"some-other-secret-at-least-32-bytes!")
        .issue(user.id.0, Duration::hours(1))
        .unwrap();

    for header in [
        None,
        Some(String::new()),
        Some("Token abc".to_string()),
        Some(bearer("not.a.jwt")),
        Some(bearer(&expired)),
        Some(bearer(&foreign)),
    ] {
        let result = app.service.authorize(header.as_deref()).await;
        let err = result.expect_err("Authorization should fail");
        assert!(err.is_unauthorized(), "{:?} should be unauthorized", err);
    }
}

#[tokio::test]
async fn test_refresh_token_cannot_be_used_as_access_token() {
    let app = TestApp::spawn();
    app.service
        .register(register_command("marie@example.com", "purple"))
        .await
        .unwrap();
    let session = app.service.login("marie@example.com", "purple").await.unwrap();

    let result = app
        .service
        .authorize(Some(bearer(&session.refresh_token).as_str()))
        .await;
    assert!(result.unwrap_err().is_unauthorized());

    let result = app
        .service
        .refresh(Some(bearer(&session.access_token).as_str()))
        .await;
    assert!(matches!(result, Err(AuthError::RefreshTokenNotFound)));
}

#[tokio::test]
async fn test_update_credentials_changes_login_password() {
    let app = TestApp::spawn();
    app.service
        .register(register_command("walt@example.com", "blue_sky"))
        .await
        .unwrap();
    let session = app.service.login("walt@example.com", "blue_sky").await.unwrap();

    let command = UpdateCredentialsCommand::new(
        EmailAddress::new("heisenberg@example.com".to_string()).unwrap(),
        "say_my_name".to_string(),
    );
    let updated = app
        .service
        .update_credentials(Some(bearer(&session.access_token).as_str()), command)
        .await
        .expect("Update failed");
    assert_eq!(updated.email.as_str(), "heisenberg@example.com");

    assert!(app
        .service
        .login("walt@example.com", "blue_sky")
        .await
        .is_err());
    assert!(app
        .service
        .login("heisenberg@example.com", "blue_sky")
        .await
        .is_err());
    let session = app
        .service
        .login("heisenberg@example.com", "say_my_name")
        .await
        .expect("Login with new credentials failed");
    assert_eq!(session.user.id, updated.id);
}

#[tokio::test]
async fn test_api_key_authorization() {
    let app = TestApp::spawn();

    let header = format!("ApiKey {}", API_KEY);
    assert!(app
        .service
        .authorize_api_key(Some(header.as_str()))
        .await
        .is_ok());

    for header in [None, Some(""), Some("ApiKey wrong"), Some("Bearer token")] {
        let err = app.service.authorize_api_key(header).await.unwrap_err();
        assert!(err.is_unauthorized());
    }
}

#[tokio::test]
async fn test_get_user() {
    let app = TestApp::spawn();
    let user = app
        .service
        .register(register_command("lydia@example.com", "stevia"))
        .await
        .unwrap();

    let found = app.service.get_user(&user.id).await.unwrap();
    assert_eq!(found.email.as_str(), "lydia@example.com");

    let missing = app
        .service
        .get_user(&session_service::session::models::UserId::new())
        .await;
    assert_eq!(missing.unwrap_err().class(), ErrorClass::NotFound);
}
