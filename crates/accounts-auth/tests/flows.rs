//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! End-to-end account flows through the authentication manager

use std::sync::Arc;

use accounts_auth::{
    require, AuthConfig, AuthError, AuthManager, InMemoryUserStore, JwtAlgorithm, JwtConfig,
    ManualClock, MemoryNotifier, NotificationTemplate, PasswordHashingConfig, Role, SignUp,
    UserStore, USERS,
};
use chrono::{Duration, Utc};

struct Harness {
    manager: Arc<AuthManager>,
    store: InMemoryUserStore,
    notifier: MemoryNotifier,
    clock: Arc<ManualClock>,
}

async fn harness() -> Harness {
    let mut config = AuthConfig::new(JwtConfig::new("flow-secret", JwtAlgorithm::HS256, 30));
    config.users.hashing = PasswordHashingConfig::fast();

    let store = InMemoryUserStore::new();
    let notifier = MemoryNotifier::new();
    let clock = Arc::new(ManualClock::new(Utc::now()));

    let manager = AuthManager::with_clock(
        config,
        Arc::new(store.clone()),
        Arc::new(notifier.clone()),
        clock.clone(),
    )
    .await
    .unwrap();

    Harness {
        manager: Arc::new(manager),
        store,
        notifier,
        clock,
    }
}

fn signup(email: &str, password: Option<&str>, role: Role) -> SignUp {
    SignUp {
        email: email.to_string(),
        password: password.map(str::to_string),
        name: "Ada".to_string(),
        surname: Some("Lovelace".to_string()),
        role,
    }
}

#[tokio::test]
async fn test_duplicate_signup_sequential() {
    let h = harness().await;
    let users = h.manager.user_manager();

    users
        .signup(signup("ada@example.com", None, Role::User))
        .await
        .unwrap();
    let second = users
        .signup(signup("ada@example.com", None, Role::Administrator))
        .await;

    assert!(matches!(second, Err(AuthError::DuplicateIdentity(_))));
    let stored = h.store.find_by_email("ada@example.com").await.unwrap().unwrap();
    assert_eq!(stored.role, Role::User);
}

#[tokio::test]
async fn test_duplicate_signup_concurrent() {
    let h = harness().await;

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let manager = h.manager.clone();
            tokio::spawn(async move {
                manager
                    .user_manager()
                    .signup(signup("race@example.com", None, Role::User))
                    .await
            })
        })
        .collect();

    let mut successes = 0;
    let mut duplicates = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(AuthError::DuplicateIdentity(_)) => duplicates += 1,
            Err(other) => panic!("unexpected error: {:?}", other),
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(duplicates, 7);
    assert_eq!(h.store.len().await, 1);
}

#[tokio::test]
async fn test_authenticate_does_not_reveal_registration() {
    let h = harness().await;
    h.manager
        .user_manager()
        .signup(signup("ada@example.com", Some("correct horse"), Role::User))
        .await
        .unwrap();

    let wrong_password = h
        .manager
        .authenticate("ada@example.com", "battery staple")
        .await
        .unwrap_err();
    let unknown_email = h
        .manager
        .authenticate("ghost@example.com", "battery staple")
        .await
        .unwrap_err();

    assert!(matches!(wrong_password, AuthError::InvalidCredentials(_)));
    assert!(matches!(unknown_email, AuthError::InvalidCredentials(_)));
    assert_eq!(wrong_password.to_string(), unknown_email.to_string());

    let stats = h.manager.get_stats().await;
    assert_eq!(stats.failed_authentications, 2);
}

#[tokio::test]
async fn test_user_role_is_gated_per_permission() {
    let h = harness().await;
    let principal = h
        .manager
        .user_manager()
        .signup(signup("ada@example.com", Some("correct horse"), Role::User))
        .await
        .unwrap();

    let denied = h
        .manager
        .authorize(principal.clone(), &require([USERS.delete().clone()]))
        .await;
    assert!(matches!(denied, Err(AuthError::Unauthorized(_))));

    let allowed = h
        .manager
        .authorize(principal, &require([USERS.required_extra("CHANGE_PASSWORD").unwrap()]))
        .await
        .unwrap();
    assert_eq!(allowed.email, "ada@example.com");
}

#[tokio::test]
async fn test_administrator_passes_every_gate() {
    let h = harness().await;
    let principal = h
        .manager
        .user_manager()
        .signup(signup("root@example.com", Some("correct horse"), Role::Administrator))
        .await
        .unwrap();
    let token = h.manager.issue_session_token(&principal).await.unwrap();

    for permission in USERS.full_permissions() {
        let result = h
            .manager
            .require(&token, &require([permission.clone()]))
            .await;
        assert!(result.is_ok(), "administrator denied {}", permission);
    }
}

#[tokio::test]
async fn test_signup_without_password_sends_generated_one() {
    let h = harness().await;
    h.manager
        .user_manager()
        .signup(signup("ada@example.com", Some(""), Role::User))
        .await
        .unwrap();

    let sent = h.notifier.last_for("ada@example.com").await.unwrap();
    assert_eq!(sent.template, NotificationTemplate::Registration);
    let password = sent.variable("password").unwrap().to_string();
    assert_eq!(password.chars().count(), 10);

    let stored = h.store.find_by_email("ada@example.com").await.unwrap().unwrap();
    assert!(stored.password_hash.starts_with("$argon2id$"));
    assert!(!stored.password_hash.contains(&password));

    let principal = h
        .manager
        .authenticate("ada@example.com", &password)
        .await
        .unwrap();
    assert_eq!(principal.email, "ada@example.com");
}

#[tokio::test]
async fn test_session_token_expires_with_the_clock() {
    let h = harness().await;
    let principal = h
        .manager
        .user_manager()
        .signup(signup("ada@example.com", None, Role::User))
        .await
        .unwrap();
    let token = h.manager.issue_session_token(&principal).await.unwrap();

    assert!(h.manager.current_principal(&token).await.is_ok());

    h.clock.advance(Duration::minutes(31));
    let result = h.manager.current_principal(&token).await;
    assert!(matches!(result, Err(AuthError::Unauthenticated(_))));
}

#[tokio::test]
async fn test_reset_token_lives_ten_minutes() {
    let h = harness().await;
    h.manager
        .user_manager()
        .signup(signup("ada@example.com", None, Role::User))
        .await
        .unwrap();

    let early = h.manager.issue_reset_token("ada@example.com").await.unwrap();
    let late = h.manager.issue_reset_token("ada@example.com").await.unwrap();

    h.clock.advance(Duration::minutes(9));
    h.manager
        .reset_password(&early, "fresh-password")
        .await
        .unwrap();

    h.clock.advance(Duration::minutes(2));
    let result = h.manager.reset_password(&late, "another-password").await;
    assert!(matches!(result, Err(AuthError::Unauthenticated(_))));

    assert!(h
        .manager
        .authenticate("ada@example.com", "fresh-password")
        .await
        .is_ok());
}

#[tokio::test]
async fn test_forgot_password_sends_working_link() {
    let h = harness().await;
    h.manager
        .user_manager()
        .signup(signup("ada@example.com", None, Role::User))
        .await
        .unwrap();

    h.manager
        .forgot_password("ada@example.com", "http://localhost:9999")
        .await;

    let sent = h.notifier.last_for("ada@example.com").await.unwrap();
    assert_eq!(sent.template, NotificationTemplate::PasswordReset);
    assert_eq!(sent.variable("name"), Some("Ada"));
    assert_eq!(sent.variable("expire_in_minutes"), Some("10"));

    let url = sent.variable("url").unwrap();
    let prefix = "http://localhost:9999/v1/users/me/reset_password_template?access_token=";
    assert!(url.starts_with(prefix));

    let token = &url[prefix.len()..];
    h.manager
        .reset_password(token, "fresh-password")
        .await
        .unwrap();
    assert!(h
        .manager
        .authenticate("ada@example.com", "fresh-password")
        .await
        .is_ok());
}

#[tokio::test]
async fn test_forgot_password_is_silent_for_unknown_email() {
    let h = harness().await;
    h.manager
        .forgot_password("ghost@example.com", "http://localhost:9999")
        .await;

    assert!(h.notifier.outbox().await.is_empty());
    assert_eq!(h.manager.get_stats().await.password_resets_requested, 1);
}

#[tokio::test]
async fn test_delivery_failures_never_fail_the_request() {
    let h = harness().await;
    h.notifier.set_failing(true);

    let principal = h
        .manager
        .user_manager()
        .signup(signup("ada@example.com", Some("correct horse"), Role::User))
        .await
        .unwrap();
    assert_eq!(principal.email, "ada@example.com");

    h.manager
        .forgot_password("ada@example.com", "http://localhost:9999")
        .await;

    assert!(h.notifier.outbox().await.is_empty());
    assert_eq!(h.manager.user_manager().get_stats().await.failed_notifications, 2);
}
