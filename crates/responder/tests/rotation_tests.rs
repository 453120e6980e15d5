//! Credential rotation against the in-memory account.

use std::sync::Arc;

use bulwark_driver_memory::{MemoryAccount, Operation};
use bulwark_ports::{AccessKeyStatus, ResourceTag};
use bulwark_responder::{
    CompromisedUser, FailureIndicator, IncidentRequest, IncidentResponder, ResponderConfig,
    RotationOutcome,
};
use chrono::{Duration, Utc};
use pretty_assertions::assert_eq;

fn responder(account: &Arc<MemoryAccount>, config: ResponderConfig) -> IncidentResponder {
    IncidentResponder::builder()
        .compute(Arc::clone(account) as _)
        .identity(Arc::clone(account) as _)
        .secrets(Arc::clone(account) as _)
        .publisher(Arc::clone(account) as _)
        .config(config)
        .build()
        .expect("responder wiring")
}

fn users(entries: Vec<CompromisedUser>) -> IncidentRequest {
    IncidentRequest {
        compromised_users: entries,
        ..Default::default()
    }
}

/// `alice` holds the flagged active key and an older inactive one.
fn alice_at_limit() -> Arc<MemoryAccount> {
    let now = Utc::now();
    Arc::new(
        MemoryAccount::new()
            .with_access_key(
                "alice",
                "AKIAOLDINACTIVE",
                AccessKeyStatus::Inactive,
                now - Duration::days(200),
            )
            .with_access_key(
                "alice",
                "AKIAEXAMPLE",
                AccessKeyStatus::Active,
                now - Duration::days(10),
            ),
    )
}

#[tokio::test]
async fn rotates_key_for_user_at_limit() {
    let account = alice_at_limit();

    let response = responder(&account, ResponderConfig::default())
        .respond(
            "run-1",
            &users(vec![CompromisedUser::new("alice", "AKIAEXAMPLE")]),
        )
        .await;

    let results = response.body.key_rotation();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].iam_user.as_deref(), Some("alice"));
    assert_eq!(
        results[0].outcome,
        RotationOutcome::Success {
            deactivated_key: "AKIAEXAMPLE".into(),
            deleted_keys: vec!["AKIAOLDINACTIVE".into()],
            new_key_id: "AKIAMEMORY0000000001".into(),
            secret_arn: "arn:aws:secretsmanager:us-east-1:000000000000:secret:incident-response/alice/AKIAMEMORY0000000001-000001".into(),
        }
    );

    // Flagged key kept but inactive, old key gone, replacement active.
    let keys: Vec<_> = account
        .access_keys("alice")
        .unwrap()
        .into_iter()
        .map(|k| (k.access_key_id, k.status))
        .collect();
    assert_eq!(
        keys,
        vec![
            ("AKIAEXAMPLE".to_string(), AccessKeyStatus::Inactive),
            ("AKIAMEMORY0000000001".to_string(), AccessKeyStatus::Active),
        ]
    );
}

#[tokio::test]
async fn stores_new_key_material_with_metadata() {
    let account = alice_at_limit();

    responder(&account, ResponderConfig::default())
        .respond(
            "run-1",
            &users(vec![CompromisedUser::new("alice", "AKIAEXAMPLE")]),
        )
        .await;

    let secrets = account.secrets();
    assert_eq!(secrets.len(), 1);
    let secret = &secrets[0];
    assert_eq!(secret.name, "incident-response/alice/AKIAMEMORY0000000001");
    assert_eq!(secret.description, "Rotated key for alice - incident run-1");
    assert_eq!(
        secret.tags,
        vec![
            ResourceTag::new("IncidentResponse", "true"),
            ResourceTag::new("IncidentId", "run-1"),
            ResourceTag::new("IAMUser", "alice"),
        ]
    );

    let value: serde_json::Value =
        serde_json::from_str(&account.secret_value(&secret.name).unwrap()).unwrap();
    assert_eq!(value["AccessKeyId"], "AKIAMEMORY0000000001");
    assert_eq!(value["SecretAccessKey"], "memory-secret-1");
    assert_eq!(value["UserName"], "alice");
    assert_eq!(value["IncidentId"], "run-1");
    assert!(value["RotatedAt"].as_str().unwrap().ends_with('Z'));
}

#[tokio::test]
async fn deletes_only_the_oldest_inactive_key() {
    let now = Utc::now();
    let account = Arc::new(
        MemoryAccount::new()
            .with_key_limit(3)
            .with_access_key("bob", "AKIAFLAGGED", AccessKeyStatus::Active, now)
            .with_access_key("bob", "AKIAOLDER", AccessKeyStatus::Inactive, now - Duration::days(50))
            .with_access_key("bob", "AKIAOLDEST", AccessKeyStatus::Inactive, now - Duration::days(400)),
    );
    let config = ResponderConfig {
        max_access_keys: 3,
        ..Default::default()
    };

    let response = responder(&account, config)
        .respond("run-1", &users(vec![CompromisedUser::new("bob", "AKIAFLAGGED")]))
        .await;

    match &response.body.key_rotation()[0].outcome {
        RotationOutcome::Success { deleted_keys, .. } => {
            assert_eq!(deleted_keys, &vec!["AKIAOLDEST".to_string()]);
        }
        other => panic!("expected success, got {other:?}"),
    }
    assert_eq!(account.calls_to(Operation::DeleteAccessKey).len(), 1);
}

#[tokio::test]
async fn flagged_key_is_pruned_when_it_is_the_only_inactive_key() {
    let now = Utc::now();
    let account = Arc::new(
        MemoryAccount::new()
            .with_access_key("bob", "AKIAFLAGGED", AccessKeyStatus::Active, now - Duration::days(30))
            .with_access_key("bob", "AKIANEWER", AccessKeyStatus::Active, now - Duration::days(1)),
    );

    let response = responder(&account, ResponderConfig::default())
        .respond("run-1", &users(vec![CompromisedUser::new("bob", "AKIAFLAGGED")]))
        .await;

    match &response.body.key_rotation()[0].outcome {
        RotationOutcome::Success {
            deactivated_key,
            deleted_keys,
            ..
        } => {
            assert_eq!(deactivated_key, "AKIAFLAGGED");
            assert_eq!(deleted_keys, &vec!["AKIAFLAGGED".to_string()]);
        }
        other => panic!("expected success, got {other:?}"),
    }

    let remaining: Vec<String> = account
        .access_keys("bob")
        .unwrap()
        .into_iter()
        .map(|key| key.access_key_id)
        .collect();
    assert!(!remaining.contains(&"AKIAFLAGGED".to_string()));
    assert!(remaining.contains(&"AKIANEWER".to_string()));
    assert_eq!(remaining.len(), 2);
}

#[tokio::test]
async fn user_below_limit_keeps_all_keys() {
    let account = Arc::new(MemoryAccount::new().with_access_key(
        "carol",
        "AKIACAROL",
        AccessKeyStatus::Active,
        Utc::now(),
    ));

    let response = responder(&account, ResponderConfig::default())
        .respond("run-1", &users(vec![CompromisedUser::new("carol", "AKIACAROL")]))
        .await;

    match &response.body.key_rotation()[0].outcome {
        RotationOutcome::Success { deleted_keys, .. } => assert!(deleted_keys.is_empty()),
        other => panic!("expected success, got {other:?}"),
    }
    assert!(account.calls_to(Operation::DeleteAccessKey).is_empty());
    assert_eq!(account.access_keys("carol").unwrap().len(), 2);
}

#[tokio::test]
async fn format_failures_make_no_external_call() {
    let account = alice_at_limit();
    let request = IncidentRequest::from_json(
        r#"{"compromised_users": [
            {"iam_user": "carol"},
            {"access_key_id": "AKIAEXAMPLE"},
            {"iam_user": "alice", "access_key_id": "not-a-key"},
            {"iam_user": "alice smith", "access_key_id": "AKIAEXAMPLE"}
        ]}"#,
    )
    .unwrap();

    let response = responder(&account, ResponderConfig::default())
        .respond("run-1", &request)
        .await;

    let errors: Vec<_> = response
        .body
        .key_rotation()
        .iter()
        .map(|r| (r.iam_user.clone(), r.outcome.clone()))
        .collect();
    assert_eq!(
        errors,
        vec![
            (
                Some("carol".to_string()),
                RotationOutcome::Failed {
                    error: FailureIndicator::MissingTarget
                }
            ),
            (
                None,
                RotationOutcome::Failed {
                    error: FailureIndicator::MissingTarget
                }
            ),
            (
                Some("alice".to_string()),
                RotationOutcome::Failed {
                    error: FailureIndicator::InvalidAccessKey
                }
            ),
            (
                Some("alice smith".to_string()),
                RotationOutcome::Failed {
                    error: FailureIndicator::InvalidUserName
                }
            ),
        ]
    );
    assert!(account.calls().is_empty());
}

#[tokio::test]
async fn unknown_key_reports_generic_failure() {
    let account = alice_at_limit();

    let response = responder(&account, ResponderConfig::default())
        .respond("run-1", &users(vec![CompromisedUser::new("alice", "AKIAUNKNOWN")]))
        .await;

    assert_eq!(
        response.body.key_rotation()[0].outcome,
        RotationOutcome::Failed {
            error: FailureIndicator::RotationFailed
        }
    );
    assert!(account.calls_to(Operation::CreateAccessKey).is_empty());
}

#[tokio::test]
async fn secret_store_failure_leaves_issued_key_in_place() {
    let account = alice_at_limit();
    account.fail(Operation::CreateSecret);

    let response = responder(&account, ResponderConfig::default())
        .respond("run-1", &users(vec![CompromisedUser::new("alice", "AKIAEXAMPLE")]))
        .await;

    assert!(!response.body.key_rotation()[0].is_success());
    let keys = account.access_keys("alice").unwrap();
    assert!(keys.iter().any(|k| k.access_key_id == "AKIAMEMORY0000000001"));
    assert!(account.secrets().is_empty());
}

#[tokio::test]
async fn one_failed_user_does_not_stop_the_next() {
    let account = Arc::new(
        MemoryAccount::new()
            .with_access_key("dave", "AKIADAVE", AccessKeyStatus::Active, Utc::now())
            .with_access_key("erin", "AKIAERIN", AccessKeyStatus::Active, Utc::now()),
    );
    account.fail_on(Operation::CreateAccessKey, "dave");

    let response = responder(&account, ResponderConfig::default())
        .respond(
            "run-1",
            &users(vec![
                CompromisedUser::new("dave", "AKIADAVE"),
                CompromisedUser::new("erin", "AKIAERIN"),
            ]),
        )
        .await;

    let results = response.body.key_rotation();
    assert!(!results[0].is_success());
    assert!(results[1].is_success());
    assert_eq!(results[1].iam_user.as_deref(), Some("erin"));
}

#[tokio::test]
async fn single_pair_is_rotated_after_list_entries() {
    let account = Arc::new(
        MemoryAccount::new()
            .with_access_key("dave", "AKIADAVE", AccessKeyStatus::Active, Utc::now())
            .with_access_key("erin", "AKIAERIN", AccessKeyStatus::Active, Utc::now()),
    );
    let request = IncidentRequest::from_json(
        r#"{"iam_user": "dave", "access_key_id": "AKIADAVE",
            "compromised_users": [{"iam_user": "erin", "access_key_id": "AKIAERIN"}]}"#,
    )
    .unwrap();

    let response = responder(&account, ResponderConfig::default())
        .respond("run-1", &request)
        .await;

    let order: Vec<_> = response
        .body
        .key_rotation()
        .iter()
        .map(|r| r.iam_user.clone().unwrap())
        .collect();
    assert_eq!(order, vec!["erin", "dave"]);
}
