//! Orchestration tests: rule-sets attached to elements, end to end.

use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use judge_lib::error::Error;
use judge_lib::error::MalformedRuleSetError;
use judge_lib::{ElementOutcome, Form, FormElement, Judge, Network, Reply, Transport, Validation};
use tokio::sync::mpsc;
use tokio::sync::oneshot;

#[derive(Debug, PartialEq)]
enum Event {
    Valid(String),
    Invalid(String, Vec<String>),
}

type Events = mpsc::UnboundedReceiver<Event>;

/// Runs `validate` and returns the channel the callbacks report into.
fn validate(judge: &Judge, element: &FormElement, form: &Form) -> Result<Events, Error> {
    let (tx, rx) = mpsc::unbounded_channel();
    let tx_invalid = tx.clone();
    judge.validate(
        element,
        form,
        move |el| {
            let _ = tx.send(Event::Valid(el.id.clone()));
        },
        move |el, messages| {
            let _ = tx_invalid.send(Event::Invalid(el.id.clone(), messages));
        },
    )?;
    Ok(rx)
}

fn element(id: &str, value: &str, rules: &str) -> FormElement {
    FormElement::new(id).with_value(value).with_rules(rules)
}

/// Transport whose single reply is released by the test.
struct Gate {
    reply: Mutex<Option<oneshot::Receiver<Reply>>>,
    urls: Mutex<Vec<String>>,
}

impl Gate {
    fn new() -> (Arc<Self>, oneshot::Sender<Reply>) {
        let (tx, rx) = oneshot::channel();
        let gate = Arc::new(Self {
            reply: Mutex::new(Some(rx)),
            urls: Mutex::new(Vec::new()),
        });
        (gate, tx)
    }

    fn urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for Gate {
    async fn get(&self, url: &str) -> Reply {
        self.urls.lock().unwrap().push(url.to_string());
        let rx = self.reply.lock().unwrap().take();
        match rx {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Reply::transport_failure("gate dropped")),
            None => Reply::transport_failure("unexpected second request"),
        }
    }
}

fn gated_judge() -> (Judge, Arc<Gate>, oneshot::Sender<Reply>) {
    let (gate, release) = Gate::new();
    let judge = Judge::builder()
        .network(Network::from_shared(gate.clone()))
        .build();
    (judge, gate, release)
}

const UNIQUENESS: &str = r#"[{"kind":"uniqueness","options":{},"messages":{}}]"#;

// =============================================================================
// Synchronous rules
// =============================================================================

#[tokio::test]
async fn test_presence_empty_value_fires_invalid_once() {
    let name = element(
        "user_name",
        "",
        r#"[{"kind":"presence","options":{},"messages":{"blank":"can't be blank"}}]"#,
    );
    let form = Form::new().with(name.clone());

    let mut events = validate(&Judge::new(), &name, &form).unwrap();
    assert_eq!(
        events.recv().await,
        Some(Event::Invalid("user_name".into(), vec!["can't be blank".into()]))
    );
    assert_eq!(events.recv().await, None);
}

#[tokio::test]
async fn test_zero_rules_is_valid() {
    let judge = Judge::new();

    let empty = element("a", "", "[]");
    let mut events = validate(&judge, &empty, &Form::new()).unwrap();
    assert_eq!(events.recv().await, Some(Event::Valid("a".into())));
    assert_eq!(events.recv().await, None);

    let bare = FormElement::new("b");
    let mut events = validate(&judge, &bare, &Form::new()).unwrap();
    assert_eq!(events.recv().await, Some(Event::Valid("b".into())));
}

#[tokio::test]
async fn test_length_uses_rule_message() {
    let rules = r#"[{"kind":"length","options":{"minimum":3},"messages":{"too_short":"too short"}}]"#;
    let judge = Judge::new();

    let short = element("code", "ab", rules);
    let mut events = validate(&judge, &short, &Form::new()).unwrap();
    assert_eq!(
        events.recv().await,
        Some(Event::Invalid("code".into(), vec!["too short".into()]))
    );

    let long_enough = element("code", "abc", rules);
    let mut events = validate(&judge, &long_enough, &Form::new()).unwrap();
    assert_eq!(events.recv().await, Some(Event::Valid("code".into())));
}

#[tokio::test]
async fn test_inclusion() {
    let rules = r#"[{"kind":"inclusion","options":{"in":["a","b"]},"messages":{}}]"#;
    let judge = Judge::new();
    let form = Form::new();

    let outcome = judge.run(&element("x", "c", rules), &form).unwrap().outcome();
    assert!(outcome.is_invalid());

    let outcome = judge.run(&element("x", "a", rules), &form).unwrap().outcome();
    assert_eq!(outcome, ElementOutcome::Valid);
}

#[tokio::test]
async fn test_messages_merge_in_rule_order() {
    let rules = r#"[
        {"kind":"length","options":{"minimum":5},"messages":{"too_short":"too short"}},
        {"kind":"presence","options":{},"messages":{}},
        {"kind":"format","options":{"with":"(?-mix:\\A\\d+\\z)"},"messages":{"invalid":"digits only"}}
    ]"#;

    let run = Judge::new().run(&element("pin", "ab", rules), &Form::new()).unwrap();
    assert_eq!(run.validations().len(), 3);
    assert_eq!(
        run.outcome(),
        ElementOutcome::Invalid(vec!["too short".into(), "digits only".into()])
    );
}

#[tokio::test]
async fn test_confirmation_cross_check() {
    let rules = r#"[{"kind":"confirmation","options":{},"messages":{"confirmation":"doesn't match"}}]"#;
    let judge = Judge::new();

    let password = element("user_password", "x", rules);
    let matching = Form::new()
        .with(password.clone())
        .with(FormElement::new("user_password_confirmation").with_value("x"));
    let mut events = validate(&judge, &password, &matching).unwrap();
    assert_eq!(events.recv().await, Some(Event::Valid("user_password".into())));

    let mut mismatching = matching.clone();
    mismatching.set_value("user_password_confirmation", "y");
    let mut events = validate(&judge, &password, &mismatching).unwrap();
    assert_eq!(
        events.recv().await,
        Some(Event::Invalid("user_password".into(), vec!["doesn't match".into()]))
    );
}

// =============================================================================
// Configuration errors
// =============================================================================

#[tokio::test]
async fn test_unknown_kind_fires_no_callback() {
    let el = element("x", "", r#"[{"kind":"presence"},{"kind":"email"}]"#);
    let err = validate(&Judge::new(), &el, &Form::new()).unwrap_err();
    assert_eq!(err.unknown_kind(), Some("email"));
}

#[tokio::test]
async fn test_unknown_kind_resolved_before_any_request() {
    let (judge, gate, _release) = gated_judge();
    let el = element(
        "x",
        "v",
        r#"[{"kind":"uniqueness","options":{},"messages":{}},{"kind":"nope"}]"#,
    );

    assert!(matches!(
        validate(&judge, &el, &Form::new()),
        Err(Error::UnknownValidator(_))
    ));
    tokio::task::yield_now().await;
    assert!(gate.urls().is_empty());
}

#[tokio::test]
async fn test_malformed_rule_set() {
    let el = element("x", "", r#"[{"options":{}}]"#);
    let err = validate(&Judge::new(), &el, &Form::new()).unwrap_err();
    assert!(matches!(
        err,
        Error::MalformedRuleSet(MalformedRuleSetError::Rule { index: 0, .. })
    ));
}

#[tokio::test]
async fn test_missing_confirmation_target() {
    let el = element("user_password", "x", r#"[{"kind":"confirmation"}]"#);
    let err = validate(&Judge::new(), &el, &Form::new()).unwrap_err();
    assert!(matches!(err, Error::MissingConfirmationTarget(_)));
}

#[tokio::test]
async fn test_missing_confirmation_target_checked_before_any_request() {
    let (judge, gate, _release) = gated_judge();
    let el = element(
        "user_password",
        "x",
        r#"[{"kind":"uniqueness"},{"kind":"confirmation"}]"#,
    );

    assert!(matches!(
        validate(&judge, &el, &Form::new()),
        Err(Error::MissingConfirmationTarget(_))
    ));
    tokio::task::yield_now().await;
    assert!(gate.urls().is_empty());
}

#[tokio::test]
async fn test_invalid_pattern_checked_before_any_request() {
    let (judge, gate, _release) = gated_judge();
    let el = element(
        "user_login",
        "x",
        r#"[{"kind":"uniqueness"},{"kind":"format","options":{"with":"(?-mix:[a-)"}}]"#,
    );

    assert!(matches!(
        validate(&judge, &el, &Form::new()),
        Err(Error::InvalidPattern(_))
    ));
    tokio::task::yield_now().await;
    assert!(gate.urls().is_empty());
}

#[tokio::test]
async fn test_allow_blank_skips_configuration_checks() {
    let el = element(
        "user_password",
        "",
        r#"[{"kind":"confirmation","options":{"allow_blank":true}}]"#,
    );
    let mut events = validate(&Judge::new(), &el, &Form::new()).unwrap();
    assert_eq!(
        events.recv().await,
        Some(Event::Valid("user_password".into()))
    );
}

// =============================================================================
// Asynchronous rules
// =============================================================================

#[tokio::test]
async fn test_uniqueness_waits_for_server() {
    let (judge, gate, release) = gated_judge();
    let email = FormElement::new("user_email")
        .with_name("user[email]")
        .with_value("taken@example.com")
        .with_rules(UNIQUENESS);

    let mut events = validate(&judge, &email, &Form::new()).unwrap();

    tokio::task::yield_now().await;
    assert!(events.try_recv().is_err());
    assert_eq!(gate.urls().len(), 1);
    assert!(gate.urls()[0].starts_with("/judge/validate?klass=User&attribute=email"));

    release
        .send(Reply::ok(r#"["has already been taken"]"#))
        .unwrap();

    assert_eq!(
        events.recv().await,
        Some(Event::Invalid(
            "user_email".into(),
            vec!["has already been taken".into()]
        ))
    );
    assert_eq!(events.recv().await, None);
}

#[tokio::test]
async fn test_uniqueness_empty_array_is_valid() {
    let (judge, _gate, release) = gated_judge();
    let email = element("user_email", "free@example.com", UNIQUENESS);

    let mut events = validate(&judge, &email, &Form::new()).unwrap();
    release.send(Reply::ok("[]")).unwrap();

    assert_eq!(events.recv().await, Some(Event::Valid("user_email".into())));
    assert_eq!(events.recv().await, None);
}

#[tokio::test]
async fn test_uniqueness_request_error() {
    let (judge, _gate, release) = gated_judge();
    let email = element("user_email", "a@example.com", UNIQUENESS);

    let mut events = validate(&judge, &email, &Form::new()).unwrap();
    release.send(Reply::new(500, "boom")).unwrap();

    assert_eq!(
        events.recv().await,
        Some(Event::Invalid(
            "user_email".into(),
            vec!["Request error: 500".into()]
        ))
    );
}

#[tokio::test]
async fn test_uniqueness_transport_failure_uses_rule_message() {
    let (judge, _gate, release) = gated_judge();
    let email = element(
        "user_email",
        "a@example.com",
        r#"[{"kind":"uniqueness","options":{},"messages":{"request_error":"could not be checked"}}]"#,
    );

    let mut events = validate(&judge, &email, &Form::new()).unwrap();
    release
        .send(Reply::transport_failure("connection refused"))
        .unwrap();

    assert_eq!(
        events.recv().await,
        Some(Event::Invalid(
            "user_email".into(),
            vec!["could not be checked".into()]
        ))
    );
}

#[tokio::test]
async fn test_uniqueness_allow_blank_skips_request() {
    let (judge, gate, _release) = gated_judge();
    let email = element(
        "user_email",
        "",
        r#"[{"kind":"uniqueness","options":{"allow_blank":true},"messages":{}}]"#,
    );

    let mut events = validate(&judge, &email, &Form::new()).unwrap();
    assert_eq!(events.recv().await, Some(Event::Valid("user_email".into())));
    assert!(gate.urls().is_empty());
}

#[tokio::test]
async fn test_sync_failure_reported_without_waiting() {
    let (judge, gate, release) = gated_judge();
    let email = element(
        "user_email",
        "ab",
        r#"[
            {"kind":"uniqueness","options":{},"messages":{}},
            {"kind":"length","options":{"minimum":3},"messages":{"too_short":"too short"}}
        ]"#,
    );

    let mut events = validate(&judge, &email, &Form::new()).unwrap();
    assert_eq!(
        events.recv().await,
        Some(Event::Invalid("user_email".into(), vec!["too short".into()]))
    );
    assert_eq!(events.recv().await, None);

    // The server answer arrives later and is not reported again.
    release.send(Reply::ok(r#"["taken"]"#)).unwrap();
    tokio::task::yield_now().await;
    assert_eq!(gate.urls().len(), 1);
}

#[tokio::test]
async fn test_custom_async_validator() {
    let mut judge = Judge::new();
    let (tx, rx) = oneshot::channel::<Validation>();
    let tx = Mutex::new(Some(tx));

    judge.register("deferred", move |_| {
        let validation = Validation::new();
        if let Some(tx) = tx.lock().unwrap().take() {
            let _ = tx.send(validation.clone());
        }
        Ok(validation)
    });

    let el = element("x", "v", r#"[{"kind":"deferred"},{"kind":"presence"}]"#);
    let mut events = validate(&judge, &el, &Form::new()).unwrap();

    let handle = rx.await.unwrap();
    tokio::task::yield_now().await;
    assert!(events.try_recv().is_err());

    handle.close(r#"["rejected"]"#).unwrap();
    assert_eq!(
        events.recv().await,
        Some(Event::Invalid("x".into(), vec!["rejected".into()]))
    );
}

#[tokio::test]
async fn test_validate_form() {
    let (judge, _gate, release) = gated_judge();
    let form = Form::new()
        .with(element("name", "", r#"[{"kind":"presence"}]"#))
        .with(FormElement::new("plain").with_value("untouched"))
        .with(element("email", "a@example.com", UNIQUENESS));

    release.send(Reply::ok("[]")).unwrap();
    let outcomes = judge.validate_form(&form).await.unwrap();

    assert_eq!(
        outcomes,
        vec![
            (
                "name".to_string(),
                ElementOutcome::Invalid(vec!["can't be blank".into()])
            ),
            ("email".to_string(), ElementOutcome::Valid),
        ]
    );
}
