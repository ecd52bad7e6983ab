use std::{collections::HashMap, time::Duration};

use oop_grader::{
    config::{self, ConfigState, JAVA_TIMEOUT_VAR, LINT_CAP_VAR, MAX_SCORE_VAR},
    grade::ScorePolicy,
};

fn lookup_in(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| vars.get(name).cloned()
}

#[test]
fn unset_variables_keep_defaults() {
    let state = ConfigState::from_lookup(|_| None);

    assert_eq!(state, ConfigState::default());
    assert_eq!(state.javac_timeout(), Duration::from_secs(30));
    assert_eq!(state.java_timeout(), Duration::from_secs(10));
    assert_eq!(state.score_policy(), ScorePolicy::default());
}

#[test]
fn set_variables_override_defaults() {
    let state = ConfigState::from_lookup(lookup_in(&[
        (JAVA_TIMEOUT_VAR, " 3 "),
        (MAX_SCORE_VAR, "50"),
        (LINT_CAP_VAR, "4"),
    ]));

    assert_eq!(state.java_timeout(), Duration::from_secs(3));
    assert_eq!(state.javac_timeout(), Duration::from_secs(30));
    assert_eq!(state.score_policy().max_score, 50);
    assert_eq!(state.score_policy().lint_penalty_per_note, 2);
    assert_eq!(state.score_policy().lint_penalty_cap, 4);
}

#[test]
fn unparsable_values_are_ignored() {
    let state = ConfigState::from_lookup(lookup_in(&[
        (JAVA_TIMEOUT_VAR, "ten"),
        (MAX_SCORE_VAR, "-1"),
    ]));

    assert_eq!(state, ConfigState::default());
}

#[test]
fn installed_state_becomes_active() {
    let policy = ScorePolicy {
        max_score: 50,
        ..ScorePolicy::default()
    };
    let custom = ConfigState::default()
        .with_java_timeout(Duration::from_secs(2))
        .with_score_policy(policy);

    config::install(custom.clone()).expect("install succeeds");

    assert_eq!(*config::get(), custom);
    assert_eq!(config::get().java_timeout(), Duration::from_secs(2));
    assert_eq!(config::get().score_policy().max_score, 50);
}
