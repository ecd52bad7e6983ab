#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Grader settings, read from `OOP_GRADER_*` environment variables once and
//! shared behind a global handle. Unset or unparsable values keep their
//! defaults.

use std::{
    str::FromStr,
    sync::{Arc, Mutex, OnceLock},
    time::Duration,
};

use anyhow::{Result, anyhow};

use crate::{
    constants::{DEFAULT_JAVA_TIMEOUT, DEFAULT_JAVAC_TIMEOUT},
    grade::score::ScorePolicy,
};

/// Seconds allowed for one javac invocation
pub const JAVAC_TIMEOUT_VAR: &str = "OOP_GRADER_JAVAC_TIMEOUT_SECS";
/// Seconds allowed for one run of a submission
pub const JAVA_TIMEOUT_VAR: &str = "OOP_GRADER_JAVA_TIMEOUT_SECS";
/// Score before deductions
pub const MAX_SCORE_VAR: &str = "OOP_GRADER_MAX_SCORE";
/// Points per lint note
pub const LINT_PENALTY_VAR: &str = "OOP_GRADER_LINT_PENALTY";
/// Most points lint can cost
pub const LINT_CAP_VAR: &str = "OOP_GRADER_LINT_CAP";

/// Timeouts and scoring constants for a grading session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigState {
    /// limit for one javac invocation
    javac_timeout: Duration,
    /// limit for one run of the student's program
    java_timeout:  Duration,
    /// scoring constants
    score_policy:  ScorePolicy,
}

impl Default for ConfigState {
    fn default() -> Self {
        Self {
            javac_timeout: DEFAULT_JAVAC_TIMEOUT,
            java_timeout:  DEFAULT_JAVA_TIMEOUT,
            score_policy:  ScorePolicy::default(),
        }
    }
}

impl ConfigState {
    /// Reads every setting from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads every setting through `lookup`, which maps a variable name to
    /// its value if set.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base = Self::default();
        let secs = |name: &str, default: Duration| {
            setting::<u64>(&lookup, name)
                .map(Duration::from_secs)
                .unwrap_or(default)
        };
        let points = |name: &str, default: u32| setting::<u32>(&lookup, name).unwrap_or(default);

        Self {
            javac_timeout: secs(JAVAC_TIMEOUT_VAR, base.javac_timeout),
            java_timeout:  secs(JAVA_TIMEOUT_VAR, base.java_timeout),
            score_policy:  ScorePolicy {
                max_score:             points(MAX_SCORE_VAR, base.score_policy.max_score),
                lint_penalty_per_note: points(
                    LINT_PENALTY_VAR,
                    base.score_policy.lint_penalty_per_note,
                ),
                lint_penalty_cap:      points(LINT_CAP_VAR, base.score_policy.lint_penalty_cap),
            },
        }
    }

    /// Replaces the run limit.
    pub fn with_java_timeout(mut self, limit: Duration) -> Self {
        self.java_timeout = limit;
        self
    }

    /// Replaces the scoring constants.
    pub fn with_score_policy(mut self, policy: ScorePolicy) -> Self {
        self.score_policy = policy;
        self
    }

    /// Limit for one javac invocation
    pub fn javac_timeout(&self) -> Duration {
        self.javac_timeout
    }

    /// Limit for one run of a submission
    pub fn java_timeout(&self) -> Duration {
        self.java_timeout
    }

    /// Scoring constants
    pub fn score_policy(&self) -> ScorePolicy {
        self.score_policy
    }
}

/// Looks up and parses one setting, logging and discarding values that do
/// not parse.
fn setting<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<T> {
    let raw = lookup(name)?;
    let parsed = raw.trim().parse::<T>().ok();
    if parsed.is_none() {
        tracing::warn!("Ignoring {name}={raw:?}: not a whole number");
    }
    parsed
}

/// Cheap, clonable view of the active configuration.
#[derive(Clone, Debug)]
pub struct ConfigHandle(Arc<ConfigState>);

impl std::ops::Deref for ConfigHandle {
    type Target = ConfigState;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// The active configuration, filled on first use or by [`install`].
static ACTIVE: OnceLock<Mutex<Option<Arc<ConfigState>>>> = OnceLock::new();

/// Locks the active configuration slot.
fn lock_active() -> Result<std::sync::MutexGuard<'static, Option<Arc<ConfigState>>>> {
    ACTIVE
        .get_or_init(|| Mutex::new(None))
        .lock()
        .map_err(|_| anyhow!("config slot poisoned"))
}

/// Returns the active configuration, reading the environment the first time.
pub fn ensure_initialized() -> Result<ConfigHandle> {
    let mut active = lock_active()?;
    let state = active
        .get_or_insert_with(|| Arc::new(ConfigState::from_env()))
        .clone();
    Ok(ConfigHandle(state))
}

/// Makes `state` the active configuration from now on.
pub fn install(state: ConfigState) -> Result<()> {
    *lock_active()? = Some(Arc::new(state));
    Ok(())
}

/// Returns the active configuration.
pub fn get() -> ConfigHandle {
    ensure_initialized().expect("configuration initialization failed")
}
