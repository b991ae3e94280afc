//! Property-test run profile read from the environment.
//!
//! Every property suite in the workspace sizes itself through
//! [`ProptestRunProfile`], so a CI job can deepen or fork all of them with a
//! single pair of variables.

use std::{env, fmt};

/// Environment variable overriding the number of cases per property.
pub const PROGTEST_CASES_ENV_KEY: &str = "PROGTEST_CASES";
/// Environment variable enabling forked proptest execution.
pub const TOMOGRAPHY_PBT_FORK_ENV_KEY: &str = "TOMOGRAPHY_PBT_FORK";

/// Reason an override was ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
enum OverrideError {
    NotANumber(String),
    ZeroCases,
    NotABoolean,
}

impl fmt::Display for OverrideError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotANumber(reason) => write!(f, "parse error: {reason}"),
            Self::ZeroCases => f.write_str("cases must be > 0"),
            Self::NotABoolean => f.write_str("expected one of: true/false/1/0/yes/no/on/off"),
        }
    }
}

/// Case count and fork policy for one property suite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProptestRunProfile {
    cases: u32,
    fork: bool,
}

impl ProptestRunProfile {
    /// Reads the overrides, falling back to the supplied defaults when a
    /// variable is absent or malformed.
    ///
    /// # Examples
    ///
    /// ```
    /// use tomography_test_support::ci::property_test_profile::ProptestRunProfile;
    ///
    /// let profile = ProptestRunProfile::load(64, false);
    /// assert!(profile.cases() > 0);
    /// ```
    #[must_use]
    pub fn load(default_cases: u32, default_fork: bool) -> Self {
        Self {
            cases: override_or(PROGTEST_CASES_ENV_KEY, default_cases, parse_cases),
            fork: override_or(TOMOGRAPHY_PBT_FORK_ENV_KEY, default_fork, parse_flag),
        }
    }

    /// Number of cases to run per property.
    #[must_use]
    pub const fn cases(&self) -> u32 {
        self.cases
    }

    /// Whether cases run in forked subprocesses.
    #[must_use]
    pub const fn fork(&self) -> bool {
        self.fork
    }
}

fn override_or<T: Copy>(
    key: &'static str,
    default: T,
    parse: fn(&str) -> Result<T, OverrideError>,
) -> T {
    let Ok(raw) = env::var(key) else {
        return default;
    };
    parse(&raw).unwrap_or_else(|reason| {
        tracing::warn!(
            env = key,
            raw = %raw,
            reason = %reason,
            "ignoring malformed property-test override",
        );
        default
    })
}

fn parse_cases(raw: &str) -> Result<u32, OverrideError> {
    match raw.trim().parse::<u32>() {
        Ok(0) => Err(OverrideError::ZeroCases),
        Ok(cases) => Ok(cases),
        Err(error) => Err(OverrideError::NotANumber(error.to_string())),
    }
}

fn parse_flag(raw: &str) -> Result<bool, OverrideError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(OverrideError::NotABoolean),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::sync::Mutex;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    /// Restores a variable to its previous value on drop.
    struct ScopedVar {
        key: &'static str,
        previous: Option<String>,
    }

    impl ScopedVar {
        fn new(key: &'static str, value: Option<&str>) -> Self {
            let previous = env::var(key).ok();
            apply(key, value);
            Self { key, previous }
        }
    }

    impl Drop for ScopedVar {
        fn drop(&mut self) {
            apply(self.key, self.previous.as_deref());
        }
    }

    fn apply(key: &str, value: Option<&str>) {
        match value {
            // SAFETY: tests serialise environment access with ENV_LOCK.
            Some(value) => unsafe { env::set_var(key, value) },
            // SAFETY: tests serialise environment access with ENV_LOCK.
            None => unsafe { env::remove_var(key) },
        }
    }

    fn load_with(cases: Option<&str>, fork: Option<&str>, default_fork: bool) -> ProptestRunProfile {
        let _lock = ENV_LOCK.lock().expect("env lock");
        let _cases = ScopedVar::new(PROGTEST_CASES_ENV_KEY, cases);
        let _fork = ScopedVar::new(TOMOGRAPHY_PBT_FORK_ENV_KEY, fork);
        ProptestRunProfile::load(64, default_fork)
    }

    #[test]
    fn defaults_apply_without_overrides() {
        let profile = load_with(None, None, false);
        assert_eq!(profile.cases(), 64);
        assert!(!profile.fork());
    }

    #[rstest]
    #[case::one("1", 1)]
    #[case::padded(" 250 ", 250)]
    #[case::large("25000", 25_000)]
    #[case::zero("0", 64)]
    #[case::negative("-1", 64)]
    #[case::garbage("abc", 64)]
    fn case_overrides(#[case] raw: &str, #[case] expected: u32) {
        assert_eq!(load_with(Some(raw), None, false).cases(), expected);
    }

    #[rstest]
    #[case::word("true", false, true)]
    #[case::upper("ON", false, true)]
    #[case::digit("0", true, false)]
    #[case::no("no", true, false)]
    #[case::empty_keeps_default("", true, true)]
    #[case::unknown_keeps_default("maybe", false, false)]
    fn fork_overrides(#[case] raw: &str, #[case] default: bool, #[case] expected: bool) {
        assert_eq!(load_with(None, Some(raw), default).fork(), expected);
    }
}
