//! `go test` pipeline

use super::base::base_container;
use super::options::{ApplyTo, BaseOptions, TestOptions, apply};
use crate::client::{Client, Container};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Coverage mode for `go test`.
///
/// Variants are ordered; only values strictly above [`CoverMode::Undefined`]
/// and up to [`CoverMode::Atomic`] are valid.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum CoverMode {
    /// No coverage mode set
    #[default]
    Undefined,
    /// Whether each statement ran
    Set,
    /// How many times each statement ran
    Count,
    /// Like count, but correct in multithreaded tests
    Atomic,
}

impl CoverMode {
    /// Returns true for set, count and atomic
    #[must_use]
    pub fn is_valid(self) -> bool {
        Self::Undefined < self && self <= Self::Atomic
    }

    /// Lowercase flag value, empty for an unset mode
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Set => "set",
            Self::Count => "count",
            Self::Atomic => "atomic",
            Self::Undefined => "",
        }
    }
}

impl fmt::Display for CoverMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown cover mode
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown cover mode '{0}', expected one of: set, count, atomic")]
pub struct ParseCoverModeError(String);

impl FromStr for CoverMode {
    type Err = ParseCoverModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "set" => Ok(Self::Set),
            "count" => Ok(Self::Count),
            "atomic" => Ok(Self::Atomic),
            "" => Ok(Self::Undefined),
            _ => Err(ParseCoverModeError(s.to_string())),
        }
    }
}

impl TestOptions {
    /// Splits the record into the base options to build on and the
    /// `go test` argument list.
    ///
    /// Requesting the race detector also forces cgo on in the returned base
    /// options, whatever cgo setting was given before.
    #[must_use]
    pub fn into_command(mut self) -> (BaseOptions, Vec<String>) {
        let mut args = vec!["go".to_string(), "test".to_string()];

        if self.verbose {
            args.push("-v".to_string());
        }

        if self.race_detector {
            args.push("-race".to_string());

            if self.base.cgo_enabled == Some(false) {
                tracing::debug!("Race detector requires cgo, overriding CGO_ENABLED=0");
            }
            self.base.cgo_enabled = Some(true);
        }

        if self.cover_mode.is_valid() {
            args.push("-covermode".to_string());
            args.push(self.cover_mode.to_string());
        }

        if let Some(profile) = self.cover_profile.as_deref().filter(|p| !p.is_empty()) {
            args.push("-coverprofile".to_string());
            args.push(profile.to_string());
        }

        args.push("./...".to_string());
        (self.base, args)
    }
}

/// Returns a container running `go test` on every package of the project.
#[must_use]
pub fn test<C, I>(client: &C, opts: I) -> Container
where
    C: Client + ?Sized,
    I: IntoIterator,
    I::Item: ApplyTo<TestOptions>,
{
    let options: TestOptions = apply(opts);
    let (base, args) = options.into_command();

    tracing::debug!(command = %args.join(" "), "Resolved go test command");

    base_container(client, &base).with_exec(args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{BaseClient, Directory};
    use crate::golang::base::CGO_ENABLED;
    use crate::golang::options::{
        TestOption, cover_mode, cover_profile, disable_cgo, enable_cgo, enable_race_detector,
        project_root, verbose,
    };
    use pretty_assertions::assert_eq;

    fn no_options() -> Vec<TestOption> {
        Vec::new()
    }

    #[test]
    fn test_cover_mode_validity() {
        assert!(!CoverMode::Undefined.is_valid());
        assert!(CoverMode::Set.is_valid());
        assert!(CoverMode::Count.is_valid());
        assert!(CoverMode::Atomic.is_valid());
    }

    #[test]
    fn test_cover_mode_display() {
        assert_eq!(CoverMode::Undefined.to_string(), "");
        assert_eq!(CoverMode::Set.to_string(), "set");
        assert_eq!(CoverMode::Count.to_string(), "count");
        assert_eq!(CoverMode::Atomic.to_string(), "atomic");
    }

    #[test]
    fn test_cover_mode_parse() {
        assert_eq!("count".parse::<CoverMode>(), Ok(CoverMode::Count));
        assert_eq!("ATOMIC".parse::<CoverMode>(), Ok(CoverMode::Atomic));
        assert_eq!("".parse::<CoverMode>(), Ok(CoverMode::Undefined));
        assert!("branch".parse::<CoverMode>().is_err());
    }

    #[test]
    fn test_cover_mode_serde() {
        assert_eq!(serde_json::to_string(&CoverMode::Set).unwrap(), r#""set""#);
        let mode: CoverMode = serde_json::from_str(r#""count""#).unwrap();
        assert_eq!(mode, CoverMode::Count);
    }

    #[test]
    fn test_default_command() {
        let container = test(&BaseClient, no_options());

        assert_eq!(container.exec(), ["go", "test", "./..."]);
        assert_eq!(container.env_variable(CGO_ENABLED), None);
    }

    #[test]
    fn test_verbose() {
        let container = test(&BaseClient, [verbose(true)]);
        assert_eq!(container.exec(), ["go", "test", "-v", "./..."]);
    }

    #[test]
    fn test_race_detector_enables_cgo() {
        let container = test(&BaseClient, [enable_race_detector()]);

        assert_eq!(container.exec(), ["go", "test", "-race", "./..."]);
        assert_eq!(container.env_variable(CGO_ENABLED), Some("1"));
    }

    #[test]
    fn test_race_detector_overrides_disabled_cgo() {
        for opts in [
            vec![TestOption::from(disable_cgo()), enable_race_detector()],
            vec![enable_race_detector(), TestOption::from(disable_cgo())],
            vec![TestOption::from(enable_cgo()), enable_race_detector()],
        ] {
            let container = test(&BaseClient, opts);
            assert_eq!(container.env_variable(CGO_ENABLED), Some("1"));
        }
    }

    #[test]
    fn test_coverage() {
        let opts = [cover_mode(CoverMode::Count), cover_profile("cover.out")];
        let container = test(&BaseClient, opts);

        assert_eq!(
            container.exec(),
            [
                "go",
                "test",
                "-covermode",
                "count",
                "-coverprofile",
                "cover.out",
                "./..."
            ]
        );
    }

    #[test]
    fn test_each_valid_cover_mode_rendered() {
        for mode in [CoverMode::Set, CoverMode::Count, CoverMode::Atomic] {
            let container = test(&BaseClient, [mode]);
            assert_eq!(
                container.exec(),
                ["go", "test", "-covermode", mode.as_str(), "./..."]
            );
        }
    }

    #[test]
    fn test_undefined_cover_mode_dropped() {
        let container = test(&BaseClient, [CoverMode::Count, CoverMode::Undefined]);

        assert!(!container.exec().iter().any(|arg| arg == "-covermode"));
    }

    #[test]
    fn test_flag_order_is_stable() {
        let container = test(
            &BaseClient,
            [
                cover_profile("c.out"),
                CoverMode::Atomic.into(),
                enable_race_detector(),
                verbose(true),
            ],
        );

        assert_eq!(
            container.exec(),
            [
                "go",
                "test",
                "-v",
                "-race",
                "-covermode",
                "atomic",
                "-coverprofile",
                "c.out",
                "./..."
            ]
        );
    }

    #[test]
    fn test_common_options_reach_base() {
        let root = TestOption::from(project_root("./testdata/test"));
        let container = test(&BaseClient, [root]);

        assert_eq!(
            container.directories().get("/src").map(Directory::path),
            Some("./testdata/test")
        );
    }

    #[test]
    fn test_same_options_yield_same_plan() {
        let opts = vec![verbose(true), enable_race_detector(), CoverMode::Set.into()];

        assert_eq!(test(&BaseClient, &opts), test(&BaseClient, &opts));
    }
}
