//! Go pipeline options
//!
//! Options are small values that each set one field of a configuration
//! record. Which records an option can target is expressed by the
//! [`ApplyTo`] implementations it has:
//!
//! - [`CommonOption`] applies to base, test and lint records
//! - [`TestOption`] and [`CoverMode`] apply to test records
//! - [`LintOption`] applies to lint records
//!
//! Records are built by folding options left to right; a later option
//! overwrites whatever an earlier one set for the same field.

#![allow(clippy::must_use_candidate)]

use super::test::CoverMode;

/// Configuration shared by every Go pipeline kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BaseOptions {
    /// Image repository without tag or digest
    pub base_image_repository: Option<String>,

    /// Tag within the image repository
    pub base_image_tag: Option<String>,

    /// Full image reference; wins over repository and tag
    pub base_image: Option<String>,

    /// Project root on the host
    pub project_root: Option<String>,

    /// `None` leaves `CGO_ENABLED` to the toolchain default
    pub cgo_enabled: Option<bool>,
}

/// Configuration for `go test`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestOptions {
    /// Shared base configuration
    pub base: BaseOptions,

    /// Pass `-v`
    pub verbose: bool,

    /// Pass `-race`; forces cgo on
    pub race_detector: bool,

    /// Coverage mode; dropped when not valid
    pub cover_mode: CoverMode,

    /// Coverage profile output path
    pub cover_profile: Option<String>,
}

/// Configuration for `golangci-lint`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LintOptions {
    /// Shared base configuration
    pub base: BaseOptions,

    /// Repository of the image the linter binary is taken from
    pub source_image_repository: Option<String>,

    /// Tag of the linter source image
    pub source_image_tag: Option<String>,

    /// Full linter source image reference; wins over repository and tag
    pub source_image: Option<String>,
}

/// Capability of an option to mutate a record of type `R`
pub trait ApplyTo<R> {
    /// Applies this option to `record`
    fn apply_to(&self, record: &mut R);
}

impl<R, O: ApplyTo<R> + ?Sized> ApplyTo<R> for &O {
    fn apply_to(&self, record: &mut R) {
        (**self).apply_to(record);
    }
}

/// Folds `opts` left to right into an empty record.
pub fn apply<R, I>(opts: I) -> R
where
    R: Default,
    I: IntoIterator,
    I::Item: ApplyTo<R>,
{
    opts.into_iter().fold(R::default(), |mut record, opt| {
        opt.apply_to(&mut record);
        record
    })
}

/// Option valid for every pipeline kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommonOption {
    /// Base image repository
    BaseImageRepository(String),
    /// Base image tag
    BaseImageTag(String),
    /// Full base image reference
    BaseImage(String),
    /// Explicit `CGO_ENABLED` value
    Cgo(bool),
    /// Project root on the host
    ProjectRoot(String),
}

impl ApplyTo<BaseOptions> for CommonOption {
    fn apply_to(&self, record: &mut BaseOptions) {
        match self {
            Self::BaseImageRepository(v) => record.base_image_repository = Some(v.clone()),
            Self::BaseImageTag(v) => record.base_image_tag = Some(v.clone()),
            Self::BaseImage(v) => record.base_image = Some(v.clone()),
            Self::Cgo(v) => record.cgo_enabled = Some(*v),
            Self::ProjectRoot(v) => record.project_root = Some(v.clone()),
        }
    }
}

impl ApplyTo<TestOptions> for CommonOption {
    fn apply_to(&self, record: &mut TestOptions) {
        self.apply_to(&mut record.base);
    }
}

impl ApplyTo<LintOptions> for CommonOption {
    fn apply_to(&self, record: &mut LintOptions) {
        self.apply_to(&mut record.base);
    }
}

/// Option valid for test pipelines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestOption {
    /// Any common option
    Common(CommonOption),
    /// Verbose output
    Verbose(bool),
    /// Race detector
    RaceDetector,
    /// Coverage mode
    CoverMode(CoverMode),
    /// Coverage profile output path
    CoverProfile(String),
}

impl ApplyTo<TestOptions> for TestOption {
    fn apply_to(&self, record: &mut TestOptions) {
        match self {
            Self::Common(opt) => opt.apply_to(record),
            Self::Verbose(v) => record.verbose = *v,
            Self::RaceDetector => record.race_detector = true,
            Self::CoverMode(mode) => mode.apply_to(record),
            Self::CoverProfile(v) => record.cover_profile = Some(v.clone()),
        }
    }
}

impl ApplyTo<TestOptions> for CoverMode {
    fn apply_to(&self, record: &mut TestOptions) {
        record.cover_mode = *self;
    }
}

impl From<CommonOption> for TestOption {
    fn from(opt: CommonOption) -> Self {
        Self::Common(opt)
    }
}

impl From<CoverMode> for TestOption {
    fn from(mode: CoverMode) -> Self {
        Self::CoverMode(mode)
    }
}

/// Option valid for lint pipelines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LintOption {
    /// Any common option
    Common(CommonOption),
    /// Linter source image repository
    SourceImageRepository(String),
    /// Linter source image tag
    SourceImageTag(String),
    /// Full linter source image reference
    SourceImage(String),
}

impl ApplyTo<LintOptions> for LintOption {
    fn apply_to(&self, record: &mut LintOptions) {
        match self {
            Self::Common(opt) => opt.apply_to(record),
            Self::SourceImageRepository(v) => record.source_image_repository = Some(v.clone()),
            Self::SourceImageTag(v) => record.source_image_tag = Some(v.clone()),
            Self::SourceImage(v) => record.source_image = Some(v.clone()),
        }
    }
}

impl From<CommonOption> for LintOption {
    fn from(opt: CommonOption) -> Self {
        Self::Common(opt)
    }
}

/// Image repository to use as base image, without tag or digest.
///
/// Ignored when a full reference is given with [`base_image`].
pub fn base_image_repository(v: impl Into<String>) -> CommonOption {
    CommonOption::BaseImageRepository(v.into())
}

/// Tag of the base image repository.
///
/// Ignored when a full reference is given with [`base_image`].
pub fn base_image_tag(v: impl Into<String>) -> CommonOption {
    CommonOption::BaseImageTag(v.into())
}

/// Alias of [`base_image_tag`].
pub fn version(v: impl Into<String>) -> CommonOption {
    base_image_tag(v)
}

/// Full base image reference.
pub fn base_image(v: impl Into<String>) -> CommonOption {
    CommonOption::BaseImage(v.into())
}

/// Sets `CGO_ENABLED=1`.
pub fn enable_cgo() -> CommonOption {
    CommonOption::Cgo(true)
}

/// Sets `CGO_ENABLED=0`.
pub fn disable_cgo() -> CommonOption {
    CommonOption::Cgo(false)
}

/// Project root on the host, relative or absolute.
pub fn project_root(v: impl Into<String>) -> CommonOption {
    CommonOption::ProjectRoot(v.into())
}

/// Enables or disables verbose test output.
pub fn verbose(v: bool) -> TestOption {
    TestOption::Verbose(v)
}

/// Enables the race detector. This also forces cgo on.
pub fn enable_race_detector() -> TestOption {
    TestOption::RaceDetector
}

/// Coverage mode for `go test`.
pub fn cover_mode(mode: CoverMode) -> TestOption {
    TestOption::CoverMode(mode)
}

/// Output file for coverage information.
pub fn cover_profile(v: impl Into<String>) -> TestOption {
    TestOption::CoverProfile(v.into())
}

/// Image repository the linter binary is taken from.
pub fn source_image_repository(v: impl Into<String>) -> LintOption {
    LintOption::SourceImageRepository(v.into())
}

/// Tag of the linter source image.
pub fn source_image_tag(v: impl Into<String>) -> LintOption {
    LintOption::SourceImageTag(v.into())
}

/// Alias of [`source_image_tag`].
pub fn linter_version(v: impl Into<String>) -> LintOption {
    source_image_tag(v)
}

/// Full linter source image reference.
pub fn source_image(v: impl Into<String>) -> LintOption {
    LintOption::SourceImage(v.into())
}
