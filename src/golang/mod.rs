//! Go pipelines
//!
//! Each pipeline kind has a configuration record, a set of options that can
//! target it, and a function turning the options into a [`Container`]
//! description:
//!
//! - [`base()`]: Go image with build/module caches and the project mounted
//! - [`test()`]: `go test` on top of the base container
//! - [`lint()`]: `golangci-lint` copied into the base container
//!
//! [`Container`]: crate::client::Container

pub mod base;
pub mod lint;
pub mod options;
pub mod test;

pub use base::{base, build_cache_key, cache_namespace, module_cache_key};
pub use lint::lint;
pub use options::{
    ApplyTo, BaseOptions, CommonOption, LintOption, LintOptions, TestOption, TestOptions, apply,
    base_image, base_image_repository, base_image_tag, cover_mode, cover_profile, disable_cgo,
    enable_cgo, enable_race_detector, linter_version, project_root, source_image,
    source_image_repository, source_image_tag, verbose, version,
};
pub use test::{CoverMode, ParseCoverModeError, test};
