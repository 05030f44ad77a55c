//! `golangci-lint` pipeline
//!
//! The linter binary is copied out of a separate image into the Go base
//! container, so the linter and Go versions can be chosen independently.

use super::base::{base_container, resolve_image};
use super::options::{ApplyTo, LintOptions, apply};
use crate::client::{Client, Container};

/// Default linter source image repository
pub const DEFAULT_GOLANGCI_LINT_IMAGE_REPOSITORY: &str = "docker.io/golangci/golangci-lint";

/// Default linter source image tag
pub const DEFAULT_GOLANGCI_LINT_IMAGE_TAG: &str = "latest";

/// Path of the linter binary inside the source image
pub const GOLANGCI_LINT_SOURCE_PATH: &str = "/usr/bin/golangci-lint";

/// Path the linter binary is copied to in the Go container
pub const GOLANGCI_LINT_TARGET_PATH: &str = "/usr/local/bin/golangci-lint";

const LINT_COMMAND: [&str; 3] = ["golangci-lint", "run", "--verbose"];

impl LintOptions {
    /// Resolved linter source image reference
    #[must_use]
    pub fn source_image(&self) -> String {
        resolve_image(
            self.source_image.as_deref(),
            self.source_image_repository.as_deref(),
            self.source_image_tag.as_deref(),
            DEFAULT_GOLANGCI_LINT_IMAGE_REPOSITORY,
            DEFAULT_GOLANGCI_LINT_IMAGE_TAG,
        )
    }
}

/// Returns a container running `golangci-lint run --verbose` on the project.
#[must_use]
pub fn lint<C, I>(client: &C, opts: I) -> Container
where
    C: Client + ?Sized,
    I: IntoIterator,
    I::Item: ApplyTo<LintOptions>,
{
    let options: LintOptions = apply(opts);
    let source_image = options.source_image();

    tracing::debug!(source_image = %source_image, "Resolved golangci-lint source image");

    let bin = client
        .container()
        .from(source_image)
        .file(GOLANGCI_LINT_SOURCE_PATH);

    base_container(client, &options.base)
        .with_file(GOLANGCI_LINT_TARGET_PATH, bin)
        .with_exec(LINT_COMMAND)
}
