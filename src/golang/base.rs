//! Go base container
//!
//! Every Go pipeline starts from the same container: a Go image with the
//! build and module caches mounted and the project mounted at [`SOURCE_PATH`].

use super::options::{ApplyTo, BaseOptions, apply};
use crate::client::{Client, Container};
use sha2::{Digest, Sha256};

/// Default base image repository
pub const DEFAULT_BASE_IMAGE_REPOSITORY: &str = "docker.io/library/golang";

/// Default base image tag
pub const DEFAULT_BASE_IMAGE_TAG: &str = "latest";

/// Default project root on the host
pub const DEFAULT_PROJECT_ROOT: &str = ".";

/// Mount path of the Go build cache
pub const BUILD_CACHE_PATH: &str = "/root/.cache/go-build";

/// Mount path of the Go module cache
pub const MODULE_CACHE_PATH: &str = "/go/pkg/mod";

/// Mount path of the project source, also the working directory
pub const SOURCE_PATH: &str = "/src";

/// Environment variable controlling cgo
pub const CGO_ENABLED: &str = "CGO_ENABLED";

const BUILD_CACHE_PREFIX: &str = "go-build";
const MODULE_CACHE_PREFIX: &str = "go-mod";

/// Resolves an image reference: `image` wins, otherwise `repository:tag`
/// with the given defaults filling in unset parts. Empty values count as unset.
pub(crate) fn resolve_image(
    image: Option<&str>,
    repository: Option<&str>,
    tag: Option<&str>,
    default_repository: &str,
    default_tag: &str,
) -> String {
    if let Some(image) = non_empty(image) {
        return image.to_string();
    }

    let repository = non_empty(repository).unwrap_or(default_repository);
    let tag = non_empty(tag).unwrap_or(default_tag);

    format!("{repository}:{tag}")
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

impl BaseOptions {
    /// Resolved base image reference
    #[must_use]
    pub fn image(&self) -> String {
        resolve_image(
            self.base_image.as_deref(),
            self.base_image_repository.as_deref(),
            self.base_image_tag.as_deref(),
            DEFAULT_BASE_IMAGE_REPOSITORY,
            DEFAULT_BASE_IMAGE_TAG,
        )
    }

    /// Resolved project root
    #[must_use]
    pub fn project_root(&self) -> &str {
        non_empty(self.project_root.as_deref()).unwrap_or(DEFAULT_PROJECT_ROOT)
    }

    /// `CGO_ENABLED` value, or `None` when cgo was left unset
    #[must_use]
    pub fn cgo_value(&self) -> Option<&'static str> {
        self.cgo_enabled.map(|enabled| if enabled { "1" } else { "0" })
    }
}

/// Hex encoded SHA-256 of an image reference.
///
/// Used to namespace cache volumes per image, so distinct images never share
/// a cache and the same image always reuses its own.
#[must_use]
pub fn cache_namespace(image: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(image.as_bytes());
    format!("{:x}", hasher.finalize())
}

fn cache_key(prefix: &str, namespace: &str) -> String {
    format!("{prefix}-{namespace}")
}

/// Build cache volume key for an image reference
#[must_use]
pub fn build_cache_key(image: &str) -> String {
    cache_key(BUILD_CACHE_PREFIX, &cache_namespace(image))
}

/// Module cache volume key for an image reference
#[must_use]
pub fn module_cache_key(image: &str) -> String {
    cache_key(MODULE_CACHE_PREFIX, &cache_namespace(image))
}

/// Returns a Go container with caches and the project mounted.
///
/// It can be used as a starting point for more specific Go actions.
#[must_use]
pub fn base<C, I>(client: &C, opts: I) -> Container
where
    C: Client + ?Sized,
    I: IntoIterator,
    I::Item: ApplyTo<BaseOptions>,
{
    base_container(client, &apply(opts))
}

pub(crate) fn base_container<C: Client + ?Sized>(
    client: &C,
    options: &BaseOptions,
) -> Container {
    let image = options.image();
    let project_root = options.project_root();
    let namespace = cache_namespace(&image);
    let build_cache = client.cache_volume(&cache_key(BUILD_CACHE_PREFIX, &namespace));
    let module_cache = client.cache_volume(&cache_key(MODULE_CACHE_PREFIX, &namespace));

    tracing::debug!(
        image = %image,
        project_root = %project_root,
        cache_namespace = %namespace,
        "Resolved Go base container"
    );

    let container = client
        .container()
        .from(&image)
        .with_mounted_cache(BUILD_CACHE_PATH, build_cache)
        .with_mounted_cache(MODULE_CACHE_PATH, module_cache)
        .with_mounted_directory(SOURCE_PATH, client.host_directory(project_root))
        .with_workdir(SOURCE_PATH);

    match options.cgo_value() {
        Some(value) => container.with_env_variable(CGO_ENABLED, value),
        None => container,
    }
}
