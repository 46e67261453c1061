//! Names and fixed values shared across the pipeline.

pub const APP_NAME: &str = "sk";

/// File name that marks a directory as a component.
pub const MANIFEST_FILENAME: &str = "manifest.json";

/// Default build root, relative to the project root.
pub const BUILD_DIR: &str = ".build";

/// Default cache root, relative to the project root.
pub const CACHE_DIR: &str = ".cache";

/// Leading path component replaced by the object directory when mapping sources to objects.
pub const SOURCE_ROOT: &str = "src";

pub const TESTS_DIR: &str = "tests";
pub const ASSETS_DIR: &str = "assets";

/// Id of the component that aggregates every other component's tests into one binary.
pub const TESTS_COMPONENT: &str = "tests";

/// Number of fingerprint characters used to name an environment's build directory.
pub const ENV_HASH_PREFIX_LEN: usize = 8;

pub const NINJA_FILENAME: &str = "build.ninja";
pub const BUILD_JSON_FILENAME: &str = "build.json";
pub const ENV_JSON_FILENAME: &str = "env.json";

pub const OBJ_SUFFIX: &str = ".o";
pub const LIB_SUFFIX: &str = ".a";
pub const EXE_SUFFIX: &str = ".elf";

/// Executor invoked when `SK_NINJA` is not set.
pub const DEFAULT_NINJA: &str = "ninja";
