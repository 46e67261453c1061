//! Environment variants.
//!
//! Each transform takes an environment by value and returns the modified
//! one. Transforms only touch tool fields, so they never move an environment
//! to a different build directory.

use super::types::Environment;

const SANITIZE_FLAGS: &str = "-fsanitize=address -fsanitize=undefined";

/// Route C and C++ compiles through `ccache`.
pub fn enable_cache(mut env: Environment) -> Environment {
  env.cc = format!("ccache {}", env.cc);
  env.cxx = format!("ccache {}", env.cxx);
  env
}

/// Build and link with the address and undefined-behaviour sanitizers.
pub fn enable_sanitizer(mut env: Environment) -> Environment {
  for flags in [&mut env.cflags, &mut env.cxxflags, &mut env.ldflags] {
    flags.push(' ');
    flags.push_str(SANITIZE_FLAGS);
  }
  env
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::env::fingerprint;
  use crate::testutil::host_env;

  #[test]
  fn cache_prefixes_compilers_only() {
    let env = enable_cache(host_env());

    assert_eq!(env.cc, "ccache clang");
    assert_eq!(env.cxx, "ccache clang++");
    assert_eq!(env.ld, "clang++");
  }

  #[test]
  fn sanitizer_appends_to_all_flag_sets() {
    let env = enable_sanitizer(host_env());

    for flags in [&env.cflags, &env.cxxflags, &env.ldflags] {
      assert!(flags.ends_with("-fsanitize=address -fsanitize=undefined"));
    }
    assert!(env.asflags.is_empty());
  }

  #[test]
  fn transforms_compose_and_leave_source_untouched() {
    let base = host_env();
    let both = enable_sanitizer(enable_cache(base.clone()));

    assert_eq!(base, host_env());
    assert_eq!(both.cc, "ccache clang");
    assert!(both.cflags.contains("-fsanitize=address"));
  }

  #[test]
  fn transforms_keep_fingerprint() {
    let base = host_env();
    let both = enable_sanitizer(enable_cache(base.clone()));

    assert_eq!(fingerprint(&base), fingerprint(&both));
  }
}
