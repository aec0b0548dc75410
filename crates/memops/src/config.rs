//! Runtime configuration (tier cap override).
//!
//! The `MEMOPS_FORCE` environment variable caps the tier the dispatcher may
//! use. It is read once, with `std`; without `std` the cap is always `auto`.
//!
//! | Value | Cap |
//! |-------|-----|
//! | `auto` (or unset) | none |
//! | `portable`, `scalar`, `none`, `tier0` | scalar |
//! | `sse2`, `neon`, `v128`, `tier1` | 16-byte vectors |
//! | `avx2`, `v256`, `tier2` | 32-byte vectors |
//! | `avx512`, `v512`, `tier3` | 64-byte vectors |
//!
//! Safety note: a cap is always clamped to the certified tier. Forcing can
//! lower the tier but never raise it.

use core::fmt;

use backend::{VectorTier, tier};

/// Environment variable holding the tier cap.
pub const ENV_FORCE: &str = "MEMOPS_FORCE";

/// Requested tier cap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MemopsForce {
  /// Use the certified tier.
  #[default]
  Auto,
  /// Use at most this tier.
  Cap(VectorTier),
}

impl MemopsForce {
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Auto => "auto",
      Self::Cap(tier) => tier.name(),
    }
  }

  /// Parse an override value. Empty or unrecognized input yields `None`.
  #[must_use]
  pub fn parse(value: &str) -> Option<Self> {
    let value = value.trim();
    if value.is_empty() {
      return None;
    }
    if value.eq_ignore_ascii_case("auto") {
      return Some(Self::Auto);
    }
    value.parse::<VectorTier>().ok().map(Self::Cap)
  }

  /// Tier this request allows given the certified tier.
  #[inline]
  #[must_use]
  pub const fn clamp(self, certified: VectorTier) -> VectorTier {
    match self {
      Self::Auto => certified,
      Self::Cap(cap) => cap.min(certified),
    }
  }
}

impl fmt::Display for MemopsForce {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Full memops configuration (after applying overrides).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemopsConfig {
  /// Requested cap (environment).
  pub requested: MemopsForce,
  /// Tier the dispatcher uses: the request clamped to the certified tier.
  pub effective: VectorTier,
}

#[cfg(feature = "std")]
fn read_env_force() -> MemopsForce {
  let Ok(value) = std::env::var(ENV_FORCE) else {
    return MemopsForce::Auto;
  };

  match MemopsForce::parse(&value) {
    Some(force) => force,
    None => {
      #[cfg(feature = "log")]
      if !value.trim().is_empty() {
        log::warn!("{ENV_FORCE}={value:?} is not a tier; using auto");
      }
      MemopsForce::Auto
    }
  }
}

#[cfg(feature = "std")]
fn requested() -> MemopsForce {
  use std::sync::OnceLock;
  static FORCE: OnceLock<MemopsForce> = OnceLock::new();
  *FORCE.get_or_init(read_env_force)
}

#[cfg(not(feature = "std"))]
fn requested() -> MemopsForce {
  MemopsForce::Auto
}

/// Current configuration.
#[must_use]
pub fn get() -> MemopsConfig {
  let requested = requested();
  MemopsConfig {
    requested,
    effective: requested.clamp(tier::detect()),
  }
}

/// Tier source for the process-wide dispatcher.
pub(crate) fn effective_tier() -> VectorTier {
  get().effective
}
