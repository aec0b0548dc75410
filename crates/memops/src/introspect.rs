//! Dispatch introspection.
//!
//! Reports what the dispatcher decided without touching the copy hot path.
//!
//! ```
//! use memops::DispatchInfo;
//!
//! let info = DispatchInfo::current();
//! println!("{info}");
//! // Example output: "Caps(x86_64, [sse2, avx, avx2]) tier=v256 effective=v256 force=auto kernel=x86_64/avx2"
//! ```

use core::fmt;

use backend::{VectorTier, tier};
use platform::Caps;

use crate::config::{self, MemopsForce};

/// Snapshot of the dispatch decision for this process.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct DispatchInfo {
  caps: Caps,
  certified: VectorTier,
  requested: MemopsForce,
  effective: VectorTier,
  kernel: &'static str,
}

impl DispatchInfo {
  /// Returns dispatch info for the current process.
  ///
  /// Every input is memoized, so after the first call this is a handful of
  /// atomic loads.
  #[must_use]
  pub fn current() -> Self {
    let cfg = config::get();
    Self {
      caps: platform::caps(),
      certified: tier::detect(),
      requested: cfg.requested,
      effective: cfg.effective,
      kernel: crate::selected_backend(),
    }
  }

  /// Detected CPU capabilities.
  #[inline]
  #[must_use]
  pub const fn caps(&self) -> Caps {
    self.caps
  }

  /// Highest tier the processor supports.
  #[inline]
  #[must_use]
  pub const fn certified(&self) -> VectorTier {
    self.certified
  }

  /// Cap requested through `MEMOPS_FORCE`.
  #[inline]
  #[must_use]
  pub const fn requested(&self) -> MemopsForce {
    self.requested
  }

  /// Tier the dispatcher uses.
  #[inline]
  #[must_use]
  pub const fn effective(&self) -> VectorTier {
    self.effective
  }

  /// Selected kernel name.
  #[inline]
  #[must_use]
  pub const fn kernel(&self) -> &'static str {
    self.kernel
  }
}

impl fmt::Display for DispatchInfo {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{} tier={} effective={} force={} kernel={}",
      self.caps, self.certified, self.effective, self.requested, self.kernel
    )
  }
}

impl fmt::Debug for DispatchInfo {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("DispatchInfo")
      .field("caps", &format_args!("{}", self.caps))
      .field("certified", &self.certified)
      .field("requested", &self.requested)
      .field("effective", &self.effective)
      .field("kernel", &self.kernel)
      .finish()
  }
}

#[cfg(test)]
mod tests {
  extern crate std;

  use super::*;

  #[test]
  fn dispatch_info_display_names_kernel() {
    let info = DispatchInfo::current();
    let s = std::format!("{info}");
    assert!(s.contains(info.kernel()));
    assert!(s.contains("tier="));
  }

  #[test]
  fn dispatch_info_debug_not_empty() {
    let info = DispatchInfo::current();
    let s = std::format!("{info:?}");
    assert!(s.contains("DispatchInfo"));
  }

  #[test]
  fn dispatch_info_is_consistent() {
    let info = DispatchInfo::current();
    assert!(info.effective() <= info.certified());
    assert_eq!(info.requested().clamp(info.certified()), info.effective());
    assert_eq!(info, DispatchInfo::current());
  }
}
