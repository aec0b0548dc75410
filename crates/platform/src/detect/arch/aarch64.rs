// ─────────────────────────────────────────────────────────────────────────────
// aarch64 Detection
// ─────────────────────────────────────────────────────────────────────────────

use crate::caps::Caps;

/// NEON is part of the aarch64 base ISA, so `caps_static()` already reports
/// it. The runtime query confirms it on hosted targets and adds nothing else.
#[cfg(feature = "std")]
pub(in crate::detect) fn runtime() -> Caps {
  if std::arch::is_aarch64_feature_detected!("neon") {
    crate::caps::aarch64::NEON
  } else {
    Caps::NONE
  }
}

#[cfg(not(feature = "std"))]
pub(in crate::detect) fn runtime() -> Caps {
  Caps::NONE
}
