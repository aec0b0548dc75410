// ─────────────────────────────────────────────────────────────────────────────
// Compile-Time Static Detection
// ─────────────────────────────────────────────────────────────────────────────

use crate::caps::Caps;

/// Returns CPU capabilities known at compile time.
///
/// Detects features enabled via `-C target-feature=...` or `-C target-cpu=native`.
/// Returns a `const` value; the compiler eliminates all runtime checks.
///
/// # Examples
///
/// ```
/// const CAPS: platform::Caps = platform::caps_static();
///
/// // On x86_64, SSE2 is always present
/// #[cfg(target_arch = "x86_64")]
/// assert!(CAPS.has(platform::caps::x86::SSE2));
///
/// // On aarch64, NEON is always present
/// #[cfg(target_arch = "aarch64")]
/// assert!(CAPS.has(platform::caps::aarch64::NEON));
/// ```
#[inline(always)]
#[must_use]
pub const fn caps_static() -> Caps {
  #[allow(unused_macros)] // Only used on x86/x86_64
  macro_rules! detect {
    ($caps:ident; $($feature:literal => $cap:expr),+ $(,)?) => {
      $(if cfg!(target_feature = $feature) { $caps = $caps.union($cap); })+
    };
  }

  #[allow(unused_mut)]
  let mut result = Caps::NONE;

  #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
  {
    use crate::caps::x86;

    // x86_64 baseline: SSE2 is guaranteed
    #[cfg(target_arch = "x86_64")]
    {
      result = result.union(x86::SSE2);
    }

    detect!(result;
      "sse2" => x86::SSE2,
      "avx" => x86::AVX,
      "avx2" => x86::AVX2,
      "avx512f" => x86::AVX512F,
    );
  }

  #[cfg(target_arch = "aarch64")]
  {
    result = result.union(crate::caps::aarch64::NEON);
  }

  result
}
