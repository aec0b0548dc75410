use super::*;

#[test]
#[cfg(not(miri))] // Uses CPUID / OS queries
fn test_detect_uncached_consistent() {
  assert_eq!(detect_uncached(), detect_uncached());
}

#[test]
#[cfg(not(miri))]
fn test_cached_matches_uncached() {
  // An override set by another test would mask the cache; read the cache directly.
  assert_eq!(cached_or_detect(), detect_uncached());
  assert_eq!(cached_or_detect(), cached_or_detect());
}

#[test]
#[cfg(not(miri))]
fn test_cache_word_never_leaks_marker() {
  let caps = cached_or_detect();
  assert!(!caps.has_bit(63));
  assert_ne!(CACHED.load(Ordering::Relaxed) & COMPUTED, 0);
}

#[test]
#[cfg(not(miri))]
fn test_concurrent_first_use_agrees() {
  extern crate std;
  use std::{thread, vec::Vec};

  let handles: Vec<_> = (0..8).map(|_| thread::spawn(cached_or_detect)).collect();
  let expected = detect_uncached();
  for handle in handles {
    assert_eq!(handle.join().unwrap(), expected);
  }
}

#[test]
fn test_caps_static_is_const() {
  const STATIC_CAPS: Caps = caps_static();
  let _ = STATIC_CAPS;
}

#[test]
#[cfg(all(target_arch = "x86_64", not(miri)))]
fn test_x86_64_baseline() {
  use crate::caps::x86;
  assert!(caps_static().has(x86::SSE2));
  assert!(detect_uncached().has(x86::SSE2));
}

#[test]
#[cfg(all(target_arch = "aarch64", not(miri)))]
fn test_aarch64_baseline() {
  use crate::caps::aarch64;
  assert!(detect_uncached().has(aarch64::NEON));
}

#[test]
#[cfg(not(miri))]
fn test_runtime_includes_static() {
  assert!(detect_uncached().has(caps_static()));
}

// ─────────────────────────────────────────────────────────────────────────────
// Raw CPUID decoding
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(target_arch = "x86_64")]
mod cpuid {
  use super::super::arch::x86::{CpuidRegs, decode};
  use crate::caps::{Caps, x86};

  const SSE2: u32 = 1 << 26;
  const OSXSAVE: u32 = 1 << 27;
  const AVX: u32 = 1 << 28;
  const AVX2: u32 = 1 << 5;
  const AVX512F: u32 = 1 << 16;

  fn regs(ecx1: u32, edx1: u32, ebx7: u32, xcr0: u64) -> CpuidRegs {
    CpuidRegs {
      max_leaf: 0xD,
      ecx1,
      edx1,
      ebx7,
      xcr0,
    }
  }

  #[test]
  fn empty_registers_decode_to_none() {
    assert_eq!(decode(CpuidRegs::default()), Caps::NONE);
  }

  #[test]
  fn full_support_decodes_every_tier() {
    let caps = decode(regs(OSXSAVE | AVX, SSE2, AVX2 | AVX512F, 0xE6));
    assert!(caps.has(x86::SSE2));
    assert!(caps.has(x86::AVX2_READY));
    assert!(caps.has(x86::AVX512_READY));
  }

  #[test]
  fn avx2_requires_os_ymm_state() {
    let caps = decode(regs(OSXSAVE | AVX, SSE2, AVX2, 0x0));
    assert!(caps.has(x86::SSE2));
    assert!(!caps.has(x86::AVX));
    assert!(!caps.has(x86::AVX2));
  }

  #[test]
  fn avx2_requires_osxsave() {
    let caps = decode(regs(AVX, SSE2, AVX2, 0x6));
    assert!(!caps.has(x86::AVX2));
  }

  #[test]
  fn avx2_requires_avx_bit() {
    let caps = decode(regs(OSXSAVE, SSE2, AVX2, 0x6));
    assert!(!caps.has(x86::AVX2));
  }

  #[test]
  fn avx2_without_avx512_state() {
    let caps = decode(regs(OSXSAVE | AVX, SSE2, AVX2 | AVX512F, 0x6));
    assert!(caps.has(x86::AVX2_READY));
    assert!(!caps.has(x86::AVX512F));
  }

  #[test]
  fn leaf7_ignored_below_max_leaf() {
    let mut r = regs(OSXSAVE | AVX, SSE2, AVX2 | AVX512F, 0xE6);
    r.max_leaf = 6;
    let caps = decode(r);
    assert!(caps.has(x86::AVX));
    assert!(!caps.has(x86::AVX2));
    assert!(!caps.has(x86::AVX512F));
  }

  #[test]
  #[cfg(all(feature = "std", not(miri)))]
  fn raw_query_agrees_with_std_query() {
    use super::super::arch::x86::{cpuid_caps, runtime};
    assert_eq!(cpuid_caps(), runtime());
  }
}
