// ─────────────────────────────────────────────────────────────────────────────
// x86/x86_64 Detection
// ─────────────────────────────────────────────────────────────────────────────
//
// Two interchangeable runtime queries, one chosen at build time:
//
// - `std`: the standard library's feature query, which already folds in the
//   OS register-state checks.
// - `no_std` on x86_64: raw CPUID + XGETBV.
//
// Callers only ever see `runtime()`.

use crate::caps::Caps;

/// Runtime-detected vector features.
#[cfg(feature = "std")]
pub(in crate::detect) fn runtime() -> Caps {
  use crate::caps::x86;

  let mut caps = Caps::NONE;

  if std::arch::is_x86_feature_detected!("sse2") {
    caps |= x86::SSE2;
  }
  if std::arch::is_x86_feature_detected!("avx") {
    caps |= x86::AVX;
  }
  if std::arch::is_x86_feature_detected!("avx2") {
    caps |= x86::AVX2;
  }
  if std::arch::is_x86_feature_detected!("avx512f") {
    caps |= x86::AVX512F;
  }

  caps
}

#[cfg(all(not(feature = "std"), target_arch = "x86_64"))]
pub(in crate::detect) fn runtime() -> Caps {
  cpuid_caps()
}

/// 32-bit x86 without `std` cannot assume CPUID exists; stay on compile-time features.
#[cfg(all(not(feature = "std"), target_arch = "x86"))]
pub(in crate::detect) fn runtime() -> Caps {
  Caps::NONE
}

/// CPUID leaf 1 and leaf 7 feature bits.
#[cfg(all(target_arch = "x86_64", any(not(feature = "std"), test)))]
mod bits {
  /// Leaf 1, EDX: SSE2.
  pub const EDX1_SSE2: u32 = 1 << 26;
  /// Leaf 1, ECX: OS has enabled XSAVE/XGETBV.
  pub const ECX1_OSXSAVE: u32 = 1 << 27;
  /// Leaf 1, ECX: AVX.
  pub const ECX1_AVX: u32 = 1 << 28;
  /// Leaf 7.0, EBX: AVX2.
  pub const EBX7_AVX2: u32 = 1 << 5;
  /// Leaf 7.0, EBX: AVX-512 Foundation.
  pub const EBX7_AVX512F: u32 = 1 << 16;

  /// XCR0: XMM + YMM state.
  pub const XCR0_AVX_MASK: u64 = 0x6;
  /// XCR0: opmask + ZMM_Hi256 + Hi16_ZMM state.
  pub const XCR0_AVX512_MASK: u64 = 0xE0;
}

/// Raw register values the decoder needs.
#[cfg(all(target_arch = "x86_64", any(not(feature = "std"), test)))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(in crate::detect) struct CpuidRegs {
  pub max_leaf: u32,
  pub ecx1: u32,
  pub edx1: u32,
  pub ebx7: u32,
  pub xcr0: u64,
}

/// Feature detection straight from CPUID, gated on OS register-state support.
///
/// CPUID reports what the silicon implements; XCR0 reports what the OS will
/// save and restore on a context switch. Both must agree before a wide
/// register file is usable.
#[cfg(all(target_arch = "x86_64", any(not(feature = "std"), test)))]
#[allow(unused_unsafe)] // `__cpuid*` became safe on newer toolchains
pub(in crate::detect) fn cpuid_caps() -> Caps {
  use core::arch::x86_64::{__cpuid, __cpuid_count, _xgetbv};

  // SAFETY: CPUID is available on every x86_64 processor.
  let leaf0 = unsafe { __cpuid(0) };
  // SAFETY: as above.
  let leaf1 = unsafe { __cpuid(1) };

  let ebx7 = if leaf0.eax >= 7 {
    // SAFETY: leaf 7 is within the reported maximum leaf.
    unsafe { __cpuid_count(7, 0) }.ebx
  } else {
    0
  };

  let xcr0 = if leaf1.ecx & bits::ECX1_OSXSAVE != 0 {
    // SAFETY: XGETBV is defined when OSXSAVE is set (checked above).
    unsafe { _xgetbv(0) }
  } else {
    0
  };

  decode(CpuidRegs {
    max_leaf: leaf0.eax,
    ecx1: leaf1.ecx,
    edx1: leaf1.edx,
    ebx7,
    xcr0,
  })
}

/// Turn raw CPUID/XCR0 values into capabilities.
///
/// Each tier's requirement is tested on its own; AVX2 needs the AVX bit, the
/// AVX2 bit and YMM state all at once, never a combination of partial sums.
#[cfg(all(target_arch = "x86_64", any(not(feature = "std"), test)))]
pub(in crate::detect) const fn decode(regs: CpuidRegs) -> Caps {
  use crate::caps::x86;

  let mut caps = Caps::NONE;

  if regs.edx1 & bits::EDX1_SSE2 != 0 {
    caps = caps.union(x86::SSE2);
  }

  let osxsave = regs.ecx1 & bits::ECX1_OSXSAVE != 0;
  let os_avx = osxsave && (regs.xcr0 & bits::XCR0_AVX_MASK) == bits::XCR0_AVX_MASK;
  let os_avx512 = os_avx && (regs.xcr0 & bits::XCR0_AVX512_MASK) == bits::XCR0_AVX512_MASK;

  if os_avx && regs.ecx1 & bits::ECX1_AVX != 0 {
    caps = caps.union(x86::AVX);
  }

  let ebx7 = if regs.max_leaf >= 7 { regs.ebx7 } else { 0 };

  if os_avx && regs.ecx1 & bits::ECX1_AVX != 0 && ebx7 & bits::EBX7_AVX2 != 0 {
    caps = caps.union(x86::AVX2);
  }
  if os_avx512 && ebx7 & bits::EBX7_AVX512F != 0 {
    caps = caps.union(x86::AVX512F);
  }

  caps
}
