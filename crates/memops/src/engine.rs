//! Chunked transfer engine shared by every tier.
//!
//! A transfer of `n` bytes is decomposed greedily:
//!
//! 1. groups of four `V`-byte chunks while at least `4 * V` bytes remain
//! 2. single `V`-byte chunks while at least `V` bytes remain
//! 3. at most one chunk each of 32, 16, 8, 4, 2, 1 bytes
//!
//! Forward transfers move low to high, advancing after each chunk. Backward
//! transfers start one past the end and retreat *before* each chunk, so the
//! highest remaining chunk is always the next one written.
//!
//! Each chunk is one unaligned load of the whole chunk followed by one
//! unaligned store. Inlined into a `#[target_feature]` wrapper, a `V`-byte
//! chunk lowers to that tier's vector load/store.

use core::ptr;

/// Order in which chunks are transferred.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
  /// Low to high addresses.
  #[default]
  Forward,
  /// High to low addresses. Required when `dst` overlaps `src` from above.
  Backward,
}

/// Move exactly `N` bytes from `src` to `dst` as one load and one store.
///
/// Never routed through `copy_bytes`/`move_bytes` or `core::ptr::copy*`.
/// The whole chunk is read before any of it is written, so `dst` and `src`
/// may overlap within the chunk.
///
/// # Safety
///
/// `src` must be valid for reads of `N` bytes and `dst` valid for writes of
/// `N` bytes. No alignment is required.
#[inline(always)]
pub(crate) unsafe fn transfer<const N: usize>(dst: *mut u8, src: *const u8) {
  // SAFETY: caller guarantees both ranges are valid; unaligned access is used.
  unsafe {
    let chunk = ptr::read_unaligned(src.cast::<[u8; N]>());
    ptr::write_unaligned(dst.cast::<[u8; N]>(), chunk);
  }
}

/// Working pointers for one transfer.
struct Cursor {
  dst: *mut u8,
  src: *const u8,
  remaining: usize,
}

impl Cursor {
  /// Transfer one `N`-byte chunk in direction `BACKWARD`.
  ///
  /// # Safety
  ///
  /// `remaining >= N`, and the chunk adjacent to the cursor (above it when
  /// forward, below it when backward) lies inside the caller's ranges.
  #[inline(always)]
  unsafe fn step<const N: usize, const BACKWARD: bool>(&mut self) {
    // SAFETY: caller guarantees the chunk is in bounds.
    unsafe {
      if BACKWARD {
        self.dst = self.dst.sub(N);
        self.src = self.src.sub(N);
        transfer::<N>(self.dst, self.src);
      } else {
        transfer::<N>(self.dst, self.src);
        self.dst = self.dst.add(N);
        self.src = self.src.add(N);
      }
    }
    self.remaining -= N;
  }

  /// Transfer one `N`-byte chunk if at least `N` bytes remain.
  ///
  /// # Safety
  ///
  /// The cursor's remaining range is valid.
  #[inline(always)]
  unsafe fn tail<const N: usize, const BACKWARD: bool>(&mut self) {
    if self.remaining >= N {
      // SAFETY: `remaining >= N` keeps the chunk inside the remaining range.
      unsafe { self.step::<N, BACKWARD>() };
    }
  }
}

#[inline(always)]
unsafe fn run_in<const V: usize, const BACKWARD: bool>(dst: *mut u8, src: *const u8, n: usize) {
  let mut cursor = if BACKWARD {
    // SAFETY: one-past-the-end of valid `n`-byte ranges.
    unsafe {
      Cursor {
        dst: dst.add(n),
        src: src.add(n),
        remaining: n,
      }
    }
  } else {
    Cursor { dst, src, remaining: n }
  };

  // SAFETY: every step is guarded by `remaining`, which starts at `n` and
  // shrinks by exactly the bytes each step consumes.
  unsafe {
    while cursor.remaining >= 4 * V {
      cursor.step::<V, BACKWARD>();
      cursor.step::<V, BACKWARD>();
      cursor.step::<V, BACKWARD>();
      cursor.step::<V, BACKWARD>();
    }

    while cursor.remaining >= V {
      cursor.step::<V, BACKWARD>();
    }

    cursor.tail::<32, BACKWARD>();
    cursor.tail::<16, BACKWARD>();
    cursor.tail::<8, BACKWARD>();
    cursor.tail::<4, BACKWARD>();
    cursor.tail::<2, BACKWARD>();
    cursor.tail::<1, BACKWARD>();
  }

  debug_assert_eq!(cursor.remaining, 0);
}

/// Transfer `n` bytes with vector width `V`, returning the original `dst`.
///
/// # Safety
///
/// - `src` valid for reads and `dst` valid for writes of `n` bytes.
/// - With [`Direction::Forward`], either the ranges are disjoint or
///   `dst < src`.
/// - With [`Direction::Backward`], either the ranges are disjoint or
///   `dst > src`.
#[inline(always)]
pub(crate) unsafe fn run<const V: usize>(dst: *mut u8, src: *const u8, n: usize, direction: Direction) -> *mut u8 {
  const { assert!(V.is_power_of_two() && V >= 16) };
  // SAFETY: forwarded from the caller.
  unsafe {
    match direction {
      Direction::Forward => run_in::<V, false>(dst, src, n),
      Direction::Backward => run_in::<V, true>(dst, src, n),
    }
  }
  dst
}
