extern crate std;

use std::vec::Vec;

use backend::VectorTier;
use proptest::prelude::*;

use super::*;

fn bytes(max: usize) -> impl Strategy<Value = Vec<u8>> {
  proptest::collection::vec(any::<u8>(), 0..=max)
}

proptest! {
  #[test]
  fn copy_matches_source(data in bytes(4096), align_src in 0usize..64, align_dst in 0usize..64) {
    let mut src = std::vec![0u8; data.len() + 64];
    src[align_src..align_src + data.len()].copy_from_slice(&data);
    let mut dst = std::vec![0xCCu8; data.len() + 128];

    let d = dst.as_mut_ptr().wrapping_add(align_dst);
    // SAFETY: both ranges fit in their buffers and the buffers are disjoint.
    let ret = unsafe { copy_bytes(d, src.as_ptr().add(align_src), data.len()) };

    prop_assert_eq!(ret, d);
    prop_assert_eq!(&dst[align_dst..align_dst + data.len()], &data[..]);
    prop_assert!(dst[..align_dst].iter().all(|&b| b == 0xCC));
    prop_assert!(dst[align_dst + data.len()..].iter().all(|&b| b == 0xCC));
  }

  #[test]
  fn move_matches_copy_within(data in bytes(2048), src in 0usize..2048, dst in 0usize..2048, len in 0usize..2048) {
    let n = data.len();
    let src = src % (n + 1);
    let dst = dst % (n + 1);
    let len = len % (n - src.max(dst) + 1);

    let mut ours = data.clone();
    let mut expected = data;
    expected.copy_within(src..src + len, dst);

    let base = ours.as_mut_ptr();
    // SAFETY: `src + len` and `dst + len` are at most `n`.
    let ret = unsafe { move_bytes(base.add(dst), base.add(src), len) };

    prop_assert_eq!(ret, base.wrapping_add(dst));
    prop_assert_eq!(ours, expected);
  }

  #[test]
  fn capped_tiers_match_dispatch(data in bytes(1024), offset in 1usize..128, tier in 0u8..4) {
    let tier = VectorTier::from_u8(tier).unwrap_or_default();
    let n = data.len();
    let mut buf = std::vec![0u8; n + offset];
    buf[..n].copy_from_slice(&data);

    let mut capped = buf.clone();
    let base = buf.as_mut_ptr();
    let capped_base = capped.as_mut_ptr();
    // SAFETY: both moves stay inside their `n + offset` byte buffers.
    unsafe {
      move_bytes(base.add(offset), base, n);
      move_bytes_with_tier(tier, capped_base.add(offset), capped_base, n);
    }

    prop_assert_eq!(&buf[offset..], &data[..]);
    prop_assert_eq!(capped, buf);
  }

  #[test]
  fn slice_copy_within_matches_core(data in bytes(512), a in 0usize..512, b in 0usize..512, dest in 0usize..512) {
    let n = data.len();
    let (a, b) = (a % (n + 1), b % (n + 1));
    let (start, end) = (a.min(b), a.max(b));
    let dest = dest % (n - (end - start) + 1);

    let mut ours = data.clone();
    let mut expected = data;
    copy_within(&mut ours, start..end, dest);
    expected.copy_within(start..end, dest);
    prop_assert_eq!(ours, expected);
  }
}
