//! A capability override reroutes dispatch immediately, even after the
//! kernel has been cached, and clearing it restores the detected kernel.
//!
//! Kept in its own binary: the override is process-wide.

use memops::{DispatchInfo, VectorTier, selected_backend};
use platform::Caps;

fn pattern(len: usize) -> Vec<u8> {
  (0..len).map(|i| ((i * 13 + 7) & 0xFF) as u8).collect()
}

fn copy_through_dispatch(src: &[u8]) -> Vec<u8> {
  let mut dst = vec![0u8; src.len()];
  // SAFETY: disjoint buffers of `src.len()` bytes.
  let ret = unsafe { memops::copy_bytes(dst.as_mut_ptr(), src.as_ptr(), src.len()) };
  assert_eq!(ret, dst.as_mut_ptr());
  dst
}

#[test]
fn override_none_selects_portable_until_cleared() {
  let src = pattern(1000);

  // Populate every cache first.
  let detected = selected_backend();
  let certified = backend::tier::detect();
  assert_eq!(copy_through_dispatch(&src), src);

  platform::set_caps_override(Some(Caps::NONE));
  assert!(platform::has_override());

  assert_eq!(backend::tier::detect(), VectorTier::Scalar);
  assert_eq!(selected_backend(), "portable");

  let info = DispatchInfo::current();
  assert_eq!(info.caps(), Caps::NONE);
  assert_eq!(info.certified(), VectorTier::Scalar);
  assert_eq!(info.effective(), VectorTier::Scalar);
  assert_eq!(info.kernel(), "portable");

  assert_eq!(copy_through_dispatch(&src), src);

  let mut buf = pattern(300);
  let mut expected = buf.clone();
  expected.copy_within(0..200, 37);
  let p = buf.as_mut_ptr();
  // SAFETY: both 200-byte ranges lie inside the 300-byte buffer.
  unsafe { memops::move_bytes(p.add(37), p, 200) };
  assert_eq!(buf, expected);

  platform::set_caps_override(None);
  assert!(!platform::has_override());
  assert_eq!(backend::tier::detect(), certified);
  assert_eq!(selected_backend(), detected);
  assert_eq!(DispatchInfo::current().certified(), certified);
}
