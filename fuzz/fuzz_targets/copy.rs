//! Differential fuzzing of `copy_bytes` against the source bytes.
//!
//! Every kernel the host can run is checked, plus the dispatched entry point
//! at arbitrary alignments with guard bytes on both sides.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use memops::kernel_test::{run_all_copy_kernels, verify_kernel_agreement};

const GUARD: usize = 64;

#[derive(Arbitrary, Debug)]
struct Input {
  data: Vec<u8>,
  dst_align: u8,
}

fuzz_target!(|input: Input| {
  let results = run_all_copy_kernels(&input.data);
  if let Err(e) = verify_kernel_agreement(&results) {
    panic!("{e} (len={})", input.data.len());
  }

  let len = input.data.len();
  let align = usize::from(input.dst_align % 64);
  let mut dst = vec![0xA5u8; GUARD + align + len + GUARD];
  let at = GUARD + align;

  // SAFETY: `len` bytes at `at` fit inside `dst`; `data` is a separate allocation.
  let ret = unsafe { memops::copy_bytes(dst.as_mut_ptr().add(at), input.data.as_ptr(), len) };

  assert_eq!(ret, dst.as_mut_ptr().wrapping_add(at), "copy_bytes returned the wrong pointer");
  assert_eq!(&dst[at..at + len], &input.data[..], "copy_bytes content mismatch, len={len}");
  assert!(
    dst[..at].iter().chain(&dst[at + len..]).all(|&b| b == 0xA5),
    "copy_bytes wrote outside its range, len={len} align={align}"
  );
});
