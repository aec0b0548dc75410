//! Differential fuzzing of `move_bytes` against `<[u8]>::copy_within`.
//!
//! Source and destination offsets are arbitrary, so most inputs overlap.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use memops::kernel_test::{run_all_move_kernels, verify_kernel_agreement};

#[derive(Arbitrary, Debug)]
struct Input {
  buf: Vec<u8>,
  src: u16,
  dst: u16,
  len: u16,
}

fuzz_target!(|input: Input| {
  let n = input.buf.len();
  let src = usize::from(input.src) % (n + 1);
  let dst = usize::from(input.dst) % (n + 1);
  let len = usize::from(input.len) % (n - src.max(dst) + 1);

  let Some(results) = run_all_move_kernels(&input.buf, src, dst, len) else {
    panic!("in-bounds move rejected: src={src} dst={dst} len={len} n={n}");
  };
  if let Err(e) = verify_kernel_agreement(&results) {
    panic!("{e} (src={src} dst={dst} len={len})");
  }

  // Dispatched entry point and safe wrapper agree with the reference.
  let mut ours = input.buf.clone();
  let base = ours.as_mut_ptr();
  // SAFETY: both ranges end at or before `n`.
  let ret = unsafe { memops::move_bytes(base.add(dst), base.add(src), len) };
  assert_eq!(ret, base.wrapping_add(dst), "move_bytes returned the wrong pointer");
  assert_eq!(ours, results[0].output, "move_bytes mismatch: src={src} dst={dst} len={len}");

  let mut wrapped = input.buf.clone();
  memops::copy_within(&mut wrapped, src..src + len, dst);
  assert_eq!(wrapped, results[0].output, "copy_within mismatch: src={src} dst={dst} len={len}");
});
