//! Fuzz target for capability algebra and tier derivation.
//!
//! Tests:
//! - Union/intersection commutativity and subset relationships
//! - Tier derivation is monotone: more features never lower the tier
//! - Tier cap parsing never panics and round-trips names

#![no_main]

use arbitrary::Arbitrary;
use backend::VectorTier;
use libfuzzer_sys::fuzz_target;
use memops::MemopsForce;
use platform::Caps;

#[derive(Arbitrary, Debug)]
struct Input {
  a: u64,
  b: u64,
  text: String,
}

fuzz_target!(|input: Input| {
  let a = Caps::from_raw(input.a);
  let b = Caps::from_raw(input.b);

  // ─── Algebra ───
  assert_eq!(a | b, b | a, "union must be commutative");
  assert_eq!(a & b, b & a, "intersection must be commutative");
  assert!((a | b).has(a), "union must contain first operand");
  assert!(a.has(a & b), "first operand must contain intersection");

  // ─── Tier monotonicity ───
  let low = VectorTier::from_caps(a);
  let high = VectorTier::from_caps(a | b);
  assert!(low <= high, "adding features lowered the tier: {low} > {high}");

  // ─── Parsing ───
  if let Ok(tier) = input.text.parse::<VectorTier>() {
    assert_eq!(tier.name().parse::<VectorTier>(), Ok(tier));
  }
  if let Some(force) = MemopsForce::parse(&input.text) {
    assert_eq!(MemopsForce::parse(force.as_str()), Some(force));
  }
});
