//! Re-exported capability constants and masks.
//!
//! Algorithm crates can import everything they need from `backend::caps`
//! instead of reaching into `platform` directly.
//!
//! # Example
//!
//! ```
//! use backend::caps::{Caps, x86};
//!
//! fn wide_enough(caps: Caps) -> bool {
//!   caps.has(x86::AVX2_READY)
//! }
//! # let _ = wide_enough(platform::caps());
//! ```

pub use platform::caps::{Arch, Caps};

pub mod x86 {
  pub use platform::caps::x86::*;
}

pub mod aarch64 {
  pub use platform::caps::aarch64::*;
}
