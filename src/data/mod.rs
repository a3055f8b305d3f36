//! Rolling sample storage and vertical scale control.
//!
//! ## Data flow
//!
//! ```text
//! probe round (one sample per enabled target)
//!        │
//!        ▼
//! SampleStore::apply_round()      (atomic: whole round before next render)
//!        │
//!        ▼
//! ScaleState::tick(global_max)    (snap up, decay down, every frame)
//! ```

pub mod samples;
pub mod scale;

pub use samples::{SampleBuffer, SampleStore};
pub use scale::ScaleState;
