//! Weights for weighted graph and automaton algorithms whose arithmetic is
//! delegated to a process-wide semiring descriptor.
//!
//! A [`ValueWeight`] holds one raw value. Every operation on it looks up the
//! shared descriptor through an [`Instance`] provider: [`DefaultInstance`]
//! builds it lazily on the heap, [`StaticInstance`] uses a compile-time
//! constant.
pub mod error;
pub mod instance;
pub mod semiring;
pub mod value_weight;
pub mod weight;

pub use error::{Result, WeightError};
pub use instance::{DefaultInstance, Instance, InstanceCells, SharedSemiring, StaticInstance};
pub use semiring::{ConstSemiring, Semiring, ValueFrom};
pub use value_weight::ValueWeight;
pub use weight::{DivideType, Weight, DEFAULT_DELTA};
