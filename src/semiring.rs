use bytemuck::{CheckedBitPattern, NoUninit};
use std::fmt;

/// Descriptor of a semiring whose elements are passed around by value.
///
/// A descriptor is shared by every weight of its type for the whole life of
/// the process, so all methods take `&self` and must be safe to call from
/// several threads at once. Nothing here is ever mutated after publication.
pub trait Semiring: Send + Sync + 'static {
    /// Raw element type. It has to have a fixed, padding-free layout so that
    /// weights can be written and read back bit for bit.
    type Value: Copy + fmt::Debug + Send + Sync + NoUninit + CheckedBitPattern;

    fn zero(&self) -> Self::Value;
    fn one(&self) -> Self::Value;
    /// Distinguished value standing for "not a weight".
    fn no_weight(&self) -> Self::Value;

    fn op_plus(&self, lhs: Self::Value, rhs: Self::Value) -> Self::Value;
    fn op_minus(&self, lhs: Self::Value, rhs: Self::Value) -> Self::Value;
    fn op_times(&self, lhs: Self::Value, rhs: Self::Value) -> Self::Value;
    /// Only consulted when `commutative()` holds.
    fn op_divide(&self, lhs: Self::Value, rhs: Self::Value) -> Self::Value;
    fn reciprocal(&self, value: Self::Value) -> Self::Value;
    fn op_star(&self, value: Self::Value) -> Self::Value;
    fn reverse(&self, value: Self::Value) -> Self::Value;
    fn quantize(&self, value: Self::Value, delta: f32) -> Self::Value;
    fn member(&self, value: Self::Value) -> bool;

    fn equal_to(&self, lhs: Self::Value, rhs: Self::Value) -> bool;
    fn approx_equal_to(&self, lhs: Self::Value, rhs: Self::Value, delta: f32) -> bool;

    fn print(&self, f: &mut fmt::Formatter<'_>, value: Self::Value) -> fmt::Result;

    fn commutative(&self) -> bool;
    fn idempotent(&self) -> bool;
    fn name(&self) -> String;
}

/// Descriptor-specific value constructor. A descriptor implements this once
/// for every argument shape it accepts.
pub trait ValueFrom<A>: Semiring {
    fn value_from(&self, args: A) -> Self::Value;
}

/// A descriptor without runtime state, known entirely at compile time.
///
/// Implementors write `const INSTANCE: &'static Self = &MySemiring;`.
pub trait ConstSemiring: Semiring {
    const INSTANCE: &'static Self;
}
