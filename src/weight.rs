use crate::error::Result;
use std::fmt;
use std::hash::Hash;
use std::io;

/// Default tolerance for `quantize` and `approx_equal`.
pub const DEFAULT_DELTA: f32 = 1.0 / 1024.0;

pub const LEFT_SEMIRING: u64 = 0x1;
pub const RIGHT_SEMIRING: u64 = 0x2;
pub const SEMIRING: u64 = LEFT_SEMIRING | RIGHT_SEMIRING;
pub const COMMUTATIVE: u64 = 0x4;
pub const IDEMPOTENT: u64 = 0x8;

/// Side on which the reciprocal of the divisor is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DivideType {
    /// `reciprocal(rhs) * lhs`
    Left,
    /// `lhs * reciprocal(rhs)`
    Right,
    /// Only meaningful for commutative semirings.
    Any,
}

impl Default for DivideType {
    fn default() -> Self {
        DivideType::Any
    }
}

/// What a weighted graph or automaton algorithm expects from an edge weight.
///
/// `Eq` and `Hash` are required so weights can key maps, but equality may be
/// non-reflexive for non-members (a NaN no-weight is not equal to itself).
pub trait Weight: Copy + PartialEq + Hash + fmt::Debug + fmt::Display + Default {
    type ReverseWeight: Weight;

    fn zero() -> Self;
    fn one() -> Self;
    fn no_weight() -> Self;

    fn plus(&self, rhs: &Self) -> Self;
    fn times(&self, rhs: &Self) -> Self;
    fn divide(&self, rhs: &Self, typ: DivideType) -> Result<Self>;
    fn star(&self) -> Self;
    fn reverse(&self) -> Self::ReverseWeight;
    fn quantize(&self, delta: f32) -> Self;
    fn member(&self) -> bool;
    fn approx_equal(&self, rhs: &Self, delta: f32) -> bool;

    fn write<W: io::Write>(&self, w: &mut W) -> io::Result<()>;
    fn read<R: io::Read>(r: &mut R) -> Result<Self>;

    fn type_name() -> &'static str;
    fn properties() -> u64;
}
