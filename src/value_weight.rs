use crate::error::{Result, WeightError};
use crate::instance::{DefaultInstance, Instance};
use crate::semiring::{Semiring, ValueFrom};
use crate::weight::{DivideType, Weight, COMMUTATIVE, DEFAULT_DELTA, IDEMPOTENT, SEMIRING};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::io;
use std::marker::PhantomData;
use std::mem;
use std::ops;
use tracing::error;

/// Weight façade for semirings whose elements are passed by value.
///
/// Holds a single `S::Value`; all arithmetic is looked up on the shared
/// descriptor supplied by `P`. Copying a weight copies the raw value only.
///
/// `==` and `Eq` defer to the descriptor's `equal_to`, so they are only as
/// reflexive as it is. A descriptor whose no-weight is NaN makes
/// `no_weight() != no_weight()`, and such a weight never finds itself as a
/// hash map key. Check `member()` before keying on a weight.
pub struct ValueWeight<S: Semiring, P = DefaultInstance<S>> {
    value: S::Value,
    provider: PhantomData<fn() -> (S, P)>,
}

impl<S: Semiring, P: Instance<S>> ValueWeight<S, P> {
    /// Wraps `value` as is. Use `member()` to validate it.
    pub const fn new(value: S::Value) -> Self {
        ValueWeight {
            value,
            provider: PhantomData,
        }
    }

    pub fn from_args<A>(args: A) -> Self
    where
        S: ValueFrom<A>,
    {
        Self::new(Self::semiring().value_from(args))
    }

    pub const fn value(&self) -> S::Value {
        self.value
    }

    pub fn semiring() -> &'static S {
        P::instance()
    }

    pub fn zero() -> Self {
        Self::new(Self::semiring().zero())
    }

    pub fn one() -> Self {
        Self::new(Self::semiring().one())
    }

    pub fn no_weight() -> Self {
        Self::new(Self::semiring().no_weight())
    }

    pub fn plus(self, rhs: Self) -> Self {
        Self::new(Self::semiring().op_plus(self.value, rhs.value))
    }

    pub fn minus(self, rhs: Self) -> Self {
        Self::new(Self::semiring().op_minus(self.value, rhs.value))
    }

    pub fn times(self, rhs: Self) -> Self {
        Self::new(Self::semiring().op_times(self.value, rhs.value))
    }

    /// Divides `self` by `rhs`.
    ///
    /// Commutative semirings ignore `typ`. Otherwise `Left` computes
    /// `reciprocal(rhs) * self` and `Right` computes `self * reciprocal(rhs)`;
    /// `Any` is rejected with `WeightError::AmbiguousDivision`.
    pub fn try_divide(self, rhs: Self, typ: DivideType) -> Result<Self> {
        let s = Self::semiring();
        if s.commutative() {
            return Ok(Self::new(s.op_divide(self.value, rhs.value)));
        }
        match typ {
            DivideType::Left => {
                let recip = s.reciprocal(rhs.value);
                Ok(Self::new(s.op_times(recip, self.value)))
            }
            DivideType::Right => {
                let recip = s.reciprocal(rhs.value);
                Ok(Self::new(s.op_times(self.value, recip)))
            }
            DivideType::Any => Err(WeightError::AmbiguousDivision {
                semiring: Self::type_name().to_string(),
            }),
        }
    }

    /// Like `try_divide`, but always yields a weight: `no_weight()` stands in
    /// for a rejected division, and the rejection comes back beside it.
    pub fn divide_reporting(self, rhs: Self, typ: DivideType) -> (Self, Option<WeightError>) {
        match self.try_divide(rhs, typ) {
            Ok(w) => (w, None),
            Err(e) => (Self::no_weight(), Some(e)),
        }
    }

    /// Like `divide_reporting`, but the rejection only reaches the log. For a
    /// descriptor whose no-weight is a valid member (`false` in the boolean
    /// semiring, say) the result alone cannot tell a rejection from a real
    /// quotient; use `try_divide` or `divide_reporting` there.
    pub fn divide(self, rhs: Self, typ: DivideType) -> Self {
        let (w, rejected) = self.divide_reporting(rhs, typ);
        if let Some(e) = rejected {
            error!("{}", e);
        }
        w
    }

    pub fn star(self) -> Self {
        Self::new(Self::semiring().op_star(self.value))
    }

    pub fn reverse(self) -> Self {
        Self::new(Self::semiring().reverse(self.value))
    }

    pub fn quantize(self, delta: f32) -> Self {
        Self::new(Self::semiring().quantize(self.value, delta))
    }

    pub fn quantize_default(self) -> Self {
        self.quantize(DEFAULT_DELTA)
    }

    pub fn member(self) -> bool {
        Self::semiring().member(self.value)
    }

    pub fn approx_equal(self, rhs: Self, delta: f32) -> bool {
        Self::semiring().approx_equal_to(self.value, rhs.value, delta)
    }

    pub fn approx_equal_default(self, rhs: Self) -> bool {
        self.approx_equal(rhs, DEFAULT_DELTA)
    }

    /// Writes the raw bytes of the value: no header, no length, native byte
    /// order.
    pub fn write<W: io::Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(bytemuck::bytes_of(&self.value))
    }

    /// Reads exactly `size_of::<S::Value>()` bytes written by `write`.
    pub fn read<R: io::Read>(r: &mut R) -> Result<Self> {
        let mut buf = vec![0u8; mem::size_of::<S::Value>()];
        r.read_exact(&mut buf)?;
        match bytemuck::checked::try_pod_read_unaligned::<S::Value>(&buf) {
            Ok(value) => Ok(Self::new(value)),
            Err(e) => Err(WeightError::InvalidBits {
                semiring: Self::type_name().to_string(),
                reason: format!("{:?}", e),
            }),
        }
    }

    /// The descriptor's name, computed on first call and kept for the life of
    /// the process.
    pub fn type_name() -> &'static str {
        P::type_name()
    }

    pub fn properties() -> u64 {
        let s = Self::semiring();
        let mut props = SEMIRING;
        if s.commutative() {
            props |= COMMUTATIVE;
        }
        if s.idempotent() {
            props |= IDEMPOTENT;
        }
        props
    }
}

impl<S: Semiring, P> Clone for ValueWeight<S, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: Semiring, P> Copy for ValueWeight<S, P> {}

impl<S: Semiring, P> fmt::Debug for ValueWeight<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ValueWeight").field(&self.value).finish()
    }
}

impl<S: Semiring, P: Instance<S>> fmt::Display for ValueWeight<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Self::semiring().print(f, self.value)
    }
}

impl<S: Semiring, P: Instance<S>> Default for ValueWeight<S, P> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<S: Semiring, P: Instance<S>> PartialEq for ValueWeight<S, P> {
    fn eq(&self, other: &Self) -> bool {
        Self::semiring().equal_to(self.value, other.value)
    }
}

// Only as reflexive as the descriptor's `equal_to`; see the type docs.
impl<S: Semiring, P: Instance<S>> Eq for ValueWeight<S, P> {}

// Hashes the raw bits, not the descriptor's notion of equality. Consistent
// with `==` only when `equal_to` implies bitwise equality; for a descriptor
// that treats distinct bit patterns as equal (0.0 and -0.0, say) equal
// weights may hash differently.
impl<S: Semiring, P> Hash for ValueWeight<S, P> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write(bytemuck::bytes_of(&self.value));
    }
}

impl<S: Semiring, P: Instance<S>> ops::Add for ValueWeight<S, P> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        self.plus(rhs)
    }
}

impl<S: Semiring, P: Instance<S>> ops::Sub for ValueWeight<S, P> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        self.minus(rhs)
    }
}

impl<S: Semiring, P: Instance<S>> ops::Mul for ValueWeight<S, P> {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        self.times(rhs)
    }
}

impl<S: Semiring, P: Instance<S>> ops::AddAssign for ValueWeight<S, P> {
    fn add_assign(&mut self, rhs: Self) {
        *self = self.plus(rhs);
    }
}

impl<S: Semiring, P: Instance<S>> ops::MulAssign for ValueWeight<S, P> {
    fn mul_assign(&mut self, rhs: Self) {
        *self = self.times(rhs);
    }
}

impl<S, P> Serialize for ValueWeight<S, P>
where
    S: Semiring,
    S::Value: Serialize,
{
    fn serialize<Se: Serializer>(&self, serializer: Se) -> std::result::Result<Se::Ok, Se::Error> {
        self.value.serialize(serializer)
    }
}

impl<'de, S, P> Deserialize<'de> for ValueWeight<S, P>
where
    S: Semiring,
    S::Value: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = S::Value::deserialize(deserializer)?;
        Ok(ValueWeight {
            value,
            provider: PhantomData,
        })
    }
}

impl<S: Semiring, P: Instance<S>> Weight for ValueWeight<S, P> {
    type ReverseWeight = Self;

    fn zero() -> Self {
        ValueWeight::zero()
    }
    fn one() -> Self {
        ValueWeight::one()
    }
    fn no_weight() -> Self {
        ValueWeight::no_weight()
    }
    fn plus(&self, rhs: &Self) -> Self {
        ValueWeight::plus(*self, *rhs)
    }
    fn times(&self, rhs: &Self) -> Self {
        ValueWeight::times(*self, *rhs)
    }
    fn divide(&self, rhs: &Self, typ: DivideType) -> Result<Self> {
        self.try_divide(*rhs, typ)
    }
    fn star(&self) -> Self {
        ValueWeight::star(*self)
    }
    fn reverse(&self) -> Self {
        ValueWeight::reverse(*self)
    }
    fn quantize(&self, delta: f32) -> Self {
        ValueWeight::quantize(*self, delta)
    }
    fn member(&self) -> bool {
        ValueWeight::member(*self)
    }
    fn approx_equal(&self, rhs: &Self, delta: f32) -> bool {
        ValueWeight::approx_equal(*self, *rhs, delta)
    }
    fn write<W: io::Write>(&self, w: &mut W) -> io::Result<()> {
        ValueWeight::write(self, w)
    }
    fn read<R: io::Read>(r: &mut R) -> Result<Self> {
        ValueWeight::read(r)
    }
    fn type_name() -> &'static str {
        ValueWeight::<S, P>::type_name()
    }
    fn properties() -> u64 {
        ValueWeight::<S, P>::properties()
    }
}
