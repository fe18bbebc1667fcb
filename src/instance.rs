use crate::semiring::{ConstSemiring, Semiring};
use std::any;
use std::marker::PhantomData;
use std::panic;
use std::process;
use std::sync::OnceLock;
use tracing::{debug, error};

/// Supplies the one descriptor object of type `S` for the process.
///
/// Every call, from any thread, returns a reference to the same object. The
/// reference is never invalidated: there is no teardown.
pub trait Instance<S>: 'static {
    fn instance() -> &'static S;
    /// The instance's `name()`, computed once.
    fn type_name() -> &'static str;
}

/// Process-wide cells of one descriptor type. Declared with
/// [`shared_semiring!`](crate::shared_semiring) as a `static` next to the
/// descriptor, so a published instance is reached without any lock.
pub struct InstanceCells<S> {
    instance: OnceLock<S>,
    default_name: OnceLock<String>,
    static_name: OnceLock<String>,
}

impl<S> InstanceCells<S> {
    pub const fn new() -> Self {
        InstanceCells {
            instance: OnceLock::new(),
            default_name: OnceLock::new(),
            static_name: OnceLock::new(),
        }
    }

    /// The lazily built instance, if some caller already published it.
    pub fn published(&self) -> Option<&S> {
        self.instance.get()
    }
}

/// A descriptor that owns a static [`InstanceCells`].
pub trait SharedSemiring: Semiring + Sized {
    fn cells() -> &'static InstanceCells<Self>;
}

/// Implements [`SharedSemiring`] for a concrete descriptor type by declaring
/// its cells as a function-local `static`.
#[macro_export]
macro_rules! shared_semiring {
    ( $t:ty ) => {
        impl $crate::instance::SharedSemiring for $t {
            fn cells() -> &'static $crate::instance::InstanceCells<$t> {
                static CELLS: $crate::instance::InstanceCells<$t> = $crate::instance::InstanceCells::new();
                &CELLS
            }
        }
    };
}

/// Heap singleton, built from `S::default()` on first use and never freed.
///
/// Concurrent first use constructs exactly one instance and no caller can
/// observe it half built. A panic inside `S::default()` is fatal and aborts
/// the process instead of letting a later caller retry.
pub struct DefaultInstance<S>(PhantomData<fn() -> S>);

impl<S: SharedSemiring + Default> Instance<S> for DefaultInstance<S> {
    fn instance() -> &'static S {
        S::cells().instance.get_or_init(construct::<S>)
    }
    fn type_name() -> &'static str {
        S::cells().default_name.get_or_init(|| Self::instance().name()).as_str()
    }
}

fn construct<S: Semiring + Default>() -> S {
    match panic::catch_unwind(S::default) {
        Ok(semiring) => {
            debug!(semiring = %semiring.name(), "constructed shared semiring instance");
            semiring
        }
        Err(_) => {
            error!(semiring = any::type_name::<S>(), "semiring construction panicked");
            process::abort();
        }
    }
}

/// Compile-time singleton for descriptors without runtime state.
pub struct StaticInstance<S>(PhantomData<fn() -> S>);

impl<S: ConstSemiring> StaticInstance<S> {
    pub const INSTANCE: &'static S = S::INSTANCE;
}

impl<S: ConstSemiring + SharedSemiring> Instance<S> for StaticInstance<S> {
    fn instance() -> &'static S {
        Self::INSTANCE
    }
    fn type_name() -> &'static str {
        S::cells().static_name.get_or_init(|| S::INSTANCE.name()).as_str()
    }
}
