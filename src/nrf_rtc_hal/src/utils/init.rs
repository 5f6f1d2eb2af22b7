#![allow(clippy::declare_interior_mutable_const)]
use core::cell::Cell;

/// Trait for types having a constant default value. This is essentially a
/// constant version of `Default`.
///
/// The reset state of register blocks and simulated peripherals is expressed
/// through this trait so that it can be used in `const` contexts.
pub trait Init {
    /// The default value.
    const INIT: Self;
}

impl<T: Init> Init for Cell<T> {
    const INIT: Self = Cell::new(T::INIT);
}

macro_rules! impl_init {
    (
        $(
            $( #[$meta:meta] )*
            $ty:ty => $value:expr,
        )*
    ) => {
        $(
            $( #[$meta] )*
            impl Init for $ty {
                const INIT: Self = $value;
            }
        )*
    };
}

impl_init! {
    bool => false,
    u32 => 0,
}
