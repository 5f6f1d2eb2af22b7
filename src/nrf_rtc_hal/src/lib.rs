//! Register access layer for the nRF52 Real-Time Counter (RTC), for use with
//! simulated peripherals.
//!
//! # Structure
//!
//!  - [`regs`] defines [`RegisterBlock`], which matches the hardware register
//!    map bit-for-bit.
//!  - [`signal`] defines [`Task`], [`Event`], and the interrupt and event
//!    routing masks.
//!  - [`hal`] provides the accessors (`cc_set`, `int_enable`,
//!    `task_trigger`, ...).
//!  - [`sim`] provides [`RtcPeripheral`], through which the accessors notify
//!    the owner of a register block, and [`SimRtc`], which applies the
//!    register side effects of the modeled hardware.
//!
//! # Example
//!
//! ```
//! use nrf_rtc_hal::{hal, sim::Rtc1, Event, IntMask, SimRtc, Task};
//!
//! let rtc = SimRtc::<Rtc1>::new();
//! hal::cc_set(&rtc, 0, 32768);
//! hal::int_enable(&rtc, IntMask::COMPARE0);
//! hal::task_trigger(&rtc, Task::Start);
//! assert!(rtc.is_running());
//!
//! // The simulation engine signals a compare match
//! rtc.raise_event(Event::Compare0);
//! assert_ne!(hal::event_pending(&rtc, Event::Compare0), 0);
//! hal::event_clear(&rtc, Event::Compare0);
//! ```
#![deny(unsafe_op_in_unsafe_fn)]
#![cfg_attr(not(test), no_std)] // Link `std` only when building a test (`cfg(test)`)

#[cfg(doc)]
#[doc = include_str!("../CHANGELOG.md")]
pub mod _changelog_ {}

pub mod utils;

pub mod hal;
pub mod regs;
pub mod signal;
pub mod sim;

pub use self::{
    regs::RegisterBlock,
    signal::{BadChannelError, Event, EvtMask, IntMask, Task},
    sim::{RtcOptions, RtcPeripheral, SimRtc},
};
