//! The simulated RTC register file.
//!
//! A memory-mapped register can't react to being written by itself. On real
//! silicon, writing `INTENCLR` clears bits that are then visible through
//! `INTENSET`, and writing a task register starts an action. [`RtcPeripheral`]
//! is the seam through which the accessors in [`crate::hal`] tell the owner of
//! the register block which register was just accessed, so that the owner can
//! apply these register-level side effects.
//!
//! [`SimRtc`] is such an owner. It models the register semantics only; the
//! passage of time (counting, tick and compare event generation) and interrupt
//! delivery are left to the surrounding simulation engine, which injects
//! events through [`SimRtc::raise_event`].
use core::{cell::Cell, fmt, marker::PhantomData};

use crate::{
    regs::{self, RegisterBlock},
    signal::{Event, Task},
    utils::Init,
};

/// The owner of an RTC register block.
///
/// Every `regw_*` method is called by the corresponding accessor right after
/// it stores to the register. `regr_counter` is called right before `COUNTER`
/// is loaded.
///
/// The default implementations of the `INTEN*` and `EVTEN*` hooks apply the
/// set/clear register semantics of the hardware, so that `INTENSET` and
/// `EVTEN` always reflect the current enable state. The other hooks do
/// nothing by default.
pub trait RtcPeripheral {
    /// Get the register block.
    fn regs(&self) -> &RegisterBlock;

    /// `CC[ch]` was written.
    #[inline]
    fn regw_cc(&self, _ch: usize) {}

    /// `INTENSET` was written.
    #[inline]
    fn regw_intenset(&self) {
        self.regs().latch_intenset();
    }

    /// `INTENCLR` was written.
    #[inline]
    fn regw_intenclr(&self) {
        self.regs().latch_intenclr();
    }

    /// `EVTENSET` was written.
    #[inline]
    fn regw_evtenset(&self) {
        self.regs().latch_evtenset();
    }

    /// `EVTENCLR` was written.
    #[inline]
    fn regw_evtenclr(&self) {
        self.regs().latch_evtenclr();
    }

    /// A task register was written.
    #[inline]
    fn regw_task(&self, _task: Task) {}

    /// `COUNTER` is about to be read.
    #[inline]
    fn regr_counter(&self) {}
}

/// A bare register block applies the set/clear register semantics and
/// nothing else.
impl RtcPeripheral for RegisterBlock {
    #[inline]
    fn regs(&self) -> &RegisterBlock {
        self
    }
}

/// Instance-specific parameters of [`SimRtc`].
pub trait RtcOptions {
    /// The instance number, used in log messages.
    const INSTANCE: usize;

    /// The number of compare channels implemented by the instance.
    /// Must be in range `1..=4`.
    const NUM_CC_CHANNELS: usize = regs::NUM_CC;
}

/// `RTC0`, which implements three compare channels.
#[derive(Debug)]
pub enum Rtc0 {}

impl RtcOptions for Rtc0 {
    const INSTANCE: usize = 0;
    const NUM_CC_CHANNELS: usize = 3;
}

/// `RTC1`
#[derive(Debug)]
pub enum Rtc1 {}

impl RtcOptions for Rtc1 {
    const INSTANCE: usize = 1;
}

/// `RTC2`
#[derive(Debug)]
pub enum Rtc2 {}

impl RtcOptions for Rtc2 {
    const INSTANCE: usize = 2;
}

/// A simulated RTC instance: a register block and the hardware state behind
/// it that isn't directly visible through any register.
pub struct SimRtc<Options> {
    regs: RegisterBlock,
    /// Set by `TASKS_START`, cleared by `TASKS_STOP`.
    running: Cell<bool>,
    _options: PhantomData<fn() -> Options>,
}

impl<Options: RtcOptions> Init for SimRtc<Options> {
    const INIT: Self = {
        assert!(
            Options::NUM_CC_CHANNELS >= 1 && Options::NUM_CC_CHANNELS <= regs::NUM_CC,
            "`NUM_CC_CHANNELS` must be in range `1..=4`"
        );
        Self {
            regs: Init::INIT,
            running: Init::INIT,
            _options: PhantomData,
        }
    };
}

impl<Options: RtcOptions> Default for SimRtc<Options> {
    #[inline]
    fn default() -> Self {
        Self::INIT
    }
}

impl<Options: RtcOptions> fmt::Debug for SimRtc<Options> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("SimRtc")
            .field("instance", &Options::INSTANCE)
            .field("running", &self.running.get())
            .field("inten", &format_args!("{:#010x}", self.inten()))
            .field("evten", &format_args!("{:#010x}", self.regs.evten.get()))
            .field("counter", &self.regs.counter.get())
            .finish()
    }
}

impl<Options: RtcOptions> SimRtc<Options> {
    /// Construct a `SimRtc` in the reset state.
    #[inline]
    pub const fn new() -> Self {
        Self::INIT
    }

    /// Get a flag indicating whether the counter has been started.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    /// Get the interrupt enable state, which `INTENSET` and `INTENCLR` read
    /// back.
    #[inline]
    pub fn inten(&self) -> u32 {
        self.regs.intenset.get()
    }

    /// Signal an event. Called by the simulation engine when the modeled
    /// hardware generates `event`.
    pub fn raise_event(&self, event: Event) {
        log::trace!("RTC{}: raise {:?}", Options::INSTANCE, event);
        // Safety: `Event` discriminants are register offsets
        unsafe { self.regs.reg_at(event.offset()) }.set(1);
    }

    /// Return every register and the internal state to the reset value.
    pub fn reset(&self) {
        log::trace!("RTC{}: reset", Options::INSTANCE);
        let r = &self.regs;
        for task in Task::ALL {
            // Safety: `Task` discriminants are register offsets
            unsafe { r.reg_at(task.offset()) }.set(0);
        }
        for event in Event::ALL {
            // Safety: `Event` discriminants are register offsets
            unsafe { r.reg_at(event.offset()) }.set(0);
        }
        for reg in [
            &r.intenset,
            &r.intenclr,
            &r.evten,
            &r.evtenset,
            &r.evtenclr,
            &r.counter,
            &r.prescaler,
        ] {
            reg.set(0);
        }
        for cc in &r.cc {
            cc.set(0);
        }
        self.running.set(false);
    }

}

impl<Options: RtcOptions> RtcPeripheral for SimRtc<Options> {
    #[inline]
    fn regs(&self) -> &RegisterBlock {
        &self.regs
    }

    fn regw_cc(&self, ch: usize) {
        let cc = &self.regs.cc[ch];
        cc.set(cc.get() & regs::COUNTER_MASK);
        log::trace!("RTC{}: CC[{}] <- {:#08x}", Options::INSTANCE, ch, cc.get());

        if ch >= Options::NUM_CC_CHANNELS {
            log::warn!(
                "RTC{} implements only {} compare channels, but CC[{}] was written",
                Options::INSTANCE,
                Options::NUM_CC_CHANNELS,
                ch
            );
        }
    }

    fn regw_intenset(&self) {
        let value = self.regs.intenset.get();
        let inten = self.regs.latch_intenset();
        log::trace!(
            "RTC{}: INTENSET <- {:#010x}, INTEN = {:#010x}",
            Options::INSTANCE,
            value,
            inten
        );
    }

    fn regw_intenclr(&self) {
        let value = self.regs.intenclr.get();
        let inten = self.regs.latch_intenclr();
        log::trace!(
            "RTC{}: INTENCLR <- {:#010x}, INTEN = {:#010x}",
            Options::INSTANCE,
            value,
            inten
        );
    }

    fn regw_evtenset(&self) {
        let value = self.regs.evtenset.get();
        let evten = self.regs.latch_evtenset();
        log::trace!(
            "RTC{}: EVTENSET <- {:#010x}, EVTEN = {:#010x}",
            Options::INSTANCE,
            value,
            evten
        );
    }

    fn regw_evtenclr(&self) {
        let value = self.regs.evtenclr.get();
        let evten = self.regs.latch_evtenclr();
        log::trace!(
            "RTC{}: EVTENCLR <- {:#010x}, EVTEN = {:#010x}",
            Options::INSTANCE,
            value,
            evten
        );
    }

    fn regw_task(&self, task: Task) {
        // Safety: `Task` discriminants are register offsets
        let reg = unsafe { self.regs.reg_at(task.offset()) };
        if reg.get() == 0 {
            return;
        }
        // Task registers are strobes
        reg.set(0);

        log::trace!("RTC{}: {:?}", Options::INSTANCE, task);

        match task {
            Task::Start => self.running.set(true),
            Task::Stop => self.running.set(false),
            Task::Clear => self.regs.counter.set(0),
            Task::TriggerOverflow => self.regs.counter.set(regs::COUNTER_TRIGOVRFLW_VALUE),
        }
    }

    fn regr_counter(&self) {
        // The engine owns the time base; only keep the value within the
        // counter's width
        let counter = &self.regs.counter;
        counter.set(counter.get() & regs::COUNTER_MASK);
    }
}
