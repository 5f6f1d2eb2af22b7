//! The nRF52 RTC register block.
//!
//! The layout mirrors the register map in the nRF52832 Product Specification
//! (section "RTC: Real-time counter") bit-for-bit. Every offset the rest of
//! the crate depends on is derived from this structure with `offset_of!` and
//! pinned by compile-time assertions below.
#![allow(clippy::declare_interior_mutable_const)]
use core::fmt;
use memoffset::offset_of;

use vcell::VolatileCell;

use crate::utils::Init;

/// Width of `COUNTER` and `CC[n]` in bits.
pub const COUNTER_WIDTH: u32 = 24;

/// The bits of `COUNTER` and `CC[n]` that are backed by the hardware.
pub const COUNTER_MASK: u32 = (1 << COUNTER_WIDTH) - 1;

/// The value `COUNTER` takes after `TASKS_TRIGOVRFLW`.
pub const COUNTER_TRIGOVRFLW_VALUE: u32 = 0xFF_FFF0;

/// The number of compare channels in the register block. Some instances
/// implement fewer of them.
pub const NUM_CC: usize = 4;

/// `INTENSET`/`INTENCLR` bit for the tick event.
pub const RTC_INTENSET_TICK_MSK: u32 = 1 << 0;
/// `INTENSET`/`INTENCLR` bit for the overflow event.
pub const RTC_INTENSET_OVRFLW_MSK: u32 = 1 << 1;
/// `INTENSET`/`INTENCLR` bit for the compare event on channel 0.
pub const RTC_INTENSET_COMPARE0_MSK: u32 = 1 << 16;
pub const RTC_INTENSET_COMPARE1_MSK: u32 = 1 << 17;
pub const RTC_INTENSET_COMPARE2_MSK: u32 = 1 << 18;
pub const RTC_INTENSET_COMPARE3_MSK: u32 = 1 << 19;

/// `EVTEN`/`EVTENSET`/`EVTENCLR` bit for the tick event.
pub const RTC_EVTEN_TICK_MSK: u32 = 1 << 0;
/// `EVTEN`/`EVTENSET`/`EVTENCLR` bit for the overflow event.
pub const RTC_EVTEN_OVRFLW_MSK: u32 = 1 << 1;
/// `EVTEN`/`EVTENSET`/`EVTENCLR` bit for the compare event on channel 0.
pub const RTC_EVTEN_COMPARE0_MSK: u32 = 1 << 16;
pub const RTC_EVTEN_COMPARE1_MSK: u32 = 1 << 17;
pub const RTC_EVTEN_COMPARE2_MSK: u32 = 1 << 18;
pub const RTC_EVTEN_COMPARE3_MSK: u32 = 1 << 19;

/// The RTC register block (`NRF_RTC_Type`).
///
/// The block is owned by whoever models the peripheral. The accessors in
/// [`crate::hal`] only ever borrow it.
#[repr(C)]
pub struct RegisterBlock {
    /// `0x000` Start RTC COUNTER
    pub tasks_start: VolatileCell<u32>,
    /// `0x004` Stop RTC COUNTER
    pub tasks_stop: VolatileCell<u32>,
    /// `0x008` Clear RTC COUNTER
    pub tasks_clear: VolatileCell<u32>,
    /// `0x00C` Set COUNTER to `0xFFFFF0`
    pub tasks_trigovrflw: VolatileCell<u32>,
    _reserved0: [u32; 60],
    /// `0x100` Event on COUNTER increment
    pub events_tick: VolatileCell<u32>,
    /// `0x104` Event on COUNTER overflow
    pub events_ovrflw: VolatileCell<u32>,
    _reserved1: [u32; 14],
    /// `0x140` Compare event on CC\[n\] match
    pub events_compare: [VolatileCell<u32>; NUM_CC],
    _reserved2: [u32; 109],
    /// `0x304` Enable interrupt
    pub intenset: VolatileCell<u32>,
    /// `0x308` Disable interrupt
    pub intenclr: VolatileCell<u32>,
    _reserved3: [u32; 13],
    /// `0x340` Enable or disable event routing
    pub evten: VolatileCell<u32>,
    /// `0x344` Enable event routing
    pub evtenset: VolatileCell<u32>,
    /// `0x348` Disable event routing
    pub evtenclr: VolatileCell<u32>,
    _reserved4: [u32; 110],
    /// `0x504` Current COUNTER value
    pub counter: VolatileCell<u32>,
    /// `0x508` 12 bit prescaler for COUNTER frequency (32768/(PRESCALER+1))
    pub prescaler: VolatileCell<u32>,
    _reserved5: [u32; 13],
    /// `0x540` Compare register n
    pub cc: [VolatileCell<u32>; NUM_CC],
}

const ZERO: VolatileCell<u32> = VolatileCell::new(0);

impl Init for RegisterBlock {
    const INIT: Self = Self {
        tasks_start: ZERO,
        tasks_stop: ZERO,
        tasks_clear: ZERO,
        tasks_trigovrflw: ZERO,
        _reserved0: [0; 60],
        events_tick: ZERO,
        events_ovrflw: ZERO,
        _reserved1: [0; 14],
        events_compare: [ZERO; NUM_CC],
        _reserved2: [0; 109],
        intenset: ZERO,
        intenclr: ZERO,
        _reserved3: [0; 13],
        evten: ZERO,
        evtenset: ZERO,
        evtenclr: ZERO,
        _reserved4: [0; 110],
        counter: ZERO,
        prescaler: ZERO,
        _reserved5: [0; 13],
        cc: [ZERO; NUM_CC],
    };
}

pub const OFFSET_TASKS_START: usize = offset_of!(RegisterBlock, tasks_start);
pub const OFFSET_TASKS_STOP: usize = offset_of!(RegisterBlock, tasks_stop);
pub const OFFSET_TASKS_CLEAR: usize = offset_of!(RegisterBlock, tasks_clear);
pub const OFFSET_TASKS_TRIGOVRFLW: usize = offset_of!(RegisterBlock, tasks_trigovrflw);
pub const OFFSET_EVENTS_TICK: usize = offset_of!(RegisterBlock, events_tick);
pub const OFFSET_EVENTS_OVRFLW: usize = offset_of!(RegisterBlock, events_ovrflw);
pub const OFFSET_EVENTS_COMPARE: usize = offset_of!(RegisterBlock, events_compare);
pub const OFFSET_INTENSET: usize = offset_of!(RegisterBlock, intenset);
pub const OFFSET_INTENCLR: usize = offset_of!(RegisterBlock, intenclr);
pub const OFFSET_EVTEN: usize = offset_of!(RegisterBlock, evten);
pub const OFFSET_EVTENSET: usize = offset_of!(RegisterBlock, evtenset);
pub const OFFSET_EVTENCLR: usize = offset_of!(RegisterBlock, evtenclr);
pub const OFFSET_COUNTER: usize = offset_of!(RegisterBlock, counter);
pub const OFFSET_PRESCALER: usize = offset_of!(RegisterBlock, prescaler);
pub const OFFSET_CC: usize = offset_of!(RegisterBlock, cc);

/// The offset of `EVENTS_COMPARE[ch]`.
#[inline]
pub const fn offset_events_compare(ch: usize) -> usize {
    OFFSET_EVENTS_COMPARE + ch * core::mem::size_of::<VolatileCell<u32>>()
}

// Pin the layout to the datasheet. A mismatch is a compile-time error.
const _: () = {
    assert!(OFFSET_TASKS_START == 0x000);
    assert!(OFFSET_TASKS_STOP == 0x004);
    assert!(OFFSET_TASKS_CLEAR == 0x008);
    assert!(OFFSET_TASKS_TRIGOVRFLW == 0x00C);
    assert!(OFFSET_EVENTS_TICK == 0x100);
    assert!(OFFSET_EVENTS_OVRFLW == 0x104);
    assert!(OFFSET_EVENTS_COMPARE == 0x140);
    assert!(OFFSET_INTENSET == 0x304);
    assert!(OFFSET_INTENCLR == 0x308);
    assert!(OFFSET_EVTEN == 0x340);
    assert!(OFFSET_EVTENSET == 0x344);
    assert!(OFFSET_EVTENCLR == 0x348);
    assert!(OFFSET_COUNTER == 0x504);
    assert!(OFFSET_PRESCALER == 0x508);
    assert!(OFFSET_CC == 0x540);
    assert!(core::mem::size_of::<RegisterBlock>() == 0x550);
    assert!(core::mem::size_of::<VolatileCell<u32>>() == 4);
};

impl RegisterBlock {
    /// Get the base address of the register block.
    #[inline]
    pub fn base_address(&self) -> usize {
        self as *const Self as usize
    }

    /// Get a reference to the 32-bit register at `offset`.
    ///
    /// # Safety
    ///
    /// `offset` must be the offset of a `VolatileCell<u32>` field of `Self`
    /// (or an element of one of its arrays).
    #[inline]
    pub(crate) unsafe fn reg_at(&self, offset: usize) -> &VolatileCell<u32> {
        debug_assert!(offset % core::mem::size_of::<VolatileCell<u32>>() == 0);
        debug_assert!(offset < core::mem::size_of::<Self>());
        // Safety: Upheld by the caller
        unsafe {
            &*(self as *const Self)
                .cast::<u8>()
                .add(offset)
                .cast::<VolatileCell<u32>>()
        }
    }

    /// Apply a write to `INTENSET`. `INTENCLR` still holds the previous
    /// enable state, so both end up reading back the updated state.
    pub fn latch_intenset(&self) -> u32 {
        let inten = self.intenclr.get() | self.intenset.get();
        self.intenset.set(inten);
        self.intenclr.set(inten);
        inten
    }

    /// Apply a write to `INTENCLR`. `INTENSET` still holds the previous
    /// enable state.
    pub fn latch_intenclr(&self) -> u32 {
        let inten = self.intenset.get() & !self.intenclr.get();
        self.intenset.set(inten);
        self.intenclr.set(inten);
        inten
    }

    /// Apply a write to `EVTENSET`. `EVTEN` still holds the previous state.
    pub fn latch_evtenset(&self) -> u32 {
        let evten = self.evten.get() | self.evtenset.get();
        self.set_evten(evten);
        evten
    }

    /// Apply a write to `EVTENCLR`.
    pub fn latch_evtenclr(&self) -> u32 {
        let evten = self.evten.get() & !self.evtenclr.get();
        self.set_evten(evten);
        evten
    }

    fn set_evten(&self, evten: u32) {
        self.evten.set(evten);
        self.evtenset.set(evten);
        self.evtenclr.set(evten);
    }
}

impl fmt::Debug for RegisterBlock {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        struct Hex(u32);
        impl fmt::Debug for Hex {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "{:#010x}", self.0)
            }
        }

        f.debug_struct("RegisterBlock")
            .field(
                "events",
                &[
                    self.events_tick.get(),
                    self.events_ovrflw.get(),
                    self.events_compare[0].get(),
                    self.events_compare[1].get(),
                    self.events_compare[2].get(),
                    self.events_compare[3].get(),
                ],
            )
            .field("intenset", &Hex(self.intenset.get()))
            .field("evten", &Hex(self.evten.get()))
            .field("counter", &self.counter.get())
            .field("prescaler", &self.prescaler.get())
            .field("cc", &self.cc.each_ref().map(|cc| cc.get()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_all_zero() {
        let regs = RegisterBlock::INIT;
        assert_eq!(regs.counter.get(), 0);
        assert_eq!(regs.prescaler.get(), 0);
        assert_eq!(regs.intenset.get(), 0);
        assert_eq!(regs.evten.get(), 0);
        for ch in 0..NUM_CC {
            assert_eq!(regs.cc[ch].get(), 0);
            assert_eq!(regs.events_compare[ch].get(), 0);
        }
    }

    #[test]
    fn field_addresses_match_offsets() {
        let regs = RegisterBlock::INIT;
        let base = regs.base_address();
        assert_eq!(regs.tasks_trigovrflw.as_ptr() as usize, base + 0x00C);
        assert_eq!(regs.events_ovrflw.as_ptr() as usize, base + 0x104);
        assert_eq!(regs.intenclr.as_ptr() as usize, base + 0x308);
        assert_eq!(regs.evtenclr.as_ptr() as usize, base + 0x348);
        assert_eq!(regs.prescaler.as_ptr() as usize, base + 0x508);
        for ch in 0..NUM_CC {
            assert_eq!(
                regs.events_compare[ch].as_ptr() as usize,
                base + 0x140 + ch * 4
            );
            assert_eq!(regs.cc[ch].as_ptr() as usize, base + 0x540 + ch * 4);
            assert_eq!(offset_events_compare(ch), 0x140 + ch * 4);
        }
    }

    #[test]
    fn reg_at_aliases_fields() {
        let regs = RegisterBlock::INIT;
        unsafe { regs.reg_at(OFFSET_COUNTER) }.set(0x42);
        assert_eq!(regs.counter.get(), 0x42);
        regs.events_compare[2].set(1);
        assert_eq!(unsafe { regs.reg_at(offset_events_compare(2)) }.get(), 1);
    }

    #[test]
    fn masks() {
        assert_eq!(COUNTER_MASK, 0xFF_FFFF);
        assert_eq!(RTC_INTENSET_COMPARE3_MSK, 0x8_0000);
        assert_eq!(RTC_EVTEN_COMPARE0_MSK, RTC_INTENSET_COMPARE0_MSK);
    }

    #[test]
    fn intenset_intenclr_latch() {
        let regs = RegisterBlock::INIT;
        regs.intenset.set(0b0011);
        assert_eq!(regs.latch_intenset(), 0b0011);
        regs.intenset.set(0b0100);
        assert_eq!(regs.latch_intenset(), 0b0111);
        assert_eq!(regs.intenclr.get(), 0b0111);

        regs.intenclr.set(0b0101);
        assert_eq!(regs.latch_intenclr(), 0b0010);
        assert_eq!(regs.intenset.get(), 0b0010);
        assert_eq!(regs.intenclr.get(), 0b0010);
    }

    #[test]
    fn evten_latch() {
        let regs = RegisterBlock::INIT;
        regs.evtenset.set(RTC_EVTEN_TICK_MSK | RTC_EVTEN_COMPARE1_MSK);
        regs.latch_evtenset();
        regs.evtenclr.set(RTC_EVTEN_TICK_MSK);
        assert_eq!(regs.latch_evtenclr(), RTC_EVTEN_COMPARE1_MSK);
        assert_eq!(regs.evten.get(), RTC_EVTEN_COMPARE1_MSK);
        assert_eq!(regs.evtenset.get(), RTC_EVTEN_COMPARE1_MSK);
        assert_eq!(regs.evtenclr.get(), RTC_EVTEN_COMPARE1_MSK);
    }

    #[test]
    fn debug_shows_live_registers_only() {
        let regs = RegisterBlock::INIT;
        regs.intenset.set(RTC_INTENSET_OVRFLW_MSK);
        regs.cc[1].set(7);
        regs.events_compare[0].set(1);
        let s = format!("{regs:?}");
        assert!(s.contains("intenset: 0x00000002"), "{s}");
        assert!(s.contains("cc: [0, 7, 0, 0]"), "{s}");
        assert!(s.contains("events: [0, 0, 1, 0, 0, 0]"), "{s}");
        assert!(!s.contains("reserved"), "{s}");
        assert!(!s.contains("UnsafeCell"), "{s}");
    }
}
