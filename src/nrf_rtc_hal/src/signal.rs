//! Tasks, events, and the masks that route them.
use core::fmt;

use crate::regs::{
    self, offset_events_compare, OFFSET_EVENTS_OVRFLW, OFFSET_EVENTS_TICK, OFFSET_TASKS_CLEAR,
    OFFSET_TASKS_START, OFFSET_TASKS_STOP, OFFSET_TASKS_TRIGOVRFLW,
};

/// RTC tasks. The discriminant is the byte offset of the task register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Task {
    /// Start.
    Start = OFFSET_TASKS_START as u32,
    /// Stop.
    Stop = OFFSET_TASKS_STOP as u32,
    /// Clear.
    Clear = OFFSET_TASKS_CLEAR as u32,
    /// Trigger overflow.
    TriggerOverflow = OFFSET_TASKS_TRIGOVRFLW as u32,
}

impl Task {
    pub const ALL: [Self; 4] = [Self::Start, Self::Stop, Self::Clear, Self::TriggerOverflow];

    /// Get the byte offset of the task register.
    #[inline]
    pub const fn offset(self) -> usize {
        self as u32 as usize
    }
}

/// RTC events. The discriminant is the byte offset of the event register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Event {
    /// Tick event.
    Tick = OFFSET_EVENTS_TICK as u32,
    /// Overflow event.
    Overflow = OFFSET_EVENTS_OVRFLW as u32,
    /// Compare 0 event.
    Compare0 = offset_events_compare(0) as u32,
    /// Compare 1 event.
    Compare1 = offset_events_compare(1) as u32,
    /// Compare 2 event.
    Compare2 = offset_events_compare(2) as u32,
    /// Compare 3 event.
    Compare3 = offset_events_compare(3) as u32,
}

impl Event {
    pub const ALL: [Self; 6] = [
        Self::Tick,
        Self::Overflow,
        Self::Compare0,
        Self::Compare1,
        Self::Compare2,
        Self::Compare3,
    ];

    const COMPARE: [Self; regs::NUM_CC] = [
        Self::Compare0,
        Self::Compare1,
        Self::Compare2,
        Self::Compare3,
    ];

    /// Get the compare event of the specified channel.
    #[inline]
    pub const fn compare(ch: usize) -> Result<Self, BadChannelError> {
        if ch < regs::NUM_CC {
            Ok(Self::COMPARE[ch])
        } else {
            Err(BadChannelError::OutOfRange)
        }
    }

    /// Get the byte offset of the event register.
    #[inline]
    pub const fn offset(self) -> usize {
        self as u32 as usize
    }

    /// Get the `INTENSET` bit that routes this event to the interrupt line.
    pub const fn int_mask(self) -> IntMask {
        match self {
            Self::Tick => IntMask::TICK,
            Self::Overflow => IntMask::OVERFLOW,
            Self::Compare0 => IntMask::COMPARE0,
            Self::Compare1 => IntMask::COMPARE1,
            Self::Compare2 => IntMask::COMPARE2,
            Self::Compare3 => IntMask::COMPARE3,
        }
    }

    /// Get the `EVTEN` bit that routes this event to the event bus.
    #[inline]
    pub const fn evt_mask(self) -> EvtMask {
        EvtMask::from_bits_retain(self.int_mask().bits())
    }
}

bitflags::bitflags! {
    /// RTC interrupts (`INTENSET`/`INTENCLR` bits).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct IntMask: u32 {
        /// RTC interrupt from tick event.
        const TICK = regs::RTC_INTENSET_TICK_MSK;
        /// RTC interrupt from overflow event.
        const OVERFLOW = regs::RTC_INTENSET_OVRFLW_MSK;
        /// RTC interrupt from compare event on channel 0.
        const COMPARE0 = regs::RTC_INTENSET_COMPARE0_MSK;
        /// RTC interrupt from compare event on channel 1.
        const COMPARE1 = regs::RTC_INTENSET_COMPARE1_MSK;
        /// RTC interrupt from compare event on channel 2.
        const COMPARE2 = regs::RTC_INTENSET_COMPARE2_MSK;
        /// RTC interrupt from compare event on channel 3.
        const COMPARE3 = regs::RTC_INTENSET_COMPARE3_MSK;
    }
}

bitflags::bitflags! {
    /// RTC event routing (`EVTEN`/`EVTENSET`/`EVTENCLR` bits).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct EvtMask: u32 {
        const TICK = regs::RTC_EVTEN_TICK_MSK;
        const OVERFLOW = regs::RTC_EVTEN_OVRFLW_MSK;
        const COMPARE0 = regs::RTC_EVTEN_COMPARE0_MSK;
        const COMPARE1 = regs::RTC_EVTEN_COMPARE1_MSK;
        const COMPARE2 = regs::RTC_EVTEN_COMPARE2_MSK;
        const COMPARE3 = regs::RTC_EVTEN_COMPARE3_MSK;
    }
}

impl IntMask {
    /// Get the interrupt bit of the compare event on the specified channel.
    #[inline]
    pub const fn compare(ch: usize) -> Result<Self, BadChannelError> {
        match Event::compare(ch) {
            Ok(e) => Ok(e.int_mask()),
            Err(e) => Err(e),
        }
    }
}

impl EvtMask {
    /// Get the routing bit of the compare event on the specified channel.
    #[inline]
    pub const fn compare(ch: usize) -> Result<Self, BadChannelError> {
        match Event::compare(ch) {
            Ok(e) => Ok(e.evt_mask()),
            Err(e) => Err(e),
        }
    }
}

/// Error type for [`Event::compare`], [`IntMask::compare`], and
/// [`EvtMask::compare`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BadChannelError {
    /// The channel number is out of range.
    OutOfRange,
}

impl fmt::Display for BadChannelError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("compare channel out of range")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_offsets() {
        assert_eq!(Task::Start as u32, 0x000);
        assert_eq!(Task::Stop as u32, 0x004);
        assert_eq!(Task::Clear as u32, 0x008);
        assert_eq!(Task::TriggerOverflow as u32, 0x00C);
    }

    #[test]
    fn event_offsets() {
        assert_eq!(Event::Tick as u32, 0x100);
        assert_eq!(Event::Overflow as u32, 0x104);
        assert_eq!(Event::Compare0 as u32, 0x140);
        assert_eq!(Event::Compare1 as u32, 0x144);
        assert_eq!(Event::Compare2 as u32, 0x148);
        assert_eq!(Event::Compare3 as u32, 0x14C);
    }

    #[test]
    fn int_mask_bits() {
        assert_eq!(IntMask::TICK.bits(), 0x0000_0001);
        assert_eq!(IntMask::OVERFLOW.bits(), 0x0000_0002);
        assert_eq!(IntMask::COMPARE0.bits(), 0x0001_0000);
        assert_eq!(IntMask::COMPARE1.bits(), 0x0002_0000);
        assert_eq!(IntMask::COMPARE2.bits(), 0x0004_0000);
        assert_eq!(IntMask::COMPARE3.bits(), 0x0008_0000);
        assert_eq!(IntMask::all().bits(), 0x000F_0003);
    }

    #[test]
    fn compare_channels() {
        for ch in 0..4 {
            let event = Event::compare(ch).unwrap();
            assert_eq!(event.offset(), 0x140 + ch * 4);
            assert_eq!(IntMask::compare(ch).unwrap().bits(), 1 << (16 + ch));
            assert_eq!(EvtMask::compare(ch).unwrap(), event.evt_mask());
        }
        assert_eq!(Event::compare(4), Err(BadChannelError::OutOfRange));
        assert_eq!(IntMask::compare(usize::MAX), Err(BadChannelError::OutOfRange));
        assert_eq!(format!("{:?}", BadChannelError::OutOfRange), "OutOfRange");
        assert_eq!(
            BadChannelError::OutOfRange.to_string(),
            "compare channel out of range"
        );
    }

    #[test]
    fn event_masks_are_distinct() {
        let mut seen = IntMask::empty();
        for event in Event::ALL {
            assert!(!seen.intersects(event.int_mask()), "{event:?}");
            seen |= event.int_mask();
        }
        assert_eq!(seen, IntMask::all());
    }
}
