//! Register accessors.
//!
//! Each function takes the owner of a register block, `p_rtc`. Passing a bare
//! [`RegisterBlock`] turns every accessor into a plain memory access. Passing
//! a peripheral model such as [`SimRtc`] additionally applies the register's
//! hardware side effects after the access.
//!
//! None of the accessors validate their inputs. A compare channel must be in
//! range `0..4`; anything else panics on the slice index.
//!
//! [`RegisterBlock`]: crate::regs::RegisterBlock
//! [`SimRtc`]: crate::sim::SimRtc
use crate::{
    signal::{Event, EvtMask, IntMask, Task},
    sim::RtcPeripheral,
};

/// Set the compare value for a channel.
#[inline]
pub fn cc_set<P: RtcPeripheral + ?Sized>(p_rtc: &P, ch: usize, cc_val: u32) {
    p_rtc.regs().cc[ch].set(cc_val);
    p_rtc.regw_cc(ch);
}

/// Get the compare value for a channel (`CC[ch]`).
#[inline]
pub fn cc_get<P: RtcPeripheral + ?Sized>(p_rtc: &P, ch: usize) -> u32 {
    p_rtc.regs().cc[ch].get()
}

/// Enable interrupts.
#[inline]
pub fn int_enable<P: RtcPeripheral + ?Sized>(p_rtc: &P, mask: IntMask) {
    p_rtc.regs().intenset.set(mask.bits());
    p_rtc.regw_intenset();
}

/// Disable interrupts.
#[inline]
pub fn int_disable<P: RtcPeripheral + ?Sized>(p_rtc: &P, mask: IntMask) {
    p_rtc.regs().intenclr.set(mask.bits());
    p_rtc.regw_intenclr();
}

/// Get the subset of `mask` that is currently enabled.
#[inline]
pub fn int_is_enabled<P: RtcPeripheral + ?Sized>(p_rtc: &P, mask: IntMask) -> IntMask {
    IntMask::from_bits_retain(p_rtc.regs().intenset.get() & mask.bits())
}

/// Get the value of `INTENSET`, i.e., all enabled interrupts.
#[inline]
pub fn int_get<P: RtcPeripheral + ?Sized>(p_rtc: &P) -> IntMask {
    IntMask::from_bits_retain(p_rtc.regs().intenset.get())
}

/// Read the event register. A non-zero value means the event is pending.
#[inline]
pub fn event_pending<P: RtcPeripheral + ?Sized>(p_rtc: &P, event: Event) -> u32 {
    // Safety: `Event` discriminants are register offsets
    unsafe { p_rtc.regs().reg_at(event.offset()) }.get()
}

/// Clear an event.
#[inline]
pub fn event_clear<P: RtcPeripheral + ?Sized>(p_rtc: &P, event: Event) {
    // Safety: `Event` discriminants are register offsets
    unsafe { p_rtc.regs().reg_at(event.offset()) }.set(0);
}

/// Get the counter value.
#[inline]
pub fn counter_get<P: RtcPeripheral + ?Sized>(p_rtc: &P) -> u32 {
    p_rtc.regr_counter();
    p_rtc.regs().counter.get()
}

/// Set the prescaler value.
#[inline]
pub fn prescaler_set<P: RtcPeripheral + ?Sized>(p_rtc: &P, val: u32) {
    p_rtc.regs().prescaler.set(val);
}

/// Get the prescaler value.
#[inline]
pub fn prescaler_get<P: RtcPeripheral + ?Sized>(p_rtc: &P) -> u32 {
    p_rtc.regs().prescaler.get()
}

/// Get the address of an event register, e.g., for connecting it to a PPI
/// channel.
#[inline]
pub fn event_address_get<P: RtcPeripheral + ?Sized>(p_rtc: &P, event: Event) -> usize {
    p_rtc.regs().base_address() + event.offset()
}

/// Get the address of a task register.
#[inline]
pub fn task_address_get<P: RtcPeripheral + ?Sized>(p_rtc: &P, task: Task) -> usize {
    p_rtc.regs().base_address() + task.offset()
}

/// Start a task.
#[inline]
pub fn task_trigger<P: RtcPeripheral + ?Sized>(p_rtc: &P, task: Task) {
    // Safety: `Task` discriminants are register offsets
    unsafe { p_rtc.regs().reg_at(task.offset()) }.set(1);
    p_rtc.regw_task(task);
}

/// Enable event routing.
#[inline]
pub fn event_enable<P: RtcPeripheral + ?Sized>(p_rtc: &P, mask: EvtMask) {
    p_rtc.regs().evtenset.set(mask.bits());
    p_rtc.regw_evtenset();
}

/// Disable event routing.
#[inline]
pub fn event_disable<P: RtcPeripheral + ?Sized>(p_rtc: &P, mask: EvtMask) {
    p_rtc.regs().evtenclr.set(mask.bits());
    p_rtc.regw_evtenclr();
}

/// Get the value of `EVTEN`, i.e., all events routed to the event bus.
#[inline]
pub fn event_get<P: RtcPeripheral + ?Sized>(p_rtc: &P) -> EvtMask {
    EvtMask::from_bits_retain(p_rtc.regs().evten.get())
}
