//! Refuses to sign for slots and epochs beyond a short window past the
//! current wall-clock time.

use ethereum_types::{unix_now, Epoch, NetworkCalendar, Slot};

/// How far ahead of now a request may be, in seconds.
pub const FAR_FUTURE_MAX_VALID_SECS: i64 = 20 * 60;

pub fn max_valid_slot_at<C: NetworkCalendar + ?Sized>(network: &C, now: i64) -> Slot {
    network.estimated_slot_at_time(now.saturating_add(FAR_FUTURE_MAX_VALID_SECS))
}

pub fn max_valid_epoch_at<C: NetworkCalendar + ?Sized>(network: &C, now: i64) -> Epoch {
    network.estimated_epoch_at_slot(max_valid_slot_at(network, now))
}

pub fn is_valid_future_epoch_at<C: NetworkCalendar + ?Sized>(network: &C, epoch: Epoch, now: i64) -> bool {
    epoch <= max_valid_epoch_at(network, now)
}

pub fn is_valid_future_slot_at<C: NetworkCalendar + ?Sized>(network: &C, slot: Slot, now: i64) -> bool {
    slot <= max_valid_slot_at(network, now)
}

pub fn is_valid_future_epoch<C: NetworkCalendar + ?Sized>(network: &C, epoch: Epoch) -> bool {
    is_valid_future_epoch_at(network, epoch, unix_now())
}

pub fn is_valid_future_slot<C: NetworkCalendar + ?Sized>(network: &C, slot: Slot) -> bool {
    is_valid_future_slot_at(network, slot, unix_now())
}
