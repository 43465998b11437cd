//! # Draft State
//!
//! Holds the invoice currently being edited.
//!
//! ## Thread Safety
//! The draft is wrapped in `Arc<Mutex<T>>` because:
//! 1. Multiple operations may access/modify the draft
//! 2. Only one operation should modify the draft at a time
//! 3. Service operations can run concurrently
//!
//! ## Draft Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Draft State Operations                               │
//! │                                                                         │
//! │  User Action              Service Operation       Draft State Change    │
//! │  ───────────              ─────────────────       ──────────────────    │
//! │                                                                         │
//! │  New Invoice ────────────► new_draft() ─────────► Some(Bill::draft)    │
//! │                                                                         │
//! │  Edit Line Item ─────────► with_draft_mut() ────► items[i] changed,    │
//! │                                                   totals recomputed     │
//! │                                                                         │
//! │  Save Invoice ───────────► save_bill() ─────────► draft persisted,     │
//! │                                                   state cleared         │
//! │                                                                         │
//! │  Discard ────────────────► clear() ─────────────► None                 │
//! │                                                                         │
//! │  NOTE: All write operations acquire the Mutex lock exclusively.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};
use sutra_core::Bill;

/// Shared handle to the invoice being edited, if any.
#[derive(Debug, Clone, Default)]
pub struct DraftState {
    draft: Arc<Mutex<Option<Bill>>>,
}

impl DraftState {
    /// Creates an empty draft state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the current draft with a fresh one.
    pub fn start(&self, bill: Bill) {
        let mut guard = self.lock();
        *guard = Some(bill);
    }

    /// Runs a closure over the current draft, if one exists.
    pub fn with_draft<T>(&self, f: impl FnOnce(&Bill) -> T) -> Option<T> {
        let guard = self.lock();
        guard.as_ref().map(f)
    }

    /// Runs a mutating closure over the current draft, if one exists.
    ///
    /// The closure is responsible for calling `recompute()` if it touched
    /// items or rates; `Bill::update_item` and friends already do.
    pub fn with_draft_mut<T>(&self, f: impl FnOnce(&mut Bill) -> T) -> Option<T> {
        let mut guard = self.lock();
        guard.as_mut().map(f)
    }

    /// Takes the draft out of the state, leaving it empty.
    pub fn take(&self) -> Option<Bill> {
        self.lock().take()
    }

    /// Discards the current draft.
    pub fn clear(&self) {
        *self.lock() = None;
    }

    /// Returns true if a draft is in progress.
    pub fn is_active(&self) -> bool {
        self.lock().is_some()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<Bill>> {
        // A poisoned lock means another thread panicked mid-edit; the draft
        // data itself is still a coherent Bill value, so keep going.
        self.draft.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn sample_draft() -> Bill {
        Bill::draft("SC20250001", NaiveDate::from_ymd_opt(2025, 4, 10).unwrap())
    }

    #[test]
    fn test_empty_state() {
        let state = DraftState::new();
        assert!(!state.is_active());
        assert!(state.with_draft(|b| b.invoice_no.clone()).is_none());
    }

    #[test]
    fn test_start_and_edit() {
        let state = DraftState::new();
        state.start(sample_draft());
        assert!(state.is_active());

        state.with_draft_mut(|bill| {
            bill.update_item(1, |item| {
                item.description = "Nylon bush".into();
                item.quantity = Decimal::from(4);
                item.rate = Decimal::from(95);
            })
        });

        let total = state.with_draft(|b| b.grand_total).unwrap();
        assert_eq!(total, "448.40".parse().unwrap());
    }

    #[test]
    fn test_take_empties_state() {
        let state = DraftState::new();
        state.start(sample_draft());

        let bill = state.take().unwrap();
        assert_eq!(bill.invoice_no, "SC20250001");
        assert!(!state.is_active());
    }

    #[test]
    fn test_clones_share_state() {
        let state = DraftState::new();
        let other = state.clone();
        state.start(sample_draft());
        assert!(other.is_active());

        other.clear();
        assert!(!state.is_active());
    }
}
