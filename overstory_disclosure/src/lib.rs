// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=overstory_disclosure --heading-base-level=0

//! Overstory Disclosure: deterministic open/closed state for floating panels.
//!
//! ## Overview
//!
//! This crate decides *whether* a floating panel is showing; it never touches
//! geometry. Feed input events into a [`Disclosure`](crate::machine::Disclosure)
//! machine and apply the transitions it returns. The machine owns the open
//! flag exclusively — callers request transitions, they never write the flag —
//! which keeps every consumer (style, measurement, focus) in agreement about
//! the current state.
//!
//! Three modules:
//!
//! - [`machine`]: the [`Disclosure`](crate::machine::Disclosure) state machine.
//!   Events in ([`DisclosureEvent`](crate::machine::DisclosureEvent)), optional
//!   [`Transition`](crate::machine::Transition) out. `None` means the event did
//!   not change state, so nothing downstream needs to be notified.
//! - [`outside`]: an instance-owned registry deciding whether pointer/focus
//!   activity landed outside a set of "inside" elements, for auto-dismissal.
//! - [`options`]: the option-list model for dropdown panels, a tagged union
//!   of primitive, renderable, keyed, and grouped entries, with path-based
//!   flattening and highlight navigation.
//!
//! ## Trigger modes
//!
//! A machine is constructed with a fixed [`TriggerMode`](crate::machine::TriggerMode):
//!
//! - `Click`: primary activation on the anchor toggles; outside activity
//!   closes (when mask-closable).
//! - `Hover`: pointer enter opens, pointer leave closes; primary activation
//!   and outside activity are ignored.
//!
//! Independently of the trigger, an externally controlled open flag can be
//! mirrored in with [`DisclosureEvent::OpenFlag`](crate::machine::DisclosureEvent::OpenFlag),
//! and `Escape` closes an open panel.
//!
//! ## Example
//!
//! ```
//! use overstory_disclosure::machine::{Disclosure, DisclosureEvent, Transition, TriggerMode};
//!
//! let mut d = Disclosure::new(TriggerMode::Click);
//! assert!(!d.is_open());
//!
//! // Clicking the anchor toggles.
//! assert_eq!(d.handle(DisclosureEvent::PrimaryActivate), Some(Transition::Opened));
//!
//! // A second "open" request is idempotent: no transition, no notification.
//! assert_eq!(d.handle(DisclosureEvent::OpenFlag(true)), None);
//!
//! // Clicking elsewhere on the page closes it.
//! assert_eq!(d.handle(DisclosureEvent::OutsideActivity), Some(Transition::Closed));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod machine;
pub mod options;
pub mod outside;
