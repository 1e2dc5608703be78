// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The disclosure state machine: events in, transitions out.
//!
//! [`Disclosure`] tracks a single panel's open flag and applies the trigger
//! rules. Every input goes through [`Disclosure::handle`], which returns
//! `Some(transition)` only when the state actually changed. Callers that
//! propagate transitions (style updates, measurement requests, focus moves)
//! therefore never see duplicates for repeated identical requests.
//!
//! ## Minimal example
//!
//! ```
//! use overstory_disclosure::machine::{Disclosure, DisclosureEvent, Transition, TriggerMode};
//!
//! let mut tip = Disclosure::new(TriggerMode::Hover);
//! assert_eq!(tip.handle(DisclosureEvent::PointerEnter), Some(Transition::Opened));
//! assert_eq!(tip.handle(DisclosureEvent::PointerEnter), None);
//! assert_eq!(tip.handle(DisclosureEvent::PointerLeave), Some(Transition::Closed));
//! ```

/// Input modality that drives a panel's disclosure.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum TriggerMode {
    /// Primary activation (click, tap, Enter/Space on the anchor) toggles.
    #[default]
    Click,
    /// Pointer enter opens, pointer leave closes.
    Hover,
}

/// An input event for [`Disclosure::handle`].
///
/// Events describe what happened, not what should happen; the machine decides
/// the latter from its trigger mode and current state.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DisclosureEvent {
    /// The anchor was activated (click/tap/keyboard). Toggles under
    /// [`TriggerMode::Click`]; ignored under hover.
    PrimaryActivate,
    /// The pointer entered the anchor. Opens under [`TriggerMode::Hover`].
    PointerEnter,
    /// The pointer left the anchor. Closes under [`TriggerMode::Hover`].
    PointerLeave,
    /// Pointer-down or focus moved outside the panel and its anchor.
    /// Closes under [`TriggerMode::Click`] when the panel is mask-closable.
    /// Activity inside the panel must be suppressed before it gets here.
    OutsideActivity,
    /// An externally controlled open flag changed. Always mirrored,
    /// regardless of trigger mode.
    OpenFlag(bool),
    /// Escape was pressed. Closes an open panel under either trigger.
    Escape,
    /// The panel should close because an item was chosen (selection in a
    /// dropdown). Closes regardless of mask-closable.
    Dismiss,
}

/// A state change produced by [`Disclosure::handle`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Transition {
    /// The panel just opened. The host must request fresh measurement of the
    /// anchor and panel before the next solve — content may have changed
    /// while hidden.
    Opened,
    /// The panel just closed. It stays mounted; only visibility changes.
    Closed,
}

/// Open/closed state for one floating panel.
///
/// The machine is deliberately small: two states, a fixed trigger mode, and a
/// mask-closable flag. Everything else (geometry, visibility style, option
/// highlighting) hangs off the transitions it emits.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Disclosure {
    open: bool,
    trigger: TriggerMode,
    mask_closable: bool,
}

impl Default for Disclosure {
    fn default() -> Self {
        Self::new(TriggerMode::default())
    }
}

impl Disclosure {
    /// A closed machine with the given trigger and outside-dismissal enabled.
    pub fn new(trigger: TriggerMode) -> Self {
        Self {
            open: false,
            trigger,
            mask_closable: true,
        }
    }

    /// Builder: whether outside activity closes the panel (default `true`).
    /// Only consulted under [`TriggerMode::Click`].
    #[must_use]
    pub fn with_mask_closable(mut self, mask_closable: bool) -> Self {
        self.mask_closable = mask_closable;
        self
    }

    /// Builder: start open instead of closed.
    ///
    /// Used for panels whose open flag is externally controlled and already
    /// true at mount time.
    #[must_use]
    pub fn with_initial_open(mut self, open: bool) -> Self {
        self.open = open;
        self
    }

    /// Whether the panel is currently open.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// The trigger mode this machine was constructed with.
    pub fn trigger(&self) -> TriggerMode {
        self.trigger
    }

    /// Whether outside activity may close this panel.
    pub fn mask_closable(&self) -> bool {
        self.mask_closable
    }

    /// Apply one input event.
    ///
    /// Returns the resulting transition, or `None` when the event is ignored
    /// under the current trigger mode or would not change state. Repeating an
    /// event never produces a second transition.
    pub fn handle(&mut self, event: DisclosureEvent) -> Option<Transition> {
        let want = match event {
            DisclosureEvent::PrimaryActivate => match self.trigger {
                TriggerMode::Click => !self.open,
                TriggerMode::Hover => return None,
            },
            DisclosureEvent::PointerEnter => match self.trigger {
                TriggerMode::Hover => true,
                TriggerMode::Click => return None,
            },
            DisclosureEvent::PointerLeave => match self.trigger {
                TriggerMode::Hover => false,
                TriggerMode::Click => return None,
            },
            DisclosureEvent::OutsideActivity => match self.trigger {
                TriggerMode::Click if self.mask_closable => false,
                _ => return None,
            },
            DisclosureEvent::OpenFlag(open) => open,
            DisclosureEvent::Escape | DisclosureEvent::Dismiss => false,
        };
        self.transition_to(want)
    }

    fn transition_to(&mut self, open: bool) -> Option<Transition> {
        if self.open == open {
            return None;
        }
        self.open = open;
        Some(if open {
            Transition::Opened
        } else {
            Transition::Closed
        })
    }
}
