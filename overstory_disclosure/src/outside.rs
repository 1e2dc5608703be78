// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Outside-activity detection: did that pointer-down or focus change land
//! outside a panel?
//!
//! [`Watchers`] is an instance-owned observer registry. Each watcher names
//! the elements that count as "inside" (typically a panel's content plus its
//! anchor) and a handler to run when activity lands anywhere else. The
//! embedder forwards every document-level pointer-down and focus-in together
//! with the target's root→target ancestor path; [`Watchers::notify`] runs the
//! handlers whose inside set does not intersect that path.
//!
//! The registry lives on whatever owns the panels; there is no global
//! registry, so two hosts on one page cannot observe each other's watchers,
//! and dropping the owner drops every subscription with it.
//!
//! ## Usage
//!
//! 1) [`Watchers::observe`] when a dismissable panel opens (or mounts),
//!    keeping the returned [`WatchId`].
//! 2) Forward document-level activity to [`Watchers::notify`] with the
//!    event target's ancestor path.
//! 3) [`Watchers::unobserve`] with the kept id on unmount. The id is the
//!    disposer; dropping it without calling `unobserve` leaks the watcher
//!    until the registry itself is dropped. For watchers bounded by a scope
//!    rather than a panel lifetime, [`Watchers::observe_scoped`] returns a
//!    guard that disposes on drop instead.
//!
//! ## Minimal example
//!
//! ```
//! use overstory_disclosure::outside::{Activity, Watchers};
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let mut w: Watchers<u32> = Watchers::new();
//! let fired = Rc::new(Cell::new(0));
//! let f = Rc::clone(&fired);
//! let id = w.observe(vec![Some(7), None], move |_| f.set(f.get() + 1));
//!
//! // The path runs through element 7, so this is inside: suppressed.
//! w.notify(&[1, 7, 9], Activity::PointerDown);
//! assert_eq!(fired.get(), 0);
//!
//! // A path elsewhere is outside: the handler runs.
//! w.notify(&[1, 2], Activity::PointerDown);
//! assert_eq!(fired.get(), 1);
//!
//! w.unobserve(id);
//! w.notify(&[1, 2], Activity::PointerDown);
//! assert_eq!(fired.get(), 1);
//! ```

use alloc::boxed::Box;
use alloc::vec::Vec;

/// The kind of document-level activity being classified.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Activity {
    /// A pointer button went down. Listened for at press time (not click)
    /// so a panel closes before any click handler under the pointer runs.
    PointerDown,
    /// Keyboard focus moved into an element, e.g. by tabbing.
    FocusIn,
}

/// Identifier of a registered watcher (generational).
///
/// Returned by [`Watchers::observe`]; pass it to [`Watchers::unobserve`] to
/// dispose of the subscription. Stale ids are ignored.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct WatchId(u32, u32);

impl WatchId {
    fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Whether a target path counts as outside the given inside set.
///
/// `None` entries are unattached references and are skipped. An inside set
/// with no attached entries treats everything as outside — a watcher for a
/// panel that never rendered still fires, matching the "close on any
/// activity" intent.
pub fn is_outside<E: PartialEq>(inside: &[Option<E>], target_path: &[E]) -> bool {
    !inside
        .iter()
        .filter_map(|e| e.as_ref())
        .any(|e| target_path.contains(e))
}

struct Watcher<E> {
    inside: Vec<Option<E>>,
    handler: Box<dyn FnMut(Activity)>,
}

/// Generational slot. The generation outlives the watcher so a disposed id
/// can never alias the slot's next occupant.
struct Slot<E> {
    generation: u32,
    watcher: Option<Watcher<E>>,
}

/// A registry of outside-activity watchers over element keys `E`.
///
/// Owned by the component instance that manages the panels; never a
/// module-level singleton. See the [module docs](self) for the protocol.
pub struct Watchers<E> {
    slots: Vec<Slot<E>>,
    free_list: Vec<usize>,
}

impl<E> core::fmt::Debug for Watchers<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let alive = self.slots.iter().filter(|s| s.watcher.is_some()).count();
        f.debug_struct("Watchers")
            .field("alive", &alive)
            .field("slots_total", &self.slots.len())
            .field("free_list", &self.free_list.len())
            .finish_non_exhaustive()
    }
}

impl<E: PartialEq> Default for Watchers<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: PartialEq> Watchers<E> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
        }
    }

    /// Number of live watchers.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.watcher.is_some()).count()
    }

    /// Whether no watchers are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Register a watcher.
    ///
    /// `inside` lists the elements whose subtrees do not count as outside;
    /// unattached entries may be `None` and are tolerated. `handler` runs on
    /// every notified activity that lands outside all attached entries.
    pub fn observe<F>(&mut self, inside: Vec<Option<E>>, handler: F) -> WatchId
    where
        F: FnMut(Activity) + 'static,
    {
        let watcher = Watcher {
            inside,
            handler: Box::new(handler),
        };
        if let Some(idx) = self.free_list.pop() {
            let slot = &mut self.slots[idx];
            slot.generation += 1;
            slot.watcher = Some(watcher);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "WatchId uses 32-bit indices by design."
            )]
            WatchId::new(idx as u32, slot.generation)
        } else {
            self.slots.push(Slot {
                generation: 1,
                watcher: Some(watcher),
            });
            #[allow(
                clippy::cast_possible_truncation,
                reason = "WatchId uses 32-bit indices by design."
            )]
            WatchId::new((self.slots.len() - 1) as u32, 1)
        }
    }

    /// Dispose of a watcher. Stale or already-disposed ids are no-ops.
    pub fn unobserve(&mut self, id: WatchId) {
        let Some(slot) = self.slots.get_mut(id.idx()) else {
            return;
        };
        if slot.generation == id.1 && slot.watcher.is_some() {
            slot.watcher = None;
            self.free_list.push(id.idx());
        }
    }

    /// Register a watcher bounded by a scope instead of an explicit
    /// [`Watchers::unobserve`] call.
    ///
    /// The returned guard borrows the registry and disposes the watcher when
    /// dropped. Activity arriving while the guard is live is forwarded
    /// through [`WatchGuard::registry`].
    pub fn observe_scoped<F>(&mut self, inside: Vec<Option<E>>, handler: F) -> WatchGuard<'_, E>
    where
        F: FnMut(Activity) + 'static,
    {
        let id = self.observe(inside, handler);
        WatchGuard { registry: self, id }
    }

    /// Replace a watcher's inside set, e.g. after its panel re-rendered and
    /// element references changed. Stale ids are no-ops.
    pub fn set_inside(&mut self, id: WatchId, inside: Vec<Option<E>>) {
        if let Some(w) = self.watcher_mut(id) {
            w.inside = inside;
        }
    }

    /// Classify one document-level activity and run the matching handlers.
    ///
    /// `target_path` is the root→target ancestor path of the event target.
    /// Returns how many watchers fired. Watchers run in registration order;
    /// handlers cannot re-enter the registry (they do not receive it).
    pub fn notify(&mut self, target_path: &[E], activity: Activity) -> usize {
        let mut fired = 0;
        for slot in &mut self.slots {
            let Some(w) = slot.watcher.as_mut() else {
                continue;
            };
            if is_outside(&w.inside, target_path) {
                (w.handler)(activity);
                fired += 1;
            }
        }
        fired
    }

    fn watcher_mut(&mut self, id: WatchId) -> Option<&mut Watcher<E>> {
        let slot = self.slots.get_mut(id.idx())?;
        if slot.generation != id.1 {
            return None;
        }
        slot.watcher.as_mut()
    }
}

/// Disposer guard from [`Watchers::observe_scoped`].
///
/// Keeps the watcher registered for as long as it lives and disposes it on
/// drop, so a watcher tied to a lexical scope cannot be leaked by an early
/// return.
#[must_use = "dropping the guard disposes the watcher immediately"]
pub struct WatchGuard<'a, E: PartialEq> {
    registry: &'a mut Watchers<E>,
    id: WatchId,
}

impl<E: PartialEq> WatchGuard<'_, E> {
    /// The guarded watcher's id.
    pub fn id(&self) -> WatchId {
        self.id
    }

    /// The registry, for notifying activity while the guard is live.
    pub fn registry(&mut self) -> &mut Watchers<E> {
        self.registry
    }
}

impl<E: PartialEq> core::fmt::Debug for WatchGuard<'_, E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WatchGuard").field("id", &self.id).finish()
    }
}

impl<E: PartialEq> Drop for WatchGuard<'_, E> {
    fn drop(&mut self) {
        self.registry.unobserve(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::RefCell;

    fn recording(
        w: &mut Watchers<u32>,
        inside: Vec<Option<u32>>,
    ) -> (WatchId, Rc<RefCell<Vec<Activity>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let id = w.observe(inside, move |a| sink.borrow_mut().push(a));
        (id, log)
    }

    #[test]
    fn inside_path_is_suppressed() {
        let mut w = Watchers::new();
        let (_, log) = recording(&mut w, vec![Some(10), Some(20)]);

        assert_eq!(w.notify(&[1, 10, 11], Activity::PointerDown), 0);
        assert_eq!(w.notify(&[20], Activity::FocusIn), 0);
        assert!(log.borrow().is_empty());

        assert_eq!(w.notify(&[1, 2, 3], Activity::PointerDown), 1);
        assert_eq!(*log.borrow(), vec![Activity::PointerDown]);
    }

    // Unattached references are skipped; an all-None set fires for everything.
    #[test]
    fn none_refs_are_tolerated() {
        let mut w = Watchers::new();
        let (_, log) = recording(&mut w, vec![None, Some(5)]);
        assert_eq!(w.notify(&[5], Activity::PointerDown), 0);
        assert_eq!(w.notify(&[6], Activity::PointerDown), 1);

        let (_, unattached) = recording(&mut w, vec![None, None]);
        assert_eq!(w.notify(&[5], Activity::PointerDown), 2);
        assert_eq!(unattached.borrow().len(), 1);
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn empty_inside_set_fires_for_everything() {
        let mut w = Watchers::new();
        let (_, log) = recording(&mut w, Vec::new());
        assert_eq!(w.notify(&[], Activity::FocusIn), 1);
        assert_eq!(w.notify(&[1, 2, 3], Activity::PointerDown), 1);
        assert_eq!(
            *log.borrow(),
            vec![Activity::FocusIn, Activity::PointerDown]
        );
    }

    #[test]
    fn focus_in_reaches_handlers_like_pointer_down() {
        let mut w = Watchers::new();
        let (_, log) = recording(&mut w, vec![Some(1)]);
        let _ = w.notify(&[9], Activity::FocusIn);
        assert_eq!(*log.borrow(), vec![Activity::FocusIn]);
    }

    #[test]
    fn unobserve_disposes_and_stale_ids_are_noops() {
        let mut w = Watchers::new();
        let (id, log) = recording(&mut w, vec![Some(1)]);
        w.unobserve(id);
        assert!(w.is_empty());
        assert_eq!(w.notify(&[9], Activity::PointerDown), 0);
        assert!(log.borrow().is_empty());

        // Double-dispose is harmless.
        w.unobserve(id);

        // The slot is reused with a bumped generation; the stale id cannot
        // touch the new occupant.
        let (id2, log2) = recording(&mut w, vec![Some(2)]);
        assert_ne!(id, id2);
        w.unobserve(id);
        w.set_inside(id, vec![None]);
        assert_eq!(w.notify(&[9], Activity::PointerDown), 1);
        assert_eq!(log2.borrow().len(), 1);
    }

    #[test]
    fn scoped_guard_disposes_on_drop() {
        let mut w = Watchers::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        {
            let sink = Rc::clone(&log);
            let mut guard =
                w.observe_scoped(vec![Some(1)], move |a| sink.borrow_mut().push(a));
            assert_eq!(guard.registry().notify(&[9], Activity::PointerDown), 1);
            assert_eq!(guard.registry().notify(&[1], Activity::PointerDown), 0);
        }
        assert!(w.is_empty());
        assert_eq!(w.notify(&[9], Activity::PointerDown), 0);
        assert_eq!(*log.borrow(), vec![Activity::PointerDown]);
    }

    #[test]
    fn set_inside_replaces_the_set() {
        let mut w = Watchers::new();
        let (id, log) = recording(&mut w, vec![Some(1)]);
        assert_eq!(w.notify(&[1], Activity::PointerDown), 0);
        w.set_inside(id, vec![Some(2)]);
        assert_eq!(w.notify(&[1], Activity::PointerDown), 1);
        assert_eq!(w.notify(&[2], Activity::PointerDown), 0);
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn watchers_fire_independently() {
        let mut w = Watchers::new();
        let (_, a) = recording(&mut w, vec![Some(1)]);
        let (_, b) = recording(&mut w, vec![Some(2)]);
        let fired = w.notify(&[1], Activity::PointerDown);
        assert_eq!(fired, 1);
        assert!(a.borrow().is_empty());
        assert_eq!(b.borrow().len(), 1);
    }

    #[test]
    fn is_outside_rules() {
        assert!(is_outside::<u32>(&[], &[1, 2]));
        assert!(is_outside(&[None], &[1, 2]));
        assert!(!is_outside(&[Some(2)], &[1, 2]));
        assert!(is_outside(&[Some(3)], &[1, 2]));
        // An empty path is outside everything attached.
        assert!(is_outside(&[Some(3)], &[]));
    }
}
