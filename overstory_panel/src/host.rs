// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The floating-panel host: mounted panels, the shared root, and damage.
//!
//! [`Host`] owns every floating panel's bookkeeping: its anchor and content
//! keys, its disclosure machine, its last measurements, and its last solved
//! rect. The embedder drives it in a read-then-write cycle:
//!
//! 1. Route input: [`Host::pointer_down`], [`Host::hover_enter`],
//!    [`Host::escape`], [`Host::set_open_flag`], … Each returns the
//!    transitions that actually happened.
//! 2. Read geometry: [`Host::sync`] pulls fresh anchor/content rects and the
//!    viewport through the [`Measurements`] seam and marks what changed.
//! 3. Write positions: [`Host::commit`] re-solves every marked panel and
//!    returns coarse [`Damage`]. Panels whose newly solved rect equals the
//!    stored one are skipped, so measure→solve→measure feedback loops settle
//!    instead of ping-ponging.
//! 4. Apply styles: [`Host::style`] yields position, z-index, and
//!    visibility for each panel.
//!
//! Panels stay mounted while closed — closing only flips the style's
//! visibility — so their content keeps its measured size and embedder-side
//! state (scroll offsets, focus) across reopen.
//!
//! ## The shared root
//!
//! All panels render into one detached container at the end of the document,
//! outside any clipping ancestor. The host models it with owner counting:
//! the first [`Host::mount`] directs the embedder to create it, later mounts
//! reuse it, and the [`Host::unmount`] that drops the count to zero directs
//! its removal. An embedder with its own container calls
//! [`Host::adopt_root`] once; an adopted root is never removed.

use alloc::vec::Vec;
use bitflags::bitflags;
use kurbo::{Point, Rect, Size};
use overstory_disclosure::machine::{Disclosure, DisclosureEvent, Transition};
use overstory_disclosure::outside::is_outside;
use overstory_placement::{OFFSCREEN, solve};

use crate::options::{PanelOptions, PanelWidth};

/// Identifier for a mounted panel (generational).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct PanelId(u32, u32);

impl PanelId {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "PanelId uses 32-bit indices by design."
    )]
    const fn new(idx: usize, generation: u32) -> Self {
        Self(idx as u32, generation)
    }

    const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags! {
    /// Why a panel needs re-solving at the next [`Host::commit`].
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Reposition: u8 {
        /// The anchor's measured rect changed.
        const ANCHOR   = 0b0000_0001;
        /// The panel content's measured size changed.
        const CONTENT  = 0b0000_0010;
        /// The viewport was resized.
        const VIEWPORT = 0b0000_0100;
        /// The panel just opened; solve again from fresh measurements even
        /// if nothing appears to have moved.
        const OPENED   = 0b0000_1000;
    }
}

/// Geometry seam the embedder implements.
///
/// Rects are read fresh on every [`Host::sync`]; the host never caches
/// measurements across frames on the embedder's behalf. All coordinates are
/// viewport-relative.
pub trait Measurements<K> {
    /// Current bounding rect of the element behind `key`, or `None` while it
    /// is not attached to the document.
    fn bounding_rect(&self, key: &K) -> Option<Rect>;

    /// Current viewport size.
    fn viewport(&self) -> Size;
}

/// What [`Host::mount`]/[`Host::unmount`] want done with the real shared
/// root container.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum RootDirective {
    /// No container exists: create it and append it to the document.
    Create,
    /// A container exists: mount into it.
    Reuse,
    /// Leave the container alone.
    Keep,
    /// The last panel is gone: remove the container from the document.
    Remove,
}

/// A batched set of changes derived from [`Host::commit`].
#[derive(Clone, Debug, Default)]
pub struct Damage {
    /// World-space rectangles that should be repainted: the old and new
    /// rect of every panel that moved.
    pub dirty_rects: Vec<Rect>,
}

impl Damage {
    /// Returns the union of all damage rects.
    pub fn union_rect(&self) -> Option<Rect> {
        let mut it = self.dirty_rects.iter().copied();
        let first = it.next()?;
        Some(it.fold(first, |acc, r| acc.union(r)))
    }
}

/// Presentation state for one panel, ready to map onto the embedder's
/// styling system.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PanelStyle {
    /// Top-left corner, viewport-relative. [`OFFSCREEN`] until the panel's
    /// anchor and content have both been measured.
    pub position: Point,
    /// Stacking order.
    pub z_index: i32,
    /// Whether the panel is disclosed. Closed panels stay mounted.
    pub visible: bool,
    /// 1.0 when visible, 0.0 when hidden.
    pub opacity: f64,
    /// Opacity transition duration in seconds.
    pub fade_secs: f64,
}

struct Panel<K> {
    anchor: K,
    content: Option<K>,
    options: PanelOptions,
    disclosure: Disclosure,
    anchor_rect: Option<Rect>,
    content_size: Option<Size>,
    /// Rect of the last solve actually applied (origin and effective size).
    solved: Option<Rect>,
    marks: Reposition,
}

/// Generational slot. The generation outlives the panel so a stale id can
/// never alias the slot's next occupant.
struct Slot<K> {
    generation: u32,
    panel: Option<Panel<K>>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum RootState {
    Absent,
    Owned { owners: usize },
    Adopted { owners: usize },
}

/// Host for every floating panel of one embedder surface.
///
/// Generic over the embedder's element key `K` (a DOM node handle, a widget
/// id, …). See the [module docs](self) for the drive cycle.
pub struct Host<K> {
    slots: Vec<Slot<K>>,
    free_list: Vec<usize>,
    root: RootState,
    viewport: Size,
}

impl<K> core::fmt::Debug for Host<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let alive = self.slots.iter().filter(|s| s.panel.is_some()).count();
        f.debug_struct("Host")
            .field("panels_alive", &alive)
            .field("slots_total", &self.slots.len())
            .field("root", &self.root)
            .field("viewport", &self.viewport)
            .finish_non_exhaustive()
    }
}

impl<K> Default for Host<K>
where
    K: Clone + PartialEq,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Host<K>
where
    K: Clone + PartialEq,
{
    /// An empty host with a zero viewport. Call [`Host::sync`] (or
    /// [`Host::set_viewport`]) before the first commit.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
            root: RootState::Absent,
            viewport: Size::ZERO,
        }
    }

    /// An empty host with a known viewport.
    pub fn with_viewport(viewport: Size) -> Self {
        Self {
            viewport,
            ..Self::new()
        }
    }

    /// Mark the shared root as externally managed.
    ///
    /// The host keeps counting owners but never directs the container's
    /// removal; mounts always reuse it.
    pub fn adopt_root(&mut self) {
        self.root = match self.root {
            RootState::Absent => RootState::Adopted { owners: 0 },
            RootState::Owned { owners } | RootState::Adopted { owners } => {
                RootState::Adopted { owners }
            }
        };
    }

    /// Whether a shared root currently exists (owned or adopted).
    pub fn has_root(&self) -> bool {
        self.root != RootState::Absent
    }

    /// How many mounted panels hold the shared root alive.
    pub fn root_owners(&self) -> usize {
        match self.root {
            RootState::Absent => 0,
            RootState::Owned { owners } | RootState::Adopted { owners } => owners,
        }
    }

    /// Number of mounted panels.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.panel.is_some()).count()
    }

    /// Whether no panels are mounted.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Mount a panel anchored to `anchor`.
    ///
    /// The returned directive tells the embedder what to do with the real
    /// root container before inserting the panel node. The panel starts
    /// unmeasured; declare its content element with [`Host::set_content`]
    /// once rendered, then [`Host::sync`].
    pub fn mount(&mut self, anchor: K, options: PanelOptions) -> (PanelId, RootDirective) {
        let directive = match self.root {
            RootState::Absent => {
                self.root = RootState::Owned { owners: 1 };
                #[cfg(feature = "tracing")]
                tracing::debug!("created shared panel root");
                RootDirective::Create
            }
            RootState::Owned { owners } => {
                self.root = RootState::Owned { owners: owners + 1 };
                RootDirective::Reuse
            }
            RootState::Adopted { owners } => {
                self.root = RootState::Adopted { owners: owners + 1 };
                RootDirective::Reuse
            }
        };

        let panel = Panel {
            disclosure: Disclosure::new(options.trigger)
                .with_mask_closable(options.mask_closable)
                .with_initial_open(options.open.unwrap_or(false)),
            anchor,
            content: None,
            options,
            anchor_rect: None,
            content_size: None,
            solved: None,
            marks: Reposition::empty(),
        };

        let id = if let Some(idx) = self.free_list.pop() {
            let slot = &mut self.slots[idx];
            slot.generation += 1;
            slot.panel = Some(panel);
            PanelId::new(idx, slot.generation)
        } else {
            self.slots.push(Slot {
                generation: 1,
                panel: Some(panel),
            });
            PanelId::new(self.slots.len() - 1, 1)
        };
        (id, directive)
    }

    /// Unmount a panel, dropping its state and its hold on the shared root.
    ///
    /// Returns [`RootDirective::Remove`] when this was the last owner of an
    /// owned root. Stale ids are no-ops and return
    /// [`RootDirective::Keep`].
    pub fn unmount(&mut self, id: PanelId) -> RootDirective {
        let Some(slot) = self.slots.get_mut(id.idx()) else {
            return RootDirective::Keep;
        };
        if slot.generation != id.1 || slot.panel.is_none() {
            return RootDirective::Keep;
        }
        slot.panel = None;
        self.free_list.push(id.idx());

        match self.root {
            RootState::Owned { owners } if owners <= 1 => {
                self.root = RootState::Absent;
                #[cfg(feature = "tracing")]
                tracing::debug!("removed shared panel root");
                RootDirective::Remove
            }
            RootState::Owned { owners } => {
                self.root = RootState::Owned { owners: owners - 1 };
                RootDirective::Keep
            }
            RootState::Adopted { owners } => {
                self.root = RootState::Adopted {
                    owners: owners.saturating_sub(1),
                };
                RootDirective::Keep
            }
            RootState::Absent => RootDirective::Keep,
        }
    }

    /// Declare the panel's rendered content element, so [`Host::sync`] can
    /// measure it and input routing can tell inside from outside.
    pub fn set_content(&mut self, id: PanelId, content: K) {
        if let Some(p) = self.panel_mut(id) {
            p.content = Some(content);
        }
    }

    /// Record a viewport resize, marking every panel for re-solve.
    pub fn set_viewport(&mut self, viewport: Size) {
        if self.viewport == viewport {
            return;
        }
        self.viewport = viewport;
        for slot in &mut self.slots {
            if let Some(p) = slot.panel.as_mut() {
                p.marks |= Reposition::VIEWPORT;
            }
        }
    }

    /// The viewport size the next commit will solve against.
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Pull fresh geometry through the [`Measurements`] seam.
    ///
    /// Reads the viewport and every panel's anchor and content rects,
    /// marking what changed. Unattached elements (`None` rects) leave the
    /// last known measurement in place.
    pub fn sync<M: Measurements<K>>(&mut self, measurements: &M) {
        self.set_viewport(measurements.viewport());
        for slot in &mut self.slots {
            let Some(p) = slot.panel.as_mut() else {
                continue;
            };
            if let Some(rect) = measurements.bounding_rect(&p.anchor)
                && p.anchor_rect != Some(rect)
            {
                p.anchor_rect = Some(rect);
                p.marks |= Reposition::ANCHOR;
            }
            if let Some(content) = p.content.as_ref()
                && let Some(rect) = measurements.bounding_rect(content)
            {
                let size = rect.size();
                if p.content_size != Some(size) {
                    p.content_size = Some(size);
                    p.marks |= Reposition::CONTENT;
                }
            }
        }
    }

    /// Re-solve every marked panel and return coarse damage.
    ///
    /// Panels missing either measurement keep their current position.
    /// A panel whose newly solved rect equals its stored one produces no
    /// damage; that equality check is what stops resize-observe feedback
    /// loops.
    pub fn commit(&mut self) -> Damage {
        let mut damage = Damage::default();
        let viewport = self.viewport;
        for slot in &mut self.slots {
            let Some(p) = slot.panel.as_mut() else {
                continue;
            };
            if p.marks.is_empty() {
                continue;
            }
            p.marks = Reposition::empty();
            let (Some(anchor), Some(content)) = (p.anchor_rect, p.content_size) else {
                continue;
            };
            let size = effective_size(p.options.width, anchor, content);
            let origin = solve(anchor, size, p.options.placement, p.options.gap, viewport);
            let rect = Rect::from_origin_size(origin, size);
            if p.solved == Some(rect) {
                #[cfg(feature = "tracing")]
                tracing::trace!(x = origin.x, y = origin.y, "reposition unchanged; skipped");
                continue;
            }
            if let Some(old) = p.solved
                && old.width() > 0.0
                && old.height() > 0.0
            {
                damage.dirty_rects.push(old);
            }
            if rect.width() > 0.0 && rect.height() > 0.0 {
                damage.dirty_rects.push(rect);
            }
            p.solved = Some(rect);
        }
        damage
    }

    /// Route one disclosure event to one panel. Stale ids are no-ops.
    ///
    /// The convenience wrappers below cover the common routes; this is the
    /// general entry point for embedders with their own event plumbing.
    pub fn dispatch(&mut self, id: PanelId, event: DisclosureEvent) -> Option<Transition> {
        self.panel(id)?;
        self.dispatch_at(id.idx(), event)
    }

    /// The anchor was clicked/tapped/keyboard-activated.
    pub fn activate(&mut self, id: PanelId) -> Option<Transition> {
        self.dispatch(id, DisclosureEvent::PrimaryActivate)
    }

    /// The pointer entered the anchor.
    pub fn hover_enter(&mut self, id: PanelId) -> Option<Transition> {
        self.dispatch(id, DisclosureEvent::PointerEnter)
    }

    /// The pointer left the anchor.
    pub fn hover_leave(&mut self, id: PanelId) -> Option<Transition> {
        self.dispatch(id, DisclosureEvent::PointerLeave)
    }

    /// Mirror an externally controlled open flag.
    pub fn set_open_flag(&mut self, id: PanelId, open: bool) -> Option<Transition> {
        self.dispatch(id, DisclosureEvent::OpenFlag(open))
    }

    /// Close after a selection was made inside the panel.
    pub fn dismiss(&mut self, id: PanelId) -> Option<Transition> {
        self.dispatch(id, DisclosureEvent::Dismiss)
    }

    /// Escape pressed: close every open panel.
    pub fn escape(&mut self) -> Vec<(PanelId, Transition)> {
        let mut out = Vec::new();
        for idx in 0..self.slots.len() {
            let generation = self.slots[idx].generation;
            if let Some(tr) = self.dispatch_at(idx, DisclosureEvent::Escape) {
                out.push((PanelId::new(idx, generation), tr));
            }
        }
        out
    }

    /// Route a document-level pointer-down by the target's root→target
    /// ancestor path.
    ///
    /// Per panel: a path through the anchor is a primary activation; a path
    /// through the panel's content is suppressed entirely (interacting with
    /// a panel never dismisses it); anything else is outside activity.
    pub fn pointer_down(&mut self, target_path: &[K]) -> Vec<(PanelId, Transition)> {
        let mut out = Vec::new();
        for idx in 0..self.slots.len() {
            let generation = self.slots[idx].generation;
            let Some(p) = self.slots[idx].panel.as_ref() else {
                continue;
            };
            let event = if target_path.contains(&p.anchor) {
                DisclosureEvent::PrimaryActivate
            } else {
                let inside = [Some(p.anchor.clone()), p.content.clone()];
                if is_outside(&inside, target_path) {
                    DisclosureEvent::OutsideActivity
                } else {
                    continue;
                }
            };
            if let Some(tr) = self.dispatch_at(idx, event) {
                out.push((PanelId::new(idx, generation), tr));
            }
        }
        out
    }

    /// Route a document-level focus-in by ancestor path.
    ///
    /// Focus moving outside a panel counts as outside activity; focus
    /// moving into the anchor or panel changes nothing.
    pub fn focus_in(&mut self, target_path: &[K]) -> Vec<(PanelId, Transition)> {
        let mut out = Vec::new();
        for idx in 0..self.slots.len() {
            let generation = self.slots[idx].generation;
            let Some(p) = self.slots[idx].panel.as_ref() else {
                continue;
            };
            let inside = [Some(p.anchor.clone()), p.content.clone()];
            if !is_outside(&inside, target_path) {
                continue;
            }
            if let Some(tr) = self.dispatch_at(idx, DisclosureEvent::OutsideActivity) {
                out.push((PanelId::new(idx, generation), tr));
            }
        }
        out
    }

    /// Geometric fallback for [`Host::pointer_down`], for embedders without
    /// ancestor paths: classify by the last-measured rects instead.
    ///
    /// A point inside the anchor activates; a point inside an open panel's
    /// solved rect is suppressed; anything else is outside activity.
    pub fn pointer_down_at(&mut self, point: Point) -> Vec<(PanelId, Transition)> {
        let mut out = Vec::new();
        for idx in 0..self.slots.len() {
            let generation = self.slots[idx].generation;
            let Some(p) = self.slots[idx].panel.as_ref() else {
                continue;
            };
            let over_anchor = p.anchor_rect.is_some_and(|r| r.contains(point));
            let over_panel = p.disclosure.is_open() && p.solved.is_some_and(|r| r.contains(point));
            let event = if over_anchor {
                DisclosureEvent::PrimaryActivate
            } else if over_panel {
                continue;
            } else {
                DisclosureEvent::OutsideActivity
            };
            if let Some(tr) = self.dispatch_at(idx, event) {
                out.push((PanelId::new(idx, generation), tr));
            }
        }
        out
    }

    /// Presentation state for a panel, or `None` for stale ids.
    pub fn style(&self, id: PanelId) -> Option<PanelStyle> {
        let p = self.panel(id)?;
        let open = p.disclosure.is_open();
        Some(PanelStyle {
            position: p.solved.map_or(OFFSCREEN, |r| r.origin()),
            z_index: p.options.z_index,
            visible: open,
            opacity: if open { 1.0 } else { 0.0 },
            fade_secs: p.options.fade_secs,
        })
    }

    /// Whether the panel is currently open. `false` for stale ids.
    pub fn is_open(&self, id: PanelId) -> bool {
        self.panel(id).is_some_and(|p| p.disclosure.is_open())
    }

    /// The panel's solved rect (origin and effective size), if it has been
    /// positioned at least once.
    pub fn panel_rect(&self, id: PanelId) -> Option<Rect> {
        self.panel(id)?.solved
    }

    /// Pending reposition marks for a panel. Empty after a commit.
    pub fn pending(&self, id: PanelId) -> Reposition {
        self.panel(id).map_or(Reposition::empty(), |p| p.marks)
    }

    /// The options a panel was mounted with.
    pub fn options(&self, id: PanelId) -> Option<&PanelOptions> {
        self.panel(id).map(|p| &p.options)
    }

    // --- internals ---

    fn panel(&self, id: PanelId) -> Option<&Panel<K>> {
        let slot = self.slots.get(id.idx())?;
        if slot.generation != id.1 {
            return None;
        }
        slot.panel.as_ref()
    }

    fn panel_mut(&mut self, id: PanelId) -> Option<&mut Panel<K>> {
        let slot = self.slots.get_mut(id.idx())?;
        if slot.generation != id.1 {
            return None;
        }
        slot.panel.as_mut()
    }

    fn dispatch_at(&mut self, idx: usize, event: DisclosureEvent) -> Option<Transition> {
        let p = self.slots[idx].panel.as_mut()?;
        let tr = p.disclosure.handle(event)?;
        if tr == Transition::Opened {
            p.marks |= Reposition::OPENED;
        }
        Some(tr)
    }
}

/// Resolve the panel size the solver should use.
fn effective_size(width: PanelWidth, anchor: Rect, content: Size) -> Size {
    match width {
        PanelWidth::Auto => content,
        PanelWidth::MatchAnchor => Size::new(anchor.width(), content.height),
        PanelWidth::Fixed(w) => Size::new(w, content.height),
    }
}
