// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=overstory_placement --heading-base-level=0

//! Overstory Placement: a Kurbo-native placement solver for floating panels.
//!
//! Given an anchor rectangle, a panel size, a requested [`Placement`], a gap,
//! and the viewport size, [`solve`] returns the top-left corner the panel
//! should render at. The solver is a pure function: same inputs, same output,
//! no reads of ambient state. Hosts call it again whenever anchor, panel, or
//! viewport geometry changes; they never nudge a stale position by deltas.
//!
//! ## Placements
//!
//! Thirteen placements form a closed set. Twelve are anchor-relative sides
//! with an optional cross-axis alignment suffix, and one ([`Placement::Center`])
//! centers the panel over the anchor on both axes:
//!
//! - `Top`, `TopLeft`, `TopRight`
//! - `Bottom`, `BottomLeft`, `BottomRight`
//! - `Left`, `LeftTop`, `LeftBottom`
//! - `Right`, `RightTop`, `RightBottom`
//! - `Center`
//!
//! A sided placement decomposes via [`Placement::parts`] into a [`Side`]
//! (which edge of the anchor the panel sits against) and an [`Align`]
//! (where along that edge). No suffix means centered on the anchor midpoint;
//! a `Left`/`Top` suffix pins the panel's leading edge to the anchor's
//! leading edge; a `Right`/`Bottom` suffix pins the trailing edges.
//!
//! ## Collision fallback
//!
//! The solver attempts exactly one flip. If the preferred side would place
//! the panel past the viewport edge on its primary axis, the opposite side
//! is used instead; if that position also overflows, it is used anyway.
//! Accepting the second overflow keeps the result stable — a stricter solver
//! that kept searching would oscillate for panels taller than the viewport.
//!
//! ## Example
//!
//! ```
//! use kurbo::{Point, Rect, Size};
//! use overstory_placement::{solve, Placement};
//!
//! let anchor = Rect::new(100.0, 300.0, 180.0, 330.0);
//! let viewport = Size::new(800.0, 600.0);
//!
//! // Plenty of room above: the tooltip sits on top of the anchor.
//! let pos = solve(anchor, Size::new(60.0, 20.0), Placement::Top, 8.0, viewport);
//! assert_eq!(pos, Point::new(110.0, 272.0));
//!
//! // A 400px panel does not fit above a y=300 anchor, so it flips below.
//! let pos = solve(anchor, Size::new(60.0, 400.0), Placement::Top, 8.0, viewport);
//! assert_eq!(pos.y, 338.0);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

use kurbo::{Point, Rect, Size};

/// Position reported for a panel before its anchor and content have both been
/// measured.
///
/// Parked well outside any plausible viewport so an unmeasured panel can stay
/// mounted (keeping its layout measurable) without flashing at a wrong
/// location for a frame.
pub const OFFSCREEN: Point = Point::new(-500.0, -500.0);

/// The anchor edge a sided placement puts the panel against.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Side {
    /// Above the anchor.
    Top,
    /// Below the anchor.
    Bottom,
    /// To the left of the anchor.
    Left,
    /// To the right of the anchor.
    Right,
}

impl Side {
    /// The opposite edge, used for the collision fallback.
    #[must_use]
    pub fn flip(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Whether the primary axis of this side is vertical.
    ///
    /// `Top`/`Bottom` move the panel along y; `Left`/`Right` along x.
    pub fn is_vertical(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }
}

/// Cross-axis alignment of a sided placement.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Align {
    /// Centered on the anchor's cross-axis midpoint (no suffix).
    #[default]
    Center,
    /// Leading edges flush (`TopLeft`, `BottomLeft`, `LeftTop`, `RightTop`).
    Start,
    /// Trailing edges flush (`TopRight`, `BottomRight`, `LeftBottom`, `RightBottom`).
    End,
}

/// Where a floating panel renders relative to its anchor.
///
/// The set is closed; configuration sourced from loose strings goes through
/// [`Placement::from_name`], which maps anything unrecognized to `Center`.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Placement {
    /// Above, centered.
    Top,
    /// Above, left edges flush.
    TopLeft,
    /// Above, right edges flush.
    TopRight,
    /// Left, centered.
    Left,
    /// Left, top edges flush.
    LeftTop,
    /// Left, bottom edges flush.
    LeftBottom,
    /// Right, centered.
    Right,
    /// Right, top edges flush.
    RightTop,
    /// Right, bottom edges flush.
    RightBottom,
    /// Below, centered.
    Bottom,
    /// Below, left edges flush.
    BottomLeft,
    /// Below, right edges flush.
    BottomRight,
    /// Centered over the anchor on both axes.
    #[default]
    Center,
}

impl Placement {
    /// All placements, in declaration order. Handy for exhaustive tests and
    /// benchmarks.
    pub const ALL: [Self; 13] = [
        Self::Top,
        Self::TopLeft,
        Self::TopRight,
        Self::Left,
        Self::LeftTop,
        Self::LeftBottom,
        Self::Right,
        Self::RightTop,
        Self::RightBottom,
        Self::Bottom,
        Self::BottomLeft,
        Self::BottomRight,
        Self::Center,
    ];

    /// Decompose into side and alignment. `None` for [`Placement::Center`],
    /// which has no primary axis.
    pub fn parts(self) -> Option<(Side, Align)> {
        match self {
            Self::Top => Some((Side::Top, Align::Center)),
            Self::TopLeft => Some((Side::Top, Align::Start)),
            Self::TopRight => Some((Side::Top, Align::End)),
            Self::Bottom => Some((Side::Bottom, Align::Center)),
            Self::BottomLeft => Some((Side::Bottom, Align::Start)),
            Self::BottomRight => Some((Side::Bottom, Align::End)),
            Self::Left => Some((Side::Left, Align::Center)),
            Self::LeftTop => Some((Side::Left, Align::Start)),
            Self::LeftBottom => Some((Side::Left, Align::End)),
            Self::Right => Some((Side::Right, Align::Center)),
            Self::RightTop => Some((Side::Right, Align::Start)),
            Self::RightBottom => Some((Side::Right, Align::End)),
            Self::Center => None,
        }
    }

    /// The canonical camelCase name of this placement.
    pub fn name(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::TopLeft => "topLeft",
            Self::TopRight => "topRight",
            Self::Left => "left",
            Self::LeftTop => "leftTop",
            Self::LeftBottom => "leftBottom",
            Self::Right => "right",
            Self::RightTop => "rightTop",
            Self::RightBottom => "rightBottom",
            Self::Bottom => "bottom",
            Self::BottomLeft => "bottomLeft",
            Self::BottomRight => "bottomRight",
            Self::Center => "center",
        }
    }

    /// Parse a camelCase placement name, falling back to `Center` for
    /// anything unrecognized.
    ///
    /// The fallback is deliberate: placement names arrive from loosely typed
    /// configuration, and a centered panel is visible and harmless, while a
    /// rejected one would be invisible.
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|p| p.name() == name)
            .unwrap_or(Self::Center)
    }
}

/// Preferred primary-axis coordinate for `side`, before any flip.
fn preferred(side: Side, anchor: Rect, panel: Size, gap: f64) -> f64 {
    match side {
        Side::Top => anchor.y0 - panel.height - gap,
        Side::Bottom => anchor.y1 + gap,
        Side::Left => anchor.x0 - panel.width - gap,
        Side::Right => anchor.x1 + gap,
    }
}

/// Whether a primary-axis coordinate overflows the viewport on `side`.
///
/// `Top`/`Left` overflow past the origin; `Bottom`/`Right` overflow when the
/// panel's far edge passes the viewport extent.
fn overflows(side: Side, main: f64, panel: Size, viewport: Size) -> bool {
    match side {
        Side::Top | Side::Left => main < 0.0,
        Side::Bottom => main + panel.height > viewport.height,
        Side::Right => main + panel.width > viewport.width,
    }
}

fn cross_axis(side: Side, align: Align, anchor: Rect, panel: Size) -> f64 {
    if side.is_vertical() {
        match align {
            Align::Center => anchor.center().x - panel.width / 2.0,
            Align::Start => anchor.x0,
            Align::End => anchor.x1 - panel.width,
        }
    } else {
        match align {
            Align::Center => anchor.center().y - panel.height / 2.0,
            Align::Start => anchor.y0,
            Align::End => anchor.y1 - panel.height,
        }
    }
}

/// Compute the top-left corner for a panel of `panel` size anchored to
/// `anchor`, with `gap` pixels between panel and anchor on the primary axis.
///
/// Attempts `placement`'s side first; if the panel would overflow the
/// viewport on that axis, the opposite side is used. Exactly one flip is
/// attempted; a position that overflows on both sides is returned as-is
/// (see the crate docs for why). The cross axis never flips.
///
/// All coordinates are in the viewport's space: the anchor rect must already
/// be viewport-relative, and the result is too.
#[must_use]
pub fn solve(anchor: Rect, panel: Size, placement: Placement, gap: f64, viewport: Size) -> Point {
    let Some((side, align)) = placement.parts() else {
        // Center: both axes centered over the anchor midpoint.
        let c = anchor.center();
        return Point::new(c.x - panel.width / 2.0, c.y - panel.height / 2.0);
    };

    let mut main = preferred(side, anchor, panel, gap);
    if overflows(side, main, panel, viewport) {
        main = preferred(side.flip(), anchor, panel, gap);
    }
    let cross = cross_axis(side, align, anchor, panel);

    if side.is_vertical() {
        Point::new(cross, main)
    } else {
        Point::new(main, cross)
    }
}

/// [`solve`] for callers holding the panel's full rect.
///
/// Only the rect's size participates in the math; its origin is the previous
/// solve's output and is ignored.
#[must_use]
pub fn solve_rect(
    anchor: Rect,
    panel: Rect,
    placement: Placement,
    gap: f64,
    viewport: Size,
) -> Point {
    solve(anchor, panel.size(), placement, gap, viewport)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Size = Size::new(800.0, 600.0);

    fn anchor() -> Rect {
        // 50x20 anchor near the top-left corner.
        Rect::new(10.0, 10.0, 60.0, 30.0)
    }

    #[test]
    fn top_flips_below_when_panel_taller_than_space_above() {
        // Preferred top would be 10 - 200 - 5 = -195, which overflows,
        // so the panel lands below the anchor at 30 + 5 = 35.
        let panel = Size::new(40.0, 200.0);
        let pos = solve(anchor(), panel, Placement::Top, 5.0, VIEWPORT);
        assert_eq!(pos.y, 35.0);
        // Cross axis still centers on the anchor midpoint (35 - 20).
        assert_eq!(pos.x, 15.0);
    }

    #[test]
    fn top_stays_above_when_it_fits() {
        let a = Rect::new(100.0, 300.0, 150.0, 320.0);
        let pos = solve(a, Size::new(40.0, 200.0), Placement::Top, 5.0, VIEWPORT);
        assert_eq!(pos.y, 300.0 - 200.0 - 5.0);
    }

    #[test]
    fn center_overlays_anchor_midpoint() {
        let a = anchor();
        let pos = solve(a, Size::new(20.0, 10.0), Placement::Center, 0.0, VIEWPORT);
        assert_eq!(pos, Point::new(25.0, 15.0));
    }

    #[test]
    fn bottom_flips_above_when_overflowing_viewport() {
        let a = Rect::new(100.0, 550.0, 150.0, 570.0);
        let pos = solve(a, Size::new(40.0, 100.0), Placement::Bottom, 2.0, VIEWPORT);
        // 572 + 100 > 600, so it flips to 550 - 100 - 2.
        assert_eq!(pos.y, 448.0);
    }

    #[test]
    fn left_flips_right_past_origin() {
        let a = anchor();
        let pos = solve(a, Size::new(100.0, 30.0), Placement::Left, 4.0, VIEWPORT);
        // 10 - 100 - 4 < 0, so the panel goes to the anchor's right edge.
        assert_eq!(pos.x, 64.0);
    }

    #[test]
    fn right_flips_left_at_viewport_edge() {
        let a = Rect::new(700.0, 200.0, 780.0, 230.0);
        let pos = solve(a, Size::new(150.0, 30.0), Placement::Right, 0.0, VIEWPORT);
        assert_eq!(pos.x, 700.0 - 150.0);
    }

    #[test]
    fn alignment_suffixes_pin_edges() {
        let a = anchor();
        let panel = Size::new(30.0, 40.0);
        // Leading edges flush.
        assert_eq!(
            solve(a, panel, Placement::BottomLeft, 0.0, VIEWPORT).x,
            a.x0
        );
        assert_eq!(solve(a, panel, Placement::RightTop, 0.0, VIEWPORT).y, a.y0);
        // Trailing edges flush.
        assert_eq!(
            solve(a, panel, Placement::BottomRight, 0.0, VIEWPORT).x,
            a.x1 - panel.width
        );
        assert_eq!(
            solve(a, panel, Placement::RightBottom, 0.0, VIEWPORT).y,
            a.y1 - panel.height
        );
    }

    #[test]
    fn cross_axis_never_flips() {
        // Anchor at the left viewport edge, panel wider than the anchor:
        // trailing-edge alignment pushes x negative, and the spill is kept.
        // Only the primary axis has a fallback.
        let a = Rect::new(0.0, 100.0, 30.0, 120.0);
        let panel = Size::new(80.0, 40.0);
        let pos = solve(a, panel, Placement::BottomRight, 0.0, VIEWPORT);
        assert_eq!(pos.x, 30.0 - 80.0);
    }

    #[test]
    fn double_overflow_keeps_flipped_side() {
        // Panel taller than the whole viewport: neither side fits. The
        // solver flips once and stops.
        let a = Rect::new(100.0, 290.0, 150.0, 310.0);
        let pos = solve(a, Size::new(40.0, 700.0), Placement::Top, 0.0, VIEWPORT);
        assert_eq!(pos.y, 310.0, "flipped below and accepted the overflow");
    }

    // Same inputs must produce bit-identical outputs; hosts rely on this to
    // skip propagation when nothing moved.
    #[test]
    fn solver_is_deterministic() {
        let a = Rect::new(123.5, 77.25, 200.0, 100.0);
        let panel = Size::new(90.0, 64.0);
        for p in Placement::ALL {
            let first = solve(a, panel, p, 3.0, VIEWPORT);
            let second = solve(a, panel, p, 3.0, VIEWPORT);
            assert_eq!(first, second, "{}", p.name());
        }
    }

    // With the anchor mid-viewport and a small panel, every sided placement
    // fits without flipping and the panel rect stays inside the viewport.
    #[test]
    fn fits_without_flip_inside_viewport() {
        let a = Rect::new(380.0, 290.0, 420.0, 310.0);
        let panel = Size::new(50.0, 40.0);
        for p in Placement::ALL {
            let pos = solve(a, panel, p, 4.0, VIEWPORT);
            assert!(pos.x >= 0.0 && pos.y >= 0.0, "{}", p.name());
            assert!(
                pos.x + panel.width <= VIEWPORT.width && pos.y + panel.height <= VIEWPORT.height,
                "{}",
                p.name()
            );
        }
    }

    #[test]
    fn solve_rect_ignores_panel_origin() {
        let a = anchor();
        let at_origin = Rect::new(0.0, 0.0, 40.0, 200.0);
        let parked = at_origin + kurbo::Vec2::new(OFFSCREEN.x, OFFSCREEN.y);
        let p = solve_rect(a, at_origin, Placement::Top, 5.0, VIEWPORT);
        let q = solve_rect(a, parked, Placement::Top, 5.0, VIEWPORT);
        assert_eq!(p, q);
    }

    #[test]
    fn names_round_trip_and_unknown_falls_back_to_center() {
        for p in Placement::ALL {
            assert_eq!(Placement::from_name(p.name()), p);
        }
        assert_eq!(Placement::from_name("topleft"), Placement::Center);
        assert_eq!(Placement::from_name(""), Placement::Center);
        assert_eq!(Placement::from_name("bottom-start"), Placement::Center);
    }

    #[test]
    fn parts_cover_the_twelve_sided_placements() {
        let sided = Placement::ALL.iter().filter(|p| p.parts().is_some()).count();
        assert_eq!(sided, 12);
        assert_eq!(Placement::Center.parts(), None);
    }

    #[test]
    fn side_flip_is_an_involution() {
        for side in [Side::Top, Side::Bottom, Side::Left, Side::Right] {
            assert_eq!(side.flip().flip(), side);
        }
    }
}
