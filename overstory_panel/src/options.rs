// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-panel configuration.
//!
//! [`PanelOptions`] is plain data with public fields; build it with struct
//! update syntax or the `with_*` methods, starting from [`Default`] or from
//! the [`tooltip`](PanelOptions::tooltip)/[`dropdown`](PanelOptions::dropdown)
//! presets. Options are fixed for the lifetime of a mounted panel.

use overstory_disclosure::machine::TriggerMode;
use overstory_placement::Placement;

/// How the host chooses the panel's width before solving.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum PanelWidth {
    /// Use the content's measured width.
    #[default]
    Auto,
    /// Match the anchor's measured width; dropdowns align their list to the
    /// control this way.
    MatchAnchor,
    /// A fixed width in pixels.
    Fixed(f64),
}

/// Configuration for one floating panel.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PanelOptions {
    /// Where the panel renders relative to its anchor.
    pub placement: Placement,
    /// Pixels between panel and anchor on the placement's primary axis.
    pub gap: f64,
    /// What input opens and closes the panel.
    pub trigger: TriggerMode,
    /// Stacking order of the panel node.
    pub z_index: i32,
    /// Whether pointer/focus activity outside the panel closes it
    /// (click trigger only).
    pub mask_closable: bool,
    /// Duration, in seconds, of the opacity fade when visibility toggles.
    /// Cosmetic: logical open state never waits on it.
    pub fade_secs: f64,
    /// Width policy applied before solving.
    pub width: PanelWidth,
    /// Externally controlled open flag. `Some(true)` mounts the panel open;
    /// later changes are mirrored in via the host.
    pub open: Option<bool>,
}

impl Default for PanelOptions {
    fn default() -> Self {
        Self {
            placement: Placement::Center,
            gap: 0.0,
            trigger: TriggerMode::Click,
            z_index: 10,
            mask_closable: true,
            fade_secs: 0.0,
            width: PanelWidth::Auto,
            open: None,
        }
    }
}

impl PanelOptions {
    /// Defaults: centered placement, click trigger, gap 0, z-index 10,
    /// mask-closable, no fade.
    pub fn new() -> Self {
        Self::default()
    }

    /// A tooltip: identical to the defaults except it opens on hover.
    pub fn tooltip() -> Self {
        Self {
            trigger: TriggerMode::Hover,
            ..Self::default()
        }
    }

    /// A dropdown list: below the anchor with flush left edges, a 2px gap,
    /// and the anchor's width.
    pub fn dropdown() -> Self {
        Self {
            placement: Placement::BottomLeft,
            gap: 2.0,
            width: PanelWidth::MatchAnchor,
            ..Self::default()
        }
    }

    /// Builder: placement.
    #[must_use]
    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    /// Builder: gap in pixels.
    #[must_use]
    pub fn with_gap(mut self, gap: f64) -> Self {
        self.gap = gap;
        self
    }

    /// Builder: trigger mode.
    #[must_use]
    pub fn with_trigger(mut self, trigger: TriggerMode) -> Self {
        self.trigger = trigger;
        self
    }

    /// Builder: z-index.
    #[must_use]
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Builder: outside-activity dismissal.
    #[must_use]
    pub fn with_mask_closable(mut self, mask_closable: bool) -> Self {
        self.mask_closable = mask_closable;
        self
    }

    /// Builder: fade duration in seconds.
    #[must_use]
    pub fn with_fade_secs(mut self, fade_secs: f64) -> Self {
        self.fade_secs = fade_secs;
        self
    }

    /// Builder: width policy.
    #[must_use]
    pub fn with_width(mut self, width: PanelWidth) -> Self {
        self.width = width;
        self
    }

    /// Builder: externally controlled open flag.
    #[must_use]
    pub fn with_open(mut self, open: bool) -> Self {
        self.open = Some(open);
        self
    }
}
