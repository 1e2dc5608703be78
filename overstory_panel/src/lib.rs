// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=overstory_panel --heading-base-level=0

//! Overstory Panel: a host for floating panels (dropdowns, tooltips,
//! popovers) anchored to elements the embedder owns.
//!
//! ## Overview
//!
//! A floating panel renders into a shared root container at the end of the
//! document (escaping clipped and scrolled ancestors) but positions itself
//! against an anchor element living anywhere in the tree. This crate owns
//! everything in between:
//!
//! - [`host::Host`] tracks mounted panels, counts owners of the shared root
//!   container, routes input to each panel's disclosure machine, and turns
//!   geometry changes into solved positions plus coarse damage.
//! - [`options::PanelOptions`] configures one panel: placement, gap, trigger,
//!   stacking, outside-close behavior, width policy. Presets cover the two
//!   everyday shapes ([`options::PanelOptions::tooltip`],
//!   [`options::PanelOptions::dropdown`]).
//!
//! The embedder stays in charge of rendering and measurement. It implements
//! [`host::Measurements`] over its own element keys and drives the host in a
//! cycle: route input, [`host::Host::sync`], [`host::Host::commit`], apply
//! [`host::Host::style`]. Positions come from [`overstory_placement::solve`];
//! open/closed decisions come from [`overstory_disclosure`].
//!
//! ## Example
//!
//! ```
//! use kurbo::{Point, Rect, Size};
//! use overstory_panel::host::{Host, Measurements, RootDirective};
//! use overstory_panel::options::PanelOptions;
//!
//! struct Dom;
//!
//! impl Measurements<&'static str> for Dom {
//!     fn bounding_rect(&self, key: &&'static str) -> Option<Rect> {
//!         match *key {
//!             "button" => Some(Rect::new(100.0, 300.0, 180.0, 330.0)),
//!             "menu" => Some(Rect::new(0.0, 0.0, 240.0, 180.0)),
//!             _ => None,
//!         }
//!     }
//!
//!     fn viewport(&self) -> Size {
//!         Size::new(800.0, 600.0)
//!     }
//! }
//!
//! let mut host = Host::new();
//! let (id, directive) = host.mount("button", PanelOptions::dropdown());
//! assert_eq!(directive, RootDirective::Create);
//! host.set_content(id, "menu");
//!
//! host.sync(&Dom);
//! let damage = host.commit();
//! assert_eq!(damage.dirty_rects.len(), 1);
//!
//! // 2px below the button, flush left, matching the button's width.
//! let style = host.style(id).unwrap();
//! assert_eq!(style.position, Point::new(100.0, 332.0));
//! assert_eq!(host.panel_rect(id).unwrap().width(), 80.0);
//! assert!(!style.visible);
//!
//! // Clicking the button opens it; clicking elsewhere closes it.
//! host.pointer_down(&["body", "button"]);
//! assert!(host.is_open(id));
//! host.pointer_down(&["body"]);
//! assert!(!host.is_open(id));
//! ```
//!
//! ## Features
//!
//! - `std` (default): forwards to `kurbo/std`. Disable for `no_std` targets
//!   and enable `libm` instead.
//! - `tracing`: emit `tracing` events for root lifecycle and commits.
//! - `serde`: serialization for the options types.
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

pub mod host;
pub mod options;
