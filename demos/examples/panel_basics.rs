// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mounting dropdown panels, sharing the root container, and driving the
//! measure→solve→style cycle against a fake document.
//!
//! Run:
//! - `cargo run -p overstory_demos --example panel_basics`

use kurbo::{Point, Rect, Size};
use overstory_panel::host::{Host, Measurements, RootDirective};
use overstory_panel::options::PanelOptions;

struct Dom;

impl Measurements<&'static str> for Dom {
    fn bounding_rect(&self, key: &&'static str) -> Option<Rect> {
        match *key {
            "button" => Some(Rect::new(100.0, 300.0, 180.0, 330.0)),
            "menu" => Some(Rect::new(0.0, 0.0, 240.0, 180.0)),
            _ => None,
        }
    }

    fn viewport(&self) -> Size {
        Size::new(800.0, 600.0)
    }
}

fn main() {
    let mut host = Host::new();

    println!("== Mount ==");
    let (first, d1) = host.mount("button", PanelOptions::dropdown());
    let (second, d2) = host.mount("other-button", PanelOptions::dropdown());
    println!("  first mount:  {:?}", d1);
    println!("  second mount: {:?}", d2);
    assert_eq!(d1, RootDirective::Create);
    assert_eq!(d2, RootDirective::Reuse);
    assert_eq!(host.root_owners(), 2);

    println!("== Measure & commit ==");
    host.set_content(first, "menu");
    host.sync(&Dom);
    let damage = host.commit();
    let style = host.style(first).unwrap();
    println!("  position: {:?}", style.position);
    println!("  damage rects: {}", damage.dirty_rects.len());
    // 2px below the button, flush left, matching its 80px width.
    assert_eq!(style.position, Point::new(100.0, 332.0));
    assert_eq!(host.panel_rect(first).unwrap().width(), 80.0);
    assert!(!style.visible, "mounted but not yet disclosed");

    println!("== Click to open ==");
    let transitions = host.pointer_down(&["body", "button"]);
    println!("  {:?}", transitions);
    assert!(host.is_open(first));
    assert!(host.style(first).unwrap().visible);

    // A click inside the open panel never dismisses it.
    assert!(host.pointer_down(&["body", "menu", "menu-item"]).is_empty());
    assert!(host.is_open(first));

    println!("== Click outside ==");
    let transitions = host.pointer_down(&["body", "sidebar"]);
    println!("  {:?}", transitions);
    assert!(!host.is_open(first));
    // The panel stays mounted and positioned; only visibility changed.
    let style = host.style(first).unwrap();
    assert_eq!(style.position, Point::new(100.0, 332.0));

    println!("== Unmount ==");
    let d = host.unmount(first);
    println!("  first unmount:  {:?}", d);
    assert_eq!(d, RootDirective::Keep);
    let d = host.unmount(second);
    println!("  second unmount: {:?}", d);
    assert_eq!(d, RootDirective::Remove);
    assert!(host.is_empty());

    println!("ok");
}
