// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A hover tooltip near the viewport edge: offscreen parking before
//! measurement, the collision flip, and hover open/close.
//!
//! Run:
//! - `cargo run -p overstory_demos --example hover_tooltip`

use kurbo::{Point, Rect, Size};
use overstory_panel::host::{Host, Measurements};
use overstory_panel::options::PanelOptions;
use overstory_placement::{OFFSCREEN, Placement};

struct Dom {
    icon: Rect,
}

impl Measurements<&'static str> for Dom {
    fn bounding_rect(&self, key: &&'static str) -> Option<Rect> {
        match *key {
            "icon" => Some(self.icon),
            "tip" => Some(Rect::new(0.0, 0.0, 120.0, 40.0)),
            _ => None,
        }
    }

    fn viewport(&self) -> Size {
        Size::new(800.0, 600.0)
    }
}

fn main() {
    let mut host = Host::new();
    let options = PanelOptions::tooltip().with_placement(Placement::Top).with_gap(6.0);
    let (id, _) = host.mount("icon", options);

    println!("== Before measurement ==");
    let style = host.style(id).unwrap();
    println!("  parked at {:?}", style.position);
    assert_eq!(style.position, OFFSCREEN);

    println!("== Hover an icon at the top edge ==");
    host.set_content(id, "tip");
    let mut dom = Dom {
        icon: Rect::new(300.0, 10.0, 320.0, 30.0),
    };
    let _ = host.hover_enter(id);
    host.sync(&dom);
    let _ = host.commit();
    let style = host.style(id).unwrap();
    println!("  position {:?} (flipped below the icon)", style.position);
    // 40px of tip plus a 6px gap do not fit above y=10, so the tip flips
    // below: y = 30 + 6. Centered on the icon: x = 310 - 60.
    assert_eq!(style.position, Point::new(250.0, 36.0));
    assert!(style.visible);

    // Clicks never affect a hover panel, inside or out.
    assert!(host.pointer_down(&["body"]).is_empty());
    assert!(host.is_open(id));

    println!("== Move the icon down ==");
    dom.icon = Rect::new(300.0, 200.0, 320.0, 220.0);
    host.sync(&dom);
    let damage = host.commit();
    let style = host.style(id).unwrap();
    println!("  position {:?} (fits above now)", style.position);
    println!("  damage union {:?}", damage.union_rect());
    // Room above a y=200 icon: y = 200 - 40 - 6.
    assert_eq!(style.position, Point::new(250.0, 154.0));

    println!("== Pointer leaves ==");
    let _ = host.hover_leave(id);
    let style = host.style(id).unwrap();
    assert!(!style.visible);
    assert_eq!(style.opacity, 0.0);
    // Still mounted and positioned for an instant reopen.
    assert_eq!(style.position, Point::new(250.0, 154.0));

    println!("ok");
}
