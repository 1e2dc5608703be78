// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A dropdown over a mixed option list: flattening, keyboard highlight, and
//! selection dismissing the panel.
//!
//! Run:
//! - `cargo run -p overstory_demos --example dropdown_options`

use kurbo::{Rect, Size};
use overstory_disclosure::options::{Highlight, OptionItem, flatten, resolve};
use overstory_panel::host::{Host, Measurements};
use overstory_panel::options::PanelOptions;

struct Dom;

impl Measurements<&'static str> for Dom {
    fn bounding_rect(&self, key: &&'static str) -> Option<Rect> {
        match *key {
            "picker" => Some(Rect::new(40.0, 40.0, 200.0, 72.0)),
            "list" => Some(Rect::new(0.0, 0.0, 260.0, 210.0)),
            _ => None,
        }
    }

    fn viewport(&self) -> Size {
        Size::new(1024.0, 768.0)
    }
}

fn main() {
    // Options mix bare primitives, a keyed renderable, and a named group.
    // `R = &'static str` stands in for the embedder's renderable type.
    let items: Vec<OptionItem<&'static str>> = vec![
        OptionItem::text("All files"),
        OptionItem::group(
            "Recent",
            vec![
                OptionItem::text("notes.md"),
                OptionItem::number(2024.0),
                OptionItem::keyed("custom-row", "<fancy widget>"),
            ],
        ),
        OptionItem::text("Trash"),
    ];

    println!("== Render order ==");
    for entry in flatten(&items) {
        let indent = "  ".repeat(entry.depth + 1);
        let label = entry.item.label().unwrap_or_else(|| "<node>".into());
        let marker = if entry.item.is_selectable() {
            ""
        } else {
            " (header)"
        };
        println!("{indent}{:?} {label}{marker}", entry.path);
    }
    assert_eq!(flatten(&items).len(), 6, "header plus five rows");

    println!("== Keyboard highlight ==");
    let mut highlight = Highlight::new();
    let mut walked = Vec::new();
    for _ in 0..5 {
        let path = highlight.next(&items).unwrap().to_vec();
        walked.push(path);
    }
    // The group header at [1] never takes the highlight; the walk wraps.
    assert_eq!(
        walked,
        vec![vec![0], vec![1, 0], vec![1, 1], vec![1, 2], vec![2]]
    );
    let _ = highlight.next(&items);
    assert_eq!(highlight.current(), Some(&[0_usize][..]));
    println!("  walked {:?}", walked);
    println!("  wrapped to {:?}", highlight.current());

    println!("== Open, choose, dismiss ==");
    let mut host = Host::new();
    let (id, _) = host.mount("picker", PanelOptions::dropdown());
    host.set_content(id, "list");
    host.sync(&Dom);
    let _ = host.commit();

    host.pointer_down(&["body", "picker"]);
    assert!(host.is_open(id));
    // The panel matches the picker's width and hangs 2px below it.
    let rect = host.panel_rect(id).unwrap();
    assert_eq!(rect.width(), 160.0);
    assert_eq!(rect.origin().y, 74.0);

    // Arrow down twice, then choose the highlighted entry.
    highlight.clear();
    let _ = highlight.next(&items);
    let _ = highlight.next(&items);
    let chosen = resolve(&items, highlight.current().unwrap()).unwrap();
    println!("  chose {:?}", chosen.label());
    assert_eq!(chosen.label().as_deref(), Some("notes.md"));

    // Selection made: clear the highlight and dismiss the panel.
    highlight.clear();
    let _ = host.dismiss(id);
    assert!(!host.is_open(id));

    println!("ok");
}
