//! Selectable list with a cursor.
//!
//! The encoder runs over `[1, item_count]` with rollover and the cursor is
//! `counter - 1`. Row 0 holds the header; items scroll beneath it when
//! there are more than fit.

use heapless::Vec;

use super::{Frame, Line};
use crate::config::DISPLAY_ROWS;
use crate::context::{truncated, Context, ScreenName, Text};

/// Most items a menu holds (alarm list: every slot plus "Back").
pub const MAX_ITEMS: usize = crate::config::MAX_ALARMS + 1;

/// Rows available below the header.
const VISIBLE_ITEMS: usize = DISPLAY_ROWS as usize - 1;

const CURSOR: &str = ">";

#[derive(Clone, Debug)]
pub struct MenuItem {
    pub label: Text,
    /// Screen this item routes to.
    pub target: &'static str,
    /// Extra `ui` fields handed to the target.
    pub context: Context,
}

impl MenuItem {
    pub fn new(label: &str, target: &'static str) -> Self {
        Self {
            label: truncated(label),
            target,
            context: Context::default(),
        }
    }

    pub fn with_context(mut self, context: Context) -> Self {
        self.context = context;
        self
    }
}

#[derive(Clone, Debug)]
pub struct ListMenu {
    header: Text,
    items: Vec<MenuItem, MAX_ITEMS>,
    cursor: usize,
}

impl ListMenu {
    pub fn new(header: &str, items: Vec<MenuItem, MAX_ITEMS>) -> Self {
        Self {
            header: truncated(header),
            items,
            cursor: 0,
        }
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Encoder bounds for this menu.
    pub fn counter_range(&self) -> (i32, i32) {
        (1, self.items.len().max(1) as i32)
    }

    /// Map the encoder value onto the cursor. Returns `true` if it moved.
    pub fn update(&mut self, counter: i32) -> bool {
        let cursor = cursor_for(counter, self.items.len());
        let moved = cursor != self.cursor;
        self.cursor = cursor;
        moved
    }

    pub fn selected(&self) -> Option<&MenuItem> {
        self.items.get(self.cursor)
    }

    /// Route to the selected item, carrying its extra fields.
    pub fn confirm(&self) -> Context {
        match self.selected() {
            Some(item) => {
                let mut context = item.context.clone();
                context.router.next_screen_id = ScreenName::try_from(item.target).ok();
                context
            }
            None => Context::to(super::menus::MAIN_MENU),
        }
    }

    pub fn render(&self) -> Frame {
        let mut frame = Frame::new();
        let _ = frame.push(Line::new(&self.header, 0, 0));

        let first = self.cursor.saturating_sub(VISIBLE_ITEMS - 1);
        for (row, (index, item)) in self
            .items
            .iter()
            .enumerate()
            .skip(first)
            .take(VISIBLE_ITEMS)
            .enumerate()
        {
            let mut text = Text::new();
            let marker = if index == self.cursor { CURSOR } else { " " };
            let _ = text.push_str(marker);
            let _ = text.push(' ');
            for c in item.label.chars() {
                if text.push(c).is_err() {
                    break;
                }
            }
            let _ = frame.push(Line {
                text,
                col: 0,
                row: row as u8 + 1,
            });
        }
        frame
    }
}

/// `(counter - 1) mod item_count`, 0 for an empty menu.
pub fn cursor_for(counter: i32, item_count: usize) -> usize {
    if item_count == 0 {
        return 0;
    }
    (counter - 1).rem_euclid(item_count as i32) as usize
}
