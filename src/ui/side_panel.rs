//! Side panel layout
//!
//! A vertical stack of widgets drawn top to bottom inside the panel rect.
//! Rows split the width into equal columns, groups indent their content and
//! draw a frame around it when closed.

use macroquad::prelude::*;

use super::widgets::{button, draw_label, int_field, segmented, text_field};
use super::{PanelUi, Rect, Theme, UiContext, FONT_SIZE_HEADER};

const ROW_HEIGHT: f32 = 22.0;
const SPACING: f32 = 4.0;
const GROUP_INDENT: f32 = 6.0;
const LABEL_WIDTH: f32 = 0.35;

#[derive(Debug, Clone, Copy)]
struct RowLayout {
    columns: usize,
    next: usize,
    y: f32,
}

pub struct SidePanel<'a> {
    ctx: &'a mut UiContext,
    theme: &'a Theme,
    rect: Rect,
    cursor_y: f32,
    indent: f32,
    /// Top edge of each open group
    groups: Vec<f32>,
    row: Option<RowLayout>,
}

impl<'a> SidePanel<'a> {
    /// Start laying out widgets in `rect`; draws the panel background
    pub fn begin(ctx: &'a mut UiContext, theme: &'a Theme, rect: Rect) -> Self {
        draw_rectangle(rect.x, rect.y, rect.w, rect.h, theme.panel_bg);
        let inner = rect.pad(8.0);
        Self {
            ctx,
            theme,
            rect: inner,
            cursor_y: inner.y,
            indent: 0.0,
            groups: Vec::new(),
            row: None,
        }
    }

    /// Section title
    pub fn header(&mut self, title: &str) {
        let rect = self.next_rect(1.0);
        let y = (rect.y + rect.h * 0.5 + FONT_SIZE_HEADER * 0.35).round();
        draw_text(title, rect.x, y, FONT_SIZE_HEADER, self.theme.text);
    }

    /// Vertical gap
    pub fn space(&mut self, h: f32) {
        self.cursor_y += h;
    }

    fn content_x(&self) -> f32 {
        self.rect.x + self.indent
    }

    fn content_w(&self) -> f32 {
        (self.rect.w - self.indent * 2.0).max(0.0)
    }

    /// Rect for the next widget; `width` is a fraction of the line outside rows
    fn next_rect(&mut self, width: f32) -> Rect {
        if let Some(row) = self.row.as_mut() {
            let line = Rect::new(self.rect.x + self.indent, row.y, (self.rect.w - self.indent * 2.0).max(0.0), ROW_HEIGHT);
            let cell = line.column(row.next.min(row.columns - 1), row.columns, SPACING);
            row.next += 1;
            return cell;
        }
        let w = self.content_w() * width.clamp(0.0, 1.0);
        let rect = Rect::new(self.content_x(), self.cursor_y, w, ROW_HEIGHT);
        self.cursor_y += ROW_HEIGHT + SPACING;
        rect
    }
}

impl PanelUi for SidePanel<'_> {
    fn text(&mut self, text: &str) {
        let rect = self.next_rect(1.0);
        draw_label(&rect, text, self.theme.text_dim, false);
    }

    /// Labels starting with "##" only identify the widget and are not drawn
    fn combo(&mut self, label: &str, selected: &mut usize, items: &[&str]) -> bool {
        let rect = self.next_rect(1.0);
        if label.starts_with("##") {
            return segmented(self.ctx, rect, selected, items, self.theme);
        }
        let (label_rect, field) = rect.split_h_px(rect.w * LABEL_WIDTH);
        draw_label(&label_rect, label, self.theme.text, false);
        segmented(self.ctx, field, selected, items, self.theme)
    }

    fn group_begin(&mut self, label: Option<&str>) {
        if let Some(label) = label {
            let rect = self.next_rect(1.0);
            draw_label(&rect, label, self.theme.text, false);
        }
        self.groups.push(self.cursor_y - SPACING * 0.5);
        self.indent += GROUP_INDENT;
    }

    fn group_end(&mut self) {
        // Unbalanced calls close nothing
        let Some(top) = self.groups.pop() else {
            return;
        };
        self.indent = (self.indent - GROUP_INDENT).max(0.0);
        let x = self.content_x() + GROUP_INDENT * 0.5;
        let w = self.content_w() - GROUP_INDENT;
        let h = self.cursor_y - top;
        draw_rectangle_lines(x, top, w, h, 1.0, self.theme.group_border);
        self.cursor_y += SPACING;
    }

    fn row_begin(&mut self, columns: usize) {
        self.row = Some(RowLayout { columns: columns.max(1), next: 0, y: self.cursor_y });
    }

    fn row_end(&mut self) {
        if self.row.take().is_some() {
            self.cursor_y += ROW_HEIGHT + SPACING;
        }
    }

    fn button(&mut self, label: &str, width: f32) -> bool {
        let rect = self.next_rect(width);
        button(self.ctx, rect, label, self.theme, false)
    }

    fn input_int(&mut self, label: &str, value: &mut i32) -> bool {
        let rect = self.next_rect(1.0);
        let (label_rect, field) = rect.split_h_px(rect.w * LABEL_WIDTH);
        draw_label(&label_rect, label, self.theme.text, false);
        int_field(self.ctx, field, value, self.theme)
    }

    fn input_text(&mut self, label: &str, value: &mut String) -> bool {
        let rect = self.next_rect(1.0);
        let (label_rect, field) = rect.split_h_px(rect.w * LABEL_WIDTH);
        draw_label(&label_rect, label, self.theme.text, false);
        text_field(self.ctx, field, value, self.theme)
    }
}

/// Draw the help line at the bottom of `rect`
pub fn draw_help_text(rect: &Rect, text: &str, theme: &Theme) {
    if text.is_empty() {
        return;
    }
    let strip = rect.slice_bottom(ROW_HEIGHT + 8.0).pad(4.0);
    draw_label(&strip, text, theme.text_dim, false);
}
