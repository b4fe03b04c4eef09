//! Basic UI widgets
//!
//! Flat buttons, segmented choices, integer and text fields. Each widget draws
//! itself immediately and reports whether the user changed something.

use macroquad::prelude::*;

use super::{Rect, Theme, UiContext, FONT_SIZE_CONTENT};

const CORNER_RADIUS: f32 = 3.0;
const MAX_TEXT_LEN: usize = 32;

/// Draw a rounded rectangle (simple approximation using overlapping rects)
pub fn draw_rounded_rect(rect: &Rect, r: f32, color: Color) {
    let r = r.min(rect.w * 0.5).min(rect.h * 0.5);
    draw_rectangle(rect.x + r, rect.y, rect.w - r * 2.0, rect.h, color);
    draw_rectangle(rect.x, rect.y + r, rect.w, rect.h - r * 2.0, color);
    draw_circle(rect.x + r, rect.y + r, r, color);
    draw_circle(rect.right() - r, rect.y + r, r, color);
    draw_circle(rect.x + r, rect.bottom() - r, r, color);
    draw_circle(rect.right() - r, rect.bottom() - r, r, color);
}

/// Text vertically centered in `rect`, left aligned or centered
pub fn draw_label(rect: &Rect, text: &str, color: Color, centered: bool) {
    let dims = measure_text(text, None, FONT_SIZE_CONTENT as u16, 1.0);
    let x = if centered { rect.x + (rect.w - dims.width) * 0.5 } else { rect.x + 4.0 };
    // Round to integer pixels for crisp text
    let y = (rect.y + (rect.h + dims.offset_y) * 0.5).round();
    draw_text(text, x.round(), y, FONT_SIZE_CONTENT, color);
}

/// Flat button, returns true if clicked
pub fn button(ctx: &mut UiContext, rect: Rect, label: &str, theme: &Theme, active: bool) -> bool {
    let hovered = ctx.mouse.inside(&rect);
    let bg = if active {
        theme.accent
    } else if hovered {
        theme.button_hover
    } else {
        theme.button
    };
    draw_rounded_rect(&rect, CORNER_RADIUS, bg);
    draw_label(&rect, label, theme.text, true);
    ctx.mouse.clicked(&rect)
}

/// Row of mutually exclusive buttons. Returns true when the choice changed.
pub fn segmented(ctx: &mut UiContext, rect: Rect, selected: &mut usize, labels: &[&str], theme: &Theme) -> bool {
    let mut changed = false;
    for (i, label) in labels.iter().enumerate() {
        let cell = rect.column(i, labels.len(), 2.0);
        if button(ctx, cell, label, theme, *selected == i) && *selected != i {
            *selected = i;
            changed = true;
        }
    }
    changed
}

/// Apply typed keys to an integer edit buffer. Only digits and a leading
/// minus sign are accepted.
pub fn edit_int_buffer(buffer: &mut String, chars: &[char], backspace: bool) {
    if backspace {
        buffer.pop();
    }
    for &c in chars {
        match c {
            '0'..='9' if buffer.len() < 9 => buffer.push(c),
            '-' if buffer.is_empty() => buffer.push(c),
            _ => {}
        }
    }
}

/// Integer field: `[-] value [+]`. The wheel steps the value while hovered,
/// clicking the value starts typing, Enter or a click elsewhere commits,
/// Escape cancels. Returns true when `value` changed.
pub fn int_field(ctx: &mut UiContext, rect: Rect, value: &mut i32, theme: &Theme) -> bool {
    let id = ctx.next_id();
    let step_w = rect.h.min(rect.w / 3.0);
    let minus = Rect::new(rect.x, rect.y, step_w, rect.h);
    let plus = Rect::new(rect.right() - step_w, rect.y, step_w, rect.h);
    let field = Rect::new(minus.right() + 1.0, rect.y, (rect.w - step_w * 2.0 - 2.0).max(0.0), rect.h);

    let old = *value;
    let hovered = ctx.mouse.inside(&rect);
    if hovered && ctx.mouse.scroll != 0.0 {
        *value = value.saturating_add(ctx.mouse.scroll.signum() as i32);
    }

    if ctx.is_focused(id) {
        let commit = ctx.keys.enter || (ctx.mouse.left_pressed && !ctx.mouse.inside(&field));
        let cancel = ctx.keys.escape;
        let mut clear = false;
        if let Some((_, buffer)) = ctx.focus.as_mut() {
            edit_int_buffer(buffer, &ctx.keys.chars, ctx.keys.backspace);
            if cancel {
                clear = true;
            } else if commit {
                if let Ok(v) = buffer.parse::<i32>() {
                    *value = v;
                }
                clear = true;
            }
        }
        if clear {
            ctx.focus = None;
        }
    } else if ctx.mouse.clicked(&field) {
        ctx.focus = Some((id, value.to_string()));
    }

    if button(ctx, minus, "-", theme, false) {
        *value = value.saturating_sub(1);
    }
    if button(ctx, plus, "+", theme, false) {
        *value = value.saturating_add(1);
    }

    let focused_text = match &ctx.focus {
        Some((f, buffer)) if *f == id => Some(format!("{}_", buffer)),
        _ => None,
    };
    let bg = if focused_text.is_some() { theme.accent } else { theme.bg };
    draw_rounded_rect(&field, CORNER_RADIUS, bg);
    let text = focused_text.unwrap_or_else(|| value.to_string());
    draw_label(&field, &text, theme.text, true);

    *value != old
}

/// Apply typed keys to a text edit buffer (printable characters only)
pub fn edit_text_buffer(buffer: &mut String, chars: &[char], backspace: bool) {
    if backspace {
        buffer.pop();
    }
    for &c in chars {
        if !c.is_control() && buffer.chars().count() < MAX_TEXT_LEN {
            buffer.push(c);
        }
    }
}

/// Single line text field. Click to edit, Enter or a click elsewhere
/// commits, Escape cancels. Returns true when `value` changed.
pub fn text_field(ctx: &mut UiContext, rect: Rect, value: &mut String, theme: &Theme) -> bool {
    let id = ctx.next_id();
    let mut changed = false;

    if ctx.is_focused(id) {
        let commit = ctx.keys.enter || (ctx.mouse.left_pressed && !ctx.mouse.inside(&rect));
        let cancel = ctx.keys.escape;
        let mut clear = false;
        if let Some((_, buffer)) = ctx.focus.as_mut() {
            edit_text_buffer(buffer, &ctx.keys.chars, ctx.keys.backspace);
            if cancel {
                clear = true;
            } else if commit {
                if *buffer != *value {
                    value.clone_from(buffer);
                    changed = true;
                }
                clear = true;
            }
        }
        if clear {
            ctx.focus = None;
        }
    } else if ctx.mouse.clicked(&rect) {
        ctx.focus = Some((id, value.clone()));
    }

    let focused_text = match &ctx.focus {
        Some((f, buffer)) if *f == id => Some(format!("{}_", buffer)),
        _ => None,
    };
    let bg = if focused_text.is_some() { theme.accent } else { theme.bg };
    draw_rounded_rect(&rect, CORNER_RADIUS, bg);
    let text = focused_text.unwrap_or_else(|| value.clone());
    draw_label(&rect, &text, theme.text, false);

    changed
}
