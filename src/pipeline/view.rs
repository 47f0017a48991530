//! View - the read-only render pass.
//!
//! Turns the form, its focus and the computed layout into a [`Frame`]:
//! a screen-sized buffer, the clickable regions, and where the caret is.
//! Nothing here mutates state; every change goes through the controller.
//!
//! Rendering happens in two steps. The whole form is drawn into a
//! content-sized buffer, then the rows in view (`scroll_y..scroll_y+height`)
//! are copied onto the screen.

use std::collections::HashMap;

use crate::form::{FieldKey, InputKind, RegistrationForm, ScalarField};
use crate::layout::text_measure::{string_width, truncate_text, visible_slice, width_of_prefix};
use crate::layout::{FormLayout, Slot};
use crate::renderer::FrameBuffer;
use crate::state::focus::FocusTarget;
use crate::state::text_edit::ensure_cursor_visible;
use crate::theme::Palette;
use crate::types::{Attr, BorderStyle, ClipRect, Rgba};

pub const TITLE: &str = "Registration Form";
pub const SECTION_TITLE: &str = "Work Experience";
pub const SUBMIT_LABEL: &str = "Submit";
pub const REMOVE_LABEL: &str = "-";
pub const ADD_LABEL: &str = "+";
const DATE_PLACEHOLDER: &str = "YYYY-MM-DD";

// =============================================================================
// Types
// =============================================================================

/// A clickable screen region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitRegion {
    pub rect: ClipRect,
    pub target: FocusTarget,
}

/// Result of one render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub buffer: FrameBuffer,
    pub hit_regions: Vec<HitRegion>,
    /// Screen position of the caret, when a visible input is focused.
    pub cursor: Option<(u16, u16)>,
}

impl Frame {
    /// The target under a screen position.
    pub fn hit_test(&self, x: u16, y: u16) -> Option<FocusTarget> {
        hit_test(&self.hit_regions, x, y)
    }
}

/// The target under a screen position.
pub fn hit_test(regions: &[HitRegion], x: u16, y: u16) -> Option<FocusTarget> {
    regions.iter().find(|r| r.rect.contains(x, y)).map(|r| r.target)
}

/// Everything the view reads.
#[derive(Debug, Clone, Copy)]
pub struct ViewContext<'a> {
    pub form: &'a RegistrationForm,
    pub focused: FocusTarget,
    /// Caret per input, in chars. Inputs without an entry have the caret
    /// at the end of their value.
    pub carets: &'a HashMap<FieldKey, usize>,
    pub layout: &'a FormLayout,
    pub palette: &'a Palette,
    /// Screen size (width, height).
    pub size: (u16, u16),
    pub scroll_y: u16,
}

impl ViewContext<'_> {
    fn caret(&self, key: FieldKey, value: &str) -> usize {
        let len = value.chars().count();
        self.carets.get(&key).copied().unwrap_or(len).min(len)
    }
}

// =============================================================================
// Hit regions
// =============================================================================

/// What a slot does when clicked, if anything.
fn slot_target(form: &RegistrationForm, slot: Slot) -> Option<FocusTarget> {
    match slot {
        Slot::Input(key) => Some(FocusTarget::Field(key)),
        Slot::Remove(id) if form.can_remove_experience() => Some(FocusTarget::Remove(id)),
        Slot::Add(id) => Some(FocusTarget::Add(id)),
        Slot::Submit => Some(FocusTarget::Submit),
        _ => None,
    }
}

/// Clickable regions in screen coordinates, clipped to the screen.
pub fn hit_regions(
    form: &RegistrationForm,
    layout: &FormLayout,
    scroll_y: u16,
    size: (u16, u16),
) -> Vec<HitRegion> {
    let screen = ClipRect::new(0, 0, size.0, size.1);
    layout
        .iter()
        .filter_map(|(slot, rect)| {
            let target = slot_target(form, slot)?;
            let top = rect.y.checked_sub(scroll_y);
            // Partially scrolled-off regions keep their visible part.
            let (y, height) = match top {
                Some(y) => (y, rect.height),
                None => (0, rect.height.saturating_sub(scroll_y - rect.y)),
            };
            let rect = ClipRect::new(rect.x, y, rect.width, height).intersect(&screen)?;
            Some(HitRegion { rect, target })
        })
        .collect()
}

/// The content rectangle a focus target occupies, including a scalar
/// field's helper line.
pub fn focus_rect(layout: &FormLayout, target: FocusTarget) -> Option<ClipRect> {
    match target {
        FocusTarget::Field(key) => {
            let input = layout.rect(Slot::Input(key))?;
            let helper = match key {
                FieldKey::Scalar(field) => layout.rect(Slot::Helper(field)),
                FieldKey::Experience(..) => None,
            };
            Some(match helper {
                Some(h) => ClipRect { height: h.y + h.height - input.y, ..input },
                None => input,
            })
        }
        FocusTarget::Remove(id) => layout.rect(Slot::Remove(id)),
        FocusTarget::Add(id) => layout.rect(Slot::Add(id)),
        FocusTarget::Submit => layout.rect(Slot::Submit),
    }
}

// =============================================================================
// Render
// =============================================================================

/// Render the form into a screen-sized frame.
pub fn render(ctx: &ViewContext<'_>) -> Frame {
    let (width, height) = ctx.size;
    let palette = ctx.palette;
    let content_height = ctx.layout.content_height.max(height);
    let mut content = FrameBuffer::with_background(width, content_height, palette.background);
    let mut cursor = None;

    for (slot, rect) in ctx.layout.iter() {
        match slot {
            Slot::Title => {
                content.draw_text_centered(
                    rect.x,
                    rect.y,
                    rect.width,
                    TITLE,
                    palette.primary,
                    None,
                    Attr::BOLD,
                    None,
                );
            }
            Slot::Input(key) => {
                if let Some(caret) = draw_input(&mut content, ctx, key, rect) {
                    cursor = Some(caret);
                }
            }
            Slot::Helper(field) => draw_helper(&mut content, ctx, field, rect),
            Slot::Section => {
                content.draw_border(rect, BorderStyle::Rounded, palette.border, None);
                draw_border_title(&mut content, rect, SECTION_TITLE, palette.text, Attr::BOLD);
            }
            Slot::Row(_) => {}
            Slot::Remove(id) => {
                let enabled = ctx.form.can_remove_experience();
                let focused = ctx.focused == FocusTarget::Remove(id);
                draw_button(&mut content, palette, rect, REMOVE_LABEL, focused, enabled);
            }
            Slot::Add(id) => {
                let focused = ctx.focused == FocusTarget::Add(id);
                draw_button(&mut content, palette, rect, ADD_LABEL, focused, true);
            }
            Slot::Submit => {
                let focused = ctx.focused == FocusTarget::Submit;
                draw_button(&mut content, palette, rect, SUBMIT_LABEL, focused, true);
            }
        }
    }

    let mut buffer = FrameBuffer::with_background(width, height, palette.background);
    buffer.blit_rows(&content, ctx.scroll_y, 0, height);

    let cursor = cursor.and_then(|(x, y): (u16, u16)| {
        let y = y.checked_sub(ctx.scroll_y)?;
        (y < height && x < width).then_some((x, y))
    });

    Frame {
        buffer,
        hit_regions: hit_regions(ctx.form, ctx.layout, ctx.scroll_y, ctx.size),
        cursor,
    }
}

/// Outlined input: border, label in the top edge, value inside.
///
/// Returns the caret's content position when this input is focused.
fn draw_input(
    buf: &mut FrameBuffer,
    ctx: &ViewContext<'_>,
    key: FieldKey,
    rect: ClipRect,
) -> Option<(u16, u16)> {
    let palette = ctx.palette;
    let focused = ctx.focused == FocusTarget::Field(key);
    let invalid = ctx.form.error(key).is_some();

    let (border, label_color) = if invalid {
        (palette.error, palette.error)
    } else if focused {
        (palette.border_focus, palette.primary)
    } else {
        (palette.border, palette.text_muted)
    };
    let style = if focused { BorderStyle::Bold } else { BorderStyle::Rounded };
    buf.draw_border(rect, style, border, None);
    draw_border_title(buf, rect, key.label(), label_color, Attr::NONE);

    if rect.width < 5 || rect.height < 3 {
        return None;
    }
    let inner = ClipRect::new(rect.x + 2, rect.y + 1, rect.width - 4, 1);
    let value = ctx.form.value(key).unwrap_or_default();

    if value.is_empty() && key.kind() == InputKind::Date {
        buf.draw_text(inner.x, inner.y, DATE_PLACEHOLDER, palette.text_disabled, None, Attr::NONE, Some(&inner));
    }

    let caret = ctx.caret(key, value);
    let offset = ensure_cursor_visible(caret, 0, inner.width as usize);
    let shown = visible_slice(value, offset, inner.width);
    buf.draw_text(inner.x, inner.y, &shown, palette.text, None, Attr::NONE, Some(&inner));

    focused.then(|| {
        let col = width_of_prefix(&shown, caret - offset).min(inner.width.saturating_sub(1));
        (inner.x + col, inner.y)
    })
}

fn draw_helper(buf: &mut FrameBuffer, ctx: &ViewContext<'_>, field: ScalarField, rect: ClipRect) {
    if let Some(error) = ctx.form.status(field).error() {
        let message = truncate_text(&error.to_string(), rect.width.saturating_sub(2));
        buf.draw_text(rect.x + 2, rect.y, &message, ctx.palette.error, None, Attr::NONE, Some(&rect));
    }
}

/// ` Title ` over the top border, two cells in.
fn draw_border_title(buf: &mut FrameBuffer, rect: ClipRect, title: &str, color: Rgba, attrs: Attr) {
    if rect.width < 6 {
        return;
    }
    let clip = ClipRect::new(rect.x + 1, rect.y, rect.width - 2, 1);
    let text = format!(" {} ", truncate_text(title, rect.width - 4));
    buf.draw_text(rect.x + 1, rect.y, &text, color, None, attrs, Some(&clip));
}

fn draw_button(
    buf: &mut FrameBuffer,
    palette: &Palette,
    rect: ClipRect,
    label: &str,
    focused: bool,
    enabled: bool,
) {
    let (color, attrs, style) = match (enabled, focused) {
        (false, _) => (palette.text_disabled, Attr::DIM, BorderStyle::Rounded),
        (true, true) => (palette.border_focus, Attr::BOLD | Attr::INVERSE, BorderStyle::Bold),
        (true, false) => (palette.primary, Attr::BOLD, BorderStyle::Rounded),
    };
    buf.draw_border(rect, style, color, None);
    if rect.height >= 3 && rect.width >= 3 {
        let inner = ClipRect::new(rect.x + 1, rect.y + 1, rect.width - 2, 1);
        let label_width = string_width(label).min(inner.width);
        let x = inner.x + (inner.width - label_width) / 2;
        buf.draw_text(x, inner.y, label, color, None, attrs, Some(&inner));
    }
}

// =============================================================================
// Notice
// =============================================================================

/// Draw a modal notice box centered over `buffer`.
pub fn draw_notice(buffer: &mut FrameBuffer, palette: &Palette, message: &str) {
    const HINT: &str = "[ OK ]";
    let width = (string_width(message).max(string_width(HINT)) + 6).min(buffer.width());
    let height = 6u16.min(buffer.height());
    let rect = ClipRect::new(
        (buffer.width() - width) / 2,
        (buffer.height() - height) / 2,
        width,
        height,
    );

    buffer.fill_rect(rect, palette.surface, None);
    buffer.draw_border(rect, BorderStyle::Double, palette.success, None);
    buffer.draw_text_centered(rect.x, rect.y + 2, width, message, palette.text, None, Attr::BOLD, Some(&rect));
    buffer.draw_text_centered(rect.x, rect.y + 3, width, HINT, palette.primary, None, Attr::INVERSE, Some(&rect));
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::ExperienceField;
    use crate::layout::compute_form_layout;

    struct Fixture {
        form: RegistrationForm,
        carets: HashMap<FieldKey, usize>,
        palette: Palette,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                form: RegistrationForm::new(),
                carets: HashMap::new(),
                palette: Palette::default(),
            }
        }

        fn render(&self, focused: FocusTarget, size: (u16, u16), scroll_y: u16) -> Frame {
            let layout = compute_form_layout(&self.form, size.0, 80).unwrap();
            render(&ViewContext {
                form: &self.form,
                focused,
                carets: &self.carets,
                layout: &layout,
                palette: &self.palette,
                size,
                scroll_y,
            })
        }
    }

    #[test]
    fn test_renders_labels_and_title() {
        let fixture = Fixture::new();
        let frame = fixture.render(FocusTarget::Submit, (80, 60), 0);

        for text in [
            TITLE,
            "First Name",
            "Last Name",
            "Phone Number",
            "Email",
            "Date of Birth",
            SECTION_TITLE,
            "Company Name",
            "Role/Position",
            "Years of Experience",
            SUBMIT_LABEL,
        ] {
            assert!(frame.buffer.contains_text(text), "missing {text}");
        }
        assert!(frame.cursor.is_none());
    }

    #[test]
    fn test_error_shown_under_field() {
        let mut fixture = Fixture::new();
        fixture.form.set_value(ScalarField::PhoneNumber, "123").unwrap();
        let frame = fixture.render(FocusTarget::Submit, (80, 60), 0);
        assert!(frame.buffer.contains_text("Please enter a valid 10-digit phone number"));
        assert!(!frame.buffer.contains_text("Email is required"));
    }

    #[test]
    fn test_value_and_cursor() {
        let mut fixture = Fixture::new();
        fixture.form.set_value(ScalarField::FirstName, "Ada").unwrap();
        let frame = fixture.render(ScalarField::FirstName.into(), (80, 60), 0);

        assert!(frame.buffer.contains_text("Ada"));
        let layout = compute_form_layout(&fixture.form, 80, 80).unwrap();
        let rect = layout.rect(Slot::Input(ScalarField::FirstName.into())).unwrap();
        assert_eq!(frame.cursor, Some((rect.x + 2 + 3, rect.y + 1)));
    }

    #[test]
    fn test_disabled_remove_is_not_clickable() {
        let mut fixture = Fixture::new();
        let first = fixture.form.values().work_experiences.id_at(0).unwrap();
        let frame = fixture.render(FocusTarget::Submit, (80, 60), 0);
        assert!(!frame.hit_regions.iter().any(|r| r.target == FocusTarget::Remove(first)));

        fixture.form.append_experience();
        let frame = fixture.render(FocusTarget::Submit, (80, 60), 0);
        assert!(frame.hit_regions.iter().any(|r| r.target == FocusTarget::Remove(first)));
    }

    #[test]
    fn test_hit_test_finds_input() {
        let fixture = Fixture::new();
        let id = fixture.form.values().work_experiences.id_at(0).unwrap();
        let key = FieldKey::Experience(id, ExperienceField::Role);
        let layout = compute_form_layout(&fixture.form, 80, 80).unwrap();
        let rect = layout.rect(Slot::Input(key)).unwrap();

        let frame = fixture.render(FocusTarget::Submit, (80, 60), 0);
        assert_eq!(frame.hit_test(rect.x + 1, rect.y + 1), Some(FocusTarget::Field(key)));
        assert_eq!(frame.hit_test(0, 0), None);
    }

    #[test]
    fn test_scrolling_shifts_content() {
        let fixture = Fixture::new();
        let frame = fixture.render(FocusTarget::Submit, (80, 10), 5);
        assert!(!frame.buffer.contains_text(TITLE));

        let regions = &frame.hit_regions;
        assert!(regions.iter().all(|r| r.rect.y + r.rect.height <= 10));
    }

    #[test]
    fn test_date_placeholder() {
        let fixture = Fixture::new();
        let frame = fixture.render(FocusTarget::Submit, (80, 60), 0);
        assert!(frame.buffer.contains_text(DATE_PLACEHOLDER));
    }

    #[test]
    fn test_notice() {
        let mut buffer = FrameBuffer::new(60, 20);
        draw_notice(&mut buffer, &Palette::default(), "Form submitted successfully!");
        assert!(buffer.contains_text("Form submitted successfully!"));
        assert!(buffer.contains_text("[ OK ]"));
    }
}
