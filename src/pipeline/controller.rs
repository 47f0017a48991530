//! Controller - explicit event → state updates.
//!
//! Owns the form, focus, per-input carets and the scroll offset. Every
//! input event is applied here synchronously; afterwards the layout is
//! recomputed and the view can render a fresh frame from the new state.

use std::collections::HashMap;

use crate::error::AppError;
use crate::form::{
    FieldKey, RegistrationForm, SubmissionSink, SubmitOutcome, ValidationMode,
};
use crate::layout::{FormLayout, compute_form_layout};
use crate::state::focus::{FocusState, FocusTarget};
use crate::state::input::InputEvent;
use crate::state::keyboard::KeyboardEvent;
use crate::state::mouse::{MouseAction, MouseEvent, ScrollDirection};
use crate::state::text_edit::{EditResult, apply_key};
use crate::theme::Palette;
use crate::types::ClipRect;

use super::view::{self, Frame, ViewContext};

/// Lines scrolled per wheel notch.
const WHEEL_STEP: u16 = 3;

/// What the event loop should do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Form state plus everything needed to drive it from a terminal.
#[derive(Debug)]
pub struct FormController {
    form: RegistrationForm,
    focus: FocusState,
    carets: HashMap<FieldKey, usize>,
    layout: FormLayout,
    size: (u16, u16),
    max_width: u16,
    scroll_y: u16,
}

impl FormController {
    /// A fresh form laid out for a `size` screen.
    pub fn new(mode: ValidationMode, max_width: u16, size: (u16, u16)) -> Result<Self, AppError> {
        let form = RegistrationForm::with_mode(mode);
        let layout = compute_form_layout(&form, size.0, max_width)?;
        Ok(Self {
            form,
            focus: FocusState::new(),
            carets: HashMap::new(),
            layout,
            size,
            max_width,
            scroll_y: 0,
        })
    }

    pub fn form(&self) -> &RegistrationForm {
        &self.form
    }

    pub fn focused(&self) -> FocusTarget {
        self.focus.focused()
    }

    pub fn scroll_y(&self) -> u16 {
        self.scroll_y
    }

    pub fn layout(&self) -> &FormLayout {
        &self.layout
    }

    /// Caret of an input, in chars (end of value when never moved).
    pub fn caret(&self, key: FieldKey) -> usize {
        let len = self.form.value(key).map_or(0, |v| v.chars().count());
        self.carets.get(&key).copied().unwrap_or(len).min(len)
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Render the current state. Read-only.
    pub fn frame(&self, palette: &Palette) -> Frame {
        view::render(&ViewContext {
            form: &self.form,
            focused: self.focus.focused(),
            carets: &self.carets,
            layout: &self.layout,
            palette,
            size: self.size,
            scroll_y: self.scroll_y,
        })
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Apply one input event.
    pub fn handle_event<S: SubmissionSink>(
        &mut self,
        event: InputEvent,
        sink: S,
    ) -> Result<Flow, AppError> {
        match event {
            InputEvent::Key(key) => self.handle_key(&key, sink),
            InputEvent::Mouse(mouse) => self.handle_mouse(&mouse, sink),
            InputEvent::Resize(width, height) => {
                self.resize(width, height)?;
                Ok(Flow::Continue)
            }
            InputEvent::None => Ok(Flow::Continue),
        }
    }

    /// The screen changed size.
    pub fn resize(&mut self, width: u16, height: u16) -> Result<(), AppError> {
        self.size = (width, height);
        self.relayout()?;
        self.scroll_to_focus();
        Ok(())
    }

    /// Apply a key press.
    pub fn handle_key<S: SubmissionSink>(
        &mut self,
        event: &KeyboardEvent,
        sink: S,
    ) -> Result<Flow, AppError> {
        if !event.is_press() {
            return Ok(Flow::Continue);
        }
        if event.is_ctrl('c') {
            tracing::debug!("quit requested");
            return Ok(Flow::Quit);
        }

        let focused = self.focus.focused();
        match (event.key.as_str(), event.modifiers.shift) {
            ("Tab", false) | ("ArrowDown", _) => {
                self.focus.focus_next(&self.form);
            }
            ("Tab", true) | ("ArrowUp", _) => {
                self.focus.focus_previous(&self.form);
            }
            ("Enter", _) => self.activate(focused, sink)?,
            (" ", _) if focused.is_button() => self.activate(focused, sink)?,
            _ => {
                if let Some(key) = focused.field() {
                    self.edit(key, event)?;
                }
            }
        }

        self.relayout()?;
        self.scroll_to_focus();
        Ok(Flow::Continue)
    }

    /// Apply a mouse event.
    pub fn handle_mouse<S: SubmissionSink>(
        &mut self,
        event: &MouseEvent,
        sink: S,
    ) -> Result<Flow, AppError> {
        match (event.action, event.scroll) {
            (MouseAction::Scroll, Some(scroll)) => {
                match scroll.direction {
                    ScrollDirection::Up => self.scroll_by(-(WHEEL_STEP as i32)),
                    ScrollDirection::Down => self.scroll_by(WHEEL_STEP as i32),
                    _ => {}
                }
                return Ok(Flow::Continue);
            }
            _ if event.is_left_click() => {}
            _ => return Ok(Flow::Continue),
        }

        let regions = view::hit_regions(&self.form, &self.layout, self.scroll_y, self.size);
        let Some(target) = view::hit_test(&regions, event.x, event.y) else {
            return Ok(Flow::Continue);
        };
        if !self.focus.focus(&self.form, target) {
            return Ok(Flow::Continue);
        }
        if target.is_button() {
            self.activate(target, sink)?;
        }

        self.relayout()?;
        self.scroll_to_focus();
        Ok(Flow::Continue)
    }

    // =========================================================================
    // Updates
    // =========================================================================

    fn edit(&mut self, key: FieldKey, event: &KeyboardEvent) -> Result<(), AppError> {
        let value = self.form.value(key).unwrap_or_default();
        match apply_key(value, self.caret(key), key.kind(), event) {
            EditResult::Changed { value, caret } => {
                self.form.set_value(key, value)?;
                self.carets.insert(key, caret);
            }
            EditResult::Moved(caret) => {
                self.carets.insert(key, caret);
            }
            EditResult::Ignored | EditResult::Unhandled => {}
        }
        Ok(())
    }

    /// Press a button, or submit from a text field.
    fn activate<S: SubmissionSink>(&mut self, target: FocusTarget, sink: S) -> Result<(), AppError> {
        match target {
            FocusTarget::Add(_) => {
                self.form.append_experience();
            }
            FocusTarget::Remove(id) => {
                let rows = &self.form.values().work_experiences;
                let Some(index) = rows.index_of(id) else {
                    return Ok(());
                };
                // The button is disabled with one row; nothing to do.
                if !rows.can_remove() {
                    return Ok(());
                }
                self.form.remove_experience(index)?;
                self.carets.retain(|key, _| key.experience_id() != Some(id));
                self.focus.repair(&self.form, Some(index));
            }
            FocusTarget::Submit | FocusTarget::Field(_) => self.submit(sink),
        }
        Ok(())
    }

    fn submit<S: SubmissionSink>(&mut self, sink: S) {
        match self.form.submit(sink) {
            SubmitOutcome::Submitted(_) => {
                self.carets.clear();
                self.focus.repair(&self.form, None);
            }
            SubmitOutcome::Blocked(errors) => {
                // Jump to the first field that needs attention.
                if let Some(first) = errors.first() {
                    self.focus.focus(&self.form, FocusTarget::from(first.field()));
                }
            }
        }
    }

    // =========================================================================
    // Layout / scrolling
    // =========================================================================

    fn relayout(&mut self) -> Result<(), AppError> {
        self.layout = compute_form_layout(&self.form, self.size.0, self.max_width)?;
        self.scroll_y = self.scroll_y.min(self.max_scroll());
        Ok(())
    }

    fn max_scroll(&self) -> u16 {
        self.layout.content_height.saturating_sub(self.size.1)
    }

    fn scroll_by(&mut self, delta: i32) {
        let next = (self.scroll_y as i32 + delta).clamp(0, self.max_scroll() as i32);
        self.scroll_y = next as u16;
    }

    /// Scroll the least amount that brings the focused control into view.
    fn scroll_to_focus(&mut self) {
        let Some(rect) = view::focus_rect(&self.layout, self.focus.focused()) else {
            return;
        };
        self.scroll_y = scroll_to_show(self.scroll_y, rect, self.size.1).min(self.max_scroll());
    }
}

/// New scroll offset so `rect` lies inside a `view_height` window.
fn scroll_to_show(scroll_y: u16, rect: ClipRect, view_height: u16) -> u16 {
    let bottom = rect.y.saturating_add(rect.height);
    if rect.y < scroll_y {
        rect.y
    } else if bottom > scroll_y.saturating_add(view_height) {
        bottom.saturating_sub(view_height).min(rect.y)
    } else {
        scroll_y
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{ExperienceField, MemorySink, ScalarField};
    use crate::layout::Slot;
    use crate::state::keyboard::Modifiers;
    use crate::state::mouse::MouseButton;

    fn controller() -> FormController {
        FormController::new(ValidationMode::OnChange, 80, (80, 60)).unwrap()
    }

    fn press(c: &mut FormController, key: &str, sink: &mut MemorySink) {
        c.handle_key(&KeyboardEvent::new(key), sink).unwrap();
    }

    fn type_text(c: &mut FormController, text: &str, sink: &mut MemorySink) {
        for ch in text.chars() {
            press(c, &ch.to_string(), sink);
        }
    }

    #[test]
    fn test_typing_updates_only_focused_field() {
        let mut c = controller();
        let mut sink = MemorySink::new();

        type_text(&mut c, "Ada", &mut sink);

        assert_eq!(c.form().value(ScalarField::FirstName), Some("Ada"));
        assert_eq!(c.form().value(ScalarField::LastName), Some(""));
        assert_eq!(c.caret(ScalarField::FirstName.into()), 3);
    }

    #[test]
    fn test_tab_and_shift_tab() {
        let mut c = controller();
        let mut sink = MemorySink::new();

        press(&mut c, "Tab", &mut sink);
        assert_eq!(c.focused(), FocusTarget::from(ScalarField::LastName));

        c.handle_key(&KeyboardEvent::with_modifiers("Tab", Modifiers::shift()), &mut sink)
            .unwrap();
        assert_eq!(c.focused(), FocusTarget::from(ScalarField::FirstName));

        press(&mut c, "ArrowUp", &mut sink);
        assert_eq!(c.focused(), FocusTarget::Submit);
    }

    #[test]
    fn test_add_then_remove_via_keyboard() {
        let mut c = controller();
        let mut sink = MemorySink::new();
        let first = c.form().values().work_experiences.id_at(0).unwrap();

        assert!(c.focus.focus(&c.form, FocusTarget::Add(first)));
        press(&mut c, "Enter", &mut sink);
        assert_eq!(c.form().experience_count(), 2);
        assert_eq!(c.focused(), FocusTarget::Add(first));

        // Remove is now focusable, directly before Add.
        c.handle_key(&KeyboardEvent::with_modifiers("Tab", Modifiers::shift()), &mut sink)
            .unwrap();
        assert_eq!(c.focused(), FocusTarget::Remove(first));
        press(&mut c, " ", &mut sink);

        assert_eq!(c.form().experience_count(), 1);
        let remaining = c.form().values().work_experiences.id_at(0).unwrap();
        assert_ne!(remaining, first);
        assert_eq!(c.focused(), FocusTarget::Add(remaining));
    }

    #[test]
    fn test_enter_in_field_submits() {
        let mut c = controller();
        let mut sink = MemorySink::new();

        press(&mut c, "Enter", &mut sink);

        assert!(sink.records.is_empty());
        // Blocked: focus jumps to the first invalid field.
        assert_eq!(c.focused(), FocusTarget::from(ScalarField::PhoneNumber));
        assert!(c.form().error(ScalarField::Email.into()).is_some());
    }

    #[test]
    fn test_number_input_filters() {
        let mut c = controller();
        let mut sink = MemorySink::new();
        let id = c.form().values().work_experiences.id_at(0).unwrap();
        let key = FieldKey::Experience(id, ExperienceField::YearsOfExperience);
        assert!(c.focus.focus(&c.form, FocusTarget::Field(key)));

        type_text(&mut c, "1x2", &mut sink);

        assert_eq!(c.form().value(key), Some("12"));
    }

    #[test]
    fn test_click_focuses_input() {
        let mut c = controller();
        let mut sink = MemorySink::new();
        let rect = c.layout().rect(Slot::Input(ScalarField::Email.into())).unwrap();

        c.handle_mouse(&MouseEvent::down(MouseButton::Left, rect.x + 3, rect.y + 1), &mut sink)
            .unwrap();

        assert_eq!(c.focused(), FocusTarget::from(ScalarField::Email));
    }

    #[test]
    fn test_click_disabled_remove_ignored() {
        let mut c = controller();
        let mut sink = MemorySink::new();
        let id = c.form().values().work_experiences.id_at(0).unwrap();
        let rect = c.layout().rect(Slot::Remove(id)).unwrap();

        c.handle_mouse(&MouseEvent::down(MouseButton::Left, rect.x + 1, rect.y + 1), &mut sink)
            .unwrap();

        assert_eq!(c.form().experience_count(), 1);
        assert_eq!(c.focused(), FocusTarget::from(ScalarField::FirstName));
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut c = controller();
        let flow = c
            .handle_key(&KeyboardEvent::with_modifiers("c", Modifiers::ctrl()), MemorySink::new())
            .unwrap();
        assert_eq!(flow, Flow::Quit);
    }

    #[test]
    fn test_focus_scrolls_into_view() {
        let mut c = FormController::new(ValidationMode::OnChange, 80, (80, 12)).unwrap();
        let mut sink = MemorySink::new();

        press(&mut c, "ArrowUp", &mut sink);

        assert_eq!(c.focused(), FocusTarget::Submit);
        let submit = c.layout().rect(Slot::Submit).unwrap();
        assert!(c.scroll_y() > 0);
        assert!(submit.y + submit.height <= c.scroll_y() + 12);

        press(&mut c, "Tab", &mut sink);
        let first = c.layout().rect(Slot::Input(ScalarField::FirstName.into())).unwrap();
        assert_eq!(c.scroll_y(), first.y);
    }

    #[test]
    fn test_click_blocked_submit_scrolls_to_error() {
        let mut c = FormController::new(ValidationMode::OnChange, 80, (80, 12)).unwrap();
        let mut sink = MemorySink::new();
        c.scroll_y = c.max_scroll();

        let submit = c.layout().rect(Slot::Submit).unwrap();
        let screen_y = submit.y - c.scroll_y() + 1;
        c.handle_mouse(&MouseEvent::down(MouseButton::Left, submit.x + 2, screen_y), &mut sink)
            .unwrap();

        // Blocked: focus jumps back up to the phone field, which must be on screen.
        assert_eq!(c.focused(), FocusTarget::from(ScalarField::PhoneNumber));
        let phone = view::focus_rect(c.layout(), c.focused()).unwrap();
        assert!(phone.y >= c.scroll_y());
        assert!(phone.y + phone.height <= c.scroll_y() + 12);
    }

    #[test]
    fn test_wheel_scroll_clamped() {
        let mut c = FormController::new(ValidationMode::OnChange, 80, (80, 12)).unwrap();
        for _ in 0..100 {
            c.handle_mouse(&MouseEvent::scroll(ScrollDirection::Down, 0, 0), MemorySink::new())
                .unwrap();
        }
        assert_eq!(c.scroll_y(), c.layout().content_height - 12);
    }

    #[test]
    fn test_scroll_to_show() {
        let rect = ClipRect::new(0, 20, 10, 4);
        assert_eq!(scroll_to_show(0, rect, 10), 14);
        assert_eq!(scroll_to_show(30, rect, 10), 20);
        assert_eq!(scroll_to_show(18, rect, 10), 18);
    }
}
