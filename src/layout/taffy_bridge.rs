//! Taffy Bridge - Flexbox placement of the form
//!
//! Builds a Taffy tree describing the form (title, field rows, the
//! bordered work-experience section, submit button), runs layout
//! computation, and extracts absolute rectangles for every slot.
//!
//! The tree is rebuilt from the form on every frame; it is small and the
//! rows change whenever entries are appended or removed.

use std::collections::HashMap;

use taffy::{
    AlignItems, AlignSelf, AvailableSpace, Dimension, Display, FlexDirection, JustifyContent,
    LengthPercentage, LengthPercentageAuto, NodeId, Rect, Size, Style, TaffyTree,
};

use crate::error::AppError;
use crate::form::{ExperienceField, ExperienceId, FieldKey, RegistrationForm, ScalarField};
use crate::types::ClipRect;

/// Height of an outlined input or button: border, content, border.
pub const CONTROL_HEIGHT: u16 = 3;
/// Height of the helper line under a scalar field.
pub const HELPER_HEIGHT: u16 = 1;
/// Width of the submit button.
pub const SUBMIT_WIDTH: u16 = 12;

// =============================================================================
// SLOTS
// =============================================================================

/// A laid-out region of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Title,
    /// The outlined box of an input.
    Input(FieldKey),
    /// The line under a scalar input that carries its error.
    Helper(ScalarField),
    /// The bordered "Work Experience" frame.
    Section,
    Row(ExperienceId),
    Remove(ExperienceId),
    Add(ExperienceId),
    Submit,
}

/// Absolute slot rectangles, in content coordinates (before scrolling).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormLayout {
    slots: Vec<(Slot, ClipRect)>,
    pub content_width: u16,
    pub content_height: u16,
}

impl FormLayout {
    /// Rectangle of a slot.
    pub fn rect(&self, slot: Slot) -> Option<ClipRect> {
        self.slots.iter().find(|(s, _)| *s == slot).map(|(_, r)| *r)
    }

    /// All slots in tree order (parents before children).
    pub fn iter(&self) -> impl Iterator<Item = (Slot, ClipRect)> + '_ {
        self.slots.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

// =============================================================================
// STYLE HELPERS
// =============================================================================

fn cells(n: u16) -> Dimension {
    Dimension::Length(n as f32)
}

fn lp(n: u16) -> LengthPercentage {
    LengthPercentage::Length(n as f32)
}

fn uniform(n: u16) -> Rect<LengthPercentage> {
    Rect { left: lp(n), right: lp(n), top: lp(n), bottom: lp(n) }
}

fn margin_top(n: u16) -> Rect<LengthPercentageAuto> {
    Rect {
        left: LengthPercentageAuto::Length(0.0),
        right: LengthPercentageAuto::Length(0.0),
        top: LengthPercentageAuto::Length(n as f32),
        bottom: LengthPercentageAuto::Length(0.0),
    }
}

fn column() -> Style {
    Style {
        display: Display::Flex,
        flex_direction: FlexDirection::Column,
        align_items: Some(AlignItems::Stretch),
        ..Default::default()
    }
}

fn fixed_height(height: u16) -> Style {
    Style {
        size: Size { width: Dimension::Auto, height: cells(height) },
        flex_shrink: 0.0,
        ..Default::default()
    }
}

/// A flex item sharing its row by `grow` parts.
fn grow_item(grow: f32, height: u16) -> Style {
    Style {
        flex_grow: grow,
        flex_shrink: 1.0,
        flex_basis: cells(0),
        size: Size { width: Dimension::Auto, height: cells(height) },
        ..Default::default()
    }
}

// =============================================================================
// TREE BUILDING
// =============================================================================

struct Builder {
    tree: TaffyTree<()>,
    slots: HashMap<NodeId, Slot>,
}

impl Builder {
    fn leaf(&mut self, style: Style, slot: Option<Slot>) -> Result<NodeId, AppError> {
        let node = self.tree.new_leaf(style)?;
        if let Some(slot) = slot {
            self.slots.insert(node, slot);
        }
        Ok(node)
    }

    fn parent(
        &mut self,
        style: Style,
        children: &[NodeId],
        slot: Option<Slot>,
    ) -> Result<NodeId, AppError> {
        let node = self.tree.new_with_children(style, children)?;
        if let Some(slot) = slot {
            self.slots.insert(node, slot);
        }
        Ok(node)
    }

    fn scalar_field(&mut self, field: ScalarField) -> Result<NodeId, AppError> {
        let input = self.leaf(fixed_height(CONTROL_HEIGHT), Some(Slot::Input(field.into())))?;
        let helper = self.leaf(fixed_height(HELPER_HEIGHT), Some(Slot::Helper(field)))?;
        self.parent(column(), &[input, helper], None)
    }

    fn experience_row(&mut self, id: ExperienceId) -> Result<NodeId, AppError> {
        let mut children = Vec::with_capacity(4);
        for field in ExperienceField::ALL {
            let slot = Slot::Input(FieldKey::Experience(id, field));
            children.push(self.leaf(grow_item(field.grow(), CONTROL_HEIGHT), Some(slot))?);
        }

        let remove = self.leaf(grow_item(1.0, CONTROL_HEIGHT), Some(Slot::Remove(id)))?;
        let add = self.leaf(grow_item(1.0, CONTROL_HEIGHT), Some(Slot::Add(id)))?;
        let buttons = self.parent(
            Style {
                flex_direction: FlexDirection::Row,
                gap: Size { width: lp(1), height: lp(0) },
                ..grow_item(2.0, CONTROL_HEIGHT)
            },
            &[remove, add],
            None,
        )?;
        children.push(buttons);

        self.parent(
            Style {
                flex_direction: FlexDirection::Row,
                gap: Size { width: lp(1), height: lp(0) },
                ..fixed_height(CONTROL_HEIGHT)
            },
            &children,
            Some(Slot::Row(id)),
        )
    }
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Lay out `form` for a terminal `terminal_width` columns wide.
///
/// The form is a centered column at most `max_width` wide. Height is not
/// constrained; the view scrolls.
pub fn compute_form_layout(
    form: &RegistrationForm,
    terminal_width: u16,
    max_width: u16,
) -> Result<FormLayout, AppError> {
    let mut b = Builder { tree: TaffyTree::new(), slots: HashMap::new() };

    let mut children = Vec::new();
    children.push(b.leaf(fixed_height(1), Some(Slot::Title))?);
    for field in ScalarField::ALL {
        let node = b.scalar_field(field)?;
        if field == ScalarField::FirstName {
            b.tree.set_style(node, Style { margin: margin_top(1), ..column() })?;
        }
        children.push(node);
    }

    let mut rows = Vec::new();
    for &id in form.values().work_experiences.ids() {
        rows.push(b.experience_row(id)?);
    }
    let section = b.parent(
        Style {
            border: uniform(1),
            padding: Rect { left: lp(1), right: lp(1), top: lp(0), bottom: lp(0) },
            gap: Size { width: lp(0), height: lp(1) },
            flex_shrink: 0.0,
            ..column()
        },
        &rows,
        Some(Slot::Section),
    )?;
    children.push(section);

    let submit = b.leaf(
        Style {
            size: Size { width: cells(SUBMIT_WIDTH), height: cells(CONTROL_HEIGHT) },
            align_self: Some(AlignSelf::FlexStart),
            margin: margin_top(1),
            flex_shrink: 0.0,
            ..Default::default()
        },
        Some(Slot::Submit),
    )?;
    children.push(submit);

    let width = terminal_width.min(max_width);
    let form_node = b.parent(
        Style {
            size: Size { width: cells(width), height: Dimension::Auto },
            padding: Rect { left: lp(1), right: lp(1), top: lp(1), bottom: lp(1) },
            ..column()
        },
        &children,
        None,
    )?;
    let root = b.parent(
        Style {
            size: Size { width: cells(terminal_width), height: Dimension::Auto },
            flex_direction: FlexDirection::Row,
            justify_content: Some(JustifyContent::Center),
            align_items: Some(AlignItems::FlexStart),
            ..Default::default()
        },
        &[form_node],
        None,
    )?;

    b.tree.compute_layout(
        root,
        Size {
            width: AvailableSpace::Definite(terminal_width as f32),
            height: AvailableSpace::MaxContent,
        },
    )?;

    let mut layout = FormLayout::default();
    collect(&b, root, 0.0, 0.0, &mut layout)?;
    let root_layout = b.tree.layout(root)?;
    layout.content_width = root_layout.size.width.round() as u16;
    layout.content_height = root_layout.size.height.round() as u16;
    Ok(layout)
}

/// Walk the tree accumulating offsets; taffy locations are parent-relative.
fn collect(
    b: &Builder,
    node: NodeId,
    parent_x: f32,
    parent_y: f32,
    out: &mut FormLayout,
) -> Result<(), AppError> {
    let layout = b.tree.layout(node)?;
    let x = parent_x + layout.location.x;
    let y = parent_y + layout.location.y;

    if let Some(slot) = b.slots.get(&node) {
        out.slots.push((
            *slot,
            ClipRect::new(
                x.round() as u16,
                y.round() as u16,
                layout.size.width.round() as u16,
                layout.size.height.round() as u16,
            ),
        ));
    }

    for child in b.tree.children(node)? {
        collect(b, child, x, y, out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout_for(form: &RegistrationForm, width: u16) -> FormLayout {
        compute_form_layout(form, width, 80).unwrap()
    }

    #[test]
    fn test_title_and_fields_stack() {
        let form = RegistrationForm::new();
        let layout = layout_for(&form, 80);

        let title = layout.rect(Slot::Title).unwrap();
        let first = layout.rect(Slot::Input(ScalarField::FirstName.into())).unwrap();
        let last = layout.rect(Slot::Input(ScalarField::LastName.into())).unwrap();
        let helper = layout.rect(Slot::Helper(ScalarField::FirstName)).unwrap();

        assert_eq!(title.y, 1);
        assert_eq!(first.y, 3);
        assert_eq!(first.height, CONTROL_HEIGHT);
        assert_eq!(helper.y, first.y + CONTROL_HEIGHT);
        assert_eq!(last.y, helper.y + HELPER_HEIGHT);
        assert_eq!(first.width, 78);
    }

    #[test]
    fn test_form_is_centered_and_capped() {
        let form = RegistrationForm::new();
        let layout = layout_for(&form, 120);

        let first = layout.rect(Slot::Input(ScalarField::FirstName.into())).unwrap();
        // (120 - 80) / 2 + 1 padding
        assert_eq!(first.x, 21);
        assert_eq!(first.width, 78);
    }

    #[test]
    fn test_row_columns_in_proportion() {
        let form = RegistrationForm::new();
        let id = form.values().work_experiences.id_at(0).unwrap();
        let layout = layout_for(&form, 80);

        let company = layout
            .rect(Slot::Input(FieldKey::Experience(id, ExperienceField::CompanyName)))
            .unwrap();
        let years = layout
            .rect(Slot::Input(FieldKey::Experience(id, ExperienceField::YearsOfExperience)))
            .unwrap();
        let remove = layout.rect(Slot::Remove(id)).unwrap();
        let add = layout.rect(Slot::Add(id)).unwrap();

        assert!(years.width > company.width);
        assert!(remove.x > years.x);
        assert!(add.x > remove.x);
        assert_eq!(company.y, add.y);
    }

    #[test]
    fn test_section_grows_with_rows() {
        let mut form = RegistrationForm::new();
        let one = layout_for(&form, 80).rect(Slot::Section).unwrap();
        let id = form.append_experience();
        let layout = layout_for(&form, 80);
        let two = layout.rect(Slot::Section).unwrap();

        assert_eq!(two.height, one.height + CONTROL_HEIGHT + 1);
        assert!(layout.rect(Slot::Row(id)).is_some());
        let submit = layout.rect(Slot::Submit).unwrap();
        assert!(submit.y >= two.y + two.height);
        assert_eq!(submit.width, SUBMIT_WIDTH);
    }

    #[test]
    fn test_narrow_terminal() {
        let form = RegistrationForm::new();
        let layout = layout_for(&form, 30);
        assert_eq!(layout.rect(Slot::Input(ScalarField::Email.into())).unwrap().width, 28);
    }
}
