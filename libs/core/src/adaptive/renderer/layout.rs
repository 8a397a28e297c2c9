use crate::adaptive::diagnostics::child_path;
use crate::adaptive::model::{Column, ColumnSet, ColumnWidth, Container, Node, NodeKind};
use crate::adaptive::schema::ContainerStyle;

use super::visual::{Direction, Justify, Layout, StackRole, StackView, View, WidthPolicy};
use super::{RenderContext, base_layout, render_node, render_sequence};

pub const CONTAINER_GAP: u16 = 8;
pub const CONTAINER_INSET: u16 = 8;
pub const COLUMN_SET_GAP: u16 = 8;
pub const COLUMN_GAP: u16 = 6;

pub(super) fn render_container(
    node: &Node,
    container: &Container,
    path: &str,
    ctx: &mut RenderContext<'_>,
) -> View {
    let children = render_sequence(
        &container.items,
        &child_path(path, "items"),
        CONTAINER_GAP,
        ctx,
    );
    let padding = if container.style == ContainerStyle::Default {
        0
    } else {
        CONTAINER_INSET
    };
    View::Stack(StackView {
        role: StackRole::Container,
        id: node.id.clone(),
        direction: Direction::Vertical,
        justify: container.vertical_content_alignment.justify(),
        background: container.style.background(),
        padding,
        children,
    })
}

/// Columns go left to right; entries that are not columns are laid out as auto-width cells.
pub(super) fn render_column_set(
    node: &Node,
    set: &ColumnSet,
    path: &str,
    ctx: &mut RenderContext<'_>,
) -> View {
    let columns_path = child_path(path, "columns");
    let mut children = Vec::with_capacity(set.columns.len());
    for (index, entry) in set.columns.iter().enumerate() {
        let Some(mut cell) = render_node(entry, &child_path(&columns_path, index), ctx) else {
            continue;
        };
        cell.layout.width = match &entry.kind {
            NodeKind::Column(column) => width_policy(column.width),
            _ => WidthPolicy::Shrink,
        };
        cell.layout.gap_before = if children.is_empty() {
            0
        } else {
            COLUMN_SET_GAP
        };
        children.push(cell);
    }
    View::Stack(StackView {
        role: StackRole::ColumnSet,
        id: node.id.clone(),
        direction: Direction::Horizontal,
        justify: Justify::Start,
        background: None,
        padding: 0,
        children,
    })
}

pub(super) fn render_column(
    node: &Node,
    column: &Column,
    path: &str,
    ctx: &mut RenderContext<'_>,
) -> View {
    let children = render_sequence(&column.items, &child_path(path, "items"), COLUMN_GAP, ctx);
    View::Stack(StackView {
        role: StackRole::Column,
        id: node.id.clone(),
        direction: Direction::Vertical,
        justify: column.vertical_content_alignment.justify(),
        background: None,
        padding: 0,
        children,
    })
}

pub fn width_policy(width: ColumnWidth) -> WidthPolicy {
    match width {
        ColumnWidth::Stretch => WidthPolicy::Flex(1.0),
        ColumnWidth::Auto => WidthPolicy::Shrink,
        ColumnWidth::Pixels(pixels) => WidthPolicy::Fixed(f64::from(pixels)),
        ColumnWidth::Weight(weight) => WidthPolicy::Fixed(weight),
    }
}

/// Layout for a container, with `bleed` pulling it past the parent's inset.
pub(super) fn container_layout(node: &Node, container: &Container) -> Layout {
    let mut layout = base_layout(node.spacing, node.separator);
    if container.bleed {
        layout.inset_horizontal = -(CONTAINER_INSET as i16);
    }
    layout
}
