//! # Edit Session
//!
//! One open page in the visual builder: the tree being edited, the current
//! selection, undo history and the drag gesture in progress.
//!
//! Every structural edit goes through a [`Mutation`] recorded on the
//! [`UndoStack`], and every subtree that enters the page gets ids first.

use crate::drop_position::{BoundingBox, DragSession, DropPosition, Point, HOVER_THROTTLE, MAX_DROP_MARGIN};
use crate::properties::{update_class_list, ClassProperty};
use crate::templates::StarterTemplate;
use crate::visual_tree::{from_visual_tree, to_visual_tree, VisualTreeNode};
use crate::{EditorError, Mutation, UndoStack};
use protypo_compiler::{generate_with_diagnostics, resolve, CompileOptions, CompileOutput};
use protypo_tree::{assign_ids_with, contains_id, find_by_id, replace_ids_with, IdSource, ProtypoNode, RandomIds};
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq)]
pub struct EditorOptions {
    /// Undo history depth (0 = unlimited)
    pub undo_levels: usize,
    /// Minimum time between two drop-position computations while dragging
    pub hover_throttle: Duration,
    /// Cap on the edge band used by the drop-position resolver
    pub max_drop_margin: f64,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            undo_levels: 100,
            hover_throttle: HOVER_THROTTLE,
            max_drop_margin: MAX_DROP_MARGIN,
        }
    }
}

pub struct EditSession {
    page: Vec<ProtypoNode>,
    selected: Option<String>,
    undo_stack: UndoStack,
    drag: Option<DragSession>,
    ids: Box<dyn IdSource>,
    options: EditorOptions,
}

impl EditSession {
    /// Open a page with default options. Nodes without ids get one.
    pub fn new(page: Vec<ProtypoNode>) -> Self {
        Self::with_options(page, EditorOptions::default())
    }

    pub fn with_options(page: Vec<ProtypoNode>, options: EditorOptions) -> Self {
        Self::with_id_source(page, options, Box::new(RandomIds))
    }

    pub fn with_id_source(mut page: Vec<ProtypoNode>, options: EditorOptions, mut ids: Box<dyn IdSource>) -> Self {
        assign_ids_with(&mut page, false, ids.as_mut());
        Self {
            page,
            selected: None,
            undo_stack: UndoStack::with_max_levels(options.undo_levels),
            drag: None,
            ids,
            options,
        }
    }

    pub fn from_json(source: &str) -> Result<Self, EditorError> {
        Ok(Self::new(protypo_tree::parse(source)?))
    }

    pub fn page(&self) -> &[ProtypoNode] {
        &self.page
    }

    pub fn into_page(self) -> Vec<ProtypoNode> {
        self.page
    }

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    // Selection

    pub fn select_tag(&mut self, tag_id: &str) -> Result<(), EditorError> {
        if find_by_id(&self.page, tag_id).is_none() {
            return Err(EditorError::TagNotFound(tag_id.to_string()));
        }
        self.selected = Some(tag_id.to_string());
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected_tag(&self) -> Option<&ProtypoNode> {
        let id = self.selected.as_deref()?;
        find_by_id(&self.page, id).map(|found| found.node)
    }

    // Structural edits

    /// Insert `tag` relative to `destination` (top level when `None`).
    /// Missing ids in the subtree are filled in, and ids already used on the
    /// page are regenerated once. Returns the new tag's id.
    pub fn add_tag(
        &mut self,
        mut tag: ProtypoNode,
        destination: Option<&str>,
        position: DropPosition,
    ) -> Result<String, EditorError> {
        let nodes = std::slice::from_mut(&mut tag);
        assign_ids_with(nodes, false, self.ids.as_mut());
        let page = &self.page;
        let replaced = replace_ids_with(nodes, |id| find_by_id(page, id).is_some(), self.ids.as_mut());
        if replaced > 0 {
            debug!("Regenerated {} ids already in use on the page", replaced);
        }
        let tag_id = tag.id().unwrap_or_default().to_string();
        let (parent_id, index) = self.placement(destination, position)?;

        info!("Adding {} '{}' under {:?} at {}", tag.tag, tag_id, parent_id, index);
        self.undo_stack
            .apply(Mutation::InsertTag { parent_id, index, tag }, &mut self.page)?;
        Ok(tag_id)
    }

    /// Insert the palette sample for `tag_name`
    pub fn add_sample(
        &mut self,
        tag_name: &str,
        text: Option<&str>,
        destination: Option<&str>,
        position: DropPosition,
    ) -> Result<String, EditorError> {
        let handler = resolve(tag_name).ok_or_else(|| EditorError::UnknownTag(tag_name.to_string()))?;
        let sample = handler.sample_fragment_with(text, self.ids.as_mut());
        self.add_tag(sample, destination, position)
    }

    /// Insert a fresh instance of the named starter template
    pub fn add_template(
        &mut self,
        name: &str,
        destination: Option<&str>,
        position: DropPosition,
    ) -> Result<String, EditorError> {
        let template = StarterTemplate::from_name(name)?.instantiate_with(self.ids.as_mut());
        self.add_tag(template, destination, position)
    }

    /// Move an existing tag next to or into `destination`
    pub fn move_tag(&mut self, tag_id: &str, destination: &str, position: DropPosition) -> Result<(), EditorError> {
        let source = find_by_id(&self.page, tag_id).ok_or_else(|| EditorError::TagNotFound(tag_id.to_string()))?;
        let source_parent = source.parent.and_then(ProtypoNode::id).map(str::to_string);
        let source_position = source.position;

        let (parent_id, mut index) = self.placement(Some(destination), position)?;
        // Index applies after the tag has left its old slot
        if parent_id == source_parent && source_position < index {
            index -= 1;
        }

        info!("Moving '{}' under {:?} at {}", tag_id, parent_id, index);
        self.undo_stack.apply(
            Mutation::MoveTag {
                tag_id: tag_id.to_string(),
                parent_id,
                index,
            },
            &mut self.page,
        )?;
        Ok(())
    }

    /// Deep-copy a tag with all-new ids and place the copy at `destination`
    pub fn copy_tag(&mut self, tag_id: &str, destination: &str, position: DropPosition) -> Result<String, EditorError> {
        let mut copy = find_by_id(&self.page, tag_id)
            .ok_or_else(|| EditorError::TagNotFound(tag_id.to_string()))?
            .node
            .clone();
        assign_ids_with(std::slice::from_mut(&mut copy), true, self.ids.as_mut());
        self.add_tag(copy, Some(destination), position)
    }

    /// Remove a tag and its subtree, dropping the selection if it was inside
    pub fn remove_tag(&mut self, tag_id: &str) -> Result<(), EditorError> {
        info!("Removing '{}'", tag_id);
        self.undo_stack.apply(
            Mutation::RemoveTag {
                tag_id: tag_id.to_string(),
            },
            &mut self.page,
        )?;
        self.sync_selection();
        Ok(())
    }

    /// Remove several tags as a single undo step. Nothing is removed if any id is missing.
    pub fn remove_tags(&mut self, tag_ids: &[&str]) -> Result<(), EditorError> {
        self.undo_stack.begin_batch(format!("remove {} tags", tag_ids.len()));
        for tag_id in tag_ids {
            let removal = Mutation::RemoveTag {
                tag_id: tag_id.to_string(),
            };
            if let Err(error) = self.undo_stack.apply(removal, &mut self.page) {
                self.undo_stack.abort_batch(&mut self.page)?;
                return Err(error.into());
            }
        }
        self.undo_stack.end_batch();
        self.sync_selection();
        Ok(())
    }

    pub fn set_attribute(&mut self, tag_id: &str, name: &str, value: Option<Value>) -> Result<(), EditorError> {
        debug!("Setting {}.{} = {:?}", tag_id, name, value);
        self.undo_stack.apply(
            Mutation::SetAttribute {
                tag_id: tag_id.to_string(),
                name: name.to_string(),
                value,
            },
            &mut self.page,
        )?;
        Ok(())
    }

    /// Rewrite the tag's `class` list for one text-styling property
    pub fn set_class_property(&mut self, tag_id: &str, property: ClassProperty, value: &str) -> Result<(), EditorError> {
        let node = find_by_id(&self.page, tag_id)
            .ok_or_else(|| EditorError::TagNotFound(tag_id.to_string()))?
            .node;
        let classes = update_class_list(node.attr_str("class").unwrap_or_default(), property, value);
        let value = (!classes.is_empty()).then(|| Value::String(classes));
        self.set_attribute(tag_id, "class", value)
    }

    pub fn update_text(&mut self, tag_id: &str, text: &str) -> Result<(), EditorError> {
        self.undo_stack.apply(
            Mutation::UpdateText {
                tag_id: tag_id.to_string(),
                text: text.to_string(),
            },
            &mut self.page,
        )?;
        Ok(())
    }

    /// Take back a tree the widget reordered
    pub fn apply_visual_tree(&mut self, visual: &[VisualTreeNode]) -> Result<(), EditorError> {
        let mut nodes = from_visual_tree(visual);
        assign_ids_with(&mut nodes, false, self.ids.as_mut());

        info!("Replacing page from visual tree ({} top-level tags)", nodes.len());
        self.undo_stack.apply(Mutation::ReplacePage { nodes }, &mut self.page)?;
        self.sync_selection();
        Ok(())
    }

    // History

    pub fn undo(&mut self) -> Result<bool, EditorError> {
        let undone = self.undo_stack.undo(&mut self.page)?;
        self.sync_selection();
        Ok(undone)
    }

    pub fn redo(&mut self) -> Result<bool, EditorError> {
        let redone = self.undo_stack.redo(&mut self.page)?;
        self.sync_selection();
        Ok(redone)
    }

    pub fn can_undo(&self) -> bool {
        self.undo_stack.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.undo_stack.can_redo()
    }

    // Views

    pub fn visual_tree(&self) -> Vec<VisualTreeNode> {
        to_visual_tree(&self.page, self.selected.as_deref())
    }

    pub fn generate_source(&self) -> String {
        self.compile(CompileOptions::default()).source
    }

    pub fn compile(&self, options: CompileOptions) -> CompileOutput {
        generate_with_diagnostics(&self.page, options)
    }

    // Drag and drop

    /// Start a drag gesture, replacing any unfinished one
    pub fn begin_drag(&mut self, source_id: Option<&str>) {
        debug!("Drag started from {:?}", source_id);
        self.drag = Some(DragSession::new(
            source_id.map(str::to_string),
            self.options.hover_throttle,
        ));
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Drop position under the pointer, or `None` when no drag is active
    /// or the hover throttle is still closed
    pub fn hover(&mut self, pointer: Point, hovered: Option<BoundingBox>, target_tag: &str) -> Option<DropPosition> {
        self.hover_at(Instant::now(), pointer, hovered, target_tag)
    }

    pub fn hover_at(
        &mut self,
        now: Instant,
        pointer: Point,
        hovered: Option<BoundingBox>,
        target_tag: &str,
    ) -> Option<DropPosition> {
        let max_margin = self.options.max_drop_margin;
        self.drag
            .as_mut()?
            .hover(now, pointer, hovered, target_tag, max_margin)
    }

    /// Finish the drag gesture, returning the last resolved position
    pub fn end_drag(&mut self) -> Option<DropPosition> {
        self.drag.take().and_then(|drag| drag.last_position())
    }

    /// Parent id and index for an insertion relative to `destination`
    fn placement(
        &self,
        destination: Option<&str>,
        position: DropPosition,
    ) -> Result<(Option<String>, usize), EditorError> {
        let Some(destination) = destination else {
            return Ok((None, self.page.len()));
        };
        let found = find_by_id(&self.page, destination)
            .ok_or_else(|| EditorError::TagNotFound(destination.to_string()))?;

        let parent_id = || found.parent.and_then(ProtypoNode::id).map(str::to_string);
        Ok(match position {
            DropPosition::Inside => (Some(destination.to_string()), found.node.children().len()),
            DropPosition::Before => (parent_id(), found.position),
            DropPosition::After => (parent_id(), found.position + 1),
        })
    }

    fn sync_selection(&mut self) {
        let still_present = self
            .selected
            .as_deref()
            .is_some_and(|id| self.page.iter().any(|node| contains_id(node, id)));
        if self.selected.is_some() && !still_present {
            debug!("Selected tag left the page, clearing selection");
            self.selected = None;
        }
    }
}
