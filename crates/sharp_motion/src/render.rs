//! Per-frame render output.
//!
//! Controllers push [`RenderCommand`]s into a [`RenderQueue`]; the host reads
//! the finished [`FrameOutput`] and applies it to its surface. Element
//! transforms are also packed into a flat [`TransformInstance`] buffer that
//! can be uploaded as raw bytes.

use crate::element::ElementId;
use crate::layout::Rect;
use crate::style::{BlendMode, Color};

/// A render instruction for one animated entity.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Custom cursor circle.
    Cursor {
        /// Circle bounds (top-left anchor and diameter).
        bounds: Rect,
        /// Fill color.
        color: Color,
        /// Compositing mode.
        blend: BlendMode,
    },
    /// Transform applied to an element.
    Transform {
        /// Element being moved.
        element: ElementId,
        /// Translation in pixels.
        translate: (f32, f32),
        /// Uniform scale.
        scale: f32,
        /// Opacity (0-1).
        opacity: f32,
    },
    /// Hairline outline copy of the spotlight text.
    SpotlightOutline {
        /// Region holding the text.
        element: ElementId,
        /// Stroke color.
        stroke: Color,
        /// Stroke width.
        width: f32,
    },
    /// Solid copy of the spotlight text clipped to a circle.
    SpotlightReveal {
        /// Region holding the text.
        element: ElementId,
        /// Circle center as percentages of the region's size.
        center_percent: (f32, f32),
        /// Circle radius in pixels.
        radius: f32,
        /// Fill color.
        fill: Color,
    },
    /// Horizontal translation of the marquee row.
    MarqueeOffset {
        /// The row element.
        element: ElementId,
        /// Offset in pixels (0 or negative).
        offset: f32,
    },
}

/// Paint order for commands within a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RenderLayer {
    /// Page content (reveals, buttons, marquee, spotlight).
    Content,
    /// Above everything (the cursor).
    Overlay,
}

/// GPU/host friendly element transform.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TransformInstance {
    /// Low 32 bits of the element ID.
    pub id_lo: u32,
    /// High 32 bits of the element ID.
    pub id_hi: u32,
    /// Translation (x, y).
    pub translate: [f32; 2],
    /// Uniform scale.
    pub scale: f32,
    /// Opacity.
    pub opacity: f32,
}

impl TransformInstance {
    /// Packs a transform for `element`.
    #[must_use]
    pub const fn new(element: ElementId, translate: (f32, f32), scale: f32, opacity: f32) -> Self {
        let raw = element.raw();
        Self {
            id_lo: raw as u32,
            id_hi: (raw >> 32) as u32,
            translate: [translate.0, translate.1],
            scale,
            opacity,
        }
    }

    /// Unpacks the element ID.
    #[must_use]
    pub const fn element(&self) -> ElementId {
        ElementId::new(((self.id_hi as u64) << 32) | self.id_lo as u64)
    }
}

/// Everything produced by one frame.
#[derive(Debug, Clone, Default)]
pub struct FrameOutput {
    /// Commands in paint order.
    pub commands: Vec<RenderCommand>,
    /// One entry per element with a transform this frame.
    pub instances: Vec<TransformInstance>,
}

impl FrameOutput {
    /// The transform instances as raw bytes.
    #[must_use]
    pub fn instance_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }

    /// Finds the transform emitted for `element`, if any.
    #[must_use]
    pub fn transform_of(&self, element: ElementId) -> Option<&TransformInstance> {
        self.instances.iter().find(|i| i.element() == element)
    }

    /// Returns the cursor command, if one was emitted.
    #[must_use]
    pub fn cursor(&self) -> Option<&RenderCommand> {
        self.commands
            .iter()
            .find(|c| matches!(c, RenderCommand::Cursor { .. }))
    }
}

/// Collects commands for a frame.
pub struct RenderQueue {
    /// Commands tagged with their layer.
    commands: Vec<(RenderLayer, RenderCommand)>,
    /// Transform instances.
    instances: Vec<TransformInstance>,
}

impl RenderQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(64),
            instances: Vec::with_capacity(64),
        }
    }

    /// Begins a new frame.
    pub fn begin_frame(&mut self) {
        self.commands.clear();
        self.instances.clear();
    }

    /// Adds a command on `layer`. Transforms also produce an instance.
    pub fn push(&mut self, layer: RenderLayer, command: RenderCommand) {
        if let RenderCommand::Transform {
            element,
            translate,
            scale,
            opacity,
        } = command
        {
            self.instances
                .push(TransformInstance::new(element, translate, scale, opacity));
        }
        self.commands.push((layer, command));
    }

    /// Returns the number of queued commands.
    #[must_use]
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Ends the frame. Commands come out grouped by layer, in push order
    /// within a layer.
    pub fn end_frame(&mut self) -> FrameOutput {
        // stable sort keeps push order inside a layer
        self.commands.sort_by_key(|(layer, _)| *layer);
        FrameOutput {
            commands: self.commands.drain(..).map(|(_, c)| c).collect(),
            instances: std::mem::take(&mut self.instances),
        }
    }
}

impl Default for RenderQueue {
    fn default() -> Self {
        Self::new()
    }
}
