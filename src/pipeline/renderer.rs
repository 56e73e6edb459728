//! Frame rendering - one complete pass from node tree to terminal text.
//!
//! A pass creates a fresh [`Output`] sized from the root, walks the tree
//! into it and flattens it. Static subtrees (content already committed to
//! the terminal scrollback) are left out of the main output and rendered in
//! a pass of their own.

use crate::engine::PositionedNode;
use crate::error::Result;
use crate::layout::{DefaultTextWrapper, TextWrapper};
use crate::renderer::Output;

use super::render_tree::{WalkContext, render_node_to_output};

/// Options for a render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Leave static subtrees out of the main output and render them into
    /// [`RenderResult::static_output`] instead.
    pub skip_static_elements: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            skip_static_elements: true,
        }
    }
}

/// Result of a render pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderResult {
    /// The main output, one line per row of the root.
    pub output: String,
    /// Row count of the main output.
    pub output_height: usize,
    /// Static content followed by `\n`, or empty when there is none.
    pub static_output: String,
}

/// Renders positioned trees with a fixed set of options and text wrapper.
#[derive(Debug, Clone, Default)]
pub struct Renderer<W = DefaultTextWrapper> {
    options: RenderOptions,
    wrapper: W,
}

impl Renderer {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            wrapper: DefaultTextWrapper,
        }
    }
}

impl<W: TextWrapper> Renderer<W> {
    pub fn with_wrapper(options: RenderOptions, wrapper: W) -> Self {
        Self { options, wrapper }
    }

    pub fn wrapper(&self) -> &W {
        &self.wrapper
    }

    /// Render the tree rooted at `root`.
    pub fn render(&self, root: &PositionedNode) -> Result<RenderResult> {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "render_pass",
            width = root.layout.width,
            height = root.layout.height,
            skip_static = self.options.skip_static_elements
        )
        .entered();

        let mut output = buffer_for(root);
        let ctx = WalkContext::new(self.options.skip_static_elements);
        render_node_to_output(root, &mut output, &self.wrapper, &ctx)?;

        #[cfg(feature = "tracing")]
        tracing::trace!(operations = output.operations().len(), "tree walked");

        let static_output = match root.find_static() {
            Some(node) if self.options.skip_static_elements => {
                format!("{}\n", self.render_static(node)?)
            }
            _ => String::new(),
        };

        let flattened = output.flatten();
        Ok(RenderResult {
            output: flattened.text,
            output_height: flattened.height,
            static_output,
        })
    }

    /// Render a static subtree at the origin of a buffer sized to it.
    fn render_static(&self, node: &PositionedNode) -> Result<String> {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("render_static").entered();

        let mut output = buffer_for(node);
        let ctx = WalkContext {
            offset_x: node.layout.left.saturating_neg(),
            offset_y: node.layout.top.saturating_neg(),
            ..WalkContext::new(false)
        };
        render_node_to_output(node, &mut output, &self.wrapper, &ctx)?;
        Ok(output.flatten().text)
    }
}

/// Render with default options and return only the main output.
pub fn render_to_string(root: &PositionedNode) -> Result<String> {
    Renderer::new(RenderOptions::default())
        .render(root)
        .map(|result| result.output)
}

fn buffer_for(node: &PositionedNode) -> Output {
    Output::new(
        node.layout.width.max(0) as usize,
        node.layout.height.max(0) as usize,
    )
}
