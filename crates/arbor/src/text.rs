//! Plain text visual.

use unicode_width::UnicodeWidthStr;

use crate::{context::NodeContext, error::Result, geom::Size, visual::Visual};

/// A block of unwrapped text. Measures in cells: the widest line's display
/// width by the number of lines.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextBlock {
    /// Displayed text.
    text: String,
}

impl TextBlock {
    /// Construct a text block.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// The displayed text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text. Returns `true` and invalidates measure if it changed.
    pub fn set_text(&mut self, ctx: &mut NodeContext<'_>, text: impl Into<String>) -> bool {
        let text = text.into();
        if text == self.text {
            return false;
        }
        self.text = text;
        ctx.invalidate_measure();
        true
    }

    /// Size of the text in cells.
    fn text_size(&self) -> Size {
        let width = self.text.lines().map(UnicodeWidthStr::width).max().unwrap_or(0);
        let height = self.text.lines().count();
        Size::new(width as f64, height as f64)
    }
}

impl Visual for TextBlock {
    fn measure(&mut self, _ctx: &mut NodeContext<'_>, _available: Size) -> Result<Size> {
        Ok(self.text_size())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::VisualTree;

    #[test]
    fn measures_widest_line_by_line_count() -> Result<()> {
        let mut tree = VisualTree::new();
        let id = tree.insert(TextBlock::new("Hello\nwide world\n界"))?;
        let size = tree.measure(id, Size::new(3.0, 1.0))?;
        assert_eq!(size, Size::new(10.0, 3.0));
        Ok(())
    }

    #[test]
    fn empty_text_is_zero_sized() -> Result<()> {
        let mut tree = VisualTree::new();
        let id = tree.insert(TextBlock::default())?;
        assert_eq!(tree.measure(id, Size::INFINITE)?, Size::ZERO);
        Ok(())
    }

    #[test]
    fn set_text_invalidates_measure() -> Result<()> {
        let mut tree = VisualTree::new();
        let id = tree.insert(TextBlock::new("ab"))?;
        tree.measure(id, Size::INFINITE)?;
        assert!(tree.is_measure_valid(id));

        let changed = tree.with_visual::<TextBlock, _>(id, |t, ctx| t.set_text(ctx, "ab"))?;
        assert!(!changed);
        assert!(tree.is_measure_valid(id));

        let changed = tree.with_visual::<TextBlock, _>(id, |t, ctx| t.set_text(ctx, "abcd"))?;
        assert!(changed);
        assert!(!tree.is_measure_valid(id));
        assert_eq!(tree.measure(id, Size::INFINITE)?, Size::new(4.0, 1.0));
        Ok(())
    }
}
