//! Data templates: factories that turn data values into visual subtrees.

use std::{
    any::{Any, type_name},
    fmt,
    marker::PhantomData,
};

use crate::{
    NodeId, VisualTree,
    content::Value,
    error::{Error, Result},
};

/// Builds a visual subtree for values it matches.
pub trait DataTemplate {
    /// Can this template present `value`?
    fn matches(&self, value: &Value) -> bool;

    /// Build a detached subtree for `value` and return its root.
    fn build(&self, value: &Value, tree: &mut VisualTree) -> Result<NodeId>;
}

/// Finds the template for a value.
pub trait TemplateLookup {
    /// The template that should present `value`, if any.
    fn find(&self, value: &Value) -> Option<&dyn DataTemplate>;
}

/// A template built from a closure over a concrete value type.
pub struct FnTemplate<T, F> {
    /// Builder closure.
    build: F,
    /// Matched value type.
    _marker: PhantomData<fn(&T)>,
}

impl<T, F> FnTemplate<T, F>
where
    T: Any,
    F: Fn(&T, &mut VisualTree) -> Result<NodeId>,
{
    /// Create a template matching values of type `T`.
    pub fn new(build: F) -> Self {
        Self {
            build,
            _marker: PhantomData,
        }
    }
}

impl<T, F> DataTemplate for FnTemplate<T, F>
where
    T: Any,
    F: Fn(&T, &mut VisualTree) -> Result<NodeId>,
{
    fn matches(&self, value: &Value) -> bool {
        value.is::<T>()
    }

    fn build(&self, value: &Value, tree: &mut VisualTree) -> Result<NodeId> {
        let v = value.downcast_ref::<T>().ok_or_else(|| {
            Error::Template(format!(
                "expected {}, got {}",
                type_name::<T>(),
                value.type_name()
            ))
        })?;
        (self.build)(v, tree)
    }
}

/// An ordered template list. The first matching template wins.
#[derive(Default)]
pub struct DataTemplates {
    /// Templates in priority order.
    templates: Vec<Box<dyn DataTemplate>>,
}

impl DataTemplates {
    /// An empty template list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a template with the lowest priority so far.
    pub fn push(&mut self, template: impl DataTemplate + 'static) {
        self.templates.push(Box::new(template));
    }

    /// Builder form of [`DataTemplates::push`].
    pub fn with(mut self, template: impl DataTemplate + 'static) -> Self {
        self.push(template);
        self
    }

    /// Number of templates.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// True if there are no templates.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl TemplateLookup for DataTemplates {
    fn find(&self, value: &Value) -> Option<&dyn DataTemplate> {
        self.templates
            .iter()
            .find(|t| t.matches(value))
            .map(Box::as_ref)
    }
}

impl fmt::Debug for DataTemplates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataTemplates")
            .field("templates", &self.templates.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::TextBlock;

    #[test]
    fn first_match_wins() -> Result<()> {
        let templates = DataTemplates::new()
            .with(FnTemplate::new(|v: &i32, tree: &mut VisualTree| {
                tree.insert(TextBlock::new(format!("first {v}")))
            }))
            .with(FnTemplate::new(|v: &i32, tree: &mut VisualTree| {
                tree.insert(TextBlock::new(format!("second {v}")))
            }));
        assert_eq!(templates.len(), 2);

        let mut tree = VisualTree::new();
        let value = Value::new(7i32);
        let Some(template) = templates.find(&value) else {
            panic!("no template");
        };
        let id = template.build(&value, &mut tree)?;
        assert_eq!(tree.visual::<TextBlock>(id).map(TextBlock::text), Some("first 7"));

        assert!(templates.find(&Value::new("text")).is_none());
        Ok(())
    }

    #[test]
    fn build_rejects_wrong_type() {
        let template = FnTemplate::new(|_: &u8, tree: &mut VisualTree| tree.insert(TextBlock::default()));
        let mut tree = VisualTree::new();
        assert!(matches!(
            template.build(&Value::new(1u16), &mut tree),
            Err(Error::Template(_))
        ));
        assert!(tree.is_empty());
    }
}
