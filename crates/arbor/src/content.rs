//! Content that a presenter can display: nothing, an existing visual, or an
//! arbitrary data value.

use std::{
    any::{self, Any, TypeId},
    fmt,
    rc::Rc,
};

use crate::NodeId;

/// A data value that can be presented. Implemented for every
/// `Any + Display + Debug + PartialEq` type.
pub trait DataValue: Any + fmt::Display + fmt::Debug {
    /// Compare against another value of possibly different type.
    fn eq_value(&self, other: &dyn DataValue) -> bool;

    /// Name of the concrete type.
    fn type_name(&self) -> &'static str;
}

impl<T> DataValue for T
where
    T: Any + fmt::Display + fmt::Debug + PartialEq,
{
    fn eq_value(&self, other: &dyn DataValue) -> bool {
        let other: &dyn Any = other;
        other.downcast_ref::<T>().is_some_and(|o| o == self)
    }

    fn type_name(&self) -> &'static str {
        any::type_name::<T>()
    }
}

/// A shared, type-erased data value.
#[derive(Clone)]
pub struct Value(Rc<dyn DataValue>);

impl Value {
    /// Wrap a value.
    pub fn new<T: DataValue>(value: T) -> Self {
        Self(Rc::new(value))
    }

    /// Borrow the value as a concrete type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        let any: &dyn Any = &*self.0;
        any.downcast_ref::<T>()
    }

    /// Is the value of type `T`?
    pub fn is<T: Any>(&self) -> bool {
        self.category() == TypeId::of::<T>()
    }

    /// Runtime type of the value, used to select a template.
    pub fn category(&self) -> TypeId {
        let any: &dyn Any = &*self.0;
        any.type_id()
    }

    /// Name of the concrete type.
    pub fn type_name(&self) -> &'static str {
        self.0.type_name()
    }

    /// Do both handles share the same allocation?
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.0.eq_value(&*other.0)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.0, f)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

/// What a presenter displays.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Content {
    /// Nothing. The presenter has no child and measures to zero.
    #[default]
    Empty,
    /// An existing visual node, displayed as-is.
    Visual(NodeId),
    /// A data value, realized through a data template or as text.
    Value(Value),
}

impl Content {
    /// Content holding a data value.
    pub fn value<T: DataValue>(value: T) -> Self {
        Self::Value(Value::new(value))
    }

    /// Is this the empty content?
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl From<NodeId> for Content {
    fn from(id: NodeId) -> Self {
        Self::Visual(id)
    }
}

impl From<Value> for Content {
    fn from(v: Value) -> Self {
        Self::Value(v)
    }
}

impl From<&'static str> for Content {
    fn from(s: &'static str) -> Self {
        Self::value(s)
    }
}

impl From<String> for Content {
    fn from(s: String) -> Self {
        Self::value(s)
    }
}

impl<T: Into<Content>> From<Option<T>> for Content {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Empty, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Celsius(i32);

    impl fmt::Display for Celsius {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}°C", self.0)
        }
    }

    #[test]
    fn value_equality_is_by_type_and_value() {
        assert_eq!(Value::new(Celsius(3)), Value::new(Celsius(3)));
        assert_ne!(Value::new(Celsius(3)), Value::new(Celsius(4)));
        assert_ne!(Value::new(3i32), Value::new(3i64));

        let v = Value::new(Celsius(1));
        assert!(v.ptr_eq(&v.clone()));
    }

    #[test]
    fn value_downcast_and_display() {
        let v = Value::new(Celsius(21));
        assert!(v.is::<Celsius>());
        assert!(!v.is::<i32>());
        assert_eq!(v.downcast_ref::<Celsius>(), Some(&Celsius(21)));
        assert_eq!(v.to_string(), "21°C");
        assert!(v.type_name().ends_with("Celsius"));
    }

    #[test]
    fn content_conversions() {
        assert!(Content::default().is_empty());
        assert_eq!(Content::from("hi"), Content::value("hi"));
        assert_eq!(Content::from(String::from("hi")), Content::value(String::from("hi")));
        assert_ne!(Content::from("hi"), Content::from(String::from("hi")));
        assert_eq!(Content::from(None::<&'static str>), Content::Empty);
    }
}
