//! Observable values and attached properties.
//!
//! A [`Property`] stores one value and notifies its observers synchronously,
//! after the mutation, whenever the value changes. Setting a property to a
//! value equal to its current one does nothing and notifies no one.
//!
//! An [`AttachedProperty`] is a key for a value that can be set on any node in
//! the visual tree, whether or not the node's visual knows about it. Values are
//! kept in an [`AttachedValues`] side table keyed by node identity.

use std::{
    any::{Any, TypeId},
    collections::HashMap,
    fmt,
    mem,
};

use slotmap::SecondaryMap;

use crate::NodeId;

/// Identifier returned when subscribing, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// A change notification carrying the previous and the current value.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyChange<T> {
    /// Value before the change.
    pub old: T,
    /// Value after the change.
    pub new: T,
}

/// Observer callback type.
type Observer<T> = Box<dyn FnMut(&PropertyChange<T>)>;

/// A named, observable value.
pub struct Property<T> {
    /// Name used in trace output.
    name: &'static str,
    /// Current value.
    value: T,
    /// Registered observers, in subscription order.
    observers: Vec<(SubscriptionId, Observer<T>)>,
    /// Next subscription identifier.
    next_id: u64,
}

impl<T> Property<T>
where
    T: Clone + PartialEq + fmt::Debug,
{
    /// Create a property with an initial value. The initial assignment is not
    /// a change and is never reported to observers.
    pub fn new(name: &'static str, value: T) -> Self {
        Self {
            name,
            value,
            observers: Vec::new(),
            next_id: 0,
        }
    }

    /// The property name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The current value.
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Store a new value. Returns `true` and notifies observers if the value
    /// changed; returns `false` without notifying otherwise.
    pub fn set(&mut self, value: T) -> bool {
        if self.value == value {
            return false;
        }
        let old = mem::replace(&mut self.value, value);
        tracing::trace!(property = self.name, ?old, new = ?self.value, "property changed");
        let change = PropertyChange {
            old,
            new: self.value.clone(),
        };
        for (_, observer) in &mut self.observers {
            observer(&change);
        }
        true
    }

    /// Register an observer that fires on every subsequent change.
    pub fn subscribe(&mut self, f: impl FnMut(&PropertyChange<T>) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, Box::new(f)));
        id
    }

    /// Register an observer and immediately call it once with the current
    /// value as both `old` and `new`.
    pub fn observe(&mut self, mut f: impl FnMut(&PropertyChange<T>) + 'static) -> SubscriptionId {
        f(&PropertyChange {
            old: self.value.clone(),
            new: self.value.clone(),
        });
        self.subscribe(f)
    }

    /// Remove an observer. Returns `false` if the id was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sid, _)| *sid != id);
        self.observers.len() != before
    }
}

impl<T: fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("name", &self.name)
            .field("value", &self.value)
            .field("observers", &self.observers.len())
            .finish()
    }
}

/// Key for a value that can be attached to any node.
#[derive(Debug, Clone, Copy)]
pub struct AttachedProperty<T: 'static> {
    /// Property name, unique per value type.
    name: &'static str,
    /// Value reported for nodes that never had the property set.
    default: T,
}

impl<T> AttachedProperty<T>
where
    T: Copy + PartialEq + fmt::Debug + 'static,
{
    /// Declare an attached property.
    pub const fn new(name: &'static str, default: T) -> Self {
        Self { name, default }
    }

    /// The property name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The value reported for nodes that never had the property set.
    pub fn default_value(&self) -> T {
        self.default
    }

    /// Storage key for this property.
    fn key(&self) -> (TypeId, &'static str) {
        (TypeId::of::<T>(), self.name)
    }
}

/// Side table holding attached property values, keyed by node identity.
#[derive(Default)]
pub struct AttachedValues {
    /// One secondary map per attached property.
    tables: HashMap<(TypeId, &'static str), SecondaryMap<NodeId, Box<dyn Any>>>,
}

impl AttachedValues {
    /// Read the value of `prop` on `node`, or the property default.
    pub fn get<T>(&self, node: NodeId, prop: &AttachedProperty<T>) -> T
    where
        T: Copy + PartialEq + fmt::Debug + 'static,
    {
        self.tables
            .get(&prop.key())
            .and_then(|table| table.get(node))
            .and_then(|v| v.downcast_ref::<T>())
            .copied()
            .unwrap_or(prop.default)
    }

    /// Set the value of `prop` on `node`. Returns the change, or `None` if the
    /// effective value is unchanged.
    pub fn set<T>(
        &mut self,
        node: NodeId,
        prop: &AttachedProperty<T>,
        value: T,
    ) -> Option<PropertyChange<T>>
    where
        T: Copy + PartialEq + fmt::Debug + 'static,
    {
        let old = self.get(node, prop);
        if old == value {
            return None;
        }
        self.tables
            .entry(prop.key())
            .or_default()
            .insert(node, Box::new(value));
        tracing::trace!(property = prop.name, ?node, ?old, new = ?value, "attached property changed");
        Some(PropertyChange { old, new: value })
    }

    /// Drop every value attached to `node`.
    pub fn clear_node(&mut self, node: NodeId) {
        for table in self.tables.values_mut() {
            table.remove(node);
        }
    }
}

impl fmt::Debug for AttachedValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttachedValues")
            .field("properties", &self.tables.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use slotmap::SlotMap;

    use super::*;

    #[test]
    fn set_notifies_only_on_change() {
        let mut p = Property::new("count", 1);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = Rc::clone(&seen);
        p.subscribe(move |c| s.borrow_mut().push((c.old, c.new)));

        assert!(!p.set(1));
        assert!(p.set(2));
        assert!(p.set(5));
        assert!(!p.set(5));
        assert_eq!(*seen.borrow(), vec![(1, 2), (2, 5)]);
        assert_eq!(*p.get(), 5);
    }

    #[test]
    fn observe_fires_with_current_value() {
        let mut p = Property::new("name", "a".to_string());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = Rc::clone(&seen);
        p.observe(move |c| s.borrow_mut().push(c.new.clone()));
        p.set("b".into());
        assert_eq!(*seen.borrow(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let mut p = Property::new("flag", false);
        let hits = Rc::new(RefCell::new(0));
        let h = Rc::clone(&hits);
        let id = p.subscribe(move |_| *h.borrow_mut() += 1);
        p.set(true);
        assert!(p.unsubscribe(id));
        assert!(!p.unsubscribe(id));
        p.set(false);
        assert_eq!(*hits.borrow(), 1);
    }

    #[test]
    fn attached_values_default_and_set() {
        const LEVEL: AttachedProperty<u8> = AttachedProperty::new("level", 3);
        const OTHER: AttachedProperty<u8> = AttachedProperty::new("other", 0);

        let mut ids: SlotMap<NodeId, ()> = SlotMap::with_key();
        let a = ids.insert(());
        let b = ids.insert(());

        let mut values = AttachedValues::default();
        assert_eq!(values.get(a, &LEVEL), 3);
        assert_eq!(values.set(a, &LEVEL, 3), None);
        assert_eq!(values.set(a, &LEVEL, 7), Some(PropertyChange { old: 3, new: 7 }));
        assert_eq!(values.get(a, &LEVEL), 7);
        assert_eq!(values.get(b, &LEVEL), 3);
        assert_eq!(values.get(a, &OTHER), 0);

        values.clear_node(a);
        assert_eq!(values.get(a, &LEVEL), 3);
    }
}
