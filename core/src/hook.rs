//! Change notification.
//!
//! A dict can carry one [`ChangeHook`] that is told about every successful
//! mutation, after the store has been updated. This is the seam for
//! autosave-style behaviour: the hook decides what to do with a change, the
//! dict never does IO itself.

/// A single successful mutation.
#[derive(Debug, PartialEq)]
pub enum Change<'a, V> {
    Set { key: &'a str, value: &'a V },
    Delete { key: &'a str },
}

impl<'a, V> Change<'a, V> {
    #[must_use]
    pub fn key(&self) -> &'a str {
        match self {
            Change::Set { key, .. } | Change::Delete { key } => *key,
        }
    }

    #[must_use]
    pub fn value(&self) -> Option<&'a V> {
        match self {
            Change::Set { value, .. } => Some(*value),
            Change::Delete { .. } => None,
        }
    }
}

/// Observer of dict mutations.
///
/// Hooks run synchronously inside the mutating call and cannot touch the
/// dict they observe.
pub trait ChangeHook<V>: Send + Sync {
    fn on_change(&self, change: &Change<'_, V>);
}

impl<V, F> ChangeHook<V> for F
where
    F: Fn(&Change<'_, V>) + Send + Sync,
{
    fn on_change(&self, change: &Change<'_, V>) {
        self(change);
    }
}
