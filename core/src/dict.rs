//! The dual-access dict.

use std::collections::HashSet;
use std::fmt;
use std::fmt::Write as _;
use std::hash::Hash;
use std::ops::Index;
use std::sync::Arc;

use cleverdict_types::{
    AliasPolicy, DictError, DictOptions, Identifier, IntoKey, normalise,
};
use indexmap::IndexMap;

use crate::attrs::{Attrs, AttrsMut};
use crate::hook::{Change, ChangeHook};
use crate::iter::{IntoIter, Iter, Keys, Values};

/// An insertion-ordered map whose entries are also reachable as attributes.
///
/// Every entry lives in one store. The mapping methods on this type and the
/// attribute facades returned by [`attrs`](Self::attrs) and
/// [`attrs_mut`](Self::attrs_mut) both read and write that store, so the two
/// views can never disagree.
///
/// A key is attribute-accessible when it is a valid [`Identifier`] under the
/// dict's [`IdentifierPolicy`](cleverdict_types::IdentifierPolicy), or when
/// an alias points at it. Aliases, direct attributes, options and the change
/// hook are bookkeeping: they are never entries, and they take no part in
/// equality or serialization.
///
/// Values are held behind `Arc`. `clone()` shares them; use
/// [`deep_clone`](Self::deep_clone) for independent copies.
///
/// The dict is not internally synchronized. Sharing one across threads for
/// mutation needs an external lock.
pub struct CleverDict<V> {
    entries: IndexMap<String, Arc<V>>,
    /// alias -> key
    aliases: IndexMap<Identifier, String>,
    direct: IndexMap<Identifier, Arc<V>>,
    options: DictOptions,
    hook: Option<Arc<dyn ChangeHook<V>>>,
}

impl<V> CleverDict<V> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(DictOptions::default())
    }

    #[must_use]
    pub fn with_options(options: DictOptions) -> Self {
        Self {
            entries: IndexMap::new(),
            aliases: IndexMap::new(),
            direct: IndexMap::new(),
            options,
            hook: None,
        }
    }

    /// Build a dict from ordered pairs, keeping their order.
    ///
    /// A repeated key keeps its first position and takes the last value.
    pub fn from_pairs<K, I>(pairs: I) -> Result<Self, DictError>
    where
        K: IntoKey,
        I: IntoIterator<Item = (K, V)>,
    {
        Self::from_pairs_with(pairs, DictOptions::default())
    }

    pub fn from_pairs_with<K, I>(pairs: I, options: DictOptions) -> Result<Self, DictError>
    where
        K: IntoKey,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut dict = Self::with_options(options);
        dict.update(pairs)?;
        Ok(dict)
    }

    /// Wrap an already-shared map. Uses default options.
    #[must_use]
    pub fn from_shared(entries: IndexMap<String, Arc<V>>) -> Self {
        Self {
            entries,
            ..Self::new()
        }
    }

    #[must_use]
    pub fn options(&self) -> DictOptions {
        self.options
    }

    // ------------------------------------------------------------------
    // Mapping access
    // ------------------------------------------------------------------

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Result<&V, DictError> {
        self.entries
            .get(key)
            .map(|v| &**v)
            .ok_or_else(|| DictError::key_not_found(key))
    }

    /// Like [`get`](Self::get), but hands out the shared value itself.
    pub fn get_shared(&self, key: &str) -> Result<Arc<V>, DictError> {
        self.entries
            .get(key)
            .cloned()
            .ok_or_else(|| DictError::key_not_found(key))
    }

    #[must_use]
    pub fn get_or<'a>(&'a self, key: &str, default: &'a V) -> &'a V {
        self.entries.get(key).map_or(default, |v| &**v)
    }

    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<(&str, &V)> {
        self.entries
            .get_index(index)
            .map(|(k, v)| (k.as_str(), &**v))
    }

    /// Insertion-order position of `key`.
    #[must_use]
    pub fn position(&self, key: &str) -> Option<usize> {
        self.entries.get_index_of(key)
    }

    /// Insert or replace an entry, returning the previous value.
    ///
    /// A new key goes to the end of the order; an existing key keeps its
    /// position.
    pub fn set(
        &mut self,
        key: impl IntoKey,
        value: impl Into<Arc<V>>,
    ) -> Result<Option<Arc<V>>, DictError> {
        let key = key.into_key()?;
        self.insert_entry(key, value.into())
    }

    /// Remove an entry along with its aliases.
    pub fn delete(&mut self, key: &str) -> Result<Arc<V>, DictError> {
        let (key, value) = self
            .entries
            .shift_remove_entry(key)
            .ok_or_else(|| DictError::key_not_found(key))?;
        self.drop_aliases_of(&key);
        tracing::trace!("Deleted entry {key:?}");
        self.notify(&Change::Delete { key: &key });
        Ok(value)
    }

    /// Remove every entry and alias. Direct attributes are kept.
    pub fn clear(&mut self) {
        let removed: Vec<String> = self.entries.drain(..).map(|(key, _)| key).collect();
        self.aliases.clear();
        for key in &removed {
            self.notify(&Change::Delete { key });
        }
    }

    /// Set every pair in order.
    ///
    /// All keys are coerced and checked for attribute conflicts before the
    /// first write, so either every pair is applied or none is.
    pub fn update<K, W, I>(&mut self, pairs: I) -> Result<(), DictError>
    where
        K: IntoKey,
        W: Into<Arc<V>>,
        I: IntoIterator<Item = (K, W)>,
    {
        let batch = pairs
            .into_iter()
            .map(|(key, value)| -> Result<(String, Arc<V>), DictError> {
                Ok((key.into_key()?, value.into()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.insert_batch(batch)
    }

    /// Copy every entry of `other` into `self`, sharing the values.
    ///
    /// All or nothing, like [`update`](Self::update).
    pub fn merge(&mut self, other: &CleverDict<V>) -> Result<(), DictError> {
        let batch = other
            .entries
            .iter()
            .map(|(key, value)| (key.clone(), Arc::clone(value)))
            .collect();
        self.insert_batch(batch)
    }

    #[must_use]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            inner: self.entries.iter(),
        }
    }

    #[must_use]
    pub fn keys(&self) -> Keys<'_, V> {
        Keys {
            inner: self.entries.keys(),
        }
    }

    #[must_use]
    pub fn values(&self) -> Values<'_, V> {
        Values {
            inner: self.entries.values(),
        }
    }

    /// A new dict holding only `keys`, in this dict's order.
    #[must_use]
    pub fn only<'k>(&self, keys: impl IntoIterator<Item = &'k str>) -> Self {
        let wanted: HashSet<&str> = keys.into_iter().collect();
        self.filtered(|key| wanted.contains(key))
    }

    /// A new dict without `keys`, in this dict's order.
    #[must_use]
    pub fn exclude<'k>(&self, keys: impl IntoIterator<Item = &'k str>) -> Self {
        let unwanted: HashSet<&str> = keys.into_iter().collect();
        self.filtered(|key| !unwanted.contains(key))
    }

    /// Filtered copies keep options and aliases of surviving keys, but not
    /// the hook or direct attributes.
    fn filtered(&self, keep: impl Fn(&str) -> bool) -> Self {
        let entries: IndexMap<String, Arc<V>> = self
            .entries
            .iter()
            .filter(|(key, _)| keep(key.as_str()))
            .map(|(key, value)| (key.clone(), Arc::clone(value)))
            .collect();
        let aliases = self
            .aliases
            .iter()
            .filter(|(_, owner)| entries.contains_key(owner.as_str()))
            .map(|(alias, owner)| (alias.clone(), owner.clone()))
            .collect();
        Self {
            entries,
            aliases,
            ..Self::with_options(self.options)
        }
    }

    // ------------------------------------------------------------------
    // Conversion
    // ------------------------------------------------------------------

    /// The entries as a plain ordered map. Values are shared, not copied.
    #[must_use]
    pub fn to_index_map(&self) -> IndexMap<String, Arc<V>> {
        self.entries.clone()
    }

    #[must_use]
    pub fn into_index_map(self) -> IndexMap<String, Arc<V>> {
        self.entries
    }

    /// Unwrap every value, cloning only those still shared elsewhere.
    #[must_use]
    pub fn into_plain(self) -> IndexMap<String, V>
    where
        V: Clone,
    {
        self.entries
            .into_iter()
            .map(|(key, value)| (key, Arc::unwrap_or_clone(value)))
            .collect()
    }

    /// A copy whose values are freshly allocated clones.
    #[must_use]
    pub fn deep_clone(&self) -> Self
    where
        V: Clone,
    {
        Self {
            entries: fresh_copies(&self.entries),
            aliases: self.aliases.clone(),
            direct: fresh_copies(&self.direct),
            options: self.options,
            hook: self.hook.clone(),
        }
    }

    // ------------------------------------------------------------------
    // Attribute access
    // ------------------------------------------------------------------

    /// Read-only attribute view.
    #[must_use]
    pub fn attrs(&self) -> Attrs<'_, V> {
        Attrs::new(self)
    }

    /// Read-write attribute view.
    pub fn attrs_mut(&mut self) -> AttrsMut<'_, V> {
        AttrsMut::new(self)
    }

    /// The key an attribute name refers to, if any.
    #[must_use]
    pub fn resolve_attribute(&self, name: &str) -> Option<&str> {
        if let Some(key) = self.aliases.get(name) {
            return Some(key.as_str());
        }
        self.entries
            .get_key_value(name)
            .map(|(key, _)| key.as_str())
            .filter(|key| self.is_identifier(key))
    }

    /// Whether `key` is reachable as an attribute of the same name.
    #[must_use]
    pub fn is_identifier(&self, key: &str) -> bool {
        Identifier::is_valid(key, self.options.identifiers)
    }

    /// Validate `name` and resolve it to an existing key.
    pub(crate) fn attribute_key(&self, name: &str) -> Result<&str, DictError> {
        Identifier::check(name, self.options.identifiers)?;
        self.resolve_attribute(name)
            .ok_or_else(|| DictError::attribute_not_found(name))
    }

    /// Every attribute name, grouped by entry in insertion order.
    #[must_use]
    pub fn attribute_names(&self) -> Vec<&str> {
        self.entries
            .keys()
            .flat_map(|key| self.attribute_forms(key))
            .collect()
    }

    fn attribute_forms<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        let own = self.is_identifier(key).then_some(key);
        own.into_iter().chain(self.aliases_of(key))
    }

    // ------------------------------------------------------------------
    // Aliases
    // ------------------------------------------------------------------

    /// Make `alias` a second attribute name for `key`.
    pub fn add_alias(&mut self, key: &str, alias: &str) -> Result<(), DictError> {
        let Some((key, _)) = self.entries.get_key_value(key) else {
            return Err(DictError::key_not_found(key));
        };
        let alias = Identifier::with_policy(alias, self.options.identifiers)?;
        if alias.as_str() == key.as_str() {
            return Ok(());
        }
        match self.attribute_owner(&alias) {
            Some(owner) if owner == key.as_str() => return Ok(()),
            Some(owner) => return Err(DictError::alias_conflict(alias.as_str(), owner)),
            None => {}
        }
        let key = key.clone();
        tracing::debug!("Registered alias {alias} for {key:?}");
        self.aliases.insert(alias, key);
        Ok(())
    }

    /// Forget an alias, returning the key it pointed at.
    pub fn delete_alias(&mut self, alias: &str) -> Result<String, DictError> {
        let key = self
            .aliases
            .shift_remove(alias)
            .ok_or_else(|| DictError::attribute_not_found(alias))?;
        tracing::debug!("Removed alias {alias} for {key:?}");
        Ok(key)
    }

    /// Aliases of `key`, in registration order.
    pub fn aliases_of<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.aliases
            .iter()
            .filter(move |(_, owner)| owner.as_str() == key)
            .map(|(alias, _)| alias.as_str())
    }

    /// Which key already answers to attribute `name`, if any.
    fn attribute_owner(&self, name: &Identifier) -> Option<&str> {
        self.aliases.get(name.as_str()).map(String::as_str).or_else(|| {
            self.entries
                .get_key_value(name.as_str())
                .map(|(key, _)| key.as_str())
        })
    }

    fn drop_aliases_of(&mut self, key: &str) {
        self.aliases.retain(|alias, owner| {
            if owner.as_str() == key {
                tracing::debug!("Removed alias {alias} for {key:?}");
                false
            } else {
                true
            }
        });
    }

    // ------------------------------------------------------------------
    // Direct attributes
    // ------------------------------------------------------------------

    /// Store an attribute that is not an entry.
    pub fn set_direct(
        &mut self,
        name: &str,
        value: impl Into<Arc<V>>,
    ) -> Result<Option<Arc<V>>, DictError> {
        let name = Identifier::with_policy(name, self.options.identifiers)?;
        Ok(self.direct.insert(name, value.into()))
    }

    pub fn get_direct(&self, name: &str) -> Result<&V, DictError> {
        self.direct
            .get(name)
            .map(|v| &**v)
            .ok_or_else(|| DictError::attribute_not_found(name))
    }

    pub fn delete_direct(&mut self, name: &str) -> Result<Arc<V>, DictError> {
        self.direct
            .shift_remove(name)
            .ok_or_else(|| DictError::attribute_not_found(name))
    }

    pub fn direct_names(&self) -> impl Iterator<Item = &str> {
        self.direct.keys().map(Identifier::as_str)
    }

    // ------------------------------------------------------------------
    // Hook
    // ------------------------------------------------------------------

    pub fn set_hook(&mut self, hook: impl ChangeHook<V> + 'static) {
        tracing::debug!("Installed change hook");
        self.hook = Some(Arc::new(hook));
    }

    #[must_use]
    pub fn with_hook(mut self, hook: impl ChangeHook<V> + 'static) -> Self {
        self.set_hook(hook);
        self
    }

    pub fn clear_hook(&mut self) {
        self.hook = None;
    }

    #[must_use]
    pub fn has_hook(&self) -> bool {
        self.hook.is_some()
    }

    fn notify(&self, change: &Change<'_, V>) {
        if let Some(hook) = &self.hook {
            hook.on_change(change);
        }
    }

    // ------------------------------------------------------------------
    // Store
    // ------------------------------------------------------------------

    /// The single write path shared by the mapping and attribute views.
    pub(crate) fn insert_entry(
        &mut self,
        key: String,
        value: Arc<V>,
    ) -> Result<Option<Arc<V>>, DictError> {
        let alias = if self.entries.contains_key(&key) {
            None
        } else {
            self.admit_new_key(&key, &Staged::default())?
        };
        Ok(self.write_entry(key, value, alias))
    }

    /// Insert a batch of entries after checking all of them.
    pub(crate) fn insert_batch(&mut self, batch: Vec<(String, Arc<V>)>) -> Result<(), DictError> {
        let mut staged = Staged::default();
        let mut aliases = Vec::with_capacity(batch.len());
        for (key, _) in &batch {
            if self.entries.contains_key(key) || staged.keys.contains(key) {
                aliases.push(None);
                continue;
            }
            let alias = self.admit_new_key(key, &staged)?;
            staged.keys.insert(key.clone());
            if let Some(alias) = &alias {
                staged.aliases.insert(alias.clone(), key.clone());
            }
            aliases.push(alias);
        }
        for ((key, value), alias) in batch.into_iter().zip(aliases) {
            self.write_entry(key, value, alias);
        }
        Ok(())
    }

    fn write_entry(
        &mut self,
        key: String,
        value: Arc<V>,
        alias: Option<Identifier>,
    ) -> Option<Arc<V>> {
        if let Some(alias) = alias {
            tracing::debug!("Registered alias {alias} for {key:?}");
            self.aliases.insert(alias, key.clone());
        }
        let previous = self.entries.insert(key.clone(), Arc::clone(&value));
        tracing::trace!("Set entry {key:?}");
        self.notify(&Change::Set {
            key: &key,
            value: &value,
        });
        previous
    }

    /// Check that a new key keeps attribute names unambiguous, returning
    /// the alias the active policy wants registered alongside it.
    ///
    /// `staged` holds keys and aliases an in-flight batch will add.
    fn admit_new_key(
        &self,
        key: &str,
        staged: &Staged,
    ) -> Result<Option<Identifier>, DictError> {
        if let Some(owner) = self.aliases.get(key).or_else(|| staged.aliases.get(key)) {
            return Err(DictError::alias_conflict(key, owner.as_str()));
        }
        if self.options.aliases != AliasPolicy::Normalise || self.is_identifier(key) {
            return Ok(None);
        }
        let Some(alias) = normalise(key, self.options.identifiers) else {
            return Ok(None);
        };
        match self
            .attribute_owner(&alias)
            .or_else(|| staged.attribute_owner(&alias))
        {
            Some(owner) => Err(DictError::alias_conflict(alias.as_str(), owner)),
            None => Ok(Some(alias)),
        }
    }

    // ------------------------------------------------------------------
    // Info
    // ------------------------------------------------------------------

    /// Human-readable listing of every entry and the names it answers to.
    ///
    /// ```
    /// use cleverdict_core::CleverDict;
    ///
    /// let dict = CleverDict::from_pairs([("x", 1), ("my key", 2)]).unwrap();
    /// assert_eq!(
    ///     dict.info(),
    ///     "CleverDict (2 entries):\n    .x == [\"x\"] == 1\n    [\"my key\"] == 2\n"
    /// );
    /// ```
    #[must_use]
    pub fn info(&self) -> String
    where
        V: fmt::Debug,
    {
        let noun = if self.len() == 1 { "entry" } else { "entries" };
        let mut out = format!("CleverDict ({} {noun}):\n", self.len());
        for (key, value) in self.iter() {
            out.push_str("    ");
            for name in self.attribute_forms(key) {
                let _ = write!(out, ".{name} == ");
            }
            let _ = writeln!(out, "[{key:?}] == {value:?}");
        }
        out
    }
}

/// New keys and aliases of a batch that has been checked but not written.
#[derive(Default)]
struct Staged {
    keys: HashSet<String>,
    /// alias -> key
    aliases: IndexMap<Identifier, String>,
}

impl Staged {
    fn attribute_owner(&self, name: &Identifier) -> Option<&str> {
        self.aliases
            .get(name.as_str())
            .or_else(|| self.keys.get(name.as_str()))
            .map(String::as_str)
    }
}

fn fresh_copies<K, V>(map: &IndexMap<K, Arc<V>>) -> IndexMap<K, Arc<V>>
where
    K: Clone + Hash + Eq,
    V: Clone,
{
    map.iter()
        .map(|(name, value)| (name.clone(), Arc::new(V::clone(value))))
        .collect()
}

impl<V> Default for CleverDict<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Clone for CleverDict<V> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            aliases: self.aliases.clone(),
            direct: self.direct.clone(),
            options: self.options,
            hook: self.hook.clone(),
        }
    }
}

/// Order-sensitive: equal dicts hold equal values under the same keys in the
/// same order. Bookkeeping is ignored.
impl<V: PartialEq> PartialEq for CleverDict<V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<V: Eq> Eq for CleverDict<V> {}

impl<V: fmt::Debug> fmt::Debug for CleverDict<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CleverDict")?;
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<V> Index<&str> for CleverDict<V> {
    type Output = V;

    /// # Panics
    ///
    /// Panics if `key` is absent, like `HashMap`.
    fn index(&self, key: &str) -> &V {
        match self.entries.get(key) {
            Some(value) => value,
            None => panic!("key not found: {key:?}"),
        }
    }
}

impl<V> From<IndexMap<String, V>> for CleverDict<V> {
    fn from(map: IndexMap<String, V>) -> Self {
        map.into_iter().collect()
    }
}

impl<V> FromIterator<(String, V)> for CleverDict<V> {
    fn from_iter<I: IntoIterator<Item = (String, V)>>(iter: I) -> Self {
        Self::from_shared(
            iter.into_iter()
                .map(|(key, value)| (key, Arc::new(value)))
                .collect(),
        )
    }
}

impl<V> IntoIterator for CleverDict<V> {
    type Item = (String, Arc<V>);
    type IntoIter = IntoIter<V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.entries.into_iter(),
        }
    }
}

impl<'a, V> IntoIterator for &'a CleverDict<V> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
