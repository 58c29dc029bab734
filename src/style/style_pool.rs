//! Style pool for interning and sharing resolved styles.

use std::collections::HashMap;
use std::fmt::Write;
use std::sync::Arc;

use super::types::Style;

/// Unique identifier for a style in the [`StylePool`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StyleId(pub u32);

impl StyleId {
    /// The initial style (always 0).
    pub const INITIAL: StyleId = StyleId(0);
}

/// Interned styles.
///
/// Sibling elements very often resolve to identical styles; the pool hands
/// out one shared [`Arc`] for all of them. Two styles are pooled together
/// only when every flag and every computed value agree and their `url(...)`
/// paints are bound to the same paint server objects.
#[derive(Clone)]
pub struct StylePool {
    /// Unique styles; `None` marks a pruned slot awaiting reuse.
    styles: Vec<Option<Arc<Style>>>,
    /// Style key to index.
    intern_map: HashMap<String, StyleId>,
    /// Pruned slots.
    free: Vec<StyleId>,
}

impl Default for StylePool {
    fn default() -> Self {
        Self::new()
    }
}

impl StylePool {
    /// Create a new pool with the initial style at index 0.
    pub fn new() -> Self {
        let mut pool = Self {
            styles: Vec::new(),
            intern_map: HashMap::new(),
            free: Vec::new(),
        };
        pool.intern(Style::new());
        pool
    }

    /// The full state of a style: its `Debug` form covers every slot flag,
    /// specified and computed value and the decoration metrics; bound
    /// paint servers are added by identity.
    fn key(style: &Style) -> String {
        let mut key = format!("{style:?}");
        for paint in [
            &style.fill.value,
            &style.stroke.value,
            &style.text_decoration_fill.value,
            &style.text_decoration_stroke.value,
        ] {
            let server = paint.server_target().map_or(std::ptr::null(), Arc::as_ptr);
            let _ = write!(key, "\n{server:p}");
        }
        key
    }

    /// Intern a style, returning its id.
    ///
    /// If an identical style already exists, returns the existing id.
    pub fn intern(&mut self, style: Style) -> StyleId {
        self.intern_shared(style).0
    }

    /// Intern a style and return the shared handle.
    pub fn share(&mut self, style: Style) -> Arc<Style> {
        self.intern_shared(style).1
    }

    fn intern_shared(&mut self, style: Style) -> (StyleId, Arc<Style>) {
        let key = Self::key(&style);
        if let Some(&id) = self.intern_map.get(&key)
            && let Some(Some(existing)) = self.styles.get(id.0 as usize)
        {
            return (id, Arc::clone(existing));
        }

        let style = Arc::new(style);
        let id = match self.free.pop() {
            Some(id) => {
                self.styles[id.0 as usize] = Some(Arc::clone(&style));
                id
            }
            None => {
                self.styles.push(Some(Arc::clone(&style)));
                StyleId(self.styles.len() as u32 - 1)
            }
        };
        self.intern_map.insert(key, id);
        (id, style)
    }

    /// Drop every style only the pool still holds, except the initial one.
    /// Returns how many were dropped.
    pub fn prune(&mut self) -> usize {
        let before = self.free.len();
        let styles = &mut self.styles;
        let free = &mut self.free;
        self.intern_map.retain(|_, id| {
            let slot = &mut styles[id.0 as usize];
            let unused = *id != StyleId::INITIAL
                && slot.as_ref().is_some_and(|style| Arc::strong_count(style) == 1);
            if unused {
                *slot = None;
                free.push(*id);
            }
            !unused
        });
        self.free.len() - before
    }

    /// Get a style by id.
    pub fn get(&self, id: StyleId) -> Option<&Arc<Style>> {
        self.styles.get(id.0 as usize)?.as_ref()
    }

    /// Get the number of unique styles.
    pub fn len(&self) -> usize {
        self.styles.len() - self.free.len()
    }

    /// Check if the pool is empty (never, as the initial style is always present).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over all (StyleId, style) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (StyleId, &Arc<Style>)> {
        self.styles
            .iter()
            .enumerate()
            .filter_map(|(i, s)| Some((StyleId(i as u32), s.as_ref()?)))
    }
}

impl std::fmt::Debug for StylePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StylePool")
            .field("count", &self.len())
            .finish()
    }
}
