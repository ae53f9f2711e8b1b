//! Drag-and-drop bookkeeping for the ranked lists.
//!
//! The drag library itself lives on the host side; this module owns the parts
//! that decide something: per-container options, move/drag filters, the rank
//! rewrite on drop and the registry of live controllers.

use serde::{Deserialize, Serialize};

use crate::constants::{
    ANIMATION_MS, DISABLED_CLASS, FILTER_SELECTOR, GHOST_CLASS, HANDLE_SELECTOR, NO_SORT_CLASS,
    SHARED_GROUP, SORTABLE_CLASS, SORTED_EVENT,
};
use crate::dom::Dom;
use crate::encoding::{RankedEntry, replace_first_digit_run};
use crate::error::{RankError, Result};

/// How a dropped item's rank is written back into its hidden input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RankRewrite {
    /// Parse the three fields, replace RANK, encode again. Malformed values
    /// are rejected.
    #[default]
    Reencode,
    /// Replace the first run of digits anywhere in the value.
    FirstDigitRun,
}

/// Options handed to the drag library for one container. Field names
/// serialize to the library's camelCase option names.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SortableOptions {
    pub animation: u32,
    pub group: String,
    pub handle: String,
    pub ghost_class: String,
    pub filter: String,
    pub disabled: bool,
    #[serde(skip_serializing)]
    pub rank_rewrite: RankRewrite,
}

impl Default for SortableOptions {
    fn default() -> Self {
        SortableOptions {
            animation: ANIMATION_MS,
            group: SHARED_GROUP.to_string(),
            handle: HANDLE_SELECTOR.to_string(),
            ghost_class: GHOST_CLASS.to_string(),
            filter: FILTER_SELECTOR.to_string(),
            disabled: false,
            rank_rewrite: RankRewrite::default(),
        }
    }
}

/// `base` specialised for `container`: disabled when it carries the
/// `disabled` class.
pub fn options_for<D: Dom>(
    dom: &D,
    base: &SortableOptions,
    container: &D::Element,
) -> SortableOptions {
    SortableOptions {
        disabled: dom.has_class(container, DISABLED_CLASS),
        ..base.clone()
    }
}

/// Whether an in-progress drag may be placed relative to `related`.
pub fn can_move<D: Dom>(dom: &D, related: &D::Element) -> bool {
    !dom.has_class(related, NO_SORT_CLASS)
}

/// Whether `item` itself may be picked up.
pub fn is_draggable<D: Dom>(dom: &D, item: &D::Element) -> bool {
    !dom.has_class(item, NO_SORT_CLASS)
}

/// Finish a drop of `item` into `to`: rewrite the rank to `to`'s id and
/// announce it with a bubbling `sorted` event. Returns the new value.
pub fn on_drop<D: Dom>(
    dom: &mut D,
    item: &D::Element,
    to: &D::Element,
    rewrite: RankRewrite,
) -> Result<String> {
    let input = dom.first_input(item).ok_or(RankError::MissingInput)?;
    let rank = dom.id(to).ok_or(RankError::MissingContainerId)?;
    let value = dom.value(&input);
    let updated = match rewrite {
        RankRewrite::Reencode => RankedEntry::parse(&value)?.with_rank(&rank)?.encode(),
        RankRewrite::FirstDigitRun => replace_first_digit_run(&value, &rank),
    };
    dom.set_value(&input, &updated)?;
    dom.dispatch(item, SORTED_EVENT, true)?;
    Ok(updated)
}

/// A live drag controller owned by the host.
pub trait SortableHandle {
    fn set_disabled(&mut self, disabled: bool);

    fn is_disabled(&self) -> bool;

    /// Called when the registry drops this handle.
    fn release(&mut self) {}
}

/// Controller stand-in that only tracks the disabled flag.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FlagHandle {
    pub disabled: bool,
    pub released: bool,
}

impl FlagHandle {
    pub fn new(options: &SortableOptions) -> Self {
        FlagHandle {
            disabled: options.disabled,
            released: false,
        }
    }
}

impl SortableHandle for FlagHandle {
    fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    fn is_disabled(&self) -> bool {
        self.disabled
    }

    fn release(&mut self) {
        self.released = true;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Registration {
    New,
    /// The same element was already wired; nothing changed.
    Existing,
    /// A different element reused the id; the old handle was released.
    Replaced,
}

#[derive(Debug)]
struct Registered<E, H> {
    id: String,
    element: E,
    handle: H,
}

/// Live controllers keyed by container id, in registration order.
#[derive(Debug)]
pub struct SortableRegistry<E, H> {
    entries: Vec<Registered<E, H>>,
}

impl<E, H> Default for SortableRegistry<E, H> {
    fn default() -> Self {
        SortableRegistry {
            entries: Vec::new(),
        }
    }
}

impl<E: PartialEq, H: SortableHandle> SortableRegistry<E, H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `element` under `id`, building its handle only when needed.
    pub fn register<F>(&mut self, id: &str, element: E, make: F) -> Result<Registration>
    where
        F: FnOnce(&E) -> Result<H>,
    {
        if let Some(pos) = self.entries.iter().position(|r| r.id == id) {
            if self.entries[pos].element == element {
                return Ok(Registration::Existing);
            }
            let handle = make(&element)?;
            let old = std::mem::replace(
                &mut self.entries[pos],
                Registered {
                    id: id.to_string(),
                    element,
                    handle,
                },
            );
            let mut old_handle = old.handle;
            old_handle.release();
            return Ok(Registration::Replaced);
        }
        let handle = make(&element)?;
        self.entries.push(Registered {
            id: id.to_string(),
            element,
            handle,
        });
        Ok(Registration::New)
    }

    pub fn get(&self, id: &str) -> Option<&H> {
        self.entries.iter().find(|r| r.id == id).map(|r| &r.handle)
    }

    pub fn disable(&mut self, id: &str) -> bool {
        match self.entries.iter_mut().find(|r| r.id == id) {
            Some(r) => {
                r.handle.set_disabled(true);
                true
            }
            None => false,
        }
    }

    /// Clear the disabled flag on every controller. Returns how many changed.
    pub fn enable_all(&mut self) -> usize {
        let mut changed = 0;
        for r in self.entries.iter_mut() {
            if r.handle.is_disabled() {
                r.handle.set_disabled(false);
                changed += 1;
            }
        }
        changed
    }

    pub fn is_disabled(&self, id: &str) -> Option<bool> {
        self.get(id).map(H::is_disabled)
    }

    /// Whether `item` inside container `id` can be dragged right now.
    pub fn can_drag<D: Dom<Element = E>>(&self, dom: &D, id: &str, item: &E) -> bool {
        self.is_disabled(id) == Some(false) && is_draggable(dom, item)
    }

    /// Keep only the controllers whose element passes `keep`, releasing the
    /// others.
    pub fn retain<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&str, &E) -> bool,
    {
        let before = self.entries.len();
        let mut kept = Vec::with_capacity(before);
        for mut r in self.entries.drain(..) {
            if keep(&r.id, &r.element) {
                kept.push(r);
            } else {
                r.handle.release();
            }
        }
        self.entries = kept;
        before - self.entries.len()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|r| r.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WireReport {
    pub new: usize,
    pub existing: usize,
    pub replaced: usize,
    /// Containers without an id; they cannot produce a rank and are skipped.
    pub skipped: usize,
}

/// Register every sortable container below `scope` (the whole document when
/// `None`). Safe to call again on content that was already wired.
pub fn wire_subtree<D, H, F>(
    dom: &D,
    scope: Option<&D::Element>,
    registry: &mut SortableRegistry<D::Element, H>,
    base: &SortableOptions,
    mut make: F,
) -> Result<WireReport>
where
    D: Dom,
    H: SortableHandle,
    F: FnMut(&D::Element, &SortableOptions) -> Result<H>,
{
    let mut report = WireReport::default();
    for container in dom.query_class(scope, SORTABLE_CLASS)? {
        let Some(id) = dom.id(&container) else {
            report.skipped += 1;
            continue;
        };
        let options = options_for(dom, base, &container);
        match registry.register(&id, container, |el| make(el, &options))? {
            Registration::New => report.new += 1,
            Registration::Existing => report.existing += 1,
            Registration::Replaced => report.replaced += 1,
        }
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_serialize_with_library_names() {
        let json = serde_json::to_value(SortableOptions::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "animation": 150,
                "group": "shared",
                "handle": ".handle",
                "ghostClass": "blue-background-class",
                "filter": ".no-sort",
                "disabled": false,
            })
        );
    }

    #[test]
    fn partial_overrides_keep_defaults() {
        let o: SortableOptions =
            serde_json::from_str(r#"{"animation": 0, "rankRewrite": "first-digit-run"}"#).unwrap();
        assert_eq!(o.animation, 0);
        assert_eq!(o.group, "shared");
        assert_eq!(o.rank_rewrite, RankRewrite::FirstDigitRun);
    }

    #[test]
    fn register_is_idempotent_per_element() {
        let mut reg: SortableRegistry<u32, FlagHandle> = SortableRegistry::new();
        let mut built = 0;
        let mut make = |_: &u32| -> Result<FlagHandle> {
            built += 1;
            Ok(FlagHandle::default())
        };
        assert_eq!(reg.register("1", 10, &mut make).unwrap(), Registration::New);
        assert_eq!(reg.register("1", 10, &mut make).unwrap(), Registration::Existing);
        assert_eq!(reg.register("1", 11, &mut make).unwrap(), Registration::Replaced);
        assert_eq!(built, 2);
        assert_eq!(reg.len(), 1);
    }

    struct Counted(std::rc::Rc<std::cell::Cell<usize>>);

    impl SortableHandle for Counted {
        fn set_disabled(&mut self, _: bool) {}

        fn is_disabled(&self) -> bool {
            false
        }

        fn release(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn replaced_and_pruned_handles_are_released_once() {
        let released = std::rc::Rc::new(std::cell::Cell::new(0));
        let mut reg: SortableRegistry<u32, Counted> = SortableRegistry::new();
        let make = |_: &u32| -> Result<Counted> { Ok(Counted(released.clone())) };
        reg.register("1", 10, make).unwrap();
        reg.register("1", 10, make).unwrap();
        assert_eq!(released.get(), 0);
        reg.register("1", 11, make).unwrap();
        assert_eq!(released.get(), 1);
        reg.retain(|_, _| false);
        assert_eq!(released.get(), 2);
        assert!(reg.is_empty());
    }

    #[test]
    fn enable_all_counts_changes() {
        let mut reg: SortableRegistry<u32, FlagHandle> = SortableRegistry::new();
        reg.register("1", 1, |_| Ok(FlagHandle { disabled: true, released: false }))
            .unwrap();
        reg.register("2", 2, |_| Ok(FlagHandle::default())).unwrap();
        assert!(reg.disable("2"));
        assert!(!reg.disable("3"));
        assert_eq!(reg.enable_all(), 2);
        assert_eq!(reg.is_disabled("1"), Some(false));
        assert_eq!(reg.enable_all(), 0);
    }

    #[test]
    fn retain_prunes() {
        let mut reg: SortableRegistry<u32, FlagHandle> = SortableRegistry::new();
        for (id, el) in [("1", 1), ("2", 2), ("3", 3)] {
            reg.register(id, el, |_| Ok(FlagHandle::default())).unwrap();
        }
        assert_eq!(reg.retain(|_, el| *el != 2), 1);
        assert_eq!(reg.ids().collect::<Vec<_>>(), vec!["1", "3"]);
    }
}
