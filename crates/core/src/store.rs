use anyhow::Result;

use crate::model::{EditTarget, Item, SubmitOutcome, Theme};
use crate::persist::Persistence;

/// Canonical in-memory state: the ordered item list, the draft text, the
/// pending edit target, and the active theme.
///
/// All mutations route through these operations — the view layer never
/// touches the list directly. Each item mutation writes the full list
/// through the persistence adapter; theme changes write the theme key.
/// Blank input and unknown ids are normalized to no-ops rather than errors.
pub struct TodoStore {
    items: Vec<Item>,
    draft: String,
    edit_target: Option<EditTarget>,
    theme: Theme,
    next_id: u64,
    persistence: Box<dyn Persistence>,
}

impl TodoStore {
    /// Read persisted items and theme, seeding the id counter past the
    /// highest stored id so ids stay unique across reloads.
    pub fn load(persistence: Box<dyn Persistence>) -> Self {
        let state = persistence.load();
        let next_id = state
            .items
            .iter()
            .map(|item| item.id)
            .max()
            .map_or(1, |max| max + 1);
        Self {
            items: state.items,
            draft: String::new(),
            edit_target: None,
            theme: state.theme,
            next_id,
            persistence,
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn item(&self, id: u64) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn edit_target(&self) -> Option<&EditTarget> {
        self.edit_target.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.edit_target.is_some()
    }

    /// Scratch composition text; not persisted.
    pub fn set_draft<T: Into<String>>(&mut self, draft: T) {
        self.draft = draft.into();
    }

    /// Commit the draft: replace the edit target's text, or append a new
    /// item when no edit is pending. A blank draft commits nothing — and
    /// while an edit is pending it also keeps the edit pending, so the
    /// caller stays in edit mode until real text arrives or the edit is
    /// cancelled.
    pub fn submit(&mut self) -> Result<SubmitOutcome> {
        let text = self.draft.trim().to_string();

        if let Some(target) = self.edit_target.clone() {
            if text.is_empty() {
                return Ok(SubmitOutcome::Ignored);
            }
            let Some(item) = self.items.iter_mut().find(|item| item.id == target.id) else {
                // The target was deleted while the edit was pending; the
                // stale cursor must not point at a missing item.
                self.edit_target = None;
                self.draft.clear();
                return Ok(SubmitOutcome::Ignored);
            };
            item.text = text;
            self.edit_target = None;
            self.draft.clear();
            self.persistence.save_items(&self.items)?;
            return Ok(SubmitOutcome::Updated(target.id));
        }

        if text.is_empty() {
            return Ok(SubmitOutcome::Ignored);
        }
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(Item::new(id, text));
        self.draft.clear();
        self.persistence.save_items(&self.items)?;
        Ok(SubmitOutcome::Added(id))
    }

    /// Target an item for in-place editing and copy its text into the
    /// draft. Unknown ids leave the store untouched.
    pub fn begin_edit(&mut self, id: u64) -> bool {
        let Some(item) = self.item(id) else {
            return false;
        };
        let text = item.text.clone();
        self.draft = text.clone();
        self.edit_target = Some(EditTarget { id, text });
        true
    }

    /// Abandon a pending edit without writing anything.
    pub fn cancel_edit(&mut self) {
        self.edit_target = None;
        self.draft.clear();
    }

    pub fn toggle_completed(&mut self, id: u64) -> Result<bool> {
        let Some(item) = self.items.iter_mut().find(|item| item.id == id) else {
            return Ok(false);
        };
        item.completed = !item.completed;
        self.persistence.save_items(&self.items)?;
        Ok(true)
    }

    /// Flip the priority flag, then regroup the list priority-first.
    /// `sort_by_key` is stable, so both groups keep their existing relative
    /// order.
    pub fn toggle_priority(&mut self, id: u64) -> Result<bool> {
        let Some(item) = self.items.iter_mut().find(|item| item.id == id) else {
            return Ok(false);
        };
        item.is_priority = !item.is_priority;
        self.items.sort_by_key(|item| !item.is_priority);
        self.persistence.save_items(&self.items)?;
        Ok(true)
    }

    pub fn delete(&mut self, id: u64) -> Result<bool> {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        if self.items.len() == before {
            return Ok(false);
        }
        self.persistence.save_items(&self.items)?;
        Ok(true)
    }

    pub fn toggle_theme(&mut self) -> Result<Theme> {
        self.theme = self.theme.toggled();
        self.persistence.save_theme(self.theme)?;
        Ok(self.theme)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::persist::MemoryStore;

    fn store() -> TodoStore {
        TodoStore::load(Box::new(MemoryStore::new()))
    }

    fn store_with_backend() -> (TodoStore, MemoryStore) {
        let backend = MemoryStore::new();
        (TodoStore::load(Box::new(backend.clone())), backend)
    }

    fn add(store: &mut TodoStore, text: &str) -> u64 {
        store.set_draft(text);
        match store.submit().expect("submit") {
            SubmitOutcome::Added(id) => id,
            other => panic!("expected an append, got {:?}", other),
        }
    }

    fn texts(store: &TodoStore) -> Vec<&str> {
        store.items().iter().map(|item| item.text.as_str()).collect()
    }

    #[test]
    fn submit_appends_item_with_trimmed_text_and_default_flags() {
        let mut store = store();
        store.set_draft("  Buy milk  ");
        let outcome = store.submit().expect("submit");

        assert!(matches!(outcome, SubmitOutcome::Added(_)));
        assert_eq!(store.items().len(), 1);
        let item = &store.items()[0];
        assert_eq!(item.text, "Buy milk");
        assert!(!item.completed);
        assert!(!item.is_priority);
        assert_eq!(store.draft(), "");
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t\n")]
    fn submit_ignores_blank_drafts(#[case] draft: &str) {
        let mut store = store();
        store.set_draft(draft);

        assert_eq!(store.submit().expect("submit"), SubmitOutcome::Ignored);
        assert!(store.items().is_empty());
    }

    #[test]
    fn toggle_completed_twice_restores_the_item() {
        let mut store = store();
        let id = add(&mut store, "Water plants");
        let original = store.item(id).cloned().expect("item");

        assert!(store.toggle_completed(id).expect("toggle"));
        assert!(store.item(id).expect("item").completed);
        assert!(store.toggle_completed(id).expect("toggle"));
        assert_eq!(store.item(id), Some(&original));
    }

    #[test]
    fn toggle_completed_on_unknown_id_is_a_noop() {
        let mut store = store();
        add(&mut store, "Water plants");

        assert!(!store.toggle_completed(999).expect("toggle"));
        assert_eq!(store.items().len(), 1);
    }

    #[test]
    fn toggle_priority_moves_priority_items_to_the_front() {
        let mut store = store();
        add(&mut store, "first");
        add(&mut store, "second");
        let third = add(&mut store, "third");

        assert!(store.toggle_priority(third).expect("toggle"));
        assert_eq!(texts(&store), vec!["third", "first", "second"]);

        // No priority item ever follows a non-priority item.
        let items = store.items();
        for pair in items.windows(2) {
            assert!(pair[0].is_priority >= pair[1].is_priority);
        }
    }

    #[test]
    fn toggle_priority_preserves_order_within_each_group() {
        let mut store = store();
        let a = add(&mut store, "a");
        add(&mut store, "b");
        add(&mut store, "c");
        let d = add(&mut store, "d");

        store.toggle_priority(d).expect("toggle d");
        store.toggle_priority(a).expect("toggle a");

        // Priority group keeps toggle order, the rest keep insertion order.
        assert_eq!(texts(&store), vec!["d", "a", "b", "c"]);
    }

    #[test]
    fn toggle_priority_off_regroups_again() {
        let mut store = store();
        let a = add(&mut store, "a");
        let b = add(&mut store, "b");

        store.toggle_priority(b).expect("toggle b");
        assert_eq!(texts(&store), vec!["b", "a"]);

        store.toggle_priority(b).expect("untoggle b");
        assert_eq!(texts(&store), vec!["b", "a"]);
        assert!(!store.item(b).expect("item").is_priority);
        assert!(!store.item(a).expect("item").is_priority);
    }

    #[test]
    fn delete_then_begin_edit_sets_no_target() {
        let mut store = store();
        let id = add(&mut store, "Ephemeral");

        assert!(store.delete(id).expect("delete"));
        assert!(!store.begin_edit(id));
        assert!(store.edit_target().is_none());
        assert_eq!(store.draft(), "");
    }

    #[test]
    fn begin_edit_copies_text_into_draft() {
        let mut store = store();
        let id = add(&mut store, "Call dentist");

        assert!(store.begin_edit(id));
        assert_eq!(store.draft(), "Call dentist");
        let target = store.edit_target().expect("target");
        assert_eq!(target.id, id);
        assert_eq!(target.text, "Call dentist");
    }

    #[test]
    fn submit_in_edit_mode_replaces_text_and_clears_target() {
        let mut store = store();
        let id = add(&mut store, "Call dentist");
        add(&mut store, "Other");

        store.begin_edit(id);
        store.set_draft("  Call dentist at 9am ");
        let outcome = store.submit().expect("submit");

        assert_eq!(outcome, SubmitOutcome::Updated(id));
        assert_eq!(store.item(id).expect("item").text, "Call dentist at 9am");
        assert!(store.edit_target().is_none());
        assert_eq!(store.draft(), "");
        // List length never changes on the edit path.
        assert_eq!(store.items().len(), 2);
    }

    #[rstest]
    #[case("")]
    #[case("  ")]
    fn blank_draft_keeps_the_edit_pending(#[case] draft: &str) {
        let mut store = store();
        let id = add(&mut store, "Call dentist");

        store.begin_edit(id);
        store.set_draft(draft);

        assert_eq!(store.submit().expect("submit"), SubmitOutcome::Ignored);
        assert!(store.is_editing());
        assert_eq!(store.item(id).expect("item").text, "Call dentist");
    }

    #[test]
    fn cancel_edit_returns_to_composing_without_writes() {
        let (mut store, backend) = store_with_backend();
        let id = add(&mut store, "Call dentist");
        let saved = backend.raw_value(crate::persist::ITEMS_KEY);

        store.begin_edit(id);
        store.set_draft("half-typed replacement");
        store.cancel_edit();

        assert!(!store.is_editing());
        assert_eq!(store.draft(), "");
        assert_eq!(store.item(id).expect("item").text, "Call dentist");
        assert_eq!(backend.raw_value(crate::persist::ITEMS_KEY), saved);
    }

    #[test]
    fn submit_drops_the_edit_when_the_target_vanished() {
        let mut store = store();
        let id = add(&mut store, "Doomed");

        store.begin_edit(id);
        store.delete(id).expect("delete");
        store.set_draft("New text");

        assert_eq!(store.submit().expect("submit"), SubmitOutcome::Ignored);
        assert!(!store.is_editing());
        assert!(store.items().is_empty());
    }

    #[test]
    fn every_item_mutation_reaches_the_backend() {
        let (mut store, backend) = store_with_backend();
        let id = add(&mut store, "Tracked");

        store.toggle_completed(id).expect("toggle");
        let reloaded = TodoStore::load(Box::new(backend.clone()));
        assert!(reloaded.item(id).expect("item").completed);

        store.delete(id).expect("delete");
        let reloaded = TodoStore::load(Box::new(backend.clone()));
        assert!(reloaded.items().is_empty());
    }

    #[test]
    fn theme_defaults_to_light_and_persists_when_toggled() {
        let (mut store, backend) = store_with_backend();
        assert_eq!(store.theme(), Theme::Light);

        assert_eq!(store.toggle_theme().expect("toggle"), Theme::Dark);

        let reloaded = TodoStore::load(Box::new(backend.clone()));
        assert_eq!(reloaded.theme(), Theme::Dark);
    }

    #[test]
    fn ids_stay_unique_across_a_reload() {
        let (mut store, backend) = store_with_backend();
        let first = add(&mut store, "first");
        let second = add(&mut store, "second");
        assert!(second > first);

        let mut reloaded = TodoStore::load(Box::new(backend.clone()));
        let third = add(&mut reloaded, "third");
        assert!(third > second);
    }

    #[test]
    fn buy_milk_scenario() {
        let mut store = store();

        store.set_draft("Buy milk");
        let id = match store.submit().expect("submit") {
            SubmitOutcome::Added(id) => id,
            other => panic!("expected an append, got {:?}", other),
        };
        assert_eq!(texts(&store), vec!["Buy milk"]);
        assert!(!store.items()[0].completed);
        assert!(!store.items()[0].is_priority);

        store.toggle_priority(id).expect("toggle priority");
        assert_eq!(texts(&store), vec!["Buy milk"]);
        assert!(store.items()[0].is_priority);

        store.delete(id).expect("delete");
        assert!(store.items().is_empty());
    }
}
