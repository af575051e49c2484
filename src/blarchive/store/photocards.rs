use super::{bootstrap, first_duplicate, sync, PersistenceAdapter, PHOTOCARDS_KEY};
use crate::model::{NewPhotocard, Photocard};
use crate::seed;
use std::rc::Rc;
use tracing::debug;
use uuid::Uuid;

/// The photocard collection, newest first.
///
/// Every mutation writes the full collection back to the backend. Lookups by
/// an id that is not present are silent no-ops.
pub struct PhotocardStore<B: PersistenceAdapter> {
    backend: Rc<B>,
    cards: Vec<Photocard>,
    last_sync_ok: bool,
}

impl<B: PersistenceAdapter> PhotocardStore<B> {
    /// Bootstrap from the backend, seeding the built-in cards when nothing
    /// usable is stored.
    pub fn load(backend: Rc<B>) -> Self {
        let cards = bootstrap(
            backend.as_ref(),
            PHOTOCARDS_KEY,
            seed::initial_photocards,
            validate,
        );
        Self {
            backend,
            cards,
            last_sync_ok: true,
        }
    }

    pub fn snapshot(&self) -> &[Photocard] {
        &self.cards
    }

    pub fn get(&self, id: &str) -> Option<&Photocard> {
        self.cards.iter().find(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Whether the most recent write reached the backend.
    pub fn last_sync_ok(&self) -> bool {
        self.last_sync_ok
    }

    pub fn add(&mut self, new: NewPhotocard) -> Photocard {
        let card = new.into_card(self.fresh_id());
        debug!(id = %card.id, category = %card.category, "adding photocard");
        self.cards.insert(0, card.clone());
        self.persist();
        card
    }

    pub fn delete(&mut self, id: &str) -> Option<Photocard> {
        let position = self.cards.iter().position(|c| c.id == id)?;
        let removed = self.cards.remove(position);
        debug!(id, "deleted photocard");
        self.persist();
        Some(removed)
    }

    /// Replace the tag list of a card. Callers pass trimmed, non-empty,
    /// duplicate-free tags; see [`crate::tags`].
    pub fn update_tags(&mut self, id: &str, tags: Vec<String>) -> bool {
        let Some(card) = self.cards.iter_mut().find(|c| c.id == id) else {
            return false;
        };
        debug!(id, ?tags, "updating tags");
        card.tags = tags;
        self.persist();
        true
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }

    /// Write the current collection even if nothing changed.
    pub fn flush(&mut self) -> bool {
        self.persist();
        self.last_sync_ok
    }

    fn persist(&mut self) {
        self.last_sync_ok = sync(self.backend.as_ref(), PHOTOCARDS_KEY, &self.cards);
    }
}

fn validate(cards: &[Photocard]) -> std::result::Result<(), String> {
    if let Some(id) = first_duplicate(cards.iter().map(|c| c.id.as_str())) {
        return Err(format!("duplicate photocard id {:?}", id));
    }
    for card in cards {
        if let Some(tag) = first_duplicate(card.tags.iter()) {
            return Err(format!("photocard {:?} repeats tag {:?}", card.id, tag));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category;
    use crate::store::mem_backend::MemBackend;
    use chrono::NaiveDate;
    use std::collections::HashSet;

    fn empty_store() -> (Rc<MemBackend>, PhotocardStore<MemBackend>) {
        let backend = Rc::new(MemBackend::new());
        backend.insert_raw(PHOTOCARDS_KEY, "[]");
        let store = PhotocardStore::load(Rc::clone(&backend));
        (backend, store)
    }

    fn card(title: &str, category: Category) -> NewPhotocard {
        NewPhotocard::new(format!("https://cards/{}.jpg", title), title, category)
            .with_date(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
    }

    #[test]
    fn seeds_when_backend_is_empty() {
        let store = PhotocardStore::load(Rc::new(MemBackend::new()));
        assert_eq!(store.len(), 3);
        assert_eq!(store.snapshot()[0].id, "1");
    }

    #[test]
    fn add_prepends_and_persists() {
        let (backend, mut store) = empty_store();
        store.add(
            card("first", Category::Riize)
                .with_memo("m")
                .with_tags(vec!["Wonbin".to_string()]),
        );
        let second = store.add(card("second", Category::XngHan));

        assert_eq!(store.snapshot()[0].id, second.id);
        assert_eq!(store.snapshot()[1].title, "first");

        let reloaded = PhotocardStore::load(backend);
        assert_eq!(reloaded.snapshot(), store.snapshot());
        assert_eq!(reloaded.snapshot()[1].memo.as_deref(), Some("m"));
    }

    #[test]
    fn ids_stay_unique_and_fields_immutable() {
        let (_backend, mut store) = empty_store();
        let mut created = Vec::new();
        for i in 0..20 {
            created.push(store.add(card(&format!("c{}", i), Category::Nct127)));
        }
        for victim in created.iter().step_by(3) {
            store.delete(&victim.id);
        }
        for survivor in created.iter().skip(1).step_by(3) {
            store.update_tags(&survivor.id, vec!["x".into()]);
        }

        let ids: HashSet<_> = store.snapshot().iter().map(|c| c.id.clone()).collect();
        assert_eq!(ids.len(), store.len());

        for current in store.snapshot() {
            let original = created.iter().find(|c| c.id == current.id).unwrap();
            assert_eq!(current.url, original.url);
            assert_eq!(current.title, original.title);
            assert_eq!(current.category, original.category);
            assert_eq!(current.date_added, original.date_added);
        }
    }

    #[test]
    fn update_tags_keeps_order() {
        let (_backend, mut store) = empty_store();
        let c = store.add(card("t", Category::Riize));
        let tags = vec!["z".to_string(), "a".to_string(), "m".to_string()];

        assert!(store.update_tags(&c.id, tags.clone()));
        assert_eq!(store.get(&c.id).unwrap().tags, tags);
    }

    #[test]
    fn unknown_id_is_a_silent_noop() {
        let backend = Rc::new(MemBackend::new());
        let mut store = PhotocardStore::load(Rc::clone(&backend));
        assert_eq!(store.len(), 3);

        assert!(store.delete("nope").is_none());
        assert!(!store.update_tags("nope", vec!["x".into()]));
        assert_eq!(store.len(), 3);
        assert_eq!(backend.writes(), 0);
    }

    #[test]
    fn write_failure_keeps_in_memory_mutation() {
        let (backend, mut store) = empty_store();
        backend.set_simulate_write_error(true);

        let c = store.add(card("kept", Category::Riize));

        assert!(!store.last_sync_ok());
        assert_eq!(store.get(&c.id).unwrap().title, "kept");
        assert_eq!(backend.raw(PHOTOCARDS_KEY).as_deref(), Some("[]"));

        backend.set_simulate_write_error(false);
        store.update_tags(&c.id, vec!["again".into()]);
        assert!(store.last_sync_ok());
    }

    #[test]
    fn duplicate_ids_on_disk_fall_back_to_seed() {
        let backend = Rc::new(MemBackend::new());
        let dup = r#"[
            {"id":"9","url":"u","title":"a","category":"Riize","dateAdded":"2024-01-01"},
            {"id":"9","url":"u","title":"b","category":"Riize","dateAdded":"2024-01-01"}
        ]"#;
        backend.insert_raw(PHOTOCARDS_KEY, dup);

        let store = PhotocardStore::load(backend);
        assert_eq!(store.snapshot(), seed::initial_photocards().as_slice());
    }

    #[test]
    fn duplicate_tags_on_disk_fall_back_to_seed() {
        let backend = Rc::new(MemBackend::new());
        let dup = r#"[{"id":"9","url":"u","title":"a","category":"Riize","dateAdded":"2024-01-01","tags":["x","x"]}]"#;
        backend.insert_raw(PHOTOCARDS_KEY, dup);

        let store = PhotocardStore::load(backend);
        assert_eq!(store.len(), 3);
    }
}
