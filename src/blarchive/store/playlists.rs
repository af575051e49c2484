use super::{bootstrap, first_duplicate, sync, PersistenceAdapter, PLAYLISTS_KEY};
use crate::model::{Direction, PlaylistLink};
use crate::seed;
use std::rc::Rc;
use tracing::debug;
use uuid::Uuid;

/// The playlist collection, in display order.
///
/// The positional operations (`delete_at`, `move_at`) act on whatever sits at
/// that position when they are called. The id-based ones resolve the id to a
/// position first, so they stay correct after earlier reorders or deletions.
pub struct PlaylistStore<B: PersistenceAdapter> {
    backend: Rc<B>,
    links: Vec<PlaylistLink>,
    last_sync_ok: bool,
}

impl<B: PersistenceAdapter> PlaylistStore<B> {
    pub fn load(backend: Rc<B>) -> Self {
        let links = bootstrap(
            backend.as_ref(),
            PLAYLISTS_KEY,
            seed::initial_playlists,
            validate,
        );
        Self {
            backend,
            links,
            last_sync_ok: true,
        }
    }

    pub fn snapshot(&self) -> &[PlaylistLink] {
        &self.links
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn last_sync_ok(&self) -> bool {
        self.last_sync_ok
    }

    pub fn position_of(&self, id: &Uuid) -> Option<usize> {
        self.links.iter().position(|l| l.id == *id)
    }

    /// Append a link. A colliding id is replaced with a fresh one.
    pub fn add(&mut self, mut link: PlaylistLink) -> PlaylistLink {
        while self.position_of(&link.id).is_some() {
            link.id = Uuid::new_v4();
        }
        debug!(id = %link.id, name = %link.name, "adding playlist");
        self.links.push(link.clone());
        self.persist();
        link
    }

    pub fn delete_at(&mut self, position: usize) -> Option<PlaylistLink> {
        if position >= self.links.len() {
            return None;
        }
        let removed = self.links.remove(position);
        debug!(position, name = %removed.name, "deleted playlist");
        self.persist();
        Some(removed)
    }

    /// Swap the link at `position` with its neighbour. Returns false when the
    /// neighbour would fall outside the collection.
    pub fn move_at(&mut self, position: usize, direction: Direction) -> bool {
        if position >= self.links.len() {
            return false;
        }
        let Some(target) = direction.neighbour(position, self.links.len()) else {
            return false;
        };
        self.links.swap(position, target);
        debug!(from = position, to = target, "moved playlist");
        self.persist();
        true
    }

    pub fn delete(&mut self, id: &Uuid) -> Option<PlaylistLink> {
        let position = self.position_of(id)?;
        self.delete_at(position)
    }

    pub fn move_by_id(&mut self, id: &Uuid, direction: Direction) -> bool {
        match self.position_of(id) {
            Some(position) => self.move_at(position, direction),
            None => false,
        }
    }

    /// Write the current collection even if nothing changed.
    pub fn flush(&mut self) -> bool {
        self.persist();
        self.last_sync_ok
    }

    fn persist(&mut self) {
        self.last_sync_ok = sync(self.backend.as_ref(), PLAYLISTS_KEY, &self.links);
    }
}

fn validate(links: &[PlaylistLink]) -> std::result::Result<(), String> {
    match first_duplicate(links.iter().map(|l| l.id)) {
        Some(id) => Err(format!("duplicate playlist id {}", id)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, Platform};
    use crate::store::mem_backend::MemBackend;

    fn empty_store() -> (Rc<MemBackend>, PlaylistStore<MemBackend>) {
        let backend = Rc::new(MemBackend::new());
        backend.insert_raw(PLAYLISTS_KEY, "[]");
        let store = PlaylistStore::load(Rc::clone(&backend));
        (backend, store)
    }

    fn link(name: &str) -> PlaylistLink {
        PlaylistLink::new(
            name,
            format!("https://music.youtube.com/{}", name),
            Platform::YouTube,
            Category::Riize,
        )
    }

    fn names<B: PersistenceAdapter>(store: &PlaylistStore<B>) -> Vec<&str> {
        store.snapshot().iter().map(|l| l.name.as_str()).collect()
    }

    #[test]
    fn seeds_reference_playlists() {
        let store = PlaylistStore::load(Rc::new(MemBackend::new()));
        assert_eq!(names(&store), vec!["Riize - RIIZING", "NCT 127 - WALK"]);
    }

    #[test]
    fn add_then_move_up() {
        let (_backend, mut store) = empty_store();
        store.add(link("A"));
        store.add(link("B"));

        assert!(store.move_at(1, Direction::Up));
        assert_eq!(names(&store), vec!["B", "A"]);
    }

    #[test]
    fn moves_past_the_edges_are_noops() {
        let (backend, mut store) = empty_store();
        store.add(link("A"));
        store.add(link("B"));
        store.add(link("C"));
        let writes = backend.writes();

        assert!(!store.move_at(0, Direction::Up));
        assert!(!store.move_at(2, Direction::Down));
        assert!(!store.move_at(7, Direction::Up));
        assert_eq!(names(&store), vec!["A", "B", "C"]);
        assert_eq!(backend.writes(), writes);
    }

    #[test]
    fn move_only_touches_the_pair() {
        let (_backend, mut store) = empty_store();
        for n in ["A", "B", "C", "D"] {
            store.add(link(n));
        }
        store.move_at(1, Direction::Down);
        assert_eq!(names(&store), vec!["A", "C", "B", "D"]);
    }

    #[test]
    fn delete_at_out_of_bounds_is_noop() {
        let (_backend, mut store) = empty_store();
        store.add(link("A"));
        assert!(store.delete_at(1).is_none());
        assert_eq!(store.len(), 1);
        assert_eq!(store.delete_at(0).unwrap().name, "A");
        assert!(store.is_empty());
    }

    #[test]
    fn id_operations_survive_earlier_shifts() {
        let (_backend, mut store) = empty_store();
        store.add(link("A"));
        let b = store.add(link("B"));
        store.add(link("C"));

        // A position captured before this delete would now point at C.
        store.delete_at(0);
        assert!(store.move_by_id(&b.id, Direction::Down));
        assert_eq!(names(&store), vec!["C", "B"]);

        assert_eq!(store.delete(&b.id).unwrap().name, "B");
        assert!(store.delete(&b.id).is_none());
        assert_eq!(names(&store), vec!["C"]);
    }

    #[test]
    fn persisted_order_round_trips() {
        let (backend, mut store) = empty_store();
        store.add(link("A"));
        store.add(link("B"));
        store.move_at(0, Direction::Down);

        let reloaded = PlaylistStore::load(backend);
        assert_eq!(reloaded.snapshot(), store.snapshot());
    }

    #[test]
    fn colliding_id_is_reassigned() {
        let (_backend, mut store) = empty_store();
        let a = store.add(link("A"));
        let mut clash = link("B");
        clash.id = a.id;

        let b = store.add(clash);
        assert_ne!(a.id, b.id);
    }
}
