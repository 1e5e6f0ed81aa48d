//! In-Memory Repository Implementation
//!
//! The authoritative contact table. Rows and the id sequence live
//! behind one `Mutex`, so every operation is a single atomic step and
//! the sequence can never fall behind an inserted row.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use phonebook_domain::{
    Contact, ContactDraft, ContactId, ContactRepository, CreateOutcome, RepositoryError,
    UpdateOutcome,
};

/// Monotonic id generator
///
/// `next` is always greater than every id the table has ever held.
/// `None` once `i64::MAX` has been used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct IdSequence {
    next: Option<i64>,
}

impl IdSequence {
    fn starting_at(first: i64) -> Self {
        Self { next: Some(first) }
    }

    fn allocate(&mut self) -> Option<ContactId> {
        let id = self.next?;
        self.next = id.checked_add(1);
        Some(ContactId::new(id))
    }

    /// Move past an id that was supplied explicitly.
    fn observe(&mut self, used: ContactId) {
        if let Some(next) = self.next {
            self.next = used.get().checked_add(1).map(|after| after.max(next));
        }
    }
}

#[derive(Debug)]
struct ContactTable {
    rows: BTreeMap<ContactId, Contact>,
    sequence: IdSequence,
}

impl ContactTable {
    fn empty() -> Self {
        Self {
            rows: BTreeMap::new(),
            sequence: IdSequence::starting_at(1),
        }
    }

    fn seeded() -> Self {
        Self {
            rows: seed_contacts()
                .into_iter()
                .map(|contact| (contact.id(), contact))
                .collect(),
            sequence: IdSequence::starting_at(4),
        }
    }

    fn insert(&mut self, draft: &ContactDraft) -> Result<CreateOutcome, RepositoryError> {
        let id = match draft.explicit_id() {
            Some(id) if self.rows.contains_key(&id) => {
                return Ok(CreateOutcome::DuplicateId(id));
            }
            Some(id) => {
                self.sequence.observe(id);
                id
            }
            None => self
                .sequence
                .allocate()
                .ok_or(RepositoryError::IdSpaceExhausted)?,
        };

        let contact = Contact::from_draft(id, draft);
        self.rows.insert(id, contact.clone());
        Ok(CreateOutcome::Inserted(contact))
    }
}

/// The three sample contacts every fresh directory starts with.
fn seed_contacts() -> [Contact; 3] {
    [
        Contact::new(
            ContactId::new(1),
            "Ivan Ivanov",
            "+79991234567",
            "Moscow, Lenin St., 1",
        ),
        Contact::new(
            ContactId::new(2),
            "Maria Petrova",
            "+79997654321",
            "Saint Petersburg, Nevsky Ave., 10",
        ),
        Contact::new(
            ContactId::new(3),
            "Alexey Sidorov",
            "+79995555555",
            "Kazan, Bauman St., 5",
        ),
    ]
}

/// In-memory Contact Repository
///
/// Thread-safe implementation using a single Mutex: reads and writes
/// never interleave. Clones share the same table.
#[derive(Debug, Clone)]
pub struct InMemoryContactRepository {
    table: Arc<Mutex<ContactTable>>,
}

impl InMemoryContactRepository {
    /// A table pre-populated with the seed contacts (ids 1-3, next id 4).
    pub fn new() -> Self {
        Self::from_table(ContactTable::seeded())
    }

    /// A table with no rows; the first allocated id is 1.
    pub fn empty() -> Self {
        Self::from_table(ContactTable::empty())
    }

    fn from_table(table: ContactTable) -> Self {
        Self {
            table: Arc::new(Mutex::new(table)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, ContactTable>, RepositoryError> {
        self.table.lock().map_err(|_| RepositoryError::LockPoisoned)
    }
}

impl Default for InMemoryContactRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactRepository for InMemoryContactRepository {
    fn create(&self, draft: &ContactDraft) -> Result<CreateOutcome, RepositoryError> {
        self.lock()?.insert(draft)
    }

    fn get_by_id(&self, id: ContactId) -> Result<Option<Contact>, RepositoryError> {
        Ok(self.lock()?.rows.get(&id).cloned())
    }

    fn get_all(&self) -> Result<Vec<Contact>, RepositoryError> {
        Ok(self.lock()?.rows.values().cloned().collect())
    }

    fn update(&self, contact: &Contact) -> Result<UpdateOutcome, RepositoryError> {
        let mut table = self.lock()?;
        match table.rows.get_mut(&contact.id()) {
            Some(stored) => {
                stored.replace_details(contact);
                Ok(UpdateOutcome::Updated(stored.clone()))
            }
            None => Ok(UpdateOutcome::NotFound),
        }
    }

    fn remove(&self, id: ContactId) -> Result<bool, RepositoryError> {
        Ok(self.lock()?.rows.remove(&id).is_some())
    }

    fn count(&self) -> Result<usize, RepositoryError> {
        Ok(self.lock()?.rows.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::thread;

    fn inserted(outcome: CreateOutcome) -> Contact {
        match outcome {
            CreateOutcome::Inserted(contact) => contact,
            other => panic!("expected insert, got {:?}", other),
        }
    }

    fn draft(name: &str) -> ContactDraft {
        ContactDraft::new(name, "+79991234567", "Test Address")
    }

    #[test]
    fn test_seed_data() {
        let repo = InMemoryContactRepository::new();

        let all = repo.get_all().unwrap();
        let ids: Vec<i64> = all.iter().map(|c| c.id().get()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(all[1].name(), "Maria Petrova");

        let created = inserted(repo.create(&draft("Test User")).unwrap());
        assert_eq!(created.id().get(), 4);
    }

    #[test]
    fn test_seed_rows_reserve_ids_one_to_three() {
        let repo = InMemoryContactRepository::new();
        assert_eq!(repo.count().unwrap(), 3);

        // Four is the first free id, whether claimed explicitly or allocated.
        let explicit = inserted(repo.create(&draft("Four").with_id(4)).unwrap());
        assert_eq!(explicit.id().get(), 4);
        let next = inserted(repo.create(&draft("Five")).unwrap());
        assert_eq!(next.id().get(), 5);
    }

    #[test]
    fn test_empty_repository_starts_at_one() {
        let repo = InMemoryContactRepository::empty();
        assert_eq!(repo.count().unwrap(), 0);

        let created = inserted(repo.create(&draft("First")).unwrap());
        assert_eq!(created.id().get(), 1);
    }

    #[test]
    fn test_auto_ids_strictly_increase() {
        let repo = InMemoryContactRepository::new();

        let ids: Vec<i64> = (0..5)
            .map(|i| inserted(repo.create(&draft(&format!("User {i}"))).unwrap()).id().get())
            .collect();

        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_zero_id_means_allocate() {
        let repo = InMemoryContactRepository::new();

        let created = inserted(repo.create(&draft("Zero").with_id(0)).unwrap());
        assert_eq!(created.id().get(), 4);
    }

    #[test]
    fn test_explicit_id_advances_sequence() {
        let repo = InMemoryContactRepository::new();

        let explicit = inserted(repo.create(&draft("Explicit ID").with_id(100)).unwrap());
        assert_eq!(explicit.id().get(), 100);

        let next = inserted(repo.create(&draft("After")).unwrap());
        assert_eq!(next.id().get(), 101);

        // A lower explicit id never moves the sequence back.
        inserted(repo.create(&draft("Lower").with_id(50)).unwrap());
        let next = inserted(repo.create(&draft("After lower")).unwrap());
        assert_eq!(next.id().get(), 102);
    }

    #[test]
    fn test_duplicate_id_does_not_overwrite() {
        let repo = InMemoryContactRepository::new();

        inserted(repo.create(&draft("First").with_id(200)).unwrap());
        let outcome = repo.create(&draft("Second").with_id(200)).unwrap();

        assert_eq!(outcome, CreateOutcome::DuplicateId(ContactId::new(200)));
        assert_eq!(
            repo.get_by_id(ContactId::new(200)).unwrap().unwrap().name(),
            "First"
        );
        assert_eq!(repo.count().unwrap(), 4);
    }

    #[test]
    fn test_duplicate_seed_id() {
        let repo = InMemoryContactRepository::new();

        let outcome = repo.create(&draft("Clash").with_id(1)).unwrap();
        assert_eq!(outcome, CreateOutcome::DuplicateId(ContactId::new(1)));
    }

    #[test]
    fn test_get_by_id_round_trip() {
        let repo = InMemoryContactRepository::new();

        let created = inserted(
            repo.create(&ContactDraft::new("Test User 2", "+79997654321", "Test Address 2").with_id(100))
                .unwrap(),
        );
        let found = repo.get_by_id(ContactId::new(100)).unwrap().unwrap();

        assert_eq!(found, created);
        assert!(repo.get_by_id(ContactId::new(99999)).unwrap().is_none());
    }

    #[test]
    fn test_returned_copies_are_independent() {
        let repo = InMemoryContactRepository::new();

        let mut copy = repo.get_by_id(ContactId::new(1)).unwrap().unwrap();
        copy.replace_details(&Contact::new(ContactId::new(1), "Changed", "+0", "Nowhere"));

        let stored = repo.get_by_id(ContactId::new(1)).unwrap().unwrap();
        assert_eq!(stored.name(), "Ivan Ivanov");
    }

    #[test]
    fn test_update() {
        let repo = InMemoryContactRepository::new();
        let created = inserted(
            repo.create(&ContactDraft::new("Original Name", "+79991111111", "Original Address"))
                .unwrap(),
        );

        let outcome = repo
            .update(&Contact::new(
                created.id(),
                "Updated Name",
                "+79992222222",
                "Updated Address",
            ))
            .unwrap();

        let expected = Contact::new(created.id(), "Updated Name", "+79992222222", "Updated Address");
        assert_eq!(outcome, UpdateOutcome::Updated(expected.clone()));
        assert_eq!(repo.get_by_id(created.id()).unwrap(), Some(expected));
    }

    #[test]
    fn test_update_missing() {
        let repo = InMemoryContactRepository::new();

        let outcome = repo
            .update(&Contact::new(ContactId::new(99999), "Test", "+79991111111", "Test Address"))
            .unwrap();
        assert_eq!(outcome, UpdateOutcome::NotFound);
        assert_eq!(repo.count().unwrap(), 3);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let repo = InMemoryContactRepository::new();
        let created = inserted(repo.create(&draft("To Delete")).unwrap());

        assert!(repo.remove(created.id()).unwrap());
        assert!(!repo.remove(created.id()).unwrap());
        assert!(repo.get_by_id(created.id()).unwrap().is_none());
        assert!(!repo.remove(ContactId::new(99999)).unwrap());
    }

    #[test]
    fn test_removed_id_is_not_reissued() {
        let repo = InMemoryContactRepository::new();
        let created = inserted(repo.create(&draft("Gone")).unwrap());
        repo.remove(created.id()).unwrap();

        let next = inserted(repo.create(&draft("Next")).unwrap());
        assert!(next.id() > created.id());
    }

    #[test]
    fn test_id_space_exhausted() {
        let repo = InMemoryContactRepository::new();

        inserted(repo.create(&draft("Last").with_id(i64::MAX)).unwrap());
        assert_eq!(
            repo.create(&draft("Overflow")),
            Err(RepositoryError::IdSpaceExhausted)
        );

        // Explicit ids still work.
        inserted(repo.create(&draft("Explicit").with_id(10)).unwrap());
    }

    #[test]
    fn test_poisoned_lock_is_reported() {
        let repo = InMemoryContactRepository::new();
        let shared = repo.clone();

        let _ = thread::spawn(move || {
            let _guard = shared.table.lock().unwrap();
            panic!("poison the table");
        })
        .join();

        assert_eq!(repo.get_all(), Err(RepositoryError::LockPoisoned));
    }

    #[test]
    fn test_parallel_creates_get_unique_ids() {
        let repo = InMemoryContactRepository::new();
        let num_threads = 8;
        let creates_per_thread = 50;

        let handles: Vec<_> = (0..num_threads)
            .map(|t| {
                let repo = repo.clone();
                thread::spawn(move || {
                    (0..creates_per_thread)
                        .map(|i| {
                            inserted(repo.create(&draft(&format!("t{t}-{i}"))).unwrap()).id()
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            let per_thread = handle.join().unwrap();
            // Each thread observes its own ids in issuance order.
            assert!(per_thread.windows(2).all(|w| w[0] < w[1]));
            ids.extend(per_thread);
        }

        let unique: HashSet<_> = ids.iter().copied().collect();
        assert_eq!(unique.len(), num_threads * creates_per_thread);
        assert_eq!(repo.count().unwrap(), 3 + num_threads * creates_per_thread);
    }
}
