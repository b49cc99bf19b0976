//! Entity repositories.

use std::collections::HashMap;
use std::sync::RwLock;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::{Criteria, StoreError};

/// A persistable entity with a string identity.
pub trait Entity: Serialize + Clone + Send + Sync + 'static {
    /// Entity name used in errors and logs (e.g., `"rule"`).
    const ENTITY_NAME: &'static str;

    /// The entity's unique id.
    fn id(&self) -> &str;

    /// Look up a serialized field value for filtering.
    ///
    /// The default implementation serializes the entity and reads the
    /// top-level field, so filter names follow the serde field names.
    fn field(&self, name: &str) -> Option<Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(mut map)) => map.remove(name),
            _ => None,
        }
    }
}

/// Repository of entities of one type.
pub trait EntityRepository<T: Entity>: Send + Sync {
    /// Insert new entities.
    ///
    /// The batch is rejected as a whole if any id already exists or
    /// appears twice in the batch.
    fn create(&self, entities: Vec<T>) -> Result<(), StoreError>;

    /// Find entities matching the criteria.
    fn search(&self, criteria: &Criteria) -> Result<SearchResult<T>, StoreError>;

    /// Delete entities by id, returning how many were removed.
    fn delete(&self, ids: &[&str]) -> Result<usize, StoreError>;
}

/// Entities returned by a search, in insertion order.
#[derive(Debug, Clone)]
pub struct SearchResult<T> {
    entities: Vec<T>,
}

impl<T: Entity> SearchResult<T> {
    /// Create a new search result.
    pub fn new(entities: Vec<T>) -> Self {
        Self { entities }
    }

    /// Get an entity by id.
    pub fn get(&self, id: &str) -> Option<&T> {
        self.entities.iter().find(|e| e.id() == id)
    }

    /// Get the first entity.
    pub fn first(&self) -> Option<&T> {
        self.entities.first()
    }

    /// Get the number of entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Check if the result is empty.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Iterate over the entities.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entities.iter()
    }

    /// Ids of all returned entities.
    pub fn ids(&self) -> Vec<&str> {
        self.entities.iter().map(Entity::id).collect()
    }

    /// Consume and return the entities.
    pub fn into_vec(self) -> Vec<T> {
        self.entities
    }
}

impl<T> IntoIterator for SearchResult<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.into_iter()
    }
}

#[derive(Debug)]
struct Table<T> {
    order: Vec<String>,
    rows: HashMap<String, T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            order: Vec::new(),
            rows: HashMap::new(),
        }
    }
}

/// Thread-safe in-memory repository.
#[derive(Debug)]
pub struct InMemoryRepository<T> {
    table: RwLock<Table<T>>,
}

impl<T: Entity> InMemoryRepository<T> {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table::default()),
        }
    }

    /// Number of stored entities.
    pub fn len(&self) -> Result<usize, StoreError> {
        let table = self
            .table
            .read()
            .map_err(|_| StoreError::Poisoned(T::ENTITY_NAME))?;
        Ok(table.order.len())
    }

    /// Check if the repository is empty.
    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

impl<T: Entity> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> EntityRepository<T> for InMemoryRepository<T> {
    fn create(&self, entities: Vec<T>) -> Result<(), StoreError> {
        let mut table = self
            .table
            .write()
            .map_err(|_| StoreError::Poisoned(T::ENTITY_NAME))?;

        let mut batch_ids: Vec<&str> = Vec::with_capacity(entities.len());
        for entity in &entities {
            let id = entity.id();
            if table.rows.contains_key(id) || batch_ids.contains(&id) {
                return Err(StoreError::DuplicateId {
                    entity: T::ENTITY_NAME,
                    id: id.to_string(),
                });
            }
            batch_ids.push(id);
        }

        let count = entities.len();
        for entity in entities {
            let id = entity.id().to_string();
            table.order.push(id.clone());
            table.rows.insert(id, entity);
        }

        debug!(entity = T::ENTITY_NAME, count, "created entities");
        Ok(())
    }

    fn search(&self, criteria: &Criteria) -> Result<SearchResult<T>, StoreError> {
        let table = self
            .table
            .read()
            .map_err(|_| StoreError::Poisoned(T::ENTITY_NAME))?;

        let limit = criteria.limit().unwrap_or(usize::MAX);
        let entities: Vec<T> = table
            .order
            .iter()
            .filter(|id| criteria.accepts_id(id))
            .filter_map(|id| table.rows.get(id))
            .filter(|entity| {
                criteria
                    .filters()
                    .iter()
                    .all(|f| entity.field(&f.field).as_ref() == Some(&f.value))
            })
            .take(limit)
            .cloned()
            .collect();

        debug!(
            entity = T::ENTITY_NAME,
            found = entities.len(),
            "searched entities"
        );
        Ok(SearchResult::new(entities))
    }

    fn delete(&self, ids: &[&str]) -> Result<usize, StoreError> {
        let mut table = self
            .table
            .write()
            .map_err(|_| StoreError::Poisoned(T::ENTITY_NAME))?;

        let mut removed = 0;
        for id in ids {
            if table.rows.remove(*id).is_some() {
                removed += 1;
            }
        }
        table.order.retain(|id| !ids.contains(&id.as_str()));

        debug!(entity = T::ENTITY_NAME, removed, "deleted entities");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Debug, Clone, Serialize, PartialEq)]
    struct Note {
        id: String,
        owner: String,
        body: String,
    }

    impl Entity for Note {
        const ENTITY_NAME: &'static str = "note";

        fn id(&self) -> &str {
            &self.id
        }
    }

    fn note(id: &str, owner: &str) -> Note {
        Note {
            id: id.to_string(),
            owner: owner.to_string(),
            body: format!("body of {}", id),
        }
    }

    #[test]
    fn test_create_and_search_by_id() {
        let repo = InMemoryRepository::new();
        repo.create(vec![note("n1", "alice"), note("n2", "bob")]).unwrap();

        let result = repo.search(&Criteria::with_ids(["n2"])).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result.get("n2").unwrap().owner, "bob");
        assert!(result.get("n1").is_none());
    }

    #[test]
    fn test_search_preserves_insertion_order() {
        let repo = InMemoryRepository::new();
        repo.create(vec![note("c", "x"), note("a", "x"), note("b", "x")])
            .unwrap();

        let result = repo.search(&Criteria::new()).unwrap();
        assert_eq!(result.ids(), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_duplicate_id_rejects_whole_batch() {
        let repo = InMemoryRepository::new();
        repo.create(vec![note("n1", "alice")]).unwrap();

        let err = repo
            .create(vec![note("n2", "bob"), note("n1", "carol")])
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateId { id, .. } if id == "n1"));
        assert_eq!(repo.len().unwrap(), 1);
    }

    #[test]
    fn test_duplicate_within_batch() {
        let repo = InMemoryRepository::new();
        let err = repo
            .create(vec![note("n1", "alice"), note("n1", "bob")])
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateId { .. }));
        assert!(repo.is_empty().unwrap());
    }

    #[test]
    fn test_field_filter_and_limit() {
        let repo = InMemoryRepository::new();
        repo.create(vec![
            note("n1", "alice"),
            note("n2", "bob"),
            note("n3", "alice"),
        ])
        .unwrap();

        let result = repo
            .search(&Criteria::new().with_filter("owner", "alice"))
            .unwrap();
        assert_eq!(result.ids(), vec!["n1", "n3"]);

        let limited = repo
            .search(&Criteria::new().with_filter("owner", "alice").with_limit(1))
            .unwrap();
        assert_eq!(limited.ids(), vec!["n1"]);
    }

    #[test]
    fn test_search_miss_is_empty() {
        let repo: InMemoryRepository<Note> = InMemoryRepository::new();
        let result = repo.search(&Criteria::with_ids(["missing"])).unwrap();
        assert!(result.is_empty());
        assert!(result.first().is_none());
    }

    #[test]
    fn test_delete() {
        let repo = InMemoryRepository::new();
        repo.create(vec![note("n1", "a"), note("n2", "b")]).unwrap();

        assert_eq!(repo.delete(&["n1", "missing"]).unwrap(), 1);
        assert_eq!(repo.search(&Criteria::new()).unwrap().ids(), vec!["n2"]);
    }
}
