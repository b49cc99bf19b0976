//! Criteria-based entity repositories for TurboRules.
//!
//! Provides a narrow persistence interface: entities are created in batches
//! and looked up again through a [`Criteria`] describing ids, field filters
//! and a limit. [`InMemoryRepository`] is the bundled implementation.
//!
//! # Example
//!
//! ```rust,ignore
//! use turbo_store::{Criteria, EntityRepository, InMemoryRepository};
//!
//! let repository = InMemoryRepository::<RuleEntity>::new();
//! repository.create(vec![rule])?;
//!
//! let result = repository.search(&Criteria::with_ids([rule_id.as_str()]))?;
//! let rule = result.get(rule_id.as_str());
//! ```

mod criteria;
mod error;
mod ids;
mod repository;

pub use criteria::{Criteria, EqualsFilter};
pub use error::StoreError;
pub use ids::generate_id;
#[doc(hidden)]
pub use ids::__private;
pub use repository::{Entity, EntityRepository, InMemoryRepository, SearchResult};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        Criteria, Entity, EntityRepository, InMemoryRepository, SearchResult, StoreError,
    };
}
