//! Student (applicant) model.

use serde::{Deserialize, Serialize};

use super::OrderKey;

/// A student competing for a seat.
///
/// `id` and `rank` are optional because numeric coercion of the source
/// cells may fail; such students still take part in the run and sort
/// after every validly ranked student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Unique student identifier (`UniqueID`). `None` if unparseable.
    pub id: Option<i64>,
    /// Display name.
    pub name: String,
    /// Display gender.
    pub gender: String,
    /// Declared category, trimmed. May lie outside the quota set.
    pub category: String,
    /// Merit rank (lower = served earlier). `None` if unparseable.
    pub rank: Option<OrderKey>,
}

impl Student {
    /// Creates a student with the given id and rank.
    pub fn new(id: i64, rank: i64) -> Self {
        Self {
            id: Some(id),
            name: String::new(),
            gender: String::new(),
            category: String::new(),
            rank: Some(OrderKey::from(rank)),
        }
    }

    /// Sets the name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the gender.
    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = gender.into();
        self
    }

    /// Sets the category (trimmed).
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into().trim().to_string();
        self
    }

    /// Overrides the rank, allowing a missing value.
    pub fn with_rank(mut self, rank: Option<OrderKey>) -> Self {
        self.rank = rank;
        self
    }

    /// Overrides the id, allowing a missing value.
    pub fn with_id(mut self, id: Option<i64>) -> Self {
        self.id = id;
        self
    }

    /// Whether both id and rank were parsed.
    pub fn is_fully_keyed(&self) -> bool {
        self.id.is_some() && self.rank.is_some()
    }
}
