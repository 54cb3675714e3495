//! In-memory category store
//!
//! Categories are kept in insertion order. Ids come from
//! `kopilka_utils::generate_id`, which is monotonic for the process, so an id
//! is never handed out twice even after the category holding it is deleted.

use kopilka_utils::generate_id;

use crate::error::{CoreError, CoreResult};
use crate::models::{Category, CategoryPatch};
use crate::types::{CategoryColor, CategoryIcon, CategoryType};

/// Ordered collection of categories
#[derive(Debug, Clone, Default)]
pub struct CategoryStore {
    categories: Vec<Category>,
}

pub(crate) fn validate_title(title: &str) -> CoreResult<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(CoreError::validation("title", "title must not be empty"));
    }
    Ok(trimmed.to_string())
}

impl CategoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All categories in insertion order
    pub fn list(&self) -> &[Category] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Create a category with a fresh id and append it
    pub fn create(
        &mut self,
        title: &str,
        icon: CategoryIcon,
        color: CategoryColor,
        category_type: CategoryType,
    ) -> CoreResult<Category> {
        let title = validate_title(title)?;

        // records added through `insert` may carry arbitrary ids
        let mut id = generate_id();
        while self.contains(&id) {
            id = generate_id();
        }

        let category = Category {
            id,
            title,
            icon,
            color,
            category_type,
        };
        log::debug!("Created category {} ({})", category.id, category.title);
        self.categories.push(category.clone());
        Ok(category)
    }

    /// Append a category that already carries an id
    pub fn insert(&mut self, category: Category) -> CoreResult<Category> {
        if self.contains(&category.id) {
            return Err(CoreError::DuplicateEntry { id: category.id });
        }
        let title = validate_title(&category.title)?;
        let category = Category { title, ..category };
        self.categories.push(category.clone());
        Ok(category)
    }

    /// Apply the fields present in `patch` to the category with `id`
    pub fn update(&mut self, id: &str, patch: CategoryPatch) -> CoreResult<Category> {
        let title = patch.title.as_deref().map(validate_title).transpose()?;

        let category = self
            .categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| CoreError::CategoryNotFound { id: id.to_string() })?;

        if let Some(title) = title {
            category.title = title;
        }
        if let Some(icon) = patch.icon {
            category.icon = icon;
        }
        if let Some(color) = patch.color {
            category.color = color;
        }
        if let Some(category_type) = patch.category_type {
            category.category_type = category_type;
        }

        log::debug!("Updated category {}", id);
        Ok(category.clone())
    }

    /// Remove the category with `id`; transactions are not touched
    pub fn delete(&mut self, id: &str) -> CoreResult<Category> {
        let index = self
            .categories
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| CoreError::CategoryNotFound { id: id.to_string() })?;
        let removed = self.categories.remove(index);
        log::debug!("Deleted category {}", id);
        Ok(removed)
    }

    /// Split into (income, expense), keeping relative order
    pub fn partition_by_type(&self) -> (Vec<&Category>, Vec<&Category>) {
        self.categories.iter().partition(|c| c.is_income())
    }

    /// Categories of one type, in insertion order
    pub fn by_type(&self, category_type: CategoryType) -> Vec<&Category> {
        self.categories
            .iter()
            .filter(|c| c.category_type == category_type)
            .collect()
    }
}

// ==================== Tests ====================
