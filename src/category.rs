use crate::product::generate_id;
use log::info;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    error::Error,
    fmt::{self, Display, Formatter},
};
use ErrorMessage::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryList {
    pub categories: HashMap<u64, Category>,
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            self.name,
            self.description.as_deref().unwrap_or("")
        )
    }
}

#[derive(Debug)]
pub struct CategoryError {
    pub message: String,
}

impl Display for CategoryError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "Category error: {}", self.message)
    }
}

impl Error for CategoryError {}

impl CategoryError {
    pub fn boxed(message: String) -> Box<dyn Error> {
        Box::new(CategoryError { message })
    }

    pub fn list(message: ErrorMessage) -> Box<dyn Error> {
        CategoryError::boxed(format!("{}", message))
    }
}

#[derive(Debug)]
pub enum ErrorMessage {
    CategoryNotFound,
}

impl ErrorMessage {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryNotFound => "Category not found",
        }
    }
}

impl Display for ErrorMessage {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Category {
    pub fn new(name: &str, description: Option<String>) -> Self {
        Category {
            id: generate_id(),
            name: name.to_string(),
            description,
        }
    }
}

#[allow(dead_code)]
impl CategoryList {
    pub fn new() -> Self {
        CategoryList {
            categories: HashMap::new(),
        }
    }

    pub fn add(&mut self, mut category: Category) -> u64 {
        while self.categories.contains_key(&category.id) {
            category.id = generate_id();
        }
        let id = category.id;
        info!("Category {} added", id);
        self.categories.insert(id, category);
        id
    }

    pub fn remove_by_id(&mut self, id: u64) -> Result<(), Box<dyn Error>> {
        if self.categories.remove(&id).is_some() {
            info!("Category {} removed", id);
            Ok(())
        } else {
            Err(CategoryError::list(CategoryNotFound))
        }
    }

    pub fn category(&self, id: u64) -> Option<&Category> {
        self.categories.get(&id)
    }

    pub fn category_mut(&mut self, id: u64) -> Option<&mut Category> {
        self.categories.get_mut(&id)
    }

    pub fn id_from_name(&self, name: &str) -> Option<u64> {
        self.categories
            .values()
            .find(|c| c.name == name)
            .map(|category| category.id)
    }

    /// Case-sensitive exact-match probe for the uniqueness rule. The record
    /// under `exclude_id` never counts as a conflict with itself.
    pub fn name_taken(&self, name: &str, exclude_id: u64) -> bool {
        self.categories
            .values()
            .any(|c| c.id != exclude_id && c.name == name)
    }

    /// Categories ordered by name ascending.
    pub fn by_name(&self) -> Vec<&Category> {
        let mut categories: Vec<&Category> = self.categories.values().collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        categories
    }

    /// Categories ordered by identifier ascending.
    pub fn by_id(&self) -> Vec<&Category> {
        let mut categories: Vec<&Category> = self.categories.values().collect();
        categories.sort_by_key(|c| c.id);
        categories
    }
}

impl Default for CategoryList {
    fn default() -> Self {
        CategoryList::new()
    }
}
