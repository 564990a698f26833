use crate::category::{Category, CategoryList};
use std::fmt::{self, Display, Formatter};

pub const MAX_CATEGORY_NAME: usize = 15;

/// One rejected field: which field and why.
#[derive(Debug, Clone, PartialEq)]
pub struct Failure {
    pub field: &'static str,
    pub message: String,
}

impl Display for Failure {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[derive(Debug, PartialEq)]
pub enum Validation {
    Valid,
    Invalid(Vec<Failure>),
}

#[allow(dead_code)]
impl Validation {
    pub fn from_failures(failures: Vec<Failure>) -> Self {
        if failures.is_empty() {
            Validation::Valid
        } else {
            Validation::Invalid(failures)
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Validation::Valid)
    }
}

/// One declarative rule: `check` returns true when the field passes.
pub struct Rule<T> {
    pub field: &'static str,
    pub message: &'static str,
    pub check: fn(&T) -> bool,
}

/// Runs every rule in declaration order; a failing rule never stops the
/// rules after it.
pub fn check_rules<T>(record: &T, rules: &[Rule<T>]) -> Vec<Failure> {
    rules
        .iter()
        .filter(|rule| !(rule.check)(record))
        .map(|rule| Failure {
            field: rule.field,
            message: rule.message.to_string(),
        })
        .collect()
}

fn name_present(category: &Category) -> bool {
    !category.name.trim().is_empty()
}

fn name_fits(category: &Category) -> bool {
    category.name.trim().chars().count() <= MAX_CATEGORY_NAME
}

pub const CATEGORY_RULES: &[Rule<Category>] = &[
    Rule {
        field: "CategoryName",
        message: "Name is required",
        check: name_present,
    },
    Rule {
        field: "CategoryName",
        message: "Name cannot be longer than 15 characters",
        check: name_fits,
    },
];

/// Structural rules first; the uniqueness probe only runs once they all
/// pass, and never counts the candidate's own record as a conflict.
pub fn validate_category(candidate: &Category, categories: &CategoryList) -> Validation {
    let mut failures = check_rules(candidate, CATEGORY_RULES);
    if failures.is_empty() && categories.name_taken(&candidate.name, candidate.id) {
        failures.push(Failure {
            field: "CategoryName",
            message: "Name exists".to_string(),
        });
    }
    Validation::from_failures(failures)
}
