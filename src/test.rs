#[cfg(test)]
use crate::{
    catalog::Catalog,
    category::Category,
    product::{Product, ProductFilter},
    repl::Parsing,
    validate::{validate_category, Validation},
};

#[test]
fn add_category_with_fresh_name() {
    let mut catalog = Catalog::default();
    let before = catalog.categories_by_name().len();
    let candidate = Category::new("Seafood", Some("Seaweed and fish".to_string()));
    assert!(validate_category(&candidate, &catalog.categories).is_valid());
    catalog.insert_category(candidate);

    let names: Vec<&str> = catalog
        .categories_by_name()
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(names.iter().filter(|name| **name == "Seafood").count(), 1);
    assert_eq!(names.len(), before + 1);
}

#[test]
fn duplicate_category_name_rejected() {
    let catalog = Catalog::default();
    let before = catalog.categories_by_name().len();
    let candidate = Category::new("Beverages", Some("Another one".to_string()));
    match validate_category(&candidate, &catalog.categories) {
        Validation::Invalid(failures) => {
            assert_eq!(failures.len(), 1);
            assert_eq!(failures[0].field, "CategoryName");
            assert_eq!(failures[0].message, "Name exists");
        }
        Validation::Valid => panic!("duplicate name accepted"),
    }
    assert_eq!(catalog.categories_by_name().len(), before);
}

#[test]
fn edit_category_keeps_own_name() {
    let catalog = Catalog::default();
    let id = catalog.categories.id_from_name("Beverages").unwrap();
    let mut candidate = catalog.find_category(id).unwrap().clone();
    candidate.description = Some("Updated description".to_string());
    assert!(validate_category(&candidate, &catalog.categories).is_valid());
}

#[test]
fn edit_category_rename_collision_rejected() {
    let catalog = Catalog::default();
    let id = catalog.categories.id_from_name("Beverages").unwrap();
    let mut candidate = catalog.find_category(id).unwrap().clone();
    candidate.name = "Condiments".to_string();
    match validate_category(&candidate, &catalog.categories) {
        Validation::Invalid(failures) => {
            assert_eq!(failures[0].field, "CategoryName");
            assert_eq!(failures[0].message, "Name exists");
        }
        Validation::Valid => panic!("rename onto another category accepted"),
    }
}

#[test]
fn invalid_edit_leaves_record_untouched() {
    let mut catalog = Catalog::default();
    let id = catalog.categories.id_from_name("Beverages").unwrap();
    let mut candidate = catalog.find_category(id).unwrap().clone();
    candidate.name = "Condiments".to_string();
    if validate_category(&candidate, &catalog.categories).is_valid() {
        catalog.update_category(candidate).unwrap();
    }
    assert_eq!(catalog.find_category(id).unwrap().name, "Beverages");
}

#[test]
fn category_name_is_required() {
    let catalog = Catalog::default();
    let candidate = Category::new("", None);
    match validate_category(&candidate, &catalog.categories) {
        Validation::Invalid(failures) => {
            assert_eq!(failures.len(), 1);
            assert_eq!(failures[0].field, "CategoryName");
            assert_eq!(failures[0].message, "Name is required");
        }
        Validation::Valid => panic!("empty name accepted"),
    }
}

#[test]
fn category_name_length_is_bounded() {
    let catalog = Catalog::default();
    let candidate = Category::new("Dairy and Cheese Products", None);
    match validate_category(&candidate, &catalog.categories) {
        Validation::Invalid(failures) => {
            assert_eq!(failures.len(), 1);
            assert_eq!(
                failures[0].message,
                "Name cannot be longer than 15 characters"
            );
        }
        Validation::Valid => panic!("over-long name accepted"),
    }
}

#[test]
fn uniqueness_waits_for_structural_rules() {
    let mut catalog = Catalog::default();
    catalog.insert_category(Category::new("", None));
    let candidate = Category::new("", None);
    match validate_category(&candidate, &catalog.categories) {
        Validation::Invalid(failures) => {
            assert!(failures.iter().all(|f| f.message != "Name exists"));
        }
        Validation::Valid => panic!("empty name accepted"),
    }
}

#[test]
fn filters_partition_products() {
    let catalog = Catalog::default();
    let names = |filter| -> Vec<String> {
        catalog
            .products_filtered(filter)
            .iter()
            .map(|p| p.name.clone())
            .collect()
    };
    assert_eq!(
        names(ProductFilter::Active),
        vec!["Aniseed Syrup", "Chai", "Chang"]
    );
    assert_eq!(
        names(ProductFilter::Discontinued),
        vec!["Guarana Fantastica"]
    );
    assert_eq!(
        names(ProductFilter::All),
        vec!["Aniseed Syrup", "Chai", "Chang", "Guarana Fantastica"]
    );
}

#[test]
fn category_view_filters_discontinued_products() {
    let catalog = Catalog::default();
    let beverages = catalog.categories.id_from_name("Beverages").unwrap();
    let names: Vec<&str> = catalog
        .active_products_of(beverages)
        .iter()
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(names, vec!["Chai", "Chang"]);
}

#[test]
fn delete_product_removes_exactly_one() {
    let mut catalog = Catalog::default();
    let id = catalog.products.id_from_name("Chang").unwrap();
    let before = catalog.products_filtered(ProductFilter::All).len();
    catalog.delete_product(id).unwrap();
    assert_eq!(catalog.products_filtered(ProductFilter::All).len(), before - 1);
    assert!(catalog.find_product(id).is_none());
    assert!(catalog.products.id_from_name("Chai").is_some());
}

#[test]
fn delete_missing_product_reports_not_found() {
    let mut catalog = Catalog::default();
    let before = catalog.products_filtered(ProductFilter::All).len();
    assert!(catalog.delete_product(1).is_err());
    assert_eq!(catalog.products_filtered(ProductFilter::All).len(), before);
}

#[test]
fn category_listing_is_idempotent() {
    let catalog = Catalog::default();
    let first: Vec<String> = catalog
        .categories_by_name()
        .iter()
        .map(|c| c.to_string())
        .collect();
    let second: Vec<String> = catalog
        .categories_by_name()
        .iter()
        .map(|c| c.to_string())
        .collect();
    assert_eq!(first, second);
}

#[test]
fn categories_listed_alphabetically() {
    let mut catalog = Catalog::new("test".to_string(), None);
    catalog.insert_category(Category::new("Produce", None));
    catalog.insert_category(Category::new("Beverages", None));
    catalog.insert_category(Category::new("Condiments", None));
    let names: Vec<&str> = catalog
        .categories_by_name()
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(names, vec!["Beverages", "Condiments", "Produce"]);
}

#[test]
fn beverages_add_then_duplicate() {
    let mut catalog = Catalog::new("test".to_string(), None);
    let candidate = Category::new("Beverages", Some("Soft drinks".to_string()));
    assert!(validate_category(&candidate, &catalog.categories).is_valid());
    catalog.insert_category(candidate);
    let rows: Vec<String> = catalog
        .categories_by_name()
        .iter()
        .map(|c| c.to_string())
        .collect();
    assert_eq!(rows, vec!["Beverages - Soft drinks".to_string()]);

    let duplicate = Category::new("Beverages", None);
    match validate_category(&duplicate, &catalog.categories) {
        Validation::Invalid(failures) => {
            assert_eq!(failures[0].field, "CategoryName");
            assert_eq!(failures[0].message, "Name exists");
        }
        Validation::Valid => panic!("duplicate accepted"),
    }
    assert_eq!(catalog.categories_by_name().len(), 1);
}

#[test]
fn category_with_products_cannot_be_deleted() {
    let mut catalog = Catalog::default();
    let beverages = catalog.categories.id_from_name("Beverages").unwrap();
    assert!(catalog.delete_category(beverages).is_err());
    assert!(catalog.find_category(beverages).is_some());
}

#[test]
fn empty_category_can_be_deleted() {
    let mut catalog = Catalog::default();
    let produce = catalog.categories.id_from_name("Produce").unwrap();
    catalog.delete_category(produce).unwrap();
    assert!(catalog.find_category(produce).is_none());
}

#[test]
fn product_with_unknown_category_is_rejected() {
    let mut catalog = Catalog::default();
    let before = catalog.products_filtered(ProductFilter::All).len();
    let product = Product::new(
        "Chartreuse verte",
        18,
        1,
        "750 cc per bottle",
        1800,
        69,
        0,
        5,
        false,
    );
    assert!(catalog.insert_product(product).is_err());
    assert_eq!(catalog.products_filtered(ProductFilter::All).len(), before);
}

#[test]
fn price_text_parses_to_cents() {
    assert_eq!(Parsing::price("12.34").unwrap(), 1234);
    assert_eq!(Parsing::price("12,34").unwrap(), 1234);
    assert_eq!(Parsing::price("5").unwrap(), 500);
    assert!(Parsing::price("twelve").is_err());
    assert!(Parsing::price("-5").is_err());
}

#[test]
fn filter_selector_recognizes_exactly_three_values() {
    assert_eq!(ProductFilter::from_choice("all"), Some(ProductFilter::All));
    assert_eq!(
        ProductFilter::from_choice(" Active Only "),
        Some(ProductFilter::Active)
    );
    assert_eq!(
        ProductFilter::from_choice("discontinued only"),
        Some(ProductFilter::Discontinued)
    );
    assert_eq!(ProductFilter::from_choice("active"), None);
    assert_eq!(ProductFilter::from_choice("discontinued"), None);
    assert_eq!(ProductFilter::from_choice("2"), None);
}
