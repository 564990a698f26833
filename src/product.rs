use log::info;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    error::Error,
    fmt::{self, Display, Formatter},
};
use ErrorMessage::*;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ProductFilter {
    All,
    Active,
    Discontinued,
}

impl ProductFilter {
    /// Exactly three selector values are recognized; anything else is an
    /// invalid choice and no query runs.
    pub fn from_choice(choice: &str) -> Option<Self> {
        match choice.trim().to_lowercase().as_str() {
            "all" => Some(ProductFilter::All),
            "active only" => Some(ProductFilter::Active),
            "discontinued only" => Some(ProductFilter::Discontinued),
            _ => None,
        }
    }

    pub fn matches(&self, product: &Product) -> bool {
        match self {
            ProductFilter::All => true,
            ProductFilter::Active => !product.discontinued,
            ProductFilter::Discontinued => product.discontinued,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub supplier_id: u64,
    pub category_id: u64,
    pub quantity_per_unit: String,
    pub unit_price: u64,
    pub units_in_stock: u16,
    pub units_on_order: u16,
    pub reorder_level: u16,
    pub discontinued: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProductList {
    pub products: HashMap<u64, Product>,
}

impl Display for Product {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(
            f,
            "Product ID: {}\nName: {}\nSupplier ID: {}\nCategory ID: {}\n\
             Quantity per unit: {}\nUnit price: {}\nUnits in stock: {}\n\
             Units on order: {}\nReorder level: {}\nDiscontinued: {}",
            self.id,
            self.name,
            self.supplier_id,
            self.category_id,
            self.quantity_per_unit,
            format_price(self.unit_price),
            self.units_in_stock,
            self.units_on_order,
            self.reorder_level,
            self.discontinued,
        )
    }
}

#[derive(Debug)]
pub struct ProductError {
    pub message: String,
}

impl Display for ProductError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "Product error: {}", self.message)
    }
}

impl Error for ProductError {}

impl ProductError {
    pub fn boxed(message: String) -> Box<dyn Error> {
        Box::new(ProductError { message })
    }

    pub fn list(message: ErrorMessage) -> Box<dyn Error> {
        ProductError::boxed(format!("{}", message))
    }
}

#[derive(Debug)]
pub enum ErrorMessage {
    ProductNotFound,
}

impl ErrorMessage {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductNotFound => "Product not found",
        }
    }
}

impl Display for ErrorMessage {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

pub fn format_price(price: u64) -> String {
    let numeral = price / 100;
    let decimal = price % 100;

    format!("${}.{}", numeral, format_args!("{:02}", decimal))
}

impl Product {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: &str,
        supplier_id: u64,
        category_id: u64,
        quantity_per_unit: &str,
        unit_price: u64,
        units_in_stock: u16,
        units_on_order: u16,
        reorder_level: u16,
        discontinued: bool,
    ) -> Self {
        Product {
            id: generate_id(),
            name: name.to_string(),
            supplier_id,
            category_id,
            quantity_per_unit: quantity_per_unit.to_string(),
            unit_price,
            units_in_stock,
            units_on_order,
            reorder_level,
            discontinued,
        }
    }

    pub fn status(&self) -> &'static str {
        if self.discontinued {
            "discontinued"
        } else {
            "active"
        }
    }
}

#[allow(dead_code)]
impl ProductList {
    pub fn new() -> Self {
        ProductList {
            products: HashMap::new(),
        }
    }

    pub fn add(&mut self, mut product: Product) -> u64 {
        while self.products.contains_key(&product.id) {
            product.id = generate_id();
        }
        let id = product.id;
        info!("Product {} added", id);
        self.products.insert(id, product);
        id
    }

    pub fn remove_by_id(&mut self, id: u64) -> Result<(), Box<dyn Error>> {
        if self.products.remove(&id).is_some() {
            info!("Product {} removed", id);
            Ok(())
        } else {
            Err(ProductError::list(ProductNotFound))
        }
    }

    pub fn product(&self, id: u64) -> Option<&Product> {
        self.products.get(&id)
    }

    pub fn product_mut(&mut self, id: u64) -> Option<&mut Product> {
        self.products.get_mut(&id)
    }

    pub fn id_from_name(&self, name: &str) -> Option<u64> {
        self.products
            .values()
            .find(|p| p.name == name)
            .map(|product| product.id)
    }

    /// Products matching the filter, ordered by name ascending.
    pub fn filtered(&self, filter: ProductFilter) -> Vec<&Product> {
        let mut products: Vec<&Product> = self
            .products
            .values()
            .filter(|product| filter.matches(product))
            .collect();
        products.sort_by(|a, b| a.name.cmp(&b.name));
        products
    }

    /// Active products of one category, ordered by name ascending.
    pub fn active_in_category(&self, category_id: u64) -> Vec<&Product> {
        let mut products: Vec<&Product> = self
            .products
            .values()
            .filter(|product| product.category_id == category_id && !product.discontinued)
            .collect();
        products.sort_by(|a, b| a.name.cmp(&b.name));
        products
    }

    pub fn references(&self, category_id: u64) -> bool {
        self.products
            .values()
            .any(|product| product.category_id == category_id)
    }
}

impl Default for ProductList {
    fn default() -> Self {
        ProductList::new()
    }
}

pub(crate) fn generate_id() -> u64 {
    let mut random = rand::thread_rng();
    let id: u64 = random.gen_range(100000..999999);
    id
}
