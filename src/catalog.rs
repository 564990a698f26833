use crate::{
    category::{Category, CategoryList},
    product::{Product, ProductFilter, ProductList},
};
use log::info;
use serde::{Deserialize, Serialize};
use serde_json;
use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    fs::File,
    io::{self, BufReader, Write},
};
use ErrorMessage::*;

#[derive(Debug, Serialize, Deserialize)]
pub struct Catalog {
    pub name: String,
    pub categories: CategoryList,
    pub products: ProductList,
    pub file_path: String,
}

#[derive(Debug)]
pub enum ErrorMessage {
    CategoryNotFound,
    ProductNotFound,
    CategoryInUse,
    UnknownCategory,
}

#[derive(Debug)]
struct CatalogError {
    message: String,
}

impl Display for ErrorMessage {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ErrorMessage {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            CategoryNotFound => "Category not found",
            ProductNotFound => "Product not found",
            CategoryInUse => "Category still has products",
            UnknownCategory => "No category with this ID exists",
        }
    }
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CatalogError {}

impl CatalogError {
    pub fn boxed(message: String) -> Box<dyn Error> {
        Box::new(CatalogError { message })
    }

    pub fn record(message: ErrorMessage) -> Box<dyn Error> {
        CatalogError::boxed(format!("Catalog error: {}", message))
    }
}

#[allow(dead_code)]
impl Catalog {
    pub fn new(name: String, file_path: Option<String>) -> Self {
        let default_path = format!("./catalog-{}.json", name);
        Catalog {
            name,
            categories: CategoryList::new(),
            products: ProductList::new(),
            file_path: file_path.unwrap_or(default_path),
        }
    }

    pub fn save(&self) -> io::Result<()> {
        match File::create(&self.file_path) {
            Ok(mut file) => match serde_json::to_string_pretty(self) {
                Ok(json) => file.write_all(json.as_bytes()),
                Err(e) => Err(io::Error::new(io::ErrorKind::Other, e)),
            },
            Err(e) => Err(e),
        }
    }

    pub fn save_as(&self, file_path: &str) -> io::Result<()> {
        match File::create(file_path) {
            Ok(mut file) => match serde_json::to_string_pretty(self) {
                Ok(json) => file.write_all(json.as_bytes()),
                Err(e) => Err(io::Error::new(io::ErrorKind::Other, e)),
            },
            Err(e) => Err(e),
        }
    }

    pub fn load<'a>(
        file_path: &str,
        catalog: &'a mut Catalog,
    ) -> Result<&'a mut Catalog, Box<dyn Error>> {
        match File::open(file_path) {
            Ok(file) => {
                let reader = BufReader::new(file);
                match serde_json::from_reader::<BufReader<File>, Catalog>(reader) {
                    Ok(loaded) => {
                        catalog.name = loaded.name;
                        catalog.categories = loaded.categories;
                        catalog.products = loaded.products;
                        catalog.file_path = loaded.file_path;

                        Ok(catalog)
                    }
                    Err(e) => Err(Box::new(e)),
                }
            }
            Err(e) => Err(Box::new(e)),
        }
    }

    pub fn find_category(&self, id: u64) -> Option<&Category> {
        self.categories.category(id)
    }

    pub fn categories_by_name(&self) -> Vec<&Category> {
        self.categories.by_name()
    }

    pub fn categories_by_id(&self) -> Vec<&Category> {
        self.categories.by_id()
    }

    pub fn insert_category(&mut self, category: Category) -> u64 {
        self.categories.add(category)
    }

    pub fn update_category(&mut self, category: Category) -> Result<(), Box<dyn Error>> {
        match self.categories.category_mut(category.id) {
            Some(stored) => {
                *stored = category;
                info!("Category {} updated", stored.id);
                Ok(())
            }
            None => Err(CatalogError::record(CategoryNotFound)),
        }
    }

    /// Deleting a category is rejected while any product references it.
    pub fn delete_category(&mut self, id: u64) -> Result<(), Box<dyn Error>> {
        if self.categories.category(id).is_none() {
            return Err(CatalogError::record(CategoryNotFound));
        }
        if self.products.references(id) {
            return Err(CatalogError::record(CategoryInUse));
        }
        self.categories.remove_by_id(id)
    }

    pub fn find_product(&self, id: u64) -> Option<&Product> {
        self.products.product(id)
    }

    pub fn products_filtered(&self, filter: ProductFilter) -> Vec<&Product> {
        self.products.filtered(filter)
    }

    /// Eager view of one category's products, restricted to active records.
    pub fn active_products_of(&self, category_id: u64) -> Vec<&Product> {
        self.products.active_in_category(category_id)
    }

    pub fn insert_product(&mut self, product: Product) -> Result<u64, Box<dyn Error>> {
        if self.categories.category(product.category_id).is_none() {
            return Err(CatalogError::record(UnknownCategory));
        }
        Ok(self.products.add(product))
    }

    pub fn update_product(&mut self, product: Product) -> Result<(), Box<dyn Error>> {
        if self.categories.category(product.category_id).is_none() {
            return Err(CatalogError::record(UnknownCategory));
        }
        match self.products.product_mut(product.id) {
            Some(stored) => {
                *stored = product;
                info!("Product {} updated", stored.id);
                Ok(())
            }
            None => Err(CatalogError::record(ProductNotFound)),
        }
    }

    pub fn delete_product(&mut self, id: u64) -> Result<(), Box<dyn Error>> {
        match self.products.product(id) {
            Some(_) => self.products.remove_by_id(id),
            None => Err(CatalogError::record(ProductNotFound)),
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        let mut catalog = Catalog::new("default".to_string(), None);
        let beverages = catalog.categories.add(Category::new(
            "Beverages",
            Some("Soft drinks, coffees, teas, beers, and ales".to_string()),
        ));
        let condiments = catalog.categories.add(Category::new(
            "Condiments",
            Some("Sweet and savory sauces, relishes, spreads, and seasonings".to_string()),
        ));
        catalog.categories.add(Category::new(
            "Produce",
            Some("Dried fruit and bean curd".to_string()),
        ));
        catalog.products.add(Product::new(
            "Chai", 1, beverages, "10 boxes x 20 bags", 1800, 39, 0, 10, false,
        ));
        catalog.products.add(Product::new(
            "Chang", 1, beverages, "24 - 12 oz bottles", 1900, 17, 40, 25, false,
        ));
        catalog.products.add(Product::new(
            "Guarana Fantastica",
            10,
            beverages,
            "12 - 355 ml cans",
            450,
            20,
            0,
            0,
            true,
        ));
        catalog.products.add(Product::new(
            "Aniseed Syrup",
            1,
            condiments,
            "12 - 550 ml bottles",
            1000,
            13,
            70,
            25,
            false,
        ));
        catalog
    }
}
