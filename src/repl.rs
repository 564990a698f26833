use {
    crate::{
        catalog::Catalog,
        category::Category,
        product::{Product, ProductFilter},
        validate::{validate_category, Failure, Validation},
    },
    clap::{Parser, Subcommand},
    log::{error, info, warn},
    std::{
        error::Error,
        fmt::{self, Display, Formatter},
        io::{stdin, stdout, Write},
        path::Path,
    },
    ErrorMessage::*,
};

struct Prompt;

pub(crate) struct Parsing;

#[derive(Parser, Debug)]
pub struct Cli {
    /// Catalog name or path to a catalog file
    catalog_path: Option<String>,
    #[clap(subcommand)]
    cmd: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List every category ordered by name
    ListCategories,
    /// List products: "all", "discontinued only" or "active only"
    ListProducts { filter: Option<String> },
    /// Print every field of one product
    ShowProduct { id: u64 },
    /// Add a category without entering the menu
    AddCategory {
        name: String,
        description: Option<String>,
    },
    /// Delete a product without entering the menu
    DeleteProduct { id: u64 },
}

#[derive(Debug)]
pub enum ErrorMessage {
    Cancelled,
    InvalidFilter,
    CouldNotLoadCatalog,
}

impl ErrorMessage {
    pub(crate) fn as_str(&self) -> &'static str {
        match *self {
            Cancelled => "Operation cancelled",
            InvalidFilter => "Invalid filter choice",
            CouldNotLoadCatalog => "Could not load catalog",
        }
    }
}

impl Display for ErrorMessage {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug)]
struct ReplError {
    message: String,
}

impl Display for ReplError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for ReplError {}

impl ReplError {
    pub fn boxed(message: String) -> Box<dyn Error> {
        Box::new(ReplError { message })
    }

    pub fn base(message: ErrorMessage) -> Box<dyn Error> {
        ReplError::boxed(format!("{}", message))
    }
}

fn read_line_trimmed() -> Result<String, Box<dyn Error>> {
    let mut buffer = String::new();
    stdin().read_line(&mut buffer)?;
    Ok(buffer.trim().to_string())
}

impl Parsing {
    /// Decimal price text to cents. A decimal comma is accepted as a
    /// decimal point; negative amounts are rejected.
    pub(crate) fn price(price: &str) -> Result<u64, Box<dyn Error>> {
        let normalized_price = price.replace(',', ".");

        match normalized_price.parse::<f64>() {
            Ok(parsed_price) if parsed_price >= 0.0 => {
                let price_in_cents = (parsed_price * 100.0).round() as u64;
                Ok(price_in_cents)
            }
            _ => Err(ReplError::boxed("Invalid price".to_string())),
        }
    }
}

impl Prompt {
    fn text(label: &str) -> Result<String, Box<dyn Error>> {
        println!("{}", label);
        read_line_trimmed()
    }

    fn optional_text(label: &str) -> Result<Option<String>, Box<dyn Error>> {
        let value = Prompt::text(label)?;
        if value.is_empty() {
            Ok(None)
        } else {
            Ok(Some(value))
        }
    }

    // A bad value re-prompts; an empty line cancels the operation.
    fn id(label: &str) -> Result<u64, Box<dyn Error>> {
        loop {
            let line = Prompt::text(label)?;
            if line.is_empty() {
                return Err(ReplError::base(Cancelled));
            }
            match line.parse::<u64>() {
                Ok(id) => return Ok(id),
                Err(_) => println!("Invalid ID. Try again, or press Enter to cancel."),
            }
        }
    }

    fn quantity(label: &str) -> Result<u16, Box<dyn Error>> {
        loop {
            let line = Prompt::text(label)?;
            if line.is_empty() {
                return Err(ReplError::base(Cancelled));
            }
            match line.parse::<u16>() {
                Ok(quantity) => return Ok(quantity),
                Err(_) => {
                    println!("Invalid quantity. Try again, or press Enter to cancel.")
                }
            }
        }
    }

    fn price(label: &str) -> Result<u64, Box<dyn Error>> {
        loop {
            let line = Prompt::text(label)?;
            if line.is_empty() {
                return Err(ReplError::base(Cancelled));
            }
            match Parsing::price(&line) {
                Ok(price) => return Ok(price),
                Err(_) => println!("Invalid price. Try again, or press Enter to cancel."),
            }
        }
    }

    fn flag(label: &str) -> Result<bool, Box<dyn Error>> {
        loop {
            let line = Prompt::text(label)?;
            if line.is_empty() {
                return Err(ReplError::base(Cancelled));
            }
            match line.to_lowercase().as_str() {
                "y" | "yes" | "true" => return Ok(true),
                "n" | "no" | "false" => return Ok(false),
                _ => println!("Enter y or n, or press Enter to cancel."),
            }
        }
    }
}

fn report_failures(failures: &[Failure]) {
    for failure in failures {
        println!("{}", failure);
        error!("Validation failure: {}", failure);
    }
}

fn display_categories(catalog: &Catalog) {
    let categories = catalog.categories_by_name();
    println!("{} records returned", categories.len());
    for category in categories {
        println!("{}", category);
    }
}

fn insert_category_checked(
    catalog: &mut Catalog,
    name: &str,
    description: Option<String>,
) -> Result<(), Box<dyn Error>> {
    let candidate = Category::new(name, description);
    match validate_category(&candidate, &catalog.categories) {
        Validation::Valid => {
            let id = catalog.insert_category(candidate);
            catalog.save()?;
            println!("Category {} added", id);
            Ok(())
        }
        Validation::Invalid(failures) => {
            report_failures(&failures);
            Ok(())
        }
    }
}

fn add_category(catalog: &mut Catalog) -> Result<(), Box<dyn Error>> {
    let name = Prompt::text("Enter the category name:")?;
    let description = Prompt::optional_text("Enter the category description (optional):")?;
    insert_category_checked(catalog, &name, description)
}

fn edit_category(catalog: &mut Catalog) -> Result<(), Box<dyn Error>> {
    for category in catalog.categories_by_id() {
        println!("{}) {}", category.id, category.name);
    }
    let id = Prompt::id("Enter the ID of the category to edit:")?;
    let existing = match catalog.find_category(id) {
        Some(category) => category.clone(),
        None => {
            println!("Category not found");
            warn!("Category {} not found", id);
            return Ok(());
        }
    };
    // The edit happens on a copy; the stored record is only touched once
    // the whole candidate validates.
    let mut candidate = existing;
    candidate.name = Prompt::text("Enter the new category name:")?;
    candidate.description = Prompt::optional_text("Enter the new description (optional):")?;
    match validate_category(&candidate, &catalog.categories) {
        Validation::Valid => {
            catalog.update_category(candidate)?;
            catalog.save()?;
            println!("Category {} updated", id);
            Ok(())
        }
        Validation::Invalid(failures) => {
            report_failures(&failures);
            Ok(())
        }
    }
}

fn display_category_products(catalog: &Catalog) -> Result<(), Box<dyn Error>> {
    for category in catalog.categories_by_id() {
        println!("{}) {}", category.id, category.name);
    }
    let id = Prompt::id("Enter the ID of the category:")?;
    match catalog.find_category(id) {
        Some(category) => {
            println!("{}", category);
            let products = catalog.active_products_of(category.id);
            if products.is_empty() {
                println!("\tNo active products");
            }
            for product in products {
                println!("\t{}", product.name);
            }
        }
        None => {
            println!("Category not found");
            warn!("Category {} not found", id);
        }
    }
    Ok(())
}

fn display_all_category_products(catalog: &Catalog) {
    for category in catalog.categories_by_id() {
        println!("{}", category.name);
        let products = catalog.active_products_of(category.id);
        if products.is_empty() {
            println!("\tNo active products");
        }
        for product in products {
            println!("\t{}", product.name);
        }
    }
}

fn add_product(catalog: &mut Catalog) -> Result<(), Box<dyn Error>> {
    let name = Prompt::text("Enter the product name:")?;
    let supplier_id = Prompt::id("Enter the supplier ID:")?;
    let category_id = Prompt::id("Enter the category ID:")?;
    let quantity_per_unit = Prompt::text("Enter the quantity per unit:")?;
    let unit_price = Prompt::price("Enter the unit price:")?;
    let units_in_stock = Prompt::quantity("Enter the units in stock:")?;
    let units_on_order = Prompt::quantity("Enter the units on order:")?;
    let reorder_level = Prompt::quantity("Enter the reorder level:")?;
    let discontinued = Prompt::flag("Is the product discontinued? (y/n)")?;

    let product = Product::new(
        &name,
        supplier_id,
        category_id,
        &quantity_per_unit,
        unit_price,
        units_in_stock,
        units_on_order,
        reorder_level,
        discontinued,
    );
    let id = catalog.insert_product(product)?;
    catalog.save()?;
    println!("Product {} added", id);
    Ok(())
}

fn edit_product(catalog: &mut Catalog) -> Result<(), Box<dyn Error>> {
    let id = Prompt::id("Enter the ID of the product to edit:")?;
    let existing = match catalog.find_product(id) {
        Some(product) => product.clone(),
        None => {
            println!("Product not found");
            warn!("Product {} not found", id);
            return Ok(());
        }
    };
    let mut candidate = existing;
    candidate.name = Prompt::text("Enter the new product name:")?;
    candidate.supplier_id = Prompt::id("Enter the new supplier ID:")?;
    candidate.category_id = Prompt::id("Enter the new category ID:")?;
    candidate.quantity_per_unit = Prompt::text("Enter the new quantity per unit:")?;
    candidate.unit_price = Prompt::price("Enter the new unit price:")?;
    candidate.units_in_stock = Prompt::quantity("Enter the new units in stock:")?;
    candidate.units_on_order = Prompt::quantity("Enter the new units on order:")?;
    candidate.reorder_level = Prompt::quantity("Enter the new reorder level:")?;
    candidate.discontinued = Prompt::flag("Is the product discontinued? (y/n)")?;

    catalog.update_product(candidate)?;
    catalog.save()?;
    println!("Product {} updated", id);
    Ok(())
}

fn display_products_with(catalog: &Catalog, filter: ProductFilter) {
    let products = catalog.products_filtered(filter);
    println!("{} records returned", products.len());
    for product in products {
        println!("{} - {}", product.name, product.status());
    }
}

fn display_products(catalog: &Catalog) -> Result<(), Box<dyn Error>> {
    let choice = Prompt::text("Display \"all\", \"discontinued only\" or \"active only\" products:")?;
    match ProductFilter::from_choice(&choice) {
        Some(filter) => display_products_with(catalog, filter),
        None => {
            println!("Invalid choice. Please try again.");
            warn!("Invalid product filter {:?} selected", choice);
        }
    }
    Ok(())
}

fn show_product(catalog: &Catalog, id: u64) {
    match catalog.find_product(id) {
        Some(product) => println!("{}", product),
        None => {
            println!("Product not found");
            warn!("Product {} not found", id);
        }
    }
}

fn display_product(catalog: &Catalog) -> Result<(), Box<dyn Error>> {
    let id = Prompt::id("Enter the ID of the product:")?;
    show_product(catalog, id);
    Ok(())
}

fn delete_product_checked(catalog: &mut Catalog, id: u64) -> Result<(), Box<dyn Error>> {
    match catalog.find_product(id) {
        Some(_) => {
            catalog.delete_product(id)?;
            catalog.save()?;
            println!("Product {} deleted", id);
            Ok(())
        }
        None => {
            println!("Product not found");
            warn!("Product {} not found", id);
            Ok(())
        }
    }
}

fn delete_product(catalog: &mut Catalog) -> Result<(), Box<dyn Error>> {
    let id = Prompt::id("Enter the ID of the product to delete:")?;
    delete_product_checked(catalog, id)
}

fn print_menu() {
    println!("1) Display Categories");
    println!("2) Add Category");
    println!("3) Edit a specified record from the Categories table");
    println!("4) Display Category and related active products");
    println!("5) Display all Categories and their related active products");
    println!("6) Add new record to Products table");
    println!("7) Edit a specified record from the Products table");
    println!("8) Display product name from all records in the Products table");
    println!("9) Display a specific Product");
    println!("10) Delete a specified existing record from the Products table");
    println!("11) Delete a specified existing record from the Categories table");
    println!("\"q\" to quit");
}

fn readline() -> Result<String, Box<dyn Error>> {
    print!("> ");
    stdout().flush()?;
    read_line_trimmed()
}

fn dispatch(choice: &str, catalog: &mut Catalog) -> Result<(), Box<dyn Error>> {
    match choice {
        "1" => {
            display_categories(catalog);
            Ok(())
        }
        "2" => add_category(catalog),
        "3" => edit_category(catalog),
        "4" => display_category_products(catalog),
        "5" => {
            display_all_category_products(catalog);
            Ok(())
        }
        "6" => add_product(catalog),
        "7" => edit_product(catalog),
        "8" => display_products(catalog),
        "9" => display_product(catalog),
        "10" => delete_product(catalog),
        // "11" is on the menu but was never implemented
        _ => {
            println!("Invalid option. Please try again.");
            warn!("Invalid option {:?} selected", choice);
            Ok(())
        }
    }
}

fn run_repl(catalog: &mut Catalog) -> Result<(), Box<dyn Error>> {
    loop {
        print_menu();
        let choice = readline()?;
        info!("Option {} selected", choice);
        if choice.eq_ignore_ascii_case("q") {
            break;
        }
        // A failed handler aborts only its own operation; the menu loop
        // continues either way.
        if let Err(e) = dispatch(&choice, catalog) {
            error!("{}", e);
            println!("{}", e);
        }
        println!();
    }
    Ok(())
}

fn resolve_cmd(cmd: Commands, catalog: &mut Catalog) -> Result<(), Box<dyn Error>> {
    use Commands::*;
    match cmd {
        ListCategories => {
            display_categories(catalog);
            Ok(())
        }
        ListProducts { filter } => {
            let choice = filter.unwrap_or_else(|| "all".to_string());
            match ProductFilter::from_choice(&choice) {
                Some(filter) => {
                    display_products_with(catalog, filter);
                    Ok(())
                }
                None => Err(ReplError::base(InvalidFilter)),
            }
        }
        ShowProduct { id } => {
            show_product(catalog, id);
            Ok(())
        }
        AddCategory { name, description } => insert_category_checked(catalog, &name, description),
        DeleteProduct { id } => delete_product_checked(catalog, id),
    }
}

pub fn run(args: Cli) -> Result<(), Box<dyn Error>> {
    info!("Program started");
    let result = session(args);
    info!("Program ended");
    result
}

fn session(args: Cli) -> Result<(), Box<dyn Error>> {
    let mut catalog = Catalog::new("default".to_string(), None);

    if let Some(file_path) = &args.catalog_path {
        let name = file_path.as_str();
        let default_path_name = format!("./catalog-{}.json", name);
        let default_path = Path::new(&default_path_name);
        if default_path.exists() {
            catalog.file_path = String::from(&default_path_name);
            Catalog::load(&default_path_name, &mut catalog)?;
        } else if Path::new(name).exists() {
            catalog.file_path = name.to_string();
            Catalog::load(name, &mut catalog)?;
        } else {
            return Err(ReplError::base(CouldNotLoadCatalog));
        }

        match args.cmd {
            Some(cmd) => resolve_cmd(cmd, &mut catalog),
            None => run_repl(&mut catalog),
        }
    } else {
        let default_path = Path::new("./catalog-default.json");
        if default_path.exists() {
            catalog.file_path = String::from("./catalog-default.json");
            Catalog::load("./catalog-default.json", &mut catalog)?;
        }
        match args.cmd {
            Some(cmd) => resolve_cmd(cmd, &mut catalog),
            None => run_repl(&mut catalog),
        }
    }
}
