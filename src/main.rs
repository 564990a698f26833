pub mod catalog;
pub mod category;
pub mod product;
pub mod repl;
pub mod validate;
pub mod test;

use crate::repl::{run, Cli};
use clap::Parser;
use log::error;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    match run(cli) {
        Ok(_) => (),
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}
