//! S-expression output formatter

use std::fmt::Display;

use weft_ast::Tree;

pub fn output_text<K: Display, V: Display>(tree: &Tree<K, V>) {
    println!("{}", weft_calc::render(tree));
}
