//! Output formatting module

mod json;
mod text;

use std::fmt::Display;

use miette::Result;
use serde::Serialize;
use weft_ast::Tree;

use crate::config::Format;

pub fn output_tree<K, V>(tree: &Tree<K, V>, format: Format) -> Result<()>
where
    K: Display + Serialize,
    V: Display + Serialize,
{
    match format {
        Format::Json => json::output_json(tree)?,
        Format::Tree => text::output_text(tree),
    }
    Ok(())
}
