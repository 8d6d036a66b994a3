//! JSON output formatter

use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use weft_ast::Tree;

pub fn output_json<K: Serialize, V: Serialize>(tree: &Tree<K, V>) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(&tree.view(tree.root())).into_diagnostic()?
    );
    Ok(())
}
