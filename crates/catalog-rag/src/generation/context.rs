//! Assembling retrieved products into a grounding context block

use crate::retrieval::ScoredProduct;

/// Render retrieved products as a single context block, in similarity rank
/// order.
///
/// Each product becomes a numbered block with one labeled field per line,
/// blocks separated by a `---` rule. Field values live on their own labeled
/// lines, so a description containing `---` or a colon cannot shift field
/// boundaries the way a single in-line separator could.
///
/// An empty input yields an empty string, not an error.
pub fn assemble(products: &[ScoredProduct<'_>]) -> String {
    let mut context = String::new();

    for (i, scored) in products.iter().enumerate() {
        let product = scored.product;
        context.push_str(&format!(
            "[{}] {}\nDescription: {}\nPrice: {}\n\n---\n\n",
            i + 1,
            product.name,
            product.description,
            product.price
        ));
    }

    context
}

/// Build the user message for one turn: the raw query first, then the
/// context under a fixed header so the generation provider can tell
/// instruction from grounding.
///
/// When no products matched, the header says so explicitly instead of
/// leaving the model free to invent grounding.
pub fn grounded_user_message(query: &str, context: &str) -> String {
    if context.is_empty() {
        format!(
            "{}\n\nContext with related products:\n(no matching products found in the catalog)",
            query
        )
    } else {
        format!("{}\n\nContext with related products:\n{}", query, context)
    }
}
