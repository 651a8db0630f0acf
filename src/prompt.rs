use crate::types::GenerationRequest;

/// Instruction sent to the model for one marketing card.
pub fn marketing_card_prompt(request: &GenerationRequest) -> String {
    format!(
        "Act as a marketing expert. Generate a catchy Title, a short Description (max 2 sentences), \
and 5 keywords tags for the product named \"{}\" in the category of \"{}\". \
Return ONLY raw JSON with keys: 'title', 'description', 'tags'. Do not use Markdown.",
        request.product_name, request.category
    )
}
