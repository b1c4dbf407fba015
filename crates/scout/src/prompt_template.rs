use serde::Serialize;
use tera::{Context, Error as TeraError, Tera};

use crate::search::SearchResult;

const SEARCH_ANALYSIS_TEMPLATE: &str = include_str!("prompts/search_analysis.md");

pub fn load_prompt<T: Serialize>(template: &str, context_data: &T) -> Result<String, TeraError> {
    let mut tera = Tera::default();
    tera.add_raw_template("inline_template", template)?;
    let context = Context::from_serialize(context_data)?;
    let rendered = tera.render("inline_template", &context)?;
    Ok(rendered)
}

#[derive(Serialize)]
struct SearchAnalysisContext<'a> {
    query: &'a str,
    results: &'a [SearchResult],
}

/// The user prompt asking the model to review a list of search results
pub fn search_analysis_prompt(query: &str, results: &[SearchResult]) -> Result<String, TeraError> {
    let rendered = load_prompt(
        SEARCH_ANALYSIS_TEMPLATE,
        &SearchAnalysisContext { query, results },
    )?;
    Ok(rendered.trim_end().to_string())
}
