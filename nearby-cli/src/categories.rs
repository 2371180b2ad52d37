//! `categories` command: list the supported categories.

use std::io::Write;

use nearby_core::Category;
use serde::Serialize;

use crate::CliError;

#[derive(Debug, Serialize)]
struct CategoryOutput {
    category: Category,
    heading: &'static str,
    icon: &'static str,
    tag: String,
}

impl From<Category> for CategoryOutput {
    fn from(category: Category) -> Self {
        let display = category.display();
        let tag = category.query_tag();
        Self {
            category,
            heading: display.heading,
            icon: display.icon,
            tag: format!("{}={}", tag.key, tag.value),
        }
    }
}

pub(crate) fn write_categories(writer: &mut dyn Write) -> Result<(), CliError> {
    let rows: Vec<CategoryOutput> = Category::ALL.into_iter().map(CategoryOutput::from).collect();
    let payload = serde_json::to_string_pretty(&rows).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}
