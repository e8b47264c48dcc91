//! Author operations - pure business logic without the HTTP layer.

use chrono::NaiveDate;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use serde::Deserialize;

use crate::domain::CatalogError;
use crate::models::author::{ActiveModel as AuthorActiveModel, Entity as AuthorEntity, Model};

const MAX_NAME_LEN: usize = 30;
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Form payload for creating an author. Date fields are raw text because
/// HTML forms post empty strings for untouched inputs.
#[derive(Debug, Clone, Deserialize)]
pub struct NewAuthor {
    pub name: String,
    pub birth_date: Option<String>,
    pub date_of_death: Option<String>,
}

/// List all authors, ordered by name.
pub async fn list_authors(db: &DatabaseConnection) -> Result<Vec<Model>, CatalogError> {
    let authors = AuthorEntity::find()
        .order_by_asc(crate::models::author::Column::Name)
        .all(db)
        .await?;
    Ok(authors)
}

/// Create an author after validating name and life dates.
///
/// Equal birth and death dates are accepted; death before birth is not.
pub async fn create_author(
    db: &DatabaseConnection,
    input: NewAuthor,
) -> Result<Model, CatalogError> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(CatalogError::MissingName);
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(CatalogError::NameTooLong);
    }

    let birth = parse_date(input.birth_date.as_deref(), "birth date")?;
    let death = parse_date(input.date_of_death.as_deref(), "date of death")?;

    if let (Some(birth), Some(death)) = (birth, death)
        && death < birth
    {
        return Err(CatalogError::DeathBeforeBirth);
    }

    let now = chrono::Utc::now().to_rfc3339();
    let author = AuthorActiveModel {
        name: Set(name.to_string()),
        birth_date: Set(birth.map(|d| d.format(DATE_FORMAT).to_string())),
        date_of_death: Set(death.map(|d| d.format(DATE_FORMAT).to_string())),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };

    let model = author.insert(db).await?;
    tracing::info!(author_id = model.id, name = %model.name, "author created");
    Ok(model)
}

/// Parse an optional YYYY-MM-DD field. Empty strings count as absent.
fn parse_date(raw: Option<&str>, field: &'static str) -> Result<Option<NaiveDate>, CatalogError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => NaiveDate::parse_from_str(text, DATE_FORMAT)
            .map(Some)
            .map_err(|_| CatalogError::InvalidDate(field)),
    }
}
