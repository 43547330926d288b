use chrono::{DateTime, SubsecRound, Utc};
use engine::{Entity, EntityId, EntityValidationError, FieldErrors};
use serde::Serialize;
use serde_json::{Value, json};

pub type CategoryId = EntityId;

pub const NAME_MAX_LENGTH: usize = 255;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewCategory {
    pub name: String,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

impl NewCategory {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_is_active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }
}

/// Categories compare equal when their ids do. Only built through
/// [`Category::new`] or [`Category::create`], never deserialized.
#[derive(Debug, Serialize, Clone, Eq)]
pub struct Category {
    category_id: CategoryId,
    name: String,
    description: Option<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl PartialEq for Category {
    fn eq(&self, other: &Self) -> bool {
        self.category_id == other.category_id
    }
}

impl Category {
    /// Rebuilds a category from already known values. Nothing is validated;
    /// call [`Category::validate`] when the source is not trusted.
    pub fn new(
        category_id: CategoryId,
        name: String,
        description: Option<String>,
        is_active: bool,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            category_id,
            name,
            description,
            is_active,
            created_at,
        }
    }

    /// New category with a fresh id, active unless told otherwise.
    pub fn create(new: NewCategory) -> Result<Self, EntityValidationError> {
        let category = Self::new(
            CategoryId::new(),
            new.name,
            new.description,
            new.is_active.unwrap_or(true),
            Utc::now().trunc_subsecs(3),
        );
        category.validate()?;
        Ok(category)
    }

    pub fn validate(&self) -> Result<(), EntityValidationError> {
        let mut errors = FieldErrors::new();
        validate_name(&self.name, &mut errors);
        errors.into_result()
    }

    /// Leaves the category untouched when `name` is invalid.
    pub fn change_name(&mut self, name: impl Into<String>) -> Result<(), EntityValidationError> {
        let name = name.into();
        let mut errors = FieldErrors::new();
        validate_name(&name, &mut errors);
        errors.into_result()?;

        self.name = name;
        Ok(())
    }

    pub fn change_description(&mut self, description: Option<String>) {
        self.description = description;
    }

    pub fn activate(&mut self) {
        self.is_active = true;
    }

    pub fn deactivate(&mut self) {
        self.is_active = false;
    }

    pub fn category_id(&self) -> &CategoryId {
        &self.category_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

fn validate_name(name: &str, errors: &mut FieldErrors) {
    if name.trim().is_empty() {
        errors.add("name", "name should not be empty");
    }
    if name.chars().count() > NAME_MAX_LENGTH {
        errors.add(
            "name",
            format!("name must be shorter than or equal to {NAME_MAX_LENGTH} characters"),
        );
    }
}

impl Entity for Category {
    type Id = CategoryId;
    const NAME: &'static str = "Category";

    fn entity_id(&self) -> &Self::Id {
        &self.category_id
    }

    fn to_json(&self) -> Value {
        json!({
            "category_id": self.category_id.to_string(),
            "name": self.name,
            "description": self.description,
            "is_active": self.is_active,
            "created_at": self.created_at,
        })
    }
}
