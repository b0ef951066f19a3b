use serde::{Deserialize, Serialize};

use crate::ecs::core::{AnchorId, ConfigError, FoodId, MealCategory, TemplateId};
use crate::ecs::plugins::registry::resources::{FoodLibrary, IdentityRegistry, TemplateLibrary};
use crate::ecs::plugins::selection::DeselectPolicy;

// ============================================================================
// BINDINGS
// ============================================================================

/// One row of the anchor binding table, as authored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BindingEntry {
    pub anchor: AnchorId,
    /// Reference-image name, used for name-based category lookup.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: MealCategory,
    /// Explicit template override; when absent the category template is used.
    #[serde(default)]
    pub template: Option<TemplateId>,
}

impl BindingEntry {
    pub fn new(anchor: AnchorId, name: impl Into<String>, category: MealCategory) -> Self {
        Self {
            anchor,
            name: name.into(),
            category,
            template: None,
        }
    }

    pub fn with_template(mut self, template: TemplateId) -> Self {
        self.template = Some(template);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTemplate {
    pub category: MealCategory,
    pub template: TemplateId,
}

// ============================================================================
// TEMPLATES & FOODS
// ============================================================================

fn default_selectable() -> bool {
    true
}

/// A spawnable meal-component template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealTemplate {
    pub id: TemplateId,
    #[serde(default)]
    pub category: MealCategory,
    /// Food spawned onto the component when it is first selected.
    #[serde(default)]
    pub food: Option<FoodId>,
    #[serde(default = "default_selectable")]
    pub selectable: bool,
    #[serde(default)]
    pub deselect_policy: DeselectPolicy,
}

impl MealTemplate {
    pub fn new(id: impl Into<String>, category: MealCategory) -> Self {
        Self {
            id: TemplateId::new(id),
            category,
            food: None,
            selectable: true,
            deselect_policy: DeselectPolicy::default(),
        }
    }

    pub fn with_food(mut self, food: FoodId) -> Self {
        self.food = Some(food);
        self
    }

    pub fn with_deselect_policy(mut self, policy: DeselectPolicy) -> Self {
        self.deselect_policy = policy;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodDefinition {
    pub id: FoodId,
    #[serde(default)]
    pub name: String,
    /// Food sits on the component's platform slot instead of its centre.
    #[serde(default)]
    pub requires_platform: bool,
}

impl FoodDefinition {
    pub fn new(id: impl Into<String>, name: impl Into<String>, requires_platform: bool) -> Self {
        Self {
            id: FoodId::new(id),
            name: name.into(),
            requires_platform,
        }
    }
}

// ============================================================================
// MENU CONFIG
// ============================================================================

/// Authored menu: bindings, templates and foods, loaded once at startup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    pub default_category: MealCategory,
    pub bindings: Vec<BindingEntry>,
    pub category_templates: Vec<CategoryTemplate>,
    pub templates: Vec<MealTemplate>,
    pub foods: Vec<FoodDefinition>,
}

/// Runtime resources built from a [`MenuConfig`].
#[derive(Debug, Clone, Default)]
pub struct MenuResources {
    pub registry: IdentityRegistry,
    pub templates: TemplateLibrary,
    pub foods: FoodLibrary,
}

impl MenuConfig {
    pub fn build(&self) -> Result<MenuResources, ConfigError> {
        let mut foods = FoodLibrary::default();
        for food in &self.foods {
            foods.insert(food.clone())?;
        }

        let mut templates = TemplateLibrary::default();
        for template in &self.templates {
            if let Some(food) = &template.food {
                if foods.get(food).is_none() {
                    return Err(ConfigError::MissingFood {
                        food: food.clone(),
                        template: template.id.clone(),
                    });
                }
            }
            templates.insert(template.clone())?;
        }

        let mut registry = IdentityRegistry::new(self.default_category);
        for entry in &self.category_templates {
            if templates.get(&entry.template).is_none() {
                return Err(ConfigError::MissingTemplate {
                    template: entry.template.clone(),
                    referenced_by: format!("category {}", entry.category),
                });
            }
            registry.set_category_template(entry.category, entry.template.clone());
        }

        for binding in &self.bindings {
            if let Some(template) = &binding.template {
                if templates.get(template).is_none() {
                    return Err(ConfigError::MissingTemplate {
                        template: template.clone(),
                        referenced_by: format!("anchor {}", binding.anchor),
                    });
                }
            }
        }
        registry.import(self.bindings.iter().cloned())?;

        Ok(MenuResources {
            registry,
            templates,
            foods,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.build().map(|_| ())
    }

    /// Small built-in menu: four reference images, one per category.
    pub fn demo() -> Self {
        Self {
            default_category: MealCategory::MainDish,
            bindings: vec![
                BindingEntry::new(AnchorId::from_u128(0xB0_01), "burger_card", MealCategory::MainDish),
                BindingEntry::new(AnchorId::from_u128(0xB0_02), "fries_card", MealCategory::SideDish),
                BindingEntry::new(AnchorId::from_u128(0xB0_03), "cola_card", MealCategory::Beverage),
                BindingEntry::new(AnchorId::from_u128(0xB0_04), "sundae_card", MealCategory::Dessert)
                    .with_template(TemplateId::new("sundae_stand")),
            ],
            category_templates: vec![
                CategoryTemplate {
                    category: MealCategory::MainDish,
                    template: TemplateId::new("main_plate"),
                },
                CategoryTemplate {
                    category: MealCategory::SideDish,
                    template: TemplateId::new("side_bowl"),
                },
                CategoryTemplate {
                    category: MealCategory::Beverage,
                    template: TemplateId::new("drink_coaster"),
                },
                CategoryTemplate {
                    category: MealCategory::Dessert,
                    template: TemplateId::new("dessert_plate"),
                },
            ],
            templates: vec![
                MealTemplate::new("main_plate", MealCategory::MainDish).with_food(FoodId::new("burger")),
                MealTemplate::new("side_bowl", MealCategory::SideDish).with_food(FoodId::new("fries")),
                MealTemplate::new("drink_coaster", MealCategory::Beverage)
                    .with_food(FoodId::new("cola"))
                    .with_deselect_policy(DeselectPolicy::DestroyContent),
                MealTemplate::new("dessert_plate", MealCategory::Dessert).with_food(FoodId::new("cake")),
                MealTemplate::new("sundae_stand", MealCategory::Dessert).with_food(FoodId::new("sundae")),
            ],
            foods: vec![
                FoodDefinition::new("burger", "Burger", true),
                FoodDefinition::new("salad", "Salad", true),
                FoodDefinition::new("fries", "Fries", false),
                FoodDefinition::new("cola", "Cola", false),
                FoodDefinition::new("cake", "Cake", true),
                FoodDefinition::new("sundae", "Sundae", false),
            ],
        }
    }
}
