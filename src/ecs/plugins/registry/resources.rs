use bevy::prelude::*;
use std::collections::HashMap;

use crate::ecs::core::{AnchorId, ConfigError, FoodId, MealCategory, OverlayError, TemplateId};
use crate::ecs::plugins::registry::components::{BindingEntry, FoodDefinition, MealTemplate};

// ============================================================================
// IDENTITY REGISTRY
// ============================================================================

/// How a template was chosen for an anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingSource {
    /// The anchor's binding names a template directly.
    Explicit,
    /// The anchor's binding category has a template.
    Category,
    /// The anchor is unbound (or its category has no template) and fell back
    /// to the default category.
    DefaultCategory,
}

/// Result of resolving an anchor against the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateBinding {
    pub anchor: AnchorId,
    pub category: MealCategory,
    pub template: TemplateId,
    pub source: BindingSource,
}

/// Maps stable anchor identities to categories and templates.
///
/// Bindings keep their authored order so that [`IdentityRegistry::export`]
/// and [`IdentityRegistry::import`] round-trip the same sequence.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct IdentityRegistry {
    entries: Vec<BindingEntry>,
    index: HashMap<AnchorId, usize>,
    category_templates: HashMap<MealCategory, TemplateId>,
    default_category: MealCategory,
}

impl IdentityRegistry {
    pub fn new(default_category: MealCategory) -> Self {
        Self {
            default_category,
            ..Self::default()
        }
    }

    pub fn default_category(&self) -> MealCategory {
        self.default_category
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn binding(&self, anchor: AnchorId) -> Option<&BindingEntry> {
        self.index.get(&anchor).map(|&slot| &self.entries[slot])
    }

    pub fn category_of(&self, anchor: AnchorId) -> MealCategory {
        self.binding(anchor)
            .map(|entry| entry.category)
            .unwrap_or(self.default_category)
    }

    /// Category for a reference-image name, compared case-insensitively.
    pub fn category_for_name(&self, name: &str) -> MealCategory {
        self.entries
            .iter()
            .find(|entry| entry.name.eq_ignore_ascii_case(name))
            .map(|entry| entry.category)
            .unwrap_or(self.default_category)
    }

    pub fn set_category_template(&mut self, category: MealCategory, template: TemplateId) {
        self.category_templates.insert(category, template);
    }

    /// Binds `anchor` directly to `template`, creating a binding in the
    /// default category if the anchor was unbound.
    pub fn set_template_override(&mut self, anchor: AnchorId, template: TemplateId) {
        match self.index.get(&anchor) {
            Some(&slot) => self.entries[slot].template = Some(template),
            None => {
                self.index.insert(anchor, self.entries.len());
                self.entries.push(BindingEntry {
                    anchor,
                    name: String::new(),
                    category: self.default_category,
                    template: Some(template),
                });
            }
        }
    }

    /// Chooses the template to spawn for `anchor`.
    ///
    /// Unbound anchors and categories without a template degrade to the
    /// default category. Only when that has no template either does
    /// resolution fail.
    pub fn resolve_template(&self, anchor: AnchorId) -> Result<TemplateBinding, OverlayError> {
        let entry = self.binding(anchor);

        if let Some(entry) = entry {
            if let Some(template) = &entry.template {
                return Ok(TemplateBinding {
                    anchor,
                    category: entry.category,
                    template: template.clone(),
                    source: BindingSource::Explicit,
                });
            }
            if let Some(template) = self.category_templates.get(&entry.category) {
                return Ok(TemplateBinding {
                    anchor,
                    category: entry.category,
                    template: template.clone(),
                    source: BindingSource::Category,
                });
            }
        }

        self.category_templates
            .get(&self.default_category)
            .map(|template| TemplateBinding {
                anchor,
                category: self.default_category,
                template: template.clone(),
                source: BindingSource::DefaultCategory,
            })
            .ok_or(OverlayError::UnresolvableTemplate(anchor))
    }

    /// Bindings in authored order.
    pub fn export(&self) -> Vec<BindingEntry> {
        self.entries.clone()
    }

    /// Replaces all bindings. On a duplicate anchor nothing is changed.
    pub fn import(&mut self, entries: impl IntoIterator<Item = BindingEntry>) -> Result<(), ConfigError> {
        let mut imported = Vec::new();
        let mut index = HashMap::new();
        for entry in entries {
            if index.insert(entry.anchor, imported.len()).is_some() {
                return Err(ConfigError::DuplicateBinding(entry.anchor));
            }
            imported.push(entry);
        }
        self.entries = imported;
        self.index = index;
        Ok(())
    }
}

// ============================================================================
// LIBRARIES
// ============================================================================

#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct TemplateLibrary {
    templates: HashMap<TemplateId, MealTemplate>,
}

impl TemplateLibrary {
    pub fn insert(&mut self, template: MealTemplate) -> Result<(), ConfigError> {
        if self.templates.contains_key(&template.id) {
            return Err(ConfigError::DuplicateTemplate(template.id));
        }
        self.templates.insert(template.id.clone(), template);
        Ok(())
    }

    pub fn get(&self, id: &TemplateId) -> Option<&MealTemplate> {
        self.templates.get(id)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct FoodLibrary {
    foods: HashMap<FoodId, FoodDefinition>,
}

impl FoodLibrary {
    pub fn insert(&mut self, food: FoodDefinition) -> Result<(), ConfigError> {
        if self.foods.contains_key(&food.id) {
            return Err(ConfigError::DuplicateFood(food.id));
        }
        self.foods.insert(food.id.clone(), food);
        Ok(())
    }

    pub fn get(&self, id: &FoodId) -> Option<&FoodDefinition> {
        self.foods.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::plugins::registry::components::MenuConfig;

    fn anchor(n: u128) -> AnchorId {
        AnchorId::from_u128(n)
    }

    fn registry() -> IdentityRegistry {
        let mut registry = IdentityRegistry::new(MealCategory::MainDish);
        registry.set_category_template(MealCategory::MainDish, TemplateId::new("main_plate"));
        registry.set_category_template(MealCategory::SideDish, TemplateId::new("side_bowl"));
        registry
            .import([
                BindingEntry::new(anchor(1), "Burger_Card", MealCategory::MainDish),
                BindingEntry::new(anchor(2), "fries_card", MealCategory::SideDish),
                BindingEntry::new(anchor(3), "cola_card", MealCategory::Beverage),
                BindingEntry::new(anchor(4), "sundae_card", MealCategory::Dessert)
                    .with_template(TemplateId::new("sundae_stand")),
            ])
            .unwrap();
        registry
    }

    #[test]
    fn explicit_override_wins() {
        let binding = registry().resolve_template(anchor(4)).unwrap();
        assert_eq!(binding.template, TemplateId::new("sundae_stand"));
        assert_eq!(binding.category, MealCategory::Dessert);
        assert_eq!(binding.source, BindingSource::Explicit);
    }

    #[test]
    fn category_template_is_used_for_bound_anchor() {
        let binding = registry().resolve_template(anchor(2)).unwrap();
        assert_eq!(binding.template, TemplateId::new("side_bowl"));
        assert_eq!(binding.source, BindingSource::Category);
    }

    #[test]
    fn unbound_anchor_falls_back_to_default_category() {
        let binding = registry().resolve_template(anchor(99)).unwrap();
        assert_eq!(binding.category, MealCategory::MainDish);
        assert_eq!(binding.template, TemplateId::new("main_plate"));
        assert_eq!(binding.source, BindingSource::DefaultCategory);
    }

    #[test]
    fn category_without_template_degrades_to_default() {
        let binding = registry().resolve_template(anchor(3)).unwrap();
        assert_eq!(binding.template, TemplateId::new("main_plate"));
        assert_eq!(binding.source, BindingSource::DefaultCategory);
    }

    #[test]
    fn no_default_template_is_unresolvable() {
        let registry = IdentityRegistry::new(MealCategory::Dessert);
        assert_eq!(
            registry.resolve_template(anchor(7)),
            Err(OverlayError::UnresolvableTemplate(anchor(7)))
        );
    }

    #[test]
    fn category_lookup_by_name_ignores_case() {
        let registry = registry();
        assert_eq!(registry.category_for_name("FRIES_CARD"), MealCategory::SideDish);
        assert_eq!(registry.category_for_name("burger_card"), MealCategory::MainDish);
        assert_eq!(registry.category_for_name("unknown"), MealCategory::MainDish);
    }

    #[test]
    fn export_preserves_order_and_import_restores_it() {
        let source = registry();
        let exported = source.export();
        let names: Vec<_> = exported.iter().map(|entry| entry.name.as_str()).collect();
        assert_eq!(names, ["Burger_Card", "fries_card", "cola_card", "sundae_card"]);

        let mut restored = IdentityRegistry::new(MealCategory::MainDish);
        restored.import(exported).unwrap();
        assert_eq!(restored.export(), source.export());
        assert_eq!(restored.category_of(anchor(2)), MealCategory::SideDish);
    }

    #[test]
    fn duplicate_import_is_rejected_and_leaves_registry_unchanged() {
        let mut registry = registry();
        let before = registry.export();
        let result = registry.import([
            BindingEntry::new(anchor(10), "a", MealCategory::Dessert),
            BindingEntry::new(anchor(10), "b", MealCategory::Dessert),
        ]);
        assert!(matches!(result, Err(ConfigError::DuplicateBinding(id)) if id == anchor(10)));
        assert_eq!(registry.export(), before);
    }

    #[test]
    fn override_on_unbound_anchor_creates_binding() {
        let mut registry = registry();
        registry.set_template_override(anchor(50), TemplateId::new("side_bowl"));
        let binding = registry.resolve_template(anchor(50)).unwrap();
        assert_eq!(binding.source, BindingSource::Explicit);
        assert_eq!(binding.category, MealCategory::MainDish);
        assert_eq!(registry.len(), 5);
    }

    #[test]
    fn demo_menu_builds() {
        let resources = MenuConfig::demo().build().unwrap();
        assert_eq!(resources.registry.len(), 4);
        assert_eq!(resources.templates.len(), 5);
    }

    #[test]
    fn menu_with_dangling_template_is_rejected() {
        let mut menu = MenuConfig::demo();
        menu.bindings[0].template = Some(TemplateId::new("missing"));
        assert!(matches!(menu.build(), Err(ConfigError::MissingTemplate { .. })));
    }
}
