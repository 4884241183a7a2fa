use crate::nutrition::RecipeNutritionalProfile;
use crate::recipe::Recipe;

/// Plain-text recipe card, as shown after every change and used for export.
pub fn recipe_card(recipe: &Recipe) -> String {
    let mut card = format!(
        "Receita: {}\nCategoria: {}\nRendimento: {} porção(ões)\n\nIngredientes:\n",
        recipe.name(),
        recipe.category(),
        recipe.yield_count()
    );
    for ingredient in recipe.ingredients() {
        card.push_str(&format!("{}\n", ingredient));
    }
    if !recipe.preparation_text().is_empty() {
        card.push_str(&format!(
            "\nModo de Preparo:\n{}\n",
            recipe.preparation_text()
        ));
    }
    card
}

/// Numbered ingredient list, 1-based to match the indices the CLI accepts.
pub fn numbered_ingredients(recipe: &Recipe) -> String {
    recipe
        .ingredients()
        .iter()
        .enumerate()
        .map(|(i, ingredient)| format!("{:>3}. {}", i + 1, ingredient))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn nutrition_report(profile: &RecipeNutritionalProfile) -> String {
    let totals = &profile.totals;
    let mut report = format!(
        "Calorias: {:.1}kcal\nCarboidratos: {:.1}g\nProteínas: {:.1}g\nGorduras: {:.1}g\n\nPor {} porção(ões)",
        totals.kcal, totals.carbohydrate_g, totals.protein_g, totals.fat_g, profile.yield_count
    );
    let serving = &profile.per_serving;
    report.push_str(&format!(
        "\nPor porção: {:.1}kcal, {:.1}g carboidratos, {:.1}g proteínas, {:.1}g gorduras",
        serving.kcal, serving.carbohydrate_g, serving.protein_g, serving.fat_g
    ));
    if !profile.unmatched.is_empty() {
        report.push_str("\nSem dados nutricionais: ");
        report.push_str(&profile.unmatched.join(", "));
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nutrition::NutritionTable;

    #[test]
    fn test_recipe_card_layout() {
        let mut recipe = Recipe::new("Panqueca", 2.0).unwrap();
        recipe.add_ingredient("farinha", 120.0, "g").unwrap();
        recipe.add_ingredient("ovos", 2.0, "unidades").unwrap();

        let card = recipe_card(&recipe);
        assert_eq!(
            card,
            "Receita: Panqueca\nCategoria: Geral\nRendimento: 2 porção(ões)\n\nIngredientes:\n120 g de farinha\n2 unidades de ovos\n"
        );

        recipe.set_preparation("Misture e frite.");
        assert!(recipe_card(&recipe).ends_with("\nModo de Preparo:\nMisture e frite.\n"));
    }

    #[test]
    fn test_numbered_ingredients() {
        let mut recipe = Recipe::default();
        recipe.add_ingredient("sal", 1.5, "g").unwrap();
        assert_eq!(numbered_ingredients(&recipe), "  1. 1.5 g de sal");
    }

    #[test]
    fn test_nutrition_report_lists_unmatched() {
        let mut recipe = Recipe::default();
        recipe.add_ingredient("farinha", 100.0, "g").unwrap();
        recipe.add_ingredient("fermento", 5.0, "g").unwrap();
        let report = nutrition_report(&NutritionTable::default().profile(&recipe));
        assert!(report.starts_with("Calorias: 364.0kcal\n"));
        assert!(report.contains("\nPor porção: 364.0kcal, 76.0g carboidratos,"));
        assert!(report.contains("Sem dados nutricionais: fermento"));
    }
}
