//! Built-in recipe catalog filtered by the profile's restrictions.
//!
//! This is the one consumer of the dislike list: allergens and dislikes
//! both exclude any recipe whose ingredients mention them.

#[derive(Debug, PartialEq, Eq)]
pub struct Recipe {
    pub id: u32,
    pub title: &'static str,
    pub ingredients: &'static [&'static str],
}

pub const CATALOG: &[Recipe] = &[
    Recipe {
        id: 1,
        title: "Oat porridge with banana",
        ingredients: &["oats", "banana", "milk"],
    },
    Recipe {
        id: 2,
        title: "Chicken and egg salad",
        ingredients: &["chicken", "egg", "mayonnaise", "lettuce"],
    },
    Recipe {
        id: 3,
        title: "Nut smoothie",
        ingredients: &["milk", "banana", "nuts"],
    },
    Recipe {
        id: 4,
        title: "Buckwheat with vegetables",
        ingredients: &["buckwheat", "carrot", "onion", "pepper"],
    },
    Recipe {
        id: 5,
        title: "Cheese omelette",
        ingredients: &["egg", "cheese", "milk"],
    },
];

/// Map an ingredient or allergen token to the form restrictions are
/// matched on. Milk-family tokens collapse to "lactose", the canonical
/// allergen the profile stores.
fn canonical(token: &str) -> String {
    let token = token.trim().to_lowercase();
    if token == "milk" || token == "молоко" {
        "lactose".to_string()
    } else {
        token
    }
}

/// Recipes whose ingredient lists intersect neither the allergens nor the
/// dislikes, matched case-insensitively.
pub fn compatible<'a>(
    catalog: &'a [Recipe],
    allergens: &[String],
    dislikes: &[String],
) -> Vec<&'a Recipe> {
    let blocked: Vec<String> = allergens.iter().map(|a| canonical(a)).collect();
    let disliked: Vec<String> = dislikes.iter().map(|d| d.trim().to_lowercase()).collect();
    catalog
        .iter()
        .filter(|recipe| {
            !recipe.ingredients.iter().any(|ingredient| {
                blocked.contains(&canonical(ingredient))
                    || disliked.contains(&ingredient.trim().to_lowercase())
            })
        })
        .collect()
}
