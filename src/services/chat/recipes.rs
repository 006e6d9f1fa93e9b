//! Fixed recipe table for the fallback responder. Ingredient names line up
//! with the seeded item names so lookups resolve against live inventory.

pub type Recipe = (&'static str, &'static [&'static str]);

pub const RECIPES: &[Recipe] = &[
    (
        "biryani",
        &[
            "Basmati Rice",
            "Garam Masala",
            "Turmeric Powder",
            "Chilli Powder",
            "Onion",
            "Tomato",
            "Chicken",
            "Salt",
        ],
    ),
    (
        "pancake",
        &["Wheat Flour", "Milk", "Eggs (Dozen)", "Sugar", "Butter"],
    ),
    (
        "omelette",
        &["Eggs (Dozen)", "Salt", "Black Pepper", "Onion", "Tomato"],
    ),
    ("salad", &["Tomato", "Cucumber", "Lemon", "Salt", "Olive Oil"]),
    ("cake", &["Wheat Flour", "Sugar", "Eggs (Dozen)", "Butter"]),
    (
        "paneer curry",
        &[
            "Paneer",
            "Onion",
            "Tomato",
            "Garam Masala",
            "Turmeric Powder",
            "Chilli Powder",
            "Coconut Oil",
            "Salt",
            "Coriander Powder",
        ],
    ),
    (
        "paneer tikka",
        &[
            "Paneer",
            "Yogurt",
            "Garam Masala",
            "Turmeric Powder",
            "Chilli Powder",
            "Lemon",
            "Salt",
        ],
    ),
    (
        "butter chicken",
        &[
            "Chicken",
            "Butter",
            "Tomato",
            "Garam Masala",
            "Turmeric Powder",
            "Chilli Powder",
            "Coriander Powder",
            "Salt",
        ],
    ),
    (
        "chicken curry",
        &[
            "Chicken",
            "Onion",
            "Tomato",
            "Turmeric Powder",
            "Chilli Powder",
            "Garam Masala",
            "Coriander Powder",
            "Coconut Oil",
            "Salt",
        ],
    ),
    (
        "dal fry",
        &[
            "Turmeric Powder",
            "Salt",
            "Chilli Powder",
            "Cumin Seeds",
            "Onion",
            "Tomato",
            "Coriander Powder",
            "Coconut Oil",
        ],
    ),
    ("masala chai", &["Cardamom", "Turmeric Powder"]),
    (
        "vegetable stir fry",
        &[
            "Onion",
            "Bell Pepper",
            "Cauliflower",
            "Cucumber",
            "Salt",
            "Sunflower Oil",
            "Chilli Powder",
        ],
    ),
    (
        "fish curry",
        &[
            "Fish",
            "Coconut Oil",
            "Onion",
            "Tomato",
            "Turmeric Powder",
            "Chilli Powder",
            "Coriander Powder",
            "Salt",
        ],
    ),
    (
        "egg curry",
        &[
            "Eggs (Dozen)",
            "Onion",
            "Tomato",
            "Turmeric Powder",
            "Chilli Powder",
            "Coriander Powder",
            "Coconut Oil",
            "Salt",
        ],
    ),
    (
        "carrot curry",
        &[
            "Carrot",
            "Onion",
            "Tomato",
            "Turmeric Powder",
            "Chilli Powder",
            "Coconut Oil",
            "Salt",
            "Coriander Powder",
        ],
    ),
    (
        "broccoli curry",
        &[
            "Broccoli",
            "Onion",
            "Tomato",
            "Turmeric Powder",
            "Chilli Powder",
            "Coconut Oil",
            "Salt",
        ],
    ),
    (
        "cauliflower curry",
        &[
            "Cauliflower",
            "Onion",
            "Tomato",
            "Turmeric Powder",
            "Chilli Powder",
            "Coconut Oil",
            "Salt",
        ],
    ),
    (
        "potato curry",
        &[
            "Potato",
            "Onion",
            "Tomato",
            "Turmeric Powder",
            "Chilli Powder",
            "Salt",
            "Coconut Oil",
        ],
    ),
    (
        "spinach curry",
        &[
            "Spinach",
            "Onion",
            "Tomato",
            "Turmeric Powder",
            "Salt",
            "Coconut Oil",
        ],
    ),
    (
        "cucumber curry",
        &[
            "Cucumber",
            "Onion",
            "Tomato",
            "Turmeric Powder",
            "Chilli Powder",
            "Coconut Oil",
            "Salt",
            "Coriander Powder",
        ],
    ),
    (
        "cabbage curry",
        &[
            "Cabbage",
            "Onion",
            "Tomato",
            "Turmeric Powder",
            "Chilli Powder",
            "Coconut Oil",
            "Salt",
        ],
    ),
    (
        "tomato curry",
        &[
            "Tomato",
            "Onion",
            "Turmeric Powder",
            "Chilli Powder",
            "Coconut Oil",
            "Salt",
            "Coriander Powder",
        ],
    ),
    (
        "bell pepper curry",
        &[
            "Bell Pepper",
            "Onion",
            "Tomato",
            "Turmeric Powder",
            "Chilli Powder",
            "Coconut Oil",
            "Salt",
        ],
    ),
    (
        "egg fried rice",
        &[
            "Eggs (Dozen)",
            "Basmati Rice",
            "Onion",
            "Bell Pepper",
            "Salt",
            "Sunflower Oil",
            "Chilli Powder",
        ],
    ),
    (
        "chicken fried rice",
        &[
            "Chicken",
            "Basmati Rice",
            "Onion",
            "Bell Pepper",
            "Salt",
            "Sunflower Oil",
            "Chilli Powder",
        ],
    ),
    (
        "vegetable fried rice",
        &[
            "Basmati Rice",
            "Onion",
            "Bell Pepper",
            "Carrot",
            "Salt",
            "Sunflower Oil",
            "Chilli Powder",
        ],
    ),
];

/// Finds the recipe whose key appears in the lowercased message, preferring
/// longer keys so "paneer curry" wins over any shorter overlapping key.
pub fn find_recipe(lower_msg: &str) -> Option<Recipe> {
    let mut keys: Vec<Recipe> = RECIPES.to_vec();
    keys.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    keys.into_iter().find(|(key, _)| lower_msg.contains(key))
}
