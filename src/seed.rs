//! Development seed data: two branches, four floors each, rack categories per
//! floor and a full grocery catalog covering every recipe ingredient. Runs
//! only against an empty database.

use crate::errors::ServiceError;
use crate::services::catalog::{
    CatalogService, CreateBranchInput, CreateFloorInput, CreateItemInput, CreateRackInput,
    CreateUserInput,
};
use crate::entities::user;
use rand::Rng;
use tracing::info;

const FLOOR_NAMES: [&str; 4] = ["Ground Floor", "1st Floor", "2nd Floor", "3rd Floor"];

const RACK_CATEGORIES: [[&str; 4]; 4] = [
    ["Vegetables", "Fruits", "Spices", "Rice & Grains"],
    ["Snacks", "Chocolates", "Soft Drinks", "Milk Products"],
    ["Soaps", "Cosmetics", "Baby Care", "Cleaning"],
    ["Stationery", "Non-veg", "Oils", "Miscellaneous"],
];

const SAMPLE_ITEMS: &[(&str, &[(&str, f64)])] = &[
    (
        "Vegetables",
        &[
            ("Tomato", 30.0),
            ("Potato", 20.0),
            ("Onion", 25.0),
            ("Carrot", 35.0),
            ("Cabbage", 15.0),
            ("Broccoli", 50.0),
            ("Spinach", 28.0),
            ("Bell Pepper", 45.0),
            ("Cauliflower", 40.0),
            ("Cucumber", 22.0),
        ],
    ),
    (
        "Fruits",
        &[
            ("Apple", 80.0),
            ("Banana", 40.0),
            ("Orange", 60.0),
            ("Mango", 100.0),
            ("Grapes", 120.0),
            ("Watermelon", 80.0),
            ("Pineapple", 90.0),
            ("Papaya", 50.0),
            ("Lemon", 35.0),
            ("Guava", 55.0),
        ],
    ),
    (
        "Spices",
        &[
            ("Turmeric Powder", 200.0),
            ("Chilli Powder", 150.0),
            ("Garam Masala", 250.0),
            ("Sugar", 40.0),
            ("Salt", 20.0),
            ("Cumin Seeds", 180.0),
            ("Black Pepper", 220.0),
            ("Coriander Powder", 120.0),
            ("Cardamom", 400.0),
            ("Fenugreek", 180.0),
        ],
    ),
    (
        "Rice & Grains",
        &[
            ("Basmati Rice", 300.0),
            ("Sona Masoori Rice", 250.0),
            ("Wheat Flour", 60.0),
            ("Oats", 120.0),
            ("Corn Flakes", 180.0),
            ("Brown Rice", 220.0),
            ("Ragi Flour", 90.0),
            ("Chickpea Flour", 110.0),
            ("Millet", 150.0),
            ("Semolina", 70.0),
        ],
    ),
    (
        "Snacks",
        &[
            ("Lays Chips", 35.0),
            ("Kurkure", 20.0),
            ("Pringles", 100.0),
            ("Biscuits", 50.0),
            ("Nachos", 60.0),
            ("Cheetos", 30.0),
            ("Mixed Nuts", 280.0),
            ("Popcorn", 40.0),
            ("Wafers", 55.0),
            ("Granola Bars", 80.0),
        ],
    ),
    (
        "Chocolates",
        &[
            ("Dairy Milk", 70.0),
            ("KitKat", 50.0),
            ("Munch", 15.0),
            ("Snickers", 60.0),
            ("5 Star", 25.0),
            ("Toblerone", 100.0),
            ("Cadbury Silk", 120.0),
            ("Ferrero Rocher", 150.0),
            ("Bounty", 40.0),
            ("Mars Bar", 45.0),
        ],
    ),
    (
        "Soft Drinks",
        &[
            ("Coca Cola", 50.0),
            ("Sprite", 50.0),
            ("Pepsi", 50.0),
            ("Fanta", 50.0),
            ("Mountain Dew", 50.0),
            ("Thums Up", 50.0),
            ("7UP", 50.0),
            ("Limca", 50.0),
            ("Orange Juice", 70.0),
            ("Apple Juice", 80.0),
        ],
    ),
    (
        "Milk Products",
        &[
            ("Fresh Milk", 50.0),
            ("Curd", 60.0),
            ("Butter", 400.0),
            ("Cheese", 350.0),
            ("Paneer", 300.0),
            ("Ghee", 500.0),
            ("Ice Cream", 120.0),
            ("Yogurt", 80.0),
            ("Condensed Milk", 150.0),
            ("Evaporated Milk", 130.0),
        ],
    ),
    (
        "Soaps",
        &[
            ("Dove Soap", 60.0),
            ("Lux Soap", 40.0),
            ("Dettol Soap", 50.0),
            ("Lifebuoy Soap", 35.0),
            ("Pears Soap", 70.0),
            ("Cinthol Soap", 45.0),
            ("Medimix Soap", 55.0),
            ("Neem Soap", 50.0),
            ("Sandal Soap", 65.0),
            ("Aloe Vera Soap", 55.0),
        ],
    ),
    (
        "Cosmetics",
        &[
            ("Shampoo", 150.0),
            ("Conditioner", 180.0),
            ("Face Cream", 350.0),
            ("Body Lotion", 250.0),
            ("Sunscreen", 400.0),
            ("Face Wash", 200.0),
            ("Moisturizer", 320.0),
            ("Deodorant", 280.0),
            ("Hair Oil", 220.0),
            ("Lip Balm", 100.0),
        ],
    ),
    (
        "Baby Care",
        &[
            ("Baby Diapers", 600.0),
            ("Baby Powder", 150.0),
            ("Baby Oil", 200.0),
            ("Baby Wipes", 250.0),
            ("Baby Lotion", 280.0),
            ("Baby Soap", 180.0),
            ("Baby Shampoo", 220.0),
            ("Feeding Bottle", 350.0),
            ("Baby Food", 200.0),
            ("Baby Cereal", 180.0),
        ],
    ),
    (
        "Cleaning",
        &[
            ("Floor Cleaner", 120.0),
            ("Dish Soap", 80.0),
            ("Toilet Cleaner", 100.0),
            ("Glass Cleaner", 140.0),
            ("Mop", 350.0),
            ("Broom", 150.0),
            ("Air Freshener", 200.0),
            ("Detergent Powder", 250.0),
            ("Bleach", 120.0),
            ("Disinfectant", 180.0),
        ],
    ),
    (
        "Stationery",
        &[
            ("Notebook", 50.0),
            ("Pens Pack", 80.0),
            ("Pencils Pack", 40.0),
            ("Eraser", 15.0),
            ("Ruler", 30.0),
            ("Sticky Notes", 35.0),
            ("Pencil Box", 120.0),
            ("School Bag", 800.0),
            ("Copy", 100.0),
            ("Highlighter Pen", 60.0),
        ],
    ),
    (
        "Non-veg",
        &[
            ("Eggs (Dozen)", 100.0),
            ("Chicken", 250.0),
            ("Fish", 300.0),
            ("Mutton", 450.0),
            ("Prawns", 500.0),
            ("Chicken Breast", 280.0),
            ("Salmon Fish", 420.0),
            ("Shrimp", 550.0),
            ("Turkey", 400.0),
            ("Duck", 380.0),
        ],
    ),
    (
        "Oils",
        &[
            ("Sunflower Oil", 200.0),
            ("Groundnut Oil", 250.0),
            ("Coconut Oil", 280.0),
            ("Olive Oil", 600.0),
            ("Mustard Oil", 180.0),
            ("Vegetable Oil", 220.0),
            ("Sesame Oil", 350.0),
            ("Rice Bran Oil", 320.0),
            ("Canola Oil", 200.0),
            ("Soybean Oil", 210.0),
        ],
    ),
    (
        "Miscellaneous",
        &[
            ("Tissue Paper", 40.0),
            ("Garbage Bags", 60.0),
            ("Aluminum Foil", 80.0),
            ("Cling Wrap", 70.0),
            ("Paper Cups", 50.0),
            ("Plastic Containers", 90.0),
            ("Matches Box", 15.0),
            ("Candles", 120.0),
            ("Lightbulb", 80.0),
            ("Batteries", 150.0),
        ],
    ),
];

fn image_url_for(name: &str) -> String {
    let slug = name.to_lowercase().replace(char::is_whitespace, "-");
    format!("https://picsum.photos/seed/{}/400/400", slug)
}

fn items_for_category(category: &str) -> &'static [(&'static str, f64)] {
    SAMPLE_ITEMS
        .iter()
        .find(|(cat, _)| *cat == category)
        .map(|(_, items)| *items)
        .unwrap_or(&[])
}

/// Seeds the multi-branch store layout if no branches exist yet.
pub async fn seed_if_empty(catalog: &CatalogService) -> Result<(), ServiceError> {
    if !catalog.list_branches().await?.is_empty() {
        return Ok(());
    }

    info!("Seeding database with multi-branch data");

    catalog
        .create_user(CreateUserInput {
            username: Some("admin".to_string()),
            password: Some("admin123".to_string()),
            role: user::ROLE_HQ_ADMIN.to_string(),
            branch_id: None,
            name: Some("HQ Administrator".to_string()),
            email: Some("admin@grocery.com".to_string()),
            phone: None,
        })
        .await?;

    let main_branch = catalog
        .create_branch(CreateBranchInput {
            name: "Main Store - Downtown".to_string(),
            address: Some("123 Main Street, Downtown".to_string()),
            is_main_branch: true,
        })
        .await?;

    catalog
        .create_user(CreateUserInput {
            username: Some("manager1".to_string()),
            password: Some("manager123".to_string()),
            role: user::ROLE_BRANCH_MANAGER.to_string(),
            branch_id: Some(main_branch.id),
            name: Some("John Manager".to_string()),
            email: Some("manager1@grocery.com".to_string()),
            phone: None,
        })
        .await?;

    let branch2 = catalog
        .create_branch(CreateBranchInput {
            name: "North Side Store".to_string(),
            address: Some("456 North Avenue".to_string()),
            is_main_branch: false,
        })
        .await?;

    catalog
        .create_user(CreateUserInput {
            username: Some("manager2".to_string()),
            password: Some("manager123".to_string()),
            role: user::ROLE_BRANCH_MANAGER.to_string(),
            branch_id: Some(branch2.id),
            name: Some("Jane Manager".to_string()),
            email: Some("manager2@grocery.com".to_string()),
            phone: None,
        })
        .await?;

    for branch_id in [main_branch.id, branch2.id] {
        for (floor_number, floor_name) in FLOOR_NAMES.iter().enumerate() {
            let floor = catalog
                .create_floor(
                    branch_id,
                    CreateFloorInput {
                        name: floor_name.to_string(),
                        floor_number: floor_number as i32,
                    },
                )
                .await?;

            for (rack_index, category) in RACK_CATEGORIES[floor_number].iter().enumerate() {
                let rack = catalog
                    .create_rack(
                        floor.id,
                        CreateRackInput {
                            name: format!("Rack {}", rack_index + 1),
                            category: Some(category.to_string()),
                        },
                    )
                    .await?;

                for (name, price) in items_for_category(category) {
                    let (discount, stock) = {
                        let mut rng = rand::thread_rng();
                        (rng.gen_range(0..25), 50 + rng.gen_range(0..100))
                    };
                    catalog
                        .create_item(CreateItemInput {
                            name: name.to_string(),
                            description: Some(format!("Fresh {}", name)),
                            category: category.to_string(),
                            price: *price,
                            discount,
                            rack_id: rack.id,
                            image_url: image_url_for(name),
                            stock,
                        })
                        .await?;
                }
            }
        }
    }

    info!("Seeding complete");
    Ok(())
}
