use crate::model::{Appliance, Food};


// One cooking or assembly step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recipe {
    pub appliance: Appliance,
    pub requires: Option<Food>,
    pub result: Food,
}

// What customers may ask for
pub static ORDER_TEMPLATES: [&[Food]; 5] = [
    &[Food::Burger],
    &[Food::Fries, Food::Drink],
    &[Food::Burger, Food::Fries],
    &[Food::Burger, Food::Fries, Food::Drink],
    &[Food::Drink],
];


// Look up how `food` is processed; buns on the assembly station are staged, not cooked
pub fn recipe_for(food: Food) -> Option<Recipe> {
    let recipe = match food {
        Food::Patty => Recipe {
            appliance: Appliance::Grill,
            requires: None,
            result: Food::CookedPatty,
        },
        Food::Potatoes => Recipe {
            appliance: Appliance::Fryer,
            requires: None,
            result: Food::Fries,
        },
        Food::Cup => Recipe {
            appliance: Appliance::DrinkMachine,
            requires: None,
            result: Food::Drink,
        },
        Food::CookedPatty => Recipe {
            appliance: Appliance::AssemblyStation,
            requires: Some(Food::Bun),
            result: Food::Burger,
        },
        Food::Bun | Food::Fries | Food::Drink | Food::Burger => return None,
    };
    Some(recipe)
}
