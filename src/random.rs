use rand::{rngs::StdRng, Rng, SeedableRng};
use crate::{model::Food, recipe::ORDER_TEMPLATES};


// Random generation of an order's item list
pub fn random_order_items(rng: &mut impl Rng) -> Vec<Food> {
    let template = ORDER_TEMPLATES[rng.gen_range(0..ORDER_TEMPLATES.len())];
    template.to_vec()
}

// Decide whether a new customer shows up on this roll
pub fn roll_spawn(rng: &mut impl Rng, chance: f64) -> bool {
    rng.gen_bool(chance.clamp(0.0, 1.0))
}

// Seeded generator for reproducible games, entropy otherwise
pub fn game_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_orders() {
        let mut a = game_rng(Some(42));
        let mut b = game_rng(Some(42));
        for _ in 0..20 {
            assert_eq!(random_order_items(&mut a), random_order_items(&mut b));
        }
    }

    #[test]
    fn orders_come_from_templates() {
        let mut rng = game_rng(Some(7));
        for _ in 0..50 {
            let items = random_order_items(&mut rng);
            assert!(ORDER_TEMPLATES.iter().any(|t| *t == items.as_slice()));
        }
    }

    #[test]
    fn spawn_chance_extremes() {
        let mut rng = game_rng(Some(1));
        assert!((0..100).all(|_| roll_spawn(&mut rng, 1.0)));
        assert!((0..100).all(|_| !roll_spawn(&mut rng, 0.0)));
        assert!(roll_spawn(&mut rng, 3.0));
    }
}
