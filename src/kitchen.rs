use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;
use crate::{error::CookError, model::*, recipe::recipe_for};


// What the player drops onto an appliance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragSource {
    Ingredient(Food),
    Prepared(PreparedId),
}

// Successful drop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CookOutcome {
    // A bun placed on the assembly station, waiting for a patty
    Staged { id: PreparedId, food: Food },
    // A recipe ran and put its result on the counter
    Cooked { id: PreparedId, food: Food },
}

// The appliances plus the counter of prepared items
#[derive(Debug, Clone)]
pub struct Kitchen {
    counter: Vec<PreparedItem>,
    next_id: u32,
    prepared_ttl: Duration,
}


impl Kitchen {
    pub fn new(prepared_ttl: Duration) -> Self {
        Self {
            counter: Vec::new(),
            next_id: 0,
            prepared_ttl,
        }
    }

    pub fn counter(&self) -> &[PreparedItem] {
        &self.counter
    }

    pub fn get(&self, id: PreparedId) -> Option<&PreparedItem> {
        self.counter.iter().find(|item| item.id == id)
    }

    // Empty the counter and restart numbering
    pub fn clear(&mut self) {
        self.counter.clear();
        self.next_id = 0;
    }

    // Put a freshly made item on the counter
    pub fn add_prepared(&mut self, food: Food, now: Instant) -> PreparedId {
        self.next_id += 1;
        let id = PreparedId(self.next_id);
        let expires_at = food.auto_expires().then(|| now + self.prepared_ttl);
        self.counter.push(PreparedItem {
            id,
            food,
            expires_at,
        });
        id
    }

    pub fn remove_prepared(&mut self, id: PreparedId) -> Option<PreparedItem> {
        let idx = self.counter.iter().position(|item| item.id == id)?;
        Some(self.counter.remove(idx))
    }

    // Consume the oldest item of the given kind
    pub fn take_first(&mut self, food: Food) -> Option<PreparedItem> {
        let idx = self.counter.iter().position(|item| item.food == food)?;
        Some(self.counter.remove(idx))
    }

    // Drop everything whose shelf life ran out
    pub fn expire(&mut self, now: Instant) -> Vec<PreparedItem> {
        let (expired, kept): (Vec<_>, Vec<_>) = self
            .counter
            .drain(..)
            .partition(|item| item.expires_at.is_some_and(|at| at <= now));
        self.counter = kept;
        for item in &expired {
            debug!(id = %item.id, food = %item.food, "prepared item expired");
        }
        expired
    }

    // Run a drop of `source` onto `appliance`; nothing is consumed on failure
    pub fn process_drop(
        &mut self,
        source: DragSource,
        appliance: Appliance,
        now: Instant,
    ) -> Result<CookOutcome, CookError> {
        let (food, dropped) = match source {
            DragSource::Ingredient(food) => {
                if !food.is_raw() {
                    return Err(CookError::NotAnIngredient(food));
                }
                (food, None)
            }
            DragSource::Prepared(id) => {
                let item = self.get(id).ok_or(CookError::UnknownPrepared(id))?;
                if !item.food.is_movable() {
                    return Err(CookError::NotMovable(item.food));
                }
                (item.food, Some(id))
            }
        };

        if food == Food::Bun && dropped.is_none() && appliance == Appliance::AssemblyStation {
            let id = self.add_prepared(Food::Bun, now);
            return Ok(CookOutcome::Staged { id, food: Food::Bun });
        }

        let recipe = match recipe_for(food) {
            Some(recipe) if recipe.appliance == appliance => recipe,
            _ => return Err(CookError::InvalidCombination { food, appliance }),
        };

        if let Some(needed) = recipe.requires {
            if self.take_first(needed).is_none() {
                return Err(CookError::MissingPrerequisite { needed, food });
            }
        }
        if let Some(id) = dropped {
            self.remove_prepared(id);
        }

        let id = self.add_prepared(recipe.result, now);
        debug!(%food, %appliance, result = %recipe.result, %id, "cooked");
        Ok(CookOutcome::Cooked { id, food: recipe.result })
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_millis(2500);

    fn foods(kitchen: &Kitchen) -> Vec<Food> {
        kitchen.counter().iter().map(|item| item.food).collect()
    }

    #[test]
    fn patty_on_grill_makes_cooked_patty() {
        let mut kitchen = Kitchen::new(TTL);
        let now = Instant::now();
        let outcome = kitchen
            .process_drop(DragSource::Ingredient(Food::Patty), Appliance::Grill, now)
            .unwrap();
        assert_eq!(outcome, CookOutcome::Cooked { id: PreparedId(1), food: Food::CookedPatty });
        assert_eq!(foods(&kitchen), vec![Food::CookedPatty]);
        assert!(kitchen.get(PreparedId(1)).unwrap().expires_at.is_none());
    }

    #[test]
    fn wrong_appliance_is_rejected() {
        let mut kitchen = Kitchen::new(TTL);
        let err = kitchen
            .process_drop(DragSource::Ingredient(Food::Potatoes), Appliance::Grill, Instant::now())
            .unwrap_err();
        assert_eq!(err.to_string(), "Cannot use potatoes on grill!");
        assert!(kitchen.counter().is_empty());
    }

    #[test]
    fn bun_is_staged_on_assembly_station_only() {
        let mut kitchen = Kitchen::new(TTL);
        let now = Instant::now();
        let outcome = kitchen
            .process_drop(DragSource::Ingredient(Food::Bun), Appliance::AssemblyStation, now)
            .unwrap();
        assert_eq!(outcome, CookOutcome::Staged { id: PreparedId(1), food: Food::Bun });
        assert!(kitchen.get(PreparedId(1)).unwrap().expires_at.is_none());

        let err = kitchen
            .process_drop(DragSource::Ingredient(Food::Bun), Appliance::Grill, now)
            .unwrap_err();
        assert_eq!(err, CookError::InvalidCombination { food: Food::Bun, appliance: Appliance::Grill });
    }

    #[test]
    fn assembly_without_bun_consumes_nothing() {
        let mut kitchen = Kitchen::new(TTL);
        let now = Instant::now();
        kitchen
            .process_drop(DragSource::Ingredient(Food::Patty), Appliance::Grill, now)
            .unwrap();
        let err = kitchen
            .process_drop(DragSource::Prepared(PreparedId(1)), Appliance::AssemblyStation, now)
            .unwrap_err();
        assert_eq!(err.to_string(), "Need bun for cooked patty!");
        assert_eq!(foods(&kitchen), vec![Food::CookedPatty]);
    }

    #[test]
    fn assembly_with_bun_consumes_both() {
        let mut kitchen = Kitchen::new(TTL);
        let now = Instant::now();
        kitchen
            .process_drop(DragSource::Ingredient(Food::Patty), Appliance::Grill, now)
            .unwrap();
        kitchen
            .process_drop(DragSource::Ingredient(Food::Bun), Appliance::AssemblyStation, now)
            .unwrap();
        let outcome = kitchen
            .process_drop(DragSource::Prepared(PreparedId(1)), Appliance::AssemblyStation, now)
            .unwrap();
        assert_eq!(outcome, CookOutcome::Cooked { id: PreparedId(3), food: Food::Burger });
        assert_eq!(foods(&kitchen), vec![Food::Burger]);
    }

    #[test]
    fn only_movable_items_leave_the_counter() {
        let mut kitchen = Kitchen::new(TTL);
        let now = Instant::now();
        kitchen
            .process_drop(DragSource::Ingredient(Food::Cup), Appliance::DrinkMachine, now)
            .unwrap();
        let err = kitchen
            .process_drop(DragSource::Prepared(PreparedId(1)), Appliance::AssemblyStation, now)
            .unwrap_err();
        assert_eq!(err, CookError::NotMovable(Food::Drink));

        let err = kitchen
            .process_drop(DragSource::Prepared(PreparedId(9)), Appliance::Grill, now)
            .unwrap_err();
        assert_eq!(err, CookError::UnknownPrepared(PreparedId(9)));

        let err = kitchen
            .process_drop(DragSource::Ingredient(Food::CookedPatty), Appliance::AssemblyStation, now)
            .unwrap_err();
        assert_eq!(err, CookError::NotAnIngredient(Food::CookedPatty));
    }

    #[test]
    fn finished_products_expire_after_ttl() {
        let mut kitchen = Kitchen::new(TTL);
        let now = Instant::now();
        kitchen.add_prepared(Food::Fries, now);
        kitchen.add_prepared(Food::Bun, now);
        kitchen.add_prepared(Food::CookedPatty, now);

        assert!(kitchen.expire(now + Duration::from_millis(2499)).is_empty());
        let expired = kitchen.expire(now + TTL);
        assert_eq!(expired.len(), 1);
        assert_eq!(expired[0].food, Food::Fries);
        assert_eq!(foods(&kitchen), vec![Food::Bun, Food::CookedPatty]);
    }

    #[test]
    fn clear_restarts_numbering() {
        let mut kitchen = Kitchen::new(TTL);
        let now = Instant::now();
        kitchen.add_prepared(Food::Bun, now);
        kitchen.clear();
        assert_eq!(kitchen.add_prepared(Food::Bun, now), PreparedId(1));
    }
}
