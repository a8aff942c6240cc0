use std::time::Duration;
use tokio::time::Instant;
use crate::model::{Food, Order, OrderId};


// Result of handing a prepared item to the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Claim {
    pub order: OrderId,
    pub completed: bool,
}

// Active orders in creation order
#[derive(Debug, Clone)]
pub struct OrderBoard {
    orders: Vec<Order>,
    next_id: u32,
    max_orders: usize,
    time_limit: Duration,
}


impl OrderBoard {
    pub fn new(max_orders: usize, time_limit: Duration) -> Self {
        Self {
            orders: Vec::new(),
            next_id: 0,
            max_orders,
            time_limit,
        }
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn get(&self, id: OrderId) -> Option<&Order> {
        self.orders.iter().find(|order| order.id == id)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.orders.len() >= self.max_orders
    }

    pub fn clear(&mut self) {
        self.orders.clear();
        self.next_id = 0;
    }

    // Open a new order unless the board is full
    pub fn spawn(&mut self, items: Vec<Food>, now: Instant) -> Option<OrderId> {
        if self.is_full() {
            return None;
        }
        self.next_id += 1;
        let id = OrderId(self.next_id);
        self.orders.push(Order::new(id, items, now, self.time_limit));
        Some(id)
    }

    // Give `food` to the oldest order still needing it; one item fills one slot
    pub fn claim(&mut self, food: Food) -> Option<Claim> {
        let order = self.orders.iter_mut().find(|order| order.needs(food))?;
        order.fulfil(food);
        Some(Claim {
            order: order.id,
            completed: order.is_complete(),
        })
    }

    pub fn remove(&mut self, id: OrderId) -> Option<Order> {
        let idx = self.orders.iter().position(|order| order.id == id)?;
        Some(self.orders.remove(idx))
    }

    // Take out every order whose time ran out
    pub fn expire(&mut self, now: Instant) -> Vec<Order> {
        let (expired, active): (Vec<_>, Vec<_>) = self
            .orders
            .drain(..)
            .partition(|order| order.is_expired(now));
        self.orders = active;
        expired
    }
}
