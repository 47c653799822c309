//! The player's bounded, slot-based inventory.

use bevy::prelude::*;
use thiserror::Error;

use super::data::ItemId;

/// Errors from inventory operations. The inventory is unchanged on error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    /// A new slot was needed but every slot is taken.
    #[error("inventory is full ({capacity} slots)")]
    Full { capacity: usize },

    #[error("item '{0}' is not in the inventory")]
    NotHeld(ItemId),

    /// The stack would exceed `u32::MAX`.
    #[error("cannot hold any more of '{0}'")]
    StackLimit(ItemId),
}

/// One kind of item and how many of it the player holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventorySlot {
    pub item: ItemId,
    pub quantity: u32,
}

/// Player inventory. Slots are kept in acquisition order.
#[derive(Resource, Debug, Clone)]
pub struct Inventory {
    slots: Vec<InventorySlot>,
    max_slots: usize,
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new(10)
    }
}

impl Inventory {
    pub fn new(max_slots: usize) -> Self {
        Self {
            slots: Vec::new(),
            max_slots,
        }
    }

    /// Add `quantity` of an item, stacking onto an existing slot.
    pub fn add(&mut self, item: &ItemId, quantity: u32) -> Result<(), InventoryError> {
        if quantity == 0 {
            return Ok(());
        }

        if let Some(slot) = self.slot_mut(item) {
            slot.quantity = slot
                .quantity
                .checked_add(quantity)
                .ok_or_else(|| InventoryError::StackLimit(item.clone()))?;
            return Ok(());
        }

        if self.is_full() {
            return Err(InventoryError::Full {
                capacity: self.max_slots,
            });
        }

        self.slots.push(InventorySlot {
            item: item.clone(),
            quantity,
        });
        Ok(())
    }

    /// Remove up to `quantity` of an item. Emptied slots are dropped.
    pub fn remove(&mut self, item: &ItemId, quantity: u32) -> Result<(), InventoryError> {
        let index = self
            .slots
            .iter()
            .position(|slot| &slot.item == item)
            .ok_or_else(|| InventoryError::NotHeld(item.clone()))?;

        let slot = &mut self.slots[index];
        slot.quantity = slot.quantity.saturating_sub(quantity);
        if slot.quantity == 0 {
            self.slots.remove(index);
        }
        Ok(())
    }

    /// Whether at least `quantity` of the item is held.
    pub fn has(&self, item: &ItemId, quantity: u32) -> bool {
        self.quantity_of(item) >= quantity.max(1)
    }

    pub fn quantity_of(&self, item: &ItemId) -> u32 {
        self.slots
            .iter()
            .find(|slot| &slot.item == item)
            .map_or(0, |slot| slot.quantity)
    }

    pub fn slots(&self) -> &[InventorySlot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.max_slots
    }

    pub fn is_full(&self) -> bool {
        self.slots.len() >= self.max_slots
    }

    fn slot_mut(&mut self, item: &ItemId) -> Option<&mut InventorySlot> {
        self.slots.iter_mut().find(|slot| &slot.item == item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(name: &str) -> ItemId {
        ItemId::new(name)
    }

    #[test]
    fn adding_same_item_stacks() {
        let mut inventory = Inventory::new(2);
        inventory.add(&id("letter"), 1).unwrap();
        inventory.add(&id("letter"), 2).unwrap();

        assert_eq!(inventory.len(), 1);
        assert_eq!(inventory.quantity_of(&id("letter")), 3);
    }

    #[test]
    fn add_beyond_capacity_fails_and_changes_nothing() {
        let mut inventory = Inventory::new(2);
        inventory.add(&id("letter"), 1).unwrap();
        inventory.add(&id("parcel"), 1).unwrap();
        let before = inventory.clone();

        let result = inventory.add(&id("coal"), 1);

        assert_eq!(result, Err(InventoryError::Full { capacity: 2 }));
        assert_eq!(inventory.slots(), before.slots());
    }

    #[test]
    fn full_inventory_still_stacks_existing_items() {
        let mut inventory = Inventory::new(1);
        inventory.add(&id("letter"), 1).unwrap();
        assert!(inventory.is_full());
        inventory.add(&id("letter"), 1).unwrap();
        assert_eq!(inventory.quantity_of(&id("letter")), 2);
    }

    #[test]
    fn stacking_past_u32_max_fails_and_changes_nothing() {
        let mut inventory = Inventory::new(2);
        inventory.add(&id("coin"), u32::MAX - 1).unwrap();

        let result = inventory.add(&id("coin"), 2);

        assert_eq!(result, Err(InventoryError::StackLimit(id("coin"))));
        assert_eq!(inventory.quantity_of(&id("coin")), u32::MAX - 1);

        inventory.add(&id("coin"), 1).unwrap();
        assert_eq!(inventory.quantity_of(&id("coin")), u32::MAX);
    }

    #[test]
    fn removing_last_unit_drops_the_slot() {
        let mut inventory = Inventory::new(3);
        inventory.add(&id("letter"), 2).unwrap();

        inventory.remove(&id("letter"), 1).unwrap();
        assert!(inventory.has(&id("letter"), 1));

        inventory.remove(&id("letter"), 1).unwrap();
        assert!(inventory.is_empty());
        assert!(!inventory.has(&id("letter"), 1));
    }

    #[test]
    fn removing_absent_item_is_a_no_op() {
        let mut inventory = Inventory::new(3);
        inventory.add(&id("letter"), 1).unwrap();

        let result = inventory.remove(&id("parcel"), 1);

        assert_eq!(result, Err(InventoryError::NotHeld(id("parcel"))));
        assert_eq!(inventory.len(), 1);
    }

    #[test]
    fn has_checks_minimum_quantity() {
        let mut inventory = Inventory::new(3);
        inventory.add(&id("coal"), 2).unwrap();
        assert!(inventory.has(&id("coal"), 2));
        assert!(!inventory.has(&id("coal"), 3));
    }
}
