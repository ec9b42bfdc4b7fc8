// Commerce Engine
// Inventory and the product pushed to the commerce overlay

use crate::models::{demo_products, CommerceProduct, CommerceState, ProductStatus};

pub struct CommerceEngine {
    state: CommerceState,
}

impl CommerceEngine {
    pub fn new(inventory: Vec<CommerceProduct>) -> Self {
        Self {
            state: CommerceState {
                inventory,
                ..Default::default()
            },
        }
    }

    pub fn state(&self) -> &CommerceState {
        &self.state
    }

    /// Push a product on air (or clear with `None`). Unknown ids are ignored.
    pub fn set_active_product(&mut self, product_id: Option<&str>) -> bool {
        match product_id {
            Some(id) if !self.state.inventory.iter().any(|p| p.id == id) => {
                log::warn!("Unknown product '{}', commerce overlay unchanged", id);
                false
            }
            _ => {
                self.state.active_product_id = product_id.map(str::to_string);
                log::info!("Active product: {:?}", self.state.active_product_id);
                true
            }
        }
    }

    pub fn set_product_status(&mut self, product_id: &str, status: ProductStatus) -> bool {
        match self.state.inventory.iter_mut().find(|p| p.id == product_id) {
            Some(product) => {
                product.status = status;
                true
            }
            None => false,
        }
    }
}

impl Default for CommerceEngine {
    fn default() -> Self {
        Self::new(demo_products())
    }
}
