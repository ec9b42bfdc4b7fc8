// Commerce Model
// Live-shopping inventory and the product currently pushed on air

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductStatus {
    Available,
    LowStock,
    SoldOut,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommerceProduct {
    pub id: String,
    pub name: String,
    /// Display price, already formatted
    pub price: String,
    pub stock: u32,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variants: Option<Vec<String>>,
    pub status: ProductStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommerceState {
    pub inventory: Vec<CommerceProduct>,
    pub active_product_id: Option<String>,
    pub total_viewers: u32,
    pub orders: u32,
}

impl CommerceState {
    /// The product currently pushed on air, if it exists in inventory
    pub fn active_product(&self) -> Option<&CommerceProduct> {
        let id = self.active_product_id.as_deref()?;
        self.inventory.iter().find(|p| p.id == id)
    }
}

fn product(
    id: &str,
    name: &str,
    price: &str,
    stock: u32,
    description: &str,
    variants: &[&str],
    status: ProductStatus,
) -> CommerceProduct {
    CommerceProduct {
        id: id.to_string(),
        name: name.to_string(),
        price: price.to_string(),
        stock,
        description: description.to_string(),
        variants: (!variants.is_empty()).then(|| variants.iter().map(|v| v.to_string()).collect()),
        status,
        image: None,
    }
}

/// Inventory loaded when no shop is connected
pub fn demo_products() -> Vec<CommerceProduct> {
    vec![
        product("p1", "Pro Jersey 2025", "$89.99", 150, "Official Team Jersey, Authentic Fit.", &["S", "M", "L", "XL"], ProductStatus::Available),
        product("p2", "Snapback Cap", "$29.99", 12, "Adjustable size, team logo.", &["Black", "Red"], ProductStatus::LowStock),
        product("p3", "Signed Ball", "$199.99", 0, "Limited Edition signed by captain.", &[], ProductStatus::SoldOut),
        product("p4", "Season Pass", "$299.00", 1000, "All access pass for next season.", &[], ProductStatus::Available),
    ]
}
