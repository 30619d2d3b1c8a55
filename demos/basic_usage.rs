//! Basic usage of the inventory client against a simulated backend.
//!
//! Run with: cargo run --example basic_usage

use inventory_kit::{
    error::Result, transport::Transport, Error, InMemoryBackend, InventoryService,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Mutex;

/// Simulated backend holding stock counts in memory.
struct SimulatedBackend {
    stock: Mutex<HashMap<String, u64>>,
}

impl SimulatedBackend {
    fn new() -> Self {
        let stock = HashMap::from([("Widget".to_string(), 5), ("Gadget".to_string(), 1)]);
        SimulatedBackend {
            stock: Mutex::new(stock),
        }
    }

    fn answer(&self, params: &[(&str, &str)]) -> Value {
        let action = params
            .iter()
            .find(|(name, _)| *name == "action")
            .map(|(_, value)| *value)
            .unwrap_or_default();
        let stock = self.stock.lock().expect("stock lock poisoned");

        match action {
            "getCases" => json!(["Case A"]),
            "getComponents" => json!(stock.keys().collect::<Vec<_>>()),
            "getUserHoldings" => json!([]),
            "getLiveStock" => json!(stock
                .iter()
                .map(|(component, count)| json!({"component": component, "stock": count}))
                .collect::<Vec<_>>()),
            _ => Value::Null,
        }
    }

    fn apply(&self, body: Value) -> Value {
        let component = body["component"].as_str().unwrap_or_default().to_string();
        let quantity = body["quantity"].as_u64().unwrap_or_default();
        let mut stock = self.stock.lock().expect("stock lock poisoned");
        let count = stock.entry(component).or_insert(0);

        match body["action"].as_str() {
            Some("borrow") if *count < quantity => json!({"error": "Not enough stock available"}),
            Some("borrow") => {
                *count -= quantity;
                json!({"success": true})
            }
            Some("return") => {
                *count += quantity;
                json!({"success": true})
            }
            _ => json!({"error": "Unknown action"}),
        }
    }
}

impl Transport for SimulatedBackend {
    async fn get<T>(&self, params: &[(&str, &str)]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        println!("  [NET] GET {:?}", params);
        Ok(serde_json::from_value(self.answer(params))?)
    }

    async fn post<B, T>(&self, body: &B) -> Result<T>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body).map_err(|e| Error::Serialization(e.to_string()))?;
        println!("  [NET] POST {}", body);
        Ok(serde_json::from_value(self.apply(body))?)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let service = InventoryService::new(InMemoryBackend::new(), SimulatedBackend::new());

    println!("=== First read: goes to the backend ===");
    println!("{:?}", service.get_live_stock().await?);

    println!("\n=== Second read: served from cache ===");
    println!("{:?}", service.get_live_stock().await?);

    println!("\n=== Borrow 2x Widget ===");
    let outcome = service.borrow("u1", "Case A", "Widget", 2).await?;
    println!("{}", outcome.message);

    println!("\n=== Read after borrow: cache was evicted ===");
    println!("{:?}", service.get_live_stock().await?);

    println!("\n=== Borrow 3x Gadget: refused, cache kept ===");
    let outcome = service.borrow("u1", "Case A", "Gadget", 3).await?;
    println!("success={} message={}", outcome.success, outcome.message);
    println!("{:?}", service.get_live_stock().await?);

    println!("\n=== Invalid quantity never reaches the backend ===");
    match service.return_item("u1", "Widget", 1.5).await {
        Err(e) => println!("{}", e),
        Ok(outcome) => println!("unexpected: {:?}", outcome),
    }

    Ok(())
}
