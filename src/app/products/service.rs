//! 产品业务服务
//!
//! 每个操作都从存储中重新加载完整集合，变更后再整体写回。

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{info, warn};

use super::model::{next_id, NewProduct, Product};
use crate::core::error::CoreError;
use crate::infrastructure::store::ProductStore;

#[derive(Clone)]
pub struct ProductService {
    store: Arc<dyn ProductStore>,
}

impl ProductService {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Result<Vec<Product>, CoreError> {
        Ok(self.store.load()?)
    }

    /// 仅返回有货的产品，保持原有顺序
    pub fn list_in_stock(&self) -> Result<Vec<Product>, CoreError> {
        let mut products = self.store.load()?;
        products.retain(|p| p.in_stock);
        Ok(products)
    }

    pub fn create(&self, body: &Value) -> Result<Product, CoreError> {
        let new_product = NewProduct::from_body(body).map_err(|e| {
            warn!("创建产品请求无效: {}", body);
            e
        })?;

        let mut products = self.store.load()?;
        let product = new_product.into_product(next_id(&products));
        products.push(product.clone());
        self.store.save(&products)?;

        info!("创建产品 {} ({})", product.id, product.name);
        Ok(product)
    }

    /// 将请求体浅合并到指定 id 的产品上
    pub fn update(&self, id: u64, patch: &Map<String, Value>) -> Result<Product, CoreError> {
        let mut products = self.store.load()?;
        let Some(index) = products.iter().position(|p| p.id == id) else {
            warn!("更新失败，产品 {} 不存在", id);
            return Err(CoreError::NotFound);
        };

        let updated = products[index].merged(patch).map_err(|e| {
            warn!("产品 {} 合并后字段类型无效: {}", id, e);
            CoreError::InvalidInput
        })?;
        if updated.id != id {
            warn!("产品 {} 的 id 被改写为 {}", id, updated.id);
        }

        products[index] = updated.clone();
        self.store.save(&products)?;

        info!("更新产品 {}", id);
        Ok(updated)
    }

    pub fn delete(&self, id: u64) -> Result<(), CoreError> {
        let mut products = self.store.load()?;
        let Some(index) = products.iter().position(|p| p.id == id) else {
            warn!("删除失败，产品 {} 不存在", id);
            return Err(CoreError::NotFound);
        };

        let removed = products.remove(index);
        self.store.save(&products)?;

        info!("删除产品 {} ({})", removed.id, removed.name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::store::MemoryStore;
    use serde_json::json;

    fn service() -> (ProductService, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::seeded());
        (ProductService::new(store.clone()), store)
    }

    #[test]
    fn test_create_assigns_next_id() {
        let (service, store) = service();
        let created = service
            .create(&json!({"name": "Keyboard", "price": 500, "inStock": true}))
            .unwrap();

        assert_eq!(created, Product::new(3, "Keyboard", 500, true));
        assert_eq!(store.load().unwrap().last(), Some(&created));
    }

    #[test]
    fn test_create_into_empty_collection_starts_at_one() {
        let store = Arc::new(MemoryStore::default());
        let service = ProductService::new(store);
        let created = service
            .create(&json!({"name": "Cable", "price": 12.5, "inStock": false}))
            .unwrap();
        assert_eq!(created.id, 1);
    }

    #[test]
    fn test_invalid_create_leaves_store_untouched() {
        let (service, store) = service();
        let result = service.create(&json!({"name": "Keyboard", "price": "500", "inStock": true}));

        assert!(matches!(result, Err(CoreError::InvalidInput)));
        assert_eq!(store.load().unwrap().len(), 2);
    }

    #[test]
    fn test_ids_are_not_reused_after_delete_of_middle() {
        let (service, _) = service();
        service.delete(1).unwrap();
        let created = service
            .create(&json!({"name": "Monitor", "price": 9000, "inStock": true}))
            .unwrap();
        assert_eq!(created.id, 3);
    }

    #[test]
    fn test_in_stock_filter_preserves_order() {
        let store = Arc::new(MemoryStore::new(vec![
            Product::new(1, "A", 1, true),
            Product::new(2, "B", 2, false),
            Product::new(3, "C", 3, true),
        ]));
        let service = ProductService::new(store);

        let ids: Vec<u64> = service.list_in_stock().unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_update_merges_and_persists() {
        let (service, store) = service();
        let patch = json!({"price": 999});
        let updated = service.update(2, patch.as_object().unwrap()).unwrap();

        assert_eq!(updated, Product::new(2, "Mouse", 999, true));
        assert_eq!(store.load().unwrap()[1], updated);
    }

    #[test]
    fn test_update_missing_id_is_not_found() {
        let (service, _) = service();
        let result = service.update(42, &Map::new());
        assert!(matches!(result, Err(CoreError::NotFound)));
    }

    #[test]
    fn test_update_may_duplicate_ids() {
        let (service, store) = service();
        let patch = json!({"id": 1});
        service.update(2, patch.as_object().unwrap()).unwrap();

        let ids: Vec<u64> = store.load().unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 1]);
    }

    #[test]
    fn test_update_with_wrong_type_is_rejected() {
        let (service, store) = service();
        let patch = json!({"inStock": "no"});
        let result = service.update(1, patch.as_object().unwrap());

        assert!(matches!(result, Err(CoreError::InvalidInput)));
        assert!(store.load().unwrap()[0].in_stock);
    }

    #[test]
    fn test_delete_twice() {
        let (service, store) = service();
        service.delete(2).unwrap();
        assert!(matches!(service.delete(2), Err(CoreError::NotFound)));
        assert_eq!(store.load().unwrap(), vec![Product::new(1, "Laptop", 60000, true)]);
    }
}
