//! 产品数据模型

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::core::error::CoreError;

/// 产品记录
///
/// `price` 保留原始 JSON 数字，`500` 不会被写成 `500.0`。
/// 通过合并写入的未知字段保存在 `extra` 中，并随集合一起持久化。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub price: Number,
    #[serde(rename = "inStock")]
    pub in_stock: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Product {
    pub fn new(id: u64, name: impl Into<String>, price: impl Into<Number>, in_stock: bool) -> Self {
        Self {
            id,
            name: name.into(),
            price: price.into(),
            in_stock,
            extra: Map::new(),
        }
    }

    /// 将请求体中的每个字段浅合并到当前记录上
    ///
    /// `id` 也可以被覆盖。合并结果若不再是合法的产品记录则返回错误，原记录保持不变。
    pub fn merged(&self, patch: &Map<String, Value>) -> Result<Product, serde_json::Error> {
        let mut fields = match serde_json::to_value(self)? {
            Value::Object(fields) => fields,
            _ => Map::new(),
        };
        for (key, value) in patch {
            fields.insert(key.clone(), value.clone());
        }
        serde_json::from_value(Value::Object(fields))
    }
}

/// 创建产品请求（已通过类型检查）
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub price: Number,
    pub in_stock: bool,
}

impl NewProduct {
    /// 从任意 JSON 请求体中提取 `name`、`price`、`inStock`
    ///
    /// `name` 必须是非空字符串，`price` 必须是数字，`inStock` 必须是布尔值；多余字段被忽略。
    pub fn from_body(body: &Value) -> Result<Self, CoreError> {
        let name = match body.get("name") {
            Some(Value::String(name)) if !name.is_empty() => name.clone(),
            _ => return Err(CoreError::InvalidInput),
        };
        let price = match body.get("price") {
            Some(Value::Number(price)) => price.clone(),
            _ => return Err(CoreError::InvalidInput),
        };
        let in_stock = match body.get("inStock") {
            Some(Value::Bool(in_stock)) => *in_stock,
            _ => return Err(CoreError::InvalidInput),
        };

        Ok(Self {
            name,
            price,
            in_stock,
        })
    }

    pub fn into_product(self, id: u64) -> Product {
        Product::new(id, self.name, self.price, self.in_stock)
    }
}

/// 数据文件首次创建时写入的种子数据
pub fn seed_products() -> Vec<Product> {
    vec![
        Product::new(1, "Laptop", 60000, true),
        Product::new(2, "Mouse", 800, true),
    ]
}

/// 下一个可用 id：现有最大 id + 1，空集合时为 1
pub fn next_id(products: &[Product]) -> u64 {
    products
        .iter()
        .map(|p| p.id)
        .max()
        .map_or(1, |max| max.saturating_add(1))
}
