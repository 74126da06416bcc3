//! 产品集合存储基础设施
//!
//! 每次读取都加载完整集合，每次写入都覆盖完整集合。存储层不加锁，
//! 并发写入时后写者覆盖先写者。

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tracing::{debug, info};

use crate::app::products::model::{seed_products, Product};

/// 存储错误类型
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("数据文件 {path} 读写失败: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("数据文件 {path} 解析失败: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("产品集合序列化失败: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// 产品集合存储接口
pub trait ProductStore: Send + Sync {
    /// 加载完整的产品集合
    fn load(&self) -> Result<Vec<Product>, StoreError>;

    /// 用给定集合覆盖已持久化的内容
    fn save(&self, products: &[Product]) -> Result<(), StoreError>;
}

/// 基于单个 JSON 文件的存储
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 数据文件不存在时写入种子数据；文件已存在时不做任何事，无论其内容如何
    pub fn ensure_initialized(&self) -> Result<(), StoreError> {
        if self.path.exists() {
            return Ok(());
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| self.io_error(source))?;
            }
        }

        let seed = seed_products();
        self.save(&seed)?;
        info!(
            "数据文件 {} 不存在，已写入 {} 条种子数据",
            self.path.display(),
            seed.len()
        );
        Ok(())
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl ProductStore for JsonFileStore {
    fn load(&self) -> Result<Vec<Product>, StoreError> {
        self.ensure_initialized()?;

        let content = fs::read_to_string(&self.path).map_err(|source| self.io_error(source))?;
        let products: Vec<Product> =
            serde_json::from_str(&content).map_err(|source| StoreError::Parse {
                path: self.path.clone(),
                source,
            })?;

        debug!("从 {} 加载了 {} 个产品", self.path.display(), products.len());
        Ok(products)
    }

    fn save(&self, products: &[Product]) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(products)?;
        fs::write(&self.path, content).map_err(|source| self.io_error(source))?;

        debug!("向 {} 写入了 {} 个产品", self.path.display(), products.len());
        Ok(())
    }
}

/// 进程内存储，内容不落盘
#[derive(Debug, Default)]
pub struct MemoryStore {
    products: Mutex<Vec<Product>>,
}

impl MemoryStore {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products: Mutex::new(products),
        }
    }

    /// 以种子数据初始化
    pub fn seeded() -> Self {
        Self::new(seed_products())
    }
}

impl ProductStore for MemoryStore {
    fn load(&self) -> Result<Vec<Product>, StoreError> {
        let products = self.products.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(products.clone())
    }

    fn save(&self, products: &[Product]) -> Result<(), StoreError> {
        let mut stored = self.products.lock().unwrap_or_else(PoisonError::into_inner);
        *stored = products.to_vec();
        Ok(())
    }
}
