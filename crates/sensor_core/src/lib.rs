//! # Sensor Core
//!
//! Crate compartilhada que define os registros de sensores, os schemas
//! de payload texto, as estatísticas de entrega e a configuração TOML
//! do Receptor LoRa.
//!
//! ## Módulos
//! - [`types`] – Structs dos registros (ambiental, movimento, qualidade do link)
//! - [`schema`] – Registry de schemas e decodificação dos payloads
//! - [`stats`] – Contadores de entrega e relatório periódico de status
//! - [`config`] – Configuração unificada via TOML

pub mod config;
pub mod schema;
pub mod stats;
pub mod types;

// Re-exports convenientes
pub use config::ReceiverConfig;
pub use schema::{MalformedPayload, PayloadSchema, SchemaRegistry};
pub use stats::{LinkStats, StatusReporter, StatusSnapshot};
pub use types::{LinkQuality, Measurement, SensorRecord};
