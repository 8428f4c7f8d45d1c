//! Configuração do receptor via TOML.
//!
//! Um único `config.toml` ao lado do executável; campos ausentes assumem
//! o valor padrão.

use crate::stats::STATUS_INTERVAL_MS;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Configuração do Receptor LoRa.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReceiverConfig {
    /// Frequência do link (MHz) – informativa, exibida no banner
    pub frequency_mhz: u32,
    /// Tamanho máximo de payload aceito do rádio (bytes)
    pub max_packet_len: usize,
    /// Intervalo entre polls do rádio (ms)
    pub poll_interval_ms: u64,
    /// Intervalo entre relatórios de status (ms)
    pub status_interval_ms: u64,
}

impl Default for ReceiverConfig {
    fn default() -> Self {
        Self {
            frequency_mhz: 915,
            max_packet_len: 255,
            poll_interval_ms: 50,
            status_interval_ms: STATUS_INTERVAL_MS,
        }
    }
}

impl ReceiverConfig {
    /// Carrega configuração de um arquivo TOML.
    pub fn load(path: &Path) -> Self {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(content) => match toml::from_str::<ReceiverConfig>(&content) {
                    Ok(config) => {
                        info!("Configuração carregada de {}", path.display());
                        return config;
                    }
                    Err(e) => {
                        warn!("Erro ao parsear {}: {}", path.display(), e);
                    }
                },
                Err(e) => {
                    warn!("Erro ao ler {}: {}", path.display(), e);
                }
            }
        }

        info!("Usando configuração padrão");
        ReceiverConfig::default()
    }

    /// Salva configuração em arquivo TOML.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content = toml::to_string_pretty(self).map_err(|e| e.to_string())?;
        std::fs::write(path, content).map_err(|e| e.to_string())?;
        info!("Configuração salva em {}", path.display());
        Ok(())
    }

    /// Retorna o caminho padrão do config.toml.
    pub fn default_path() -> PathBuf {
        let exe_dir = std::env::current_exe()
            .map(|p| p.parent().unwrap_or(Path::new(".")).to_path_buf())
            .unwrap_or_else(|_| PathBuf::from("."));
        exe_dir.join("config.toml")
    }

    /// Valida a configuração e retorna lista de erros.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.max_packet_len == 0 || self.max_packet_len > 255 {
            errors.push(format!(
                "Payload máximo inválido: {} (1–255)",
                self.max_packet_len
            ));
        }
        if self.poll_interval_ms == 0 || self.poll_interval_ms > 1_000 {
            errors.push(format!(
                "Intervalo de poll inválido: {} ms (1–1000)",
                self.poll_interval_ms
            ));
        }
        if self.status_interval_ms < 1_000 {
            errors.push(format!(
                "Intervalo de status inválido: {} ms (mínimo 1000)",
                self.status_interval_ms
            ));
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = ReceiverConfig::default();
        let errors = config.validate();
        assert!(errors.is_empty(), "Erros: {:?}", errors);
    }

    #[test]
    fn roundtrip_toml() {
        let config = ReceiverConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: ReceiverConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.frequency_mhz, parsed.frequency_mhz);
        assert_eq!(config.status_interval_ms, parsed.status_interval_ms);
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let partial = r#"
poll_interval_ms = 100
"#;
        let config: ReceiverConfig = toml::from_str(partial).unwrap();
        assert_eq!(config.poll_interval_ms, 100);
        // Outros campos devem ter valor padrão
        assert_eq!(config.frequency_mhz, 915);
        assert_eq!(config.max_packet_len, 255);
        assert_eq!(config.status_interval_ms, 30_000);
    }

    #[test]
    fn rejects_out_of_range_values() {
        let config = ReceiverConfig {
            max_packet_len: 0,
            poll_interval_ms: 5_000,
            status_interval_ms: 100,
            ..Default::default()
        };
        assert_eq!(config.validate().len(), 3);
    }
}
