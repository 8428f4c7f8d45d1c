//! # Receptor LoRa
//!
//! Recebe payloads texto dos nós sensores via LoRa, decodifica nos
//! schemas registrados e mantém estatísticas de entrega com relatório
//! periódico de status no console.
//!
//! ## Uso
//! ```bash
//! lora_receiver        # rádio simulado (desenvolvimento sem hardware)
//! ```

mod ingest;
mod radio;
mod sim;
mod sink;

use ingest::IngestLoop;
use radio::{LoraRadio, check_chip_version};
use sensor_core::config::ReceiverConfig;
use sensor_core::schema::SchemaRegistry;
use sim::SimulatedRadio;
use sink::ConsoleSink;
use tracing::{error, info, warn};

fn main() {
    // ── Logging ──
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // ── Config ──
    let config_path = ReceiverConfig::default_path();
    let config = ReceiverConfig::load(&config_path);

    // Salva config padrão se não existir
    if !config_path.exists() {
        if let Err(e) = config.save(&config_path) {
            warn!("Não foi possível salvar config padrão: {e}");
        }
    }

    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            error!("Config inválida: {e}");
        }
        std::process::exit(1);
    }

    // ── Rádio ──
    let mut radio = SimulatedRadio::new();
    let version = radio.init();
    info!("LoRa inicializado. Versão do chip = 0x{version:02X}");

    if let Err(e) = check_chip_version(version) {
        error!("ERRO: {e}");
        error!("Verifique as conexões SPI.");
        std::process::exit(1);
    }

    // ── Schemas ──
    // Registrados uma vez no startup; imutáveis depois que o loop começa
    let registry = SchemaRegistry::with_default_schemas();

    // ── Banner ──
    println!();
    println!("══════════════════════════════════════════════");
    println!("   📡 RECEPTOR LORA SENSORES – ATIVO");
    println!("══════════════════════════════════════════════");
    println!("  Frequência: {} MHz", config.frequency_mhz);
    println!(
        "  Schemas:    {}",
        registry.names().collect::<Vec<_>>().join(", ")
    );
    println!("  Poll:       {} ms", config.poll_interval_ms);
    println!("══════════════════════════════════════════════");
    println!("  Pressione Ctrl+C para sair.");
    println!();

    // ── Loop principal ──
    let mut sink = ConsoleSink;
    let mut service = IngestLoop::new(registry, &config);
    service.run(&mut radio, &mut sink);
}
