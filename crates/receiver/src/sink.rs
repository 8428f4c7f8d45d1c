//! Saída do receptor – renderização dos eventos no console.
//!
//! O sink recebe três tipos de evento do loop de ingestão: registro
//! decodificado, falha classificada e snapshot periódico de status.

use crate::ingest::LinkFailure;
use sensor_core::stats::StatusSnapshot;
use sensor_core::types::{EnvironmentalData, Measurement, MotionData, SensorRecord};
use tracing::error;

/// Destino dos eventos produzidos pelo loop de ingestão.
pub trait EventSink {
    /// Registro decodificado com sucesso.
    fn record(&mut self, record: &SensorRecord);
    /// Falha classificada (CRC, recepção ou payload malformado).
    fn failure(&mut self, failure: &LinkFailure);
    /// Relatório periódico de status.
    fn status(&mut self, snapshot: &StatusSnapshot);
}

/// Sink padrão: relatórios formatados no stdout, diagnósticos no log.
pub struct ConsoleSink;

impl EventSink for ConsoleSink {
    fn record(&mut self, record: &SensorRecord) {
        match &record.measurement {
            Measurement::Environmental(data) => print_environmental(data, record),
            Measurement::Motion(data) => print_motion(data, record),
        }
    }

    fn failure(&mut self, failure: &LinkFailure) {
        error!("ERRO: {failure}");
        if let LinkFailure::Malformed(malformed) = failure {
            // Eco verbatim do payload que não casou com schema algum
            error!("Dados brutos: {}", malformed.raw_text());
        }
    }

    fn status(&mut self, snapshot: &StatusSnapshot) {
        println!("--- STATUS ---");
        println!("Pacotes recebidos: {}", snapshot.received);
        println!("Erros: {}", snapshot.errors);
        println!("Taxa de sucesso: {:.1}%", snapshot.success_rate);
        println!("Aguardando próximo pacote...\n");
    }
}

fn print_environmental(data: &EnvironmentalData, record: &SensorRecord) {
    println!("\n=== DADOS SENSORES RECEBIDOS ===");
    println!("Luminosidade: {} lux", data.lux);
    println!("Temperatura: {:.1}°C", data.temperature);
    println!("Umidade: {:.1}%", data.humidity);
    println!("Qualidade do sinal:");
    println!("  RSSI: {} dBm | SNR: {} dB", record.link.rssi, record.link.snr);
    println!("Interpretação:");
    println!("  Luminosidade: {}", lux_band(data.lux));
    println!("  Temperatura: {}", temperature_band(data.temperature));
    println!("  Umidade: {}", humidity_band(data.humidity));
    println!("===============================\n");
}

fn print_motion(data: &MotionData, record: &SensorRecord) {
    let (ax, ay, az) = data.accel;
    let (gx, gy, gz) = data.gyro;
    println!("\n=== DADOS MOVIMENTO RECEBIDOS ===");
    println!("Aceleração: Ax={ax} Ay={ay} Az={az}");
    println!("Giroscópio: Gx={gx} Gy={gy} Gz={gz}");
    println!("Qualidade do sinal:");
    println!("  RSSI: {} dBm | SNR: {} dB", record.link.rssi, record.link.snr);
    println!("=================================\n");
}

// ──────────────────────────────────────────────
// Faixas de interpretação
// ──────────────────────────────────────────────

// Limiares fixos, ajustados no código para o ambiente de implantação
// original. São política de apresentação, não fazem parte do contrato de
// decodificação.

pub fn lux_band(lux: u16) -> &'static str {
    if lux < 10 {
        "Muito escuro"
    } else if lux < 100 {
        "Escuro"
    } else if lux < 1000 {
        "Ambiente interno"
    } else if lux < 10000 {
        "Ambiente claro"
    } else {
        "Muito claro/Sol direto"
    }
}

pub fn temperature_band(celsius: f32) -> &'static str {
    if celsius < 15.0 {
        "Frio"
    } else if celsius < 25.0 {
        "Agradável"
    } else if celsius < 35.0 {
        "Quente"
    } else {
        "Muito quente"
    }
}

pub fn humidity_band(percent: f32) -> &'static str {
    if percent < 30.0 {
        "Seco"
    } else if percent < 60.0 {
        "Confortável"
    } else if percent < 80.0 {
        "Úmido"
    } else {
        "Muito úmido"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lux_band_boundaries() {
        assert_eq!(lux_band(0), "Muito escuro");
        assert_eq!(lux_band(9), "Muito escuro");
        assert_eq!(lux_band(10), "Escuro");
        assert_eq!(lux_band(99), "Escuro");
        assert_eq!(lux_band(100), "Ambiente interno");
        assert_eq!(lux_band(999), "Ambiente interno");
        assert_eq!(lux_band(1000), "Ambiente claro");
        assert_eq!(lux_band(9999), "Ambiente claro");
        assert_eq!(lux_band(10000), "Muito claro/Sol direto");
        assert_eq!(lux_band(u16::MAX), "Muito claro/Sol direto");
    }

    #[test]
    fn temperature_band_boundaries() {
        assert_eq!(temperature_band(-5.0), "Frio");
        assert_eq!(temperature_band(14.9), "Frio");
        assert_eq!(temperature_band(15.0), "Agradável");
        assert_eq!(temperature_band(24.9), "Agradável");
        assert_eq!(temperature_band(25.0), "Quente");
        assert_eq!(temperature_band(34.9), "Quente");
        assert_eq!(temperature_band(35.0), "Muito quente");
    }

    #[test]
    fn humidity_band_boundaries() {
        assert_eq!(humidity_band(0.0), "Seco");
        assert_eq!(humidity_band(29.9), "Seco");
        assert_eq!(humidity_band(30.0), "Confortável");
        assert_eq!(humidity_band(59.9), "Confortável");
        assert_eq!(humidity_band(60.0), "Úmido");
        assert_eq!(humidity_band(79.9), "Úmido");
        assert_eq!(humidity_band(80.0), "Muito úmido");
    }
}
