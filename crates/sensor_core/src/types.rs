//! Definição de tipos/structs dos registros de sensores.
//!
//! Unifica os dois formatos de payload transmitidos pelos nós LoRa:
//! ambiental (AHT20 + BH1750) e movimento (acelerômetro/giroscópio).

use serde::{Deserialize, Serialize};

// ──────────────────────────────────────────────
// Ambiental
// ──────────────────────────────────────────────

/// Leitura ambiental do nó AHT20 + BH1750.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct EnvironmentalData {
    /// Luminosidade do BH1750 (lux, 0–65535)
    pub lux: u16,
    /// Temperatura do AHT20 (°C)
    pub temperature: f32,
    /// Umidade relativa do AHT20 (%)
    pub humidity: f32,
}

// ──────────────────────────────────────────────
// Movimento
// ──────────────────────────────────────────────

/// Leitura de movimento do nó inercial, em unidades cruas do sensor.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MotionData {
    /// Aceleração nos eixos (x, y, z)
    pub accel: (i16, i16, i16),
    /// Velocidade angular nos eixos (x, y, z)
    pub gyro: (i16, i16, i16),
}

// ──────────────────────────────────────────────
// Registro decodificado
// ──────────────────────────────────────────────

/// Medição decodificada de um payload, uma variante por schema.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum Measurement {
    Environmental(EnvironmentalData),
    Motion(MotionData),
}

/// Qualidade do sinal informada pelo rádio junto com cada pacote.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LinkQuality {
    /// RSSI (dBm)
    pub rssi: i16,
    /// SNR (dB)
    pub snr: i8,
}

/// Registro completo: medição + qualidade do link + instante da decodificação.
///
/// Criado uma única vez por decodificação bem-sucedida; a posse passa do
/// decodificador para o loop de ingestão e daí para o sink de saída.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SensorRecord {
    pub measurement: Measurement,
    pub link: LinkQuality,
    /// Milissegundos desde o boot, capturados no momento da decodificação
    pub timestamp_ms: u64,
}

// ──────────────────────────────────────────────
// Testes
// ──────────────────────────────────────────────
