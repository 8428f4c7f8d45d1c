//! Rádio simulado para desenvolvimento sem o módulo físico.
//!
//! Reproduz o contrato do driver: entrega payloads de exemplo em cadência
//! fixa, com RSSI/SNR sintéticos, um pacote malformado ocasional e falha
//! de CRC injetada periodicamente. Determinístico, dirigido pelo contador
//! de polls.

use crate::radio::{LoraRadio, READ_CRC_ERROR};
use sensor_core::types::LinkQuality;

/// Payloads de exemplo, no formato dos nós transmissores reais.
const SAMPLE_PAYLOADS: &[&[u8]] = &[
    b"Lux: 450, Temperatura: 23.5C Umidade: 55.0%\n",
    b"Ax: 100, Ay: -200, Az: 16000\nGx: 10, Gy: -5, Gz: 3\n",
    b"Lux: 12, Temperatura: 18.2C Umidade: 71.4%\n",
    // Transmissor com firmware antigo: formato não reconhecido
    b"T=23.5;H=55\n",
];

/// Um pacote fica disponível a cada tantos polls (~2 s com poll de 50 ms).
const POLLS_PER_PACKET: u32 = 40;

/// A cada tantos pacotes, um chega com CRC inválido.
const CRC_FAILURE_EVERY: u32 = 7;

/// Implementação simulada do [`LoraRadio`].
pub struct SimulatedRadio {
    polls: u32,
    packets: u32,
    receive_armed: bool,
}

impl SimulatedRadio {
    pub fn new() -> Self {
        Self {
            polls: 0,
            packets: 0,
            receive_armed: false,
        }
    }
}

impl Default for SimulatedRadio {
    fn default() -> Self {
        Self::new()
    }
}

impl LoraRadio for SimulatedRadio {
    fn init(&mut self) -> u8 {
        // Versão do silício SX1276
        0x12
    }

    fn start_receive(&mut self) {
        self.receive_armed = true;
    }

    fn packet_available(&mut self) -> bool {
        if !self.receive_armed {
            return false;
        }
        self.polls += 1;
        self.polls % POLLS_PER_PACKET == 0
    }

    fn read_packet(&mut self, buf: &mut [u8]) -> (i32, LinkQuality) {
        // Como no módulo real, ler o pacote desarma a recepção contínua
        self.receive_armed = false;
        self.packets += 1;

        // Deriva sintética de qualidade do sinal
        let link = LinkQuality {
            rssi: -60 - (self.packets % 30) as i16,
            snr: 10 - (self.packets % 8) as i8,
        };

        if self.packets % CRC_FAILURE_EVERY == 0 {
            return (READ_CRC_ERROR, link);
        }

        let payload = SAMPLE_PAYLOADS[(self.packets as usize) % SAMPLE_PAYLOADS.len()];
        if payload.len() > buf.len() {
            return (-1, link);
        }
        buf[..payload.len()].copy_from_slice(payload);
        (payload.len() as i32, link)
    }
}
