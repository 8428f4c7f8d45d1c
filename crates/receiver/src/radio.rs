//! Interface com o driver do rádio LoRa (SX1276).
//!
//! O protocolo de registradores do módulo não é implementado neste
//! repositório; o receptor consome o driver apenas por esta interface.
//! O código de retorno de `read_packet` segue a convenção do driver:
//! positivo é a contagem de bytes, [`READ_CRC_ERROR`] é CRC inválido e
//! demais valores não positivos são falha genérica de recepção.

use sensor_core::types::LinkQuality;
use thiserror::Error;

/// Código de retorno do driver para pacote com CRC inválido.
pub const READ_CRC_ERROR: i32 = -3;

/// Contrato do rádio consumido pelo loop de ingestão.
pub trait LoraRadio {
    /// Inicialização única do módulo. Retorna a versão lida do
    /// registrador de identificação do chip.
    fn init(&mut self) -> u8;

    /// Arma o modo de recepção contínua. Chamado no startup e novamente
    /// após cada evento de pacote: o modo não persiste entre pacotes.
    fn start_receive(&mut self);

    /// Poll não bloqueante: há pacote aguardando leitura?
    fn packet_available(&mut self) -> bool;

    /// Lê o pacote pendente para `buf`. Retorna a contagem de bytes na
    /// convenção do driver e a qualidade do sinal medida no pacote.
    fn read_packet(&mut self, buf: &mut [u8]) -> (i32, LinkQuality);
}

/// Falha fatal na inicialização do módulo: o barramento SPI não
/// respondeu. O processo não deve entrar no loop de ingestão.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Falha na comunicação com módulo LoRa (versão do chip = 0x{version:02X})")]
pub struct HardwareInitFailure {
    pub version: u8,
}

/// Valida a identidade do módulo após o init. `0x00` e `0xFF` são os
/// valores sentinela de um barramento mudo.
pub fn check_chip_version(version: u8) -> Result<(), HardwareInitFailure> {
    if version == 0x00 || version == 0xFF {
        Err(HardwareInitFailure { version })
    } else {
        Ok(())
    }
}
