//! Loop de ingestão – pacotes do rádio → registros decodificados.
//!
//! Um único loop sequencial: poll não bloqueante do rádio, decodificação
//! pelo registry, atualização dos contadores, eventos para o sink e
//! relatório periódico de status. A única espera intencional é o sleep de
//! duração fixa ao fim de cada iteração, que limita a frequência de
//! polling.

use crate::radio::{LoraRadio, READ_CRC_ERROR};
use crate::sink::EventSink;
use sensor_core::config::ReceiverConfig;
use sensor_core::schema::{MalformedPayload, SchemaRegistry};
use sensor_core::stats::{LinkStats, StatusReporter};
use sensor_core::types::SensorRecord;
use std::time::{Duration, Instant};
use tracing::info;

/// Falha classificada de uma iteração, encaminhada ao sink.
///
/// Todas são recuperáveis: cada uma incrementa exatamente um contador de
/// falha e gera exatamente um evento de diagnóstico; o loop continua.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LinkFailure {
    /// Pacote entregue pelo rádio com CRC inválido
    #[error("CRC inválido no pacote recebido")]
    CrcInvalid,
    /// Falha genérica de recepção, com o código do driver
    #[error("Falha na recepção (código: {0})")]
    Receive(i32),
    /// Payload íntegro mas não reconhecido por nenhum schema
    #[error(transparent)]
    Malformed(#[from] MalformedPayload),
}

/// Loop de ingestão com estado explícito: registry, contadores e reporter
/// são passados na construção, não globais de processo.
pub struct IngestLoop {
    registry: SchemaRegistry,
    stats: LinkStats,
    reporter: StatusReporter,
    buf: Vec<u8>,
    poll_interval: Duration,
}

impl IngestLoop {
    pub fn new(registry: SchemaRegistry, config: &ReceiverConfig) -> Self {
        Self {
            registry,
            stats: LinkStats::new(),
            reporter: StatusReporter::with_interval(0, config.status_interval_ms),
            buf: vec![0u8; config.max_packet_len],
            poll_interval: Duration::from_millis(config.poll_interval_ms),
        }
    }

    /// Contadores acumulados até agora.
    pub fn stats(&self) -> &LinkStats {
        &self.stats
    }

    /// Executa o serviço indefinidamente. Não há estado terminal: o loop
    /// só para com o término do processo.
    pub fn run<R: LoraRadio>(&mut self, radio: &mut R, sink: &mut dyn EventSink) -> ! {
        let started = Instant::now();

        radio.start_receive();
        info!("Receptor pronto! Aguardando dados do transmissor...");

        loop {
            let now_ms = started.elapsed().as_millis() as u64;
            self.tick(radio, sink, now_ms);
            std::thread::sleep(self.poll_interval);
        }
    }

    /// Uma iteração do loop: poll, decodificação, estatísticas e status.
    pub fn tick<R: LoraRadio>(&mut self, radio: &mut R, sink: &mut dyn EventSink, now_ms: u64) {
        if radio.packet_available() {
            let (count, link) = radio.read_packet(&mut self.buf);

            if count > 0 {
                let raw = &self.buf[..count as usize];
                info!(
                    "Pacote recebido ({} bytes): {}",
                    count,
                    String::from_utf8_lossy(raw).trim_end()
                );

                match self.registry.decode(raw) {
                    Ok(measurement) => {
                        let record = SensorRecord {
                            measurement,
                            link,
                            timestamp_ms: now_ms,
                        };
                        sink.record(&record);
                        self.stats.record_success();
                    }
                    Err(malformed) => {
                        sink.failure(&LinkFailure::Malformed(malformed));
                        self.stats.record_failure();
                    }
                }
            } else if count == READ_CRC_ERROR {
                sink.failure(&LinkFailure::CrcInvalid);
                self.stats.record_failure();
            } else {
                sink.failure(&LinkFailure::Receive(count));
                self.stats.record_failure();
            }

            // O modo de recepção não persiste após um evento de pacote
            radio.start_receive();
        }

        if let Some(snapshot) = self.reporter.maybe_report(now_ms, &self.stats) {
            sink.status(&snapshot);
        }
    }
}

// ──────────────────────────────────────────────
// Testes
// ──────────────────────────────────────────────
