//! Estatísticas de entrega do link – contadores e relatório periódico.
//!
//! Os contadores globais e o "último status" do firmware viram estado
//! explícito ([`LinkStats`] e [`StatusReporter`]) passado ao loop de
//! ingestão, em vez de globais de processo.

use serde::{Deserialize, Serialize};

/// Intervalo padrão entre relatórios de status (ms).
pub const STATUS_INTERVAL_MS: u64 = 30_000;

/// Contadores acumulados desde o boot. Nunca decrementam nem reiniciam
/// enquanto o processo vive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkStats {
    received: u64,
    errors: u64,
}

impl LinkStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registra uma decodificação bem-sucedida.
    pub fn record_success(&mut self) {
        self.received += 1;
    }

    /// Registra uma falha (CRC, recepção ou payload malformado).
    pub fn record_failure(&mut self) {
        self.errors += 1;
    }

    /// Cópia imutável dos contadores com a taxa de sucesso derivada.
    pub fn snapshot(&self) -> StatusSnapshot {
        StatusSnapshot {
            received: self.received,
            errors: self.errors,
            // Convenção herdada do firmware: sem nenhum sucesso a taxa é
            // 0%, mesmo que existam erros acumulados
            success_rate: if self.received > 0 {
                (100.0 * self.received as f32) / (self.received + self.errors) as f32
            } else {
                0.0
            },
        }
    }
}

/// Visão pontual das estatísticas, emitida no relatório periódico.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub received: u64,
    pub errors: u64,
    /// Percentual de sucesso (0–100)
    pub success_rate: f32,
}

impl StatusSnapshot {
    /// Total de pacotes observados (sucessos + falhas).
    pub fn total(&self) -> u64 {
        self.received + self.errors
    }
}

/// Emissor de status em cadência fixa baseado em tempo decorrido.
///
/// Não é um timer preciso: a latência do próprio loop de polling acumula
/// como drift, aceitável porque o status é informativo.
#[derive(Debug, Clone, Copy)]
pub struct StatusReporter {
    interval_ms: u64,
    last_report_ms: u64,
}

impl StatusReporter {
    /// Reporter com o intervalo padrão, ancorado no instante `start_ms`.
    pub fn new(start_ms: u64) -> Self {
        Self::with_interval(start_ms, STATUS_INTERVAL_MS)
    }

    pub fn with_interval(start_ms: u64, interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last_report_ms: start_ms,
        }
    }

    /// Retorna um snapshot se o intervalo venceu desde o último relatório,
    /// e nesse caso reancora o relógio em `now_ms`.
    pub fn maybe_report(&mut self, now_ms: u64, stats: &LinkStats) -> Option<StatusSnapshot> {
        if now_ms.saturating_sub(self.last_report_ms) >= self.interval_ms {
            self.last_report_ms = now_ms;
            Some(stats.snapshot())
        } else {
            None
        }
    }
}

// ──────────────────────────────────────────────
// Testes
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate() {
        let mut stats = LinkStats::new();
        stats.record_success();
        stats.record_success();
        stats.record_failure();

        let snap = stats.snapshot();
        assert_eq!(snap.received, 2);
        assert_eq!(snap.errors, 1);
        assert_eq!(snap.total(), 3);
    }

    #[test]
    fn success_rate_formula() {
        let mut stats = LinkStats::new();
        for _ in 0..3 {
            stats.record_success();
        }
        stats.record_failure();
        assert_eq!(stats.snapshot().success_rate, 75.0);
    }

    #[test]
    fn success_rate_is_zero_without_successes() {
        let mut stats = LinkStats::new();
        for _ in 0..5 {
            stats.record_failure();
        }
        // Convenção do firmware: só falhas ainda reporta 0%, não 100% de erro
        assert_eq!(stats.snapshot().success_rate, 0.0);
    }

    #[test]
    fn empty_stats_report_zero_rate() {
        assert_eq!(LinkStats::new().snapshot().success_rate, 0.0);
    }

    #[test]
    fn reports_exactly_once_per_window() {
        let stats = LinkStats::new();
        let mut reporter = StatusReporter::new(0);

        assert!(reporter.maybe_report(29_999, &stats).is_none());
        assert!(reporter.maybe_report(30_000, &stats).is_some());
        // Janela reancorada em 30_000
        assert!(reporter.maybe_report(59_999, &stats).is_none());
        assert!(reporter.maybe_report(60_000, &stats).is_some());
    }

    #[test]
    fn custom_interval_is_respected() {
        let stats = LinkStats::new();
        let mut reporter = StatusReporter::with_interval(1_000, 5_000);

        assert!(reporter.maybe_report(5_999, &stats).is_none());
        assert!(reporter.maybe_report(6_000, &stats).is_some());
    }

    #[test]
    fn snapshot_reflects_stats_at_report_time() {
        let mut stats = LinkStats::new();
        let mut reporter = StatusReporter::new(0);

        stats.record_success();
        let snap = reporter.maybe_report(STATUS_INTERVAL_MS, &stats).unwrap();
        assert_eq!(snap.received, 1);
        assert_eq!(snap.errors, 0);
        assert_eq!(snap.success_rate, 100.0);
    }
}
