//! Schemas de payload – reconhecimento e decodificação dos formatos texto.
//!
//! Cada nó transmissor envia uma linha de texto com rótulos fixos:
//!
//! ```text
//! Lux: 450, Temperatura: 23.5C Umidade: 55.0%
//! Ax: 100, Ay: -200, Az: 16000
//! Gx: 10, Gy: -5, Gz: 3
//! ```
//!
//! O [`SchemaRegistry`] tenta cada schema na ordem de registro e devolve a
//! primeira decodificação bem-sucedida. Campos reais toleram sufixo não
//! numérico ("23.5C" → 23.5, como o `atof` do firmware); campos inteiros
//! exigem conversão limpa.

use crate::types::{EnvironmentalData, Measurement, MotionData};

/// Função de decodificação de um schema: texto cru → medição.
pub type DecodeFn = fn(&str) -> Option<Measurement>;

/// Descritor de um formato de payload reconhecido pelo receptor.
#[derive(Debug, Clone, Copy)]
pub struct PayloadSchema {
    /// Nome da variante (ex: "ambiental")
    pub name: &'static str,
    decode: DecodeFn,
}

impl PayloadSchema {
    pub const fn new(name: &'static str, decode: DecodeFn) -> Self {
        Self { name, decode }
    }

    /// Tenta decodificar o payload neste schema.
    pub fn try_decode(&self, payload: &str) -> Option<Measurement> {
        (self.decode)(payload)
    }
}

/// Pacote recebido íntegro mas não reconhecido por nenhum schema.
///
/// Carrega os bytes originais para que o chamador possa exibir o payload
/// ofensivo verbatim no diagnóstico.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Falha ao parsear dados dos sensores")]
pub struct MalformedPayload {
    pub raw: Vec<u8>,
}

impl MalformedPayload {
    /// Payload cru como texto (lossy) para exibição.
    pub fn raw_text(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.raw)
    }
}

/// Conjunto ordenado de schemas registrados no startup.
///
/// Imutável depois que o loop de ingestão começa; a ordem de registro é o
/// desempate quando mais de um schema reconhece o mesmo payload (o primeiro
/// registrado vence).
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    schemas: Vec<PayloadSchema>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry de fábrica com os dois schemas, na ordem ambiental → movimento.
    pub fn with_default_schemas() -> Self {
        let mut registry = Self::new();
        registry.register(PayloadSchema::new("ambiental", decode_environmental));
        registry.register(PayloadSchema::new("movimento", decode_motion));
        registry
    }

    /// Adiciona um schema ao fim da ordem de tentativa.
    pub fn register(&mut self, schema: PayloadSchema) {
        self.schemas.push(schema);
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Nomes dos schemas na ordem de tentativa.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.schemas.iter().map(|s| s.name)
    }

    /// Decodifica um pacote cru tentando cada schema na ordem de registro.
    ///
    /// Função pura: sem I/O, sem efeitos colaterais. Entrada vazia ou não
    /// UTF-8 nunca casa com schema algum.
    pub fn decode(&self, raw: &[u8]) -> Result<Measurement, MalformedPayload> {
        if let Ok(text) = std::str::from_utf8(raw) {
            for schema in &self.schemas {
                if let Some(measurement) = schema.try_decode(text) {
                    return Ok(measurement);
                }
            }
        }
        Err(MalformedPayload { raw: raw.to_vec() })
    }
}

// ──────────────────────────────────────────────
// Schemas concretos
// ──────────────────────────────────────────────

/// Schema ambiental: `Lux: <u16>, Temperatura: <f32> Umidade: <f32>`.
pub fn decode_environmental(text: &str) -> Option<Measurement> {
    let rest = strip_label(text, "Lux:")?;
    let (lux_tok, rest) = until_char(rest, ',')?;
    let lux: u16 = lux_tok.trim().parse().ok()?;

    let rest = strip_label(rest, "Temperatura:")?;
    let (temp_tok, rest) = next_token(rest)?;
    let temperature = leading_f32(temp_tok)?;

    let rest = strip_label(rest, "Umidade:")?;
    let (hum_tok, _rest) = next_token(rest)?;
    let humidity = leading_f32(hum_tok)?;

    Some(Measurement::Environmental(EnvironmentalData {
        lux,
        temperature,
        humidity,
    }))
}

/// Schema de movimento: duas linhas, aceleração e giroscópio.
///
/// `Ax: <i16>, Ay: <i16>, Az: <i16>` seguido de `Gx: <i16>, Gy: <i16>, Gz: <i16>`.
pub fn decode_motion(text: &str) -> Option<Measurement> {
    let rest = strip_label(text, "Ax:")?;
    let (tok, rest) = until_char(rest, ',')?;
    let ax: i16 = tok.trim().parse().ok()?;

    let rest = strip_label(rest, "Ay:")?;
    let (tok, rest) = until_char(rest, ',')?;
    let ay: i16 = tok.trim().parse().ok()?;

    let rest = strip_label(rest, "Az:")?;
    let (tok, rest) = next_token(rest)?;
    let az: i16 = tok.parse().ok()?;

    let rest = strip_label(rest, "Gx:")?;
    let (tok, rest) = until_char(rest, ',')?;
    let gx: i16 = tok.trim().parse().ok()?;

    let rest = strip_label(rest, "Gy:")?;
    let (tok, rest) = until_char(rest, ',')?;
    let gy: i16 = tok.trim().parse().ok()?;

    let rest = strip_label(rest, "Gz:")?;
    let (tok, _rest) = next_token(rest)?;
    let gz: i16 = tok.parse().ok()?;

    Some(Measurement::Motion(MotionData {
        accel: (ax, ay, az),
        gyro: (gx, gy, gz),
    }))
}

// ──────────────────────────────────────────────
// Parsing auxiliar
// ──────────────────────────────────────────────

/// Remove o rótulo no início do texto, ignorando espaço em branco antes dele.
fn strip_label<'a>(input: &'a str, label: &str) -> Option<&'a str> {
    input.trim_start().strip_prefix(label)
}

/// Divide no primeiro `sep`, retornando (antes, depois do separador).
fn until_char(input: &str, sep: char) -> Option<(&str, &str)> {
    let idx = input.find(sep)?;
    Some((&input[..idx], &input[idx + sep.len_utf8()..]))
}

/// Próximo token delimitado por espaço em branco.
fn next_token(input: &str) -> Option<(&str, &str)> {
    let input = input.trim_start();
    if input.is_empty() {
        return None;
    }
    match input.find(char::is_whitespace) {
        Some(idx) => Some((&input[..idx], &input[idx..])),
        None => Some((input, "")),
    }
}

/// Converte o prefixo numérico de um token, ignorando o sufixo não numérico
/// ("23.5C" → 23.5, "55.0%" → 55.0). Equivalente ao `atof` do firmware.
fn leading_f32(token: &str) -> Option<f32> {
    let bytes = token.as_bytes();
    let mut end = 0;
    if bytes.first().is_some_and(|&c| c == b'+' || c == b'-') {
        end += 1;
    }
    let mut digits = 0;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
        digits += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
            digits += 1;
        }
    }
    if digits == 0 {
        return None;
    }
    token[..end].parse().ok()
}

// ──────────────────────────────────────────────
// Testes
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_environmental_payload() {
        let registry = SchemaRegistry::with_default_schemas();
        let raw = b"Lux: 450, Temperatura: 23.5C Umidade: 55.0%";
        match registry.decode(raw) {
            Ok(Measurement::Environmental(data)) => {
                assert_eq!(data.lux, 450);
                assert_eq!(data.temperature, 23.5);
                assert_eq!(data.humidity, 55.0);
            }
            other => panic!("Esperava registro ambiental, obteve {other:?}"),
        }
    }

    #[test]
    fn decodes_environmental_with_trailing_newline() {
        let registry = SchemaRegistry::with_default_schemas();
        let raw = b"Lux: 12, Temperatura: 18.2C Umidade: 71.4%\n";
        assert!(matches!(
            registry.decode(raw),
            Ok(Measurement::Environmental(data)) if data.lux == 12
        ));
    }

    #[test]
    fn real_fields_tolerate_trailing_unit() {
        assert_eq!(leading_f32("23.5C"), Some(23.5));
        assert_eq!(leading_f32("55.0%"), Some(55.0));
        assert_eq!(leading_f32("-3.25C"), Some(-3.25));
        assert_eq!(leading_f32("42"), Some(42.0));
        assert_eq!(leading_f32("C23"), None);
        assert_eq!(leading_f32("-"), None);
    }

    #[test]
    fn integer_fields_require_clean_match() {
        let registry = SchemaRegistry::with_default_schemas();
        // Sufixo no campo inteiro invalida o payload inteiro
        assert!(registry.decode(b"Lux: 450x, Temperatura: 23.5C Umidade: 55.0%").is_err());
        // Lux acima de u16 não converte
        assert!(registry.decode(b"Lux: 70000, Temperatura: 23.5C Umidade: 55.0%").is_err());
    }

    #[test]
    fn decodes_motion_payload() {
        let registry = SchemaRegistry::with_default_schemas();
        let raw = b"Ax: 100, Ay: -200, Az: 16000\nGx: 10, Gy: -5, Gz: 3";
        match registry.decode(raw) {
            Ok(Measurement::Motion(data)) => {
                assert_eq!(data.accel, (100, -200, 16000));
                assert_eq!(data.gyro, (10, -5, 3));
            }
            other => panic!("Esperava registro de movimento, obteve {other:?}"),
        }
    }

    #[test]
    fn motion_requires_all_six_fields() {
        let registry = SchemaRegistry::with_default_schemas();
        assert!(registry.decode(b"Ax: 100, Ay: -200, Az: 16000").is_err());
        assert!(registry.decode(b"Ax: 100, Ay: -200, Az: 16000\nGx: 10, Gy: -5").is_err());
    }

    #[test]
    fn empty_payload_is_malformed() {
        let registry = SchemaRegistry::with_default_schemas();
        let err = registry.decode(b"").unwrap_err();
        assert!(err.raw.is_empty());
    }

    #[test]
    fn garbage_keeps_original_bytes() {
        let registry = SchemaRegistry::with_default_schemas();
        let err = registry.decode(b"garbage").unwrap_err();
        assert_eq!(err.raw, b"garbage");
        assert_eq!(err.raw_text(), "garbage");
    }

    #[test]
    fn non_utf8_is_malformed() {
        let registry = SchemaRegistry::with_default_schemas();
        let raw = [0xFF, 0xFE, 0x00];
        let err = registry.decode(&raw).unwrap_err();
        assert_eq!(err.raw, raw);
    }

    #[test]
    fn registration_order_breaks_ties() {
        fn first(_: &str) -> Option<Measurement> {
            Some(Measurement::Environmental(EnvironmentalData {
                lux: 1,
                ..Default::default()
            }))
        }
        fn second(_: &str) -> Option<Measurement> {
            Some(Measurement::Environmental(EnvironmentalData {
                lux: 2,
                ..Default::default()
            }))
        }

        let mut registry = SchemaRegistry::new();
        registry.register(PayloadSchema::new("primeiro", first));
        registry.register(PayloadSchema::new("segundo", second));

        // Ambos casariam estruturalmente; o primeiro registrado vence
        assert!(matches!(
            registry.decode(b"Lux: qualquer coisa"),
            Ok(Measurement::Environmental(data)) if data.lux == 1
        ));
    }

    #[test]
    fn default_registry_order_is_environmental_then_motion() {
        let registry = SchemaRegistry::with_default_schemas();
        assert_eq!(registry.len(), 2);
        assert!(!registry.is_empty());
        assert_eq!(
            registry.names().collect::<Vec<_>>(),
            vec!["ambiental", "movimento"]
        );
    }

    #[test]
    fn decode_is_deterministic() {
        let registry = SchemaRegistry::with_default_schemas();
        let raw = b"Lux: 450, Temperatura: 23.5C Umidade: 55.0%";
        assert_eq!(registry.decode(raw), registry.decode(raw));
    }
}
