use chrono::NaiveDate;
use log::{debug, warn};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::models::{RawRecord, RpeFilters, SessionRecord};
use crate::telemetry;

/// Tipo de registro que lleva la UA consolidada de la sesión.
const TIPO_CHECKOUT: &str = "checkOut";

/// Se queda solo con los checkOut usables: fecha y UA parseables. Las filas
/// sin `tipo` se conservan (columna ausente => filtro inactivo). Entrada
/// vacía => salida vacía, sin error.
pub fn prepare_checkout(registros: &[RawRecord]) -> Vec<SessionRecord> {
    let mut limpios = Vec::with_capacity(registros.len());
    let mut descartados = 0usize;

    for r in registros {
        if let Some(tipo) = &r.tipo {
            if tipo != TIPO_CHECKOUT {
                continue;
            }
        }
        match (r.fecha_sesion, r.ua) {
            (Some(fecha_sesion), Some(ua)) => limpios.push(SessionRecord {
                id_jugadora: r.id_jugadora.clone(),
                nombre_jugadora: r.nombre_jugadora.clone(),
                fecha_sesion,
                ua,
                minutos_sesion: r.minutos_sesion,
                turno: r.turno.clone(),
            }),
            // Sin fecha o sin UA no hay carga que computar: fila fuera.
            _ => descartados += 1,
        }
    }

    if descartados > 0 {
        warn!("normalización: {descartados} checkOut sin fecha o UA parseable");
        telemetry::REGISTROS_DESCARTADOS.inc_by(descartados as u64);
    }
    debug!(
        "normalización: {} usables de {} registros",
        limpios.len(),
        registros.len()
    );
    limpios
}

/// Aplica los filtros de selección. Con el filtro de turno activo, las filas
/// sin turno quedan fuera (igual que un `isin` sobre la columna); si ningún
/// registro trae turno —columna ausente en el export— el filtro de turno
/// queda inactivo. Rango de fechas inclusivo por ambos extremos.
pub fn apply_filters(registros: &[SessionRecord], flt: &RpeFilters) -> Vec<SessionRecord> {
    let hay_turnos = registros.iter().any(|r| r.turno.is_some());

    registros
        .iter()
        .filter(|r| match &flt.jugadores {
            Some(ids) => r.id_jugadora.as_ref().is_some_and(|id| ids.contains(id)),
            None => true,
        })
        .filter(|r| match &flt.turnos {
            Some(turnos) if hay_turnos => {
                r.turno.as_ref().is_some_and(|t| turnos.contains(t))
            }
            _ => true,
        })
        .filter(|r| flt.start.map_or(true, |s| r.fecha_sesion >= s))
        .filter(|r| flt.end.map_or(true, |e| r.fecha_sesion <= e))
        .cloned()
        .collect()
}

// ── Coerciones tolerantes (estilo `errors="coerce"`: nunca un error) ──────

/// Acepta número o cadena numérica; lo demás queda en `None`.
pub fn de_numero_flexible<'de, D>(d: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(d)?;
    Ok(coerce_numero(&v))
}

fn coerce_numero(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64().filter(|x| x.is_finite()),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|x| x.is_finite()),
        _ => None,
    }
}

/// Acepta "YYYY-MM-DD", un datetime ISO (la hora se ignora) o "DD/MM/YYYY".
pub fn de_fecha_flexible<'de, D>(d: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(d)?;
    Ok(v.as_str().and_then(coerce_fecha))
}

fn coerce_fecha(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    let dia = s.split(['T', ' ']).next().unwrap_or(s);
    NaiveDate::parse_from_str(dia, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(dia, "%d/%m/%Y"))
        .ok()
}

/// Identificadores: acepta cadena o número (hay exportaciones con ids
/// numéricos); cadena en blanco => `None`.
pub fn de_texto_flexible<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(d)?;
    Ok(match v {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}
