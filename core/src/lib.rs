//! CargaControl core: métricas de carga interna (RPE/UA) de una plantilla.
//!
//! Snapshot de índices por jugadora (monotonía, fatiga aguda/crónica,
//! adaptación, recuperación, ACWR), serie continua diaria con suavizado
//! SMA y EMA (modelo Banister), y agregados de equipo.
//!
//! El core es puro y síncrono: recibe un conjunto tabular de registros y
//! parámetros explícitos, devuelve tablas y escalares. La persistencia y
//! el dashboard quedan fuera; el binding PyO3 (feature `python`) solo
//! reexpone la API JSON de este módulo.

pub mod daily;
pub mod group;
pub mod models;
pub mod normalize;
pub mod series;
pub mod snapshot;
pub mod telemetry;
pub mod windows;

#[cfg(feature = "python")]
mod py;

use thiserror::Error;

pub use models::{
    DailyLoad, GroupSnapshot, GroupSummary, MetricsSnapshot, PlayerRow, RawRecord, RpeFilters,
    SessionRecord, TimeSeries, TimeSeriesRow,
};
pub use series::{VENTANA_AGUDA_DEFECTO, VENTANA_CRONICA_DEFECTO};

/// Errores del contrato de entrada. Una fila mal formada no es un error
/// (se descarta al normalizar); solo el esquema del conjunto — un JSON que
/// no es un array de objetos — falla en voz alta.
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("registros: JSON inválido en `{ruta}`: {origen}")]
    RegistrosInvalidos { ruta: String, origen: String },
    #[error("filtros: JSON inválido: {0}")]
    FiltrosInvalidos(String),
    #[error("serialización del resultado: {0}")]
    Salida(#[from] serde_json::Error),
}

fn parse_registros(registros_json: &str) -> Result<Vec<RawRecord>, MetricsError> {
    let mut de = serde_json::Deserializer::from_str(registros_json);
    serde_path_to_error::deserialize(&mut de).map_err(|e| MetricsError::RegistrosInvalidos {
        ruta: e.path().to_string(),
        origen: e.into_inner().to_string(),
    })
}

fn parse_filtros(filtros_json: Option<&str>) -> Result<RpeFilters, MetricsError> {
    match filtros_json {
        Some(s) => {
            serde_json::from_str(s).map_err(|e| MetricsError::FiltrosInvalidos(e.to_string()))
        }
        None => Ok(RpeFilters::default()),
    }
}

/// Snapshot individual como JSON. `registros_json`: array de registros
/// crudos; `filtros_json`: objeto RpeFilters opcional.
pub fn compute_rpe_metrics_json(
    registros_json: &str,
    filtros_json: Option<&str>,
) -> Result<String, MetricsError> {
    let registros = parse_registros(registros_json)?;
    let flt = parse_filtros(filtros_json)?;
    Ok(serde_json::to_string(&snapshot::compute_rpe_metrics(
        &registros, &flt,
    ))?)
}

/// Serie continua individual (o de una tabla ya sumada) como JSON.
/// Ventanas en días; sin valor => 7/42. Los no-finitos del ACWR salen
/// como `null` (comportamiento de serde_json), que el dashboard ya trata
/// como hueco.
pub fn compute_rpe_timeseries_json(
    registros_json: &str,
    ventana_aguda: Option<usize>,
    ventana_cronica: Option<usize>,
) -> Result<String, MetricsError> {
    let registros = parse_registros(registros_json)?;
    let limpios = normalize::prepare_checkout(&registros);
    let serie = series::compute_rpe_timeseries(
        &limpios,
        ventana_aguda.unwrap_or(VENTANA_AGUDA_DEFECTO),
        ventana_cronica.unwrap_or(VENTANA_CRONICA_DEFECTO),
    );
    Ok(serde_json::to_string(&serie)?)
}

/// Serie continua grupal (carga de toda la plantilla sumada por día).
pub fn compute_rpe_timeseries_grupal_json(
    registros_json: &str,
    ventana_aguda: Option<usize>,
    ventana_cronica: Option<usize>,
) -> Result<String, MetricsError> {
    let registros = parse_registros(registros_json)?;
    let limpios = normalize::prepare_checkout(&registros);
    let serie = series::compute_rpe_timeseries_grupal(
        &limpios,
        ventana_aguda.unwrap_or(VENTANA_AGUDA_DEFECTO),
        ventana_cronica.unwrap_or(VENTANA_CRONICA_DEFECTO),
    );
    Ok(serde_json::to_string(&serie)?)
}

/// Snapshot grupal: tabla por jugadora + resumen de equipo, como JSON.
pub fn compute_group_snapshot_json(
    registros_json: &str,
    filtros_json: Option<&str>,
) -> Result<String, MetricsError> {
    let registros = parse_registros(registros_json)?;
    let flt = parse_filtros(filtros_json)?;
    let limpios = normalize::prepare_checkout(&registros);
    Ok(serde_json::to_string(&group::compute_group_snapshot(
        &limpios, &flt,
    ))?)
}
