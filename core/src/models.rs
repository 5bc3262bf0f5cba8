use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::normalize::{de_fecha_flexible, de_numero_flexible, de_texto_flexible};

/// Fila cruda del registro de sesiones, tal como llega de la capa de datos.
/// Todo es opcional al parsear; una coerción fallida deja `None` y la fila
/// se descarta en la normalización (nunca se rellena con ceros).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRecord {
    #[serde(default, alias = "id", deserialize_with = "de_texto_flexible")]
    pub id_jugadora: Option<String>,
    #[serde(default, alias = "nombre")]
    pub nombre_jugadora: Option<String>,
    /// Tipo de registro; solo "checkOut" lleva la UA consolidada de la sesión.
    #[serde(default)]
    pub tipo: Option<String>,
    #[serde(default, alias = "fecha", deserialize_with = "de_fecha_flexible")]
    pub fecha_sesion: Option<NaiveDate>,
    /// UA = RPE × minutos de sesión
    #[serde(default, deserialize_with = "de_numero_flexible")]
    pub ua: Option<f64>,
    #[serde(default, alias = "minutos", deserialize_with = "de_numero_flexible")]
    pub minutos_sesion: Option<f64>, // min
    #[serde(default)]
    pub turno: Option<String>,
}

/// Registro normalizado: fecha y UA garantizadas, el resto según venga.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id_jugadora: Option<String>,
    pub nombre_jugadora: Option<String>,
    pub fecha_sesion: NaiveDate,
    pub ua: f64,                     // UA
    pub minutos_sesion: Option<f64>, // min
    pub turno: Option<String>,
}

/// Filtros de selección. Un filtro ausente está inactivo; el core nunca
/// depende de estado ambiental, todo llega por parámetro.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RpeFilters {
    #[serde(default)]
    pub jugadores: Option<Vec<String>>,
    #[serde(default)]
    pub turnos: Option<Vec<String>>,
    #[serde(default)]
    pub start: Option<NaiveDate>,
    #[serde(default)]
    pub end: Option<NaiveDate>,
}

/// Carga agregada de un día con sesión. Los días sin sesión no tienen fila.
/// `minutos_total` es `None` solo si ningún registro del día trajo minutos
/// (suma con min_count=1: un parcial ausente cuenta como cero dentro de la
/// suma, todos ausentes => ausente).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyLoad {
    pub fecha_sesion: NaiveDate,
    pub ua_total: f64,              // UA
    pub minutos_total: Option<f64>, // min
}

/// Snapshot de índices para una fecha de referencia. `None` = sin datos en
/// la ventana correspondiente (nunca se confunde con un cero calculado),
/// salvo la fatiga crónica, que por política devuelve 0.0 con ventana vacía.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MetricsSnapshot {
    pub ua_total_dia: Option<f64>,
    pub minutos_sesion: Option<f64>,
    pub carga_semana: Option<f64>,
    pub carga_media_semana: Option<f64>,
    pub carga_mes: Option<f64>,
    pub carga_media_mes: Option<f64>,
    pub monotonia_semana: Option<f64>,
    pub variabilidad_semana: Option<f64>,
    pub fatiga_aguda: Option<f64>,
    pub fatiga_aguda_diaria: Option<f64>,
    pub fatiga_cronica_28d: Option<f64>,
    pub fatiga_cronica_42d: Option<f64>,
    pub fatiga_cronica_56d: Option<f64>,
    pub adaptacion_28d: Option<f64>,
    pub adaptacion_42d: Option<f64>,
    pub adaptacion_56d: Option<f64>,
    pub recuperacion_28d: Option<f64>,
    pub recuperacion_42d: Option<f64>,
    pub recuperacion_56d: Option<f64>,
    pub acwr_28d: Option<f64>,
    pub acwr_42d: Option<f64>,
    pub acwr_56d: Option<f64>,
    /// Tabla diaria usada para el cálculo (sin rellenar huecos).
    pub daily_table: Vec<DailyLoad>,
}

/// Fila de la serie continua diaria: carga cruda más las cuatro curvas
/// derivadas por método de suavizado. Todo redondeado a 2 decimales.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TimeSeriesRow {
    pub fecha_sesion: NaiveDate,
    pub ua_diaria: f64,
    pub fatiga_aguda_sma: f64,
    pub fatiga_cronica_sma: f64,
    pub recuperacion_sma: f64,
    pub acwr_sma: f64,
    pub fatiga_aguda_ema: f64,
    pub fatiga_cronica_ema: f64,
    pub recuperacion_ema: f64,
    pub acwr_ema: f64,
}

/// Serie continua (una fila por día natural entre la primera y la última
/// sesión observada, sin huecos).
#[derive(Debug, Clone, Serialize)]
pub struct TimeSeries {
    pub ventana_aguda: usize,   // días
    pub ventana_cronica: usize, // días
    pub filas: Vec<TimeSeriesRow>,
}

/// Una fila de métricas por jugadora, derivada del snapshot individual.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerRow {
    pub id_jugadora: String,
    pub nombre_jugadora: Option<String>,
    pub ua_dia: Option<f64>,
    pub minutos_dia: Option<f64>,
    pub carga_semana: Option<f64>,
    pub carga_mes: Option<f64>,
    pub fatiga_aguda: Option<f64>,
    pub fatiga_cronica_28d: Option<f64>,
    pub fatiga_cronica_42d: Option<f64>,
    pub fatiga_cronica_56d: Option<f64>,
    pub acwr_28d: Option<f64>,
    pub acwr_42d: Option<f64>,
    pub acwr_56d: Option<f64>,
    pub monotonia: Option<f64>,
    pub variabilidad: Option<f64>,
    pub adaptacion_28d: Option<f64>,
    pub adaptacion_42d: Option<f64>,
    pub adaptacion_56d: Option<f64>,
    pub recuperacion_28d: Option<f64>,
    pub recuperacion_42d: Option<f64>,
    pub recuperacion_56d: Option<f64>,
}

/// Agregados escalares de equipo sobre la tabla por jugadora. Las medias y
/// sumas ignoran nulos; una columna totalmente nula agrega a `None`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GroupSummary {
    pub jugadoras_activas: usize,
    pub carga_semana_total: Option<f64>,
    pub carga_semana_media: Option<f64>,
    pub fatiga_aguda_media: Option<f64>,
    pub fatiga_cronica_28d_media: Option<f64>,
    pub fatiga_cronica_42d_media: Option<f64>,
    pub fatiga_cronica_56d_media: Option<f64>,
    pub acwr_medio_28d: Option<f64>,
    pub acwr_medio_42d: Option<f64>,
    pub acwr_medio_56d: Option<f64>,
    pub monotonia_media: Option<f64>,
    /// Desviación típica poblacional de la carga semanal por jugadora.
    pub dispersion_carga: Option<f64>,
}

/// Resultado grupal: tabla por jugadora + resumen de equipo.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GroupSnapshot {
    pub jugadoras: Vec<PlayerRow>,
    pub resumen: GroupSummary,
}
