use log::debug;

use crate::daily::daily_calendar;
use crate::models::{SessionRecord, TimeSeries, TimeSeriesRow};
use crate::telemetry;

pub const VENTANA_AGUDA_DEFECTO: usize = 7; // días
pub const VENTANA_CRONICA_DEFECTO: usize = 42; // días

/// Media móvil simple con truncado inicial (min_periods = 1): la ventana
/// crece hasta `ventana` muestras, así el primer día devuelve su propio
/// valor.
fn media_movil(valores: &[f64], ventana: usize) -> Vec<f64> {
    let mut out = Vec::with_capacity(valores.len());
    let mut suma = 0.0;
    for i in 0..valores.len() {
        suma += valores[i];
        if i >= ventana {
            suma -= valores[i - ventana];
        }
        let n = (i + 1).min(ventana);
        out.push(suma / n as f64);
    }
    out
}

/// EMA equivalente a la hoja Excel (modelo Banister): alpha = 1 − exp(−1/τ),
/// actualización recursiva sin corrección de sesgo, sembrada con la primera
/// muestra.
fn media_exponencial(valores: &[f64], tau: usize) -> Vec<f64> {
    let alpha = 1.0 - (-1.0 / tau as f64).exp();
    let mut out = Vec::with_capacity(valores.len());
    let mut prev: Option<f64> = None;
    for &x in valores {
        let y = match prev {
            Some(p) => (1.0 - alpha) * p + alpha * x,
            None => x,
        };
        out.push(y);
        prev = Some(y);
    }
    out
}

fn redondea2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Serie continua de estados de carga para una jugadora (o para una tabla
/// ya sumada): calendario diario sin huecos con curvas SMA y EMA.
///
/// El ACWR continuo se deja como el resultado natural de la división
/// (inf/NaN con crónica cero), al contrario que los guardias del snapshot;
/// la capa de presentación ya trata los no-finitos como huecos.
pub fn compute_rpe_timeseries(
    registros: &[SessionRecord],
    ventana_aguda: usize,
    ventana_cronica: usize,
) -> TimeSeries {
    let ventana_aguda = ventana_aguda.max(1);
    let ventana_cronica = ventana_cronica.max(1);

    let calendario = daily_calendar(registros);
    let mut serie = TimeSeries {
        ventana_aguda,
        ventana_cronica,
        filas: Vec::with_capacity(calendario.len()),
    };
    if calendario.is_empty() {
        return serie;
    }

    let ua: Vec<f64> = calendario.iter().map(|(_, u)| *u).collect();
    let aguda_sma = media_movil(&ua, ventana_aguda);
    let cronica_sma = media_movil(&ua, ventana_cronica);
    let aguda_ema = media_exponencial(&ua, ventana_aguda);
    let cronica_ema = media_exponencial(&ua, ventana_cronica);

    for (i, &(fecha_sesion, carga)) in calendario.iter().enumerate() {
        serie.filas.push(TimeSeriesRow {
            fecha_sesion,
            ua_diaria: redondea2(carga),
            fatiga_aguda_sma: redondea2(aguda_sma[i]),
            fatiga_cronica_sma: redondea2(cronica_sma[i]),
            recuperacion_sma: redondea2(cronica_sma[i] - aguda_sma[i]),
            acwr_sma: redondea2(aguda_sma[i] / cronica_sma[i]),
            fatiga_aguda_ema: redondea2(aguda_ema[i]),
            fatiga_cronica_ema: redondea2(cronica_ema[i]),
            recuperacion_ema: redondea2(cronica_ema[i] - aguda_ema[i]),
            acwr_ema: redondea2(aguda_ema[i] / cronica_ema[i]),
        });
    }

    telemetry::SERIES_GENERADAS.inc();
    debug!(
        "serie continua: {} días ({ventana_aguda}d/{ventana_cronica}d)",
        serie.filas.len()
    );
    serie
}

/// Variante grupal: misma tubería sobre la carga de TODA la plantilla
/// sumada por día. Nunca un promedio de curvas individuales.
pub fn compute_rpe_timeseries_grupal(
    registros: &[SessionRecord],
    ventana_aguda: usize,
    ventana_cronica: usize,
) -> TimeSeries {
    compute_rpe_timeseries(registros, ventana_aguda, ventana_cronica)
}
