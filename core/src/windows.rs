use chrono::{Datelike, Duration, NaiveDate};

use crate::models::DailyLoad;

/// Estadística de una ventana de fechas sobre la tabla diaria:
/// suma, media y desviación típica poblacional (ddof = 0).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowStat {
    pub sum: f64,
    pub mean: f64,
    pub std: f64,
}

impl WindowStat {
    /// Ventana sin días presentes.
    pub const VACIA: WindowStat = WindowStat {
        sum: 0.0,
        mean: 0.0,
        std: 0.0,
    };
}

/// Lunes..domingo de la semana natural que contiene `end_day`.
pub fn current_week_range(end_day: NaiveDate) -> (NaiveDate, NaiveDate) {
    let weekday = i64::from(end_day.weekday().num_days_from_monday());
    let start = end_day - Duration::days(weekday);
    (start, start + Duration::days(6))
}

/// Primer..último día del mes natural de `end_day`. Diciembre rueda al
/// enero del año siguiente.
pub fn month_range(end_day: NaiveDate) -> (NaiveDate, NaiveDate) {
    let (y, m) = (end_day.year(), end_day.month());
    let start = NaiveDate::from_ymd_opt(y, m, 1).unwrap_or(end_day);
    let inicio_mes_siguiente = if m == 12 {
        NaiveDate::from_ymd_opt(y + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(y, m + 1, 1)
    }
    .unwrap_or(start);
    (start, inicio_mes_siguiente - Duration::days(1))
}

/// Ventana de `n` días naturales terminando en `end_day`, ambos incluidos.
pub fn trailing_range(end_day: NaiveDate, n: u32) -> (NaiveDate, NaiveDate) {
    (end_day - Duration::days(i64::from(n) - 1), end_day)
}

/// Solo cuentan los días presentes en la tabla: un día ausente no es un
/// cero. Sin filas => suma y media 0.0; con menos de 2 filas => std 0.0.
pub fn window_stat(daily: &[DailyLoad], start: NaiveDate, end: NaiveDate) -> WindowStat {
    let cargas: Vec<f64> = daily
        .iter()
        .filter(|d| d.fecha_sesion >= start && d.fecha_sesion <= end)
        .map(|d| d.ua_total)
        .collect();

    if cargas.is_empty() {
        return WindowStat::VACIA;
    }
    let n = cargas.len() as f64;
    let sum: f64 = cargas.iter().sum();
    let mean = sum / n;
    let std = if cargas.len() > 1 {
        (cargas.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n).sqrt()
    } else {
        0.0
    };
    WindowStat { sum, mean, std }
}
