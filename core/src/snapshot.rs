use chrono::NaiveDate;
use log::debug;

use crate::daily::daily_loads;
use crate::models::{DailyLoad, MetricsSnapshot, RawRecord, RpeFilters};
use crate::normalize::{apply_filters, prepare_checkout};
use crate::telemetry;
use crate::windows::{current_week_range, month_range, trailing_range, window_stat};

/// Carga crónica: media de UA diaria en una ventana de `dias` días
/// naturales. Solo promedia días con sesión registrada; ventana vacía
/// => 0.0 (política heredada, distinta del `None` de los índices).
pub fn carga_cronica(daily: &[DailyLoad], end_day: NaiveDate, dias: u32) -> f64 {
    let (start, end) = trailing_range(end_day, dias);
    window_stat(daily, start, end).mean
}

/// Punto de entrada individual: normaliza, filtra, agrega por día y calcula
/// el snapshot en la fecha de referencia (`flt.end`, o el máximo presente).
pub fn compute_rpe_metrics(registros: &[RawRecord], flt: &RpeFilters) -> MetricsSnapshot {
    let limpios = prepare_checkout(registros);
    let limpios = apply_filters(&limpios, flt);
    compute_snapshot(daily_loads(&limpios), flt.end)
}

/// Calcula todos los índices sobre una tabla diaria ya agregada. Tabla
/// vacía => snapshot todo `None`, resultado válido (nunca un error).
pub fn compute_snapshot(daily: Vec<DailyLoad>, end: Option<NaiveDate>) -> MetricsSnapshot {
    let mut res = MetricsSnapshot::default();

    let end_day = match end.or_else(|| daily.last().map(|d| d.fecha_sesion)) {
        Some(d) => d,
        None => return res,
    };
    debug!("snapshot: {} días con sesión, referencia {end_day}", daily.len());
    telemetry::SNAPSHOTS_CALCULADOS.inc();

    // Semana natural que contiene la referencia
    let (sem_ini, sem_fin) = current_week_range(end_day);
    let semana = window_stat(&daily, sem_ini, sem_fin);
    res.carga_semana = Some(semana.sum);
    res.carga_media_semana = Some(semana.mean);
    // Monotonía solo con varianza semanal positiva: una semana de una sola
    // sesión o de carga constante no tiene monotonía (ni es infinita ni 0).
    res.monotonia_semana = (semana.std > 0.0).then(|| semana.mean / semana.std);
    res.variabilidad_semana = Some(semana.std);

    // Día exacto de referencia
    let dia = daily.iter().find(|d| d.fecha_sesion == end_day);
    res.ua_total_dia = Some(dia.map_or(0.0, |d| d.ua_total));
    res.minutos_sesion = match dia {
        // Día presente sin minutos en ningún registro: ausente, no cero.
        Some(d) => d.minutos_total,
        None => Some(0.0),
    };

    // Mes natural
    let (mes_ini, mes_fin) = month_range(end_day);
    let mes = window_stat(&daily, mes_ini, mes_fin);
    res.carga_mes = Some(mes.sum);
    res.carga_media_mes = Some(mes.mean);

    // Fatiga aguda: SUMA de los últimos 7 días (no media)
    let (ag_ini, ag_fin) = trailing_range(end_day, 7);
    let fatiga_aguda = window_stat(&daily, ag_ini, ag_fin).sum;
    let fatiga_aguda_diaria = fatiga_aguda / 7.0;
    res.fatiga_aguda = Some(fatiga_aguda);
    res.fatiga_aguda_diaria = Some(fatiga_aguda_diaria);

    // Crónicas y dependientes. Una crónica de 0.0 cuenta como "sin datos"
    // para adaptación/recuperación/ACWR: el cero real y la ausencia son
    // indistinguibles aguas abajo (hueco de modelado conocido, se mantiene
    // por compatibilidad).
    let con_datos = |c: f64| (c != 0.0).then_some(c);

    let c28 = carga_cronica(&daily, end_day, 28);
    let c42 = carga_cronica(&daily, end_day, 42);
    let c56 = carga_cronica(&daily, end_day, 56);
    res.fatiga_cronica_28d = Some(c28);
    res.fatiga_cronica_42d = Some(c42);
    res.fatiga_cronica_56d = Some(c56);

    res.adaptacion_28d = con_datos(c28).map(|c| c - fatiga_aguda_diaria);
    res.adaptacion_42d = con_datos(c42).map(|c| c - fatiga_aguda_diaria);
    res.adaptacion_56d = con_datos(c56).map(|c| c - fatiga_aguda_diaria);

    // Recuperación comparte fórmula con adaptación en esta versión
    // (pregunta abierta aguas arriba; se mantiene idéntica a propósito).
    res.recuperacion_28d = res.adaptacion_28d;
    res.recuperacion_42d = res.adaptacion_42d;
    res.recuperacion_56d = res.adaptacion_56d;

    res.acwr_28d = con_datos(c28).map(|c| fatiga_aguda_diaria / c);
    res.acwr_42d = con_datos(c42).map(|c| fatiga_aguda_diaria / c);
    res.acwr_56d = con_datos(c56).map(|c| fatiga_aguda_diaria / c);

    res.daily_table = daily;
    res
}
