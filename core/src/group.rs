use std::collections::BTreeMap;

use log::debug;

use crate::daily::daily_loads;
use crate::models::{GroupSnapshot, GroupSummary, PlayerRow, RpeFilters, SessionRecord};
use crate::normalize::apply_filters;
use crate::snapshot::compute_snapshot;

/// Una fila de métricas por jugadora, reutilizando la tubería individual.
/// La fecha de referencia compartida viene de `flt.end`; si no hay, cada
/// jugadora ancla en su propio máximo. Jugadoras sin registros usables (o
/// sin id atribuible) quedan fuera en silencio.
///
/// El bucle no tiene dependencias entre iteraciones; el orden de salida es
/// el del id y no significa nada.
pub fn compute_rpe_metrics_by_player(
    registros: &[SessionRecord],
    flt: &RpeFilters,
) -> Vec<PlayerRow> {
    let filtrados = apply_filters(registros, flt);

    let mut por_jugadora: BTreeMap<&str, Vec<&SessionRecord>> = BTreeMap::new();
    for r in &filtrados {
        if let Some(id) = r.id_jugadora.as_deref() {
            por_jugadora.entry(id).or_default().push(r);
        }
    }

    let mut filas = Vec::with_capacity(por_jugadora.len());
    for (id, propios) in por_jugadora {
        let registros_jug: Vec<SessionRecord> = propios.into_iter().cloned().collect();
        let nombre_jugadora = registros_jug
            .iter()
            .find_map(|r| r.nombre_jugadora.clone());
        let m = compute_snapshot(daily_loads(&registros_jug), flt.end);

        filas.push(PlayerRow {
            id_jugadora: id.to_string(),
            nombre_jugadora,
            ua_dia: m.ua_total_dia,
            minutos_dia: m.minutos_sesion,
            carga_semana: m.carga_semana,
            carga_mes: m.carga_mes,
            fatiga_aguda: m.fatiga_aguda,
            fatiga_cronica_28d: m.fatiga_cronica_28d,
            fatiga_cronica_42d: m.fatiga_cronica_42d,
            fatiga_cronica_56d: m.fatiga_cronica_56d,
            acwr_28d: m.acwr_28d,
            acwr_42d: m.acwr_42d,
            acwr_56d: m.acwr_56d,
            monotonia: m.monotonia_semana,
            variabilidad: m.variabilidad_semana,
            adaptacion_28d: m.adaptacion_28d,
            adaptacion_42d: m.adaptacion_42d,
            adaptacion_56d: m.adaptacion_56d,
            recuperacion_28d: m.recuperacion_28d,
            recuperacion_42d: m.recuperacion_42d,
            recuperacion_56d: m.recuperacion_56d,
        });
    }
    filas
}

/// Agrega la tabla por jugadora a escalares de equipo. Medias y sumas
/// ignoran nulos; una columna totalmente nula agrega a `None`, no a cero.
pub fn aggregate_group_metrics(filas: &[PlayerRow]) -> GroupSummary {
    if filas.is_empty() {
        return GroupSummary::default();
    }
    let col = |f: fn(&PlayerRow) -> Option<f64>| -> Vec<Option<f64>> {
        filas.iter().map(f).collect()
    };

    GroupSummary {
        jugadoras_activas: filas.len(),
        carga_semana_total: suma_sin_nulos(&col(|p| p.carga_semana)),
        carga_semana_media: media_sin_nulos(&col(|p| p.carga_semana)),
        fatiga_aguda_media: media_sin_nulos(&col(|p| p.fatiga_aguda)),
        fatiga_cronica_28d_media: media_sin_nulos(&col(|p| p.fatiga_cronica_28d)),
        fatiga_cronica_42d_media: media_sin_nulos(&col(|p| p.fatiga_cronica_42d)),
        fatiga_cronica_56d_media: media_sin_nulos(&col(|p| p.fatiga_cronica_56d)),
        acwr_medio_28d: media_sin_nulos(&col(|p| p.acwr_28d)),
        acwr_medio_42d: media_sin_nulos(&col(|p| p.acwr_42d)),
        acwr_medio_56d: media_sin_nulos(&col(|p| p.acwr_56d)),
        monotonia_media: media_sin_nulos(&col(|p| p.monotonia)),
        dispersion_carga: dispersion_sin_nulos(&col(|p| p.carga_semana)),
    }
}

/// Tabla por jugadora + resumen de equipo en una llamada.
pub fn compute_group_snapshot(registros: &[SessionRecord], flt: &RpeFilters) -> GroupSnapshot {
    let jugadoras = compute_rpe_metrics_by_player(registros, flt);
    let resumen = aggregate_group_metrics(&jugadoras);
    debug!("grupo: {} jugadoras activas", resumen.jugadoras_activas);
    GroupSnapshot { jugadoras, resumen }
}

fn presentes(valores: &[Option<f64>]) -> Vec<f64> {
    valores.iter().filter_map(|v| *v).collect()
}

fn suma_sin_nulos(valores: &[Option<f64>]) -> Option<f64> {
    let xs = presentes(valores);
    (!xs.is_empty()).then(|| xs.iter().sum::<f64>())
}

fn media_sin_nulos(valores: &[Option<f64>]) -> Option<f64> {
    let xs = presentes(valores);
    (!xs.is_empty()).then(|| xs.iter().sum::<f64>() / xs.len() as f64)
}

/// Desviación típica poblacional ignorando nulos (una sola jugadora => 0.0).
fn dispersion_sin_nulos(valores: &[Option<f64>]) -> Option<f64> {
    let xs = presentes(valores);
    if xs.is_empty() {
        return None;
    }
    let n = xs.len() as f64;
    let media = xs.iter().sum::<f64>() / n;
    Some((xs.iter().map(|x| (x - media).powi(2)).sum::<f64>() / n).sqrt())
}
