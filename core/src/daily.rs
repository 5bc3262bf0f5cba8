use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::{DailyLoad, SessionRecord};

/// Suma UA y minutos de sesión por fecha_sesion. Los días sin sesión no se
/// emiten; orden ascendente por fecha. Sobre su propia salida reexpresada
/// como registros es idempotente.
pub fn daily_loads(registros: &[SessionRecord]) -> Vec<DailyLoad> {
    let mut por_dia: BTreeMap<NaiveDate, (f64, Option<f64>)> = BTreeMap::new();

    for r in registros {
        let acc = por_dia.entry(r.fecha_sesion).or_insert((0.0, None));
        acc.0 += r.ua;
        // min_count=1: el total de minutos existe solo si algún registro
        // del día los trae; los parciales ausentes cuentan como cero.
        if let Some(m) = r.minutos_sesion {
            acc.1 = Some(acc.1.unwrap_or(0.0) + m);
        }
    }

    por_dia
        .into_iter()
        .map(|(fecha_sesion, (ua_total, minutos_total))| DailyLoad {
            fecha_sesion,
            ua_total,
            minutos_total,
        })
        .collect()
}

/// Calendario diario continuo [primera..última sesión] con UA 0.0 en los
/// días sin sesión. Al contrario que las ventanas del snapshot, aquí los
/// días de descanso SÍ cuentan como carga cero (asimetría intencional).
pub fn daily_calendar(registros: &[SessionRecord]) -> Vec<(NaiveDate, f64)> {
    let mut por_dia: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for r in registros {
        *por_dia.entry(r.fecha_sesion).or_insert(0.0) += r.ua;
    }

    let (primero, ultimo) = match (por_dia.keys().next(), por_dia.keys().next_back()) {
        (Some(&p), Some(&u)) => (p, u),
        _ => return Vec::new(),
    };

    let mut filas = Vec::new();
    let mut dia = primero;
    loop {
        filas.push((dia, por_dia.get(&dia).copied().unwrap_or(0.0)));
        if dia == ultimo {
            break;
        }
        match dia.succ_opt() {
            Some(siguiente) => dia = siguiente,
            None => break,
        }
    }
    filas
}
