use cargacontrol_core::group::{aggregate_group_metrics, compute_group_snapshot};
use cargacontrol_core::models::{RawRecord, RpeFilters, SessionRecord};
use cargacontrol_core::normalize::prepare_checkout;
use chrono::NaiveDate;
use serde_json::json;

fn f(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn sesion_de(id: &str, fecha: &str, ua: f64) -> SessionRecord {
    SessionRecord {
        id_jugadora: Some(id.into()),
        nombre_jugadora: Some(format!("Jugadora {id}")),
        fecha_sesion: f(fecha),
        ua,
        minutos_sesion: None,
        turno: None,
    }
}

fn hasta(end: &str) -> RpeFilters {
    RpeFilters {
        end: Some(f(end)),
        ..Default::default()
    }
}

/// Semana del 2025-03-03 (lunes) al 2025-03-09 (domingo).
fn plantilla_de_dos() -> Vec<SessionRecord> {
    let mut registros = Vec::new();
    // A: [10, 20, 30, 0, 0, 0, 0]
    for (i, ua) in [10.0, 20.0, 30.0, 0.0, 0.0, 0.0, 0.0].iter().enumerate() {
        registros.push(SessionRecord {
            fecha_sesion: f("2025-03-03") + chrono::Duration::days(i as i64),
            ..sesion_de("A", "2025-03-03", *ua)
        });
    }
    // B: [5, 5, 5, 5, 5, 5, 5]
    for i in 0..7i64 {
        registros.push(SessionRecord {
            fecha_sesion: f("2025-03-03") + chrono::Duration::days(i),
            ..sesion_de("B", "2025-03-03", 5.0)
        });
    }
    registros
}

#[test]
fn escenario_de_dos_jugadoras() {
    let grupo = compute_group_snapshot(&plantilla_de_dos(), &hasta("2025-03-09"));
    let r = &grupo.resumen;

    assert_eq!(r.jugadoras_activas, 2);
    assert_eq!(r.carga_semana_total, Some(95.0)); // 60 + 35
    assert_eq!(r.carga_semana_media, Some(47.5));
    assert_eq!(r.fatiga_aguda_media, Some(47.5));
    // poblacional sobre [60, 35]
    assert_eq!(r.dispersion_carga, Some(12.5));
    // las dos llevan 7 días a ritmo constante de su propia media
    assert_eq!(r.acwr_medio_28d, Some(1.0));

    // B tiene carga plana: sin monotonía; la media grupal ignora el nulo
    let fila_a = grupo.jugadoras.iter().find(|p| p.id_jugadora == "A").unwrap();
    let fila_b = grupo.jugadoras.iter().find(|p| p.id_jugadora == "B").unwrap();
    assert_eq!(fila_b.monotonia, None);
    assert_eq!(r.monotonia_media, fila_a.monotonia);
    assert_eq!(fila_a.carga_semana, Some(60.0));
    assert_eq!(fila_b.carga_semana, Some(35.0));
}

#[test]
fn jugadora_sin_registros_usables_queda_fuera() {
    let crudas: Vec<RawRecord> = serde_json::from_value(json!([
        {"tipo": "checkOut", "id_jugadora": "A", "fecha_sesion": "2025-03-03", "ua": 100},
        {"tipo": "checkIn", "id_jugadora": "B", "fecha_sesion": "2025-03-03"},
        {"tipo": "checkOut", "id_jugadora": "B", "fecha_sesion": "2025-03-04", "ua": "??"}
    ]))
    .unwrap();
    let limpios = prepare_checkout(&crudas);

    let grupo = compute_group_snapshot(&limpios, &RpeFilters::default());
    assert_eq!(grupo.jugadoras.len(), 1);
    assert_eq!(grupo.resumen.jugadoras_activas, 1);
    assert_eq!(grupo.jugadoras[0].id_jugadora, "A");
    // sin afectar a las medias del grupo
    assert_eq!(grupo.resumen.carga_semana_media, Some(100.0));
}

#[test]
fn filas_sin_id_no_se_pueden_atribuir() {
    let mut sin_id = sesion_de("A", "2025-03-03", 100.0);
    sin_id.id_jugadora = None;

    let grupo = compute_group_snapshot(&[sin_id], &RpeFilters::default());
    assert!(grupo.jugadoras.is_empty());
    assert_eq!(grupo.resumen.jugadoras_activas, 0);
    assert_eq!(grupo.resumen.carga_semana_total, None);
}

#[test]
fn columna_toda_nula_agrega_a_none() {
    // una sola sesión por jugadora: monotonía nula en ambas
    let registros = vec![
        sesion_de("A", "2025-03-03", 100.0),
        sesion_de("B", "2025-03-04", 150.0),
    ];
    let grupo = compute_group_snapshot(&registros, &hasta("2025-03-09"));
    assert_eq!(grupo.resumen.monotonia_media, None);
    assert_eq!(grupo.resumen.jugadoras_activas, 2);
}

#[test]
fn sin_end_cada_jugadora_ancla_en_su_maximo() {
    // A terminó en marzo, B dejó de registrar en febrero
    let registros = vec![
        sesion_de("A", "2025-03-05", 200.0),
        sesion_de("B", "2025-02-12", 80.0),
    ];
    let grupo = compute_group_snapshot(&registros, &RpeFilters::default());

    let fila_b = grupo.jugadoras.iter().find(|p| p.id_jugadora == "B").unwrap();
    // la semana de B es la de su propia última sesión, no la de A
    assert_eq!(fila_b.carga_semana, Some(80.0));
    assert_eq!(fila_b.ua_dia, Some(80.0));
}

#[test]
fn agregado_de_tabla_vacia() {
    let resumen = aggregate_group_metrics(&[]);
    assert_eq!(resumen.jugadoras_activas, 0);
    assert_eq!(resumen.carga_semana_total, None);
    assert_eq!(resumen.dispersion_carga, None);
}
