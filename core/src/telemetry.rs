//! Contadores Prometheus del core. El host decide si expone el registro;
//! aquí solo se cuenta.

use once_cell::sync::Lazy;
use prometheus::{IntCounter, Registry};

/// Registro propio del core.
pub static REGISTRO: Lazy<Registry> = Lazy::new(Registry::new);

/// Registros de sesión descartados en la normalización (fecha o UA no
/// parseable).
pub static REGISTROS_DESCARTADOS: Lazy<IntCounter> = Lazy::new(|| {
    contador(
        "carga_registros_descartados_total",
        "Registros checkOut descartados por fecha o UA no parseable",
    )
});

pub static SNAPSHOTS_CALCULADOS: Lazy<IntCounter> = Lazy::new(|| {
    contador(
        "carga_snapshots_calculados_total",
        "Snapshots de métricas calculados",
    )
});

pub static SERIES_GENERADAS: Lazy<IntCounter> = Lazy::new(|| {
    contador(
        "carga_series_generadas_total",
        "Series continuas de carga generadas",
    )
});

fn contador(nombre: &str, ayuda: &str) -> IntCounter {
    let c = IntCounter::new(nombre, ayuda).expect("nombre de contador válido");
    // Nombre duplicado => se sigue con el contador sin registrar.
    let _ = REGISTRO.register(Box::new(c.clone()));
    c
}
