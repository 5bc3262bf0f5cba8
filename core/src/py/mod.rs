//! Binding PyO3 para el dashboard (Streamlit). Entrada y salida en JSON
//! plano; toda la lógica vive en el core.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::wrap_pyfunction;

fn a_py_err(e: crate::MetricsError) -> PyErr {
    PyValueError::new_err(e.to_string())
}

#[pyfunction]
#[pyo3(signature = (registros_json, filtros_json=None))]
fn rpe_metrics_json(registros_json: &str, filtros_json: Option<&str>) -> PyResult<String> {
    crate::compute_rpe_metrics_json(registros_json, filtros_json).map_err(a_py_err)
}

#[pyfunction]
#[pyo3(signature = (registros_json, ventana_aguda=None, ventana_cronica=None))]
fn rpe_timeseries_json(
    registros_json: &str,
    ventana_aguda: Option<usize>,
    ventana_cronica: Option<usize>,
) -> PyResult<String> {
    crate::compute_rpe_timeseries_json(registros_json, ventana_aguda, ventana_cronica)
        .map_err(a_py_err)
}

#[pyfunction]
#[pyo3(signature = (registros_json, ventana_aguda=None, ventana_cronica=None))]
fn rpe_timeseries_grupal_json(
    registros_json: &str,
    ventana_aguda: Option<usize>,
    ventana_cronica: Option<usize>,
) -> PyResult<String> {
    crate::compute_rpe_timeseries_grupal_json(registros_json, ventana_aguda, ventana_cronica)
        .map_err(a_py_err)
}

#[pyfunction]
#[pyo3(signature = (registros_json, filtros_json=None))]
fn group_snapshot_json(registros_json: &str, filtros_json: Option<&str>) -> PyResult<String> {
    crate::compute_group_snapshot_json(registros_json, filtros_json).map_err(a_py_err)
}

#[pymodule]
fn cargacontrol_core(_py: Python<'_>, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(rpe_metrics_json, m)?)?;
    m.add_function(wrap_pyfunction!(rpe_timeseries_json, m)?)?;
    m.add_function(wrap_pyfunction!(rpe_timeseries_grupal_json, m)?)?;
    m.add_function(wrap_pyfunction!(group_snapshot_json, m)?)?;
    Ok(())
}
