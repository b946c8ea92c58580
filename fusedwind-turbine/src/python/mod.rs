use fusedwind_core::python::PyTypeDescriptor;
use fusedwind_core::registry::CONTRACT_REGISTRY;
use pyo3::prelude::*;
use pyo3::{pymodule, Bound, PyResult};
use pythonize::pythonize;

use crate::structure;
use crate::turbine::WindTurbineStructure;

/// Declarations of all turbine structure trees
#[pyfunction]
fn schemas() -> Vec<PyTypeDescriptor> {
    structure::schemas()
        .into_iter()
        .map(PyTypeDescriptor)
        .collect()
}

/// Declare every turbine structure tree as a base, returning the interface names
#[pyfunction]
fn register_schemas() -> PyResult<Vec<String>> {
    let interfaces = structure::register_schemas(&CONTRACT_REGISTRY)?;
    Ok(interfaces.iter().map(|i| i.name().to_string()).collect())
}

/// Load a turbine structure from TOML, check its slots and return it as a dict
#[pyfunction]
fn load_turbine_structure(py: Python<'_>, content: &str) -> PyResult<PyObject> {
    let turbine = WindTurbineStructure::from_toml_str(content)?;
    structure::register_schemas(&CONTRACT_REGISTRY)?;
    turbine.validate_slots(&CONTRACT_REGISTRY)?;
    Ok(pythonize(py, &turbine)?.into_py(py))
}

#[pymodule]
pub fn turbine(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(schemas, m)?)?;
    m.add_function(wrap_pyfunction!(register_schemas, m)?)?;
    m.add_function(wrap_pyfunction!(load_turbine_structure, m)?)?;
    Ok(())
}
