use fusedwind_core::python::contracts;
use fusedwind_turbine::python::turbine;
use pyo3::prelude::*;
use pyo3::wrap_pymodule;

#[pymodule]
#[pyo3(name = "_lib")]
fn fusedwind(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    m.add_wrapped(wrap_pymodule!(contracts))?;
    m.add_wrapped(wrap_pymodule!(turbine))?;

    set_path(m, "fusedwind._lib.core", "core")?;
    set_path(m, "fusedwind._lib.turbine", "turbine")?;

    Ok(())
}

/// Make the submodules importable with `import fusedwind._lib.<name>`
fn set_path(m: &Bound<'_, PyModule>, path: &str, module: &str) -> PyResult<()> {
    let sys = m.py().import_bound("sys")?;
    let modules = sys.getattr("modules")?;
    modules.set_item(path, m.getattr(module)?)?;
    Ok(())
}
