//! Python bindings for declarations and contract checks.
//!
//! The functions mirror the Rust API but operate on the global
//! [`CONTRACT_REGISTRY`], so declarations made from Python are visible to every
//! other user of the extension module.

use crate::contract::compare;
use crate::errors::ContractError;
use crate::field::{FieldDefinition, FieldKind, IoType, TypeDescriptor, TypeKind};
use crate::interface::{interface as synthesise_interface, interface_instance_for, Interface};
use crate::registry::CONTRACT_REGISTRY;
use pyo3::exceptions::{PyTypeError, PyValueError};
use pyo3::prelude::*;
use pythonize::pythonize;

impl From<ContractError> for PyErr {
    fn from(err: ContractError) -> PyErr {
        match err {
            ContractError::InvalidDeclaration { .. } | ContractError::Config(_) => {
                PyValueError::new_err(err.to_string())
            }
            _ => PyTypeError::new_err(err.to_string()),
        }
    }
}

fn parse_iotype(iotype: Option<&str>) -> PyResult<Option<IoType>> {
    match iotype {
        None => Ok(None),
        Some("in") => Ok(Some(IoType::In)),
        Some("out") => Ok(Some(IoType::Out)),
        Some(other) => Err(PyValueError::new_err(format!(
            "Unknown iotype '{other}'. Valid iotypes: in, out"
        ))),
    }
}

/// Python wrapper for FieldDefinition.
#[pyclass(name = "FieldDefinition", module = "fusedwind.core")]
#[derive(Clone)]
pub struct PyFieldDefinition(pub FieldDefinition);

#[pymethods]
impl PyFieldDefinition {
    #[new]
    #[pyo3(signature = (name, kind="Float", iotype=None, desc=""))]
    fn new(name: String, kind: &str, iotype: Option<&str>, desc: &str) -> PyResult<Self> {
        let kind = match kind {
            "Float" => FieldKind::Float,
            "Int" => FieldKind::Int,
            "Bool" => FieldKind::Bool,
            "Str" => FieldKind::Str,
            "Enum" => FieldKind::Enum,
            "Array" => FieldKind::Array,
            "List" => FieldKind::List,
            "Any" => FieldKind::Any,
            other => {
                return Err(PyValueError::new_err(format!(
                    "Unknown field kind '{other}'"
                )))
            }
        };
        let mut field = FieldDefinition::new(name, kind).with_description(desc);
        field.iotype = parse_iotype(iotype)?;
        Ok(PyFieldDefinition(field))
    }

    #[getter]
    fn name(&self) -> &str {
        &self.0.name
    }

    #[getter]
    fn kind(&self) -> String {
        self.0.kind.to_string()
    }

    #[getter]
    fn iotype(&self) -> Option<String> {
        self.0.iotype.map(|io| io.to_string())
    }

    #[getter]
    fn description(&self) -> &str {
        &self.0.description
    }

    fn __repr__(&self) -> String {
        format!(
            "FieldDefinition(name={:?}, kind={}, iotype={:?})",
            self.0.name, self.0.kind, self.0.iotype
        )
    }
}

/// Python wrapper for TypeDescriptor.
#[pyclass(name = "TypeDescriptor", module = "fusedwind.core")]
#[derive(Clone)]
pub struct PyTypeDescriptor(pub TypeDescriptor);

#[pymethods]
impl PyTypeDescriptor {
    /// Declare a variable tree with the given field names (all Float)
    #[staticmethod]
    #[pyo3(signature = (name, fields=Vec::new()))]
    fn variable_tree(name: String, fields: Vec<String>) -> Self {
        let descriptor = fields
            .into_iter()
            .fold(TypeDescriptor::variable_tree(name), |d, f| {
                d.var(f, FieldKind::Float)
            });
        PyTypeDescriptor(descriptor)
    }

    /// Declare a component with the given input and output names (all Float)
    #[staticmethod]
    #[pyo3(signature = (name, inputs=Vec::new(), outputs=Vec::new()))]
    fn component(name: String, inputs: Vec<String>, outputs: Vec<String>) -> Self {
        let descriptor = inputs
            .into_iter()
            .fold(TypeDescriptor::component(name), |d, f| {
                d.input(f, FieldKind::Float)
            });
        let descriptor = outputs
            .into_iter()
            .fold(descriptor, |d, f| d.output(f, FieldKind::Float));
        PyTypeDescriptor(descriptor)
    }

    /// Parse a declaration from a TOML document
    #[staticmethod]
    fn from_toml(content: &str) -> PyResult<Self> {
        Ok(PyTypeDescriptor(TypeDescriptor::from_toml_str(content)?))
    }

    /// Add a field to the declaration
    fn add_field(&mut self, field: PyFieldDefinition) -> PyResult<()> {
        self.0.fields.push(field.0);
        if let Err(err) = self.0.validate() {
            self.0.fields.pop();
            return Err(err.into());
        }
        Ok(())
    }

    #[getter]
    fn name(&self) -> &str {
        &self.0.name
    }

    #[getter]
    fn kind(&self) -> String {
        self.0.kind.to_string()
    }

    #[getter]
    fn fields(&self) -> Vec<PyFieldDefinition> {
        self.0
            .fields
            .iter()
            .cloned()
            .map(PyFieldDefinition)
            .collect()
    }

    fn list_vars(&self) -> Vec<String> {
        self.0.list_vars().into_iter().map(String::from).collect()
    }

    fn list_inputs(&self) -> Vec<String> {
        self.0.list_inputs().into_iter().map(String::from).collect()
    }

    fn list_outputs(&self) -> Vec<String> {
        self.0.list_outputs().into_iter().map(String::from).collect()
    }

    fn is_variable_tree(&self) -> bool {
        self.0.kind == TypeKind::VariableTree
    }

    fn __repr__(&self) -> String {
        format!(
            "TypeDescriptor(name={:?}, kind={}, fields={})",
            self.0.name,
            self.0.kind,
            self.0.fields.len()
        )
    }
}

/// Python wrapper for Interface.
#[pyclass(name = "Interface", module = "fusedwind.core")]
#[derive(Clone)]
pub struct PyInterface(pub Interface);

#[pymethods]
impl PyInterface {
    #[getter]
    fn name(&self) -> &str {
        self.0.name()
    }

    /// Name of the type the interface was synthesised from
    #[getter]
    fn source(&self) -> &str {
        self.0.source()
    }

    fn same_contract(&self, other: &PyInterface) -> bool {
        self.0.same_contract(&other.0)
    }

    fn __eq__(&self, other: &PyInterface) -> bool {
        self.0 == other.0
    }

    fn __hash__(&self) -> u64 {
        self.0.id()
    }

    fn __repr__(&self) -> String {
        format!("<Interface {}>", self.0.name())
    }
}

/// Synthesise a new interface for a type
#[pyfunction]
fn interface(cls: &PyTypeDescriptor) -> PyInterface {
    PyInterface(synthesise_interface(&cls.0))
}

/// Declare a type as a base, returning the type unchanged
#[pyfunction]
fn base(cls: PyTypeDescriptor) -> PyResult<PyTypeDescriptor> {
    CONTRACT_REGISTRY.base(&cls.0)?;
    Ok(cls)
}

/// Declare that `cls` implements `base`, returning `cls` unchanged
#[pyfunction]
fn implement_base(cls: PyTypeDescriptor, base: &PyTypeDescriptor) -> PyResult<PyTypeDescriptor> {
    CONTRACT_REGISTRY.implement_base(&cls.0, &base.0)?;
    Ok(cls)
}

/// Declare that `cls` implements every type in `bases`, returning `cls` unchanged
#[pyfunction]
fn implement_bases(
    cls: PyTypeDescriptor,
    bases: Vec<PyTypeDescriptor>,
) -> PyResult<PyTypeDescriptor> {
    let bases: Vec<TypeDescriptor> = bases.into_iter().map(|b| b.0).collect();
    CONTRACT_REGISTRY.implement_bases(&cls.0, &bases)?;
    Ok(cls)
}

/// Declare a field that must be filled by a type satisfying the interface of `cls`
#[pyfunction]
#[pyo3(signature = (cls, name, desc="", iotype=None))]
fn interface_instance(
    cls: &PyTypeDescriptor,
    name: String,
    desc: &str,
    iotype: Option<&str>,
) -> PyResult<PyFieldDefinition> {
    let mut field = interface_instance_for(&cls.0, name).with_description(desc);
    field.iotype = parse_iotype(iotype)?;
    Ok(PyFieldDefinition(field))
}

/// Compare two types without registering anything, returning the report as a dict
#[pyfunction]
fn check(py: Python<'_>, derived: &PyTypeDescriptor, base: &PyTypeDescriptor) -> PyResult<PyObject> {
    let report = compare(&derived.0, &base.0);
    Ok(pythonize(py, &report)?.into_py(py))
}

/// Whether a type satisfies the named interface in the global registry
#[pyfunction]
fn satisfies(type_name: &str, interface: &str) -> bool {
    CONTRACT_REGISTRY.satisfies(type_name, interface)
}

#[pymodule]
#[pyo3(name = "core")]
pub fn contracts(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyFieldDefinition>()?;
    m.add_class::<PyTypeDescriptor>()?;
    m.add_class::<PyInterface>()?;
    m.add_function(wrap_pyfunction!(interface, m)?)?;
    m.add_function(wrap_pyfunction!(base, m)?)?;
    m.add_function(wrap_pyfunction!(implement_base, m)?)?;
    m.add_function(wrap_pyfunction!(implement_bases, m)?)?;
    m.add_function(wrap_pyfunction!(interface_instance, m)?)?;
    m.add_function(wrap_pyfunction!(check, m)?)?;
    m.add_function(wrap_pyfunction!(satisfies, m)?)?;
    Ok(())
}
