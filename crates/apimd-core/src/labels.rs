//! Localized strings used in generated pages.

use serde::Deserialize;

/// Headings, table captions and empty-section placeholders.
///
/// Defaults are Spanish; every field can be overridden from the
/// `[labels]` section of `apimd.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Labels {
    /// Description section heading; also the root entry title in the manifest.
    pub description: String,
    /// Heading of namespace pages.
    pub namespace_description: String,
    /// Caption above the fenced class signature.
    pub class: String,
    pub constructors: String,
    pub functions: String,
    pub properties: String,
    pub constants: String,
    pub no_constructors: String,
    pub no_functions: String,
    pub no_properties: String,
    pub no_constants: String,
    pub parameters: String,
    pub type_parameters: String,
    pub returns: String,
    pub value: String,
    pub exceptions: String,
    pub remarks: String,
    pub example: String,
    /// Name column of parameter tables.
    pub name: String,
    /// Exception column of exception tables.
    pub exception: String,
    /// Column headings of the package source table.
    pub source_kind: String,
    pub source: String,
    pub nuget_package: String,
    pub devops_package: String,
    pub source_code: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            description: "Descripción".to_owned(),
            namespace_description: "Descripción del namespace".to_owned(),
            class: "Clase".to_owned(),
            constructors: "Constructores".to_owned(),
            functions: "Funciones".to_owned(),
            properties: "Propiedades".to_owned(),
            constants: "Constantes".to_owned(),
            no_constructors: "no existen constructores".to_owned(),
            no_functions: "no existen funciones".to_owned(),
            no_properties: "no existen propiedades".to_owned(),
            no_constants: "no existen campos".to_owned(),
            parameters: "Parámetros".to_owned(),
            type_parameters: "Parámetros de tipo".to_owned(),
            returns: "Retorna".to_owned(),
            value: "Valor".to_owned(),
            exceptions: "Excepciones".to_owned(),
            remarks: "Observaciones".to_owned(),
            example: "Ejemplo".to_owned(),
            name: "Nombre".to_owned(),
            exception: "Excepción".to_owned(),
            source_kind: "Tipo".to_owned(),
            source: "Fuente".to_owned(),
            nuget_package: "Paquete en Nuget.org".to_owned(),
            devops_package: "Paquete en devops".to_owned(),
            source_code: "Código fuente".to_owned(),
        }
    }
}
