//! Per-dependency CMake package config generator

use crate::layout::Layout;
use crate::resolver::{Resolution, ResolvedDependency};
use std::path::PathBuf;
use tokio::fs;

use kiln_errors::Error;

/// Write one `<name>-config.cmake` per resolved dependency
pub(crate) async fn emit(
    resolution: &Resolution,
    layout: &Layout,
) -> Result<Vec<PathBuf>, Error> {
    let mut written = Vec::with_capacity(resolution.dependencies().len());
    for dep in resolution.dependencies() {
        let path = layout
            .generators_dir
            .join(format!("{}-config.cmake", dep.spec.name));
        let content = package_config(dep);
        fs::write(&path, content)
            .await
            .map_err(|e| Error::io_with_path(&e, path.clone()))?;
        written.push(path);
    }
    Ok(written)
}

fn package_config(dep: &ResolvedDependency) -> String {
    let name = &dep.spec.name;
    format!(
        r#"# Package config generated by kiln for {spec}. Do not edit.

set({name}_FOUND TRUE)
set({name}_VERSION "{version}")
set({name}_ROOT "{root}")
set({name}_INCLUDE_DIRS "{include}")
set({name}_LIBRARY_DIRS "{lib}")

if(NOT TARGET {name}::{name})
  add_library({name}::{name} INTERFACE IMPORTED)
  set_target_properties({name}::{name} PROPERTIES
    INTERFACE_INCLUDE_DIRECTORIES "{include}")
endif()
"#,
        spec = dep.spec,
        version = dep.spec.version,
        root = dep.root.display(),
        include = dep.include_dir().display(),
        lib = dep.lib_dir().display(),
    )
}
